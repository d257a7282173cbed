//! Error types for configuration resolution.
//!
//! Each failure mode gets its own error struct carrying the offending
//! names or fields; [`ConfigError`] wraps them for callers that go
//! through the [`ConfigStore`](crate::store::ConfigStore).

use std::fmt;

/// Umbrella error for configuration loading and lookup.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The configuration document could not be read from its source.
    #[error("{0}")]
    Read(#[from] ConfigReadError),

    /// The configuration document does not conform to the schema.
    #[error("{0}")]
    Validation(#[from] ConfigValidationError),

    /// The requested network has no entry in the root configuration.
    #[error("{0}")]
    NetworkNotFound(#[from] NetworkNotFoundError),

    /// The requested contract has no entry in the resolved network.
    #[error("{0}")]
    ContractNotFound(#[from] ContractNotFoundError),
}

/// The configuration document could not be read from its source.
#[derive(Debug, thiserror::Error)]
#[error("failed to read configuration document from {path}: {source}")]
pub struct ConfigReadError {
    /// Human-readable description of the source location.
    pub path: String,
    /// Underlying I/O error.
    #[source]
    pub source: std::io::Error,
}

/// A single schema violation, addressed by its field path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    /// Dotted path into the document (e.g. `meechain.contracts.MeeToken.address`).
    pub path: String,
    /// What is wrong with the value at that path.
    pub message: String,
}

impl ValidationIssue {
    /// Creates an issue for the given field path.
    #[must_use]
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// The configuration document is structurally or semantically invalid.
///
/// Carries every violation found in one pass, each naming the field that
/// failed.
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    /// The violations, in document walk order.
    pub issues: Vec<ValidationIssue>,
}

impl ConfigValidationError {
    /// Creates a validation error from collected issues.
    #[must_use]
    pub const fn new(issues: Vec<ValidationIssue>) -> Self {
        Self { issues }
    }

    /// Wraps a document-level parse failure (malformed JSON, wrong value
    /// type, missing required field) as a single root-level issue.
    #[must_use]
    pub fn from_parse(err: &serde_json::Error) -> Self {
        Self::new(vec![ValidationIssue::new("$", err.to_string())])
    }
}

impl fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid configuration document: ")?;
        for (i, issue) in self.issues.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{issue}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ConfigValidationError {}

/// The requested network has no entry in the root configuration.
#[derive(Debug, Clone)]
pub struct NetworkNotFoundError {
    /// The network name that was looked up.
    pub network: String,
}

impl NetworkNotFoundError {
    /// Creates a not-found error for the given network name.
    #[must_use]
    pub fn new(network: impl Into<String>) -> Self {
        Self {
            network: network.into(),
        }
    }
}

impl fmt::Display for NetworkNotFoundError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Network config not found: {}", self.network)
    }
}

impl std::error::Error for NetworkNotFoundError {}

/// The requested contract has no entry in the resolved network.
#[derive(Debug, Clone)]
pub struct ContractNotFoundError {
    /// The network the contract was looked up in.
    pub network: String,
    /// The contract name that was looked up.
    pub contract: String,
}

impl ContractNotFoundError {
    /// Creates a not-found error carrying both names.
    #[must_use]
    pub fn new(network: impl Into<String>, contract: impl Into<String>) -> Self {
        Self {
            network: network.into(),
            contract: contract.into(),
        }
    }
}

impl fmt::Display for ContractNotFoundError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Contract not found: {}.{}", self.network, self.contract)
    }
}

impl std::error::Error for ContractNotFoundError {}
