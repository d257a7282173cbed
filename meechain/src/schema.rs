//! Configuration document schema and validation.
//!
//! The document is a JSON mapping of network name to network definition,
//! each carrying a contract registry. Deserialization accepts the raw
//! shape; [`RootConfig::from_json`] then checks every semantic constraint
//! and produces typed definitions, collecting all violations with their
//! field paths instead of stopping at the first one.

use std::collections::HashMap;
use std::sync::LazyLock;

use alloy_primitives::Address;
use regex::Regex;
use serde::Deserialize;
use url::Url;

use crate::error::{ConfigValidationError, ValidationIssue};

/// Upper bound for a contract's declared decimal precision.
pub const MAX_DECIMALS: u8 = 36;

/// Shape of a well-formed contract address: `0x` plus 40 hex digits.
static ADDRESS_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new("^0x[0-9a-fA-F]{40}$").expect("address pattern compiles")
});

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawContract {
    address: String,
    abi_path: String,
    decimals: i64,
    version: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawNetwork {
    chain_id: i64,
    rpc_url: String,
    contracts: HashMap<String, RawContract>,
}

/// A contract entry resolved from the configuration document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractDefinition {
    /// Deployed contract address.
    pub address: Address,
    /// Reference to the contract's interface description, resolved
    /// externally; informational here.
    pub abi_path: String,
    /// Fixed-point scale converting human-readable amounts to token units.
    pub decimals: u8,
    /// Free-form version string, informational only.
    pub version: String,
}

/// A network entry resolved from the configuration document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkDefinition {
    /// EIP-155 chain ID.
    pub chain_id: u64,
    /// HTTP RPC endpoint used for direct connections.
    pub rpc_url: String,
    /// Contract registry keyed by contract name.
    pub contracts: HashMap<String, ContractDefinition>,
}

impl NetworkDefinition {
    /// Looks up a contract by name within this network.
    #[must_use]
    pub fn contract(&self, name: &str) -> Option<&ContractDefinition> {
        self.contracts.get(name)
    }
}

/// The validated root configuration: network name to network definition.
///
/// Immutable once constructed; lookup is by key only.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RootConfig {
    networks: HashMap<String, NetworkDefinition>,
}

impl RootConfig {
    /// Parses and validates a raw JSON configuration document.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigValidationError`] naming every offending field
    /// when the document is malformed JSON, has a wrong value type, or
    /// violates a semantic constraint (address shape, decimals range,
    /// chain ID positivity, RPC URL validity).
    pub fn from_json(document: &str) -> Result<Self, ConfigValidationError> {
        let raw: HashMap<String, RawNetwork> =
            serde_json::from_str(document).map_err(|e| ConfigValidationError::from_parse(&e))?;

        let mut issues = Vec::new();
        let mut networks = HashMap::with_capacity(raw.len());

        for (network_name, raw_network) in raw {
            let chain_id = u64::try_from(raw_network.chain_id).ok().filter(|id| *id >= 1);
            if chain_id.is_none() {
                issues.push(ValidationIssue::new(
                    format!("{network_name}.chainId"),
                    format!("must be a positive integer, got {}", raw_network.chain_id),
                ));
            }

            if let Err(e) = Url::parse(&raw_network.rpc_url) {
                issues.push(ValidationIssue::new(
                    format!("{network_name}.rpcUrl"),
                    format!("not a valid URL: {e}"),
                ));
            }

            let mut contracts = HashMap::with_capacity(raw_network.contracts.len());
            for (contract_name, raw_contract) in raw_network.contracts {
                let field = format!("{network_name}.contracts.{contract_name}");

                let address = if ADDRESS_PATTERN.is_match(&raw_contract.address) {
                    raw_contract.address.parse::<Address>().ok()
                } else {
                    None
                };
                if address.is_none() {
                    issues.push(ValidationIssue::new(
                        format!("{field}.address"),
                        format!(
                            "must match ^0x[0-9a-fA-F]{{40}}$, got {:?}",
                            raw_contract.address
                        ),
                    ));
                }

                let decimals = u8::try_from(raw_contract.decimals)
                    .ok()
                    .filter(|d| *d <= MAX_DECIMALS);
                if decimals.is_none() {
                    issues.push(ValidationIssue::new(
                        format!("{field}.decimals"),
                        format!(
                            "must be an integer in [0, {MAX_DECIMALS}], got {}",
                            raw_contract.decimals
                        ),
                    ));
                }

                if let (Some(address), Some(decimals)) = (address, decimals) {
                    contracts.insert(
                        contract_name,
                        ContractDefinition {
                            address,
                            abi_path: raw_contract.abi_path,
                            decimals,
                            version: raw_contract.version,
                        },
                    );
                }
            }

            if let Some(chain_id) = chain_id {
                networks.insert(
                    network_name,
                    NetworkDefinition {
                        chain_id,
                        rpc_url: raw_network.rpc_url,
                        contracts,
                    },
                );
            }
        }

        if issues.is_empty() {
            Ok(Self { networks })
        } else {
            Err(ConfigValidationError::new(issues))
        }
    }

    /// Looks up a network by name.
    #[must_use]
    pub fn network(&self, name: &str) -> Option<&NetworkDefinition> {
        self.networks.get(name)
    }

    /// Number of configured networks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.networks.len()
    }

    /// Whether the document defines no networks at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.networks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID: &str = r#"{
        "meechain": {
            "chainId": 31337,
            "rpcUrl": "http://127.0.0.1:8545",
            "contracts": {
                "MeeToken": {
                    "address": "0x5FbDB2315678afecb367f032d93F642f64180aa3",
                    "abiPath": "abi/MeeToken.json",
                    "decimals": 18,
                    "version": "1.0.0"
                }
            }
        }
    }"#;

    #[test]
    fn valid_document_preserves_values() {
        let root = RootConfig::from_json(VALID).unwrap();
        let network = root.network("meechain").unwrap();
        assert_eq!(network.chain_id, 31337);
        assert_eq!(network.rpc_url, "http://127.0.0.1:8545");

        let contract = network.contract("MeeToken").unwrap();
        assert_eq!(
            contract.address,
            "0x5FbDB2315678afecb367f032d93F642f64180aa3"
                .parse::<Address>()
                .unwrap()
        );
        assert_eq!(contract.abi_path, "abi/MeeToken.json");
        assert_eq!(contract.decimals, 18);
        assert_eq!(contract.version, "1.0.0");
    }

    #[test]
    fn malformed_address_names_the_field() {
        let doc = VALID.replace("0x5FbDB2315678afecb367f032d93F642f64180aa3", "0x1234");
        let err = RootConfig::from_json(&doc).unwrap_err();
        assert_eq!(err.issues.len(), 1);
        assert_eq!(err.issues[0].path, "meechain.contracts.MeeToken.address");
    }

    #[test]
    fn address_without_prefix_is_rejected() {
        let doc = VALID.replace(
            "0x5FbDB2315678afecb367f032d93F642f64180aa3",
            "5FbDB2315678afecb367f032d93F642f64180aa3aa",
        );
        let err = RootConfig::from_json(&doc).unwrap_err();
        assert_eq!(err.issues[0].path, "meechain.contracts.MeeToken.address");
    }

    #[test]
    fn decimals_out_of_range_is_rejected() {
        let doc = VALID.replace("\"decimals\": 18", "\"decimals\": 37");
        let err = RootConfig::from_json(&doc).unwrap_err();
        assert_eq!(err.issues[0].path, "meechain.contracts.MeeToken.decimals");

        let doc = VALID.replace("\"decimals\": 18", "\"decimals\": -1");
        let err = RootConfig::from_json(&doc).unwrap_err();
        assert_eq!(err.issues[0].path, "meechain.contracts.MeeToken.decimals");
    }

    #[test]
    fn decimals_bounds_are_inclusive() {
        let doc = VALID.replace("\"decimals\": 18", "\"decimals\": 36");
        assert!(RootConfig::from_json(&doc).is_ok());
        let doc = VALID.replace("\"decimals\": 18", "\"decimals\": 0");
        assert!(RootConfig::from_json(&doc).is_ok());
    }

    #[test]
    fn non_positive_chain_id_is_rejected() {
        let doc = VALID.replace("\"chainId\": 31337", "\"chainId\": 0");
        let err = RootConfig::from_json(&doc).unwrap_err();
        assert_eq!(err.issues[0].path, "meechain.chainId");
    }

    #[test]
    fn invalid_rpc_url_is_rejected() {
        let doc = VALID.replace("http://127.0.0.1:8545", "not a url");
        let err = RootConfig::from_json(&doc).unwrap_err();
        assert_eq!(err.issues[0].path, "meechain.rpcUrl");
    }

    #[test]
    fn missing_field_is_a_validation_error() {
        let doc = VALID.replace("\"abiPath\": \"abi/MeeToken.json\",", "");
        let err = RootConfig::from_json(&doc).unwrap_err();
        assert_eq!(err.issues[0].path, "$");
        assert!(err.issues[0].message.contains("abiPath"));
    }

    #[test]
    fn wrong_value_type_is_a_validation_error() {
        let doc = VALID.replace("\"decimals\": 18", "\"decimals\": \"18\"");
        assert!(RootConfig::from_json(&doc).is_err());
    }

    #[test]
    fn multiple_violations_are_all_reported() {
        let doc = VALID
            .replace("0x5FbDB2315678afecb367f032d93F642f64180aa3", "0xdead")
            .replace("\"decimals\": 18", "\"decimals\": 99");
        let err = RootConfig::from_json(&doc).unwrap_err();
        assert_eq!(err.issues.len(), 2);
    }

    #[test]
    fn unknown_network_lookup_is_none() {
        let root = RootConfig::from_json(VALID).unwrap();
        assert!(root.network("nonexistent").is_none());
    }
}
