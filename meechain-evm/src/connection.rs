//! Connection mode selection and provider construction.
//!
//! A [`Connection`] is decided once, at construction time, by probing the
//! ambient environment for a signing identity — afterwards its capability
//! is carried in the variant tag, never re-detected structurally.

use alloy_network::EthereumWallet;
use alloy_primitives::Address;
use alloy_provider::{DynProvider, Provider, ProviderBuilder};
use alloy_signer_local::PrivateKeySigner;
use alloy_transport_http::reqwest::Url;

/// Environment variable holding the ambient signer's private key.
pub const SIGNER_KEY_VAR: &str = "MEECHAIN_SIGNER_KEY";

/// How a connection to the network is established.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionMode {
    /// Signer-capable connection using the ambient wallet; transactions
    /// can be sent. Only selectable when the ambient probe yields a
    /// signer.
    Interactive,
    /// Stateless RPC connection with no signing capability; read-only.
    Direct,
}

/// Probe for an environment-provided signing identity.
///
/// The surrounding environment decides where keys come from; the factory
/// only asks whether one is available right now.
pub trait AmbientWallet {
    /// Returns the ambient signer, if one is available.
    fn resolve(&self) -> Option<PrivateKeySigner>;
}

/// Reads the signer key from the `MEECHAIN_SIGNER_KEY` environment
/// variable.
///
/// An unset, empty, or unparseable key means no ambient wallet is
/// available; an unparseable one is additionally logged.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvWallet;

impl AmbientWallet for EnvWallet {
    fn resolve(&self) -> Option<PrivateKeySigner> {
        let key = std::env::var(SIGNER_KEY_VAR).ok()?;
        let key = key.trim();
        if key.is_empty() {
            return None;
        }
        match key.parse() {
            Ok(signer) => Some(signer),
            Err(e) => {
                tracing::warn!(error = %e, "Ignoring unparseable MEECHAIN_SIGNER_KEY");
                None
            }
        }
    }
}

/// Wallet probe with a fixed answer.
///
/// Useful in tests and in embeddings that manage keys themselves.
#[derive(Debug, Clone, Default)]
pub struct StaticWallet(pub Option<PrivateKeySigner>);

impl AmbientWallet for StaticWallet {
    fn resolve(&self) -> Option<PrivateKeySigner> {
        self.0.clone()
    }
}

/// A constructed connection, tagged by capability.
#[derive(Debug, Clone)]
pub enum Connection {
    /// Signer-capable connection; the provider signs as `signer`.
    Interactive {
        /// Provider with the wallet filler installed.
        provider: DynProvider,
        /// Address the wallet signs as.
        signer: Address,
    },
    /// Read-only RPC connection.
    Direct {
        /// Provider without signing capability.
        provider: DynProvider,
    },
}

impl Connection {
    /// The underlying provider, regardless of capability.
    #[must_use]
    pub const fn provider(&self) -> &DynProvider {
        match self {
            Self::Interactive { provider, .. } | Self::Direct { provider } => provider,
        }
    }

    /// The signer address, when the connection is interactive.
    #[must_use]
    pub const fn signer(&self) -> Option<Address> {
        match self {
            Self::Interactive { signer, .. } => Some(*signer),
            Self::Direct { .. } => None,
        }
    }

    /// The mode this connection was constructed in.
    #[must_use]
    pub const fn mode(&self) -> ConnectionMode {
        match self {
            Self::Interactive { .. } => ConnectionMode::Interactive,
            Self::Direct { .. } => ConnectionMode::Direct,
        }
    }
}

/// Neither an ambient wallet nor a usable direct endpoint could be
/// established.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConnectionUnavailableError {
    /// Interactive mode was requested but the ambient probe yielded no
    /// signer.
    #[error("interactive connection requested but no ambient wallet is available")]
    NoAmbientWallet,

    /// The configured RPC URL cannot be used to open a connection.
    #[error("invalid RPC URL {url:?}: {reason}")]
    InvalidRpcUrl {
        /// The offending URL string.
        url: String,
        /// Why it was rejected.
        reason: String,
    },
}

/// Builds a connection in the requested mode.
///
/// No network I/O happens here; the provider connects lazily on first
/// call, and any transport failure surfaces from that call.
///
/// # Errors
///
/// Returns [`ConnectionUnavailableError`] when `rpc_url` does not parse,
/// or when `Interactive` is requested and the wallet probe yields no
/// signer.
pub fn make_connection<W: AmbientWallet>(
    mode: ConnectionMode,
    rpc_url: &str,
    wallet: &W,
) -> Result<Connection, ConnectionUnavailableError> {
    let url = rpc_url
        .parse::<Url>()
        .map_err(|e| ConnectionUnavailableError::InvalidRpcUrl {
            url: rpc_url.to_owned(),
            reason: e.to_string(),
        })?;

    match mode {
        ConnectionMode::Interactive => {
            let signer = wallet
                .resolve()
                .ok_or(ConnectionUnavailableError::NoAmbientWallet)?;
            let signer_address = signer.address();
            let provider = ProviderBuilder::new()
                .wallet(EthereumWallet::from(signer))
                .connect_http(url)
                .erased();
            Ok(Connection::Interactive {
                provider,
                signer: signer_address,
            })
        }
        ConnectionMode::Direct => {
            let provider = ProviderBuilder::new().connect_http(url).erased();
            Ok(Connection::Direct { provider })
        }
    }
}
