//! The connection factory: from a configuration lookup to a ready-to-use
//! contract handle.

use alloy_primitives::{Address, U256};
use alloy_provider::DynProvider;

use meechain::amount::{self, AmountError};
use meechain::error::ConfigError;
use meechain::schema::{ContractDefinition, NetworkDefinition};
use meechain::store::{BundledSource, ConfigSource, ConfigStore};

use crate::connection::{
    AmbientWallet, Connection, ConnectionMode, ConnectionUnavailableError, EnvWallet,
    make_connection,
};
use crate::contract::IMeeToken;

/// Environment variable selecting the default network name.
pub const NETWORK_VAR: &str = "MEECHAIN_NETWORK";

/// Environment variable selecting the default contract name.
pub const CONTRACT_VAR: &str = "MEECHAIN_CONTRACT";

/// Network name used when neither the options nor the environment supply
/// one.
pub const DEFAULT_NETWORK: &str = "meechain";

/// Contract name used when neither the options nor the environment supply
/// one.
pub const DEFAULT_CONTRACT: &str = "MeeToken";

/// Options for [`ConnectionFactory::connect`].
///
/// Every field is optional; see the field docs for the defaulting rules.
#[derive(Debug, Clone, Default)]
pub struct ConnectOptions {
    /// Connection mode. Defaults to [`ConnectionMode::Interactive`] when
    /// the ambient wallet probe yields a signer, else
    /// [`ConnectionMode::Direct`].
    pub mode: Option<ConnectionMode>,
    /// Network name. Defaults to `MEECHAIN_NETWORK`, else `"meechain"`.
    pub network: Option<String>,
    /// Contract name. Defaults to `MEECHAIN_CONTRACT`, else `"MeeToken"`.
    pub contract: Option<String>,
}

/// Errors from [`ConnectionFactory::connect`].
#[derive(Debug, thiserror::Error)]
pub enum ConnectError {
    /// Configuration lookup or validation failed; propagated unchanged.
    #[error("{0}")]
    Config(#[from] ConfigError),

    /// The underlying connection could not be established.
    #[error("{0}")]
    Unavailable(#[from] ConnectionUnavailableError),
}

/// Turns configuration lookups into bound contract handles.
///
/// Owns an explicit [`ConfigStore`] and an [`AmbientWallet`] probe; both
/// are injected so embeddings and tests control the document source and
/// the key material.
#[derive(Debug)]
pub struct ConnectionFactory<S = BundledSource, W = EnvWallet> {
    store: ConfigStore<S>,
    wallet: W,
}

impl ConnectionFactory<BundledSource, EnvWallet> {
    /// Factory over the bundled configuration document and the
    /// environment-provided wallet.
    #[must_use]
    pub const fn bundled() -> Self {
        Self::new(ConfigStore::bundled(), EnvWallet)
    }
}

impl<S: ConfigSource, W: AmbientWallet> ConnectionFactory<S, W> {
    /// Factory over an explicit store and wallet probe.
    pub const fn new(store: ConfigStore<S>, wallet: W) -> Self {
        Self { store, wallet }
    }

    /// The underlying config store.
    pub const fn store(&self) -> &ConfigStore<S> {
        &self.store
    }

    /// Resolves the contract configuration, establishes a connection, and
    /// binds the token contract to the resolved address.
    ///
    /// # Errors
    ///
    /// Config store failures (validation, not-found) pass through as
    /// [`ConnectError::Config`]; connection establishment failures
    /// surface as [`ConnectError::Unavailable`].
    pub fn connect(&self, options: ConnectOptions) -> Result<ConnectionHandle, ConnectError> {
        let network_name = options
            .network
            .unwrap_or_else(|| env_default(NETWORK_VAR, DEFAULT_NETWORK));
        let contract_name = options
            .contract
            .unwrap_or_else(|| env_default(CONTRACT_VAR, DEFAULT_CONTRACT));

        let resolved = self.store.resolve(&network_name, &contract_name)?;

        let mode = options.mode.unwrap_or_else(|| {
            if self.wallet.resolve().is_some() {
                ConnectionMode::Interactive
            } else {
                ConnectionMode::Direct
            }
        });

        let connection = make_connection(mode, &resolved.network.rpc_url, &self.wallet)?;
        let contract = IMeeToken::new(resolved.contract.address, connection.provider().clone());

        tracing::debug!(
            network = %network_name,
            contract = %contract_name,
            address = %resolved.contract.address,
            mode = ?connection.mode(),
            "Bound contract handle"
        );

        Ok(ConnectionHandle {
            contract,
            signer: connection.signer(),
            connection,
            network: resolved.network,
            contract_config: resolved.contract,
        })
    }
}

/// A ready-to-use bundle: bound contract, connection, signer, and the
/// resolved configuration it came from.
#[derive(Debug)]
pub struct ConnectionHandle {
    /// Token contract bound to the resolved address over the connection's
    /// provider.
    pub contract: IMeeToken::IMeeTokenInstance<DynProvider>,
    /// The underlying connection.
    pub connection: Connection,
    /// Signer address, when the connection is interactive.
    pub signer: Option<Address>,
    /// The resolved network definition.
    pub network: NetworkDefinition,
    /// The resolved contract definition.
    pub contract_config: ContractDefinition,
}

impl ConnectionHandle {
    /// Scales a human-readable amount by the contract's declared
    /// decimals, exactly.
    ///
    /// # Errors
    ///
    /// Returns an [`AmountError`] when the string is not a plain decimal
    /// amount representable at this precision.
    pub fn parse(&self, amount: &str) -> Result<U256, AmountError> {
        amount::parse_units(amount, self.contract_config.decimals)
    }

    /// Renders integer token units as a human-readable amount at the
    /// contract's declared decimals.
    #[must_use]
    pub fn format(&self, value: U256) -> String {
        amount::format_units(value, self.contract_config.decimals)
    }
}

fn env_default(var: &str, fallback: &str) -> String {
    std::env::var(var)
        .ok()
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| fallback.to_owned())
}
