//! High-level token operations over a connection handle.
//!
//! The thin operational surface callers actually use: mint, transfer,
//! burn, and the read-side queries, all taking human-readable amounts and
//! waiting for transaction inclusion on writes.

use alloy_primitives::{Address, TxHash, U256};

use meechain::amount::AmountError;

use crate::factory::ConnectionHandle;

/// Errors from token operations.
///
/// Transport and contract failures pass through from the underlying
/// library without interpretation.
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    /// The amount string could not be scaled to token units.
    #[error(transparent)]
    Amount(#[from] AmountError),

    /// The connection is read-only; a signer is required for writes.
    #[error("connection is read-only; a signer is required for {operation}")]
    ReadOnly {
        /// The write operation that was attempted.
        operation: &'static str,
    },

    /// A contract call failed.
    #[error(transparent)]
    Contract(#[from] alloy_contract::Error),

    /// Waiting for transaction inclusion failed.
    #[error(transparent)]
    PendingTransaction(#[from] alloy_provider::PendingTransactionError),
}

/// Token operations bound to one contract over one connection.
#[derive(Debug)]
pub struct TokenClient {
    handle: ConnectionHandle,
}

impl TokenClient {
    /// Wraps a connection handle.
    #[must_use]
    pub const fn new(handle: ConnectionHandle) -> Self {
        Self { handle }
    }

    /// The underlying connection handle.
    #[must_use]
    pub const fn handle(&self) -> &ConnectionHandle {
        &self.handle
    }

    /// Mints `amount` (human units) to `to` and waits for inclusion.
    ///
    /// # Errors
    ///
    /// Fails fast with [`TokenError::ReadOnly`] on a signer-less
    /// connection; otherwise propagates amount, contract, and transaction
    /// errors.
    pub async fn mint(&self, to: Address, amount: &str) -> Result<TxHash, TokenError> {
        self.require_signer("mint")?;
        let value = self.handle.parse(amount)?;
        let pending = self.handle.contract.mint(to, value).send().await?;
        Ok(pending.watch().await?)
    }

    /// Transfers `amount` (human units) to `to` and waits for inclusion.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`TokenClient::mint`].
    pub async fn transfer(&self, to: Address, amount: &str) -> Result<TxHash, TokenError> {
        self.require_signer("transfer")?;
        let value = self.handle.parse(amount)?;
        let pending = self.handle.contract.transfer(to, value).send().await?;
        Ok(pending.watch().await?)
    }

    /// Burns `amount` (human units) from the signer's balance and waits
    /// for inclusion.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`TokenClient::mint`].
    pub async fn burn(&self, amount: &str) -> Result<TxHash, TokenError> {
        self.require_signer("burn")?;
        let value = self.handle.parse(amount)?;
        let pending = self.handle.contract.burn(value).send().await?;
        Ok(pending.watch().await?)
    }

    /// Total supply in human units.
    ///
    /// # Errors
    ///
    /// Propagates contract call failures.
    pub async fn total_supply(&self) -> Result<String, TokenError> {
        let supply: U256 = self.handle.contract.totalSupply().call().await?;
        Ok(self.handle.format(supply))
    }

    /// Balance of `account` in human units.
    ///
    /// # Errors
    ///
    /// Propagates contract call failures.
    pub async fn balance_of(&self, account: Address) -> Result<String, TokenError> {
        let balance: U256 = self.handle.contract.balanceOf(account).call().await?;
        Ok(self.handle.format(balance))
    }

    /// The contract owner.
    ///
    /// # Errors
    ///
    /// Propagates contract call failures.
    pub async fn owner(&self) -> Result<Address, TokenError> {
        Ok(self.handle.contract.getOwner().call().await?)
    }

    fn require_signer(&self, operation: &'static str) -> Result<Address, TokenError> {
        self.handle.signer.ok_or(TokenError::ReadOnly { operation })
    }
}
