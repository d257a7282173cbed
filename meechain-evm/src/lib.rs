#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! EVM connection factory for the MeeChain token.
//!
//! The chain-specific half of the MeeChain connection layer: it turns a
//! configuration lookup (via the `meechain` crate's config store) into a
//! ready-to-use contract handle over alloy, choosing between an
//! interactive (signer-capable) and a direct (read-only RPC) connection
//! at construction time.
//!
//! # Overview
//!
//! A [`factory::ConnectionFactory`] owns an injected config store and an
//! ambient-wallet probe. [`factory::ConnectionFactory::connect`] resolves
//! the network and contract definitions, opens the connection, and binds
//! the `IMeeToken` interface to the resolved address; the returned
//! [`factory::ConnectionHandle`] carries the bound contract, the raw
//! connection, the signer (if any), the resolved configuration, and
//! decimal-exact amount helpers. [`token::TokenClient`] layers the
//! mint/transfer/burn/supply operations on top.
//!
//! # Modules
//!
//! - [`connection`] - Connection modes, wallet probing, provider construction
//! - [`contract`] - The `IMeeToken` Solidity interface binding
//! - [`factory`] - Connect options, the factory, and the handle
//! - [`token`] - High-level token operations

pub mod connection;
pub mod contract;
pub mod factory;
pub mod token;

pub use connection::{
    AmbientWallet, Connection, ConnectionMode, ConnectionUnavailableError, EnvWallet,
    StaticWallet, make_connection,
};
pub use factory::{ConnectError, ConnectOptions, ConnectionFactory, ConnectionHandle};
pub use token::{TokenClient, TokenError};
