#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! Core configuration resolution for the MeeChain token stack.
//!
//! This crate is the chain-agnostic half of the MeeChain connection
//! layer: it loads the static network/contract configuration document,
//! validates it against the schema, caches the validated result for the
//! lifetime of the store, and provides exact decimal amount arithmetic.
//! EVM connection building lives in the `meechain-evm` crate.
//!
//! # Overview
//!
//! The configuration document maps network names to network definitions
//! (chain ID, RPC URL, contract registry). A [`store::ConfigStore`] reads
//! it from a [`store::ConfigSource`], validates it once, and answers
//! network and contract lookups from the cached result. Amount helpers in
//! [`amount`] scale human-readable decimal strings by a contract's
//! declared precision without ever touching floating point.
//!
//! # Modules
//!
//! - [`amount`] - Exact decimal-string to token-unit conversion
//! - [`error`] - Error taxonomy for loading and lookup
//! - [`schema`] - Document schema, typed definitions, and validation
//! - [`store`] - Config sources and the populate-once cached store

pub mod amount;
pub mod error;
pub mod schema;
pub mod store;

pub use error::{
    ConfigError, ConfigValidationError, ContractNotFoundError, NetworkNotFoundError,
};
pub use schema::{ContractDefinition, NetworkDefinition, RootConfig};
pub use store::{BundledSource, ConfigSource, ConfigStore, FileSource, ResolvedContract};
