//! Validated, cached access to the configuration document.
//!
//! A [`ConfigStore`] owns one [`ConfigSource`] and a populate-once cache.
//! The first successful load validates the document and shares the result
//! with every later caller; a failed load leaves the cache empty so the
//! next call can retry. The store is meant to be passed around explicitly
//! rather than living in a module-level singleton, which keeps its
//! lifetime and test resettability visible.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use crate::error::{
    ConfigError, ConfigReadError, ContractNotFoundError, NetworkNotFoundError,
};
use crate::schema::{ContractDefinition, NetworkDefinition, RootConfig};

/// Environment variable overriding the file-backed document location.
pub const CONFIG_PATH_VAR: &str = "MEECHAIN_CONFIG";

/// Raw configuration document compiled into the crate.
const BUNDLED_DOCUMENT: &str = include_str!("../contracts.json");

/// Where the raw configuration document comes from.
pub trait ConfigSource {
    /// Reads the raw document text.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigReadError`] when the underlying source cannot be
    /// read.
    fn read(&self) -> Result<String, ConfigReadError>;
}

/// The document bundled with the deployable artifact.
#[derive(Debug, Clone, Copy, Default)]
pub struct BundledSource;

impl ConfigSource for BundledSource {
    fn read(&self) -> Result<String, ConfigReadError> {
        Ok(BUNDLED_DOCUMENT.to_owned())
    }
}

/// A document read from a file on disk.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    /// Source backed by an explicit path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Source backed by the path in `MEECHAIN_CONFIG`, falling back to
    /// `contracts.json` in the working directory.
    #[must_use]
    pub fn from_env() -> Self {
        let path = std::env::var(CONFIG_PATH_VAR).unwrap_or_else(|_| "contracts.json".to_owned());
        Self::new(path)
    }

    /// The path this source reads from.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ConfigSource for FileSource {
    fn read(&self) -> Result<String, ConfigReadError> {
        std::fs::read_to_string(&self.path).map_err(|source| ConfigReadError {
            path: self.path.display().to_string(),
            source,
        })
    }
}

/// An in-memory document with a read counter.
///
/// Useful in tests that need to observe how often the store actually
/// consults its source.
#[derive(Debug)]
pub struct StaticSource {
    document: String,
    reads: AtomicUsize,
}

impl StaticSource {
    /// Source over a fixed in-memory document.
    pub fn new(document: impl Into<String>) -> Self {
        Self {
            document: document.into(),
            reads: AtomicUsize::new(0),
        }
    }

    /// Number of times the document has been read.
    #[must_use]
    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::Relaxed)
    }
}

impl ConfigSource for StaticSource {
    fn read(&self) -> Result<String, ConfigReadError> {
        self.reads.fetch_add(1, Ordering::Relaxed);
        Ok(self.document.clone())
    }
}

/// A contract definition together with its containing network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedContract {
    /// Name the network was resolved under.
    pub network_name: String,
    /// Name the contract was resolved under.
    pub contract_name: String,
    /// The containing network definition.
    pub network: NetworkDefinition,
    /// The contract definition.
    pub contract: ContractDefinition,
}

/// Validated, cached access to network and contract configuration.
#[derive(Debug)]
pub struct ConfigStore<S = BundledSource> {
    source: S,
    cached: RwLock<Option<Arc<RootConfig>>>,
}

impl ConfigStore<BundledSource> {
    /// Store over the document bundled into the crate.
    #[must_use]
    pub const fn bundled() -> Self {
        Self::new(BundledSource)
    }
}

impl<S: ConfigSource> ConfigStore<S> {
    /// Store over an explicit source. The cache starts empty.
    pub const fn new(source: S) -> Self {
        Self {
            source,
            cached: RwLock::new(None),
        }
    }

    /// The source this store reads from.
    pub const fn source(&self) -> &S {
        &self.source
    }

    /// Returns the validated root configuration, loading it on first use.
    ///
    /// The first successful validation populates the cache; later calls
    /// return the same shared value without re-reading the source. If two
    /// callers race before population, both validate the (static)
    /// document, the first writer wins, and both observe the same value.
    /// A failed load leaves the cache empty, so a later call retries.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when the source cannot be read or the
    /// document fails validation.
    pub fn load_root(&self) -> Result<Arc<RootConfig>, ConfigError> {
        if let Some(root) = self
            .cached
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
        {
            return Ok(Arc::clone(root));
        }

        let document = self.source.read()?;
        let root = Arc::new(RootConfig::from_json(&document)?);
        tracing::debug!(networks = root.len(), "Validated configuration document");

        let mut slot = self.cached.write().unwrap_or_else(PoisonError::into_inner);
        // First writer wins; a racing loader validated the same document.
        let cached = slot.get_or_insert(root);
        Ok(Arc::clone(cached))
    }

    /// Looks up a network definition by name.
    ///
    /// # Errors
    ///
    /// Propagates load failures; returns [`NetworkNotFoundError`] (wrapped
    /// in [`ConfigError`]) when `name` has no entry.
    pub fn network(&self, name: &str) -> Result<NetworkDefinition, ConfigError> {
        let root = self.load_root()?;
        root.network(name)
            .cloned()
            .ok_or_else(|| NetworkNotFoundError::new(name).into())
    }

    /// Resolves a contract within a network.
    ///
    /// # Errors
    ///
    /// Propagates load and network-lookup failures; returns
    /// [`ContractNotFoundError`] (wrapped in [`ConfigError`]) when the
    /// network exists but has no such contract.
    pub fn resolve(
        &self,
        network_name: &str,
        contract_name: &str,
    ) -> Result<ResolvedContract, ConfigError> {
        let network = self.network(network_name)?;
        let contract = network
            .contract(contract_name)
            .cloned()
            .ok_or_else(|| ContractNotFoundError::new(network_name, contract_name))?;
        Ok(ResolvedContract {
            network_name: network_name.to_owned(),
            contract_name: contract_name.to_owned(),
            network,
            contract,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::error::ConfigError;

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

    /// Source that serves a different document on each read, repeating the
    /// last one once exhausted.
    struct SequenceSource {
        documents: Mutex<Vec<String>>,
    }

    impl SequenceSource {
        fn new(documents: &[&str]) -> Self {
            Self {
                documents: Mutex::new(documents.iter().rev().map(ToString::to_string).collect()),
            }
        }
    }

    impl ConfigSource for SequenceSource {
        fn read(&self) -> Result<String, ConfigReadError> {
            let mut documents = self.documents.lock().unwrap();
            if documents.len() > 1 {
                Ok(documents.pop().unwrap())
            } else {
                Ok(documents[0].clone())
            }
        }
    }

    #[test]
    fn second_load_is_served_from_cache() {
        let store = ConfigStore::new(StaticSource::new(VALID));
        let first = store.load_root().unwrap();
        let second = store.load_root().unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(store.source().reads(), 1);
    }

    #[test]
    fn failed_validation_does_not_poison_the_cache() {
        let store = ConfigStore::new(SequenceSource::new(&["{ not json", VALID]));
        assert!(matches!(
            store.load_root(),
            Err(ConfigError::Validation(_))
        ));
        let root = store.load_root().unwrap();
        assert!(root.network("meechain").is_some());
    }

    #[test]
    fn mutated_document_fails_on_next_uncached_load() {
        let store = ConfigStore::new(StaticSource::new(VALID));
        assert!(store.load_root().is_ok());

        let mutated = VALID.replace("0x5FbDB2315678afecb367f032d93F642f64180aa3", "0xbad");
        let store = ConfigStore::new(StaticSource::new(mutated));
        let err = store.load_root().unwrap_err();
        match err {
            ConfigError::Validation(e) => {
                assert_eq!(e.issues[0].path, "meechain.contracts.MeeToken.address");
            }
            other => panic!("expected validation error, got {other}"),
        }
    }

    #[test]
    fn concurrent_first_loads_agree() {
        let store = Arc::new(ConfigStore::new(StaticSource::new(VALID)));
        let roots: Vec<_> = std::thread::scope(|scope| {
            (0..8)
                .map(|_| {
                    let store = Arc::clone(&store);
                    scope.spawn(move || store.load_root().unwrap())
                })
                .collect::<Vec<_>>()
                .into_iter()
                .map(|handle| handle.join().unwrap())
                .collect()
        });
        for root in &roots {
            assert!(Arc::ptr_eq(root, &roots[0]));
        }
    }

    #[test]
    fn unknown_network_carries_the_name() {
        let store = ConfigStore::new(StaticSource::new(VALID));
        match store.network("nonexistent") {
            Err(ConfigError::NetworkNotFound(e)) => assert_eq!(e.network, "nonexistent"),
            other => panic!("expected NetworkNotFound, got {other:?}"),
        }
    }

    #[test]
    fn unknown_contract_carries_both_names() {
        let store = ConfigStore::new(StaticSource::new(VALID));
        match store.resolve("meechain", "NoSuchToken") {
            Err(ConfigError::ContractNotFound(e)) => {
                assert_eq!(e.network, "meechain");
                assert_eq!(e.contract, "NoSuchToken");
            }
            other => panic!("expected ContractNotFound, got {other:?}"),
        }
    }

    #[test]
    fn resolve_returns_both_definitions() {
        let store = ConfigStore::new(StaticSource::new(VALID));
        let resolved = store.resolve("meechain", "MeeToken").unwrap();
        assert_eq!(resolved.network_name, "meechain");
        assert_eq!(resolved.contract_name, "MeeToken");
        assert_eq!(resolved.network.chain_id, 31337);
        assert_eq!(resolved.contract.decimals, 18);
    }

    #[test]
    fn file_source_reports_the_path_on_failure() {
        let source = FileSource::new("/definitely/missing/contracts.json");
        let err = source.read().unwrap_err();
        assert!(err.path.contains("missing"));
    }

    #[test]
    fn bundled_document_is_valid() {
        let store = ConfigStore::bundled();
        let root = store.load_root().unwrap();
        let network = root.network("meechain").unwrap();
        assert_eq!(network.contract("MeeToken").unwrap().decimals, 18);
    }
}
