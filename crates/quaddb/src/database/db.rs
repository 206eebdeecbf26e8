use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
    sync::{Arc, RwLock},
};

use quaddb_crypto::CipherKey;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::{
    compression::CompressionAlgorithm,
    constants::{DEFAULT_DATA_DIR, DEFAULT_PAGE_SIZE},
    telemetry::{ActivitySnapshot, ActivityTracker},
    Collection,
    QuadError,
    Result,
};

/// Settings shared by every collection of a [`Database`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Directory holding the `<name>.qdb` files.
    pub data_dir:          PathBuf,
    /// Compression used for every collection file.
    pub compression:       CompressionAlgorithm,
    /// Page size used when a listing does not ask for one.
    pub default_page_size: usize,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            data_dir:          PathBuf::from(DEFAULT_DATA_DIR),
            compression:       CompressionAlgorithm::default(),
            default_page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// A data directory of named collections sharing one key.
///
/// Collection names coming from outside go through the path guard before
/// any file is touched. Opened collections are cached and shared, so every
/// caller of [`Database::collection`] sees the same resident map and lock.
/// All collections report to one [`ActivityTracker`].
///
/// # Examples
///
/// ```no_run
/// use quaddb::{Database, DatabaseConfig};
/// use quaddb_crypto::CipherKey;
/// use serde_json::json;
///
/// # fn example() -> quaddb::Result<()> {
/// let key = CipherKey::derive_from_secret("operator secret");
/// let db = Database::open(DatabaseConfig::default(), &key)?;
///
/// let users = db.collection("users")?;
/// users.create_json(Some("alice"), &json!({"name": "Alice"}))?;
/// println!("{:?}", db.collection_counts()?);
/// # Ok(())
/// # }
/// ```
#[allow(
    clippy::field_scoped_visibility_modifiers,
    reason = "fields need to be pub(crate) for internal access"
)]
pub struct Database {
    /// The settings the database was opened with.
    pub(crate) config:      DatabaseConfig,
    /// Key shared by every collection.
    pub(crate) key:         CipherKey,
    /// Activity of every collection opened through this database.
    pub(crate) tracker:     Arc<ActivityTracker>,
    /// Opened collections by name.
    pub(crate) collections: RwLock<HashMap<PathBuf, Arc<Collection>>>,
}

impl Database {
    /// Opens the database, creating the data directory if needed.
    ///
    /// # Errors
    ///
    /// `QuadError::ConfigurationError` for a zero default page size, or an
    /// I/O error if the data directory cannot be created.
    pub fn open(config: DatabaseConfig, key: &CipherKey) -> Result<Self> {
        if config.default_page_size == 0 {
            return Err(QuadError::ConfigurationError {
                message: "default page size must be at least 1".to_owned(),
            });
        }

        trace!("Opening database at {:?}", config.data_dir);
        fs::create_dir_all(&config.data_dir)?;
        debug!(
            "Database opened at {:?} ({} compression)",
            config.data_dir, config.compression
        );

        Ok(Self {
            config,
            key: key.clone(),
            tracker: Arc::new(ActivityTracker::new()),
            collections: RwLock::new(HashMap::new()),
        })
    }

    /// The settings the database was opened with.
    pub fn config(&self) -> &DatabaseConfig { &self.config }

    /// Directory holding the collection files.
    pub fn data_dir(&self) -> &Path { &self.config.data_dir }

    /// Most recent activity across every collection of this database.
    pub fn activity(&self) -> ActivitySnapshot { self.tracker.snapshot() }
}

impl std::fmt::Debug for Database {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Database")
            .field("config", &self.config)
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}
