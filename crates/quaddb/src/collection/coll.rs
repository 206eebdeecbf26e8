use std::{
    fs,
    io::{ErrorKind, Write as _},
    path::{Path, PathBuf},
    sync::{Arc, RwLock},
};

use quaddb_crypto::CipherKey;
use tracing::{debug, error, trace, warn};

use crate::{
    blob::BlobCodec,
    compression::CompressionAlgorithm,
    constants::TEMP_FILE_SUFFIX,
    index::FieldIndex,
    serialization::DocumentMap,
    telemetry::{AccessEvent, NoopTelemetry, TelemetrySink},
    QuadError,
    Result,
};

/// Options applied when a collection is opened.
#[derive(Clone)]
pub struct CollectionConfig {
    /// Compression used between serialization and encryption.
    pub compression: CompressionAlgorithm,
    /// Receiver of access events.
    pub telemetry:   Arc<dyn TelemetrySink + Send + Sync>,
}

impl Default for CollectionConfig {
    fn default() -> Self {
        Self {
            compression: CompressionAlgorithm::default(),
            telemetry:   Arc::new(NoopTelemetry),
        }
    }
}

impl std::fmt::Debug for CollectionConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CollectionConfig")
            .field("compression", &self.compression)
            .finish_non_exhaustive()
    }
}

/// A named, file-backed, encrypted document map.
///
/// The whole collection lives in one file, `<name>.qdb`, holding
/// `IV || AES-CBC(compressed serialized map)`. The decrypted map stays
/// resident behind a reader/writer lock:
///
/// - reads take the read lock and never touch the disk
/// - every mutation holds the write lock across check, mutate, persist and index rebuild, so
///   concurrent writers cannot lose each other's changes
///
/// Persistence rewrites the full file through a temporary sibling and an
/// atomic rename. If it fails, the in-memory map is rolled back.
///
/// The [`FieldIndex`] has its own lock, taken by writers only while they
/// hold the document lock.
///
/// # Example
///
/// ```rust
/// use quaddb::Collection;
/// use serde_json::json;
///
/// # fn example() -> quaddb::Result<()> {
/// let key = [7u8; 32];
/// let users = Collection::open("/tmp/quaddb/users.qdb", &key)?;
///
/// let id = users.create_json(None, &json!({"name": "Alice", "status": "active"}))?;
/// let doc = users.read(&id)?;
/// assert_eq!(doc.data()?["name"], "Alice");
/// # Ok(())
/// # }
/// ```
#[allow(
    clippy::field_scoped_visibility_modifiers,
    reason = "fields need to be pub(crate) for internal access"
)]
pub struct Collection {
    /// Collection name, the file stem of `path`.
    pub(crate) name:      String,
    /// The collection file.
    pub(crate) path:      PathBuf,
    /// Serialize, compress and encrypt pipeline.
    pub(crate) codec:     BlobCodec,
    /// Resident copy of the file's contents.
    pub(crate) documents: RwLock<DocumentMap>,
    /// Equality index, rebuilt after every mutation.
    pub(crate) index:     RwLock<FieldIndex>,
    /// Receiver of access events.
    pub(crate) telemetry: Arc<dyn TelemetrySink + Send + Sync>,
}

impl Collection {
    /// Opens the collection stored at `path` with default options.
    ///
    /// See [`Collection::open_with_config`].
    pub fn open(path: impl AsRef<Path>, key: &[u8]) -> Result<Self> {
        Self::open_with_config(path, key, CollectionConfig::default())
    }

    /// Opens the collection stored at `path`.
    ///
    /// # Arguments
    ///
    /// * `path` - The collection file. It does not have to exist; a missing file is an empty
    ///   collection and is only created by the first successful write.
    /// * `key` - Raw AES key, 16, 24 or 32 bytes long.
    /// * `config` - Compression and telemetry options.
    ///
    /// # Returns
    ///
    /// The collection with its documents loaded and indexed, or:
    /// - `QuadError::ConfigurationError` for a bad key length, before any file access
    /// - `QuadError::InvalidCollectionName` if `path` has no usable file stem
    /// - `QuadError::MalformedCiphertext`, `QuadError::InvalidPadding` or `QuadError::CorruptData`
    ///   if the file exists but cannot be read with this key and compression
    pub fn open_with_config(path: impl AsRef<Path>, key: &[u8], config: CollectionConfig) -> Result<Self> {
        let key = CipherKey::new(key)?;
        let path = path.as_ref().to_path_buf();
        let name = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .filter(|stem| !stem.is_empty())
            .ok_or_else(|| {
                QuadError::InvalidCollectionName {
                    name: path.display().to_string(),
                }
            })?
            .to_owned();

        trace!("Opening collection '{}' at {:?}", name, path);
        let codec = BlobCodec::new(key, config.compression);
        let documents = read_file(&codec, &path)?;
        let index = FieldIndex::build(&documents);
        debug!(
            "Collection '{}' opened with {} documents",
            name,
            documents.len()
        );

        Ok(Self {
            name,
            path,
            codec,
            documents: RwLock::new(documents),
            index: RwLock::new(index),
            telemetry: config.telemetry,
        })
    }

    /// Returns the name of the collection.
    pub fn name(&self) -> &str { &self.name }

    /// Returns the path of the collection file.
    pub fn path(&self) -> &Path { &self.path }

    /// Compression algorithm the collection was opened with.
    pub fn compression(&self) -> CompressionAlgorithm { self.codec.compression() }

    /// Snapshot of every stored document.
    pub fn load(&self) -> Result<DocumentMap> { Ok(self.documents.read()?.clone()) }

    /// Re-reads the file from disk, replacing the resident map and index.
    ///
    /// Picks up changes made by other processes. On failure the resident
    /// state is left untouched.
    pub fn reload(&self) -> Result<()> {
        let mut documents = self.documents.write()?;
        let fresh = read_file(&self.codec, &self.path)?;
        let index = FieldIndex::build(&fresh);
        *documents = fresh;
        *self.index.write()? = index;
        debug!(
            "Collection '{}' reloaded with {} documents",
            self.name,
            documents.len()
        );
        Ok(())
    }

    /// Applies `mutation` to the resident map and persists the result.
    ///
    /// Runs entirely under the document write lock. If either `mutation` or
    /// the write fails, the map is restored and nothing reaches the disk.
    pub(crate) fn mutate<T>(&self, mutation: impl FnOnce(&mut DocumentMap) -> Result<T>) -> Result<T> {
        let mut documents = self.documents.write()?;
        let previous = documents.clone();

        let output = match mutation(&mut *documents) {
            Ok(output) => output,
            Err(e) => {
                *documents = previous;
                return Err(e);
            },
        };

        if let Err(e) = self.persist(&documents) {
            error!(
                "Failed to persist collection '{}', rolling back: {}",
                self.name, e
            );
            *documents = previous;
            return Err(e);
        }

        *self.index.write()? = FieldIndex::build(&documents);
        Ok(output)
    }

    /// Writes the full map to disk through a temporary file and a rename.
    pub(crate) fn persist(&self, documents: &DocumentMap) -> Result<()> {
        let blob = self.codec.seal(documents)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let temp_path = self.temp_path();
        let written =
            write_synced(&temp_path, &blob).and_then(|()| fs::rename(&temp_path, &self.path).map_err(QuadError::from));
        if let Err(e) = written {
            if let Err(cleanup) = fs::remove_file(&temp_path) {
                trace!("No temporary file to clean up at {:?}: {}", temp_path, cleanup);
            }
            return Err(e);
        }

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            if let Ok(dir) = fs::File::open(parent) {
                if let Err(e) = dir.sync_all() {
                    trace!("Directory sync of {:?} failed: {}", parent, e);
                }
            }
        }

        trace!(
            "Persisted collection '{}' ({} documents, {} bytes)",
            self.name,
            documents.len(),
            blob.len()
        );
        Ok(())
    }

    /// `.<file name>.tmp` next to the collection file.
    fn temp_path(&self) -> PathBuf {
        let file_name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.path
            .with_file_name(format!(".{}.{}", file_name, TEMP_FILE_SUFFIX))
    }

    pub(crate) fn emit(&self, event: &AccessEvent) { self.telemetry.record(event); }
}

impl std::fmt::Debug for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Collection")
            .field("name", &self.name)
            .field("path", &self.path)
            .field("codec", &self.codec)
            .finish_non_exhaustive()
    }
}

/// Reads and decodes a collection file. A missing file is an empty map.
fn read_file(codec: &BlobCodec, path: &Path) -> Result<DocumentMap> {
    let blob = match fs::read(path) {
        Ok(blob) => blob,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            trace!("No file at {:?}, starting empty", path);
            return Ok(DocumentMap::new());
        },
        Err(e) => {
            error!("Failed to read collection file {:?}: {}", path, e);
            return Err(e.into());
        },
    };

    codec.open(&blob).map_err(|e| {
        warn!("Collection file {:?} could not be decoded: {}", path, e);
        e
    })
}

fn write_synced(path: &Path, bytes: &[u8]) -> Result<()> {
    let mut file = fs::File::create(path)?;
    file.write_all(bytes)?;
    file.sync_all()?;
    Ok(())
}
