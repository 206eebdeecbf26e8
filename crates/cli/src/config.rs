use std::{
    fs,
    path::{Path, PathBuf},
};

use quaddb::{
    constants::{DEFAULT_DATA_DIR, DEFAULT_PAGE_SIZE},
    CompressionAlgorithm,
    Database,
    DatabaseConfig,
    QuadError,
    Result,
};
use quaddb_crypto::CipherKey;
use serde::Deserialize;
use tracing::{debug, info};

/// Config file looked up when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "./config/config.toml";

/// Contents of the TOML config file. Every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct FileConfig {
    data_dir:          Option<PathBuf>,
    aes_key:           Option<String>,
    default_page_size: Option<usize>,
    compression:       Option<CompressionAlgorithm>,
}

/// Values given on the command line. They win over the config file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    /// Explicit config file; must exist when given.
    pub config_file: Option<PathBuf>,
    /// `--data-dir`
    pub data_dir:    Option<PathBuf>,
    /// `--aes-key`
    pub aes_key:     Option<String>,
}

/// Effective settings after layering defaults, the config file and flags.
#[derive(Clone, PartialEq, Eq)]
pub struct Settings {
    pub data_dir:          PathBuf,
    pub aes_key:           Option<String>,
    pub default_page_size: usize,
    pub compression:       CompressionAlgorithm,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir:          PathBuf::from(DEFAULT_DATA_DIR),
            aes_key:           None,
            default_page_size: DEFAULT_PAGE_SIZE,
            compression:       CompressionAlgorithm::default(),
        }
    }
}

impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field("data_dir", &self.data_dir)
            .field("aes_key", &self.aes_key.as_ref().map(|_| "<redacted>"))
            .field("default_page_size", &self.default_page_size)
            .field("compression", &self.compression)
            .finish()
    }
}

impl Settings {
    /// Builds the settings: defaults, then the config file, then `overrides`.
    ///
    /// The config file is `overrides.config_file` if given, otherwise
    /// [`DEFAULT_CONFIG_FILE`] when it exists.
    pub fn load(overrides: &Overrides) -> Result<Self> {
        let mut settings = Self::default();

        let file = match overrides.config_file {
            Some(ref path) => Some(read_config_file(path)?),
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.is_file() {
                    info!("Found config file at {}", DEFAULT_CONFIG_FILE);
                    Some(read_config_file(default_path)?)
                }
                else {
                    None
                }
            },
        };

        if let Some(file) = file {
            settings.apply_file(file);
        }
        if let Some(ref data_dir) = overrides.data_dir {
            settings.data_dir = data_dir.clone();
        }
        if let Some(ref aes_key) = overrides.aes_key {
            settings.aes_key = Some(aes_key.clone());
        }

        debug!("Effective settings: {:?}", settings);
        Ok(settings)
    }

    fn apply_file(&mut self, file: FileConfig) {
        if let Some(data_dir) = file.data_dir {
            self.data_dir = data_dir;
        }
        if let Some(aes_key) = file.aes_key {
            self.aes_key = Some(aes_key);
        }
        if let Some(size) = file.default_page_size {
            self.default_page_size = size;
        }
        if let Some(compression) = file.compression {
            self.compression = compression;
        }
    }

    /// Derives the collection key from the configured secret with SHA-256.
    ///
    /// # Errors
    /// `QuadError::ConfigurationError` if no secret is configured.
    pub fn cipher_key(&self) -> Result<CipherKey> {
        match self.aes_key.as_deref() {
            Some(secret) if !secret.is_empty() => Ok(CipherKey::derive_from_secret(secret)),
            _ => {
                Err(QuadError::ConfigurationError {
                    message: "an AES key is required: pass --aes-key or set aes_key in the config file".to_owned(),
                })
            },
        }
    }

    pub fn database_config(&self) -> DatabaseConfig {
        DatabaseConfig {
            data_dir:          self.data_dir.clone(),
            compression:       self.compression,
            default_page_size: self.default_page_size,
        }
    }

    /// Opens the database these settings describe.
    pub fn open_database(&self) -> Result<Database> { Database::open(self.database_config(), &self.cipher_key()?) }
}

fn read_config_file(path: &Path) -> Result<FileConfig> {
    let text = fs::read_to_string(path).map_err(|e| {
        QuadError::ConfigurationError {
            message: format!("cannot read config file {}: {}", path.display(), e),
        }
    })?;
    toml::from_str(&text).map_err(|e| {
        QuadError::ConfigurationError {
            message: format!("invalid config file {}: {}", path.display(), e),
        }
    })
}
