use std::{fs, path::PathBuf};

use clap::Args;
use quaddb::{QuadError, Result};
use quaddb_crypto::{CipherKey, KeySize};
use serde_json::{json, Value};
use tracing::{info, warn};

/// Arguments for the generate-key command.
#[derive(Args, Clone, Default)]
pub struct GenerateKeyArgs {
    /// Key size in bytes: 16, 24 or 32
    #[arg(short, long, default_value_t = 32)]
    pub size:   usize,
    /// Also write the hex encoded key to this file
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Generate a random AES key and return it hex encoded.
///
/// Nothing can be recovered without the key, so when `--output` is given the
/// key is also written to that file.
///
/// # Arguments
/// * `args` - The parsed command-line arguments for generate-key.
///
/// # Returns
/// `{"key": <hex>, "size": <bytes>}` plus `"output"` when a file was written.
pub fn run(args: &GenerateKeyArgs) -> Result<Value> {
    let size = KeySize::from_len(args.size)?;
    let key = CipherKey::generate(size);
    let key_hex = key.to_hex();
    info!("Generated a {} byte AES key", size.len());

    let mut result = json!({
        "key": key_hex,
        "size": size.len(),
    });

    if let Some(ref path) = args.output {
        fs::write(path, &key_hex).map_err(|e| {
            warn!("Failed to write key to {:?}: {}", path, e);
            QuadError::from(e)
        })?;
        info!("Key written to {:?}", path);
        result["output"] = json!(path.display().to_string());
    }

    Ok(result)
}
