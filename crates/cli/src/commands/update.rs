use clap::Args;
use quaddb::{Database, Result};
use serde_json::{json, Value};
use tracing::info;

use crate::output::parse_json_arg;

/// Arguments for the update command.
#[derive(Args, Clone, Default)]
pub struct UpdateArgs {
    /// Collection name
    #[arg(short, long)]
    pub collection: String,
    /// Document ID
    #[arg(short, long)]
    pub id:         String,
    /// Replacement document JSON
    #[arg(short, long)]
    pub data:       String,
}

/// Replace the payload of an existing document.
pub fn run(args: &UpdateArgs, db: &Database) -> Result<Value> {
    let collection = db.collection(&args.collection)?;
    let data = parse_json_arg("data", &args.data)?;
    collection.update_json(&args.id, &data)?;
    info!("Updated document '{}' in '{}'", args.id, args.collection);
    Ok(json!({
        "id": args.id,
        "updated": true,
    }))
}
