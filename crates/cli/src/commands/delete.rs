use clap::Args;
use quaddb::{Database, Result};
use serde_json::{json, Value};
use tracing::info;

/// Arguments for the delete command.
#[derive(Args, Clone, Default)]
pub struct DeleteArgs {
    /// Collection name
    #[arg(short, long)]
    pub collection: String,
    /// Document ID
    #[arg(short, long)]
    pub id:         String,
}

/// Delete a document.
pub fn run(args: &DeleteArgs, db: &Database) -> Result<Value> {
    let collection = db.collection(&args.collection)?;
    collection.delete(&args.id)?;
    info!("Deleted document '{}' from '{}'", args.id, args.collection);
    Ok(json!({
        "id": args.id,
        "deleted": true,
    }))
}
