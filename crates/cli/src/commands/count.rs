use clap::Args;
use quaddb::{Database, Result};
use serde_json::{json, Value};

/// Arguments for the count command.
#[derive(Args, Clone, Default)]
pub struct CountArgs {
    /// Collection name
    #[arg(short, long)]
    pub collection: String,
}

/// Count the documents of a collection.
pub fn run(args: &CountArgs, db: &Database) -> Result<Value> {
    let count = db.collection(&args.collection)?.count()?;
    Ok(json!({
        "collection": args.collection,
        "count": count,
    }))
}
