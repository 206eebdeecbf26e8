use clap::Args;
use quaddb::{Database, Result};
use serde_json::Value;

use crate::output::documents_to_json;

/// Arguments for the find command.
#[derive(Args, Clone, Default)]
pub struct FindArgs {
    /// Collection name
    #[arg(short, long)]
    pub collection: String,
    /// Dot separated field path, e.g. `address.city`
    #[arg(short, long)]
    pub field:      String,
    /// Value the field must equal exactly
    #[arg(long)]
    pub value:      String,
}

/// Scan a collection for documents whose field equals a value.
///
/// Unlike `search` this reads every document and compares case-sensitively.
pub fn run(args: &FindArgs, db: &Database) -> Result<Value> {
    let collection = db.collection(&args.collection)?;
    documents_to_json(collection.find_by_field(&args.field, &args.value)?)
}
