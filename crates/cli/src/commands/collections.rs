use quaddb::{Database, Result};
use serde_json::Value;

/// List every collection file in the data directory with its document count.
pub fn run(db: &Database) -> Result<Value> { Ok(serde_json::to_value(db.collection_counts()?)?) }
