use quaddb::{Database, Result};
use serde_json::{json, Value};

/// Collection counts plus the access activity recorded so far in this process.
///
/// Activity lives in memory only, so a fresh run reports it empty.
pub fn run(db: &Database) -> Result<Value> {
    let counts = db.collection_counts()?;
    Ok(json!({
        "collections": counts,
        "activity": db.activity(),
    }))
}
