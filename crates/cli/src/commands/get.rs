use clap::Args;
use quaddb::{Database, Result};
use serde_json::{json, Value};
use tracing::debug;

/// Arguments for the get command.
#[derive(Args, Clone, Default)]
pub struct GetArgs {
    /// Collection name
    #[arg(short, long)]
    pub collection: String,
    /// Document ID
    #[arg(short, long)]
    pub id:         String,
}

/// Retrieve a document by id.
///
/// # Returns
/// `{"id": ..., "data": ...}`, or `QuadError::NotFound`.
pub fn run(args: &GetArgs, db: &Database) -> Result<Value> {
    let collection = db.collection(&args.collection)?;
    let document = collection.read(&args.id)?;
    debug!("Read document '{}' from '{}'", args.id, args.collection);
    Ok(json!({
        "id": document.id,
        "data": document.data()?,
    }))
}

#[cfg(test)]
mod tests {
    use quaddb::QuadError;

    use super::*;
    use crate::commands::test_support::setup_database;

    #[test]
    fn test_get_existing() {
        let (db, _temp_dir) = setup_database();
        db.collection("users")
            .unwrap()
            .create_json(Some("u1"), &json!({"name": "Alice"}))
            .unwrap();

        let result = run(
            &GetArgs {
                collection: "users".to_owned(),
                id:         "u1".to_owned(),
            },
            &db,
        )
        .unwrap();
        assert_eq!(result, json!({"id": "u1", "data": {"name": "Alice"}}));
    }

    #[test]
    fn test_get_missing() {
        let (db, _temp_dir) = setup_database();
        let result = run(
            &GetArgs {
                collection: "users".to_owned(),
                id:         "ghost".to_owned(),
            },
            &db,
        );
        assert!(matches!(result, Err(QuadError::NotFound { .. })));
    }
}
