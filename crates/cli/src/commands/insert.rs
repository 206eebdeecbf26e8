use clap::Args;
use quaddb::{Database, QuadError, Result};
use serde_json::{json, Value};
use tracing::{debug, info};

use crate::output::parse_json_arg;

/// Arguments for the insert command.
#[derive(Args, Clone, Default)]
pub struct InsertArgs {
    /// Collection name
    #[arg(short, long)]
    pub collection: String,
    /// Document ID; generated when omitted
    #[arg(short, long)]
    pub id:         Option<String>,
    /// Document JSON, or a JSON array of {"id": ..., "data": ...} objects for a bulk insert
    #[arg(short, long)]
    pub data:       String,
}

/// Insert one document, or several from a JSON array.
///
/// A bulk insert stops at the first failing entry; the entries before it
/// stay stored.
///
/// # Returns
/// `{"id": ...}` for a single document, `{"inserted": [...]}` for a bulk insert.
pub fn run(args: InsertArgs, db: &Database) -> Result<Value> {
    let collection = db.collection(&args.collection)?;
    let data = parse_json_arg("data", &args.data)?;

    let entries = match data {
        Value::Array(entries) => entries,
        single => {
            let id = collection.create_json(args.id.as_deref(), &single)?;
            info!("Inserted document '{}' into '{}'", id, args.collection);
            return Ok(json!({ "id": id }));
        },
    };

    if args.id.is_some() {
        return Err(QuadError::ConfigurationError {
            message: "--id cannot be combined with a bulk insert".to_owned(),
        });
    }

    let mut inserted = Vec::with_capacity(entries.len());
    for (position, entry) in entries.into_iter().enumerate() {
        let (id, data) = bulk_entry(position, entry)?;
        let id = collection.create_json(id.as_deref(), &data)?;
        debug!("Bulk entry {} stored as '{}'", position, id);
        inserted.push(id);
    }

    info!(
        "Inserted {} documents into '{}'",
        inserted.len(),
        args.collection
    );
    Ok(json!({ "inserted": inserted }))
}

/// Splits one bulk entry into its optional id and its data.
fn bulk_entry(position: usize, entry: Value) -> Result<(Option<String>, Value)> {
    let invalid = |reason: &str| {
        QuadError::InvalidDocument {
            id:     format!("#{}", position),
            reason: reason.to_owned(),
        }
    };

    let Value::Object(mut fields) = entry
    else {
        return Err(invalid("bulk entries must be objects"));
    };
    let data = fields
        .remove("data")
        .ok_or_else(|| invalid("missing \"data\""))?;
    let id = match fields.remove("id") {
        None | Some(Value::Null) => None,
        Some(Value::String(id)) => Some(id),
        Some(_) => return Err(invalid("\"id\" must be a string")),
    };
    Ok((id, data))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::setup_database;

    fn args(id: Option<&str>, data: &str) -> InsertArgs {
        InsertArgs {
            collection: "users".to_owned(),
            id:         id.map(str::to_owned),
            data:       data.to_owned(),
        }
    }

    #[test]
    fn test_insert_single() {
        let (db, _temp_dir) = setup_database();
        let result = run(args(Some("u1"), r#"{"name":"Alice"}"#), &db).unwrap();
        assert_eq!(result, json!({"id": "u1"}));
        assert_eq!(
            db.collection("users").unwrap().read("u1").unwrap().data().unwrap(),
            json!({"name": "Alice"})
        );
    }

    #[test]
    fn test_insert_generates_id() {
        let (db, _temp_dir) = setup_database();
        let result = run(args(None, r#"{"name":"Bob"}"#), &db).unwrap();
        let id = result["id"].as_str().unwrap();
        assert!(!id.is_empty());
        assert!(db.collection("users").unwrap().read(id).is_ok());
    }

    #[test]
    fn test_bulk_insert() {
        let (db, _temp_dir) = setup_database();
        let result = run(
            args(
                None,
                r#"[{"id":"a","data":{"n":1}},{"data":{"n":2}},{"id":null,"data":{"n":3}}]"#,
            ),
            &db,
        )
        .unwrap();
        let inserted = result["inserted"].as_array().unwrap();
        assert_eq!(inserted.len(), 3);
        assert_eq!(inserted[0], "a");
        assert_eq!(db.collection("users").unwrap().count().unwrap(), 3);
    }

    #[test]
    fn test_bulk_insert_stops_at_first_failure() {
        let (db, _temp_dir) = setup_database();
        let result = run(
            args(None, r#"[{"id":"a","data":{}},{"id":"a","data":{}},{"id":"b","data":{}}]"#),
            &db,
        );
        assert!(matches!(result, Err(QuadError::AlreadyExists { .. })));
        assert_eq!(db.collection("users").unwrap().count().unwrap(), 1);
    }

    #[test]
    fn test_bulk_entry_validation() {
        let (db, _temp_dir) = setup_database();
        assert!(matches!(
            run(args(None, r#"[{"id":"a"}]"#), &db),
            Err(QuadError::InvalidDocument { .. })
        ));
        assert!(matches!(
            run(args(None, r#"[{"id":5,"data":{}}]"#), &db),
            Err(QuadError::InvalidDocument { .. })
        ));
        assert!(matches!(
            run(args(None, "[1]"), &db),
            Err(QuadError::InvalidDocument { .. })
        ));
        assert!(matches!(
            run(args(Some("x"), r#"[{"data":{}}]"#), &db),
            Err(QuadError::ConfigurationError { .. })
        ));
    }

    #[test]
    fn test_insert_rejects_bad_json_and_traversal() {
        let (db, _temp_dir) = setup_database();
        assert!(matches!(
            run(args(None, "{nope"), &db),
            Err(QuadError::ConfigurationError { .. })
        ));

        let mut escaping = args(None, "{}");
        escaping.collection = "../../escape".to_owned();
        assert!(matches!(
            run(escaping, &db),
            Err(QuadError::PathTraversal { .. })
        ));
    }
}
