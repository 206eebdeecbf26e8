use clap::Args;
use quaddb::{Database, Result};
use serde_json::{json, Value};
use tracing::debug;

use crate::output::documents_to_json;

/// Arguments for the list command.
#[derive(Args, Clone, Default)]
pub struct ListArgs {
    /// Collection name
    #[arg(short, long)]
    pub collection: String,
    /// 1-based page number; values below 1 are treated as 1
    #[arg(short, long, default_value_t = 1, allow_negative_numbers = true)]
    pub page:       i64,
    /// Page size; defaults to the configured default page size
    #[arg(short, long, allow_negative_numbers = true)]
    pub size:       Option<i64>,
}

/// List one page of documents in id order.
pub fn run(args: &ListArgs, db: &Database) -> Result<Value> {
    let collection = db.collection(&args.collection)?;
    let pagination = db.pagination(args.page, args.size);
    debug!(
        "Listing '{}' at offset {} limit {}",
        args.collection, pagination.offset, pagination.limit
    );
    let documents = collection.list_paginated(pagination.offset, pagination.limit)?;
    Ok(json!({
        "page": args.page.max(1),
        "size": pagination.limit,
        "documents": documents_to_json(documents)?,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::setup_database;

    fn seed(db: &Database) {
        let items = db.collection("items").unwrap();
        for i in 0 .. 7 {
            items
                .create_json(Some(&format!("item{}", i)), &json!({"n": i}))
                .unwrap();
        }
    }

    fn args(page: i64, size: Option<i64>) -> ListArgs {
        ListArgs {
            collection: "items".to_owned(),
            page,
            size,
        }
    }

    #[test]
    fn test_list_pages() {
        let (db, _temp_dir) = setup_database();
        seed(&db);

        let first = run(&args(1, Some(3)), &db).unwrap();
        assert_eq!(first["size"], 3);
        assert_eq!(
            first["documents"],
            json!({"item0": {"n": 0}, "item1": {"n": 1}, "item2": {"n": 2}})
        );

        let last = run(&args(3, Some(3)), &db).unwrap();
        assert_eq!(last["documents"], json!({"item6": {"n": 6}}));

        let beyond = run(&args(4, Some(3)), &db).unwrap();
        assert_eq!(beyond["documents"], json!({}));
    }

    #[test]
    fn test_list_defaults() {
        let (db, _temp_dir) = setup_database();
        seed(&db);

        let result = run(&args(0, None), &db).unwrap();
        assert_eq!(result["page"], 1);
        assert_eq!(result["size"], 5);
        assert_eq!(result["documents"].as_object().unwrap().len(), 5);

        let result = run(&args(-3, Some(-1)), &db).unwrap();
        assert_eq!(result["page"], 1);
        assert_eq!(result["size"], 5);
    }
}
