use std::collections::BTreeMap;

use clap::Args;
use quaddb::{Database, QuadError, Result};
use serde_json::Value;
use tracing::debug;

use crate::output::documents_to_json;

/// Arguments for the search command.
#[derive(Args, Clone, Default)]
pub struct SearchArgs {
    /// Collection name
    #[arg(short, long)]
    pub collection: String,
    /// `field=value` filter; repeat for an AND query. Matching ignores case.
    #[arg(short, long, required = true)]
    pub filter:     Vec<String>,
}

/// Query the field index. Every filter must match.
pub fn run(args: &SearchArgs, db: &Database) -> Result<Value> {
    let pairs = parse_filters(&args.filter)?;
    let collection = db.collection(&args.collection)?;
    let documents = collection.query(&pairs)?;
    debug!(
        "Search on '{}' with {} filters matched {} documents",
        args.collection,
        pairs.len(),
        documents.len()
    );
    documents_to_json(documents)
}

/// Parses `field=value` filters. The value may itself contain `=`.
fn parse_filters(filters: &[String]) -> Result<BTreeMap<String, String>> {
    filters
        .iter()
        .map(|filter| {
            filter
                .split_once('=')
                .filter(|&(field, _)| !field.is_empty())
                .map(|(field, value)| (field.to_owned(), value.to_owned()))
                .ok_or_else(|| {
                    QuadError::ConfigurationError {
                        message: format!("filter '{}' must have the form field=value", filter),
                    }
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::commands::test_support::setup_database;

    fn args(filters: &[&str]) -> SearchArgs {
        SearchArgs {
            collection: "users".to_owned(),
            filter:     filters.iter().map(|f| (*f).to_owned()).collect(),
        }
    }

    #[test]
    fn test_parse_filters() {
        let pairs = parse_filters(&["a=1".to_owned(), "b=x=y".to_owned()]).unwrap();
        assert_eq!(pairs.get("a").map(String::as_str), Some("1"));
        assert_eq!(pairs.get("b").map(String::as_str), Some("x=y"));

        assert!(parse_filters(&["novalue".to_owned()]).is_err());
        assert!(parse_filters(&["=x".to_owned()]).is_err());
    }

    #[test]
    fn test_search_and_semantics() {
        let (db, _temp_dir) = setup_database();
        let users = db.collection("users").unwrap();
        users
            .create_json(Some("u1"), &json!({"status": "Active", "tier": "gold"}))
            .unwrap();
        users
            .create_json(Some("u2"), &json!({"status": "active", "tier": "silver"}))
            .unwrap();

        let both = run(&args(&["status=active"]), &db).unwrap();
        assert_eq!(both.as_object().unwrap().len(), 2);

        let gold = run(&args(&["status=ACTIVE", "tier=gold"]), &db).unwrap();
        assert_eq!(
            gold,
            json!({"u1": {"status": "Active", "tier": "gold"}})
        );

        let none = run(&args(&["status=active", "tier=bronze"]), &db).unwrap();
        assert_eq!(none, json!({}));
    }

    #[test]
    fn test_search_rejects_malformed_filter() {
        let (db, _temp_dir) = setup_database();
        assert!(matches!(
            run(&args(&["status"]), &db),
            Err(QuadError::ConfigurationError { .. })
        ));
    }
}
