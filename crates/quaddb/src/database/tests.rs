#[cfg(test)]
mod tests {
    use std::{fs, sync::Arc};

    use quaddb_crypto::CipherKey;
    use serde_json::json;

    use crate::{CompressionAlgorithm, Database, DatabaseConfig, QuadError};

    fn setup_database() -> (Database, tempfile::TempDir) {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = DatabaseConfig {
            data_dir: temp_dir.path().join("data"),
            ..DatabaseConfig::default()
        };
        let db = Database::open(config, &CipherKey::derive_from_secret("test secret")).unwrap();
        (db, temp_dir)
    }

    #[test]
    fn test_open_creates_data_dir() {
        let (db, temp_dir) = setup_database();
        assert!(temp_dir.path().join("data").is_dir());
        assert_eq!(db.data_dir(), temp_dir.path().join("data"));
        assert!(db.collection_names().unwrap().is_empty());
    }

    #[test]
    fn test_zero_page_size_is_rejected() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = DatabaseConfig {
            data_dir: temp_dir.path().join("data"),
            default_page_size: 0,
            ..DatabaseConfig::default()
        };
        let result = Database::open(config, &CipherKey::derive_from_secret("s"));
        assert!(matches!(
            result,
            Err(QuadError::ConfigurationError { .. })
        ));
        assert!(!temp_dir.path().join("data").exists());
    }

    #[test]
    fn test_collection_handles_are_shared() {
        let (db, _temp_dir) = setup_database();
        let first = db.collection("users").unwrap();
        let second = db.collection("users").unwrap();
        assert!(Arc::ptr_eq(&first, &second));

        first.create_json(Some("a"), &json!({"n": 1})).unwrap();
        assert_eq!(second.count().unwrap(), 1);
        assert_eq!(first.path(), db.data_dir().join("users.qdb"));
    }

    #[test]
    fn test_traversal_names_are_rejected() {
        let (db, temp_dir) = setup_database();
        assert!(matches!(
            db.collection("../../etc/passwd"),
            Err(QuadError::PathTraversal { .. })
        ));
        assert!(matches!(
            db.collection("../outside"),
            Err(QuadError::PathTraversal { .. })
        ));
        assert!(matches!(
            db.collection(""),
            Err(QuadError::InvalidCollectionName { .. })
        ));
        assert!(!temp_dir.path().join("outside.qdb").exists());
    }

    #[test]
    fn test_names_and_counts() {
        let (db, _temp_dir) = setup_database();
        let orders = db.collection("orders").unwrap();
        orders.create_json(Some("o1"), &json!({})).unwrap();
        orders.create_json(Some("o2"), &json!({})).unwrap();
        db.collection("users")
            .unwrap()
            .create_json(Some("u1"), &json!({}))
            .unwrap();
        // Opened but never written: no file, not listed.
        db.collection("empty").unwrap();
        fs::write(db.data_dir().join("notes.txt"), b"ignored").unwrap();

        assert_eq!(db.collection_names().unwrap(), vec!["orders", "users"]);
        let counts = db.collection_counts().unwrap();
        assert_eq!(counts["orders"], 2);
        assert_eq!(counts["users"], 1);
        assert_eq!(counts.len(), 2);
    }

    #[test]
    fn test_every_accepted_name_is_listed() {
        let (db, _temp_dir) = setup_database();
        for name in [".hidden", "team/users", "./plain"] {
            assert!(
                matches!(
                    db.collection(name),
                    Err(QuadError::InvalidCollectionName { .. })
                ),
                "{} should be rejected",
                name
            );
        }
        assert!(!db.data_dir().join("team").exists());
        fs::write(db.data_dir().join(".stray.qdb"), b"not a collection").unwrap();

        for name in ["plain", "users.v2", "_private"] {
            db.collection(name)
                .unwrap()
                .create_json(None, &json!({}))
                .unwrap();
        }
        assert_eq!(
            db.collection_names().unwrap(),
            vec!["_private", "plain", "users.v2"]
        );
        assert_eq!(db.collection_counts().unwrap().len(), 3);
    }

    #[test]
    fn test_reopen_reads_existing_files() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = DatabaseConfig {
            data_dir: temp_dir.path().to_path_buf(),
            compression: CompressionAlgorithm::Deflate,
            ..DatabaseConfig::default()
        };
        let key = CipherKey::derive_from_secret("persist");

        {
            let db = Database::open(config.clone(), &key).unwrap();
            db.collection("logs")
                .unwrap()
                .create_json(Some("l1"), &json!({"level": "info"}))
                .unwrap();
        }

        let db = Database::open(config, &key).unwrap();
        let logs = db.collection("logs").unwrap();
        assert_eq!(logs.read("l1").unwrap().data().unwrap()["level"], "info");
        assert_eq!(logs.compression(), CompressionAlgorithm::Deflate);
    }

    #[test]
    fn test_activity_spans_collections() {
        let (db, _temp_dir) = setup_database();
        db.collection("orders")
            .unwrap()
            .create_json(Some("o1"), &json!({}))
            .unwrap();
        db.collection("users")
            .unwrap()
            .create_json(Some("u1"), &json!({}))
            .unwrap();
        db.collection("orders").unwrap().read("o1").unwrap();

        let activity = db.activity();
        assert_eq!(activity.last_added_record.as_deref(), Some("u1"));
        assert_eq!(activity.last_used_collection.as_deref(), Some("orders"));
        assert_eq!(activity.last_read_record.as_deref(), Some("o1"));
    }

    #[test]
    fn test_pagination_uses_configured_default() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = DatabaseConfig {
            data_dir: temp_dir.path().to_path_buf(),
            default_page_size: 20,
            ..DatabaseConfig::default()
        };
        let db = Database::open(config, &CipherKey::derive_from_secret("s")).unwrap();
        let page = db.pagination(3, None);
        assert_eq!((page.offset, page.limit), (40, 20));
        let page = db.pagination(3, Some(2));
        assert_eq!((page.offset, page.limit), (4, 2));
    }
}
