use std::{collections::BTreeMap, fs, sync::Arc};

use tracing::{debug, trace, warn};

use super::db::Database;
use crate::{
    collection::{Collection, CollectionConfig},
    constants::COLLECTION_EXTENSION,
    pagination::Pagination,
    path_guard,
    Result,
};

impl Database {
    /// Returns the collection called `name`, opening it on first use.
    ///
    /// # Arguments
    ///
    /// * `name` - Collection name as supplied by the caller. It maps to `<data_dir>/<name>.qdb` and
    ///   must stay inside the data directory.
    ///
    /// # Returns
    ///
    /// A shared handle, or:
    /// - `QuadError::InvalidCollectionName` for an empty name
    /// - `QuadError::PathTraversal` for a name that escapes the data directory
    /// - any error of [`Collection::open_with_config`] if the file cannot be read
    pub fn collection(&self, name: &str) -> Result<Arc<Collection>> {
        let path = path_guard::collection_path(&self.config.data_dir, name)?;

        if let Some(collection) = self.collections.read()?.get(&path) {
            trace!("Collection '{}' served from cache", name);
            return Ok(Arc::clone(collection));
        }

        let mut collections = self.collections.write()?;
        if let Some(collection) = collections.get(&path) {
            return Ok(Arc::clone(collection));
        }

        let config = CollectionConfig {
            compression: self.config.compression,
            telemetry:   self.tracker.clone(),
        };
        let collection = Arc::new(Collection::open_with_config(
            &path,
            self.key.as_bytes(),
            config,
        )?);
        collections.insert(path, Arc::clone(&collection));
        debug!("Collection '{}' opened and cached", name);
        Ok(collection)
    }

    /// Names of the collection files in the data directory, sorted.
    ///
    /// Only files that [`Database::collection`] would accept are listed.
    pub fn collection_names(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.config.data_dir)? {
            let path = entry?.path();
            if !path.is_file() ||
                path.extension().and_then(|ext| ext.to_str()) != Some(COLLECTION_EXTENSION)
            {
                continue;
            }
            match path.file_stem().and_then(|stem| stem.to_str()) {
                Some(stem) if path_guard::collection_path(&self.config.data_dir, stem).is_ok() => {
                    names.push(stem.to_owned());
                },
                _ => warn!("Skipping unusable collection file name {:?}", path),
            }
        }
        names.sort();
        Ok(names)
    }

    /// Document count of every collection in the data directory.
    pub fn collection_counts(&self) -> Result<BTreeMap<String, usize>> {
        let mut counts = BTreeMap::new();
        for name in self.collection_names()? {
            let count = self.collection(&name)?.count()?;
            counts.insert(name, count);
        }
        Ok(counts)
    }

    /// Converts a 1-based page and optional size using the configured
    /// default page size.
    pub fn pagination(&self, page: i64, size: Option<i64>) -> Pagination {
        Pagination::from_page_with_default(page, size, self.config.default_page_size)
    }
}
