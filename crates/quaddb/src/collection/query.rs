use std::collections::BTreeMap;

use serde_json::Value;
use tracing::{debug, trace, warn};

use super::coll::Collection;
use crate::{
    index::FieldIndex,
    serialization::DocumentMap,
    traversal::{resolve_segments, split_path},
    Result,
};

impl Collection {
    /// Returns the documents in the window `[offset, offset + limit)` of the
    /// ids sorted in ascending lexicographic order.
    ///
    /// An offset at or past the end yields an empty map.
    pub fn list_paginated(&self, offset: usize, limit: usize) -> Result<DocumentMap> {
        let documents = self.documents.read()?;
        let page: DocumentMap = documents
            .iter()
            .skip(offset)
            .take(limit)
            .map(|(id, payload)| (id.clone(), payload.clone()))
            .collect();
        trace!(
            "Listed {} of {} documents in '{}' (offset {}, limit {})",
            page.len(),
            documents.len(),
            self.name,
            offset,
            limit
        );
        Ok(page)
    }

    /// Scans every document for one whose value at `field_path` equals
    /// `value` exactly.
    ///
    /// The path is split on `.` and walked through objects; an array on the
    /// way yields the comma-joined values of the next segment. No case folding
    /// is applied. Payloads that are not JSON objects are skipped.
    pub fn find_by_field(&self, field_path: &str, value: &str) -> Result<DocumentMap> {
        let segments = split_path(field_path);
        let documents = self.documents.read()?;

        let mut matches = DocumentMap::new();
        for (id, payload) in documents.iter() {
            let data = match serde_json::from_slice::<Value>(payload) {
                Ok(data @ Value::Object(_)) => data,
                Ok(_) => {
                    warn!("Document '{}' is not a JSON object, skipping", id);
                    continue;
                },
                Err(e) => {
                    warn!("Document '{}' is not valid JSON, skipping: {}", id, e);
                    continue;
                },
            };

            if resolve_segments(&segments, &data).as_deref() == Some(value) {
                matches.insert(id.clone(), payload.clone());
            }
        }

        debug!(
            "find_by_field '{}' matched {} documents in '{}'",
            field_path,
            matches.len(),
            self.name
        );
        Ok(matches)
    }

    /// Returns the documents matching every `(field, value)` pair through the
    /// field index, compared case-insensitively.
    ///
    /// Payloads are fetched from the resident map after the index lookup; ids
    /// that are no longer stored are left out.
    pub fn query(&self, pairs: &BTreeMap<String, String>) -> Result<DocumentMap> {
        let ids = self.index.read()?.query(pairs);
        if ids.is_empty() {
            return Ok(DocumentMap::new());
        }

        let documents = self.documents.read()?;
        let results: DocumentMap = ids
            .into_iter()
            .filter_map(|id| {
                let payload = documents.get(&id)?.clone();
                Some((id, payload))
            })
            .collect();

        debug!(
            "Index query with {} pairs matched {} documents in '{}'",
            pairs.len(),
            results.len(),
            self.name
        );
        Ok(results)
    }

    /// Rebuilds the field index from the resident documents.
    pub fn rebuild_index(&self) -> Result<()> {
        let documents = self.documents.read()?;
        *self.index.write()? = FieldIndex::build(&documents);
        Ok(())
    }

    /// Copy of the current field index.
    pub fn index(&self) -> Result<FieldIndex> { Ok(self.index.read()?.clone()) }
}
