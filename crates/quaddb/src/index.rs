//! Secondary equality index over a collection's documents.

use std::collections::{BTreeMap, BTreeSet};

use serde_json::Value;
use tracing::{debug, trace, warn};

use crate::{
    constants::FIELD_PATH_SEPARATOR,
    serialization::DocumentMap,
    traversal::{resolve_segments, stringify, FieldNode},
};

/// Ids of the documents holding one value of one field.
pub type IdSet = BTreeSet<String>;

/// Lower-cased field path → lower-cased value → ids.
///
/// The index is a snapshot of the documents it was built from. It never
/// follows later changes on its own; the owning collection rebuilds it after
/// every mutation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldIndex {
    fields: BTreeMap<String, BTreeMap<String, IdSet>>,
}

impl FieldIndex {
    /// Builds the index from every document whose payload is a JSON object.
    ///
    /// Each top-level field is indexed with its stringified value. Nested
    /// objects are flattened into dotted paths, and an array contributes one
    /// `array.key` entry per key found in its object elements, valued with the
    /// comma-joined values of that key. Other payloads are skipped.
    pub fn build(documents: &DocumentMap) -> Self {
        let mut index = Self::default();
        let mut skipped = 0_usize;

        for (id, payload) in documents {
            match serde_json::from_slice::<Value>(payload) {
                Ok(Value::Object(map)) => {
                    for (key, value) in &map {
                        index.add_entries(id, key.clone(), value);
                    }
                },
                Ok(_) => {
                    warn!("Document '{}' is not a JSON object, not indexed", id);
                    skipped += 1;
                },
                Err(e) => {
                    warn!("Document '{}' is not valid JSON, not indexed: {}", id, e);
                    skipped += 1;
                },
            }
        }

        debug!(
            "Built field index: {} fields over {} documents ({} skipped)",
            index.fields.len(),
            documents.len(),
            skipped
        );
        index
    }

    /// Indexes `value` under `path`, then descends into it.
    fn add_entries(&mut self, id: &str, path: String, value: &Value) {
        self.insert(&path, &stringify(value), id);

        match FieldNode::from(value) {
            FieldNode::Object(map) => {
                for (key, child) in map {
                    self.add_entries(id, format!("{}{}{}", path, FIELD_PATH_SEPARATOR, key), child);
                }
            },
            FieldNode::Array(items) => {
                let keys: BTreeSet<&str> = items
                    .iter()
                    .filter_map(Value::as_object)
                    .flat_map(|map| map.keys().map(String::as_str))
                    .collect();
                for key in keys {
                    if let Some(joined) = resolve_segments(&[key], value) {
                        self.insert(&format!("{}{}{}", path, FIELD_PATH_SEPARATOR, key), &joined, id);
                    }
                }
            },
            FieldNode::Scalar(_) => {},
        }
    }

    fn insert(&mut self, field: &str, value: &str, id: &str) {
        trace!("Indexing field '{}' for document '{}'", field, id);
        self.fields
            .entry(field.to_lowercase())
            .or_default()
            .entry(value.to_lowercase())
            .or_default()
            .insert(id.to_owned());
    }

    /// Ids matching every `(field, value)` pair, compared case-insensitively.
    ///
    /// A pair without any match empties the result immediately. An empty set
    /// of pairs matches nothing.
    pub fn query(&self, pairs: &BTreeMap<String, String>) -> IdSet {
        if pairs.is_empty() {
            return IdSet::new();
        }

        let mut hits: BTreeMap<&str, usize> = BTreeMap::new();
        for (field, value) in pairs {
            let Some(ids) = self.ids_for(field, value)
            else {
                trace!("No index entry for {}={}", field, value);
                return IdSet::new();
            };
            for id in ids {
                *hits.entry(id.as_str()).or_default() += 1;
            }
        }

        hits.into_iter()
            .filter(|&(_, count)| count == pairs.len())
            .map(|(id, _)| id.to_owned())
            .collect()
    }

    /// Ids holding `value` in `field`, if any.
    pub fn ids_for(&self, field: &str, value: &str) -> Option<&IdSet> {
        self.fields
            .get(&field.to_lowercase())?
            .get(&value.to_lowercase())
            .filter(|ids| !ids.is_empty())
    }

    /// Indexed field paths, in ascending order.
    pub fn fields(&self) -> impl Iterator<Item = &str> { self.fields.keys().map(String::as_str) }

    /// Value → ids mapping of one field.
    pub fn values_for(&self, field: &str) -> Option<&BTreeMap<String, IdSet>> { self.fields.get(&field.to_lowercase()) }

    /// Number of indexed field paths.
    pub fn len(&self) -> usize { self.fields.len() }

    pub fn is_empty(&self) -> bool { self.fields.is_empty() }
}
