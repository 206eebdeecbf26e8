use serde_json::Value;
use tracing::{debug, trace};

use super::coll::Collection;
use crate::{telemetry::AccessEvent, Document, QuadError, Result};

impl Collection {
    /// Inserts a new document and persists the collection.
    ///
    /// # Arguments
    ///
    /// * `id` - Identifier of the new document. `None` or an empty string generates a fresh
    ///   collision-resistant id.
    /// * `payload` - Document payload, stored byte for byte.
    ///
    /// # Returns
    ///
    /// The id of the stored document, or `QuadError::AlreadyExists` if the id
    /// is taken. The existence check and the write happen under one lock.
    pub fn create(&self, id: Option<&str>, payload: impl Into<Vec<u8>>) -> Result<String> {
        let payload = payload.into();
        let requested = id.filter(|id| !id.is_empty()).map(str::to_owned);

        let id = self.mutate(|documents| {
            let id = match requested {
                Some(id) => {
                    if documents.contains_key(&id) {
                        return Err(QuadError::AlreadyExists {
                            id,
                            collection: self.name.clone(),
                        });
                    }
                    id
                },
                None => {
                    let mut id = cuid2::create_id();
                    while documents.contains_key(&id) {
                        id = cuid2::create_id();
                    }
                    id
                },
            };
            documents.insert(id.clone(), payload);
            Ok(id)
        })?;

        debug!("Document '{}' created in '{}'", id, self.name);
        self.emit(&AccessEvent::DocumentCreated {
            collection: self.name.clone(),
            id:         id.clone(),
        });
        Ok(id)
    }

    /// Serializes `data` as compact JSON and inserts it.
    ///
    /// See [`Collection::create`].
    pub fn create_json(&self, id: Option<&str>, data: &Value) -> Result<String> {
        self.create(id, serde_json::to_vec(data)?)
    }

    /// Retrieves a document by id.
    ///
    /// # Errors
    ///
    /// `QuadError::NotFound` if no document has this id.
    pub fn read(&self, id: &str) -> Result<Document> {
        trace!("Reading document '{}' from '{}'", id, self.name);
        let payload = self
            .documents
            .read()?
            .get(id)
            .cloned()
            .ok_or_else(|| self.not_found(id))?;

        self.emit(&AccessEvent::DocumentRead {
            collection: self.name.clone(),
            id:         id.to_owned(),
        });
        Ok(Document::new(id, payload))
    }

    /// Replaces the payload of an existing document. The id never changes.
    ///
    /// # Errors
    ///
    /// `QuadError::NotFound` if no document has this id.
    pub fn update(&self, id: &str, payload: impl Into<Vec<u8>>) -> Result<()> {
        let payload = payload.into();
        self.mutate(|documents| {
            let slot = documents.get_mut(id).ok_or_else(|| self.not_found(id))?;
            *slot = payload;
            Ok(())
        })?;

        debug!("Document '{}' updated in '{}'", id, self.name);
        self.emit(&AccessEvent::DocumentUpdated {
            collection: self.name.clone(),
            id:         id.to_owned(),
        });
        Ok(())
    }

    /// Serializes `data` as compact JSON and replaces the document with it.
    pub fn update_json(&self, id: &str, data: &Value) -> Result<()> { self.update(id, serde_json::to_vec(data)?) }

    /// Removes a document.
    ///
    /// # Errors
    ///
    /// `QuadError::NotFound` if no document has this id.
    pub fn delete(&self, id: &str) -> Result<()> {
        self.mutate(|documents| {
            documents
                .remove(id)
                .map(|_| ())
                .ok_or_else(|| self.not_found(id))
        })?;

        debug!("Document '{}' deleted from '{}'", id, self.name);
        self.emit(&AccessEvent::DocumentDeleted {
            collection: self.name.clone(),
            id:         id.to_owned(),
        });
        Ok(())
    }

    /// Number of documents currently stored.
    pub fn count(&self) -> Result<usize> { Ok(self.documents.read()?.len()) }

    fn not_found(&self, id: &str) -> QuadError {
        QuadError::NotFound {
            id:         id.to_owned(),
            collection: self.name.clone(),
        }
    }
}
