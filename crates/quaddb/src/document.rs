use serde_json::Value;

use crate::{QuadError, Result};

/// A stored document: its id and the raw payload bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// The unique identifier of the document.
    pub id:      String,
    /// The payload exactly as stored, usually JSON.
    pub payload: Vec<u8>,
}

impl Document {
    pub fn new(id: impl Into<String>, payload: impl Into<Vec<u8>>) -> Self {
        Self {
            id:      id.into(),
            payload: payload.into(),
        }
    }

    /// Parses the payload as JSON.
    pub fn data(&self) -> Result<Value> {
        serde_json::from_slice(&self.payload).map_err(|e| {
            QuadError::InvalidDocument {
                id:     self.id.clone(),
                reason: e.to_string(),
            }
        })
    }
}
