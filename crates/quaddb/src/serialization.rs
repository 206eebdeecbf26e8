//! Binary encoding of a collection's document map.
//!
//! The map is written with `postcard`: a varint entry count followed by
//! length-prefixed ids and payloads. Payload bytes are carried verbatim; the
//! codec never looks inside them.

use std::collections::BTreeMap;

use tracing::trace;

use crate::{QuadError, Result};

/// In-memory form of a collection: document id to raw payload bytes.
///
/// A `BTreeMap` keeps ids in lexicographic order, which pagination relies on.
pub type DocumentMap = BTreeMap<String, Vec<u8>>;

/// Encodes a document map.
pub fn encode_map(documents: &DocumentMap) -> Result<Vec<u8>> {
    let bytes = postcard::to_allocvec(documents).map_err(|e| {
        QuadError::CorruptData {
            reason: format!("serialization failed: {}", e),
        }
    })?;
    trace!(
        "Serialized {} documents into {} bytes",
        documents.len(),
        bytes.len()
    );
    Ok(bytes)
}

/// Decodes a document map produced by [`encode_map`].
pub fn decode_map(bytes: &[u8]) -> Result<DocumentMap> {
    postcard::from_bytes(bytes).map_err(|e| {
        QuadError::CorruptData {
            reason: format!("deserialization failed: {}", e),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_bytes_preserved() {
        let mut documents = DocumentMap::new();
        documents.insert("json".to_owned(), br#"{ "spaced" :  true }"#.to_vec());
        documents.insert("binary".to_owned(), vec![0, 255, 1, 254, 0]);
        documents.insert("empty".to_owned(), Vec::new());

        let decoded = decode_map(&encode_map(&documents).unwrap()).unwrap();
        assert_eq!(decoded, documents);
        assert_eq!(decoded["json"], br#"{ "spaced" :  true }"#.to_vec());
    }

    #[test]
    fn test_empty_map() {
        let encoded = encode_map(&DocumentMap::new()).unwrap();
        assert_eq!(encoded, vec![0]);
        assert!(decode_map(&encoded).unwrap().is_empty());
    }

    #[test]
    fn test_truncated_input_is_corrupt() {
        let mut documents = DocumentMap::new();
        documents.insert("a".to_owned(), b"{\"k\":1}".to_vec());
        let encoded = encode_map(&documents).unwrap();

        let result = decode_map(&encoded[.. encoded.len() - 3]);
        assert!(matches!(result, Err(QuadError::CorruptData { .. })));
    }

    #[test]
    fn test_empty_input_is_corrupt() {
        assert!(matches!(
            decode_map(&[]),
            Err(QuadError::CorruptData { .. })
        ));
    }
}
