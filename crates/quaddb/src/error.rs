use quaddb_crypto::CryptoError;
use thiserror::Error;

/// QuadDB-wide error type for the document store engine.
///
/// Every operation on a collection either succeeds or returns exactly one of
/// these variants. None of them are retried internally: a corrupt file stays
/// corrupt until it is replaced. A missing collection file is never an error,
/// it simply reads as an empty collection.
#[derive(Error, Debug)]
pub enum QuadError {
    /// I/O operations failed
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    /// JSON serialization/deserialization of a document payload failed
    #[error("JSON error: {source}")]
    Json {
        #[from]
        source: serde_json::Error,
    },

    /// Document not found in collection
    #[error("Document '{id}' not found in collection '{collection}'")]
    NotFound {
        id:         String,
        collection: String,
    },

    /// Document already exists
    #[error("Document '{id}' already exists in collection '{collection}'")]
    AlreadyExists {
        id:         String,
        collection: String,
    },

    /// Collection file is too short or not block aligned
    #[error("Malformed ciphertext: {reason}")]
    MalformedCiphertext {
        reason: String,
    },

    /// Decrypted padding is inconsistent. Displays the same text as any other
    /// decryption failure.
    #[error("Decryption failed")]
    InvalidPadding,

    /// Decompression or deserialization of the collection failed
    #[error("Corrupt data: {reason}")]
    CorruptData {
        reason: String,
    },

    /// Collection name resolves outside the data directory
    #[error("Path traversal rejected for '{name}'")]
    PathTraversal {
        name: String,
    },

    /// Invalid collection name format
    #[error("Invalid collection name: {name}")]
    InvalidCollectionName {
        name: String,
    },

    /// A stored payload could not be interpreted as a JSON document
    #[error("Invalid document '{id}': {reason}")]
    InvalidDocument {
        id:     String,
        reason: String,
    },

    /// Lock acquisition failed
    #[error("Lock acquisition failed: {reason}")]
    LockFailed {
        reason: String,
    },

    /// Encryption operation failed
    #[error("Cryptographic operation failed: {operation}")]
    CryptoFailed {
        operation: String,
    },

    /// Configuration error (invalid key length, bad settings)
    #[error("Configuration error: {message}")]
    ConfigurationError {
        message: String,
    },
}

impl From<CryptoError> for QuadError {
    fn from(err: CryptoError) -> Self {
        match err {
            CryptoError::InvalidKeyLength {
                ..
            } |
            CryptoError::Hex(_) => {
                Self::ConfigurationError {
                    message: err.to_string(),
                }
            },
            CryptoError::MalformedCiphertext {
                reason,
            } => {
                Self::MalformedCiphertext {
                    reason,
                }
            },
            CryptoError::InvalidPadding => Self::InvalidPadding,
            CryptoError::Encryption => {
                Self::CryptoFailed {
                    operation: "encrypt".to_owned(),
                }
            },
        }
    }
}

impl<T> From<std::sync::PoisonError<T>> for QuadError {
    fn from(err: std::sync::PoisonError<T>) -> Self {
        Self::LockFailed {
            reason: err.to_string(),
        }
    }
}

/// Result type alias for QuadDB operations.
pub type Result<T> = std::result::Result<T, QuadError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_length_maps_to_configuration_error() {
        let err: QuadError = CryptoError::InvalidKeyLength {
            actual: 10,
        }
        .into();
        assert!(matches!(err, QuadError::ConfigurationError { .. }));
        assert!(err.to_string().contains("10 bytes"));
    }

    #[test]
    fn test_cipher_errors_map_to_engine_kinds() {
        let err: QuadError = CryptoError::MalformedCiphertext {
            reason: "too short".to_owned(),
        }
        .into();
        assert!(matches!(err, QuadError::MalformedCiphertext { reason } if reason == "too short"));

        let err: QuadError = CryptoError::InvalidPadding.into();
        assert!(matches!(err, QuadError::InvalidPadding));
        assert_eq!(err.to_string(), "Decryption failed");
    }

    #[test]
    fn test_error_messages() {
        let err = QuadError::NotFound {
            id:         "doc-1".to_owned(),
            collection: "users".to_owned(),
        };
        assert_eq!(
            err.to_string(),
            "Document 'doc-1' not found in collection 'users'"
        );

        let err = QuadError::PathTraversal {
            name: "../etc/passwd".to_owned(),
        };
        assert!(err.to_string().contains("../etc/passwd"));
    }
}
