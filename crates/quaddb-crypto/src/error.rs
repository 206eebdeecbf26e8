/// Error type for every operation in quaddb-crypto.
///
/// Structural problems with a blob (too short, not block aligned) are reported
/// as `MalformedCiphertext`. Anything detected after running the block cipher
/// is `InvalidPadding`, which displays as a generic decryption failure.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum CryptoError {
    /// Key is not 16, 24 or 32 bytes long
    #[error("Invalid key length: {actual} bytes (expected 16, 24 or 32)")]
    InvalidKeyLength {
        /// Length of the rejected key material.
        actual: usize,
    },

    /// Blob cannot be a ciphertext produced by this codec
    #[error("Malformed ciphertext: {reason}")]
    MalformedCiphertext {
        /// What was wrong with the blob's shape.
        reason: String,
    },

    /// Padding did not validate after decryption (wrong key or corruption)
    #[error("Decryption failed")]
    InvalidPadding,

    /// Encryption could not be performed
    #[error("Encryption failed")]
    Encryption,

    /// Hex decoding errors
    #[error("Hex decoding error: {0}")]
    Hex(#[from] hex::FromHexError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_errors_convert_and_compare() {
        let err = CryptoError::from(hex::decode("zz").unwrap_err());
        assert!(matches!(err, CryptoError::Hex(_)));
        assert_eq!(err.clone(), err);
        assert_ne!(err, CryptoError::InvalidPadding);
        assert!(err.to_string().starts_with("Hex decoding error"));
    }

    #[test]
    fn test_padding_failure_is_opaque() {
        assert_eq!(CryptoError::InvalidPadding.to_string(), "Decryption failed");
    }
}
