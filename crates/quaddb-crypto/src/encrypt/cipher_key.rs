use std::fmt;

use rand::RngCore as _;
use zeroize::Zeroizing;

use crate::error::CryptoError;

/// AES key sizes accepted by the cipher codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeySize {
    /// 16-byte key, AES-128.
    Aes128,
    /// 24-byte key, AES-192.
    Aes192,
    /// 32-byte key, AES-256.
    #[default]
    Aes256,
}

impl KeySize {
    /// Number of key bytes for this size.
    pub const fn len(self) -> usize {
        match self {
            Self::Aes128 => 16,
            Self::Aes192 => 24,
            Self::Aes256 => 32,
        }
    }

    /// Maps a byte length onto a key size.
    pub const fn from_len(len: usize) -> Result<Self, CryptoError> {
        match len {
            16 => Ok(Self::Aes128),
            24 => Ok(Self::Aes192),
            32 => Ok(Self::Aes256),
            actual => {
                Err(CryptoError::InvalidKeyLength {
                    actual,
                })
            },
        }
    }
}

/// Validated AES key material.
///
/// The bytes are wiped from memory when the key is dropped, and `Debug` never
/// prints them.
#[derive(Clone)]
pub struct CipherKey {
    size:  KeySize,
    bytes: Zeroizing<Vec<u8>>,
}

impl CipherKey {
    /// Wraps raw key bytes, rejecting any length other than 16, 24 or 32.
    pub fn new(bytes: &[u8]) -> Result<Self, CryptoError> {
        let size = KeySize::from_len(bytes.len())?;
        Ok(Self {
            size,
            bytes: Zeroizing::new(bytes.to_vec()),
        })
    }

    /// Wraps a 32-byte AES-256 key.
    pub fn from_aes256(bytes: &[u8; 32]) -> Self {
        Self {
            size:  KeySize::Aes256,
            bytes: Zeroizing::new(bytes.to_vec()),
        }
    }

    /// Generates a random key of the requested size.
    pub fn generate(size: KeySize) -> Self {
        let mut bytes = Zeroizing::new(vec![0u8; size.len()]);
        rand::rng().fill_bytes(&mut bytes);
        Self {
            size,
            bytes,
        }
    }

    /// Derives a 32-byte key from an operator supplied secret.
    pub fn derive_from_secret(secret: &str) -> Self {
        crate::derive_key_from_secret(secret)
    }

    /// Imports a key from its hex encoding.
    pub fn from_hex(encoded: &str) -> Result<Self, CryptoError> {
        let bytes = Zeroizing::new(hex::decode(encoded.trim())?);
        Self::new(&bytes)
    }

    /// Exports the key as lowercase hex.
    pub fn to_hex(&self) -> String { hex::encode(self.as_bytes()) }

    /// Key size.
    pub const fn size(&self) -> KeySize { self.size }

    /// Raw key bytes.
    pub fn as_bytes(&self) -> &[u8] { &self.bytes }
}

impl fmt::Debug for CipherKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CipherKey")
            .field("size", &self.size)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_aes_key_lengths() {
        for len in [16, 24, 32] {
            let key = CipherKey::new(&vec![7u8; len]).unwrap();
            assert_eq!(key.size().len(), len);
        }
    }

    #[test]
    fn test_rejects_other_lengths() {
        for len in [0, 1, 10, 15, 17, 31, 33, 64] {
            let err = CipherKey::new(&vec![0u8; len]).unwrap_err();
            assert_eq!(
                err,
                CryptoError::InvalidKeyLength {
                    actual: len,
                }
            );
        }
    }

    #[test]
    fn test_generate_key() {
        let key = CipherKey::generate(KeySize::Aes128);
        assert_eq!(key.as_bytes().len(), 16);
        let other = CipherKey::generate(KeySize::Aes128);
        assert_ne!(key.as_bytes(), other.as_bytes());
    }

    #[test]
    fn test_export_import_key() {
        let key = CipherKey::generate(KeySize::Aes256);
        let hex = key.to_hex();
        let imported = CipherKey::from_hex(&hex).unwrap();
        assert_eq!(key.as_bytes(), imported.as_bytes());
    }

    #[test]
    fn test_import_rejects_bad_hex() {
        assert!(matches!(
            CipherKey::from_hex("not hex"),
            Err(CryptoError::Hex(_))
        ));
        assert!(matches!(
            CipherKey::from_hex("abcd"),
            Err(CryptoError::InvalidKeyLength {
                actual: 2,
            })
        ));
    }

    #[test]
    fn test_debug_hides_key_material() {
        let key = CipherKey::new(&[0xAB; 16]).unwrap();
        let debug = format!("{:?}", key);
        assert!(debug.contains("Aes128"));
        assert!(!debug.contains("171"));
        assert!(!debug.to_lowercase().contains("abab"));
    }
}
