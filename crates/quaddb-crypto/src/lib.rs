//! # QuadDB Crypto
//!
//! Cipher codec and key material handling for QuadDB collection files.
//!
//! Every collection file is a single blob: a random 16-byte IV followed by the
//! AES-CBC encryption of the PKCS#7 padded plaintext. The AES variant follows
//! the key length (16, 24 or 32 bytes).
//!
//! ## Design Principles
//!
//! - **Sealed traits**: `EncryptionAlgorithm` and `KeyDerivationFunction` can only be implemented
//!   inside this crate.
//! - **Validated keys**: a `CipherKey` can only exist with a legal AES length, so key length errors
//!   surface once, when the key is built, instead of on every operation.
//! - **Zeroized material**: key bytes are wiped on drop and never printed by `Debug`.
//! - **Opaque failures**: a padding failure reads exactly like any other decryption failure.
//!
//! ## Usage
//!
//! ```rust
//! use quaddb_crypto::{decrypt, encrypt, CipherKey};
//!
//! let key = CipherKey::derive_from_secret("operator secret");
//! let blob = encrypt(&key, b"document map").unwrap();
//! assert_eq!(decrypt(&key, &blob).unwrap(), b"document map");
//! ```

pub mod encrypt;
pub mod encrypt_trait;
pub mod error;
pub mod key_derivation;
pub mod key_derivation_trait;

pub use encrypt::{AesCbcCipher, CipherKey, KeySize, AES_BLOCK_SIZE};
pub use encrypt_trait::EncryptionAlgorithm;
pub use error::CryptoError;
pub use key_derivation::Sha256KeyDerivation;
pub use key_derivation_trait::KeyDerivationFunction;

/// Encrypts `plaintext` under `key`, returning `IV || ciphertext`.
pub fn encrypt(key: &CipherKey, plaintext: &[u8]) -> Result<Vec<u8>, CryptoError> {
    AesCbcCipher::new(key.clone()).encrypt(plaintext)
}

/// Decrypts a blob produced by [`encrypt`].
pub fn decrypt(key: &CipherKey, blob: &[u8]) -> Result<Vec<u8>, CryptoError> {
    AesCbcCipher::new(key.clone()).decrypt(blob)
}

/// Derives a key from an operator secret with the default derivation.
pub fn derive_key_from_secret(secret: &str) -> CipherKey { Sha256KeyDerivation::derive_key(secret) }

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_with_derived_key() {
        let key = derive_key_from_secret("test passphrase");
        let blob = encrypt(&key, b"test data").unwrap();
        assert_eq!(decrypt(&key, &blob).unwrap(), b"test data");
    }

    #[test]
    fn test_same_plaintext_different_blobs() {
        let key = CipherKey::generate(KeySize::Aes192);
        let first = encrypt(&key, b"payload").unwrap();
        let second = encrypt(&key, b"payload").unwrap();
        assert_ne!(first, second);
        assert_eq!(decrypt(&key, &first).unwrap(), decrypt(&key, &second).unwrap());
    }

    #[test]
    fn test_short_blob_rejected() {
        let key = CipherKey::generate(KeySize::Aes256);
        assert!(matches!(
            decrypt(&key, b"short"),
            Err(CryptoError::MalformedCiphertext { .. })
        ));
    }
}
