use sha2::{Digest as _, Sha256};
use zeroize::Zeroizing;

use crate::{encrypt::CipherKey, key_derivation_trait::KeyDerivationFunction};

/// SHA-256 key derivation.
///
/// Hashes the UTF-8 secret once and uses the 32-byte digest as an AES-256 key.
/// Any string is therefore a usable secret, and files written by earlier
/// deployments that hashed their secret the same way stay readable.
pub struct Sha256KeyDerivation;

impl KeyDerivationFunction for Sha256KeyDerivation {
    fn derive_key(secret: &str) -> CipherKey {
        let mut digest = Zeroizing::new([0u8; 32]);
        digest.copy_from_slice(&Sha256::digest(secret.as_bytes()));
        CipherKey::from_aes256(&digest)
    }
}

impl crate::key_derivation_trait::private::Sealed for Sha256KeyDerivation {}
