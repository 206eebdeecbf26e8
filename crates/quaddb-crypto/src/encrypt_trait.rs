use crate::error::CryptoError;

/// Core trait for the cipher codecs used to seal collection files.
///
/// An implementation owns its key material, so callers only ever hand it
/// plaintext or blobs. The blob layout is `IV || ciphertext`; every call to
/// `encrypt` draws a fresh IV, so encrypting the same plaintext twice never
/// yields the same blob.
///
/// The trait is sealed so only codecs from this crate can be plugged into the
/// storage engine.
pub trait EncryptionAlgorithm: private::Sealed {
    /// Encrypts `plaintext`, returning `IV || ciphertext`.
    ///
    /// # Errors
    /// Returns `CryptoError::Encryption` if the cipher cannot be initialised.
    fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>, CryptoError>;

    /// Decrypts a blob previously produced by [`EncryptionAlgorithm::encrypt`].
    ///
    /// # Errors
    /// - `CryptoError::MalformedCiphertext` if the blob is shorter than one block or its body is
    ///   not block aligned
    /// - `CryptoError::InvalidPadding` if the decrypted padding is inconsistent
    fn decrypt(&self, blob: &[u8]) -> Result<Vec<u8>, CryptoError>;
}

// Sealing the trait to prevent external implementations
pub(crate) mod private {
    pub trait Sealed {}
}
