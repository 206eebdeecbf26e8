use aes::{Aes128, Aes192, Aes256};
use cbc::cipher::{
    block_padding::{NoPadding, Pkcs7},
    BlockCipher,
    BlockDecryptMut,
    BlockEncryptMut,
    KeyInit,
    KeyIvInit as _,
};
use rand::RngCore as _;
use tracing::trace;

use crate::{
    encrypt::{CipherKey, KeySize},
    encrypt_trait::EncryptionAlgorithm,
    error::CryptoError,
};

/// AES block size in bytes; also the IV length.
pub const AES_BLOCK_SIZE: usize = 16;

/// AES in CBC mode with PKCS#7 padding.
///
/// Blob layout: `IV (16 bytes) || CBC ciphertext`. The IV is drawn from the
/// thread RNG on every call. The AES variant (128/192/256) follows the key
/// size.
///
/// CBC carries no authentication tag, so a wrong key is only noticed when the
/// padding or the layers above it (decompression, deserialization) reject the
/// plaintext.
#[derive(Debug, Clone)]
pub struct AesCbcCipher {
    key: CipherKey,
}

impl AesCbcCipher {
    /// Builds a codec around an already validated key.
    pub const fn new(key: CipherKey) -> Self {
        Self {
            key,
        }
    }

    /// Builds a codec from raw key bytes.
    pub fn from_slice(key: &[u8]) -> Result<Self, CryptoError> { Ok(Self::new(CipherKey::new(key)?)) }

    /// Key size in use.
    pub const fn key_size(&self) -> KeySize { self.key.size() }
}

impl EncryptionAlgorithm for AesCbcCipher {
    fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>, CryptoError> {
        let mut iv = [0u8; AES_BLOCK_SIZE];
        rand::rng().fill_bytes(&mut iv);

        let key = self.key.as_bytes();
        let ciphertext = match self.key.size() {
            KeySize::Aes128 => encrypt_padded::<Aes128>(key, &iv, plaintext)?,
            KeySize::Aes192 => encrypt_padded::<Aes192>(key, &iv, plaintext)?,
            KeySize::Aes256 => encrypt_padded::<Aes256>(key, &iv, plaintext)?,
        };

        let mut blob = Vec::with_capacity(AES_BLOCK_SIZE + ciphertext.len());
        blob.extend_from_slice(&iv);
        blob.extend_from_slice(&ciphertext);
        trace!(
            "Encrypted {} plaintext bytes into {} byte blob",
            plaintext.len(),
            blob.len()
        );
        Ok(blob)
    }

    fn decrypt(&self, blob: &[u8]) -> Result<Vec<u8>, CryptoError> {
        if blob.len() < AES_BLOCK_SIZE {
            return Err(CryptoError::MalformedCiphertext {
                reason: format!(
                    "blob is {} bytes, shorter than one {} byte block",
                    blob.len(),
                    AES_BLOCK_SIZE
                ),
            });
        }

        let (iv, body) = blob.split_at(AES_BLOCK_SIZE);
        if body.is_empty() || body.len() % AES_BLOCK_SIZE != 0 {
            return Err(CryptoError::MalformedCiphertext {
                reason: format!(
                    "ciphertext body of {} bytes is not a non-empty multiple of {}",
                    body.len(),
                    AES_BLOCK_SIZE
                ),
            });
        }

        let key = self.key.as_bytes();
        let padded = match self.key.size() {
            KeySize::Aes128 => decrypt_raw::<Aes128>(key, iv, body)?,
            KeySize::Aes192 => decrypt_raw::<Aes192>(key, iv, body)?,
            KeySize::Aes256 => decrypt_raw::<Aes256>(key, iv, body)?,
        };

        unpad(padded)
    }
}

impl crate::encrypt_trait::private::Sealed for AesCbcCipher {}

fn encrypt_padded<C>(key: &[u8], iv: &[u8], plaintext: &[u8]) -> Result<Vec<u8>, CryptoError>
where
    C: BlockEncryptMut + BlockCipher + KeyInit,
{
    let encryptor = cbc::Encryptor::<C>::new_from_slices(key, iv).map_err(|_| CryptoError::Encryption)?;
    Ok(encryptor.encrypt_padded_vec_mut::<Pkcs7>(plaintext))
}

fn decrypt_raw<C>(key: &[u8], iv: &[u8], body: &[u8]) -> Result<Vec<u8>, CryptoError>
where
    C: BlockDecryptMut + BlockCipher + KeyInit,
{
    let decryptor = cbc::Decryptor::<C>::new_from_slices(key, iv).map_err(|_| CryptoError::InvalidPadding)?;
    decryptor
        .decrypt_padded_vec_mut::<NoPadding>(body)
        .map_err(|_| CryptoError::InvalidPadding)
}

/// Strips PKCS#7 padding: the last byte is the pad count, which must lie in
/// `1..=AES_BLOCK_SIZE`, fit inside the buffer, and match every pad byte.
pub(crate) fn unpad(mut data: Vec<u8>) -> Result<Vec<u8>, CryptoError> {
    let Some(&last) = data.last()
    else {
        return Err(CryptoError::InvalidPadding);
    };
    let count = usize::from(last);
    if count == 0 || count > AES_BLOCK_SIZE || count > data.len() {
        return Err(CryptoError::InvalidPadding);
    }

    let start = data.len() - count;
    // Fold over every pad byte so the check does not exit early.
    let mismatch = data[start ..]
        .iter()
        .fold(0u8, |acc, &byte| acc | (byte ^ last));
    if mismatch != 0 {
        return Err(CryptoError::InvalidPadding);
    }

    data.truncate(start);
    Ok(data)
}
