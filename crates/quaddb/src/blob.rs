//! The on-disk pipeline of a collection file.
//!
//! Writing: serialize → compress → encrypt. Reading runs the same steps in
//! reverse. The resulting blob is `IV || AES-CBC(PKCS#7(compressed map))`.

use quaddb_crypto::{AesCbcCipher, CipherKey, EncryptionAlgorithm as _};
use tracing::trace;

use crate::{
    compression::{get_compressor, CompressionAlgorithm, Compressor},
    serialization::{decode_map, encode_map, DocumentMap},
    Result,
};

/// Composes the cipher, compression and serialization codecs.
pub struct BlobCodec {
    cipher:      AesCbcCipher,
    compressor:  Box<dyn Compressor + Send + Sync>,
    compression: CompressionAlgorithm,
}

impl BlobCodec {
    /// Builds the pipeline for a validated key and a compression algorithm.
    pub fn new(key: CipherKey, compression: CompressionAlgorithm) -> Self {
        Self {
            cipher: AesCbcCipher::new(key),
            compressor: get_compressor(compression),
            compression,
        }
    }

    /// Compression algorithm in use.
    pub const fn compression(&self) -> CompressionAlgorithm { self.compression }

    /// Turns a document map into an encrypted blob. Each call uses a fresh IV.
    pub fn seal(&self, documents: &DocumentMap) -> Result<Vec<u8>> {
        let serialized = encode_map(documents)?;
        let compressed = self.compressor.compress(&serialized)?;
        let blob = self.cipher.encrypt(&compressed)?;
        trace!(
            "Sealed {} documents: {} serialized, {} compressed, {} blob bytes",
            documents.len(),
            serialized.len(),
            compressed.len(),
            blob.len()
        );
        Ok(blob)
    }

    /// Recovers the document map from a blob.
    pub fn open(&self, blob: &[u8]) -> Result<DocumentMap> {
        let compressed = self.cipher.decrypt(blob)?;
        let serialized = self.compressor.decompress(&compressed)?;
        decode_map(&serialized)
    }
}

impl std::fmt::Debug for BlobCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlobCodec")
            .field("key_size", &self.cipher.key_size())
            .field("compression", &self.compression)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use quaddb_crypto::KeySize;

    use super::*;
    use crate::QuadError;

    fn sample() -> DocumentMap {
        let mut documents = DocumentMap::new();
        documents.insert("a".to_owned(), br#"{"status":"active"}"#.to_vec());
        documents.insert("b".to_owned(), br#"{"status":"inactive"}"#.to_vec());
        documents
    }

    #[test]
    fn test_seal_open_round_trip() {
        let codec = BlobCodec::new(CipherKey::generate(KeySize::Aes256), CompressionAlgorithm::Gzip);
        let blob = codec.seal(&sample()).unwrap();
        assert_eq!(codec.open(&blob).unwrap(), sample());
    }

    #[test]
    fn test_seal_is_not_deterministic() {
        let codec = BlobCodec::new(CipherKey::generate(KeySize::Aes128), CompressionAlgorithm::Zlib);
        let first = codec.seal(&sample()).unwrap();
        let second = codec.seal(&sample()).unwrap();
        assert_ne!(first, second);
        assert_eq!(codec.open(&first).unwrap(), codec.open(&second).unwrap());
    }

    #[test]
    fn test_wrong_key_fails() {
        let writer = BlobCodec::new(CipherKey::generate(KeySize::Aes256), CompressionAlgorithm::Gzip);
        let reader = BlobCodec::new(CipherKey::generate(KeySize::Aes256), CompressionAlgorithm::Gzip);
        let blob = writer.seal(&sample()).unwrap();
        assert!(matches!(
            reader.open(&blob),
            Err(QuadError::InvalidPadding | QuadError::CorruptData { .. })
        ));
    }

    #[test]
    fn test_truncated_blob_is_malformed() {
        let codec = BlobCodec::new(CipherKey::generate(KeySize::Aes256), CompressionAlgorithm::Gzip);
        let blob = codec.seal(&sample()).unwrap();
        assert!(matches!(
            codec.open(&blob[.. 10]),
            Err(QuadError::MalformedCiphertext { .. })
        ));
        assert!(matches!(
            codec.open(&blob[.. blob.len() - 1]),
            Err(QuadError::MalformedCiphertext { .. })
        ));
    }
}
