//! Compression trait shared by every codec.

use crate::Result;

/// Lossless, synchronous compression of a whole buffer.
///
/// Implementations must report malformed input from `decompress` as
/// `QuadError::CorruptData`.
pub trait Compressor {
    /// Compress data
    fn compress(&self, data: &[u8]) -> Result<Vec<u8>>;
    /// Decompress data
    fn decompress(&self, data: &[u8]) -> Result<Vec<u8>>;
}

/// Wraps a codec I/O failure as corrupt data.
pub(crate) fn corrupt(codec: &str, action: &str, err: &std::io::Error) -> crate::QuadError {
    crate::QuadError::CorruptData {
        reason: format!("{} {} error: {}", codec, action, err),
    }
}
