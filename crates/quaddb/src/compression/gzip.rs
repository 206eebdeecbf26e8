//! GZIP compression implementation
//!
//! GZIP frames a DEFLATE stream with a header and a CRC-32 trailer, so a
//! truncated or damaged stream is detected during decompression. It is the
//! default for collection files.

use std::io::{Read as _, Write as _};

use flate2::{read::GzDecoder, write::GzEncoder, Compression};

use crate::{
    compression::{compression_trait::corrupt, Compressor},
    Result,
};

/// GZIP compressor
pub struct GzipCompressor;

impl Compressor for GzipCompressor {
    fn compress(&self, data: &[u8]) -> Result<Vec<u8>> {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder
            .write_all(data)
            .map_err(|e| corrupt("GZIP", "compression", &e))?;
        encoder
            .finish()
            .map_err(|e| corrupt("GZIP", "compression", &e))
    }

    fn decompress(&self, data: &[u8]) -> Result<Vec<u8>> {
        let mut decoder = GzDecoder::new(data);
        let mut decompressed: Vec<u8> = Vec::new();
        decoder
            .read_to_end(&mut decompressed)
            .map_err(|e| corrupt("GZIP", "decompression", &e))?;
        Ok(decompressed)
    }
}
