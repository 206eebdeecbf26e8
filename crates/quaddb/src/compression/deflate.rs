//! DEFLATE compression implementation
//!
//! Raw DEFLATE carries no header or checksum. Damage that still decodes is
//! left to the deserializer to catch.

use std::io::{Read as _, Write as _};

use flate2::{read::DeflateDecoder, write::DeflateEncoder, Compression};

use crate::{
    compression::{compression_trait::corrupt, Compressor},
    Result,
};

/// DEFLATE compressor
pub struct DeflateCompressor;

impl Compressor for DeflateCompressor {
    fn compress(&self, data: &[u8]) -> Result<Vec<u8>> {
        let mut encoder = DeflateEncoder::new(Vec::new(), Compression::default());
        encoder
            .write_all(data)
            .map_err(|e| corrupt("DEFLATE", "compression", &e))?;
        encoder
            .finish()
            .map_err(|e| corrupt("DEFLATE", "compression", &e))
    }

    fn decompress(&self, data: &[u8]) -> Result<Vec<u8>> {
        let mut decoder = DeflateDecoder::new(data);
        let mut decompressed: Vec<u8> = Vec::new();
        decoder
            .read_to_end(&mut decompressed)
            .map_err(|e| corrupt("DEFLATE", "decompression", &e))?;
        Ok(decompressed)
    }
}
