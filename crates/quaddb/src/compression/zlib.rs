//! ZLIB compression implementation

use std::io::{Read as _, Write as _};

use flate2::{read::ZlibDecoder, write::ZlibEncoder, Compression};

use crate::{
    compression::{compression_trait::corrupt, Compressor},
    Result,
};

/// ZLIB compressor
pub struct ZlibCompressor;

impl Compressor for ZlibCompressor {
    fn compress(&self, data: &[u8]) -> Result<Vec<u8>> {
        let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
        encoder
            .write_all(data)
            .map_err(|e| corrupt("ZLIB", "compression", &e))?;
        encoder
            .finish()
            .map_err(|e| corrupt("ZLIB", "compression", &e))
    }

    fn decompress(&self, data: &[u8]) -> Result<Vec<u8>> {
        let mut decoder = ZlibDecoder::new(data);
        let mut decompressed: Vec<u8> = Vec::new();
        decoder
            .read_to_end(&mut decompressed)
            .map_err(|e| corrupt("ZLIB", "decompression", &e))?;
        Ok(decompressed)
    }
}
