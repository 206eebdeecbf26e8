//! Compression codecs applied to the serialized document map before encryption.

pub mod compression_trait;
pub mod deflate;
pub mod gzip;
pub mod zlib;

pub use compression_trait::Compressor;
pub use deflate::DeflateCompressor;
pub use gzip::GzipCompressor;
pub use zlib::ZlibCompressor;

/// Compression algorithms available for collection files.
///
/// The algorithm is not recorded inside the blob, so a collection must always
/// be reopened with the algorithm it was written with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompressionAlgorithm {
    /// GZIP: DEFLATE with a gzip header and CRC trailer.
    /// The format historical collection files were written in.
    #[default]
    Gzip,
    /// Raw DEFLATE stream without framing.
    /// Smallest output, but corruption is only caught by the layers above.
    Deflate,
    /// ZLIB: DEFLATE with a two byte header and Adler-32 trailer.
    Zlib,
}

impl std::str::FromStr for CompressionAlgorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "gzip" => Ok(Self::Gzip),
            "deflate" => Ok(Self::Deflate),
            "zlib" => Ok(Self::Zlib),
            _ => Err(format!("Invalid compression algorithm: {}", s)),
        }
    }
}

impl std::fmt::Display for CompressionAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match *self {
            Self::Gzip => write!(f, "gzip"),
            Self::Deflate => write!(f, "deflate"),
            Self::Zlib => write!(f, "zlib"),
        }
    }
}

/// Get a compressor instance for the given algorithm
pub fn get_compressor(algorithm: CompressionAlgorithm) -> Box<dyn Compressor + Send + Sync> {
    match algorithm {
        CompressionAlgorithm::Gzip => Box::new(GzipCompressor),
        CompressionAlgorithm::Deflate => Box::new(DeflateCompressor),
        CompressionAlgorithm::Zlib => Box::new(ZlibCompressor),
    }
}
