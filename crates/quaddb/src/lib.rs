pub mod blob;
pub mod collection;
pub mod compression;
pub mod constants;
pub mod database;
pub mod document;
pub mod error;
pub mod index;
pub mod pagination;
pub mod path_guard;
pub mod serialization;
pub mod telemetry;
pub mod traversal;

pub use blob::BlobCodec;
pub use collection::{Collection, CollectionConfig};
pub use compression::CompressionAlgorithm;
pub use database::{Database, DatabaseConfig};
pub use document::Document;
pub use error::{QuadError, Result};
pub use index::FieldIndex;
pub use pagination::Pagination;
pub use serialization::DocumentMap;
pub use telemetry::{AccessEvent, ActivitySnapshot, ActivityTracker, NoopTelemetry, TelemetrySink};
