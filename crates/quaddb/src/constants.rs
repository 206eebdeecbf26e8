//! Constants for file names, extensions and defaults used throughout QuadDB.

/// File extension for collection files inside the data directory.
pub const COLLECTION_EXTENSION: &str = "qdb";

/// Suffix of the scratch file a collection is written to before it is renamed into place.
pub const TEMP_FILE_SUFFIX: &str = "tmp";

/// Default data directory, relative to the working directory.
pub const DEFAULT_DATA_DIR: &str = "./data";

/// Page size used when a caller does not ask for one.
pub const DEFAULT_PAGE_SIZE: usize = 5;

/// Separator between segments of a field path (`address.city`).
pub const FIELD_PATH_SEPARATOR: char = '.';

/// Separator used when an array traversal joins several leaf values.
pub const ARRAY_VALUE_SEPARATOR: &str = ",";
