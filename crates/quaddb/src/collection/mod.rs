/// Core collection implementation.
pub mod coll;
/// Collection operations.
pub mod operations;
/// Collection query operations.
pub mod query;

pub use coll::*;
