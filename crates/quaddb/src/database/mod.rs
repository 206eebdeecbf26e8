/// Database structure and configuration.
pub mod db;
/// Database operations.
pub mod operations;
#[cfg(test)]
/// Database tests.
pub mod tests;

pub use db::*;
