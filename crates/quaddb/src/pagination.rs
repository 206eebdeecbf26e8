use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_PAGE_SIZE;

/// A window over the lexicographically sorted ids of a collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub offset: usize,
    pub limit:  usize,
}

impl Pagination {
    /// Converts a 1-based page number and an optional page size.
    ///
    /// Pages below 1 are treated as page 1. A missing or non-positive size
    /// falls back to the default of 5.
    pub fn from_page(page: i64, size: Option<i64>) -> Self { Self::from_page_with_default(page, size, DEFAULT_PAGE_SIZE) }

    /// Same as [`Pagination::from_page`] with a caller chosen default size.
    pub fn from_page_with_default(page: i64, size: Option<i64>, default_size: usize) -> Self {
        let page = usize::try_from(page.max(1)).unwrap_or(usize::MAX);
        let limit = size
            .filter(|&s| s > 0)
            .and_then(|s| usize::try_from(s).ok())
            .unwrap_or(default_size.max(1));

        Self {
            offset: (page - 1).saturating_mul(limit),
            limit,
        }
    }
}

impl Default for Pagination {
    fn default() -> Self { Self::from_page(1, None) }
}
