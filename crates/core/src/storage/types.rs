use serde::{Deserialize, Serialize};

use super::ListQueryError;

/// A 1-based page request for list queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListQuery {
    pub page: u32,
    pub size: u32,
}

impl ListQuery {
    pub const DEFAULT_PAGE: u32 = 1;
    pub const DEFAULT_SIZE: u32 = 10;
    pub const MAX_SIZE: u32 = 100;

    /// Creates a new list query, validating page and size bounds.
    pub fn new(page: u32, size: u32) -> Result<Self, ListQueryError> {
        if page == 0 {
            return Err(ListQueryError::InvalidPage);
        }
        if size == 0 || size > Self::MAX_SIZE {
            return Err(ListQueryError::InvalidSize {
                size,
                max: Self::MAX_SIZE,
            });
        }
        Ok(Self { page, size })
    }

    /// Number of items to skip before this page starts.
    pub fn offset(&self) -> usize {
        (self.page.saturating_sub(1) as usize).saturating_mul(self.size as usize)
    }
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            page: Self::DEFAULT_PAGE,
            size: Self::DEFAULT_SIZE,
        }
    }
}

/// One page of a list query result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListResult<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub size: u32,
    pub total_items: u64,
    pub total_pages: u32,
}

impl<T> ListResult<T> {
    /// Cuts the page described by `query` out of the full ordered item list.
    ///
    /// Item order is preserved. A page past the end yields an empty `items`
    /// with the totals still filled in.
    pub fn paginate(all: Vec<T>, query: ListQuery) -> Self {
        let total_items = all.len() as u64;
        let total_pages = total_items.div_ceil(query.size.max(1) as u64) as u32;
        let items = all
            .into_iter()
            .skip(query.offset())
            .take(query.size as usize)
            .collect();

        Self {
            items,
            page: query.page,
            size: query.size,
            total_items,
            total_pages,
        }
    }
}
