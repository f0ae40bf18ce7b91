//! Offset based pagination over ordered result sets.

use serde_derive::{Deserialize, Serialize};

/// Window requested by a caller.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Pagination {
    pub limit: usize,
    pub offset: usize,
}

impl Pagination {
    pub fn new(limit: usize, offset: usize) -> Self {
        Self { limit, offset }
    }

    /// First `limit` items only.
    pub fn first(limit: usize) -> Self {
        Self { limit, offset: 0 }
    }
}

/// One page of an ordered result set, with the size of the whole set.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: usize,
    pub limit: usize,
    pub offset: usize,
}

impl<T> Page<T> {
    /// Cuts the requested window out of a fully materialized, ordered set.
    pub fn paginate(all: Vec<T>, pagination: Pagination) -> Self {
        let total = all.len();
        let items = all
            .into_iter()
            .skip(pagination.offset)
            .take(pagination.limit)
            .collect();

        Self {
            items,
            total,
            limit: pagination.limit,
            offset: pagination.offset,
        }
    }

    pub fn empty(pagination: Pagination) -> Self {
        Self::paginate(vec![], pagination)
    }

    pub fn has_more(&self) -> bool {
        self.offset.saturating_add(self.limit) < self.total
    }

    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            limit: self.limit,
            offset: self.offset,
        }
    }
}
