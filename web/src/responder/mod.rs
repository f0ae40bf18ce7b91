//! JSON envelope and payloads returned by the API.

use std::fmt::Display;

use serde_derive::{Deserialize, Serialize};

use db::Page;

pub use self::data::*;

mod data;

/// Pagination details of a listing.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct PaginationData {
    pub total: usize,
    pub limit: usize,
    pub offset: usize,
    pub has_more: bool,
}

impl<T> From<&Page<T>> for PaginationData {
    fn from(page: &Page<T>) -> Self {
        Self {
            total: page.total,
            limit: page.limit,
            offset: page.offset,
            has_more: page.has_more(),
        }
    }
}

/// Envelope wrapping every response body.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<PaginationData>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            message: None,
            pagination: None,
        }
    }

    pub fn paginated<U>(data: T, page: &Page<U>) -> Self {
        Self {
            pagination: Some(page.into()),
            ..Self::ok(data)
        }
    }

    pub fn with_message(mut self, message: Option<String>) -> Self {
        self.message = message;
        self
    }
}

impl ApiResponse<()> {
    pub fn error<E: Display>(e: &E) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(e.to_string()),
            message: None,
            pagination: None,
        }
    }
}
