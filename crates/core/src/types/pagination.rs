//! Pagination envelope shared by every listing endpoint.

use serde::{Deserialize, Serialize};

use super::status::SortOrder;

/// Request-side pagination parameters.
///
/// Sent as query parameters; unset fields are omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationParams {
    /// 1-indexed page number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    /// Page size.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    /// Field to sort by.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<SortOrder>,
    /// Free-text search term.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

impl PaginationParams {
    /// Parameters for a single page.
    #[must_use]
    pub fn page(page: u32) -> Self {
        Self {
            page: Some(page),
            ..Self::default()
        }
    }

    /// Set the page size.
    #[must_use]
    pub const fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Set the sort field and direction.
    #[must_use]
    pub fn sorted_by(mut self, field: impl Into<String>, order: SortOrder) -> Self {
        self.sort_by = Some(field.into());
        self.sort_order = Some(order);
        self
    }

    /// Copy of these parameters with `search` replaced by `query`.
    #[must_use]
    pub fn with_search(&self, query: impl Into<String>) -> Self {
        Self {
            search: Some(query.into()),
            ..self.clone()
        }
    }
}

/// Response-side pagination envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedResponse<T> {
    /// Items on this page.
    #[serde(alias = "items")]
    pub data: Vec<T>,
    /// Total number of items across all pages.
    pub total: u64,
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub limit: Option<u32>,
    #[serde(default)]
    pub total_pages: Option<u32>,
}

impl<T> PaginatedResponse<T> {
    /// Returns `true` if this page holds no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns `true` if a later page exists.
    #[must_use]
    pub fn has_next_page(&self) -> bool {
        match (self.page, self.total_pages) {
            (Some(page), Some(total_pages)) => page < total_pages,
            _ => false,
        }
    }
}

impl<T> Default for PaginatedResponse<T> {
    fn default() -> Self {
        Self {
            data: Vec::new(),
            total: 0,
            page: None,
            limit: None,
            total_pages: None,
        }
    }
}
