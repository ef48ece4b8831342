//! Query parameters and pagination utilities

use serde::{Deserialize, Serialize};

/// Query parameters for the authors collection
///
/// Extracted from the URL query string. Page size is normalized against
/// the configured limits with [`ResourceParameters::normalized`].
///
/// # Example
/// ```text
/// GET /api/authors?pageNumber=2&pageSize=5
/// GET /api/authors?fields=id,name&orderBy=name desc
/// GET /api/authors?genre=Fantasy&searchQuery=king
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct ResourceParameters {
    /// Page number (starts at 1)
    pub page_number: usize,

    /// Number of items per page; `None` uses the configured default
    pub page_size: Option<usize>,

    /// Exact genre filter (case-insensitive)
    pub genre: Option<String>,

    /// Free-text search over genre, first name and last name
    pub search_query: Option<String>,

    /// Comma-separated sort expression
    pub order_by: String,

    /// Comma-separated field selection
    pub fields: Option<String>,
}

impl Default for ResourceParameters {
    fn default() -> Self {
        Self {
            page_number: 1,
            page_size: None,
            genre: None,
            search_query: None,
            order_by: "name".to_string(),
            fields: None,
        }
    }
}

impl ResourceParameters {
    /// Clamp paging values into the allowed range
    ///
    /// Page number is at least 1; page size defaults to `default_page_size`
    /// and is clamped to `1..=max_page_size`. Blank filters become `None`.
    pub fn normalized(mut self, default_page_size: usize, max_page_size: usize) -> Self {
        let max_page_size = max_page_size.max(1);
        self.page_number = self.page_number.max(1);
        self.page_size = Some(
            self.page_size
                .unwrap_or(default_page_size)
                .clamp(1, max_page_size),
        );
        self.genre = non_blank(self.genre);
        self.search_query = non_blank(self.search_query);
        self.fields = non_blank(self.fields);
        self
    }

    /// Page size after normalization (falls back to 1 when not normalized)
    pub fn page_size(&self) -> usize {
        self.page_size.unwrap_or(1).max(1)
    }

    pub fn fields(&self) -> Option<&str> {
        self.fields.as_deref()
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Query parameters accepted by single-resource and child-collection routes
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FieldsParams {
    pub fields: Option<String>,
}

impl FieldsParams {
    pub fn fields(&self) -> Option<&str> {
        self.fields
            .as_deref()
            .map(str::trim)
            .filter(|f| !f.is_empty())
    }
}

/// Pagination metadata
///
/// Serialized as the `X-Pagination` response header; only the four
/// counters are part of the wire format.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMetadata {
    /// Total number of items (after filters)
    pub total_count: usize,

    /// Number of items per page
    pub page_size: usize,

    /// Current page number (starts at 1)
    pub current_page: usize,

    /// Total number of pages
    pub total_pages: usize,
}

impl PaginationMetadata {
    /// Compute metadata for a page request
    ///
    /// `current_page` is clamped to at least 1 and, when there is at least
    /// one page, to at most `total_pages`.
    pub fn new(total_count: usize, page_size: usize, current_page: usize) -> Self {
        // Ensure page size is at least 1 to avoid division by zero
        let page_size = page_size.max(1);
        let total_pages = total_count.div_ceil(page_size);
        let mut current_page = current_page.max(1);
        if total_pages > 0 {
            current_page = current_page.min(total_pages);
        }

        Self {
            total_count,
            page_size,
            current_page,
            total_pages,
        }
    }

    /// Whether there is a next page
    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    /// Whether there is a previous page
    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }
}

/// One page of results plus its metadata
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub metadata: PaginationMetadata,
}

impl<T> Page<T> {
    /// Wrap a repository page-query result
    pub fn new(items: Vec<T>, total_count: usize, page_size: usize, current_page: usize) -> Self {
        Self {
            items,
            metadata: PaginationMetadata::new(total_count, page_size, current_page),
        }
    }

    /// Slice a fully filtered and sorted source into the requested page
    ///
    /// A page beyond the end yields no items but consistent metadata.
    pub fn from_source(source: Vec<T>, page_number: usize, page_size: usize) -> Self {
        let total_count = source.len();
        let page_size = page_size.max(1);
        let skip = (page_number.max(1) - 1).saturating_mul(page_size);
        let items = source.into_iter().skip(skip).take(page_size).collect();
        Self::new(items, total_count, page_size, page_number)
    }

    /// Convert the items, keeping the metadata
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            metadata: self.metadata,
        }
    }

    pub fn has_next(&self) -> bool {
        self.metadata.has_next()
    }

    pub fn has_previous(&self) -> bool {
        self.metadata.has_previous()
    }
}
