//! Pagination primitives shared by every list and search endpoint

use serde::{ser::SerializeStruct, Deserialize, Serialize, Serializer};
use serde_with::{serde_as, DefaultOnError, DisplayFromStr};
use utoipa::ToSchema;

use crate::repository::Record;

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_LIMIT: i64 = 10;
pub const MAX_LIMIT: i64 = 100;

/// A clamped page request.
///
/// The fields are private so a `PageRequest` can only be obtained through
/// [`PageRequest::new`]; the SQL builders interpolate `limit()` and `offset()`
/// directly into LIMIT/OFFSET clauses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: i64,
    limit: i64,
}

impl PageRequest {
    pub fn new(page: Option<i64>, limit: Option<i64>) -> Self {
        let page = page.unwrap_or(DEFAULT_PAGE).max(1);
        let limit = limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
        Self { page, limit }
    }

    pub fn page(&self) -> i64 {
        self.page
    }

    pub fn limit(&self) -> i64 {
        self.limit
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit).max(0)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(None, None)
    }
}

/// Query string for list endpoints. Unparseable numbers fall back to the defaults.
#[serde_as]
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    #[serde_as(deserialize_as = "DefaultOnError<Option<DisplayFromStr>>")]
    #[serde(default)]
    pub page: Option<i64>,
    #[serde_as(deserialize_as = "DefaultOnError<Option<DisplayFromStr>>")]
    #[serde(default)]
    pub limit: Option<i64>,
    /// Only honored by the books listing
    pub category: Option<String>,
}

impl ListQuery {
    pub fn page_request(&self) -> PageRequest {
        PageRequest::new(self.page, self.limit)
    }
}

/// Query string for search endpoints
#[serde_as]
#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    pub keyword: Option<String>,
    #[serde_as(deserialize_as = "DefaultOnError<Option<DisplayFromStr>>")]
    #[serde(default)]
    pub page: Option<i64>,
    #[serde_as(deserialize_as = "DefaultOnError<Option<DisplayFromStr>>")]
    #[serde(default)]
    pub limit: Option<i64>,
}

impl SearchQuery {
    pub fn page_request(&self) -> PageRequest {
        PageRequest::new(self.page, self.limit)
    }
}

/// Pagination metadata returned alongside a page of records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    pub total_pages: i64,
}

impl Pagination {
    pub fn new(request: PageRequest, total: i64) -> Self {
        let limit = request.limit();
        Self {
            page: request.page(),
            limit,
            total,
            total_pages: (total.max(0) + limit - 1) / limit,
        }
    }
}

/// One page of records.
///
/// Serialized as `{"<collection>": [...], "pagination": {...}}` where the
/// collection key comes from the record type (`users`, `books`); search
/// results additionally echo the keyword.
#[derive(Debug, Clone)]
pub struct Paginated<E> {
    pub items: Vec<E>,
    pub pagination: Pagination,
    pub keyword: Option<String>,
}

impl<E> Paginated<E> {
    pub fn new(items: Vec<E>, request: PageRequest, total: i64) -> Self {
        Self {
            items,
            pagination: Pagination::new(request, total),
            keyword: None,
        }
    }

    pub fn with_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.keyword = Some(keyword.into());
        self
    }
}

impl<E: Record + Serialize> Serialize for Paginated<E> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let len = if self.keyword.is_some() { 3 } else { 2 };
        let mut state = serializer.serialize_struct("Paginated", len)?;
        state.serialize_field(E::COLLECTION, &self.items)?;
        state.serialize_field("pagination", &self.pagination)?;
        if let Some(ref keyword) = self.keyword {
            state.serialize_field("keyword", keyword)?;
        }
        state.end()
    }
}
