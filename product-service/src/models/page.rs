use jsonapi_envelope::Links;
use serde::Deserialize;
use serde_json::json;

use crate::error::{AppError, AppResult};

pub const DEFAULT_PAGE_SIZE: i64 = 10;
pub const MAX_PAGE_SIZE: i64 = 1_000;

/// `?page=&size=` query. Pages are 0-indexed.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageParams {
    pub page: Option<i64>,
    pub size: Option<i64>,
}

/// Validated page coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub size: i64,
}

impl PageRequest {
    /// Never overflows: `try_from` rejects pages whose offset does not fit.
    pub fn offset(&self) -> i64 {
        self.page.saturating_mul(self.size)
    }
}

impl TryFrom<PageParams> for PageRequest {
    type Error = AppError;

    fn try_from(params: PageParams) -> AppResult<Self> {
        let page = params.page.unwrap_or(0);
        let size = params.size.unwrap_or(DEFAULT_PAGE_SIZE);
        if page < 0 {
            return Err(AppError::BadRequest("page must be >= 0".to_string()));
        }
        if size < 1 {
            return Err(AppError::BadRequest("size must be >= 1".to_string()));
        }
        let size = size.min(MAX_PAGE_SIZE);
        if page.checked_mul(size).is_none() {
            return Err(AppError::BadRequest("page is out of range".to_string()));
        }
        Ok(Self { page, size })
    }
}

/// One slice of a listing plus the total row count it was cut from.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub request: PageRequest,
    pub total_elements: i64,
}

impl<T> Page<T> {
    pub fn total_pages(&self) -> i64 {
        (self.total_elements + self.request.size - 1) / self.request.size
    }

    pub fn has_previous(&self) -> bool {
        self.request.page > 0
    }

    pub fn has_next(&self) -> bool {
        self.request.page < self.total_pages() - 1
    }

    /// `self/first/prev/next/last` links against `base`; absent pages are `null`.
    pub fn links(&self, base: &str) -> Links {
        let size = self.request.size;
        let href = |page: i64| Some(format!("{base}?page={page}&size={size}"));
        let total_pages = self.total_pages();

        let mut links = Links::new();
        links.insert("self".to_string(), href(self.request.page));
        links.insert("first".to_string(), href(0));
        links.insert(
            "prev".to_string(),
            self.has_previous().then(|| self.request.page - 1).and_then(href),
        );
        links.insert(
            "next".to_string(),
            self.has_next().then(|| self.request.page + 1).and_then(href),
        );
        links.insert(
            "last".to_string(),
            (total_pages > 0).then(|| total_pages - 1).and_then(href),
        );
        links
    }

    pub fn meta(&self) -> serde_json::Value {
        json!({
            "totalPages": self.total_pages(),
            "totalElements": self.total_elements,
            "currentPage": self.request.page,
            "pageSize": self.request.size,
        })
    }
}
