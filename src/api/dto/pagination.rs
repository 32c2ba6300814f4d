//! Page-number pagination: query parameters and the paginated envelope.

use axum::http::Uri;
use serde::{Deserialize, Serialize};
use serde_json::json;
use serde_with::{DisplayFromStr, serde_as};
use url::Url;

use crate::error::AppError;

pub const DEFAULT_PAGE_LIMIT: u32 = 6;
pub const MAX_PAGE_LIMIT: u32 = 100;

/// Pagination query parameters.
///
/// Uses `serde_with` to parse page numbers from query strings as integers.
#[serde_as]
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
pub struct PaginationParams {
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub page: Option<u32>,

    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub limit: Option<u32>,
}

/// A validated page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub page: u32,
    pub limit: u32,
}

impl PaginationParams {
    /// Applies defaults and validates the parameters.
    ///
    /// # Defaults
    ///
    /// - `page`: 1
    /// - `limit`: 6
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if `page` is 0 or `limit` is outside 1..=100.
    pub fn window(&self) -> Result<PageWindow, AppError> {
        let page = self.page.unwrap_or(1);
        let limit = self.limit.unwrap_or(DEFAULT_PAGE_LIMIT);

        if page == 0 {
            return Err(AppError::bad_request(
                "Page must be greater than 0",
                json!({ "page": page }),
            ));
        }

        if !(1..=MAX_PAGE_LIMIT).contains(&limit) {
            return Err(AppError::bad_request(
                format!("Limit must be between 1 and {}", MAX_PAGE_LIMIT),
                json!({ "limit": limit }),
            ));
        }

        Ok(PageWindow { page, limit })
    }
}

impl PageWindow {
    pub fn offset(&self) -> i64 {
        i64::from(self.page - 1) * i64::from(self.limit)
    }

    pub fn limit(&self) -> i64 {
        i64::from(self.limit)
    }
}

/// Paginated list envelope.
///
/// ```json
/// { "count": 12, "next": "http://host/api/recipes?page=3", "previous": "http://host/api/recipes", "results": [] }
/// ```
#[derive(Debug, Serialize)]
pub struct Page<T> {
    pub count: i64,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<T>,
}

impl<T> Page<T> {
    /// Wraps `results` and links neighbouring pages of `uri` under `base_url`.
    pub fn new(results: Vec<T>, count: i64, window: PageWindow, base_url: &str, uri: &Uri) -> Self {
        let has_next = i64::from(window.page) * window.limit() < count;

        let next = has_next
            .then(|| page_url(base_url, uri, Some(window.page + 1)))
            .flatten();

        // The first page is linked without a page parameter.
        let previous = match window.page {
            1 => None,
            2 => page_url(base_url, uri, None),
            n => page_url(base_url, uri, Some(n - 1)),
        };

        Self {
            count,
            next,
            previous,
            results,
        }
    }
}

/// Builds an absolute URL for `uri` with its `page` parameter replaced.
fn page_url(base_url: &str, uri: &Uri, page: Option<u32>) -> Option<String> {
    let mut url = Url::parse(base_url).ok()?;

    let path = format!("{}{}", url.path().trim_end_matches('/'), uri.path());
    url.set_path(&path);

    let pairs: Vec<(String, String)> = uri
        .query()
        .map(|q| {
            url::form_urlencoded::parse(q.as_bytes())
                .filter(|(key, _)| key != "page")
                .map(|(key, value)| (key.into_owned(), value.into_owned()))
                .collect()
        })
        .unwrap_or_default();

    url.set_query(None);
    if !pairs.is_empty() || page.is_some() {
        let mut query = url.query_pairs_mut();
        query.extend_pairs(pairs);
        if let Some(page) = page {
            query.append_pair("page", &page.to_string());
        }
    }

    Some(url.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://foodgram.example";

    fn params(page: Option<u32>, limit: Option<u32>) -> PaginationParams {
        PaginationParams { page, limit }
    }

    fn window(page: u32, limit: u32) -> PageWindow {
        PageWindow { page, limit }
    }

    #[test]
    fn test_defaults() {
        let w = params(None, None).window().unwrap();
        assert_eq!(w.offset(), 0);
        assert_eq!(w.limit(), 6);
    }

    #[test]
    fn test_offset_for_later_page() {
        let w = params(Some(3), Some(10)).window().unwrap();
        assert_eq!(w.offset(), 20);
        assert_eq!(w.limit(), 10);
    }

    #[test]
    fn test_page_zero_is_error() {
        assert!(params(Some(0), None).window().is_err());
    }

    #[test]
    fn test_limit_bounds() {
        assert!(params(None, Some(0)).window().is_err());
        assert!(params(None, Some(1)).window().is_ok());
        assert!(params(None, Some(100)).window().is_ok());
        assert!(params(None, Some(101)).window().is_err());
    }

    #[test]
    fn test_numbers_are_parsed_from_strings() {
        let p: PaginationParams =
            serde_json::from_value(serde_json::json!({ "page": "2", "limit": "3" })).unwrap();
        assert_eq!(p, params(Some(2), Some(3)));

        let bad = serde_json::from_value::<PaginationParams>(serde_json::json!({ "page": "x" }));
        assert!(bad.is_err());
    }

    #[test]
    fn test_single_page_has_no_links() {
        let uri: Uri = "/api/recipes".parse().unwrap();
        let page = Page::new(vec![1, 2], 2, window(1, 6), BASE, &uri);

        assert_eq!(page.count, 2);
        assert!(page.next.is_none());
        assert!(page.previous.is_none());
    }

    #[test]
    fn test_first_page_links_next() {
        let uri: Uri = "/api/recipes?limit=2".parse().unwrap();
        let page = Page::new(vec![1, 2], 5, window(1, 2), BASE, &uri);

        assert_eq!(
            page.next.as_deref(),
            Some("https://foodgram.example/api/recipes?limit=2&page=2")
        );
        assert!(page.previous.is_none());
    }

    #[test]
    fn test_middle_page_keeps_filters_and_replaces_page() {
        let uri: Uri = "/api/recipes?tags=lunch&page=3&tags=dinner&limit=2"
            .parse()
            .unwrap();
        let page = Page::new(vec![1, 2], 10, window(3, 2), BASE, &uri);

        assert_eq!(
            page.next.as_deref(),
            Some("https://foodgram.example/api/recipes?tags=lunch&tags=dinner&limit=2&page=4")
        );
        assert_eq!(
            page.previous.as_deref(),
            Some("https://foodgram.example/api/recipes?tags=lunch&tags=dinner&limit=2&page=2")
        );
    }

    #[test]
    fn test_second_page_previous_drops_page_parameter() {
        let uri: Uri = "/api/users?page=2".parse().unwrap();
        let page = Page::new(vec![1], 7, window(2, 6), BASE, &uri);

        assert_eq!(
            page.previous.as_deref(),
            Some("https://foodgram.example/api/users")
        );
        assert!(page.next.is_none());
    }

    #[test]
    fn test_base_url_path_is_kept() {
        let uri: Uri = "/api/users".parse().unwrap();
        let page = Page::new(vec![1], 7, window(1, 6), "https://example.com/foodgram", &uri);

        assert_eq!(
            page.next.as_deref(),
            Some("https://example.com/foodgram/api/users?page=2")
        );
    }
}
