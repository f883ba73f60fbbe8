//! Shared success envelope for API handlers.
//!
//! All successful responses use
//! `{"status": "success", "code", "message", "data", "meta"}` where
//! `meta` carries the page block for paginated lists and is null
//! otherwise. Use [`ApiResponse`] instead of ad-hoc `json!` bodies to
//! get consistent serialization.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use serde_json::json;

/// Pagination metadata attached to list responses.
#[derive(Debug, Clone, Serialize)]
pub struct PageMeta {
    pub page: i64,
    pub total_pages: i64,
    pub total_records: i64,
    /// Relative link to the next page, if any.
    pub next: Option<String>,
    /// Relative link to the previous page, if any.
    pub previous: Option<String>,
}

impl PageMeta {
    /// Build page metadata for a list endpoint at `path`.
    ///
    /// `query` is the request's raw query string; filters, search and
    /// ordering parameters in it are carried into the `next`/`previous`
    /// links so that following a link stays on the same result set.
    pub fn new(
        path: &str,
        query: Option<&str>,
        page: i64,
        page_size: i64,
        total_records: i64,
    ) -> Self {
        let total_pages = if total_records == 0 {
            1
        } else {
            (total_records + page_size - 1) / page_size
        };

        let link = |p: i64| page_link(path, query, p, page_size);
        let next = (page < total_pages).then(|| link(page + 1));
        let previous = (page > 1).then(|| link(page - 1));

        Self {
            page,
            total_pages,
            total_records,
            next,
            previous,
        }
    }
}

/// Rebuild the query string with `page` and `page_size` replaced,
/// keeping every other parameter verbatim.
fn page_link(path: &str, query: Option<&str>, page: i64, page_size: i64) -> String {
    let mut pairs: Vec<(&str, String)> = query
        .unwrap_or("")
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| match pair.split_once('=') {
            Some((key, value)) => (key, value.to_string()),
            None => (pair, String::new()),
        })
        .filter(|(key, _)| *key != "page" && *key != "page_size")
        .collect();
    pairs.push(("page", page.to_string()));
    pairs.push(("page_size", page_size.to_string()));

    let query: Vec<String> = pairs
        .into_iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect();
    format!("{path}?{}", query.join("&"))
}

/// Standard success envelope.
#[derive(Debug)]
pub struct ApiResponse<T: Serialize> {
    status: StatusCode,
    message: &'static str,
    data: T,
    meta: Option<PageMeta>,
}

impl<T: Serialize> ApiResponse<T> {
    /// 200 OK with a single resource payload.
    pub fn ok(data: T) -> Self {
        Self {
            status: StatusCode::OK,
            message: "Operation completed successfully.",
            data,
            meta: None,
        }
    }

    /// 201 Created with the new resource payload.
    pub fn created(data: T) -> Self {
        Self {
            status: StatusCode::CREATED,
            message: "Resource created successfully.",
            data,
            meta: None,
        }
    }

    /// 200 OK list response with pagination metadata.
    pub fn list(data: T, meta: Option<PageMeta>) -> Self {
        Self {
            status: StatusCode::OK,
            message: "List retrieved successfully.",
            data,
            meta,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let body = json!({
            "status": "success",
            "code": self.status.as_u16(),
            "message": self.message,
            "data": self.data,
            "meta": self.meta,
        });
        (self.status, axum::Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn meta_links_only_where_pages_exist() {
        let meta = PageMeta::new("/api/projects", None, 2, 10, 25);
        assert_eq!(meta.total_pages, 3);
        assert_eq!(
            meta.next.as_deref(),
            Some("/api/projects?page=3&page_size=10")
        );
        assert_eq!(
            meta.previous.as_deref(),
            Some("/api/projects?page=1&page_size=10")
        );
    }

    #[test]
    fn links_keep_filters_and_ordering() {
        let query = Some("category=2&search=torre&ordering=-year&page=2&page_size=5");
        let meta = PageMeta::new("/api/projects", query, 2, 5, 12);
        assert_eq!(
            meta.next.as_deref(),
            Some("/api/projects?category=2&search=torre&ordering=-year&page=3&page_size=5")
        );
        assert_eq!(
            meta.previous.as_deref(),
            Some("/api/projects?category=2&search=torre&ordering=-year&page=1&page_size=5")
        );
    }

    #[test]
    fn single_page_has_no_links() {
        let meta = PageMeta::new("/api/projects", None, 1, 10, 4);
        assert_eq!(meta.total_pages, 1);
        assert!(meta.next.is_none());
        assert!(meta.previous.is_none());
    }

    #[test]
    fn empty_list_still_reports_one_page() {
        let meta = PageMeta::new("/api/projects", None, 1, 10, 0);
        assert_eq!(meta.total_pages, 1);
        assert_eq!(meta.total_records, 0);
    }
}
