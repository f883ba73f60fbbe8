//! Shared query parameter types for API handlers.

use serde::Deserialize;

/// Default page size for list endpoints.
const DEFAULT_PAGE_SIZE: i64 = 10;

/// Maximum page size a client may request.
const MAX_PAGE_SIZE: i64 = 100;

/// Page-number pagination parameters (`?page=&page_size=&no_page=`).
///
/// `no_page=true` disables pagination entirely and returns the full
/// result set with no `meta` block.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageParams {
    pub page: Option<i64>,
    pub page_size: Option<i64>,
    #[serde(default)]
    pub no_page: Option<bool>,
}

/// A resolved page window: `LIMIT`/`OFFSET` plus the clamped inputs.
#[derive(Debug, Clone, Copy)]
pub struct PageWindow {
    pub page: i64,
    pub page_size: i64,
    pub limit: i64,
    pub offset: i64,
}

impl PageParams {
    /// True when the client asked for pagination to be disabled.
    pub fn disabled(&self) -> bool {
        self.no_page.unwrap_or(false)
    }

    /// Clamp the raw parameters into a usable window.
    pub fn window(&self) -> PageWindow {
        let page = self.page.unwrap_or(1).max(1);
        let page_size = self
            .page_size
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE);
        PageWindow {
            page,
            page_size,
            limit: page_size,
            offset: (page - 1) * page_size,
        }
    }
}
