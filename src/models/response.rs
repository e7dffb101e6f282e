use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
            message: None,
        }
    }

    pub fn with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data,
            message: Some(message.into()),
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct PageQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

pub const MAX_PAGE_SIZE: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub page: u32,
    pub limit: u32,
}

impl Page {
    pub fn from_query(page: Option<u32>, limit: Option<u32>, default_limit: u32) -> Self {
        Self {
            page: page.unwrap_or(1).max(1),
            limit: limit.unwrap_or(default_limit).clamp(1, MAX_PAGE_SIZE),
        }
    }

    pub fn offset(&self) -> i64 {
        i64::from(self.page - 1) * i64::from(self.limit)
    }

    pub fn limit(&self) -> i64 {
        i64::from(self.limit)
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub current: u32,
    pub total: u32,
    pub has_next: bool,
    pub has_prev: bool,
    pub total_items: u64,
}

impl Pagination {
    pub fn new(page: Page, total_items: u64) -> Self {
        let total = total_items.div_ceil(u64::from(page.limit)) as u32;
        Self {
            current: page.page,
            total,
            has_next: page.page < total,
            has_prev: page.page > 1,
            total_items,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_defaults_and_clamps() {
        let page = Page::from_query(None, None, 12);
        assert_eq!(page, Page { page: 1, limit: 12 });

        let page = Page::from_query(Some(0), Some(500), 10);
        assert_eq!(page, Page { page: 1, limit: MAX_PAGE_SIZE });
        assert_eq!(page.offset(), 0);

        let page = Page::from_query(Some(3), Some(10), 10);
        assert_eq!(page.offset(), 20);
    }

    #[test]
    fn pagination_flags() {
        let meta = Pagination::new(Page { page: 2, limit: 10 }, 25);
        assert_eq!(meta.total, 3);
        assert!(meta.has_next);
        assert!(meta.has_prev);

        let meta = Pagination::new(Page { page: 1, limit: 10 }, 0);
        assert_eq!(meta.total, 0);
        assert!(!meta.has_next);
        assert!(!meta.has_prev);
    }
}
