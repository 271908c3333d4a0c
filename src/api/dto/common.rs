//! Common API DTOs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Standard response envelope.
///
/// Every REST endpoint wraps its payload: on success
/// `{"success": true, "data": {...}}`, on failure
/// `{"success": false, "error": "description"}`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    /// `true` when the request succeeded
    pub success: bool,
    /// Payload; `null` on error
    pub data: Option<T>,
    /// Error description; `null` on success
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Pagination parameters for list requests
#[derive(Debug, Deserialize, ToSchema, utoipa::IntoParams)]
pub struct PaginationQuery {
    /// Page number (1-based). Default: 1
    pub page: Option<u32>,
    /// Items per page (1-100). Default: 50
    pub limit: Option<u32>,
}

/// Paginated slice with page metadata
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PaginatedResponse<T> {
    pub items: Vec<T>,
    /// Total items across all pages
    pub total: u64,
    /// Current page (1-based)
    pub page: u32,
    pub limit: u32,
    pub total_pages: u32,
}

impl<T> PaginatedResponse<T> {
    pub fn new(items: Vec<T>, total: u64, page: u32, limit: u32) -> Self {
        let total_pages = ((total as f64) / (limit as f64)).ceil() as u32;
        Self {
            items,
            total,
            page,
            limit,
            total_pages,
        }
    }

    /// Paginate an already-materialized collection (in-memory stores).
    /// Offsets are computed in u64 so an arbitrarily large page number
    /// yields an empty page instead of overflowing.
    pub fn paginate(mut all: Vec<T>, page: u32, limit: u32) -> Self {
        let total = all.len() as u64;
        let start = u64::from(page).saturating_sub(1) * u64::from(limit);
        let items: Vec<T> = if start >= all.len() as u64 {
            Vec::new()
        } else {
            let start = start as usize;
            let end = (start + limit as usize).min(all.len());
            all.drain(start..end).collect()
        };
        Self::new(items, total, page, limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paginate_slices_and_counts() {
        let all: Vec<u32> = (1..=12).collect();
        let page = PaginatedResponse::paginate(all, 2, 5);
        assert_eq!(page.items, vec![6, 7, 8, 9, 10]);
        assert_eq!(page.total, 12);
        assert_eq!(page.total_pages, 3);
    }

    #[test]
    fn paginate_past_the_end_is_empty() {
        let all: Vec<u32> = (1..=3).collect();
        let page = PaginatedResponse::paginate(all, 5, 10);
        assert!(page.items.is_empty());
        assert_eq!(page.total, 3);
    }

    #[test]
    fn paginate_with_huge_page_number_is_empty() {
        let all: Vec<u32> = (1..=3).collect();
        let page = PaginatedResponse::paginate(all, u32::MAX, 100);
        assert!(page.items.is_empty());
        assert_eq!(page.total, 3);
        assert_eq!(page.page, u32::MAX);
    }
}
