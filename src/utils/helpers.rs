//! Shared helper utilities

/// Maximum page size accepted from clients
pub const MAX_PAGE_SIZE: i64 = 100;

/// Default page size for paginated listings
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Clamp a requested page size into the accepted range
pub fn clamp_page_size(per_page: Option<i64>) -> i64 {
    per_page
        .unwrap_or(DEFAULT_PAGE_SIZE)
        .clamp(1, MAX_PAGE_SIZE)
}

/// Convert a 1-based page number and page size into a SQL offset
pub fn page_offset(page: Option<i64>, per_page: i64) -> i64 {
    let page = page.unwrap_or(1).max(1);
    (page - 1) * per_page
}

/// Normalize an email address for storage and lookup
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_page_size() {
        assert_eq!(clamp_page_size(None), DEFAULT_PAGE_SIZE);
        assert_eq!(clamp_page_size(Some(0)), 1);
        assert_eq!(clamp_page_size(Some(-5)), 1);
        assert_eq!(clamp_page_size(Some(50)), 50);
        assert_eq!(clamp_page_size(Some(1000)), MAX_PAGE_SIZE);
    }

    #[test]
    fn test_page_offset() {
        assert_eq!(page_offset(None, 10), 0);
        assert_eq!(page_offset(Some(1), 10), 0);
        assert_eq!(page_offset(Some(3), 10), 20);
        assert_eq!(page_offset(Some(0), 10), 0);
        assert_eq!(page_offset(Some(-2), 10), 0);
    }

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email("  Donor@Example.COM "), "donor@example.com");
        assert_eq!(normalize_email("plain@host"), "plain@host");
    }
}
