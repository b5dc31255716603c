//! HTTP handlers, grouped by role surface

pub mod admin;
pub mod auth;
pub mod bank;
pub mod donor;
pub mod hospital;
pub mod notifications;
pub mod public;

use serde::Deserialize;

use crate::utils::helpers::{clamp_page_size, page_offset};

/// Shared pagination query parameters
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Pagination {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

impl Pagination {
    /// Resolve into a (limit, offset) pair
    pub fn limits(&self) -> (i64, i64) {
        let limit = clamp_page_size(self.per_page);
        (limit, page_offset(self.page, limit))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_limits() {
        let p = Pagination::default();
        assert_eq!(p.limits(), (10, 0));

        let p = Pagination {
            page: Some(3),
            per_page: Some(25),
        };
        assert_eq!(p.limits(), (25, 50));

        let p = Pagination {
            page: Some(-1),
            per_page: Some(100_000),
        };
        assert_eq!(p.limits(), (100, 0));
    }
}
