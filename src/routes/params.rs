use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

/// Fixed page size for every paginated listing.
pub const PER_PAGE: i64 = 20;

#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct Pagination {
    /// 1-based page number. Omit to receive the full list.
    pub page: Option<i64>,
}

impl Pagination {
    pub fn page(page: i64) -> Self {
        Self { page: Some(page) }
    }

    /// `(page, per_page, offset)` when a page was requested. The offset
    /// saturates, so absurd page numbers land past the end instead of wrapping.
    pub fn normalize(&self) -> Option<(i64, i64, i64)> {
        let page = self.page?.max(1);
        let offset = (page - 1).saturating_mul(PER_PAGE);
        Some((page, PER_PAGE, offset))
    }
}
