mod error;
pub mod health;
pub mod metrics;
pub mod orders;
pub mod products;

pub use error::AppError;

use serde::Deserialize;

use storefront_core::storage::ListQuery;

/// `?page=&size=` query parameters. Bounds are checked by the mediator.
#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    pub page: Option<u32>,
    pub size: Option<u32>,
}

impl From<PageParams> for ListQuery {
    fn from(params: PageParams) -> Self {
        ListQuery {
            page: params.page.unwrap_or(ListQuery::DEFAULT_PAGE),
            size: params.size.unwrap_or(ListQuery::DEFAULT_SIZE),
        }
    }
}
