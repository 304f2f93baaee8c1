mod error;
mod http_mapping;
mod types;

pub use error::{ListQueryError, RepositoryError, Result};
pub use http_mapping::repository_error_to_status_code;
pub use types::{ListQuery, ListResult};
