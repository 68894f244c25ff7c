//! Shared types returned across the service boundary.

mod pagination;
mod result;

pub use pagination::{Paginated, PaginationMeta, PaginationParams};
pub use result::{with_error_handling, with_error_handling_as, ServiceResult};
