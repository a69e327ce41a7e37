//! Shared types for list and write endpoints.

mod pagination;
mod response;

pub use pagination::{
    CarPage, CategoryPage, ManufacturerPage, Paginated, PaginationMeta, PaginationParams,
};
pub use response::{Created, NoContent};
