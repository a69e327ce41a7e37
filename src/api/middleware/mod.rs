//! API middleware.

mod auth;

pub use auth::{auth_middleware, require_role_for_method, required_roles, CurrentUser};
