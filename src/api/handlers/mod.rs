//! HTTP request handlers.

pub mod car_handler;
pub mod category_handler;
pub mod manufacturer_handler;

pub use car_handler::car_routes;
pub use category_handler::category_routes;
pub use manufacturer_handler::manufacturer_routes;

use serde::Deserialize;
use utoipa::IntoParams;
use validator::ValidationError;

/// Name filter shared by the manufacturer and category listings
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct NameQuery {
    /// Substring of the name; blank lists everything
    pub name: Option<String>,
}

/// Rejects empty and whitespace-only strings.
pub(crate) fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}
