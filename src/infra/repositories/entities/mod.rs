//! SeaORM entity definitions
//!
//! These are database-specific entities separate from domain models.
//! Together they are the explicit schema description of the catalog:
//! `cars` belongs to `manufacturers`, and `cars_categories` links
//! `cars` to `categories` many-to-many.

pub mod car;
pub mod car_category;
pub mod category;
pub mod manufacturer;
