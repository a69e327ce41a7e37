//! Car Catalog - a catalog service for cars, their manufacturers and
//! categories.
//!
//! Callers search cars by manufacturer, model, category and production
//! year, and moderators maintain the catalog. Every write resolves its
//! manufacturer and category references by name inside one transaction.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: Catalog entities, search parameters, identifier policy
//! - **services**: Catalog use cases and token verification
//! - **infra**: Database, repositories, unit of work
//! - **api**: HTTP handlers, middleware, and routes
//! - **types**: Shared types (pagination, responses)
//! - **errors**: Failure classification and HTTP error rendering
//!
//! # CLI Usage
//!
//! ```bash
//! # Start the server
//! cargo run -- serve
//!
//! # Run migrations
//! cargo run -- migrate up
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;
pub mod types;

// Re-export commonly used types at crate root
pub use api::AppState;
pub use config::Config;
pub use domain::{Car, Category, Manufacturer};
pub use errors::{AppError, AppResult};
