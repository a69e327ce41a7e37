//! Domain layer - Catalog entities and pure policies.
//!
//! This module contains the catalog models (cars, manufacturers,
//! categories), the search parameters that drive car queries, and the
//! identifier policy applied before a new aggregate is first written.
//! Nothing in here touches storage.

pub mod car;
pub mod catalog;
pub mod identifier;
pub mod search;

pub use car::{Car, CarDraft, CarResponse};
pub use catalog::{Category, Manufacturer, ResourceKind};
pub use identifier::IdentifierPolicy;
pub use search::SearchParameters;
