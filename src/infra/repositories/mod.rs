//! Repository layer - Data access abstraction
//!
//! Repositories provide an abstraction over data persistence,
//! following the Repository pattern for clean separation of concerns.
//! Every store is generic over the SeaORM connection type so the same
//! code runs on the pool and inside a transaction.

mod base;
mod car_repository;
mod category_repository;
pub(crate) mod entities;
mod manufacturer_repository;
pub mod predicate;

pub use car_repository::{CarRepository, CarStore};
pub use category_repository::{CategoryRepository, CategoryStore};
pub use manufacturer_repository::{ManufacturerRepository, ManufacturerStore};
pub use predicate::{Predicate, PredicateBuilder};

// Export mocks for tests (both unit and integration)
#[cfg(any(test, feature = "test-utils"))]
pub use car_repository::MockCarRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use category_repository::MockCategoryRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use manufacturer_repository::MockManufacturerRepository;
