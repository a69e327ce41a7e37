//! Infrastructure layer - External systems integration
//!
//! This module handles all external system concerns:
//! - Database connections and migrations
//! - Repositories and the car search predicate builder
//! - Structured storage failures
//! - Unit of Work for transaction management

pub mod db;
pub mod repositories;
pub mod storage_error;
pub mod unit_of_work;

pub use db::{Database, Migrator};
pub use repositories::{
    CarRepository, CarStore, CategoryRepository, CategoryStore, ManufacturerRepository,
    ManufacturerStore, Predicate, PredicateBuilder,
};
pub use storage_error::{ConstraintViolation, NativeViolation, StorageError, StorageResult};
pub use unit_of_work::{DbTransaction, Persistence, Transaction, UnitOfWork};

#[cfg(any(test, feature = "test-utils"))]
pub use repositories::{MockCarRepository, MockCategoryRepository, MockManufacturerRepository};
