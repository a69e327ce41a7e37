//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain logic and infrastructure to fulfill
//! application use cases. They depend on abstractions (traits) for
//! dependency inversion.
//!
//! All services use Unit of Work pattern for centralized repository
//! access and transaction management.

mod car_service;
mod category_service;
pub mod container;
mod manufacturer_service;
mod reference_resolver;
mod token_service;

// Service Container
pub use container::{ServiceContainer, Services};

// Service traits and implementations
pub use car_service::{CarManager, CarService};
pub use category_service::{CategoryManager, CategoryService};
pub use manufacturer_service::{ManufacturerManager, ManufacturerService};
pub use reference_resolver::ReferenceResolver;
pub use token_service::{Claims, ClientAccess, JwtVerifier, Role, TokenVerifier};

#[cfg(any(test, feature = "test-utils"))]
pub use container::MockServiceContainer;
