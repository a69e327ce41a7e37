//! Service Container - Centralized service access.
//!
//! Depends on service traits, not implementations, so the HTTP layer can
//! be wired with any combination of real and substitute services.

use std::sync::Arc;

use super::{
    CarManager, CarService, CategoryManager, CategoryService, JwtVerifier, ManufacturerManager,
    ManufacturerService, TokenVerifier,
};
use crate::config::Config;
use crate::errors::AppResult;
use crate::infra::Persistence;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Service container trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait ServiceContainer: Send + Sync {
    /// Get car service
    fn cars(&self) -> Arc<dyn CarService>;

    /// Get manufacturer service
    fn manufacturers(&self) -> Arc<dyn ManufacturerService>;

    /// Get category service
    fn categories(&self) -> Arc<dyn CategoryService>;

    /// Get bearer token verifier
    fn tokens(&self) -> Arc<dyn TokenVerifier>;
}

/// Concrete implementation of ServiceContainer
pub struct Services {
    car_service: Arc<dyn CarService>,
    manufacturer_service: Arc<dyn ManufacturerService>,
    category_service: Arc<dyn CategoryService>,
    token_verifier: Arc<dyn TokenVerifier>,
}

impl Services {
    /// Create a new service container with all services initialized
    pub fn new(
        car_service: Arc<dyn CarService>,
        manufacturer_service: Arc<dyn ManufacturerService>,
        category_service: Arc<dyn CategoryService>,
        token_verifier: Arc<dyn TokenVerifier>,
    ) -> Self {
        Self {
            car_service,
            manufacturer_service,
            category_service,
            token_verifier,
        }
    }

    /// Create service container from database connection and config
    pub fn from_connection(db: sea_orm::DatabaseConnection, config: &Config) -> AppResult<Self> {
        let uow = Arc::new(Persistence::new(db));

        Ok(Self::new(
            Arc::new(CarManager::new(uow.clone())),
            Arc::new(ManufacturerManager::new(uow.clone())),
            Arc::new(CategoryManager::new(uow)),
            Arc::new(JwtVerifier::from_config(config)?),
        ))
    }
}

impl ServiceContainer for Services {
    fn cars(&self) -> Arc<dyn CarService> {
        self.car_service.clone()
    }

    fn manufacturers(&self) -> Arc<dyn ManufacturerService> {
        self.manufacturer_service.clone()
    }

    fn categories(&self) -> Arc<dyn CategoryService> {
        self.category_service.clone()
    }

    fn tokens(&self) -> Arc<dyn TokenVerifier> {
        self.token_verifier.clone()
    }
}
