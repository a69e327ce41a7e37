//! Application state - Dependency injection container.
//!
//! Provides centralized access to all application services and infrastructure.

use std::sync::Arc;

use crate::config::Config;
use crate::errors::AppResult;
use crate::infra::Database;
use crate::services::{
    CarService, CategoryService, ManufacturerService, ServiceContainer, Services, TokenVerifier,
};

/// Application state containing all services (DI container).
#[derive(Clone)]
pub struct AppState {
    /// Car service
    pub car_service: Arc<dyn CarService>,
    /// Manufacturer service
    pub manufacturer_service: Arc<dyn ManufacturerService>,
    /// Category service
    pub category_service: Arc<dyn CategoryService>,
    /// Bearer token verifier
    pub token_verifier: Arc<dyn TokenVerifier>,
    /// Database connection
    pub database: Arc<Database>,
}

impl AppState {
    /// Create application state from a connected database and config.
    pub fn from_config(database: Arc<Database>, config: &Config) -> AppResult<Self> {
        let container = Services::from_connection(database.get_connection(), config)?;
        Ok(Self::from_container(&container, database))
    }

    /// Create application state from any service container.
    pub fn from_container(container: &dyn ServiceContainer, database: Arc<Database>) -> Self {
        Self {
            car_service: container.cars(),
            manufacturer_service: container.manufacturers(),
            category_service: container.categories(),
            token_verifier: container.tokens(),
            database,
        }
    }
}
