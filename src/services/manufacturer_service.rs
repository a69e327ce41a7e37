//! Manufacturer service - Manufacturer lifecycle.
//!
//! Name uniqueness is left to storage: a taken name is reported by the
//! failure classifier as a duplicate, not pre-checked here.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::{IdentifierPolicy, Manufacturer, ResourceKind};
use crate::errors::{AppResult, OptionExt};
use crate::infra::UnitOfWork;
use crate::types::{Paginated, PaginationParams};

/// Manufacturer service trait for dependency injection.
#[async_trait]
pub trait ManufacturerService: Send + Sync {
    /// Page of manufacturers whose name contains the fragment, or all of them
    async fn list_manufacturers(
        &self,
        name_fragment: Option<String>,
        page: PaginationParams,
    ) -> AppResult<Paginated<Manufacturer>>;

    /// Get manufacturer by ID
    async fn get_manufacturer(&self, id: &str) -> AppResult<Manufacturer>;

    /// Create a manufacturer; an identifier is generated unless one is given
    async fn create_manufacturer(&self, id: Option<String>, name: String) -> AppResult<Manufacturer>;

    /// Rename the manufacturer addressed by ID
    async fn modify_manufacturer(&self, id: String, name: String) -> AppResult<Manufacturer>;

    /// Delete manufacturer by ID; succeeds whether or not it exists
    async fn delete_manufacturer(&self, id: &str) -> AppResult<()>;
}

/// Concrete implementation of ManufacturerService using Unit of Work.
pub struct ManufacturerManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> ManufacturerManager<U> {
    /// Create new manufacturer service instance with Unit of Work
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> ManufacturerService for ManufacturerManager<U> {
    async fn list_manufacturers(
        &self,
        name_fragment: Option<String>,
        page: PaginationParams,
    ) -> AppResult<Paginated<Manufacturer>> {
        let (items, total) = self.uow.manufacturers().list(name_fragment, page).await?;
        Ok(Paginated::from_parts(items, total, &page))
    }

    async fn get_manufacturer(&self, id: &str) -> AppResult<Manufacturer> {
        self.uow
            .manufacturers()
            .find_by_id(id)
            .await?
            .ok_or_not_found(ResourceKind::Manufacturer, format!("id = {}", id))
    }

    async fn create_manufacturer(&self, id: Option<String>, name: String) -> AppResult<Manufacturer> {
        let manufacturer = Manufacturer::new(IdentifierPolicy::assign(id), name);
        let manufacturer = self.uow.manufacturers().insert(manufacturer).await?;

        tracing::info!(manufacturer_id = %manufacturer.id, "Manufacturer created");
        Ok(manufacturer)
    }

    async fn modify_manufacturer(&self, id: String, name: String) -> AppResult<Manufacturer> {
        let manufacturer = self
            .uow
            .manufacturers()
            .update(Manufacturer::new(id, name))
            .await?;

        tracing::info!(manufacturer_id = %manufacturer.id, "Manufacturer modified");
        Ok(manufacturer)
    }

    async fn delete_manufacturer(&self, id: &str) -> AppResult<()> {
        self.uow.manufacturers().delete_by_id(id).await?;

        tracing::info!(manufacturer_id = %id, "Manufacturer deleted");
        Ok(())
    }
}
