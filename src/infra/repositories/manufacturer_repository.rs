//! Manufacturer repository.

use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::ConnectionTrait;

use super::base;
use super::entities::manufacturer::Entity as ManufacturerEntity;
use crate::domain::Manufacturer;
use crate::infra::StorageResult;
use crate::types::PaginationParams;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Manufacturer repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ManufacturerRepository: Send + Sync {
    /// Page of manufacturers, filtered by name substring when given
    async fn list(
        &self,
        name_fragment: Option<String>,
        page: PaginationParams,
    ) -> StorageResult<(Vec<Manufacturer>, u64)>;

    /// Find manufacturer by ID
    async fn find_by_id(&self, id: &str) -> StorageResult<Option<Manufacturer>>;

    /// Find manufacturer by its exact, unique name
    async fn find_by_name(&self, name: &str) -> StorageResult<Option<Manufacturer>>;

    /// Insert a new manufacturer
    async fn insert(&self, manufacturer: Manufacturer) -> StorageResult<Manufacturer>;

    /// Update the manufacturer addressed by its ID
    async fn update(&self, manufacturer: Manufacturer) -> StorageResult<Manufacturer>;

    /// Delete manufacturer by ID
    async fn delete_by_id(&self, id: &str) -> StorageResult<()>;
}

/// SeaORM implementation, usable over a pooled connection or a transaction.
pub struct ManufacturerStore<C> {
    conn: Arc<C>,
}

impl<C> ManufacturerStore<C> {
    /// Create new repository instance
    pub fn new(conn: Arc<C>) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl<C> ManufacturerRepository for ManufacturerStore<C>
where
    C: ConnectionTrait + Send + Sync + 'static,
{
    async fn list(
        &self,
        name_fragment: Option<String>,
        page: PaginationParams,
    ) -> StorageResult<(Vec<Manufacturer>, u64)> {
        base::list::<ManufacturerEntity, _>(self.conn.as_ref(), name_fragment, page).await
    }

    async fn find_by_id(&self, id: &str) -> StorageResult<Option<Manufacturer>> {
        base::find_by_id::<ManufacturerEntity, _>(self.conn.as_ref(), id).await
    }

    async fn find_by_name(&self, name: &str) -> StorageResult<Option<Manufacturer>> {
        base::find_by_name::<ManufacturerEntity, _>(self.conn.as_ref(), name).await
    }

    async fn insert(&self, manufacturer: Manufacturer) -> StorageResult<Manufacturer> {
        base::insert::<ManufacturerEntity, _>(
            self.conn.as_ref(),
            manufacturer.id.clone(),
            manufacturer.name.clone(),
        )
        .await?;
        Ok(manufacturer)
    }

    async fn update(&self, manufacturer: Manufacturer) -> StorageResult<Manufacturer> {
        base::update::<ManufacturerEntity, _>(
            self.conn.as_ref(),
            &manufacturer.id,
            manufacturer.name.clone(),
        )
        .await?;
        Ok(manufacturer)
    }

    async fn delete_by_id(&self, id: &str) -> StorageResult<()> {
        base::delete_by_id::<ManufacturerEntity, _>(self.conn.as_ref(), id).await
    }
}
