//! Category repository.

use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::ConnectionTrait;

use super::base;
use super::entities::category::Entity as CategoryEntity;
use crate::domain::Category;
use crate::infra::StorageResult;
use crate::types::PaginationParams;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Category repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Page of categories, filtered by name substring when given
    async fn list(
        &self,
        name_fragment: Option<String>,
        page: PaginationParams,
    ) -> StorageResult<(Vec<Category>, u64)>;

    /// Find category by ID
    async fn find_by_id(&self, id: &str) -> StorageResult<Option<Category>>;

    /// Find category by its exact, unique name
    async fn find_by_name(&self, name: &str) -> StorageResult<Option<Category>>;

    /// Insert a new category
    async fn insert(&self, category: Category) -> StorageResult<Category>;

    /// Update the category addressed by its ID
    async fn update(&self, category: Category) -> StorageResult<Category>;

    /// Delete category by ID
    async fn delete_by_id(&self, id: &str) -> StorageResult<()>;
}

/// SeaORM implementation, usable over a pooled connection or a transaction.
pub struct CategoryStore<C> {
    conn: Arc<C>,
}

impl<C> CategoryStore<C> {
    /// Create new repository instance
    pub fn new(conn: Arc<C>) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl<C> CategoryRepository for CategoryStore<C>
where
    C: ConnectionTrait + Send + Sync + 'static,
{
    async fn list(
        &self,
        name_fragment: Option<String>,
        page: PaginationParams,
    ) -> StorageResult<(Vec<Category>, u64)> {
        base::list::<CategoryEntity, _>(self.conn.as_ref(), name_fragment, page).await
    }

    async fn find_by_id(&self, id: &str) -> StorageResult<Option<Category>> {
        base::find_by_id::<CategoryEntity, _>(self.conn.as_ref(), id).await
    }

    async fn find_by_name(&self, name: &str) -> StorageResult<Option<Category>> {
        base::find_by_name::<CategoryEntity, _>(self.conn.as_ref(), name).await
    }

    async fn insert(&self, category: Category) -> StorageResult<Category> {
        base::insert::<CategoryEntity, _>(
            self.conn.as_ref(),
            category.id.clone(),
            category.name.clone(),
        )
        .await?;
        Ok(category)
    }

    async fn update(&self, category: Category) -> StorageResult<Category> {
        base::update::<CategoryEntity, _>(
            self.conn.as_ref(),
            &category.id,
            category.name.clone(),
        )
        .await?;
        Ok(category)
    }

    async fn delete_by_id(&self, id: &str) -> StorageResult<()> {
        base::delete_by_id::<CategoryEntity, _>(self.conn.as_ref(), id).await
    }
}
