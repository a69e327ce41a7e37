//! Category service - Category lifecycle.
//!
//! Same rules as manufacturers. Deleting a category still linked to a car
//! is rejected by storage and reported as a dependency conflict.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::{Category, IdentifierPolicy, ResourceKind};
use crate::errors::{AppResult, OptionExt};
use crate::infra::UnitOfWork;
use crate::types::{Paginated, PaginationParams};

/// Category service trait for dependency injection.
#[async_trait]
pub trait CategoryService: Send + Sync {
    /// Page of categories whose name contains the fragment, or all of them
    async fn list_categories(
        &self,
        name_fragment: Option<String>,
        page: PaginationParams,
    ) -> AppResult<Paginated<Category>>;

    /// Get category by ID
    async fn get_category(&self, id: &str) -> AppResult<Category>;

    /// Create a category; an identifier is generated unless one is given
    async fn create_category(&self, id: Option<String>, name: String) -> AppResult<Category>;

    /// Rename the category addressed by ID
    async fn modify_category(&self, id: String, name: String) -> AppResult<Category>;

    /// Delete category by ID; succeeds whether or not it exists
    async fn delete_category(&self, id: &str) -> AppResult<()>;
}

/// Concrete implementation of CategoryService using Unit of Work.
pub struct CategoryManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> CategoryManager<U> {
    /// Create new category service instance with Unit of Work
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> CategoryService for CategoryManager<U> {
    async fn list_categories(
        &self,
        name_fragment: Option<String>,
        page: PaginationParams,
    ) -> AppResult<Paginated<Category>> {
        let (items, total) = self.uow.categories().list(name_fragment, page).await?;
        Ok(Paginated::from_parts(items, total, &page))
    }

    async fn get_category(&self, id: &str) -> AppResult<Category> {
        self.uow
            .categories()
            .find_by_id(id)
            .await?
            .ok_or_not_found(ResourceKind::Category, format!("id = {}", id))
    }

    async fn create_category(&self, id: Option<String>, name: String) -> AppResult<Category> {
        let category = Category::new(IdentifierPolicy::assign(id), name);
        let category = self.uow.categories().insert(category).await?;

        tracing::info!(category_id = %category.id, "Category created");
        Ok(category)
    }

    async fn modify_category(&self, id: String, name: String) -> AppResult<Category> {
        let category = self
            .uow
            .categories()
            .update(Category::new(id, name))
            .await?;

        tracing::info!(category_id = %category.id, "Category modified");
        Ok(category)
    }

    async fn delete_category(&self, id: &str) -> AppResult<()> {
        self.uow.categories().delete_by_id(id).await?;

        tracing::info!(category_id = %id, "Category deleted");
        Ok(())
    }
}
