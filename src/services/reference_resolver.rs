//! Name-based lookup of the entities a car refers to.

use crate::domain::{Category, Manufacturer, ResourceKind};
use crate::errors::{AppResult, OptionExt};
use crate::infra::{CategoryRepository, ManufacturerRepository, Transaction};

/// Resolves manufacturer and category names to stored entities.
///
/// A name that matches no row fails with `NotFound(kind, name)`.
pub struct ReferenceResolver<'a> {
    manufacturers: &'a dyn ManufacturerRepository,
    categories: &'a dyn CategoryRepository,
}

impl<'a> ReferenceResolver<'a> {
    pub fn new(
        manufacturers: &'a dyn ManufacturerRepository,
        categories: &'a dyn CategoryRepository,
    ) -> Self {
        Self {
            manufacturers,
            categories,
        }
    }

    /// Resolver reading through the given transaction.
    pub fn within(txn: &'a dyn Transaction) -> Self {
        Self::new(txn.manufacturers(), txn.categories())
    }

    pub async fn resolve_manufacturer(&self, name: &str) -> AppResult<Manufacturer> {
        self.manufacturers
            .find_by_name(name)
            .await?
            .ok_or_not_found(ResourceKind::Manufacturer, format!("name = {}", name))
    }

    pub async fn resolve_category(&self, name: &str) -> AppResult<Category> {
        self.categories
            .find_by_name(name)
            .await?
            .ok_or_not_found(ResourceKind::Category, format!("name = {}", name))
    }

    /// Resolve every name, stopping at the first one that is missing.
    ///
    /// Repeated names resolve once; the result keeps first-seen order.
    pub async fn resolve_categories(&self, names: &[String]) -> AppResult<Vec<Category>> {
        let mut resolved: Vec<Category> = Vec::with_capacity(names.len());
        for name in names {
            if resolved.iter().any(|c| &c.name == name) {
                continue;
            }
            resolved.push(self.resolve_category(name).await?);
        }
        Ok(resolved)
    }
}
