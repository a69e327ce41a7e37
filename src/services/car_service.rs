//! Car service - Car lifecycle orchestration.
//!
//! Every write resolves the manufacturer and categories by name inside a
//! transaction, assigns the identifier, then writes the aggregate. The
//! category set is replaced wholesale on each write. If any reference is
//! missing nothing is written.

use std::sync::Arc;

use async_trait::async_trait;

use super::ReferenceResolver;
use crate::domain::{Car, CarDraft, IdentifierPolicy, ResourceKind, SearchParameters};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::{PredicateBuilder, Transaction, UnitOfWork};
use crate::types::{Paginated, PaginationParams};

/// Car service trait for dependency injection.
#[async_trait]
pub trait CarService: Send + Sync {
    /// Page of cars matching the search filters
    async fn search_cars(
        &self,
        params: SearchParameters,
        page: PaginationParams,
    ) -> AppResult<Paginated<Car>>;

    /// Get car by ID
    async fn get_car(&self, id: &str) -> AppResult<Car>;

    /// Create a car; an identifier is generated unless the draft carries one
    async fn create_car(
        &self,
        draft: CarDraft,
        manufacturer_name: String,
        category_names: Vec<String>,
    ) -> AppResult<Car>;

    /// Modify the car addressed by the draft's identifier
    async fn modify_car(
        &self,
        draft: CarDraft,
        manufacturer_name: String,
        category_names: Vec<String>,
    ) -> AppResult<Car>;

    /// Delete car by ID; succeeds whether or not the car exists
    async fn delete_car(&self, id: &str) -> AppResult<()>;
}

/// Concrete implementation of CarService using Unit of Work.
pub struct CarManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> CarManager<U> {
    /// Create new car service instance with Unit of Work
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

/// Resolve the references of a draft and build the aggregate to write.
async fn resolve_aggregate(
    txn: &dyn Transaction,
    draft: CarDraft,
    manufacturer_name: &str,
    category_names: &[String],
) -> AppResult<Car> {
    let resolver = ReferenceResolver::within(txn);
    let manufacturer = resolver.resolve_manufacturer(manufacturer_name).await?;
    let categories = resolver.resolve_categories(category_names).await?;

    Ok(Car {
        id: IdentifierPolicy::assign(draft.id),
        manufacturer,
        production_year: draft.production_year,
        model: draft.model,
        categories,
    })
}

#[async_trait]
impl<U: UnitOfWork> CarService for CarManager<U> {
    async fn search_cars(
        &self,
        params: SearchParameters,
        page: PaginationParams,
    ) -> AppResult<Paginated<Car>> {
        let predicate = PredicateBuilder::build(&params)?;
        let (cars, total) = self.uow.cars().search(predicate, page).await?;

        tracing::debug!(
            unfiltered = params.is_unfiltered(),
            found = cars.len(),
            total,
            "Car search"
        );
        Ok(Paginated::from_parts(cars, total, &page))
    }

    async fn get_car(&self, id: &str) -> AppResult<Car> {
        self.uow
            .cars()
            .find_by_id(id)
            .await?
            .ok_or_not_found(ResourceKind::Car, format!("id = {}", id))
    }

    async fn create_car(
        &self,
        draft: CarDraft,
        manufacturer_name: String,
        category_names: Vec<String>,
    ) -> AppResult<Car> {
        let txn = self.uow.begin().await?;

        let car = resolve_aggregate(txn.as_ref(), draft, &manufacturer_name, &category_names).await?;
        let car = txn.cars().insert(car).await?;
        txn.commit().await?;

        tracing::info!(car_id = %car.id, "Car created");
        Ok(car)
    }

    async fn modify_car(
        &self,
        draft: CarDraft,
        manufacturer_name: String,
        category_names: Vec<String>,
    ) -> AppResult<Car> {
        if draft.id.is_none() {
            return Err(AppError::validation("id", "An existing car id is required"));
        }

        let txn = self.uow.begin().await?;

        let car = resolve_aggregate(txn.as_ref(), draft, &manufacturer_name, &category_names).await?;
        let car = txn.cars().update(car).await?;
        txn.commit().await?;

        tracing::info!(car_id = %car.id, "Car modified");
        Ok(car)
    }

    async fn delete_car(&self, id: &str) -> AppResult<()> {
        let txn = self.uow.begin().await?;
        txn.cars().delete_by_id(id).await?;
        txn.commit().await?;

        tracing::info!(car_id = %id, "Car deleted");
        Ok(())
    }
}
