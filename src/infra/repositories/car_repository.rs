//! Car repository.
//!
//! A car is stored as one `cars` row plus its `cars_categories` links.
//! Reads assemble the aggregate from the row, its manufacturer and the
//! linked categories; writes replace the links wholesale.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, ConnectionTrait, DbErr, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Set,
};

use super::entities::{car, car_category, category, manufacturer};
use super::predicate::Predicate;
use crate::domain::{Car, Category, Manufacturer};
use crate::infra::StorageResult;
use crate::types::PaginationParams;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Car repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait CarRepository: Send + Sync {
    /// Page of cars matching the predicate, ordered by ID, with the total count
    async fn search(
        &self,
        predicate: Predicate,
        page: PaginationParams,
    ) -> StorageResult<(Vec<Car>, u64)>;

    /// Find car by ID
    async fn find_by_id(&self, id: &str) -> StorageResult<Option<Car>>;

    /// Insert a new car together with its category links
    async fn insert(&self, car: Car) -> StorageResult<Car>;

    /// Update the car addressed by its ID, replacing its category links.
    ///
    /// Fails with a stale-object error when no row has that ID.
    async fn update(&self, car: Car) -> StorageResult<Car>;

    /// Delete car by ID; a missing row is not an error
    async fn delete_by_id(&self, id: &str) -> StorageResult<()>;
}

/// SeaORM implementation, usable over a pooled connection or a transaction.
pub struct CarStore<C> {
    conn: Arc<C>,
}

impl<C> CarStore<C> {
    /// Create new repository instance
    pub fn new(conn: Arc<C>) -> Self {
        Self { conn }
    }
}

type CarRow = (car::Model, Option<manufacturer::Model>);

#[async_trait]
impl<C> CarRepository for CarStore<C>
where
    C: ConnectionTrait + Send + Sync + 'static,
{
    async fn search(
        &self,
        predicate: Predicate,
        page: PaginationParams,
    ) -> StorageResult<(Vec<Car>, u64)> {
        let conn = self.conn.as_ref();

        let paginator = car::Entity::find()
            .filter(predicate.into_condition())
            .find_also_related(manufacturer::Entity)
            .order_by_asc(car::Column::Id)
            .paginate(conn, page.limit());
        let total = paginator.num_items().await?;
        let rows = paginator.fetch_page(page.page_index()).await?;

        Ok((assemble(conn, rows).await?, total))
    }

    async fn find_by_id(&self, id: &str) -> StorageResult<Option<Car>> {
        let conn = self.conn.as_ref();

        let Some(row) = car::Entity::find_by_id(id.to_owned())
            .find_also_related(manufacturer::Entity)
            .one(conn)
            .await?
        else {
            return Ok(None);
        };

        Ok(assemble(conn, vec![row]).await?.pop())
    }

    async fn insert(&self, car: Car) -> StorageResult<Car> {
        let conn = self.conn.as_ref();

        car::Entity::insert(car::ActiveModel {
            id: Set(car.id.clone()),
            manufacturer_id: Set(car.manufacturer.id.clone()),
            production_year: Set(car.production_year),
            model: Set(car.model.clone()),
        })
        .exec_without_returning(conn)
        .await?;

        replace_categories(conn, &car.id, &car.categories).await?;
        Ok(car)
    }

    async fn update(&self, car: Car) -> StorageResult<Car> {
        let conn = self.conn.as_ref();

        let result = car::Entity::update_many()
            .col_expr(car::Column::ManufacturerId, Expr::value(car.manufacturer.id.clone()))
            .col_expr(car::Column::ProductionYear, Expr::value(car.production_year))
            .col_expr(car::Column::Model, Expr::value(car.model.clone()))
            .filter(car::Column::Id.eq(car.id.as_str()))
            .exec(conn)
            .await?;

        if result.rows_affected == 0 {
            return Err(DbErr::RecordNotUpdated.into());
        }

        replace_categories(conn, &car.id, &car.categories).await?;
        Ok(car)
    }

    async fn delete_by_id(&self, id: &str) -> StorageResult<()> {
        let conn = self.conn.as_ref();

        car_category::Entity::delete_many()
            .filter(car_category::Column::CarId.eq(id))
            .exec(conn)
            .await?;
        car::Entity::delete_by_id(id.to_owned()).exec(conn).await?;
        Ok(())
    }
}

/// Drop every existing link of the car and link the given categories.
async fn replace_categories<C: ConnectionTrait>(
    conn: &C,
    car_id: &str,
    categories: &[Category],
) -> Result<(), DbErr> {
    car_category::Entity::delete_many()
        .filter(car_category::Column::CarId.eq(car_id))
        .exec(conn)
        .await?;

    if categories.is_empty() {
        return Ok(());
    }

    let links = categories.iter().map(|category| car_category::ActiveModel {
        car_id: Set(car_id.to_owned()),
        category_id: Set(category.id.clone()),
    });
    car_category::Entity::insert_many(links)
        .exec_without_returning(conn)
        .await?;
    Ok(())
}

/// Categories of each given car, ordered by name.
async fn categories_by_car<C: ConnectionTrait>(
    conn: &C,
    car_ids: Vec<String>,
) -> Result<HashMap<String, Vec<Category>>, DbErr> {
    if car_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let links = car_category::Entity::find()
        .filter(car_category::Column::CarId.is_in(car_ids))
        .find_also_related(category::Entity)
        .order_by_asc(category::Column::Name)
        .all(conn)
        .await?;

    let mut by_car: HashMap<String, Vec<Category>> = HashMap::new();
    for (link, category) in links {
        if let Some(category) = category {
            by_car.entry(link.car_id).or_default().push(category.into());
        }
    }
    Ok(by_car)
}

/// Build aggregates from car rows, keeping the row order.
async fn assemble<C: ConnectionTrait>(conn: &C, rows: Vec<CarRow>) -> StorageResult<Vec<Car>> {
    let ids = rows.iter().map(|(car, _)| car.id.clone()).collect();
    let mut categories = categories_by_car(conn, ids).await?;

    rows.into_iter()
        .map(|(car, manufacturer)| -> StorageResult<Car> {
            let manufacturer = manufacturer.ok_or_else(|| {
                DbErr::RecordNotFound(format!("manufacturer of car {}", car.id))
            })?;
            Ok(Car {
                categories: categories.remove(&car.id).unwrap_or_default(),
                manufacturer: Manufacturer::from(manufacturer),
                id: car.id,
                production_year: car.production_year,
                model: car.model,
            })
        })
        .collect()
}
