//! Migration: Index the car columns used by search filters.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Year range filter
        manager
            .create_index(
                Index::create()
                    .name("idx_cars_production_year")
                    .table(Cars::Table)
                    .col(Cars::ProductionYear)
                    .to_owned(),
            )
            .await?;

        // Exact model filter
        manager
            .create_index(
                Index::create()
                    .name("idx_cars_model")
                    .table(Cars::Table)
                    .col(Cars::Model)
                    .to_owned(),
            )
            .await?;

        // Category filter sub-select goes from category to car
        manager
            .create_index(
                Index::create()
                    .name("idx_cars_categories_category_id")
                    .table(CarsCategories::Table)
                    .col(CarsCategories::CategoryId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_cars_categories_category_id")
                    .table(CarsCategories::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_cars_model")
                    .table(Cars::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_cars_production_year")
                    .table(Cars::Table)
                    .to_owned(),
            )
            .await
    }
}

#[derive(Iden)]
enum Cars {
    Table,
    ProductionYear,
    Model,
}

#[derive(Iden)]
enum CarsCategories {
    Table,
    CategoryId,
}
