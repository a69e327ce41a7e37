//! Integration tests for the catalog services over SQLite.
//!
//! Each test gets its own in-memory database with the migrations applied,
//! so the real repositories, transactions and constraint handling run.

use axum::http::StatusCode;
use sea_orm::{ConnectOptions, Database as SeaDatabase};

use car_catalog::config::{Config, TokenKey};
use car_catalog::domain::{CarDraft, SearchParameters};
use car_catalog::errors::{AppError, Outcome};
use car_catalog::infra::Database;
use car_catalog::services::{ServiceContainer, Services};
use car_catalog::types::PaginationParams;

const SECRET: &str = "integration-test-secret-at-least-32-chars";

async fn catalog() -> Services {
    // One connection: every pooled connection to `:memory:` is a fresh database
    let mut options = ConnectOptions::new("sqlite::memory:");
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);

    let connection = SeaDatabase::connect(options).await.unwrap();
    let database = Database::from_connection(connection);
    database.run_migrations().await.unwrap();

    let config = Config::new("sqlite::memory:", TokenKey::Secret(SECRET.into())).unwrap();
    Services::from_connection(database.get_connection(), &config).unwrap()
}

async fn seed_references(services: &Services) {
    for name in ["Alpha Motors", "Beta Cars"] {
        services
            .manufacturers()
            .create_manufacturer(None, name.into())
            .await
            .unwrap();
    }
    for name in ["Compact", "SUV", "Luxury"] {
        services
            .categories()
            .create_category(None, name.into())
            .await
            .unwrap();
    }
}

async fn add_car(services: &Services, manufacturer: &str, year: i32, model: &str, categories: &[&str]) -> String {
    services
        .cars()
        .create_car(
            CarDraft::new(year, model),
            manufacturer.into(),
            categories.iter().map(|c| c.to_string()).collect(),
        )
        .await
        .unwrap()
        .id
}

fn first_page() -> PaginationParams {
    PaginationParams::new(1, 50)
}

#[tokio::test]
async fn test_year_range_is_inclusive() {
    let services = catalog().await;
    seed_references(&services).await;
    for year in 2019..=2023 {
        add_car(&services, "Alpha Motors", year, "Roadster", &["Compact"]).await;
    }

    let params = SearchParameters::default().with_years(Some("2020"), Some("2022"));
    let page = services.cars().search_cars(params, first_page()).await.unwrap();

    assert_eq!(page.meta.total, 3);
    let mut years: Vec<i32> = page.data.iter().map(|c| c.production_year).collect();
    years.sort_unstable();
    assert_eq!(years, vec![2020, 2021, 2022]);
}

#[tokio::test]
async fn test_category_filter_matches_any_without_duplicates() {
    let services = catalog().await;
    seed_references(&services).await;
    let both = add_car(&services, "Alpha Motors", 2021, "Roadster", &["Compact", "Luxury"]).await;
    let suv = add_car(&services, "Beta Cars", 2022, "Trail", &["SUV"]).await;
    add_car(&services, "Beta Cars", 2020, "City", &["Compact"]).await;

    let params = SearchParameters::default().with_categories(["Luxury", "SUV"]);
    let page = services.cars().search_cars(params, first_page()).await.unwrap();

    let mut ids: Vec<String> = page.data.iter().map(|c| c.id.clone()).collect();
    ids.sort();
    let mut expected = vec![both, suv];
    expected.sort();

    assert_eq!(page.meta.total, 2);
    assert_eq!(ids, expected);
}

#[tokio::test]
async fn test_filters_combine_and_pages_count_all_matches() {
    let services = catalog().await;
    seed_references(&services).await;
    for year in 2010..2015 {
        add_car(&services, "Alpha Motors", year, "Roadster", &["Compact"]).await;
    }
    add_car(&services, "Beta Cars", 2012, "Roadster", &["Compact"]).await;

    let params = SearchParameters::default()
        .with_manufacturer("Alpha Motors")
        .with_model("Roadster");
    let page = services
        .cars()
        .search_cars(params, PaginationParams::new(2, 2))
        .await
        .unwrap();

    assert_eq!(page.meta.total, 5);
    assert_eq!(page.meta.total_pages, 3);
    assert_eq!(page.data.len(), 2);
    assert!(page.data.iter().all(|c| c.manufacturer.name == "Alpha Motors"));
}

#[tokio::test]
async fn test_page_beyond_any_offset_is_empty() {
    let services = catalog().await;
    seed_references(&services).await;
    add_car(&services, "Alpha Motors", 2020, "Roadster", &["Compact"]).await;

    let page = services
        .cars()
        .search_cars(SearchParameters::default(), PaginationParams::new(u64::MAX, 100))
        .await
        .unwrap();

    assert_eq!(page.meta.total, 1);
    assert!(page.data.is_empty());

    let page = services
        .manufacturers()
        .list_manufacturers(None, PaginationParams::new(u64::MAX, u64::MAX))
        .await
        .unwrap();
    assert_eq!(page.meta.total, 2);
    assert!(page.data.is_empty());
}

#[tokio::test]
async fn test_created_car_reads_back_with_references() {
    let services = catalog().await;
    seed_references(&services).await;
    let id = add_car(&services, "Beta Cars", 2018, "Wagon", &["SUV", "Compact"]).await;

    let car = services.cars().get_car(&id).await.unwrap();

    assert_eq!(car.manufacturer.name, "Beta Cars");
    assert_eq!(car.model, "Wagon");
    assert_eq!(car.category_names(), vec!["Compact", "SUV"]);
}

#[tokio::test]
async fn test_modify_replaces_categories() {
    let services = catalog().await;
    seed_references(&services).await;
    let id = add_car(&services, "Alpha Motors", 2020, "Roadster", &["Compact", "SUV"]).await;

    services
        .cars()
        .modify_car(
            CarDraft::new(2021, "Roadster S").with_id(id.clone()),
            "Beta Cars".into(),
            vec!["Luxury".into()],
        )
        .await
        .unwrap();

    let car = services.cars().get_car(&id).await.unwrap();
    assert_eq!(car.production_year, 2021);
    assert_eq!(car.manufacturer.name, "Beta Cars");
    assert_eq!(car.category_names(), vec!["Luxury"]);
}

#[tokio::test]
async fn test_unknown_category_writes_nothing() {
    let services = catalog().await;
    seed_references(&services).await;

    let err = services
        .cars()
        .create_car(
            CarDraft::new(2020, "Ghost"),
            "Alpha Motors".into(),
            vec!["Compact".into(), "Hovercraft".into()],
        )
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::NotFound { .. }));
    let page = services
        .cars()
        .search_cars(SearchParameters::default(), first_page())
        .await
        .unwrap();
    assert_eq!(page.meta.total, 0);
}

#[tokio::test]
async fn test_stale_modify_is_not_found() {
    let services = catalog().await;
    seed_references(&services).await;

    let err = services
        .cars()
        .modify_car(
            CarDraft::new(2020, "Roadster").with_id("no-such-car"),
            "Alpha Motors".into(),
            vec!["Compact".into()],
        )
        .await
        .unwrap_err();

    assert_eq!(err.outcome(), Some(Outcome::StaleWrite));
    assert_eq!(err.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_of_missing_car_succeeds() {
    let services = catalog().await;

    services.cars().delete_car("never-existed").await.unwrap();
}

#[tokio::test]
async fn test_deleted_car_is_gone() {
    let services = catalog().await;
    seed_references(&services).await;
    let id = add_car(&services, "Alpha Motors", 2020, "Roadster", &["Compact"]).await;

    services.cars().delete_car(&id).await.unwrap();

    let err = services.cars().get_car(&id).await.unwrap_err();
    assert_eq!(err.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_duplicate_manufacturer_name_conflicts() {
    let services = catalog().await;
    seed_references(&services).await;

    let err = services
        .manufacturers()
        .create_manufacturer(None, "Alpha Motors".into())
        .await
        .unwrap_err();

    assert_eq!(err.outcome(), Some(Outcome::DuplicateResource));
    assert_eq!(err.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_referenced_manufacturer_cannot_be_deleted() {
    let services = catalog().await;
    seed_references(&services).await;
    let id = add_car(&services, "Alpha Motors", 2020, "Roadster", &["Compact"]).await;
    let manufacturer_id = services.cars().get_car(&id).await.unwrap().manufacturer.id;

    let err = services
        .manufacturers()
        .delete_manufacturer(&manufacturer_id)
        .await
        .unwrap_err();

    assert_eq!(err.outcome(), Some(Outcome::DependencyConflict));
    assert_eq!(err.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_referenced_category_cannot_be_deleted() {
    let services = catalog().await;
    seed_references(&services).await;
    let id = add_car(&services, "Alpha Motors", 2020, "Roadster", &["Luxury"]).await;
    let category_id = services.cars().get_car(&id).await.unwrap().categories[0].id.clone();

    let err = services
        .categories()
        .delete_category(&category_id)
        .await
        .unwrap_err();

    assert_eq!(err.outcome(), Some(Outcome::DependencyConflict));
}

#[tokio::test]
async fn test_manufacturer_listing_filters_by_fragment() {
    let services = catalog().await;
    seed_references(&services).await;

    let page = services
        .manufacturers()
        .list_manufacturers(Some("Motors".into()), first_page())
        .await
        .unwrap();

    assert_eq!(page.meta.total, 1);
    assert_eq!(page.data[0].name, "Alpha Motors");
}

#[tokio::test]
async fn test_category_rename_and_missing_rename() {
    let services = catalog().await;
    let category = services
        .categories()
        .create_category(Some("cat-1".into()), "Compact".into())
        .await
        .unwrap();
    assert_eq!(category.id, "cat-1");

    let renamed = services
        .categories()
        .modify_category("cat-1".into(), "Subcompact".into())
        .await
        .unwrap();
    assert_eq!(renamed.name, "Subcompact");

    let err = services
        .categories()
        .modify_category("cat-2".into(), "Anything".into())
        .await
        .unwrap_err();
    assert_eq!(err.outcome(), Some(Outcome::StaleWrite));
}
