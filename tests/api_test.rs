//! Integration tests for API endpoints.
//!
//! Requests go through the real router, middleware and services, backed by
//! an in-memory SQLite database. Tokens are signed with a test HS256 secret.

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use chrono::Utc;
use jsonwebtoken::{encode, EncodingKey, Header};
use sea_orm::{ConnectOptions, Database as SeaDatabase};
use serde_json::{json, Value};
use tower::ServiceExt;

use car_catalog::api::create_router;
use car_catalog::config::{Config, TokenKey, DEFAULT_JWT_CLIENT_ID};
use car_catalog::infra::Database;
use car_catalog::services::{Claims, ClientAccess};
use car_catalog::AppState;

// =============================================================================
// Test Harness
// =============================================================================

const SECRET: &str = "api-test-secret-key-with-32-plus-chars";

async fn app() -> Router {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);
    let connection = SeaDatabase::connect(options).await.unwrap();
    let database = Database::from_connection(connection);
    database.run_migrations().await.unwrap();

    let config = Config::new("sqlite::memory:", TokenKey::Secret(SECRET.into())).unwrap();
    let state = AppState::from_config(Arc::new(database), &config).unwrap();
    create_router(state)
}

fn token_for(client_id: &str, roles: &[&str]) -> String {
    let mut resource_access = HashMap::new();
    resource_access.insert(
        client_id.to_string(),
        ClientAccess {
            roles: roles.iter().map(|r| r.to_string()).collect(),
        },
    );
    let claims = Claims {
        sub: "test-subject".into(),
        exp: Utc::now().timestamp() + 3600,
        iss: None,
        preferred_username: Some("tester".into()),
        resource_access,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(SECRET.as_bytes()),
    )
    .unwrap()
}

fn token(roles: &[&str]) -> String {
    token_for(DEFAULT_JWT_CLIENT_ID, roles)
}

fn request(method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, String) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

fn json_body(text: &str) -> Value {
    serde_json::from_str(text).unwrap()
}

/// Create the references every car test needs.
async fn seed(app: &Router, moderator: &str) {
    for name in ["Alpha Motors", "Beta Cars"] {
        let (status, _) = send(
            app,
            request(Method::POST, "/api/v1/manufacturers", Some(moderator), Some(json!({ "name": name }))),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }
    for name in ["Compact", "SUV", "Luxury"] {
        let (status, _) = send(
            app,
            request(Method::POST, "/api/v1/categories", Some(moderator), Some(json!({ "name": name }))),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }
}

async fn create_car(app: &Router, moderator: &str, body: Value) -> String {
    let (status, id) = send(app, request(Method::POST, "/api/v1/cars", Some(moderator), Some(body))).await;
    assert_eq!(status, StatusCode::CREATED, "body: {}", id);
    id
}

// =============================================================================
// Public Endpoints
// =============================================================================

#[tokio::test]
async fn test_root_and_health_are_public() {
    let app = app().await;

    let (status, body) = send(&app, request(Method::GET, "/", None, None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "Car Catalog API");

    let (status, body) = send(&app, request(Method::GET, "/health", None, None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json_body(&body)["database"]["status"], "healthy");
}

// =============================================================================
// Access Control
// =============================================================================

#[tokio::test]
async fn test_missing_or_invalid_token_is_unauthorized() {
    let app = app().await;

    let (status, body) = send(&app, request(Method::GET, "/api/v1/cars", None, None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json_body(&body)["error"]["code"], "UNAUTHORIZED");

    let (status, _) = send(&app, request(Method::GET, "/api/v1/cars", Some("not-a-jwt"), None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_user_may_read_but_not_write() {
    let app = app().await;
    let user = token(&["user"]);

    let (status, _) = send(&app, request(Method::GET, "/api/v1/cars", Some(&user), None)).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(
        &app,
        request(Method::POST, "/api/v1/categories", Some(&user), Some(json!({ "name": "Compact" }))),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(json_body(&body)["error"]["code"], "FORBIDDEN");

    let (status, _) = send(&app, request(Method::DELETE, "/api/v1/cars/any", Some(&user), None)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_roles_are_read_for_the_configured_client_only() {
    let app = app().await;
    let foreign = token_for("some-other-client", &["moderator"]);

    let (status, _) = send(&app, request(Method::GET, "/api/v1/cars", Some(&foreign), None)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_role_names_ignore_case() {
    let app = app().await;
    let moderator = token(&["MODERATOR"]);

    let (status, _) = send(
        &app,
        request(Method::POST, "/api/v1/manufacturers", Some(&moderator), Some(json!({ "name": "Gamma" }))),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
}

// =============================================================================
// Cars
// =============================================================================

#[tokio::test]
async fn test_create_then_get_car() {
    let app = app().await;
    let moderator = token(&["moderator"]);
    seed(&app, &moderator).await;

    let id = create_car(
        &app,
        &moderator,
        json!({
            "manufacturer_name": "Alpha Motors",
            "production_year": 2021,
            "model": "Roadster",
            "category_names": ["Luxury", "Compact"]
        }),
    )
    .await;
    assert!(!id.is_empty());

    let reader = token(&["user"]);
    let (status, body) = send(&app, request(Method::GET, &format!("/api/v1/cars/{}", id), Some(&reader), None)).await;
    assert_eq!(status, StatusCode::OK);

    let car = json_body(&body);
    assert_eq!(car["id"], id.as_str());
    assert_eq!(car["manufacturer_name"], "Alpha Motors");
    assert_eq!(car["production_year"], 2021);
    assert_eq!(car["category_names"], json!(["Compact", "Luxury"]));
}

#[tokio::test]
async fn test_search_accepts_repeated_and_comma_separated_categories() {
    let app = app().await;
    let moderator = token(&["moderator"]);
    seed(&app, &moderator).await;
    for (model, category) in [("City", "Compact"), ("Trail", "SUV"), ("Limo", "Luxury")] {
        create_car(
            &app,
            &moderator,
            json!({
                "manufacturer_name": "Beta Cars",
                "production_year": 2020,
                "model": model,
                "category_names": [category]
            }),
        )
        .await;
    }

    let uri = "/api/v1/cars?category_names=Compact,SUV&category_names=Luxury&per_page=2";
    let (status, body) = send(&app, request(Method::GET, uri, Some(&moderator), None)).await;
    assert_eq!(status, StatusCode::OK);

    let page = json_body(&body);
    assert_eq!(page["meta"]["total"], 3);
    assert_eq!(page["meta"]["per_page"], 2);
    assert_eq!(page["meta"]["total_pages"], 2);
    assert_eq!(page["data"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_page_past_the_end_is_empty() {
    let app = app().await;
    let moderator = token(&["moderator"]);
    seed(&app, &moderator).await;

    for listing in ["cars", "manufacturers", "categories"] {
        let uri = format!("/api/v1/{listing}?page=18446744073709551615&per_page=100");
        let (status, body) = send(&app, request(Method::GET, &uri, Some(&moderator), None)).await;
        assert_eq!(status, StatusCode::OK, "{listing}: {body}");

        let page = json_body(&body);
        assert_eq!(page["meta"]["page"], u64::MAX / 100);
        assert!(page["data"].as_array().unwrap().is_empty());
    }
}

#[tokio::test]
async fn test_malformed_year_is_bad_request() {
    let app = app().await;
    let user = token(&["user"]);

    let (status, body) = send(&app, request(Method::GET, "/api/v1/cars?min_year=twenty", Some(&user), None)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let error = &json_body(&body)["error"];
    assert_eq!(error["code"], "VALIDATION_ERROR");
    assert!(error["details"]["min_year"].is_string());
}

#[tokio::test]
async fn test_invalid_car_body_reports_fields() {
    let app = app().await;
    let moderator = token(&["moderator"]);

    let (status, body) = send(
        &app,
        request(
            Method::POST,
            "/api/v1/cars",
            Some(&moderator),
            Some(json!({
                "manufacturer_name": "Alpha Motors",
                "production_year": 1850,
                "model": "",
                "category_names": []
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let details = &json_body(&body)["error"]["details"];
    assert!(details["production_year"].is_string());
    assert!(details["model"].is_string());
    assert!(details["category_names"].is_string());
}

#[tokio::test]
async fn test_unknown_manufacturer_is_not_found() {
    let app = app().await;
    let moderator = token(&["moderator"]);
    seed(&app, &moderator).await;

    let (status, body) = send(
        &app,
        request(
            Method::POST,
            "/api/v1/cars",
            Some(&moderator),
            Some(json!({
                "manufacturer_name": "Nobody",
                "production_year": 2020,
                "model": "Ghost",
                "category_names": ["Compact"]
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        json_body(&body)["error"]["message"],
        "Manufacturer with name = Nobody doesn't exist"
    );
}

#[tokio::test]
async fn test_put_replaces_car_and_missing_id_is_not_found() {
    let app = app().await;
    let moderator = token(&["moderator"]);
    seed(&app, &moderator).await;
    let id = create_car(
        &app,
        &moderator,
        json!({
            "manufacturer_name": "Alpha Motors",
            "production_year": 2019,
            "model": "Roadster",
            "category_names": ["Compact", "SUV"]
        }),
    )
    .await;

    let (status, body) = send(
        &app,
        request(
            Method::PUT,
            "/api/v1/cars",
            Some(&moderator),
            Some(json!({
                "id": id,
                "manufacturer_name": "Beta Cars",
                "production_year": 2020,
                "model": "Roadster II",
                "category_names": ["Luxury"]
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let car = json_body(&body);
    assert_eq!(car["manufacturer_name"], "Beta Cars");
    assert_eq!(car["category_names"], json!(["Luxury"]));

    let (status, body) = send(
        &app,
        request(
            Method::PUT,
            "/api/v1/cars",
            Some(&moderator),
            Some(json!({
                "id": "missing",
                "manufacturer_name": "Beta Cars",
                "production_year": 2020,
                "model": "Roadster II",
                "category_names": ["Luxury"]
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json_body(&body)["error"]["code"], "STALE_WRITE");
}

#[tokio::test]
async fn test_delete_is_no_content_even_when_missing() {
    let app = app().await;
    let moderator = token(&["moderator"]);

    let (status, body) = send(&app, request(Method::DELETE, "/api/v1/cars/missing", Some(&moderator), None)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_empty());
}

#[tokio::test]
async fn test_patch_is_not_implemented() {
    let app = app().await;
    let moderator = token(&["moderator"]);

    for uri in ["/api/v1/cars/x", "/api/v1/manufacturers/x", "/api/v1/categories/x"] {
        let (status, body) = send(&app, request(Method::PATCH, uri, Some(&moderator), Some(json!({})))).await;
        assert_eq!(status, StatusCode::NOT_IMPLEMENTED);
        assert_eq!(json_body(&body)["error"]["code"], "NOT_IMPLEMENTED");
    }
}

// =============================================================================
// Manufacturers and Categories
// =============================================================================

#[tokio::test]
async fn test_duplicate_and_referenced_manufacturer_conflict() {
    let app = app().await;
    let moderator = token(&["moderator"]);
    seed(&app, &moderator).await;

    let (status, body) = send(
        &app,
        request(Method::POST, "/api/v1/manufacturers", Some(&moderator), Some(json!({ "name": "Alpha Motors" }))),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json_body(&body)["error"]["code"], "DUPLICATE_RESOURCE");

    let car_id = create_car(
        &app,
        &moderator,
        json!({
            "manufacturer_name": "Alpha Motors",
            "production_year": 2020,
            "model": "Roadster",
            "category_names": ["Compact"]
        }),
    )
    .await;
    let (_, body) = send(&app, request(Method::GET, &format!("/api/v1/cars/{}", car_id), Some(&moderator), None)).await;
    assert_eq!(json_body(&body)["manufacturer_name"], "Alpha Motors");

    let (_, body) = send(
        &app,
        request(Method::GET, "/api/v1/manufacturers?name=Alpha", Some(&moderator), None),
    )
    .await;
    let page = json_body(&body);
    assert_eq!(page["meta"]["total"], 1);
    let manufacturer_id = page["data"][0]["id"].as_str().unwrap().to_string();

    let (status, body) = send(
        &app,
        request(Method::DELETE, &format!("/api/v1/manufacturers/{}", manufacturer_id), Some(&moderator), None),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json_body(&body)["error"]["code"], "DEPENDENCY_CONFLICT");
}

#[tokio::test]
async fn test_category_lifecycle() {
    let app = app().await;
    let moderator = token(&["moderator"]);

    let (status, id) = send(
        &app,
        request(
            Method::POST,
            "/api/v1/categories",
            Some(&moderator),
            Some(json!({ "id": "cat-compact", "name": "Compact" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(id, "cat-compact");

    let (status, body) = send(
        &app,
        request(
            Method::PUT,
            "/api/v1/categories",
            Some(&moderator),
            Some(json!({ "id": "cat-compact", "name": "Subcompact" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json_body(&body)["name"], "Subcompact");

    let (status, _) = send(&app, request(Method::DELETE, "/api/v1/categories/cat-compact", Some(&moderator), None)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = send(&app, request(Method::GET, "/api/v1/categories/cat-compact", Some(&moderator), None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json_body(&body)["error"]["code"], "NOT_FOUND");
}
