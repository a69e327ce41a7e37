//! Car handlers.

use axum::{
    extract::{Path, State},
    response::Json,
    routing::get,
    Router,
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::not_blank;
use crate::api::extractors::{QueryParams, ValidatedJson};
use crate::api::AppState;
use crate::domain::{CarDraft, CarResponse, SearchParameters};
use crate::errors::{AppError, AppResult};
use crate::types::{CarPage, Created, NoContent, Paginated, PaginationParams};

/// Car search filters
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CarSearchQuery {
    /// Exact manufacturer name
    pub manufacturer_name: Option<String>,
    /// Exact model name
    pub model: Option<String>,
    /// Category names, repeated or comma-separated; a car matches if it has any of them
    #[serde(default)]
    pub category_names: Vec<String>,
    /// Inclusive lower bound on production year
    pub min_year: Option<String>,
    /// Inclusive upper bound on production year
    pub max_year: Option<String>,
}

impl From<CarSearchQuery> for SearchParameters {
    fn from(query: CarSearchQuery) -> Self {
        SearchParameters {
            manufacturer_name: query.manufacturer_name,
            model: query.model,
            category_names: query
                .category_names
                .iter()
                .flat_map(|value| value.split(','))
                .map(|name| name.trim().to_string())
                .filter(|name| !name.is_empty())
                .collect(),
            min_year: query.min_year,
            max_year: query.max_year,
        }
    }
}

/// Car creation request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateCarRequest {
    /// Name of an existing manufacturer
    #[validate(custom(function = "not_blank", message = "Manufacturer name is required"))]
    #[schema(example = "Alpha Motors")]
    pub manufacturer_name: String,
    /// Production year (1900 or later)
    #[validate(range(min = 1900, message = "Production year must be 1900 or later"))]
    #[schema(example = 2021, minimum = 1900)]
    pub production_year: i32,
    /// Model name
    #[validate(custom(function = "not_blank", message = "Model is required"))]
    #[schema(example = "Roadster")]
    pub model: String,
    /// Names of existing categories
    #[validate(length(min = 1, message = "At least one category is required"))]
    #[schema(example = json!(["Compact", "Luxury"]))]
    pub category_names: Vec<String>,
}

/// Car update request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateCarRequest {
    /// Identifier of the car to update
    #[validate(custom(function = "not_blank", message = "Id is required"))]
    #[schema(example = "8e1f4a52-7f0e-4c43-a8b5-2a1f6f0d9c3e")]
    pub id: String,
    /// Name of an existing manufacturer
    #[validate(custom(function = "not_blank", message = "Manufacturer name is required"))]
    #[schema(example = "Alpha Motors")]
    pub manufacturer_name: String,
    /// Production year (1900 or later)
    #[validate(range(min = 1900, message = "Production year must be 1900 or later"))]
    #[schema(example = 2022, minimum = 1900)]
    pub production_year: i32,
    /// Model name
    #[validate(custom(function = "not_blank", message = "Model is required"))]
    #[schema(example = "Roadster")]
    pub model: String,
    /// Names of existing categories; replaces the current set
    #[validate(length(min = 1, message = "At least one category is required"))]
    #[schema(example = json!(["Luxury"]))]
    pub category_names: Vec<String>,
}

/// Create car routes
pub fn car_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(search_cars).post(create_car).put(update_car))
        .route("/:id", get(get_car).delete(delete_car).patch(patch_car))
}

/// Search cars
#[utoipa::path(
    get,
    path = "/api/v1/cars",
    tag = "Cars",
    security(("bearer_auth" = [])),
    params(CarSearchQuery, PaginationParams),
    responses(
        (status = 200, description = "Page of matching cars", body = CarPage),
        (status = 400, description = "Malformed year bound"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    )
)]
pub async fn search_cars(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<CarSearchQuery>,
    QueryParams(page): QueryParams<PaginationParams>,
) -> AppResult<Json<Paginated<CarResponse>>> {
    let cars = state
        .car_service
        .search_cars(SearchParameters::from(query), page)
        .await?;

    Ok(Json(cars.map(CarResponse::from)))
}

/// Get car by ID
#[utoipa::path(
    get,
    path = "/api/v1/cars/{id}",
    tag = "Cars",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Car ID")),
    responses(
        (status = 200, description = "Car found", body = CarResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Car not found")
    )
)]
pub async fn get_car(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<CarResponse>> {
    let car = state.car_service.get_car(&id).await?;
    Ok(Json(CarResponse::from(car)))
}

/// Create a car
#[utoipa::path(
    post,
    path = "/api/v1/cars",
    tag = "Cars",
    security(("bearer_auth" = [])),
    request_body = CreateCarRequest,
    responses(
        (status = 201, description = "Car created, body is the new ID", body = String, content_type = "text/plain"),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Moderator role required"),
        (status = 404, description = "Manufacturer or category not found")
    )
)]
pub async fn create_car(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateCarRequest>,
) -> AppResult<Created> {
    let car = state
        .car_service
        .create_car(
            CarDraft::new(payload.production_year, payload.model),
            payload.manufacturer_name,
            payload.category_names,
        )
        .await?;

    Ok(Created(car.id))
}

/// Update a car, replacing its categories
#[utoipa::path(
    put,
    path = "/api/v1/cars",
    tag = "Cars",
    security(("bearer_auth" = [])),
    request_body = UpdateCarRequest,
    responses(
        (status = 200, description = "Car updated", body = CarResponse),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Moderator role required"),
        (status = 404, description = "Car, manufacturer or category not found")
    )
)]
pub async fn update_car(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<UpdateCarRequest>,
) -> AppResult<Json<CarResponse>> {
    let car = state
        .car_service
        .modify_car(
            CarDraft::new(payload.production_year, payload.model).with_id(payload.id),
            payload.manufacturer_name,
            payload.category_names,
        )
        .await?;

    Ok(Json(CarResponse::from(car)))
}

/// Delete a car
#[utoipa::path(
    delete,
    path = "/api/v1/cars/{id}",
    tag = "Cars",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Car ID")),
    responses(
        (status = 204, description = "Car deleted (or did not exist)"),
        (status = 403, description = "Moderator role required")
    )
)]
pub async fn delete_car(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<NoContent> {
    state.car_service.delete_car(&id).await?;
    Ok(NoContent)
}

/// Partial update (not supported)
#[utoipa::path(
    patch,
    path = "/api/v1/cars/{id}",
    tag = "Cars",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Car ID")),
    responses((status = 501, description = "Partial update is not implemented"))
)]
pub async fn patch_car(Path(_id): Path<String>) -> AppResult<NoContent> {
    Err(AppError::unimplemented("Partial update of a car"))
}
