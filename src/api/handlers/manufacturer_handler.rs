//! Manufacturer handlers.

use axum::{
    extract::{Path, State},
    response::Json,
    routing::get,
    Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use super::{not_blank, NameQuery};
use crate::api::extractors::{QueryParams, ValidatedJson};
use crate::api::AppState;
use crate::domain::Manufacturer;
use crate::errors::{AppError, AppResult};
use crate::types::{Created, ManufacturerPage, NoContent, Paginated, PaginationParams};

/// Manufacturer creation request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateManufacturerRequest {
    /// Caller-chosen identifier; generated when omitted
    #[schema(example = json!(null))]
    pub id: Option<String>,
    /// Unique manufacturer name
    #[validate(custom(function = "not_blank", message = "Name is required"))]
    #[schema(example = "Alpha Motors")]
    pub name: String,
}

/// Manufacturer update request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateManufacturerRequest {
    /// Identifier of the manufacturer to rename
    #[validate(custom(function = "not_blank", message = "Id is required"))]
    #[schema(example = "5b0c3f7e-51f6-4bd4-9d5e-0f1a6c2f8b11")]
    pub id: String,
    /// New unique name
    #[validate(custom(function = "not_blank", message = "Name is required"))]
    #[schema(example = "Alpha Motor Works")]
    pub name: String,
}

/// Create manufacturer routes
pub fn manufacturer_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(list_manufacturers)
                .post(create_manufacturer)
                .put(update_manufacturer),
        )
        .route(
            "/:id",
            get(get_manufacturer)
                .delete(delete_manufacturer)
                .patch(patch_manufacturer),
        )
}

/// List manufacturers
#[utoipa::path(
    get,
    path = "/api/v1/manufacturers",
    tag = "Manufacturers",
    security(("bearer_auth" = [])),
    params(NameQuery, PaginationParams),
    responses(
        (status = 200, description = "Page of manufacturers", body = ManufacturerPage),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn list_manufacturers(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<NameQuery>,
    QueryParams(page): QueryParams<PaginationParams>,
) -> AppResult<Json<Paginated<Manufacturer>>> {
    let manufacturers = state
        .manufacturer_service
        .list_manufacturers(query.name, page)
        .await?;

    Ok(Json(manufacturers))
}

/// Get manufacturer by ID
#[utoipa::path(
    get,
    path = "/api/v1/manufacturers/{id}",
    tag = "Manufacturers",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Manufacturer ID")),
    responses(
        (status = 200, description = "Manufacturer found", body = Manufacturer),
        (status = 404, description = "Manufacturer not found")
    )
)]
pub async fn get_manufacturer(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Manufacturer>> {
    let manufacturer = state.manufacturer_service.get_manufacturer(&id).await?;
    Ok(Json(manufacturer))
}

/// Create a manufacturer
#[utoipa::path(
    post,
    path = "/api/v1/manufacturers",
    tag = "Manufacturers",
    security(("bearer_auth" = [])),
    request_body = CreateManufacturerRequest,
    responses(
        (status = 201, description = "Manufacturer created, body is the new ID", body = String, content_type = "text/plain"),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Moderator role required"),
        (status = 409, description = "Name already taken")
    )
)]
pub async fn create_manufacturer(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateManufacturerRequest>,
) -> AppResult<Created> {
    let manufacturer = state
        .manufacturer_service
        .create_manufacturer(payload.id, payload.name)
        .await?;

    Ok(Created(manufacturer.id))
}

/// Rename a manufacturer
#[utoipa::path(
    put,
    path = "/api/v1/manufacturers",
    tag = "Manufacturers",
    security(("bearer_auth" = [])),
    request_body = UpdateManufacturerRequest,
    responses(
        (status = 200, description = "Manufacturer updated", body = Manufacturer),
        (status = 404, description = "Manufacturer not found"),
        (status = 409, description = "Name already taken")
    )
)]
pub async fn update_manufacturer(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<UpdateManufacturerRequest>,
) -> AppResult<Json<Manufacturer>> {
    let manufacturer = state
        .manufacturer_service
        .modify_manufacturer(payload.id, payload.name)
        .await?;

    Ok(Json(manufacturer))
}

/// Delete a manufacturer
#[utoipa::path(
    delete,
    path = "/api/v1/manufacturers/{id}",
    tag = "Manufacturers",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Manufacturer ID")),
    responses(
        (status = 204, description = "Manufacturer deleted (or did not exist)"),
        (status = 409, description = "Manufacturer is still referenced by cars")
    )
)]
pub async fn delete_manufacturer(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<NoContent> {
    state.manufacturer_service.delete_manufacturer(&id).await?;
    Ok(NoContent)
}

/// Partial update (not supported)
#[utoipa::path(
    patch,
    path = "/api/v1/manufacturers/{id}",
    tag = "Manufacturers",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Manufacturer ID")),
    responses((status = 501, description = "Partial update is not implemented"))
)]
pub async fn patch_manufacturer(Path(_id): Path<String>) -> AppResult<NoContent> {
    Err(AppError::unimplemented("Partial update of a manufacturer"))
}
