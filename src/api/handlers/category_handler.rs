//! Category handlers.

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
use crate::domain::Category;
use crate::errors::{AppError, AppResult};
use crate::types::{CategoryPage, Created, NoContent, Paginated, PaginationParams};

/// Category creation request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateCategoryRequest {
    /// Caller-chosen identifier; generated when omitted
    #[schema(example = json!(null))]
    pub id: Option<String>,
    #[validate(custom(function = "not_blank", message = "Name is required"))]
    #[schema(example = "Compact")]
    pub name: String,
}

/// Category update request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateCategoryRequest {
    #[validate(custom(function = "not_blank", message = "Id is required"))]
    #[schema(example = "0d9f7d0a-3c53-4a57-9d2b-6f4f7a4b2c90")]
    pub id: String,
    #[validate(custom(function = "not_blank", message = "Name is required"))]
    #[schema(example = "Subcompact")]
    pub name: String,
}

/// Create category routes
pub fn category_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(list_categories).post(create_category).put(update_category),
        )
        .route(
            "/:id",
            get(get_category).delete(delete_category).patch(patch_category),
        )
}

/// List categories
#[utoipa::path(
    get,
    path = "/api/v1/categories",
    tag = "Categories",
    security(("bearer_auth" = [])),
    params(NameQuery, PaginationParams),
    responses(
        (status = 200, description = "Page of categories", body = CategoryPage),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn list_categories(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<NameQuery>,
    QueryParams(page): QueryParams<PaginationParams>,
) -> AppResult<Json<Paginated<Category>>> {
    let categories = state
        .category_service
        .list_categories(query.name, page)
        .await?;

    Ok(Json(categories))
}

/// Get category by ID
#[utoipa::path(
    get,
    path = "/api/v1/categories/{id}",
    tag = "Categories",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Category ID")),
    responses(
        (status = 200, description = "Category found", body = Category),
        (status = 404, description = "Category not found")
    )
)]
pub async fn get_category(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Category>> {
    let category = state.category_service.get_category(&id).await?;
    Ok(Json(category))
}

/// Create a category
#[utoipa::path(
    post,
    path = "/api/v1/categories",
    tag = "Categories",
    security(("bearer_auth" = [])),
    request_body = CreateCategoryRequest,
    responses(
        (status = 201, description = "Category created, body is the new ID", body = String, content_type = "text/plain"),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Name already taken")
    )
)]
pub async fn create_category(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateCategoryRequest>,
) -> AppResult<Created> {
    let category = state
        .category_service
        .create_category(payload.id, payload.name)
        .await?;

    Ok(Created(category.id))
}

/// Rename a category
#[utoipa::path(
    put,
    path = "/api/v1/categories",
    tag = "Categories",
    security(("bearer_auth" = [])),
    request_body = UpdateCategoryRequest,
    responses(
        (status = 200, description = "Category updated", body = Category),
        (status = 404, description = "Category not found"),
        (status = 409, description = "Name already taken")
    )
)]
pub async fn update_category(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<UpdateCategoryRequest>,
) -> AppResult<Json<Category>> {
    let category = state
        .category_service
        .modify_category(payload.id, payload.name)
        .await?;

    Ok(Json(category))
}

/// Delete a category
#[utoipa::path(
    delete,
    path = "/api/v1/categories/{id}",
    tag = "Categories",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Category ID")),
    responses(
        (status = 204, description = "Category deleted (or did not exist)"),
        (status = 409, description = "Category is still attached to cars")
    )
)]
pub async fn delete_category(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<NoContent> {
    state.category_service.delete_category(&id).await?;
    Ok(NoContent)
}

/// Partial update (not supported)
#[utoipa::path(
    patch,
    path = "/api/v1/categories/{id}",
    tag = "Categories",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Category ID")),
    responses((status = 501, description = "Partial update is not implemented"))
)]
pub async fn patch_category(Path(_id): Path<String>) -> AppResult<NoContent> {
    Err(AppError::unimplemented("Partial update of a category"))
}
