//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::{car_handler, category_handler, manufacturer_handler};
use crate::domain::{CarResponse, Category, Manufacturer};
use crate::types::{CarPage, CategoryPage, ManufacturerPage, PaginationMeta};

/// OpenAPI documentation for the car catalog
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Car Catalog API",
        version = "0.1.0",
        description = "Cars, their manufacturers and categories, with filtered and paginated search"
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    paths(
        // Car endpoints
        car_handler::search_cars,
        car_handler::get_car,
        car_handler::create_car,
        car_handler::update_car,
        car_handler::delete_car,
        car_handler::patch_car,
        // Manufacturer endpoints
        manufacturer_handler::list_manufacturers,
        manufacturer_handler::get_manufacturer,
        manufacturer_handler::create_manufacturer,
        manufacturer_handler::update_manufacturer,
        manufacturer_handler::delete_manufacturer,
        manufacturer_handler::patch_manufacturer,
        // Category endpoints
        category_handler::list_categories,
        category_handler::get_category,
        category_handler::create_category,
        category_handler::update_category,
        category_handler::delete_category,
        category_handler::patch_category,
    ),
    components(
        schemas(
            // Domain types
            CarResponse,
            Manufacturer,
            Category,
            // Pages
            PaginationMeta,
            CarPage,
            ManufacturerPage,
            CategoryPage,
            // Request bodies
            car_handler::CreateCarRequest,
            car_handler::UpdateCarRequest,
            manufacturer_handler::CreateManufacturerRequest,
            manufacturer_handler::UpdateManufacturerRequest,
            category_handler::CreateCategoryRequest,
            category_handler::UpdateCategoryRequest,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Cars", description = "Car search and maintenance"),
        (name = "Manufacturers", description = "Manufacturer maintenance"),
        (name = "Categories", description = "Category maintenance")
    )
)]
pub struct ApiDoc;

/// Security scheme modifier for JWT Bearer authentication
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some(
                            "Access token from the identity provider; roles are read from resource_access",
                        ))
                        .build(),
                ),
            );
        }
    }
}
