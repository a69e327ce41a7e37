//! Car aggregate and related types.

use serde::Serialize;
use utoipa::ToSchema;

use super::catalog::{Category, Manufacturer};

/// Car aggregate: the car with its resolved manufacturer and categories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Car {
    pub id: String,
    pub manufacturer: Manufacturer,
    pub production_year: i32,
    pub model: String,
    pub categories: Vec<Category>,
}

impl Car {
    /// Names of the attached categories, in stored order
    pub fn category_names(&self) -> Vec<String> {
        self.categories.iter().map(|c| c.name.clone()).collect()
    }
}

/// Scalar part of a car as supplied by a caller.
///
/// References to the manufacturer and categories travel separately, by
/// name, and are resolved against storage on every write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarDraft {
    /// Present on update, absent on create
    pub id: Option<String>,
    pub production_year: i32,
    pub model: String,
}

impl CarDraft {
    pub fn new(production_year: i32, model: impl Into<String>) -> Self {
        Self {
            id: None,
            production_year,
            model: model.into(),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }
}

/// Car response (safe to return to client)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct CarResponse {
    /// Opaque identifier
    #[schema(example = "8e1f4a52-7f0e-4c43-a8b5-2a1f6f0d9c3e")]
    pub id: String,
    /// Manufacturer name
    #[schema(example = "Alpha Motors")]
    pub manufacturer_name: String,
    /// Production year
    #[schema(example = 2021)]
    pub production_year: i32,
    /// Model name
    #[schema(example = "Roadster")]
    pub model: String,
    /// Names of the attached categories
    #[schema(example = json!(["Compact", "Luxury"]))]
    pub category_names: Vec<String>,
}

impl From<Car> for CarResponse {
    fn from(car: Car) -> Self {
        let category_names = car.category_names();
        Self {
            id: car.id,
            manufacturer_name: car.manufacturer.name,
            production_year: car.production_year,
            model: car.model,
            category_names,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_flattens_references() {
        let car = Car {
            id: "car-1".into(),
            manufacturer: Manufacturer::new("m-1", "Alpha Motors"),
            production_year: 2021,
            model: "Roadster".into(),
            categories: vec![Category::new("c-1", "Compact"), Category::new("c-2", "Luxury")],
        };
        let response = CarResponse::from(car);
        assert_eq!(response.manufacturer_name, "Alpha Motors");
        assert_eq!(response.category_names, vec!["Compact", "Luxury"]);
    }
}
