//! Manufacturers, categories and the kinds of catalog resources.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Kind of catalog resource, used when reporting a missing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Car,
    Manufacturer,
    Category,
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResourceKind::Car => write!(f, "Car"),
            ResourceKind::Manufacturer => write!(f, "Manufacturer"),
            ResourceKind::Category => write!(f, "Category"),
        }
    }
}

/// Car manufacturer, unique by name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Manufacturer {
    /// Opaque identifier
    #[schema(example = "5b0c3f7e-51f6-4bd4-9d5e-0f1a6c2f8b11")]
    pub id: String,
    /// Unique manufacturer name
    #[schema(example = "Alpha Motors")]
    pub name: String,
}

impl Manufacturer {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Car category, unique by name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Category {
    /// Opaque identifier
    #[schema(example = "0d9f7d0a-3c53-4a57-9d2b-6f4f7a4b2c90")]
    pub id: String,
    /// Unique category name
    #[schema(example = "Compact")]
    pub name: String,
}

impl Category {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}
