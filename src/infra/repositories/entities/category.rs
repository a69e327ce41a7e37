//! Category database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::Category;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "categories")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    #[sea_orm(unique)]
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::car_category::Entity")]
    CarCategory,
}

impl Related<super::car_category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CarCategory.def()
    }
}

/// Many-to-many: categories <- cars_categories -> cars
impl Related<super::car::Entity> for Entity {
    fn to() -> RelationDef {
        super::car_category::Relation::Car.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::car_category::Relation::Category.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Convert database model to domain entity
impl From<Model> for Category {
    fn from(model: Model) -> Self {
        Category {
            id: model.id,
            name: model.name,
        }
    }
}
