//! Car database entity for SeaORM.
//!
//! Only the scalar columns and the manufacturer key live on this row;
//! category links are rows of [`super::car_category`].

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "cars")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub manufacturer_id: String,
    pub production_year: i32,
    pub model: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::manufacturer::Entity",
        from = "Column::ManufacturerId",
        to = "super::manufacturer::Column::Id",
        on_update = "Cascade",
        on_delete = "Restrict"
    )]
    Manufacturer,
    #[sea_orm(has_many = "super::car_category::Entity")]
    CarCategory,
}

impl Related<super::manufacturer::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Manufacturer.def()
    }
}

impl Related<super::car_category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CarCategory.def()
    }
}

/// Many-to-many: cars <- cars_categories -> categories
impl Related<super::category::Entity> for Entity {
    fn to() -> RelationDef {
        super::car_category::Relation::Category.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::car_category::Relation::Car.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
