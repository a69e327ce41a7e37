//! Car search predicate builder.
//!
//! Turns a sparse [`SearchParameters`] value into one [`Condition`] over the
//! car entity graph. Present filters are AND-ed; absent filters contribute
//! nothing, so an empty parameter set matches every car.
//!
//! Filters that reach across a relation are expressed as `IN (sub-select)`
//! on the car row, which keeps one result row per car:
//!
//! - manufacturer name: `cars.manufacturer_id IN (SELECT id FROM manufacturers WHERE name = ?)`
//! - category names (match-any): `cars.id IN (SELECT car_id FROM cars_categories
//!   JOIN categories ON ... WHERE categories.name IN (...))`

use sea_orm::sea_query::{Condition, Expr, Query, SelectStatement};
use sea_orm::ColumnTrait;

use super::entities::{car, car_category, category, manufacturer};
use crate::domain::SearchParameters;
use crate::errors::{AppError, AppResult};

/// Storage-executable filter over cars.
#[derive(Debug, Clone)]
pub struct Predicate(Condition);

impl Predicate {
    /// True when no sub-condition is present.
    #[cfg(test)]
    pub fn is_match_all(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_condition(self) -> Condition {
        self.0
    }
}

/// Builds [`Predicate`]s from search parameters.
pub struct PredicateBuilder;

impl PredicateBuilder {
    /// Build the predicate for `params`.
    ///
    /// Fails with a validation error naming the field when a year bound is
    /// not an integer.
    pub fn build(params: &SearchParameters) -> AppResult<Predicate> {
        let mut condition = Condition::all();

        if let Some(name) = params.manufacturer_name() {
            condition = condition.add(car::Column::ManufacturerId.in_subquery(manufacturer_ids(name)));
        }

        if let Some(model) = params.model() {
            condition = condition.add(car::Column::Model.eq(model));
        }

        if let Some(raw) = params.min_year() {
            condition = condition.add(car::Column::ProductionYear.gte(parse_year("min_year", raw)?));
        }

        if let Some(raw) = params.max_year() {
            condition = condition.add(car::Column::ProductionYear.lte(parse_year("max_year", raw)?));
        }

        let names = params.category_names();
        if !names.is_empty() {
            condition = condition.add(car::Column::Id.in_subquery(car_ids_in_categories(&names)));
        }

        Ok(Predicate(condition))
    }
}

fn parse_year(field: &str, raw: &str) -> AppResult<i32> {
    raw.trim().parse::<i32>().map_err(|_| {
        AppError::validation(field, format!("'{}' is not a valid year", raw))
    })
}

/// `SELECT id FROM manufacturers WHERE name = ?`
fn manufacturer_ids(name: &str) -> SelectStatement {
    Query::select()
        .column(manufacturer::Column::Id)
        .from(manufacturer::Entity)
        .and_where(manufacturer::Column::Name.eq(name))
        .to_owned()
}

/// Ids of cars linked to at least one of the named categories.
fn car_ids_in_categories(names: &[&str]) -> SelectStatement {
    Query::select()
        .column((car_category::Entity, car_category::Column::CarId))
        .from(car_category::Entity)
        .inner_join(
            category::Entity,
            Expr::col((category::Entity, category::Column::Id))
                .equals((car_category::Entity, car_category::Column::CategoryId)),
        )
        .and_where(category::Column::Name.is_in(names.iter().copied()))
        .to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DbBackend, EntityTrait, QueryFilter, QueryTrait};

    fn render(params: &SearchParameters) -> String {
        let predicate = PredicateBuilder::build(params).unwrap();
        car::Entity::find()
            .filter(predicate.into_condition())
            .build(DbBackend::Postgres)
            .to_string()
    }

    #[test]
    fn test_empty_parameters_match_everything() {
        let params = SearchParameters::default();
        assert!(PredicateBuilder::build(&params).unwrap().is_match_all());
        assert!(!render(&params).contains("WHERE"));
    }

    #[test]
    fn test_blank_filters_are_ignored() {
        let params = SearchParameters::default()
            .with_manufacturer(" ")
            .with_model("")
            .with_years(Some(""), None);
        assert!(PredicateBuilder::build(&params).unwrap().is_match_all());
    }

    #[test]
    fn test_year_bounds_are_inclusive() {
        let sql = render(&SearchParameters::default().with_years(Some("2020"), Some(" 2022 ")));
        assert!(sql.contains(r#""cars"."production_year" >= 2020"#), "{sql}");
        assert!(sql.contains(r#""cars"."production_year" <= 2022"#), "{sql}");
    }

    #[test]
    fn test_model_is_exact_match() {
        let sql = render(&SearchParameters::default().with_model("Roadster"));
        assert!(sql.contains(r#""cars"."model" = 'Roadster'"#), "{sql}");
        assert!(!sql.contains("LIKE"));
    }

    #[test]
    fn test_manufacturer_filter_uses_sub_select() {
        let sql = render(&SearchParameters::default().with_manufacturer("Alpha Motors"));
        assert!(sql.contains(r#""cars"."manufacturer_id" IN (SELECT"#), "{sql}");
        assert!(sql.contains(r#""manufacturers"."name" = 'Alpha Motors'"#), "{sql}");
    }

    #[test]
    fn test_category_filter_is_match_any() {
        let sql = render(&SearchParameters::default().with_categories(["Compact", "SUV"]));
        assert!(sql.contains(r#""cars"."id" IN (SELECT"#), "{sql}");
        assert!(sql.contains(r#""categories"."name" IN ('Compact', 'SUV')"#), "{sql}");
    }

    #[test]
    fn test_filters_are_conjoined() {
        let sql = render(
            &SearchParameters::default()
                .with_model("Roadster")
                .with_years(Some("2019"), None),
        );
        assert!(sql.contains(" AND "), "{sql}");
    }

    #[test]
    fn test_unparseable_year_is_rejected() {
        let params = SearchParameters::default().with_years(None, Some("twenty"));
        match PredicateBuilder::build(&params) {
            Err(AppError::Validation(fields)) => assert!(fields.contains_key("max_year")),
            other => panic!("expected validation error, got {:?}", other.map(|_| ())),
        }
    }
}
