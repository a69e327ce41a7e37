//! Custom request extractors.

mod query;
mod validated_json;

pub use query::QueryParams;
pub use validated_json::ValidatedJson;
