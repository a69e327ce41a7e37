//! Query string extractor with repeated-key support.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use serde::de::DeserializeOwned;

use crate::errors::AppError;

/// Query string extractor.
///
/// Repeated keys (`?category_names=A&category_names=B`) deserialize into
/// sequences. A query string that does not fit `T` is a bad request.
pub struct QueryParams<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for QueryParams<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let axum_extra::extract::Query(value) =
            axum_extra::extract::Query::<T>::from_request_parts(parts, state)
                .await
                .map_err(|e| AppError::BadRequest(e.to_string()))?;

        Ok(QueryParams(value))
    }
}
