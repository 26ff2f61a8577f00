use axum::{extract::FromRequestParts, http::request::Parts};
use oms_core::domain::filter::params::ParameterMap;
use tracing::debug;

use super::server::api_entities::api_error::ApiError;

/// Extractor for the raw query string as a multi-map, keys kept in request order.
///
/// Usage:
/// ```rust,ignore
/// async fn handler(
///     QueryParamsExtractor(params): QueryParamsExtractor,
/// ) -> Result<Response, ApiError> {
///     // hand `params` to a service's `pagination`
/// }
/// ```
#[derive(Debug, Clone)]
pub struct QueryParamsExtractor(pub ParameterMap);

impl<S> FromRequestParts<S> for QueryParamsExtractor
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let query_string = parts.uri.query().unwrap_or("");
        let pairs: Vec<(String, String)> =
            serde_urlencoded::from_str(query_string).map_err(|e| {
                debug!(error = %e, "rejecting malformed query string");
                ApiError::BadRequest(format!("Malformed query string: {e}"))
            })?;

        Ok(QueryParamsExtractor(pairs.into_iter().collect()))
    }
}
