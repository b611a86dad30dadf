use axum::{
    extract::{Extension, Query},
    http::HeaderMap,
    Json,
};
use serde::Deserialize;
use timeline::SearchResponse;

use crate::server::{app::AppState, error::ApiError};

/// Header naming the user a request is attributable to.
pub const USER_ID_HEADER: &str = "x-user-id";

const MISSING_QUERY: &str = "Query parameter \"q\" is required.";

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
    pub q: Option<String>,
    pub start_year: Option<String>,
    pub end_year: Option<String>,
}

/// Timeline search endpoint
///
/// `GET /search?q=<topic>&startYear=<label>&endYear=<label>`
///
/// A missing or blank `q` (empty or only whitespace) is answered with 400.
///
/// When the request carries an `x-user-id` header the query is added to
/// that user's search history. History failures never fail the search.
pub async fn search_handler(
    Extension(state): Extension<AppState>,
    headers: HeaderMap,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>, ApiError> {
    let query = match params.q.as_deref() {
        Some(q) if !q.trim().is_empty() => q,
        _ => return Err(ApiError::BadRequest(MISSING_QUERY.to_string())),
    };

    let response = state
        .timelines
        .search(
            query,
            params.start_year.as_deref(),
            params.end_year.as_deref(),
        )
        .await
        .map_err(|e| {
            if e.is_invalid_query() {
                ApiError::BadRequest(MISSING_QUERY.to_string())
            } else {
                ApiError::internal("Failed to process search request.", e)
            }
        })?;

    if let Some(user) = user_id(&headers) {
        if let Err(e) = state.history.record(user, query).await {
            tracing::warn!(user = %user, error = %e, "Failed to record search history");
        }
    }

    Ok(Json(response))
}

fn user_id(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(USER_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|user| !user.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_user_id_header() {
        let mut headers = HeaderMap::new();
        assert_eq!(user_id(&headers), None);

        headers.insert(USER_ID_HEADER, HeaderValue::from_static("  "));
        assert_eq!(user_id(&headers), None);

        headers.insert(USER_ID_HEADER, HeaderValue::from_static("u-42"));
        assert_eq!(user_id(&headers), Some("u-42"));
    }
}
