use axum::{
    extract::{Extension, Path},
    Json,
};
use serde::Deserialize;

use crate::server::{app::AppState, error::ApiError};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddHistoryRequest {
    pub user_id: String,
    #[serde(default)]
    pub query: String,
}

/// `GET /api/users/search-history/:user_id`, most recent first.
pub async fn history_handler(
    Extension(state): Extension<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<String>>, ApiError> {
    let terms = state
        .history
        .recent(&user_id)
        .await
        .map_err(|e| ApiError::internal("Server error", e))?;

    Ok(Json(terms))
}

/// `POST /api/users/search-history` with `{userId, query}`.
///
/// Returns the updated history.
pub async fn add_history_handler(
    Extension(state): Extension<AppState>,
    Json(request): Json<AddHistoryRequest>,
) -> Result<Json<Vec<String>>, ApiError> {
    if request.query.trim().is_empty() {
        return Err(ApiError::BadRequest("Search query is required".to_string()));
    }

    let terms = state
        .history
        .record(&request.user_id, &request.query)
        .await
        .map_err(|e| ApiError::internal("Server error", e))?;

    Ok(Json(terms))
}
