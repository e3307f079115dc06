use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};

use crate::api::validation::CreateClueRequest;
use crate::database::models::Clue;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

/// GET /clues - List every clue, ascending by id
pub async fn get(State(state): State<AppState>) -> ApiResult<Vec<Clue>> {
    let clues = state.repository().list_clues().await?;
    Ok(ApiResponse::success(clues))
}

/// POST /clues - Validate the payload, then create the clue
///
/// Validation failures are answered before the repository is involved.
pub async fn post(
    State(state): State<AppState>,
    payload: Result<Json<CreateClueRequest>, JsonRejection>,
) -> ApiResult<Clue> {
    let Json(request) = payload?;
    let new_clue = request.validate()?;

    let clue = state.repository().create_clue(new_clue).await?;
    Ok(ApiResponse::created(clue))
}
