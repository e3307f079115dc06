use axum::extract::{rejection::PathRejection, Path, State};

use crate::database::models::Clue;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

/// GET /clues/:id - Show a single clue
pub async fn get(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Clue> {
    let Path(id) = id?;

    match state.repository().get_clue(id).await? {
        Some(clue) => Ok(ApiResponse::success(clue)),
        None => Err(ApiError::clue_not_found(id)),
    }
}
