// HTTP API Error Types
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::api::validation::ValidationError;
use crate::database::repository::RepositoryError;

/// HTTP API error with appropriate status codes and client-friendly messages.
/// Rendered as `{"detail": "..."}`; store error text never reaches the body.
#[derive(Debug)]
pub enum ApiError {
    // 400 Bad Request (fallback for uncategorized request failures)
    BadRequest(String),

    // 404 Not Found
    NotFound(String),

    // 409 Conflict
    Conflict(String),

    // 422 Unprocessable Entity (well-formed request, unacceptable values)
    UnprocessableEntity(String),

    // 500 Internal Server Error
    InternalServerError(String),
}

impl ApiError {
    /// Get HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::UnprocessableEntity(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get client-safe error message
    pub fn message(&self) -> &str {
        match self {
            ApiError::BadRequest(msg)
            | ApiError::NotFound(msg)
            | ApiError::Conflict(msg)
            | ApiError::UnprocessableEntity(msg)
            | ApiError::InternalServerError(msg) => msg,
        }
    }

    /// Convert to JSON response body
    pub fn to_json(&self) -> Value {
        json!({ "detail": self.message() })
    }
}

// Static constructor methods
impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        ApiError::Conflict(message.into())
    }

    pub fn unprocessable_entity(message: impl Into<String>) -> Self {
        ApiError::UnprocessableEntity(message.into())
    }

    pub fn internal_server_error(message: impl Into<String>) -> Self {
        ApiError::InternalServerError(message.into())
    }

    pub fn clue_not_found(id: i64) -> Self {
        ApiError::not_found(format!("Clue with id {} not found", id))
    }
}

// Convert other error types to ApiError
impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::DuplicateClue { existing_id: Some(id) } => {
                ApiError::conflict(format!("Clue already exists with id {}", id))
            }
            RepositoryError::DuplicateClue { existing_id: None } => {
                ApiError::conflict("Clue already exists")
            }
            RepositoryError::InvalidInput(msg) => {
                // Don't expose internal SQL errors to clients
                tracing::warn!("Store rejected clue data: {}", msg);
                ApiError::unprocessable_entity("Clue data was rejected by the store")
            }
            RepositoryError::Unavailable(gateway_err) => {
                // Log the real error but return generic message
                if gateway_err.is_unavailable() {
                    tracing::warn!("Clue store temporarily unavailable: {}", gateway_err);
                } else {
                    tracing::error!("Repository unavailable: {}", gateway_err);
                }
                ApiError::internal_server_error("Clue repository is unavailable")
            }
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::unprocessable_entity(err.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::JsonDataError(e) => ApiError::unprocessable_entity(e.body_text()),
            JsonRejection::JsonSyntaxError(e) => ApiError::unprocessable_entity(e.body_text()),
            other => ApiError::bad_request(other.body_text()),
        }
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        tracing::debug!("Rejected path parameter: {}", rejection.body_text());
        ApiError::unprocessable_entity("id: value is not a valid integer")
    }
}

// Standard error trait implementations
impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}

// Automatic HTTP response conversion for Axum
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status_code(), Json(self.to_json())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::gateway::GatewayError;

    #[test]
    fn duplicate_names_existing_id() {
        let err = ApiError::from(RepositoryError::DuplicateClue { existing_id: Some(7) });
        assert_eq!(err.status_code(), StatusCode::CONFLICT);
        assert!(err.message().contains('7'));
    }

    #[test]
    fn store_details_are_not_exposed() {
        let err = ApiError::from(RepositoryError::Unavailable(GatewayError::Store(
            "relation crossword_clues does not exist".to_string(),
        )));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!err.message().contains("crossword_clues"));

        let err = ApiError::from(RepositoryError::Unavailable(GatewayError::Unavailable(
            "database is locked".to_string(),
        )));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message(), "Clue repository is unavailable");

        let err = ApiError::from(RepositoryError::InvalidInput("value too long for type".into()));
        assert_eq!(err.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
        assert!(!err.message().contains("too long for type"));
    }

    #[test]
    fn validation_errors_are_unprocessable() {
        let err = ApiError::from(ValidationError::Empty { field: "clue" });
        assert_eq!(err.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(err.to_json(), json!({ "detail": "clue: must not be empty" }));
    }
}
