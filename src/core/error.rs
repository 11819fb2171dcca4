use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::shared::types::ApiResponse;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Validation(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let (message, errors, details) = match self {
            AppError::Database(ref e) => {
                tracing::error!("Database error: {:?}", e);
                (
                    "Database error occurred".to_string(),
                    None,
                    Some(e.to_string()),
                )
            }
            AppError::Internal(ref msg) => {
                tracing::error!("Internal error: {}", msg);
                ("Internal server error".to_string(), None, Some(msg.clone()))
            }
            AppError::Validation(ref msg) => (msg.clone(), Some(vec![msg.clone()]), None),
            AppError::NotFound(ref msg)
            | AppError::BadRequest(ref msg)
            | AppError::Unauthorized(ref msg)
            | AppError::Forbidden(ref msg) => (msg.clone(), None, None),
        };

        let body = Json(ApiResponse::<()>::error(Some(message), errors, details));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

/// Postgres SQLSTATE for unique_violation
const UNIQUE_VIOLATION: &str = "23505";
/// Postgres SQLSTATE for foreign_key_violation
const FOREIGN_KEY_VIOLATION: &str = "23503";

/// Translate constraint violations into client errors.
///
/// `unique_message` is returned for unique violations so each resource can
/// phrase its own conflict ("Tag name already exists", ...). Every other
/// database error stays a 500.
pub fn map_db_error(e: sqlx::Error, unique_message: &str) -> AppError {
    if let sqlx::Error::Database(db_err) = &e {
        match db_err.code().as_deref() {
            Some(UNIQUE_VIOLATION) => return AppError::BadRequest(unique_message.to_string()),
            Some(FOREIGN_KEY_VIOLATION) => {
                return AppError::BadRequest("Referenced record does not exist".to_string())
            }
            _ => {}
        }
    }

    AppError::Database(e)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_validation_error_lists_message() {
        let response = AppError::Validation("name: length".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "name: length");
        assert_eq!(body["errors"][0], "name: length");
    }

    #[tokio::test]
    async fn test_internal_error_attaches_details() {
        let response = AppError::Internal("hash task panicked".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(body["message"], "Internal server error");
        assert_eq!(body["details"], "hash task panicked");
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::NotFound(String::new()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::Unauthorized(String::new()).status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::Forbidden(String::new()).status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            AppError::BadRequest(String::new()).status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_map_db_error_passes_through_non_constraint_errors() {
        let err = map_db_error(sqlx::Error::RowNotFound, "duplicate");
        assert!(matches!(err, AppError::Database(sqlx::Error::RowNotFound)));
    }
}
