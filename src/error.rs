use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::{error, warn};

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Request input was missing or unusable.
    #[error("{0}")]
    Validation(String),

    /// Anything the database reported while running a statement.
    #[error("{0}")]
    Backend(#[from] sqlx::Error),

    /// The health probe could not reach the database.
    #[error("{0}")]
    Unhealthy(sqlx::Error),
}

impl AppError {
    pub fn missing_fields() -> Self {
        Self::Validation("Missing required fields".to_string())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Backend(_) | Self::Unhealthy(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.to_string();

        let body = match &self {
            Self::Validation(_) => json!({ "error": message }),
            Self::Backend(err) => {
                error!(error = %err, "Database error");
                json!({ "error": message })
            }
            Self::Unhealthy(err) => {
                warn!(error = %err, "Health check failed");
                json!({ "status": "unhealthy", "error": message })
            }
        };

        (status, Json(body)).into_response()
    }
}
