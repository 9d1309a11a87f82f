use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")] Database(#[from] sea_orm::DbErr),

    #[error("Network error: {0}")] Network(String),

    #[error("Parse error: {0}")] Parse(String),

    #[error("Notification error: {0}")] Notification(String),

    #[error("Invalid input: {0}")] InvalidInput(String),

    #[error("Configuration error: {0}")] Config(String),

    #[error("Internal error: {0}")] Internal(String),
}

#[derive(serde::Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(serde::Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

impl AppError {
    fn code(&self) -> &'static str {
        match self {
            AppError::Database(_) => "DATABASE_ERROR",
            AppError::Network(_) => "NETWORK_ERROR",
            AppError::Parse(_) => "PARSE_ERROR",
            AppError::Notification(_) => "NOTIFICATION_ERROR",
            AppError::InvalidInput(_) => "INVALID_INPUT",
            AppError::Config(_) => "CONFIG_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

// Management-surface callers only ever see a coarse failure; the underlying
// cause is logged and stays server-side.
impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        tracing::error!("request failed: {}", self);

        let (status, message) = match &self {
            AppError::InvalidInput(_) => (axum::http::StatusCode::BAD_REQUEST, "invalid input"),
            _ => (axum::http::StatusCode::INTERNAL_SERVER_ERROR, "operation failed"),
        };

        let response = ErrorResponse {
            error: ErrorDetail {
                code: self.code().to_string(),
                message: message.to_string(),
            },
        };

        (status, axum::Json(response)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
