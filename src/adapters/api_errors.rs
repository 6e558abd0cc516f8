use crate::domain::error::SyncError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

// Обертка (Newtype) для доменной ошибки, чтобы реализовать для нее трейт Axum
pub struct ApiError(pub SyncError);

// Автоматическая конвертация SyncError -> ApiError, чтобы хендлеры писали `?`
impl From<SyncError> for ApiError {
    fn from(error: SyncError) -> Self {
        Self(error)
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(error: serde_json::Error) -> Self {
        Self(SyncError::Serialization(error))
    }
}

// Вся логика HTTP-ответов живет в слое адаптеров
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match &self.0 {
            SyncError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "unauthorized",
                self.0.to_string(),
            ),
            SyncError::InvalidRequest(msg) => {
                (StatusCode::BAD_REQUEST, "invalid_request", msg.clone())
            }
            SyncError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found", self.0.to_string()),
            SyncError::Cancelled => (
                StatusCode::SERVICE_UNAVAILABLE,
                "shutting_down",
                self.0.to_string(),
            ),
            SyncError::Platform(err) => {
                tracing::error!("platform error: {err}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "internal error".to_string(),
                )
            }
            SyncError::Database(err) => {
                tracing::error!("database error: {err}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "internal error".to_string(),
                )
            }
            SyncError::Serialization(err) => {
                tracing::error!("serialization error: {err}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "internal error".to_string(),
                )
            }
            SyncError::Webhook(err) => {
                tracing::error!("webhook error: {err}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "internal error".to_string(),
                )
            }
            SyncError::PageLimit(cap) => {
                tracing::error!("import exceeded the page cap of {cap}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "internal error".to_string(),
                )
            }
        };

        let body = serde_json::json!({
            "error_code": error_code,
            "message": message,
        });

        (status, Json(body)).into_response()
    }
}
