use crate::exception::Exception;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// Answers exceptions that no registered filter handles
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultExceptionFilter;

impl DefaultExceptionFilter {
    pub fn respond(&self, exception: &Exception) -> Response {
        tracing::error!(
            exception = exception.type_name(),
            "Unhandled exception: {}",
            exception
        );

        let status = StatusCode::INTERNAL_SERVER_ERROR;
        (
            status,
            Json(json!({
                "statusCode": status.as_u16(),
                "message": "Internal Server Error",
                "timestamp": chrono::Utc::now().to_rfc3339(),
            })),
        )
            .into_response()
    }
}
