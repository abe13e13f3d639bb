pub mod codes;
pub mod handlers;
pub mod responses;

pub use codes::ErrorCode;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::envelope::ErrorEnvelope;

/// Transport-level error every domain error converts into.
///
/// A domain crate maps its own error to one of these variants and calls
/// [`AppError::into_response_for`] with its service name; the rendered body
/// is an [`ErrorEnvelope`].
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppError {
    #[error("Bad Request: {message}")]
    BadRequest { message: String, code: ErrorCode },

    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    /// `detail` is echoed to the client in the envelope's `error` member
    #[error("Internal Server Error: {message}: {detail}")]
    InternalServerError {
        message: String,
        detail: String,
        code: ErrorCode,
    },
}

impl AppError {
    /// 400 with [`ErrorCode::ValidationError`].
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
            code: ErrorCode::ValidationError,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest { .. } => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::InternalServerError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            Self::BadRequest { code, .. } | Self::InternalServerError { code, .. } => *code,
            Self::NotFound(_) => ErrorCode::NotFound,
            Self::Conflict(_) => ErrorCode::Conflict,
        }
    }

    /// Log the failure and render it as an [`ErrorEnvelope`] from `service`.
    pub fn into_response_for(self, service: &str) -> Response {
        let status = self.status();
        let code = self.code();

        let (message, error) = match self {
            AppError::BadRequest { message, .. } => {
                tracing::info!(error_code = code.code(), "Bad request: {}", message);
                (message, None)
            }
            AppError::NotFound(message) => {
                tracing::info!(error_code = code.code(), "Not found: {}", message);
                (message, None)
            }
            AppError::Conflict(message) => {
                tracing::warn!(error_code = code.code(), "Conflict: {}", message);
                (message, None)
            }
            AppError::InternalServerError { message, detail, .. } => {
                tracing::error!(
                    error_code = code.code(),
                    detail = %detail,
                    "Internal server error: {}",
                    message
                );
                (message, Some(detail))
            }
        };

        (status, Json(ErrorEnvelope::new(service, message, error))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_status_and_code_mapping() {
        let cases = [
            (AppError::bad_request("x"), StatusCode::BAD_REQUEST, ErrorCode::ValidationError),
            (AppError::NotFound("x".into()), StatusCode::NOT_FOUND, ErrorCode::NotFound),
            (AppError::Conflict("x".into()), StatusCode::CONFLICT, ErrorCode::Conflict),
        ];

        for (error, status, code) in cases {
            assert_eq!(error.status(), status);
            assert_eq!(error.code(), code);
        }
    }

    #[tokio::test]
    async fn test_bad_request_renders_envelope_without_error_detail() {
        let response = AppError::bad_request("El precio no puede ser negativo")
            .into_response_for("microservicio-inventario");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["service"], "microservicio-inventario");
        assert_eq!(body["message"], "El precio no puede ser negativo");
        assert!(body.get("error").is_none());
        assert!(body.get("data").is_none());
    }

    #[tokio::test]
    async fn test_internal_error_exposes_detail() {
        let response = AppError::InternalServerError {
            message: "Error al listar productos".into(),
            detail: "connection refused".into(),
            code: ErrorCode::DatabaseError,
        }
        .into_response_for("microservicio-inventario");
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(body["message"], "Error al listar productos");
        assert_eq!(body["error"], "connection refused");
    }
}
