use axum::response::Response;

use super::AppError;

/// Fallback for unmatched routes, rendered as a 404 failure envelope from `service`.
pub fn not_found(service: &str) -> Response {
    AppError::NotFound("The requested route does not exist".to_string()).into_response_for(service)
}
