//! Uniform JSON envelope returned by every endpoint.
//!
//! ```json
//! {
//!   "timestamp": "2025-01-10 14:03:11",
//!   "service": "microservicio-inventario",
//!   "success": true,
//!   "message": "Productos obtenidos exitosamente",
//!   "data": [...],
//!   "pagination": { "page": 0, "size": 10, "total": 42, "totalPages": 5 }
//! }
//! ```
//!
//! Optional members are omitted, never serialized as `null`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use utoipa::ToSchema;

/// Format of [`ApiEnvelope::timestamp`], local time.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Current local time rendered with [`TIMESTAMP_FORMAT`].
pub fn timestamp_now() -> String {
    chrono::Local::now().format(TIMESTAMP_FORMAT).to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Pagination {
    pub page: u64,
    pub size: u64,
    pub total: u64,
    #[serde(rename = "totalPages")]
    pub total_pages: u64,
}

impl Pagination {
    /// `total_pages` is `ceil(total / size)`; a zero size yields zero pages.
    pub fn new(page: u64, size: u64, total: u64) -> Self {
        let total_pages = if size == 0 { 0 } else { total.div_ceil(size) };
        Self {
            page,
            size,
            total,
            total_pages,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ApiEnvelope<T> {
    #[schema(example = "2025-01-10 14:03:11")]
    pub timestamp: String,
    pub service: String,
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub meta: Option<serde_json::Value>,
}

impl<T> ApiEnvelope<T> {
    pub fn new(service: impl Into<String>, success: bool, message: impl Into<String>) -> Self {
        Self {
            timestamp: timestamp_now(),
            service: service.into(),
            success,
            message: message.into(),
            data: None,
            pagination: None,
            meta: None,
        }
    }

    /// Successful envelope carrying `data`.
    pub fn ok(service: impl Into<String>, message: impl Into<String>, data: T) -> Self {
        Self::new(service, true, message).with_data(data)
    }

    pub fn with_data(mut self, data: T) -> Self {
        self.data = Some(data);
        self
    }

    pub fn with_pagination(mut self, pagination: Pagination) -> Self {
        self.pagination = Some(pagination);
        self
    }

    /// Attach a free-form `meta` object. Values that fail to serialize are dropped.
    pub fn with_meta<M: Serialize>(mut self, meta: M) -> Self {
        self.meta = serde_json::to_value(meta).ok();
        self
    }
}

impl<T: Serialize> ApiEnvelope<T> {
    /// Pair the envelope with a status code.
    pub fn into_response_with(self, status: StatusCode) -> Response {
        (status, Json(self)).into_response()
    }
}

impl<T: Serialize> IntoResponse for ApiEnvelope<T> {
    fn into_response(self) -> Response {
        self.into_response_with(StatusCode::OK)
    }
}

/// Body of every failed request: an envelope without `data`.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ErrorEnvelope {
    #[schema(example = "2025-01-10 14:03:11")]
    pub timestamp: String,
    pub service: String,
    #[schema(example = false)]
    pub success: bool,
    pub message: String,
    /// Underlying failure detail, only present for store failures
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ErrorEnvelope {
    pub fn new(service: impl Into<String>, message: impl Into<String>, error: Option<String>) -> Self {
        Self {
            timestamp: timestamp_now(),
            service: service.into(),
            success: false,
            message: message.into(),
            error,
        }
    }
}
