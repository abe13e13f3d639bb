//! # Axum Helpers
//!
//! Shared HTTP plumbing for the services in this workspace.
//!
//! - **[`envelope`]**: the uniform `{timestamp, service, success, message, ...}` body
//! - **[`errors`]**: [`AppError`], [`ErrorCode`] and OpenAPI failure responses
//! - **[`http`]**: CORS and security headers
//! - **[`server`]**: router assembly with API docs, liveness, graceful shutdown
//!
//! ```ignore
//! use axum_helpers::server::{create_production_app, create_router};
//!
//! let router = create_router::<ApiDoc>(api_routes, "my-service")?;
//! create_production_app(router, &config.server, Duration::from_secs(30), async {}).await?;
//! ```

pub mod envelope;
pub mod errors;
pub mod http;
pub mod server;

pub use envelope::{ApiEnvelope, ErrorEnvelope, Pagination, timestamp_now};
pub use errors::{AppError, ErrorCode};
pub use server::{
    HealthResponse, ShutdownCoordinator, create_production_app, create_router, health_router,
    shutdown_signal,
};
pub use http::{cors_layer_from_env, create_cors_layer, create_permissive_cors_layer, security_headers};
