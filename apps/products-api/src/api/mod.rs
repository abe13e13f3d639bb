//! API routes module

pub mod products;

use axum::Router;
use database::postgres::DatabaseConnection;

use crate::config::Config;

/// Create all API routes; the caller nests the result under `/api`
pub fn routes(db: &DatabaseConnection, config: &Config) -> Router {
    Router::new().nest("/products", products::router(db, config))
}
