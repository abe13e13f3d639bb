//! Products API routes

use axum::Router;
use database::postgres::DatabaseConnection;
use domain_products::{handlers, PgProductRepository, ProductService};
use tracing::info;

use crate::config::Config;

/// Create products router
pub fn router(db: &DatabaseConnection, config: &Config) -> Router {
    let repository = PgProductRepository::new(db.clone());
    let service = ProductService::new(repository)
        .with_low_stock_threshold(config.low_stock_threshold)
        .with_version(config.app.version);

    let base = format!("http://localhost:{}", config.server.port);
    for endpoint in service.docs().endpoints {
        info!(method = endpoint.method, "{base}{} - {}", endpoint.path, endpoint.description);
    }

    handlers::router(service)
}
