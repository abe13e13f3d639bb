//! Products Domain
//!
//! Inventory of products stored in the PostgreSQL `productos` table, exposed
//! as a REST API wrapped in the shared response envelope.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints, envelope rendering
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Validation, uniqueness, stats
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access (trait + PostgreSQL / in-memory)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Entity    │  ← SeaORM model of `productos`
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use axum::Router;
//! use domain_products::{handlers, PgProductRepository, ProductService};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let db = sea_orm::Database::connect("postgres://localhost/inventario").await?;
//!
//! let service = ProductService::new(PgProductRepository::new(db));
//! let api: Router = Router::new().nest("/products", handlers::router(service));
//! # Ok(())
//! # }
//! ```

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod query;
pub mod repository;
pub mod service;
pub mod validation;

/// Value of the `service` member of every response envelope
pub const SERVICE_NAME: &str = "microservicio-inventario";

pub use error::{ProductError, ProductResult};
pub use handlers::ApiDoc;
pub use models::{Product, ProductPayload, ValidatedProduct};
pub use postgres::PgProductRepository;
pub use query::{ListQuery, SortDirection, SortField};
pub use repository::{InMemoryProductRepository, ProductRepository};
pub use service::{ProductService, DEFAULT_LOW_STOCK_THRESHOLD};
