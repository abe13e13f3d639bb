//! Product Service - Business logic layer

use axum_helpers::{timestamp_now, Pagination};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{info, instrument, warn};

use crate::error::{ProductError, ProductResult, StoreContext};
use crate::models::{
    ApiDocsPayload, DatabaseHealth, DeletedProduct, EndpointDoc, ExampleProduct, HealthReport,
    HealthStatus, InventoryStats, ListParams, LowStockMeta, PriceLeader, Product, ProductPayload,
    SearchMeta,
};
use crate::query::ListQuery;
use crate::repository::ProductRepository;
use crate::validation::{validate_id, validate_payload, validate_search_term};

pub const DEFAULT_LOW_STOCK_THRESHOLD: i32 = 5;

/// Mount point advertised by `docs`
const BASE_URL: &str = "/api/products";

/// Product service providing business logic operations
///
/// Input is validated here before the repository is touched; store failures
/// are tagged with the operation that was running.
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
    low_stock_threshold: i32,
    version: String,
    started_at: Instant,
}

impl<R: ProductRepository> ProductService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
            low_stock_threshold: DEFAULT_LOW_STOCK_THRESHOLD,
            version: env!("CARGO_PKG_VERSION").to_string(),
            started_at: Instant::now(),
        }
    }

    /// Threshold used by `stats` and as the default of `low_stock`
    pub fn with_low_stock_threshold(mut self, threshold: i32) -> Self {
        self.low_stock_threshold = threshold;
        self
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub fn low_stock_threshold(&self) -> i32 {
        self.low_stock_threshold
    }

    /// One sorted page of products plus pagination info
    #[instrument(skip(self))]
    pub async fn list(&self, params: ListParams) -> ProductResult<(Vec<Product>, Pagination)> {
        let query = ListQuery::from_params(&params)?;

        let products = self
            .repository
            .list_page(query)
            .await
            .during("Error al listar productos")?;
        let total = self
            .repository
            .count()
            .await
            .during("Error al listar productos")?;

        info!(count = products.len(), total, page = query.page, "Listed products");
        Ok((products, Pagination::new(query.page, query.size, total)))
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: i64) -> ProductResult<Product> {
        let id = validate_id(id)?;

        self.repository
            .get_by_id(id)
            .await
            .during("Error al buscar producto")?
            .ok_or(ProductError::NotFound(id))
    }

    #[instrument(skip(self, payload))]
    pub async fn create(&self, payload: ProductPayload) -> ProductResult<Product> {
        let product = validate_payload(payload)?;

        if self
            .repository
            .exists_by_name(&product.name, None)
            .await
            .during("Error al crear producto")?
        {
            warn!(name = %product.name, "Rejected duplicate product name");
            return Err(ProductError::DuplicateName(product.name));
        }

        let created = self
            .repository
            .insert(product)
            .await
            .during("Error al crear producto")?;

        info!(product_id = created.id, name = %created.name, "Created product");
        Ok(created)
    }

    #[instrument(skip(self, payload))]
    pub async fn update(&self, id: i64, payload: ProductPayload) -> ProductResult<Product> {
        let id = validate_id(id)?;
        let product = validate_payload(payload)?;

        if self
            .repository
            .get_by_id(id)
            .await
            .during("Error al actualizar producto")?
            .is_none()
        {
            return Err(ProductError::NotFound(id));
        }

        if self
            .repository
            .exists_by_name(&product.name, Some(id))
            .await
            .during("Error al actualizar producto")?
        {
            warn!(product_id = id, name = %product.name, "Rejected duplicate product name");
            return Err(ProductError::NameTaken(product.name));
        }

        let updated = self
            .repository
            .update(id, product)
            .await
            .during("Error al actualizar producto")?
            .ok_or(ProductError::NotFound(id))?;

        info!(product_id = id, "Updated product");
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> ProductResult<DeletedProduct> {
        let id = validate_id(id)?;

        let existing = self
            .repository
            .get_by_id(id)
            .await
            .during("Error al eliminar producto")?
            .ok_or(ProductError::NotFound(id))?;

        if !self
            .repository
            .delete(id)
            .await
            .during("Error al eliminar producto")?
        {
            return Err(ProductError::NotFound(id));
        }

        info!(product_id = id, name = %existing.name, "Deleted product");
        Ok(DeletedProduct {
            id,
            name: existing.name,
        })
    }

    #[instrument(skip(self))]
    pub async fn search(&self, term: Option<String>) -> ProductResult<(Vec<Product>, SearchMeta)> {
        let term = validate_search_term(term.as_deref())?;

        let products = self
            .repository
            .search_by_name(&term)
            .await
            .during("Error en la búsqueda")?;

        info!(term = %term, count = products.len(), "Searched products");
        let meta = SearchMeta {
            term,
            total: products.len(),
        };
        Ok((products, meta))
    }

    #[instrument(skip(self))]
    pub async fn stats(&self) -> ProductResult<InventoryStats> {
        let summary = self
            .repository
            .stock_summary(self.low_stock_threshold)
            .await
            .during("Error al obtener estadísticas")?;
        let most_expensive = self
            .repository
            .most_expensive()
            .await
            .during("Error al obtener estadísticas")?;

        Ok(InventoryStats {
            total_products: summary.total_products,
            total_stock: summary.total_stock,
            total_value: round_cents(summary.total_value),
            low_stock_count: summary.low_stock_count,
            most_expensive: most_expensive.map(PriceLeader::from),
        })
    }

    /// Products strictly below `threshold`, or the configured default
    #[instrument(skip(self))]
    pub async fn low_stock(
        &self,
        threshold: Option<i32>,
    ) -> ProductResult<(Vec<Product>, LowStockMeta)> {
        let threshold = threshold.unwrap_or(self.low_stock_threshold);

        let products = self
            .repository
            .low_stock(threshold)
            .await
            .during("Error al obtener productos con bajo stock")?;

        info!(threshold, count = products.len(), "Listed low stock products");
        let meta = LowStockMeta {
            threshold,
            total: products.len(),
        };
        Ok((products, meta))
    }

    /// Probe the store; never fails, a broken store yields a DOWN report
    #[instrument(skip(self))]
    pub async fn health(&self) -> HealthReport {
        match self.repository.store_info().await {
            Ok(info) => HealthReport {
                status: HealthStatus::Up,
                timestamp: timestamp_now(),
                database: Some(DatabaseHealth {
                    status: "CONNECTED",
                    product_name: info.product_name,
                    version: info.version,
                }),
                version: Some(self.version.clone()),
                uptime: Some(format_uptime(self.started_at.elapsed())),
                error: None,
            },
            Err(err) => {
                let detail = match err {
                    ProductError::StoreUnavailable { detail, .. } => detail,
                    other => other.to_string(),
                };
                warn!(error = %detail, "Health check failed");
                HealthReport {
                    status: HealthStatus::Down,
                    timestamp: timestamp_now(),
                    database: None,
                    version: None,
                    uptime: None,
                    error: Some(detail),
                }
            }
        }
    }

    pub fn docs(&self) -> ApiDocsPayload {
        let endpoints = [
            ("GET", "/api/products", "Listar todos los productos con paginación"),
            ("GET", "/api/products/{id}", "Obtener producto por ID"),
            ("POST", "/api/products", "Crear nuevo producto"),
            ("PUT", "/api/products/{id}", "Actualizar producto existente"),
            ("DELETE", "/api/products/{id}", "Eliminar producto"),
            ("GET", "/api/products/search?nombre={nombre}", "Buscar productos por nombre"),
            ("GET", "/api/products/stats", "Obtener estadísticas del inventario"),
            ("GET", "/api/products/low-stock?limite={limite}", "Productos con bajo stock"),
            ("GET", "/api/products/health", "Estado del servicio"),
            ("GET", "/api/products/docs", "Documentación de la API"),
        ]
        .into_iter()
        .map(|(method, path, description)| EndpointDoc {
            method,
            path,
            description,
        })
        .collect();

        ApiDocsPayload {
            api_name: "Microservicio de Inventario",
            version: self.version.clone(),
            description: "API REST para gestión de productos e inventario",
            base_url: BASE_URL.to_string(),
            endpoints,
            example_product: ExampleProduct {
                nombre: "Laptop HP",
                descripcion: "Laptop para oficina",
                cantidad: 10,
                precio: 850000.50,
            },
        }
    }
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn format_uptime(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    format!("{}h {}m {}s", secs / 3600, (secs % 3600) / 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{StockSummary, StoreInfo, ValidatedProduct};
    use crate::repository::MockProductRepository;
    use serde_json::json;

    fn product(id: i64, name: &str, quantity: i32, price: f64) -> Product {
        Product {
            id,
            name: name.to_string(),
            description: String::new(),
            quantity,
            price,
        }
    }

    fn payload(value: serde_json::Value) -> ProductPayload {
        serde_json::from_value(value).unwrap()
    }

    fn store_down() -> ProductError {
        ProductError::store("connection refused")
    }

    #[tokio::test]
    async fn test_create_rejects_duplicate_name() {
        let mut repo = MockProductRepository::new();
        repo.expect_exists_by_name()
            .withf(|name, exclude| name.to_string() == "Mouse" && exclude.is_none())
            .returning(|_, _| Ok(true));
        repo.expect_insert().never();

        let service = ProductService::new(repo);
        let err = service
            .create(payload(json!({"nombre": " Mouse ", "cantidad": 1, "precio": 1})))
            .await
            .unwrap_err();

        assert!(matches!(err, ProductError::DuplicateName(ref n) if n == "Mouse"));
    }

    #[tokio::test]
    async fn test_create_validates_before_store_access() {
        let mut repo = MockProductRepository::new();
        repo.expect_exists_by_name().never();
        repo.expect_insert().never();

        let service = ProductService::new(repo);
        let err = service
            .create(payload(json!({"nombre": "Mouse", "cantidad": -1, "precio": 1})))
            .await
            .unwrap_err();

        assert!(matches!(err, ProductError::InvalidArgument(_)));
    }

    #[tokio::test]
    async fn test_create_inserts_validated_product() {
        let mut repo = MockProductRepository::new();
        repo.expect_exists_by_name().returning(|_, _| Ok(false));
        repo.expect_insert()
            .withf(|p: &ValidatedProduct| p.name == "Laptop HP" && p.description.is_empty())
            .returning(|p| Ok(p.into_product(1)));

        let service = ProductService::new(repo);
        let created = service
            .create(payload(json!({"nombre": "Laptop HP", "cantidad": 10, "precio": 850000.5})))
            .await
            .unwrap();

        assert_eq!(created, product(1, "Laptop HP", 10, 850000.5));
    }

    #[tokio::test]
    async fn test_get_rejects_non_positive_id_without_store_access() {
        let mut repo = MockProductRepository::new();
        repo.expect_get_by_id().never();

        let service = ProductService::new(repo);
        assert!(matches!(
            service.get(0).await,
            Err(ProductError::InvalidArgument(_))
        ));
    }

    #[tokio::test]
    async fn test_update_missing_product_is_not_found() {
        let mut repo = MockProductRepository::new();
        repo.expect_get_by_id().returning(|_| Ok(None));
        repo.expect_update().never();

        let service = ProductService::new(repo);
        let err = service
            .update(9, payload(json!({"nombre": "X", "cantidad": 1, "precio": 1})))
            .await
            .unwrap_err();

        assert!(matches!(err, ProductError::NotFound(9)));
    }

    #[tokio::test]
    async fn test_update_checks_name_against_other_rows() {
        let mut repo = MockProductRepository::new();
        repo.expect_get_by_id()
            .returning(|id| Ok(Some(product(id, "Mouse", 1, 1.0))));
        repo.expect_exists_by_name()
            .withf(|_, exclude| *exclude == Some(2))
            .returning(|_, _| Ok(false));
        repo.expect_update()
            .returning(|id, p| Ok(Some(p.into_product(id))));

        let service = ProductService::new(repo);
        let updated = service
            .update(2, payload(json!({"nombre": "mouse", "cantidad": 5, "precio": 1})))
            .await
            .unwrap();

        assert_eq!(updated.quantity, 5);
        assert_eq!(updated.name, "mouse");
    }

    #[tokio::test]
    async fn test_update_rejects_name_of_another_product() {
        let mut repo = MockProductRepository::new();
        repo.expect_get_by_id()
            .returning(|id| Ok(Some(product(id, "Teclado", 1, 1.0))));
        repo.expect_exists_by_name()
            .withf(|_, exclude| *exclude == Some(2))
            .returning(|_, _| Ok(true));
        repo.expect_update().never();

        let service = ProductService::new(repo);
        let err = service
            .update(2, payload(json!({"nombre": "Mouse", "cantidad": 1, "precio": 1})))
            .await
            .unwrap_err();

        assert!(matches!(err, ProductError::NameTaken(ref n) if n == "Mouse"));
    }

    #[tokio::test]
    async fn test_delete_reports_removed_name() {
        let mut repo = MockProductRepository::new();
        repo.expect_get_by_id()
            .returning(|id| Ok(Some(product(id, "Teclado", 1, 1.0))));
        repo.expect_delete().returning(|_| Ok(true));

        let service = ProductService::new(repo);
        let deleted = service.delete(4).await.unwrap();

        assert_eq!(
            deleted,
            DeletedProduct {
                id: 4,
                name: "Teclado".into()
            }
        );
    }

    #[tokio::test]
    async fn test_list_tags_store_failures() {
        let mut repo = MockProductRepository::new();
        repo.expect_list_page().returning(|_| Err(store_down()));

        let service = ProductService::new(repo);
        let err = service.list(ListParams::default()).await.unwrap_err();

        assert!(matches!(
            err,
            ProductError::StoreUnavailable { context: "Error al listar productos", .. }
        ));
    }

    #[tokio::test]
    async fn test_list_builds_pagination() {
        let mut repo = MockProductRepository::new();
        repo.expect_list_page()
            .returning(|_| Ok(vec![product(1, "A", 1, 1.0)]));
        repo.expect_count().returning(|| Ok(21));

        let service = ProductService::new(repo);
        let (products, pagination) = service.list(ListParams::default()).await.unwrap();

        assert_eq!(products.len(), 1);
        assert_eq!(pagination, Pagination::new(0, 10, 21));
        assert_eq!(pagination.total_pages, 3);
    }

    #[tokio::test]
    async fn test_stats_rounds_total_value() {
        let mut repo = MockProductRepository::new();
        repo.expect_stock_summary()
            .withf(|threshold| *threshold == 7)
            .returning(|_| {
                Ok(StockSummary {
                    total_products: 2,
                    total_stock: 4,
                    total_value: 10.005_000_1,
                    low_stock_count: 1,
                })
            });
        repo.expect_most_expensive()
            .returning(|| Ok(Some(product(2, "Laptop HP", 1, 9.0))));

        let service = ProductService::new(repo).with_low_stock_threshold(7);
        let stats = service.stats().await.unwrap();

        assert_eq!(stats.total_value, 10.01);
        assert_eq!(stats.low_stock_count, 1);
        assert_eq!(stats.most_expensive.unwrap().id, 2);
    }

    #[tokio::test]
    async fn test_low_stock_defaults_to_configured_threshold() {
        let mut repo = MockProductRepository::new();
        repo.expect_low_stock()
            .withf(|threshold| *threshold == 5)
            .returning(|_| Ok(vec![product(1, "A", 0, 1.0)]));

        let service = ProductService::new(repo);
        let (products, meta) = service.low_stock(None).await.unwrap();

        assert_eq!(products.len(), 1);
        assert_eq!(meta.threshold, 5);
        assert_eq!(meta.total, 1);
    }

    #[tokio::test]
    async fn test_search_requires_term() {
        let mut repo = MockProductRepository::new();
        repo.expect_search_by_name().never();

        let service = ProductService::new(repo);
        assert!(matches!(
            service.search(Some("  ".into())).await,
            Err(ProductError::InvalidArgument(_))
        ));
    }

    #[tokio::test]
    async fn test_health_up() {
        let mut repo = MockProductRepository::new();
        repo.expect_store_info().returning(|| {
            Ok(StoreInfo {
                product_name: "PostgreSQL".into(),
                version: "16.3".into(),
            })
        });

        let service = ProductService::new(repo).with_version("1.0.0");
        let report = service.health().await;

        assert!(report.is_up());
        assert_eq!(report.version.as_deref(), Some("1.0.0"));
        assert_eq!(report.database.unwrap().product_name, "PostgreSQL");
        assert!(report.error.is_none());
    }

    #[tokio::test]
    async fn test_health_down_carries_store_detail() {
        let mut repo = MockProductRepository::new();
        repo.expect_store_info().returning(|| Err(store_down()));

        let report = ProductService::new(repo).health().await;

        assert!(!report.is_up());
        assert!(report.database.is_none());
        assert_eq!(report.error.as_deref(), Some("connection refused"));
    }

    #[test]
    fn test_docs_lists_every_route() {
        let service = ProductService::new(MockProductRepository::new()).with_version("1.0.0");
        let docs = service.docs();

        assert_eq!(docs.api_name, "Microservicio de Inventario");
        assert_eq!(docs.version, "1.0.0");
        assert_eq!(docs.endpoints.len(), 10);
        assert_eq!(docs.example_product.precio, 850000.50);
    }

    #[test]
    fn test_format_uptime() {
        assert_eq!(format_uptime(Duration::from_secs(3_725)), "1h 2m 5s");
        assert_eq!(round_cents(2.675_000_1), 2.68);
    }
}
