//! HTTP handlers for Products API

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use axum_helpers::{
    errors::responses::{
        BadRequestResponse, ConflictResponse, InternalServerErrorResponse, NotFoundResponse,
    },
    ApiEnvelope, ErrorEnvelope, Pagination,
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::{ProductError, ProductResult};
use crate::models::{
    ApiDocsPayload, DatabaseHealth, DeletedProduct, EndpointDoc, ExampleProduct, HealthReport,
    HealthStatus, InventoryStats, ListParams, LowStockMeta, LowStockParams, PriceLeader, Product,
    ProductPayload, SearchMeta, SearchParams,
};
use crate::repository::ProductRepository;
use crate::service::ProductService;
use crate::validation::INVALID_ID;
use crate::SERVICE_NAME;

/// OpenAPI documentation for Products API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_products,
        create_product,
        get_product,
        update_product,
        delete_product,
        search_products,
        get_stats,
        get_low_stock,
        health_check,
        api_docs,
    ),
    components(
        schemas(
            Product, ProductPayload, DeletedProduct, SearchMeta, LowStockMeta,
            InventoryStats, PriceLeader, HealthReport, HealthStatus, DatabaseHealth,
            ApiDocsPayload, EndpointDoc, ExampleProduct, Pagination, ErrorEnvelope
        ),
        responses(
            BadRequestResponse,
            NotFoundResponse,
            ConflictResponse,
            InternalServerErrorResponse,
        )
    ),
    tags(
        (name = "Products", description = "Inventario de productos")
    )
)]
pub struct ApiDoc;

/// Create the products router; mount it under `/products`
pub fn router<R: ProductRepository + 'static>(service: ProductService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_products).post(create_product))
        .route("/search", get(search_products))
        .route("/stats", get(get_stats))
        .route("/low-stock", get(get_low_stock))
        .route("/health", get(health_check))
        .route("/docs", get(api_docs))
        .route(
            "/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
        .with_state(shared_service)
}

fn envelope<T>(message: &str, data: T) -> ApiEnvelope<T> {
    ApiEnvelope::ok(SERVICE_NAME, message, data)
}

fn path_id(path: Result<Path<i64>, PathRejection>) -> ProductResult<i64> {
    path.map(|Path(id)| id)
        .map_err(|_| ProductError::InvalidArgument(INVALID_ID.to_string()))
}

fn query_params<T>(query: Result<Query<T>, QueryRejection>) -> ProductResult<T> {
    query.map(|Query(params)| params).map_err(|rejection| {
        ProductError::InvalidArgument(format!(
            "Parámetros de consulta inválidos: {}",
            rejection.body_text()
        ))
    })
}

fn json_body(body: Result<Json<ProductPayload>, JsonRejection>) -> ProductResult<ProductPayload> {
    body.map(|Json(payload)| payload).map_err(|rejection| {
        ProductError::InvalidArgument(format!("Cuerpo JSON inválido: {}", rejection.body_text()))
    })
}

/// List products, one page at a time
#[utoipa::path(
    get,
    path = "",
    tag = "Products",
    params(ListParams),
    responses(
        (status = 200, description = "Productos obtenidos exitosamente", body = ApiEnvelope<Vec<Product>>),
        (status = 400, response = BadRequestResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_products<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    query: Result<Query<ListParams>, QueryRejection>,
) -> ProductResult<ApiEnvelope<Vec<Product>>> {
    let (products, pagination) = service.list(query_params(query)?).await?;
    Ok(envelope("Productos obtenidos exitosamente", products).with_pagination(pagination))
}

/// Create a new product
#[utoipa::path(
    post,
    path = "",
    tag = "Products",
    request_body = ProductPayload,
    responses(
        (status = 201, description = "Producto creado exitosamente", body = ApiEnvelope<Product>),
        (status = 400, response = BadRequestResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    body: Result<Json<ProductPayload>, JsonRejection>,
) -> ProductResult<Response> {
    let product = service.create(json_body(body)?).await?;
    Ok(envelope("Producto creado exitosamente", product).into_response_with(StatusCode::CREATED))
}

/// Get a product by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Products",
    params(
        ("id" = i64, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Producto encontrado", body = ApiEnvelope<Product>),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    path: Result<Path<i64>, PathRejection>,
) -> ProductResult<ApiEnvelope<Product>> {
    let product = service.get(path_id(path)?).await?;
    Ok(envelope("Producto encontrado", product))
}

/// Replace every field of a product
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Products",
    params(
        ("id" = i64, Path, description = "Product ID")
    ),
    request_body = ProductPayload,
    responses(
        (status = 200, description = "Producto actualizado exitosamente", body = ApiEnvelope<Product>),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    path: Result<Path<i64>, PathRejection>,
    body: Result<Json<ProductPayload>, JsonRejection>,
) -> ProductResult<ApiEnvelope<Product>> {
    let id = path_id(path)?;
    let product = service.update(id, json_body(body)?).await?;
    Ok(envelope("Producto actualizado exitosamente", product))
}

/// Delete a product
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Products",
    params(
        ("id" = i64, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Producto eliminado exitosamente", body = ApiEnvelope<DeletedProduct>),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    path: Result<Path<i64>, PathRejection>,
) -> ProductResult<ApiEnvelope<DeletedProduct>> {
    let deleted = service.delete(path_id(path)?).await?;
    Ok(envelope("Producto eliminado exitosamente", deleted))
}

/// Case-insensitive search by name
#[utoipa::path(
    get,
    path = "/search",
    tag = "Products",
    params(SearchParams),
    responses(
        (status = 200, description = "Búsqueda completada exitosamente", body = ApiEnvelope<Vec<Product>>),
        (status = 400, response = BadRequestResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn search_products<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    query: Result<Query<SearchParams>, QueryRejection>,
) -> ProductResult<ApiEnvelope<Vec<Product>>> {
    let params = query_params(query)?;
    let (products, meta) = service.search(params.nombre).await?;
    Ok(envelope("Búsqueda completada exitosamente", products).with_meta(meta))
}

/// Inventory totals
#[utoipa::path(
    get,
    path = "/stats",
    tag = "Products",
    responses(
        (status = 200, description = "Estadísticas obtenidas exitosamente", body = ApiEnvelope<InventoryStats>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_stats<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
) -> ProductResult<ApiEnvelope<InventoryStats>> {
    let stats = service.stats().await?;
    Ok(envelope("Estadísticas obtenidas exitosamente", stats))
}

/// Products running out of stock
#[utoipa::path(
    get,
    path = "/low-stock",
    tag = "Products",
    params(LowStockParams),
    responses(
        (status = 200, description = "Productos con bajo stock obtenidos exitosamente", body = ApiEnvelope<Vec<Product>>),
        (status = 400, response = BadRequestResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_low_stock<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    query: Result<Query<LowStockParams>, QueryRejection>,
) -> ProductResult<ApiEnvelope<Vec<Product>>> {
    let params = query_params(query)?;
    let (products, meta) = service.low_stock(params.limite).await?;
    Ok(envelope("Productos con bajo stock obtenidos exitosamente", products).with_meta(meta))
}

/// Store connectivity probe
#[utoipa::path(
    get,
    path = "/health",
    tag = "Products",
    responses(
        (status = 200, description = "Servicio funcionando correctamente", body = ApiEnvelope<HealthReport>),
        (status = 503, description = "Servicio con problemas", body = ApiEnvelope<HealthReport>)
    )
)]
async fn health_check<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
) -> Response {
    let report = service.health().await;

    if report.is_up() {
        envelope("Servicio funcionando correctamente", report).into_response()
    } else {
        ApiEnvelope::new(SERVICE_NAME, false, "Servicio con problemas")
            .with_data(report)
            .into_response_with(StatusCode::SERVICE_UNAVAILABLE)
    }
}

/// Static description of this API
#[utoipa::path(
    get,
    path = "/docs",
    tag = "Products",
    responses(
        (status = 200, description = "API self-description", body = ApiDocsPayload)
    )
)]
async fn api_docs<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
) -> Json<ApiDocsPayload> {
    Json(service.docs())
}
