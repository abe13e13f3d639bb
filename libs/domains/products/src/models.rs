use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// A product row as returned to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    #[schema(example = 1)]
    pub id: i64,
    #[serde(rename = "nombre")]
    #[schema(example = "Laptop HP")]
    pub name: String,
    #[serde(rename = "descripcion")]
    #[schema(example = "Laptop para oficina")]
    pub description: String,
    #[serde(rename = "cantidad")]
    #[schema(example = 10)]
    pub quantity: i32,
    #[serde(rename = "precio")]
    #[schema(example = 850000.5)]
    pub price: f64,
}

/// Body of create and update requests, exactly as the client sent it.
///
/// `cantidad` and `precio` accept either a JSON number or a numeric string,
/// so they stay untyped until [`crate::validation::validate_payload`] runs.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct ProductPayload {
    #[schema(example = "Laptop HP")]
    pub nombre: Option<String>,
    #[schema(example = "Laptop para oficina")]
    pub descripcion: Option<String>,
    #[schema(value_type = Option<i32>, example = 10)]
    pub cantidad: Option<Value>,
    #[schema(value_type = Option<f64>, example = 850000.5)]
    pub precio: Option<Value>,
}

/// A payload that passed every validation rule, trimmed and typed.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedProduct {
    pub name: String,
    pub description: String,
    pub quantity: i32,
    pub price: f64,
}

impl ValidatedProduct {
    pub fn into_product(self, id: i64) -> Product {
        Product {
            id,
            name: self.name,
            description: self.description,
            quantity: self.quantity,
            price: self.price,
        }
    }
}

fn default_size() -> i64 {
    10
}

/// Query string of `GET /products`.
#[derive(Debug, Clone, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListParams {
    /// Zero-based page index
    #[serde(default)]
    #[validate(range(min = 0, message = "El parámetro 'page' no puede ser negativo"))]
    #[param(default = 0, minimum = 0)]
    pub page: i64,

    /// Rows per page
    #[serde(default = "default_size")]
    #[validate(range(min = 1, message = "El parámetro 'size' debe ser mayor que 0"))]
    #[param(default = 10, minimum = 1)]
    pub size: i64,

    /// id, nombre, descripcion, cantidad or precio
    #[serde(rename = "sortBy")]
    #[param(default = "id")]
    pub sort_by: Option<String>,

    /// asc or desc
    #[serde(rename = "sortDir")]
    #[param(default = "asc")]
    pub sort_dir: Option<String>,
}

impl Default for ListParams {
    fn default() -> Self {
        Self {
            page: 0,
            size: default_size(),
            sort_by: None,
            sort_dir: None,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchParams {
    /// Case-insensitive substring of the product name
    pub nombre: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LowStockParams {
    /// Products with `cantidad` strictly below this value are returned
    pub limite: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct SearchMeta {
    #[serde(rename = "termino_busqueda")]
    pub term: String,
    #[serde(rename = "total_encontrados")]
    pub total: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct LowStockMeta {
    #[serde(rename = "limite_stock")]
    pub threshold: i32,
    #[serde(rename = "total_productos_bajo_stock")]
    pub total: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct DeletedProduct {
    #[serde(rename = "id_eliminado")]
    pub id: i64,
    #[serde(rename = "nombre_eliminado")]
    pub name: String,
}

/// Raw aggregates computed by the store in one pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StockSummary {
    pub total_products: u64,
    pub total_stock: i64,
    /// Σ cantidad × precio, unrounded
    pub total_value: f64,
    pub low_stock_count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct PriceLeader {
    pub id: i64,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "precio")]
    pub price: f64,
}

impl From<Product> for PriceLeader {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            name: product.name,
            price: product.price,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct InventoryStats {
    #[serde(rename = "total_productos")]
    pub total_products: u64,
    pub total_stock: i64,
    /// Rounded to two decimals
    #[serde(rename = "valor_total_inventario")]
    pub total_value: f64,
    #[serde(rename = "productos_bajo_stock")]
    pub low_stock_count: u64,
    /// `null` when there are no products
    #[serde(rename = "producto_mas_caro")]
    pub most_expensive: Option<PriceLeader>,
}

/// Product name and version of the backing store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreInfo {
    pub product_name: String,
    pub version: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum HealthStatus {
    Up,
    Down,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct DatabaseHealth {
    #[schema(example = "CONNECTED")]
    pub status: &'static str,
    #[schema(example = "PostgreSQL")]
    pub product_name: String,
    #[schema(example = "16.3")]
    pub version: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct HealthReport {
    pub status: HealthStatus,
    pub timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<DatabaseHealth>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uptime: Option<String>,
    /// Present only when the store could not be reached
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl HealthReport {
    pub fn is_up(&self) -> bool {
        self.status == HealthStatus::Up
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct EndpointDoc {
    pub method: &'static str,
    pub path: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ExampleProduct {
    pub nombre: &'static str,
    pub descripcion: &'static str,
    pub cantidad: i32,
    pub precio: f64,
}

/// Static self-description served at `/products/docs`.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ApiDocsPayload {
    pub api_name: &'static str,
    pub version: String,
    pub description: &'static str,
    pub base_url: String,
    pub endpoints: Vec<EndpointDoc>,
    pub example_product: ExampleProduct,
}
