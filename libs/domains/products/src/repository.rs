use async_trait::async_trait;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::ProductResult;
use crate::models::{Product, StockSummary, StoreInfo, ValidatedProduct};
use crate::query::{ListQuery, SortDirection, SortField};

/// Data access for the `productos` table
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// One page of products, sorted by the requested column then by id
    async fn list_page(&self, query: ListQuery) -> ProductResult<Vec<Product>>;

    /// Number of stored products
    async fn count(&self) -> ProductResult<u64>;

    async fn get_by_id(&self, id: i64) -> ProductResult<Option<Product>>;

    /// Case-insensitive name lookup, optionally ignoring one row
    async fn exists_by_name(&self, name: &str, exclude_id: Option<i64>) -> ProductResult<bool>;

    /// Store a new product and return it with its assigned id
    async fn insert(&self, product: ValidatedProduct) -> ProductResult<Product>;

    /// Replace every mutable column; `None` when the row is gone
    async fn update(&self, id: i64, product: ValidatedProduct) -> ProductResult<Option<Product>>;

    /// `true` if a row was removed
    async fn delete(&self, id: i64) -> ProductResult<bool>;

    /// Products whose name contains `term`, case-insensitive, ordered by name then id
    async fn search_by_name(&self, term: &str) -> ProductResult<Vec<Product>>;

    /// Products with `cantidad < threshold`, ordered by quantity then id
    async fn low_stock(&self, threshold: i32) -> ProductResult<Vec<Product>>;

    /// Counts and sums over the whole table
    async fn stock_summary(&self, low_stock_threshold: i32) -> ProductResult<StockSummary>;

    /// Highest price; ties go to the lowest id
    async fn most_expensive(&self) -> ProductResult<Option<Product>>;

    /// Product name and version of the backing store
    async fn store_info(&self) -> ProductResult<StoreInfo>;
}

#[derive(Debug)]
struct Inner {
    rows: BTreeMap<i64, Product>,
    next_id: i64,
}

impl Default for Inner {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
            next_id: 1,
        }
    }
}

/// In-memory implementation of ProductRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryProductRepository {
    inner: Arc<RwLock<Inner>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn same_name(a: &str, b: &str) -> bool {
    a.to_uppercase() == b.to_uppercase()
}

fn compare_by(field: SortField, a: &Product, b: &Product) -> Ordering {
    match field {
        SortField::Id => a.id.cmp(&b.id),
        SortField::Name => a.name.cmp(&b.name),
        SortField::Description => a.description.cmp(&b.description),
        SortField::Quantity => a.quantity.cmp(&b.quantity),
        SortField::Price => a.price.total_cmp(&b.price),
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn list_page(&self, query: ListQuery) -> ProductResult<Vec<Product>> {
        let inner = self.inner.read().await;

        let mut rows: Vec<Product> = inner.rows.values().cloned().collect();
        rows.sort_by(|a, b| {
            let primary = compare_by(query.sort, a, b);
            let primary = match query.direction {
                SortDirection::Asc => primary,
                SortDirection::Desc => primary.reverse(),
            };
            primary.then_with(|| a.id.cmp(&b.id))
        });

        Ok(query.window.slice(&rows).to_vec())
    }

    async fn count(&self) -> ProductResult<u64> {
        Ok(self.inner.read().await.rows.len() as u64)
    }

    async fn get_by_id(&self, id: i64) -> ProductResult<Option<Product>> {
        Ok(self.inner.read().await.rows.get(&id).cloned())
    }

    async fn exists_by_name(&self, name: &str, exclude_id: Option<i64>) -> ProductResult<bool> {
        let inner = self.inner.read().await;
        Ok(inner
            .rows
            .values()
            .any(|p| same_name(&p.name, name) && Some(p.id) != exclude_id))
    }

    async fn insert(&self, product: ValidatedProduct) -> ProductResult<Product> {
        let mut inner = self.inner.write().await;

        let id = inner.next_id;
        inner.next_id += 1;
        let product = product.into_product(id);
        inner.rows.insert(id, product.clone());

        tracing::debug!(product_id = id, "Inserted product");
        Ok(product)
    }

    async fn update(&self, id: i64, product: ValidatedProduct) -> ProductResult<Option<Product>> {
        let mut inner = self.inner.write().await;

        Ok(inner.rows.get_mut(&id).map(|row| {
            *row = product.into_product(id);
            row.clone()
        }))
    }

    async fn delete(&self, id: i64) -> ProductResult<bool> {
        Ok(self.inner.write().await.rows.remove(&id).is_some())
    }

    async fn search_by_name(&self, term: &str) -> ProductResult<Vec<Product>> {
        let inner = self.inner.read().await;
        let needle = term.to_uppercase();

        let mut found: Vec<Product> = inner
            .rows
            .values()
            .filter(|p| p.name.to_uppercase().contains(&needle))
            .cloned()
            .collect();
        found.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));

        Ok(found)
    }

    async fn low_stock(&self, threshold: i32) -> ProductResult<Vec<Product>> {
        let inner = self.inner.read().await;

        let mut found: Vec<Product> = inner
            .rows
            .values()
            .filter(|p| p.quantity < threshold)
            .cloned()
            .collect();
        found.sort_by(|a, b| a.quantity.cmp(&b.quantity).then_with(|| a.id.cmp(&b.id)));

        Ok(found)
    }

    async fn stock_summary(&self, low_stock_threshold: i32) -> ProductResult<StockSummary> {
        let inner = self.inner.read().await;

        Ok(inner
            .rows
            .values()
            .fold(StockSummary::default(), |mut acc, p| {
                acc.total_products += 1;
                acc.total_stock += i64::from(p.quantity);
                acc.total_value += f64::from(p.quantity) * p.price;
                if p.quantity < low_stock_threshold {
                    acc.low_stock_count += 1;
                }
                acc
            }))
    }

    async fn most_expensive(&self) -> ProductResult<Option<Product>> {
        let inner = self.inner.read().await;

        // Rows iterate in id order, so the first maximum wins
        let mut leader: Option<&Product> = None;
        for product in inner.rows.values() {
            if leader.is_none_or(|best| product.price > best.price) {
                leader = Some(product);
            }
        }

        Ok(leader.cloned())
    }

    async fn store_info(&self) -> ProductResult<StoreInfo> {
        Ok(StoreInfo {
            product_name: "In-Memory".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ListParams;

    fn product(name: &str, quantity: i32, price: f64) -> ValidatedProduct {
        ValidatedProduct {
            name: name.to_string(),
            description: String::new(),
            quantity,
            price,
        }
    }

    fn query(page: i64, size: i64, sort_by: &str, sort_dir: &str) -> ListQuery {
        ListQuery::from_params(&ListParams {
            page,
            size,
            sort_by: Some(sort_by.to_string()),
            sort_dir: Some(sort_dir.to_string()),
        })
        .unwrap()
    }

    async fn seeded() -> InMemoryProductRepository {
        let repo = InMemoryProductRepository::new();
        repo.insert(product("Teclado", 3, 25.0)).await.unwrap();
        repo.insert(product("Laptop HP", 10, 850000.5)).await.unwrap();
        repo.insert(product("Mouse", 3, 9.99)).await.unwrap();
        repo.insert(product("Monitor", 0, 850000.5)).await.unwrap();
        repo
    }

    #[tokio::test]
    async fn test_insert_assigns_increasing_ids() {
        let repo = seeded().await;
        let created = repo.insert(product("Cable", 1, 1.0)).await.unwrap();
        assert_eq!(created.id, 5);

        // Ids are not reused after delete
        assert!(repo.delete(5).await.unwrap());
        let created = repo.insert(product("Cable", 1, 1.0)).await.unwrap();
        assert_eq!(created.id, 6);
    }

    #[tokio::test]
    async fn test_list_page_sorts_with_id_tiebreak() {
        let repo = seeded().await;

        let page = repo.list_page(query(0, 10, "cantidad", "asc")).await.unwrap();
        let ids: Vec<i64> = page.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![4, 1, 3, 2]);

        let page = repo.list_page(query(0, 10, "precio", "desc")).await.unwrap();
        let ids: Vec<i64> = page.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![2, 4, 1, 3]);
    }

    #[tokio::test]
    async fn test_list_page_window() {
        let repo = seeded().await;

        let page = repo.list_page(query(1, 3, "id", "asc")).await.unwrap();
        assert_eq!(page.len(), 1);
        assert_eq!(page[0].id, 4);

        let page = repo.list_page(query(5, 3, "id", "asc")).await.unwrap();
        assert!(page.is_empty());
    }

    #[tokio::test]
    async fn test_exists_by_name_ignores_case_and_excluded_row() {
        let repo = seeded().await;

        assert!(repo.exists_by_name("MOUSE", None).await.unwrap());
        assert!(!repo.exists_by_name("mouse", Some(3)).await.unwrap());
        assert!(repo.exists_by_name("mouse", Some(1)).await.unwrap());
        assert!(!repo.exists_by_name("Parlante", None).await.unwrap());
    }

    #[tokio::test]
    async fn test_update_and_delete_missing_rows() {
        let repo = seeded().await;

        assert!(repo.update(99, product("X", 1, 1.0)).await.unwrap().is_none());
        assert!(!repo.delete(99).await.unwrap());

        let updated = repo.update(3, product("Mouse Pro", 8, 19.9)).await.unwrap().unwrap();
        assert_eq!(updated.name, "Mouse Pro");
        assert_eq!(repo.get_by_id(3).await.unwrap(), Some(updated));
    }

    #[tokio::test]
    async fn test_search_and_low_stock_ordering() {
        let repo = seeded().await;

        let found = repo.search_by_name("mo").await.unwrap();
        let names: Vec<&str> = found.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Monitor", "Mouse"]);

        let low = repo.low_stock(5).await.unwrap();
        let ids: Vec<i64> = low.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![4, 1, 3]);
    }

    #[tokio::test]
    async fn test_summary_and_price_leader() {
        let repo = seeded().await;

        let summary = repo.stock_summary(5).await.unwrap();
        assert_eq!(summary.total_products, 4);
        assert_eq!(summary.total_stock, 16);
        assert_eq!(summary.low_stock_count, 3);
        assert!((summary.total_value - (75.0 + 8_505_005.0 + 29.97)).abs() < 1e-6);

        // Two products share the top price; the lower id wins
        let leader = repo.most_expensive().await.unwrap().unwrap();
        assert_eq!(leader.id, 2);

        assert!(InMemoryProductRepository::new().most_expensive().await.unwrap().is_none());
    }
}
