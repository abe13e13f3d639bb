use async_trait::async_trait;
use database::postgres::server_info;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, DbBackend, DbErr, EntityTrait, FromQueryResult,
    PaginatorTrait, QueryOrder, QuerySelect, Statement,
};

use crate::entity::{self, ActiveModel, Entity as Productos};
use crate::error::{ProductError, ProductResult};
use crate::models::{Product, StockSummary, StoreInfo, ValidatedProduct};
use crate::query::{escape_like, ListQuery, SortField};
use crate::repository::ProductRepository;

/// PostgreSQL implementation of ProductRepository using SeaORM
#[derive(Clone)]
pub struct PgProductRepository {
    db: DatabaseConnection,
}

impl PgProductRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[derive(Debug, FromQueryResult)]
struct CountRow {
    total: i64,
}

#[derive(Debug, FromQueryResult)]
struct SummaryRow {
    total_products: i64,
    total_stock: i64,
    total_value: f64,
    low_stock_count: i64,
}

impl From<SummaryRow> for StockSummary {
    fn from(row: SummaryRow) -> Self {
        Self {
            total_products: row.total_products.max(0) as u64,
            total_stock: row.total_stock,
            total_value: row.total_value,
            low_stock_count: row.low_stock_count.max(0) as u64,
        }
    }
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn list_page(&self, query: ListQuery) -> ProductResult<Vec<Product>> {
        let mut select = Productos::find().order_by(query.sort.column(), query.direction.into());
        if query.sort != SortField::Id {
            select = select.order_by_asc(entity::Column::Id);
        }

        let rows = select
            .offset(query.window.offset())
            .limit(query.window.limit())
            .all(&self.db)
            .await?;

        Ok(rows.into_iter().map(Product::from).collect())
    }

    async fn count(&self) -> ProductResult<u64> {
        Ok(Productos::find().count(&self.db).await?)
    }

    async fn get_by_id(&self, id: i64) -> ProductResult<Option<Product>> {
        let row = Productos::find_by_id(id).one(&self.db).await?;
        Ok(row.map(Product::from))
    }

    async fn exists_by_name(&self, name: &str, exclude_id: Option<i64>) -> ProductResult<bool> {
        let stmt = match exclude_id {
            Some(id) => Statement::from_sql_and_values(
                DbBackend::Postgres,
                "SELECT COUNT(*) AS total FROM productos WHERE UPPER(nombre) = UPPER($1) AND id <> $2",
                [name.into(), id.into()],
            ),
            None => Statement::from_sql_and_values(
                DbBackend::Postgres,
                "SELECT COUNT(*) AS total FROM productos WHERE UPPER(nombre) = UPPER($1)",
                [name.into()],
            ),
        };

        let row = CountRow::find_by_statement(stmt).one(&self.db).await?;
        Ok(row.is_some_and(|r| r.total > 0))
    }

    async fn insert(&self, product: ValidatedProduct) -> ProductResult<Product> {
        let model = ActiveModel::for_insert(product).insert(&self.db).await?;
        Ok(model.into())
    }

    async fn update(&self, id: i64, product: ValidatedProduct) -> ProductResult<Option<Product>> {
        match ActiveModel::for_update(id, product).update(&self.db).await {
            Ok(model) => Ok(Some(model.into())),
            Err(DbErr::RecordNotUpdated) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn delete(&self, id: i64) -> ProductResult<bool> {
        let result = Productos::delete_by_id(id).exec(&self.db).await?;
        Ok(result.rows_affected > 0)
    }

    async fn search_by_name(&self, term: &str) -> ProductResult<Vec<Product>> {
        let pattern = format!("%{}%", escape_like(term));
        let stmt = Statement::from_sql_and_values(
            DbBackend::Postgres,
            r#"
                SELECT id, nombre, descripcion, cantidad, precio
                FROM productos
                WHERE UPPER(nombre) LIKE UPPER($1) ESCAPE '\'
                ORDER BY nombre ASC, id ASC
            "#,
            [pattern.into()],
        );

        let rows = entity::Model::find_by_statement(stmt).all(&self.db).await?;
        Ok(rows.into_iter().map(Product::from).collect())
    }

    async fn low_stock(&self, threshold: i32) -> ProductResult<Vec<Product>> {
        let stmt = Statement::from_sql_and_values(
            DbBackend::Postgres,
            r#"
                SELECT id, nombre, descripcion, cantidad, precio
                FROM productos
                WHERE cantidad < $1
                ORDER BY cantidad ASC, id ASC
            "#,
            [threshold.into()],
        );

        let rows = entity::Model::find_by_statement(stmt).all(&self.db).await?;
        Ok(rows.into_iter().map(Product::from).collect())
    }

    async fn stock_summary(&self, low_stock_threshold: i32) -> ProductResult<StockSummary> {
        let stmt = Statement::from_sql_and_values(
            DbBackend::Postgres,
            r#"
                SELECT
                    COUNT(*) AS total_products,
                    COALESCE(SUM(cantidad), 0)::BIGINT AS total_stock,
                    COALESCE(SUM(cantidad * precio), 0)::DOUBLE PRECISION AS total_value,
                    COUNT(*) FILTER (WHERE cantidad < $1) AS low_stock_count
                FROM productos
            "#,
            [low_stock_threshold.into()],
        );

        let row = SummaryRow::find_by_statement(stmt).one(&self.db).await?;
        Ok(row.map(StockSummary::from).unwrap_or_default())
    }

    async fn most_expensive(&self) -> ProductResult<Option<Product>> {
        let row = Productos::find()
            .order_by_desc(entity::Column::Price)
            .order_by_asc(entity::Column::Id)
            .one(&self.db)
            .await?;

        Ok(row.map(Product::from))
    }

    async fn store_info(&self) -> ProductResult<StoreInfo> {
        let info = server_info(&self.db).await.map_err(ProductError::store)?;
        Ok(StoreInfo {
            product_name: info.product_name,
            version: info.version,
        })
    }
}
