use axum::response::{IntoResponse, Response};
use axum_helpers::{AppError, ErrorCode};
use sea_orm::DbErr;
use thiserror::Error;

use crate::SERVICE_NAME;

#[derive(Debug, Error)]
pub enum ProductError {
    /// Rejected input; the message is shown to the client as is
    #[error("{0}")]
    InvalidArgument(String),

    #[error("Producto no encontrado con ID: {0}")]
    NotFound(i64),

    #[error("Ya existe un producto con el nombre: {0}")]
    DuplicateName(String),

    /// Rename onto a name another product already uses
    #[error("Ya existe otro producto con el nombre: {0}")]
    NameTaken(String),

    /// `context` describes the failed operation, `detail` is the store's message
    #[error("{context}: {detail}")]
    StoreUnavailable { context: &'static str, detail: String },
}

pub type ProductResult<T> = Result<T, ProductError>;

impl ProductError {
    pub fn store(detail: impl ToString) -> Self {
        Self::StoreUnavailable {
            context: "Error de acceso a la base de datos",
            detail: detail.to_string(),
        }
    }
}

impl From<DbErr> for ProductError {
    fn from(err: DbErr) -> Self {
        Self::store(err)
    }
}

/// Attach the client-facing description of the operation to store failures.
pub trait StoreContext<T> {
    fn during(self, context: &'static str) -> ProductResult<T>;
}

impl<T> StoreContext<T> for ProductResult<T> {
    fn during(self, context: &'static str) -> ProductResult<T> {
        self.map_err(|err| match err {
            ProductError::StoreUnavailable { detail, .. } => {
                ProductError::StoreUnavailable { context, detail }
            }
            other => other,
        })
    }
}

impl From<ProductError> for AppError {
    fn from(err: ProductError) -> Self {
        match err {
            ProductError::InvalidArgument(msg) => AppError::bad_request(msg),
            err @ ProductError::NotFound(_) => AppError::NotFound(err.to_string()),
            err @ (ProductError::DuplicateName(_) | ProductError::NameTaken(_)) => {
                AppError::Conflict(err.to_string())
            }
            ProductError::StoreUnavailable { context, detail } => AppError::InternalServerError {
                message: context.to_string(),
                detail,
                code: ErrorCode::DatabaseError,
            },
        }
    }
}

impl IntoResponse for ProductError {
    fn into_response(self) -> Response {
        AppError::from(self).into_response_for(SERVICE_NAME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_during_rewrites_only_store_failures() {
        let failed: ProductResult<()> = Err(DbErr::Custom("timeout".into()).into());
        match failed.during("Error al listar productos") {
            Err(ProductError::StoreUnavailable { context, detail }) => {
                assert_eq!(context, "Error al listar productos");
                assert!(detail.contains("timeout"));
            }
            other => panic!("unexpected {other:?}"),
        }

        let missing: ProductResult<()> = Err(ProductError::NotFound(3));
        assert!(matches!(
            missing.during("Error al buscar producto"),
            Err(ProductError::NotFound(3))
        ));
    }

    #[test]
    fn test_status_mapping() {
        let cases = [
            (ProductError::InvalidArgument("x".into()), StatusCode::BAD_REQUEST),
            (ProductError::NotFound(1), StatusCode::NOT_FOUND),
            (ProductError::DuplicateName("Mouse".into()), StatusCode::CONFLICT),
            (ProductError::NameTaken("Mouse".into()), StatusCode::CONFLICT),
            (ProductError::store("down"), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (err, status) in cases {
            assert_eq!(AppError::from(err).status(), status);
        }
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            ProductError::NotFound(42).to_string(),
            "Producto no encontrado con ID: 42"
        );
        assert_eq!(
            ProductError::DuplicateName("Laptop HP".into()).to_string(),
            "Ya existe un producto con el nombre: Laptop HP"
        );
        assert_eq!(
            ProductError::NameTaken("Laptop HP".into()).to_string(),
            "Ya existe otro producto con el nombre: Laptop HP"
        );
    }
}
