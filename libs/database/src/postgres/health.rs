use sea_orm::{ConnectionTrait, DatabaseBackend, DatabaseConnection, Statement};

use crate::common::DatabaseError;

/// Product name and version reported by the connected server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerInfo {
    pub product_name: String,
    pub version: String,
}

/// Probe the server and report what it is.
///
/// A successful answer doubles as a connectivity check, so health endpoints
/// only need this one round trip.
pub async fn server_info(db: &DatabaseConnection) -> Result<ServerInfo, DatabaseError> {
    let stmt = Statement::from_string(
        DatabaseBackend::Postgres,
        "SELECT current_setting('server_version') AS server_version".to_owned(),
    );

    let row = db
        .query_one_raw(stmt)
        .await
        .map_err(|e| DatabaseError::HealthCheckFailed(e.to_string()))?
        .ok_or_else(|| DatabaseError::HealthCheckFailed("server returned no version row".into()))?;

    let version: String = row
        .try_get("", "server_version")
        .map_err(|e| DatabaseError::HealthCheckFailed(e.to_string()))?;

    Ok(ServerInfo {
        product_name: product_name(db.get_database_backend()).to_string(),
        version,
    })
}

fn product_name(backend: DatabaseBackend) -> &'static str {
    match backend {
        DatabaseBackend::Postgres => "PostgreSQL",
        DatabaseBackend::MySql => "MySQL",
        DatabaseBackend::Sqlite => "SQLite",
        #[allow(unreachable_patterns)]
        _ => "unknown",
    }
}
