/// Error raised by the store helpers.
#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    /// The store answered but the probe query failed
    #[error("Health check failed: {0}")]
    HealthCheckFailed(String),
}
