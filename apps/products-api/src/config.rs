//! Configuration for Products API

use core_config::{app_info, env_parse, server::ServerConfig, AppInfo, FromEnv};
use database::postgres::PostgresConfig;
use domain_products::DEFAULT_LOW_STOCK_THRESHOLD;

pub use core_config::Environment;

const DEFAULT_PORT: u16 = 8081;

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub database: PostgresConfig,
    pub server: ServerConfig,
    pub environment: Environment,
    /// Apply pending migrations before serving (`RUN_MIGRATIONS`)
    pub run_migrations: bool,
    /// Threshold for stats and the default of `/low-stock` (`LOW_STOCK_THRESHOLD`)
    pub low_stock_threshold: i32,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let database = PostgresConfig::from_env()?;
        let server = ServerConfig::from_env_with_port(DEFAULT_PORT)?;

        let run_migrations = env_parse("RUN_MIGRATIONS", "true")?;
        let low_stock_threshold = env_parse(
            "LOW_STOCK_THRESHOLD",
            &DEFAULT_LOW_STOCK_THRESHOLD.to_string(),
        )?;

        Ok(Self {
            app: app_info!(),
            database,
            server,
            environment,
            run_migrations,
            low_stock_threshold,
        })
    }
}
