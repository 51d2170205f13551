use std::str::FromStr;
use std::time::Duration;

use anyhow::Context;

use crate::client::{ProductClientConfig, RetryPolicy};

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub max_connections: u32,
    pub product_service: ProductClientConfig,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let retry = RetryPolicy::new(
            parsed_or("PRODUCT_SERVICE_MAX_ATTEMPTS", 3)?,
            Duration::from_millis(parsed_or("PRODUCT_SERVICE_RETRY_DELAY_MS", 500)?),
            Duration::from_millis(parsed_or("PRODUCT_SERVICE_RETRY_DELAY_INCREMENT_MS", 0)?),
        );

        Ok(Self {
            database_url: std::env::var("DATABASE_URL")
                .context("DATABASE_URL must be set")?,
            host: std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: parsed_or("PORT", 8082)?,
            max_connections: parsed_or("DATABASE_MAX_CONNECTIONS", 10)?,
            product_service: ProductClientConfig {
                base_url: std::env::var("PRODUCT_SERVICE_URL")
                    .unwrap_or_else(|_| "http://127.0.0.1:8081/api/v1/products".to_string()),
                api_key: std::env::var("PRODUCT_SERVICE_API_KEY")
                    .context("PRODUCT_SERVICE_API_KEY must be set")?,
                timeout: Duration::from_millis(parsed_or("PRODUCT_SERVICE_TIMEOUT_MS", 2_000)?),
                retry,
            },
        })
    }
}

fn parsed_or<T>(key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .parse()
            .with_context(|| format!("{key} must be a valid number")),
        Err(_) => Ok(default),
    }
}
