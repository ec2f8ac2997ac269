use crate::core::{AppError, Result};
use serde::Deserialize;
use std::env;

pub mod database;
pub mod server;

pub use database::DatabaseConfig;
pub use server::ServerConfig;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub app: AppConfig,
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub abacatepay: GatewayConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub env: String,
    pub log_level: String,
}

/// AbacatePay gateway credentials and endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayConfig {
    pub api_key: String,
    pub webhook_secret: String,
    pub base_url: String,
    pub request_timeout_secs: u64,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        let config = Config {
            app: AppConfig {
                env: env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
                log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            },
            database: DatabaseConfig::from_env()?,
            server: ServerConfig::from_env()?,
            abacatepay: GatewayConfig {
                api_key: env::var("ABACATEPAY_API_KEY").map_err(|_| {
                    AppError::Configuration("ABACATEPAY_API_KEY not set".to_string())
                })?,
                webhook_secret: env::var("ABACATEPAY_WEBHOOK_SECRET").map_err(|_| {
                    AppError::Configuration("ABACATEPAY_WEBHOOK_SECRET not set".to_string())
                })?,
                base_url: env::var("ABACATEPAY_API_URL")
                    .unwrap_or_else(|_| "https://api.abacatepay.com".to_string()),
                request_timeout_secs: env::var("ABACATEPAY_TIMEOUT_SECS")
                    .unwrap_or_else(|_| "15".to_string())
                    .parse()
                    .map_err(|_| {
                        AppError::Configuration("Invalid ABACATEPAY_TIMEOUT_SECS".to_string())
                    })?,
            },
        };

        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.abacatepay.api_key.is_empty() {
            return Err(AppError::Configuration(
                "AbacatePay API key must not be empty".to_string(),
            ));
        }

        if self.abacatepay.webhook_secret.is_empty() {
            return Err(AppError::Configuration(
                "AbacatePay webhook secret must not be empty".to_string(),
            ));
        }

        if self.abacatepay.request_timeout_secs == 0 {
            return Err(AppError::Configuration(
                "Gateway request timeout must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    /// Whether dev-only endpoints (payment simulation) are enabled
    pub fn is_development(&self) -> bool {
        self.app.env != "production"
    }
}
