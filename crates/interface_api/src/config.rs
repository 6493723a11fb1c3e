//! API configuration

use rust_decimal::Decimal;
use serde::Deserialize;

use core_kernel::CoreError;
use domain_pricing::DEFAULT_RECONCILIATION_TOLERANCE;

/// Output format for log lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

/// API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Log level
    pub log_level: String,
    /// Log output format
    pub log_format: LogFormat,
    /// Largest accepted difference between a reported total and the sum
    /// of its parts when parsing rating payloads
    pub reconciliation_tolerance: Decimal,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            reconciliation_tolerance: DEFAULT_RECONCILIATION_TOLERANCE,
        }
    }
}

impl ApiConfig {
    /// Loads configuration from `PRICING_*` environment variables, falling
    /// back to the defaults for anything unset
    pub fn from_env() -> Result<Self, config::ConfigError> {
        let defaults = ApiConfig::default();
        config::Config::builder()
            .set_default("host", defaults.host)?
            .set_default("port", i64::from(defaults.port))?
            .set_default("log_level", defaults.log_level)?
            .set_default("log_format", "pretty")?
            .set_default("reconciliation_tolerance", defaults.reconciliation_tolerance.to_string())?
            .add_source(config::Environment::with_prefix("PRICING"))
            .build()?
            .try_deserialize()
    }

    /// Rejects settings the server cannot run with
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.reconciliation_tolerance.is_sign_negative() {
            return Err(CoreError::configuration(format!(
                "reconciliation_tolerance must not be negative, got {}",
                self.reconciliation_tolerance
            )));
        }
        Ok(())
    }

    /// Returns the server address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
