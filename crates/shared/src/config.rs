//! Application configuration management.

use rust_decimal::Decimal;
use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Invoice calculation and numbering configuration.
    #[serde(default)]
    pub invoicing: InvoicingConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Invoicing configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct InvoicingConfig {
    /// Prefix used when a caller does not supply its own numbering record.
    #[serde(default = "default_number_prefix")]
    pub number_prefix: String,
    /// Zero-padding width of the sequence part of an invoice number.
    #[serde(default = "default_number_padding")]
    pub number_padding: usize,
    /// Maximum number of line items accepted per calculation request.
    #[serde(default = "default_max_line_items")]
    pub max_line_items: usize,
    /// Largest magnitude accepted for any single amount or quantity.
    #[serde(default = "default_max_amount")]
    pub max_amount: Decimal,
    /// Highest tax rate accepted on a line, as a percentage.
    #[serde(default = "default_max_tax_rate")]
    pub max_tax_rate: Decimal,
}

impl Default for InvoicingConfig {
    fn default() -> Self {
        Self {
            number_prefix: default_number_prefix(),
            number_padding: default_number_padding(),
            max_line_items: default_max_line_items(),
            max_amount: default_max_amount(),
            max_tax_rate: default_max_tax_rate(),
        }
    }
}

fn default_number_prefix() -> String {
    "INV".to_string()
}

fn default_number_padding() -> usize {
    4
}

fn default_max_line_items() -> usize {
    500
}

fn default_max_amount() -> Decimal {
    Decimal::from(1_000_000_000_000_i64)
}

fn default_max_tax_rate() -> Decimal {
    Decimal::ONE_THOUSAND
}

/// Logging configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoggingConfig {
    /// Emit JSON log lines instead of the human-readable format.
    #[serde(default)]
    pub json: bool,
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("INVOICER").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
