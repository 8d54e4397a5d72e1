use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use crate::metrics::{DEFAULT_CHART_KEYWORDS, DEFAULT_VAT_RATE, URGENCY_WINDOW_DAYS};
use crate::price::PriceLocale;

/// Runtime settings for the whole system.
///
/// Loaded from an optional `config/workshop.toml`, overlaid by
/// `WORKSHOP__*` environment variables (e.g. `WORKSHOP__VAT_RATE=0.18`).
/// Every field has a default.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SystemConfig {
    /// Channel capacity of each store actor.
    pub buffer_size: usize,
    pub notification_buffer: usize,
    pub vat_rate: f64,
    pub urgency_window_days: i64,
    pub min_phone_digits: usize,
    /// Artificial delay of the simulated SMS gateway.
    pub sms_latency_ms: u64,
    pub price_locale: PriceLocale,
    /// Product keywords counted by the weekly chart.
    pub chart_keywords: Vec<String>,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            buffer_size: 32,
            notification_buffer: 64,
            vat_rate: DEFAULT_VAT_RATE,
            urgency_window_days: URGENCY_WINDOW_DAYS,
            min_phone_digits: 10,
            sms_latency_ms: 1000,
            price_locale: PriceLocale::TURKISH,
            chart_keywords: DEFAULT_CHART_KEYWORDS.iter().map(|k| k.to_string()).collect(),
        }
    }
}

impl SystemConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let config: SystemConfig = Config::builder()
            .add_source(File::with_name("config/workshop").required(false))
            .add_source(Environment::with_prefix("WORKSHOP").separator("__"))
            .build()?
            .try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.buffer_size == 0 || self.notification_buffer == 0 {
            return Err(ConfigError::Message("channel buffers must be at least 1".to_string()));
        }
        if !self.vat_rate.is_finite() || self.vat_rate < 0.0 {
            return Err(ConfigError::Message(format!("vat_rate must be non-negative, got {}", self.vat_rate)));
        }
        if self.urgency_window_days < 0 {
            return Err(ConfigError::Message("urgency_window_days must be non-negative".to_string()));
        }
        if self.price_locale.thousands == self.price_locale.decimal {
            return Err(ConfigError::Message("price separators must differ".to_string()));
        }
        if self.chart_keywords.iter().any(|k| k.trim().is_empty()) {
            return Err(ConfigError::Message("chart keywords must not be blank".to_string()));
        }
        Ok(())
    }
}
