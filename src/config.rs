//! Application configuration loading and validation.
//!
//! Configuration is loaded from a TOML file with an environment variable
//! override for the webhook URL, which is a secret and never belongs in the
//! config file.

use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use tracing::warn;
use tracing_subscriber::{fmt, EnvFilter};

use crate::domain::{QuotaTable, Rarity};
use crate::error::{ConfigError, Result};
use crate::service::{CuratorTiming, TradeOptions};

/// Longest inter-attempt delay the operator surface allows.
const MAX_RETRY_DELAY: Duration = Duration::from_secs(10);

#[derive(Debug, Deserialize)]
pub struct Config {
    pub bridge: BridgeConfig,
    pub catalog: CatalogConfig,
    pub logging: LoggingConfig,
    #[serde(default)]
    pub webhook: WebhookConfig,
    #[serde(default)]
    pub trade: TradeConfig,
    #[serde(default)]
    pub curation: CurationConfig,
}

/// Local session-bridge endpoint exposed by the in-game companion.
#[derive(Debug, Clone, Deserialize)]
pub struct BridgeConfig {
    pub url: String,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    #[serde(default = "default_connect_timeout_ms")]
    pub connect_timeout_ms: u64,
}

fn default_timeout_ms() -> u64 {
    10_000
}

fn default_connect_timeout_ms() -> u64 {
    3_000
}

#[derive(Debug, Clone, Deserialize)]
pub struct CatalogConfig {
    pub path: String,
}

#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

/// Outbound report webhook. URL comes from `MULE_WEBHOOK_URL` at runtime
/// (never from the config file).
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookConfig {
    #[serde(skip)]
    pub url: Option<String>,
    #[serde(default = "default_webhook_username")]
    pub username: String,
}

fn default_webhook_username() -> String {
    "mule".into()
}

impl Default for WebhookConfig {
    fn default() -> Self {
        Self {
            url: None,
            username: default_webhook_username(),
        }
    }
}

/// Trade run configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct TradeConfig {
    /// Counterpart name. Overridable from the CLI.
    #[serde(default)]
    pub target: Option<String>,
    /// Inter-attempt delay in seconds, 0 to 10. Zero disables pacing.
    #[serde(default = "default_retry_delay_secs")]
    pub retry_delay_secs: f64,
    /// Only send records that are not favorited.
    #[serde(default)]
    pub skip_favorited: bool,
    /// Reposition next to the counterpart before each attempt.
    #[serde(default = "default_true")]
    pub reposition: bool,
    /// Per-rarity quota values as operator free text: "ALL", a positive
    /// integer, or anything else to exclude the tier.
    #[serde(default)]
    pub quotas: HashMap<String, String>,
}

fn default_retry_delay_secs() -> f64 {
    1.0
}

const fn default_true() -> bool {
    true
}

impl Default for TradeConfig {
    fn default() -> Self {
        Self {
            target: None,
            retry_delay_secs: default_retry_delay_secs(),
            skip_favorited: false,
            reposition: true,
            quotas: HashMap::new(),
        }
    }
}

impl TradeConfig {
    /// Build run options, clamping the delay to the supported range.
    #[must_use]
    pub fn options(&self) -> TradeOptions {
        let configured = if self.retry_delay_secs.is_finite() {
            self.retry_delay_secs
        } else {
            default_retry_delay_secs()
        };
        let secs = configured.clamp(0.0, MAX_RETRY_DELAY.as_secs_f64());
        if secs != configured {
            warn!(
                configured_secs = configured,
                "Retry delay clamped to the 0-10s range"
            );
        }
        TradeOptions {
            retry_delay: Duration::from_secs_f64(secs),
            skip_favorited: self.skip_favorited,
            reposition: self.reposition,
        }
    }

    /// Decide the quota table once, at configuration-read time.
    #[must_use]
    pub fn quota_table(&self) -> QuotaTable {
        QuotaTable::from_raw(&self.quotas)
    }
}

/// Curation scheduler configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct CurationConfig {
    #[serde(default)]
    pub enabled: bool,
    /// Rarity threshold name. The scheduler clamps this up to Mythic.
    #[serde(default = "default_threshold")]
    pub threshold: String,
    #[serde(default = "default_period_secs")]
    pub period_secs: u64,
    #[serde(default = "default_mark_delay_ms")]
    pub mark_delay_ms: u64,
}

fn default_threshold() -> String {
    "mythic".into()
}

fn default_period_secs() -> u64 {
    10
}

fn default_mark_delay_ms() -> u64 {
    300
}

impl Default for CurationConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            threshold: default_threshold(),
            period_secs: default_period_secs(),
            mark_delay_ms: default_mark_delay_ms(),
        }
    }
}

impl CurationConfig {
    /// Parse the configured threshold name.
    #[must_use]
    pub fn threshold(&self) -> Rarity {
        Rarity::parse(&self.threshold)
    }

    #[must_use]
    pub fn timing(&self) -> CuratorTiming {
        CuratorTiming {
            period: Duration::from_secs(self.period_secs),
            mark_delay: Duration::from_millis(self.mark_delay_ms),
        }
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;

        let mut config: Self = toml::from_str(&content).map_err(ConfigError::Parse)?;

        // Webhook URL is a secret; only the environment provides it.
        config.webhook.url = std::env::var("MULE_WEBHOOK_URL").ok();

        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.bridge.url.is_empty() {
            return Err(ConfigError::MissingField { field: "bridge.url" }.into());
        }
        url::Url::parse(&self.bridge.url).map_err(|err| ConfigError::InvalidValue {
            field: "bridge.url",
            reason: err.to_string(),
        })?;

        if self.catalog.path.is_empty() {
            return Err(ConfigError::MissingField {
                field: "catalog.path",
            }
            .into());
        }

        if let Some(url) = &self.webhook.url {
            url::Url::parse(url).map_err(|err| ConfigError::InvalidValue {
                field: "webhook.url",
                reason: err.to_string(),
            })?;
        }

        if self.curation.threshold() == Rarity::Unknown {
            return Err(ConfigError::InvalidValue {
                field: "curation.threshold",
                reason: format!("unrecognized rarity '{}'", self.curation.threshold),
            }
            .into());
        }

        Ok(())
    }

    pub fn init_logging(&self) {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(&self.logging.level));

        match self.logging.format.as_str() {
            "json" => {
                fmt().json().with_env_filter(filter).init();
            }
            _ => {
                fmt().with_env_filter(filter).init();
            }
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bridge: BridgeConfig {
                url: "http://127.0.0.1:7777".into(),
                timeout_ms: default_timeout_ms(),
                connect_timeout_ms: default_connect_timeout_ms(),
            },
            catalog: CatalogConfig {
                path: "catalog.json".into(),
            },
            logging: LoggingConfig {
                level: "info".into(),
                format: "pretty".into(),
            },
            webhook: WebhookConfig::default(),
            trade: TradeConfig::default(),
            curation: CurationConfig::default(),
        }
    }
}
