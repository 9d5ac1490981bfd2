use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub monitor: MonitorConfig,
    #[serde(default)]
    pub fetch: FetchConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub registry: RegistryConfig,
    #[serde(default)]
    pub telegram: TelegramConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitorConfig {
    /// Seconds between full rounds over the registry.
    #[serde(default = "default_round_interval")]
    pub round_interval_secs: u64,
    /// Politeness pause between products within a round.
    #[serde(default = "default_product_delay")]
    pub product_delay_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
    /// Sites reject default HTTP-library clients; present a real browser.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_database_url")]
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryConfig {
    #[serde(default = "default_registry_path")]
    pub path: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TelegramConfig {
    /// Absent credentials disable alerting; the monitor still records prices.
    pub bot_token: Option<String>,
    pub chat_id: Option<String>,
}

fn default_round_interval() -> u64 {
    3600
}

fn default_product_delay() -> u64 {
    10
}

fn default_request_timeout() -> u64 {
    30
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) \
     Chrome/91.0.4472.124 Safari/537.36"
        .to_string()
}

fn default_database_url() -> String {
    "sqlite://price_history.db".to_string()
}

fn default_registry_path() -> PathBuf {
    PathBuf::from("products.json")
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            round_interval_secs: default_round_interval(),
            product_delay_secs: default_product_delay(),
        }
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: default_request_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_database_url(),
        }
    }
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            path: default_registry_path(),
        }
    }
}

impl MonitorConfig {
    pub fn round_interval(&self) -> Duration {
        Duration::from_secs(self.round_interval_secs)
    }

    pub fn product_delay(&self) -> Duration {
        Duration::from_secs(self.product_delay_secs)
    }
}

impl FetchConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl TelegramConfig {
    pub fn is_configured(&self) -> bool {
        self.bot_token.is_some() && self.chat_id.is_some()
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let s = Config::builder()
            // Start with default configuration
            .add_source(File::with_name("config/default").required(false))
            // Add local config (ignored by git)
            .add_source(File::with_name("config/local").required(false))
            // Add environment variables with prefix "PRICEWATCH"
            .add_source(Environment::with_prefix("PRICEWATCH").separator("__"))
            .build()?;

        let mut config: AppConfig = s.try_deserialize()?;

        // Telegram credentials usually live in .env rather than config files
        if config.telegram.bot_token.is_none() {
            config.telegram.bot_token = env::var("TELEGRAM_BOT_TOKEN").ok();
        }
        if config.telegram.chat_id.is_none() {
            config.telegram.chat_id = env::var("TELEGRAM_CHAT_ID").ok();
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.monitor.round_interval_secs == 0 {
            return Err(ConfigError::Message(
                "monitor.round_interval_secs must be greater than 0".into(),
            ));
        }

        if self.fetch.request_timeout_secs == 0 {
            return Err(ConfigError::Message(
                "fetch.request_timeout_secs must be greater than 0".into(),
            ));
        }

        if self.fetch.user_agent.trim().is_empty() {
            return Err(ConfigError::Message("fetch.user_agent must not be empty".into()));
        }

        if self.database.url.trim().is_empty() {
            return Err(ConfigError::Message("database.url must not be empty".into()));
        }

        if self.registry.path.as_os_str().is_empty() {
            return Err(ConfigError::Message("registry.path must not be empty".into()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.monitor.round_interval_secs, 3600);
        assert_eq!(config.monitor.product_delay_secs, 10);
        assert_eq!(config.registry.path, PathBuf::from("products.json"));
        assert!(!config.telegram.is_configured());
    }

    #[test]
    fn test_zero_round_interval_rejected() {
        let mut config = AppConfig::default();
        config.monitor.round_interval_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_user_agent_rejected() {
        let mut config = AppConfig::default();
        config.fetch.user_agent = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_telegram_configured_requires_both_halves() {
        let telegram = TelegramConfig {
            bot_token: Some("123:abc".to_string()),
            chat_id: None,
        };
        assert!(!telegram.is_configured());

        let telegram = TelegramConfig {
            bot_token: Some("123:abc".to_string()),
            chat_id: Some("42".to_string()),
        };
        assert!(telegram.is_configured());
    }

    #[test]
    fn test_duration_helpers() {
        let config = AppConfig::default();
        assert_eq!(config.monitor.round_interval(), Duration::from_secs(3600));
        assert_eq!(config.monitor.product_delay(), Duration::from_secs(10));
        assert_eq!(config.fetch.request_timeout(), Duration::from_secs(30));
    }
}
