use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::contract::{ContractType, Currency};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Event poll timeout; doubles as the redraw tick
    #[serde(default = "default_refresh_rate_ms")]
    pub refresh_rate_ms: u64,
}

fn default_refresh_rate_ms() -> u64 {
    250
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            refresh_rate_ms: default_refresh_rate_ms(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    /// TUI mode writes logs to a file so they don't corrupt the screen
    #[serde(default = "default_log_to_file")]
    pub to_file: bool,
    /// Override for the log directory; defaults to the platform data dir
    #[serde(default)]
    pub dir: Option<String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_to_file() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            to_file: default_log_to_file(),
            dir: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// File the completed draft JSON is written to (in addition to stdout)
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default = "default_pretty")]
    pub pretty: bool,
}

fn default_pretty() -> bool {
    true
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: None,
            pretty: default_pretty(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Currency preselected on the amount step (ISO code)
    #[serde(default = "default_currency")]
    pub currency: String,
    /// Contract type preselected on the first step (wire name)
    #[serde(default = "default_contract_type")]
    pub contract_type: String,
    /// Days between the default start and end dates
    #[serde(default = "default_duration_days")]
    pub duration_days: i64,
}

fn default_currency() -> String {
    "USD".to_string()
}

fn default_contract_type() -> String {
    "fixed-rate".to_string()
}

fn default_duration_days() -> i64 {
    1
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            currency: default_currency(),
            contract_type: default_contract_type(),
            duration_days: default_duration_days(),
        }
    }
}

impl Config {
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        // Start with embedded defaults so pactdraft works without config files
        let defaults = Config::default();
        let defaults_json =
            serde_json::to_string(&defaults).context("Failed to serialize default config")?;

        let mut builder = config::Config::builder().add_source(config::File::from_str(
            &defaults_json,
            config::FileFormat::Json,
        ));

        // User config in ~/.config/pactdraft/ (optional overrides)
        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("pactdraft").join("config.toml");
            if user_config.exists() {
                builder = builder.add_source(config::File::from(user_config));
            }
        }

        // Explicit config file (CLI override)
        if let Some(path) = config_path {
            builder = builder.add_source(config::File::with_name(path));
        }

        // Environment variables with PACTDRAFT_ prefix
        builder = builder.add_source(
            config::Environment::with_prefix("PACTDRAFT")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build().context("Failed to load configuration")?;
        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }

    /// Directory session logs are written to.
    pub fn logs_path(&self) -> PathBuf {
        if let Some(ref dir) = self.logging.dir {
            return PathBuf::from(dir);
        }
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("pactdraft")
            .join("logs")
    }

    /// Default currency for the amount step; unknown codes fall back to USD.
    pub fn default_currency(&self) -> Currency {
        Currency::from_code(&self.defaults.currency).unwrap_or_default()
    }

    /// Default contract type for the first step; unknown names fall back to
    /// fixed-rate.
    pub fn default_contract_type(&self) -> ContractType {
        ContractType::from_wire_name(&self.defaults.contract_type)
            .unwrap_or(ContractType::FixedRate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_usable() {
        let config = Config::default();
        assert_eq!(config.ui.refresh_rate_ms, 250);
        assert_eq!(config.logging.level, "info");
        assert!(config.logging.to_file);
        assert!(config.output.path.is_none());
        assert!(config.output.pretty);
        assert_eq!(config.defaults.duration_days, 1);
    }

    #[test]
    fn test_default_currency_falls_back_on_unknown_code() {
        let mut config = Config::default();
        config.defaults.currency = "DOGE".to_string();
        assert_eq!(config.default_currency(), Currency::Usd);

        config.defaults.currency = "gbp".to_string();
        assert_eq!(config.default_currency(), Currency::Gbp);
    }

    #[test]
    fn test_default_contract_type_falls_back_on_unknown_name() {
        let mut config = Config::default();
        config.defaults.contract_type = "retainer".to_string();
        assert_eq!(config.default_contract_type(), ContractType::FixedRate);

        config.defaults.contract_type = "milestone".to_string();
        assert_eq!(config.default_contract_type(), ContractType::Milestone);
    }

    #[test]
    fn test_logs_path_honors_override() {
        let mut config = Config::default();
        config.logging.dir = Some("/tmp/pactdraft-logs".to_string());
        assert_eq!(config.logs_path(), PathBuf::from("/tmp/pactdraft-logs"));
    }

    #[test]
    fn test_config_round_trips_through_toml() {
        let config = Config::default();
        let toml = toml::to_string(&config).unwrap();
        let parsed: Config = toml::from_str(&toml).unwrap();
        assert_eq!(parsed.ui.refresh_rate_ms, config.ui.refresh_rate_ms);
        assert_eq!(parsed.defaults.currency, config.defaults.currency);
    }
}
