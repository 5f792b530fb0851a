#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::adapters::osm_http::DEFAULT_OSM_API_URL;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_non_empty_string, validate_url, Validate};
use toml_config::{LogFormat, TomlConfig};

pub const DEFAULT_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Effective settings after merging flags, the config file and defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub api_endpoint: String,
    pub user_agent: Option<String>,
    pub verbose: bool,
    pub log_format: LogFormat,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_endpoint: DEFAULT_OSM_API_URL.to_string(),
            user_agent: Some(DEFAULT_USER_AGENT.to_string()),
            verbose: false,
            log_format: LogFormat::Compact,
        }
    }
}

impl AppConfig {
    /// Flags win over the file, the file wins over defaults. Boolean flags
    /// can only switch a setting on.
    pub fn merge(
        file: Option<TomlConfig>,
        api_endpoint: Option<String>,
        verbose: bool,
        json_logs: bool,
    ) -> Self {
        let defaults = Self::default();
        let file = file.unwrap_or_default();

        let log_format = if json_logs {
            LogFormat::Json
        } else {
            file.logging.format.unwrap_or(defaults.log_format)
        };

        Self {
            api_endpoint: api_endpoint
                .or(file.osm.api_endpoint)
                .unwrap_or(defaults.api_endpoint),
            user_agent: file.osm.user_agent.or(defaults.user_agent),
            verbose: verbose || file.logging.verbose.unwrap_or(false),
            log_format,
        }
    }
}

impl ConfigProvider for AppConfig {
    fn api_endpoint(&self) -> &str {
        &self.api_endpoint
    }

    fn user_agent(&self) -> Option<&str> {
        self.user_agent.as_deref()
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        validate_url("osm.api_endpoint", &self.api_endpoint)?;
        if let Some(user_agent) = &self.user_agent {
            validate_non_empty_string("osm.user_agent", user_agent)?;
        }
        Ok(())
    }
}
