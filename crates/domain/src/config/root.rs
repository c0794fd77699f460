use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::Path;

use super::errors::ConfigError;
use super::intercept::InterceptConfig;
use super::logging::LoggingConfig;
use super::server::ServerConfig;
use super::upstream::UpstreamConfig;
use crate::InterceptRule;

const LOCAL_CONFIG_PATH: &str = "dns-intercept.toml";
const SYSTEM_CONFIG_PATH: &str = "/etc/dns-intercept/config.toml";

/// Main configuration structure for DNS Intercept
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Listener configuration (bind address, port)
    #[serde(default)]
    pub server: ServerConfig,

    /// Upstream resolver for forwarded queries
    #[serde(default)]
    pub upstream: UpstreamConfig,

    /// Local address and intercepted domain suffix
    #[serde(default)]
    pub intercept: InterceptConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. dns-intercept.toml in current directory
    /// 3. /etc/dns-intercept/config.toml
    /// 4. Default configuration
    ///
    /// Command-line overrides are applied on top of whichever source won.
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = path {
            Self::from_file(path)?
        } else if Path::new(LOCAL_CONFIG_PATH).exists() {
            Self::from_file(LOCAL_CONFIG_PATH)?
        } else if Path::new(SYSTEM_CONFIG_PATH).exists() {
            Self::from_file(SYSTEM_CONFIG_PATH)?
        } else {
            Self::default()
        };

        config.apply_cli_overrides(cli_overrides);
        Ok(config)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        Self::from_toml(&contents)
    }

    pub fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(local_address) = overrides.local_address {
            self.intercept.local_address = Some(local_address);
        }
        if let Some(domain) = overrides.intercept_domain {
            self.intercept.domain = Some(domain);
        }
        if let Some(bind) = overrides.bind_address {
            self.server.bind_address = bind;
        }
        if let Some(port) = overrides.dns_port {
            self.server.dns_port = port;
        }
        if let Some(upstream) = overrides.upstream {
            self.upstream.address = upstream;
        }
        if let Some(timeout_ms) = overrides.timeout_ms {
            self.upstream.timeout_ms = timeout_ms;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.dns_port == 0 {
            return Err(ConfigError::Validation("DNS port cannot be 0".to_string()));
        }

        self.server
            .listen_address()
            .parse::<SocketAddr>()
            .map_err(|_| {
                ConfigError::Validation(format!(
                    "Invalid bind address '{}'",
                    self.server.bind_address
                ))
            })?;

        self.upstream_addr()?;

        if self.upstream.timeout_ms == 0 {
            return Err(ConfigError::Validation(
                "Upstream timeout cannot be 0".to_string(),
            ));
        }

        self.intercept_rule()?;
        Ok(())
    }

    pub fn upstream_addr(&self) -> Result<SocketAddr, ConfigError> {
        self.upstream.address.trim().parse().map_err(|_| {
            ConfigError::Validation(format!(
                "Invalid upstream address '{}'",
                self.upstream.address
            ))
        })
    }

    pub fn intercept_rule(&self) -> Result<InterceptRule, ConfigError> {
        let local_address = self.intercept.local_address.as_deref().ok_or_else(|| {
            ConfigError::Validation("Local IP is required".to_string())
        })?;
        let domain = self.intercept.domain.as_deref().ok_or_else(|| {
            ConfigError::Validation("Intercept domain is required".to_string())
        })?;

        InterceptRule::new(local_address, domain)
            .map_err(|e| ConfigError::Validation(e.to_string()))
    }
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub local_address: Option<String>,
    pub intercept_domain: Option<String>,
    pub bind_address: Option<String>,
    pub dns_port: Option<u16>,
    pub upstream: Option<String>,
    pub timeout_ms: Option<u64>,
    pub log_level: Option<String>,
}
