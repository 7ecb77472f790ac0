use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

use super::dns::DnsConfig;
use super::errors::ConfigError;
use super::logging::LoggingConfig;
use super::server::{ServerConfig, MIN_UDP_PAYLOAD};

const LOCAL_CONFIG_PATH: &str = "relaydns.toml";
const SYSTEM_CONFIG_PATH: &str = "/etc/relaydns/config.toml";

/// Main configuration structure for relaydns
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Listener configuration (bind address, port, receive buffer)
    #[serde(default)]
    pub server: ServerConfig,

    /// Upstream forwarding configuration
    #[serde(default)]
    pub dns: DnsConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. relaydns.toml in current directory
    /// 3. /etc/relaydns/config.toml
    /// 4. Default configuration
    ///
    /// Command-line overrides are applied on top of whichever source won.
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => match Self::get_config_path() {
                Some(found) => Self::from_file(&found)?,
                None => Self::default(),
            },
        };

        config.apply_cli_overrides(cli_overrides);
        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(port) = overrides.dns_port {
            self.server.dns_port = port;
        }
        if let Some(bind) = overrides.bind_address {
            self.server.bind_address = bind;
        }
        if let Some(upstream) = overrides.upstream {
            self.dns.upstream = upstream;
        }
        if let Some(timeout_ms) = overrides.query_timeout_ms {
            self.dns.query_timeout_ms = timeout_ms;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.dns_port == 0 {
            return Err(ConfigError::Validation("DNS port cannot be 0".to_string()));
        }

        if self.server.max_udp_payload < MIN_UDP_PAYLOAD {
            return Err(ConfigError::Validation(format!(
                "max_udp_payload must be at least {} bytes",
                MIN_UDP_PAYLOAD
            )));
        }

        self.server
            .listen_address()
            .parse::<SocketAddr>()
            .map_err(|e| {
                ConfigError::Validation(format!(
                    "Invalid bind address '{}': {}",
                    self.server.bind_address, e
                ))
            })?;

        if self.dns.query_timeout_ms == 0 {
            return Err(ConfigError::Validation(
                "query_timeout_ms cannot be 0".to_string(),
            ));
        }

        validate_upstream(&self.dns.upstream)
    }

    /// Per-exchange deadline for the upstream resolver.
    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_millis(self.dns.query_timeout_ms)
    }

    pub fn save(&self, path: &str) -> Result<(), ConfigError> {
        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Parse(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, toml_string)
            .map_err(|e| ConfigError::FileWrite(path.to_string(), e.to_string()))?;
        Ok(())
    }

    /// Get the path to the configuration file that `load(None, ..)` would use
    pub fn get_config_path() -> Option<String> {
        [LOCAL_CONFIG_PATH, SYSTEM_CONFIG_PATH]
            .into_iter()
            .find(|candidate| Path::new(candidate).exists())
            .map(str::to_string)
    }
}

/// Command-line overrides for configuration
/// Accepts a literal socket address or `host:port`.
///
/// Host names are resolved once at startup, not here.
fn validate_upstream(upstream: &str) -> Result<(), ConfigError> {
    if upstream.parse::<SocketAddr>().is_ok() {
        return Ok(());
    }

    let invalid = |reason: &str| {
        ConfigError::Validation(format!(
            "Invalid upstream address '{}': {}",
            upstream, reason
        ))
    };

    let (host, port) = upstream
        .rsplit_once(':')
        .ok_or_else(|| invalid("expected host:port"))?;

    if host.is_empty() || host.contains(':') {
        return Err(invalid("expected host:port"));
    }

    match port.parse::<u16>() {
        Ok(0) | Err(_) => Err(invalid("invalid port")),
        Ok(_) => Ok(()),
    }
}

#[derive(Debug, Default)]
pub struct CliOverrides {
    pub dns_port: Option<u16>,
    pub bind_address: Option<String>,
    pub upstream: Option<String>,
    pub query_timeout_ms: Option<u64>,
    pub log_level: Option<String>,
}
