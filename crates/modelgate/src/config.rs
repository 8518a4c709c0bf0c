use std::io::ErrorKind;
use std::path::Path;
use std::time::Duration;

use tokio::fs;

use serde::Deserialize;
use thiserror::Error;

use crate::llm::{DEFAULT_MODEL, catalog};

// ============================================================================
// Config (root)
// ============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub gateway: GatewayConfig,
}

impl Config {
    /// Load config from a YAML file. A missing file yields the defaults.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = match fs::read_to_string(path).await {
            Ok(c) => c,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(ConfigError::Io(e)),
        };
        let config: Self = serde_saphyr::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if catalog::lookup(&self.gateway.default_model).is_none() {
            return Err(ConfigError::UnknownDefaultModel(
                self.gateway.default_model.clone(),
            ));
        }
        // The fallback reply needs time to go out after an upstream timeout.
        if self.gateway.upstream_timeout_seconds >= self.server.request_timeout_seconds {
            return Err(ConfigError::UpstreamTimeoutTooLong {
                upstream: self.gateway.upstream_timeout_seconds,
                request: self.server.request_timeout_seconds,
            });
        }
        Ok(())
    }
}

// ============================================================================
// ServerConfig
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            request_timeout_seconds: default_request_timeout(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_request_timeout() -> u64 {
    60
}

// ============================================================================
// GatewayConfig
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct GatewayConfig {
    /// Model used when a chat request does not name one.
    #[serde(default = "default_model")]
    pub default_model: String,
    /// Upper bound on a single upstream provider call.
    #[serde(default = "default_upstream_timeout")]
    pub upstream_timeout_seconds: u64,
}

impl GatewayConfig {
    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_secs(self.upstream_timeout_seconds)
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            default_model: default_model(),
            upstream_timeout_seconds: default_upstream_timeout(),
        }
    }
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_upstream_timeout() -> u64 {
    10
}

// ============================================================================
// ConfigError
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Yaml(#[from] serde_saphyr::Error),

    #[error("default model '{0}' is not a supported model")]
    UnknownDefaultModel(String),

    #[error(
        "gateway.upstream_timeout_seconds ({upstream}) must be below server.request_timeout_seconds ({request})"
    )]
    UpstreamTimeoutTooLong { upstream: u64, request: u64 },
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.request_timeout_seconds, 60);
        assert_eq!(config.gateway.default_model, "gpt4-turbo");
        assert_eq!(config.gateway.upstream_timeout(), Duration::from_secs(10));
        assert!(config.validate().is_ok());
    }

    #[tokio::test]
    async fn test_load_missing_file_returns_defaults() {
        let tmp_dir = TempDir::new().unwrap();
        let missing_path = tmp_dir.path().join("missing-config.yaml");
        let config = Config::load(&missing_path).await.unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
    }

    #[tokio::test]
    async fn test_load_valid_yaml() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
server:
  host: "127.0.0.1"
  port: 3000
  request_timeout_seconds: 30
gateway:
  default_model: claude-opus
  upstream_timeout_seconds: 5
"#
        )
        .unwrap();

        let config = Config::load(file.path()).await.unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.request_timeout_seconds, 30);
        assert_eq!(config.gateway.default_model, "claude-opus");
        assert_eq!(config.gateway.upstream_timeout_seconds, 5);
    }

    #[tokio::test]
    async fn test_load_partial_yaml_uses_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
server:
  port: 9000
"#
        )
        .unwrap();

        let config = Config::load(file.path()).await.unwrap();
        assert_eq!(config.server.host, "0.0.0.0"); // default
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.request_timeout_seconds, 60); // default
        assert_eq!(config.gateway.default_model, "gpt4-turbo"); // default
        assert_eq!(config.gateway.upstream_timeout_seconds, 10); // default
    }

    #[tokio::test]
    async fn test_load_invalid_yaml() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "invalid: yaml: content: [").unwrap();

        let result = Config::load(file.path()).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_load_rejects_unknown_default_model() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "gateway:\n  default_model: gpt-9").unwrap();

        let err = Config::load(file.path()).await.unwrap_err();
        assert!(matches!(err, ConfigError::UnknownDefaultModel(ref m) if m == "gpt-9"));
    }

    #[tokio::test]
    async fn test_load_rejects_upstream_timeout_not_below_request_timeout() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
server:
  request_timeout_seconds: 30
gateway:
  upstream_timeout_seconds: 60
"#
        )
        .unwrap();

        let err = Config::load(file.path()).await.unwrap_err();
        assert!(matches!(
            err,
            ConfigError::UpstreamTimeoutTooLong {
                upstream: 60,
                request: 30
            }
        ));
    }

    #[test]
    fn test_equal_timeouts_are_rejected() {
        let mut config = Config::default();
        config.gateway.upstream_timeout_seconds = 60;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::UpstreamTimeoutTooLong { .. })
        ));

        config.gateway.upstream_timeout_seconds = 59;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_error_display() {
        let io_error = ConfigError::Io(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "test",
        ));
        assert!(io_error.to_string().contains("failed to read config file"));
    }
}
