use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::types::Config;

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Config validation failed: {message}")]
    ValidationError { message: String },
}

impl Config {
    /// `<config dir>/swipedeck/config.toml`, relative to the working
    /// directory when the platform has no config dir.
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("swipedeck")
            .join("config.toml")
    }

    /// Loads configuration from `path`.
    ///
    /// - If the file doesn't exist, returns `Config::default()`.
    /// - If the file exists, parses it as TOML.
    /// - Environment overrides are applied before validation.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let mut config = if path.exists() {
            let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
                path: path.to_path_buf(),
                source: e,
            })?;
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.to_path_buf(),
                source: e,
            })?
        } else {
            Config::default()
        };

        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Applies `PORT` from the environment to the bind address.
    pub fn apply_env_overrides(&mut self) {
        let Some(port) = std::env::var("PORT").ok().and_then(|p| p.parse::<u16>().ok()) else {
            return;
        };
        self.set_port(port);
    }

    /// Replaces the port of `server.bind_addr`, keeping the host.
    pub fn set_port(&mut self, port: u16) {
        let host = self
            .server
            .bind_addr
            .rsplit_once(':')
            .map(|(host, _)| host.to_string())
            .unwrap_or_else(|| "127.0.0.1".to_string());
        self.server.bind_addr = format!("{}:{}", host, port);
    }

    /// Validates the configuration.
    ///
    /// Checks:
    /// - Thresholds are ordered: `0 <= commit_threshold < release_threshold`
    /// - Opacity distance, exit distance and settle delay are positive
    /// - The bind address parses
    pub fn validate(&self) -> Result<(), ConfigError> {
        let swipe = &self.swipe;

        if !(swipe.commit_threshold >= 0.0) {
            return Err(ConfigError::ValidationError {
                message: "swipe.commit_threshold must be non-negative".to_string(),
            });
        }

        if !(swipe.release_threshold > swipe.commit_threshold) {
            return Err(ConfigError::ValidationError {
                message: format!(
                    "swipe.release_threshold ({}) must be greater than swipe.commit_threshold ({})",
                    swipe.release_threshold, swipe.commit_threshold
                ),
            });
        }

        if !(swipe.full_opacity_distance > 0.0) {
            return Err(ConfigError::ValidationError {
                message: "swipe.full_opacity_distance must be positive".to_string(),
            });
        }

        if !(swipe.exit_distance.is_finite() && swipe.exit_distance > 0.0) {
            return Err(ConfigError::ValidationError {
                message: format!(
                    "swipe.exit_distance ({}) must be a positive finite distance",
                    swipe.exit_distance
                ),
            });
        }

        if swipe.settle_delay_ms == 0 {
            return Err(ConfigError::ValidationError {
                message: "swipe.settle_delay_ms must be positive".to_string(),
            });
        }

        if self.terminal.column_units <= 0.0 || self.terminal.row_units <= 0.0 {
            return Err(ConfigError::ValidationError {
                message: "terminal units must be positive".to_string(),
            });
        }

        if self.server.bind_addr.parse::<SocketAddr>().is_err() {
            return Err(ConfigError::ValidationError {
                message: format!("Invalid bind address '{}'", self.server.bind_addr),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_port_keeps_host() {
        let mut config = Config::default();
        config.server.bind_addr = "0.0.0.0:3000".to_string();
        config.set_port(4100);
        assert_eq!(config.server.bind_addr, "0.0.0.0:4100");
    }

    #[test]
    fn nan_threshold_is_rejected() {
        let mut config = Config::default();
        config.swipe.commit_threshold = f64::NAN;
        assert!(config.validate().is_err());
    }
}
