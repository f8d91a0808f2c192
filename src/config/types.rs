use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Root configuration container.
///
/// Every section is optional; a missing section takes its defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub swipe: SwipeConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub upstream: UpstreamConfig,
    #[serde(default)]
    pub terminal: TerminalConfig,
}

/// Gesture thresholds and commit sequencing, in distance units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwipeConfig {
    /// Displacement beyond which a direction is previewed (default: 50).
    #[serde(default = "default_commit_threshold")]
    pub commit_threshold: f64,
    /// Displacement beyond which a release commits (default: 100).
    /// Must be strictly greater than `commit_threshold`.
    #[serde(default = "default_release_threshold")]
    pub release_threshold: f64,
    /// Displacement at which an indicator reaches full opacity (default: 150).
    #[serde(default = "default_full_opacity_distance")]
    pub full_opacity_distance: f64,
    /// Degrees of rotation per unit of horizontal displacement (default: 0.1).
    #[serde(default = "default_rotation_factor")]
    pub rotation_factor: f64,
    /// Exit animation length before the deck advances (default: 300ms).
    #[serde(default = "default_settle_delay_ms")]
    pub settle_delay_ms: u64,
    /// Horizontal translation applied to a committed card (default: 1000).
    #[serde(default = "default_exit_distance")]
    pub exit_distance: f64,
}

/// HTTP service settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address for the HTTP service (host:port).
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
    /// Plain-text preference log.
    #[serde(default = "default_preferences_path")]
    pub preferences_path: PathBuf,
    /// Directory served at `/` when set.
    #[serde(default)]
    pub static_dir: Option<PathBuf>,
}

/// Language-model API used by the chat endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    /// Base URL for the API (e.g., "https://api.anthropic.com").
    #[serde(default = "default_upstream_base_url")]
    pub base_url: String,
    /// Direct API key. Takes precedence over `api_key_env`.
    #[serde(default)]
    pub api_key: Option<String>,
    /// Environment variable consulted when `api_key` is not set.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "default_api_version")]
    pub api_version: String,
    /// Total request timeout in seconds (default: 30).
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u32,
    /// Connection timeout in seconds (default: 5).
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_seconds: u32,
}

/// Terminal front-end settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TerminalConfig {
    /// Distance units per terminal column (default: 8).
    #[serde(default = "default_column_units")]
    pub column_units: f64,
    /// Distance units per terminal row (default: 16).
    #[serde(default = "default_row_units")]
    pub row_units: f64,
    /// Deck file; the built-in sample deck is used when unset.
    #[serde(default)]
    pub deck_path: Option<PathBuf>,
}

fn default_commit_threshold() -> f64 {
    50.0
}

fn default_release_threshold() -> f64 {
    100.0
}

fn default_full_opacity_distance() -> f64 {
    150.0
}

fn default_rotation_factor() -> f64 {
    0.1
}

fn default_settle_delay_ms() -> u64 {
    300
}

fn default_exit_distance() -> f64 {
    1000.0
}

fn default_bind_addr() -> String {
    "127.0.0.1:3000".to_string()
}

fn default_preferences_path() -> PathBuf {
    PathBuf::from("preferences.txt")
}

fn default_upstream_base_url() -> String {
    "https://api.anthropic.com".to_string()
}

fn default_api_key_env() -> String {
    "ANTHROPIC_API_KEY".to_string()
}

fn default_model() -> String {
    "claude-3-5-haiku-latest".to_string()
}

fn default_max_tokens() -> u32 {
    1024
}

fn default_api_version() -> String {
    "2023-06-01".to_string()
}

fn default_timeout() -> u32 {
    30
}

fn default_connect_timeout() -> u32 {
    5
}

fn default_column_units() -> f64 {
    8.0
}

fn default_row_units() -> f64 {
    16.0
}

impl SwipeConfig {
    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }
}

impl UpstreamConfig {
    /// API key from the config file, falling back to `api_key_env`.
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .or_else(|| std::env::var(&self.api_key_env).ok())
            .filter(|key| !key.trim().is_empty())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(u64::from(self.timeout_seconds))
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(u64::from(self.connect_timeout_seconds))
    }
}

impl Default for SwipeConfig {
    fn default() -> Self {
        Self {
            commit_threshold: default_commit_threshold(),
            release_threshold: default_release_threshold(),
            full_opacity_distance: default_full_opacity_distance(),
            rotation_factor: default_rotation_factor(),
            settle_delay_ms: default_settle_delay_ms(),
            exit_distance: default_exit_distance(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            preferences_path: default_preferences_path(),
            static_dir: None,
        }
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: default_upstream_base_url(),
            api_key: None,
            api_key_env: default_api_key_env(),
            model: default_model(),
            max_tokens: default_max_tokens(),
            api_version: default_api_version(),
            timeout_seconds: default_timeout(),
            connect_timeout_seconds: default_connect_timeout(),
        }
    }
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self {
            column_units: default_column_units(),
            row_units: default_row_units(),
            deck_path: None,
        }
    }
}
