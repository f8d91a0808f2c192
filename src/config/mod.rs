//! Configuration: TOML file with serde defaults, validation and a shared store.

mod loader;
mod store;
mod types;

pub use loader::ConfigError;
pub use store::ConfigStore;
pub use types::{Config, ServerConfig, SwipeConfig, TerminalConfig, UpstreamConfig};
