//! Shared, reloadable configuration.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::RwLock;

use crate::config::loader::ConfigError;
use crate::config::types::{Config, UpstreamConfig};

/// Cheap-to-clone handle to the current [`Config`].
///
/// Handlers take a snapshot per request, so a reload never changes
/// settings halfway through one.
#[derive(Clone)]
pub struct ConfigStore {
    current: Arc<RwLock<Config>>,
    path: PathBuf,
}

impl ConfigStore {
    /// `path` is where [`ConfigStore::reload`] reads from.
    pub fn new(config: Config, path: PathBuf) -> Self {
        Self {
            current: Arc::new(RwLock::new(config)),
            path,
        }
    }

    pub fn get(&self) -> Config {
        self.current.read().clone()
    }

    pub fn upstream(&self) -> UpstreamConfig {
        self.current.read().upstream.clone()
    }

    /// Re-reads the file. A file that fails to load or validate leaves the
    /// current config in place.
    pub fn reload(&self) -> Result<(), ConfigError> {
        let fresh = Config::load_from(&self.path)?;
        *self.current.write() = fresh;
        tracing::info!(path = %self.path.display(), "Config reloaded");
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
