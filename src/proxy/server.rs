use std::future::IntoFuture;
use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;

use crate::config::ConfigStore;
use crate::proxy::error::ProxyError;
use crate::proxy::router::{build_router, AppState};
use crate::proxy::shutdown::ShutdownManager;

pub struct ProxyServer {
    pub addr: SocketAddr,
    /// Populated by bind(), consumed by run().
    listener: Option<TcpListener>,
    state: AppState,
    shutdown: Arc<ShutdownManager>,
}

impl ProxyServer {
    pub fn new(config: ConfigStore) -> Result<Self, ProxyError> {
        let state = AppState::new(config)?;
        Ok(Self {
            addr: SocketAddr::from(([127, 0, 0, 1], 0)),
            listener: None,
            state,
            shutdown: Arc::new(ShutdownManager::new()),
        })
    }

    /// Binds the configured address. Port 0 picks a free port; the actual
    /// address is returned and stored in `addr`.
    pub async fn bind(&mut self) -> anyhow::Result<SocketAddr> {
        let bind_addr = self.state.config.get().server.bind_addr;
        let addr: SocketAddr = bind_addr
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid bind address '{}': {}", bind_addr, e))?;

        let listener = TcpListener::bind(addr).await?;
        self.addr = listener.local_addr()?;
        self.listener = Some(listener);
        tracing::info!(addr = %self.addr, "Server bound");
        Ok(self.addr)
    }

    pub fn handle(&self) -> ServerHandle {
        ServerHandle {
            shutdown: self.shutdown.clone(),
        }
    }

    /// Serves until shutdown is signalled. Call bind() first.
    pub async fn run(self) -> anyhow::Result<()> {
        let listener = self
            .listener
            .ok_or_else(|| anyhow::anyhow!("bind() must be called before run()"))?;

        tracing::info!(
            addr = %self.addr,
            preferences = %self.state.preferences.path().display(),
            "Starting server"
        );

        let app = build_router(self.state);
        let shutdown = self.shutdown.clone();
        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                if let Err(err) = shutdown.wait_for_shutdown().await {
                    tracing::warn!(error = %err, "Signal handler failed");
                }
            })
            .into_future()
            .await?;

        tracing::info!("Server stopped");
        Ok(())
    }
}

#[derive(Clone)]
pub struct ServerHandle {
    shutdown: Arc<ShutdownManager>,
}

impl ServerHandle {
    pub fn shutdown(&self) {
        self.shutdown.signal_shutdown();
    }
}
