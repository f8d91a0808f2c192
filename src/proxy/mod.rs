//! HTTP service: preference log endpoints and the chat relay.

pub mod chat;
pub mod error;
pub mod health;
pub mod router;
pub mod server;
pub mod shutdown;
pub mod upstream;

pub use error::ProxyError;
pub use router::{build_router, AppState};
pub use server::{ProxyServer, ServerHandle};
