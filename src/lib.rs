pub mod config;
pub mod deck;
pub mod logging;
pub mod preferences;
pub mod proxy;
pub mod session;
pub mod ui;
