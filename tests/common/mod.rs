//! Shared test utilities and mock infrastructure.

#![allow(dead_code, unused_imports)]

pub mod mock_upstream;

use parking_lot::Mutex;
use std::net::{SocketAddr, TcpListener};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use swipedeck::config::{Config, ConfigStore, SwipeConfig};
use swipedeck::deck::{Deck, Item};
use swipedeck::session::{DecisionRecord, DecisionSink, Session, VisualSink};
use swipedeck::ui::gesture::Outcome;
use swipedeck::ui::input::PointerEvent;
use tempfile::TempDir;

/// Find an available port for testing.
pub fn free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind to free port");
    listener.local_addr().unwrap().port()
}

/// Wait for a server to become available.
pub async fn wait_for_server(addr: SocketAddr, timeout: Duration) -> bool {
    let start = std::time::Instant::now();
    while start.elapsed() < timeout {
        if tokio::net::TcpStream::connect(addr).await.is_ok() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    false
}

/// Config whose preference log lives in a fresh temp dir.
pub fn temp_config() -> (TempDir, Config) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let mut config = Config::default();
    config.server.bind_addr = "127.0.0.1:0".to_string();
    config.server.preferences_path = temp_dir.path().join("preferences.txt");
    config.upstream.api_key = Some("test-key".to_string());
    config.upstream.timeout_seconds = 5;
    (temp_dir, config)
}

pub fn store(config: Config) -> ConfigStore {
    ConfigStore::new(config, PathBuf::from("/tmp/swipedeck-test.toml"))
}

// -- Session helpers ----------------------------------------------------------

/// One call made on a [`VisualSink`].
#[derive(Debug, Clone, PartialEq)]
pub enum VisualCall {
    Transform(f64, f64, f64),
    Opacity(Outcome, f64),
    Item(String),
    EnableInput,
    DisableInput,
}

/// Visual sink recording every call, shareable with the test body.
#[derive(Clone, Default)]
pub struct RecordingVisual {
    pub calls: Arc<Mutex<Vec<VisualCall>>>,
}

impl RecordingVisual {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<VisualCall> {
        self.calls.lock().clone()
    }

    pub fn clear(&self) {
        self.calls.lock().clear();
    }

    pub fn last_transform(&self) -> Option<(f64, f64, f64)> {
        self.calls.lock().iter().rev().find_map(|call| match call {
            VisualCall::Transform(x, y, r) => Some((*x, *y, *r)),
            _ => None,
        })
    }

    pub fn last_opacity(&self, outcome: Outcome) -> Option<f64> {
        self.calls.lock().iter().rev().find_map(|call| match call {
            VisualCall::Opacity(which, value) if *which == outcome => Some(*value),
            _ => None,
        })
    }

    pub fn items_shown(&self) -> Vec<String> {
        self.calls
            .lock()
            .iter()
            .filter_map(|call| match call {
                VisualCall::Item(id) => Some(id.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn input_enabled(&self) -> bool {
        self.calls
            .lock()
            .iter()
            .rev()
            .find_map(|call| match call {
                VisualCall::EnableInput => Some(true),
                VisualCall::DisableInput => Some(false),
                _ => None,
            })
            .unwrap_or(false)
    }
}

impl VisualSink for RecordingVisual {
    fn set_transform(&mut self, translate_x: f64, translate_y: f64, rotation_degrees: f64) {
        self.calls
            .lock()
            .push(VisualCall::Transform(translate_x, translate_y, rotation_degrees));
    }

    fn set_indicator_opacity(&mut self, which: Outcome, value: f64) {
        self.calls.lock().push(VisualCall::Opacity(which, value));
    }

    fn set_item_visual(&mut self, item: &Item) {
        self.calls.lock().push(VisualCall::Item(item.id.clone()));
    }

    fn enable_input(&mut self) {
        self.calls.lock().push(VisualCall::EnableInput);
    }

    fn disable_input(&mut self) {
        self.calls.lock().push(VisualCall::DisableInput);
    }
}

/// Decision sink collecting records; optionally failing every call.
#[derive(Clone, Default)]
pub struct RecordingSink {
    pub records: Arc<Mutex<Vec<DecisionRecord>>>,
    pub fail: bool,
}

impl DecisionSink for RecordingSink {
    fn record(&mut self, record: &DecisionRecord) -> anyhow::Result<()> {
        self.records.lock().push(record.clone());
        if self.fail {
            anyhow::bail!("sink unavailable");
        }
        Ok(())
    }
}

pub fn deck_of(ids: &[&str]) -> Deck {
    Deck::new(ids.iter().map(|id| Item::new(*id, id.to_uppercase())).collect())
}

pub fn started_session(ids: &[&str]) -> (Session<RecordingVisual>, RecordingVisual) {
    let visual = RecordingVisual::new();
    let mut session = Session::new(deck_of(ids), SwipeConfig::default(), visual.clone());
    session.start();
    (session, visual)
}

/// Press at the origin, drag to `dx`, release.
pub fn swipe(session: &mut Session<RecordingVisual>, dx: f64) -> Option<swipedeck::ui::driver::SettleTicket> {
    session.handle(PointerEvent::Down { x: 0.0, y: 0.0 });
    session.handle(PointerEvent::Move { x: dx, y: 0.0 });
    session.handle(PointerEvent::Up)
}
