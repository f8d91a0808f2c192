//! Plain-text preference log.
//!
//! One line per entry: `[<RFC 3339 UTC>] <speaker>: <message>`. The file is
//! created on first access and only ever appended to.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, SecondsFormat, Utc};
use thiserror::Error;
use tokio::io::AsyncWriteExt;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;

use crate::session::{DecisionRecord, DecisionSink};

const DEFAULT_SPEAKER: &str = "user";
const SWIPE_SPEAKER: &str = "swipe";

#[derive(Debug, Error)]
pub enum PreferenceError {
    #[error("Failed to read preferences '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write preferences '{path}': {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Collapses whitespace runs to single spaces and trims.
pub fn normalize_message(message: &str) -> String {
    message.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Formats one log line, newline included. An empty speaker counts as absent.
pub fn format_line(timestamp: DateTime<Utc>, speaker: Option<&str>, message: &str) -> String {
    let speaker = speaker.filter(|s| !s.is_empty()).unwrap_or(DEFAULT_SPEAKER);
    format!(
        "[{}] {}: {}\n",
        timestamp.to_rfc3339_opts(SecondsFormat::Millis, true),
        speaker,
        normalize_message(message)
    )
}

/// Shared handle to the log file. Appends are serialized so lines never
/// interleave.
#[derive(Clone)]
pub struct PreferenceStore {
    path: Arc<PathBuf>,
    write_lock: Arc<Mutex<()>>,
}

impl PreferenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Arc::new(path.into()),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whole log contents. Creates an empty log if none exists.
    pub async fn read(&self) -> Result<String, PreferenceError> {
        self.ensure_exists().await?;
        tokio::fs::read_to_string(self.path.as_path())
            .await
            .map_err(|source| PreferenceError::Read {
                path: self.path.to_path_buf(),
                source,
            })
    }

    /// Appends one entry and returns the line written.
    pub async fn append(
        &self,
        speaker: Option<&str>,
        message: &str,
    ) -> Result<String, PreferenceError> {
        let line = format_line(Utc::now(), speaker, message);
        let _guard = self.write_lock.lock().await;

        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.path.as_path())
            .await
            .map_err(|source| self.write_error(source))?;
        file.write_all(line.as_bytes())
            .await
            .map_err(|source| self.write_error(source))?;
        file.flush().await.map_err(|source| self.write_error(source))?;

        tracing::debug!(path = %self.path.display(), "Preference appended");
        Ok(line)
    }

    /// Decision sink that appends `swipe: <outcome> <id>` lines from a
    /// background task. Must be called inside a tokio runtime.
    ///
    /// The writer exits once the sink is dropped and every queued line is
    /// written; await the returned handle to flush before shutdown.
    pub fn decision_sink(&self) -> (PreferenceSink, JoinHandle<()>) {
        let (tx, mut rx) = mpsc::unbounded_channel::<String>();
        let store = self.clone();
        let writer = tokio::spawn(async move {
            while let Some(message) = rx.recv().await {
                if let Err(err) = store.append(Some(SWIPE_SPEAKER), &message).await {
                    tracing::warn!(error = %err, "Failed to persist decision");
                }
            }
        });
        (PreferenceSink { tx }, writer)
    }

    async fn ensure_exists(&self) -> Result<(), PreferenceError> {
        tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.path.as_path())
            .await
            .map(|_| ())
            .map_err(|source| PreferenceError::Read {
                path: self.path.to_path_buf(),
                source,
            })
    }

    fn write_error(&self, source: std::io::Error) -> PreferenceError {
        PreferenceError::Write {
            path: self.path.to_path_buf(),
            source,
        }
    }
}

/// Fire-and-forget [`DecisionSink`] backed by a [`PreferenceStore`].
pub struct PreferenceSink {
    tx: mpsc::UnboundedSender<String>,
}

impl DecisionSink for PreferenceSink {
    fn record(&mut self, record: &DecisionRecord) -> anyhow::Result<()> {
        self.tx
            .send(format!("{} {}", record.outcome, record.identifier))
            .map_err(|_| anyhow::anyhow!("preference writer stopped"))
    }
}
