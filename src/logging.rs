use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable naming the log file for the terminal deck.
pub const LOG_FILE_ENV: &str = "SWIPEDECK_LOG";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Logs to stdout. Used by `serve`.
pub fn init_stdout() {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_target(true)
        .with_level(true)
        .with_timer(UtcTime::rfc_3339())
        .init();
}

/// Logs to a file for the terminal deck, which owns the screen.
///
/// Disabled unless `SWIPEDECK_LOG` is set. The file is named
/// `{path}.{timestamp}.{pid}` so concurrent runs never share one.
pub fn init_file() {
    let Some(log_path) = std::env::var(LOG_FILE_ENV).ok() else {
        return;
    };

    let unique_path = format!(
        "{}.{}.{}",
        log_path,
        chrono::Utc::now().timestamp(),
        std::process::id()
    );

    let Ok(file) = std::fs::File::create(&unique_path) else {
        eprintln!("Warning: Failed to create log file: {}", unique_path);
        return;
    };

    let file_layer = fmt::layer()
        .with_writer(file)
        .with_ansi(false)
        .with_target(true)
        .with_level(true)
        .with_timer(UtcTime::rfc_3339());

    tracing_subscriber::registry()
        .with(env_filter())
        .with(file_layer)
        .init();
}
