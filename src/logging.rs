//! Tracing setup for the binary.
//!
//! Events go to journald when the journal socket is reachable (Linux only),
//! and to `photocat.log` under a daily rotation otherwise. `PHOTOCAT_LOG`
//! takes an `EnvFilter` directive string and defaults to `info`.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub const LOG_ENV: &str = "PHOTOCAT_LOG";

static FILE_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

/// Install the global subscriber. Fails if one is already installed.
pub fn init(log_dir: Option<PathBuf>) -> Result<()> {
    let filter = filter_from(std::env::var(LOG_ENV).ok());

    let journald = journald_layer();
    let file = match journald {
        Some(_) => None,
        None => {
            let dir = log_dir.unwrap_or_else(default_log_dir);
            Some(
                fmt::layer()
                    .with_ansi(false)
                    .with_writer(file_writer(&dir)?),
            )
        }
    };
    let to_file = file.is_some();

    tracing_subscriber::registry()
        .with(filter)
        .with(journald)
        .with(file)
        .try_init()
        .context("installing tracing subscriber")?;

    tracing::debug!(to_file, "Logging ready");
    Ok(())
}

fn filter_from(directives: Option<String>) -> EnvFilter {
    directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

/// `$XDG_DATA_HOME/photocat/logs`, or `./photocat/logs` without a data dir.
pub fn default_log_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("photocat")
        .join("logs")
}

fn file_writer(dir: &Path) -> Result<NonBlocking> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("creating log directory {}", dir.display()))?;

    let (writer, guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::daily(dir, "photocat.log"));
    // Dropping the guard stops the writer thread
    let _ = FILE_GUARD.set(guard);
    Ok(writer)
}

#[cfg(target_os = "linux")]
fn journald_layer() -> Option<tracing_journald::Layer> {
    tracing_journald::layer()
        .ok()
        .map(|layer| layer.with_syslog_identifier("photocat".to_string()))
}

#[cfg(not(target_os = "linux"))]
fn journald_layer() -> Option<tracing_subscriber::layer::Identity> {
    None
}
