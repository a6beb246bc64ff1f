//! Structured logging for geocatalog
//!
//! Events go to stderr so stdout stays clean for tables and JSON. The filter
//! comes from `RUST_LOG` when set, otherwise from [`TelemetryConfig::filter`].

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use uuid::Uuid;

static RUN_ID: Lazy<String> = Lazy::new(|| Uuid::new_v4().to_string());

/// Line format of log events
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Single-line human-readable
    #[default]
    Compact,
    /// One JSON object per event
    Json,
}

/// Subscriber settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryConfig {
    /// `EnvFilter` directive, e.g. `warn` or `geocatalog_store=debug`
    pub filter: String,
    pub format: LogFormat,
    /// Print the module path of each event
    pub show_target: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            filter: "warn".to_string(),
            format: LogFormat::Compact,
            show_target: false,
        }
    }
}

impl TelemetryConfig {
    /// Settings from the `[logging]` section of the config file
    pub fn new(level: impl Into<String>, json: bool) -> Self {
        Self {
            filter: level.into(),
            format: if json { LogFormat::Json } else { LogFormat::Compact },
            ..Self::default()
        }
    }

    /// `--verbose`: everything at debug, with targets
    pub fn verbose(mut self, verbose: bool) -> Self {
        if verbose {
            self.filter = "debug".to_string();
            self.show_target = true;
        }
        self
    }
}

/// Install the global subscriber. Fails if one is already installed.
pub fn init(config: &TelemetryConfig) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.filter))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let (json, compact) = match config.format {
        LogFormat::Json => (
            Some(fmt::layer().json().with_writer(std::io::stderr).with_target(config.show_target)),
            None,
        ),
        LogFormat::Compact => (
            None,
            Some(fmt::layer().compact().with_writer(std::io::stderr).with_target(config.show_target)),
        ),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(json)
        .with(compact)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to install log subscriber: {}", e))?;

    tracing::debug!(run_id = %run_id(), version = env!("CARGO_PKG_VERSION"), "Logging ready");
    Ok(())
}

/// Random id of this process, attached to the first log event
pub fn run_id() -> &'static str {
    &RUN_ID
}

/// Logs how long an operation took when finished
pub struct Timer {
    operation: &'static str,
    started: Instant,
}

impl Timer {
    pub fn start(operation: &'static str) -> Self {
        Self {
            operation,
            started: Instant::now(),
        }
    }

    /// Log the elapsed time at debug and return it
    pub fn finish(self) -> Duration {
        let elapsed = self.started.elapsed();
        tracing::debug!(
            operation = self.operation,
            elapsed_ms = elapsed.as_secs_f64() * 1000.0,
            "Operation finished"
        );
        elapsed
    }
}
