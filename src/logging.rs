//! Tracing setup.
//!
//! The terminal belongs to the animation, so logs only go to a file, and only when the
//! `BWAVE_LOG` environment variable names one. Filtering follows `RUST_LOG` on top of a
//! DEBUG default.

use anyhow::Context;
use std::fs::File;
use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

/// Environment variable holding the path of the log file.
pub(crate) const LOG_FILE_VAR: &str = "BWAVE_LOG";

/// Install the global subscriber if a log file was requested.
pub(crate) fn init() -> anyhow::Result<()> {
    let Some(path) = std::env::var_os(LOG_FILE_VAR) else {
        return Ok(());
    };
    let path = Path::new(&path);
    let log_file = File::create(path).with_context(|| format!("creating log file {}", path.display()))?;
    build_subscriber(log_file).try_init()?;
    Ok(())
}

fn build_subscriber(log_file: File) -> impl tracing::Subscriber + Send + Sync {
    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::DEBUG.into());
    let fmt_layer = fmt::layer().with_writer(Arc::new(log_file)).with_ansi(false);
    tracing_subscriber::registry().with(fmt_layer).with(env_filter)
}
