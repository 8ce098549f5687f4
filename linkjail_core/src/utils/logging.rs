//! # Logging Initialization
//!
//! `init_logging()` installs the global `tracing` subscriber. It is guarded by a
//! `std::sync::Once`, so repeated or concurrent calls are harmless.
//!
//! ## Logging Configuration
//!
//! 1.  **Environment Filter (`EnvFilter`)**: `RUST_LOG` wins when set. Otherwise the
//!     requested level applies to everything and `linkjail_core` logs at `debug`.
//!
//! 2.  **File Logging**: with `log_to_file = true`, logs go to a daily rolling file in
//!     the user cache directory (from the `directories` crate) via `tracing_appender`,
//!     without ANSI colors.
//!
//! 3.  **Stderr Logging**: with `log_to_file = false`, or when the cache directory is
//!     unavailable, logs go to `stderr` with ANSI colors.
//!
//! The containment predicate logs each decision at `trace`, so enable that level only
//! when debugging a specific session.

use crate::error::Result;
use directories::ProjectDirs;
use std::{io::stderr, path::PathBuf, sync::Once};
use tracing_subscriber::{EnvFilter, fmt::layer, prelude::*};

static INIT: Once = Once::new();

pub fn init_test_logging() {
    init_logging("trace", false).expect("Failed to initialize test logging");
}

/// Directory used for file logging, if the platform provides one.
pub fn log_directory() -> Option<PathBuf> {
    ProjectDirs::from("com", "LinkJail", "linkjail").map(|dirs| dirs.cache_dir().to_path_buf())
}

/// Initializes the logging system.
///
/// Falls back to stderr whenever the log directory or file cannot be created.
pub fn init_logging(log_level: &str, log_to_file: bool) -> Result<()> {
    INIT.call_once(|| {
        let env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(format!("{log_level},linkjail_core=debug")));

        let log_dir = if log_to_file {
            log_directory().filter(|dir| std::fs::create_dir_all(dir).is_ok())
        } else {
            None
        };

        // tracing_appender panics when it cannot open the file.
        let file_appender = log_dir.and_then(|dir| {
            std::panic::catch_unwind(|| tracing_appender::rolling::daily(dir, "linkjail.log"))
                .ok()
        });

        match file_appender {
            Some(file_appender) => {
                let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
                tracing_subscriber::registry()
                    .with(env_filter)
                    .with(layer().with_writer(non_blocking).with_ansi(false))
                    .init();
                // Leaked so buffered lines are flushed at process exit.
                Box::leak(Box::new(guard));
            }
            None => {
                tracing_subscriber::registry()
                    .with(env_filter)
                    .with(layer().with_writer(stderr).with_ansi(true))
                    .init();
            }
        }
    });

    Ok(())
}
