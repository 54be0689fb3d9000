// SPDX-License-Identifier: MIT OR Apache-2.0

//! Diagnostic logging setup
//!
//! Logs go to stderr so stdout stays a clean channel for the launcher.

use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter (`RUST_LOG` syntax)
pub const LOG_ENV: &str = "QUICKFIND_LOG";

/// Filter used when the environment does not set one
pub fn default_level(verbose: bool) -> Level {
    if verbose {
        Level::DEBUG
    } else {
        Level::WARN
    }
}

/// Install the global subscriber; later calls are ignored
pub fn init(verbose: bool) {
    let filter = EnvFilter::builder()
        .with_env_var(LOG_ENV)
        .with_default_directive(default_level(verbose).into())
        .from_env_lossy();

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
