// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types with helpful suggestions
//!
//! Only configuration and action launching can fail outright. Search and icon
//! lookups recover locally and never surface an error to the host.

use std::path::PathBuf;

use thiserror::Error;

/// Errors produced by the quickfind library
#[derive(Debug, Error)]
pub enum QuickFindError {
    /// A configuration file could not be read
    #[error("Failed to read config file '{}': {source}", .path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A configuration file is not valid TOML for our schema
    #[error("Failed to parse config file '{}': {source}", .path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// A configuration value is out of range
    #[error("Invalid value for '{key}': {reason}\n\n{}", suggestions::config_hint(.key))]
    InvalidConfig { key: &'static str, reason: String },

    /// `~` was used in the search path but no home directory is known
    #[error("Cannot expand '~' in search path: home directory is unavailable")]
    HomeUnavailable,

    /// The desktop opener could not be started
    #[error("Failed to launch '{program}': {source}")]
    Launch {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience alias used across the library
pub type Result<T, E = QuickFindError> = std::result::Result<T, E>;

/// Helper functions for creating helpful error messages
pub mod suggestions {
    /// Message shown to the user when fd cannot be found on PATH
    pub const FD_NOT_INSTALLED: &str = "fd is not installed";

    /// Get a hint for fixing a bad configuration key
    pub fn config_hint(key: &str) -> String {
        format!(
            "Set '{key}' in .quickfind.toml or ~/.config/quickfind/config.toml.\n\
             Example:\n\
             num_results = 10"
        )
    }

    /// Get installation hints for fd
    pub fn fd_install_hint() -> &'static str {
        "Install fd from your package manager:\n\
         $ sudo apt install fd-find\n\
         $ sudo dnf install fd-find\n\
         $ sudo pacman -S fd\n\
         Or set 'fd_command' in the config file to point at the binary."
    }
}
