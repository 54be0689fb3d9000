// SPDX-License-Identifier: MIT OR Apache-2.0

//! Open actions attached to each result.
//!
//! Both actions hand a path to the desktop's default handler and return
//! immediately. The spawned opener is never waited on.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use serde::{Serialize, Serializer};
use tracing::debug;

use crate::errors::{QuickFindError, Result};

/// Environment variable that replaces the platform opener
pub const OPENER_ENV: &str = "QUICKFIND_OPENER";

#[cfg(target_os = "macos")]
const DEFAULT_OPENER: &str = "open";
#[cfg(not(target_os = "macos"))]
const DEFAULT_OPENER: &str = "xdg-open";

/// What happens when a result is activated
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Open the path itself
    Open(PathBuf),
    /// Open the directory containing the path
    OpenParent(PathBuf),
}

impl Action {
    pub fn kind(&self) -> &'static str {
        match self {
            Action::Open(_) => "open",
            Action::OpenParent(_) => "open_parent",
        }
    }

    /// The path handed to the opener
    pub fn target(&self) -> PathBuf {
        match self {
            Action::Open(path) => path.clone(),
            Action::OpenParent(path) => path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .map(Path::to_path_buf)
                .unwrap_or_else(|| path.clone()),
        }
    }

    /// Full command line, opener first
    pub fn command(&self) -> Vec<String> {
        vec![opener(), self.target().to_string_lossy().to_string()]
    }

    /// Spawn the opener and return without waiting for it
    pub fn launch(&self) -> Result<()> {
        let program = opener();
        let target = self.target();
        debug!(action = self.kind(), %program, target = %target.display(), "launching");

        Command::new(&program)
            .arg(&target)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map(|_| ())
            .map_err(|source| QuickFindError::Launch { program, source })
    }
}

impl Serialize for Action {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct ActionJson {
            action: &'static str,
            target: String,
            command: Vec<String>,
        }

        ActionJson {
            action: self.kind(),
            target: self.target().to_string_lossy().to_string(),
            command: self.command(),
        }
        .serialize(serializer)
    }
}

fn opener() -> String {
    std::env::var(OPENER_ENV)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_OPENER.to_string())
}
