// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration file support for quickfind
//!
//! Loads configuration from .quickfind.toml in current directory or
//! ~/.config/quickfind/config.toml. Every key is optional; [`Config::resolve`]
//! fills in the launcher defaults and validates the result.

use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::errors::{QuickFindError, Result};

pub const DEFAULT_KEY_FILES: &str = "ff";
pub const DEFAULT_KEY_FOLDERS: &str = "fo";
pub const DEFAULT_SEARCH_PATH: &str = "~";
pub const DEFAULT_FD_OPTIONS: &str = "--hidden";
pub const DEFAULT_NUM_RESULTS: usize = 10;
pub const DEFAULT_IMAGE_DIR: &str = "images";

const LOCAL_CONFIG_FILE: &str = ".quickfind.toml";

/// Configuration loaded from .quickfind.toml or ~/.config/quickfind/config.toml
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Keyword that triggers a file search
    pub key_files: Option<String>,
    /// Keyword that triggers a directory search
    pub key_folders: Option<String>,
    /// Root directory handed to fd as its working directory
    pub search_path: Option<String>,
    /// Extra flags passed through to fd verbatim
    pub fd_options: Option<String>,
    /// Maximum number of results to return
    pub num_results: Option<usize>,
    /// Look up themed icons for each result
    pub query_icons: Option<bool>,
    /// Explicit fd binary (name on PATH or absolute path)
    pub fd_command: Option<String>,
    /// Icon theme to resolve against instead of the desktop default
    pub icon_theme: Option<String>,
    /// Directory holding the static fallback images
    pub image_dir: Option<PathBuf>,
}

/// Values supplied on the command line; each one wins over the file
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub search_path: Option<String>,
    pub num_results: Option<usize>,
    pub no_icons: bool,
}

/// Fully resolved preferences used by the extension
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Preferences {
    pub key_files: String,
    pub key_folders: String,
    pub search_path: PathBuf,
    pub fd_options: String,
    pub num_results: NonZeroUsize,
    pub query_icons: bool,
    pub fd_command: Option<String>,
    pub icon_theme: Option<String>,
    pub image_dir: PathBuf,
}

impl Config {
    /// Load configuration from files
    ///
    /// Precedence (highest to lowest):
    /// 1. .quickfind.toml in current directory
    /// 2. ~/.config/quickfind/config.toml
    pub fn load() -> Self {
        if let Some(config) = Self::load_optional(Path::new(LOCAL_CONFIG_FILE)) {
            return config;
        }

        if let Some(path) = user_config_path() {
            if let Some(config) = Self::load_optional(&path) {
                return config;
            }
        }

        Self::default()
    }

    /// Load a file the user asked for explicitly; a missing file is an error
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| QuickFindError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content, path)
    }

    fn load_optional(path: &Path) -> Option<Self> {
        let content = std::fs::read_to_string(path).ok()?;
        match Self::parse(&content, path) {
            Ok(config) => Some(config),
            Err(e) => {
                warn!("{e}");
                None
            }
        }
    }

    fn parse(content: &str, path: &Path) -> Result<Self> {
        toml::from_str(content).map_err(|source| QuickFindError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Merge CLI overrides with the file values and apply defaults
    pub fn resolve(&self, overrides: &Overrides) -> Result<Preferences> {
        let raw_results = overrides
            .num_results
            .or(self.num_results)
            .unwrap_or(DEFAULT_NUM_RESULTS);
        let num_results =
            NonZeroUsize::new(raw_results).ok_or_else(|| QuickFindError::InvalidConfig {
                key: "num_results",
                reason: "must be greater than zero".to_string(),
            })?;

        let raw_path = overrides
            .search_path
            .as_deref()
            .or(self.search_path.as_deref())
            .unwrap_or(DEFAULT_SEARCH_PATH);

        let key_files = non_empty(self.key_files.as_deref(), DEFAULT_KEY_FILES);
        let key_folders = non_empty(self.key_folders.as_deref(), DEFAULT_KEY_FOLDERS);
        if key_files == key_folders {
            return Err(QuickFindError::InvalidConfig {
                key: "key_folders",
                reason: format!("must differ from key_files ('{key_files}')"),
            });
        }

        Ok(Preferences {
            key_files,
            key_folders,
            search_path: expand_home(raw_path)?,
            fd_options: self
                .fd_options
                .clone()
                .unwrap_or_else(|| DEFAULT_FD_OPTIONS.to_string()),
            num_results,
            query_icons: !overrides.no_icons && self.query_icons.unwrap_or(true),
            fd_command: self.fd_command.clone().filter(|c| !c.trim().is_empty()),
            icon_theme: self.icon_theme.clone().filter(|t| !t.trim().is_empty()),
            image_dir: locate_image_dir(
                self.image_dir
                    .as_deref()
                    .unwrap_or(Path::new(DEFAULT_IMAGE_DIR)),
            ),
        })
    }
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            key_files: DEFAULT_KEY_FILES.to_string(),
            key_folders: DEFAULT_KEY_FOLDERS.to_string(),
            // Same as DEFAULT_SEARCH_PATH, without the error path for a missing home
            search_path: dirs::home_dir().unwrap_or_else(|| PathBuf::from("/")),
            fd_options: DEFAULT_FD_OPTIONS.to_string(),
            num_results: NonZeroUsize::new(DEFAULT_NUM_RESULTS).unwrap_or(NonZeroUsize::MIN),
            query_icons: true,
            fd_command: None,
            icon_theme: None,
            image_dir: locate_image_dir(Path::new(DEFAULT_IMAGE_DIR)),
        }
    }
}

/// Path of the per-user configuration file, if a config dir is known
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("quickfind").join("config.toml"))
}

/// Anchor a relative image directory to where quickfind is installed.
///
/// Tried in order: next to the executable, `<prefix>/share/quickfind`,
/// the user data dir, then the source tree the binary was built from. The
/// first base holding `dir` wins; otherwise the executable's directory is
/// used so the result is absolute either way.
pub fn locate_image_dir(dir: &Path) -> PathBuf {
    if dir.is_absolute() {
        return dir.to_path_buf();
    }

    let candidates: Vec<PathBuf> = image_dir_bases()
        .into_iter()
        .map(|base| base.join(dir))
        .collect();
    match candidates.iter().find(|candidate| candidate.is_dir()) {
        Some(found) => found.clone(),
        None => candidates
            .into_iter()
            .next()
            .unwrap_or_else(|| dir.to_path_buf()),
    }
}

fn image_dir_bases() -> Vec<PathBuf> {
    let mut bases = Vec::new();
    let exe_dir = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf));
    if let Some(exe_dir) = exe_dir {
        let share = exe_dir
            .parent()
            .map(|prefix| prefix.join("share").join("quickfind"));
        bases.push(exe_dir);
        bases.extend(share);
    }
    if let Some(data) = dirs::data_dir() {
        bases.push(data.join("quickfind"));
    }
    bases.push(PathBuf::from(env!("CARGO_MANIFEST_DIR")));
    bases
}

fn non_empty(value: Option<&str>, default: &str) -> String {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => default.to_string(),
    }
}

/// Expand a leading `~` to the user's home directory
pub fn expand_home(raw: &str) -> Result<PathBuf> {
    let raw = raw.trim();
    if raw == "~" {
        return dirs::home_dir().ok_or(QuickFindError::HomeUnavailable);
    }
    if let Some(rest) = raw.strip_prefix("~/") {
        let home = dirs::home_dir().ok_or(QuickFindError::HomeUnavailable)?;
        return Ok(home.join(rest));
    }
    Ok(PathBuf::from(raw))
}
