// SPDX-License-Identifier: MIT OR Apache-2.0

//! Icon lookup for search results
//!
//! [`IconResolver`] is built once at startup and shared by reference. It owns
//! the theme handle and the generic folder icon, so nothing here is global.

pub mod mime;
pub mod theme;

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, warn};

pub use mime::MimeDatabase;
pub use theme::FreedesktopTheme;

/// Pixel size every lookup is made at
pub const ICON_SIZE: u32 = 32;

/// Prefix of the serialized form of a themed icon (`". GThemedIcon a b"`)
const THEMED_ICON_PREFIX: &str = ". GThemedIcon ";

/// Why a path could not be described
#[derive(Debug, Error)]
pub enum IconLookupError {
    #[error("cannot stat '{}': {source}", .path.display())]
    Metadata {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// The icon a theme associates with a path, in whichever shape it came in
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IconDescriptor {
    /// Ordered list of icon names, most specific first
    Themed(Vec<String>),
    /// A single serialized icon: a name, an absolute file, or a themed list
    Serialized(String),
}

impl IconDescriptor {
    /// Flatten into ordered, de-duplicated candidate names
    pub fn into_candidates(self) -> Vec<String> {
        let names: Vec<String> = match self {
            IconDescriptor::Themed(names) => names,
            IconDescriptor::Serialized(text) => match text.strip_prefix(THEMED_ICON_PREFIX) {
                Some(list) => list.split_whitespace().map(str::to_string).collect(),
                None => vec![text.trim().to_string()],
            },
        };

        let mut seen = Vec::with_capacity(names.len());
        for name in names {
            if !name.is_empty() && !seen.contains(&name) {
                seen.push(name);
            }
        }
        seen
    }
}

/// Platform icon-theming service
pub trait IconTheme {
    /// Describe the icon associated with `path`
    fn describe(&self, path: &Path) -> Result<IconDescriptor, IconLookupError>;

    /// Resolve one icon name to a concrete image file
    fn lookup(&self, name: &str, size: u32) -> Option<PathBuf>;
}

/// Resolve `path` to the first candidate icon the theme can find on disk
pub fn resolve_with<T: IconTheme + ?Sized>(theme: &T, path: &Path, size: u32) -> Option<PathBuf> {
    let descriptor = match theme.describe(path) {
        Ok(descriptor) => descriptor,
        Err(err) => {
            warn!("Failed to get icon for {}: {err}", path.display());
            return None;
        }
    };

    let candidates = descriptor.into_candidates();
    let found = candidates
        .iter()
        .find_map(|name| theme.lookup(name, size));
    if found.is_none() {
        debug!(path = %path.display(), ?candidates, "no themed icon resolved");
    }
    found
}

/// Theme handle plus the cached generic folder icon
pub struct IconResolver<T = FreedesktopTheme> {
    theme: T,
    folder_icon: Option<PathBuf>,
}

impl<T: IconTheme> IconResolver<T> {
    /// Wrap `theme`, resolving the folder icon once from the temp directory
    pub fn new(theme: T) -> Self {
        let folder_icon = resolve_with(&theme, &std::env::temp_dir(), ICON_SIZE);
        Self { theme, folder_icon }
    }

    /// The cached generic folder icon, if the theme has one
    pub fn folder_icon(&self) -> Option<&Path> {
        self.folder_icon.as_deref()
    }

    pub fn theme(&self) -> &T {
        &self.theme
    }

    /// Best-effort icon for `path`; directories fall back to the folder icon
    pub fn resolve(&self, path: &Path) -> Option<PathBuf> {
        resolve_with(&self.theme, path, ICON_SIZE).or_else(|| {
            if path.is_dir() {
                self.folder_icon.clone()
            } else {
                None
            }
        })
    }
}

impl IconResolver<FreedesktopTheme> {
    /// Resolver backed by the desktop's icon theme
    pub fn system(theme_name: Option<&str>) -> Self {
        Self::new(FreedesktopTheme::system(theme_name))
    }
}
