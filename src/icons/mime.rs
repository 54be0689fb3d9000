// SPDX-License-Identifier: MIT OR Apache-2.0

//! Content-type guessing from the shared-mime-info database.
//!
//! Only the parts needed to pick an icon are read: `globs2` (file name
//! patterns), `icons` and `generic-icons`. Patterns other than literal names
//! and `*.suffix` are skipped. Names no rule matches go through
//! `mime_guess`'s extension table.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

pub const DIRECTORY_MIME: &str = "inode/directory";
pub const UNKNOWN_MIME: &str = "application/octet-stream";

#[derive(Debug, Clone, PartialEq, Eq)]
struct SuffixRule {
    /// Includes the leading dot; lowercased unless `case_sensitive`
    suffix: String,
    mime: String,
    weight: u32,
    case_sensitive: bool,
}

/// Parsed subset of the shared-mime-info database
#[derive(Debug, Clone, Default)]
pub struct MimeDatabase {
    literals: HashMap<String, String>,
    suffixes: Vec<SuffixRule>,
    icons: HashMap<String, String>,
    generic_icons: HashMap<String, String>,
}

impl MimeDatabase {
    /// Load from `$XDG_DATA_HOME/mime` and `$XDG_DATA_DIRS/*/mime`
    pub fn system() -> Self {
        Self::load(&xdg_data_dirs())
    }

    /// Load from `<dir>/mime` for each data dir, earlier dirs taking priority
    pub fn load(data_dirs: &[PathBuf]) -> Self {
        let mut db = Self::default();
        for dir in data_dirs {
            let mime_dir = dir.join("mime");
            if let Ok(content) = fs::read_to_string(mime_dir.join("globs2")) {
                db.add_globs2(&content);
            }
            if let Ok(content) = fs::read_to_string(mime_dir.join("icons")) {
                add_icon_map(&mut db.icons, &content);
            }
            if let Ok(content) = fs::read_to_string(mime_dir.join("generic-icons")) {
                add_icon_map(&mut db.generic_icons, &content);
            }
        }
        debug!(
            literals = db.literals.len(),
            suffixes = db.suffixes.len(),
            "loaded mime database"
        );
        db
    }

    /// Merge one `globs2` file (`weight:mime:glob[:flags]` per line)
    pub fn add_globs2(&mut self, content: &str) {
        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let mut fields = line.splitn(4, ':');
            let (Some(weight), Some(mime), Some(glob)) =
                (fields.next(), fields.next(), fields.next())
            else {
                continue;
            };
            let Ok(weight) = weight.parse::<u32>() else {
                continue;
            };
            if glob == "__NOGLOBS__" {
                continue;
            }
            let case_sensitive = fields
                .next()
                .map(|flags| flags.split(',').any(|f| f == "cs"))
                .unwrap_or(false);

            if let Some(rest) = glob.strip_prefix('*') {
                if rest.starts_with('.') && !has_glob_meta(rest) {
                    let suffix = if case_sensitive {
                        rest.to_string()
                    } else {
                        rest.to_lowercase()
                    };
                    self.suffixes.push(SuffixRule {
                        suffix,
                        mime: mime.to_string(),
                        weight,
                        case_sensitive,
                    });
                }
            } else if !has_glob_meta(glob) {
                self.literals
                    .entry(glob.to_lowercase())
                    .or_insert_with(|| mime.to_string());
            }
        }
    }

    /// Guess the content type of a file by name
    pub fn guess_file(&self, file_name: &str) -> String {
        if let Some(mime) = self.literals.get(&file_name.to_lowercase()) {
            return mime.clone();
        }

        let lower = file_name.to_lowercase();
        let best = self
            .suffixes
            .iter()
            .filter(|rule| {
                if rule.case_sensitive {
                    file_name.ends_with(&rule.suffix)
                } else {
                    lower.ends_with(&rule.suffix)
                }
            })
            .max_by(|a, b| {
                a.suffix
                    .len()
                    .cmp(&b.suffix.len())
                    .then(a.weight.cmp(&b.weight))
            });
        if let Some(rule) = best {
            return rule.mime.clone();
        }

        // No shared-mime-info rule matched; fall back to the extension table.
        mime_guess::from_path(file_name)
            .first_or_octet_stream()
            .essence_str()
            .to_string()
    }

    /// Guess the content type of `path`
    pub fn guess(&self, path: &Path, is_dir: bool) -> String {
        if is_dir {
            return DIRECTORY_MIME.to_string();
        }
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        self.guess_file(&name)
    }

    /// Icon names for a content type, most specific first
    pub fn icon_names(&self, mime: &str) -> Vec<String> {
        let mut names = Vec::with_capacity(3);
        if let Some(icon) = self.icons.get(mime) {
            names.push(icon.clone());
        }
        names.push(mime.replace('/', "-"));
        if mime == DIRECTORY_MIME {
            names.push("folder".to_string());
        }
        match self.generic_icons.get(mime) {
            Some(generic) => names.push(generic.clone()),
            None => {
                let media = mime.split('/').next().unwrap_or("application");
                names.push(format!("{media}-x-generic"));
            }
        }
        names
    }
}

fn add_icon_map(map: &mut HashMap<String, String>, content: &str) {
    for line in content.lines() {
        if let Some((mime, icon)) = line.trim().split_once(':') {
            map.entry(mime.to_string())
                .or_insert_with(|| icon.to_string());
        }
    }
}

fn has_glob_meta(text: &str) -> bool {
    text.contains(['*', '?', '['])
}

/// `$XDG_DATA_HOME` followed by `$XDG_DATA_DIRS`
pub fn xdg_data_dirs() -> Vec<PathBuf> {
    let mut dirs_out = Vec::new();
    if let Some(home) = dirs::data_dir() {
        dirs_out.push(home);
    }
    let system = std::env::var("XDG_DATA_DIRS")
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| "/usr/local/share:/usr/share".to_string());
    for dir in system.split(':').filter(|d| !d.is_empty()) {
        let dir = PathBuf::from(dir);
        if !dirs_out.contains(&dir) {
            dirs_out.push(dir);
        }
    }
    dirs_out
}
