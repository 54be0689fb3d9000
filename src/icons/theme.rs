// SPDX-License-Identifier: MIT OR Apache-2.0

//! freedesktop.org icon theme lookup.
//!
//! The theme's directory layout is scanned once when the theme is built.
//! Lookups then only probe candidate files, nearest size first.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::mime::{xdg_data_dirs, MimeDatabase};
use super::{IconDescriptor, IconLookupError, IconTheme};

const FALLBACK_THEME: &str = "hicolor";
const PIXMAPS_DIR: &str = "/usr/share/pixmaps";
const ICON_EXTENSIONS: &[&str] = &["png", "svg", "xpm"];

/// Size class of a theme subdirectory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DirSize {
    Fixed(u32),
    Scalable,
}

impl DirSize {
    /// Parse `32x32`, `32x32@2`, `32`, or `scalable`
    fn parse(name: &str) -> Option<Self> {
        if name == "scalable" {
            return Some(DirSize::Scalable);
        }
        let base = name.split('@').next().unwrap_or(name);
        let first = base.split('x').next().unwrap_or(base);
        first.parse().ok().map(DirSize::Fixed)
    }

    /// Lower ranks are tried first
    fn rank(self, size: u32) -> u32 {
        match self {
            DirSize::Fixed(s) if s == size => 0,
            DirSize::Scalable => 1,
            DirSize::Fixed(s) => 2 + s.abs_diff(size),
        }
    }
}

#[derive(Debug, Clone)]
struct ThemeDirs {
    name: String,
    dirs: Vec<(DirSize, PathBuf)>,
}

/// Icon theme resolved from the XDG icon directories
#[derive(Debug, Clone)]
pub struct FreedesktopTheme {
    mime: MimeDatabase,
    themes: Vec<ThemeDirs>,
    pixmaps: Vec<PathBuf>,
}

impl FreedesktopTheme {
    /// Theme named `explicit`, else the desktop's configured theme
    pub fn system(explicit: Option<&str>) -> Self {
        let name = explicit
            .map(str::to_string)
            .or_else(detect_theme_name)
            .unwrap_or_else(|| FALLBACK_THEME.to_string());
        let data_dirs = xdg_data_dirs();
        Self::with_dirs(
            &name,
            &icon_base_dirs(&data_dirs),
            MimeDatabase::load(&data_dirs),
            vec![PathBuf::from(PIXMAPS_DIR)],
        )
    }

    /// Build a theme from explicit base directories
    pub fn with_dirs(
        name: &str,
        base_dirs: &[PathBuf],
        mime: MimeDatabase,
        pixmaps: Vec<PathBuf>,
    ) -> Self {
        let themes: Vec<ThemeDirs> = inheritance_chain(name, base_dirs)
            .into_iter()
            .map(|theme| ThemeDirs {
                dirs: scan_theme(&theme, base_dirs),
                name: theme,
            })
            .collect();

        debug!(
            chain = ?themes.iter().map(|t| t.name.as_str()).collect::<Vec<_>>(),
            "icon theme ready"
        );

        Self {
            mime,
            themes,
            pixmaps,
        }
    }

    /// Theme names in lookup order
    pub fn chain(&self) -> Vec<&str> {
        self.themes.iter().map(|t| t.name.as_str()).collect()
    }
}

impl IconTheme for FreedesktopTheme {
    fn describe(&self, path: &Path) -> Result<IconDescriptor, IconLookupError> {
        let metadata = fs::metadata(path).map_err(|source| IconLookupError::Metadata {
            path: path.to_path_buf(),
            source,
        })?;

        if metadata.is_dir() {
            if let Some(icon) = directory_file_icon(path) {
                return Ok(IconDescriptor::Serialized(icon));
            }
        }

        let mime = self.mime.guess(path, metadata.is_dir());
        Ok(IconDescriptor::Themed(self.mime.icon_names(&mime)))
    }

    fn lookup(&self, name: &str, size: u32) -> Option<PathBuf> {
        let as_path = Path::new(name);
        if as_path.is_absolute() {
            return as_path.is_file().then(|| as_path.to_path_buf());
        }

        for theme in &self.themes {
            let mut dirs: Vec<&(DirSize, PathBuf)> = theme.dirs.iter().collect();
            dirs.sort_by_key(|(dir_size, _)| dir_size.rank(size));
            if let Some(found) = dirs.iter().find_map(|(_, dir)| probe(dir, name)) {
                return Some(found);
            }
        }

        self.pixmaps.iter().find_map(|dir| probe(dir, name))
    }
}

fn probe(dir: &Path, name: &str) -> Option<PathBuf> {
    ICON_EXTENSIONS
        .iter()
        .map(|ext| dir.join(format!("{name}.{ext}")))
        .find(|candidate| candidate.is_file())
}

/// `$XDG_DATA_HOME/icons`, `~/.icons`, then `$XDG_DATA_DIRS/*/icons`
pub fn icon_base_dirs(data_dirs: &[PathBuf]) -> Vec<PathBuf> {
    let mut bases = Vec::new();
    let mut push = |dir: PathBuf| {
        if !bases.contains(&dir) {
            bases.push(dir);
        }
    };
    let mut rest = data_dirs.iter();
    if let Some(first) = rest.next() {
        push(first.join("icons"));
    }
    if let Some(home) = dirs::home_dir() {
        push(home.join(".icons"));
    }
    for dir in rest {
        push(dir.join("icons"));
    }
    bases
}

/// `name`, everything it inherits from, and finally hicolor
fn inheritance_chain(name: &str, base_dirs: &[PathBuf]) -> Vec<String> {
    let mut chain = Vec::new();
    let mut seen = HashSet::new();
    let mut queue = vec![name.to_string()];

    while let Some(theme) = queue.pop() {
        if !seen.insert(theme.clone()) {
            continue;
        }
        let parents = read_inherits(&theme, base_dirs);
        chain.push(theme);
        // Parents are searched in the order listed.
        for parent in parents.into_iter().rev() {
            queue.push(parent);
        }
    }

    if !seen.contains(FALLBACK_THEME) {
        chain.push(FALLBACK_THEME.to_string());
    }
    chain
}

fn read_inherits(theme: &str, base_dirs: &[PathBuf]) -> Vec<String> {
    let Some(content) = base_dirs
        .iter()
        .find_map(|base| fs::read_to_string(base.join(theme).join("index.theme")).ok())
    else {
        return Vec::new();
    };

    ini_value(&content, "Icon Theme", "Inherits")
        .map(|value| {
            value
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// Every directory of `theme` that can hold icons, across all base dirs.
///
/// Handles both `32x32/mimetypes` and `mimetypes/32` layouts.
fn scan_theme(theme: &str, base_dirs: &[PathBuf]) -> Vec<(DirSize, PathBuf)> {
    let mut found = Vec::new();
    for base in base_dirs {
        let root = base.join(theme);
        for top in subdirs(&root) {
            let top_name = dir_name(&top);
            match DirSize::parse(&top_name) {
                Some(size) => {
                    found.extend(subdirs(&top).into_iter().map(|ctx| (size, ctx)));
                    // Some themes keep icons directly in the size dir.
                    found.push((size, top));
                }
                None => {
                    for child in subdirs(&top) {
                        if let Some(size) = DirSize::parse(&dir_name(&child)) {
                            found.push((size, child));
                        }
                    }
                }
            }
        }
    }
    found.sort_by(|a, b| a.1.cmp(&b.1));
    found
}

fn subdirs(dir: &Path) -> Vec<PathBuf> {
    let Ok(entries) = fs::read_dir(dir) else {
        return Vec::new();
    };
    let mut out: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_dir())
        .collect();
    out.sort();
    out
}

fn dir_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default()
}

/// Custom folder icon from a `.directory` file (`[Desktop Entry] Icon=`)
fn directory_file_icon(dir: &Path) -> Option<String> {
    let content = fs::read_to_string(dir.join(".directory")).ok()?;
    ini_value(&content, "Desktop Entry", "Icon")
        .map(str::trim)
        .filter(|icon| !icon.is_empty())
        .map(str::to_string)
}

/// GTK's configured icon theme, if any
fn detect_theme_name() -> Option<String> {
    let config = dirs::config_dir()?;
    ["gtk-3.0", "gtk-4.0"].iter().find_map(|version| {
        let content = fs::read_to_string(config.join(version).join("settings.ini")).ok()?;
        ini_value(&content, "Settings", "gtk-icon-theme-name")
            .map(|v| v.trim().trim_matches('"').to_string())
            .filter(|v| !v.is_empty())
    })
}

/// Value of `key` inside `[section]` of an ini-style file
fn ini_value<'a>(content: &'a str, section: &str, key: &str) -> Option<&'a str> {
    let mut in_section = false;
    for line in content.lines() {
        let line = line.trim();
        if line.starts_with('[') && line.ends_with(']') {
            in_section = &line[1..line.len() - 1] == section;
            continue;
        }
        if !in_section {
            continue;
        }
        if let Some((k, v)) = line.split_once('=') {
            if k.trim() == key {
                return Some(v.trim());
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn touch(path: &Path) {
        fs::create_dir_all(path.parent().expect("parent")).expect("mkdir");
        fs::write(path, "<svg/>").expect("write icon");
    }

    fn theme_at(base: &Path, name: &str) -> FreedesktopTheme {
        FreedesktopTheme::with_dirs(
            name,
            &[base.to_path_buf()],
            MimeDatabase::default(),
            vec![base.join("pixmaps")],
        )
    }

    #[test]
    fn dir_size_parses_common_layouts() {
        assert_eq!(DirSize::parse("32x32"), Some(DirSize::Fixed(32)));
        assert_eq!(DirSize::parse("32x32@2"), Some(DirSize::Fixed(32)));
        assert_eq!(DirSize::parse("48"), Some(DirSize::Fixed(48)));
        assert_eq!(DirSize::parse("scalable"), Some(DirSize::Scalable));
        assert_eq!(DirSize::parse("mimetypes"), None);
    }

    #[test]
    fn exact_size_beats_scalable_and_other_sizes() {
        let dir = TempDir::new().expect("tempdir");
        let base = dir.path();
        touch(&base.join("Test/16x16/mimetypes/text-x-generic.png"));
        touch(&base.join("Test/scalable/mimetypes/text-x-generic.svg"));
        touch(&base.join("Test/32x32/mimetypes/text-x-generic.png"));

        let theme = theme_at(base, "Test");
        assert_eq!(
            theme.lookup("text-x-generic", 32),
            Some(base.join("Test/32x32/mimetypes/text-x-generic.png"))
        );
        assert_eq!(
            theme.lookup("text-x-generic", 64),
            Some(base.join("Test/scalable/mimetypes/text-x-generic.svg"))
        );
    }

    #[test]
    fn context_first_layout_is_supported() {
        let dir = TempDir::new().expect("tempdir");
        let base = dir.path();
        touch(&base.join("breeze/places/32/folder.svg"));

        let theme = theme_at(base, "breeze");
        assert_eq!(
            theme.lookup("folder", 32),
            Some(base.join("breeze/places/32/folder.svg"))
        );
    }

    #[test]
    fn inherited_themes_and_hicolor_are_searched() {
        let dir = TempDir::new().expect("tempdir");
        let base = dir.path();
        fs::create_dir_all(base.join("Child")).expect("mkdir");
        fs::write(
            base.join("Child/index.theme"),
            "[Icon Theme]\nName=Child\nInherits=Parent\n",
        )
        .expect("index.theme");
        touch(&base.join("Parent/32x32/places/folder.png"));
        touch(&base.join("hicolor/32x32/apps/app.png"));
        touch(&base.join("pixmaps/legacy.xpm"));

        let theme = theme_at(base, "Child");
        assert_eq!(theme.chain(), vec!["Child", "Parent", "hicolor"]);
        assert_eq!(
            theme.lookup("folder", 32),
            Some(base.join("Parent/32x32/places/folder.png"))
        );
        assert_eq!(
            theme.lookup("app", 32),
            Some(base.join("hicolor/32x32/apps/app.png"))
        );
        assert_eq!(
            theme.lookup("legacy", 32),
            Some(base.join("pixmaps/legacy.xpm"))
        );
        assert_eq!(theme.lookup("missing", 32), None);
    }

    #[test]
    fn inheritance_cycles_terminate() {
        let dir = TempDir::new().expect("tempdir");
        let base = dir.path();
        for (name, parent) in [("A", "B"), ("B", "A")] {
            fs::create_dir_all(base.join(name)).expect("mkdir");
            fs::write(
                base.join(name).join("index.theme"),
                format!("[Icon Theme]\nInherits={parent}\n"),
            )
            .expect("index.theme");
        }
        assert_eq!(theme_at(base, "A").chain(), vec!["A", "B", "hicolor"]);
    }

    #[test]
    fn describe_files_and_directories() {
        let dir = TempDir::new().expect("tempdir");
        let file = dir.path().join("report.pdf");
        fs::write(&file, "%PDF").expect("write");

        let theme = theme_at(dir.path(), "hicolor");
        assert_eq!(
            theme.describe(&file).expect("describe file"),
            IconDescriptor::Themed(vec![
                "application-pdf".to_string(),
                "application-x-generic".to_string()
            ])
        );

        let custom = dir.path().join("music");
        fs::create_dir(&custom).expect("mkdir");
        fs::write(
            custom.join(".directory"),
            "[Desktop Entry]\nIcon=folder-music\n",
        )
        .expect(".directory");
        assert_eq!(
            theme.describe(&custom).expect("describe dir"),
            IconDescriptor::Serialized("folder-music".to_string())
        );
    }

    #[test]
    fn describe_missing_path_is_an_error() {
        let dir = TempDir::new().expect("tempdir");
        let theme = theme_at(dir.path(), "hicolor");
        assert!(theme.describe(&dir.path().join("gone")).is_err());
    }

    #[test]
    fn absolute_icon_names_resolve_to_themselves() {
        let dir = TempDir::new().expect("tempdir");
        let icon = dir.path().join("custom.png");
        touch(&icon);
        let theme = theme_at(dir.path(), "hicolor");
        let name = icon.to_string_lossy().to_string();
        assert_eq!(theme.lookup(&name, 32), Some(icon));
    }
}
