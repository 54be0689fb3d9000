// SPDX-License-Identifier: MIT OR Apache-2.0

//! Turn matched paths into items the launcher can render

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::actions::Action;
use crate::icons::{IconResolver, IconTheme};

/// What a row stands for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ItemKind {
    /// A path fd matched
    #[default]
    Match,
    /// The single row shown when searching is impossible
    Error,
}

/// One row in the launcher's result list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayItem {
    /// Not part of the launcher protocol
    #[serde(skip)]
    pub kind: ItemKind,
    /// Image file shown next to the row; never empty
    pub icon: PathBuf,
    /// Final path component
    #[serde(rename = "name")]
    pub title: String,
    /// Parent directory
    #[serde(rename = "description")]
    pub subtitle: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub on_enter: Option<Action>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub on_alt_enter: Option<Action>,
}

/// Bundled images used when no themed icon is available
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticIcons {
    dir: PathBuf,
}

impl StaticIcons {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn folder(&self) -> PathBuf {
        self.dir.join("folder.svg")
    }

    pub fn file(&self) -> PathBuf {
        self.dir.join("file.svg")
    }

    pub fn error(&self) -> PathBuf {
        self.dir.join("error.svg")
    }

    /// Folder image for directories, file image for everything else
    pub fn for_path(&self, path: &Path) -> PathBuf {
        if path.is_dir() {
            self.folder()
        } else {
            self.file()
        }
    }
}

/// Maps paths to [`DisplayItem`]s
pub struct Presenter<'a, T> {
    icons: Option<&'a IconResolver<T>>,
    defaults: &'a StaticIcons,
}

impl<'a, T: IconTheme> Presenter<'a, T> {
    pub fn new(icons: Option<&'a IconResolver<T>>, defaults: &'a StaticIcons) -> Self {
        Self { icons, defaults }
    }

    /// Build the item for `path`, consulting the icon theme only if `want_icon`
    pub fn present(&self, path: &str, want_icon: bool) -> DisplayItem {
        let path = PathBuf::from(path);

        let themed = if want_icon {
            self.icons.and_then(|resolver| resolver.resolve(&path))
        } else {
            None
        };
        let icon = themed
            .filter(|icon| !icon.as_os_str().is_empty())
            .unwrap_or_else(|| self.defaults.for_path(&path));

        let title = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| path.to_string_lossy().to_string());
        let subtitle = path
            .parent()
            .map(|parent| parent.to_string_lossy().to_string())
            .unwrap_or_default();

        DisplayItem {
            kind: ItemKind::Match,
            icon,
            title,
            subtitle,
            on_enter: Some(Action::Open(path.clone())),
            on_alt_enter: Some(Action::OpenParent(path)),
        }
    }
}

/// The single item shown when searching is impossible
pub fn error_item(defaults: &StaticIcons, message: &str) -> DisplayItem {
    DisplayItem {
        kind: ItemKind::Error,
        icon: defaults.error(),
        title: "Error".to_string(),
        subtitle: message.to_string(),
        on_enter: None,
        on_alt_enter: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::icons::testing::StubTheme;
    use crate::icons::IconDescriptor;
    use tempfile::TempDir;

    fn defaults() -> StaticIcons {
        StaticIcons::new("images")
    }

    #[test]
    fn disabled_icons_use_static_file_image() {
        let defaults = defaults();
        let presenter: Presenter<'_, StubTheme> = Presenter::new(None, &defaults);

        let item = presenter.present("/home/u/docs/report.pdf", false);
        assert_eq!(item.kind, ItemKind::Match);
        assert_eq!(item.title, "report.pdf");
        assert_eq!(item.subtitle, "/home/u/docs");
        assert_eq!(item.icon, PathBuf::from("images/file.svg"));
        assert_eq!(
            item.on_enter,
            Some(Action::Open(PathBuf::from("/home/u/docs/report.pdf")))
        );
        assert_eq!(
            item.on_alt_enter.map(|a| a.target()),
            Some(PathBuf::from("/home/u/docs"))
        );
    }

    #[test]
    fn disabled_icons_never_consult_theme() {
        let dir = TempDir::new().expect("tempdir");
        let resolver = IconResolver::new(StubTheme::default());
        let calls_after_init = resolver.theme().describe_calls.get();
        let defaults = defaults();
        let presenter = Presenter::new(Some(&resolver), &defaults);

        let item = presenter.present(&dir.path().to_string_lossy(), false);
        assert_eq!(item.icon, PathBuf::from("images/folder.svg"));
        assert_eq!(resolver.theme().describe_calls.get(), calls_after_init);
    }

    #[test]
    fn themed_icon_is_used_when_found() {
        let mut theme = StubTheme::default();
        theme.descriptors.insert(
            PathBuf::from("/x/song.mp3"),
            IconDescriptor::Themed(vec!["audio-mpeg".to_string()]),
        );
        theme
            .files
            .insert("audio-mpeg".to_string(), PathBuf::from("/icons/audio.png"));
        let resolver = IconResolver::new(theme);
        let defaults = defaults();
        let presenter = Presenter::new(Some(&resolver), &defaults);

        let item = presenter.present("/x/song.mp3", true);
        assert_eq!(item.icon, PathBuf::from("/icons/audio.png"));
    }

    #[test]
    fn failing_theme_still_yields_icon() {
        let resolver = IconResolver::new(StubTheme {
            fail_all: true,
            ..StubTheme::default()
        });
        let defaults = defaults();
        let presenter = Presenter::new(Some(&resolver), &defaults);

        let item = presenter.present("/nowhere/notes.txt", true);
        assert_eq!(item.icon, PathBuf::from("images/file.svg"));
        assert!(!item.icon.as_os_str().is_empty());
    }

    #[test]
    fn root_path_keeps_non_empty_title() {
        let defaults = defaults();
        let presenter: Presenter<'_, StubTheme> = Presenter::new(None, &defaults);
        let item = presenter.present("/", false);
        assert_eq!(item.title, "/");
        assert_eq!(item.subtitle, "");
        assert_eq!(item.icon, PathBuf::from("images/folder.svg"));
    }

    #[test]
    fn error_item_has_fixed_title_and_no_actions() {
        let item = error_item(&defaults(), "fd is not installed");
        assert_eq!(item.kind, ItemKind::Error);
        assert_eq!(item.title, "Error");
        assert_eq!(item.subtitle, "fd is not installed");
        assert_eq!(item.icon, PathBuf::from("images/error.svg"));
        assert!(item.on_enter.is_none());

        let json = serde_json::to_value(&item).expect("serialize");
        assert_eq!(json["name"], "Error");
        assert_eq!(json["description"], "fd is not installed");
        assert!(json.get("on_enter").is_none());
        assert!(json.get("kind").is_none());
    }
}
