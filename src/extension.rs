// SPDX-License-Identifier: MIT OR Apache-2.0

//! Keyword routing: one launcher query in, a list of items out.

use tracing::{debug, error};

use crate::config::Preferences;
use crate::errors::suggestions::FD_NOT_INSTALLED;
use crate::finder::{FdFinder, SearchKind, SearchRequest};
use crate::icons::{FreedesktopTheme, IconResolver, IconTheme};
use crate::presenter::{error_item, DisplayItem, Presenter, StaticIcons};

/// Long-lived state shared by every query of a launcher session
pub struct Extension<T = FreedesktopTheme> {
    prefs: Preferences,
    finder: Option<FdFinder>,
    icons: Option<IconResolver<T>>,
    defaults: StaticIcons,
}

impl Extension<FreedesktopTheme> {
    /// Detect fd and load the icon theme once
    pub fn new(prefs: Preferences) -> Self {
        let finder = FdFinder::detect(prefs.fd_command.as_deref());
        let icons = prefs
            .query_icons
            .then(|| IconResolver::system(prefs.icon_theme.as_deref()));
        Self::with_parts(prefs, finder, icons)
    }
}

impl<T: IconTheme> Extension<T> {
    pub fn with_parts(
        prefs: Preferences,
        finder: Option<FdFinder>,
        icons: Option<IconResolver<T>>,
    ) -> Self {
        let defaults = StaticIcons::new(prefs.image_dir.clone());
        Self {
            prefs,
            finder,
            icons,
            defaults,
        }
    }

    pub fn preferences(&self) -> &Preferences {
        &self.prefs
    }

    pub fn finder(&self) -> Option<&FdFinder> {
        self.finder.as_ref()
    }

    /// Which search a trigger keyword selects
    pub fn kind_for(&self, keyword: &str) -> Option<SearchKind> {
        if keyword == self.prefs.key_files {
            Some(SearchKind::File)
        } else if keyword == self.prefs.key_folders {
            Some(SearchKind::Dir)
        } else {
            None
        }
    }

    /// Answer one keyword query
    pub fn handle(&self, keyword: &str, argument: Option<&str>) -> Vec<DisplayItem> {
        let Some(finder) = &self.finder else {
            error!("{FD_NOT_INSTALLED}");
            return vec![error_item(&self.defaults, FD_NOT_INSTALLED)];
        };

        let pattern = match argument {
            Some(arg) if !arg.trim().is_empty() => arg,
            _ => return Vec::new(),
        };

        let Some(kind) = self.kind_for(keyword) else {
            debug!(keyword, "keyword matches no trigger");
            return Vec::new();
        };

        let request = SearchRequest {
            pattern: pattern.to_string(),
            kind,
            root: self.prefs.search_path.clone(),
            extra_flags: self.prefs.fd_options.clone(),
            max_results: self.prefs.num_results,
        };

        let presenter = Presenter::new(self.icons.as_ref(), &self.defaults);
        finder
            .search(&request)
            .iter()
            .map(|path| presenter.present(path, self.prefs.query_icons))
            .collect()
    }
}
