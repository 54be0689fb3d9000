//! quickfind - fd-backed file and folder search for application launchers
//!
//! Shared modules for the quickfind CLI tool.

pub mod actions;
pub mod config;
pub mod errors;
pub mod extension;
pub mod finder;
pub mod icons;
pub mod logging;
pub mod output;
pub mod pattern;
pub mod presenter;

pub use extension::Extension;
pub use finder::{FdFinder, SearchKind, SearchRequest};
pub use presenter::{DisplayItem, ItemKind, Presenter, StaticIcons};
