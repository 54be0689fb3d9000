// SPDX-License-Identifier: MIT OR Apache-2.0

//! Output helpers for JSON and colored text

use std::io::{self, IsTerminal, Write};

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;

use crate::presenter::{DisplayItem, ItemKind};

/// Print a value as JSON on stdout
pub fn print_json<T: Serialize + ?Sized>(value: &T, compact: bool) -> Result<()> {
    let rendered = if compact {
        serde_json::to_string(value)?
    } else {
        serde_json::to_string_pretty(value)?
    };
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{rendered}")?;
    Ok(())
}

/// Whether stdout should be colorized
pub fn use_colors() -> bool {
    std::env::var_os("NO_COLOR").is_none() && io::stdout().is_terminal()
}

/// Render items as an aligned text listing
pub fn render_items_text(items: &[DisplayItem]) -> String {
    let mut out = String::new();
    for item in items {
        let line = match item.kind {
            ItemKind::Error => format!("{} {}", "✗".red(), item.subtitle.red()),
            ItemKind::Match => format!(
                "{}  {}",
                item.title.cyan().bold(),
                item.subtitle.dimmed()
            ),
        };
        out.push_str(&line);
        out.push('\n');
    }
    out
}

/// Print items as text on stdout
pub fn print_items_text(items: &[DisplayItem]) -> Result<()> {
    colored::control::set_override(use_colors());
    let mut stdout = io::stdout().lock();
    write!(stdout, "{}", render_items_text(items))?;
    Ok(())
}
