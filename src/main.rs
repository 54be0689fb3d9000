//! quickfind - fd-backed file and folder search for launchers
//!
//! The launcher runs `quickfind query <keyword> <words...>` and renders the
//! JSON items it prints; activating an item runs `quickfind open` or
//! `quickfind reveal`.

mod cli;

use std::io;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use cli::{Cli, Commands, OutputFormat};
use colored::Colorize;

use quickfind::actions::Action;
use quickfind::config::{user_config_path, Config, Overrides, Preferences};
use quickfind::errors::suggestions;
use quickfind::output::{print_items_text, print_json};
use quickfind::{logging, Extension};

fn main() -> Result<()> {
    let Cli {
        format,
        compact,
        config,
        verbose,
        command,
    } = Cli::parse();
    logging::init(verbose);
    let format = format.unwrap_or_default();

    match command {
        Commands::Query {
            keyword,
            pattern,
            root,
            max_results,
            no_icons,
        } => {
            let overrides = Overrides {
                search_path: root,
                num_results: max_results,
                no_icons,
            };
            let prefs = load_preferences(config.as_deref(), &overrides)?;
            let extension = Extension::new(prefs);
            let argument = pattern.join(" ");
            let items = extension.handle(&keyword, Some(argument.as_str()));

            match format {
                OutputFormat::Json => print_json(&items, compact)?,
                OutputFormat::Text => print_items_text(&items)?,
            }
        }
        Commands::Open { path } => {
            Action::Open(path).launch()?;
        }
        Commands::Reveal { path } => {
            Action::OpenParent(path).launch()?;
        }
        Commands::Config => {
            let prefs = load_preferences(config.as_deref(), &Overrides::default())?;
            match format {
                OutputFormat::Json => print_json(&prefs, compact)?,
                OutputFormat::Text => print_summary(&prefs),
            }
        }
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "quickfind", &mut io::stdout());
        }
    }

    Ok(())
}

fn load_preferences(
    path: Option<&std::path::Path>,
    overrides: &Overrides,
) -> Result<Preferences> {
    let config = match path {
        Some(path) => Config::load_from(path)?,
        None => Config::load(),
    };
    config
        .resolve(overrides)
        .context("Failed to resolve quickfind configuration")
}

fn print_summary(prefs: &Preferences) {
    println!("{}", "Effective configuration:".bold());
    if let Some(path) = user_config_path() {
        println!("  User config:     {}", path.display());
    }
    println!("  File keyword:    {}", prefs.key_files.cyan());
    println!("  Folder keyword:  {}", prefs.key_folders.cyan());
    println!("  Search path:     {}", prefs.search_path.display());
    println!("  fd options:      {}", prefs.fd_options);
    println!("  Max results:     {}", prefs.num_results);
    println!(
        "  Icons:           {}",
        if prefs.query_icons { "theme" } else { "bundled" }
    );
    println!(
        "  Icon theme:      {}",
        prefs.icon_theme.as_deref().unwrap_or("(desktop default)")
    );
    println!("  Image dir:       {}", prefs.image_dir.display());
    match quickfind::FdFinder::detect(prefs.fd_command.as_deref()) {
        Some(finder) => println!("  fd:              {}", finder.program().display()),
        None => {
            println!("  fd:              {}", suggestions::FD_NOT_INSTALLED.red());
            println!("\n{}", suggestions::fd_install_hint());
        }
    }
}
