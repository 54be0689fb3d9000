// SPDX-License-Identifier: MIT OR Apache-2.0

//! CLI argument parsing using clap

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// quickfind - fd-backed file and folder search for launchers
///
/// Turns a launcher keyword query into a list of result items, each with a
/// themed icon and open / open-parent actions.
#[derive(Parser, Debug)]
#[command(name = "quickfind")]
#[command(
    author,
    version,
    about,
    long_about = None,
    override_usage = "quickfind [OPTIONS] <COMMAND>",
    after_help = "Launcher quickstart:\n  quickfind query ff report pdf\n  quickfind --format text query fo music\n  quickfind open ~/docs/report.pdf"
)]
pub struct Cli {
    /// Output format (json or text)
    #[arg(long, global = true)]
    pub format: Option<OutputFormat>,

    /// Compact JSON output (no pretty formatting)
    #[arg(long, global = true)]
    pub compact: bool,

    /// Read configuration from this file instead of the default locations
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Log debug details to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Launcher items as a JSON array
    #[default]
    Json,
    Text,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Answer a launcher keyword query
    #[command(visible_aliases = ["q"])]
    Query {
        /// Trigger keyword (files or folders)
        keyword: String,

        /// Words to search for, matched in order; everything after the
        /// first word is search text, even if it starts with '-'
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        pattern: Vec<String>,

        /// Search root (default: config search_path, then ~)
        #[arg(short, long, value_name = "PATH")]
        root: Option<String>,

        /// Maximum number of results to return
        #[arg(short = 'm', long)]
        max_results: Option<usize>,

        /// Skip icon theme lookup and use the bundled images
        #[arg(long)]
        no_icons: bool,
    },

    /// Open a path with the desktop's default handler
    #[command(visible_aliases = ["o"])]
    Open {
        path: PathBuf,
    },

    /// Open the directory containing a path
    #[command(visible_aliases = ["open-parent"])]
    Reveal {
        path: PathBuf,
    },

    /// Print the effective configuration
    Config,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}
