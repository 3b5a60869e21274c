//! CLI type definitions: command enums and argument structs.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "osgdb")]
#[command(about = "Maintain the open source games database", long_about = None)]
pub(crate) struct Cli {
    /// Repository root containing README.md and entries/ (defaults to the saved root, then the current directory)
    #[arg(short, long, global = true)]
    pub root: Option<PathBuf>,

    /// Only show warnings and errors (suppress normal output)
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Enable verbose/debug logging (timestamps + debug-level messages)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Write log output to a file (ANSI codes stripped)
    #[arg(long, global = true)]
    pub logfile: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Read all entries and list validation findings
    Check,

    /// Report similar keywords, unknown dependencies and play links without platform
    Inconsistencies,

    /// Find lines of the entry template left in entries
    TemplateLeftovers,

    /// Sort and deduplicate the rejected games list
    CleanRejected,

    /// Drop backlog URLs already covered by entries or rejected games
    CleanBacklog,

    /// Probe every link in the entries (slow)
    Links {
        /// Request timeout in seconds
        #[arg(long, default_value_t = 20)]
        timeout: u64,
    },

    /// Probe every URL of the backlog (slow)
    BacklogLinks {
        /// Request timeout in seconds
        #[arg(long, default_value_t = 20)]
        timeout: u64,
    },

    /// Regenerate the TOC files and the README summary
    Tocs,

    /// Regenerate the statistics document
    Stats,

    /// Write the JSON snapshot for the web table
    ExportJson,

    /// Write the repository manifest
    Repos,

    /// Rewrite every entry in canonical form
    WriteEntries,

    /// Remove "Download: @see-home" fields and rewrite the entries
    StripDownloads,

    /// Read entries, report inconsistencies and regenerate every document
    All,

    /// Manage user settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Show the effective settings
    Show,

    /// Print the settings file path
    Path,

    /// Save a default repository root
    SetRoot {
        /// Repository root to remember
        path: PathBuf,
    },

    /// Forget the saved repository root
    ClearRoot,
}
