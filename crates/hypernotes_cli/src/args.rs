//! Command-line surface.
//!
//! Global options fall back to `HYPERNOTES_*` environment variables.

use clap::{Args, Parser, Subcommand};
use hypernotes_core::{PageId, TaskId};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "hypernotes", version, about = "Local pages and tasks with a bin and history")]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    /// View or action; defaults to `home`.
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, Args)]
pub struct GlobalOpts {
    /// Database file (created on first use).
    #[arg(long, global = true, env = "HYPERNOTES_DB_PATH")]
    pub db: Option<PathBuf>,

    /// trace|debug|info|warn|error.
    #[arg(long, global = true, env = "HYPERNOTES_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Absolute directory for rotating log files; logging is off without it.
    #[arg(long, global = true, env = "HYPERNOTES_LOG_DIR")]
    pub log_dir: Option<PathBuf>,

    /// Print JSON instead of text.
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List active pages, newest first.
    Home {
        /// Case-insensitive substring filter on page names.
        #[arg(long)]
        search: Option<String>,
    },
    /// Page actions.
    #[command(subcommand)]
    Page(PageCommand),
    /// Task actions.
    #[command(subcommand)]
    Task(TaskCommand),
    /// List soft-deleted pages and tasks.
    Bin,
    /// Show the most recent history entries.
    History {
        #[arg(long, default_value_t = 20)]
        limit: u32,
    },
}

#[derive(Debug, Subcommand)]
pub enum PageCommand {
    Create {
        name: String,
    },
    Rename {
        id: PageId,
        name: String,
    },
    Delete {
        id: PageId,
        /// Skip the confirmation prompt.
        #[arg(long, short)]
        yes: bool,
    },
    Restore {
        id: PageId,
    },
    /// Show one page with its active tasks.
    Show {
        id: PageId,
    },
}

#[derive(Debug, Subcommand)]
pub enum TaskCommand {
    Add {
        page_id: PageId,
        title: String,
    },
    /// Mark complete or incomplete.
    Toggle {
        id: TaskId,
        #[arg(long, short)]
        yes: bool,
    },
    /// Replace notes; reads stdin as live edits when TEXT is omitted.
    Notes {
        id: TaskId,
        text: Option<String>,
    },
    Delete {
        id: TaskId,
        #[arg(long, short)]
        yes: bool,
    },
    Restore {
        id: TaskId,
    },
}
