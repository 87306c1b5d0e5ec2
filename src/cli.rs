use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// dope - tasks, lessons and links from Markdown note vaults
///
/// # Quick Reference
///
/// ## Vaults
///
/// ```bash
/// dope vault add ~/notes/work ~/notes/home   # Register vault directories
/// dope vault list                            # Show configured vaults
/// dope vault drop ~/notes/home               # Forget a vault
/// ```
///
/// ## Tasks
///
/// Tag a line with `#<x|n|w>/<p1|p2|p3>/<YYYY-MM-DD>`:
///
/// ```text
/// - [ ] #x/p2/2024-12-31 renew the passport
/// ```
///
/// ```bash
/// dope tasks                  # All tasks, most urgent last
/// dope tasks --now --nxt      # Only current and next actions
/// dope tasks -p 12            # Only priorities 1 and 2
/// dope -v work tasks          # Only vaults whose name contains "work"
/// ```
///
/// ## Lessons
///
/// Tag a line with `#edu/<course>/<size>/<x|n|w>`:
///
/// ```bash
/// dope edu                    # Lessons grouped by course, size and action
/// ```
///
/// ## Links
///
/// ```bash
/// dope links check            # Validate internal Markdown links
/// dope links check --wiki     # Validate Wiki links instead
/// dope links list             # Print every link with its status
/// dope links mark-broken      # Preview replacing missing targets with broken:
/// dope links mark-broken --execute --force
/// ```
///
/// ## Lint
///
/// ```bash
/// dope lint                   # CRLF endings, missing final newline, reserved characters
/// ```
///
/// ## Environment Variables
///
/// - `DOPE_CONFIG_DIR`: Directory holding vaults.json (default: platform config dir + /dope)
/// - `DOPE_TODAY`: Pin today's date (YYYY-MM-DD)
/// - `RUST_LOG`: Log filter, e.g. `dope=debug`
///
#[derive(Parser, Debug)]
#[command(name = "dope")]
#[command(version)]
#[command(about = "Scan Markdown note vaults for tasks, lessons and links")]
pub struct Cli {
    /// Directory holding vaults.json (default: $DOPE_CONFIG_DIR or platform config dir)
    #[arg(long, value_name = "DIR", global = true)]
    pub config_dir: Option<PathBuf>,

    /// Only use vaults whose directory name contains FILTER (repeatable)
    #[arg(short, long = "vault", value_name = "FILTER", global = true)]
    pub vaults: Vec<String>,

    /// Log at debug level
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List tasks, most urgent last
    #[command(alias = "t")]
    Tasks(TasksArgs),

    /// List lessons grouped by course, size and action
    Edu,

    /// Check and manage links between notes
    #[command(subcommand)]
    Links(LinksCommand),

    /// Manage the configured vaults
    #[command(subcommand)]
    Vault(VaultCommand),

    /// Check note files for line ending and naming problems
    Lint,
}

#[derive(Args, Debug, Default)]
pub struct TasksArgs {
    /// Current actions (#n)
    #[arg(long)]
    pub now: bool,

    /// Next actions (#x)
    #[arg(long)]
    pub nxt: bool,

    /// Pending actions, waiting on someone (#w)
    #[arg(long)]
    pub w8: bool,

    /// Priorities to show, any combination of 1, 2 and 3
    #[arg(short, long, default_value = "123")]
    pub priorities: String,
}

#[derive(Subcommand, Debug)]
pub enum LinksCommand {
    /// Report internal links whose target does not exist
    Check {
        /// Check Wiki links instead of Markdown links
        #[arg(long)]
        wiki: bool,

        /// Stop at the first missing target
        #[arg(long)]
        fail_fast: bool,
    },

    /// List all links with their resolution
    List {
        /// List Wiki links instead of Markdown links
        #[arg(long)]
        wiki: bool,
    },

    /// Replace targets of missing internal links with `broken:`
    MarkBroken {
        /// Operate on Wiki links instead of Markdown links
        #[arg(long)]
        wiki: bool,

        /// Actually rewrite the notes (default is dry-run)
        #[arg(short, long)]
        execute: bool,

        /// Skip confirmation prompt when rewriting
        #[arg(short = 'f', long)]
        force: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum VaultCommand {
    /// Add vault directories
    Add {
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },

    /// List configured vaults
    #[command(alias = "ls")]
    List,

    /// Remove vault directories
    Drop {
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },
}
