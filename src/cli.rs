use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// Uninstall targets - pick the files and folders of an application to delete
#[derive(Parser, Debug)]
#[command(name = "uninstall-targets")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Interactively choose what to delete under a directory
    Pick(PickArgs),

    /// Print the target tree and its default selection
    Show(ShowArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

#[derive(Args, Debug)]
pub struct PickArgs {
    /// Directory to pick targets from
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Delete the accepted selection instead of printing it
    #[arg(long)]
    pub delete: bool,

    /// With --delete, report what would be removed without removing it
    #[arg(short = 'n', long, requires = "delete")]
    pub dry_run: bool,

    /// Print the selection as JSON
    #[arg(long)]
    pub json: bool,

    /// Hide dot-files
    #[arg(long)]
    pub no_hidden: bool,

    /// Disable colors
    #[arg(long)]
    pub no_color: bool,
}

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Directory to show
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Expand every directory
    #[arg(short, long)]
    pub all: bool,

    /// Print the selection as JSON instead of the tree
    #[arg(long)]
    pub json: bool,

    /// Hide dot-files
    #[arg(long)]
    pub no_hidden: bool,
}
