use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "teleport",
    about = "Tool for rapidly switching between directories",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Directory containing the warp point file (default: home directory)
    #[arg(long, global = true, env = "TELEPORT_HOME")]
    pub home: Option<PathBuf>,

    /// Name of the warp point file (default: .tp)
    #[arg(long, global = true, env = "TELEPORT_FILE")]
    pub file: Option<String>,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Add a warp point to the current directory or to the specified directory
    #[command(visible_alias = "a")]
    Add(AddArgs),
    /// Remove the warp point to the current directory or the specified warp points
    #[command(visible_alias = "rm")]
    Remove(RemoveArgs),
    /// List warp points
    #[command(visible_alias = "ls")]
    List(ListArgs),
    /// Print the directory of a warp point
    #[command(visible_alias = "w")]
    Warp(WarpArgs),
    /// Remove warp points whose target directory no longer exists
    Prune(PruneArgs),
}

#[derive(Args)]
pub struct AddArgs {
    pub key: String,
    pub dir: Option<PathBuf>,
}

#[derive(Args)]
pub struct RemoveArgs {
    pub keys: Vec<String>,
}

#[derive(Args)]
pub struct ListArgs {}

#[derive(Args)]
pub struct WarpArgs {
    pub key: String,
}

#[derive(Args)]
pub struct PruneArgs {}
