use std::path::PathBuf;

use clap::Parser;

use crate::cmd::Commands;

/// Simple, file-backed kanban board CLI.
/// Storage defaults to the most recent board under ~/.taskboard,
/// or a path passed via --board.
#[derive(Parser)]
#[command(name = "tb", version, about = "Kanban task board for the terminal")]
pub struct Cli {
    /// Path to the board JSON file.
    #[arg(long, global = true)]
    pub board: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}
