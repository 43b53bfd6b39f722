//! # TB - Kanban Task Board
//!
//! A file-backed kanban board for the terminal: status columns, card
//! filtering, and keyboard-driven drag-and-drop, plus a full CLI for
//! scripted use.
//!
//! ## Key Features
//!
//! - **Kanban Columns**: To Do / In Progress / In Review / Done, with
//!   move and reorder operations that mirror pointer drag-and-drop
//! - **Rich Card Metadata**: kind, priority, labels, assignee, branch,
//!   due dates
//! - **Conjunctive Filtering**: search, kind, priority, assignee and
//!   AND-composed label filters, shared by the CLI and the TUI
//! - **Multiple Interfaces**: full CLI for automation + interactive TUI
//!   for visual management
//! - **Multi-Board Support**: boards as individual local JSON files with
//!   CSV export/import and backup functionality
//!
//! ## Quick Start
//!
//! ```bash
//! # Launch the board selection menu
//! tb menu
//!
//! # Or open the most recent board directly
//! tb ui
//!
//! # Add a card via CLI
//! tb add "Fix dashboard memory leak" --kind bug --priority urgent --label perf
//!
//! # List cards
//! tb list
//!
//! # Move a card between columns
//! tb move 3 in-progress
//! ```
//!
//! Data is stored locally in `~/.taskboard/` with each board as a separate
//! JSON file. We recommend you source control this folder via `git init`
//! and back it up periodically.

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

pub mod board;
pub mod cli;
pub mod cmd;
pub mod drag;
pub mod fields;
pub mod filter;
pub mod project;
pub mod task;
pub mod tui {
    pub mod app;
    pub mod colors;
    pub mod enums;
    pub mod input;
    pub mod menu;
    pub mod run;
    pub mod task_form;
    pub mod utils;
}

use board::Board;
use cli::Cli;
use cmd::*;
use project::*;

fn main() {
    // Diagnostics land on stderr and stay silent unless TB_LOG is set.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_env("TB_LOG"))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // Determine the boards directory
    let boards_dir = if let Some(board_path) = cli.board.as_ref() {
        board_path
            .parent()
            .unwrap_or_else(|| std::path::Path::new("."))
            .to_path_buf()
    } else {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
        let boards_dir = PathBuf::from(home).join(".taskboard");
        if let Err(e) = std::fs::create_dir_all(&boards_dir) {
            eprintln!("Failed to create boards directory {}: {}", boards_dir.display(), e);
            std::process::exit(1);
        }
        boards_dir
    };

    // Handle commands that don't need a specific board first
    match &cli.command {
        Commands::Menu => {
            cmd_menu(&boards_dir);
            return;
        }
        Commands::Backup { all: true } => {
            cmd_backup_all(&boards_dir);
            return;
        }
        Commands::Ui => {
            // For UI, open the given board, else the most recent one,
            // else fall back to the menu.
            if let Some(board_path) = cli.board.as_ref() {
                cmd_ui(board_path);
            } else {
                match get_most_recent_project(&boards_dir) {
                    Ok(Some(project)) => {
                        println!("Opening recent board: {}", project.display_name);
                        cmd_ui(&project.file_path);
                    }
                    _ => cmd_menu(&boards_dir),
                }
            }
            return;
        }
        _ => {}
    }

    // For all other commands, determine the board file to use
    let board_path = cli.board.unwrap_or_else(|| {
        // Check if there's a legacy board.json file
        let legacy_path = boards_dir.join("board.json");
        if legacy_path.exists() {
            legacy_path
        } else {
            match discover_projects(&boards_dir) {
                Ok(projects) if !projects.is_empty() => projects[0].file_path.clone(),
                _ => {
                    // Create a default board
                    let default_project = Project::new("Default", &boards_dir);
                    if let Err(e) = default_project.create_if_not_exists() {
                        eprintln!("Failed to create default board: {}", e);
                        std::process::exit(1);
                    }
                    default_project.file_path
                }
            }
        }
    });

    let mut board = Board::load(&board_path);

    match cli.command {
        Commands::Ui => unreachable!("UI command handled above"),
        Commands::Menu => unreachable!("Menu command handled above"),

        Commands::Add {
            title,
            desc,
            kind,
            priority,
            labels,
            assignee,
            branch,
            due,
            column,
        } => cmd_add(
            &mut board, &board_path, title, desc, kind, priority, labels, assignee, branch, due,
            column,
        ),

        Commands::List {
            column,
            kind,
            priority,
            assignee,
            labels,
            search,
            due,
            sort,
            limit,
        } => cmd_list(
            &board, column, kind, priority, assignee, labels, search, due, sort, limit,
        ),

        Commands::View { id } => cmd_view(&board, id),

        Commands::Update {
            id,
            title,
            desc,
            kind,
            priority,
            assignee,
            branch,
            due,
            add_labels,
            rm_labels,
            clear_due,
            clear_assignee,
            clear_branch,
        } => cmd_update(
            &mut board,
            &board_path,
            id,
            title,
            desc,
            kind,
            priority,
            assignee,
            branch,
            due,
            add_labels,
            rm_labels,
            clear_due,
            clear_assignee,
            clear_branch,
        ),

        Commands::Move { id, column } => cmd_move(&mut board, &board_path, id, column),

        Commands::Reorder { id, target } => cmd_reorder(&mut board, &board_path, id, target),

        Commands::Delete { id } => cmd_delete(&mut board, &board_path, id),

        Commands::Columns => cmd_columns(&board),

        Commands::Labels => cmd_labels(&board),

        Commands::Assignees => cmd_assignees(&board),

        Commands::Completions { shell } => cmd_completions(shell),

        Commands::Export {
            output,
            column,
            label,
        } => cmd_export(&board, output, column, label),

        Commands::Import { input, no_backup } => {
            cmd_import(&mut board, &board_path, input, no_backup)
        }

        Commands::Backup { all } => cmd_backup(&board_path, all),
    }
}
