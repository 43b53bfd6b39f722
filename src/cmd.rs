//! Command implementations for the CLI interface.
//!
//! This module contains all the command handlers that implement the various
//! subcommands available in the CLI, from basic card CRUD and column moves
//! to CSV export/import, backups, and the TUI entry points.

use clap::Subcommand;
use clap_complete::{generate, Shell};

use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::Path;

use chrono::{Local, NaiveDate, TimeZone, Utc};

use crate::board::*;
use crate::fields::*;
use crate::filter::{unique_assignees, unique_labels, Criteria};
use crate::project::{discover_projects, get_legacy_project};
use crate::task::{Task, TaskDraft, TaskPatch};
use crate::tui::menu::MenuApp;
use crate::tui::run::run_tui;

#[derive(Subcommand)]
pub enum Commands {
    /// Launch the interactive board UI.
    Ui,

    /// Add a new task.
    Add {
        /// Short title for the task.
        title: String,
        /// Optional longer description.
        #[arg(long)]
        desc: Option<String>,
        /// Task kind: bug | feature | enhancement | refactor | docs | pull-request.
        #[arg(long, value_enum, default_value_t = TaskKind::Feature)]
        kind: TaskKind,
        /// Priority: low | medium | high | urgent.
        #[arg(long, value_enum, default_value_t = Priority::Medium)]
        priority: Priority,
        /// Comma-separated labels. May be repeated.
        #[arg(long = "label")]
        labels: Vec<String>,
        /// Assignee display name.
        #[arg(long)]
        assignee: Option<String>,
        /// Version-control branch reference.
        #[arg(long)]
        branch: Option<String>,
        /// Due date: YYYY-MM-DD, "today", "tomorrow", or "in Nd".
        #[arg(long)]
        due: Option<String>,
        /// Column to place the task in (defaults to the first column).
        #[arg(long)]
        column: Option<String>,
    },

    /// List tasks with optional filters.
    List {
        /// Filter by column id.
        #[arg(long)]
        column: Option<String>,
        /// Filter by kind.
        #[arg(long, value_enum)]
        kind: Option<TaskKind>,
        /// Filter by priority.
        #[arg(long, value_enum)]
        priority: Option<Priority>,
        /// Filter by assignee (exact match).
        #[arg(long)]
        assignee: Option<String>,
        /// Filter by label; a task must carry every one given. May be repeated.
        #[arg(long = "label")]
        labels: Vec<String>,
        /// Case-insensitive search over title and description.
        #[arg(long)]
        search: Option<String>,
        /// Due filter: today | this-week | overdue | none.
        #[arg(long, value_enum)]
        due: Option<DueFilter>,
        /// Sort key.
        #[arg(long, value_enum, default_value_t = SortKey::Id)]
        sort: SortKey,
        /// Limit number of rows printed.
        #[arg(long)]
        limit: Option<usize>,
    },

    /// View a single task by ID or title.
    View {
        /// Task ID or title to view
        id: String,
    },

    /// Update fields on a task.
    Update {
        /// Task ID or title to update
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        desc: Option<String>,
        #[arg(long, value_enum)]
        kind: Option<TaskKind>,
        #[arg(long, value_enum)]
        priority: Option<Priority>,
        #[arg(long)]
        assignee: Option<String>,
        #[arg(long)]
        branch: Option<String>,
        #[arg(long)]
        due: Option<String>,
        /// Add labels. May be repeated and comma-separated.
        #[arg(long = "add-label")]
        add_labels: Vec<String>,
        /// Remove labels. May be repeated and comma-separated.
        #[arg(long = "rm-label")]
        rm_labels: Vec<String>,
        /// Clear due date.
        #[arg(long)]
        clear_due: bool,
        /// Clear assignee.
        #[arg(long)]
        clear_assignee: bool,
        /// Clear branch.
        #[arg(long)]
        clear_branch: bool,
    },

    /// Move a task to another column (appends after its existing tasks).
    Move {
        /// Task ID or title to move
        id: String,
        /// Target column id.
        column: String,
    },

    /// Reposition a task relative to another task (array-move semantics).
    Reorder {
        /// Task ID or title to reposition
        id: String,
        /// Task ID or title to take the position of.
        target: String,
    },

    /// Delete a task by ID or title.
    Delete {
        /// Task ID or title to delete
        id: String,
    },

    /// List the board's columns and card counts.
    Columns,

    /// List distinct labels and counts.
    Labels,

    /// List distinct assignees and counts.
    Assignees,

    /// Generate shell completion scripts.
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Export tasks to CSV format.
    Export {
        /// Output file path (default: tasks.csv)
        #[arg(long, short)]
        output: Option<String>,
        /// Filter by column id
        #[arg(long)]
        column: Option<String>,
        /// Filter by label
        #[arg(long)]
        label: Option<String>,
    },

    /// Import tasks from CSV format.
    Import {
        /// Input CSV file path
        input: String,
        /// Skip creating backup before import
        #[arg(long)]
        no_backup: bool,
    },

    /// Create timestamped backup of current board or all boards.
    Backup {
        /// Backup all boards instead of just current
        #[arg(long)]
        all: bool,
    },

    /// Open board selection menu (interactive mode).
    Menu,
}

/// Launch the board user interface.
pub fn cmd_ui(board_path: &Path) {
    if let Err(e) = run_tui(board_path) {
        eprintln!("UI error: {e}");
        std::process::exit(1);
    }
}

/// Add a new task to the board.
#[allow(clippy::too_many_arguments)]
pub fn cmd_add(
    board: &mut Board,
    board_path: &Path,
    title: String,
    desc: Option<String>,
    kind: TaskKind,
    priority: Priority,
    labels: Vec<String>,
    assignee: Option<String>,
    branch: Option<String>,
    due: Option<String>,
    column: Option<String>,
) {
    let due = match due {
        Some(ref input) => match parse_due_input(input) {
            Some(d) => Some(d),
            None => {
                eprintln!("Could not parse due date '{input}'");
                std::process::exit(1);
            }
        },
        None => None,
    };

    let draft = TaskDraft {
        title,
        description: desc,
        kind,
        priority,
        labels: split_and_normalise_labels(&labels),
        assignee: assignee.map(|a| a.trim().to_string()).filter(|a| !a.is_empty()),
        branch: branch.map(|b| b.trim().to_string()).filter(|b| !b.is_empty()),
        due,
    };

    let id = match board.add_task(draft) {
        Ok(task) => task.id,
        Err(e) => {
            eprintln!("Cannot add task: {e}");
            std::process::exit(1);
        }
    };

    if let Some(ref column_id) = column {
        if let Err(e) = board.move_task(id, column_id) {
            eprintln!("Cannot place task: {e}");
            std::process::exit(1);
        }
    }

    if let Err(e) = board.save(board_path) {
        eprintln!("Failed to save board: {e}");
        std::process::exit(1);
    }
    println!("Added task {}", id);
}

/// List tasks with optional filtering and sorting.
#[allow(clippy::too_many_arguments)]
pub fn cmd_list(
    board: &Board,
    column: Option<String>,
    kind: Option<TaskKind>,
    priority: Option<Priority>,
    assignee: Option<String>,
    labels: Vec<String>,
    search: Option<String>,
    due: Option<DueFilter>,
    sort: SortKey,
    limit: Option<usize>,
) {
    let criteria = Criteria {
        search: search.unwrap_or_default(),
        kind,
        priority,
        assignee,
        labels: split_and_normalise_labels(&labels),
    };
    let today = Local::now().date_naive();
    let (week_start, week_end) = start_end_of_this_week(today);

    let mut filtered: Vec<&Task> = board
        .tasks
        .iter()
        .filter(|t| criteria.matches(t))
        .filter(|t| match column {
            Some(ref c) => &t.status == c,
            None => true,
        })
        .filter(|t| match due {
            None => true,
            Some(DueFilter::Today) => t.due == Some(today),
            Some(DueFilter::ThisWeek) => {
                t.due.map_or(false, |d| d >= week_start && d <= week_end)
            }
            Some(DueFilter::Overdue) => t.due.map_or(false, |d| d < today),
            Some(DueFilter::None) => t.due.is_none(),
        })
        .collect();

    match sort {
        SortKey::Due => filtered.sort_by_key(|t| (t.due.unwrap_or(NaiveDate::MAX), t.id)),
        // Urgent first, ties broken by id for a stable listing.
        SortKey::Priority => {
            filtered.sort_by(|a, b| b.priority.cmp(&a.priority).then(a.id.cmp(&b.id)))
        }
        SortKey::Id => filtered.sort_by_key(|t| t.id),
    }

    if let Some(n) = limit {
        filtered.truncate(n);
    }

    print_table(board, &filtered);
}

/// View detailed information about a specific task.
pub fn cmd_view(board: &Board, id: String) {
    let task_id = match resolve_task_identifier(&id, board) {
        Ok(id) => id,
        Err(e) => {
            eprintln!("Error resolving task: {}", e);
            std::process::exit(1);
        }
    };

    let Some(task) = board.get(task_id) else {
        eprintln!("Task {} not found.", task_id);
        std::process::exit(1);
    };
    let today = Local::now().date_naive();
    println!("ID:           {}", task.id);
    println!("Title:        {}", task.title);
    println!("Kind:         {}", format_kind(task.kind));
    println!(
        "Column:       {}",
        board.column_title(&task.status).unwrap_or(&task.status)
    );
    println!("Priority:     {}", format_priority(task.priority));
    println!("Assignee:     {}", task.assignee.as_deref().unwrap_or("-"));
    println!("Branch:       {}", task.branch.as_deref().unwrap_or("-"));
    println!(
        "Due:          {}",
        match task.due {
            Some(d) => format!("{d} ({})", format_due_relative(Some(d), today)),
            None => "-".into(),
        }
    );
    println!(
        "Labels:       {}",
        if task.labels.is_empty() {
            "-".into()
        } else {
            task.labels.join(",")
        }
    );
    println!(
        "Created UTC:  {}",
        Utc.timestamp_opt(task.created_at_utc, 0)
            .single()
            .map(|t| t.to_rfc3339())
            .unwrap_or_else(|| "-".into())
    );
    println!(
        "Updated UTC:  {}",
        Utc.timestamp_opt(task.updated_at_utc, 0)
            .single()
            .map(|t| t.to_rfc3339())
            .unwrap_or_else(|| "-".into())
    );
    println!(
        "Description:\n{}\n",
        task.description.as_deref().unwrap_or("-")
    );
}

/// Update fields on an existing task.
#[allow(clippy::too_many_arguments)]
pub fn cmd_update(
    board: &mut Board,
    board_path: &Path,
    id: String,
    title: Option<String>,
    desc: Option<String>,
    kind: Option<TaskKind>,
    priority: Option<Priority>,
    assignee: Option<String>,
    branch: Option<String>,
    due: Option<String>,
    add_labels: Vec<String>,
    rm_labels: Vec<String>,
    clear_due: bool,
    clear_assignee: bool,
    clear_branch: bool,
) {
    let task_id = match resolve_task_identifier(&id, board) {
        Ok(id) => id,
        Err(e) => {
            eprintln!("Error resolving task: {}", e);
            std::process::exit(1);
        }
    };

    let due = match due {
        Some(ref input) => match parse_due_input(input) {
            Some(d) => Some(d),
            None => {
                eprintln!("Could not parse due date '{input}'");
                std::process::exit(1);
            }
        },
        None => None,
    };

    let labels = if add_labels.is_empty() && rm_labels.is_empty() {
        None
    } else {
        // Apply removals then additions against the current label set.
        let current = board.get(task_id).map(|t| t.labels.clone()).unwrap_or_default();
        let to_add = split_and_normalise_labels(&add_labels);
        let to_remove = split_and_normalise_labels(&rm_labels);
        let mut labels: Vec<String> = current
            .into_iter()
            .filter(|l| !to_remove.contains(l))
            .collect();
        for label in to_add {
            if !labels.contains(&label) {
                labels.push(label);
            }
        }
        Some(labels)
    };

    let patch = TaskPatch {
        title,
        description: desc,
        kind,
        priority,
        labels,
        assignee,
        branch,
        due,
        clear_description: false,
        clear_assignee,
        clear_branch,
        clear_due,
    };

    match board.update_task(task_id, &patch) {
        Ok(task) => {
            let id = task.id;
            if let Err(e) = board.save(board_path) {
                eprintln!("Failed to save board: {e}");
                std::process::exit(1);
            }
            println!("Updated task {}", id);
        }
        Err(e) => {
            eprintln!("Cannot update task: {e}");
            std::process::exit(1);
        }
    }
}

/// Move a task to another column.
pub fn cmd_move(board: &mut Board, board_path: &Path, id: String, column: String) {
    let task_id = match resolve_task_identifier(&id, board) {
        Ok(id) => id,
        Err(e) => {
            eprintln!("Error resolving task: {}", e);
            std::process::exit(1);
        }
    };

    match board.move_task(task_id, &column) {
        Ok(()) => {
            if let Err(e) = board.save(board_path) {
                eprintln!("Failed to save board: {e}");
                std::process::exit(1);
            }
            println!("Moved task {} to {}", task_id, column);
        }
        Err(e) => {
            eprintln!("Cannot move task: {e}");
            std::process::exit(1);
        }
    }
}

/// Reposition a task relative to another task.
pub fn cmd_reorder(board: &mut Board, board_path: &Path, id: String, target: String) {
    let task_id = match resolve_task_identifier(&id, board) {
        Ok(id) => id,
        Err(e) => {
            eprintln!("Error resolving task: {}", e);
            std::process::exit(1);
        }
    };
    let target_id = match resolve_task_identifier(&target, board) {
        Ok(id) => id,
        Err(e) => {
            eprintln!("Error resolving target: {}", e);
            std::process::exit(1);
        }
    };

    match board.reorder_task(task_id, target_id) {
        Ok(()) => {
            if let Err(e) = board.save(board_path) {
                eprintln!("Failed to save board: {e}");
                std::process::exit(1);
            }
            println!("Reordered task {} to the position of {}", task_id, target_id);
        }
        Err(e) => {
            eprintln!("Cannot reorder task: {e}");
            std::process::exit(1);
        }
    }
}

/// Delete a task from the board.
pub fn cmd_delete(board: &mut Board, board_path: &Path, id: String) {
    let task_id = match resolve_task_identifier(&id, board) {
        Ok(id) => id,
        Err(e) => {
            eprintln!("Error resolving task: {}", e);
            std::process::exit(1);
        }
    };

    let mut ids = HashSet::new();
    ids.insert(task_id);
    board.remove_ids(&ids);
    if let Err(e) = board.save(board_path) {
        eprintln!("Failed to save board: {e}");
        std::process::exit(1);
    }
    println!("Deleted task {}", task_id);
}

/// List the board's columns with card counts.
pub fn cmd_columns(board: &Board) {
    println!("{:<14} {:<14} {}", "ID", "Title", "Cards");
    for column in &board.columns {
        let count = board.tasks.iter().filter(|t| t.status == column.id).count();
        println!("{:<14} {:<14} {}", column.id, column.title, count);
    }
    let orphaned = board
        .tasks
        .iter()
        .filter(|t| !board.has_column(&t.status))
        .count();
    if orphaned > 0 {
        println!("(not shown in any column: {})", orphaned);
    }
}

/// List distinct labels and their usage counts.
pub fn cmd_labels(board: &Board) {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for task in &board.tasks {
        for label in &task.labels {
            *counts.entry(label.as_str()).or_default() += 1;
        }
    }
    if counts.is_empty() {
        println!("No labels.");
        return;
    }
    for label in unique_labels(&board.tasks) {
        println!("{:<20} {}", label, counts.get(label.as_str()).unwrap_or(&0));
    }
}

/// List distinct assignees and their card counts.
pub fn cmd_assignees(board: &Board) {
    if board.tasks.iter().all(|t| t.assignee.is_none()) {
        println!("No assignees.");
        return;
    }
    for assignee in unique_assignees(&board.tasks) {
        let count = board
            .tasks
            .iter()
            .filter(|t| t.assignee.as_deref() == Some(assignee.as_str()))
            .count();
        println!("{:<20} {}", assignee, count);
    }
}

/// Generate shell completion scripts.
pub fn cmd_completions(shell: Shell) {
    use clap::CommandFactory;
    let mut cmd = crate::cli::Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut std::io::stdout());
}

const CSV_HEADER: &str =
    "ID,Title,Kind,Column,Priority,Labels,Assignee,Branch,Due,CreatedUTC,UpdatedUTC,Description";

/// Escape a CSV field that contains commas, quotes or newlines.
fn escape_csv(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

/// Export tasks to CSV format.
pub fn cmd_export(
    board: &Board,
    output: Option<String>,
    column: Option<String>,
    label: Option<String>,
) {
    let output_path = output.unwrap_or_else(|| "tasks.csv".to_string());

    let tasks: Vec<&Task> = board
        .tasks
        .iter()
        .filter(|task| match column {
            Some(ref c) => &task.status == c,
            None => true,
        })
        .filter(|task| match label {
            Some(ref l) => task.labels.iter().any(|t| t == l),
            None => true,
        })
        .collect();

    let mut csv_content = String::new();
    csv_content.push_str(CSV_HEADER);
    csv_content.push('\n');

    for task in &tasks {
        let labels = if task.labels.is_empty() {
            "-".to_string()
        } else {
            task.labels.join(";")
        };
        let due = task.due.map(|d| d.to_string()).unwrap_or_else(|| "-".into());
        let created = Utc
            .timestamp_opt(task.created_at_utc, 0)
            .single()
            .map(|t| t.to_rfc3339())
            .unwrap_or_else(|| "-".into());
        let updated = Utc
            .timestamp_opt(task.updated_at_utc, 0)
            .single()
            .map(|t| t.to_rfc3339())
            .unwrap_or_else(|| "-".into());

        csv_content.push_str(&format!(
            "{},{},{},{},{},{},{},{},{},{},{},{}\n",
            task.id,
            escape_csv(&task.title),
            format_kind(task.kind),
            escape_csv(&task.status),
            format_priority(task.priority),
            escape_csv(&labels),
            escape_csv(task.assignee.as_deref().unwrap_or("-")),
            escape_csv(task.branch.as_deref().unwrap_or("-")),
            escape_csv(&due),
            escape_csv(&created),
            escape_csv(&updated),
            escape_csv(task.description.as_deref().unwrap_or("-"))
        ));
    }

    match fs::write(&output_path, csv_content) {
        Ok(_) => println!("Exported {} task(s) to {}", tasks.len(), output_path),
        Err(e) => {
            eprintln!("Failed to write CSV file: {}", e);
            std::process::exit(1);
        }
    }
}

/// Create a timestamped backup of the board file.
pub fn create_backup(board_path: &Path) -> Result<String, std::io::Error> {
    if !board_path.exists() {
        return Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Board file does not exist",
        ));
    }

    let parent_dir = board_path.parent().unwrap_or_else(|| Path::new("."));
    let backup_dir = parent_dir.join("backup");
    fs::create_dir_all(&backup_dir)?;

    let timestamp = Local::now().format("%Y-%m-%d_%H-%M-%S");
    let board_filename = board_path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("board.json");

    let backup_path = backup_dir.join(format!("{}_{}", timestamp, board_filename));
    fs::copy(board_path, &backup_path)?;

    Ok(backup_path.to_string_lossy().to_string())
}

/// Import tasks from CSV format with automatic backup.
pub fn cmd_import(board: &mut Board, board_path: &Path, input: String, no_backup: bool) {
    if !no_backup {
        match create_backup(board_path) {
            Ok(backup_path) => println!("Created backup: {}", backup_path),
            Err(e) => {
                eprintln!("Warning: Failed to create backup: {}", e);
                print!("Continue without backup? (y/N): ");
                use std::io::{self, Write};
                io::stdout().flush().unwrap();

                let mut response = String::new();
                if io::stdin().read_line(&mut response).is_err()
                    || !response.trim().to_lowercase().starts_with('y')
                {
                    println!("Import cancelled.");
                    return;
                }
            }
        }
    }

    let csv_content = match fs::read_to_string(&input) {
        Ok(content) => content,
        Err(e) => {
            eprintln!("Failed to read CSV file '{}': {}", input, e);
            std::process::exit(1);
        }
    };

    let lines: Vec<&str> = csv_content.lines().collect();
    if lines.is_empty() {
        eprintln!("CSV file is empty");
        std::process::exit(1);
    }
    if lines[0] != CSV_HEADER {
        eprintln!(
            "Invalid CSV header. Expected:\n{}\nGot:\n{}",
            CSV_HEADER, lines[0]
        );
        std::process::exit(1);
    }

    let first_column = board
        .columns
        .first()
        .map(|c| c.id.clone())
        .unwrap_or_default();
    let mut imported_count = 0;
    let mut skipped_count = 0;
    let mut next_id = board.next_id();

    for (line_num, line) in lines.iter().skip(1).enumerate() {
        let line_num = line_num + 2; // header + 1-based line numbers

        let fields = parse_csv_line(line);
        if fields.len() != 12 {
            eprintln!(
                "Warning: Line {} has {} fields, expected 12. Skipping.",
                line_num,
                fields.len()
            );
            skipped_count += 1;
            continue;
        }

        let title = fields[1].clone();
        if title.is_empty() {
            eprintln!("Warning: Line {} has empty title. Skipping.", line_num);
            skipped_count += 1;
            continue;
        }
        if board.tasks.iter().any(|t| t.title == title) {
            eprintln!(
                "Warning: Task with title '{}' already exists. Skipping.",
                title
            );
            skipped_count += 1;
            continue;
        }

        let status = if board.has_column(&fields[3]) {
            fields[3].clone()
        } else {
            eprintln!(
                "Warning: Line {} names unknown column '{}', placing in '{}'.",
                line_num, fields[3], first_column
            );
            first_column.clone()
        };
        let labels = if fields[5] == "-" {
            Vec::new()
        } else {
            fields[5].split(';').map(|s| s.to_string()).collect()
        };
        let optional = |f: &String| {
            if f == "-" {
                None
            } else {
                Some(f.clone())
            }
        };

        let now_utc = Utc::now().timestamp();
        board.tasks.push(Task {
            id: next_id,
            title,
            description: optional(&fields[11]),
            kind: parse_kind(&fields[2]),
            priority: parse_priority(&fields[4]),
            status,
            labels,
            assignee: optional(&fields[6]),
            branch: optional(&fields[7]),
            due: NaiveDate::parse_from_str(&fields[8], "%Y-%m-%d").ok(),
            created_at_utc: now_utc,
            updated_at_utc: now_utc,
        });
        imported_count += 1;
        next_id += 1;
    }

    if let Err(e) = board.save(board_path) {
        eprintln!("Failed to save board: {}", e);
        std::process::exit(1);
    }

    println!(
        "Import completed. {} tasks imported, {} skipped.",
        imported_count, skipped_count
    );
}

/// Simple CSV line parser that handles quoted fields.
fn parse_csv_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current_field = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' => {
                if in_quotes && chars.peek() == Some(&'"') {
                    current_field.push('"');
                    chars.next();
                } else {
                    in_quotes = !in_quotes;
                }
            }
            ',' if !in_quotes => {
                fields.push(current_field);
                current_field = String::new();
            }
            _ => current_field.push(ch),
        }
    }

    fields.push(current_field);
    fields
}

/// Create a backup of the current board.
pub fn cmd_backup(board_path: &Path, all: bool) {
    assert!(!all, "all case should be handled earlier");
    match create_backup(board_path) {
        Ok(backup_path) => println!("Created backup: {}", backup_path),
        Err(e) => {
            eprintln!("Failed to create backup: {}", e);
            std::process::exit(1);
        }
    }
}

/// Back up every board in the boards directory.
pub fn cmd_backup_all(boards_dir: &Path) {
    let mut projects = match discover_projects(boards_dir) {
        Ok(projects) => projects,
        Err(e) => {
            eprintln!("Failed to discover boards: {}", e);
            std::process::exit(1);
        }
    };
    if let Some(legacy) = get_legacy_project(boards_dir) {
        projects.push(legacy);
    }
    if projects.is_empty() {
        println!("No boards found to back up.");
        return;
    }

    let mut ok = 0;
    for project in &projects {
        match create_backup(&project.file_path) {
            Ok(backup_path) => {
                println!("{}: {}", project.display_name, backup_path);
                ok += 1;
            }
            Err(e) => eprintln!("{}: backup failed: {}", project.display_name, e),
        }
    }
    println!("Backed up {}/{} board(s).", ok, projects.len());
}

/// Launch the board selection menu.
pub fn cmd_menu(boards_dir: &Path) {
    use crossterm::{
        execute,
        terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    };
    use ratatui::{backend::CrosstermBackend, Terminal};
    use std::io;

    // Setup terminal
    enable_raw_mode().unwrap();
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).unwrap();
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).unwrap();

    let mut app = MenuApp::new(boards_dir.to_path_buf());
    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode().unwrap();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).unwrap();
    terminal.show_cursor().unwrap();

    if let Err(err) = res {
        println!("{:?}", err);
        std::process::exit(1);
    }

    if let Some(project) = app.get_selected_project() {
        println!("Opening board: {}", project.display_name);
        cmd_ui(&project.file_path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_csv_line_handles_quotes() {
        assert_eq!(parse_csv_line("a,b,c"), vec!["a", "b", "c"]);
        assert_eq!(
            parse_csv_line("1,\"title, with comma\",bug"),
            vec!["1", "title, with comma", "bug"]
        );
        assert_eq!(
            parse_csv_line("\"say \"\"hi\"\"\",x"),
            vec!["say \"hi\"", "x"]
        );
        assert_eq!(parse_csv_line("trailing,"), vec!["trailing", ""]);
    }

    #[test]
    fn test_escape_csv_round_trips_through_parser() {
        for original in ["plain", "with, comma", "with \"quotes\"", "both, \"of\" them"] {
            let line = format!("{},tail", escape_csv(original));
            assert_eq!(parse_csv_line(&line), vec![original.to_string(), "tail".into()]);
        }
    }
}
