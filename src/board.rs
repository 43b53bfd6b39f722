//! Board state and utility functions for the task collection.
//!
//! This module provides the `Board` struct that exclusively owns the task
//! collection and the fixed column list, along with the move/reorder
//! operations the drag controller drives and various helpers for date
//! parsing, label normalisation, formatting, and table output.

use std::collections::HashSet;
use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::Path;

use chrono::{Datelike, Duration, Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::fields::{Priority, TaskKind};
use crate::filter::{visible_tasks, Criteria};
use crate::task::{Task, TaskDraft, TaskPatch, ValidationError};

/// A status column. The id doubles as the `status` value tasks reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub id: String,
    pub title: String,
}

impl Column {
    fn new(id: &str, title: &str) -> Self {
        Column {
            id: id.to_string(),
            title: title.to_string(),
        }
    }
}

/// The fixed column set a new board starts with.
pub fn default_columns() -> Vec<Column> {
    vec![
        Column::new("todo", "To Do"),
        Column::new("in-progress", "In Progress"),
        Column::new("in-review", "In Review"),
        Column::new("done", "Done"),
    ]
}

/// Why a board operation left the state unchanged.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BoardError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    #[error("task {0} not found")]
    NotFound(u64),
    #[error("unknown column '{0}'")]
    UnknownColumn(String),
}

/// In-memory board owning the task collection and the column list.
///
/// Collection order is the tie-break for same-column sequencing: the cards of
/// a column appear in the order their tasks appear here.
#[derive(Debug, Serialize, Deserialize)]
pub struct Board {
    #[serde(default = "default_columns")]
    pub columns: Vec<Column>,
    #[serde(default)]
    pub tasks: Vec<Task>,
}

impl Default for Board {
    fn default() -> Self {
        Board {
            columns: default_columns(),
            tasks: Vec::new(),
        }
    }
}

impl Board {
    /// Load a board from a JSON file, starting empty if the file is missing.
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            return Board::default();
        }
        let mut buf = String::new();
        match File::open(path).and_then(|mut f| f.read_to_string(&mut buf)) {
            Ok(_) => match serde_json::from_str(&buf) {
                Ok(board) => board,
                Err(e) => {
                    eprintln!("Error parsing board file, starting fresh: {e}");
                    Board::default()
                }
            },
            Err(e) => {
                eprintln!("Error reading board file, starting fresh: {e}");
                Board::default()
            }
        }
    }

    /// Save the board to a JSON file using atomic write (temp file + rename).
    pub fn save(&self, path: &Path) -> std::io::Result<()> {
        let tmp = path.with_extension("json.tmp");
        let mut f = File::create(&tmp)?;
        let data = serde_json::to_string_pretty(self).unwrap();
        f.write_all(data.as_bytes())?;
        f.flush()?;
        fs::rename(tmp, path)?;
        Ok(())
    }

    /// Generate the next available task ID.
    pub fn next_id(&self) -> u64 {
        self.tasks.iter().map(|t| t.id).max().unwrap_or(0) + 1
    }

    /// Get a task by ID.
    pub fn get(&self, id: u64) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Get a mutable reference to a task by ID.
    pub fn get_mut(&mut self, id: u64) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|t| t.id == id)
    }

    /// Index of a task in the owned collection.
    pub fn position(&self, id: u64) -> Option<usize> {
        self.tasks.iter().position(|t| t.id == id)
    }

    /// Remove tasks by IDs.
    pub fn remove_ids(&mut self, ids: &HashSet<u64>) {
        self.tasks.retain(|t| !ids.contains(&t.id));
    }

    /// Whether `column_id` names a column of this board.
    pub fn has_column(&self, column_id: &str) -> bool {
        self.columns.iter().any(|c| c.id == column_id)
    }

    /// Display title for a column id, if the column exists.
    pub fn column_title(&self, column_id: &str) -> Option<&str> {
        self.columns
            .iter()
            .find(|c| c.id == column_id)
            .map(|c| c.title.as_str())
    }

    /// Validate a draft, assign an id, default the status to the first
    /// column, and append the new task to the collection.
    pub fn add_task(&mut self, draft: TaskDraft) -> Result<&Task, BoardError> {
        draft.validate()?;
        let id = self.next_id();
        let status = self
            .columns
            .first()
            .map(|c| c.id.clone())
            .unwrap_or_default();
        let idx = self.tasks.len();
        self.tasks
            .push(draft.into_task(id, status, Utc::now().timestamp()));
        Ok(&self.tasks[idx])
    }

    /// Merge a patch into the task located by id. `id` and `status` are
    /// never touched by a patch.
    pub fn update_task(&mut self, id: u64, patch: &TaskPatch) -> Result<&Task, BoardError> {
        patch.validate()?;
        let idx = self.position(id).ok_or(BoardError::NotFound(id))?;
        patch.apply(&mut self.tasks[idx], Utc::now().timestamp());
        Ok(&self.tasks[idx])
    }

    /// Move a task to another column, appending it after that column's
    /// existing tasks. Moving a task to the column it is already in leaves
    /// both its status and its relative order unchanged.
    pub fn move_task(&mut self, id: u64, column_id: &str) -> Result<(), BoardError> {
        if !self.has_column(column_id) {
            return Err(BoardError::UnknownColumn(column_id.to_string()));
        }
        let from = self.position(id).ok_or(BoardError::NotFound(id))?;
        if self.tasks[from].status == column_id {
            return Ok(());
        }
        let mut task = self.tasks.remove(from);
        debug!(id, from = %task.status, to = column_id, "column move");
        task.status = column_id.to_string();
        task.updated_at_utc = Utc::now().timestamp();
        self.tasks.push(task);
        Ok(())
    }

    /// Reposition a task relative to another: remove it at its current
    /// index, reinsert at the target's index as counted before removal.
    /// Status is never changed by a reorder.
    pub fn reorder_task(&mut self, id: u64, target_id: u64) -> Result<(), BoardError> {
        if id == target_id {
            return Ok(());
        }
        let from = self.position(id).ok_or(BoardError::NotFound(id))?;
        let to = self.position(target_id).ok_or(BoardError::NotFound(target_id))?;
        let task = self.tasks.remove(from);
        self.tasks.insert(to, task);
        Ok(())
    }

    /// The combined cross-column drop: reposition the task adjacent to the
    /// target and adopt the target's column as its new status.
    pub fn move_onto(&mut self, id: u64, target_id: u64) -> Result<(), BoardError> {
        if id == target_id {
            return Ok(());
        }
        let from = self.position(id).ok_or(BoardError::NotFound(id))?;
        let to = self.position(target_id).ok_or(BoardError::NotFound(target_id))?;
        let status = self.tasks[to].status.clone();
        let mut task = self.tasks.remove(from);
        task.status = status;
        task.updated_at_utc = Utc::now().timestamp();
        self.tasks.insert(to, task);
        Ok(())
    }

    /// The visible tasks of one column under the active criteria, in
    /// collection order. A task whose status matches no column simply
    /// appears in none of these projections.
    pub fn tasks_in_column<'a>(&'a self, column_id: &str, criteria: &Criteria) -> Vec<&'a Task> {
        visible_tasks(&self.tasks, criteria)
            .into_iter()
            .filter(|t| t.status == column_id)
            .collect()
    }
}

/// Normalize a label by trimming, lowercasing, and replacing spaces with hyphens.
pub fn normalise_label(s: &str) -> String {
    s.trim().to_lowercase().replace(' ', "-")
}

/// Split comma-separated label strings and normalize each label.
pub fn split_and_normalise_labels(inputs: &[String]) -> Vec<String> {
    let mut labels = Vec::new();
    for raw in inputs {
        for part in raw.split(',') {
            let label = normalise_label(part);
            if !label.is_empty() && !labels.contains(&label) {
                labels.push(label);
            }
        }
    }
    labels
}

/// Parse human-readable due date input.
///
/// Supports "today", "tomorrow", "in 3d" / "in 2w", bare weekday names
/// ("friday", "fri"), "next <weekday>", "end of week" and `YYYY-MM-DD`.
pub fn parse_due_input(s: &str) -> Option<NaiveDate> {
    let s = s.trim().to_lowercase();
    let today = Local::now().date_naive();

    match s.as_str() {
        "today" => return Some(today),
        "tomorrow" => return Some(today + Duration::days(1)),
        "end of week" | "eow" => {
            let (_, end) = start_end_of_this_week(today);
            return Some(end);
        }
        _ => {}
    }

    if let Some(rest) = s.strip_prefix("in ") {
        let rest = rest.trim();
        if let Some(n) = rest.strip_suffix('d').and_then(|n| n.trim().parse::<i64>().ok()) {
            return Some(today + Duration::days(n));
        }
        if let Some(n) = rest.strip_suffix('w').and_then(|n| n.trim().parse::<i64>().ok()) {
            return Some(today + Duration::weeks(n));
        }
    }

    let (name, next_week) = match s.strip_prefix("next ") {
        Some(rest) => (rest, true),
        None => (s.as_str(), false),
    };
    if let Some(target) = weekday_index(name) {
        let current = today.weekday().num_days_from_monday() as i64;
        let mut ahead = (target - current).rem_euclid(7);
        if next_week {
            ahead = if ahead == 0 { 7 } else { ahead + 7 };
        }
        return Some(today + Duration::days(ahead));
    }

    NaiveDate::parse_from_str(&s, "%Y-%m-%d").ok()
}

fn weekday_index(name: &str) -> Option<i64> {
    match name {
        "monday" | "mon" => Some(0),
        "tuesday" | "tue" => Some(1),
        "wednesday" | "wed" => Some(2),
        "thursday" | "thu" => Some(3),
        "friday" | "fri" => Some(4),
        "saturday" | "sat" => Some(5),
        "sunday" | "sun" => Some(6),
        _ => None,
    }
}

/// Calculate the start and end dates of the current ISO week (Monday to Sunday).
pub fn start_end_of_this_week(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    let weekday = today.weekday().num_days_from_monday() as i64;
    let start = today - Duration::days(weekday);
    (start, start + Duration::days(6))
}

/// Format a due date relative to today ("today", "tomorrow", "in 3d", "2d late").
pub fn format_due_relative(due: Option<NaiveDate>, today: NaiveDate) -> String {
    let Some(d) = due else {
        return "-".into();
    };
    match (d - today).num_days() {
        0 => "today".into(),
        1 => "tomorrow".into(),
        n if n > 1 => format!("in {n}d"),
        n => format!("{}d late", -n),
    }
}

/// Format a task kind for display.
pub fn format_kind(k: TaskKind) -> &'static str {
    match k {
        TaskKind::Bug => "Bug",
        TaskKind::Feature => "Feature",
        TaskKind::Enhancement => "Enhancement",
        TaskKind::Refactor => "Refactor",
        TaskKind::Docs => "Docs",
        TaskKind::PullRequest => "PR",
    }
}

/// Format a priority level for display.
pub fn format_priority(p: Priority) -> &'static str {
    match p {
        Priority::Low => "Low",
        Priority::Medium => "Medium",
        Priority::High => "High",
        Priority::Urgent => "Urgent",
    }
}

/// Print tasks in a formatted table.
pub fn print_table(board: &Board, tasks: &[&Task]) {
    println!(
        "{:<5} {:<12} {:<12} {:<8} {:<10} {:<14} {}",
        "ID", "Kind", "Column", "Pri", "Due", "Assignee", "Title [labels]"
    );
    let today = Local::now().date_naive();
    for t in tasks {
        let labels = if t.labels.is_empty() {
            String::new()
        } else {
            format!(" [{}]", t.labels.join(","))
        };
        let column = board.column_title(&t.status).unwrap_or(t.status.as_str());
        let assignee = t.assignee.as_deref().unwrap_or("-");
        println!(
            "{:<5} {:<12} {:<12} {:<8} {:<10} {:<14} {}{}",
            t.id,
            format_kind(t.kind),
            truncate(column, 12),
            format_priority(t.priority),
            format_due_relative(t.due, today),
            truncate(assignee, 14),
            t.title,
            labels
        );
    }
}

/// Truncate a string to a maximum width, adding ellipsis if needed.
pub fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        return s.to_string();
    }
    let mut out: String = s.chars().take(width.saturating_sub(1)).collect();
    out.push('…');
    out
}

/// Resolve a task identifier (either ID or exact title) to a task ID.
/// Returns an error if the title is ambiguous and suggests using the ID.
pub fn resolve_task_identifier(identifier: &str, board: &Board) -> Result<u64, String> {
    if let Ok(id) = identifier.parse::<u64>() {
        return if board.get(id).is_some() {
            Ok(id)
        } else {
            Err(format!("Task with ID {} not found", id))
        };
    }

    let matches: Vec<&Task> = board
        .tasks
        .iter()
        .filter(|t| t.title.to_lowercase() == identifier.to_lowercase())
        .collect();

    match matches.len() {
        0 => Err(format!("No task found with title '{}'", identifier)),
        1 => Ok(matches[0].id),
        _ => {
            let mut msg = format!("Multiple tasks found with title '{}':\n", identifier);
            for t in matches {
                msg.push_str(&format!(
                    "  ID {}: {} ({})\n",
                    t.id,
                    t.title,
                    format_kind(t.kind)
                ));
            }
            msg.push_str("Please use the specific ID instead.");
            Err(msg)
        }
    }
}

/// Parse a kind string from CSV format.
pub fn parse_kind(s: &str) -> TaskKind {
    match s.to_lowercase().as_str() {
        "bug" => TaskKind::Bug,
        "feature" => TaskKind::Feature,
        "enhancement" => TaskKind::Enhancement,
        "refactor" => TaskKind::Refactor,
        "docs" => TaskKind::Docs,
        "pull-request" | "pr" => TaskKind::PullRequest,
        _ => TaskKind::Feature,
    }
}

/// Parse a priority string from CSV format.
pub fn parse_priority(s: &str) -> Priority {
    match s.to_lowercase().as_str() {
        "low" => Priority::Low,
        "medium" => Priority::Medium,
        "high" => Priority::High,
        "urgent" => Priority::Urgent,
        _ => Priority::Medium,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(title: &str) -> TaskDraft {
        TaskDraft {
            title: title.to_string(),
            ..TaskDraft::default()
        }
    }

    fn board_with(titles: &[(&str, &str)]) -> Board {
        // (title, column) pairs, inserted in order.
        let mut board = Board::default();
        for (title, column) in titles {
            let id = board.add_task(draft(title)).unwrap().id;
            board.move_task(id, column).unwrap();
        }
        board
    }

    fn column_titles(board: &Board, column: &str) -> Vec<String> {
        board
            .tasks_in_column(column, &Criteria::default())
            .iter()
            .map(|t| t.title.clone())
            .collect()
    }

    fn all_ids(board: &Board) -> Vec<u64> {
        board.tasks.iter().map(|t| t.id).collect()
    }

    #[test]
    fn test_add_task_defaults_to_first_column_and_appends() {
        let mut board = Board::default();
        let a = board.add_task(draft("A")).unwrap().id;
        let b = board.add_task(draft("B")).unwrap().id;
        assert_eq!(board.get(a).unwrap().status, "todo");
        assert_eq!(board.get(b).unwrap().status, "todo");
        assert_eq!(column_titles(&board, "todo"), vec!["A", "B"]);
        assert!(b > a);
    }

    #[test]
    fn test_add_task_rejects_empty_title() {
        let mut board = Board::default();
        let err = board.add_task(draft("  ")).unwrap_err();
        assert_eq!(err, BoardError::Invalid(ValidationError::EmptyTitle));
        assert!(board.tasks.is_empty());
    }

    #[test]
    fn test_update_task_not_found_is_reported() {
        let mut board = Board::default();
        let err = board.update_task(42, &TaskPatch::default()).unwrap_err();
        assert_eq!(err, BoardError::NotFound(42));
    }

    #[test]
    fn test_move_appends_after_existing_tasks_of_target_column() {
        // A moving from todo lands after the pre-existing in-progress tasks.
        let mut board = board_with(&[("X", "in-progress"), ("A", "todo")]);
        let a = board.tasks.iter().find(|t| t.title == "A").unwrap().id;
        board.move_task(a, "in-progress").unwrap();
        assert_eq!(board.get(a).unwrap().status, "in-progress");
        assert_eq!(column_titles(&board, "in-progress"), vec!["X", "A"]);
    }

    #[test]
    fn test_move_to_current_column_is_idempotent() {
        let mut board = board_with(&[("A", "todo"), ("B", "todo"), ("C", "todo")]);
        let a = board.tasks[0].id;
        let before = all_ids(&board);
        board.move_task(a, "todo").unwrap();
        assert_eq!(all_ids(&board), before);
        assert_eq!(board.get(a).unwrap().status, "todo");
    }

    #[test]
    fn test_move_to_unknown_column_leaves_state_unchanged() {
        let mut board = board_with(&[("A", "todo")]);
        let a = board.tasks[0].id;
        let err = board.move_task(a, "archived").unwrap_err();
        assert_eq!(err, BoardError::UnknownColumn("archived".to_string()));
        assert_eq!(board.get(a).unwrap().status, "todo");
    }

    #[test]
    fn test_reorder_uses_array_move_semantics() {
        // [A, B, C], drag A onto C: remove at 0, reinsert at index 2 -> [B, C, A].
        let mut board = board_with(&[("A", "todo"), ("B", "todo"), ("C", "todo")]);
        let a = board.tasks[0].id;
        let c = board.tasks[2].id;
        board.reorder_task(a, c).unwrap();
        assert_eq!(column_titles(&board, "todo"), vec!["B", "C", "A"]);
    }

    #[test]
    fn test_reorder_backwards() {
        let mut board = board_with(&[("A", "todo"), ("B", "todo"), ("C", "todo")]);
        let a = board.tasks[0].id;
        let c = board.tasks[2].id;
        board.reorder_task(c, a).unwrap();
        assert_eq!(column_titles(&board, "todo"), vec!["C", "A", "B"]);
    }

    #[test]
    fn test_reorder_never_changes_status() {
        let mut board = board_with(&[("A", "todo"), ("B", "in-progress")]);
        let a = board.tasks.iter().find(|t| t.title == "A").unwrap().id;
        let b = board.tasks.iter().find(|t| t.title == "B").unwrap().id;
        board.reorder_task(a, b).unwrap();
        assert_eq!(board.get(a).unwrap().status, "todo");
        assert_eq!(board.get(b).unwrap().status, "in-progress");
    }

    #[test]
    fn test_reorder_onto_itself_is_a_noop() {
        let mut board = board_with(&[("A", "todo"), ("B", "todo")]);
        let a = board.tasks[0].id;
        let before = all_ids(&board);
        board.reorder_task(a, a).unwrap();
        assert_eq!(all_ids(&board), before);
    }

    #[test]
    fn test_move_onto_adopts_target_column_and_adjacency() {
        let mut board = board_with(&[("A", "todo"), ("X", "in-progress"), ("Y", "in-progress")]);
        let a = board.tasks.iter().find(|t| t.title == "A").unwrap().id;
        let x = board.tasks.iter().find(|t| t.title == "X").unwrap().id;
        board.move_onto(a, x).unwrap();
        assert_eq!(board.get(a).unwrap().status, "in-progress");
        // arrayMove(from 0, to 1) over [A, X, Y]: A lands adjacent to X.
        assert_eq!(column_titles(&board, "in-progress"), vec!["X", "A", "Y"]);
        assert!(column_titles(&board, "todo").is_empty());
    }

    #[test]
    fn test_every_task_appears_exactly_once_after_operation_mix() {
        let mut board = board_with(&[
            ("A", "todo"),
            ("B", "todo"),
            ("C", "in-progress"),
            ("D", "in-review"),
        ]);
        let ids: Vec<u64> = all_ids(&board);
        let (a, b, c) = (ids[0], ids[1], ids[2]);

        board.move_task(a, "done").unwrap();
        board.reorder_task(b, c).unwrap();
        board.move_onto(c, a).unwrap();
        let _ = board.move_task(b, "nope");
        let _ = board.reorder_task(999, a);

        let mut seen: Vec<u64> = Vec::new();
        for column in &board.columns {
            for t in board.tasks_in_column(&column.id, &Criteria::default()) {
                seen.push(t.id);
            }
        }
        seen.sort_unstable();
        let mut expected = ids.clone();
        expected.sort_unstable();
        assert_eq!(seen, expected);
    }

    #[test]
    fn test_orphaned_status_is_displayed_nowhere_without_crashing() {
        let mut board = board_with(&[("A", "todo")]);
        board.tasks[0].status = "ghost-column".to_string();
        for column in default_columns() {
            assert!(board
                .tasks_in_column(&column.id, &Criteria::default())
                .is_empty());
        }
        // The task still exists in the owned collection.
        assert_eq!(board.tasks.len(), 1);
    }

    #[test]
    fn test_tasks_in_column_composes_with_criteria() {
        let mut board = board_with(&[("Fix leak", "todo"), ("Write docs", "todo")]);
        board.tasks[0].kind = TaskKind::Bug;
        let criteria = Criteria {
            kind: Some(TaskKind::Bug),
            ..Criteria::default()
        };
        let visible = board.tasks_in_column("todo", &criteria);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].title, "Fix leak");
    }

    #[test]
    fn test_next_id_is_monotonic_after_removal() {
        let mut board = Board::default();
        let a = board.add_task(draft("A")).unwrap().id;
        let b = board.add_task(draft("B")).unwrap().id;
        let mut gone = HashSet::new();
        gone.insert(a);
        board.remove_ids(&gone);
        assert!(board.next_id() > b);
    }

    #[test]
    fn test_split_and_normalise_labels() {
        let labels = split_and_normalise_labels(&[
            "API, Auth".to_string(),
            "auth".to_string(),
            "  front end  ".to_string(),
        ]);
        assert_eq!(labels, vec!["api", "auth", "front-end"]);
    }

    #[test]
    fn test_parse_due_input_relative_forms() {
        let today = Local::now().date_naive();
        assert_eq!(parse_due_input("today"), Some(today));
        assert_eq!(parse_due_input("Tomorrow"), Some(today + Duration::days(1)));
        assert_eq!(parse_due_input("in 3d"), Some(today + Duration::days(3)));
        assert_eq!(parse_due_input("in 2w"), Some(today + Duration::weeks(2)));
        assert_eq!(
            parse_due_input("2031-02-03"),
            NaiveDate::from_ymd_opt(2031, 2, 3)
        );
        assert_eq!(parse_due_input("not a date"), None);
    }

    #[test]
    fn test_parse_due_input_weekdays_land_in_range() {
        let today = Local::now().date_naive();
        let fri = parse_due_input("friday").unwrap();
        assert!(fri >= today && fri < today + Duration::days(7));
        let next_fri = parse_due_input("next friday").unwrap();
        assert!(next_fri > today && next_fri <= today + Duration::days(14));
        assert!(next_fri > fri || fri == today);
    }

    #[test]
    fn test_format_due_relative() {
        let today = NaiveDate::from_ymd_opt(2026, 3, 10).unwrap();
        assert_eq!(format_due_relative(None, today), "-");
        assert_eq!(format_due_relative(Some(today), today), "today");
        assert_eq!(
            format_due_relative(Some(today + Duration::days(1)), today),
            "tomorrow"
        );
        assert_eq!(
            format_due_relative(Some(today + Duration::days(5)), today),
            "in 5d"
        );
        assert_eq!(
            format_due_relative(Some(today - Duration::days(2)), today),
            "2d late"
        );
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a-very-long-label", 8), "a-very-…");
    }

    #[test]
    fn test_resolve_task_identifier() {
        let mut board = Board::default();
        let id = board.add_task(draft("Fix leak")).unwrap().id;
        board.add_task(draft("Duplicate")).unwrap();
        board.add_task(draft("duplicate")).unwrap();

        assert_eq!(resolve_task_identifier(&id.to_string(), &board), Ok(id));
        assert_eq!(resolve_task_identifier("fix leak", &board), Ok(id));
        assert!(resolve_task_identifier("missing", &board).is_err());
        assert!(resolve_task_identifier("duplicate", &board).is_err());
    }
}
