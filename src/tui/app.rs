//! Main application logic for the board user interface.
//!
//! This module contains the `App` struct which manages the TUI state,
//! renders the kanban columns, and coordinates the filter bar, the modal
//! editor, and the keyboard drag-and-drop of cards.

use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::Local;
use crossterm::event::{self, Event, KeyCode, KeyModifiers};
use ratatui::{
    backend::Backend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, List, ListItem, Paragraph, Wrap},
    Frame, Terminal,
};

use crate::board::{format_due_relative, format_kind, format_priority, Board};
use crate::drag::{auto_scroll, DragController, DropTarget, ScrollDirection};
use crate::fields::{Priority, TaskKind};
use crate::filter::{unique_assignees, unique_labels, Criteria};
use crate::task::Task;
use crate::tui::{
    colors::{ACCENT_PURPLE, HIGH_ORANGE, LOW_BLUE, MEDIUM_YELLOW, URGENT_RED},
    enums::{AppState, InputMode},
    input::InputField,
    task_form::{
        TaskForm, ASSIGNEE_FIELD, BRANCH_FIELD, DESCRIPTION_FIELD, DUE_FIELD, KIND_FIELD,
        LABELS_FIELD, PRIORITY_FIELD, TITLE_FIELD,
    },
    utils::centered_rect,
};

/// Narrowest rendering for a single column before the board starts panning.
const MIN_COLUMN_WIDTH: u16 = 28;
/// Horizontal edge band (in cells) that triggers auto-scroll while dragging.
const SCROLL_EDGE_CELLS: u16 = 4;

/// Main application state for the board user interface.
pub struct App {
    state: AppState,
    board: Board,
    board_path: PathBuf,
    criteria: Criteria,
    column_cursor: usize,
    row_cursor: usize,
    first_visible: usize,
    visible_count: usize,
    board_width: u16,
    drag: DragController,
    task_form: TaskForm,
    input_mode: InputMode,
    search_active: bool,
    status_message: String,
    confirm_delete: Option<u64>,
    selected_task: Option<u64>,
    label_cursor: usize,
}

impl App {
    /// Create a new App instance, loading the board from the specified path.
    pub fn new(board_path: &Path) -> io::Result<Self> {
        let board = Board::load(board_path);
        Ok(App {
            state: AppState::Board,
            board,
            board_path: board_path.to_path_buf(),
            criteria: Criteria::default(),
            column_cursor: 0,
            row_cursor: 0,
            first_visible: 0,
            visible_count: 1,
            board_width: 0,
            drag: DragController::new(),
            task_form: TaskForm::new(),
            input_mode: InputMode::None,
            search_active: false,
            status_message: String::new(),
            confirm_delete: None,
            selected_task: None,
            label_cursor: 0,
        })
    }

    /// Reload the board from disk and refresh cursors.
    fn refresh_board(&mut self) {
        self.board = Board::load(&self.board_path);
        self.clamp_cursors();
    }

    /// Save the board to disk.
    fn save_board(&mut self) {
        if let Err(e) = self.board.save(&self.board_path) {
            self.set_status_message(format!("Error saving: {}", e));
        }
    }

    fn set_status_message(&mut self, msg: String) {
        self.status_message = msg;
    }

    fn clear_status_message(&mut self) {
        self.status_message.clear();
    }

    /// Visible task ids of one column under the active criteria.
    fn visible_ids(&self, column_idx: usize) -> Vec<u64> {
        let Some(column) = self.board.columns.get(column_idx) else {
            return Vec::new();
        };
        self.board
            .tasks_in_column(&column.id, &self.criteria)
            .iter()
            .map(|t| t.id)
            .collect()
    }

    /// Visible ids of the cursor column minus the dragged card: the list a
    /// drag gesture can aim at. One slot past the end is the column itself.
    fn drag_targets(&self, column_idx: usize) -> Vec<u64> {
        let active = self.drag.active_task();
        self.visible_ids(column_idx)
            .into_iter()
            .filter(|id| Some(*id) != active)
            .collect()
    }

    /// Keep cursors inside the board after any mutation or filter change.
    fn clamp_cursors(&mut self) {
        if self.board.columns.is_empty() {
            self.column_cursor = 0;
            self.row_cursor = 0;
            return;
        }
        self.column_cursor = self.column_cursor.min(self.board.columns.len() - 1);
        let rows = self.visible_ids(self.column_cursor).len();
        if self.drag.is_dragging() {
            // The slot past the last card addresses the column itself.
            self.row_cursor = self.row_cursor.min(self.drag_targets(self.column_cursor).len());
        } else {
            self.row_cursor = self.row_cursor.min(rows.saturating_sub(1));
        }
    }

    /// The task under the cursor, if any.
    fn current_task_id(&self) -> Option<u64> {
        self.visible_ids(self.column_cursor)
            .get(self.row_cursor)
            .copied()
    }

    /// What a drop right now would land on.
    fn current_drop_target(&self) -> DropTarget {
        let targets = self.drag_targets(self.column_cursor);
        match targets.get(self.row_cursor) {
            Some(&id) => DropTarget::Task(id),
            None => match self.board.columns.get(self.column_cursor) {
                Some(column) => DropTarget::Column(column.id.clone()),
                None => DropTarget::Outside,
            },
        }
    }

    /// Keep the cursor column inside the visible window (idle navigation).
    fn ensure_column_visible(&mut self) {
        if self.column_cursor < self.first_visible {
            self.first_visible = self.column_cursor;
        } else if self.column_cursor >= self.first_visible + self.visible_count {
            self.first_visible = self.column_cursor + 1 - self.visible_count;
        }
    }

    /// Hover update during a drag: eager column preview plus the edge
    /// auto-scroll signal, re-evaluated on every move.
    fn drag_hover(&mut self) {
        let target = self.current_drop_target();
        self.drag.drag_over(&mut self.board, &target);
        if !self.drag.is_dragging() {
            // The dragged card vanished mid-gesture.
            self.set_status_message("Card no longer exists".to_string());
            self.clamp_cursors();
            return;
        }

        let max_first = self.board.columns.len().saturating_sub(self.visible_count);
        match auto_scroll(
            self.pointer_x(),
            0,
            self.board_width,
            SCROLL_EDGE_CELLS,
        ) {
            Some(ScrollDirection::Left) => {
                self.first_visible = self.first_visible.saturating_sub(1);
            }
            Some(ScrollDirection::Right) => {
                self.first_visible = (self.first_visible + 1).min(max_first);
            }
            None => {}
        }
        self.clamp_cursors();
    }

    /// Approximate x position of the drag point: the center of the cursor
    /// column, clamped to the viewport edge when the column is off-screen.
    fn pointer_x(&self) -> u16 {
        if self.visible_count == 0 || self.board_width == 0 {
            return 0;
        }
        if self.column_cursor < self.first_visible {
            return 0;
        }
        if self.column_cursor >= self.first_visible + self.visible_count {
            return self.board_width;
        }
        let column_width = self.board_width / self.visible_count as u16;
        let offset = (self.column_cursor - self.first_visible) as u16;
        offset * column_width + column_width / 2
    }

    /// Cycle the kind filter through all kinds and back to "any".
    fn cycle_kind_filter(&mut self) {
        let order = [
            TaskKind::Bug,
            TaskKind::Feature,
            TaskKind::Enhancement,
            TaskKind::Refactor,
            TaskKind::Docs,
            TaskKind::PullRequest,
        ];
        self.criteria.kind = match self.criteria.kind {
            None => Some(order[0]),
            Some(current) => order
                .iter()
                .position(|&k| k == current)
                .and_then(|i| order.get(i + 1))
                .copied(),
        };
        self.clamp_cursors();
        self.set_status_message(match self.criteria.kind {
            Some(k) => format!("Kind filter: {}", format_kind(k)),
            None => "Kind filter cleared".to_string(),
        });
    }

    /// Cycle the priority filter through all priorities and back to "any".
    fn cycle_priority_filter(&mut self) {
        let order = [
            Priority::Low,
            Priority::Medium,
            Priority::High,
            Priority::Urgent,
        ];
        self.criteria.priority = match self.criteria.priority {
            None => Some(order[0]),
            Some(current) => order
                .iter()
                .position(|&p| p == current)
                .and_then(|i| order.get(i + 1))
                .copied(),
        };
        self.clamp_cursors();
        self.set_status_message(match self.criteria.priority {
            Some(p) => format!("Priority filter: {}", format_priority(p)),
            None => "Priority filter cleared".to_string(),
        });
    }

    /// Cycle the assignee filter through everyone on the board.
    fn cycle_assignee_filter(&mut self) {
        let assignees = unique_assignees(&self.board.tasks);
        if assignees.is_empty() {
            self.set_status_message("No assignees on this board".to_string());
            return;
        }
        self.criteria.assignee = match self.criteria.assignee.take() {
            None => assignees.first().cloned(),
            Some(current) => assignees
                .iter()
                .position(|a| *a == current)
                .and_then(|i| assignees.get(i + 1))
                .cloned(),
        };
        self.clamp_cursors();
        self.set_status_message(match self.criteria.assignee {
            Some(ref a) => format!("Assignee filter: {}", a),
            None => "Assignee filter cleared".to_string(),
        });
    }

    /// Move the selected card to the next column without a drag gesture.
    fn quick_move(&mut self) {
        let Some(task_id) = self.current_task_id() else {
            self.set_status_message("No card selected".to_string());
            return;
        };
        let Some(task) = self.board.get(task_id) else {
            return;
        };
        let next = self
            .board
            .columns
            .iter()
            .position(|c| c.id == task.status)
            .map(|i| (i + 1) % self.board.columns.len())
            .unwrap_or(0);
        let column_id = self.board.columns[next].id.clone();
        let title = self.board.columns[next].title.clone();
        match self.board.move_task(task_id, &column_id) {
            Ok(()) => {
                self.save_board();
                self.clamp_cursors();
                self.set_status_message(format!("Moved #{} to {}", task_id, title));
            }
            Err(e) => self.set_status_message(format!("Error: {}", e)),
        }
    }

    /// Handle keyboard input while a drag is in progress.
    fn handle_drag_input(&mut self, key: KeyCode) {
        match key {
            KeyCode::Esc => {
                self.drag.cancel(&mut self.board);
                self.clamp_cursors();
                self.set_status_message("Drag cancelled".to_string());
            }
            KeyCode::Left => {
                if self.column_cursor > 0 {
                    self.column_cursor -= 1;
                    self.row_cursor = self.drag_targets(self.column_cursor).len();
                    self.drag_hover();
                }
            }
            KeyCode::Right => {
                if self.column_cursor + 1 < self.board.columns.len() {
                    self.column_cursor += 1;
                    self.row_cursor = self.drag_targets(self.column_cursor).len();
                    self.drag_hover();
                }
            }
            KeyCode::Up => {
                self.row_cursor = self.row_cursor.saturating_sub(1);
                self.drag_hover();
            }
            KeyCode::Down => {
                let max = self.drag_targets(self.column_cursor).len();
                self.row_cursor = (self.row_cursor + 1).min(max);
                self.drag_hover();
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                let target = self.current_drop_target();
                let id = self.drag.active_task();
                self.drag.drop_on(&mut self.board, target);
                self.save_board();
                self.clamp_cursors();
                if let Some(id) = id {
                    self.set_status_message(format!("Dropped #{}", id));
                }
            }
            _ => {}
        }
    }

    /// Handle keyboard input when the board view has focus.
    ///
    /// Returns true if the application should quit.
    fn handle_board_input(&mut self, key: KeyCode, modifiers: KeyModifiers) -> io::Result<bool> {
        if self.search_active {
            match key {
                KeyCode::Esc => {
                    self.search_active = false;
                    self.criteria.search.clear();
                    self.input_mode = InputMode::None;
                    self.clamp_cursors();
                    self.clear_status_message();
                }
                KeyCode::Enter => {
                    self.search_active = false;
                    self.input_mode = InputMode::None;
                    if self.criteria.search.is_empty() {
                        self.set_status_message("Search cleared".to_string());
                    } else {
                        self.set_status_message(format!(
                            "Search applied: '{}'",
                            self.criteria.search
                        ));
                    }
                }
                KeyCode::Backspace => {
                    self.criteria.search.pop();
                    self.clamp_cursors();
                }
                KeyCode::Char(c) => {
                    self.criteria.search.push(c);
                    self.clamp_cursors();
                }
                _ => {}
            }
            return Ok(false);
        }

        if self.drag.is_dragging() {
            self.handle_drag_input(key);
            return Ok(false);
        }

        match key {
            KeyCode::Char('q') if modifiers.contains(KeyModifiers::CONTROL) => return Ok(true),
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => return Ok(true),
            KeyCode::Char('q') => return Ok(true),
            KeyCode::Esc => {
                if !self.criteria.is_empty() {
                    self.criteria = Criteria::default();
                    self.clamp_cursors();
                    self.set_status_message("Filters cleared".to_string());
                } else {
                    return Ok(true);
                }
            }
            KeyCode::Left => {
                self.column_cursor = self.column_cursor.saturating_sub(1);
                self.clamp_cursors();
                self.ensure_column_visible();
            }
            KeyCode::Right => {
                if self.column_cursor + 1 < self.board.columns.len() {
                    self.column_cursor += 1;
                }
                self.clamp_cursors();
                self.ensure_column_visible();
            }
            KeyCode::Up => {
                self.row_cursor = self.row_cursor.saturating_sub(1);
            }
            KeyCode::Down => {
                let rows = self.visible_ids(self.column_cursor).len();
                if self.row_cursor + 1 < rows {
                    self.row_cursor += 1;
                }
            }
            KeyCode::Char(' ') => {
                if let Some(task_id) = self.current_task_id() {
                    self.drag.drag_start(&self.board, task_id);
                    if self.drag.is_dragging() {
                        self.set_status_message(format!(
                            "Dragging #{} - arrows to aim, Enter to drop, Esc to cancel",
                            task_id
                        ));
                    }
                }
            }
            KeyCode::Enter => {
                if let Some(task_id) = self.current_task_id() {
                    self.selected_task = Some(task_id);
                    self.state = AppState::TaskDetail;
                }
            }
            KeyCode::Char('a') => {
                self.task_form = TaskForm::new();
                self.task_form.update_active_field();
                self.state = AppState::AddTask;
                self.input_mode = InputMode::Text;
            }
            KeyCode::Char('e') => {
                if let Some(task_id) = self.current_task_id() {
                    if let Some(task) = self.board.get(task_id) {
                        self.selected_task = Some(task_id);
                        self.task_form = TaskForm::from_task(task);
                        self.task_form.update_active_field();
                        self.state = AppState::EditTask;
                        self.input_mode = InputMode::Text;
                    }
                }
            }
            KeyCode::Char('d') => {
                if let Some(task_id) = self.current_task_id() {
                    self.confirm_delete = Some(task_id);
                    self.state = AppState::Confirm;
                }
            }
            KeyCode::Char('m') => self.quick_move(),
            KeyCode::Char('/') => {
                self.search_active = true;
                self.input_mode = InputMode::Text;
                self.set_status_message(
                    "Search: type to match title/description, Enter to apply, Esc to cancel"
                        .to_string(),
                );
            }
            KeyCode::Char('f') => self.cycle_kind_filter(),
            KeyCode::Char('p') => self.cycle_priority_filter(),
            KeyCode::Char('o') => self.cycle_assignee_filter(),
            KeyCode::Char('l') => {
                self.label_cursor = 0;
                self.state = AppState::LabelFilter;
            }
            KeyCode::Char('x') => {
                self.criteria = Criteria::default();
                self.clamp_cursors();
                self.set_status_message("Filters cleared".to_string());
            }
            KeyCode::Char('r') => {
                self.refresh_board();
                self.set_status_message("Board reloaded".to_string());
            }
            KeyCode::Char('h') => {
                self.state = AppState::Help;
            }
            _ => {}
        }
        Ok(false)
    }

    /// Handle keyboard input when viewing card details.
    fn handle_detail_input(&mut self, key: KeyCode) -> io::Result<bool> {
        match key {
            KeyCode::Esc | KeyCode::Char('q') => {
                self.state = AppState::Board;
            }
            KeyCode::Char('e') => {
                if let Some(task_id) = self.selected_task {
                    if let Some(task) = self.board.get(task_id) {
                        self.task_form = TaskForm::from_task(task);
                        self.task_form.update_active_field();
                        self.state = AppState::EditTask;
                        self.input_mode = InputMode::Text;
                    }
                }
            }
            KeyCode::Char('d') => {
                if let Some(task_id) = self.selected_task {
                    self.confirm_delete = Some(task_id);
                    self.state = AppState::Confirm;
                }
            }
            _ => {}
        }
        Ok(false)
    }

    /// Handle keyboard input in the create/edit form.
    fn handle_form_input(&mut self, key: KeyCode, is_edit: bool) -> io::Result<bool> {
        match key {
            KeyCode::Esc => {
                // Closing discards all in-progress edits.
                self.state = AppState::Board;
                self.input_mode = InputMode::None;
            }
            KeyCode::Tab | KeyCode::Down => self.task_form.next_field(),
            KeyCode::BackTab | KeyCode::Up => self.task_form.prev_field(),
            KeyCode::Left => self.task_form.handle_left_right(false),
            KeyCode::Right => self.task_form.handle_left_right(true),
            KeyCode::Backspace => self.task_form.handle_backspace(),
            KeyCode::Delete => self.task_form.handle_delete(),
            KeyCode::Enter => {
                if self.task_form.current_field == LABELS_FIELD
                    && !self.task_form.label_input.value.trim().is_empty()
                {
                    self.task_form.commit_label();
                    return Ok(false);
                }
                let result = if is_edit {
                    self.submit_edit()
                } else {
                    self.submit_create()
                };
                match result {
                    Ok(msg) => {
                        self.state = AppState::Board;
                        self.input_mode = InputMode::None;
                        self.clamp_cursors();
                        self.set_status_message(msg);
                    }
                    Err(e) => {
                        // Inline error; the form stays open.
                        self.task_form.error = Some(e);
                    }
                }
            }
            KeyCode::Char(c) => self.task_form.handle_char(c),
            _ => {}
        }
        Ok(false)
    }

    fn submit_create(&mut self) -> Result<String, String> {
        let draft = self.task_form.to_draft()?;
        let id = self
            .board
            .add_task(draft)
            .map(|t| t.id)
            .map_err(|e| e.to_string())?;
        self.save_board();
        Ok(format!("Created #{id}"))
    }

    fn submit_edit(&mut self) -> Result<String, String> {
        let task_id = self.selected_task.ok_or("No card selected")?;
        let patch = self.task_form.to_patch()?;
        self.board
            .update_task(task_id, &patch)
            .map_err(|e| e.to_string())?;
        self.save_board();
        Ok(format!("Updated #{task_id}"))
    }

    /// Handle keyboard input in the label filter picker.
    fn handle_label_filter_input(&mut self, key: KeyCode) -> io::Result<bool> {
        let labels = unique_labels(&self.board.tasks);
        match key {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('l') => {
                self.state = AppState::Board;
            }
            KeyCode::Up => self.label_cursor = self.label_cursor.saturating_sub(1),
            KeyCode::Down => {
                if self.label_cursor + 1 < labels.len() {
                    self.label_cursor += 1;
                }
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                if let Some(label) = labels.get(self.label_cursor) {
                    if let Some(pos) = self.criteria.labels.iter().position(|l| l == label) {
                        self.criteria.labels.remove(pos);
                    } else {
                        self.criteria.labels.push(label.clone());
                    }
                    self.clamp_cursors();
                }
            }
            KeyCode::Char('x') => {
                self.criteria.labels.clear();
                self.clamp_cursors();
            }
            _ => {}
        }
        Ok(false)
    }

    /// Handle keyboard input on the help screen.
    fn handle_help_input(&mut self, key: KeyCode) -> io::Result<bool> {
        match key {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('h') => {
                self.state = AppState::Board;
            }
            _ => {}
        }
        Ok(false)
    }

    /// Handle keyboard input in the delete confirmation dialog.
    fn handle_confirm_input(&mut self, key: KeyCode) -> io::Result<bool> {
        match key {
            KeyCode::Char('y') | KeyCode::Enter => {
                if let Some(task_id) = self.confirm_delete.take() {
                    let mut ids = std::collections::HashSet::new();
                    ids.insert(task_id);
                    self.board.remove_ids(&ids);
                    self.save_board();
                    self.clamp_cursors();
                    self.selected_task = None;
                    self.set_status_message(format!("Deleted #{task_id}"));
                }
                self.state = AppState::Board;
            }
            KeyCode::Char('n') | KeyCode::Esc => {
                self.confirm_delete = None;
                self.state = AppState::Board;
            }
            _ => {}
        }
        Ok(false)
    }

    /// Poll for and handle keyboard events based on current application state.
    fn handle_input(&mut self) -> io::Result<bool> {
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                self.clear_status_message();

                let should_quit = match self.state {
                    AppState::Board => self.handle_board_input(key.code, key.modifiers)?,
                    AppState::TaskDetail => self.handle_detail_input(key.code)?,
                    AppState::AddTask => self.handle_form_input(key.code, false)?,
                    AppState::EditTask => self.handle_form_input(key.code, true)?,
                    AppState::LabelFilter => self.handle_label_filter_input(key.code)?,
                    AppState::Help => self.handle_help_input(key.code)?,
                    AppState::Confirm => self.handle_confirm_input(key.code)?,
                };
                if should_quit {
                    return Ok(true);
                }
            }
        }
        Ok(false)
    }

    fn priority_color(priority: Priority) -> Color {
        match priority {
            Priority::Low => LOW_BLUE,
            Priority::Medium => MEDIUM_YELLOW,
            Priority::High => HIGH_ORANGE,
            Priority::Urgent => URGENT_RED,
        }
    }

    /// One card as list lines: title row plus a metadata row.
    fn card_lines(&self, task: &Task) -> Vec<Line<'static>> {
        let today = Local::now().date_naive();
        let dragged = self.drag.active_task() == Some(task.id);
        let title_style = if dragged {
            Style::default()
                .fg(ACCENT_PURPLE)
                .add_modifier(Modifier::BOLD | Modifier::ITALIC)
        } else {
            Style::default().add_modifier(Modifier::BOLD)
        };

        let mut meta = vec![
            Span::styled(
                format!(" {} ", format_kind(task.kind)),
                Style::default().fg(Color::Gray),
            ),
            Span::styled(
                format!("{} ", format_priority(task.priority)),
                Style::default().fg(Self::priority_color(task.priority)),
            ),
        ];
        if let Some(ref assignee) = task.assignee {
            meta.push(Span::styled(
                format!("@{} ", assignee),
                Style::default().fg(Color::Cyan),
            ));
        }
        if task.due.is_some() {
            meta.push(Span::styled(
                format_due_relative(task.due, today),
                Style::default().fg(Color::Gray),
            ));
        }
        if !task.labels.is_empty() {
            meta.push(Span::styled(
                format!(" [{}]", task.labels.join(",")),
                Style::default().fg(Color::DarkGray),
            ));
        }

        vec![
            Line::from(Span::styled(
                format!("#{} {}{}", task.id, task.title, if dragged { "  <drag>" } else { "" }),
                title_style,
            )),
            Line::from(meta),
        ]
    }

    /// Render one column of the board.
    fn render_column(&self, f: &mut Frame, area: Rect, column_idx: usize) {
        let Some(column) = self.board.columns.get(column_idx) else {
            return;
        };
        let tasks = self.board.tasks_in_column(&column.id, &self.criteria);
        let is_cursor_column = column_idx == self.column_cursor;

        let dragging = self.drag.is_dragging();
        let targets_len = self.drag_targets(column_idx).len();
        let column_targeted =
            dragging && is_cursor_column && self.row_cursor >= targets_len;

        let border_style = if column_targeted {
            Style::default().fg(URGENT_RED).add_modifier(Modifier::BOLD)
        } else if is_cursor_column {
            Style::default().fg(ACCENT_PURPLE)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(if column_targeted {
                BorderType::Double
            } else {
                BorderType::Plain
            })
            .border_style(border_style)
            .title(format!("{} ({})", column.title, tasks.len()));

        // Highlight index: in a drag the cursor runs over the target list
        // (dragged card excluded); idle it runs over the visible cards.
        let highlight = if is_cursor_column && !column_targeted {
            let active = self.drag.active_task();
            let mut seen = 0usize;
            let mut highlight = None;
            for (idx, task) in tasks.iter().enumerate() {
                if dragging && Some(task.id) == active {
                    continue;
                }
                if seen == self.row_cursor {
                    highlight = Some(idx);
                    break;
                }
                seen += 1;
            }
            if dragging {
                highlight
            } else {
                Some(self.row_cursor.min(tasks.len().saturating_sub(1)))
            }
        } else {
            None
        };

        let items: Vec<ListItem> = tasks
            .iter()
            .enumerate()
            .map(|(idx, task)| {
                let item = ListItem::new(self.card_lines(task));
                if !tasks.is_empty() && highlight == Some(idx) {
                    item.style(Style::default().bg(Color::Rgb(40, 40, 60)))
                } else {
                    item
                }
            })
            .collect();

        let list = List::new(items).block(block);
        f.render_widget(list, area);
    }

    /// Render the board view: filter summary plus the visible columns.
    fn render_board(&mut self, f: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(0)])
            .split(area);

        self.render_filter_bar(f, chunks[0]);

        let board_area = chunks[1];
        let total = self.board.columns.len();
        self.visible_count = ((board_area.width / MIN_COLUMN_WIDTH) as usize)
            .clamp(1, total.max(1));
        self.board_width = board_area.width;
        let max_first = total.saturating_sub(self.visible_count);
        self.first_visible = self.first_visible.min(max_first);

        let constraints: Vec<Constraint> = (0..self.visible_count)
            .map(|_| Constraint::Ratio(1, self.visible_count as u32))
            .collect();
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(constraints)
            .split(board_area);

        for (slot, area) in columns.iter().enumerate() {
            self.render_column(f, *area, self.first_visible + slot);
        }
    }

    /// Render the one-line filter summary.
    fn render_filter_bar(&self, f: &mut Frame, area: Rect) {
        let mut spans: Vec<Span> = Vec::new();
        if self.search_active || !self.criteria.search.is_empty() {
            spans.push(Span::styled(
                format!("search:'{}' ", self.criteria.search),
                Style::default().fg(Color::Yellow),
            ));
        }
        if let Some(kind) = self.criteria.kind {
            spans.push(Span::raw(format!("kind:{} ", format_kind(kind))));
        }
        if let Some(priority) = self.criteria.priority {
            spans.push(Span::raw(format!("priority:{} ", format_priority(priority))));
        }
        if let Some(ref assignee) = self.criteria.assignee {
            spans.push(Span::raw(format!("assignee:{} ", assignee)));
        }
        if !self.criteria.labels.is_empty() {
            spans.push(Span::raw(format!("labels:{} ", self.criteria.labels.join("+"))));
        }
        if spans.is_empty() {
            spans.push(Span::styled(
                "no filters - / search, f kind, p priority, o assignee, l labels",
                Style::default().fg(Color::DarkGray),
            ));
        }
        if self.visible_count < self.board.columns.len() {
            spans.push(Span::styled(
                format!(
                    " | columns {}-{}/{}",
                    self.first_visible + 1,
                    self.first_visible + self.visible_count,
                    self.board.columns.len()
                ),
                Style::default().fg(Color::DarkGray),
            ));
        }
        f.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    /// Render the detailed view of a single card.
    fn render_task_detail(&mut self, f: &mut Frame, area: Rect) {
        let Some(task) = self.selected_task.and_then(|id| self.board.get(id)) else {
            self.state = AppState::Board;
            return;
        };
        let today = Local::now().date_naive();

        let mut text = vec![
            Line::from(vec![
                Span::styled("ID: ", Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(task.id.to_string()),
            ]),
            Line::from(vec![
                Span::styled("Title: ", Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(&task.title),
            ]),
            Line::from(vec![
                Span::styled("Kind: ", Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(format_kind(task.kind)),
            ]),
            Line::from(vec![
                Span::styled("Priority: ", Style::default().add_modifier(Modifier::BOLD)),
                Span::styled(
                    format_priority(task.priority),
                    Style::default().fg(Self::priority_color(task.priority)),
                ),
            ]),
            Line::from(vec![
                Span::styled("Column: ", Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(
                    self.board
                        .column_title(&task.status)
                        .unwrap_or(task.status.as_str()),
                ),
            ]),
            Line::from(vec![
                Span::styled("Assignee: ", Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(task.assignee.as_deref().unwrap_or("-")),
            ]),
            Line::from(vec![
                Span::styled("Branch: ", Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(task.branch.as_deref().unwrap_or("-")),
            ]),
            Line::from(vec![
                Span::styled("Due: ", Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(match task.due {
                    Some(d) => format!("{} ({})", d, format_due_relative(Some(d), today)),
                    None => "-".to_string(),
                }),
            ]),
            Line::from(vec![
                Span::styled("Labels: ", Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(if task.labels.is_empty() {
                    "-".to_string()
                } else {
                    task.labels.join(", ")
                }),
            ]),
        ];

        text.push(Line::from(""));
        text.push(Line::from(vec![Span::styled(
            "Description:",
            Style::default().add_modifier(Modifier::BOLD),
        )]));
        text.push(Line::from(task.description.as_deref().unwrap_or("-").to_string()));

        let paragraph = Paragraph::new(text)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Card Details - [e]dit, [d]elete, [Esc] back"),
            )
            .wrap(Wrap { trim: true });

        f.render_widget(paragraph, area);
    }

    fn render_text_field(
        &self,
        f: &mut Frame,
        area: Rect,
        field: &InputField,
        title: &str,
        active: bool,
    ) {
        let style = if active {
            Style::default().fg(ACCENT_PURPLE)
        } else {
            Style::default()
        };
        let input = Paragraph::new(field.value.as_str()).block(
            Block::default()
                .borders(Borders::ALL)
                .title(title.to_string())
                .border_style(style),
        );
        f.render_widget(input, area);
    }

    fn render_selector(
        &self,
        f: &mut Frame,
        area: Rect,
        value: &str,
        title: &str,
        active: bool,
    ) {
        let style = if active {
            Style::default().fg(ACCENT_PURPLE)
        } else {
            Style::default()
        };
        let text = format!("< {} >", value);
        let selector = Paragraph::new(text).block(
            Block::default()
                .borders(Borders::ALL)
                .title(title.to_string())
                .border_style(style),
        );
        f.render_widget(selector, area);
    }

    /// Render the create/edit form as a centered modal.
    fn render_task_form(&mut self, f: &mut Frame, area: Rect, is_edit: bool) {
        let modal = centered_rect(70, 90, area);
        f.render_widget(Clear, modal);

        let title = if is_edit { "Edit Card" } else { "New Card" };
        let outer = Block::default()
            .borders(Borders::ALL)
            .title(format!("{} - [Tab] next field, [Enter] save, [Esc] discard", title));
        let inner = outer.inner(modal);
        f.render_widget(outer, modal);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Length(3), // Description
                Constraint::Length(3), // Kind
                Constraint::Length(3), // Priority
                Constraint::Length(3), // Labels
                Constraint::Length(3), // Assignee
                Constraint::Length(3), // Branch
                Constraint::Length(3), // Due
                Constraint::Min(1),    // Error / hint
            ])
            .split(inner);

        let current = self.task_form.current_field;
        self.render_text_field(f, chunks[0], &self.task_form.title, "Title *", current == TITLE_FIELD);
        self.render_text_field(
            f,
            chunks[1],
            &self.task_form.description,
            "Description",
            current == DESCRIPTION_FIELD,
        );
        self.render_selector(
            f,
            chunks[2],
            format_kind(self.task_form.selected_kind()),
            "Kind",
            current == KIND_FIELD,
        );
        self.render_selector(
            f,
            chunks[3],
            format_priority(self.task_form.selected_priority()),
            "Priority",
            current == PRIORITY_FIELD,
        );

        // Labels: committed set plus the pending entry.
        let label_style = if current == LABELS_FIELD {
            Style::default().fg(ACCENT_PURPLE)
        } else {
            Style::default()
        };
        let mut label_spans: Vec<Span> = self
            .task_form
            .labels
            .iter()
            .map(|l| {
                Span::styled(format!("[{}] ", l), Style::default().fg(Color::Cyan))
            })
            .collect();
        label_spans.push(Span::raw(self.task_form.label_input.value.clone()));
        let labels = Paragraph::new(Line::from(label_spans)).block(
            Block::default()
                .borders(Borders::ALL)
                .title("Labels - Enter commits, Backspace on empty removes last")
                .border_style(label_style),
        );
        f.render_widget(labels, chunks[4]);

        self.render_text_field(
            f,
            chunks[5],
            &self.task_form.assignee,
            "Assignee",
            current == ASSIGNEE_FIELD,
        );
        self.render_text_field(
            f,
            chunks[6],
            &self.task_form.branch,
            "Branch",
            current == BRANCH_FIELD,
        );
        self.render_text_field(
            f,
            chunks[7],
            &self.task_form.due,
            "Due (YYYY-MM-DD, today, in 3d)",
            current == DUE_FIELD,
        );

        if let Some(ref error) = self.task_form.error {
            let error_line = Paragraph::new(error.as_str())
                .style(Style::default().fg(URGENT_RED).add_modifier(Modifier::BOLD));
            f.render_widget(error_line, chunks[8]);
        }
    }

    /// Render the label filter picker.
    fn render_label_filter(&mut self, f: &mut Frame, area: Rect) {
        let labels = unique_labels(&self.board.tasks);
        let modal = centered_rect(40, 60, area);
        f.render_widget(Clear, modal);

        let items: Vec<ListItem> = if labels.is_empty() {
            vec![ListItem::new("No labels on this board")]
        } else {
            labels
                .iter()
                .enumerate()
                .map(|(idx, label)| {
                    let selected = self.criteria.labels.contains(label);
                    let marker = if selected { "[x]" } else { "[ ]" };
                    let style = if idx == self.label_cursor {
                        Style::default().fg(ACCENT_PURPLE).add_modifier(Modifier::BOLD)
                    } else if selected {
                        Style::default().fg(Color::Cyan)
                    } else {
                        Style::default()
                    };
                    ListItem::new(Span::styled(format!("{} {}", marker, label), style))
                })
                .collect()
        };

        let list = List::new(items).block(
            Block::default()
                .borders(Borders::ALL)
                .title("Label filter (AND) - [Space] toggle, [x] clear, [Esc] close"),
        );
        f.render_widget(list, modal);
    }

    /// Render the help screen.
    fn render_help(&self, f: &mut Frame, area: Rect) {
        let text = vec![
            Line::from(Span::styled(
                "Board",
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from("  arrows       select card / column"),
            Line::from("  Space        pick up card (drag)"),
            Line::from("  Enter        card details"),
            Line::from("  a / e / d    add / edit / delete card"),
            Line::from("  m            move card to next column"),
            Line::from(""),
            Line::from(Span::styled(
                "While dragging",
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from("  arrows       aim at a card or a column"),
            Line::from("  Enter/Space  drop"),
            Line::from("  Esc          cancel (restores the pre-drag state)"),
            Line::from(""),
            Line::from(Span::styled(
                "Filters",
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from("  /            search title/description"),
            Line::from("  f / p / o    cycle kind / priority / assignee"),
            Line::from("  l            label picker (AND semantics)"),
            Line::from("  x            clear all filters"),
            Line::from(""),
            Line::from("  r reload, h help, q quit"),
        ];
        let paragraph = Paragraph::new(text)
            .block(Block::default().borders(Borders::ALL).title("Help - [Esc] back"));
        f.render_widget(paragraph, area);
    }

    /// Render the delete confirmation dialog.
    fn render_confirm(&self, f: &mut Frame, area: Rect) {
        let Some(task_id) = self.confirm_delete else {
            return;
        };
        let title = self
            .board
            .get(task_id)
            .map(|t| t.title.clone())
            .unwrap_or_default();
        let modal = centered_rect(40, 20, area);
        f.render_widget(Clear, modal);
        let text = vec![
            Line::from(format!("Delete #{} {}?", task_id, title)),
            Line::from(""),
            Line::from("[y] delete    [n] keep"),
        ];
        let dialog = Paragraph::new(text)
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(URGENT_RED))
                    .title("Confirm"),
            );
        f.render_widget(dialog, modal);
    }

    /// Render the status bar at the bottom of the screen.
    fn render_status_bar(&self, f: &mut Frame, area: Rect) {
        let typing = matches!(self.input_mode, InputMode::Text);
        let (text, bg) = if self.drag.is_dragging() {
            (
                format!(
                    "DRAG #{} - arrows aim, Enter drops, Esc cancels  {}",
                    self.drag.active_task().unwrap_or_default(),
                    self.status_message
                ),
                URGENT_RED,
            )
        } else if !self.status_message.is_empty() {
            (self.status_message.clone(), ACCENT_PURPLE)
        } else if typing {
            ("INPUT - Enter to confirm, Esc to cancel".to_string(), ACCENT_PURPLE)
        } else {
            (
                "Space drag | a add | e edit | d delete | m move | / search | h help | q quit"
                    .to_string(),
                ACCENT_PURPLE,
            )
        };
        let status = Paragraph::new(text)
            .style(Style::default().bg(bg).fg(Color::Rgb(20, 20, 20)))
            .alignment(Alignment::Left);
        f.render_widget(status, area);
    }

    /// Render the board header.
    fn render_header(&self, f: &mut Frame, area: Rect) {
        let board_name = self
            .board_path
            .file_stem()
            .and_then(|n| n.to_str())
            .map(|n| n.strip_suffix("_board").unwrap_or(n).replace('_', " "))
            .unwrap_or_else(|| "board".to_string());
        let header = Paragraph::new(Line::from(vec![
            Span::styled("TASKBOARD", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw("  "),
            Span::styled(
                format!("Board: {}  Cards: {}", board_name, self.board.tasks.len()),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::ITALIC),
            ),
        ]))
        .block(Block::default().borders(Borders::ALL))
        .alignment(Alignment::Center);
        f.render_widget(header, area);
    }

    /// Main render function that dispatches to appropriate view renderers.
    fn render(&mut self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(f.area());

        self.render_header(f, chunks[0]);

        match self.state {
            AppState::Board => self.render_board(f, chunks[1]),
            AppState::TaskDetail => self.render_task_detail(f, chunks[1]),
            AppState::AddTask => {
                self.render_board(f, chunks[1]);
                self.render_task_form(f, chunks[1], false);
            }
            AppState::EditTask => {
                self.render_board(f, chunks[1]);
                self.render_task_form(f, chunks[1], true);
            }
            AppState::LabelFilter => {
                self.render_board(f, chunks[1]);
                self.render_label_filter(f, chunks[1]);
            }
            AppState::Help => self.render_help(f, chunks[1]),
            AppState::Confirm => {
                self.render_board(f, chunks[1]);
                self.render_confirm(f, chunks[1]);
            }
        }

        self.render_status_bar(f, chunks[2]);
    }

    /// Main event loop for the TUI application.
    ///
    /// Handles rendering and input processing until the user exits.
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.handle_input()? {
                break;
            }
        }
        Ok(())
    }
}
