//! Task form handling for the terminal user interface.
//!
//! This module provides the `TaskForm` structure used by the modal editor
//! for creating and editing cards, including field ordering, selector
//! cycling, and the commit-on-Enter label entry.

use crate::{
    board::{normalise_label, parse_due_input},
    fields::{Priority, TaskKind},
    task::{Task, TaskDraft, TaskPatch},
    tui::input::InputField,
};

/// Order constants for the editor fields.
pub const TITLE_FIELD: usize = 0;
pub const DESCRIPTION_FIELD: usize = 1;
pub const KIND_FIELD: usize = 2;
pub const PRIORITY_FIELD: usize = 3;
pub const LABELS_FIELD: usize = 4;
pub const ASSIGNEE_FIELD: usize = 5;
pub const BRANCH_FIELD: usize = 6;
pub const DUE_FIELD: usize = 7;

const FIELD_COUNT: usize = 8;

/// Modal form state for creating or editing a card.
///
/// `labels` holds the committed label set; `label_input` is the pending
/// entry that joins the set on Enter.
pub struct TaskForm {
    pub title: InputField,
    pub description: InputField,
    pub label_input: InputField,
    pub labels: Vec<String>,
    pub assignee: InputField,
    pub branch: InputField,
    pub due: InputField,
    pub kind: usize,
    pub priority: usize,
    pub current_field: usize,
    pub kinds: Vec<TaskKind>,
    pub priorities: Vec<Priority>,
    pub error: Option<String>,
}

impl TaskForm {
    /// Create an empty form with create-mode defaults.
    pub fn new() -> Self {
        let kinds = vec![
            TaskKind::Bug,
            TaskKind::Feature,
            TaskKind::Enhancement,
            TaskKind::Refactor,
            TaskKind::Docs,
            TaskKind::PullRequest,
        ];
        let priorities = vec![
            Priority::Low,
            Priority::Medium,
            Priority::High,
            Priority::Urgent,
        ];
        Self {
            title: InputField::new(),
            description: InputField::new(),
            label_input: InputField::new(),
            labels: Vec::new(),
            assignee: InputField::new(),
            branch: InputField::new(),
            due: InputField::new(),
            kind: 1,     // Feature
            priority: 1, // Medium
            current_field: 0,
            kinds,
            priorities,
            error: None,
        }
    }

    /// Create a form populated from an existing task (edit mode).
    pub fn from_task(task: &Task) -> Self {
        let mut form = Self::new();
        form.title = InputField::with_value(&task.title);
        form.description =
            InputField::with_value(task.description.as_deref().unwrap_or_default());
        form.labels = task.labels.clone();
        form.assignee = InputField::with_value(task.assignee.as_deref().unwrap_or_default());
        form.branch = InputField::with_value(task.branch.as_deref().unwrap_or_default());
        form.due =
            InputField::with_value(&task.due.map(|d| d.to_string()).unwrap_or_default());
        form.kind = form.kinds.iter().position(|&k| k == task.kind).unwrap_or(1);
        form.priority = form
            .priorities
            .iter()
            .position(|&p| p == task.priority)
            .unwrap_or(1);
        form
    }

    /// Move to the next field in the form.
    pub fn next_field(&mut self) {
        self.current_field = (self.current_field + 1) % FIELD_COUNT;
        self.update_active_field();
    }

    /// Move to the previous field in the form.
    pub fn prev_field(&mut self) {
        self.current_field = if self.current_field == 0 {
            FIELD_COUNT - 1
        } else {
            self.current_field - 1
        };
        self.update_active_field();
    }

    fn text_fields_mut(&mut self) -> [(usize, &mut InputField); 6] {
        [
            (TITLE_FIELD, &mut self.title),
            (DESCRIPTION_FIELD, &mut self.description),
            (LABELS_FIELD, &mut self.label_input),
            (ASSIGNEE_FIELD, &mut self.assignee),
            (BRANCH_FIELD, &mut self.branch),
            (DUE_FIELD, &mut self.due),
        ]
    }

    /// Update which field is currently active for editing.
    pub fn update_active_field(&mut self) {
        let current = self.current_field;
        for (order, field) in self.text_fields_mut() {
            field.active = order == current;
        }
    }

    /// The text field under the cursor, if the cursor is not on a selector.
    fn active_text_field(&mut self) -> Option<&mut InputField> {
        let current = self.current_field;
        self.text_fields_mut()
            .into_iter()
            .find(|(order, _)| *order == current)
            .map(|(_, field)| field)
    }

    /// Handle character input for the currently active field.
    pub fn handle_char(&mut self, c: char) {
        self.error = None;
        if let Some(field) = self.active_text_field() {
            field.insert_char(c);
        }
    }

    /// Handle backspace. On an empty label entry this removes the most
    /// recently committed label instead.
    pub fn handle_backspace(&mut self) {
        if self.current_field == LABELS_FIELD && self.label_input.value.is_empty() {
            self.labels.pop();
            return;
        }
        if let Some(field) = self.active_text_field() {
            field.backspace();
        }
    }

    /// Handle delete-at-cursor for the currently active field.
    pub fn handle_delete(&mut self) {
        if let Some(field) = self.active_text_field() {
            field.delete();
        }
    }

    /// Handle left/right arrow keys: cursor movement on text fields,
    /// option cycling on the kind/priority selectors.
    pub fn handle_left_right(&mut self, right: bool) {
        match self.current_field {
            KIND_FIELD => {
                self.kind = cycle(self.kind, self.kinds.len(), right);
            }
            PRIORITY_FIELD => {
                self.priority = cycle(self.priority, self.priorities.len(), right);
            }
            _ => {
                if let Some(field) = self.active_text_field() {
                    if right {
                        field.move_right();
                    } else {
                        field.move_left();
                    }
                }
            }
        }
    }

    /// Commit the pending label entry into the label set.
    /// Committing a duplicate is a no-op (set semantics).
    pub fn commit_label(&mut self) {
        let label = normalise_label(&self.label_input.take());
        if !label.is_empty() && !self.labels.contains(&label) {
            self.labels.push(label);
        }
    }

    /// Selected kind value.
    pub fn selected_kind(&self) -> TaskKind {
        self.kinds[self.kind]
    }

    /// Selected priority value.
    pub fn selected_priority(&self) -> Priority {
        self.priorities[self.priority]
    }

    /// Build a draft for `add_task` from the form, validating as the editor
    /// boundary. A pending uncommitted label entry is committed first.
    pub fn to_draft(&mut self) -> Result<TaskDraft, String> {
        self.commit_label();
        if self.title.value.trim().is_empty() {
            return Err("Title is required".to_string());
        }
        let due = self.parse_due()?;
        Ok(TaskDraft {
            title: self.title.value.clone(),
            description: Some(self.description.value.clone()).filter(|d| !d.is_empty()),
            kind: self.selected_kind(),
            priority: self.selected_priority(),
            labels: self.labels.clone(),
            assignee: Some(self.assignee.value.trim().to_string()).filter(|a| !a.is_empty()),
            branch: Some(self.branch.value.trim().to_string()).filter(|b| !b.is_empty()),
            due,
        })
    }

    /// Build a full-replacement patch for `update_task` from the form.
    pub fn to_patch(&mut self) -> Result<TaskPatch, String> {
        self.commit_label();
        if self.title.value.trim().is_empty() {
            return Err("Title is required".to_string());
        }
        let due = self.parse_due()?;
        Ok(TaskPatch {
            title: Some(self.title.value.clone()),
            description: Some(self.description.value.clone()),
            kind: Some(self.selected_kind()),
            priority: Some(self.selected_priority()),
            labels: Some(self.labels.clone()),
            assignee: Some(self.assignee.value.trim().to_string()),
            branch: Some(self.branch.value.trim().to_string()),
            due,
            clear_description: self.description.value.is_empty(),
            clear_assignee: self.assignee.value.trim().is_empty(),
            clear_branch: self.branch.value.trim().is_empty(),
            clear_due: self.due.value.trim().is_empty(),
        })
    }

    fn parse_due(&self) -> Result<Option<chrono::NaiveDate>, String> {
        let input = self.due.value.trim();
        if input.is_empty() {
            return Ok(None);
        }
        parse_due_input(input)
            .map(Some)
            .ok_or_else(|| format!("Could not parse due date '{input}'"))
    }
}

fn cycle(current: usize, len: usize, forward: bool) -> usize {
    if forward {
        (current + 1) % len
    } else if current == 0 {
        len - 1
    } else {
        current - 1
    }
}

impl Default for TaskForm {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commit_label_rejects_duplicates() {
        let mut form = TaskForm::new();
        form.label_input = InputField::with_value("API ");
        form.commit_label();
        form.label_input = InputField::with_value("api");
        form.commit_label();
        assert_eq!(form.labels, vec!["api"]);
    }

    #[test]
    fn test_backspace_on_empty_label_entry_pops_committed_label() {
        let mut form = TaskForm::new();
        form.labels = vec!["api".to_string(), "auth".to_string()];
        form.current_field = LABELS_FIELD;
        form.handle_backspace();
        assert_eq!(form.labels, vec!["api"]);
    }

    #[test]
    fn test_to_draft_requires_title() {
        let mut form = TaskForm::new();
        assert!(form.to_draft().is_err());
        form.title = InputField::with_value("Fix leak");
        assert!(form.to_draft().is_ok());
    }

    #[test]
    fn test_to_draft_rejects_bad_due_date() {
        let mut form = TaskForm::new();
        form.title = InputField::with_value("Fix leak");
        form.due = InputField::with_value("someday");
        assert!(form.to_draft().is_err());
    }

    #[test]
    fn test_to_draft_commits_pending_label() {
        let mut form = TaskForm::new();
        form.title = InputField::with_value("Fix leak");
        form.label_input = InputField::with_value("perf");
        let draft = form.to_draft().unwrap();
        assert_eq!(draft.labels, vec!["perf"]);
    }

    #[test]
    fn test_selector_cycling_wraps() {
        let mut form = TaskForm::new();
        form.current_field = PRIORITY_FIELD;
        form.priority = 0;
        form.handle_left_right(false);
        assert_eq!(form.selected_priority(), Priority::Urgent);
        form.handle_left_right(true);
        assert_eq!(form.selected_priority(), Priority::Low);
    }

    #[test]
    fn test_from_task_round_trips_fields() {
        let task = TaskDraft {
            title: "Edit me".to_string(),
            description: Some("details".to_string()),
            kind: TaskKind::Refactor,
            priority: Priority::High,
            labels: vec!["core".to_string()],
            assignee: Some("mehmet".to_string()),
            branch: Some("refactor/core".to_string()),
            due: None,
        }
        .into_task(9, "in-review".to_string(), 0);

        let mut form = TaskForm::from_task(&task);
        assert_eq!(form.selected_kind(), TaskKind::Refactor);
        assert_eq!(form.selected_priority(), Priority::High);
        let patch = form.to_patch().unwrap();
        assert_eq!(patch.title.as_deref(), Some("Edit me"));
        assert_eq!(patch.labels, Some(vec!["core".to_string()]));
    }
}
