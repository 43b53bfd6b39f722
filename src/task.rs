//! Task data structure and related functionality.
//!
//! This module defines the core `Task` struct that represents a single card
//! on the board, together with the `TaskDraft` produced by the editor/CLI
//! boundary and the `TaskPatch` used for partial updates.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::fields::{Priority, TaskKind};

/// A card on the board.
///
/// `status` names the column the card lives in; a card whose status matches
/// no column is shown in no column but is otherwise a normal member of the
/// collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: u64,
    pub title: String,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub kind: TaskKind,
    pub priority: Priority,
    pub status: String,
    #[serde(default)]
    pub labels: Vec<String>,
    pub assignee: Option<String>,
    pub branch: Option<String>,
    pub due: Option<NaiveDate>,
    pub created_at_utc: i64,
    pub updated_at_utc: i64,
}

/// Why a draft or patch was rejected before reaching the board.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("title must not be empty")]
    EmptyTitle,
}

/// Field values for a task that does not exist yet.
///
/// Drafts carry neither `id` nor `status`: both are assigned by the board at
/// creation time.
#[derive(Debug, Clone, Default)]
pub struct TaskDraft {
    pub title: String,
    pub description: Option<String>,
    pub kind: TaskKind,
    pub priority: Priority,
    pub labels: Vec<String>,
    pub assignee: Option<String>,
    pub branch: Option<String>,
    pub due: Option<NaiveDate>,
}

impl TaskDraft {
    /// Reject drafts that must not reach the board.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        Ok(())
    }

    /// Consume the draft into a full task record.
    pub fn into_task(self, id: u64, status: String, now_utc: i64) -> Task {
        Task {
            id,
            title: self.title.trim().to_string(),
            description: self.description.filter(|d| !d.is_empty()),
            kind: self.kind,
            priority: self.priority,
            status,
            labels: self.labels,
            assignee: self.assignee.filter(|a| !a.is_empty()),
            branch: self.branch.filter(|b| !b.is_empty()),
            due: self.due,
            created_at_utc: now_utc,
            updated_at_utc: now_utc,
        }
    }
}

/// Partial update for an existing task.
///
/// Unset fields are left untouched; `clear_*` flags reset the corresponding
/// optional field. `id` and `status` are not part of a patch.
#[derive(Debug, Clone, Default)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub kind: Option<TaskKind>,
    pub priority: Option<Priority>,
    pub labels: Option<Vec<String>>,
    pub assignee: Option<String>,
    pub branch: Option<String>,
    pub due: Option<NaiveDate>,
    pub clear_description: bool,
    pub clear_assignee: bool,
    pub clear_branch: bool,
    pub clear_due: bool,
}

impl TaskPatch {
    /// Reject patches that would leave the task invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(ref t) = self.title {
            if t.trim().is_empty() {
                return Err(ValidationError::EmptyTitle);
            }
        }
        Ok(())
    }

    /// Merge the patch into `task`, leaving `id` and `status` alone.
    pub fn apply(&self, task: &mut Task, now_utc: i64) {
        if let Some(ref t) = self.title {
            task.title = t.trim().to_string();
        }
        if self.clear_description {
            task.description = None;
        } else if let Some(ref d) = self.description {
            task.description = Some(d.clone()).filter(|d| !d.is_empty());
        }
        if let Some(k) = self.kind {
            task.kind = k;
        }
        if let Some(p) = self.priority {
            task.priority = p;
        }
        if let Some(ref labels) = self.labels {
            task.labels = labels.clone();
        }
        if self.clear_assignee {
            task.assignee = None;
        } else if let Some(ref a) = self.assignee {
            task.assignee = Some(a.clone()).filter(|a| !a.is_empty());
        }
        if self.clear_branch {
            task.branch = None;
        } else if let Some(ref b) = self.branch {
            task.branch = Some(b.clone()).filter(|b| !b.is_empty());
        }
        if self.clear_due {
            task.due = None;
        } else if let Some(d) = self.due {
            task.due = Some(d);
        }
        task.updated_at_utc = now_utc;
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

    #[test]
    fn test_draft_requires_title() {
        assert_eq!(draft("").validate(), Err(ValidationError::EmptyTitle));
        assert_eq!(draft("   ").validate(), Err(ValidationError::EmptyTitle));
        assert!(draft("Fix login").validate().is_ok());
    }

    #[test]
    fn test_patch_rejects_blank_title() {
        let patch = TaskPatch {
            title: Some("  ".into()),
            ..TaskPatch::default()
        };
        assert_eq!(patch.validate(), Err(ValidationError::EmptyTitle));
    }

    #[test]
    fn test_patch_preserves_id_and_status() {
        let mut task = draft("Original").into_task(7, "in-review".into(), 100);
        let patch = TaskPatch {
            title: Some("Renamed".into()),
            priority: Some(Priority::Urgent),
            ..TaskPatch::default()
        };
        patch.apply(&mut task, 200);
        assert_eq!(task.id, 7);
        assert_eq!(task.status, "in-review");
        assert_eq!(task.title, "Renamed");
        assert_eq!(task.priority, Priority::Urgent);
        assert_eq!(task.updated_at_utc, 200);
    }

    #[test]
    fn test_patch_clear_flags() {
        let mut task = TaskDraft {
            title: "With extras".into(),
            assignee: Some("ayse".into()),
            branch: Some("fix/leak".into()),
            ..TaskDraft::default()
        }
        .into_task(1, "todo".into(), 0);
        let patch = TaskPatch {
            clear_assignee: true,
            clear_branch: true,
            ..TaskPatch::default()
        };
        patch.apply(&mut task, 1);
        assert!(task.assignee.is_none());
        assert!(task.branch.is_none());
    }
}
