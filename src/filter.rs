//! Conjunctive filtering of board cards.
//!
//! `Criteria` collects the active predicates of the filter bar; every
//! predicate is ANDed, so a task is visible iff it satisfies each one that is
//! set. Filtering never mutates the collection and is free of side effects.

use std::collections::BTreeSet;

use crate::fields::{Priority, TaskKind};
use crate::task::Task;

/// The active filter predicates.
///
/// An empty `search`, a `None` kind/priority/assignee, and an empty label
/// list each impose no constraint.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Criteria {
    pub search: String,
    pub kind: Option<TaskKind>,
    pub priority: Option<Priority>,
    pub assignee: Option<String>,
    pub labels: Vec<String>,
}

impl Criteria {
    /// True when no predicate is set.
    pub fn is_empty(&self) -> bool {
        self.search.is_empty()
            && self.kind.is_none()
            && self.priority.is_none()
            && self.assignee.is_none()
            && self.labels.is_empty()
    }

    /// Whether `task` satisfies every active predicate.
    pub fn matches(&self, task: &Task) -> bool {
        if !self.search.is_empty() {
            let needle = self.search.to_lowercase();
            let in_title = task.title.to_lowercase().contains(&needle);
            let in_description = task
                .description
                .as_ref()
                .map_or(false, |d| d.to_lowercase().contains(&needle));
            if !in_title && !in_description {
                return false;
            }
        }
        if let Some(kind) = self.kind {
            if task.kind != kind {
                return false;
            }
        }
        if let Some(priority) = self.priority {
            if task.priority != priority {
                return false;
            }
        }
        if let Some(ref assignee) = self.assignee {
            if task.assignee.as_deref() != Some(assignee.as_str()) {
                return false;
            }
        }
        // Label selection is AND: the task must carry every selected label.
        self.labels
            .iter()
            .all(|l| task.labels.iter().any(|t| t == l))
    }
}

/// The visible subset of `tasks` under `criteria`, in collection order.
pub fn visible_tasks<'a>(tasks: &'a [Task], criteria: &Criteria) -> Vec<&'a Task> {
    tasks.iter().filter(|t| criteria.matches(t)).collect()
}

/// Distinct labels across the collection, sorted.
pub fn unique_labels(tasks: &[Task]) -> Vec<String> {
    let set: BTreeSet<&str> = tasks
        .iter()
        .flat_map(|t| t.labels.iter().map(String::as_str))
        .collect();
    set.into_iter().map(String::from).collect()
}

/// Distinct assignees across the collection, sorted.
pub fn unique_assignees(tasks: &[Task]) -> Vec<String> {
    let set: BTreeSet<&str> = tasks
        .iter()
        .filter_map(|t| t.assignee.as_deref())
        .collect();
    set.into_iter().map(String::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::TaskDraft;

    fn task(id: u64, title: &str, kind: TaskKind, priority: Priority, labels: &[&str]) -> Task {
        TaskDraft {
            title: title.to_string(),
            description: Some(format!("{title} description")),
            kind,
            priority,
            labels: labels.iter().map(|l| l.to_string()).collect(),
            assignee: Some("ayse".to_string()),
            ..TaskDraft::default()
        }
        .into_task(id, "todo".to_string(), 0)
    }

    fn sample() -> Vec<Task> {
        vec![
            task(1, "Fix memory leak", TaskKind::Bug, Priority::Urgent, &["perf", "dashboard"]),
            task(2, "Add signup endpoint", TaskKind::Feature, Priority::High, &["api", "auth"]),
            task(3, "Update API docs", TaskKind::Docs, Priority::Low, &["api", "docs"]),
        ]
    }

    #[test]
    fn test_empty_criteria_matches_all() {
        let tasks = sample();
        assert_eq!(visible_tasks(&tasks, &Criteria::default()).len(), tasks.len());
    }

    #[test]
    fn test_search_is_case_insensitive_over_title_and_description() {
        let tasks = sample();
        let criteria = Criteria {
            search: "MEMORY".to_string(),
            ..Criteria::default()
        };
        let visible = visible_tasks(&tasks, &criteria);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].title, "Fix memory leak");

        // "description" only appears in the generated description text.
        let criteria = Criteria {
            search: "endpoint description".to_string(),
            ..Criteria::default()
        };
        assert_eq!(visible_tasks(&tasks, &criteria).len(), 1);
    }

    #[test]
    fn test_label_selection_is_and_not_or() {
        let tasks = vec![task(1, "Two labels", TaskKind::Bug, Priority::Low, &["a", "b"])];
        let with = |labels: &[&str]| Criteria {
            labels: labels.iter().map(|l| l.to_string()).collect(),
            ..Criteria::default()
        };
        assert_eq!(visible_tasks(&tasks, &with(&["a"])).len(), 1);
        assert_eq!(visible_tasks(&tasks, &with(&["a", "b"])).len(), 1);
        // {a, c} requires a label the task does not carry.
        assert_eq!(visible_tasks(&tasks, &with(&["a", "c"])).len(), 0);
    }

    #[test]
    fn test_criteria_compose_conjunctively() {
        let tasks = sample();
        let criteria = Criteria {
            search: "api".to_string(),
            kind: Some(TaskKind::Feature),
            ..Criteria::default()
        };
        let visible = visible_tasks(&tasks, &criteria);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].title, "Add signup endpoint");

        // Conflicting predicates match nothing even though each alone matches.
        let criteria = Criteria {
            kind: Some(TaskKind::Docs),
            priority: Some(Priority::Urgent),
            ..Criteria::default()
        };
        assert!(visible_tasks(&tasks, &criteria).is_empty());
    }

    #[test]
    fn test_stricter_criteria_never_grow_the_result() {
        let tasks = sample();
        let loose = Criteria {
            labels: vec!["api".to_string()],
            ..Criteria::default()
        };
        let mut strict = loose.clone();
        strict.priority = Some(Priority::High);
        let loose_set = visible_tasks(&tasks, &loose);
        let strict_set = visible_tasks(&tasks, &strict);
        assert!(strict_set.len() <= loose_set.len());
        for t in &strict_set {
            assert!(loose_set.iter().any(|l| l.id == t.id && l.title == t.title));
        }
    }

    #[test]
    fn test_assignee_is_exact_match() {
        let tasks = sample();
        let criteria = Criteria {
            assignee: Some("ays".to_string()),
            ..Criteria::default()
        };
        assert!(visible_tasks(&tasks, &criteria).is_empty());
        let criteria = Criteria {
            assignee: Some("ayse".to_string()),
            ..Criteria::default()
        };
        assert_eq!(visible_tasks(&tasks, &criteria).len(), 3);
    }

    #[test]
    fn test_unique_labels_and_assignees() {
        let tasks = sample();
        assert_eq!(
            unique_labels(&tasks),
            vec!["api", "auth", "dashboard", "docs", "perf"]
        );
        assert_eq!(unique_assignees(&tasks), vec!["ayse"]);
    }

    #[test]
    fn test_matches_is_referentially_transparent() {
        let tasks = sample();
        let criteria = Criteria {
            search: "api".to_string(),
            ..Criteria::default()
        };
        let first: Vec<u64> = visible_tasks(&tasks, &criteria).iter().map(|t| t.id).collect();
        let second: Vec<u64> = visible_tasks(&tasks, &criteria).iter().map(|t| t.id).collect();
        assert_eq!(first, second);
    }
}
