//! Enumerations and field types for board cards.
//!
//! This module defines the closed value sets used to categorise cards on the
//! board: task kind and priority, plus the sort and due-date filter options
//! accepted by the list command.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// What sort of work item a card represents.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, ValueEnum, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum TaskKind {
    #[serde(alias = "Bug")]
    Bug,
    #[default]
    #[serde(alias = "Feature")]
    Feature,
    #[serde(alias = "Enhancement")]
    Enhancement,
    #[serde(alias = "Refactor")]
    Refactor,
    #[serde(alias = "Docs")]
    Docs,
    // "pr" is the value older board files carry.
    #[serde(alias = "pr")]
    PullRequest,
}

/// Priority classification for a card.
#[derive(
    Debug, Clone, Copy, Default, Serialize, Deserialize, ValueEnum, PartialEq, Eq, PartialOrd, Ord,
)]
#[serde(rename_all = "kebab-case")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Urgent,
}

/// Available sorting options for task lists.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SortKey {
    Due,
    Priority,
    Id,
}

/// Filtering options for tasks based on due dates.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum DueFilter {
    Today,
    ThisWeek,
    Overdue,
    None,
}
