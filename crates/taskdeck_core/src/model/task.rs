//! Task domain model.
//!
//! # Responsibility
//! - Define the canonical task record and its insert/patch companions.
//! - Validate title/description constraints before persistence.
//!
//! # Invariants
//! - `id` is stable and never reused for another task.
//! - `title` is non-empty after trimming and at most 200 characters.
//! - `description`, when present, is at most 1000 characters.
//! - `project_id` references a project row; the store's foreign key and
//!   cascade rules own referential integrity.

use crate::auth::UserId;
use crate::model::project::ProjectId;
use crate::model::ValidationError;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Maximum task title length in characters (after trimming).
pub const TITLE_MAX_CHARS: usize = 200;
/// Maximum task description length in characters.
pub const DESCRIPTION_MAX_CHARS: usize = 1000;

/// Stable identifier for a task row.
pub type TaskId = Uuid;

/// Task urgency level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    Medium,
    High,
}

/// Canonical task record as stored in the `tasks` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Stable id assigned by the gateway at insert.
    pub id: TaskId,
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
    pub priority: Priority,
    /// Many tasks to one project; project deletion cascades here.
    pub project_id: ProjectId,
    /// Owning user; rows are only visible to their owner.
    pub owner_id: UserId,
    /// Optional due instant in epoch milliseconds.
    pub due_date: Option<i64>,
    /// Epoch milliseconds, assigned by the store.
    pub created_at: i64,
    /// Epoch milliseconds, bumped by the store on every update.
    pub updated_at: i64,
}

impl Task {
    /// Checks field constraints on the current record state.
    ///
    /// # Errors
    /// - `EmptyTitle` / `TitleTooLong` on title violations.
    /// - `DescriptionTooLong` on description violations.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_title(&self.title)?;
        validate_description(self.description.as_deref())
    }
}

/// Insert model for a task; the store assigns id, `completed = false`
/// and both timestamps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub title: String,
    pub description: Option<String>,
    pub priority: Priority,
    pub project_id: ProjectId,
    pub owner_id: UserId,
    pub due_date: Option<i64>,
}

impl NewTask {
    /// Checks field constraints before the row is handed to the gateway.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_title(&self.title)?;
        validate_description(self.description.as_deref())
    }
}

/// Partial update over the mutable task fields.
///
/// `None` leaves a field untouched. The nullable fields use a nested
/// `Option` so "clear" (`Some(None)`) stays distinct from "leave" (`None`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub completed: Option<bool>,
    pub priority: Option<Priority>,
    pub project_id: Option<ProjectId>,
    pub due_date: Option<Option<i64>>,
}

impl TaskPatch {
    /// Applies every set field onto `task`, leaving the rest unchanged.
    pub fn apply_to(&self, task: &mut Task) {
        if let Some(title) = &self.title {
            task.title = title.clone();
        }
        if let Some(description) = &self.description {
            task.description = description.clone();
        }
        if let Some(completed) = self.completed {
            task.completed = completed;
        }
        if let Some(priority) = self.priority {
            task.priority = priority;
        }
        if let Some(project_id) = self.project_id {
            task.project_id = project_id;
        }
        if let Some(due_date) = self.due_date {
            task.due_date = due_date;
        }
    }
}

fn validate_title(title: &str) -> Result<(), ValidationError> {
    if title.trim().is_empty() {
        return Err(ValidationError::EmptyTitle);
    }
    let length = title.chars().count();
    if length > TITLE_MAX_CHARS {
        return Err(ValidationError::TitleTooLong {
            length,
            max: TITLE_MAX_CHARS,
        });
    }
    Ok(())
}

fn validate_description(description: Option<&str>) -> Result<(), ValidationError> {
    let Some(description) = description else {
        return Ok(());
    };
    let length = description.chars().count();
    if length > DESCRIPTION_MAX_CHARS {
        return Err(ValidationError::DescriptionTooLong {
            length,
            max: DESCRIPTION_MAX_CHARS,
        });
    }
    Ok(())
}
