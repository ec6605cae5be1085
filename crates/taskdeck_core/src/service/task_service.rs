//! Task use-case service.
//!
//! # Responsibility
//! - Provide typed create/update/delete/toggle/list operations over the
//!   task gateway for the signed-in user.
//! - Own the cached task list and invalidate it after every mutation.
//!
//! # Invariants
//! - No gateway call is issued without an authenticated user.
//! - Validation failures are resolved before any gateway call.
//! - `toggle_task` computes the flip from the latest cached list; a stale
//!   cache yields a stale read (no compare-and-swap guard).

use crate::auth::{CurrentUser, Session};
use crate::model::project::ProjectId;
use crate::model::task::{NewTask, Priority, Task, TaskId, TaskPatch};
use crate::model::ValidationError;
use crate::repo::task_repo::TaskRepository;
use crate::repo::RepoError;
use crate::service::query_cache::QueryCache;
use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::rc::Rc;

/// Request model for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    pub title: String,
    pub description: Option<String>,
    pub priority: Priority,
    pub project_id: ProjectId,
    pub due_date: Option<i64>,
}

/// Service error for task use-cases.
#[derive(Debug)]
pub enum TaskServiceError {
    /// No authenticated user; surfaced as a blocking state, not a toast.
    NotAuthenticated,
    /// Field constraint violated; surfaced inline near the field.
    Validation(ValidationError),
    /// Target task missing or not owned by the caller.
    TaskNotFound(TaskId),
    /// Transport/store failure; surfaced as a dismissible notification.
    Fetch(RepoError),
}

impl Display for TaskServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotAuthenticated => write!(f, "not authenticated"),
            Self::Validation(err) => write!(f, "{err}"),
            Self::TaskNotFound(id) => write!(f, "task not found: {id}"),
            Self::Fetch(err) => write!(f, "{err}"),
        }
    }
}

impl Error for TaskServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Fetch(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ValidationError> for TaskServiceError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for TaskServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(id) => Self::TaskNotFound(id),
            RepoError::Validation(err) => Self::Validation(err),
            other => Self::Fetch(other),
        }
    }
}

/// Use-case service for task operations.
pub struct TaskService<R: TaskRepository> {
    repo: R,
    session: Rc<Session>,
    cache: Rc<QueryCache<Task>>,
}

impl<R: TaskRepository> TaskService<R> {
    /// Creates a service over the provided gateway, session and cache.
    pub fn new(repo: R, session: Rc<Session>, cache: Rc<QueryCache<Task>>) -> Self {
        Self {
            repo,
            session,
            cache,
        }
    }

    /// Returns the signed-in user's tasks, newest first.
    ///
    /// Serves the cached list when warm; fetches and caches otherwise.
    /// The returned snapshot is shared read-only with all consumers.
    pub fn list_tasks(&self) -> Result<Rc<Vec<Task>>, TaskServiceError> {
        let user = self.require_user()?;
        if let Some(cached) = self.cache.get(user.id) {
            return Ok(cached);
        }

        let rows = self.repo.list_tasks(user.id)?;
        Ok(self.cache.store(user.id, rows))
    }

    /// Creates a task for the signed-in user.
    ///
    /// # Contract
    /// - Title/description are trimmed; an empty description becomes `None`.
    /// - Constraint violations fail before any gateway call.
    /// - The cached list is invalidated so the next read sees the new row.
    pub fn create_task(&self, request: CreateTaskRequest) -> Result<Task, TaskServiceError> {
        let user = self.require_user()?;

        let new = NewTask {
            title: request.title.trim().to_string(),
            description: normalize_description(request.description),
            priority: request.priority,
            project_id: request.project_id,
            owner_id: user.id,
            due_date: request.due_date,
        };
        new.validate()?;

        match self.repo.create_task(&new) {
            Ok(task) => {
                self.cache.invalidate(user.id);
                info!(
                    "event=task_create module=service status=ok task_id={} project_id={}",
                    task.id, task.project_id
                );
                Ok(task)
            }
            Err(err) => {
                error!("event=task_create module=service status=error error={err}");
                Err(err.into())
            }
        }
    }

    /// Applies a partial update to an existing task.
    pub fn update_task(&self, id: TaskId, patch: &TaskPatch) -> Result<Task, TaskServiceError> {
        let user = self.require_user()?;

        let mut task = self
            .repo
            .get_task(user.id, id)?
            .ok_or(TaskServiceError::TaskNotFound(id))?;
        patch.apply_to(&mut task);
        task.validate()?;

        match self.repo.update_task(&task) {
            Ok(()) => {
                self.cache.invalidate(user.id);
                info!("event=task_update module=service status=ok task_id={id}");
                // Read back so the caller sees the store-bumped updated_at.
                self.repo
                    .get_task(user.id, id)?
                    .ok_or(TaskServiceError::TaskNotFound(id))
            }
            Err(err) => {
                error!("event=task_update module=service status=error task_id={id} error={err}");
                Err(err.into())
            }
        }
    }

    /// Deletes a task; already-deleted rows are not an error.
    pub fn delete_task(&self, id: TaskId) -> Result<(), TaskServiceError> {
        let user = self.require_user()?;

        match self.repo.delete_task(user.id, id) {
            Ok(()) => {
                self.cache.invalidate(user.id);
                info!("event=task_delete module=service status=ok task_id={id}");
                Ok(())
            }
            Err(err) => {
                error!("event=task_delete module=service status=error task_id={id} error={err}");
                Err(err.into())
            }
        }
    }

    /// Flips the completion state of a task.
    ///
    /// The current value is read from the latest cached list (fetching only
    /// when the cache is cold), then persisted. Two sessions toggling the
    /// same task can race on a stale read; the store keeps row-level
    /// consistency but no compare-and-swap is attempted.
    pub fn toggle_task(&self, id: TaskId) -> Result<Task, TaskServiceError> {
        let user = self.require_user()?;

        let tasks = self.list_tasks()?;
        let current = tasks
            .iter()
            .find(|task| task.id == id)
            .ok_or(TaskServiceError::TaskNotFound(id))?;

        match self.repo.set_task_completed(user.id, id, !current.completed) {
            Ok(task) => {
                self.cache.invalidate(user.id);
                info!(
                    "event=task_toggle module=service status=ok task_id={id} completed={}",
                    task.completed
                );
                Ok(task)
            }
            Err(err) => {
                error!("event=task_toggle module=service status=error task_id={id} error={err}");
                Err(err.into())
            }
        }
    }

    fn require_user(&self) -> Result<CurrentUser, TaskServiceError> {
        self.session
            .current_user()
            .ok_or(TaskServiceError::NotAuthenticated)
    }
}

fn normalize_description(description: Option<String>) -> Option<String> {
    let trimmed = description?.trim().to_string();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}
