//! Core domain logic for TaskDeck.
//! This crate is the single source of truth for business invariants.

pub mod auth;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod view;

pub use auth::{CurrentUser, Session, UserId};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::project::{NewProject, Project, ProjectId, PROJECT_COLORS, PROJECT_ICONS};
pub use model::task::{NewTask, Priority, Task, TaskId, TaskPatch};
pub use model::ValidationError;
pub use repo::project_repo::{ProjectRepository, SqliteProjectRepository};
pub use repo::task_repo::{SqliteTaskRepository, TaskRepository};
pub use repo::{RepoError, RepoResult};
pub use service::project_service::{CreateProjectRequest, ProjectService, ProjectServiceError};
pub use service::query_cache::QueryCache;
pub use service::task_service::{CreateTaskRequest, TaskService, TaskServiceError};
pub use view::{filter_tasks, local_today, task_counts, view_title, TaskCounts, ViewSelector};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
