//! Project use-case service.
//!
//! # Responsibility
//! - Provide typed create/delete/list operations over the project gateway
//!   for the signed-in user.
//! - Invalidate the project cache after every mutation, and the task cache
//!   too when a deletion cascades.

use crate::auth::{CurrentUser, Session};
use crate::model::project::{NewProject, Project, ProjectId};
use crate::model::task::Task;
use crate::model::ValidationError;
use crate::repo::project_repo::ProjectRepository;
use crate::repo::RepoError;
use crate::service::query_cache::QueryCache;
use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::rc::Rc;

/// Request model for creating a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateProjectRequest {
    pub name: String,
    pub color: String,
    pub icon: String,
}

/// Service error for project use-cases.
#[derive(Debug)]
pub enum ProjectServiceError {
    NotAuthenticated,
    Validation(ValidationError),
    ProjectNotFound(ProjectId),
    Fetch(RepoError),
}

impl Display for ProjectServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotAuthenticated => write!(f, "not authenticated"),
            Self::Validation(err) => write!(f, "{err}"),
            Self::ProjectNotFound(id) => write!(f, "project not found: {id}"),
            Self::Fetch(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ProjectServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Fetch(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ValidationError> for ProjectServiceError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for ProjectServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(id) => Self::ProjectNotFound(id),
            RepoError::Validation(err) => Self::Validation(err),
            other => Self::Fetch(other),
        }
    }
}

/// Use-case service for project operations.
pub struct ProjectService<R: ProjectRepository> {
    repo: R,
    session: Rc<Session>,
    projects: Rc<QueryCache<Project>>,
    /// Shared with the task service; project deletion cascades to tasks in
    /// the store, so the cached task list goes stale too.
    tasks: Rc<QueryCache<Task>>,
}

impl<R: ProjectRepository> ProjectService<R> {
    pub fn new(
        repo: R,
        session: Rc<Session>,
        projects: Rc<QueryCache<Project>>,
        tasks: Rc<QueryCache<Task>>,
    ) -> Self {
        Self {
            repo,
            session,
            projects,
            tasks,
        }
    }

    /// Returns the signed-in user's projects, oldest first.
    pub fn list_projects(&self) -> Result<Rc<Vec<Project>>, ProjectServiceError> {
        let user = self.require_user()?;
        if let Some(cached) = self.projects.get(user.id) {
            return Ok(cached);
        }

        let rows = self.repo.list_projects(user.id)?;
        Ok(self.projects.store(user.id, rows))
    }

    /// Creates a project for the signed-in user.
    ///
    /// # Contract
    /// - The name is trimmed; length and palette violations fail before
    ///   any gateway call.
    pub fn create_project(
        &self,
        request: CreateProjectRequest,
    ) -> Result<Project, ProjectServiceError> {
        let user = self.require_user()?;

        let new = NewProject {
            name: request.name.trim().to_string(),
            color: request.color,
            icon: request.icon,
            owner_id: user.id,
        };
        new.validate()?;

        match self.repo.create_project(&new) {
            Ok(project) => {
                self.projects.invalidate(user.id);
                info!(
                    "event=project_create module=service status=ok project_id={}",
                    project.id
                );
                Ok(project)
            }
            Err(err) => {
                error!("event=project_create module=service status=error error={err}");
                Err(err.into())
            }
        }
    }

    /// Deletes a project; the store cascade-deletes its tasks, so both
    /// cached lists are invalidated.
    pub fn delete_project(&self, id: ProjectId) -> Result<(), ProjectServiceError> {
        let user = self.require_user()?;

        match self.repo.delete_project(user.id, id) {
            Ok(()) => {
                self.projects.invalidate(user.id);
                self.tasks.invalidate(user.id);
                info!("event=project_delete module=service status=ok project_id={id}");
                Ok(())
            }
            Err(err) => {
                error!(
                    "event=project_delete module=service status=error project_id={id} error={err}"
                );
                Err(err.into())
            }
        }
    }

    fn require_user(&self) -> Result<CurrentUser, ProjectServiceError> {
        self.session
            .current_user()
            .ok_or(ProjectServiceError::NotAuthenticated)
    }
}
