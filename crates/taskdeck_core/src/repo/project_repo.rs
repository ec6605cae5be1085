//! Project gateway contract and SQLite implementation.
//!
//! # Invariants
//! - Every predicate includes `owner_id`.
//! - Deleting a project cascades to its tasks through the schema's
//!   foreign key; no application-level cleanup runs here.

use crate::auth::UserId;
use crate::model::project::{NewProject, Project, ProjectId};
use crate::repo::{ensure_connection_ready, parse_uuid, RepoError, RepoResult};
use rusqlite::{params, Connection, Row};
use uuid::Uuid;

const PROJECT_SELECT_SQL: &str = "SELECT
    id,
    name,
    color,
    icon,
    owner_id,
    created_at
FROM projects";

const PROJECT_COLUMNS: &[&str] = &["id", "name", "color", "icon", "owner_id", "created_at"];

/// Gateway interface for project CRUD operations.
pub trait ProjectRepository {
    /// Inserts a project and returns the persisted row with store-assigned
    /// id and creation timestamp.
    fn create_project(&self, new: &NewProject) -> RepoResult<Project>;
    fn get_project(&self, owner: UserId, id: ProjectId) -> RepoResult<Option<Project>>;
    /// Lists the owner's projects ordered by creation time ascending.
    fn list_projects(&self, owner: UserId) -> RepoResult<Vec<Project>>;
    /// Deletes a row if present; the store cascade-deletes its tasks.
    fn delete_project(&self, owner: UserId, id: ProjectId) -> RepoResult<()>;
}

/// SQLite-backed project gateway.
pub struct SqliteProjectRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteProjectRepository<'conn> {
    /// Constructs a gateway from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, "projects", PROJECT_COLUMNS)?;
        Ok(Self { conn })
    }
}

impl ProjectRepository for SqliteProjectRepository<'_> {
    fn create_project(&self, new: &NewProject) -> RepoResult<Project> {
        new.validate()?;

        let id: ProjectId = Uuid::new_v4();
        self.conn.execute(
            "INSERT INTO projects (id, name, color, icon, owner_id)
             VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                id.to_string(),
                new.name.as_str(),
                new.color.as_str(),
                new.icon.as_str(),
                new.owner_id.to_string(),
            ],
        )?;

        self.get_project(new.owner_id, id)?.ok_or_else(|| {
            RepoError::InvalidData(format!("project row {id} missing after insert"))
        })
    }

    fn get_project(&self, owner: UserId, id: ProjectId) -> RepoResult<Option<Project>> {
        let mut stmt = self.conn.prepare(&format!(
            "{PROJECT_SELECT_SQL}
             WHERE id = ?1 AND owner_id = ?2;"
        ))?;

        let mut rows = stmt.query(params![id.to_string(), owner.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_project_row(row)?));
        }

        Ok(None)
    }

    fn list_projects(&self, owner: UserId) -> RepoResult<Vec<Project>> {
        let mut stmt = self.conn.prepare(&format!(
            "{PROJECT_SELECT_SQL}
             WHERE owner_id = ?1
             ORDER BY created_at ASC, id ASC;"
        ))?;

        let mut rows = stmt.query([owner.to_string()])?;
        let mut projects = Vec::new();
        while let Some(row) = rows.next()? {
            projects.push(parse_project_row(row)?);
        }

        Ok(projects)
    }

    fn delete_project(&self, owner: UserId, id: ProjectId) -> RepoResult<()> {
        self.conn.execute(
            "DELETE FROM projects WHERE id = ?1 AND owner_id = ?2;",
            params![id.to_string(), owner.to_string()],
        )?;

        Ok(())
    }
}

fn parse_project_row(row: &Row<'_>) -> RepoResult<Project> {
    let id_text: String = row.get("id")?;
    let owner_text: String = row.get("owner_id")?;

    let project = Project {
        id: parse_uuid(&id_text, "projects.id")?,
        name: row.get("name")?,
        color: row.get("color")?,
        icon: row.get("icon")?,
        owner_id: parse_uuid(&owner_text, "projects.owner_id")?,
        created_at: row.get("created_at")?,
    };
    project.validate()?;
    Ok(project)
}
