//! Task gateway contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide owner-scoped CRUD over the `tasks` table.
//! - Assign store-side fields (id, `completed=false`, timestamps) at
//!   insert and return the persisted row.
//!
//! # Invariants
//! - Every predicate includes `owner_id`; a caller can never read or
//!   mutate another user's rows.
//! - Write paths validate the model before SQL mutations.
//! - `delete_task` is idempotent: deleting an absent row is not an error.

use crate::auth::UserId;
use crate::model::task::{NewTask, Priority, Task, TaskId};
use crate::repo::{bool_to_int, ensure_connection_ready, parse_uuid, RepoError, RepoResult};
use rusqlite::{params, Connection, Row};
use uuid::Uuid;

const TASK_SELECT_SQL: &str = "SELECT
    id,
    title,
    description,
    completed,
    priority,
    project_id,
    owner_id,
    due_date,
    created_at,
    updated_at
FROM tasks";

const TASK_COLUMNS: &[&str] = &[
    "id",
    "title",
    "description",
    "completed",
    "priority",
    "project_id",
    "owner_id",
    "due_date",
    "created_at",
    "updated_at",
];

/// Gateway interface for task CRUD operations.
pub trait TaskRepository {
    /// Inserts a task and returns the persisted row with store-assigned
    /// id, `completed = false` and timestamps.
    fn create_task(&self, new: &NewTask) -> RepoResult<Task>;
    fn get_task(&self, owner: UserId, id: TaskId) -> RepoResult<Option<Task>>;
    /// Lists the owner's tasks ordered by creation time descending.
    fn list_tasks(&self, owner: UserId) -> RepoResult<Vec<Task>>;
    /// Replaces the mutable fields of an existing row.
    fn update_task(&self, task: &Task) -> RepoResult<()>;
    /// Persists a new `completed` value and returns the updated row.
    fn set_task_completed(&self, owner: UserId, id: TaskId, completed: bool) -> RepoResult<Task>;
    /// Deletes a row if present; absent rows are silently ignored.
    fn delete_task(&self, owner: UserId, id: TaskId) -> RepoResult<()>;
}

/// SQLite-backed task gateway.
pub struct SqliteTaskRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTaskRepository<'conn> {
    /// Constructs a gateway from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, "tasks", TASK_COLUMNS)?;
        Ok(Self { conn })
    }

    fn require_task(&self, owner: UserId, id: TaskId) -> RepoResult<Task> {
        self.get_task(owner, id)?.ok_or_else(|| {
            RepoError::InvalidData(format!("task row {id} missing after write"))
        })
    }
}

impl TaskRepository for SqliteTaskRepository<'_> {
    fn create_task(&self, new: &NewTask) -> RepoResult<Task> {
        new.validate()?;

        let id: TaskId = Uuid::new_v4();
        self.conn.execute(
            "INSERT INTO tasks (
                id,
                title,
                description,
                priority,
                project_id,
                owner_id,
                due_date
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7);",
            params![
                id.to_string(),
                new.title.as_str(),
                new.description.as_deref(),
                priority_to_db(new.priority),
                new.project_id.to_string(),
                new.owner_id.to_string(),
                new.due_date,
            ],
        )?;

        self.require_task(new.owner_id, id)
    }

    fn get_task(&self, owner: UserId, id: TaskId) -> RepoResult<Option<Task>> {
        let mut stmt = self.conn.prepare(&format!(
            "{TASK_SELECT_SQL}
             WHERE id = ?1 AND owner_id = ?2;"
        ))?;

        let mut rows = stmt.query(params![id.to_string(), owner.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_task_row(row)?));
        }

        Ok(None)
    }

    fn list_tasks(&self, owner: UserId) -> RepoResult<Vec<Task>> {
        let mut stmt = self.conn.prepare(&format!(
            "{TASK_SELECT_SQL}
             WHERE owner_id = ?1
             ORDER BY created_at DESC, id ASC;"
        ))?;

        let mut rows = stmt.query([owner.to_string()])?;
        let mut tasks = Vec::new();
        while let Some(row) = rows.next()? {
            tasks.push(parse_task_row(row)?);
        }

        Ok(tasks)
    }

    fn update_task(&self, task: &Task) -> RepoResult<()> {
        task.validate()?;

        let changed = self.conn.execute(
            "UPDATE tasks
             SET
                title = ?1,
                description = ?2,
                completed = ?3,
                priority = ?4,
                project_id = ?5,
                due_date = ?6,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE id = ?7 AND owner_id = ?8;",
            params![
                task.title.as_str(),
                task.description.as_deref(),
                bool_to_int(task.completed),
                priority_to_db(task.priority),
                task.project_id.to_string(),
                task.due_date,
                task.id.to_string(),
                task.owner_id.to_string(),
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(task.id));
        }

        Ok(())
    }

    fn set_task_completed(&self, owner: UserId, id: TaskId, completed: bool) -> RepoResult<Task> {
        let changed = self.conn.execute(
            "UPDATE tasks
             SET
                completed = ?1,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE id = ?2 AND owner_id = ?3;",
            params![bool_to_int(completed), id.to_string(), owner.to_string()],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        self.require_task(owner, id)
    }

    fn delete_task(&self, owner: UserId, id: TaskId) -> RepoResult<()> {
        self.conn.execute(
            "DELETE FROM tasks WHERE id = ?1 AND owner_id = ?2;",
            params![id.to_string(), owner.to_string()],
        )?;

        Ok(())
    }
}

fn parse_task_row(row: &Row<'_>) -> RepoResult<Task> {
    let id_text: String = row.get("id")?;
    let project_text: String = row.get("project_id")?;
    let owner_text: String = row.get("owner_id")?;

    let priority_text: String = row.get("priority")?;
    let priority = parse_priority(&priority_text).ok_or_else(|| {
        RepoError::InvalidData(format!("invalid priority `{priority_text}` in tasks.priority"))
    })?;

    let completed = match row.get::<_, i64>("completed")? {
        0 => false,
        1 => true,
        other => {
            return Err(RepoError::InvalidData(format!(
                "invalid completed value `{other}` in tasks.completed"
            )));
        }
    };

    let task = Task {
        id: parse_uuid(&id_text, "tasks.id")?,
        title: row.get("title")?,
        description: row.get("description")?,
        completed,
        priority,
        project_id: parse_uuid(&project_text, "tasks.project_id")?,
        owner_id: parse_uuid(&owner_text, "tasks.owner_id")?,
        due_date: row.get("due_date")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    };
    task.validate()?;
    Ok(task)
}

fn priority_to_db(priority: Priority) -> &'static str {
    match priority {
        Priority::Low => "low",
        Priority::Medium => "medium",
        Priority::High => "high",
    }
}

fn parse_priority(value: &str) -> Option<Priority> {
    match value {
        "low" => Some(Priority::Low),
        "medium" => Some(Priority::Medium),
        "high" => Some(Priority::High),
        _ => None,
    }
}
