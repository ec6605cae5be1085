use rusqlite::Connection;
use std::rc::Rc;
use taskdeck_core::db::migrations::latest_version;
use taskdeck_core::db::open_db_in_memory;
use taskdeck_core::{
    CreateProjectRequest, CreateTaskRequest, CurrentUser, Priority, ProjectService,
    ProjectServiceError, QueryCache, RepoError, Session, SqliteProjectRepository,
    SqliteTaskRepository, TaskService, PROJECT_COLORS, PROJECT_ICONS,
};
use uuid::Uuid;

#[test]
fn create_and_list_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let fixture = Fixture::signed_in(&conn);

    let created = fixture
        .projects
        .create_project(CreateProjectRequest {
            name: "  Work  ".to_string(),
            color: PROJECT_COLORS[4].to_string(),
            icon: PROJECT_ICONS[1].to_string(),
        })
        .unwrap();

    assert_eq!(created.name, "Work");
    assert_eq!(created.color, PROJECT_COLORS[4]);
    assert_eq!(created.icon, PROJECT_ICONS[1]);

    let listed = fixture.projects.list_projects().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0], created);
}

#[test]
fn list_orders_by_creation_time_ascending() {
    let conn = open_db_in_memory().unwrap();
    let fixture = Fixture::signed_in(&conn);

    let first = fixture.create_project("Inbox");
    let second = fixture.create_project("Work");
    let third = fixture.create_project("Home");
    for (id, created_at) in [(first.id, 3_000), (second.id, 1_000), (third.id, 2_000)] {
        conn.execute(
            "UPDATE projects SET created_at = ?1 WHERE id = ?2;",
            rusqlite::params![created_at, id.to_string()],
        )
        .unwrap();
    }

    let listed = fixture.projects.list_projects().unwrap();
    let names: Vec<&str> = listed.iter().map(|project| project.name.as_str()).collect();
    assert_eq!(names, ["Work", "Home", "Inbox"]);
}

#[test]
fn validation_failures_block_create_before_any_row_is_written() {
    let conn = open_db_in_memory().unwrap();
    let fixture = Fixture::signed_in(&conn);

    let cases = [
        CreateProjectRequest {
            name: "   ".to_string(),
            color: PROJECT_COLORS[0].to_string(),
            icon: PROJECT_ICONS[0].to_string(),
        },
        CreateProjectRequest {
            name: "n".repeat(51),
            color: PROJECT_COLORS[0].to_string(),
            icon: PROJECT_ICONS[0].to_string(),
        },
        CreateProjectRequest {
            name: "Work".to_string(),
            color: "#123456".to_string(),
            icon: PROJECT_ICONS[0].to_string(),
        },
        CreateProjectRequest {
            name: "Work".to_string(),
            color: PROJECT_COLORS[0].to_string(),
            icon: "not-a-glyph".to_string(),
        },
    ];

    for request in cases {
        let err = fixture.projects.create_project(request).unwrap_err();
        assert!(matches!(err, ProjectServiceError::Validation(_)));
    }

    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM projects;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 0);
}

#[test]
fn delete_cascades_to_tasks_and_refreshes_both_lists() {
    let conn = open_db_in_memory().unwrap();
    let fixture = Fixture::signed_in(&conn);
    let doomed = fixture.create_project("Doomed");
    let kept = fixture.create_project("Kept");

    fixture.create_task(doomed.id, "doomed task a");
    fixture.create_task(doomed.id, "doomed task b");
    let survivor = fixture.create_task(kept.id, "survivor");

    // Warm both caches before the deletion.
    assert_eq!(fixture.projects.list_projects().unwrap().len(), 2);
    assert_eq!(fixture.tasks.list_tasks().unwrap().len(), 3);

    fixture.projects.delete_project(doomed.id).unwrap();

    let projects = fixture.projects.list_projects().unwrap();
    assert_eq!(projects.len(), 1);
    assert_eq!(projects[0].id, kept.id);

    let tasks = fixture.tasks.list_tasks().unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].id, survivor.id);
}

#[test]
fn delete_is_idempotent() {
    let conn = open_db_in_memory().unwrap();
    let fixture = Fixture::signed_in(&conn);
    let project = fixture.create_project("Work");

    fixture.projects.delete_project(project.id).unwrap();
    fixture.projects.delete_project(project.id).unwrap();

    assert!(fixture.projects.list_projects().unwrap().is_empty());
}

#[test]
fn rows_are_scoped_to_their_owner() {
    let conn = open_db_in_memory().unwrap();
    let fixture = Fixture::signed_in(&conn);
    let project = fixture.create_project("Mine");

    let other = Fixture::signed_in(&conn);
    assert!(other.projects.list_projects().unwrap().is_empty());

    other.projects.delete_project(project.id).unwrap();
    assert_eq!(fixture.projects.list_projects().unwrap().len(), 1);
}

#[test]
fn signed_out_session_fails_every_operation() {
    let conn = open_db_in_memory().unwrap();
    let session = Rc::new(Session::new());
    let projects = ProjectService::new(
        SqliteProjectRepository::try_new(&conn).unwrap(),
        session,
        Rc::new(QueryCache::new()),
        Rc::new(QueryCache::new()),
    );

    assert!(matches!(
        projects.list_projects().unwrap_err(),
        ProjectServiceError::NotAuthenticated
    ));
    assert!(matches!(
        projects
            .create_project(CreateProjectRequest {
                name: "Work".to_string(),
                color: PROJECT_COLORS[0].to_string(),
                icon: PROJECT_ICONS[0].to_string(),
            })
            .unwrap_err(),
        ProjectServiceError::NotAuthenticated
    ));
    assert!(matches!(
        projects.delete_project(Uuid::new_v4()).unwrap_err(),
        ProjectServiceError::NotAuthenticated
    ));
}

#[test]
fn repository_rejects_uninitialized_connection() {
    let conn = Connection::open_in_memory().unwrap();

    let result = SqliteProjectRepository::try_new(&conn);
    match result {
        Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version: 0,
        }) => assert!(expected_version > 0),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("expected uninitialized connection error"),
    }
}

#[test]
fn repository_rejects_connection_without_required_table() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version()))
        .unwrap();

    let result = SqliteProjectRepository::try_new(&conn);
    assert!(matches!(
        result,
        Err(RepoError::MissingRequiredTable("projects"))
    ));
}

#[test]
fn repository_rejects_connection_missing_required_column() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        "CREATE TABLE projects (
            id TEXT PRIMARY KEY NOT NULL,
            name TEXT NOT NULL
        );",
    )
    .unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version()))
        .unwrap();

    let result = SqliteProjectRepository::try_new(&conn);
    assert!(matches!(
        result,
        Err(RepoError::MissingRequiredColumn {
            table: "projects",
            column: "color"
        })
    ));
}

struct Fixture<'conn> {
    projects: ProjectService<SqliteProjectRepository<'conn>>,
    tasks: TaskService<SqliteTaskRepository<'conn>>,
}

impl<'conn> Fixture<'conn> {
    fn signed_in(conn: &'conn Connection) -> Self {
        let session = Rc::new(Session::signed_in(CurrentUser {
            id: Uuid::new_v4(),
            email: "ada@example.com".to_string(),
        }));
        let project_cache = Rc::new(QueryCache::new());
        let task_cache = Rc::new(QueryCache::new());

        Self {
            projects: ProjectService::new(
                SqliteProjectRepository::try_new(conn).unwrap(),
                Rc::clone(&session),
                project_cache,
                Rc::clone(&task_cache),
            ),
            tasks: TaskService::new(
                SqliteTaskRepository::try_new(conn).unwrap(),
                session,
                task_cache,
            ),
        }
    }

    fn create_project(&self, name: &str) -> taskdeck_core::Project {
        self.projects
            .create_project(CreateProjectRequest {
                name: name.to_string(),
                color: PROJECT_COLORS[0].to_string(),
                icon: PROJECT_ICONS[0].to_string(),
            })
            .unwrap()
    }

    fn create_task(&self, project_id: Uuid, title: &str) -> taskdeck_core::Task {
        self.tasks
            .create_task(CreateTaskRequest {
                title: title.to_string(),
                description: None,
                priority: Priority::Medium,
                project_id,
                due_date: None,
            })
            .unwrap()
    }
}
