//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `taskdeck_core` wiring end to
//!   end: open an in-memory store, create a project and a task, print the
//!   derived bucket counts.
//! - Keep output deterministic for quick local sanity checks.

use std::error::Error;
use std::rc::Rc;

use taskdeck_core::db::open_db_in_memory;
use taskdeck_core::{
    core_version, local_today, task_counts, CreateProjectRequest, CreateTaskRequest, CurrentUser,
    Priority, ProjectService, QueryCache, Session, SqliteProjectRepository, SqliteTaskRepository,
    TaskService, UserId, PROJECT_COLORS, PROJECT_ICONS,
};

fn main() -> Result<(), Box<dyn Error>> {
    let conn = open_db_in_memory()?;
    let session = Rc::new(Session::signed_in(CurrentUser {
        id: UserId::new_v4(),
        email: "smoke@taskdeck.local".to_string(),
    }));
    let project_cache = Rc::new(QueryCache::new());
    let task_cache = Rc::new(QueryCache::new());

    let projects = ProjectService::new(
        SqliteProjectRepository::try_new(&conn)?,
        Rc::clone(&session),
        Rc::clone(&project_cache),
        Rc::clone(&task_cache),
    );
    let tasks = TaskService::new(
        SqliteTaskRepository::try_new(&conn)?,
        Rc::clone(&session),
        Rc::clone(&task_cache),
    );

    let work = projects.create_project(CreateProjectRequest {
        name: "Work".to_string(),
        color: PROJECT_COLORS[4].to_string(),
        icon: PROJECT_ICONS[1].to_string(),
    })?;
    tasks.create_task(CreateTaskRequest {
        title: "Write spec".to_string(),
        description: None,
        priority: Priority::High,
        project_id: work.id,
        due_date: None,
    })?;

    let task_list = tasks.list_tasks()?;
    let project_list = projects.list_projects()?;
    let counts = task_counts(&task_list, &project_list, local_today());

    println!("taskdeck_core version={}", core_version());
    println!(
        "projects={} tasks={} all={} today={} completed={}",
        project_list.len(),
        task_list.len(),
        counts.all,
        counts.today,
        counts.completed
    );

    Ok(())
}
