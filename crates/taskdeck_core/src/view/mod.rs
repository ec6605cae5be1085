//! Pure view derivation over the in-memory task set.
//!
//! # Responsibility
//! - Compute filtered task lists for the selected sidebar bucket.
//! - Compute per-bucket counts for sidebar badges.
//!
//! # Invariants
//! - No I/O; inputs are the cached snapshots, `today` is passed in.
//! - Counts are recomputed from scratch on every call; task sets are small
//!   and this is not a hot path.
//! - A task with no due date never lands in the Today bucket.

use crate::model::project::{Project, ProjectId};
use crate::model::task::Task;
use chrono::{Local, NaiveDate, TimeZone};
use std::collections::HashMap;

/// Sidebar bucket driving both filtering and the page title.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewSelector {
    /// Incomplete tasks across all projects.
    All,
    /// Incomplete tasks due on the current calendar day (local time).
    Today,
    /// Completed tasks.
    Completed,
    /// Incomplete tasks of one project.
    Project(ProjectId),
}

/// Per-bucket task counts for sidebar badges.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskCounts {
    pub all: usize,
    pub today: usize,
    pub completed: usize,
    /// One entry per known project; tasks referencing an unknown project
    /// are excluded here but still counted in `all`/`completed`.
    pub by_project: HashMap<ProjectId, usize>,
}

/// Returns the current calendar day in local time.
pub fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

/// Returns the tasks matching `selector`, preserving input order.
pub fn filter_tasks<'a>(
    tasks: &'a [Task],
    selector: &ViewSelector,
    today: NaiveDate,
) -> Vec<&'a Task> {
    tasks
        .iter()
        .filter(|task| matches_bucket(task, selector, today))
        .collect()
}

/// Computes every bucket count in one pass over the task set.
pub fn task_counts(tasks: &[Task], projects: &[Project], today: NaiveDate) -> TaskCounts {
    let mut counts = TaskCounts {
        by_project: projects.iter().map(|project| (project.id, 0)).collect(),
        ..TaskCounts::default()
    };

    for task in tasks {
        if task.completed {
            counts.completed += 1;
            continue;
        }

        counts.all += 1;
        if due_on(task.due_date, today) {
            counts.today += 1;
        }
        if let Some(count) = counts.by_project.get_mut(&task.project_id) {
            *count += 1;
        }
    }

    counts
}

/// Returns the page title for `selector`.
///
/// Falls back to "Tasks" when the selected project is unknown (deleted
/// while still selected).
pub fn view_title(selector: &ViewSelector, projects: &[Project]) -> String {
    match selector {
        ViewSelector::All => "All Tasks".to_string(),
        ViewSelector::Today => "Today".to_string(),
        ViewSelector::Completed => "Completed".to_string(),
        ViewSelector::Project(id) => projects
            .iter()
            .find(|project| project.id == *id)
            .map_or_else(|| "Tasks".to_string(), |project| project.name.clone()),
    }
}

fn matches_bucket(task: &Task, selector: &ViewSelector, today: NaiveDate) -> bool {
    match selector {
        ViewSelector::All => !task.completed,
        ViewSelector::Today => !task.completed && due_on(task.due_date, today),
        ViewSelector::Completed => task.completed,
        ViewSelector::Project(id) => task.project_id == *id && !task.completed,
    }
}

fn due_on(due_date: Option<i64>, day: NaiveDate) -> bool {
    let Some(millis) = due_date else {
        return false;
    };
    Local
        .timestamp_millis_opt(millis)
        .single()
        .is_some_and(|instant| instant.date_naive() == day)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::project::{PROJECT_COLORS, PROJECT_ICONS};
    use crate::model::task::Priority;
    use uuid::Uuid;

    fn fixed_day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 14).unwrap()
    }

    fn millis_at_noon(day: NaiveDate) -> i64 {
        Local
            .from_local_datetime(&day.and_hms_opt(12, 0, 0).unwrap())
            .single()
            .unwrap()
            .timestamp_millis()
    }

    fn task(project_id: ProjectId, completed: bool, due_date: Option<i64>) -> Task {
        Task {
            id: Uuid::new_v4(),
            title: "task".to_string(),
            description: None,
            completed,
            priority: Priority::Medium,
            project_id,
            owner_id: Uuid::new_v4(),
            due_date,
            created_at: 0,
            updated_at: 0,
        }
    }

    fn project(name: &str) -> Project {
        Project {
            id: Uuid::new_v4(),
            name: name.to_string(),
            color: PROJECT_COLORS[0].to_string(),
            icon: PROJECT_ICONS[0].to_string(),
            owner_id: Uuid::new_v4(),
            created_at: 0,
        }
    }

    #[test]
    fn all_bucket_excludes_completed_tasks() {
        let p = Uuid::new_v4();
        let tasks = [task(p, false, None), task(p, true, None)];

        let filtered = filter_tasks(&tasks, &ViewSelector::All, fixed_day());
        assert_eq!(filtered.len(), 1);
        assert!(!filtered[0].completed);
    }

    #[test]
    fn today_bucket_requires_a_due_date_on_that_day() {
        let p = Uuid::new_v4();
        let day = fixed_day();
        let tasks = [
            task(p, false, Some(millis_at_noon(day))),
            task(p, false, Some(millis_at_noon(day.succ_opt().unwrap()))),
            task(p, false, None),
            task(p, true, Some(millis_at_noon(day))),
        ];

        let filtered = filter_tasks(&tasks, &ViewSelector::Today, day);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].due_date, Some(millis_at_noon(day)));
    }

    #[test]
    fn project_bucket_filters_by_project_and_excludes_completed() {
        let mine = Uuid::new_v4();
        let other = Uuid::new_v4();
        let tasks = [
            task(mine, false, None),
            task(mine, true, None),
            task(other, false, None),
        ];

        let filtered = filter_tasks(&tasks, &ViewSelector::Project(mine), fixed_day());
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].project_id, mine);
    }

    #[test]
    fn all_plus_completed_partitions_the_task_set() {
        let p = Uuid::new_v4();
        let tasks = [
            task(p, false, None),
            task(p, false, Some(millis_at_noon(fixed_day()))),
            task(p, true, None),
            task(p, true, None),
        ];

        let counts = task_counts(&tasks, &[], fixed_day());
        assert_eq!(counts.all + counts.completed, tasks.len());
    }

    #[test]
    fn counts_cover_every_bucket() {
        let work = project("Work");
        let home = project("Home");
        let day = fixed_day();
        let tasks = [
            task(work.id, false, Some(millis_at_noon(day))),
            task(work.id, false, None),
            task(home.id, true, None),
        ];

        let counts = task_counts(&tasks, &[work.clone(), home.clone()], day);
        assert_eq!(counts.all, 2);
        assert_eq!(counts.today, 1);
        assert_eq!(counts.completed, 1);
        assert_eq!(counts.by_project[&work.id], 2);
        assert_eq!(counts.by_project[&home.id], 0);
    }

    #[test]
    fn orphaned_project_reference_counts_in_all_but_no_project_bucket() {
        let known = project("Known");
        let orphan_project_id = Uuid::new_v4();
        let tasks = [task(orphan_project_id, false, None)];

        let counts = task_counts(&tasks, &[known.clone()], fixed_day());
        assert_eq!(counts.all, 1);
        assert_eq!(counts.by_project[&known.id], 0);
        assert!(!counts.by_project.contains_key(&orphan_project_id));
    }

    #[test]
    fn view_title_names_the_selected_bucket() {
        let work = project("Work");
        let projects = [work.clone()];

        assert_eq!(view_title(&ViewSelector::All, &projects), "All Tasks");
        assert_eq!(view_title(&ViewSelector::Today, &projects), "Today");
        assert_eq!(view_title(&ViewSelector::Completed, &projects), "Completed");
        assert_eq!(
            view_title(&ViewSelector::Project(work.id), &projects),
            "Work"
        );
        assert_eq!(
            view_title(&ViewSelector::Project(Uuid::new_v4()), &projects),
            "Tasks"
        );
    }
}
