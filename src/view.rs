//! Derived views over the task collection.
//!
//! Pure functions only: the presentation layers (CLI and TUI) call these to
//! turn the store's state plus a filter selection into what gets shown.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::task::{Filter, Priority, Task};

/// Aggregate counts per filter bucket. `active + completed == all` always.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TaskCounts {
    pub all: usize,
    pub active: usize,
    pub completed: usize,
}

/// Tasks matching `filter`, in store order.
pub fn filtered_tasks(tasks: &[Task], filter: Filter) -> Vec<&Task> {
    tasks
        .iter()
        .filter(|task| match filter {
            Filter::All => true,
            Filter::Active => !task.completed,
            Filter::Completed => task.completed,
        })
        .collect()
}

/// Count tasks per filter bucket.
pub fn task_counts(tasks: &[Task]) -> TaskCounts {
    let completed = tasks.iter().filter(|task| task.completed).count();
    TaskCounts {
        all: tasks.len(),
        active: tasks.len() - completed,
        completed,
    }
}

/// One entry of the read-only calendar feed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalendarEvent {
    pub title: String,
    pub start: Option<DateTime<Utc>>,
    pub priority: Priority,
    pub completed: bool,
}

/// Map tasks to calendar events. Tasks without a due date are included with
/// a null start; the consumer decides whether to place them.
pub fn calendar_events(tasks: &[Task]) -> Vec<CalendarEvent> {
    tasks
        .iter()
        .map(|task| CalendarEvent {
            title: task.title.clone(),
            start: task.due_date,
            priority: task.priority,
            completed: task.completed,
        })
        .collect()
}
