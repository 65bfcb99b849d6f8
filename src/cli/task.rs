//! tm task command implementations.

use std::path::PathBuf;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::Serialize;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::kv::KvStore;
use crate::output::{emit_success, HumanOutput, OutputOptions};
use crate::store::TaskStore;
use crate::task::{Filter, Priority, Task, TaskDraft};
use crate::view;

pub struct AddOptions {
    pub title: String,
    pub priority: Option<String>,
    pub due: Option<String>,
    pub store: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

pub struct ListOptions {
    pub filter: String,
    pub store: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

pub struct ToggleOptions {
    pub id: String,
    pub store: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

pub struct EditOptions {
    pub id: String,
    pub title: Option<String>,
    pub priority: Option<String>,
    pub due: Option<String>,
    pub clear_due: bool,
    pub store: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

pub struct RmOptions {
    pub id: String,
    pub store: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

pub struct EventsOptions {
    pub store: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

pub struct UiOptions {
    pub store: Option<PathBuf>,
}

fn load_store(store_dir: Option<PathBuf>) -> (Config, TaskStore) {
    let config = Config::load();
    let dir = config.resolve_store_dir(store_dir.as_deref());
    (config, TaskStore::open(KvStore::new(dir)))
}

#[derive(Serialize)]
struct TaskOutput {
    task: Task,
}

#[derive(Serialize)]
struct TaskListOutput {
    total: usize,
    filter: String,
    counts: view::TaskCounts,
    tasks: Vec<Task>,
}

#[derive(Serialize)]
struct MutationOutput {
    id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    completed: Option<bool>,
}

#[derive(Serialize)]
struct EventsOutput {
    total: usize,
    events: Vec<view::CalendarEvent>,
}

pub fn run_add(options: AddOptions) -> Result<()> {
    let (config, mut store) = load_store(options.store);

    let priority = match options.priority.as_deref() {
        Some(value) => value.parse::<Priority>()?,
        None => config.default_priority,
    };
    let due_date = options.due.as_deref().map(parse_due).transpose()?;

    let draft = TaskDraft {
        title: options.title,
        priority,
        due_date,
    };
    let task = store
        .add_task(draft, Utc::now())
        .ok_or_else(|| Error::InvalidArgument("title cannot be empty".to_string()))?;

    let mut human = HumanOutput::new("Task created");
    human.push_summary("ID", short_id(&task));
    human.push_summary("Title", task.title.clone());
    human.push_summary("Priority", task.priority.to_string());
    if let Some(due) = task.due_date {
        human.push_summary("Due", due.to_rfc3339());
    }

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "add",
        &TaskOutput { task },
        Some(&human),
    )
}

pub fn run_list(options: ListOptions) -> Result<()> {
    let (_, store) = load_store(options.store);
    let filter = options.filter.parse::<Filter>()?;
    let now = Utc::now();

    let counts = view::task_counts(store.tasks());
    let visible: Vec<Task> = view::filtered_tasks(store.tasks(), filter)
        .into_iter()
        .cloned()
        .collect();

    let mut human = HumanOutput::new("Tasks");
    human.push_summary("All", counts.all.to_string());
    human.push_summary("Active", counts.active.to_string());
    human.push_summary("Completed", counts.completed.to_string());
    if filter != Filter::All {
        human.push_summary("Filter", filter.to_string());
    }
    for task in &visible {
        human.push_detail(format_row(task, now));
    }
    if visible.is_empty() {
        human.push_detail("No tasks found".to_string());
    }

    let output = TaskListOutput {
        total: visible.len(),
        filter: filter.to_string(),
        counts,
        tasks: visible,
    };

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "list",
        &output,
        Some(&human),
    )
}

pub fn run_toggle(options: ToggleOptions) -> Result<()> {
    let (_, mut store) = load_store(options.store);
    let id = store.resolve_id(&options.id)?;
    store.toggle_complete(&id);

    let task = store
        .tasks()
        .iter()
        .find(|task| task.id == id)
        .cloned()
        .ok_or_else(|| Error::TaskNotFound(options.id.clone()))?;

    let mut human = HumanOutput::new(if task.completed {
        "Task completed"
    } else {
        "Task reopened"
    });
    human.push_summary("ID", short_id(&task));
    human.push_summary("Title", task.title.clone());

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "toggle",
        &MutationOutput {
            id: task.id.to_string(),
            completed: Some(task.completed),
        },
        Some(&human),
    )
}

pub fn run_edit(options: EditOptions) -> Result<()> {
    if options.title.is_none()
        && options.priority.is_none()
        && options.due.is_none()
        && !options.clear_due
    {
        return Err(Error::InvalidArgument(
            "nothing to edit: pass --title, --priority, --due, or --clear-due".to_string(),
        ));
    }

    let (_, mut store) = load_store(options.store);
    let id = store.resolve_id(&options.id)?;
    let mut task = store
        .tasks()
        .iter()
        .find(|task| task.id == id)
        .cloned()
        .ok_or_else(|| Error::TaskNotFound(options.id.clone()))?;

    if let Some(title) = options.title {
        task.title = title;
    }
    if let Some(priority) = options.priority.as_deref() {
        task.priority = priority.parse()?;
    }
    if let Some(due) = options.due.as_deref() {
        task.due_date = Some(parse_due(due)?);
    }
    if options.clear_due {
        task.due_date = None;
    }

    if !store.update_task(task.clone()) {
        return Err(Error::InvalidArgument("title cannot be empty".to_string()));
    }
    let task = store
        .tasks()
        .iter()
        .find(|stored| stored.id == id)
        .cloned()
        .ok_or_else(|| Error::TaskNotFound(options.id.clone()))?;

    let mut human = HumanOutput::new("Task updated");
    human.push_summary("ID", short_id(&task));
    human.push_summary("Title", task.title.clone());
    human.push_summary("Priority", task.priority.to_string());
    match task.due_date {
        Some(due) => human.push_summary("Due", due.to_rfc3339()),
        None => human.push_summary("Due", "none".to_string()),
    }

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "edit",
        &TaskOutput { task },
        Some(&human),
    )
}

pub fn run_rm(options: RmOptions) -> Result<()> {
    let (_, mut store) = load_store(options.store);
    let id = store.resolve_id(&options.id)?;
    let title = store
        .tasks()
        .iter()
        .find(|task| task.id == id)
        .map(|task| task.title.clone())
        .unwrap_or_default();
    store.delete_task(&id);

    let mut human = HumanOutput::new("Task deleted");
    human.push_summary("ID", id.to_string().chars().take(8).collect::<String>());
    human.push_summary("Title", title);

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "rm",
        &MutationOutput {
            id: id.to_string(),
            completed: None,
        },
        Some(&human),
    )
}

pub fn run_events(options: EventsOptions) -> Result<()> {
    let (_, store) = load_store(options.store);
    let events = view::calendar_events(store.tasks());

    let mut human = HumanOutput::new("Calendar events");
    human.push_summary("Total", events.len().to_string());
    for event in &events {
        let start = event
            .start
            .map(|start| start.to_rfc3339())
            .unwrap_or_else(|| "unscheduled".to_string());
        let done = if event.completed { " (done)" } else { "" };
        human.push_detail(format!(
            "{start}  [{}] {}{done}",
            event.priority, event.title
        ));
    }

    let output = EventsOutput {
        total: events.len(),
        events,
    };

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "events",
        &output,
        Some(&human),
    )
}

pub fn run_ui(options: UiOptions) -> Result<()> {
    let (config, store) = load_store(options.store);
    crate::ui::run(store, config.default_priority)
}

/// Parse a due date from the formats the CLI accepts: RFC 3339, a local
/// date-time without zone ("2026-08-10T17:30"), or a bare date (midnight).
/// Zone-less inputs are taken as UTC.
pub fn parse_due(value: &str) -> Result<DateTime<Utc>> {
    let trimmed = value.trim();

    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(parsed.with_timezone(&Utc));
    }
    if let Ok(parsed) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M") {
        return Ok(parsed.and_utc());
    }
    if let Ok(parsed) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        if let Some(midnight) = parsed.and_hms_opt(0, 0, 0) {
            return Ok(midnight.and_utc());
        }
    }

    Err(Error::InvalidArgument(format!(
        "cannot parse due date '{trimmed}' (expected RFC 3339, YYYY-MM-DDTHH:MM, or YYYY-MM-DD)"
    )))
}

fn short_id(task: &Task) -> String {
    task.id.as_str().chars().take(8).collect()
}

fn format_row(task: &Task, now: DateTime<Utc>) -> String {
    let marker = if task.completed { "[x]" } else { "[ ]" };
    let mut row = format!(
        "{marker} {}  {:<6}  {}",
        short_id(task),
        task.priority,
        task.title
    );

    if let Some(due) = task.due_date {
        row.push_str(&format!("  due {}", due.format("%Y-%m-%d %H:%M")));
        if task.due_soon(now) {
            row.push_str("  <due soon>");
        }
        // Overdue stays visible on the data side, but the badge makes no
        // sense once the task is done.
        if task.is_overdue(now) && !task.completed {
            row.push_str("  <overdue>");
        }
    }

    row
}
