//! Task store: the single source of truth for the task collection.
//!
//! All mutations funnel through [`TaskStore`]. Each mutation updates the
//! in-memory collection and synchronously writes the whole collection back
//! through the key-value store, so memory and disk never disagree about
//! which tasks exist. A failed disk write is logged and otherwise ignored;
//! durability is best-effort, the session state is authoritative.

use chrono::{DateTime, Utc};

use crate::error::{Error, Result};
use crate::kv::KvStore;
use crate::task::{Task, TaskDraft, TaskId};

/// Key holding the ordered task collection.
pub const TASKS_KEY: &str = "tasks";

/// Key holding the dark-mode flag.
pub const THEME_KEY: &str = "theme";

/// In-memory task collection backed by a [`KvStore`].
///
/// Ordering is newest-first: new tasks are prepended, updates keep their
/// position, deletes do not reorder the remaining tasks.
#[derive(Debug)]
pub struct TaskStore {
    kv: KvStore,
    tasks: Vec<Task>,
    dark_mode: bool,
}

impl TaskStore {
    /// Open the store, loading the persisted collection and theme flag.
    /// Missing or unreadable state starts empty rather than failing.
    pub fn open(mut kv: KvStore) -> Self {
        let tasks = kv.read(TASKS_KEY, Vec::new());
        let dark_mode = kv.read(THEME_KEY, false);
        Self {
            kv,
            tasks,
            dark_mode,
        }
    }

    /// Current task collection, newest first.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Create a task from `draft`, stamped with `now`.
    ///
    /// The title is trimmed; a title that is empty after trimming creates
    /// nothing and returns `None`. On success the new task is prepended and
    /// a copy of it is returned.
    pub fn add_task(&mut self, draft: TaskDraft, now: DateTime<Utc>) -> Option<Task> {
        let title = draft.title.trim();
        if title.is_empty() {
            return None;
        }

        let task = Task {
            id: TaskId::new(),
            title: title.to_string(),
            completed: false,
            priority: draft.priority,
            due_date: draft.due_date,
            created_at: now,
        };
        self.tasks.insert(0, task.clone());
        self.persist();
        Some(task)
    }

    /// Flip `completed` on the matching task. Returns whether a task was
    /// toggled; an unknown id is a no-op.
    pub fn toggle_complete(&mut self, id: &TaskId) -> bool {
        let Some(task) = self.tasks.iter_mut().find(|task| task.id == *id) else {
            return false;
        };
        task.completed = !task.completed;
        self.persist();
        true
    }

    /// Remove the matching task, preserving the order of the rest. Returns
    /// whether a task was removed.
    pub fn delete_task(&mut self, id: &TaskId) -> bool {
        let Some(index) = self.tasks.iter().position(|task| task.id == *id) else {
            return false;
        };
        self.tasks.remove(index);
        self.persist();
        true
    }

    /// Replace the task whose id matches `updated`, keeping its position.
    ///
    /// `id` and `created_at` are immutable: the stored values win over
    /// whatever the caller supplies. An empty trimmed title or an unknown
    /// id leaves the collection untouched and returns `false`.
    pub fn update_task(&mut self, mut updated: Task) -> bool {
        let title = updated.title.trim().to_string();
        if title.is_empty() {
            return false;
        }

        let Some(existing) = self.tasks.iter_mut().find(|task| task.id == updated.id) else {
            return false;
        };
        updated.title = title;
        updated.created_at = existing.created_at;
        *existing = updated;
        self.persist();
        true
    }

    /// Resolve user input to a task id: an exact id, or a unique
    /// case-insensitive id prefix.
    pub fn resolve_id(&self, input: &str) -> Result<TaskId> {
        let needle = input.trim().to_ascii_lowercase();
        if needle.is_empty() {
            return Err(Error::InvalidArgument("task id cannot be empty".to_string()));
        }

        let mut matches: Vec<&TaskId> = Vec::new();
        for task in &self.tasks {
            let id = task.id.as_str().to_ascii_lowercase();
            if id == needle {
                return Ok(task.id.clone());
            }
            if id.starts_with(&needle) {
                matches.push(&task.id);
            }
        }

        match matches.len() {
            0 => Err(Error::TaskNotFound(input.trim().to_string())),
            1 => Ok(matches[0].clone()),
            _ => Err(Error::InvalidArgument(format!(
                "ambiguous task id '{}': {}",
                input.trim(),
                matches
                    .iter()
                    .map(|id| id.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            ))),
        }
    }

    /// Persisted theme preference: `true` means dark.
    pub fn dark_mode(&self) -> bool {
        self.dark_mode
    }

    /// Set and persist the theme preference.
    pub fn set_dark_mode(&mut self, dark: bool) {
        self.dark_mode = dark;
        if let Err(err) = self.kv.write(THEME_KEY, &dark) {
            tracing::warn!(%err, "failed to persist theme preference");
        }
    }

    /// Re-read state from disk, bypassing the cache. Used when another
    /// process may have rewritten the store.
    pub fn refresh(&mut self) {
        self.kv.invalidate(TASKS_KEY);
        self.kv.invalidate(THEME_KEY);
        self.tasks = self.kv.read(TASKS_KEY, Vec::new());
        self.dark_mode = self.kv.read(THEME_KEY, false);
    }

    /// Directory backing the store (for file watching).
    pub fn dir(&self) -> &std::path::Path {
        self.kv.dir()
    }

    fn persist(&mut self) {
        if let Err(err) = self.kv.write(TASKS_KEY, &self.tasks) {
            tracing::warn!(%err, "failed to persist task collection");
        }
    }
}
