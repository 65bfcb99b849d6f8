//! Pure list/selection helpers for the task viewer.

use crate::task::{Filter, Task, TaskId};
use crate::view;

/// Indices of the tasks matching `filter`, in store order.
pub fn visible_indices(tasks: &[Task], filter: Filter) -> Vec<usize> {
    tasks
        .iter()
        .enumerate()
        .filter(|(_, task)| match filter {
            Filter::All => true,
            Filter::Active => !task.completed,
            Filter::Completed => task.completed,
        })
        .map(|(index, _)| index)
        .collect()
}

/// Move the selection by `delta`, clamped to the visible range.
pub fn move_selection(len: usize, selected: Option<usize>, delta: isize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let current = selected.unwrap_or(0) as isize;
    let next = (current + delta).clamp(0, len as isize - 1);
    Some(next as usize)
}

/// Keep the selection on the same task across a refilter when possible,
/// falling back to the top of the list.
pub fn select_by_id(
    tasks: &[Task],
    visible: &[usize],
    previous: Option<&TaskId>,
) -> Option<usize> {
    if visible.is_empty() {
        return None;
    }
    if let Some(id) = previous {
        if let Some(position) = visible
            .iter()
            .position(|&index| tasks.get(index).map(|task| &task.id) == Some(id))
        {
            return Some(position);
        }
    }
    Some(0)
}

/// Tab label with a live count, e.g. "2 Active (3)".
pub fn tab_label(filter: Filter, tasks: &[Task]) -> String {
    let counts = view::task_counts(tasks);
    match filter {
        Filter::All => format!("1 All ({})", counts.all),
        Filter::Active => format!("2 Active ({})", counts.active),
        Filter::Completed => format!("3 Completed ({})", counts.completed),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::Priority;
    use chrono::Utc;

    fn task(title: &str, completed: bool) -> Task {
        Task {
            id: TaskId::new(),
            title: title.to_string(),
            completed,
            priority: Priority::Medium,
            due_date: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn visible_indices_follow_the_filter() {
        let tasks = vec![task("a", false), task("b", true), task("c", false)];
        assert_eq!(visible_indices(&tasks, Filter::All), vec![0, 1, 2]);
        assert_eq!(visible_indices(&tasks, Filter::Active), vec![0, 2]);
        assert_eq!(visible_indices(&tasks, Filter::Completed), vec![1]);
    }

    #[test]
    fn move_selection_clamps_to_bounds() {
        assert_eq!(move_selection(3, Some(0), -1), Some(0));
        assert_eq!(move_selection(3, Some(0), 1), Some(1));
        assert_eq!(move_selection(3, Some(2), 1), Some(2));
        assert_eq!(move_selection(3, None, 1), Some(1));
        assert_eq!(move_selection(0, Some(1), 1), None);
    }

    #[test]
    fn selection_sticks_to_the_same_task() {
        let tasks = vec![task("a", false), task("b", true), task("c", false)];
        let id = tasks[2].id.clone();

        let visible = visible_indices(&tasks, Filter::Active);
        assert_eq!(select_by_id(&tasks, &visible, Some(&id)), Some(1));

        // The previously selected task left the view: fall back to the top.
        let completed_only = visible_indices(&tasks, Filter::Completed);
        assert_eq!(select_by_id(&tasks, &completed_only, Some(&id)), Some(0));
        assert_eq!(select_by_id(&tasks, &[], Some(&id)), None);
    }

    #[test]
    fn tab_labels_include_counts() {
        let tasks = vec![task("a", false), task("b", true)];
        assert_eq!(tab_label(Filter::All, &tasks), "1 All (2)");
        assert_eq!(tab_label(Filter::Active, &tasks), "2 Active (1)");
        assert_eq!(tab_label(Filter::Completed, &tasks), "3 Completed (1)");
    }
}
