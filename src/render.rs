//! Table rendering for task listings.
//!
//! Stateless presentation functions: they take a task collection plus
//! formatting options and return the finished text. No console state.

use crate::task::{Task, TaskStatus};

/// Formatting options for listings.
#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    /// How many leading id characters to show.
    pub id_width: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self { id_width: 8 }
    }
}

fn status_rank(status: TaskStatus) -> u8 {
    match status {
        TaskStatus::InProgress => 0,
        TaskStatus::Pending => 1,
        TaskStatus::Completed => 2,
    }
}

/// Order tasks for display: in progress first, then pending, then completed.
/// The sort is stable, so insertion order is kept within each group.
pub fn sort_for_display(tasks: &mut [Task]) {
    tasks.sort_by_key(|t| status_rank(t.status));
}

fn column_width(header: &str, cells: impl Iterator<Item = usize>) -> usize {
    cells.chain(std::iter::once(header.chars().count())).max().unwrap_or(0)
}

/// Render the main task table: ID, TASK, STATUS, CREATED.
pub fn render_task_table(tasks: &[Task], opts: &RenderOptions) -> String {
    let title_w = column_width("TASK", tasks.iter().map(|t| t.title.chars().count()));
    let status_w = column_width("STATUS", tasks.iter().map(|t| t.status.as_str().len()));

    let mut out = String::new();
    out.push_str(&format!(
        "{:<id_w$}  {:<title_w$}  {:<status_w$}  CREATED\n",
        "ID",
        "TASK",
        "STATUS",
        id_w = opts.id_width,
    ));
    for task in tasks {
        out.push_str(&format!(
            "{:<id_w$}  {:<title_w$}  {:<status_w$}  {}\n",
            task.short_id(opts.id_width),
            task.title,
            task.status.as_str(),
            task.created_at.format("%Y-%m-%d %H:%M:%S"),
            id_w = opts.id_width,
        ));
    }
    out
}

/// Render the import preview table: TASK, STATUS. No id column, since the
/// tasks are not persisted yet when this is shown.
pub fn render_import_preview(tasks: &[Task]) -> String {
    let title_w = column_width("TASK", tasks.iter().map(|t| t.title.chars().count()));

    let mut out = String::new();
    out.push_str(&format!("{:<title_w$}  STATUS\n", "TASK"));
    for task in tasks {
        out.push_str(&format!(
            "{:<title_w$}  {}\n",
            task.title,
            task.status.as_str(),
        ));
    }
    out
}
