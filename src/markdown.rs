//! Markdown checkbox extraction.
//!
//! Scans freeform markdown for checkbox list items (`- [ ] title` /
//! `- [x] title`) and turns them into tasks. Everything that is not a
//! checkbox item (headings, prose, plain bullets, malformed brackets) is
//! silently skipped, so extraction never fails on arbitrary input.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{MarkdownError, MarkdownResult};
use crate::task::Task;

/// One checkbox line: `- [ ]` is open, `- [x]` / `- [X]` is completed.
/// Indentation depth carries no meaning; nested items are flattened.
static RE_CHECKBOX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*-\s+\[([ xX])\]\s+(.+)$").unwrap());

/// A single extracted checkbox item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckboxItem {
    pub title: String,
    pub completed: bool,
}

/// Extract checkbox items from markdown content, in document order.
pub fn extract_checkbox_items(content: &str) -> Vec<CheckboxItem> {
    let mut items = Vec::new();

    for line in content.lines() {
        if let Some(caps) = RE_CHECKBOX.captures(line) {
            let state = &caps[1];
            let title = caps[2].trim().to_string();
            items.push(CheckboxItem {
                title,
                completed: state.eq_ignore_ascii_case("x"),
            });
        }
    }

    items
}

/// Read a markdown file and build a task per checkbox item.
///
/// Completed items get the full `complete` transition so `completed_at`
/// is stamped. Extraction order is preserved.
///
/// A missing file is `MarkdownError::FileNotFound`; an unreadable one is
/// `MarkdownError::AccessDenied`. The two are distinguishable so the
/// shell can message each case.
pub fn parse_markdown_file(path: &Path) -> MarkdownResult<Vec<Task>> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            MarkdownError::FileNotFound {
                path: path.display().to_string(),
            }
        } else {
            MarkdownError::AccessDenied {
                path: path.display().to_string(),
                source: e,
            }
        }
    })?;

    let tasks = extract_checkbox_items(&content)
        .into_iter()
        .map(|item| {
            let mut task = Task::new(&item.title);
            if item.completed {
                task.complete();
            }
            task
        })
        .collect();

    Ok(tasks)
}
