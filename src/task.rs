//! Task entity and lifecycle.
//!
//! A `Task` is the unit record of the store: an opaque random id, a title,
//! a three-state status, and creation/completion timestamps. Transitions are
//! permissive: `start` and `complete` may be applied from any status.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Task status. Serialized as its lowercase tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    Pending,
    InProgress,
    Completed,
}

impl TaskStatus {
    /// The stable on-disk tag for this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "inprogress",
            Self::Completed => "completed",
        }
    }

    /// Parse a user-supplied tag (case-insensitive). `None` for unknown tags.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.to_lowercase().as_str() {
            "pending" => Some(Self::Pending),
            "inprogress" => Some(Self::InProgress),
            "completed" => Some(Self::Completed),
            _ => None,
        }
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single tracked task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Random 128-bit identifier (v4 UUID), assigned at creation.
    pub id: String,
    /// Free-text title.
    pub title: String,
    /// Current lifecycle state.
    pub status: TaskStatus,
    /// When the task was created. Immutable.
    pub created_at: DateTime<Utc>,
    /// When the task was last completed. Set by `complete`, never unset.
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
}

impl Task {
    /// Create a pending task with a fresh id and the given title.
    pub fn new(title: &str) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.to_string(),
            status: TaskStatus::Pending,
            created_at: Utc::now(),
            completed_at: None,
        }
    }

    /// Mark as in progress. Permitted from any status, including completed.
    pub fn start(&mut self) {
        self.status = TaskStatus::InProgress;
    }

    /// Mark as completed, stamping `completed_at` with the current time.
    /// Completing an already-completed task refreshes the timestamp.
    pub fn complete(&mut self) {
        self.status = TaskStatus::Completed;
        self.completed_at = Some(Utc::now());
    }

    /// True for tasks still being worked on (pending or in progress).
    pub fn is_open(&self) -> bool {
        !matches!(self.status, TaskStatus::Completed)
    }

    /// The leading characters of the id shown in listings and messages.
    pub fn short_id(&self, width: usize) -> &str {
        &self.id[..width.min(self.id.len())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_task_is_pending() {
        let task = Task::new("write the report");
        assert_eq!(task.title, "write the report");
        assert_eq!(task.status, TaskStatus::Pending);
        assert!(task.completed_at.is_none());
        assert!(task.is_open());
    }

    #[test]
    fn ids_are_unique() {
        let a = Task::new("a");
        let b = Task::new("b");
        assert_ne!(a.id, b.id);
        assert_eq!(a.id.len(), 36); // hyphenated uuid
    }

    #[test]
    fn complete_sets_status_and_timestamp() {
        let mut task = Task::new("ship it");
        task.complete();
        assert_eq!(task.status, TaskStatus::Completed);
        let first = task.completed_at.expect("completed_at set");
        assert!(task.created_at <= first);

        // Completing again refreshes the timestamp.
        task.complete();
        let second = task.completed_at.expect("completed_at still set");
        assert!(second >= first);
    }

    #[test]
    fn start_is_permissive_after_complete() {
        let mut task = Task::new("restartable");
        task.complete();
        task.start();
        assert_eq!(task.status, TaskStatus::InProgress);
        // completed_at is never unset.
        assert!(task.completed_at.is_some());
    }

    #[test]
    fn status_tags_round_trip() {
        for status in [
            TaskStatus::Pending,
            TaskStatus::InProgress,
            TaskStatus::Completed,
        ] {
            assert_eq!(TaskStatus::from_tag(status.as_str()), Some(status));
        }
        assert_eq!(TaskStatus::from_tag("INPROGRESS"), Some(TaskStatus::InProgress));
        assert_eq!(TaskStatus::from_tag("done"), None);
    }

    #[test]
    fn serde_round_trip_is_lossless() {
        let mut task = Task::new("round trip");
        task.complete();

        let json = serde_json::to_string(&task).unwrap();
        assert!(json.contains("\"completed\""));

        let back: Task = serde_json::from_str(&json).unwrap();
        assert_eq!(back, task);
    }

    #[test]
    fn missing_completed_at_deserializes_as_none() {
        let json = r#"{
            "id": "0c7a9f6e-1111-4222-8333-444455556666",
            "title": "legacy record",
            "status": "pending",
            "created_at": "2025-11-03T09:15:00Z"
        }"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert!(task.completed_at.is_none());
        assert_eq!(task.status, TaskStatus::Pending);
    }

    #[test]
    fn unknown_status_tag_is_rejected() {
        let json = r#"{
            "id": "x",
            "title": "bad",
            "status": "paused",
            "created_at": "2025-11-03T09:15:00Z",
            "completed_at": null
        }"#;
        assert!(serde_json::from_str::<Task>(json).is_err());
    }

    #[test]
    fn short_id_clamps_to_id_length() {
        let task = Task::new("short");
        assert_eq!(task.short_id(8).len(), 8);
        assert_eq!(task.short_id(100), task.id);
    }
}
