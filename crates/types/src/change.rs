//! Daemon change and task records
//!
//! A change is the daemon's handle on an asynchronous operation. It is made
//! of ordered tasks, each with its own status and progress counters.

use serde::{Deserialize, Serialize};

/// Status of a single task within a change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskStatus {
    Do,
    Doing,
    Done,
    Abort,
    Undo,
    Undoing,
    Undone,
    Hold,
    Error,
    Wait,
    #[serde(other)]
    Unknown,
}

impl TaskStatus {
    /// Whether the task is currently being worked on
    #[must_use]
    pub fn is_running(self) -> bool {
        matches!(self, Self::Doing | Self::Undoing)
    }

    /// Whether the task will not make any more progress
    #[must_use]
    pub fn is_finished(self) -> bool {
        matches!(self, Self::Done | Self::Undone | Self::Hold | Self::Error)
    }
}

/// Progress counters reported for a task
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskProgress {
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub done: u64,
    #[serde(default)]
    pub total: u64,
}

/// A single step of a change
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub kind: String,
    pub summary: String,
    pub status: TaskStatus,
    #[serde(default)]
    pub progress: TaskProgress,
}

impl Task {
    /// Create a task with a summary, status and done counter
    #[must_use]
    pub fn new(summary: impl Into<String>, status: TaskStatus, done: u64) -> Self {
        Self {
            id: String::new(),
            kind: String::new(),
            summary: summary.into(),
            status,
            progress: TaskProgress {
                done,
                ..TaskProgress::default()
            },
        }
    }
}

/// An asynchronous operation tracked by the daemon
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Change {
    pub id: String,
    #[serde(default)]
    pub kind: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub ready: bool,
    #[serde(default)]
    pub tasks: Vec<Task>,
}

impl Change {
    /// Create a change with the given id and tasks
    #[must_use]
    pub fn new(id: impl Into<String>, tasks: Vec<Task>) -> Self {
        Self {
            id: id.into(),
            kind: String::new(),
            summary: String::new(),
            ready: false,
            tasks,
        }
    }

    /// Pick the task that best describes what the change is doing now.
    ///
    /// The first running task wins. When nothing is running the last
    /// finished task is used, and failing that the first task.
    #[must_use]
    pub fn current_task(&self) -> Option<&Task> {
        self.tasks
            .iter()
            .find(|task| task.status.is_running())
            .or_else(|| self.tasks.iter().rev().find(|task| task.status.is_finished()))
            .or_else(|| self.tasks.first())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn current_task_prefers_running_task() {
        let change = Change::new(
            "1",
            vec![
                Task::new("prepare", TaskStatus::Done, 10),
                Task::new("download", TaskStatus::Doing, 2),
                Task::new("mount", TaskStatus::Do, 0),
            ],
        );
        assert_eq!(change.current_task().unwrap().summary, "download");
    }

    #[test]
    fn current_task_falls_back_to_last_finished() {
        let change = Change::new(
            "1",
            vec![
                Task::new("prepare", TaskStatus::Done, 10),
                Task::new("download", TaskStatus::Done, 20),
                Task::new("mount", TaskStatus::Do, 0),
            ],
        );
        assert_eq!(change.current_task().unwrap().summary, "download");
    }

    #[test]
    fn current_task_falls_back_to_first() {
        let change = Change::new(
            "1",
            vec![
                Task::new("prepare", TaskStatus::Do, 0),
                Task::new("download", TaskStatus::Wait, 0),
            ],
        );
        assert_eq!(change.current_task().unwrap().summary, "prepare");
        assert!(Change::new("2", Vec::new()).current_task().is_none());
    }

    #[test]
    fn unknown_task_status_deserializes() {
        let task: Task =
            serde_json::from_str(r#"{"summary":"x","status":"Mystery"}"#).unwrap();
        assert_eq!(task.status, TaskStatus::Unknown);
        assert_eq!(task.progress.done, 0);
    }
}
