//! Task and SubTask Entities
//!
//! A task belongs to one user and embeds the subtasks the backend generated
//! for it. The client never creates subtasks; it only toggles, renames and
//! deletes them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Entity;

/// Task completion status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum TaskStatus {
    #[default]
    #[serde(rename = "pending")]
    Pending,
    #[serde(rename = "is_completed")]
    Completed,
}

impl TaskStatus {
    pub const ALL: [TaskStatus; 2] = [TaskStatus::Pending, TaskStatus::Completed];

    /// Wire value
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::Completed => "is_completed",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "is_completed" => TaskStatus::Completed,
            _ => TaskStatus::Pending,
        }
    }

    /// User-facing label
    pub fn label(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "Pendiente",
            TaskStatus::Completed => "Completada",
        }
    }

    /// Chip tone
    pub fn tone(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "warning",
            TaskStatus::Completed => "success",
        }
    }
}

/// Task category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TaskCategory {
    #[default]
    Work,
    Personal,
    Urgent,
}

impl TaskCategory {
    pub const ALL: [TaskCategory; 3] = [TaskCategory::Work, TaskCategory::Personal, TaskCategory::Urgent];

    /// Wire value, also shown on the category chip
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskCategory::Work => "work",
            TaskCategory::Personal => "personal",
            TaskCategory::Urgent => "urgent",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "personal" => TaskCategory::Personal,
            "urgent" => TaskCategory::Urgent,
            _ => TaskCategory::Work,
        }
    }

    /// Label used in the category select
    pub fn label(&self) -> &'static str {
        match self {
            TaskCategory::Work => "Trabajo",
            TaskCategory::Personal => "Personal",
            TaskCategory::Urgent => "Urgente",
        }
    }

    /// Chip tone
    pub fn tone(&self) -> &'static str {
        match self {
            TaskCategory::Work => "primary",
            TaskCategory::Personal => "secondary",
            TaskCategory::Urgent => "error",
        }
    }
}

/// An AI-generated step of a task
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubTask {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u32>,
    /// Parent task id (omitted when nested inside a task)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task: Option<u32>,
    pub title: String,
    #[serde(default)]
    pub is_completed: bool,
    #[serde(default, with = "super::timestamp", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, with = "super::timestamp", skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Entity for SubTask {
    type Id = u32;

    fn id(&self) -> Option<u32> {
        self.id
    }
}

/// A user's task with its embedded subtasks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u32>,
    /// Owning user id
    pub user: u32,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub status: TaskStatus,
    #[serde(default)]
    pub category: TaskCategory,
    #[serde(default, with = "super::timestamp", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, with = "super::timestamp", skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub subtasks: Vec<SubTask>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtasks_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_subtasks_count: Option<u32>,
}

impl Entity for Task {
    type Id = u32;

    fn id(&self) -> Option<u32> {
        self.id
    }
}

impl Task {
    /// `(completed, total)` subtask counts, or None when there are no subtasks.
    ///
    /// Prefers the server-computed counts, falling back to the embedded list.
    pub fn progress(&self) -> Option<(u32, u32)> {
        if self.subtasks.is_empty() {
            return None;
        }
        let total = self.subtasks_count.unwrap_or(self.subtasks.len() as u32);
        let completed = self.completed_subtasks_count.unwrap_or_else(|| {
            self.subtasks.iter().filter(|s| s.is_completed).count() as u32
        });
        Some((completed, total))
    }
}

/// Body of `POST /tasks/`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewTask {
    pub user: u32,
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    pub category: TaskCategory,
}

/// Body of `PATCH /subtasks/{id}/`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SubTaskPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_completed: Option<bool>,
}

impl SubTaskPatch {
    pub fn completion(is_completed: bool) -> Self {
        Self { title: None, is_completed: Some(is_completed) }
    }

    pub fn title(title: impl Into<String>) -> Self {
        Self { title: Some(title.into()), is_completed: None }
    }
}

/// Body of `GET /tasks/`.
///
/// The backend answers with a bare array, or wraps an empty result as
/// `{"message": "...", "tasks": []}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum TaskListBody {
    Bare(Vec<Task>),
    Wrapped {
        #[serde(default)]
        message: Option<String>,
        tasks: Vec<Task>,
    },
}

impl TaskListBody {
    pub fn into_tasks(self) -> Vec<Task> {
        match self {
            TaskListBody::Bare(tasks) => tasks,
            TaskListBody::Wrapped { tasks, .. } => tasks,
        }
    }
}
