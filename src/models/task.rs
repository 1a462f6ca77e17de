//! Task model
//!
//! A task is a unit of work owned by a user and tracked on the board.
//! Field names on the wire follow the remote API (`titulo`, `descricao`,
//! `data_vencimento`); the Rust side uses plain English names.

use serde::{Deserialize, Serialize};

/// A task as returned by the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Unique identifier assigned by the server
    #[serde(alias = "_id")]
    pub id: String,

    /// What needs to be done
    #[serde(rename = "titulo")]
    pub title: String,

    /// Longer description
    #[serde(rename = "descricao", default)]
    pub description: String,

    /// Current status (board column)
    pub status: TaskStatus,

    /// Due date as sent by the server
    #[serde(rename = "data_vencimento", default)]
    pub due_date: String,

    /// Owning user, when the server includes it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

/// Task status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Not started
    #[default]
    Pending,
    /// Currently being worked on
    InProgress,
    /// Finished
    Completed,
}

impl TaskStatus {
    /// All statuses in board column order
    pub const ALL: [Self; 3] = [Self::Pending, Self::InProgress, Self::Completed];

    /// Human-readable column title
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::InProgress => "In Progress",
            Self::Completed => "Completed",
        }
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::InProgress => write!(f, "in_progress"),
            Self::Completed => write!(f, "completed"),
        }
    }
}

impl std::str::FromStr for TaskStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "pending" | "todo" => Ok(Self::Pending),
            "in_progress" | "inprogress" | "started" => Ok(Self::InProgress),
            "completed" | "complete" | "done" => Ok(Self::Completed),
            _ => Err(format!("Invalid status: {s}. Use: pending, in_progress, completed")),
        }
    }
}

/// Request body for creating a task
#[derive(Debug, Clone, Serialize)]
pub struct TaskCreate {
    /// Task title
    #[serde(rename = "titulo")]
    pub title: String,
    /// Task description
    #[serde(rename = "descricao")]
    pub description: String,
    /// Initial status
    pub status: TaskStatus,
    /// Due date string
    #[serde(rename = "data_vencimento")]
    pub due_date: String,
}

impl TaskCreate {
    /// Create a pending task with the given title
    #[must_use]
    pub fn new(title: impl Into<String>, due_date: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            status: TaskStatus::default(),
            due_date: due_date.into(),
        }
    }

    /// Set the description
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the initial status
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }
}

/// Partial update; absent fields are left untouched by the server
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TaskUpdate {
    /// New title
    #[serde(rename = "titulo", skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// New description
    #[serde(rename = "descricao", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// New status
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
    /// New due date
    #[serde(rename = "data_vencimento", skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
}

impl TaskUpdate {
    /// A patch that only changes the status
    #[must_use]
    pub const fn status(status: TaskStatus) -> Self {
        Self {
            title: None,
            description: None,
            status: Some(status),
            due_date: None,
        }
    }

    /// Whether the patch changes nothing
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.status.is_none()
            && self.due_date.is_none()
    }
}
