//! Output formatting for human and JSON modes
//!
//! This module provides structured output that can be rendered either as
//! human-readable text or machine-parseable JSON.

use std::path::{Path, PathBuf};

use colored::Colorize;
use serde::Serialize;

use crate::config::Config;
use crate::models::{Task, TaskStatus, User};
use crate::stores::Column;

/// Output mode for the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output (machine-readable)
    Json,
}

/// Task as shown to the user
#[derive(Debug, Clone, Serialize)]
pub struct TaskInfo {
    /// Task ID
    pub id: String,
    /// Title
    pub title: String,
    /// Description
    pub description: String,
    /// Status string (`pending`, `in_progress`, `completed`)
    pub status: String,
    /// Due date as sent by the server
    pub due_date: String,
}

impl From<&Task> for TaskInfo {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id.clone(),
            title: task.title.clone(),
            description: task.description.clone(),
            status: task.status.to_string(),
            due_date: task.due_date.clone(),
        }
    }
}

/// Result of a task list operation
#[derive(Debug, Serialize)]
pub struct TaskListResult {
    /// Number of tasks listed
    pub total: usize,
    /// Tasks
    pub tasks: Vec<TaskInfo>,
}

/// Result of a single-task operation (show, add, update, move)
#[derive(Debug, Serialize)]
pub struct TaskResult {
    /// Whether the operation succeeded
    pub success: bool,
    /// The task, when the operation produced one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task: Option<TaskInfo>,
    /// Error message on failure
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// The board: one column per status
#[derive(Debug, Serialize)]
pub struct BoardResult {
    /// Columns in status order
    pub columns: Vec<ColumnInfo>,
}

/// One board column
#[derive(Debug, Serialize)]
pub struct ColumnInfo {
    /// Column status
    pub status: String,
    /// Tasks in the column
    pub tasks: Vec<TaskInfo>,
}

impl From<&Column> for ColumnInfo {
    fn from(column: &Column) -> Self {
        Self {
            status: column.status.to_string(),
            tasks: column.tasks.iter().map(TaskInfo::from).collect(),
        }
    }
}

/// Who is logged in
#[derive(Debug, Serialize)]
pub struct SessionResult {
    /// Whether a session is held
    pub authenticated: bool,
    /// The logged-in user
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
}

/// Saved settings
#[derive(Debug, Serialize)]
pub struct ConfigResult {
    /// Config file the settings were read from
    pub path: PathBuf,
    /// API base URL
    pub api_url: String,
    /// Where the session is persisted
    pub session_path: PathBuf,
}

/// Generic operation result for simple commands
#[derive(Debug, Serialize)]
pub struct OperationResult {
    /// Whether the operation succeeded
    pub success: bool,
    /// Human-readable message
    pub message: String,
}

fn print_json<T: Serialize>(value: &T) {
    println!("{}", serde_json::to_string_pretty(value).unwrap_or_default());
}

fn status_badge(status: &str) -> String {
    match status.parse::<TaskStatus>() {
        Ok(TaskStatus::Pending) => status.yellow().to_string(),
        Ok(TaskStatus::InProgress) => status.cyan().to_string(),
        Ok(TaskStatus::Completed) => status.green().to_string(),
        Err(_) => status.to_string(),
    }
}

fn print_task_line(task: &TaskInfo) {
    println!("  [{}] {} ({})", task.id.bold(), task.title, status_badge(&task.status));
}

impl TaskListResult {
    /// Build from tasks
    #[must_use]
    pub fn new(tasks: &[Task]) -> Self {
        Self {
            total: tasks.len(),
            tasks: tasks.iter().map(TaskInfo::from).collect(),
        }
    }

    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => self.render_human(),
            OutputMode::Json => print_json(self),
        }
    }

    fn render_human(&self) {
        if self.tasks.is_empty() {
            println!("No tasks found.");
            return;
        }

        println!("Tasks ({}):\n", self.total);
        for task in &self.tasks {
            print_task_line(task);
        }
    }
}

impl TaskResult {
    /// A successful result
    #[must_use]
    pub fn found(task: &Task) -> Self {
        Self {
            success: true,
            task: Some(TaskInfo::from(task)),
            error: None,
        }
    }

    /// A failed result
    #[must_use]
    pub fn failed(error: Option<String>) -> Self {
        Self {
            success: false,
            task: None,
            error,
        }
    }

    /// Render the result based on output mode, prefixing success with `verb`
    pub fn render(&self, verb: &str, mode: OutputMode) {
        match mode {
            OutputMode::Human => self.render_human(verb),
            OutputMode::Json => print_json(self),
        }
    }

    fn render_human(&self, verb: &str) {
        match &self.task {
            Some(task) => {
                println!("{verb}: {}", task.id);
                println!("  Title:       {}", task.title);
                println!("  Status:      {}", status_badge(&task.status));
                println!("  Due:         {}", task.due_date);
                if !task.description.is_empty() {
                    println!("  Description: {}", task.description);
                }
            },
            None => println!(
                "{} {}",
                "Error:".red(),
                self.error.as_deref().unwrap_or("operation failed")
            ),
        }
    }
}

impl BoardResult {
    /// Build from board columns
    #[must_use]
    pub fn new(columns: &[Column]) -> Self {
        Self {
            columns: columns.iter().map(ColumnInfo::from).collect(),
        }
    }

    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => self.render_human(),
            OutputMode::Json => print_json(self),
        }
    }

    fn render_human(&self) {
        for column in &self.columns {
            let title = column
                .status
                .parse::<TaskStatus>()
                .map_or_else(|_| column.status.clone(), |s| s.label().to_string());
            println!("{} ({})", title.bold(), column.tasks.len());
            if column.tasks.is_empty() {
                println!("  -");
            }
            for task in &column.tasks {
                println!("  [{}] {}", task.id, task.title);
            }
            println!();
        }
    }
}

impl SessionResult {
    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => match &self.user {
                Some(user) => println!("Logged in as {} <{}>", user.username, user.email),
                None => println!("Not logged in."),
            },
            OutputMode::Json => print_json(self),
        }
    }
}

impl ConfigResult {
    /// Build from a loaded config
    #[must_use]
    pub fn new(path: &Path, config: &Config) -> Self {
        Self {
            path: path.to_path_buf(),
            api_url: config.api.url.clone(),
            session_path: config.session_path(),
        }
    }

    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => {
                println!("Config:  {}", self.path.display());
                println!("API URL: {}", self.api_url);
                println!("Session: {}", self.session_path.display());
            },
            OutputMode::Json => print_json(self),
        }
    }
}

impl OperationResult {
    /// A successful operation
    #[must_use]
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    /// A failed operation
    #[must_use]
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }

    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human if self.success => println!("{}", self.message),
            OutputMode::Human => println!("{} {}", "Error:".red(), self.message),
            OutputMode::Json => print_json(self),
        }
    }
}
