//! Task endpoints

use super::error::ApiError;
use super::http::HttpClient;
use crate::models::{MessageResponse, Task, TaskCreate, TaskUpdate};

/// Typed wrapper over the `/api/tasks` endpoints
#[derive(Debug, Clone)]
pub struct TasksApi {
    http: HttpClient,
}

impl TasksApi {
    /// Create the client on top of a shared HTTP client
    #[must_use]
    pub const fn new(http: HttpClient) -> Self {
        Self { http }
    }

    /// `GET /api/tasks` - all tasks of the current user
    pub async fn get_all_tasks(&self) -> Result<Vec<Task>, ApiError> {
        self.http.get("/api/tasks").await
    }

    /// `GET /api/tasks/{id}`
    pub async fn get_task(&self, id: &str) -> Result<Task, ApiError> {
        self.http.get(&format!("/api/tasks/{id}")).await
    }

    /// `POST /api/tasks`
    pub async fn create_task(&self, task: &TaskCreate) -> Result<Task, ApiError> {
        self.http.post("/api/tasks", task).await
    }

    /// `PUT /api/tasks/{id}` with a partial body
    pub async fn update_task(&self, id: &str, patch: &TaskUpdate) -> Result<Task, ApiError> {
        self.http.put(&format!("/api/tasks/{id}"), patch).await
    }

    /// `DELETE /api/tasks/{id}`
    pub async fn delete_task(&self, id: &str) -> Result<MessageResponse, ApiError> {
        self.http.delete(&format!("/api/tasks/{id}")).await
    }
}
