//! Task store
//!
//! Holds the user's tasks in server order. The collection changes only after
//! the server confirms an action; nothing is applied optimistically.
//!
//! Mutations of a single task (update, status change, move, delete) are
//! serialised per task id, so two quick status changes on the same task
//! apply in the order they were issued.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};

use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

use super::ActionState;
use crate::client::TasksApi;
use crate::models::{Task, TaskCreate, TaskStatus, TaskUpdate};

/// One board column: every task with a given status
#[derive(Debug, Clone)]
pub struct Column {
    /// Status shared by the column's tasks
    pub status: TaskStatus,
    /// Tasks in collection order
    pub tasks: Vec<Task>,
}

/// Task collection and actions
#[derive(Debug)]
pub struct TaskStore {
    api: TasksApi,
    tasks: RwLock<Vec<Task>>,
    state: ActionState,
    locks: TaskLocks,
}

impl TaskStore {
    /// Create an empty store
    #[must_use]
    pub fn new(api: TasksApi) -> Self {
        Self {
            api,
            tasks: RwLock::new(Vec::new()),
            state: ActionState::default(),
            locks: TaskLocks::default(),
        }
    }

    // === Getters ===

    /// Snapshot of the whole collection
    #[must_use]
    pub fn tasks(&self) -> Vec<Task> {
        self.read().clone()
    }

    /// Look up a task by id
    #[must_use]
    pub fn get_task_by_id(&self, id: &str) -> Option<Task> {
        self.read().iter().find(|t| t.id == id).cloned()
    }

    /// Tasks with the given status, in collection order
    #[must_use]
    pub fn get_tasks_by_status(&self, status: TaskStatus) -> Vec<Task> {
        self.read().iter().filter(|t| t.status == status).cloned().collect()
    }

    /// Tasks not started yet
    #[must_use]
    pub fn pending_tasks(&self) -> Vec<Task> {
        self.get_tasks_by_status(TaskStatus::Pending)
    }

    /// Tasks being worked on
    #[must_use]
    pub fn in_progress_tasks(&self) -> Vec<Task> {
        self.get_tasks_by_status(TaskStatus::InProgress)
    }

    /// Finished tasks
    #[must_use]
    pub fn completed_tasks(&self) -> Vec<Task> {
        self.get_tasks_by_status(TaskStatus::Completed)
    }

    /// The board: one column per status, in status order
    #[must_use]
    pub fn board(&self) -> Vec<Column> {
        TaskStatus::ALL
            .into_iter()
            .map(|status| Column {
                status,
                tasks: self.get_tasks_by_status(status),
            })
            .collect()
    }

    /// Whether an action is in flight
    #[must_use]
    pub fn loading(&self) -> bool {
        self.state.loading()
    }

    /// Message of the last failed action
    #[must_use]
    pub fn error(&self) -> Option<String> {
        self.state.error()
    }

    // === Actions ===

    /// Replace the collection with the server's
    pub async fn fetch_tasks(&self) -> bool {
        let _loading = self.state.begin();
        match self.api.get_all_tasks().await {
            Ok(tasks) => {
                log::debug!("Fetched {} task(s)", tasks.len());
                *self.write() = dedup_by_id(tasks);
                true
            },
            Err(e) => {
                self.state.fail(&e, "Failed to fetch tasks");
                false
            },
        }
    }

    /// Fetch one task, replacing the local copy or appending it
    pub async fn fetch_task(&self, id: &str) -> Option<Task> {
        let _loading = self.state.begin();
        match self.api.get_task(id).await {
            Ok(task) => {
                self.upsert(task.clone());
                Some(task)
            },
            Err(e) => {
                self.state.fail(&e, "Failed to fetch task");
                None
            },
        }
    }

    /// Create a task and append the server's copy
    pub async fn create_task(&self, data: &TaskCreate) -> Option<Task> {
        let _loading = self.state.begin();
        match self.api.create_task(data).await {
            Ok(task) => {
                self.upsert(task.clone());
                Some(task)
            },
            Err(e) => {
                self.state.fail(&e, "Failed to create task");
                None
            },
        }
    }

    /// Send a partial update and replace the local copy
    ///
    /// A task that is not held locally is left alone even though the server
    /// accepted the change; the next [`fetch_tasks`](Self::fetch_tasks)
    /// brings it in.
    pub async fn update_task(&self, id: &str, patch: &TaskUpdate) -> Option<Task> {
        let _lock = self.locks.acquire(id).await;
        let _loading = self.state.begin();
        match self.api.update_task(id, patch).await {
            Ok(task) => {
                let mut tasks = self.write();
                if let Some(slot) = tasks.iter_mut().find(|t| t.id == id) {
                    *slot = task.clone();
                } else {
                    log::debug!("Updated task {id} is not held locally");
                }
                Some(task)
            },
            Err(e) => {
                self.state.fail(&e, "Failed to update task");
                None
            },
        }
    }

    /// Delete a task and drop it from the collection
    pub async fn delete_task(&self, id: &str) -> bool {
        let _lock = self.locks.acquire(id).await;
        let _loading = self.state.begin();
        match self.api.delete_task(id).await {
            Ok(_) => {
                self.write().retain(|t| t.id != id);
                true
            },
            Err(e) => {
                self.state.fail(&e, "Failed to delete task");
                false
            },
        }
    }

    /// Change only the status of a task
    pub async fn change_task_status(&self, id: &str, status: TaskStatus) -> Option<Task> {
        self.update_task(id, &TaskUpdate::status(status)).await
    }

    /// Move a task to another board column
    ///
    /// Dropping a task on the column it is already in is a no-op that
    /// returns the local copy without calling the server.
    pub async fn move_task(&self, id: &str, status: TaskStatus) -> Option<Task> {
        if let Some(task) = self.get_task_by_id(id).filter(|t| t.status == status) {
            log::debug!("Task {id} is already {status}");
            return Some(task);
        }
        self.change_task_status(id, status).await
    }

    fn upsert(&self, task: Task) {
        let mut tasks = self.write();
        match tasks.iter_mut().find(|t| t.id == task.id) {
            Some(slot) => *slot = task,
            None => tasks.push(task),
        }
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Vec<Task>> {
        self.tasks.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Vec<Task>> {
        self.tasks.write().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Keep the first entry for each id
fn dedup_by_id(tasks: Vec<Task>) -> Vec<Task> {
    let mut seen = std::collections::HashSet::new();
    tasks.into_iter().filter(|t| seen.insert(t.id.clone())).collect()
}

/// One async lock per task id
///
/// An entry lives only while some action holds or waits on it.
#[derive(Debug, Default)]
struct TaskLocks {
    locks: Mutex<HashMap<String, Arc<AsyncMutex<()>>>>,
}

impl TaskLocks {
    async fn acquire<'a>(&'a self, id: &str) -> TaskLockGuard<'a> {
        let lock = {
            let mut locks = self.entries();
            Arc::clone(locks.entry(id.to_string()).or_default())
        };
        TaskLockGuard {
            guard: Some(lock.lock_owned().await),
            locks: self,
            id: id.to_string(),
        }
    }

    /// Drop the entry for `id` unless another action still holds or awaits it
    fn release(&self, id: &str) {
        let mut locks = self.entries();
        // Waiters clone the Arc under this same map lock
        if locks.get(id).is_some_and(|lock| Arc::strong_count(lock) == 1) {
            locks.remove(id);
        }
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<String, Arc<AsyncMutex<()>>>> {
        self.locks.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Held for the duration of one task mutation
struct TaskLockGuard<'a> {
    guard: Option<OwnedMutexGuard<()>>,
    locks: &'a TaskLocks,
    id: String,
}

impl Drop for TaskLockGuard<'_> {
    fn drop(&mut self) {
        drop(self.guard.take());
        self.locks.release(&self.id);
    }
}
