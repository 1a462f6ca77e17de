//! Task command - manage tasks on the board

use taskboard::app::App;
use taskboard::models::{TaskCreate, TaskStatus, TaskUpdate};
use taskboard::output::{BoardResult, OperationResult, OutputMode, TaskListResult, TaskResult};
use taskboard::router::Route;

use super::enter;
use crate::cli::TaskAction;

/// Handle task subcommands
pub async fn task_cmd(app: &App, action: TaskAction, mode: OutputMode) -> anyhow::Result<bool> {
    if !enter(app, Route::Tasks, mode) {
        return Ok(false);
    }

    match action {
        TaskAction::List { status } => list(app, status.as_deref(), mode).await,
        TaskAction::Show { id } => show(app, &id, mode).await,
        TaskAction::Add {
            title,
            description,
            due,
            status,
        } => add(app, title, description, due, status.as_deref(), mode).await,
        TaskAction::Update {
            id,
            title,
            description,
            due,
            status,
        } => {
            let patch = TaskUpdate {
                title,
                description,
                status: parse_status(status.as_deref())?,
                due_date: due,
            };
            update(app, &id, &patch, mode).await
        },
        TaskAction::Start { id } => {
            move_to(app, &id, TaskStatus::InProgress, "Started", mode).await
        },
        TaskAction::Done { id } => {
            move_to(app, &id, TaskStatus::Completed, "Completed", mode).await
        },
        TaskAction::Move { id, status } => {
            let status: TaskStatus = status.parse().map_err(|e: String| anyhow::anyhow!(e))?;
            move_to(app, &id, status, "Moved", mode).await
        },
        TaskAction::Remove { id } => remove(app, &id, mode).await,
    }
}

/// Show the board, one column per status
pub async fn board(app: &App, mode: OutputMode) -> anyhow::Result<bool> {
    if !enter(app, Route::Tasks, mode) {
        return Ok(false);
    }
    if !fetch_all(app, mode).await {
        return Ok(false);
    }

    BoardResult::new(&app.tasks().board()).render(mode);
    Ok(true)
}

fn parse_status(status: Option<&str>) -> anyhow::Result<Option<TaskStatus>> {
    status.map(str::parse).transpose().map_err(|e: String| anyhow::anyhow!(e))
}

fn failure(app: &App) -> TaskResult {
    TaskResult::failed(app.tasks().error())
}

async fn fetch_all(app: &App, mode: OutputMode) -> bool {
    let ok = app.tasks().fetch_tasks().await;
    if !ok {
        let message = app.tasks().error().unwrap_or_else(|| "Failed to fetch tasks".to_string());
        OperationResult::failed(message).render(mode);
    }
    ok
}

async fn list(app: &App, status: Option<&str>, mode: OutputMode) -> anyhow::Result<bool> {
    let status = parse_status(status)?;
    if !fetch_all(app, mode).await {
        return Ok(false);
    }

    let tasks = match status {
        Some(status) => app.tasks().get_tasks_by_status(status),
        None => app.tasks().tasks(),
    };
    TaskListResult::new(&tasks).render(mode);
    Ok(true)
}

async fn show(app: &App, id: &str, mode: OutputMode) -> anyhow::Result<bool> {
    let task = app.tasks().fetch_task(id).await;
    let result = task.as_ref().map_or_else(|| failure(app), TaskResult::found);
    result.render("Task", mode);
    Ok(result.success)
}

async fn add(
    app: &App,
    title: String,
    description: String,
    due: String,
    status: Option<&str>,
    mode: OutputMode,
) -> anyhow::Result<bool> {
    let status = parse_status(status)?.unwrap_or_default();
    let data = TaskCreate::new(title, due).with_description(description).with_status(status);

    let task = app.tasks().create_task(&data).await;
    let result = task.as_ref().map_or_else(|| failure(app), TaskResult::found);
    result.render("Created task", mode);
    Ok(result.success)
}

async fn update(app: &App, id: &str, patch: &TaskUpdate, mode: OutputMode) -> anyhow::Result<bool> {
    if patch.is_empty() {
        anyhow::bail!(
            "Nothing to update. Pass at least one of --title, --description, --due, --status"
        );
    }

    let task = app.tasks().update_task(id, patch).await;
    let result = task.as_ref().map_or_else(|| failure(app), TaskResult::found);
    result.render("Updated", mode);
    Ok(result.success)
}

async fn move_to(
    app: &App,
    id: &str,
    status: TaskStatus,
    verb: &str,
    mode: OutputMode,
) -> anyhow::Result<bool> {
    // The board is loaded first so moving onto the same column is a no-op
    if !fetch_all(app, mode).await {
        return Ok(false);
    }

    let task = app.tasks().move_task(id, status).await;
    let result = task.as_ref().map_or_else(|| failure(app), TaskResult::found);
    result.render(verb, mode);
    Ok(result.success)
}

async fn remove(app: &App, id: &str, mode: OutputMode) -> anyhow::Result<bool> {
    let removed = app.tasks().delete_task(id).await;
    let result = if removed {
        OperationResult::ok(format!("Removed: {id}"))
    } else {
        OperationResult::failed(
            app.tasks().error().unwrap_or_else(|| "Failed to delete task".to_string()),
        )
    };
    result.render(mode);
    Ok(removed)
}
