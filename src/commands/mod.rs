//! Command implementations
//!
//! Every command returns whether it succeeded; failures have already been
//! rendered by the time they return.

mod auth;
mod config;
mod task;

pub use auth::{login, logout, register, reset_password, whoami};
pub use config::config_cmd;
pub use task::{board, task_cmd};

use taskboard::app::App;
use taskboard::output::{OperationResult, OutputMode};
use taskboard::router::Route;

/// Enter `target` through the router guard
///
/// Returns false, after telling the user why, when the guard redirected.
fn enter(app: &App, target: Route, mode: OutputMode) -> bool {
    let entered = app.navigate(target.clone());
    if entered == target {
        return true;
    }

    let message = match entered {
        Route::Login => "Not logged in. Run 'taskboard login' first.".to_string(),
        _ => match app.auth().user() {
            Some(user) => {
                format!("Already logged in as {}. Run 'taskboard logout' first.", user.email)
            },
            None => "Already logged in. Run 'taskboard logout' first.".to_string(),
        },
    };
    OperationResult::failed(message).render(mode);
    false
}
