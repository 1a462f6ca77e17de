//! Account commands - login, register, logout, password reset

use taskboard::app::App;
use taskboard::models::{Credentials, Registration};
use taskboard::output::{OperationResult, OutputMode, SessionResult};
use taskboard::router::Route;

use super::enter;
use crate::cli::ResetAction;

fn auth_failure(app: &App, fallback: &str) -> OperationResult {
    OperationResult::failed(app.auth().error().unwrap_or_else(|| fallback.to_string()))
}

/// Log in and persist the session
pub async fn login(
    app: &App,
    email: &str,
    password: &str,
    mode: OutputMode,
) -> anyhow::Result<bool> {
    if !enter(app, Route::Login, mode) {
        return Ok(false);
    }

    let ok = app.auth().login(&Credentials::new(email, password)).await;
    if ok {
        app.navigate(Route::Home);
        let username = app.auth().user().map(|u| u.username).unwrap_or_default();
        OperationResult::ok(format!("Logged in as {username}")).render(mode);
    } else {
        auth_failure(app, "Failed to login").render(mode);
    }
    Ok(ok)
}

/// Register a new account and persist its session
pub async fn register(
    app: &App,
    email: String,
    username: String,
    password: String,
    mode: OutputMode,
) -> anyhow::Result<bool> {
    if !enter(app, Route::Register, mode) {
        return Ok(false);
    }

    let registration = Registration {
        email,
        password,
        username,
    };
    let ok = app.auth().register(&registration).await;
    if ok {
        app.navigate(Route::Home);
        OperationResult::ok(format!("Registered and logged in as {}", registration.username))
            .render(mode);
    } else {
        auth_failure(app, "Failed to register").render(mode);
    }
    Ok(ok)
}

/// Log out; always succeeds locally
pub async fn logout(app: &App, mode: OutputMode) -> anyhow::Result<bool> {
    if !app.auth().is_authenticated() {
        OperationResult::ok("Not logged in.").render(mode);
        return Ok(true);
    }

    app.auth().logout().await;
    app.navigate(Route::Login);
    OperationResult::ok("Logged out.").render(mode);
    Ok(true)
}

/// Show the logged-in user
pub fn whoami(app: &App, mode: OutputMode) -> bool {
    let user = app.auth().user();
    SessionResult {
        authenticated: app.auth().is_authenticated(),
        user,
    }
    .render(mode);
    true
}

/// Request or confirm a password reset
pub async fn reset_password(
    app: &App,
    action: ResetAction,
    mode: OutputMode,
) -> anyhow::Result<bool> {
    let ok = match action {
        ResetAction::Request { email } => {
            if !enter(app, Route::ResetPassword, mode) {
                return Ok(false);
            }
            let ok = app.auth().request_password_reset(&email).await;
            if ok {
                OperationResult::ok(format!("Password reset link sent to {email}")).render(mode);
            }
            ok
        },
        ResetAction::Confirm { token, password } => {
            if !enter(app, Route::ResetPasswordConfirm { token: token.clone() }, mode) {
                return Ok(false);
            }
            let ok = app.auth().reset_password(&token, &password).await;
            if ok {
                OperationResult::ok("Password updated. You can now log in.").render(mode);
            }
            ok
        },
    };

    if !ok {
        auth_failure(app, "Failed to reset password").render(mode);
    }
    Ok(ok)
}
