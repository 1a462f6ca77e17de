//! Tests for what happens when the server rejects the session

use taskboard::app::SESSION_EXPIRED_MESSAGE;
use taskboard::client::FALLBACK_MESSAGE;
use taskboard::notify::NotificationKind;
use taskboard::router::Route;

use crate::common::{FakeApi, Harness, logged_in_storage};

#[tokio::test]
async fn test_rejected_token_logs_out() {
    let api = FakeApi::start();
    let h = Harness::new(&api, logged_in_storage("stale"));
    assert!(h.app.auth().is_authenticated());
    assert_eq!(h.app.navigate(Route::Tasks), Route::Tasks);

    assert!(!h.app.tasks().fetch_tasks().await);

    assert!(h.storage.is_empty());
    assert!(!h.app.auth().is_authenticated());
    assert!(h.app.auth().user().is_none());
    assert_eq!(h.app.router().current(), Route::Login);
    assert_eq!(h.app.tasks().error().as_deref(), Some(FALLBACK_MESSAGE));

    let seen = h.notifier.seen();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].kind, NotificationKind::Warning);
    assert_eq!(seen[0].message, SESSION_EXPIRED_MESSAGE);
}

#[tokio::test]
async fn test_expiry_resets_auth_store_state() {
    let api = FakeApi::start();
    let h = Harness::new(&api, logged_in_storage("stale"));
    assert!(!h.app.auth().request_password_reset("nobody@b.com").await);
    assert!(h.app.auth().error().is_some());

    assert!(!h.app.tasks().fetch_tasks().await);

    assert!(h.app.auth().error().is_none());
    assert!(!h.app.auth().loading());
    assert!(h.app.auth().token().is_none());
}

#[tokio::test]
async fn test_requests_after_expiry_carry_no_token() {
    let api = FakeApi::start();
    let h = Harness::new(&api, logged_in_storage("stale"));

    assert!(!h.app.tasks().fetch_tasks().await);
    assert!(!h.app.tasks().fetch_tasks().await);

    let requests = api.requests();
    assert_eq!(requests[0].authorization.as_deref(), Some("Bearer stale"));
    assert_eq!(requests[1].authorization, None);
    assert_eq!(h.notifier.seen().len(), 2);
}

#[tokio::test]
async fn test_other_errors_keep_session() {
    let api = FakeApi::start();
    let h = Harness::logged_in(&api);
    api.fail_next("GET", "/api/tasks", 403, r#"{"message": "Acesso negado"}"#);

    assert!(!h.app.tasks().fetch_tasks().await);

    assert!(h.app.auth().is_authenticated());
    assert!(!h.storage.is_empty());
    assert!(h.notifier.seen().is_empty());
}

#[test]
fn test_navigation_is_guarded() {
    let api = FakeApi::start();
    let h = Harness::logged_out(&api);
    assert_eq!(h.app.navigate(Route::Tasks), Route::Login);
    assert_eq!(h.app.navigate(Route::Register), Route::Register);

    let h = Harness::logged_in(&api);
    assert_eq!(h.app.navigate(Route::Login), Route::Home);
    assert_eq!(h.app.router().current(), Route::Home);
}
