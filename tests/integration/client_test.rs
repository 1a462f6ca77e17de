//! Tests for the HTTP wrapper and the endpoint clients

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use serde_json::{Value, json};
use taskboard::client::{
    ApiError, AuthApi, FALLBACK_MESSAGE, HttpClient, TasksApi, UnauthorizedListener,
};
use taskboard::models::{Credentials, Registration, TaskStatus, TaskUpdate};
use taskboard::storage::{MemoryStorage, Storage, TOKEN_KEY};

use crate::common::FakeApi;

#[derive(Debug, Default)]
struct CountingListener {
    calls: AtomicUsize,
}

impl UnauthorizedListener for CountingListener {
    fn on_unauthorized(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

fn client(api: &FakeApi, storage: &Arc<MemoryStorage>) -> HttpClient {
    HttpClient::new(api.url(), Arc::clone(storage) as Arc<dyn Storage>)
}

#[tokio::test]
async fn test_token_is_read_at_call_time() {
    let api = FakeApi::start();
    api.issue_token("t9");
    let storage = Arc::new(MemoryStorage::new());
    let http = client(&api, &storage);

    let _ = http.get::<Value>("/api/tasks").await;
    assert_eq!(api.last_request().authorization, None);

    storage.set(TOKEN_KEY, "t9").unwrap();
    let tasks: Vec<Value> = http.get("/api/tasks").await.unwrap();
    assert!(tasks.is_empty());

    let request = api.last_request();
    assert_eq!(request.authorization.as_deref(), Some("Bearer t9"));
    assert_eq!(request.content_type.as_deref(), Some("application/json"));
}

#[tokio::test]
async fn test_error_message_comes_from_body() {
    let api = FakeApi::start();
    let storage = Arc::new(MemoryStorage::new());
    api.fail_next("GET", "/api/tasks", 404, r#"{"message": "Tarefa não encontrada"}"#);

    let err = client(&api, &storage).get::<Value>("/api/tasks").await.unwrap_err();

    assert_eq!(err.status(), 404);
    assert_eq!(err.message(), "Tarefa não encontrada");
    assert!(matches!(err, ApiError::Http { .. }));
}

#[tokio::test]
async fn test_non_json_error_body_uses_fallback_and_real_status() {
    let api = FakeApi::start();
    let storage = Arc::new(MemoryStorage::new());
    api.fail_next("GET", "/api/tasks", 502, "<html>Bad Gateway</html>");

    let err = client(&api, &storage).get::<Value>("/api/tasks").await.unwrap_err();

    assert_eq!(err.status(), 502);
    assert_eq!(err.message(), FALLBACK_MESSAGE);
}

#[tokio::test]
async fn test_unparsable_success_body_is_a_transport_error() {
    let api = FakeApi::start();
    let storage = Arc::new(MemoryStorage::new());
    api.fail_next("GET", "/api/tasks", 200, "ok");

    let err = client(&api, &storage).get::<Value>("/api/tasks").await.unwrap_err();

    assert!(matches!(err, ApiError::Transport { .. }));
    assert_eq!(err.status(), 500);
}

#[tokio::test]
async fn test_unreachable_server_is_a_transport_error() {
    let storage: Arc<dyn Storage> = Arc::new(MemoryStorage::new());
    let http = HttpClient::new("http://127.0.0.1:1", storage);

    let err = http.get::<Value>("/api/tasks").await.unwrap_err();

    assert!(matches!(err, ApiError::Transport { .. }));
    assert_eq!(err.status(), 500);
    assert!(!err.message().is_empty());
}

#[tokio::test]
async fn test_unauthorized_fires_listeners_once_per_response() {
    let api = FakeApi::start();
    let storage = Arc::new(MemoryStorage::new());
    let http = client(&api, &storage);
    let listener = Arc::new(CountingListener::default());
    http.subscribe(Arc::clone(&listener) as Arc<dyn UnauthorizedListener>);

    let err = http.get::<Value>("/api/tasks").await.unwrap_err();
    assert!(err.is_unauthorized());
    assert_eq!(listener.calls.load(Ordering::SeqCst), 1);

    api.fail_next("GET", "/api/tasks", 403, r#"{"message": "Forbidden"}"#);
    storage.set(TOKEN_KEY, "whatever").unwrap();
    let err = http.get::<Value>("/api/tasks").await.unwrap_err();
    assert_eq!(err.status(), 403);
    assert_eq!(listener.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_auth_endpoints() {
    let api = FakeApi::start();
    let storage = Arc::new(MemoryStorage::new());
    let auth = AuthApi::new(client(&api, &storage));

    let response = auth.login(&Credentials::new("a@b.com", "x")).await.unwrap();
    assert_eq!(response.access_token, "t1");
    assert_eq!(response.user.id, "u1");
    let request = api.last_request();
    assert_eq!((request.method.as_str(), request.path.as_str()), ("POST", "/api/auth/login"));
    assert_eq!(request.body, Some(json!({ "email": "a@b.com", "password": "x" })));

    let registration = Registration {
        email: "new@b.com".to_string(),
        password: "pw".to_string(),
        username: "new".to_string(),
    };
    let response = auth.register(&registration).await.unwrap();
    assert_eq!(response.user.username, "new");
    assert_eq!(api.last_request().path, "/api/users");

    auth.request_password_reset("a@b.com").await.unwrap();
    assert_eq!(api.last_request().body, Some(json!({ "email": "a@b.com" })));

    auth.reset_password("reset-ok", "new-pw").await.unwrap();
    let request = api.last_request();
    assert_eq!(request.path, "/api/auth/reset-password/reset-ok");
    assert_eq!(request.body, Some(json!({ "password": "new-pw" })));
}

#[tokio::test]
async fn test_task_endpoints() {
    let api = FakeApi::start();
    api.issue_token("t1");
    api.seed_task("a", "Seeded", "pending");
    let storage = Arc::new(MemoryStorage::with_entries([(TOKEN_KEY, "t1")]));
    let tasks = TasksApi::new(client(&api, &storage));

    let task = tasks.get_task("a").await.unwrap();
    assert_eq!(task.title, "Seeded");
    assert_eq!(api.last_request().path, "/api/tasks/a");

    let updated = tasks.update_task("a", &TaskUpdate::status(TaskStatus::Completed)).await.unwrap();
    assert_eq!(updated.status, TaskStatus::Completed);
    let request = api.last_request();
    assert_eq!(request.method, "PUT");
    assert_eq!(request.body, Some(json!({ "status": "completed" })));

    tasks.delete_task("a").await.unwrap();
    assert_eq!(api.last_request().method, "DELETE");
    assert_eq!(api.task_count(), 0);

    let err = tasks.get_task("a").await.unwrap_err();
    assert_eq!(err.status(), 404);
}
