//! In-process fake of the remote task API
//!
//! A `tiny_http` server on an ephemeral port, run on a background thread.
//! It implements the endpoints the client consumes, records every request,
//! and can be told to fail the next call to a given endpoint.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

use serde_json::{Value, json};
use tiny_http::{Header, Method, Request, Response, Server, StatusCode};

/// A request as seen by the fake server
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub body: Option<Value>,
}

#[derive(Debug, Default)]
struct State {
    users: Vec<(Value, String)>,
    tasks: Vec<Value>,
    tokens: HashMap<String, String>,
    revoked: HashSet<String>,
    next_id: u32,
    requests: Vec<Recorded>,
    failures: HashMap<(String, String), (u16, String)>,
}

/// Handle to a running fake API; stops the server on drop
pub struct FakeApi {
    url: String,
    state: Arc<Mutex<State>>,
    server: Arc<Server>,
    thread: Option<JoinHandle<()>>,
}

impl FakeApi {
    /// Start a server with one known user (`a@b.com` / `x`, id `u1`)
    pub fn start() -> Self {
        let server = Arc::new(Server::http("127.0.0.1:0").expect("failed to bind fake api"));
        let addr = server.server_addr().to_ip().expect("fake api has no ip address");
        let state = Arc::new(Mutex::new(State {
            next_id: 1,
            ..State::default()
        }));
        state.lock().unwrap().users.push((
            json!({ "id": "u1", "email": "a@b.com", "username": "a" }),
            "x".to_string(),
        ));

        let thread = {
            let server = Arc::clone(&server);
            let state = Arc::clone(&state);
            std::thread::spawn(move || {
                for request in server.incoming_requests() {
                    handle(request, &state);
                }
            })
        };

        Self {
            url: format!("http://{addr}"),
            state,
            server,
            thread: Some(thread),
        }
    }

    /// Base URL to point the client at
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Issue a valid token for the seeded user without going through login
    pub fn issue_token(&self, token: &str) {
        self.state.lock().unwrap().tokens.insert(token.to_string(), "u1".to_string());
    }

    /// Add a task owned by the seeded user
    pub fn seed_task(&self, id: &str, title: &str, status: &str) {
        self.state.lock().unwrap().tasks.push(json!({
            "_id": id,
            "titulo": title,
            "descricao": "",
            "status": status,
            "data_vencimento": "2025-01-01 00:00:00",
            "user_id": "u1",
        }));
    }

    /// Make the next `method path` request answer with `status` and `body`
    pub fn fail_next(&self, method: &str, path: &str, status: u16, body: &str) {
        self.state
            .lock()
            .unwrap()
            .failures
            .insert((method.to_string(), path.to_string()), (status, body.to_string()));
    }

    /// Every request received so far
    pub fn requests(&self) -> Vec<Recorded> {
        self.state.lock().unwrap().requests.clone()
    }

    /// The last request received
    pub fn last_request(&self) -> Recorded {
        self.requests().pop().expect("no request recorded")
    }

    /// Server-side copy of a task
    pub fn task(&self, id: &str) -> Option<Value> {
        self.state.lock().unwrap().tasks.iter().find(|t| t["_id"] == id).cloned()
    }

    /// Number of tasks held by the server
    pub fn task_count(&self) -> usize {
        self.state.lock().unwrap().tasks.len()
    }
}

impl Drop for FakeApi {
    fn drop(&mut self) {
        self.server.unblock();
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

fn header(request: &Request, name: &'static str) -> Option<String> {
    request
        .headers()
        .iter()
        .find(|h| h.field.equiv(name))
        .map(|h| h.value.as_str().to_string())
}

fn handle(mut request: Request, state: &Mutex<State>) {
    let method = request.method().as_str().to_string();
    let path = request.url().to_string();
    let authorization = header(&request, "Authorization");
    let content_type = header(&request, "Content-Type");

    let mut raw = String::new();
    let _ = request.as_reader().read_to_string(&mut raw);
    let body = serde_json::from_str::<Value>(&raw).ok();

    let (status, payload) = {
        let mut state = state.lock().unwrap();
        state.requests.push(Recorded {
            method: method.clone(),
            path: path.clone(),
            authorization: authorization.clone(),
            content_type,
            body: body.clone(),
        });
        match state.failures.remove(&(method.clone(), path.clone())) {
            Some((status, payload)) => (status, payload),
            None => route(&mut state, request.method(), &path, authorization.as_deref(), body),
        }
    };

    let response = Response::from_string(payload)
        .with_status_code(StatusCode(status))
        .with_header(Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..]).unwrap());
    let _ = request.respond(response);
}

fn message(status: u16, text: &str) -> (u16, String) {
    (status, json!({ "message": text }).to_string())
}

fn ok(status: u16, value: &Value) -> (u16, String) {
    (status, value.to_string())
}

fn route(
    state: &mut State,
    method: &Method,
    path: &str,
    authorization: Option<&str>,
    body: Option<Value>,
) -> (u16, String) {
    let body = body.unwrap_or(Value::Null);

    match (method, path) {
        (Method::Post, "/api/auth/login") => login(state, &body),
        (Method::Post, "/api/users") => register(state, &body),
        (Method::Post, "/api/auth/reset-password") => {
            let email = body["email"].as_str().unwrap_or_default();
            if state.users.iter().any(|(u, _)| u["email"] == email) {
                message(200, "Email de recuperação enviado")
            } else {
                message(404, "Usuário não encontrado")
            }
        },
        (Method::Post, _) if path.starts_with("/api/auth/reset-password/") => {
            if path.ends_with("/reset-ok") && body["password"].is_string() {
                message(200, "Senha alterada com sucesso")
            } else {
                message(400, "Token inválido ou expirado")
            }
        },
        _ => {
            let Some(token) = bearer(state, authorization) else {
                return (401, json!({ "msg": "Missing Authorization Header" }).to_string());
            };
            authed(state, method, path, &token, &body)
        },
    }
}

fn bearer(state: &State, authorization: Option<&str>) -> Option<String> {
    let token = authorization?.strip_prefix("Bearer ")?;
    (state.tokens.contains_key(token) && !state.revoked.contains(token)).then(|| token.to_string())
}

fn login(state: &mut State, body: &Value) -> (u16, String) {
    let (Some(email), Some(password)) = (body["email"].as_str(), body["password"].as_str()) else {
        return message(400, "Email e senha são obrigatórios");
    };
    let Some((user, _)) = state.users.iter().find(|(u, p)| u["email"] == email && p == password)
    else {
        return message(401, "Email ou senha inválidos");
    };
    let user = user.clone();
    let token = format!("t{}", state.tokens.len() + 1);
    state.tokens.insert(token.clone(), user["id"].as_str().unwrap_or_default().to_string());
    ok(200, &json!({ "access_token": token, "user": user }))
}

fn register(state: &mut State, body: &Value) -> (u16, String) {
    let (Some(email), Some(password), Some(username)) =
        (body["email"].as_str(), body["password"].as_str(), body["username"].as_str())
    else {
        return message(400, "Campos obrigatórios ausentes");
    };
    if state.users.iter().any(|(u, _)| u["email"] == email) {
        return message(409, "Email já cadastrado");
    }
    let id = format!("u{}", state.users.len() + 1);
    let user = json!({ "id": id, "email": email, "username": username });
    state.users.push((user.clone(), password.to_string()));
    let token = format!("t{}", state.tokens.len() + 1);
    state.tokens.insert(token.clone(), id);
    ok(201, &json!({ "access_token": token, "user": user }))
}

fn authed(
    state: &mut State,
    method: &Method,
    path: &str,
    token: &str,
    body: &Value,
) -> (u16, String) {
    let id = path.strip_prefix("/api/tasks/").map(str::to_string);

    match (method, path, id) {
        (Method::Post, "/api/auth/logout", _) => {
            state.revoked.insert(token.to_string());
            message(200, "Logout realizado com sucesso")
        },
        (Method::Get, "/api/tasks", _) => ok(200, &Value::Array(state.tasks.clone())),
        (Method::Post, "/api/tasks", _) => {
            let Some(title) = body["titulo"].as_str() else {
                return message(400, "Erro ao criar tarefa: titulo é obrigatório");
            };
            let task = json!({
                "_id": format!("task-{}", state.next_id),
                "titulo": title,
                "descricao": body["descricao"].as_str().unwrap_or_default(),
                "status": body["status"].as_str().unwrap_or("pending"),
                "data_vencimento": body["data_vencimento"].as_str().unwrap_or_default(),
                "user_id": state.tokens.get(token).cloned(),
            });
            state.next_id += 1;
            state.tasks.push(task.clone());
            ok(201, &task)
        },
        (Method::Get, _, Some(id)) => match state.tasks.iter().find(|t| t["_id"] == id.as_str()) {
            Some(task) => ok(200, task),
            None => message(404, "Tarefa não encontrada"),
        },
        (Method::Put, _, Some(id)) => {
            let Some(task) = state.tasks.iter_mut().find(|t| t["_id"] == id.as_str()) else {
                return message(404, "Tarefa não encontrada");
            };
            if let Some(patch) = body.as_object() {
                for (key, value) in patch {
                    task[key.as_str()] = value.clone();
                }
            }
            ok(200, task)
        },
        (Method::Delete, _, Some(id)) => {
            let before = state.tasks.len();
            state.tasks.retain(|t| t["_id"] != id.as_str());
            if state.tasks.len() < before {
                message(200, "Tarefa excluída com sucesso")
            } else {
                message(404, "Tarefa não encontrada")
            }
        },
        _ => message(404, "Not found"),
    }
}
