//! In-process mock of the reqres and GoRest user APIs.
//!
//! Binds to `127.0.0.1:0` and records every request it sees so tests can
//! assert on what reached the wire.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde_json::{json, Value};

use restprobe_e2e::fixtures::UserSource;
use restprobe_e2e::{ApiClient, UserFlow};
use restprobe_common::{Gender, UserPayload, UserStatus};

pub const TOKEN: &str = "test-token-123";

/// A request as the mock saw it
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub authorization: Option<String>,
}

/// Knobs and bookkeeping for the mock GoRest collection
#[derive(Debug, Default)]
pub struct GorestState {
    pub next_id: i64,
    pub users: HashMap<i64, Value>,
    pub requests: Vec<Recorded>,
    /// Status to return from every create instead of 201
    pub fail_create: Option<u16>,
    /// Id to echo from updates instead of the path id
    pub echo_id: Option<i64>,
    /// Status to return from deletes of existing users instead of 204
    pub delete_status: Option<u16>,
}

impl GorestState {
    pub fn count(&self, method: &str) -> usize {
        self.requests.iter().filter(|r| r.method == method).count()
    }
}

/// Knobs for the mock reqres API
#[derive(Debug, Default)]
pub struct ReqresState {
    /// Leave this email out of the page-two list
    pub drop_email: Option<String>,
    /// Serve unknown user ids with this status instead of 404
    pub missing_user_status: Option<u16>,
}

pub type Shared<T> = Arc<Mutex<T>>;

pub struct MockServer {
    pub base_url: String,
    pub gorest: Shared<GorestState>,
    pub reqres: Shared<ReqresState>,
}

impl MockServer {
    pub async fn start() -> Self {
        let gorest = Arc::new(Mutex::new(GorestState {
            next_id: 7_000_001,
            ..Default::default()
        }));
        let reqres = Arc::new(Mutex::new(ReqresState::default()));

        let gorest_routes = Router::new()
            .route("/public/v2/users", post(create_user))
            .route("/public/v2/users/:id", put(update_user).delete(delete_user))
            .with_state(gorest.clone());

        let reqres_routes = Router::new()
            .route("/api/users", get(list_users).post(create_job))
            .route("/api/users/:id", get(single_user))
            .with_state(reqres.clone());

        let app = Router::new()
            .merge(gorest_routes)
            .merge(reqres_routes)
            .route("/slow", get(slow));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock server");
        let addr = listener.local_addr().expect("mock server addr");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("mock server");
        });

        Self {
            base_url: format!("http://{addr}"),
            gorest,
            reqres,
        }
    }

    pub fn client(&self) -> ApiClient {
        ApiClient::new(&self.base_url, Duration::from_secs(5)).expect("client")
    }

    /// A flow with the valid token and a fixed payload source
    pub fn flow(&self) -> UserFlow {
        self.flow_with_token(Some(TOKEN))
    }

    pub fn flow_with_token(&self, token: Option<&str>) -> UserFlow {
        UserFlow::with_client(self.client(), token.map(str::to_string)).with_users(NumberedUsers(0))
    }

    pub fn gorest(&self) -> std::sync::MutexGuard<'_, GorestState> {
        self.gorest.lock().expect("gorest state")
    }
}

/// Deterministic payloads: user-1, user-2, ...
pub struct NumberedUsers(pub u32);

impl UserSource for NumberedUsers {
    fn next_user(&mut self) -> UserPayload {
        self.0 += 1;
        UserPayload::new(
            format!("User {}", self.0),
            Gender::Male,
            format!("user-{}@mock.test", self.0),
            UserStatus::Active,
        )
    }
}

fn record(state: &mut GorestState, method: &Method, uri: &Uri, headers: &HeaderMap) -> bool {
    let authorization = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let authorized = authorization.as_deref() == Some(&format!("Bearer {TOKEN}"));
    state.requests.push(Recorded {
        method: method.to_string(),
        path: uri.path().to_string(),
        authorization,
    });
    authorized
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({"message": "Authentication failed"})),
    )
        .into_response()
}

fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({"message": "Resource not found"})),
    )
        .into_response()
}

fn with_id(id: i64, mut body: Value) -> Value {
    if let Some(obj) = body.as_object_mut() {
        obj.insert("id".to_string(), json!(id));
    }
    body
}

async fn create_user(
    State(state): State<Shared<GorestState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let mut state = state.lock().expect("gorest state");
    if !record(&mut state, &method, &uri, &headers) {
        return unauthorized();
    }
    if let Some(code) = state.fail_create {
        let status = StatusCode::from_u16(code).unwrap_or(StatusCode::UNPROCESSABLE_ENTITY);
        return (
            status,
            Json(json!([{"field": "email", "message": "has already been taken"}])),
        )
            .into_response();
    }

    let id = state.next_id;
    state.next_id += 1;
    let user = with_id(id, body);
    state.users.insert(id, user.clone());
    (StatusCode::CREATED, Json(user)).into_response()
}

async fn update_user(
    State(state): State<Shared<GorestState>>,
    Path(id): Path<i64>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let mut state = state.lock().expect("gorest state");
    if !record(&mut state, &method, &uri, &headers) {
        return unauthorized();
    }
    if !state.users.contains_key(&id) {
        return not_found();
    }

    let user = with_id(id, body);
    state.users.insert(id, user.clone());
    let echoed = with_id(state.echo_id.unwrap_or(id), user);
    (StatusCode::OK, Json(echoed)).into_response()
}

async fn delete_user(
    State(state): State<Shared<GorestState>>,
    Path(id): Path<i64>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    let mut state = state.lock().expect("gorest state");
    if !record(&mut state, &method, &uri, &headers) {
        return unauthorized();
    }
    if state.users.remove(&id).is_none() {
        return not_found();
    }
    match state.delete_status {
        Some(code) => (
            StatusCode::from_u16(code).unwrap_or(StatusCode::OK),
            Json(json!({"deleted": id})),
        )
            .into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    }
}

fn reqres_user(id: i64, first: &str, last: &str) -> Value {
    json!({
        "id": id,
        "email": format!("{}.{}@reqres.in", first.to_lowercase(), last.to_lowercase()),
        "first_name": first,
        "last_name": last,
        "avatar": format!("https://reqres.in/img/faces/{id}-image.jpg"),
    })
}

async fn list_users(
    State(state): State<Shared<ReqresState>>,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    let page: u32 = query.get("page").and_then(|p| p.parse().ok()).unwrap_or(1);
    let drop_email = state.lock().expect("reqres state").drop_email.clone();

    let data: Vec<Value> = if page == 2 {
        vec![
            reqres_user(7, "Michael", "Lawson"),
            reqres_user(8, "Lindsay", "Ferguson"),
            reqres_user(9, "Tobias", "Funke"),
        ]
    } else {
        vec![reqres_user(1, "George", "Bluth"), reqres_user(2, "Janet", "Weaver")]
    }
    .into_iter()
    .filter(|u| Some(u["email"].as_str().unwrap_or_default()) != drop_email.as_deref())
    .collect();

    Json(json!({
        "page": page,
        "per_page": 6,
        "total": 12,
        "total_pages": 2,
        "data": data,
    }))
    .into_response()
}

async fn single_user(
    State(state): State<Shared<ReqresState>>,
    Path(id): Path<i64>,
) -> Response {
    let missing_status = state.lock().expect("reqres state").missing_user_status;
    match id {
        2 => Json(json!({"data": reqres_user(2, "Janet", "Weaver")})).into_response(),
        _ => {
            let status = missing_status
                .and_then(|code| StatusCode::from_u16(code).ok())
                .unwrap_or(StatusCode::NOT_FOUND);
            (status, Json(json!({}))).into_response()
        }
    }
}

async fn create_job(Json(body): Json<Value>) -> Response {
    let mut created = body;
    if let Some(obj) = created.as_object_mut() {
        obj.insert("id".to_string(), json!("512"));
        obj.insert("createdAt".to_string(), json!("2024-05-01T10:00:00.000Z"));
    }
    (StatusCode::CREATED, Json(created)).into_response()
}

async fn slow() -> &'static str {
    tokio::time::sleep(Duration::from_secs(3)).await;
    "late"
}
