#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex, Once};
use std::time::Duration;

use anyhow::{Context, Result};
use axum::extract::{Multipart, Request, State};
use axum::http::{header, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use tower_http::trace::TraceLayer;

use carenest_client::config::AppConfig;
use carenest_client::session::MemoryStore;
use carenest_client::AppContext;

pub const PASSWORD: &str = "correct-horse";
pub const ADMIN_ID: &str = "A100";
pub const EMPLOYEE_ID: &str = "E200";
pub const GUEST_ID: &str = "G300";
pub const LOWERCASE_ADMIN_ID: &str = "a400";

static TRACING: Once = Once::new();

fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_test_writer()
            .try_init();
    });
}

/// Recorded traffic and canned responses shared with the handlers.
#[derive(Default)]
pub struct MockState {
    hits: Mutex<HashMap<String, usize>>,
    bodies: Mutex<HashMap<String, Vec<Value>>>,
    overrides: Mutex<HashMap<String, (StatusCode, Value)>>,
    delays: Mutex<HashMap<String, Duration>>,
}

impl MockState {
    /// Number of requests that reached `path` (relative to `/api/`).
    pub fn hits(&self, path: &str) -> usize {
        self.hits.lock().unwrap().get(path).copied().unwrap_or(0)
    }

    pub fn total_hits(&self) -> usize {
        self.hits.lock().unwrap().values().sum()
    }

    /// Bodies received on `path`, multipart forms flattened into JSON objects.
    pub fn bodies(&self, path: &str) -> Vec<Value> {
        self.bodies.lock().unwrap().get(path).cloned().unwrap_or_default()
    }

    /// Answer `path` with a fixed status and body from now on.
    pub fn respond_with(&self, path: &str, status: StatusCode, body: Value) {
        self.overrides
            .lock()
            .unwrap()
            .insert(path.to_string(), (status, body));
    }

    /// Hold responses on `path` for `delay`.
    pub fn delay(&self, path: &str, delay: Duration) {
        self.delays.lock().unwrap().insert(path.to_string(), delay);
    }

    fn record_body(&self, path: &str, body: Value) {
        self.bodies
            .lock()
            .unwrap()
            .entry(path.to_string())
            .or_default()
            .push(body);
    }
}

pub struct MockApi {
    pub base_url: String,
    pub state: Arc<MockState>,
    server: tokio::task::JoinHandle<()>,
}

impl Drop for MockApi {
    fn drop(&mut self) {
        self.server.abort();
    }
}

impl MockApi {
    /// Fresh context with an empty in-memory session store.
    pub fn context(&self) -> Result<AppContext> {
        let config = AppConfig::for_base_url(&self.base_url);
        Ok(AppContext::new(config, Arc::new(MemoryStore::new()))?)
    }

    /// Context already signed in as `identifier`.
    pub async fn signed_in(&self, identifier: &str) -> Result<AppContext> {
        let ctx = self.context()?;
        ctx.session
            .sign_in(&ctx.client, identifier, PASSWORD)
            .await
            .with_context(|| format!("sign in as {}", identifier))?;
        Ok(ctx)
    }
}

/// Start a mock CareNest API on a free port.
pub async fn spawn() -> Result<MockApi> {
    init_tracing();

    let port = portpicker::pick_unused_port().context("failed to pick free port")?;
    let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
        .await
        .context("failed to bind mock API")?;

    let state = Arc::new(MockState::default());
    let app = router(state.clone());
    let server = tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    Ok(MockApi {
        base_url: format!("http://127.0.0.1:{}/api", port),
        state,
        server,
    })
}

fn router(state: Arc<MockState>) -> Router {
    let api = Router::new()
        .route("/users/login", post(login))
        .route("/admin/getChildren", get(admin_children))
        .route("/users/add-child", post(multipart_create))
        .route("/users/child-log", post(json_create))
        .route("/admin/getEmployees", get(employees))
        .route("/admin/add-employee", post(multipart_create))
        .route("/users/getFile", post(get_file))
        .route("/admin/addNotice", post(json_create))
        .route("/users/notices", get(notices))
        .route("/users/latest-notice", get(latest_notice))
        .route("/users/food-log", post(multipart_create))
        .route("/admin/foodLogs", get(food_logs))
        .route("/admin/empAttendance", get(attendance))
        .route("/users/checkin", post(json_create))
        .route("/users/checkout", post(json_create))
        .layer(middleware::from_fn_with_state(state.clone(), gatekeeper))
        .with_state(state);

    Router::new()
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
}

/// Counts the hit, applies delays and overrides, then checks the bearer token.
async fn gatekeeper(State(state): State<Arc<MockState>>, req: Request, next: Next) -> Response {
    let path = req.uri().path().trim_start_matches("/api/").trim_start_matches('/').to_string();
    *state.hits.lock().unwrap().entry(path.clone()).or_default() += 1;

    let delay = state.delays.lock().unwrap().get(&path).copied();
    if let Some(delay) = delay {
        tokio::time::sleep(delay).await;
    }

    let canned = state.overrides.lock().unwrap().get(&path).cloned();
    if let Some((status, body)) = canned {
        return (status, Json(body)).into_response();
    }

    if path != "users/login" {
        let authorized = req
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.starts_with("Bearer token-"))
            .unwrap_or(false);
        if !authorized {
            return (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "success": false, "message": "Unauthorized" })),
            )
                .into_response();
        }
    }

    next.run(req).await
}

fn user_record(identifier: &str) -> Option<Value> {
    let user = match identifier {
        ADMIN_ID => json!({
            "_id": "u-admin",
            "name": "Asha Admin",
            "email": "asha@carenest.test",
            "role": "Admin",
            "uniqueIdNumber": ADMIN_ID,
            "phone_no": 9876543210u64,
            "orphanageLocation": "Main Location",
            "profileImage": "profiles/asha.jpg",
        }),
        EMPLOYEE_ID => json!({
            "_id": "u-emp",
            "name": "Eli Employee",
            "email": "eli@carenest.test",
            "role": "Employee",
            "uniqueIdNumber": EMPLOYEE_ID,
            "phone_no": "9123456780",
            "orphanageLocation": "2",
            "profileImage": "profiles/eli.jpg",
        }),
        GUEST_ID => json!({
            "_id": "u-guest",
            "name": "Gia Guest",
            "email": "gia@carenest.test",
            "role": "Volunteer",
        }),
        LOWERCASE_ADMIN_ID => json!({
            "_id": "u-lower",
            "name": "Lee Lowercase",
            "email": "lee@carenest.test",
            "role": "admin",
        }),
        _ => return None,
    };
    Some(user)
}

async fn login(Json(body): Json<Value>) -> Response {
    let identifier = body["uniqueIdNumber"].as_str().unwrap_or_default();
    let password = body["password"].as_str().unwrap_or_default();

    let Some(user) = user_record(identifier) else {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({ "success": false, "message": "User not found" })),
        )
            .into_response();
    };
    if password != PASSWORD {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "success": false, "message": "Password is incorrect!" })),
        )
            .into_response();
    }

    Json(json!({
        "success": true,
        "message": "Login successful",
        "data": {
            "user": user,
            "accessToken": format!("token-{}", identifier),
            "refreshToken": format!("refresh-{}", identifier),
        }
    }))
    .into_response()
}

fn children_fixture() -> Value {
    json!([
        {
            "_id": "c1",
            "name": "Ravi",
            "dob": "2015-06-01",
            "gender": "Male",
            "educationLevel": "Grade 5",
            "orphanageLocation": "2",
            "profileImage": "children/ravi.jpg",
        },
        {
            "_id": "c2",
            "name": "Meena",
            "dob": "12/03/2018",
            "gender": "Female",
            "educationLevel": "Grade 2",
            "orphanageLocation": "Main Location",
        },
        {
            "_id": "c3",
            "name": "Arjun",
            "dob": "2012-11-20T00:00:00.000Z",
            "gender": "Male",
            "educationLevel": "Grade 8",
            "disability": "Hearing",
            "orphanageLocation": "2",
            "profileImage": "broken/arjun.jpg",
        },
    ])
}

async fn admin_children() -> Json<Value> {
    Json(json!({ "success": true, "data": { "children": children_fixture() } }))
}

async fn employees() -> Json<Value> {
    Json(json!({
        "success": true,
        "employees": [
            {
                "_id": "e1",
                "uniqueIdNumber": EMPLOYEE_ID,
                "name": "Eli Employee",
                "email": "eli@carenest.test",
                "phone_no": 9123456780u64,
                "role": "Employee",
                "orphanageLocation": "2",
                "profileImage": "profiles/eli.jpg",
            },
            {
                "_id": "e2",
                "uniqueIdNumber": "E201",
                "name": "Nia Nurse",
                "email": "nia@carenest.test",
                "phone_no": null,
                "role": "Employee",
                "orphanageLocation": "3",
                "profileImage": null,
            },
        ]
    }))
}

/// Signs any object reference except those under `broken/`.
async fn get_file(Json(body): Json<Value>) -> Response {
    let object_url = body["objectUrl"].as_str().unwrap_or_default();
    if object_url.starts_with("broken/") {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({ "success": false, "message": "File not found" })),
        )
            .into_response();
    }
    Json(json!({
        "success": true,
        "signedUrl": format!("https://files.carenest.test/{}?sig=abc", object_url),
    }))
    .into_response()
}

fn notice_fixture() -> Value {
    json!([
        { "_id": "n1", "message": "Staff meeting at 5pm", "createdAt": "2026-10-15T09:00:00.000Z" },
        { "_id": "n2", "message": "Vaccination drive on Friday", "createdAt": "2026-10-10T09:00:00.000Z" },
    ])
}

async fn notices() -> Json<Value> {
    Json(json!({ "success": true, "data": notice_fixture() }))
}

/// A single object rather than a list.
async fn latest_notice() -> Json<Value> {
    Json(json!({ "success": true, "data": notice_fixture()[0].clone() }))
}

async fn food_logs() -> Json<Value> {
    Json(json!({
        "success": true,
        "data": [
            {
                "_id": "f1",
                "mealType": "Lunch",
                "foodPhoto": "food/f1.jpg",
                "servings": 0,
                "loggedBy": { "_id": "u-emp", "name": "Eli Employee", "email": "eli@carenest.test" },
                "orphanageLocation": "2",
                "timeLogged": "2026-10-16T07:30:00.000Z",
            },
            {
                "_id": "f2",
                "mealType": "Dinner",
                "foodPhoto": "food/f2.jpg",
                "servings": "12",
                "orphanageLocation": "Main Location",
                "timeLogged": "2026-10-15T14:00:00.000Z",
            },
        ]
    }))
}

async fn attendance() -> Json<Value> {
    let eli = json!({ "_id": "e1", "name": "Eli Employee", "email": "eli@carenest.test", "profileImage": "profiles/eli.jpg" });
    let nia = json!({ "_id": "e2", "name": "Nia Nurse", "email": "nia@carenest.test" });
    Json(json!({
        "success": true,
        "data": [
            { "_id": "a1", "employeeId": eli.clone(), "date": "2026-10-16T00:00:00.000Z",
              "checkInTime": "2026-10-16T03:25:00.000Z", "status": "On Time" },
            { "_id": "a2", "employeeId": eli, "date": "2026-10-15T00:00:00.000Z",
              "checkInTime": "2026-10-15T04:10:00.000Z", "checkOutTime": "2026-10-15T12:00:00.000Z", "status": "Late" },
            { "_id": "a3", "employeeId": nia, "date": "2026-10-16T00:00:00.000Z",
              "checkInTime": "2026-10-16T03:40:00.000Z", "status": "Late" },
        ]
    }))
}

async fn json_create(
    State(state): State<Arc<MockState>>,
    req: Request,
) -> Response {
    let path = req.uri().path().trim_start_matches('/').to_string();
    let bytes = match axum::body::to_bytes(req.into_body(), usize::MAX).await {
        Ok(bytes) => bytes,
        Err(_) => return StatusCode::BAD_REQUEST.into_response(),
    };
    let body: Value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    state.record_body(&path, body);
    Json(json!({ "success": true, "message": "ok" })).into_response()
}

async fn multipart_create(
    State(state): State<Arc<MockState>>,
    uri: axum::http::Uri,
    mut form: Multipart,
) -> Response {
    let path = uri.path().trim_start_matches('/').to_string();
    let mut fields = serde_json::Map::new();
    while let Ok(Some(field)) = form.next_field().await {
        let name = field.name().unwrap_or_default().to_string();
        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let Ok(bytes) = field.bytes().await else {
            return StatusCode::BAD_REQUEST.into_response();
        };
        let value = match file_name {
            Some(file_name) => json!({
                "file_name": file_name,
                "content_type": content_type,
                "size": bytes.len(),
            }),
            None => Value::String(String::from_utf8_lossy(&bytes).into_owned()),
        };
        fields.insert(name, value);
    }
    state.record_body(&path, Value::Object(fields));
    Json(json!({
        "success": true,
        "message": "created",
        "data": { "_id": uuid::Uuid::new_v4().to_string() }
    }))
    .into_response()
}
