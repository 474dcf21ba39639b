#![allow(dead_code)]

use axum::{
    Form, Json, Router,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, patch, post},
};
use crm_sync::Config;
use figment::{Figment, providers::Serialized};
use serde_json::{Value, json};
use std::{
    collections::HashMap,
    io,
    path::PathBuf,
    sync::{Arc, Mutex},
    time::{SystemTime, UNIX_EPOCH},
};
use tokio::net::TcpListener;
use url::Url;

pub const ACCESS_TOKEN: &str = "00Dtest!AQ0AQ.mock-token";

/// One PATCH received by the mock CRM.
#[derive(Debug, Clone)]
pub struct ReceivedPatch {
    pub id: String,
    pub body: Value,
    pub authorization: Option<String>,
}

/// Scripted behaviour and recorded traffic of the mock CRM.
pub struct MockState {
    pub token_response: Mutex<(StatusCode, String)>,
    pub token_forms: Mutex<Vec<HashMap<String, String>>>,
    pub contacts: Mutex<Value>,
    pub contacts_status: Mutex<StatusCode>,
    /// Raw listing body served instead of `contacts` when set.
    pub contacts_raw: Mutex<Option<String>>,
    pub photos_status: Mutex<StatusCode>,
    pub photos: Mutex<HashMap<String, Value>>,
    pub photo_queries: Mutex<Vec<String>>,
    pub patch_responses: Mutex<HashMap<String, (StatusCode, String)>>,
    pub patches: Mutex<Vec<ReceivedPatch>>,
}

impl Default for MockState {
    fn default() -> Self {
        Self {
            token_response: Mutex::new((
                StatusCode::OK,
                json!({
                    "access_token": ACCESS_TOKEN,
                    "instance_url": "https://eu9.salesforce.com",
                    "id": "https://login.salesforce.com/id/00D/005",
                    "token_type": "Bearer",
                    "issued_at": "1531132478000",
                    "signature": "c2lnbmF0dXJl"
                })
                .to_string(),
            )),
            token_forms: Mutex::new(Vec::new()),
            contacts: Mutex::new(envelope(vec![])),
            contacts_status: Mutex::new(StatusCode::OK),
            contacts_raw: Mutex::new(None),
            photos_status: Mutex::new(StatusCode::OK),
            photos: Mutex::new(HashMap::new()),
            photo_queries: Mutex::new(Vec::new()),
            patch_responses: Mutex::new(HashMap::new()),
            patches: Mutex::new(Vec::new()),
        }
    }
}

pub struct MockCrm {
    pub base: Url,
    pub state: Arc<MockState>,
}

impl MockCrm {
    pub async fn start() -> Self {
        let state = Arc::new(MockState::default());
        let app = Router::new()
            .route("/services/oauth2/token", post(token))
            .route("/services/data/v40.0/query/", get(query))
            .route("/services/data/v40.0/sobjects/Contact/{id}", patch(update))
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind mock CRM");
        let addr = listener.local_addr().expect("mock CRM address");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("mock CRM stopped");
        });

        Self {
            base: Url::parse(&format!("http://{addr}")).expect("mock base url"),
            state,
        }
    }

    pub fn set_token_response(&self, status: StatusCode, body: impl Into<String>) {
        *self.state.token_response.lock().unwrap() = (status, body.into());
    }

    pub fn set_contacts(&self, records: Vec<Value>) {
        *self.state.contacts.lock().unwrap() = envelope(records);
    }

    pub fn set_contacts_status(&self, status: StatusCode) {
        *self.state.contacts_status.lock().unwrap() = status;
    }

    pub fn set_contacts_raw(&self, body: impl Into<String>) {
        *self.state.contacts_raw.lock().unwrap() = Some(body.into());
    }

    pub fn set_photos_status(&self, status: StatusCode) {
        *self.state.photos_status.lock().unwrap() = status;
    }

    pub fn set_photos(&self, email: &str, photos: Vec<Option<&str>>) {
        let records = photos
            .into_iter()
            .map(|p| json!({"attributes": {"type": "Contact", "url": "/x"}, "Photos2__c": p}))
            .collect();
        self.state
            .photos
            .lock()
            .unwrap()
            .insert(email.to_string(), envelope(records));
    }

    pub fn set_patch_response(&self, id: &str, status: StatusCode, body: impl Into<String>) {
        self.state
            .patch_responses
            .lock()
            .unwrap()
            .insert(id.to_string(), (status, body.into()));
    }

    pub fn patches(&self) -> Vec<ReceivedPatch> {
        self.state.patches.lock().unwrap().clone()
    }

    pub fn token_forms(&self) -> Vec<HashMap<String, String>> {
        self.state.token_forms.lock().unwrap().clone()
    }

    pub fn photo_queries(&self) -> Vec<String> {
        self.state.photo_queries.lock().unwrap().clone()
    }

    /// Settings pointing both the identity provider and the instance here.
    pub fn figment(&self) -> Figment {
        Figment::new()
            .merge(Serialized::default("clientid", "cid"))
            .merge(Serialized::default("clientsecret", "csecret"))
            .merge(Serialized::default("username", "integration@enterprise.io"))
            .merge(Serialized::default("password", "hunter2"))
            .merge(Serialized::default("securitytoken", "SEC0042"))
            .merge(Serialized::default(
                "sf_token_url",
                self.base.join("/services/oauth2/token").unwrap().to_string(),
            ))
            .merge(Serialized::default("sf_instance_url", self.base.to_string()))
    }

    pub fn config(&self) -> Config {
        Config::from_figment(self.figment()).expect("mock config")
    }
}

pub fn envelope(records: Vec<Value>) -> Value {
    json!({
        "totalSize": records.len(),
        "done": true,
        "records": records,
    })
}

pub fn contact(id: &str, email: Option<&str>, name: &str) -> Value {
    json!({
        "attributes": {
            "type": "Contact",
            "url": format!("/services/data/v40.0/sobjects/Contact/{id}")
        },
        "Email": email,
        "Name": name,
    })
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == format!("Bearer {ACCESS_TOKEN}"))
}

async fn token(
    State(state): State<Arc<MockState>>,
    Form(form): Form<HashMap<String, String>>,
) -> Response {
    state.token_forms.lock().unwrap().push(form);
    let (status, body) = state.token_response.lock().unwrap().clone();
    (status, [("content-type", "application/json")], body).into_response()
}

async fn query(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    if !authorized(&headers) {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!([{"message": "Session expired or invalid", "errorCode": "INVALID_SESSION_ID"}])),
        )
            .into_response();
    }
    let soql = params.get("q").cloned().unwrap_or_default();

    if soql.starts_with("SELECT Photos2__c") {
        state.photo_queries.lock().unwrap().push(soql.clone());
        let status = *state.photos_status.lock().unwrap();
        if !status.is_success() {
            return (status, "query timed out").into_response();
        }
        let email = soql
            .split("Email = '")
            .nth(1)
            .and_then(|rest| rest.strip_suffix('\''))
            .unwrap_or_default();
        let page = state
            .photos
            .lock()
            .unwrap()
            .get(email)
            .cloned()
            .unwrap_or_else(|| envelope(vec![]));
        return Json(page).into_response();
    }

    let status = *state.contacts_status.lock().unwrap();
    if !status.is_success() {
        return (status, "upstream unavailable").into_response();
    }
    if let Some(raw) = state.contacts_raw.lock().unwrap().clone() {
        return (StatusCode::OK, [("content-type", "application/json")], raw).into_response();
    }
    Json(state.contacts.lock().unwrap().clone()).into_response()
}

async fn update(
    State(state): State<Arc<MockState>>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    state.patches.lock().unwrap().push(ReceivedPatch {
        id: id.clone(),
        body,
        authorization: headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
    });
    match state.patch_responses.lock().unwrap().get(&id).cloned() {
        Some((status, body)) => (status, body).into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    }
}

/// In-memory sink for formatted log lines.
#[derive(Clone, Default)]
pub struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl LogBuffer {
    pub fn lines(&self) -> Vec<String> {
        String::from_utf8_lossy(&self.0.lock().unwrap())
            .lines()
            .map(str::to_string)
            .collect()
    }
}

/// Route INFO and above of the current thread into a buffer.
pub fn capture_logs() -> (tracing::subscriber::DefaultGuard, LogBuffer) {
    let buffer = LogBuffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::INFO)
        .finish();
    (tracing::subscriber::set_default(subscriber), buffer)
}

/// Unique path for a throwaway SQLite store.
pub fn temp_sqlite_path(tag: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system time before UNIX_EPOCH")
        .as_nanos();
    let mut path = std::env::temp_dir();
    path.push(format!(
        "crm-sync-{tag}-{}-{}.sqlite",
        std::process::id(),
        nanos
    ));
    path
}

pub fn sqlite_url(path: &std::path::Path) -> String {
    format!("sqlite:{}?mode=rwc", path.display())
}

/// Create the upload table and insert the given `guid`s.
pub async fn seed_uploads(database_url: &str, guids: &[&str]) {
    use sqlx::{AnyConnection, Connection};

    sqlx::any::install_default_drivers();
    let mut conn = AnyConnection::connect(database_url)
        .await
        .expect("open seed connection");
    sqlx::query(crm_sync::db::UPLOADS_INIT)
        .execute(&mut conn)
        .await
        .expect("create upload table");
    for guid in guids {
        sqlx::query("INSERT INTO badges_posts (guid) VALUES (?)")
            .bind(guid.to_string())
            .execute(&mut conn)
            .await
            .expect("insert upload");
    }
    conn.close().await.expect("close seed connection");
}
