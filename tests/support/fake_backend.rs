use axum::{
    extract::{Multipart, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};

/// How the fake answers `POST /search-endpoint`
#[derive(Debug, Clone)]
pub enum FakeReply {
    Json(Value),
    Status(StatusCode),
    Malformed,
}

/// One multipart part received by `POST /upload-image`
#[derive(Debug, Clone, PartialEq)]
pub struct ReceivedPart {
    pub field: String,
    pub file_name: String,
    pub content_type: String,
    pub size: usize,
}

struct FakeState {
    reply: FakeReply,
    searches: Mutex<Vec<Value>>,
    uploads: Mutex<Vec<ReceivedPart>>,
}

/// Retrieval backend double listening on an ephemeral localhost port
pub struct FakeBackend {
    pub base_url: String,
    state: Arc<FakeState>,
}

impl FakeBackend {
    /// JSON bodies received by the search endpoint, in order
    pub fn searches(&self) -> Vec<Value> {
        self.state.searches.lock().unwrap().clone()
    }

    pub fn uploads(&self) -> Vec<ReceivedPart> {
        self.state.uploads.lock().unwrap().clone()
    }
}

pub async fn spawn_fake_backend(reply: FakeReply) -> FakeBackend {
    let state = Arc::new(FakeState {
        reply,
        searches: Mutex::new(Vec::new()),
        uploads: Mutex::new(Vec::new()),
    });

    let app = Router::new()
        .route("/", get(health))
        .route("/search-endpoint", post(search))
        .route("/upload-image", post(upload))
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    FakeBackend {
        base_url: format!("http://{}", addr),
        state,
    }
}

/// URL of a port nothing is listening on
pub async fn unreachable_backend_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

async fn health() -> impl IntoResponse {
    Json(json!({ "message": "alive" }))
}

// Json extractor also enforces the application/json content type
async fn search(State(state): State<Arc<FakeState>>, Json(body): Json<Value>) -> Response {
    state.searches.lock().unwrap().push(body);

    match &state.reply {
        FakeReply::Json(value) => Json(value.clone()).into_response(),
        FakeReply::Status(status) => (*status).into_response(),
        FakeReply::Malformed => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "application/json")],
            "{\"retreived images\": [",
        )
            .into_response(),
    }
}

async fn upload(State(state): State<Arc<FakeState>>, mut multipart: Multipart) -> Response {
    let mut captions = serde_json::Map::new();

    while let Ok(Some(field)) = multipart.next_field().await {
        let name = field.name().unwrap_or_default().to_string();
        let file_name = field.file_name().unwrap_or_default().to_string();
        let content_type = field.content_type().unwrap_or_default().to_string();
        let size = field.bytes().await.map(|bytes| bytes.len()).unwrap_or(0);

        captions.insert(
            file_name.clone(),
            json!([format!("a photo named {}", file_name), "indexed"]),
        );
        state.uploads.lock().unwrap().push(ReceivedPart {
            field: name,
            file_name,
            content_type,
            size,
        });
    }

    Json(Value::Object(captions)).into_response()
}
