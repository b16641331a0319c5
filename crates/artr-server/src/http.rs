//! HTTP surface.
//!
//! - `GET /` streams the rendered page.
//! - `POST /api/transform` runs one transform against the current module
//!   snapshot.
//! - `GET /api/module` reports the module lifecycle state.

use std::{convert::Infallible, sync::Arc};

use artr_app::{App, AppEvent};
use artr_core::{Direction, ModuleSnapshot, ModuleState, TransformResult, invoke};
use axum::{
    Json, Router,
    body::Body,
    extract::State,
    http::header,
    response::IntoResponse,
    routing::{get, post},
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tokio::sync::{mpsc, watch};
use tokio_stream::{StreamExt, wrappers::ReceiverStream};
use tower_http::trace::TraceLayer;

use crate::{ChannelTransport, RenderOptions, StreamingRenderer};

/// Body chunks buffered between the render task and the client.
const BODY_CHANNEL_CAPACITY: usize = 8;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    modules: watch::Receiver<ModuleSnapshot>,
    renderer: Arc<StreamingRenderer>,
}

impl AppState {
    /// State reading lifecycle snapshots from `modules`.
    pub fn new(modules: watch::Receiver<ModuleSnapshot>, options: RenderOptions) -> Self {
        Self { modules, renderer: Arc::new(StreamingRenderer::new(options)) }
    }

    fn snapshot(&self) -> ModuleSnapshot {
        self.modules.borrow().clone()
    }
}

/// Request body for `POST /api/transform`.
#[derive(Debug, Clone, Deserialize)]
pub struct TransformRequest {
    /// Requested direction.
    pub direction: Direction,
    /// Input text.
    pub text: String,
}

/// Response body for `GET /api/module`.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ModuleStatus {
    /// Current lifecycle state.
    pub state: ModuleState,
}

/// Build the router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api/transform", post(transform))
        .route("/api/module", get(module_status))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// GET /
///
/// The page renders in its own task; chunks reach the client as each flush
/// point completes.
async fn index(State(state): State<AppState>) -> impl IntoResponse {
    let mut app = App::new();
    let _ = app.handle(AppEvent::ModuleUpdated(state.snapshot()));

    let (sender, receiver) = mpsc::channel::<Bytes>(BODY_CHANNEL_CAPACITY);
    let renderer = Arc::clone(&state.renderer);
    tokio::spawn(async move {
        let mut transport = ChannelTransport::new(sender);
        if let Err(err) = renderer.render(&app, &mut transport).await {
            tracing::warn!(error = %err, "page render aborted");
        }
    });

    let stream = ReceiverStream::new(receiver).map(Ok::<_, Infallible>);
    ([(header::CONTENT_TYPE, "text/html; charset=utf-8")], Body::from_stream(stream))
}

/// POST /api/transform
async fn transform(
    State(state): State<AppState>,
    Json(request): Json<TransformRequest>,
) -> Json<TransformResult> {
    let snapshot = state.snapshot();
    let result = invoke(request.direction, &request.text, &snapshot);
    tracing::debug!(
        direction = %request.direction,
        state = %snapshot.state(),
        success = result.is_success(),
        "transform requested"
    );
    Json(result)
}

/// GET /api/module
async fn module_status(State(state): State<AppState>) -> Json<ModuleStatus> {
    Json(ModuleStatus { state: state.snapshot().state() })
}
