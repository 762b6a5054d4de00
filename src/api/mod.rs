//! HTTP API layer.
//!
//! Exposes `POST /read` (multipart biodata + two palm images) and
//! `GET /health`. Collaborators (LLM client, image store) are injected
//! through [`AppState`] so tests can swap in fakes.

mod error;
mod routes;
mod types;

pub use error::ApiError;
pub use types::{ErrorResponse, HealthResponse, ReadResponse};

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::http::HeaderValue;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::agent::Agent;
use crate::config::Config;
use crate::llm::OpenAiClient;
use crate::storage::{GoogleDriveStore, ImageStore, ServiceAccountKey};

/// Palm images are photos; the axum default of 2 MiB is too small.
const MAX_BODY_BYTES: usize = 20 * 1024 * 1024;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub agent: Arc<Agent>,
    pub store: Arc<dyn ImageStore>,
}

impl AppState {
    pub fn new(agent: Arc<Agent>, store: Arc<dyn ImageStore>) -> Self {
        Self { agent, store }
    }
}

/// Build the application router.
pub fn router(state: AppState, allowed_origins: &[String]) -> Router {
    Router::new()
        .route("/read", post(routes::read))
        .route("/health", get(routes::health))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(cors_layer(allowed_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// CORS from the configured allow-list; an empty list allows any origin.
fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    if allowed_origins.is_empty() {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Build the production collaborators and serve the API.
pub async fn serve(config: Config) -> anyhow::Result<()> {
    let llm = Arc::new(OpenAiClient::new(config.api_key.clone()));
    let agent = Arc::new(Agent::new(llm, config.model.clone(), config.max_rounds));

    let key = ServiceAccountKey::from_file(&config.credentials_path)?;
    let store: Arc<dyn ImageStore> =
        Arc::new(GoogleDriveStore::new(key, config.drive_folder_id.clone()));

    let app = router(AppState::new(agent, store), &config.allowed_origins);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("listening on {}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
