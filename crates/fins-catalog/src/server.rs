//! HTTP server for catalog endpoints

use crate::catalog::Catalog;
use crate::error::CatalogError;
use crate::query::{FilterSet, Query as SearchQuery};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::{error, info};

/// Shared state for the HTTP server
pub struct ServerState {
    pub catalog: Catalog,
    pub started_at: DateTime<Utc>,
}

impl ServerState {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            started_at: Utc::now(),
        }
    }
}

pub type SharedState = Arc<ServerState>;

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    uptime_secs: u64,
}

/// Error response
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

#[derive(Deserialize)]
pub struct TextQuery {
    q: String,
}

/// Create the HTTP router
pub fn create_router(state: SharedState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/search", get(search))
        .route("/search/advanced", post(advanced_search))
        .route("/species/{id}", get(get_species))
        .route("/featured", get(featured))
        .route("/filters", get(filters))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Start the HTTP server
pub async fn start_server(state: SharedState, port: u16) -> std::io::Result<()> {
    let router = create_router(state);
    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    info!("Starting HTTP server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await
}

fn error_response(e: CatalogError) -> Response {
    let status = match &e {
        CatalogError::InvalidQuery(_) => StatusCode::BAD_REQUEST,
        CatalogError::NotFound(_) => StatusCode::NOT_FOUND,
        CatalogError::Transport(_) => StatusCode::BAD_GATEWAY,
        CatalogError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    if status.is_server_error() {
        error!(error = %e, "Request failed");
    }
    (
        status,
        Json(ErrorResponse {
            error: e.to_string(),
        }),
    )
        .into_response()
}

async fn health(State(state): State<SharedState>) -> Json<HealthResponse> {
    let uptime_secs = (Utc::now() - state.started_at).num_seconds() as u64;

    Json(HealthResponse {
        status: "ok".to_string(),
        uptime_secs,
    })
}

/// Free-text search: common name, species id, scientific name or genus
async fn search(State(state): State<SharedState>, Query(params): Query<TextQuery>) -> Response {
    match state.catalog.search(&SearchQuery::Text(params.q)).await {
        Ok(lookup) => Json(lookup).into_response(),
        Err(e) => error_response(e),
    }
}

/// Attribute search; the body is a flat JSON object of filter values
async fn advanced_search(
    State(state): State<SharedState>,
    Json(body): Json<serde_json::Map<String, Value>>,
) -> Response {
    let filters: FilterSet = body
        .into_iter()
        .filter_map(|(key, value)| match value {
            Value::String(s) => Some((key, s)),
            Value::Bool(b) => Some((key, b.to_string())),
            Value::Number(n) => Some((key, n.to_string())),
            _ => None,
        })
        .collect();

    match state.catalog.search(&SearchQuery::Filters(filters)).await {
        Ok(lookup) => Json(lookup).into_response(),
        Err(e) => error_response(e),
    }
}

/// Full record for one species id
async fn get_species(State(state): State<SharedState>, Path(id): Path<u64>) -> Response {
    match state.catalog.hydrate(id).await {
        Ok(record) => Json(record).into_response(),
        Err(e) => error_response(e),
    }
}

async fn featured(State(state): State<SharedState>) -> Response {
    Json(state.catalog.featured().await).into_response()
}

async fn filters(State(state): State<SharedState>) -> Response {
    Json(state.catalog.filter_options().await).into_response()
}
