//! In-process stand-in for the FINS API used by unit tests
//!
//! Responses are keyed by path plus decoded query string, e.g.
//! `/search_species?genus=Thunnus`. Unregistered requests get a 404 with an
//! empty JSON object. Every request is recorded.

use axum::{
    extract::State,
    http::{StatusCode, Uri},
    Json, Router,
};
use fins_api::{FinsClient, Relay};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct FakeState {
    routes: Mutex<HashMap<String, (StatusCode, Value)>>,
    hits: Mutex<Vec<String>>,
}

pub struct FakeFins {
    state: Arc<FakeState>,
    base_url: String,
}

impl FakeFins {
    pub async fn start() -> Self {
        let state = Arc::new(FakeState::default());
        let router = Router::new().fallback(handle).with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        Self {
            state,
            base_url: format!("http://{}", addr),
        }
    }

    /// Answer `key` with 200 and `body`
    pub fn respond(&self, key: &str, body: Value) -> &Self {
        self.state
            .routes
            .lock()
            .unwrap()
            .insert(key.to_string(), (StatusCode::OK, body));
        self
    }

    /// Answer `key` with a bare error status
    pub fn fail(&self, key: &str, status: u16) -> &Self {
        let status = StatusCode::from_u16(status).unwrap();
        self.state
            .routes
            .lock()
            .unwrap()
            .insert(key.to_string(), (status, json!({ "error": "upstream failure" })));
        self
    }

    /// Register a minimal `/species/{id}` record
    pub fn species(&self, id: u64, scientific_name: &str, common_name: &str) -> &Self {
        self.respond(
            &format!("/species/{}", id),
            json!({
                "id": id,
                "species_code": id,
                "scientific_name": scientific_name,
                "common_name": common_name
            }),
        )
    }

    pub fn client(&self) -> FinsClient {
        FinsClient::with_endpoint(self.base_url.clone(), Relay::Direct)
    }

    pub fn hits(&self) -> Vec<String> {
        self.state.hits.lock().unwrap().clone()
    }

    pub fn hit_count(&self) -> usize {
        self.state.hits.lock().unwrap().len()
    }

    /// Number of recorded requests whose key starts with `prefix`
    pub fn hits_with_prefix(&self, prefix: &str) -> usize {
        self.hits().iter().filter(|h| h.starts_with(prefix)).count()
    }
}

async fn handle(State(state): State<Arc<FakeState>>, uri: Uri) -> (StatusCode, Json<Value>) {
    let key = match uri.query() {
        Some(q) => format!(
            "{}?{}",
            uri.path(),
            urlencoding::decode(q).map(|d| d.into_owned()).unwrap_or_else(|_| q.to_string())
        ),
        None => uri.path().to_string(),
    };

    state.hits.lock().unwrap().push(key.clone());

    match state.routes.lock().unwrap().get(&key) {
        Some((status, body)) => (*status, Json(body.clone())),
        None => (StatusCode::NOT_FOUND, Json(json!({}))),
    }
}
