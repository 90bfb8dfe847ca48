//! HTTP boundary for the tricount dashboard.
//!
//! Thin glue only: every registry update re-runs the full
//! provision → authenticate → fetch → normalize → aggregate pipeline with a
//! fresh session, and pipeline errors are mapped to user-visible responses
//! here (detail goes to the log, not the body).

use std::path::PathBuf;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{error, warn};

use tricount_client::{Session, TricountClient, TricountError, UpstreamConfig};
use tricount_keys::{KeyRecord, KeyStore, KeyStoreError};

#[derive(Clone)]
pub struct AppState {
    client: TricountClient,
    keys: KeyStore,
}

impl AppState {
    #[must_use]
    pub fn new(config: UpstreamConfig, keys_file: PathBuf) -> Self {
        Self {
            client: TricountClient::new(config),
            keys: KeyStore::new(keys_file),
        }
    }
}

#[must_use]
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/registry", get(update_registry))
        .route("/api/keys", get(list_keys).post(add_key).delete(remove_key))
        .with_state(state)
}

#[derive(Debug, Deserialize)]
struct UpdateParams {
    key: Option<String>,
}

async fn update_registry(
    State(state): State<AppState>,
    Query(params): Query<UpdateParams>,
) -> Response {
    // The original client sends the literal string "null" for an unset key.
    let key = params
        .key
        .filter(|key| !key.trim().is_empty() && key != "null");
    let Some(key) = key else {
        return error_response(StatusCode::BAD_REQUEST, "no tricount key provided");
    };

    match load_registry(&state, &key).await {
        Ok(body) => Json(body).into_response(),
        Err(TricountError::Structural(detail)) => {
            warn!(%key, %detail, "registry payload unusable");
            error_response(
                StatusCode::NOT_FOUND,
                "no tricount found or tricount is empty",
            )
        }
        Err(other) => {
            error!(%key, error = %other, "registry update failed");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "tricount update failed")
        }
    }
}

async fn load_registry(state: &AppState, key: &str) -> Result<Value, TricountError> {
    let session = Session::provision()?;
    let session = state.client.authenticate(session).await?;
    let raw = state.client.fetch_registry(&session, key).await?;

    let metadata = tricount_client::registry_metadata(&raw);
    let snapshot = tricount_client::normalize(&raw)?;
    let stats = tricount_client::aggregate(&snapshot.transactions);

    // Merged response shape: metadata and stats fields at the top level,
    // plus the member and transaction lists.
    let mut body = serde_json::Map::new();
    if let Some(metadata) = metadata {
        merge_object(&mut body, to_json(&metadata)?);
    }
    merge_object(&mut body, to_json(&stats)?);
    body.insert("memberships".to_string(), to_json(&snapshot.memberships)?);
    body.insert("transactions".to_string(), to_json(&snapshot.transactions)?);
    Ok(Value::Object(body))
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<Value, TricountError> {
    serde_json::to_value(value)
        .map_err(|error| TricountError::Transport(format!("response encoding failed: {error}")))
}

fn merge_object(target: &mut serde_json::Map<String, Value>, value: Value) {
    if let Value::Object(fields) = value {
        target.extend(fields);
    }
}

#[derive(Debug, Deserialize)]
struct KeyBody {
    key: String,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    emoji: Option<String>,
}

async fn list_keys(State(state): State<AppState>) -> Response {
    keys_response(state.keys.list().await)
}

async fn add_key(State(state): State<AppState>, Json(body): Json<KeyBody>) -> Response {
    if body.key.trim().is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "no tricount key provided");
    }
    let record = KeyRecord::new(body.key).with_display(body.title, body.emoji);
    keys_response(state.keys.add(record).await)
}

async fn remove_key(State(state): State<AppState>, Json(body): Json<KeyBody>) -> Response {
    keys_response(state.keys.remove(&body.key).await)
}

fn keys_response(result: Result<Vec<KeyRecord>, KeyStoreError>) -> Response {
    match result {
        Ok(records) => Json(records).into_response(),
        Err(error) => {
            error!(%error, "key registry operation failed");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "key registry unavailable")
        }
    }
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({"error": message}))).into_response()
}
