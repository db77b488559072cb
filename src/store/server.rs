//! axum routes for the Artwork Store

use super::{ArtStore, StoreConfig, StoreError, StoreResult};
use crate::gallery::Artwork;
use axum::extract::{Multipart, Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::net::TcpListener;

#[derive(Clone)]
struct AppState {
    store: Arc<Mutex<ArtStore>>,
    default_limit: u32,
}

impl AppState {
    fn store(&self) -> StoreResult<MutexGuard<'_, ArtStore>> {
        self.store
            .lock()
            .map_err(|_| StoreError::Internal("store lock poisoned".into()))
    }
}

impl StoreError {
    pub fn status(&self) -> StatusCode {
        match self {
            StoreError::BadRequest(_) => StatusCode::BAD_REQUEST,
            StoreError::InvalidForm(_) => StatusCode::UNPROCESSABLE_ENTITY,
            StoreError::NotFound(_) => StatusCode::NOT_FOUND,
            StoreError::Database(_) | StoreError::Io(_) | StoreError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for StoreError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            log::error!("{}", self);
        }
        (status, Json(json!({ "detail": self.to_string() }))).into_response()
    }
}

/// Routes under `/api`
pub fn router(store: ArtStore, default_limit: u32) -> Router {
    let state = AppState {
        store: Arc::new(Mutex::new(store)),
        default_limit,
    };
    Router::new()
        .route("/api/health", get(health))
        .route("/api/save", post(save_art))
        .route("/api/art", get(list_art))
        .route("/api/art/:id", get(get_art).delete(delete_art))
        .with_state(state)
}

/// Open the catalog, bind `config.bind` and serve until Ctrl-C
pub async fn serve(config: StoreConfig) -> std::io::Result<()> {
    let store = ArtStore::open(&config.data_dir).map_err(std::io::Error::other)?;
    let listener = TcpListener::bind(config.bind.as_str()).await?;
    log::info!("Pixel Pantry store listening on {}", listener.local_addr()?);

    serve_listener(listener, store, config.default_limit, async {
        let _ = tokio::signal::ctrl_c().await;
        log::info!("shutting down");
    })
    .await
}

/// Serve on an already-bound listener until `shutdown` resolves
pub async fn serve_listener<F>(listener: TcpListener, store: ArtStore, default_limit: u32, shutdown: F) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, router(store, default_limit))
        .with_graceful_shutdown(shutdown)
        .await
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "message": "Pixel Pantry API running" }))
}

#[derive(Deserialize)]
struct ListParams {
    limit: Option<u32>,
}

async fn list_art(State(state): State<AppState>, Query(params): Query<ListParams>) -> Json<Vec<Artwork>> {
    let limit = params.limit.unwrap_or(state.default_limit);
    match state.store().and_then(|s| s.list(limit)) {
        Ok(items) => Json(items),
        Err(e) => {
            log::error!("list_art failed: {}", e);
            Json(Vec::new())
        }
    }
}

async fn save_art(State(state): State<AppState>, mut multipart: Multipart) -> StoreResult<Json<Artwork>> {
    let mut data_url = None;
    let mut width = None;
    let mut height = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| StoreError::BadRequest(format!("Invalid form: {}", e)))?
    {
        let name = field.name().unwrap_or_default().to_string();
        let value = field
            .text()
            .await
            .map_err(|e| StoreError::BadRequest(format!("Invalid form field {}: {}", name, e)))?;
        match name.as_str() {
            "data_url" => data_url = Some(value),
            "width" => width = Some(parse_dimension("width", &value)?),
            "height" => height = Some(parse_dimension("height", &value)?),
            _ => {}
        }
    }

    let missing = |f: &str| StoreError::InvalidForm(format!("Missing form field: {}", f));
    let data_url = data_url.ok_or_else(|| missing("data_url"))?;
    let width = width.ok_or_else(|| missing("width"))?;
    let height = height.ok_or_else(|| missing("height"))?;

    let art = state.store()?.save_data_url(&data_url, width, height)?;
    Ok(Json(art))
}

fn parse_dimension(name: &str, value: &str) -> StoreResult<u32> {
    value
        .trim()
        .parse()
        .map_err(|_| StoreError::InvalidForm(format!("Invalid {}: {:?}", name, value)))
}

async fn get_art(State(state): State<AppState>, Path(id): Path<i64>) -> StoreResult<Response> {
    let path = state.store()?.image_path(id)?;
    let bytes = tokio::fs::read(&path).await?;
    Ok(([(header::CONTENT_TYPE, "image/png")], bytes).into_response())
}

async fn delete_art(State(state): State<AppState>, Path(id): Path<i64>) -> StoreResult<Json<serde_json::Value>> {
    state.store()?.delete(id)?;
    Ok(Json(json!({ "deleted": true })))
}
