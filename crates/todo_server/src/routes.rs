//! HTTP surface: the task CRUD routes and the static page at `/`.

use crate::error::ApiErrorResponse;
use axum::Json;
use axum::Router;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Html;
use axum::routing::{get, put};
use serde_json::Value;
use std::path::PathBuf;
use std::sync::Arc;
use todo_core::error::AppError;
use todo_core::model::Task;
use todo_core::task_api::TaskStore;
use todo_core::validate::validate_payload;
use tower_http::trace::TraceLayer;

#[derive(Debug, Clone)]
pub struct AppState {
    pub store: Arc<TaskStore>,
    pub index_path: Arc<PathBuf>,
}

impl AppState {
    pub fn new(store: TaskStore, index_path: PathBuf) -> Self {
        Self {
            store: Arc::new(store),
            index_path: Arc::new(index_path),
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/tasks", get(list_tasks).post(create_task))
        .route("/tasks/{id}", put(update_task).delete(delete_task))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

type ApiResult<T> = Result<T, ApiErrorResponse>;

async fn list_tasks(State(state): State<AppState>) -> ApiResult<Json<Vec<Task>>> {
    let store = Arc::clone(&state.store);
    let tasks = run_blocking(move || store.list_tasks()).await?;
    Ok(Json(tasks))
}

async fn create_task(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Task>)> {
    let Json(body) = body?;
    let payload = validate_payload(&body)?;

    let store = Arc::clone(&state.store);
    let task = run_blocking(move || store.create_task(payload)).await?;
    Ok((StatusCode::CREATED, Json(task)))
}

/// Validation runs before the lookup, so a bad body to an unknown id is a 400.
async fn update_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<Task>> {
    let Json(body) = body?;
    let payload = validate_payload(&body)?;

    let store = Arc::clone(&state.store);
    let task = run_blocking(move || store.update_task(&id, payload)).await?;
    Ok(Json(task))
}

async fn delete_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    let store = Arc::clone(&state.store);
    run_blocking(move || store.delete_task(&id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn index(State(state): State<AppState>) -> ApiResult<Html<String>> {
    match tokio::fs::read_to_string(state.index_path.as_path()).await {
        Ok(page) => Ok(Html(page)),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            Err(AppError::not_found(format!("{} not found", state.index_path.display())).into())
        }
        Err(err) => Err(AppError::storage_io(err.to_string()).into()),
    }
}

/// Store calls do synchronous file IO, so they run on the blocking pool.
async fn run_blocking<T, F>(operation: F) -> Result<T, AppError>
where
    F: FnOnce() -> Result<T, AppError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(operation)
        .await
        .map_err(|err| AppError::storage_io(err.to_string()))?
}
