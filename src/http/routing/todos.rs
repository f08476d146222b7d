use axum::{extract::{rejection::{JsonRejection, QueryRejection}, Path, Query, State}, routing::{get, put}, Router, Json};
use http::StatusCode;
use serde::{Deserialize, Serialize};

use crate::{
    application::todo_service::TodoService,
    domain::todo::{Todo, TodoId, TodoPatch},
    http::types::{method_not_allowed, ApiError},
};

#[derive(Clone)]
pub struct AppState<S: TodoService> { pub service: S }

pub fn router<S: TodoService + Clone>(state: AppState<S>) -> Router {
    Router::new()
        .route("/", get(list_todos::<S>).post(create_todo::<S>).delete(delete_finished::<S>).fallback(method_not_allowed))
        .route("/:id", get(get_todo::<S>).patch(edit_todo::<S>).delete(delete_todo::<S>).fallback(method_not_allowed))
        .route("/:id/done", put(mark_todo_done::<S>).fallback(method_not_allowed))
        .with_state(state)
}

/// The `done` query parameter shared by listing and bulk deletion.
#[derive(Debug, Default, Deserialize)]
pub struct DoneQuery { pub done: Option<String> }

impl DoneQuery {
    /// Keeps the first `done` value when the key is repeated.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        Self { done: pairs.into_iter().find(|(key, _)| key == "done").map(|(_, value)| value) }
    }

    /// Absent or empty means no filter, `true` selects finished todos and any other value pending ones.
    pub fn filter(&self) -> Option<bool> {
        match self.done.as_deref() {
            None | Some("") => None,
            Some(v) => Some(v == "true"),
        }
    }

    pub fn confirms_finished(&self) -> bool { self.done.as_deref() == Some("true") }
}

#[derive(Deserialize)]
struct CreateBody {
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: String,
}

// `title` is required on the wire; leaving it out is a malformed request.
#[derive(Deserialize)]
struct EditBody { title: String, description: Option<String> }

#[derive(Serialize)]
struct DeletedCount { deleted: usize }

async fn list_todos<S: TodoService>(State(state): State<AppState<S>>, query: Result<Query<Vec<(String, String)>>, QueryRejection>) -> Result<Json<Vec<Todo>>, ApiError> {
    let query = done_query(query)?;
    Ok(Json(state.service.list(query.filter()).await?))
}

async fn get_todo<S: TodoService>(State(state): State<AppState<S>>, Path(id): Path<String>) -> Result<Json<Todo>, ApiError> {
    let id = parse_id(&id)?;
    Ok(Json(state.service.get(id).await?))
}

async fn create_todo<S: TodoService>(State(state): State<AppState<S>>, payload: Result<Json<CreateBody>, JsonRejection>) -> Result<(StatusCode, Json<Todo>), ApiError> {
    let Json(body) = payload.map_err(invalid_payload)?;
    let todo = state.service.add(&body.title, &body.description).await?;
    Ok((StatusCode::CREATED, Json(todo)))
}

async fn edit_todo<S: TodoService>(State(state): State<AppState<S>>, Path(id): Path<String>, payload: Result<Json<EditBody>, JsonRejection>) -> Result<Json<Todo>, ApiError> {
    let id = parse_id(&id)?;
    let mut todo = state.service.get(id).await?;
    let Json(body) = payload.map_err(invalid_payload)?;
    TodoPatch { title: Some(body.title), description: body.description }.apply(&mut todo);
    Ok(Json(state.service.edit(&todo).await?))
}

async fn mark_todo_done<S: TodoService>(State(state): State<AppState<S>>, Path(id): Path<String>) -> Result<Json<Todo>, ApiError> {
    let id = parse_id(&id)?;
    let todo = state.service.get(id).await?;
    Ok(Json(state.service.mark_as_done(&todo).await?))
}

async fn delete_todo<S: TodoService>(State(state): State<AppState<S>>, Path(id): Path<String>) -> Result<Json<Todo>, ApiError> {
    let id = parse_id(&id)?;
    let todo = state.service.get(id).await?;
    state.service.delete(&todo).await?;
    Ok(Json(todo))
}

async fn delete_finished<S: TodoService>(State(state): State<AppState<S>>, query: Result<Query<Vec<(String, String)>>, QueryRejection>) -> Result<Json<DeletedCount>, ApiError> {
    let query = done_query(query)?;
    if !query.confirms_finished() {
        return Err(ApiError::bad_request("?done=true should be set"));
    }
    let deleted = state.service.delete_finished().await?;
    Ok(Json(DeletedCount { deleted }))
}

fn parse_id(s: &str) -> Result<TodoId, ApiError> { s.parse().map_err(|_| ApiError::bad_request("cannot parse id")) }

fn done_query(query: Result<Query<Vec<(String, String)>>, QueryRejection>) -> Result<DoneQuery, ApiError> {
    let Query(pairs) = query.map_err(|rejection| ApiError::bad_request(rejection.body_text()))?;
    Ok(DoneQuery::from_pairs(pairs))
}

fn invalid_payload(rejection: JsonRejection) -> ApiError {
    tracing::debug!(%rejection, "rejected request body");
    ApiError::bad_request("invalid request payload")
}
