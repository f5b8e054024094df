//! In-memory implementation of the todo REST contract.
//!
//! The production backend is an external collaborator; this crate is the
//! development and test double. It keeps the whole collection behind an
//! `Arc<RwLock<Store>>`, assigns monotonic integer ids, and mirrors the
//! real API's status codes: 404 for missing ids, 400 with a field-level
//! error body for invalid input, 204 on delete.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::{Duration, Utc};
use serde::Deserialize;
use tokio::sync::RwLock;
use tracing::info;

use shared::{ErrorBody, Todo, TodoDraft};

/// Backing store. `BTreeMap` keeps list responses in id order.
#[derive(Debug, Default)]
pub struct Store {
    next_id: i64,
    todos: BTreeMap<i64, Todo>,
}

impl Store {
    fn insert(&mut self, draft: TodoDraft) -> Todo {
        self.next_id += 1;
        let todo = Todo {
            id: self.next_id,
            title: draft.title,
            description: draft.description,
            completed: draft.completed,
            created_at: Utc::now(),
            updated_at: None,
        };
        self.todos.insert(todo.id, todo.clone());
        todo
    }
}

pub type Db = Arc<RwLock<Store>>;

/// Router over a fresh, empty store. Used by the integration tests.
pub fn app() -> Router {
    app_with_state(Db::default())
}

pub fn app_with_state(db: Db) -> Router {
    Router::new()
        .route("/api/todos", get(list_todos).post(create_todo))
        .route("/api/todos/status", get(todos_by_status))
        .route("/api/todos/search", get(search_todos))
        .route(
            "/api/todos/:id",
            get(get_todo).put(update_todo).delete(delete_todo),
        )
        .with_state(db)
}

/// Sample records for local development. Loaded only when the store is
/// empty, like the original data loader.
pub async fn seed_sample_data(db: &Db) {
    let mut store = db.write().await;
    if !store.todos.is_empty() {
        return;
    }

    let now = Utc::now();
    let samples = [
        (
            "Set up the dev environment",
            Some("Toolchain, trunk and the mock server"),
            true,
            5,
            Some(2),
        ),
        (
            "Write the project README",
            Some("Quick start plus the REST contract table"),
            false,
            3,
            None,
        ),
        ("Wire the frontend to the API", None, false, 1, None),
    ];

    for (title, description, completed, created_days_ago, updated_days_ago) in samples {
        let mut todo = store.insert(TodoDraft {
            title: title.to_string(),
            description: description.map(str::to_string),
            completed,
        });
        todo.created_at = now - Duration::days(created_days_ago);
        todo.updated_at = updated_days_ago.map(|days| now - Duration::days(days));
        store.todos.insert(todo.id, todo);
    }
    info!("Sample data has been loaded");
}

fn validate(draft: &TodoDraft) -> Option<ErrorBody> {
    if draft.title.trim().is_empty() {
        let mut errors = BTreeMap::new();
        errors.insert("title".to_string(), "Title is required".to_string());
        return Some(ErrorBody {
            message: "Validation failed".to_string(),
            errors,
        });
    }
    None
}

async fn list_todos(State(db): State<Db>) -> Json<Vec<Todo>> {
    info!("GET /api/todos");
    let store = db.read().await;
    Json(store.todos.values().cloned().collect())
}

async fn get_todo(State(db): State<Db>, Path(id): Path<i64>) -> Result<Json<Todo>, StatusCode> {
    info!("GET /api/todos/{id}");
    let store = db.read().await;
    store
        .todos
        .get(&id)
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn create_todo(State(db): State<Db>, Json(draft): Json<TodoDraft>) -> Response {
    info!("POST /api/todos - title: {:?}", draft.title);
    if let Some(body) = validate(&draft) {
        return (StatusCode::BAD_REQUEST, Json(body)).into_response();
    }
    let todo = db.write().await.insert(draft);
    (StatusCode::CREATED, Json(todo)).into_response()
}

async fn update_todo(
    State(db): State<Db>,
    Path(id): Path<i64>,
    Json(draft): Json<TodoDraft>,
) -> Response {
    info!("PUT /api/todos/{id}");
    if let Some(body) = validate(&draft) {
        return (StatusCode::BAD_REQUEST, Json(body)).into_response();
    }
    let mut store = db.write().await;
    match store.todos.get_mut(&id) {
        Some(todo) => {
            todo.title = draft.title;
            todo.description = draft.description;
            todo.completed = draft.completed;
            todo.updated_at = Some(Utc::now());
            (StatusCode::OK, Json(todo.clone())).into_response()
        }
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn delete_todo(State(db): State<Db>, Path(id): Path<i64>) -> StatusCode {
    info!("DELETE /api/todos/{id}");
    let mut store = db.write().await;
    match store.todos.remove(&id) {
        Some(_) => StatusCode::NO_CONTENT,
        None => StatusCode::NOT_FOUND,
    }
}

#[derive(Debug, Deserialize)]
struct StatusQuery {
    completed: bool,
}

async fn todos_by_status(
    State(db): State<Db>,
    Query(query): Query<StatusQuery>,
) -> Json<Vec<Todo>> {
    info!("GET /api/todos/status - completed: {}", query.completed);
    let store = db.read().await;
    Json(
        store
            .todos
            .values()
            .filter(|todo| todo.completed == query.completed)
            .cloned()
            .collect(),
    )
}

#[derive(Debug, Deserialize)]
struct SearchQuery {
    title: String,
}

async fn search_todos(State(db): State<Db>, Query(query): Query<SearchQuery>) -> Json<Vec<Todo>> {
    info!("GET /api/todos/search - title: {:?}", query.title);
    let needle = query.title.to_lowercase();
    let store = db.read().await;
    Json(
        store
            .todos
            .values()
            .filter(|todo| todo.title.to_lowercase().contains(&needle))
            .cloned()
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_title_fails_validation() {
        let body = validate(&TodoDraft {
            title: "   ".to_string(),
            description: None,
            completed: false,
        })
        .expect("validation error");
        assert_eq!(
            body.errors.get("title").map(String::as_str),
            Some("Title is required")
        );
    }

    #[test]
    fn non_blank_title_passes_validation() {
        assert!(validate(&TodoDraft {
            title: "Buy milk".to_string(),
            description: None,
            completed: false,
        })
        .is_none());
    }

    #[test]
    fn store_assigns_monotonic_ids() {
        let mut store = Store::default();
        let first = store.insert(TodoDraft {
            title: "a".to_string(),
            description: None,
            completed: false,
        });
        let second = store.insert(TodoDraft {
            title: "b".to_string(),
            description: None,
            completed: false,
        });
        assert!(second.id > first.id);
        assert_eq!(first.updated_at, None);
    }
}
