use gloo::net::http::{Request, Response};
use serde::de::DeserializeOwned;
use shared::{ApiError, FetchSpec, Todo, TodoDraft};

/// API client for the todo backend.
///
/// Each method is a single round trip; there is no retry, caching or
/// timeout policy. Non-2xx responses are mapped into [`ApiError`] so the
/// controllers can tell a missing record or rejected input apart from a
/// transport failure.
#[derive(Clone, PartialEq)]
pub struct ApiClient {
    base_url: String,
}

impl ApiClient {
    /// Create a new API client with the default base URL.
    pub fn new() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
        }
    }

    /// Create a new API client with a custom base URL.
    pub fn with_base_url(base_url: String) -> Self {
        Self { base_url }
    }

    pub async fn list_todos(&self) -> Result<Vec<Todo>, ApiError> {
        let url = format!("{}/api/todos", self.base_url);
        let response = Request::get(&url)
            .send()
            .await
            .map_err(|e| ApiError::network(format!("Failed to fetch todos: {e}")))?;
        read_json(response).await
    }

    pub async fn get_todo(&self, id: i64) -> Result<Todo, ApiError> {
        let url = format!("{}/api/todos/{}", self.base_url, id);
        let response = Request::get(&url)
            .send()
            .await
            .map_err(|e| ApiError::network(format!("Failed to fetch todo: {e}")))?;
        read_json(response).await
    }

    pub async fn create_todo(&self, draft: &TodoDraft) -> Result<Todo, ApiError> {
        let url = format!("{}/api/todos", self.base_url);
        let response = Request::post(&url)
            .json(draft)
            .map_err(|e| ApiError::network(format!("Failed to serialize request: {e}")))?
            .send()
            .await
            .map_err(|e| ApiError::network(format!("Network error: {e}")))?;
        read_json(response).await
    }

    /// Full-record replace; the backend has no partial update.
    pub async fn update_todo(&self, id: i64, draft: &TodoDraft) -> Result<Todo, ApiError> {
        let url = format!("{}/api/todos/{}", self.base_url, id);
        let response = Request::put(&url)
            .json(draft)
            .map_err(|e| ApiError::network(format!("Failed to serialize request: {e}")))?
            .send()
            .await
            .map_err(|e| ApiError::network(format!("Network error: {e}")))?;
        read_json(response).await
    }

    pub async fn delete_todo(&self, id: i64) -> Result<(), ApiError> {
        let url = format!("{}/api/todos/{}", self.base_url, id);
        let response = Request::delete(&url)
            .send()
            .await
            .map_err(|e| ApiError::network(format!("Network error: {e}")))?;
        if response.ok() {
            Ok(())
        } else {
            Err(error_from(response).await)
        }
    }

    pub async fn list_by_status(&self, completed: bool) -> Result<Vec<Todo>, ApiError> {
        let url = format!("{}/api/todos/status", self.base_url);
        let response = Request::get(&url)
            .query([("completed", completed.to_string().as_str())])
            .send()
            .await
            .map_err(|e| ApiError::network(format!("Failed to fetch todos: {e}")))?;
        read_json(response).await
    }

    pub async fn search_by_title(&self, title: &str) -> Result<Vec<Todo>, ApiError> {
        let url = format!("{}/api/todos/search", self.base_url);
        let response = Request::get(&url)
            .query([("title", title)])
            .send()
            .await
            .map_err(|e| ApiError::network(format!("Failed to search todos: {e}")))?;
        read_json(response).await
    }

    /// Dispatch helper for the list controller's fetch specs.
    pub async fn fetch(&self, spec: &FetchSpec) -> Result<Vec<Todo>, ApiError> {
        match spec {
            FetchSpec::All => self.list_todos().await,
            FetchSpec::ByStatus(completed) => self.list_by_status(*completed).await,
            FetchSpec::ByTitle(title) => self.search_by_title(title).await,
        }
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    if response.ok() {
        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::network(format!("Failed to parse response: {e}")))
    } else {
        Err(error_from(response).await)
    }
}

async fn error_from(response: Response) -> ApiError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    ApiError::from_status(status, &body)
}
