use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod detail;
pub mod form;
pub mod list;

pub use detail::{DetailAction, DetailState};
pub use form::{FormMode, FormState};
pub use list::{ListAction, ListState};

/// A task record as stored by the backend.
///
/// JSON field names are camelCase to match the wire format of the REST
/// API (`createdAt`, `updatedAt`). `id` and `created_at` are assigned by
/// the server and never change; `updated_at` is absent until the record
/// has been replaced at least once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Todo {
    /// Full-record payload for an update. Updates always replace the
    /// whole record; there is no partial patch on this API.
    pub fn to_draft(&self) -> TodoDraft {
        TodoDraft {
            title: self.title.clone(),
            description: self.description.clone(),
            completed: self.completed,
        }
    }

    /// Draft with the completion flag overridden, used by the
    /// toggle-complete actions.
    pub fn draft_with_completed(&self, completed: bool) -> TodoDraft {
        TodoDraft {
            completed,
            ..self.to_draft()
        }
    }
}

/// Request payload for create and full-record update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TodoDraft {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub completed: bool,
}

/// Validation failure payload returned by the backend on 400: a summary
/// message plus per-field error messages.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
    #[serde(default)]
    pub errors: BTreeMap<String, String>,
}

impl fmt::Display for ErrorBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// Errors surfaced by the service client.
///
/// `NotFound` and `Validation` carry business meaning the controllers
/// react to; everything else (network failure, 5xx, undecodable bodies)
/// collapses into `Transport`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("resource not found")]
    NotFound,

    #[error("{0}")]
    Validation(ErrorBody),

    #[error("{message}")]
    Transport { status: Option<u16>, message: String },
}

impl ApiError {
    /// Map a non-2xx response to the error taxonomy.
    pub fn from_status(status: u16, body: &str) -> Self {
        match status {
            404 => ApiError::NotFound,
            400 => match serde_json::from_str::<ErrorBody>(body) {
                Ok(parsed) => ApiError::Validation(parsed),
                Err(_) => ApiError::Validation(ErrorBody {
                    message: if body.trim().is_empty() {
                        "Invalid request".to_string()
                    } else {
                        body.to_string()
                    },
                    errors: BTreeMap::new(),
                }),
            },
            _ => ApiError::Transport {
                status: Some(status),
                message: format!("server returned status {status}"),
            },
        }
    }

    /// Transport-level failure with no HTTP status (request never
    /// completed, or the body could not be decoded).
    pub fn network(message: impl Into<String>) -> Self {
        ApiError::Transport {
            status: None,
            message: message.into(),
        }
    }

    /// Field-level errors, when the server rejected the input.
    pub fn field_errors(&self) -> Option<&BTreeMap<String, String>> {
        match self {
            ApiError::Validation(body) if !body.errors.is_empty() => Some(&body.errors),
            _ => None,
        }
    }
}

/// Which subset of todos the list view requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Filter {
    #[default]
    All,
    Active,
    Completed,
}

impl Filter {
    /// The `completed` flag this filter maps to, or `None` for all.
    pub fn completed(self) -> Option<bool> {
        match self {
            Filter::All => None,
            Filter::Active => Some(false),
            Filter::Completed => Some(true),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Filter::All => "All",
            Filter::Active => "Active",
            Filter::Completed => "Completed",
        }
    }

    /// The list request this filter resolves to.
    pub fn fetch_spec(self) -> FetchSpec {
        match self.completed() {
            None => FetchSpec::All,
            Some(flag) => FetchSpec::ByStatus(flag),
        }
    }
}

/// A single list-returning request the service client can issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchSpec {
    All,
    ByStatus(bool),
    ByTitle(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_todo() -> Todo {
        Todo {
            id: 7,
            title: "Buy milk".to_string(),
            description: Some("Semi-skimmed".to_string()),
            completed: false,
            created_at: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
            updated_at: None,
        }
    }

    #[test]
    fn todo_serializes_with_camel_case_keys() {
        let json = serde_json::to_value(sample_todo()).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["createdAt"], "2024-05-01T12:00:00Z");
        assert!(json["updatedAt"].is_null());
        assert!(json.get("created_at").is_none());
    }

    #[test]
    fn todo_deserializes_without_updated_at() {
        let todo: Todo = serde_json::from_str(
            r#"{"id":1,"title":"t","completed":false,"createdAt":"2024-05-01T12:00:00Z"}"#,
        )
        .unwrap();
        assert_eq!(todo.updated_at, None);
        assert_eq!(todo.description, None);
    }

    #[test]
    fn draft_with_completed_overrides_only_the_flag() {
        let todo = sample_todo();
        let draft = todo.draft_with_completed(true);
        assert!(draft.completed);
        assert_eq!(draft.title, todo.title);
        assert_eq!(draft.description, todo.description);
    }

    #[test]
    fn status_404_maps_to_not_found() {
        assert_eq!(ApiError::from_status(404, ""), ApiError::NotFound);
    }

    #[test]
    fn status_400_with_field_errors_maps_to_validation() {
        let body = r#"{"message":"Validation failed","errors":{"title":"Title is required"}}"#;
        let err = ApiError::from_status(400, body);
        let fields = err.field_errors().expect("field errors");
        assert_eq!(fields.get("title").map(String::as_str), Some("Title is required"));
    }

    #[test]
    fn status_400_with_opaque_body_is_still_validation() {
        let err = ApiError::from_status(400, "bad input");
        match err {
            ApiError::Validation(body) => {
                assert_eq!(body.message, "bad input");
                assert!(body.errors.is_empty());
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn status_500_is_a_transport_error() {
        match ApiError::from_status(500, "boom") {
            ApiError::Transport { status, .. } => assert_eq!(status, Some(500)),
            other => panic!("expected transport error, got {other:?}"),
        }
    }

    #[test]
    fn filter_maps_to_completed_flag() {
        assert_eq!(Filter::All.completed(), None);
        assert_eq!(Filter::Active.completed(), Some(false));
        assert_eq!(Filter::Completed.completed(), Some(true));
    }

    #[test]
    fn filter_resolves_to_fetch_spec() {
        assert_eq!(Filter::All.fetch_spec(), FetchSpec::All);
        assert_eq!(Filter::Active.fetch_spec(), FetchSpec::ByStatus(false));
        assert_eq!(Filter::Completed.fetch_spec(), FetchSpec::ByStatus(true));
    }
}
