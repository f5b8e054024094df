//! Detail view state machine.
//!
//! Holds a single record fetched by id. Fetch failure (including a 404)
//! is a terminal error state; the view only offers a path back to the
//! list. Fetches are token-guarded like the list's, since the route id
//! can change while a request is in flight.

use crate::{ApiError, Todo};

#[derive(Debug, Clone, PartialEq)]
pub struct DetailState {
    pub todo: Option<Todo>,
    pub loading: bool,
    pub error: Option<String>,
    pub flash: Option<String>,
    pending: Option<u64>,
}

impl Default for DetailState {
    fn default() -> Self {
        Self {
            todo: None,
            loading: true,
            error: None,
            flash: None,
            pending: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DetailAction {
    FetchStarted { token: u64 },
    FetchFinished {
        token: u64,
        result: Result<Todo, ApiError>,
    },
    /// Toggle update succeeded; only the held record is patched.
    CompletionChanged { completed: bool },
    Flash { message: String },
    FlashCleared,
}

impl DetailState {
    pub fn apply(&mut self, action: DetailAction) {
        match action {
            DetailAction::FetchStarted { token } => {
                self.loading = true;
                self.error = None;
                self.pending = Some(token);
            }
            DetailAction::FetchFinished { token, result } => {
                if self.pending != Some(token) {
                    return;
                }
                self.pending = None;
                self.loading = false;
                match result {
                    Ok(todo) => {
                        self.todo = Some(todo);
                        self.error = None;
                    }
                    Err(ApiError::NotFound) => {
                        self.todo = None;
                        self.error = Some(
                            "This todo does not exist or has been deleted.".to_string(),
                        );
                    }
                    Err(err) => {
                        self.todo = None;
                        self.error = Some(format!("Failed to fetch todo details: {err}"));
                    }
                }
            }
            DetailAction::CompletionChanged { completed } => {
                if let Some(todo) = self.todo.as_mut() {
                    todo.completed = completed;
                }
            }
            DetailAction::Flash { message } => self.flash = Some(message),
            DetailAction::FlashCleared => self.flash = None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn todo(completed: bool) -> Todo {
        Todo {
            id: 1,
            title: "Buy milk".to_string(),
            description: None,
            completed,
            created_at: Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap(),
            updated_at: None,
        }
    }

    #[test]
    fn fetch_stores_the_record() {
        let mut state = DetailState::default();
        state.apply(DetailAction::FetchStarted { token: 1 });
        state.apply(DetailAction::FetchFinished {
            token: 1,
            result: Ok(todo(false)),
        });

        assert!(state.todo.is_some());
        assert!(!state.loading);
        assert!(state.error.is_none());
    }

    #[test]
    fn not_found_is_a_terminal_error() {
        let mut state = DetailState::default();
        state.apply(DetailAction::FetchStarted { token: 1 });
        state.apply(DetailAction::FetchFinished {
            token: 1,
            result: Err(ApiError::NotFound),
        });

        assert!(state.todo.is_none());
        assert!(state.error.is_some());
    }

    #[test]
    fn stale_response_does_not_overwrite_newer_fetch() {
        let mut state = DetailState::default();
        state.apply(DetailAction::FetchStarted { token: 1 });
        state.apply(DetailAction::FetchStarted { token: 2 });

        state.apply(DetailAction::FetchFinished {
            token: 1,
            result: Err(ApiError::NotFound),
        });
        assert!(state.error.is_none());
        assert!(state.loading);

        state.apply(DetailAction::FetchFinished {
            token: 2,
            result: Ok(todo(true)),
        });
        assert!(state.todo.is_some());
    }

    #[test]
    fn toggle_patches_only_the_held_record() {
        let mut state = DetailState::default();
        state.apply(DetailAction::FetchStarted { token: 1 });
        state.apply(DetailAction::FetchFinished {
            token: 1,
            result: Ok(todo(false)),
        });

        state.apply(DetailAction::CompletionChanged { completed: true });
        assert!(state.todo.as_ref().unwrap().completed);

        state.apply(DetailAction::CompletionChanged { completed: false });
        assert!(!state.todo.as_ref().unwrap().completed);
    }
}
