//! List view state machine.
//!
//! A pure reducer over [`ListAction`]: the hook layer issues the actual
//! HTTP requests and feeds completions back in, so every state
//! transition is unit-testable without a transport. Each fetch carries a
//! generation token; a completion whose token is no longer the most
//! recently issued one is discarded, so a slow response can never
//! overwrite the result of a fetch started after it.

use crate::{ApiError, FetchSpec, Filter, Todo};

#[derive(Debug, Clone, PartialEq)]
pub struct ListState {
    pub todos: Vec<Todo>,
    pub filter: Filter,
    /// Last submitted search term; empty when the current result set
    /// came from a filter fetch.
    pub search_term: String,
    pub loading: bool,
    /// Terminal fetch failure, distinct from an empty result set.
    pub error: Option<String>,
    /// Transient mutation notification (delete/toggle outcome).
    pub flash: Option<String>,
    pending: Option<u64>,
}

impl Default for ListState {
    fn default() -> Self {
        Self {
            todos: Vec::new(),
            filter: Filter::All,
            search_term: String::new(),
            loading: true,
            error: None,
            flash: None,
            pending: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ListAction {
    /// A fetch was issued. Replaces the filter and search term so the
    /// view reflects what is being requested while it is in flight.
    FetchStarted {
        token: u64,
        filter: Filter,
        search_term: String,
    },
    FetchFinished {
        token: u64,
        result: Result<Vec<Todo>, ApiError>,
    },
    /// Confirmed delete succeeded; drop the local entry, no re-fetch.
    Removed { id: i64 },
    /// Toggle update succeeded; patch the local entry, no re-fetch.
    /// Other fields stay as fetched (accepted staleness).
    CompletionChanged { id: i64, completed: bool },
    Flash { message: String },
    FlashCleared,
}

impl ListState {
    /// The request the current filter maps to.
    pub fn filter_spec(&self) -> FetchSpec {
        self.filter.fetch_spec()
    }

    /// The request a search submission maps to. A blank term falls back
    /// to the active filter's fetch.
    pub fn search_spec(&self, term: &str) -> FetchSpec {
        let term = term.trim();
        if term.is_empty() {
            self.filter.fetch_spec()
        } else {
            FetchSpec::ByTitle(term.to_string())
        }
    }

    pub fn apply(&mut self, action: ListAction) {
        match action {
            ListAction::FetchStarted {
                token,
                filter,
                search_term,
            } => {
                self.filter = filter;
                self.search_term = search_term;
                self.loading = true;
                self.error = None;
                self.pending = Some(token);
            }
            ListAction::FetchFinished { token, result } => {
                if self.pending != Some(token) {
                    return;
                }
                self.pending = None;
                self.loading = false;
                match result {
                    Ok(todos) => {
                        self.todos = todos;
                        self.error = None;
                    }
                    Err(err) => {
                        self.error = Some(format!("Failed to fetch todos: {err}"));
                    }
                }
            }
            ListAction::Removed { id } => {
                self.todos.retain(|todo| todo.id != id);
            }
            ListAction::CompletionChanged { id, completed } => {
                if let Some(todo) = self.todos.iter_mut().find(|todo| todo.id == id) {
                    todo.completed = completed;
                }
            }
            ListAction::Flash { message } => self.flash = Some(message),
            ListAction::FlashCleared => self.flash = None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn todo(id: i64, title: &str, completed: bool) -> Todo {
        Todo {
            id,
            title: title.to_string(),
            description: None,
            completed,
            created_at: Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap(),
            updated_at: None,
        }
    }

    fn fetched(state: &mut ListState, token: u64, todos: Vec<Todo>) {
        state.apply(ListAction::FetchFinished {
            token,
            result: Ok(todos),
        });
    }

    #[test]
    fn filter_fetch_clears_search_term() {
        let mut state = ListState::default();
        state.search_term = "milk".to_string();

        state.apply(ListAction::FetchStarted {
            token: 1,
            filter: Filter::Completed,
            search_term: String::new(),
        });

        assert_eq!(state.filter, Filter::Completed);
        assert!(state.search_term.is_empty());
        assert!(state.loading);
    }

    #[test]
    fn fetch_replaces_todos_wholesale() {
        let mut state = ListState::default();
        state.todos = vec![todo(1, "old", false)];

        state.apply(ListAction::FetchStarted {
            token: 1,
            filter: Filter::All,
            search_term: String::new(),
        });
        fetched(&mut state, 1, vec![todo(2, "new", false), todo(3, "newer", true)]);

        assert_eq!(state.todos.len(), 2);
        assert!(!state.loading);
        assert!(state.error.is_none());
    }

    #[test]
    fn stale_completion_is_discarded() {
        let mut state = ListState::default();
        state.apply(ListAction::FetchStarted {
            token: 1,
            filter: Filter::All,
            search_term: String::new(),
        });
        state.apply(ListAction::FetchStarted {
            token: 2,
            filter: Filter::Active,
            search_term: String::new(),
        });

        // The response to the first fetch arrives late.
        fetched(&mut state, 1, vec![todo(1, "stale", true)]);
        assert!(state.todos.is_empty());
        assert!(state.loading);

        fetched(&mut state, 2, vec![todo(2, "fresh", false)]);
        assert_eq!(state.todos[0].title, "fresh");
        assert!(!state.loading);
    }

    #[test]
    fn fetch_failure_sets_terminal_error() {
        let mut state = ListState::default();
        state.todos = vec![todo(1, "kept until failure", false)];

        state.apply(ListAction::FetchStarted {
            token: 1,
            filter: Filter::All,
            search_term: String::new(),
        });
        state.apply(ListAction::FetchFinished {
            token: 1,
            result: Err(ApiError::network("connection refused")),
        });

        assert!(state.error.is_some());
        assert!(!state.loading);
    }

    #[test]
    fn error_clears_on_next_fetch() {
        let mut state = ListState::default();
        state.error = Some("Failed to fetch todos".to_string());

        state.apply(ListAction::FetchStarted {
            token: 1,
            filter: Filter::All,
            search_term: String::new(),
        });

        assert!(state.error.is_none());
    }

    #[test]
    fn removed_drops_only_the_matching_entry() {
        let mut state = ListState::default();
        state.todos = vec![todo(1, "a", false), todo(2, "b", false)];

        state.apply(ListAction::Removed { id: 1 });

        assert_eq!(state.todos.len(), 1);
        assert_eq!(state.todos[0].id, 2);
    }

    #[test]
    fn toggling_twice_restores_the_original_flag() {
        let mut state = ListState::default();
        state.todos = vec![todo(1, "a", false)];

        state.apply(ListAction::CompletionChanged {
            id: 1,
            completed: true,
        });
        assert!(state.todos[0].completed);

        state.apply(ListAction::CompletionChanged {
            id: 1,
            completed: false,
        });
        assert!(!state.todos[0].completed);
    }

    #[test]
    fn completion_change_for_unknown_id_is_a_no_op() {
        let mut state = ListState::default();
        state.todos = vec![todo(1, "a", false)];

        state.apply(ListAction::CompletionChanged {
            id: 99,
            completed: true,
        });

        assert!(!state.todos[0].completed);
    }

    #[test]
    fn blank_search_falls_back_to_the_current_filter() {
        let mut state = ListState::default();
        state.filter = Filter::Active;

        assert_eq!(state.search_spec("   "), FetchSpec::ByStatus(false));
        assert_eq!(
            state.search_spec("milk"),
            FetchSpec::ByTitle("milk".to_string())
        );
    }
}
