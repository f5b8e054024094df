use std::rc::Rc;

use shared::{FetchSpec, Filter, ListAction, ListState, Todo};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::services::api::ApiClient;

/// Wrapper so the shared reducer can back a yew `use_reducer` store.
pub struct ListStore(pub ListState);

impl Reducible for ListStore {
    type Action = ListAction;

    fn reduce(self: Rc<Self>, action: ListAction) -> Rc<Self> {
        let mut next = self.0.clone();
        next.apply(action);
        Rc::new(ListStore(next))
    }
}

pub struct UseTodoListResult {
    pub state: ListState,
    pub actions: UseTodoListActions,
}

#[derive(Clone)]
pub struct UseTodoListActions {
    pub set_filter: Callback<Filter>,
    pub search: Callback<String>,
    pub refresh: Callback<()>,
    pub delete_todo: Callback<i64>,
    pub toggle_completed: Callback<Todo>,
    pub clear_flash: Callback<()>,
}

/// List view controller.
///
/// Owns the todo collection, the active filter and the last submitted
/// search term. All state transitions go through the shared reducer;
/// this hook only issues the requests and feeds completions back in.
/// `confirm_delete` is the caller-supplied confirmation gate invoked
/// before a delete request is committed.
#[hook]
pub fn use_todo_list(
    api_client: &ApiClient,
    confirm_delete: Callback<String, bool>,
) -> UseTodoListResult {
    let store = use_reducer(|| ListStore(ListState::default()));
    let next_token = use_mut_ref(|| 0u64);

    let run_fetch = {
        let api_client = api_client.clone();
        let store = store.clone();
        let next_token = next_token.clone();

        Callback::from(move |(filter, search_term, spec): (Filter, String, FetchSpec)| {
            let token = {
                let mut seq = next_token.borrow_mut();
                *seq += 1;
                *seq
            };
            store.dispatch(ListAction::FetchStarted {
                token,
                filter,
                search_term,
            });

            let api_client = api_client.clone();
            let store = store.clone();
            spawn_local(async move {
                let result = api_client.fetch(&spec).await;
                if let Err(err) = &result {
                    gloo::console::error!("Failed to fetch todos:", err.to_string());
                }
                store.dispatch(ListAction::FetchFinished { token, result });
            });
        })
    };

    // Changing the filter replaces the result set and clears any search.
    let set_filter = {
        let run_fetch = run_fetch.clone();
        Callback::from(move |filter: Filter| {
            run_fetch.emit((filter, String::new(), filter.fetch_spec()));
        })
    };

    // A non-blank search supersedes the filter's result set; a blank one
    // re-runs the current filter's fetch.
    let search = {
        let run_fetch = run_fetch.clone();
        let store = store.clone();
        Callback::from(move |term: String| {
            let spec = store.0.search_spec(&term);
            let recorded = match &spec {
                FetchSpec::ByTitle(title) => title.clone(),
                _ => String::new(),
            };
            run_fetch.emit((store.0.filter, recorded, spec));
        })
    };

    let refresh = {
        let run_fetch = run_fetch.clone();
        let store = store.clone();
        Callback::from(move |_| {
            run_fetch.emit((store.0.filter, String::new(), store.0.filter_spec()));
        })
    };

    let delete_todo = {
        let api_client = api_client.clone();
        let store = store.clone();
        let confirm_delete = confirm_delete.clone();

        Callback::from(move |id: i64| {
            if !confirm_delete.emit("Are you sure you want to delete this todo?".to_string()) {
                return;
            }

            let api_client = api_client.clone();
            let store = store.clone();
            spawn_local(async move {
                match api_client.delete_todo(id).await {
                    Ok(()) => {
                        store.dispatch(ListAction::Removed { id });
                        store.dispatch(ListAction::Flash {
                            message: "Todo deleted successfully".to_string(),
                        });
                    }
                    Err(err) => {
                        gloo::console::error!("Failed to delete todo:", err.to_string());
                        store.dispatch(ListAction::Flash {
                            message: "Failed to delete todo".to_string(),
                        });
                    }
                }
            });
        })
    };

    let toggle_completed = {
        let api_client = api_client.clone();
        let store = store.clone();

        Callback::from(move |todo: Todo| {
            let draft = todo.draft_with_completed(!todo.completed);

            let api_client = api_client.clone();
            let store = store.clone();
            spawn_local(async move {
                match api_client.update_todo(todo.id, &draft).await {
                    Ok(updated) => {
                        store.dispatch(ListAction::CompletionChanged {
                            id: todo.id,
                            completed: updated.completed,
                        });
                        store.dispatch(ListAction::Flash {
                            message: format!(
                                "Todo marked as {}",
                                if updated.completed { "completed" } else { "active" }
                            ),
                        });
                    }
                    Err(err) => {
                        gloo::console::error!("Failed to update todo status:", err.to_string());
                        store.dispatch(ListAction::Flash {
                            message: "Failed to update todo status".to_string(),
                        });
                    }
                }
            });
        })
    };

    let clear_flash = {
        let store = store.clone();
        Callback::from(move |_| store.dispatch(ListAction::FlashCleared))
    };

    // Initial load.
    use_effect_with((), {
        let set_filter = set_filter.clone();
        move |_| {
            set_filter.emit(Filter::All);
            || ()
        }
    });

    UseTodoListResult {
        state: store.0.clone(),
        actions: UseTodoListActions {
            set_filter,
            search,
            refresh,
            delete_todo,
            toggle_completed,
            clear_flash,
        },
    }
}
