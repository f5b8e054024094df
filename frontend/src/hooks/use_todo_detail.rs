use std::rc::Rc;

use shared::{DetailAction, DetailState};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::services::api::ApiClient;
use crate::Route;

pub struct DetailStore(pub DetailState);

impl Reducible for DetailStore {
    type Action = DetailAction;

    fn reduce(self: Rc<Self>, action: DetailAction) -> Rc<Self> {
        let mut next = self.0.clone();
        next.apply(action);
        Rc::new(DetailStore(next))
    }
}

pub struct UseTodoDetailResult {
    pub state: DetailState,
    pub actions: UseTodoDetailActions,
}

#[derive(Clone)]
pub struct UseTodoDetailActions {
    pub toggle_completed: Callback<()>,
    pub delete_todo: Callback<()>,
    pub clear_flash: Callback<()>,
}

/// Detail view controller.
///
/// Fetches the record on mount and whenever `id` changes. Delete
/// navigates back to the list on success; a fetch failure (including a
/// 404) leaves the view in a terminal error state.
#[hook]
pub fn use_todo_detail(
    api_client: &ApiClient,
    id: i64,
    confirm_delete: Callback<String, bool>,
) -> UseTodoDetailResult {
    let store = use_reducer(|| DetailStore(DetailState::default()));
    let next_token = use_mut_ref(|| 0u64);
    let navigator = use_navigator();

    use_effect_with(id, {
        let api_client = api_client.clone();
        let store = store.clone();
        let next_token = next_token.clone();

        move |id: &i64| {
            let id = *id;
            let token = {
                let mut seq = next_token.borrow_mut();
                *seq += 1;
                *seq
            };
            store.dispatch(DetailAction::FetchStarted { token });

            let api_client = api_client.clone();
            let store = store.clone();
            spawn_local(async move {
                let result = api_client.get_todo(id).await;
                if let Err(err) = &result {
                    gloo::console::error!("Failed to fetch todo details:", err.to_string());
                }
                store.dispatch(DetailAction::FetchFinished { token, result });
            });

            || ()
        }
    });

    let toggle_completed = {
        let api_client = api_client.clone();
        let store = store.clone();

        Callback::from(move |_| {
            let Some(todo) = store.0.todo.clone() else {
                return;
            };
            let draft = todo.draft_with_completed(!todo.completed);

            let api_client = api_client.clone();
            let store = store.clone();
            spawn_local(async move {
                match api_client.update_todo(todo.id, &draft).await {
                    Ok(updated) => {
                        store.dispatch(DetailAction::CompletionChanged {
                            completed: updated.completed,
                        });
                        store.dispatch(DetailAction::Flash {
                            message: format!(
                                "Todo marked as {}",
                                if updated.completed { "completed" } else { "active" }
                            ),
                        });
                    }
                    Err(err) => {
                        gloo::console::error!("Failed to update todo status:", err.to_string());
                        store.dispatch(DetailAction::Flash {
                            message: "Failed to update todo status".to_string(),
                        });
                    }
                }
            });
        })
    };

    let delete_todo = {
        let api_client = api_client.clone();
        let store = store.clone();
        let confirm_delete = confirm_delete.clone();
        let navigator = navigator.clone();

        Callback::from(move |_| {
            if !confirm_delete.emit("Are you sure you want to delete this todo?".to_string()) {
                return;
            }

            let api_client = api_client.clone();
            let store = store.clone();
            let navigator = navigator.clone();
            spawn_local(async move {
                match api_client.delete_todo(id).await {
                    Ok(()) => {
                        if let Some(navigator) = navigator {
                            navigator.push(&Route::Home);
                        }
                    }
                    Err(err) => {
                        gloo::console::error!("Failed to delete todo:", err.to_string());
                        store.dispatch(DetailAction::Flash {
                            message: "Failed to delete todo".to_string(),
                        });
                    }
                }
            });
        })
    };

    let clear_flash = {
        let store = store.clone();
        Callback::from(move |_| store.dispatch(DetailAction::FlashCleared))
    };

    UseTodoDetailResult {
        state: store.0.clone(),
        actions: UseTodoDetailActions {
            toggle_completed,
            delete_todo,
            clear_flash,
        },
    }
}
