use shared::{FormMode, FormState};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::services::api::ApiClient;
use crate::Route;

pub struct UseTodoFormResult {
    pub state: FormState,
    pub actions: UseTodoFormActions,
}

#[derive(Clone)]
pub struct UseTodoFormActions {
    pub set_title: Callback<String>,
    pub set_description: Callback<String>,
    pub set_completed: Callback<bool>,
    pub submit: Callback<()>,
}

/// Form controller, dual-mode on `id`: `None` creates, `Some` edits.
///
/// Edit mode pre-loads the record before the fields render; a failed
/// load aborts back to the list. Submission validates locally first and
/// never issues a request for a blank title.
#[hook]
pub fn use_todo_form(api_client: &ApiClient, id: Option<i64>) -> UseTodoFormResult {
    let mode = match id {
        Some(id) => FormMode::Edit(id),
        None => FormMode::Create,
    };
    let form = use_state(|| FormState::new(mode));
    let next_token = use_mut_ref(|| 0u64);
    let navigator = use_navigator();

    // Pre-load in edit mode; also resets the state when the route
    // switches between create and edit without a remount. Preloads are
    // token-guarded like the list and detail fetches: a completion for a
    // superseded id must not overwrite the newer effect's state.
    use_effect_with(id, {
        let api_client = api_client.clone();
        let form = form.clone();
        let next_token = next_token.clone();
        let navigator = navigator.clone();

        move |id: &Option<i64>| {
            let token = {
                let mut seq = next_token.borrow_mut();
                *seq += 1;
                *seq
            };
            match *id {
                None => {
                    if form.mode != FormMode::Create {
                        form.set(FormState::new(FormMode::Create));
                    }
                }
                Some(id) => {
                    form.set(FormState::new(FormMode::Edit(id)));

                    let api_client = api_client.clone();
                    let form = form.clone();
                    let next_token = next_token.clone();
                    let navigator = navigator.clone();
                    spawn_local(async move {
                        let result = api_client.get_todo(id).await;
                        if *next_token.borrow() != token {
                            return;
                        }
                        match result {
                            Ok(todo) => {
                                let mut next = FormState::new(FormMode::Edit(id));
                                next.seed(&todo);
                                form.set(next);
                            }
                            Err(err) => {
                                gloo::console::error!(
                                    "Failed to fetch todo details:",
                                    err.to_string()
                                );
                                if let Some(navigator) = navigator {
                                    navigator.push(&Route::Home);
                                }
                            }
                        }
                    });
                }
            }
            || ()
        }
    });

    let set_title = {
        let form = form.clone();
        Callback::from(move |value: String| {
            let mut next = (*form).clone();
            next.set_title(value);
            form.set(next);
        })
    };

    let set_description = {
        let form = form.clone();
        Callback::from(move |value: String| {
            let mut next = (*form).clone();
            next.set_description(value);
            form.set(next);
        })
    };

    let set_completed = {
        let form = form.clone();
        Callback::from(move |value: bool| {
            let mut next = (*form).clone();
            next.set_completed(value);
            form.set(next);
        })
    };

    let submit = {
        let api_client = api_client.clone();
        let form = form.clone();
        let navigator = navigator.clone();

        Callback::from(move |_| {
            let mut next = (*form).clone();
            if !next.validate() {
                form.set(next);
                return;
            }
            next.begin_submit();
            form.set(next.clone());

            let api_client = api_client.clone();
            let form = form.clone();
            let navigator = navigator.clone();
            spawn_local(async move {
                let draft = next.draft();
                let result = match next.mode {
                    FormMode::Create => api_client.create_todo(&draft).await.map(|_| ()),
                    FormMode::Edit(id) => api_client.update_todo(id, &draft).await.map(|_| ()),
                };

                match result {
                    Ok(()) => {
                        if let Some(navigator) = navigator {
                            navigator.push(&Route::Home);
                        }
                    }
                    Err(err) => {
                        gloo::console::error!("Failed to save todo:", err.to_string());
                        let mut failed = next;
                        failed.apply_failure(&err);
                        form.set(failed);
                    }
                }
            });
        })
    };

    UseTodoFormResult {
        state: (*form).clone(),
        actions: UseTodoFormActions {
            set_title,
            set_description,
            set_completed,
            submit,
        },
    }
}
