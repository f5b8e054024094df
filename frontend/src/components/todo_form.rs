use web_sys::{HtmlInputElement, HtmlTextAreaElement};
use yew::prelude::*;
use yew_router::prelude::*;

use crate::hooks::use_todo_form::use_todo_form;
use crate::services::api::ApiClient;
use crate::Route;

#[derive(Properties, PartialEq)]
pub struct TodoFormProps {
    #[prop_or_default]
    pub id: Option<i64>,
}

#[function_component(TodoFormView)]
pub fn todo_form_view(props: &TodoFormProps) -> Html {
    let api_client = ApiClient::new();
    let form = use_todo_form(&api_client, props.id);
    let navigator = use_navigator();

    if form.state.loading {
        return html! {
            <div class="loading">{"Loading todo details..."}</div>
        };
    }

    let on_submit = {
        let submit = form.actions.submit.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            submit.emit(());
        })
    };

    let on_title_change = {
        let set_title = form.actions.set_title.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            set_title.emit(input.value());
        })
    };

    let on_description_change = {
        let set_description = form.actions.set_description.clone();
        Callback::from(move |e: Event| {
            let input: HtmlTextAreaElement = e.target_unchecked_into();
            set_description.emit(input.value());
        })
    };

    let on_completed_change = {
        let set_completed = form.actions.set_completed.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            set_completed.emit(input.checked());
        })
    };

    let on_cancel = Callback::from(move |_| {
        if let Some(navigator) = &navigator {
            navigator.push(&Route::Home);
        }
    });

    let heading = if form.state.is_edit() {
        "Edit Todo"
    } else {
        "Create New Todo"
    };
    let submit_label = match (form.state.is_edit(), form.state.saving) {
        (true, true) => "Updating...",
        (true, false) => "Update Todo",
        (false, true) => "Creating...",
        (false, false) => "Create Todo",
    };
    let title_error = form.state.error_for("title");
    let title_class = if title_error.is_some() {
        "form-input invalid"
    } else {
        "form-input"
    };

    html! {
        <div class="form-card">
            <h2>{heading}</h2>

            {if let Some(error) = &form.state.form_error {
                html! { <div class="alert alert-error">{error}</div> }
            } else {
                html! {}
            }}

            <form onsubmit={on_submit}>
                <div class="form-group">
                    <label for="title">{"Title"}</label>
                    <input
                        type="text"
                        id="title"
                        class={title_class}
                        placeholder="Enter todo title"
                        value={form.state.title.clone()}
                        onchange={on_title_change}
                        disabled={form.state.saving}
                    />
                    {if let Some(error) = title_error {
                        html! { <div class="field-error">{error}</div> }
                    } else {
                        html! {}
                    }}
                </div>

                <div class="form-group">
                    <label for="description">{"Description"}</label>
                    <textarea
                        id="description"
                        class="form-input"
                        rows="3"
                        placeholder="Enter todo description (optional)"
                        value={form.state.description.clone()}
                        onchange={on_description_change}
                        disabled={form.state.saving}
                    />
                </div>

                <div class="form-group">
                    <label class="checkbox-label">
                        <input
                            type="checkbox"
                            checked={form.state.completed}
                            onchange={on_completed_change}
                            disabled={form.state.saving}
                        />
                        {"Mark as completed"}
                    </label>
                </div>

                <div class="form-actions">
                    <button type="button" class="btn btn-secondary" onclick={on_cancel}>
                        {"Cancel"}
                    </button>
                    <button type="submit" class="btn btn-primary" disabled={form.state.saving}>
                        {submit_label}
                    </button>
                </div>
            </form>
        </div>
    }
}
