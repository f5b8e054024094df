use yew::prelude::*;
use yew_router::prelude::*;

use super::confirm_gate;
use crate::hooks::use_todo_detail::use_todo_detail;
use crate::services::api::ApiClient;
use crate::services::dates::format_timestamp_long;
use crate::Route;

#[derive(Properties, PartialEq)]
pub struct TodoDetailProps {
    pub id: i64,
}

#[function_component(TodoDetailView)]
pub fn todo_detail_view(props: &TodoDetailProps) -> Html {
    let api_client = ApiClient::new();
    let detail = use_todo_detail(&api_client, props.id, confirm_gate());

    if detail.state.loading {
        return html! {
            <div class="loading">{"Loading todo details..."}</div>
        };
    }

    if let Some(error) = &detail.state.error {
        return html! {
            <div class="error-state">
                <div class="alert alert-error">{error}</div>
                <Link<Route> classes="btn btn-primary" to={Route::Home}>
                    {"Back to Todo List"}
                </Link<Route>>
            </div>
        };
    }

    let Some(todo) = &detail.state.todo else {
        return html! {};
    };

    let on_toggle = {
        let toggle_completed = detail.actions.toggle_completed.clone();
        Callback::from(move |_| toggle_completed.emit(()))
    };
    let on_delete = {
        let delete_todo = detail.actions.delete_todo.clone();
        Callback::from(move |_| delete_todo.emit(()))
    };
    let toggle_label = if todo.completed {
        "Mark as Active"
    } else {
        "Mark as Completed"
    };
    let badge = if todo.completed {
        html! { <span class="badge badge-success">{"Completed"}</span> }
    } else {
        html! { <span class="badge badge-warning">{"Active"}</span> }
    };

    html! {
        <div class="detail-card">
            {if let Some(flash) = &detail.state.flash {
                let on_dismiss = {
                    let clear_flash = detail.actions.clear_flash.clone();
                    Callback::from(move |_| clear_flash.emit(()))
                };
                html! {
                    <div class="flash-message">
                        {flash}
                        <button class="flash-dismiss" onclick={on_dismiss}>{"×"}</button>
                    </div>
                }
            } else {
                html! {}
            }}

            <div class="detail-header">
                <Link<Route> classes="btn btn-outline" to={Route::Home}>{"Back"}</Link<Route>>
                <span class="detail-title">{"Todo Details"}</span>
                <div class="detail-actions">
                    <button class="btn btn-outline" onclick={on_toggle}>{toggle_label}</button>
                    <Link<Route> classes="btn btn-outline" to={Route::Edit { id: todo.id }}>
                        {"Edit"}
                    </Link<Route>>
                    <button class="btn btn-danger" onclick={on_delete}>{"Delete"}</button>
                </div>
            </div>

            <div class="detail-body">
                <div class="detail-row">
                    <span class="detail-label">{"Status:"}</span>
                    {badge}
                </div>
                <div class="detail-row">
                    <span class="detail-label">{"Title:"}</span>
                    <h2>{&todo.title}</h2>
                </div>
                <div class="detail-row">
                    <span class="detail-label">{"Description:"}</span>
                    {match &todo.description {
                        Some(text) if !text.is_empty() => html! { <p>{text}</p> },
                        _ => html! { <p class="muted">{"No description provided"}</p> },
                    }}
                </div>
                <div class="detail-row">
                    <span class="detail-label">{"Created At:"}</span>
                    {format_timestamp_long(&todo.created_at)}
                </div>
                {if let Some(updated_at) = &todo.updated_at {
                    html! {
                        <div class="detail-row">
                            <span class="detail-label">{"Last Updated:"}</span>
                            {format_timestamp_long(updated_at)}
                        </div>
                    }
                } else {
                    html! {}
                }}
            </div>
        </div>
    }
}
