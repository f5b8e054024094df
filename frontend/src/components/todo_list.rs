use shared::{Filter, Todo};
use web_sys::HtmlInputElement;
use yew::prelude::*;
use yew_router::prelude::*;

use super::confirm_gate;
use crate::hooks::use_todo_list::use_todo_list;
use crate::services::api::ApiClient;
use crate::services::dates::format_timestamp;
use crate::Route;

fn description_preview(todo: &Todo) -> String {
    match &todo.description {
        Some(text) if text.chars().count() > 100 => {
            format!("{}...", text.chars().take(100).collect::<String>())
        }
        Some(text) if !text.is_empty() => text.clone(),
        _ => "No description".to_string(),
    }
}

#[function_component(TodoListView)]
pub fn todo_list_view() -> Html {
    let api_client = ApiClient::new();
    let list = use_todo_list(&api_client, confirm_gate());
    let search_input = use_state(String::new);

    let on_search_input = {
        let search_input = search_input.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            search_input.set(input.value());
        })
    };

    let on_search_submit = {
        let search = list.actions.search.clone();
        let search_input = search_input.clone();
        Callback::from(move |_: MouseEvent| {
            search.emit((*search_input).clone());
        })
    };

    let on_search_keydown = {
        let search = list.actions.search.clone();
        let search_input = search_input.clone();
        Callback::from(move |e: KeyboardEvent| {
            if e.key() == "Enter" {
                search.emit((*search_input).clone());
            }
        })
    };

    let filter_button = |filter: Filter| {
        let class = if list.state.filter == filter {
            "btn btn-filter active"
        } else {
            "btn btn-filter"
        };
        let onclick = {
            let set_filter = list.actions.set_filter.clone();
            let search_input = search_input.clone();
            Callback::from(move |_| {
                search_input.set(String::new());
                set_filter.emit(filter);
            })
        };
        html! { <button {class} {onclick}>{filter.label()}</button> }
    };

    if list.state.loading {
        return html! {
            <div class="loading">{"Loading todos..."}</div>
        };
    }

    if let Some(error) = &list.state.error {
        let on_retry = {
            let refresh = list.actions.refresh.clone();
            Callback::from(move |_| refresh.emit(()))
        };
        return html! {
            <div class="error-state">
                <div class="alert alert-error">{error}</div>
                <button class="btn btn-primary" onclick={on_retry}>{"Try Again"}</button>
            </div>
        };
    }

    html! {
        <>
            {if let Some(flash) = &list.state.flash {
                let on_dismiss = {
                    let clear_flash = list.actions.clear_flash.clone();
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

            <div class="list-toolbar">
                <div class="search-group">
                    <input
                        type="text"
                        class="search-input"
                        placeholder="Search todos..."
                        value={(*search_input).clone()}
                        oninput={on_search_input}
                        onkeydown={on_search_keydown}
                    />
                    <button class="btn btn-secondary" onclick={on_search_submit}>
                        {"Search"}
                    </button>
                </div>
                <div class="filter-group">
                    {filter_button(Filter::All)}
                    {filter_button(Filter::Active)}
                    {filter_button(Filter::Completed)}
                </div>
                <Link<Route> classes="btn btn-success" to={Route::Add}>{"Add Todo"}</Link<Route>>
            </div>

            {if list.state.todos.is_empty() {
                html! {
                    <div class="empty-state">
                        <h3>{"No todos found"}</h3>
                        <p>{"Create a new todo to get started!"}</p>
                        <Link<Route> classes="btn btn-primary" to={Route::Add}>
                            {"Add Todo"}
                        </Link<Route>>
                    </div>
                }
            } else {
                html! {
                    <div class="todo-cards">
                        {for list.state.todos.iter().map(|todo| {
                            let on_toggle = {
                                let toggle_completed = list.actions.toggle_completed.clone();
                                let todo = todo.clone();
                                Callback::from(move |_| toggle_completed.emit(todo.clone()))
                            };
                            let on_delete = {
                                let delete_todo = list.actions.delete_todo.clone();
                                let id = todo.id;
                                Callback::from(move |_| delete_todo.emit(id))
                            };
                            let card_class = if todo.completed {
                                "todo-card completed"
                            } else {
                                "todo-card"
                            };
                            let badge = if todo.completed {
                                html! { <span class="badge badge-success">{"Completed"}</span> }
                            } else {
                                html! { <span class="badge badge-warning">{"Active"}</span> }
                            };

                            html! {
                                <div class={card_class} key={todo.id}>
                                    <input
                                        type="checkbox"
                                        checked={todo.completed}
                                        onchange={on_toggle}
                                    />
                                    <div class="todo-card-body">
                                        <Link<Route> to={Route::Detail { id: todo.id }}>
                                            <h3 class="todo-title">{&todo.title}</h3>
                                        </Link<Route>>
                                        <p class="todo-description">{description_preview(todo)}</p>
                                    </div>
                                    <div class="todo-card-meta">
                                        {badge}
                                        <small class="todo-created">
                                            {format!("Created: {}", format_timestamp(&todo.created_at))}
                                        </small>
                                    </div>
                                    <div class="todo-card-actions">
                                        <Link<Route>
                                            classes="btn btn-outline"
                                            to={Route::Edit { id: todo.id }}
                                        >
                                            {"Edit"}
                                        </Link<Route>>
                                        <button class="btn btn-danger" onclick={on_delete}>
                                            {"Delete"}
                                        </button>
                                    </div>
                                </div>
                            }
                        })}
                    </div>
                }
            }}
        </>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn todo_with_description(description: Option<&str>) -> Todo {
        Todo {
            id: 1,
            title: "t".to_string(),
            description: description.map(str::to_string),
            completed: false,
            created_at: Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap(),
            updated_at: None,
        }
    }

    #[test]
    fn preview_truncates_long_descriptions() {
        let long = "x".repeat(150);
        let preview = description_preview(&todo_with_description(Some(&long)));
        assert_eq!(preview.chars().count(), 103);
        assert!(preview.ends_with("..."));
    }

    #[test]
    fn preview_falls_back_for_missing_description() {
        assert_eq!(
            description_preview(&todo_with_description(None)),
            "No description"
        );
        assert_eq!(
            description_preview(&todo_with_description(Some(""))),
            "No description"
        );
    }
}
