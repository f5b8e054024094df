use yew::prelude::*;
use yew_router::prelude::*;

mod components;
mod hooks;
mod services;

use components::header::Header;
use components::not_found::NotFoundView;
use components::todo_detail::TodoDetailView;
use components::todo_form::TodoFormView;
use components::todo_list::TodoListView;

#[derive(Debug, Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/add")]
    Add,
    #[at("/edit/:id")]
    Edit { id: i64 },
    #[at("/todos/:id")]
    Detail { id: i64 },
    #[not_found]
    #[at("/404")]
    NotFound,
}

fn switch(route: Route) -> Html {
    match route {
        Route::Home => html! { <TodoListView /> },
        Route::Add => html! { <TodoFormView /> },
        Route::Edit { id } => html! { <TodoFormView id={Some(id)} /> },
        Route::Detail { id } => html! { <TodoDetailView {id} /> },
        Route::NotFound => html! { <NotFoundView /> },
    }
}

#[function_component(App)]
fn app() -> Html {
    html! {
        <BrowserRouter>
            <Header />
            <main class="main">
                <div class="container">
                    <Switch<Route> render={switch} />
                </div>
            </main>
        </BrowserRouter>
    }
}

fn main() {
    yew::Renderer::<App>::new().render();
}
