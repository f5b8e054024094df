use yew::prelude::*;
use yew_router::prelude::*;

use crate::Route;

#[function_component(NotFoundView)]
pub fn not_found_view() -> Html {
    html! {
        <div class="empty-state">
            <h2>{"Page not found"}</h2>
            <p>{"The page you are looking for does not exist."}</p>
            <Link<Route> classes="btn btn-primary" to={Route::Home}>
                {"Back to Todo List"}
            </Link<Route>>
        </div>
    }
}
