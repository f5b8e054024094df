use yew::prelude::*;
use yew_router::prelude::*;

use crate::Route;

#[function_component(Header)]
pub fn header() -> Html {
    html! {
        <header class="header">
            <div class="container">
                <h1>
                    <Link<Route> to={Route::Home}>{"Todo Tracker"}</Link<Route>>
                </h1>
                <nav class="header-nav">
                    <Link<Route> classes="nav-link" to={Route::Home}>{"Todos"}</Link<Route>>
                    <Link<Route> classes="nav-link" to={Route::Add}>{"Add Todo"}</Link<Route>>
                </nav>
            </div>
        </header>
    }
}
