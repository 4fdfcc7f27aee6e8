use leptos::prelude::*;

#[component]
pub fn NotFoundPage() -> impl IntoView {
    view! {
        <div class="not-found">
            <h1>"Page not found !"</h1>
            <a href="/">"Back home"</a>
        </div>
    }
}
