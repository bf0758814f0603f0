use leptos::prelude::*;

#[component]
pub fn NotFoundPage() -> impl IntoView {
    view! {
        <div class="page not-found-page">
            <h2>"404"</h2>
            <p class="page-description">"We couldn't find that page."</p>
            <a href="/" class="btn btn-primary">"Back to Home"</a>
        </div>
    }
}
