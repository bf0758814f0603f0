use leptos::prelude::*;

use crate::components::booking_modal::use_booking_modal;
use crate::theme::ThemeContext;

#[component]
pub fn Navbar() -> impl IntoView {
    let theme = expect_context::<ThemeContext>();
    let modal = use_booking_modal();

    let theme_icon = move || match theme.theme.get().as_str() {
        "light" => "\u{2600}",
        "dark" => "\u{263E}",
        _ => "\u{25D0}",
    };

    view! {
        <nav class="navbar">
            <a href="/" class="navbar-brand">
                <span class="navbar-title">"FixIt"</span>
                <span class="navbar-subtitle">"Laptop Care"</span>
            </a>
            <ul class="nav-list">
                <li class="nav-item"><a href="/" class="nav-link">"Home"</a></li>
                <li class="nav-item"><a href="/services" class="nav-link">"Services"</a></li>
                <li class="nav-item"><a href="/membership" class="nav-link">"Membership"</a></li>
                <li class="nav-item"><a href="/contact" class="nav-link">"Contact"</a></li>
                <li class="nav-item"><a href="/profile" class="nav-link">"Profile"</a></li>
                <li class="nav-item"><a href="/login" class="nav-link">"Login"</a></li>
            </ul>
            <div class="navbar-actions">
                <button
                    class="btn btn-icon"
                    title="Toggle theme"
                    on:click=move |_| theme.cycle()
                >
                    {theme_icon}
                </button>
                <button class="btn btn-primary" on:click=move |_| modal.open()>
                    "Book Repair"
                </button>
            </div>
        </nav>
    }
}
