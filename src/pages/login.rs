use fixit_core::api::{RegisterRequest, RemoteBooking, UserApi};
use fixit_core::profile::UserProfile;
use fixit_core::session::SessionUser;
use fixit_core::{RepairServices, StoreEvent};
use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use wasm_bindgen_futures::spawn_local;

use crate::components::toast::use_toasts;
use crate::hooks::{use_services, use_store_version};

const SESSION_EVENTS: &[StoreEvent] = &[StoreEvent::SessionChanged];
const GENERIC_FAILURE: &str = "Something went wrong. Please try again.";

/// After a successful login, seed the local profile from the account if the
/// customer has not filled one in yet.
fn adopt_session(services: &RepairServices, user: &SessionUser) {
    if let Err(e) = services.session.sign_in(user) {
        tracing::warn!("Failed to store session: {}", e);
        return;
    }
    if services.profiles.has_profile() {
        return;
    }
    let profile = UserProfile {
        name: user.name.clone(),
        email: user.email.clone(),
        phone: user.phone.clone(),
        member_since: chrono::Utc::now().format("%B %Y").to_string(),
        membership: None,
    };
    if let Err(e) = services.profiles.save_profile(profile) {
        tracing::debug!("Account details not usable as a profile: {}", e);
    }
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let services = use_services();
    let toasts = use_toasts();
    let navigate = use_navigate();
    let version = use_store_version(SESSION_EVENTS);

    let (registering, set_registering) = signal(false);
    let (name, set_name) = signal(String::new());
    let (email, set_email) = signal(String::new());
    let (phone, set_phone) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (is_loading, set_is_loading) = signal(false);

    let session = services.session.clone();
    let signed_in = Signal::derive(move || {
        version.get();
        session.current_user()
    });

    let svc = services.clone();
    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if email.get().trim().is_empty() || password.get().is_empty() {
            toasts.error("Email and password are required");
            return;
        }
        let api = match UserApi::new(&svc.config.api_base_url) {
            Ok(api) => api,
            Err(e) => {
                tracing::error!("{}", e);
                toasts.error(GENERIC_FAILURE);
                return;
            }
        };
        let services = svc.clone();
        let navigate = navigate.clone();
        let register = registering.get();
        let request = RegisterRequest {
            name: name.get().trim().to_string(),
            email: email.get().trim().to_string(),
            phone: phone.get().trim().to_string(),
            password: password.get(),
        };
        set_is_loading.set(true);
        spawn_local(async move {
            let result = if register {
                api.register(&request).await
            } else {
                api.login(&request.email, &request.password).await
            };
            set_is_loading.set(false);
            match result {
                Ok(auth) => {
                    let user = auth.into_session_user();
                    adopt_session(&services, &user);
                    set_password.set(String::new());
                    toasts.success(format!("Welcome, {}", user.name));
                    navigate("/profile", Default::default());
                }
                Err(e) => {
                    tracing::warn!("Authentication failed: {}", e);
                    toasts.error(GENERIC_FAILURE);
                }
            }
        });
    };

    let session = services.session.clone();
    let sign_out = move |_| match session.sign_out() {
        Ok(()) => toasts.info("Signed out"),
        Err(e) => toasts.error(e.to_string()),
    };

    view! {
        <div class="page login-page">
            {move || {
                let sign_out = sign_out.clone();
                signed_in
                    .get()
                    .map(|user| {
                        view! {
                            <div class="card signed-in">
                                <h2>{format!("Signed in as {}", user.name)}</h2>
                                <p class="muted">{user.email}</p>
                                <AccountBookings user_id=user.id />
                                <a href="/profile" class="btn btn-primary">"Go to Profile"</a>
                                <button class="btn btn-secondary" on:click=sign_out>"Sign Out"</button>
                            </div>
                        }
                    })
            }}

            <div class="auth-tabs">
                <button
                    class=move || if registering.get() { "tab" } else { "tab tab-active" }
                    on:click=move |_| set_registering.set(false)
                >
                    "Login"
                </button>
                <button
                    class=move || if registering.get() { "tab tab-active" } else { "tab" }
                    on:click=move |_| set_registering.set(true)
                >
                    "Register"
                </button>
            </div>

            <form class="auth-form" on:submit=on_submit>
                <Show when=move || registering.get()>
                    <div class="form-group">
                        <label for="auth-name">"Full Name"</label>
                        <input
                            id="auth-name"
                            type="text"
                            class="input"
                            prop:value=move || name.get()
                            on:input=move |ev| set_name.set(event_target_value(&ev))
                        />
                    </div>
                    <div class="form-group">
                        <label for="auth-phone">"Phone"</label>
                        <input
                            id="auth-phone"
                            type="tel"
                            class="input"
                            prop:value=move || phone.get()
                            on:input=move |ev| set_phone.set(event_target_value(&ev))
                        />
                    </div>
                </Show>
                <div class="form-group">
                    <label for="auth-email">"Email"</label>
                    <input
                        id="auth-email"
                        type="email"
                        class="input"
                        prop:value=move || email.get()
                        on:input=move |ev| set_email.set(event_target_value(&ev))
                    />
                </div>
                <div class="form-group">
                    <label for="auth-password">"Password"</label>
                    <input
                        id="auth-password"
                        type="password"
                        class="input"
                        prop:value=move || password.get()
                        on:input=move |ev| set_password.set(event_target_value(&ev))
                    />
                </div>
                <button type="submit" class="btn btn-primary" disabled=move || is_loading.get()>
                    {move || match (is_loading.get(), registering.get()) {
                        (true, _) => "Please wait...",
                        (false, true) => "Create Account",
                        (false, false) => "Login",
                    }}
                </button>
            </form>
        </div>
    }
}

/// Bookings the server holds for the signed-in account, each linking to its
/// summary page.
#[component]
fn AccountBookings(user_id: String) -> impl IntoView {
    let services = use_services();
    let (bookings, set_bookings) = signal(Vec::<RemoteBooking>::new());

    match UserApi::new(&services.config.api_base_url) {
        Ok(api) => spawn_local(async move {
            match api.user_bookings(&user_id).await {
                Ok(found) => set_bookings.set(found),
                Err(e) => tracing::debug!("No server bookings for {}: {}", user_id, e),
            }
        }),
        Err(e) => tracing::error!("{}", e),
    }

    view! {
        <Show when=move || !bookings.with(|b| b.is_empty())>
            <ul class="account-bookings">
                <For
                    each=move || bookings.get()
                    key=|b| b.id.clone()
                    children=|b| {
                        view! {
                            <li>
                                <a href=format!("/booking/{}", b.id)>
                                    {format!("{} \u{00B7} {} \u{00B7} {}", b.id, b.device, b.status)}
                                </a>
                            </li>
                        }
                    }
                />
            </ul>
        </Show>
    }
}
