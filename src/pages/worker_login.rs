use chrono::Utc;
use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::components::toast::use_toasts;
use crate::hooks::use_services;

#[component]
pub fn WorkerLoginPage() -> impl IntoView {
    let services = use_services();
    let toasts = use_toasts();
    let navigate = use_navigate();
    let (worker_id, set_worker_id) = signal(String::new());
    let (name, set_name) = signal(String::new());
    let (error, set_error) = signal::<Option<String>>(None);

    // Already logged in: straight to the dashboard
    if services.worker.current_worker().is_some() {
        let navigate = navigate.clone();
        Effect::new(move |_| navigate("/worker/dashboard", Default::default()));
    }

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let now = Utc::now();
        let session = match services.worker.login(&worker_id.get(), &name.get(), now) {
            Ok(session) => session,
            Err(e) => {
                set_error.set(Some(e.to_string()));
                return;
            }
        };
        match services
            .worker
            .seed_demo_jobs(&session.worker_id, services.config.worker_demo_jobs, now)
        {
            Ok(seeded) if !seeded.is_empty() => {
                toasts.info(format!("{} sample jobs added to your queue", seeded.len()))
            }
            Ok(_) => {}
            Err(e) => tracing::warn!("Failed to seed demo jobs: {}", e),
        }
        set_error.set(None);
        navigate("/worker/dashboard", Default::default());
    };

    view! {
        <div class="page worker-login-page">
            <h2>"Technician Login"</h2>
            <p class="page-description">"Enter your technician ID to see your assigned jobs."</p>
            <form class="auth-form" on:submit=on_submit>
                <div class="form-group">
                    <label for="worker-id">"Technician ID"</label>
                    <input
                        id="worker-id"
                        type="text"
                        class="input"
                        placeholder="e.g. TECH-101"
                        prop:value=move || worker_id.get()
                        on:input=move |ev| set_worker_id.set(event_target_value(&ev))
                    />
                </div>
                <div class="form-group">
                    <label for="worker-name">"Name"</label>
                    <input
                        id="worker-name"
                        type="text"
                        class="input"
                        placeholder="Optional"
                        prop:value=move || name.get()
                        on:input=move |ev| set_name.set(event_target_value(&ev))
                    />
                </div>
                <Show when=move || error.get().is_some()>
                    <p class="error-text">{move || error.get().unwrap_or_default()}</p>
                </Show>
                <button type="submit" class="btn btn-primary">"Login"</button>
            </form>
        </div>
    }
}
