use chrono::Utc;
use fixit_core::worker::{CompletionReport, JobStatus, WorkerBooking};
use fixit_core::StoreEvent;
use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::browser::{picked_files, seeded_rng};
use crate::components::status_badge::StatusBadge;
use crate::components::toast::use_toasts;
use crate::hooks::{use_services, use_store_version};

const WORKER_EVENTS: &[StoreEvent] = &[
    StoreEvent::WorkerJobsChanged,
    StoreEvent::WorkerSessionChanged,
];

const WARRANTY_CHOICES: [u8; 5] = [0, 3, 6, 12, 24];

#[component]
pub fn WorkerDashboardPage() -> impl IntoView {
    let services = use_services();
    let toasts = use_toasts();
    let navigate = use_navigate();
    let version = use_store_version(WORKER_EVENTS);

    let portal = services.worker.clone();
    let worker = Signal::derive(move || {
        version.get();
        portal.current_worker()
    });

    Effect::new(move |_| {
        if worker.get().is_none() {
            navigate("/worker", Default::default());
        }
    });

    let portal = services.worker.clone();
    let jobs = Signal::derive(move || {
        version.get();
        worker
            .get()
            .map(|w| portal.assigned_jobs(&w.worker_id))
            .unwrap_or_default()
    });

    let portal = services.worker.clone();
    let logout = move |_| match portal.logout() {
        Ok(()) => toasts.info("Logged out"),
        Err(e) => toasts.error(e.to_string()),
    };

    let open_count = move || jobs.with(|j| j.iter().filter(|job| !job.status.is_closed()).count());

    view! {
        <div class="page worker-dashboard-page">
            <div class="section-header">
                <div>
                    <h2>"My Jobs"</h2>
                    <p class="muted">
                        {move || {
                            worker
                                .get()
                                .map(|w| match w.name.as_str() {
                                    "" => format!("Technician {} \u{00B7} {} open", w.worker_id, open_count()),
                                    name => format!("{} ({}) \u{00B7} {} open", name, w.worker_id, open_count()),
                                })
                                .unwrap_or_default()
                        }}
                    </p>
                </div>
                <button class="btn btn-secondary" on:click=logout>"Logout"</button>
            </div>

            <Show
                when=move || !jobs.with(|j| j.is_empty())
                fallback=|| view! { <p class="muted">"No jobs assigned to you right now."</p> }
            >
                <div class="job-list">
                    <For
                        each=move || jobs.get()
                        key=|job| (job.id.clone(), job.status, job.worker_otp.clone())
                        children=move |job| view! { <JobCard job=job /> }
                    />
                </div>
            </Show>
        </div>
    }
}

#[component]
fn JobCard(job: WorkerBooking) -> impl IntoView {
    let services = use_services();
    let toasts = use_toasts();
    let job_id = job.id.clone();
    let status = job.status;

    let scheduled = chrono::DateTime::parse_from_rfc3339(&job.scheduled_for)
        .map(|d| d.format("%d %b, %I:%M %p").to_string())
        .unwrap_or_else(|_| job.scheduled_for.clone());

    let actions = match status {
        JobStatus::Assigned => view! {
            <OtpPanel job_id=job_id.clone() has_otp=job.worker_otp.is_some() />
        }
        .into_any(),
        JobStatus::InProgress => view! { <CompletionForm job_id=job_id.clone() /> }.into_any(),
        JobStatus::Completed => view! { <CompletionSummary job=job.clone() /> }.into_any(),
        JobStatus::Cancelled => view! { <p class="muted">"This job was cancelled."</p> }.into_any(),
    };

    let portal = services.worker.clone();
    let cancel_id = job_id.clone();
    let cancel = move |_| match portal.cancel(&cancel_id) {
        Ok(_) => toasts.info(format!("Job {} cancelled", cancel_id)),
        Err(e) => toasts.error(e.to_string()),
    };

    view! {
        <div class="card job-card">
            <div class="job-header">
                <strong>{job.id.clone()}</strong>
                <StatusBadge label=status.label() tone=status.into() />
            </div>
            <dl class="detail-list">
                <dt>"Customer"</dt>
                <dd>{format!("{} ({})", job.customer_name, job.customer_phone)}</dd>
                <dt>"Device"</dt>
                <dd>{job.device.clone()}</dd>
                <dt>"Issue"</dt>
                <dd>{job.issue.clone()}</dd>
                <dt>"Address"</dt>
                <dd>{job.address.clone()}</dd>
                <dt>"Scheduled"</dt>
                <dd>{scheduled}</dd>
            </dl>
            {actions}
            <Show when=move || !status.is_closed()>
                <button class="btn btn-link btn-danger" on:click=cancel.clone()>"Cancel Job"</button>
            </Show>
        </div>
    }
}

/// Generate the start-of-job OTP and check the code the customer reads back.
#[component]
fn OtpPanel(job_id: String, has_otp: bool) -> impl IntoView {
    let services = use_services();
    let toasts = use_toasts();
    let (code, set_code) = signal(String::new());

    let portal = services.worker.clone();
    let generate_id = job_id.clone();
    let generate = move |_| {
        let mut rng = seeded_rng();
        match portal.generate_otp(&generate_id, &mut rng) {
            Ok(_) => toasts.info("OTP sent to the customer"),
            Err(e) => toasts.error(e.to_string()),
        }
    };

    let portal = services.worker.clone();
    let verify = move |_| match portal.verify_otp(&job_id, &code.get()) {
        Ok(job) => {
            set_code.set(String::new());
            toasts.success(format!("Job {} started", job.id));
        }
        Err(e) => toasts.error(e.to_string()),
    };

    view! {
        <div class="otp-panel">
            <button class="btn btn-secondary" on:click=generate>
                {if has_otp { "Resend OTP" } else { "Generate OTP" }}
            </button>
            <Show when=move || has_otp>
                <div class="input-row">
                    <input
                        type="text"
                        class="input"
                        maxlength="4"
                        inputmode="numeric"
                        placeholder="Customer OTP"
                        prop:value=move || code.get()
                        on:input=move |ev| set_code.set(event_target_value(&ev))
                    />
                    <button class="btn btn-primary" on:click=verify.clone()>"Verify & Start"</button>
                </div>
            </Show>
        </div>
    }
}

#[component]
fn CompletionForm(job_id: String) -> impl IntoView {
    let services = use_services();
    let toasts = use_toasts();
    let (photos, set_photos) = signal(Vec::<String>::new());
    let (components, set_components) = signal(String::new());
    let (warranty, set_warranty) = signal(3u8);
    let (notes, set_notes) = signal(String::new());
    let (error, set_error) = signal::<Option<String>>(None);

    let on_photos = move |ev: leptos::ev::Event| {
        let names = picked_files(&ev).into_iter().map(|f| f.name()).collect();
        set_photos.set(names);
    };

    let portal = services.worker.clone();
    let complete = move |_| {
        let report = CompletionReport {
            photos: photos.get(),
            components: components.get().split(',').map(str::to_string).collect(),
            warranty_months: Some(warranty.get()).filter(|m| *m > 0),
            notes: notes.get(),
        };
        match portal.complete(&job_id, report, Utc::now()) {
            Ok(job) => {
                set_error.set(None);
                toasts.success(format!("Job {} completed", job.id));
            }
            Err(e) => set_error.set(Some(e.to_string())),
        }
    };

    view! {
        <div class="completion-form">
            <div class="form-group">
                <label>"Completion Photos"</label>
                <input type="file" accept="image/*" multiple=true on:change=on_photos />
                <span class="muted">{move || format!("{} selected", photos.with(|p| p.len()))}</span>
            </div>
            <div class="form-group">
                <label>"Components Replaced (comma separated)"</label>
                <input
                    type="text"
                    class="input"
                    placeholder="Battery, Thermal paste"
                    prop:value=move || components.get()
                    on:input=move |ev| set_components.set(event_target_value(&ev))
                />
            </div>
            <div class="form-group">
                <label>"Warranty"</label>
                <select
                    class="input"
                    on:change=move |ev| {
                        if let Ok(months) = event_target_value(&ev).parse::<u8>() {
                            set_warranty.set(months);
                        }
                    }
                >
                    {WARRANTY_CHOICES
                        .into_iter()
                        .map(|m| {
                            let label = if m == 0 { "No warranty".to_string() } else { format!("{} months", m) };
                            view! {
                                <option value=m.to_string() selected=move || warranty.get() == m>
                                    {label}
                                </option>
                            }
                        })
                        .collect_view()}
                </select>
            </div>
            <div class="form-group">
                <label>"Notes"</label>
                <textarea
                    class="input"
                    rows="2"
                    prop:value=move || notes.get()
                    on:input=move |ev| set_notes.set(event_target_value(&ev))
                ></textarea>
            </div>
            <Show when=move || error.get().is_some()>
                <p class="error-text">{move || error.get().unwrap_or_default()}</p>
            </Show>
            <button class="btn btn-primary" on:click=complete>"Mark Complete"</button>
        </div>
    }
}

#[component]
fn CompletionSummary(job: WorkerBooking) -> impl IntoView {
    let warranty = job
        .warranty_months
        .map(|m| format!("{} months", m))
        .unwrap_or_else(|| "None".to_string());
    let components = if job.components.is_empty() {
        "None".to_string()
    } else {
        job.components.join(", ")
    };

    view! {
        <dl class="detail-list completion-summary">
            <dt>"Photos"</dt>
            <dd>{job.completion_photos.join(", ")}</dd>
            <dt>"Components"</dt>
            <dd>{components}</dd>
            <dt>"Warranty"</dt>
            <dd>{warranty}</dd>
            {(!job.notes.is_empty())
                .then(|| view! {
                    <dt>"Notes"</dt>
                    <dd>{job.notes.clone()}</dd>
                })}
        </dl>
    }
}
