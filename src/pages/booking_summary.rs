use fixit_core::api::{RemoteBooking, UserApi};
use leptos::prelude::*;
use leptos_router::hooks::use_params_map;
use wasm_bindgen_futures::spawn_local;

use crate::components::toast::use_toasts;
use crate::hooks::use_services;

const GENERIC_FAILURE: &str = "Something went wrong. Please try again.";

/// A server-side booking looked up by id, with a rating form once the
/// repair is complete.
#[component]
pub fn BookingSummaryPage() -> impl IntoView {
    let services = use_services();
    let toasts = use_toasts();
    let params = use_params_map();

    let (booking, set_booking) = signal::<Option<RemoteBooking>>(None);
    let (is_loading, set_is_loading) = signal(true);
    let (rating, set_rating) = signal(0u8);
    let (review, set_review) = signal(String::new());
    let (is_saving, set_is_saving) = signal(false);

    let api = match UserApi::new(&services.config.api_base_url) {
        Ok(api) => Some(api),
        Err(e) => {
            tracing::error!("{}", e);
            None
        }
    };

    let load_api = api.clone();
    Effect::new(move |_| {
        let id = params.with(|p| p.get("id").unwrap_or_default());
        let Some(api) = load_api.clone() else {
            set_is_loading.set(false);
            return;
        };
        set_is_loading.set(true);
        spawn_local(async move {
            match api.booking(&id).await {
                Ok(found) => set_booking.set(Some(found)),
                Err(e) => {
                    tracing::warn!("Failed to load booking {}: {}", id, e);
                    set_booking.set(None);
                    toasts.error(GENERIC_FAILURE);
                }
            }
            set_is_loading.set(false);
        });
    });

    let api = StoredValue::new(api);
    let submit_rating = move |_| {
        let Some(api) = api.get_value() else {
            toasts.error(GENERIC_FAILURE);
            return;
        };
        let Some(id) = booking.with(|b| b.as_ref().map(|b| b.id.clone())) else {
            return;
        };
        let stars = rating.get();
        let text = review.get().trim().to_string();
        let text = (!text.is_empty()).then_some(text);
        set_is_saving.set(true);
        spawn_local(async move {
            match api.rate_booking(&id, stars, text).await {
                Ok(updated) => {
                    set_booking.set(Some(updated));
                    toasts.success("Thanks for rating your repair");
                }
                Err(e) => {
                    tracing::warn!("Rating {} failed: {}", id, e);
                    toasts.error(GENERIC_FAILURE);
                }
            }
            set_is_saving.set(false);
        });
    };

    view! {
        <div class="page booking-summary-page">
            <h2>"Booking Summary"</h2>
            <Show
                when=move || !is_loading.get()
                fallback=|| view! { <p class="muted">"Loading booking..."</p> }
            >
                {move || match booking.get() {
                    None => view! { <p class="muted">"Booking not found."</p> }.into_any(),
                    Some(found) => {
                        let rateable = found.is_rateable();
                        let submit = submit_rating.clone();
                        view! {
                            <div class="card">
                                <dl class="detail-list">
                                    <dt>"Booking"</dt>
                                    <dd>{found.id.clone()}</dd>
                                    <dt>"Device"</dt>
                                    <dd>{found.device.clone()}</dd>
                                    <dt>"Issue"</dt>
                                    <dd>{found.issue.clone()}</dd>
                                    <dt>"Date"</dt>
                                    <dd>{found.date.clone()}</dd>
                                    <dt>"Cost"</dt>
                                    <dd>{found.cost.clone()}</dd>
                                    <dt>"Status"</dt>
                                    <dd>{found.status.clone()}</dd>
                                    <dt>"Rating"</dt>
                                    <dd>
                                        {found
                                            .rating
                                            .map(|r| format!("{} / 5", r))
                                            .unwrap_or_else(|| "Not rated".to_string())}
                                    </dd>
                                </dl>
                                <Show when=move || rateable>
                                    <div class="rating-form">
                                        <div class="chip-row">
                                            {(1..=5u8)
                                                .map(|stars| {
                                                    view! {
                                                        <button
                                                            type="button"
                                                            class=move || {
                                                                if rating.get() >= stars { "chip chip-active" } else { "chip" }
                                                            }
                                                            on:click=move |_| set_rating.set(stars)
                                                        >
                                                            "\u{2605}"
                                                        </button>
                                                    }
                                                })
                                                .collect_view()}
                                        </div>
                                        <textarea
                                            class="input"
                                            rows="3"
                                            placeholder="Tell us about the repair (optional)"
                                            prop:value=move || review.get()
                                            on:input=move |ev| set_review.set(event_target_value(&ev))
                                        ></textarea>
                                        <button
                                            class="btn btn-primary"
                                            disabled=move || rating.get() == 0 || is_saving.get()
                                            on:click=submit.clone()
                                        >
                                            "Submit Rating"
                                        </button>
                                    </div>
                                </Show>
                            </div>
                        }
                            .into_any()
                    }
                }}
            </Show>
        </div>
    }
}
