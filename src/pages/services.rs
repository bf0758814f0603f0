use fixit_core::currency::format_inr;
use leptos::prelude::*;

use crate::components::booking_modal::use_booking_modal;
use crate::hooks::use_services;

#[component]
pub fn ServicesPage() -> impl IntoView {
    let services = use_services();
    let modal = use_booking_modal();
    let catalog = services.catalog.clone();

    view! {
        <div class="page services-page">
            <h2>"Our Services"</h2>
            <p class="page-description">
                {format!(
                    "Starting prices per issue. Members get {}% off every repair.",
                    catalog.discount_percent,
                )}
            </p>

            <div class="card-grid">
                {catalog
                    .issues
                    .iter()
                    .map(|issue| {
                        view! {
                            <div class="card service-card">
                                <h3>{issue.label.clone()}</h3>
                                <p>{issue.description.clone()}</p>
                                <div class="service-meta">
                                    <span class="service-price">{format_inr(issue.price as f64)}</span>
                                    <span class="service-duration">{issue.duration.clone()}</span>
                                </div>
                                <button class="btn btn-primary" on:click=move |_| modal.open()>
                                    "Book Now"
                                </button>
                            </div>
                        }
                    })
                    .collect_view()}
            </div>

            <h3>"Devices We Repair"</h3>
            <ul class="device-list">
                {catalog
                    .devices
                    .iter()
                    .map(|device| {
                        view! {
                            <li>
                                <strong>{device.label.clone()}</strong>
                                ": "
                                {device.brands.join(", ")}
                            </li>
                        }
                    })
                    .collect_view()}
            </ul>
        </div>
    }
}
