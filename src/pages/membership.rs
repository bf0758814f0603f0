use fixit_core::currency::format_inr;
use fixit_core::StoreEvent;
use leptos::prelude::*;

use crate::components::toast::use_toasts;
use crate::hooks::{use_services, use_store_version};

const PROFILE_EVENTS: &[StoreEvent] = &[StoreEvent::ProfileChanged];

#[component]
pub fn MembershipPage() -> impl IntoView {
    let services = use_services();
    let toasts = use_toasts();
    let version = use_store_version(PROFILE_EVENTS);

    let profiles = services.profiles.clone();
    let current_plan = move || {
        version.get();
        profiles.profile().membership
    };
    let current_plan = Signal::derive(current_plan);

    let catalog = services.catalog.clone();
    let plans = catalog.plans.clone();

    view! {
        <div class="page membership-page">
            <h2>"Membership Plans"</h2>
            <p class="page-description">
                "Save on every repair with priority scheduling and longer warranties."
            </p>

            <div class="card-grid plan-grid">
                {plans
                    .into_iter()
                    .map(|plan| {
                        let plan_id = plan.id.clone();
                        let active_id = plan.id.clone();
                        let is_current = move || current_plan.get().as_deref() == Some(active_id.as_str());
                        let is_current_label = is_current.clone();
                        let profiles = services.profiles.clone();
                        let catalog = catalog.clone();
                        let name = plan.name.clone();
                        let choose = move |_| {
                            match profiles.choose_plan(&catalog, &plan_id) {
                                Ok(()) => toasts.info(format!(
                                    "{} selected. Online payments are coming soon.",
                                    name,
                                )),
                                Err(e) => toasts.error(e.to_string()),
                            }
                        };
                        let card_class = if plan.highlighted { "card plan-card plan-highlighted" } else { "card plan-card" };
                        view! {
                            <div class=card_class>
                                <h3>{plan.name.clone()}</h3>
                                <p class="plan-price">
                                    {format_inr(plan.price_monthly as f64)}
                                    <span class="muted">"/month"</span>
                                </p>
                                <p class="plan-discount">
                                    {format!("{}% off every repair", plan.discount_percent)}
                                </p>
                                <ul class="plan-perks">
                                    {plan.perks.iter().map(|perk| view! { <li>{perk.clone()}</li> }).collect_view()}
                                </ul>
                                <button
                                    class="btn btn-primary"
                                    disabled=is_current
                                    on:click=choose
                                >
                                    {move || if is_current_label() { "Current Plan" } else { "Choose Plan" }}
                                </button>
                            </div>
                        }
                    })
                    .collect_view()}
            </div>
        </div>
    }
}
