use chrono::Utc;
use fixit_core::address::AddressInput;
use fixit_core::wizard::{AddressChoice, BookingWizard, ImageAttachment, WizardStep};
use fixit_core::StoreEvent;
use leptos::prelude::*;

use crate::browser::{picked_files, preview_url, revoke_preview_url, seeded_rng};
use crate::components::address_form::AddressForm;
use crate::components::toast::use_toasts;
use crate::hooks::{use_services, use_store_version};

/// Open/closed state of the booking wizard overlay.
#[derive(Clone, Copy)]
pub struct BookingModalContext {
    is_open: RwSignal<bool>,
}

impl BookingModalContext {
    pub fn new() -> Self {
        Self {
            is_open: RwSignal::new(false),
        }
    }

    pub fn open(&self) {
        self.is_open.set(true);
    }

    pub fn close(&self) {
        self.is_open.set(false);
    }

    pub fn is_open(&self) -> bool {
        self.is_open.get()
    }
}

pub fn use_booking_modal() -> BookingModalContext {
    expect_context::<BookingModalContext>()
}

const ADDRESS_EVENTS: &[StoreEvent] = &[StoreEvent::AddressesChanged];

#[component]
pub fn BookingModal() -> impl IntoView {
    let services = use_services();
    let modal = use_booking_modal();
    let toasts = use_toasts();

    let wizard = RwSignal::new(services.wizard());
    let (error, set_error) = signal::<Option<String>>(None);
    // Mirrors the wizard's new-address form so AddressForm can bind to it
    let new_address = RwSignal::new(AddressInput::default());

    Effect::new(move |_| {
        let input = new_address.get();
        wizard.update(|w| w.form_mut().address = input);
    });

    let profiles = services.profiles.clone();
    Effect::new(move |_| {
        if modal.is_open() {
            let profile = profiles.profile();
            wizard.update(|w| w.prefill_contact(&profile));
        }
    });

    let close = move || {
        let image = wizard.try_update(BookingWizard::reset).flatten();
        if let Some(ImageAttachment { preview_url, .. }) = image {
            revoke_preview_url(&preview_url);
        }
        new_address.set(AddressInput::default());
        set_error.set(None);
        modal.close();
    };

    let go_next = move |_| {
        let result = wizard.try_update(|w| w.next());
        match result {
            Some(Err(e)) => set_error.set(Some(e.to_string())),
            _ => set_error.set(None),
        }
    };

    let go_back = move |_| {
        wizard.update(|w| {
            w.back();
        });
        set_error.set(None);
    };

    let submit = move |_| {
        let mut rng = seeded_rng();
        let result = wizard.try_update(|w| w.submit(&mut rng, Utc::now()));
        match result {
            Some(Ok(booking)) => {
                set_error.set(None);
                toasts.success(format!("Booking {} confirmed", booking.id));
            }
            Some(Err(e)) => {
                tracing::warn!("Booking submit failed: {}", e);
                set_error.set(Some(e.to_string()));
            }
            None => {}
        }
    };

    let step = Memo::new(move |_| wizard.with(|w| w.step()));

    view! {
        <Show when=move || modal.is_open()>
            <div class="modal-backdrop" on:click=move |_| close()></div>
            <div class="modal booking-modal" role="dialog">
                <div class="modal-header">
                    <h3>{move || step.get().title()}</h3>
                    <button class="btn btn-icon" title="Close" on:click=move |_| close()>
                        "\u{2715}"
                    </button>
                </div>

                <Show when=move || step.get() != WizardStep::Success>
                    <div class="wizard-progress">
                        {WizardStep::ALL[..5]
                            .iter()
                            .map(|s| {
                                let s = *s;
                                view! {
                                    <span class=move || {
                                        if step.get() >= s { "wizard-dot wizard-dot-done" } else { "wizard-dot" }
                                    }></span>
                                }
                            })
                            .collect_view()}
                    </div>
                </Show>

                <div class="modal-body">
                    {move || match step.get() {
                        WizardStep::Device => view! { <DeviceStep wizard=wizard /> }.into_any(),
                        WizardStep::Brand => view! { <BrandStep wizard=wizard /> }.into_any(),
                        WizardStep::Issues => view! { <IssuesStep wizard=wizard /> }.into_any(),
                        WizardStep::Contact => {
                            view! { <ContactStep wizard=wizard new_address=new_address /> }.into_any()
                        }
                        WizardStep::Review => view! { <ReviewStep wizard=wizard /> }.into_any(),
                        WizardStep::Success => view! { <SuccessStep wizard=wizard /> }.into_any(),
                    }}
                    <Show when=move || error.get().is_some()>
                        <p class="error-text">{move || error.get().unwrap_or_default()}</p>
                    </Show>
                </div>

                <div class="modal-footer">
                    {move || match step.get() {
                        WizardStep::Device => view! { <span></span> }.into_any(),
                        WizardStep::Success => {
                            view! {
                                <button
                                    class="btn btn-secondary"
                                    on:click=move |_| {
                                        close();
                                        modal.open();
                                    }
                                >
                                    "Book Another"
                                </button>
                                <button class="btn btn-primary" on:click=move |_| close()>
                                    "Done"
                                </button>
                            }
                                .into_any()
                        }
                        WizardStep::Review => {
                            view! {
                                <button class="btn btn-secondary" on:click=go_back>"Back"</button>
                                <button class="btn btn-primary" on:click=submit>"Confirm Booking"</button>
                            }
                                .into_any()
                        }
                        _ => {
                            view! {
                                <button class="btn btn-secondary" on:click=go_back>"Back"</button>
                                <button
                                    class="btn btn-primary"
                                    disabled=move || !wizard.with(|w| w.can_advance())
                                    on:click=go_next
                                >
                                    "Next"
                                </button>
                            }
                                .into_any()
                        }
                    }}
                </div>
            </div>
        </Show>
    }
}

#[component]
fn DeviceStep(wizard: RwSignal<BookingWizard>) -> impl IntoView {
    let devices = wizard.with_untracked(|w| w.catalog().devices.clone());

    view! {
        <div class="option-grid">
            {devices
                .into_iter()
                .map(|device| {
                    let id = device.id.clone();
                    view! {
                        <button
                            class="option-card"
                            on:click=move |_| {
                                let id = id.clone();
                                wizard.update(|w| {
                                    if let Err(e) = w.select_device(&id) {
                                        tracing::warn!("{}", e);
                                    }
                                });
                            }
                        >
                            <span class="option-icon">{device.icon}</span>
                            <span class="option-label">{device.label}</span>
                        </button>
                    }
                })
                .collect_view()}
        </div>
    }
}

#[component]
fn BrandStep(wizard: RwSignal<BookingWizard>) -> impl IntoView {
    let brands = wizard.with_untracked(|w| w.brands().to_vec());

    view! {
        <div class="option-grid">
            {brands
                .into_iter()
                .map(|brand| {
                    let selected = brand.clone();
                    let pick = brand.clone();
                    view! {
                        <button
                            class=move || {
                                if wizard.with(|w| w.selected_brand() == Some(selected.as_str())) {
                                    "option-card option-selected"
                                } else {
                                    "option-card"
                                }
                            }
                            on:click=move |_| {
                                let pick = pick.clone();
                                wizard.update(|w| {
                                    if let Err(e) = w.select_brand(&pick) {
                                        tracing::warn!("{}", e);
                                    }
                                });
                            }
                        >
                            {brand}
                        </button>
                    }
                })
                .collect_view()}
        </div>
    }
}

#[component]
fn IssuesStep(wizard: RwSignal<BookingWizard>) -> impl IntoView {
    let issues = wizard.with_untracked(|w| w.catalog().issues.clone());

    view! {
        <div class="issue-list">
            {issues
                .into_iter()
                .map(|issue| {
                    let id = issue.id.clone();
                    let toggle_id = issue.id.clone();
                    view! {
                        <label class="issue-option">
                            <input
                                type="checkbox"
                                prop:checked=move || wizard.with(|w| w.is_issue_selected(&id))
                                on:change=move |_| {
                                    let toggle_id = toggle_id.clone();
                                    wizard.update(|w| {
                                        if let Err(e) = w.toggle_issue(&toggle_id) {
                                            tracing::warn!("{}", e);
                                        }
                                    });
                                }
                            />
                            <span class="issue-label">{issue.label}</span>
                            <span class="issue-meta">{issue.duration}</span>
                            <span class="issue-price">
                                {fixit_core::currency::format_inr(issue.price as f64)}
                            </span>
                        </label>
                    }
                })
                .collect_view()}
        </div>
    }
}

#[component]
fn ContactStep(
    wizard: RwSignal<BookingWizard>,
    new_address: RwSignal<AddressInput>,
) -> impl IntoView {
    let services = use_services();
    let version = use_store_version(ADDRESS_EVENTS);
    let addresses = services.addresses.clone();
    let saved = move || {
        version.get();
        addresses.list()
    };

    let on_image = move |ev: leptos::ev::Event| {
        let Some(file) = picked_files(&ev).into_iter().next() else {
            return;
        };
        let Some(url) = preview_url(&file) else {
            return;
        };
        let attachment = ImageAttachment {
            file_name: file.name(),
            preview_url: url,
        };
        let previous = wizard.try_update(|w| w.form_mut().image.replace(attachment)).flatten();
        if let Some(old) = previous {
            revoke_preview_url(&old.preview_url);
        }
    };

    view! {
        <div class="contact-step">
            <div class="form-row">
                <div class="form-group">
                    <label for="booking-name">"Full Name"</label>
                    <input
                        id="booking-name"
                        type="text"
                        class="input"
                        prop:value=move || wizard.with(|w| w.form().name.clone())
                        on:input=move |ev| wizard.update(|w| w.form_mut().name = event_target_value(&ev))
                    />
                </div>
                <div class="form-group">
                    <label for="booking-phone">"Phone"</label>
                    <input
                        id="booking-phone"
                        type="tel"
                        class="input"
                        prop:value=move || wizard.with(|w| w.form().phone.clone())
                        on:input=move |ev| wizard.update(|w| w.form_mut().phone = event_target_value(&ev))
                    />
                </div>
            </div>

            <h4>"Service Address"</h4>
            <div class="address-choices">
                <For
                    each=saved
                    key=|a| (a.id, a.is_default, a.flattened())
                    children=move |address| {
                        let id = address.id;
                        let is_default = address.is_default;
                        view! {
                            <label class="address-choice">
                                <input
                                    type="radio"
                                    name="booking-address"
                                    prop:checked=move || {
                                        wizard.with(|w| w.address_choice() == AddressChoice::Saved(id))
                                    }
                                    on:change=move |_| {
                                        wizard.update(|w| {
                                            if let Err(e) = w.choose_saved_address(id) {
                                                tracing::warn!("{}", e);
                                            }
                                        });
                                    }
                                />
                                <span class="address-kind">{address.kind.label()}</span>
                                <span>{address.flattened()}</span>
                                <Show when=move || is_default>
                                    <span class="badge">"Default"</span>
                                </Show>
                            </label>
                        }
                    }
                />
                <label class="address-choice">
                    <input
                        type="radio"
                        name="booking-address"
                        prop:checked=move || wizard.with(|w| w.address_choice() == AddressChoice::New)
                        on:change=move |_| wizard.update(|w| w.use_new_address())
                    />
                    <span>"Use a new address"</span>
                </label>
            </div>

            <Show when=move || wizard.with(|w| w.address_choice() == AddressChoice::New)>
                <AddressForm address=new_address />
            </Show>

            <div class="form-group">
                <label for="booking-description">"Describe the problem (optional)"</label>
                <textarea
                    id="booking-description"
                    class="input"
                    rows="3"
                    prop:value=move || wizard.with(|w| w.form().description.clone())
                    on:input=move |ev| {
                        wizard.update(|w| w.form_mut().description = event_target_value(&ev))
                    }
                ></textarea>
            </div>

            <div class="form-group">
                <label for="booking-image">"Photo (optional)"</label>
                <input id="booking-image" type="file" accept="image/*" on:change=on_image />
                {move || {
                    wizard
                        .with(|w| w.form().image.clone())
                        .map(|img| {
                            view! {
                                <img class="image-preview" src=img.preview_url alt=img.file_name />
                            }
                        })
                }}
            </div>
        </div>
    }
}

#[component]
fn ReviewStep(wizard: RwSignal<BookingWizard>) -> impl IntoView {
    let summary = wizard.with_untracked(|w| w.summary());

    view! {
        <dl class="review-summary">
            <dt>"Device"</dt>
            <dd>{format!("{} {}", summary.brand, summary.device)}</dd>
            <dt>"Issues"</dt>
            <dd>{summary.issues_display()}</dd>
            <dt>"Name"</dt>
            <dd>{summary.name.clone()}</dd>
            <dt>"Phone"</dt>
            <dd>{summary.phone.clone()}</dd>
            <dt>"Address"</dt>
            <dd>{summary.address.clone().unwrap_or_default()}</dd>
            <dt>"Estimated Cost"</dt>
            <dd>{summary.cost_display()}</dd>
            <dt>"Member Discount"</dt>
            <dd class="discount">{format!("- {}", summary.discount_display())}</dd>
            <dt>"Payable"</dt>
            <dd class="total">{summary.payable_display()}</dd>
        </dl>
    }
}

#[component]
fn SuccessStep(wizard: RwSignal<BookingWizard>) -> impl IntoView {
    let confirmed = wizard.with_untracked(|w| w.confirmed().cloned());

    match confirmed {
        Some(booking) => view! {
            <div class="booking-success">
                <div class="success-icon">"\u{2713}"</div>
                <p>"Your repair has been booked."</p>
                <p class="booking-id">"Booking ID: " <strong>{booking.id}</strong></p>
                <p class="booking-otp">
                    "Share this OTP with the technician: " <strong>{booking.otp}</strong>
                </p>
                <p class="muted">{format!("{} \u{00B7} {}", booking.device, booking.issue)}</p>
            </div>
        }
        .into_any(),
        None => view! { <p class="muted">"No booking to show."</p> }.into_any(),
    }
}
