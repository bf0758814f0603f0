use fixit_core::address::{Address, AddressInput};
use fixit_core::booking::BookingFilter;
use fixit_core::profile::UserProfile;
use fixit_core::StoreEvent;
use leptos::prelude::*;

use crate::components::address_form::AddressForm;
use crate::components::booking_modal::use_booking_modal;
use crate::components::status_badge::StatusBadge;
use crate::components::toast::use_toasts;
use crate::hooks::{use_services, use_store_version};

const PROFILE_EVENTS: &[StoreEvent] = &[StoreEvent::ProfileChanged];
const ADDRESS_EVENTS: &[StoreEvent] = &[StoreEvent::AddressesChanged];
const BOOKING_EVENTS: &[StoreEvent] = &[StoreEvent::BookingsChanged];

#[component]
pub fn ProfilePage() -> impl IntoView {
    view! {
        <div class="page profile-page">
            <ProfileHeader />
            <div class="profile-layout">
                <ProfileDetails />
                <AddressManager />
            </div>
            <BookingHistory />
        </div>
    }
}

#[component]
fn ProfileHeader() -> impl IntoView {
    let services = use_services();
    let profile_version = use_store_version(PROFILE_EVENTS);
    let booking_version = use_store_version(BOOKING_EVENTS);

    let profiles = services.profiles.clone();
    let profile = Signal::derive(move || {
        profile_version.get();
        profiles.profile()
    });
    let profiles = services.profiles.clone();
    let stats = Signal::derive(move || {
        booking_version.get();
        profiles.stats()
    });
    let catalog = services.catalog.clone();
    let plan_name = move || {
        profile
            .get()
            .membership
            .and_then(|id| catalog.plan(&id).map(|p| p.name.clone()))
    };

    view! {
        <section class="profile-header">
            <div class="avatar">{move || profile.get().initials()}</div>
            <div class="profile-identity">
                <h2>{move || {
                    let name = profile.get().name;
                    if name.is_empty() { "Your Profile".to_string() } else { name }
                }}</h2>
                <p class="muted">
                    {move || {
                        let since = profile.get().member_since;
                        if since.is_empty() { String::new() } else { format!("Member since {}", since) }
                    }}
                </p>
                {move || plan_name().map(|name| view! { <span class="badge">{name}</span> })}
            </div>
            <div class="stat-row">
                <div class="stat">
                    <span class="stat-value">{move || stats.get().total_repairs}</span>
                    <span class="stat-label">"Repairs"</span>
                </div>
                <div class="stat">
                    <span class="stat-value">{move || stats.get().spent_display()}</span>
                    <span class="stat-label">"Spent"</span>
                </div>
                <div class="stat">
                    <span class="stat-value">{move || stats.get().saved_display()}</span>
                    <span class="stat-label">"Saved"</span>
                </div>
            </div>
        </section>
    }
}

#[component]
fn ProfileDetails() -> impl IntoView {
    let services = use_services();
    let toasts = use_toasts();
    let version = use_store_version(PROFILE_EVENTS);

    let draft = RwSignal::new(UserProfile::default());
    let (editing, set_editing) = signal(false);
    let (error, set_error) = signal::<Option<String>>(None);

    // Reload the draft whenever the stored profile changes and we aren't editing
    let profiles = services.profiles.clone();
    Effect::new(move |_| {
        version.get();
        if !editing.get_untracked() {
            draft.set(profiles.profile());
        }
    });

    let profiles = services.profiles.clone();
    let save = move |_| {
        let mut profile = draft.get();
        if profile.member_since.is_empty() && !profiles.has_profile() {
            profile.member_since = chrono::Utc::now().format("%B %Y").to_string();
        }
        match profiles.save_profile(profile) {
            Ok(()) => {
                set_error.set(None);
                set_editing.set(false);
                toasts.success("Profile saved");
            }
            Err(e) => set_error.set(Some(e.to_string())),
        }
    };

    let profiles = services.profiles.clone();
    let cancel = move |_| {
        draft.set(profiles.profile());
        set_error.set(None);
        set_editing.set(false);
    };

    view! {
        <section class="card profile-details">
            <div class="section-header">
                <h3>"Contact Details"</h3>
                <Show when=move || !editing.get()>
                    <button class="btn btn-secondary" on:click=move |_| set_editing.set(true)>"Edit"</button>
                </Show>
            </div>
            <Show
                when=move || editing.get()
                fallback=move || {
                    view! {
                        <dl class="detail-list">
                            <dt>"Name"</dt>
                            <dd>{move || draft.with(|p| p.name.clone())}</dd>
                            <dt>"Email"</dt>
                            <dd>{move || draft.with(|p| p.email.clone())}</dd>
                            <dt>"Phone"</dt>
                            <dd>{move || draft.with(|p| p.phone.clone())}</dd>
                        </dl>
                    }
                }
            >
                <div class="form-group">
                    <label for="profile-name">"Name"</label>
                    <input
                        id="profile-name"
                        type="text"
                        class="input"
                        prop:value=move || draft.with(|p| p.name.clone())
                        on:input=move |ev| draft.update(|p| p.name = event_target_value(&ev))
                    />
                </div>
                <div class="form-group">
                    <label for="profile-email">"Email"</label>
                    <input
                        id="profile-email"
                        type="email"
                        class="input"
                        prop:value=move || draft.with(|p| p.email.clone())
                        on:input=move |ev| draft.update(|p| p.email = event_target_value(&ev))
                    />
                </div>
                <div class="form-group">
                    <label for="profile-phone">"Phone"</label>
                    <input
                        id="profile-phone"
                        type="tel"
                        class="input"
                        maxlength="10"
                        prop:value=move || draft.with(|p| p.phone.clone())
                        on:input=move |ev| draft.update(|p| p.phone = event_target_value(&ev))
                    />
                </div>
                <Show when=move || error.get().is_some()>
                    <p class="error-text">{move || error.get().unwrap_or_default()}</p>
                </Show>
                <div class="button-row">
                    <button class="btn btn-primary" on:click=save.clone()>"Save"</button>
                    <button class="btn btn-secondary" on:click=cancel.clone()>"Cancel"</button>
                </div>
            </Show>
        </section>
    }
}

/// Which address the form is editing, if it's open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AddressEditor {
    Closed,
    Adding,
    Editing(u32),
}

#[component]
fn AddressManager() -> impl IntoView {
    let services = use_services();
    let toasts = use_toasts();
    let version = use_store_version(ADDRESS_EVENTS);

    let profiles = services.profiles.clone();
    let addresses = Signal::derive(move || {
        version.get();
        profiles.addresses()
    });

    let editor = RwSignal::new(AddressEditor::Closed);
    let input = RwSignal::new(AddressInput::default());
    let (make_default, set_make_default) = signal(false);
    let (error, set_error) = signal::<Option<String>>(None);

    let open_add = move |_| {
        input.set(AddressInput::default());
        set_make_default.set(false);
        set_error.set(None);
        editor.set(AddressEditor::Adding);
    };

    let profiles = services.profiles.clone();
    let save = move |_| {
        let result = match editor.get() {
            AddressEditor::Adding => profiles
                .add_address(input.get(), make_default.get())
                .map(|_| "Address added"),
            AddressEditor::Editing(id) => {
                let updated = profiles.update_address(id, input.get());
                match (updated, make_default.get()) {
                    (Ok(_), true) => profiles.set_default_address(id).map(|_| "Address updated"),
                    (Ok(_), false) => Ok("Address updated"),
                    (Err(e), _) => Err(e),
                }
            }
            AddressEditor::Closed => return,
        };
        match result {
            Ok(message) => {
                editor.set(AddressEditor::Closed);
                set_error.set(None);
                toasts.success(message);
            }
            Err(e) => set_error.set(Some(e.to_string())),
        }
    };

    let rows = services.clone();
    let edit = move |address: &Address| {
        input.set(AddressInput::from(address));
        set_make_default.set(address.is_default);
        set_error.set(None);
        editor.set(AddressEditor::Editing(address.id));
    };

    view! {
        <section class="card address-manager">
            <div class="section-header">
                <h3>"Saved Addresses"</h3>
                <Show when=move || editor.get() == AddressEditor::Closed>
                    <button class="btn btn-secondary" on:click=open_add>"Add Address"</button>
                </Show>
            </div>

            <Show when=move || addresses.with(|a| a.is_empty()) && editor.get() == AddressEditor::Closed>
                <p class="muted">"No saved addresses yet."</p>
            </Show>

            <ul class="address-list">
                <For
                    each=move || addresses.get()
                    key=|a| (a.id, a.is_default, a.flattened(), a.kind)
                    children=move |address| {
                        let id = address.id;
                        let is_default = address.is_default;
                        let profiles = rows.profiles.clone();
                        let set_default = move |_| {
                            if let Err(e) = profiles.set_default_address(id) {
                                toasts.error(e.to_string());
                            }
                        };
                        let profiles = rows.profiles.clone();
                        let delete = move |_| match profiles.delete_address(id) {
                            Ok(()) => toasts.info("Address removed"),
                            Err(e) => toasts.error(e.to_string()),
                        };
                        let for_edit = address.clone();
                        view! {
                            <li class="address-item">
                                <div>
                                    <span class="address-kind">{address.kind.label()}</span>
                                    <Show when=move || is_default>
                                        <span class="badge">"Default"</span>
                                    </Show>
                                    <p>{address.flattened()}</p>
                                </div>
                                <div class="button-row">
                                    <Show when=move || !is_default>
                                        <button class="btn btn-link" on:click=set_default.clone()>
                                            "Set Default"
                                        </button>
                                    </Show>
                                    <button class="btn btn-link" on:click=move |_| edit(&for_edit)>
                                        "Edit"
                                    </button>
                                    <button class="btn btn-link btn-danger" on:click=delete>
                                        "Delete"
                                    </button>
                                </div>
                            </li>
                        }
                    }
                />
            </ul>

            <Show when=move || editor.get() != AddressEditor::Closed>
                <AddressForm address=input />
                <label class="checkbox-row">
                    <input
                        type="checkbox"
                        prop:checked=move || make_default.get()
                        on:change=move |ev| set_make_default.set(event_target_checked(&ev))
                    />
                    "Make this my default address"
                </label>
                <Show when=move || error.get().is_some()>
                    <p class="error-text">{move || error.get().unwrap_or_default()}</p>
                </Show>
                <div class="button-row">
                    <button class="btn btn-primary" on:click=save.clone()>"Save Address"</button>
                    <button
                        class="btn btn-secondary"
                        on:click=move |_| editor.set(AddressEditor::Closed)
                    >
                        "Cancel"
                    </button>
                </div>
            </Show>
        </section>
    }
}

#[component]
fn BookingHistory() -> impl IntoView {
    let services = use_services();
    let modal = use_booking_modal();
    let version = use_store_version(BOOKING_EVENTS);
    let (filter, set_filter) = signal(BookingFilter::All);

    let profiles = services.profiles.clone();
    let bookings = Signal::derive(move || {
        version.get();
        profiles.bookings(filter.get())
    });

    view! {
        <section class="card booking-history">
            <div class="section-header">
                <h3>"Booking History"</h3>
                <div class="tabs">
                    {BookingFilter::ALL
                        .into_iter()
                        .map(|f| {
                            view! {
                                <button
                                    class=move || if filter.get() == f { "tab tab-active" } else { "tab" }
                                    on:click=move |_| set_filter.set(f)
                                >
                                    {f.label()}
                                </button>
                            }
                        })
                        .collect_view()}
                </div>
            </div>

            <Show
                when=move || !bookings.with(|b| b.is_empty())
                fallback=move || {
                    view! {
                        <div class="empty-state">
                            <p class="muted">"No bookings here yet."</p>
                            <button class="btn btn-primary" on:click=move |_| modal.open()>
                                "Book a Repair"
                            </button>
                        </div>
                    }
                }
            >
                <table class="booking-table">
                    <thead>
                        <tr>
                            <th>"Booking"</th>
                            <th>"Device"</th>
                            <th>"Issue"</th>
                            <th>"Date"</th>
                            <th>"Cost"</th>
                            <th>"Saved"</th>
                            <th>"OTP"</th>
                            <th>"Status"</th>
                        </tr>
                    </thead>
                    <tbody>
                        <For
                            each=move || bookings.get()
                            key=|b| (b.id.clone(), b.status)
                            children=move |booking| {
                                let date = chrono::DateTime::parse_from_rfc3339(&booking.date)
                                    .map(|d| d.format("%d %b %Y").to_string())
                                    .unwrap_or_else(|_| booking.date.clone());
                                view! {
                                    <tr>
                                        <td>{booking.id.clone()}</td>
                                        <td>{booking.device.clone()}</td>
                                        <td>{booking.issue.clone()}</td>
                                        <td>{date}</td>
                                        <td>{booking.cost.clone()}</td>
                                        <td>{booking.discount.clone()}</td>
                                        <td>{booking.otp.clone()}</td>
                                        <td>
                                            <StatusBadge
                                                label=booking.status.label()
                                                tone=booking.status.into()
                                            />
                                        </td>
                                    </tr>
                                }
                            }
                        />
                    </tbody>
                </table>
            </Show>
        </section>
    }
}
