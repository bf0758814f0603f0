use fixit_core::address::{AddressInput, AddressType};
use leptos::prelude::*;

/// Address fields bound to a shared [`AddressInput`] signal. Used by the
/// booking wizard and the profile address manager.
#[component]
pub fn AddressForm(address: RwSignal<AddressInput>) -> impl IntoView {
    view! {
        <div class="address-form">
            <div class="form-group">
                <label>"Address Type"</label>
                <div class="chip-row">
                    {AddressType::ALL
                        .into_iter()
                        .map(|kind| {
                            view! {
                                <button
                                    type="button"
                                    class=move || {
                                        if address.with(|a| a.kind == kind) { "chip chip-active" } else { "chip" }
                                    }
                                    on:click=move |_| address.update(|a| a.kind = kind)
                                >
                                    {kind.label()}
                                </button>
                            }
                        })
                        .collect_view()}
                </div>
            </div>
            <div class="form-group">
                <label for="address-street">"Street Address"</label>
                <textarea
                    id="address-street"
                    class="input"
                    rows="2"
                    placeholder="House no., street, landmark"
                    prop:value=move || address.with(|a| a.address.clone())
                    on:input=move |ev| address.update(|a| a.address = event_target_value(&ev))
                ></textarea>
            </div>
            <div class="form-row">
                <div class="form-group">
                    <label for="address-city">"City"</label>
                    <input
                        id="address-city"
                        type="text"
                        class="input"
                        prop:value=move || address.with(|a| a.city.clone())
                        on:input=move |ev| address.update(|a| a.city = event_target_value(&ev))
                    />
                </div>
                <div class="form-group">
                    <label for="address-state">"State"</label>
                    <input
                        id="address-state"
                        type="text"
                        class="input"
                        prop:value=move || address.with(|a| a.state.clone())
                        on:input=move |ev| address.update(|a| a.state = event_target_value(&ev))
                    />
                </div>
                <div class="form-group">
                    <label for="address-pincode">"Pincode"</label>
                    <input
                        id="address-pincode"
                        type="text"
                        class="input"
                        maxlength="6"
                        inputmode="numeric"
                        prop:value=move || address.with(|a| a.pincode.clone())
                        on:input=move |ev| address.update(|a| a.pincode = event_target_value(&ev))
                    />
                </div>
            </div>
        </div>
    }
}
