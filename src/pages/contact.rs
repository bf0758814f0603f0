use fixit_core::contact::ContactMessage;
use leptos::prelude::*;

use crate::components::toast::use_toasts;

#[component]
pub fn ContactPage() -> impl IntoView {
    let toasts = use_toasts();
    let form = RwSignal::new(ContactMessage::default());
    let (error, set_error) = signal::<Option<String>>(None);

    let send = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let message = form.get();
        match message.validate() {
            Ok(()) => {
                tracing::info!("Contact message from {} <{}>", message.name, message.email);
                toasts.success("Thanks! We'll get back to you within a day.");
                form.set(ContactMessage::default());
                set_error.set(None);
            }
            Err(e) => set_error.set(Some(e.to_string())),
        }
    };

    view! {
        <div class="page contact-page">
            <h2>"Contact Us"</h2>
            <p class="page-description">
                "Questions about a booking, a warranty or a membership? Write to us."
            </p>

            <div class="contact-layout">
                <form class="contact-form" on:submit=send>
                    <div class="form-row">
                        <div class="form-group">
                            <label for="contact-name">"Name"</label>
                            <input
                                id="contact-name"
                                type="text"
                                class="input"
                                prop:value=move || form.with(|f| f.name.clone())
                                on:input=move |ev| form.update(|f| f.name = event_target_value(&ev))
                            />
                        </div>
                        <div class="form-group">
                            <label for="contact-email">"Email"</label>
                            <input
                                id="contact-email"
                                type="email"
                                class="input"
                                prop:value=move || form.with(|f| f.email.clone())
                                on:input=move |ev| form.update(|f| f.email = event_target_value(&ev))
                            />
                        </div>
                    </div>
                    <div class="form-row">
                        <div class="form-group">
                            <label for="contact-phone">"Phone (optional)"</label>
                            <input
                                id="contact-phone"
                                type="tel"
                                class="input"
                                prop:value=move || form.with(|f| f.phone.clone())
                                on:input=move |ev| form.update(|f| f.phone = event_target_value(&ev))
                            />
                        </div>
                        <div class="form-group">
                            <label for="contact-subject">"Subject"</label>
                            <input
                                id="contact-subject"
                                type="text"
                                class="input"
                                prop:value=move || form.with(|f| f.subject.clone())
                                on:input=move |ev| form.update(|f| f.subject = event_target_value(&ev))
                            />
                        </div>
                    </div>
                    <div class="form-group">
                        <label for="contact-message">"Message"</label>
                        <textarea
                            id="contact-message"
                            class="input"
                            rows="5"
                            prop:value=move || form.with(|f| f.message.clone())
                            on:input=move |ev| form.update(|f| f.message = event_target_value(&ev))
                        ></textarea>
                    </div>
                    <Show when=move || error.get().is_some()>
                        <p class="error-text">{move || error.get().unwrap_or_default()}</p>
                    </Show>
                    <button type="submit" class="btn btn-primary">"Send Message"</button>
                </form>

                <aside class="contact-info">
                    <h3>"Reach Us"</h3>
                    <p>"Phone: +91 98765 43210"</p>
                    <p>"Email: support@fixit.in"</p>
                    <p>"Hours: Mon to Sat, 9am to 8pm"</p>
                </aside>
            </div>
        </div>
    }
}
