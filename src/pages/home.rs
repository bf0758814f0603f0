use leptos::prelude::*;

use crate::components::booking_modal::use_booking_modal;

#[component]
pub fn HomePage() -> impl IntoView {
    let modal = use_booking_modal();

    view! {
        <div class="page home-page">
            <section class="hero">
                <h1>"Laptop trouble? We come to you."</h1>
                <p class="page-description">
                    "Doorstep repair for laptops, MacBooks and desktops by verified technicians."
                </p>
                <div class="hero-actions">
                    <button class="btn btn-primary btn-lg" on:click=move |_| modal.open()>
                        "Book a Repair"
                    </button>
                    <a href="/services" class="btn btn-secondary btn-lg">"See Prices"</a>
                </div>
            </section>

            <div class="card-grid">
                <div class="card">
                    <h3>"Doorstep Service"</h3>
                    <p>"A technician visits your home or office at a time that suits you"</p>
                </div>
                <div class="card">
                    <h3>"Transparent Pricing"</h3>
                    <p>"Know the estimate before you book, members save on every repair"</p>
                </div>
                <div class="card">
                    <h3>"Repair Warranty"</h3>
                    <p>"Replaced parts carry a written warranty of up to 24 months"</p>
                </div>
            </div>

            <div class="how-it-works">
                <h3>"How It Works"</h3>
                <div class="steps">
                    <div class="step">
                        <span class="step-number">"1"</span>
                        <div class="step-content">
                            <strong>"Book"</strong>
                            <p>"Pick your device and tell us what's wrong"</p>
                        </div>
                    </div>
                    <div class="step">
                        <span class="step-number">"2"</span>
                        <div class="step-content">
                            <strong>"Verify"</strong>
                            <p>"Share your booking OTP with the technician when they arrive"</p>
                        </div>
                    </div>
                    <div class="step">
                        <span class="step-number">"3"</span>
                        <div class="step-content">
                            <strong>"Fixed"</strong>
                            <p>"Get photos of the repair and a warranty on the parts used"</p>
                        </div>
                    </div>
                </div>
            </div>

            <section class="cta">
                <h3>"Ready to get it fixed?"</h3>
                <button class="btn btn-primary" on:click=move |_| modal.open()>"Book Now"</button>
            </section>
        </div>
    }
}
