use std::sync::Arc;

use fixit_core::catalog::default_catalog;
use fixit_core::config::AppConfig;
use fixit_core::RepairServices;
use leptos::prelude::*;
use leptos_router::components::*;
use leptos_router::path;

use crate::browser::{BrowserStorage, StorageArea};
use crate::components::booking_modal::{BookingModal, BookingModalContext};
use crate::components::navbar::Navbar;
use crate::components::toast::{ToastContext, Toaster};
use crate::pages::booking_summary::BookingSummaryPage;
use crate::pages::contact::ContactPage;
use crate::pages::home::HomePage;
use crate::pages::login::LoginPage;
use crate::pages::membership::MembershipPage;
use crate::pages::not_found::NotFoundPage;
use crate::pages::profile::ProfilePage;
use crate::pages::services::ServicesPage;
use crate::pages::worker_dashboard::WorkerDashboardPage;
use crate::pages::worker_login::WorkerLoginPage;
use crate::theme::{apply_theme, save_theme, saved_theme, ThemeContext};

const SITE_CONFIG: &str = include_str!("../config/site.toml");

pub fn site_config() -> AppConfig {
    AppConfig::from_toml_or_default(SITE_CONFIG)
}

#[component]
pub fn App() -> impl IntoView {
    let services = RepairServices::new(
        site_config(),
        default_catalog(),
        Arc::new(BrowserStorage::new(StorageArea::Session)),
        Arc::new(BrowserStorage::new(StorageArea::Local)),
    );
    provide_context(services);
    provide_context(ToastContext::new());
    provide_context(BookingModalContext::new());

    let (theme, set_theme) = signal(saved_theme());
    provide_context(ThemeContext { theme, set_theme });

    // Apply and persist theme whenever the signal changes
    Effect::new(move |_| {
        let t = theme.get();
        apply_theme(&t);
        save_theme(&t);
    });

    view! {
        <Router>
            <div class="site-layout">
                <Navbar />
                <main class="content">
                    <Routes fallback=|| view! { <NotFoundPage /> }>
                        <Route path=path!("/") view=HomePage />
                        <Route path=path!("/login") view=LoginPage />
                        <Route path=path!("/services") view=ServicesPage />
                        <Route path=path!("/membership") view=MembershipPage />
                        <Route path=path!("/contact") view=ContactPage />
                        <Route path=path!("/profile") view=ProfilePage />
                        <Route path=path!("/booking/:id") view=BookingSummaryPage />
                        <Route path=path!("/worker") view=WorkerLoginPage />
                        <Route path=path!("/worker/dashboard") view=WorkerDashboardPage />
                        <Route path=path!("/worker/*any") view=WorkerLoginPage />
                    </Routes>
                </main>
                <BookingModal />
                <Toaster />
            </div>
        </Router>
    }
}
