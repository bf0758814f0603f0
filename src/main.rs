mod app;
mod browser;
mod components;
mod hooks;
mod logging;
mod pages;
mod theme;

use app::App;

fn main() {
    let config = app::site_config();
    logging::init(&config.log_level);
    leptos::mount::mount_to_body(App);
}
