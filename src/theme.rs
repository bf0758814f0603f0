use fixit_core::storage::keys;
use fixit_core::StorageBackend;
use leptos::prelude::*;

use crate::browser::{BrowserStorage, StorageArea};

#[derive(Clone, Copy)]
pub struct ThemeContext {
    pub theme: ReadSignal<String>,
    pub set_theme: WriteSignal<String>,
}

impl ThemeContext {
    /// light → dark → system → light
    pub fn cycle(&self) {
        let next = match self.theme.get_untracked().as_str() {
            "light" => "dark",
            "dark" => "system",
            _ => "light",
        };
        self.set_theme.set(next.to_string());
    }
}

/// Saved preference from local storage, "system" if none.
pub fn saved_theme() -> String {
    BrowserStorage::new(StorageArea::Local)
        .get_item(keys::THEME)
        .ok()
        .flatten()
        .filter(|t| matches!(t.as_str(), "light" | "dark" | "system"))
        .unwrap_or_else(|| "system".to_string())
}

pub fn save_theme(theme: &str) {
    if let Err(e) = BrowserStorage::new(StorageArea::Local).set_item(keys::THEME, theme) {
        tracing::warn!("Failed to save theme: {}", e);
    }
}

/// Pin `data-theme` on `<html>` for "light" and "dark". "system" clears it
/// and leaves the choice to `prefers-color-scheme`.
pub fn apply_theme(theme: &str) {
    if let Some(html) = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.document_element())
    {
        let _ = match theme {
            "light" | "dark" => html.set_attribute("data-theme", theme),
            _ => html.remove_attribute("data-theme"),
        };
    }
}
