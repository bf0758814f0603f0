//! Browser-side glue: Web Storage backend, RNG seeding, object URLs.

use fixit_core::{RepairError, Result, StorageBackend};
use rand::rngs::StdRng;
use rand::SeedableRng;
use web_sys::Storage;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageArea {
    Session,
    Local,
}

/// [`StorageBackend`] over `sessionStorage` or `localStorage`.
///
/// Holds no JS handles, so it is `Send + Sync` and can sit in Leptos context;
/// the storage object is looked up on every call.
#[derive(Debug, Clone, Copy)]
pub struct BrowserStorage {
    area: StorageArea,
}

impl BrowserStorage {
    pub fn new(area: StorageArea) -> Self {
        Self { area }
    }

    fn storage(&self) -> Result<Storage> {
        let window =
            web_sys::window().ok_or_else(|| RepairError::Storage("no window".to_string()))?;
        let storage = match self.area {
            StorageArea::Session => window.session_storage(),
            StorageArea::Local => window.local_storage(),
        };
        storage
            .ok()
            .flatten()
            .ok_or_else(|| RepairError::Storage(format!("{:?} storage unavailable", self.area)))
    }
}

impl StorageBackend for BrowserStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        self.storage()?
            .get_item(key)
            .map_err(|_| RepairError::Storage(format!("failed to read '{}'", key)))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.storage()?
            .set_item(key, value)
            .map_err(|_| RepairError::Storage(format!("failed to write '{}'", key)))
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        self.storage()?
            .remove_item(key)
            .map_err(|_| RepairError::Storage(format!("failed to remove '{}'", key)))
    }
}

/// RNG for booking and job OTPs, seeded from `window.crypto`. Falls back to
/// `Math.random` and the clock if crypto is unavailable.
pub fn seeded_rng() -> StdRng {
    let mut seed = [0u8; 32];
    let filled = web_sys::window()
        .and_then(|w| w.crypto().ok())
        .map(|c| c.get_random_values_with_u8_array(&mut seed).is_ok())
        .unwrap_or(false);

    if filled {
        StdRng::from_seed(seed)
    } else {
        tracing::warn!("window.crypto unavailable, seeding from Math.random");
        let mixed = (js_sys::Math::random() * u64::MAX as f64) as u64 ^ js_sys::Date::now() as u64;
        StdRng::seed_from_u64(mixed)
    }
}

/// Object URL for previewing a picked file.
pub fn preview_url(file: &web_sys::File) -> Option<String> {
    web_sys::Url::create_object_url_with_blob(file).ok()
}

pub fn revoke_preview_url(url: &str) {
    let _ = web_sys::Url::revoke_object_url(url);
}

/// Files picked in an `<input type="file">` behind `ev`.
pub fn picked_files(ev: &leptos::ev::Event) -> Vec<web_sys::File> {
    use wasm_bindgen::JsCast;
    let Some(input) = ev
        .target()
        .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
    else {
        return Vec::new();
    };
    let Some(list) = input.files() else {
        return Vec::new();
    };
    (0..list.length()).filter_map(|i| list.get(i)).collect()
}
