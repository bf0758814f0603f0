use std::sync::Arc;

use crate::address::AddressStore;
use crate::booking::BookingStore;
use crate::catalog::Catalog;
use crate::config::AppConfig;
use crate::events::EventBus;
use crate::profile::ProfileManager;
use crate::session::SessionStore;
use crate::storage::SharedStorage;
use crate::wizard::BookingWizard;
use crate::worker::WorkerPortal;

/// Every store wired to the same two storage areas and one event bus.
///
/// Customer data lives in the session area; worker data and the theme live
/// in the local area.
#[derive(Clone)]
pub struct RepairServices {
    pub config: AppConfig,
    pub catalog: Arc<Catalog>,
    pub bus: EventBus,
    pub addresses: AddressStore,
    pub bookings: BookingStore,
    pub profiles: ProfileManager,
    pub session: SessionStore,
    pub worker: WorkerPortal,
    local: SharedStorage,
}

impl RepairServices {
    pub fn new(
        config: AppConfig,
        catalog: Catalog,
        session_storage: SharedStorage,
        local_storage: SharedStorage,
    ) -> Self {
        let bus = EventBus::new();
        Self {
            config,
            catalog: Arc::new(catalog),
            addresses: AddressStore::new(session_storage.clone(), bus.clone()),
            bookings: BookingStore::new(session_storage.clone(), bus.clone()),
            profiles: ProfileManager::new(session_storage.clone(), bus.clone()),
            session: SessionStore::new(session_storage, bus.clone()),
            worker: WorkerPortal::new(local_storage.clone(), bus.clone()),
            local: local_storage,
            bus,
        }
    }

    /// A fresh wizard bound to the shared stores.
    pub fn wizard(&self) -> BookingWizard {
        BookingWizard::new(
            self.catalog.clone(),
            self.addresses.clone(),
            self.bookings.clone(),
        )
    }

    /// Long-lived storage for preferences such as the theme.
    pub fn local_storage(&self) -> &SharedStorage {
        &self.local
    }
}
