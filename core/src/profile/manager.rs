use tracing::info;

use super::types::{ProfileStats, UserProfile};
use crate::address::{Address, AddressInput, AddressStore};
use crate::booking::{BookingFilter, BookingHistoryItem, BookingStore};
use crate::catalog::Catalog;
use crate::error::{RepairError, Result};
use crate::events::{EventBus, StoreEvent};
use crate::storage::{keys, read_json, write_json, SharedStorage};

/// Backing logic for the profile page: contact details, saved addresses and
/// booking history.
#[derive(Clone)]
pub struct ProfileManager {
    storage: SharedStorage,
    bus: EventBus,
    addresses: AddressStore,
    bookings: BookingStore,
}

impl ProfileManager {
    pub fn new(storage: SharedStorage, bus: EventBus) -> Self {
        Self {
            addresses: AddressStore::new(storage.clone(), bus.clone()),
            bookings: BookingStore::new(storage.clone(), bus.clone()),
            storage,
            bus,
        }
    }

    /// Stored profile, or an empty one.
    pub fn profile(&self) -> UserProfile {
        read_json(self.storage.as_ref(), keys::USER_PROFILE).unwrap_or_default()
    }

    pub fn has_profile(&self) -> bool {
        read_json::<UserProfile>(self.storage.as_ref(), keys::USER_PROFILE).is_some()
    }

    pub fn save_profile(&self, mut profile: UserProfile) -> Result<()> {
        profile.validate()?;
        profile.name = profile.name.trim().to_string();
        profile.phone = profile.phone.trim().to_string();
        profile.email = profile.email.trim().to_string();
        if profile.member_since.is_empty() {
            profile.member_since = self.profile().member_since;
        }
        write_json(self.storage.as_ref(), keys::USER_PROFILE, &profile)?;
        self.bus.publish(StoreEvent::ProfileChanged);
        info!("Saved profile for {}", profile.name);
        Ok(())
    }

    /// Record the membership plan picked on the membership page.
    pub fn choose_plan(&self, catalog: &Catalog, plan_id: &str) -> Result<()> {
        let plan = catalog
            .plan(plan_id)
            .ok_or_else(|| RepairError::NotFound(format!("plan {}", plan_id)))?;
        let mut profile = self.profile();
        profile.membership = Some(plan.id.clone());
        write_json(self.storage.as_ref(), keys::USER_PROFILE, &profile)?;
        self.bus.publish(StoreEvent::ProfileChanged);
        info!("Membership set to {}", plan.name);
        Ok(())
    }

    pub fn addresses(&self) -> Vec<Address> {
        self.addresses.list()
    }

    /// Add an address from the profile form. With `make_default` set the new
    /// entry takes the default flag from whichever address held it.
    pub fn add_address(&self, input: AddressInput, make_default: bool) -> Result<Address> {
        let mut address = self.addresses.add(input)?;
        if make_default && !address.is_default {
            self.addresses.set_default(address.id)?;
            address.is_default = true;
        }
        Ok(address)
    }

    pub fn update_address(&self, id: u32, input: AddressInput) -> Result<Address> {
        self.addresses.update(id, input)
    }

    pub fn set_default_address(&self, id: u32) -> Result<()> {
        self.addresses.set_default(id)
    }

    pub fn delete_address(&self, id: u32) -> Result<()> {
        self.addresses.delete(id)
    }

    pub fn bookings(&self, filter: BookingFilter) -> Vec<BookingHistoryItem> {
        self.bookings.filtered(filter)
    }

    /// Totals over every booking, whatever tab is showing.
    pub fn stats(&self) -> ProfileStats {
        ProfileStats::from_bookings(&self.bookings.list())
    }
}
