use tracing::info;

use super::types::{Address, AddressInput};
use crate::error::{RepairError, Result};
use crate::events::{EventBus, StoreEvent};
use crate::storage::{keys, read_json_or_default, write_json, SharedStorage};

/// Saved addresses under `userAddresses`.
///
/// The booking wizard and the profile page both go through this store. Every
/// mutation writes the whole array back and publishes
/// [`StoreEvent::AddressesChanged`].
#[derive(Clone)]
pub struct AddressStore {
    storage: SharedStorage,
    bus: EventBus,
}

impl AddressStore {
    pub fn new(storage: SharedStorage, bus: EventBus) -> Self {
        Self { storage, bus }
    }

    /// All saved addresses. Missing or corrupt data reads as empty.
    pub fn list(&self) -> Vec<Address> {
        read_json_or_default(self.storage.as_ref(), keys::USER_ADDRESSES)
    }

    pub fn get(&self, id: u32) -> Option<Address> {
        self.list().into_iter().find(|a| a.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.list().is_empty()
    }

    /// The default address, if one is flagged.
    pub fn default_address(&self) -> Option<Address> {
        self.list().into_iter().find(|a| a.is_default)
    }

    /// Append a new address. It becomes the default only if the store was
    /// empty.
    pub fn add(&self, input: AddressInput) -> Result<Address> {
        input.validate()?;
        let mut addresses = self.list();
        let id = addresses
            .iter()
            .map(|a| a.id)
            .max()
            .unwrap_or(0)
            .checked_add(1)
            .ok_or_else(|| RepairError::Storage("address ids exhausted".into()))?;
        let address = input.into_address(id, addresses.is_empty());
        addresses.push(address.clone());
        self.save(&addresses)?;
        info!("Added address {} ({})", id, address.kind.label());
        Ok(address)
    }

    /// Replace the editable fields of an address. The id and default flag are
    /// kept.
    pub fn update(&self, id: u32, input: AddressInput) -> Result<Address> {
        input.validate()?;
        let mut addresses = self.list();
        let slot = addresses
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| RepairError::NotFound(format!("address {}", id)))?;
        *slot = input.into_address(id, slot.is_default);
        let updated = slot.clone();
        self.save(&addresses)?;
        info!("Updated address {}", id);
        Ok(updated)
    }

    /// Flag `id` as the only default address.
    pub fn set_default(&self, id: u32) -> Result<()> {
        let mut addresses = self.list();
        if !addresses.iter().any(|a| a.id == id) {
            return Err(RepairError::NotFound(format!("address {}", id)));
        }
        for address in &mut addresses {
            address.is_default = address.id == id;
        }
        self.save(&addresses)?;
        info!("Address {} is now the default", id);
        Ok(())
    }

    /// Remove an address. Deleting the default does not promote another
    /// entry; the store is simply left without a default.
    pub fn delete(&self, id: u32) -> Result<()> {
        let mut addresses = self.list();
        let before = addresses.len();
        addresses.retain(|a| a.id != id);
        if addresses.len() == before {
            return Err(RepairError::NotFound(format!("address {}", id)));
        }
        self.save(&addresses)?;
        info!("Deleted address {}", id);
        Ok(())
    }

    fn save(&self, addresses: &[Address]) -> Result<()> {
        write_json(self.storage.as_ref(), keys::USER_ADDRESSES, addresses)?;
        self.bus.publish(StoreEvent::AddressesChanged);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use super::*;
    use crate::address::AddressType;
    use crate::storage::{MemoryStorage, StorageBackend};

    fn input(street: &str) -> AddressInput {
        AddressInput {
            kind: AddressType::Home,
            address: street.into(),
            city: "Pune".into(),
            state: "Maharashtra".into(),
            pincode: "411001".into(),
        }
    }

    fn create_test_store() -> (AddressStore, SharedStorage, EventBus) {
        let storage = MemoryStorage::shared();
        let bus = EventBus::new();
        (AddressStore::new(storage.clone(), bus.clone()), storage, bus)
    }

    #[test]
    fn test_first_address_becomes_default() {
        let (store, _, _) = create_test_store();
        let first = store.add(input("1 First St")).unwrap();
        let second = store.add(input("2 Second St")).unwrap();

        assert_eq!(first.id, 1);
        assert!(first.is_default);
        assert_eq!(second.id, 2);
        assert!(!second.is_default);
    }

    #[test]
    fn test_ids_follow_max_not_count() {
        let (store, _, _) = create_test_store();
        store.add(input("a")).unwrap();
        store.add(input("b")).unwrap();
        store.add(input("c")).unwrap();
        store.delete(2).unwrap();

        let next = store.add(input("d")).unwrap();
        assert_eq!(next.id, 4);
    }

    #[test]
    fn test_add_rejects_incomplete_form() {
        let (store, _, _) = create_test_store();
        let mut bad = input("x");
        bad.pincode = "123".into();
        assert!(matches!(store.add(bad), Err(RepairError::Validation(_))));
        assert!(store.is_empty());
    }

    #[test]
    fn test_set_default_is_exclusive() {
        let (store, _, _) = create_test_store();
        store.add(input("a")).unwrap();
        store.add(input("b")).unwrap();
        store.add(input("c")).unwrap();

        store.set_default(3).unwrap();

        let defaults: Vec<u32> = store
            .list()
            .iter()
            .filter(|a| a.is_default)
            .map(|a| a.id)
            .collect();
        assert_eq!(defaults, vec![3]);
    }

    #[test]
    fn test_set_default_unknown_id() {
        let (store, _, _) = create_test_store();
        store.add(input("a")).unwrap();
        assert!(matches!(store.set_default(9), Err(RepairError::NotFound(_))));
        assert!(store.get(1).unwrap().is_default);
    }

    #[test]
    fn test_delete_default_leaves_no_default() {
        let (store, _, _) = create_test_store();
        store.add(input("a")).unwrap();
        store.add(input("b")).unwrap();

        store.delete(1).unwrap();

        assert_eq!(store.list().len(), 1);
        assert!(store.default_address().is_none());
    }

    #[test]
    fn test_update_keeps_id_and_default() {
        let (store, _, _) = create_test_store();
        store.add(input("a")).unwrap();
        let mut edited = input("99 New Lane");
        edited.kind = AddressType::Other;

        let updated = store.update(1, edited).unwrap();

        assert_eq!(updated.id, 1);
        assert!(updated.is_default);
        assert_eq!(updated.address, "99 New Lane");
        assert_eq!(store.get(1).unwrap().kind, AddressType::Other);
    }

    #[test]
    fn test_corrupt_storage_reads_empty_and_recovers() {
        let (store, storage, _) = create_test_store();
        storage.set_item(keys::USER_ADDRESSES, "{oops").unwrap();

        assert!(store.list().is_empty());
        let added = store.add(input("a")).unwrap();
        assert_eq!(added.id, 1);
        assert!(added.is_default);
    }

    #[test]
    fn test_mutations_publish_events() {
        let (store, _, bus) = create_test_store();
        let count = Arc::new(AtomicUsize::new(0));
        let counter = count.clone();
        bus.subscribe(move |e| {
            if e == StoreEvent::AddressesChanged {
                counter.fetch_add(1, Ordering::SeqCst);
            }
        });

        store.add(input("a")).unwrap();
        store.set_default(1).unwrap();
        store.delete(1).unwrap();

        assert_eq!(count.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_add_fails_cleanly_when_ids_exhausted() {
        let (store, storage, _) = create_test_store();
        let raw = r#"[{"id":4294967295,"type":"Home","address":"9 Last St","city":"Pune","state":"Maharashtra","pincode":"411001","isDefault":true}]"#;
        storage.set_item(keys::USER_ADDRESSES, raw).unwrap();

        let result = store.add(input("10 Next St"));

        assert!(matches!(result, Err(RepairError::Storage(_))));
        assert_eq!(store.list().len(), 1);
    }
}
