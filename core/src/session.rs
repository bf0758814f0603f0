//! Signed-in customer, kept under both `currentUser` and `user`.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::Result;
use crate::events::{EventBus, StoreEvent};
use crate::storage::{keys, read_json, write_json, SharedStorage};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SessionUser {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub token: Option<String>,
}

#[derive(Clone)]
pub struct SessionStore {
    storage: SharedStorage,
    bus: EventBus,
}

impl SessionStore {
    pub fn new(storage: SharedStorage, bus: EventBus) -> Self {
        Self { storage, bus }
    }

    /// `currentUser`, falling back to the older `user` key.
    pub fn current_user(&self) -> Option<SessionUser> {
        read_json(self.storage.as_ref(), keys::CURRENT_USER)
            .or_else(|| read_json(self.storage.as_ref(), keys::USER))
    }

    pub fn is_signed_in(&self) -> bool {
        self.current_user().is_some()
    }

    pub fn sign_in(&self, user: &SessionUser) -> Result<()> {
        write_json(self.storage.as_ref(), keys::CURRENT_USER, user)?;
        write_json(self.storage.as_ref(), keys::USER, user)?;
        self.bus.publish(StoreEvent::SessionChanged);
        info!("Signed in {}", user.email);
        Ok(())
    }

    pub fn sign_out(&self) -> Result<()> {
        self.storage.remove_item(keys::CURRENT_USER)?;
        self.storage.remove_item(keys::USER)?;
        self.bus.publish(StoreEvent::SessionChanged);
        info!("Signed out");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MemoryStorage, StorageBackend};

    fn user() -> SessionUser {
        SessionUser {
            id: "u1".into(),
            name: "Asha".into(),
            email: "asha@example.com".into(),
            phone: "9999999999".into(),
            token: Some("t".into()),
        }
    }

    #[test]
    fn test_sign_in_writes_both_keys() {
        let storage = MemoryStorage::shared();
        let store = SessionStore::new(storage.clone(), EventBus::new());
        store.sign_in(&user()).unwrap();

        assert!(storage.get_item(keys::CURRENT_USER).unwrap().is_some());
        assert!(storage.get_item(keys::USER).unwrap().is_some());
        assert_eq!(store.current_user().unwrap().name, "Asha");
    }

    #[test]
    fn test_falls_back_to_user_key() {
        let storage = MemoryStorage::shared();
        storage
            .set_item(keys::USER, r#"{"name":"Legacy","email":"l@x.in"}"#)
            .unwrap();
        let store = SessionStore::new(storage, EventBus::new());
        assert_eq!(store.current_user().unwrap().name, "Legacy");
    }

    #[test]
    fn test_sign_out() {
        let store = SessionStore::new(MemoryStorage::shared(), EventBus::new());
        store.sign_in(&user()).unwrap();
        store.sign_out().unwrap();
        assert!(!store.is_signed_in());
    }
}
