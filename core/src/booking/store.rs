use tracing::info;

use super::types::{BookingFilter, BookingHistoryItem};
use crate::error::Result;
use crate::events::{EventBus, StoreEvent};
use crate::storage::{keys, read_json_or_default, write_json, SharedStorage};

/// Customer booking history under `userBookings`, newest first.
#[derive(Clone)]
pub struct BookingStore {
    storage: SharedStorage,
    bus: EventBus,
}

impl BookingStore {
    pub fn new(storage: SharedStorage, bus: EventBus) -> Self {
        Self { storage, bus }
    }

    pub fn list(&self) -> Vec<BookingHistoryItem> {
        read_json_or_default(self.storage.as_ref(), keys::USER_BOOKINGS)
    }

    pub fn filtered(&self, filter: BookingFilter) -> Vec<BookingHistoryItem> {
        self.list()
            .into_iter()
            .filter(|b| filter.matches(b.status))
            .collect()
    }

    pub fn get(&self, id: &str) -> Option<BookingHistoryItem> {
        self.list().into_iter().find(|b| b.id == id)
    }

    pub fn ids(&self) -> Vec<String> {
        self.list().into_iter().map(|b| b.id).collect()
    }

    /// Insert a booking at the front of the history.
    pub fn prepend(&self, booking: BookingHistoryItem) -> Result<()> {
        let mut bookings = self.list();
        info!("Recording booking {} for {}", booking.id, booking.device);
        bookings.insert(0, booking);
        write_json(self.storage.as_ref(), keys::USER_BOOKINGS, &bookings)?;
        self.bus.publish(StoreEvent::BookingsChanged);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::booking::BookingStatus;
    use crate::storage::{MemoryStorage, StorageBackend};

    fn booking(id: &str, status: BookingStatus) -> BookingHistoryItem {
        BookingHistoryItem {
            id: id.into(),
            device: "Dell Laptop".into(),
            issue: "Battery Problem".into(),
            date: "2026-01-01T10:00:00Z".into(),
            status,
            cost: "₹3,499".into(),
            discount: "₹700".into(),
            rating: 0,
            otp: "1234".into(),
            customer_name: "Asha".into(),
            customer_phone: "9999999999".into(),
            address: "1 Main St, Pune, Maharashtra - 411001".into(),
            description: String::new(),
            created_at: "2026-01-01T10:00:00Z".into(),
        }
    }

    #[test]
    fn test_prepend_puts_newest_first() {
        let store = BookingStore::new(MemoryStorage::shared(), EventBus::new());
        store.prepend(booking("BK-000001", BookingStatus::Active)).unwrap();
        store.prepend(booking("BK-000002", BookingStatus::Active)).unwrap();

        assert_eq!(store.ids(), vec!["BK-000002", "BK-000001"]);
    }

    #[test]
    fn test_filtered() {
        let store = BookingStore::new(MemoryStorage::shared(), EventBus::new());
        store.prepend(booking("BK-000001", BookingStatus::Completed)).unwrap();
        store.prepend(booking("BK-000002", BookingStatus::InProgress)).unwrap();
        store.prepend(booking("BK-000003", BookingStatus::Active)).unwrap();

        assert_eq!(store.filtered(BookingFilter::Active).len(), 2);
        assert_eq!(store.filtered(BookingFilter::Completed)[0].id, "BK-000001");
        assert_eq!(store.filtered(BookingFilter::All).len(), 3);
    }

    #[test]
    fn test_stored_json_shape() {
        let storage = MemoryStorage::shared();
        let store = BookingStore::new(storage.clone(), EventBus::new());
        store.prepend(booking("BK-000001", BookingStatus::InProgress)).unwrap();

        let raw = storage.get_item(keys::USER_BOOKINGS).unwrap().unwrap();
        let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(json[0]["status"], "In Progress");
        assert_eq!(json[0]["customerName"], "Asha");
        assert_eq!(json[0]["createdAt"], "2026-01-01T10:00:00Z");
    }

    #[test]
    fn test_get_missing() {
        let store = BookingStore::new(MemoryStorage::shared(), EventBus::new());
        assert!(store.get("BK-404404").is_none());
    }

    #[test]
    fn test_record_without_description_survives_prepend() {
        let storage = MemoryStorage::shared();
        let raw = r#"[{"id":"BK-111111","device":"HP Laptop","issue":"Screen Replacement","date":"2025-12-01T09:00:00Z","status":"Completed","cost":"₹4,999","discount":"₹1,000","rating":4,"otp":"4321","customerName":"Ravi","customerPhone":"9876543210","address":"2 Park St, Pune, Maharashtra - 411001","createdAt":"2025-12-01T09:00:00Z"}]"#;
        storage.set_item(keys::USER_BOOKINGS, raw).unwrap();
        let store = BookingStore::new(storage, EventBus::new());

        let existing = store.list();
        assert_eq!(existing.len(), 1);
        assert_eq!(existing[0].description, "");
        assert_eq!(existing[0].status, BookingStatus::Completed);

        store.prepend(booking("BK-222222", BookingStatus::Active)).unwrap();
        assert_eq!(store.ids(), vec!["BK-222222", "BK-111111"]);
    }
}
