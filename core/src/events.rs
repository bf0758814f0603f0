//! In-process publish/subscribe for store changes.
//!
//! Every store publishes a [`StoreEvent`] after it writes, so open views can
//! refresh without a reload. Changes made in another tab arrive as browser
//! `storage` events and are mapped back with [`StoreEvent::from_storage_key`].

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use tracing::debug;

use crate::storage::keys;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreEvent {
    AddressesChanged,
    BookingsChanged,
    ProfileChanged,
    SessionChanged,
    WorkerJobsChanged,
    WorkerSessionChanged,
}

impl StoreEvent {
    /// Map a storage key to the event its owning store would publish.
    pub fn from_storage_key(key: &str) -> Option<Self> {
        match key {
            keys::USER_ADDRESSES => Some(Self::AddressesChanged),
            keys::USER_BOOKINGS => Some(Self::BookingsChanged),
            keys::USER_PROFILE => Some(Self::ProfileChanged),
            keys::CURRENT_USER | keys::USER => Some(Self::SessionChanged),
            keys::REPAIR_BOOKINGS => Some(Self::WorkerJobsChanged),
            keys::CURRENT_WORKER => Some(Self::WorkerSessionChanged),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Arc<dyn Fn(StoreEvent) + Send + Sync>;

/// Cloneable handle to a shared listener list.
#[derive(Clone, Default)]
pub struct EventBus {
    listeners: Arc<Mutex<Vec<(SubscriptionId, Listener)>>>,
    next_id: Arc<AtomicU64>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&self, listener: F) -> SubscriptionId
    where
        F: Fn(StoreEvent) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        if let Ok(mut listeners) = self.listeners.lock() {
            listeners.push((id, Arc::new(listener)));
        }
        id
    }

    pub fn unsubscribe(&self, id: SubscriptionId) {
        if let Ok(mut listeners) = self.listeners.lock() {
            listeners.retain(|(existing, _)| *existing != id);
        }
    }

    /// Deliver `event` to every listener.
    ///
    /// Listeners run after the lock is released, so they may publish or
    /// unsubscribe themselves.
    pub fn publish(&self, event: StoreEvent) {
        let snapshot: Vec<Listener> = match self.listeners.lock() {
            Ok(listeners) => listeners.iter().map(|(_, l)| l.clone()).collect(),
            Err(_) => return,
        };
        debug!("Publishing {:?} to {} listeners", event, snapshot.len());
        for listener in snapshot {
            listener(event);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.lock().map(|l| l.len()).unwrap_or(0)
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("listeners", &self.listener_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_publish_reaches_subscribers() {
        let bus = EventBus::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        bus.subscribe(move |e| sink.lock().unwrap().push(e));

        bus.publish(StoreEvent::AddressesChanged);
        bus.publish(StoreEvent::BookingsChanged);

        assert_eq!(
            *seen.lock().unwrap(),
            vec![StoreEvent::AddressesChanged, StoreEvent::BookingsChanged]
        );
    }

    #[test]
    fn test_unsubscribe_stops_delivery() {
        let bus = EventBus::new();
        let count = Arc::new(AtomicU64::new(0));
        let counter = count.clone();
        let id = bus.subscribe(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        bus.publish(StoreEvent::ProfileChanged);
        bus.unsubscribe(id);
        bus.publish(StoreEvent::ProfileChanged);

        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert_eq!(bus.listener_count(), 0);
    }

    #[test]
    fn test_listener_can_unsubscribe_itself() {
        let bus = EventBus::new();
        let slot: Arc<Mutex<Option<SubscriptionId>>> = Arc::new(Mutex::new(None));
        let inner_bus = bus.clone();
        let inner_slot = slot.clone();
        let id = bus.subscribe(move |_| {
            if let Some(id) = *inner_slot.lock().unwrap() {
                inner_bus.unsubscribe(id);
            }
        });
        *slot.lock().unwrap() = Some(id);

        bus.publish(StoreEvent::SessionChanged);
        assert_eq!(bus.listener_count(), 0);
    }

    #[test]
    fn test_storage_key_mapping() {
        assert_eq!(
            StoreEvent::from_storage_key("userBookings"),
            Some(StoreEvent::BookingsChanged)
        );
        assert_eq!(
            StoreEvent::from_storage_key("user"),
            Some(StoreEvent::SessionChanged)
        );
        assert_eq!(StoreEvent::from_storage_key("theme"), None);
    }
}
