use fixit_core::{RepairServices, StoreEvent};
use leptos::prelude::*;

pub fn use_services() -> RepairServices {
    expect_context::<RepairServices>()
}

/// A counter that ticks whenever one of `events` is published on the bus or
/// arrives from another tab. Read it inside a closure to re-run on change.
pub fn use_store_version(events: &'static [StoreEvent]) -> ReadSignal<u64> {
    let services = use_services();
    let (version, set_version) = signal(0u64);

    let bus = services.bus.clone();
    let subscription = bus.subscribe(move |event| {
        if events.contains(&event) {
            set_version.try_update(|v| *v += 1);
        }
    });

    let handle = window_event_listener(leptos::ev::storage, move |ev| {
        let changed = ev.key().and_then(|k| StoreEvent::from_storage_key(&k));
        // A cleared storage area has no key.
        if changed.map_or(ev.key().is_none(), |e| events.contains(&e)) {
            set_version.try_update(|v| *v += 1);
        }
    });

    on_cleanup(move || {
        bus.unsubscribe(subscription);
        handle.remove();
    });

    version
}
