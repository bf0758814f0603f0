use std::sync::{Arc, Mutex};

use chrono::{TimeZone, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;

use fixit_core::address::{Address, AddressInput, AddressType};
use fixit_core::booking::{BookingFilter, BookingStatus};
use fixit_core::catalog::default_catalog;
use fixit_core::config::AppConfig;
use fixit_core::storage::{keys, StorageBackend};
use fixit_core::wizard::{AddressChoice, WizardStep};
use fixit_core::{MemoryStorage, RepairServices, StoreEvent};

fn services() -> RepairServices {
    RepairServices::new(
        AppConfig::default(),
        default_catalog(),
        MemoryStorage::shared(),
        MemoryStorage::shared(),
    )
}

fn home_address() -> AddressInput {
    AddressInput {
        kind: AddressType::Home,
        address: "42 Marine Drive".into(),
        city: "Mumbai".into(),
        state: "Maharashtra".into(),
        pincode: "400020".into(),
    }
}

fn is_booking_id(id: &str) -> bool {
    id.len() == 9
        && id.starts_with("BK-")
        && id[3..].bytes().all(|b| b.is_ascii_digit())
}

#[test]
fn test_full_booking_with_new_address() {
    let services = services();
    let events = Arc::new(Mutex::new(Vec::new()));
    let sink = events.clone();
    services.bus.subscribe(move |e| sink.lock().unwrap().push(e));

    let mut wizard = services.wizard();
    wizard.select_device("laptop").unwrap();
    wizard.select_brand("Dell").unwrap();
    wizard.next().unwrap();
    wizard.toggle_issue("battery").unwrap();
    wizard.next().unwrap();
    assert_eq!(wizard.step(), WizardStep::Contact);
    assert_eq!(wizard.address_choice(), AddressChoice::New);

    {
        let form = wizard.form_mut();
        form.name = "Asha".into();
        form.phone = "9999999999".into();
        form.address = home_address();
    }
    wizard.next().unwrap();
    assert_eq!(wizard.step(), WizardStep::Review);

    let mut rng = StdRng::seed_from_u64(42);
    let now = Utc.with_ymd_and_hms(2026, 3, 14, 9, 26, 53).unwrap();
    let booking = wizard.submit(&mut rng, now).unwrap();

    assert_eq!(wizard.step(), WizardStep::Success);
    assert_eq!(booking.status, BookingStatus::Active);
    assert!(is_booking_id(&booking.id), "bad id {}", booking.id);
    assert_eq!(booking.otp.len(), 4);
    assert!(booking.otp.bytes().all(|b| b.is_ascii_digit()));
    assert_eq!(booking.device, "Dell Laptop");
    assert_eq!(booking.issue, "Battery Problem");
    assert_eq!(booking.cost, "₹3,499");
    assert_eq!(booking.discount, "₹700");
    assert_eq!(booking.rating, 0);
    assert_eq!(booking.customer_name, "Asha");
    assert_eq!(booking.address, "42 Marine Drive, Mumbai, Maharashtra - 400020");
    assert_eq!(booking.created_at, booking.date);

    let addresses = services.addresses.list();
    assert_eq!(addresses.len(), 1);
    assert!(addresses[0].is_default);

    let bookings = services.bookings.list();
    assert_eq!(bookings.len(), 1);
    assert_eq!(bookings[0].id, booking.id);

    let seen = events.lock().unwrap();
    assert!(seen.contains(&StoreEvent::AddressesChanged));
    assert!(seen.contains(&StoreEvent::BookingsChanged));
}

#[test]
fn test_second_booking_goes_first_and_second_address_not_default() {
    let services = services();
    services.addresses.add(home_address()).unwrap();

    let mut rng = StdRng::seed_from_u64(9);
    for (minute, issue) in [(0u32, "screen"), (1, "keyboard")] {
        let mut wizard = services.wizard();
        wizard.select_device("laptop").unwrap();
        wizard.select_brand("HP").unwrap();
        wizard.next().unwrap();
        wizard.select_issue(issue).unwrap();
        wizard.next().unwrap();
        wizard.use_new_address();
        {
            let form = wizard.form_mut();
            form.name = "Ravi".into();
            form.phone = "9876543210".into();
            form.address = AddressInput {
                address: format!("{} Park Street", minute + 1),
                ..home_address()
            };
        }
        wizard.next().unwrap();
        let now = Utc.with_ymd_and_hms(2026, 3, 14, 10, minute, 0).unwrap();
        wizard.submit(&mut rng, now).unwrap();
    }

    let bookings = services.bookings.list();
    assert_eq!(bookings.len(), 2);
    assert_eq!(bookings[0].issue, "Keyboard Replacement");
    assert_eq!(bookings[1].issue, "Screen Replacement");

    let addresses = services.addresses.list();
    assert_eq!(addresses.len(), 3);
    assert_eq!(addresses.iter().filter(|a| a.is_default).count(), 1);
    assert!(addresses[0].is_default);
}

#[test]
fn test_saved_address_booking_adds_no_address() {
    let services = services();
    let saved = services.addresses.add(home_address()).unwrap();

    let mut wizard = services.wizard();
    wizard.select_device("macbook").unwrap();
    wizard.select_brand("Apple").unwrap();
    wizard.next().unwrap();
    wizard.select_issue("not-sure").unwrap();
    wizard.next().unwrap();
    assert_eq!(wizard.address_choice(), AddressChoice::Saved(saved.id));
    wizard.form_mut().name = "Meera".into();
    wizard.form_mut().phone = "9123456780".into();
    wizard.next().unwrap();

    let mut rng = StdRng::seed_from_u64(1);
    let booking = wizard.submit(&mut rng, Utc::now()).unwrap();

    assert_eq!(services.addresses.list().len(), 1);
    assert_eq!(booking.address, saved.flattened());
    assert_eq!(booking.issue, "Not Sure / Need Diagnosis");
}

#[test]
fn test_reset_does_not_touch_stores() {
    let services = services();
    let mut wizard = services.wizard();
    wizard.select_device("laptop").unwrap();
    wizard.select_brand("Dell").unwrap();
    wizard.next().unwrap();
    wizard.select_issue("battery").unwrap();
    wizard.next().unwrap();
    wizard.form_mut().address = home_address();

    wizard.reset();

    assert_eq!(wizard.step(), WizardStep::Device);
    assert!(services.addresses.list().is_empty());
    assert!(services.bookings.list().is_empty());
}

#[test]
fn test_profile_sees_wizard_booking() {
    let services = services();
    let refreshed = Arc::new(Mutex::new(0usize));
    let counter = refreshed.clone();
    let profiles = services.profiles.clone();
    services.bus.subscribe(move |e| {
        if e == StoreEvent::BookingsChanged {
            *counter.lock().unwrap() = profiles.stats().total_repairs;
        }
    });

    let mut wizard = services.wizard();
    wizard.select_device("desktop").unwrap();
    wizard.select_brand("Custom Build").unwrap();
    wizard.next().unwrap();
    wizard.select_issue("motherboard").unwrap();
    wizard.next().unwrap();
    {
        let form = wizard.form_mut();
        form.name = "Kabir".into();
        form.phone = "9000000001".into();
        form.address = home_address();
    }
    wizard.next().unwrap();
    let mut rng = StdRng::seed_from_u64(2);
    wizard.submit(&mut rng, Utc::now()).unwrap();

    assert_eq!(*refreshed.lock().unwrap(), 1);
    assert_eq!(services.profiles.bookings(BookingFilter::Active).len(), 1);
    assert!(services.profiles.bookings(BookingFilter::Completed).is_empty());
    assert_eq!(services.profiles.stats().spent_display(), "₹5,999");
}

#[test]
fn test_address_store_json_round_trip_after_mutations() {
    let services = services();
    for street in ["1 A St", "2 B St", "3 C St", "4 D St"] {
        services
            .addresses
            .add(AddressInput {
                kind: AddressType::Other,
                address: street.into(),
                ..home_address()
            })
            .unwrap();
    }
    services.addresses.set_default(3).unwrap();
    services.addresses.delete(2).unwrap();
    services.addresses.set_default(4).unwrap();
    services.addresses.delete(1).unwrap();

    let before = services.addresses.list();
    let json = serde_json::to_string(&before).unwrap();
    let after: Vec<Address> = serde_json::from_str(&json).unwrap();
    assert_eq!(before, after);
    assert_eq!(after.iter().map(|a| a.id).collect::<Vec<_>>(), vec![3, 4]);
    assert!(after[1].is_default);
}

#[test]
fn test_deleting_only_default_address_empties_store() {
    let services = services();
    let only = services.addresses.add(home_address()).unwrap();
    assert!(only.is_default);

    services.addresses.delete(only.id).unwrap();

    assert!(services.addresses.list().is_empty());
    assert!(services.addresses.default_address().is_none());
}

#[test]
fn test_worker_queue_is_separate_from_customer_bookings() {
    let services = services();
    services
        .worker
        .seed_demo_jobs("W-1", 2, Utc::now())
        .unwrap();

    assert_eq!(services.worker.assigned_jobs("W-1").len(), 2);
    assert!(services.bookings.list().is_empty());
    assert!(services
        .local_storage()
        .get_item(keys::REPAIR_BOOKINGS)
        .unwrap()
        .is_some());
}
