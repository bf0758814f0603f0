//! Domain logic for the FixIt Laptop Care site.
//!
//! Everything here is plain Rust over a [`storage::StorageBackend`], so it
//! runs the same in the browser and in native tests.

pub mod address;
pub mod api;
pub mod booking;
pub mod catalog;
pub mod config;
pub mod contact;
pub mod currency;
mod error;
pub mod events;
pub mod profile;
mod services;
pub mod session;
pub mod storage;
pub mod wizard;
pub mod worker;

pub use error::{RepairError, Result};
pub use events::{EventBus, StoreEvent};
pub use services::RepairServices;
pub use storage::{MemoryStorage, SharedStorage, StorageBackend};
