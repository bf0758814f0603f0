//! Technician portal over `repairBookings` in local storage.
//!
//! Jobs here are separate records from the customer's `userBookings`; a
//! booking made through the wizard never shows up in this queue.

mod portal;
mod types;

pub use portal::WorkerPortal;
pub use types::*;
