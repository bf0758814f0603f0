//! The booking wizard: device → brand → issues → contact → review → success.
//!
//! [`BookingWizard`] holds the in-progress booking in memory only. Nothing is
//! written until [`BookingWizard::submit`], which records the booking (and a
//! newly entered address) through the injected stores.

mod state;
mod summary;

pub use state::{AddressChoice, BookingWizard, ContactForm, ImageAttachment, WizardStep};
pub use summary::ReviewSummary;
