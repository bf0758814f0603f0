mod ids;
mod store;
mod types;

pub use ids::{generate_booking_id, generate_otp, is_valid_otp};
pub use store::BookingStore;
pub use types::*;
