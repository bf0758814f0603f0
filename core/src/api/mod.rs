//! Client for the user REST API (`/user/...`).
//!
//! The booking wizard never calls this. The login page uses it for accounts
//! and the booking summary page for server-side bookings and ratings.

mod client;
mod types;

pub use client::UserApi;
pub use types::*;
