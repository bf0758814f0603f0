pub mod booking_summary;
pub mod contact;
pub mod home;
pub mod login;
pub mod membership;
pub mod not_found;
pub mod profile;
pub mod services;
pub mod worker_dashboard;
pub mod worker_login;
