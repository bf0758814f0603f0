pub mod address_form;
pub mod booking_modal;
pub mod navbar;
pub mod status_badge;
pub mod toast;
