//! Devices, brands, issues and membership plans offered by the site.
//!
//! The catalog is TOML. [`default_catalog`] returns the copy embedded at
//! compile time; [`catalog_from_str`] parses and checks any other copy.

mod rules;
mod types;

pub use rules::{catalog_from_str, default_catalog};
pub use types::*;
