mod store;
mod types;

pub use store::AddressStore;
pub use types::*;
