mod manager;
mod types;

pub use manager::ProfileManager;
pub use types::*;
