//! Cart state management.

pub mod errors;
pub mod models;
pub mod store;

pub use errors::{OrderError, SyncError};
pub use models::{CartLine, ItemId};
pub use store::CartStore;
