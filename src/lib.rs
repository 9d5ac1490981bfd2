pub mod alert;
pub mod config;
pub mod extract;
pub mod fetch;
pub mod models;
pub mod monitor;
pub mod notify;
pub mod registry;
pub mod store;
pub mod utils;

// Re-export commonly used types
pub use utils::error::{ExtractionError, NotifyError, RegistryError, StoreError};
