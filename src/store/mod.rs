pub mod client;
pub mod config;

pub use client::{DeleteOutcome, ObjectEntry, ObjectStore};
pub use config::{StoreConfig, SwiftStorage};
