pub mod app_config;
pub mod booking_repo;
pub mod kv_store;

pub use booking_repo::{BookingStore, BOOKINGS_KEY};
pub use kv_store::{FileStore, KeyValueStore, MemoryStore, StoreError};
