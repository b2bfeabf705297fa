use async_trait::async_trait;
use std::sync::Arc;
use tickethub_core::{BookingRepository, CoreError, CoreResult};
use tickethub_shared::Booking;
use tokio::sync::Mutex;

use crate::kv_store::{KeyValueStore, StoreError};

/// Key holding every confirmed booking as one JSON array
pub const BOOKINGS_KEY: &str = "bookings";

/// Booking list kept under a single key.
///
/// Appends are read-modify-write of the whole list, serialized by `write_lock`
/// so two confirmations can never drop each other's entry.
pub struct BookingStore {
    kv: Arc<dyn KeyValueStore>,
    write_lock: Mutex<()>,
}

impl BookingStore {
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        Self {
            kv,
            write_lock: Mutex::new(()),
        }
    }

    async fn load(&self) -> CoreResult<Vec<Booking>> {
        let raw = self.kv.get(BOOKINGS_KEY).await.map_err(storage)?;
        match raw {
            None => Ok(Vec::new()),
            Some(raw) if raw.trim().is_empty() => Ok(Vec::new()),
            Some(raw) => serde_json::from_str(&raw).map_err(|e| CoreError::Corrupt(e.to_string())),
        }
    }
}

fn storage(e: StoreError) -> CoreError {
    CoreError::Storage(e.to_string())
}

#[async_trait]
impl BookingRepository for BookingStore {
    async fn append(&self, booking: &Booking) -> CoreResult<()> {
        let _guard = self.write_lock.lock().await;

        let mut bookings = self.load().await?;
        bookings.push(booking.clone());

        let body = serde_json::to_string(&bookings).map_err(|e| CoreError::Storage(e.to_string()))?;
        self.kv.set(BOOKINGS_KEY, &body).await.map_err(storage)?;

        tracing::debug!(booking_id = %booking.id, count = bookings.len(), "Booking list written");
        Ok(())
    }

    async fn list(&self) -> CoreResult<Vec<Booking>> {
        self.load().await
    }

    async fn get(&self, id: &str) -> CoreResult<Option<Booking>> {
        Ok(self.load().await?.into_iter().find(|b| b.id == id))
    }
}
