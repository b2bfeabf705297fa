use async_trait::async_trait;
use tickethub_shared::Booking;

use crate::CoreResult;

/// Durable list of confirmed bookings
#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Append one booking and persist the whole updated list in a single write
    async fn append(&self, booking: &Booking) -> CoreResult<()>;

    /// Every booking in the order it was recorded
    async fn list(&self) -> CoreResult<Vec<Booking>>;

    async fn get(&self, id: &str) -> CoreResult<Option<Booking>>;
}
