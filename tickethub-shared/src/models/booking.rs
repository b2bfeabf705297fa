use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::seat::Seat;
use crate::pii::Masked;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
}

/// A completed purchase. Immutable once recorded.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    /// Opaque token; records written by other clients use their own format
    pub id: String,
    pub event_id: String,
    pub show_id: String,
    pub seats: Vec<Seat>,
    pub total: u64,
    pub status: BookingStatus,
    /// Payload encoded into the scannable ticket code
    pub qr_code: Masked<String>,
    pub booking_date: DateTime<Utc>,
}

impl Booking {
    pub fn confirmed(
        id: String,
        event_id: String,
        show_id: String,
        seats: Vec<Seat>,
        total: u64,
        qr_code: String,
    ) -> Self {
        Self {
            id,
            event_id,
            show_id,
            seats,
            total,
            status: BookingStatus::Confirmed,
            qr_code: Masked(qr_code),
            booking_date: Utc::now(),
        }
    }

    pub fn seat_ids(&self) -> Vec<&str> {
        self.seats.iter().map(|s| s.id.as_str()).collect()
    }
}
