use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Success,
    Info,
    Error,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum NoticeKind {
    SeatSelected,
    SeatDeselected,
    CapacityExceeded,
    PromoApplied,
    PromoRejected,
    HoldExpired,
    BookingConfirmed,
}

/// Transient user-facing message emitted by a booking session
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub level: NoticeLevel,
    pub message: String,
    pub timestamp: i64,
}

impl Notice {
    fn new(kind: NoticeKind, level: NoticeLevel, message: String) -> Self {
        Self {
            kind,
            level,
            message,
            timestamp: chrono::Utc::now().timestamp(),
        }
    }

    pub fn seat_selected(seat_id: &str) -> Self {
        Self::new(NoticeKind::SeatSelected, NoticeLevel::Success, format!("Seat {} selected", seat_id))
    }

    pub fn seat_deselected(seat_id: &str) -> Self {
        Self::new(NoticeKind::SeatDeselected, NoticeLevel::Info, format!("Seat {} deselected", seat_id))
    }

    pub fn capacity_exceeded(max: usize) -> Self {
        Self::new(
            NoticeKind::CapacityExceeded,
            NoticeLevel::Error,
            format!("Maximum {} seats can be selected", max),
        )
    }

    pub fn promo_applied(code: &str, percent: u64) -> Self {
        Self::new(
            NoticeKind::PromoApplied,
            NoticeLevel::Success,
            format!("Promo code {} applied! {}% discount", code, percent),
        )
    }

    pub fn promo_rejected() -> Self {
        Self::new(NoticeKind::PromoRejected, NoticeLevel::Error, "Invalid promo code".to_string())
    }

    pub fn hold_expired() -> Self {
        Self::new(
            NoticeKind::HoldExpired,
            NoticeLevel::Error,
            "Time expired! Please select seats again.".to_string(),
        )
    }

    pub fn booking_confirmed() -> Self {
        Self::new(NoticeKind::BookingConfirmed, NoticeLevel::Success, "Payment successful!".to_string())
    }
}
