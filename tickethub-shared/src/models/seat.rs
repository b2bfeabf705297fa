use serde::{Deserialize, Serialize};

/// Seating tier, decided by the row a seat sits in
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum SeatCategory {
    Regular,
    Premium,
    Vip,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum SeatStatus {
    Available,
    Selected,
    /// Modeled for cross-session reservations; nothing produces it today
    Locked,
    /// Permanent once assigned by a completed purchase
    Booked,
}

/// A single seat in a show's inventory
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Seat {
    /// Row letter followed by seat number, e.g. `C7`
    pub id: String,
    pub row: String,
    pub number: u32,
    #[serde(rename = "type")]
    pub category: SeatCategory,
    pub price: u64,
    pub status: SeatStatus,
}

impl Seat {
    pub fn new(row: char, number: u32, category: SeatCategory, price: u64) -> Self {
        Self {
            id: format!("{}{}", row, number),
            row: row.to_string(),
            number,
            category,
            price,
            status: SeatStatus::Available,
        }
    }

    /// Booked and locked seats can never enter a selection
    pub fn is_selectable(&self) -> bool {
        !matches!(self.status, SeatStatus::Booked | SeatStatus::Locked)
    }

    /// Copy of this seat tagged as part of a selection
    pub fn as_selected(&self) -> Self {
        Self {
            status: SeatStatus::Selected,
            ..self.clone()
        }
    }
}
