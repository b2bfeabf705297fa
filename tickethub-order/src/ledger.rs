use tickethub_shared::Seat;

pub const DEFAULT_MAX_SEATS: usize = 10;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SelectionError {
    #[error("Maximum {max} seats can be selected")]
    CapacityExceeded { max: usize },

    #[error("Seat {0} is not available")]
    UnavailableSeat(String),
}

/// What a successful `select` did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectOutcome {
    Added,
    AlreadySelected,
}

/// Seats one browsing session intends to buy, in the order they were picked.
///
/// Holds copies tagged `selected`; the seat map the copies came from is never
/// touched.
#[derive(Debug, Clone)]
pub struct SelectionLedger {
    seats: Vec<Seat>,
    max_seats: usize,
}

impl Default for SelectionLedger {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_SEATS)
    }
}

impl SelectionLedger {
    pub fn new(max_seats: usize) -> Self {
        Self {
            seats: Vec::with_capacity(max_seats),
            max_seats,
        }
    }

    pub fn select(&mut self, seat: &Seat) -> Result<SelectOutcome, SelectionError> {
        if self.is_selected(&seat.id) {
            return Ok(SelectOutcome::AlreadySelected);
        }
        if self.seats.len() >= self.max_seats {
            return Err(SelectionError::CapacityExceeded { max: self.max_seats });
        }
        if !seat.is_selectable() {
            return Err(SelectionError::UnavailableSeat(seat.id.clone()));
        }

        self.seats.push(seat.as_selected());
        Ok(SelectOutcome::Added)
    }

    /// Remove a seat; returns whether it was there
    pub fn deselect(&mut self, seat_id: &str) -> bool {
        let before = self.seats.len();
        self.seats.retain(|s| s.id != seat_id);
        self.seats.len() != before
    }

    pub fn clear(&mut self) {
        self.seats.clear();
    }

    pub fn seats(&self) -> &[Seat] {
        &self.seats
    }

    pub fn len(&self) -> usize {
        self.seats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seats.is_empty()
    }

    pub fn max_seats(&self) -> usize {
        self.max_seats
    }

    pub fn is_selected(&self, seat_id: &str) -> bool {
        self.seats.iter().any(|s| s.id == seat_id)
    }
}
