use rand::Rng;
use serde::{Deserialize, Serialize};
use tickethub_shared::{Seat, SeatCategory, SeatStatus};

/// Shape of the generated auditorium
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeatLayout {
    /// Number of rows, lettered from `A`
    pub rows: u8,
    pub seats_per_row: u32,
    /// Chance that a seat is already sold when the map is drawn
    pub booked_probability: f64,
}

impl Default for SeatLayout {
    fn default() -> Self {
        Self {
            rows: 8,
            seats_per_row: 12,
            booked_probability: 0.15,
        }
    }
}

impl SeatLayout {
    pub fn capacity(&self) -> usize {
        self.rows as usize * self.seats_per_row as usize
    }
}

/// Category and unit price for a 0-based row index
pub fn tier_for_row(row_index: usize) -> (SeatCategory, u64) {
    if row_index <= 2 {
        (SeatCategory::Vip, 500)
    } else if row_index <= 4 {
        (SeatCategory::Premium, 350)
    } else {
        (SeatCategory::Regular, 250)
    }
}

/// Seat inventory for one show
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeatMap {
    pub show_id: String,
    seats: Vec<Seat>,
}

impl SeatMap {
    pub fn new(show_id: impl Into<String>, seats: Vec<Seat>) -> Self {
        Self {
            show_id: show_id.into(),
            seats,
        }
    }

    pub fn get(&self, seat_id: &str) -> Option<&Seat> {
        self.seats.iter().find(|s| s.id == seat_id)
    }

    /// Seats in row-major order
    pub fn seats(&self) -> &[Seat] {
        &self.seats
    }

    pub fn len(&self) -> usize {
        self.seats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seats.is_empty()
    }

    pub fn count(&self, status: SeatStatus) -> usize {
        self.seats.iter().filter(|s| s.status == status).count()
    }

    /// Seats grouped by row letter, rows in order
    pub fn rows(&self) -> Vec<(&str, Vec<&Seat>)> {
        let mut rows: Vec<(&str, Vec<&Seat>)> = Vec::new();
        for seat in &self.seats {
            match rows.last_mut() {
                Some((row, seats)) if *row == seat.row.as_str() => seats.push(seat),
                _ => rows.push((seat.row.as_str(), vec![seat])),
            }
        }
        rows
    }
}

/// Draws a fresh seat inventory for a show on every call
#[derive(Debug, Clone, Default)]
pub struct SeatMapGenerator {
    layout: SeatLayout,
}

impl SeatMapGenerator {
    pub fn new(mut layout: SeatLayout) -> Self {
        layout.booked_probability = if layout.booked_probability.is_nan() {
            0.0
        } else {
            layout.booked_probability.clamp(0.0, 1.0)
        };
        Self { layout }
    }

    pub fn layout(&self) -> &SeatLayout {
        &self.layout
    }

    pub fn generate(&self, show_id: &str) -> SeatMap {
        self.generate_with_rng(show_id, &mut rand::thread_rng())
    }

    pub fn generate_with_rng<R: Rng>(&self, show_id: &str, rng: &mut R) -> SeatMap {
        let mut seats = Vec::with_capacity(self.layout.capacity());

        for (row_index, row) in (b'A'..).take(self.layout.rows as usize).enumerate() {
            let (category, price) = tier_for_row(row_index);
            for number in 1..=self.layout.seats_per_row {
                let mut seat = Seat::new(row as char, number, category, price);
                if rng.gen_bool(self.layout.booked_probability) {
                    seat.status = SeatStatus::Booked;
                }
                seats.push(seat);
            }
        }

        let map = SeatMap::new(show_id, seats);
        tracing::debug!(
            show_id,
            seats = map.len(),
            booked = map.count(SeatStatus::Booked),
            "Generated seat map"
        );
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn test_layout_and_tiers() {
        let map = SeatMapGenerator::default().generate("s1");
        assert_eq!(map.len(), 96);
        assert_eq!(map.show_id, "s1");

        let ids: HashSet<&str> = map.seats().iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids.len(), 96);

        for (row_index, (row, seats)) in map.rows().into_iter().enumerate() {
            assert_eq!(row, ((b'A' + row_index as u8) as char).to_string());
            assert_eq!(seats.len(), 12);
            for seat in seats {
                let (category, price) = tier_for_row(row_index);
                assert_eq!(seat.category, category);
                assert_eq!(seat.price, price);
            }
        }

        assert_eq!(map.get("A1").unwrap().category, SeatCategory::Vip);
        assert_eq!(map.get("C12").unwrap().price, 500);
        assert_eq!(map.get("D1").unwrap().category, SeatCategory::Premium);
        assert_eq!(map.get("E5").unwrap().price, 350);
        assert_eq!(map.get("F1").unwrap().category, SeatCategory::Regular);
        assert_eq!(map.get("H12").unwrap().price, 250);
        assert!(map.get("I1").is_none());
        assert!(map.get("A13").is_none());
    }

    #[test]
    fn test_only_available_or_booked() {
        let mut rng = StdRng::seed_from_u64(7);
        let map = SeatMapGenerator::default().generate_with_rng("s2", &mut rng);
        assert_eq!(map.count(SeatStatus::Locked), 0);
        assert_eq!(map.count(SeatStatus::Selected), 0);
        assert_eq!(
            map.count(SeatStatus::Available) + map.count(SeatStatus::Booked),
            96
        );
    }

    #[test]
    fn test_booked_probability_extremes() {
        let all_free = SeatMapGenerator::new(SeatLayout {
            booked_probability: 0.0,
            ..SeatLayout::default()
        })
        .generate("s1");
        assert_eq!(all_free.count(SeatStatus::Available), 96);

        let sold_out = SeatMapGenerator::new(SeatLayout {
            booked_probability: 1.0,
            ..SeatLayout::default()
        })
        .generate("s1");
        assert_eq!(sold_out.count(SeatStatus::Booked), 96);
    }

    #[test]
    fn test_fresh_draw_each_call() {
        let generator = SeatMapGenerator::default();
        let mut rng = StdRng::seed_from_u64(42);
        let first = generator.generate_with_rng("s1", &mut rng);
        let second = generator.generate_with_rng("s1", &mut rng);

        let pattern =
            |m: &SeatMap| -> Vec<SeatStatus> { m.seats().iter().map(|s| s.status).collect() };
        assert_ne!(pattern(&first), pattern(&second));
    }
}
