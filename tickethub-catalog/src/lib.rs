pub mod listing;
pub mod pricing;
pub mod seat_map;

pub use listing::{CatalogError, EventCatalog};
pub use pricing::{PricingCalculator, PricingConfig, PricingError, PromoOutcome, Quote};
pub use seat_map::{SeatLayout, SeatMap, SeatMapGenerator};
