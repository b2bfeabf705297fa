pub mod models;
pub mod pii;

pub use models::booking::{Booking, BookingStatus};
pub use models::events::{Notice, NoticeKind, NoticeLevel};
pub use models::seat::{Seat, SeatCategory, SeatStatus};
pub use models::show::{Event, EventCategory, Show};
