pub mod payment;
pub mod repository;

pub use payment::{PaymentProvider, PaymentReceipt, PaymentRequest, PaymentStatus};
pub use repository::BookingRepository;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Storage failure: {0}")]
    Storage(String),
    #[error("Corrupt record: {0}")]
    Corrupt(String),
    #[error("Payment declined: {0}")]
    PaymentDeclined(String),
    #[error("Payment provider unavailable: {0}")]
    PaymentUnavailable(String),
}

pub type CoreResult<T> = Result<T, CoreError>;
