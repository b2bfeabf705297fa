use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU8, Ordering};
use tickethub_catalog::Quote;
use tickethub_core::CoreError;
use tickethub_shared::{Event, Seat, Show};
use uuid::Uuid;

use crate::session::SessionError;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CheckoutState {
    AwaitingPayment,
    /// Payment in flight; confirm cannot be invoked again
    Processing,
    Done,
}

impl CheckoutState {
    fn from_u8(value: u8) -> Self {
        match value {
            0 => Self::AwaitingPayment,
            1 => Self::Processing,
            _ => Self::Done,
        }
    }

    fn as_u8(self) -> u8 {
        match self {
            Self::AwaitingPayment => 0,
            Self::Processing => 1,
            Self::Done => 2,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CheckoutError {
    #[error(transparent)]
    Session(#[from] SessionError),

    #[error("Checkout {0} is already being processed")]
    AlreadyProcessing(Uuid),

    #[error("Checkout {0} has already completed")]
    AlreadyCompleted(Uuid),

    #[error("Payment failed: {0}")]
    Payment(CoreError),

    #[error("Failed to record booking: {0}")]
    Storage(CoreError),
}

/// Frozen copy of what is being bought
#[derive(Debug, Clone, Serialize)]
pub struct CheckoutContext {
    pub event: Event,
    pub show: Show,
    pub seats: Vec<Seat>,
    pub quote: Quote,
}

/// A single purchase attempt: AwaitingPayment -> Processing -> Done
#[derive(Debug)]
pub struct Checkout {
    id: Uuid,
    context: CheckoutContext,
    state: AtomicU8,
}

impl Checkout {
    pub fn new(context: CheckoutContext) -> Self {
        Self {
            id: Uuid::new_v4(),
            context,
            state: AtomicU8::new(CheckoutState::AwaitingPayment.as_u8()),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn context(&self) -> &CheckoutContext {
        &self.context
    }

    pub fn state(&self) -> CheckoutState {
        CheckoutState::from_u8(self.state.load(Ordering::Acquire))
    }

    /// AwaitingPayment -> Processing. Fails for any other starting state.
    pub(crate) fn start_processing(&self) -> Result<(), CheckoutError> {
        self.state
            .compare_exchange(
                CheckoutState::AwaitingPayment.as_u8(),
                CheckoutState::Processing.as_u8(),
                Ordering::AcqRel,
                Ordering::Acquire,
            )
            .map(|_| ())
            .map_err(|current| match CheckoutState::from_u8(current) {
                CheckoutState::Done => CheckoutError::AlreadyCompleted(self.id),
                _ => CheckoutError::AlreadyProcessing(self.id),
            })
    }

    pub(crate) fn finish(&self) {
        self.state.store(CheckoutState::Done.as_u8(), Ordering::Release);
    }

    /// Processing -> AwaitingPayment after a failed attempt
    pub(crate) fn rewind(&self) {
        let _ = self.state.compare_exchange(
            CheckoutState::Processing.as_u8(),
            CheckoutState::AwaitingPayment.as_u8(),
            Ordering::AcqRel,
            Ordering::Acquire,
        );
    }
}
