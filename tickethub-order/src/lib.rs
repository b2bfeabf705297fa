pub mod checkout;
pub mod fulfillment;
pub mod hold;
pub mod ledger;
pub mod payment;
pub mod recorder;
pub mod session;

pub use checkout::{Checkout, CheckoutContext, CheckoutError, CheckoutState};
pub use fulfillment::TicketIssuer;
pub use hold::{HoldState, HoldTicker, HoldTimer, TickOutcome};
pub use ledger::{SelectOutcome, SelectionError, SelectionLedger};
pub use payment::SimulatedPayment;
pub use recorder::BookingRecorder;
pub use session::{BookingSession, SessionDeps, SessionError, SessionSnapshot};
