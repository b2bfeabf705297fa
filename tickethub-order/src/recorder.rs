use std::sync::Arc;
use tickethub_core::{BookingRepository, CoreError, PaymentProvider, PaymentRequest, PaymentStatus};
use tickethub_shared::Booking;
use tokio::sync::Mutex;

use crate::checkout::{Checkout, CheckoutError};
use crate::fulfillment::TicketIssuer;
use crate::session::BookingSession;

/// Turns a checkout into a persisted, confirmed booking
pub struct BookingRecorder {
    repository: Arc<dyn BookingRepository>,
    payments: Arc<dyn PaymentProvider>,
    tickets: TicketIssuer,
    currency: String,
}

impl BookingRecorder {
    pub fn new(
        repository: Arc<dyn BookingRepository>,
        payments: Arc<dyn PaymentProvider>,
        currency: impl Into<String>,
    ) -> Self {
        Self {
            repository,
            payments,
            tickets: TicketIssuer::new(),
            currency: currency.into(),
        }
    }

    pub fn tickets(&self) -> &TicketIssuer {
        &self.tickets
    }

    /// Charge and record one checkout.
    ///
    /// While the payment is pending the checkout is `Processing` and a second
    /// call is refused. A failed payment or write puts it back to
    /// `AwaitingPayment` with nothing persisted.
    pub async fn confirm(&self, checkout: &Checkout) -> Result<Booking, CheckoutError> {
        checkout.start_processing()?;
        let context = checkout.context();

        let request = PaymentRequest {
            checkout_id: checkout.id(),
            amount: context.quote.total,
            currency: self.currency.clone(),
        };
        let receipt = match self.payments.charge(&request).await {
            Ok(receipt) if receipt.status == PaymentStatus::Succeeded => receipt,
            Ok(receipt) => {
                checkout.rewind();
                return Err(CheckoutError::Payment(CoreError::PaymentDeclined(receipt.reference)));
            }
            Err(e) => {
                checkout.rewind();
                tracing::warn!(checkout_id = %checkout.id(), error = %e, "Payment failed");
                return Err(CheckoutError::Payment(e));
            }
        };

        let booking = Booking::confirmed(
            self.tickets.booking_id(),
            context.event.id.clone(),
            context.show.id.clone(),
            context.seats.clone(),
            context.quote.total,
            self.tickets.ticket_code(),
        );

        if let Err(e) = self.repository.append(&booking).await {
            checkout.rewind();
            tracing::error!(checkout_id = %checkout.id(), error = %e, "Failed to persist booking");
            return Err(CheckoutError::Storage(e));
        }

        checkout.finish();
        tracing::info!(
            booking_id = %booking.id,
            show_id = %booking.show_id,
            seats = booking.seats.len(),
            total = booking.total,
            payment_ref = %receipt.reference,
            "Booking confirmed"
        );
        Ok(booking)
    }

    /// Whole checkout for a live session: freeze the selection, pay, record,
    /// then clear the selection. The session lock is not held while paying.
    pub async fn checkout_session(
        &self,
        session: &Mutex<BookingSession>,
        promo: Option<&str>,
    ) -> Result<Booking, CheckoutError> {
        let checkout = session.lock().await.begin_checkout(promo)?;

        match self.confirm(&checkout).await {
            Ok(booking) => {
                session.lock().await.complete_checkout();
                Ok(booking)
            }
            Err(e) => {
                session.lock().await.abandon_checkout();
                Err(e)
            }
        }
    }
}
