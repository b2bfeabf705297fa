use async_trait::async_trait;
use std::time::Duration;
use tickethub_core::{CoreResult, PaymentProvider, PaymentReceipt, PaymentRequest, PaymentStatus};

pub const DEFAULT_PAYMENT_DELAY: Duration = Duration::from_secs(2);

/// Stand-in for a real gateway: waits a fixed delay, then always succeeds
#[derive(Debug, Clone)]
pub struct SimulatedPayment {
    delay: Duration,
}

impl Default for SimulatedPayment {
    fn default() -> Self {
        Self::new(DEFAULT_PAYMENT_DELAY)
    }
}

impl SimulatedPayment {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl PaymentProvider for SimulatedPayment {
    async fn charge(&self, request: &PaymentRequest) -> CoreResult<PaymentReceipt> {
        tracing::debug!(checkout_id = %request.checkout_id, amount = request.amount, "Simulating payment");
        tokio::time::sleep(self.delay).await;

        Ok(PaymentReceipt {
            reference: format!("sim_{}", request.checkout_id.simple()),
            checkout_id: request.checkout_id,
            amount: request.amount,
            status: PaymentStatus::Succeeded,
            processed_at: chrono::Utc::now(),
        })
    }
}
