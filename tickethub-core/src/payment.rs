use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::CoreResult;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    Processing,
    Succeeded,
    Failed,
}

/// What the checkout asks a provider to charge
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentRequest {
    pub checkout_id: Uuid,
    pub amount: u64,
    pub currency: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentReceipt {
    pub reference: String,
    pub checkout_id: Uuid,
    pub amount: u64,
    pub status: PaymentStatus,
    pub processed_at: DateTime<Utc>,
}

/// Seam for whatever takes the customer's money.
///
/// `charge` resolves once the provider has a final answer; the checkout stays
/// in its processing state for as long as this future is pending.
#[async_trait]
pub trait PaymentProvider: Send + Sync {
    async fn charge(&self, request: &PaymentRequest) -> CoreResult<PaymentReceipt>;
}
