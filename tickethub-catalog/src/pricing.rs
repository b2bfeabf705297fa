use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tickethub_shared::Seat;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricingConfig {
    /// Convenience fee as a percentage of the subtotal
    pub convenience_fee_percent: u64,

    /// Promo code (upper case) to discount percentage
    pub promo_codes: HashMap<String, u64>,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            convenience_fee_percent: 5,
            promo_codes: {
                let mut m = HashMap::new();
                m.insert("FIRST".to_string(), 10);
                m
            },
        }
    }
}

/// What happened to the promo code a quote was asked for
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PromoOutcome {
    None,
    Applied { code: String, percent: u64 },
    Rejected { code: String },
}

/// Price breakdown for a selection. Always `total = subtotal + fee - discount`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Quote {
    pub seat_count: usize,
    pub subtotal: u64,
    pub convenience_fee: u64,
    pub discount: u64,
    pub total: u64,
    pub promo: PromoOutcome,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum PricingError {
    #[error("Invalid promo code: {0}")]
    InvalidPromoCode(String),
}

/// Integer percentage of an amount, rounded half up
fn percent_of(amount: u64, percent: u64) -> u64 {
    (amount * percent + 50) / 100
}

pub struct PricingCalculator {
    config: PricingConfig,
}

impl Default for PricingCalculator {
    fn default() -> Self {
        Self::new(PricingConfig::default())
    }
}

impl PricingCalculator {
    pub fn new(config: PricingConfig) -> Self {
        let promo_codes = config
            .promo_codes
            .into_iter()
            .map(|(code, percent)| (code.trim().to_uppercase(), percent))
            .collect();
        Self {
            config: PricingConfig {
                promo_codes,
                ..config
            },
        }
    }

    /// Resolve a promo code to its discount percentage.
    ///
    /// Blank input is not an error and yields `None`.
    pub fn validate_promo(&self, code: &str) -> Result<Option<(String, u64)>, PricingError> {
        let normalized = code.trim().to_uppercase();
        if normalized.is_empty() {
            return Ok(None);
        }
        match self.config.promo_codes.get(&normalized) {
            Some(percent) => Ok(Some((normalized, *percent))),
            None => Err(PricingError::InvalidPromoCode(normalized)),
        }
    }

    pub fn quote(&self, seats: &[Seat], promo: Option<&str>) -> Quote {
        let subtotal: u64 = seats.iter().map(|s| s.price).sum();
        let convenience_fee = percent_of(subtotal, self.config.convenience_fee_percent);

        let (discount, promo) = match promo.map(|code| self.validate_promo(code)) {
            None | Some(Ok(None)) => (0, PromoOutcome::None),
            Some(Ok(Some((code, percent)))) => {
                (percent_of(subtotal, percent), PromoOutcome::Applied { code, percent })
            }
            Some(Err(PricingError::InvalidPromoCode(code))) => (0, PromoOutcome::Rejected { code }),
        };

        Quote {
            seat_count: seats.len(),
            subtotal,
            convenience_fee,
            discount,
            total: (subtotal + convenience_fee).saturating_sub(discount),
            promo,
        }
    }
}
