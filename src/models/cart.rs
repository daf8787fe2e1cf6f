//! Cart line item model.
//!
//! Service purchases can be paid with points, with currency (AED), or with
//! a hybrid of both. Each line item carries exactly one amount field,
//! matching its payment method.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// How a line item is paid for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Paid entirely in points.
    Points,
    /// Paid entirely in AED.
    Aed,
    /// Paid partly in points and partly in AED.
    Hybrid,
}

impl PaymentMethod {
    /// The wire name of the payment method.
    pub fn as_str(self) -> &'static str {
        match self {
            PaymentMethod::Points => "points",
            PaymentMethod::Aed => "aed",
            PaymentMethod::Hybrid => "hybrid",
        }
    }
}

/// The split chosen for a hybrid line item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HybridPayment {
    /// Points the user chose to spend on this item.
    pub points_to_use: u64,
    /// AED still owed after the points are applied.
    pub aed_amount: Decimal,
    /// Points the item would cost if paid entirely in points, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_points_required: Option<u64>,
}

/// A single item in a checkout cart.
///
/// # Example
///
/// ```
/// use rewards_engine::models::{CartLineItem, LineSettlement};
///
/// let item: CartLineItem = serde_json::from_str(
///     r#"{"title": "Profile Boost", "paymentMethod": "points", "points": 100}"#,
/// ).unwrap();
/// assert_eq!(item.settlement().unwrap(), LineSettlement::Points(100));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineItem {
    /// Display title of the purchased service.
    pub title: String,
    /// How this item is paid for.
    pub payment_method: PaymentMethod,
    /// Points price, for points-only items.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub points: Option<u64>,
    /// AED price, for currency-only items.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aed_price: Option<Decimal>,
    /// Points/AED split, for hybrid items.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hybrid_payment: Option<HybridPayment>,
}

/// The amounts a validated line item contributes to checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineSettlement {
    /// Points-only amount.
    Points(u64),
    /// AED-only amount.
    Aed(Decimal),
    /// Points and AED components of a hybrid item.
    Hybrid {
        /// Points component.
        points: u64,
        /// AED component.
        aed: Decimal,
    },
}

impl CartLineItem {
    /// Creates a points-only line item.
    pub fn points(title: impl Into<String>, points: u64) -> Self {
        Self {
            title: title.into(),
            payment_method: PaymentMethod::Points,
            points: Some(points),
            aed_price: None,
            hybrid_payment: None,
        }
    }

    /// Creates an AED-only line item.
    pub fn aed(title: impl Into<String>, aed_price: Decimal) -> Self {
        Self {
            title: title.into(),
            payment_method: PaymentMethod::Aed,
            points: None,
            aed_price: Some(aed_price),
            hybrid_payment: None,
        }
    }

    /// Creates a hybrid line item.
    pub fn hybrid(title: impl Into<String>, hybrid_payment: HybridPayment) -> Self {
        Self {
            title: title.into(),
            payment_method: PaymentMethod::Hybrid,
            points: None,
            aed_price: None,
            hybrid_payment: Some(hybrid_payment),
        }
    }

    /// Checks that exactly the amount field matching the payment method is
    /// populated and returns the amounts it contributes.
    ///
    /// # Errors
    ///
    /// Returns `InvalidCartItem` when the matching field is missing, another
    /// amount field is also populated, an AED amount is negative, or a
    /// hybrid item spends more points than its `totalPointsRequired`.
    pub fn settlement(&self) -> EngineResult<LineSettlement> {
        let populated = [
            self.points.is_some(),
            self.aed_price.is_some(),
            self.hybrid_payment.is_some(),
        ]
        .iter()
        .filter(|p| **p)
        .count();

        if populated > 1 {
            return Err(self.invalid("more than one of points, aedPrice and hybridPayment is set"));
        }

        match self.payment_method {
            PaymentMethod::Points => self
                .points
                .map(LineSettlement::Points)
                .ok_or_else(|| self.missing_amount("a points amount")),
            PaymentMethod::Aed => {
                let price = self
                    .aed_price
                    .ok_or_else(|| self.missing_amount("an aedPrice"))?;
                if price < Decimal::ZERO {
                    return Err(self.invalid("aedPrice cannot be negative"));
                }
                Ok(LineSettlement::Aed(price))
            }
            PaymentMethod::Hybrid => {
                let hybrid = self
                    .hybrid_payment
                    .ok_or_else(|| self.missing_amount("a hybridPayment"))?;
                if hybrid.aed_amount < Decimal::ZERO {
                    return Err(self.invalid("hybrid aedAmount cannot be negative"));
                }
                if let Some(required) = hybrid.total_points_required {
                    if hybrid.points_to_use > required {
                        return Err(self.invalid(&format!(
                            "hybrid pointsToUse {} exceeds totalPointsRequired {}",
                            hybrid.points_to_use, required
                        )));
                    }
                }
                Ok(LineSettlement::Hybrid {
                    points: hybrid.points_to_use,
                    aed: hybrid.aed_amount,
                })
            }
        }
    }

    fn missing_amount(&self, field: &str) -> EngineError {
        self.invalid(&format!(
            "payment method '{}' requires {}",
            self.payment_method.as_str(),
            field
        ))
    }

    fn invalid(&self, message: &str) -> EngineError {
        EngineError::InvalidCartItem {
            title: self.title.clone(),
            message: message.to_string(),
        }
    }
}
