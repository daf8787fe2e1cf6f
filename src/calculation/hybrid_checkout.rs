//! Hybrid checkout totals and affordability validation.
//!
//! A cart can mix points-only, AED-only and hybrid line items. Points and
//! AED are totalled separately; a points discount only ever reduces the
//! points side. The calculator performs no settlement: any AED amount is
//! routed by the caller through the currency payment step.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, CartLineItem, LineSettlement, Snapshot};

/// Aggregate amounts for a cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutTotals {
    /// Points owed before the discount.
    pub points_required: u64,
    /// AED owed across AED-only and hybrid items.
    pub aed_required: Decimal,
    /// Points discount applied.
    pub points_discount: u64,
    /// Points owed after the discount, never below zero.
    pub final_points_total: u64,
    /// AED owed; points never discount currency.
    pub final_aed_total: Decimal,
}

impl CheckoutTotals {
    /// Returns true if the caller must route a currency payment.
    pub fn requires_currency_settlement(&self) -> bool {
        self.final_aed_total > Decimal::ZERO
    }
}

/// The result of computing cart totals, including the audit step.
#[derive(Debug, Clone)]
pub struct CheckoutComputation {
    /// The computed totals.
    pub totals: CheckoutTotals,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Why checkout was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckoutRejection {
    /// The points owed exceed the available balance.
    InsufficientPoints,
}

/// Whether a checkout may proceed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutValidation {
    /// True if the cart is affordable.
    pub ok: bool,
    /// Present when `ok` is false.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<CheckoutRejection>,
}

/// Computes points and AED totals for a cart.
///
/// # Arguments
///
/// * `cart_items` - The line items being purchased
/// * `points_discount` - Points the user asked to apply as a discount
/// * `available_points` - The user's available balance
/// * `step_number` - The step number for audit trail sequencing
///
/// # Errors
///
/// Returns `DiscountExceedsBalance` when the discount is larger than the
/// available balance, `InvalidCartItem` when a line item's amounts do
/// not match its payment method, and `AmountOverflow` when the AED total
/// leaves the decimal range.
///
/// # Examples
///
/// ```
/// use rewards_engine::calculation::compute_checkout_totals;
/// use rewards_engine::models::{CartLineItem, HybridPayment};
/// use rust_decimal::Decimal;
///
/// let cart = vec![
///     CartLineItem::points("Profile Boost", 100),
///     CartLineItem::hybrid("RM Service", HybridPayment {
///         points_to_use: 50,
///         aed_amount: Decimal::new(200, 0),
///         total_points_required: Some(250),
///     }),
/// ];
///
/// let result = compute_checkout_totals(&cart, 30, 200, 1).unwrap();
/// assert_eq!(result.totals.points_required, 150);
/// assert_eq!(result.totals.aed_required, Decimal::new(200, 0));
/// assert_eq!(result.totals.final_points_total, 120);
/// ```
pub fn compute_checkout_totals(
    cart_items: &[CartLineItem],
    points_discount: u64,
    available_points: u64,
    step_number: u32,
) -> EngineResult<CheckoutComputation> {
    if points_discount > available_points {
        return Err(EngineError::DiscountExceedsBalance {
            requested: points_discount,
            available: available_points,
        });
    }

    let mut points_only: u64 = 0;
    let mut aed_only = Decimal::ZERO;
    let mut hybrid_points: u64 = 0;
    let mut hybrid_aed = Decimal::ZERO;

    let mut aed_required = Decimal::ZERO;

    for item in cart_items {
        let overflow = || EngineError::AmountOverflow {
            title: item.title.clone(),
        };
        match item.settlement()? {
            LineSettlement::Points(points) => points_only = points_only.saturating_add(points),
            LineSettlement::Aed(aed) => {
                aed_only = aed_only.checked_add(aed).ok_or_else(overflow)?;
                aed_required = aed_required.checked_add(aed).ok_or_else(overflow)?;
            }
            LineSettlement::Hybrid { points, aed } => {
                hybrid_points = hybrid_points.saturating_add(points);
                hybrid_aed = hybrid_aed.checked_add(aed).ok_or_else(overflow)?;
                aed_required = aed_required.checked_add(aed).ok_or_else(overflow)?;
            }
        }
    }

    let points_required = points_only.saturating_add(hybrid_points);
    let final_points_total = points_required.saturating_sub(points_discount);

    let totals = CheckoutTotals {
        points_required,
        aed_required,
        points_discount,
        final_points_total,
        final_aed_total: aed_required,
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "checkout_totals".to_string(),
        rule_name: "Hybrid Checkout Totals".to_string(),
        input: serde_json::json!({
            "line_items": cart_items.len(),
            "points_discount": points_discount,
            "available_points": available_points
        }),
        output: serde_json::json!({
            "points_required": points_required,
            "aed_required": aed_required.normalize().to_string(),
            "final_points_total": final_points_total,
            "final_aed_total": aed_required.normalize().to_string()
        }),
        reasoning: format!(
            "points {} + hybrid points {} = {} - discount {} = {} points; AED {} + hybrid AED {} = AED {}",
            points_only,
            hybrid_points,
            points_required,
            points_discount,
            final_points_total,
            aed_only.normalize(),
            hybrid_aed.normalize(),
            aed_required.normalize()
        ),
    };

    Ok(CheckoutComputation { totals, audit_step })
}

/// Decides whether checkout may proceed against a balance.
///
/// Only a freshly fetched balance may authorize a purchase.
///
/// # Errors
///
/// Returns `StaleBalance` when the balance snapshot is a cached fallback.
///
/// # Examples
///
/// ```
/// use rewards_engine::calculation::{compute_checkout_totals, validate_checkout, CheckoutRejection};
/// use rewards_engine::models::{CartLineItem, Snapshot};
///
/// let cart = vec![CartLineItem::points("Profile Boost", 300)];
/// let totals = compute_checkout_totals(&cart, 0, 200, 1).unwrap().totals;
///
/// let validation = validate_checkout(&totals, &Snapshot::fresh(200)).unwrap();
/// assert!(!validation.ok);
/// assert_eq!(validation.reason, Some(CheckoutRejection::InsufficientPoints));
///
/// let validation = validate_checkout(&totals, &Snapshot::fresh(300)).unwrap();
/// assert!(validation.ok);
/// ```
pub fn validate_checkout(
    totals: &CheckoutTotals,
    available_points: &Snapshot<u64>,
) -> EngineResult<CheckoutValidation> {
    let available = *available_points.require_fresh()?;

    Ok(if totals.final_points_total <= available {
        CheckoutValidation {
            ok: true,
            reason: None,
        }
    } else {
        CheckoutValidation {
            ok: false,
            reason: Some(CheckoutRejection::InsufficientPoints),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{HybridPayment, PaymentMethod};
    use chrono::Utc;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn hybrid_item(points_to_use: u64, aed: &str) -> CartLineItem {
        CartLineItem::hybrid(
            "RM Service",
            HybridPayment {
                points_to_use,
                aed_amount: dec(aed),
                total_points_required: Some(points_to_use + 200),
            },
        )
    }

    #[test]
    fn test_mixed_cart_totals() {
        let cart = vec![
            CartLineItem::points("Profile Boost", 100),
            hybrid_item(50, "200"),
        ];

        let totals = compute_checkout_totals(&cart, 30, 200, 1).unwrap().totals;
        assert_eq!(totals.points_required, 150);
        assert_eq!(totals.aed_required, dec("200"));
        assert_eq!(totals.points_discount, 30);
        assert_eq!(totals.final_points_total, 120);
        assert_eq!(totals.final_aed_total, dec("200"));
        assert!(totals.requires_currency_settlement());
    }

    #[test]
    fn test_aed_items_are_never_discounted() {
        let cart = vec![
            CartLineItem::aed("CV Writing", dec("149.50")),
            CartLineItem::aed("Interview Prep", dec("99.25")),
        ];

        let totals = compute_checkout_totals(&cart, 50, 100, 1).unwrap().totals;
        assert_eq!(totals.points_required, 0);
        assert_eq!(totals.final_points_total, 0);
        assert_eq!(totals.aed_required, dec("248.75"));
        assert_eq!(totals.final_aed_total, dec("248.75"));
    }

    #[test]
    fn test_points_only_cart_needs_no_currency_settlement() {
        let cart = vec![CartLineItem::points("Profile Boost", 80)];
        let totals = compute_checkout_totals(&cart, 0, 100, 1).unwrap().totals;
        assert!(!totals.requires_currency_settlement());
    }

    #[test]
    fn test_discount_larger_than_points_required_floors_at_zero() {
        let cart = vec![CartLineItem::points("Profile Boost", 20)];
        let totals = compute_checkout_totals(&cart, 50, 100, 1).unwrap().totals;
        assert_eq!(totals.final_points_total, 0);
    }

    #[test]
    fn test_discount_equal_to_balance_is_accepted() {
        let cart = vec![CartLineItem::points("Profile Boost", 300)];
        let totals = compute_checkout_totals(&cart, 100, 100, 1).unwrap().totals;
        assert_eq!(totals.points_discount, 100);
    }

    #[test]
    fn test_discount_exceeding_balance_is_rejected() {
        let cart = vec![CartLineItem::points("Profile Boost", 300)];

        match compute_checkout_totals(&cart, 150, 100, 1) {
            Err(EngineError::DiscountExceedsBalance {
                requested,
                available,
            }) => {
                assert_eq!(requested, 150);
                assert_eq!(available, 100);
            }
            other => panic!("Expected DiscountExceedsBalance, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_line_item_is_rejected() {
        let mut broken = CartLineItem::points("Broken", 10);
        broken.payment_method = PaymentMethod::Hybrid;
        let cart = vec![CartLineItem::points("Profile Boost", 10), broken];

        match compute_checkout_totals(&cart, 0, 100, 1) {
            Err(EngineError::InvalidCartItem { title, .. }) => assert_eq!(title, "Broken"),
            other => panic!("Expected InvalidCartItem, got {:?}", other),
        }
    }

    #[test]
    fn test_aed_total_overflow_is_an_error() {
        let cart = vec![
            CartLineItem::aed("Enterprise Plan", Decimal::MAX),
            CartLineItem::aed("Add-on", Decimal::ONE),
        ];

        match compute_checkout_totals(&cart, 0, 0, 1) {
            Err(EngineError::AmountOverflow { title }) => assert_eq!(title, "Add-on"),
            other => panic!("Expected AmountOverflow, got {:?}", other),
        }
    }

    #[test]
    fn test_aed_overflow_across_aed_and_hybrid_items() {
        let cart = vec![
            CartLineItem::aed("Enterprise Plan", Decimal::MAX),
            CartLineItem::hybrid(
                "RM Service",
                HybridPayment {
                    points_to_use: 10,
                    aed_amount: Decimal::ONE,
                    total_points_required: None,
                },
            ),
        ];

        match compute_checkout_totals(&cart, 0, 0, 1) {
            Err(EngineError::AmountOverflow { title }) => assert_eq!(title, "RM Service"),
            other => panic!("Expected AmountOverflow, got {:?}", other),
        }
    }

    #[test]
    fn test_largest_aed_amount_alone_is_accepted() {
        let cart = vec![CartLineItem::aed("Enterprise Plan", Decimal::MAX)];
        let totals = compute_checkout_totals(&cart, 0, 0, 1).unwrap().totals;
        assert_eq!(totals.aed_required, Decimal::MAX);
    }

    #[test]
    fn test_empty_cart_is_zero() {
        let totals = compute_checkout_totals(&[], 0, 0, 1).unwrap().totals;
        assert_eq!(totals.points_required, 0);
        assert_eq!(totals.aed_required, Decimal::ZERO);
        assert!(validate_checkout(&totals, &Snapshot::fresh(0)).unwrap().ok);
    }

    #[test]
    fn test_validate_boundary() {
        let cart = vec![CartLineItem::points("Profile Boost", 120)];
        let totals = compute_checkout_totals(&cart, 0, 0, 1).unwrap().totals;

        assert!(validate_checkout(&totals, &Snapshot::fresh(120)).unwrap().ok);

        let refused = validate_checkout(&totals, &Snapshot::fresh(119)).unwrap();
        assert!(!refused.ok);
        assert_eq!(refused.reason, Some(CheckoutRejection::InsufficientPoints));
    }

    #[test]
    fn test_validate_refuses_cached_balance() {
        let cart = vec![CartLineItem::points("Profile Boost", 10)];
        let totals = compute_checkout_totals(&cart, 0, 1000, 1).unwrap().totals;

        let cached = Snapshot::cached(1000u64, Utc::now());
        assert!(matches!(
            validate_checkout(&totals, &cached),
            Err(EngineError::StaleBalance { .. })
        ));
    }

    #[test]
    fn test_validation_serialization() {
        let refused = CheckoutValidation {
            ok: false,
            reason: Some(CheckoutRejection::InsufficientPoints),
        };
        let json = serde_json::to_string(&refused).unwrap();
        assert_eq!(json, r#"{"ok":false,"reason":"insufficient_points"}"#);

        let accepted = CheckoutValidation {
            ok: true,
            reason: None,
        };
        assert_eq!(serde_json::to_string(&accepted).unwrap(), r#"{"ok":true}"#);
    }

    #[test]
    fn test_audit_step_records_totals() {
        let cart = vec![
            CartLineItem::points("Profile Boost", 100),
            hybrid_item(50, "200.00"),
        ];
        let result = compute_checkout_totals(&cart, 30, 200, 5).unwrap();
        assert_eq!(result.audit_step.step_number, 5);
        assert_eq!(result.audit_step.output["points_required"], 150);
        assert_eq!(result.audit_step.output["aed_required"], "200");
        assert!(result.audit_step.reasoning.contains("= 120 points"));
    }
}
