//! Coupons
//!
//! A static rule table and a pure evaluator. Evaluation knows nothing about
//! cart contents; it only sees the qualifying subtotal (items + gift wrap +
//! personalization, before delivery). A rejected coupon is a normal outcome
//! carrying a human-readable reason, never an error.

use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};

/// How a rule discounts the qualifying subtotal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscountKind {
    /// Percentage of the qualifying subtotal, as a whole number (10 = 10%).
    Percentage(u32),

    /// Flat amount in whole rupees.
    Flat(i64),
}

/// The base a rule's minimum and discount are evaluated against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppliesOn {
    /// Items + gift wrap + personalization, before any delivery charge.
    SubtotalExcludingDelivery,
}

/// A named discount rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CouponRule {
    /// Normalized (uppercase) code shoppers submit.
    pub code: &'static str,

    /// Discount applied when the rule matches.
    pub discount: DiscountKind,

    /// Minimum qualifying subtotal, in whole rupees.
    pub min_order_amount: i64,

    /// Base the rule evaluates against.
    pub applies_on: AppliesOn,

    /// Inactive rules are skipped during lookup.
    pub is_active: bool,
}

/// The shipped rule table.
const COUPON_RULES: &[CouponRule] = &[CouponRule {
    code: "FIRST10",
    discount: DiscountKind::Percentage(10),
    min_order_amount: 1000,
    applies_on: AppliesOn::SubtotalExcludingDelivery,
    is_active: true,
}];

/// Outcome status of a coupon evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CouponStatus {
    /// No code was submitted.
    None,

    /// The code matched a rule and the discount applies.
    Applied,

    /// Unknown code, inactive rule, or subtotal below the rule's minimum.
    Invalid,
}

/// Result of evaluating a submitted code against a qualifying subtotal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CouponEvaluation {
    /// Outcome status.
    pub status: CouponStatus,

    /// The normalized code, when one was submitted.
    pub code: Option<String>,

    /// Discount in whole rupees; zero unless `status` is `Applied`.
    pub discount_amount: i64,

    /// Human-readable outcome message; empty when no code was submitted.
    pub message: String,
}

impl CouponEvaluation {
    fn none() -> Self {
        CouponEvaluation {
            status: CouponStatus::None,
            code: None,
            discount_amount: 0,
            message: String::new(),
        }
    }
}

/// Trim surrounding whitespace and uppercase a submitted code.
pub fn normalize_coupon_code(raw: &str) -> String {
    raw.trim().to_uppercase()
}

/// Evaluate a submitted code against the qualifying subtotal.
///
/// Pure and idempotent: identical inputs always yield identical output, and
/// validity is recomputed from scratch on every call. The discount is capped
/// at the qualifying subtotal so it can never invert the total.
pub fn evaluate_coupon(raw_code: &str, qualifying_subtotal: i64) -> CouponEvaluation {
    let normalized = normalize_coupon_code(raw_code);
    if normalized.is_empty() {
        return CouponEvaluation::none();
    }

    let Some(rule) = COUPON_RULES
        .iter()
        .find(|rule| rule.is_active && rule.code == normalized)
    else {
        return CouponEvaluation {
            status: CouponStatus::Invalid,
            code: Some(normalized),
            discount_amount: 0,
            message: "Invalid coupon code.".to_owned(),
        };
    };

    if qualifying_subtotal < rule.min_order_amount {
        return CouponEvaluation {
            status: CouponStatus::Invalid,
            code: Some(normalized),
            discount_amount: 0,
            message: format!(
                "Minimum order of INR {} is required for {}.",
                rule.min_order_amount, rule.code
            ),
        };
    }

    let AppliesOn::SubtotalExcludingDelivery = rule.applies_on;
    let discount_base = qualifying_subtotal;

    let computed = match rule.discount {
        DiscountKind::Percentage(percent) => percentage_of(discount_base, percent),
        DiscountKind::Flat(amount) => amount,
    };

    CouponEvaluation {
        status: CouponStatus::Applied,
        code: Some(normalized),
        discount_amount: computed.min(discount_base),
        message: format!("{} applied successfully.", rule.code),
    }
}

/// Whole-rupee percentage of an amount, rounded half away from zero.
fn percentage_of(amount: i64, percent: u32) -> i64 {
    let applied = Decimal::from(amount) * Decimal::from(percent) / Decimal::from(100_u32);

    applied
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        // Unrepresentable only for astronomical amounts; the cap below the
        // qualifying subtotal makes the amount itself a safe stand-in.
        .unwrap_or(amount)
}
