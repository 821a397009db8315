//! Formatting
//!
//! Rupee display helpers for screens and messages.

use rusty_money::{Money, iso};

/// Format a whole-rupee amount for display, e.g. `₹1,058`.
///
/// Amounts here are always whole rupees, so the fractional part is dropped.
pub fn format_rupee(amount: i64) -> String {
    let formatted = Money::from_major(amount, iso::INR).to_string();

    match formatted.strip_suffix(".00") {
        Some(trimmed) => trimmed.to_owned(),
        None => formatted,
    }
}
