//! Validation
//!
//! Customer contact checks performed before checkout submission. Validation
//! never mutates the selection and never blocks other edits; it only gates
//! the final submit transition, surfacing field-level messages.

use std::sync::LazyLock;

use regex::Regex;

use crate::order::CustomerDetails;

/// 10-digit Indian mobile number, starting 6-9.
#[expect(clippy::expect_used, reason = "literal pattern, compiles by construction")]
static INDIAN_MOBILE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[6-9]\d{9}$").expect("Invalid regex"));

/// RFC-shaped email: one `@`, a dot in the domain, no whitespace.
#[expect(clippy::expect_used, reason = "literal pattern, compiles by construction")]
static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^[^\s@]+@[^\s@]+\.[^\s@]{2,}$").expect("Invalid regex"));

/// Message for an empty required field.
pub const REQUIRED_MESSAGE: &str = "This field is required.";

/// Message for a malformed mobile number.
pub const MOBILE_MESSAGE: &str = "Enter a valid 10-digit Indian mobile number.";

/// Message for a malformed email address.
pub const EMAIL_MESSAGE: &str = "Enter a valid email address.";

/// Field-level validation messages; `None` means the field is fine.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerDetailsErrors {
    /// Full name message.
    pub full_name: Option<&'static str>,

    /// Address message.
    pub address: Option<&'static str>,

    /// Contact number message.
    pub contact_number: Option<&'static str>,

    /// Alternate number message.
    pub alternate_number: Option<&'static str>,

    /// Email message.
    pub email: Option<&'static str>,
}

impl CustomerDetailsErrors {
    /// Whether no field carries a message.
    pub fn is_empty(&self) -> bool {
        self.full_name.is_none()
            && self.address.is_none()
            && self.contact_number.is_none()
            && self.alternate_number.is_none()
            && self.email.is_none()
    }
}

/// Whether the value is a valid 10-digit Indian mobile number.
pub fn is_valid_indian_mobile(value: &str) -> bool {
    INDIAN_MOBILE_RE.is_match(value)
}

/// Whether the value is a plausibly shaped email address.
pub fn is_valid_email(value: &str) -> bool {
    EMAIL_RE.is_match(value)
}

/// Validate contact details for submission.
///
/// Full name, address, contact number and email are required; the alternate
/// number is optional but must be a valid mobile number when present.
///
/// # Errors
///
/// Returns the per-field messages when any check fails.
pub fn validate_customer_details(
    details: &CustomerDetails,
) -> Result<(), CustomerDetailsErrors> {
    let mut errors = CustomerDetailsErrors::default();

    if details.full_name.trim().is_empty() {
        errors.full_name = Some(REQUIRED_MESSAGE);
    }

    if details.address.trim().is_empty() {
        errors.address = Some(REQUIRED_MESSAGE);
    }

    if details.contact_number.trim().is_empty() {
        errors.contact_number = Some(REQUIRED_MESSAGE);
    } else if !is_valid_indian_mobile(&details.contact_number) {
        errors.contact_number = Some(MOBILE_MESSAGE);
    }

    if !details.alternate_number.trim().is_empty()
        && !is_valid_indian_mobile(&details.alternate_number)
    {
        errors.alternate_number = Some(MOBILE_MESSAGE);
    }

    if details.email.trim().is_empty() {
        errors.email = Some(REQUIRED_MESSAGE);
    } else if !is_valid_email(details.email.trim()) {
        errors.email = Some(EMAIL_MESSAGE);
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}
