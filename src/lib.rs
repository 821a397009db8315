//! Keepsake
//!
//! Keepsake is the order engine behind a guided storefront for customized
//! physical gifts: catalog lookups, a consistent order-selection state
//! machine, deterministic pricing with coupons, tolerant persistence, and
//! the checkout message handoff.

pub mod catalog;
pub mod checkout;
pub mod coupons;
pub mod format;
pub mod order;
pub mod prelude;
pub mod pricing;
pub mod store;
pub mod validation;
