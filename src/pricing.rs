//! Pricing
//!
//! A pure derivation of the full price breakdown from the current order
//! selection and the catalog. Recomputed on every read; nothing here is
//! cached and nothing here mutates state. All amounts are whole rupees.

use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};

use crate::{
    catalog::{Catalog, Product},
    coupons::{CouponStatus, evaluate_coupon},
    order::OrderSelection,
};

/// Flat delivery charge, applied whenever something is actually ordered.
pub const DELIVERY_CHARGE: i64 = 70;

/// Gift wrap charge per billable item.
pub const GIFT_WRAP_CHARGE_PER_ITEM: i64 = 25;

/// Charge per non-whitespace letter of the personalized name.
pub const PERSONALIZED_NOTE_CHARGE_PER_LETTER: i64 = 10;

/// The complete price breakdown.
///
/// Every intermediate is public contract: the summary screen renders each
/// line item, and the checkout message repeats them verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PriceBreakdown {
    /// Display unit price: the selected product's base price, or the
    /// weighted average across cart lines when the cart is non-empty.
    pub unit_price: i64,

    /// Items total: sum of cart line totals, or base price x quantity when
    /// the cart is empty.
    pub quantity_total: i64,

    /// Gift wrap charge across all billable items.
    pub gift_wrap_charge: i64,

    /// Non-whitespace letters in the personalized name.
    pub personalized_name_letter_count: usize,

    /// Personalization charge (letters x per-letter rate).
    pub personalized_name_charge: i64,

    /// Items + gift wrap + personalization; the coupon's qualifying subtotal.
    pub subtotal_before_discount: i64,

    /// Coupon discount; zero unless a coupon applied.
    pub discount_amount: i64,

    /// Subtotal minus discount, floored at zero.
    pub total_before_delivery: i64,

    /// The applied coupon code, only when the evaluation succeeded.
    pub applied_coupon_code: Option<String>,

    /// Delivery charge; zero on an empty order.
    pub delivery_charge: i64,

    /// Total payable.
    pub grand_total: i64,
}

/// Derive the price breakdown for the current selection.
///
/// Cart lines whose product id no longer resolves in the catalog are silently
/// excluded from all totals. With no resolved cart line, pricing falls back
/// to the single selected product and the in-progress quantity; with neither,
/// every field is zero. An invalid coupon never blocks pricing, it only
/// denies the discount.
pub fn price_order(selection: &OrderSelection, catalog: &Catalog) -> PriceBreakdown {
    let lines: Vec<(&Product, u32)> = selection
        .cart_items
        .iter()
        .filter_map(|item| {
            catalog
                .find_product(&item.product_id)
                .map(|product| (product, item.quantity))
        })
        .collect();

    let selected = selection.selected_product(catalog);

    if lines.is_empty() && selected.is_none() {
        return PriceBreakdown::default();
    }

    let (quantity_total, billable_quantity, unit_price) = if lines.is_empty() {
        let unit_price = selected.map_or(0, |product| product.base_price);
        let quantity = i64::from(selection.quantity);

        (unit_price * quantity, quantity, unit_price)
    } else {
        let cart_amount_total: i64 = lines
            .iter()
            .map(|(product, quantity)| product.base_price * i64::from(*quantity))
            .sum();
        let cart_total_quantity: i64 =
            lines.iter().map(|(_, quantity)| i64::from(*quantity)).sum();

        (
            cart_amount_total,
            cart_total_quantity,
            rounded_div(cart_amount_total, cart_total_quantity),
        )
    };

    let gift_wrap_charge = if selection.gift_wrap {
        GIFT_WRAP_CHARGE_PER_ITEM * billable_quantity
    } else {
        0
    };

    let personalized_name_letter_count = selection
        .personalized_note
        .chars()
        .filter(|c| !c.is_whitespace())
        .count();
    let personalized_name_charge = PERSONALIZED_NOTE_CHARGE_PER_LETTER
        * i64::try_from(personalized_name_letter_count).unwrap_or(i64::MAX);

    let subtotal_before_discount = quantity_total + gift_wrap_charge + personalized_name_charge;

    let evaluation = evaluate_coupon(&selection.coupon_code, subtotal_before_discount);
    let (discount_amount, applied_coupon_code) = if evaluation.status == CouponStatus::Applied {
        (evaluation.discount_amount, evaluation.code)
    } else {
        (0, None)
    };

    let total_before_delivery = (subtotal_before_discount - discount_amount).max(0);

    let delivery_charge = if quantity_total > 0 { DELIVERY_CHARGE } else { 0 };

    PriceBreakdown {
        unit_price,
        quantity_total,
        gift_wrap_charge,
        personalized_name_letter_count,
        personalized_name_charge,
        subtotal_before_discount,
        discount_amount,
        total_before_delivery,
        applied_coupon_code,
        delivery_charge,
        grand_total: total_before_delivery + delivery_charge,
    }
}

/// Whole-rupee division, rounded half away from zero.
fn rounded_div(amount: i64, divisor: i64) -> i64 {
    if divisor == 0 {
        return 0;
    }

    (Decimal::from(amount) / Decimal::from(divisor))
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use crate::{
        catalog::{Design, ProductCategory},
        order::OrderEvent,
    };

    use super::*;

    fn two_product_catalog() -> Catalog {
        Catalog::new(
            vec![
                Product::new(
                    "product-x",
                    ProductCategory::Mugs,
                    "Product X",
                    "Test mug.",
                    300,
                    "/products/x.jpeg",
                ),
                Product::new(
                    "product-y",
                    ProductCategory::Tumblers,
                    "Product Y",
                    "Test tumbler.",
                    500,
                    "/products/y.jpeg",
                ),
            ],
            Vec::<Design>::new(),
        )
    }

    fn add(product_id: &str, quantity: u32) -> OrderEvent {
        OrderEvent::AddCartItem {
            product_id: product_id.to_owned(),
            selected_color: "white".to_owned(),
            quantity,
        }
    }

    #[test]
    fn empty_selection_prices_to_zero() {
        let catalog = Catalog::builtin();

        let breakdown = price_order(&OrderSelection::default(), &catalog);

        assert_eq!(breakdown, PriceBreakdown::default());
        assert_eq!(breakdown.applied_coupon_code, None);
        assert_eq!(
            breakdown.delivery_charge, 0,
            "no delivery fee on an empty order"
        );
    }

    #[test]
    fn single_selection_without_cart_uses_base_price() {
        let catalog = Catalog::builtin();

        let selection = OrderSelection::default()
            .apply(OrderEvent::SelectProduct("mug-1".to_owned()))
            .apply(OrderEvent::SetQuantity(3));

        let breakdown = price_order(&selection, &catalog);

        assert_eq!(breakdown.unit_price, 299);
        assert_eq!(breakdown.quantity_total, 897);
        assert_eq!(breakdown.delivery_charge, DELIVERY_CHARGE);
        assert_eq!(breakdown.grand_total, 967);
    }

    #[test]
    fn cart_lines_aggregate_and_average_unit_price() {
        // Product X (300 x 1) + Product Y (500 x 3): total 1800 over 4 units.
        let catalog = two_product_catalog();

        let selection = OrderSelection::default()
            .apply(add("product-x", 1))
            .apply(add("product-y", 3));

        let breakdown = price_order(&selection, &catalog);

        assert_eq!(breakdown.quantity_total, 1800);
        assert_eq!(breakdown.unit_price, 450);
    }

    #[test]
    fn dangling_cart_lines_are_excluded() {
        let catalog = two_product_catalog();

        let selection = OrderSelection::default()
            .apply(add("product-x", 2))
            .apply(add("retired-product", 5));

        let breakdown = price_order(&selection, &catalog);

        assert_eq!(breakdown.quantity_total, 600);
        assert_eq!(breakdown.unit_price, 300);
    }

    #[test]
    fn cart_of_only_dangling_lines_falls_back_to_selection() {
        let catalog = two_product_catalog();

        let selection = OrderSelection::default()
            .apply(OrderEvent::SelectProduct("product-x".to_owned()))
            .apply(OrderEvent::SetQuantity(2))
            .apply(add("retired-product", 5));

        let breakdown = price_order(&selection, &catalog);

        assert_eq!(breakdown.unit_price, 300);
        assert_eq!(breakdown.quantity_total, 600);
    }

    #[test]
    fn gift_wrap_uses_cart_units_when_cart_is_non_empty() {
        let catalog = two_product_catalog();

        let selection = OrderSelection::default()
            .apply(add("product-x", 1))
            .apply(add("product-y", 3))
            .apply(OrderEvent::SetQuantity(9))
            .apply(OrderEvent::SetGiftWrap(true));

        let breakdown = price_order(&selection, &catalog);

        // 4 cart units, not the in-progress quantity of 9.
        assert_eq!(breakdown.gift_wrap_charge, 100);
    }

    #[test]
    fn personalization_counts_non_whitespace_letters() {
        let catalog = Catalog::builtin();

        let selection = OrderSelection::default()
            .apply(OrderEvent::SelectProduct("mug-1".to_owned()))
            .apply(OrderEvent::SetPersonalizedNote("  Aanya  S ".to_owned()));

        let breakdown = price_order(&selection, &catalog);

        assert_eq!(breakdown.personalized_name_letter_count, 6);
        assert_eq!(breakdown.personalized_name_charge, 60);
    }

    #[test]
    fn invalid_coupon_does_not_block_pricing() {
        let catalog = Catalog::builtin();

        let selection = OrderSelection::default()
            .apply(OrderEvent::SelectProduct("tumbler-1".to_owned()))
            .apply(OrderEvent::SetQuantity(2))
            .apply(OrderEvent::SetCouponCode("NOTACODE".to_owned()));

        let breakdown = price_order(&selection, &catalog);

        assert_eq!(breakdown.discount_amount, 0);
        assert_eq!(breakdown.applied_coupon_code, None);
        assert_eq!(breakdown.grand_total, 998 + DELIVERY_CHARGE);
    }

    #[test]
    fn applied_coupon_discounts_the_subtotal() {
        let catalog = Catalog::builtin();

        let selection = OrderSelection::default()
            .apply(OrderEvent::SelectProduct("tumbler-1".to_owned()))
            .apply(OrderEvent::SetQuantity(3))
            .apply(OrderEvent::SetCouponCode("FIRST10".to_owned()));

        let breakdown = price_order(&selection, &catalog);

        // 1497 subtotal, 10% -> 150 (149.7 rounded half away from zero).
        assert_eq!(breakdown.subtotal_before_discount, 1497);
        assert_eq!(breakdown.discount_amount, 150);
        assert_eq!(breakdown.applied_coupon_code.as_deref(), Some("FIRST10"));
        assert_eq!(breakdown.total_before_delivery, 1347);
        assert_eq!(breakdown.grand_total, 1417);
    }

    #[test]
    fn rounded_div_rounds_half_away_from_zero() {
        assert_eq!(rounded_div(1800, 4), 450);
        assert_eq!(rounded_div(500, 3), 167);
        assert_eq!(rounded_div(7, 2), 4);
        assert_eq!(rounded_div(1, 0), 0);
    }
}
