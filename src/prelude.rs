//! Keepsake prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    catalog::{Catalog, Design, Product, ProductCategory, TumblerSubCategory},
    checkout::{
        BUSINESS_UPI_ID, BUSINESS_WHATSAPP_NUMBER, OrderMessage, build_order_message,
        build_whatsapp_url,
    },
    coupons::{
        AppliesOn, CouponEvaluation, CouponRule, CouponStatus, DiscountKind, evaluate_coupon,
        normalize_coupon_code,
    },
    format::format_rupee,
    order::{
        CartItem, CustomerDetails, OrderEvent, OrderSelection, PlacementPreference, StickerChoice,
    },
    pricing::{
        DELIVERY_CHARGE, GIFT_WRAP_CHARGE_PER_ITEM, PERSONALIZED_NOTE_CHARGE_PER_LETTER,
        PriceBreakdown, price_order,
    },
    store::{
        FileStore, MemoryStore, ORDER_STORAGE_KEY, OrderStore, SnapshotStore, StoreError,
    },
    validation::{
        CustomerDetailsErrors, is_valid_email, is_valid_indian_mobile, validate_customer_details,
    },
};
