//! Checkout
//!
//! The message-formatting collaborator: turns the final order selection,
//! resolved catalog entries and price breakdown into a human-readable order
//! summary, plus the `wa.me` deep link that hands it to the store's WhatsApp.
//! Pure string templating; payment itself is verified out-of-band.

use crate::{
    catalog::{Design, Product},
    order::{OrderSelection, PlacementPreference, StickerChoice},
    pricing::PriceBreakdown,
};

/// The store's WhatsApp number (without country prefix, as `wa.me` expects).
pub const BUSINESS_WHATSAPP_NUMBER: &str = "6350422134";

/// The store's UPI id for manual payment.
pub const BUSINESS_UPI_ID: &str = "dreamyclouds@upi";

/// Everything the order summary template consumes.
#[derive(Debug)]
pub struct OrderMessage<'a> {
    /// The resolved selected product.
    pub product: &'a Product,

    /// The resolved selected design, when one was chosen.
    pub design: Option<&'a Design>,

    /// Absolute URL of the product image.
    pub product_image_url: &'a str,

    /// Absolute URL of the design image, when a design was chosen.
    pub design_image_url: Option<&'a str>,

    /// The final selection snapshot.
    pub selection: &'a OrderSelection,

    /// Pre-rendered cart line descriptions; the cart section is omitted when
    /// empty.
    pub cart_lines: &'a [String],

    /// The final price breakdown.
    pub pricing: &'a PriceBreakdown,

    /// UPI id to include in the payment instructions.
    pub upi_id: &'a str,
}

fn or_na(value: &str) -> &str {
    if value.trim().is_empty() { "N/A" } else { value }
}

/// Render the order summary message.
pub fn build_order_message(message: &OrderMessage<'_>) -> String {
    let OrderMessage {
        product,
        design,
        product_image_url,
        design_image_url,
        selection,
        cart_lines,
        pricing,
        upi_id,
    } = message;

    let design_name = design.map_or("Not selected", |d| d.name.as_str());
    let sticker_choice = design.map_or("N/A", |d| d.name.as_str());

    let sticker_from_gallery = match selection.sticker_from_gallery {
        StickerChoice::Yes => "Yes",
        StickerChoice::No => "No",
        StickerChoice::Unset => "N/A",
    };

    let placement = match (selection.sticker_from_gallery, selection.placement_preference) {
        (StickerChoice::Yes, _) => "N/A",
        (_, PlacementPreference::DesignYourself) => "Design Yourself",
        (_, PlacementPreference::DecideByDaisy) => "Decide By Daisy",
    };

    let details = &selection.customer_details;
    let alternate = if details.alternate_number.trim().is_empty() {
        "N/A".to_owned()
    } else {
        format!("+91 {}", details.alternate_number)
    };

    let mut lines = vec![
        "*New Order Request - Dreamy Clouds By Daisy*".to_owned(),
        String::new(),
        "*Selected Product Details*".to_owned(),
        format!("- Product: {}", product.name),
        format!("- Color: {}", or_na(&selection.selected_color)),
        format!("- Design: {design_name}"),
        format!("- Select Sticker From Gallery: {sticker_from_gallery}"),
        format!("- Sticker Choice: {sticker_choice}"),
        format!("- Placement: {placement}"),
        format!("- Name: {}", or_na(selection.design_customer_name.trim())),
        format!("- Quantity: {}", selection.quantity),
        format!("- Gift Wrap: {}", if selection.gift_wrap { "Yes" } else { "No" }),
        format!(
            "- Personalized Name: {}",
            or_na(selection.personalized_note.trim())
        ),
    ];

    if !cart_lines.is_empty() {
        lines.push(String::new());
        lines.push("*Cart Items*".to_owned());
        lines.extend(cart_lines.iter().cloned());
    }

    lines.extend([
        String::new(),
        "*Selected Images*".to_owned(),
        format!("- Product Image: {product_image_url}"),
        format!("- Design Image: {}", design_image_url.unwrap_or("N/A")),
        String::new(),
        "*Pricing*".to_owned(),
        format!("- Unit Price: INR {}", pricing.unit_price),
        format!("- Items Total: INR {}", pricing.quantity_total),
        format!("- Gift Wrap Charge: INR {}", pricing.gift_wrap_charge),
        format!(
            "- Personalized Name Charge ({} letters): INR {}",
            pricing.personalized_name_letter_count, pricing.personalized_name_charge
        ),
        format!(
            "- Subtotal (Excl. Delivery): INR {}",
            pricing.subtotal_before_discount
        ),
        format!(
            "- Coupon: {}",
            pricing.applied_coupon_code.as_deref().unwrap_or("N/A")
        ),
        format!("- Discount: INR {}", pricing.discount_amount),
        format!("- Delivery Charge: INR {}", pricing.delivery_charge),
        format!("- Grand Total: INR {}", pricing.grand_total),
        String::new(),
        "*Customer Details*".to_owned(),
        format!("- Name: {}", details.full_name),
        format!("- Address: {}", details.address),
        format!("- Contact Number: +91 {}", details.contact_number),
        format!("- Alternative Number: {alternate}"),
        format!("- Email: {}", details.email),
        String::new(),
        "*Payment Instructions*".to_owned(),
        format!("- Please pay via UPI to: {upi_id}"),
        "After payment, share screenshot for manual verification.".to_owned(),
        String::new(),
        "*Uploaded Image (At Checkout)*".to_owned(),
        format!("- {}", or_na(&selection.custom_design_image_name)),
    ]);

    lines.join("\n")
}

/// Build the `wa.me` deep link carrying the percent-encoded message.
pub fn build_whatsapp_url(business_number: &str, message: &str) -> String {
    format!(
        "https://wa.me/{business_number}?text={}",
        urlencoding::encode(message)
    )
}
