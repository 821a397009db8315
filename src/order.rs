//! Order selection
//!
//! The mutable record of a shopper's in-progress choices and the transition
//! rules that keep it internally consistent as the shopper moves back and
//! forth through the flow. Every transition is total: out-of-range numeric
//! input is clamped, never rejected. Cross-field invariants (a new product
//! clears product-scoped choices, an emptied cart cannot carry stale pricing
//! modifiers) are enforced here, on every transition.

use serde::{Deserialize, Serialize};

use crate::{
    catalog::{Catalog, Design, Product, ProductCategory},
    coupons::normalize_coupon_code,
    validation::validate_customer_details,
};

/// Contact and shipping details collected before checkout.
///
/// All fields are free text until validated at submission; see
/// [`validate_customer_details`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CustomerDetails {
    /// Recipient's full name.
    pub full_name: String,

    /// Shipping address.
    pub address: String,

    /// Primary 10-digit mobile number.
    pub contact_number: String,

    /// Optional alternate mobile number.
    pub alternate_number: String,

    /// Email address.
    pub email: String,
}

/// A committed cart line.
///
/// Identity key is `(product_id, selected_color)`; adding the same pair again
/// increments quantity rather than creating a duplicate row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CartItem {
    /// Generated id: product id + color + a uniqueness token.
    pub id: String,

    /// Catalog product id. May dangle if the catalog changes; pricing
    /// silently excludes unresolvable lines.
    pub product_id: String,

    /// Units of this line. Always at least 1.
    pub quantity: u32,

    /// The color this line was committed with.
    pub selected_color: String,
}

impl Default for CartItem {
    fn default() -> Self {
        CartItem {
            id: String::new(),
            product_id: String::new(),
            quantity: 1,
            selected_color: String::new(),
        }
    }
}

/// Whether the shopper picked a sticker from the gallery.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum StickerChoice {
    /// Not answered yet.
    #[default]
    #[serde(rename = "")]
    Unset,

    /// Sticker chosen from the gallery.
    #[serde(rename = "yes")]
    Yes,

    /// Custom design instead of a gallery sticker.
    #[serde(rename = "no")]
    No,
}

/// Who decides the sticker placement on the product.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlacementPreference {
    /// The shopper places the design themselves.
    #[default]
    #[serde(rename = "design-yourself")]
    DesignYourself,

    /// Placement is left to the store.
    #[serde(rename = "decide-by-daisy")]
    DecideByDaisy,
}

/// The shopper's in-progress order: one field per choice in the flow.
///
/// Serializes to the camelCase JSON shape the persistence collaborator
/// stores; see [`crate::store`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OrderSelection {
    /// Currently selected product; `None` until one is chosen.
    pub product_id: Option<String>,

    /// Color chosen for the current product.
    pub selected_color: String,

    /// Submitted coupon code, always stored trimmed and uppercased.
    pub coupon_code: String,

    /// Quantity for the in-progress selection. Always at least 1.
    pub quantity: u32,

    /// Committed cart lines, in insertion order.
    pub cart_items: Vec<CartItem>,

    /// Monotonic counter feeding cart line id uniqueness tokens.
    pub cart_sequence: u64,

    /// Currently selected design; cleared whenever the product changes.
    pub design_id: Option<String>,

    /// Gallery-sticker answer in the design flow.
    pub sticker_from_gallery: StickerChoice,

    /// Placement preference in the design flow.
    pub placement_preference: PlacementPreference,

    /// File name of a custom design uploaded at checkout.
    pub custom_design_image_name: String,

    /// Name to print as part of the design.
    pub design_customer_name: String,

    /// Whether to gift wrap every item.
    pub gift_wrap: bool,

    /// Free-text personalized name; charged per non-whitespace letter.
    pub personalized_note: String,

    /// Contact and shipping details.
    pub customer_details: CustomerDetails,
}

impl Default for OrderSelection {
    fn default() -> Self {
        OrderSelection {
            product_id: None,
            selected_color: String::new(),
            coupon_code: String::new(),
            quantity: 1,
            cart_items: Vec::new(),
            cart_sequence: 0,
            design_id: None,
            sticker_from_gallery: StickerChoice::Unset,
            placement_preference: PlacementPreference::DesignYourself,
            custom_design_image_name: String::new(),
            design_customer_name: String::new(),
            gift_wrap: false,
            personalized_note: String::new(),
            customer_details: CustomerDetails::default(),
        }
    }
}

/// One transition per user intent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderEvent {
    /// Pick a product; clears design, color and all design-flow fields.
    SelectProduct(String),

    /// Pick a color for the current product.
    SelectColor(String),

    /// Set the in-progress quantity; clamps to at least 1.
    SetQuantity(u32),

    /// Commit the current product/color to the cart. An existing
    /// `(product, color)` line is incremented instead of duplicated.
    AddCartItem {
        /// Catalog product id.
        product_id: String,

        /// Committed color.
        selected_color: String,

        /// Units to add; clamps to at least 1.
        quantity: u32,
    },

    /// Change a cart line's quantity; clamps to at least 1.
    UpdateCartItemQuantity {
        /// Cart line id.
        id: String,

        /// New quantity.
        quantity: u32,
    },

    /// Remove a cart line. Removing the last line resets quantity, color,
    /// design, gift wrap, personalization and coupon to their defaults.
    RemoveCartItem(String),

    /// Empty the cart, with the same resets as removing the last line.
    ClearCart,

    /// Pick a design for the current product.
    SelectDesign(String),

    /// Answer the gallery-sticker question.
    SetStickerChoice(StickerChoice),

    /// Set the placement preference.
    SetPlacementPreference(PlacementPreference),

    /// Record the file name of an uploaded custom design.
    SetCustomDesignImageName(String),

    /// Set the name to print as part of the design.
    SetDesignCustomerName(String),

    /// Toggle gift wrapping.
    SetGiftWrap(bool),

    /// Set the personalized name text.
    SetPersonalizedNote(String),

    /// Submit a coupon code; stored normalized. Validity is re-derived on
    /// every pricing pass, never cached here.
    SetCouponCode(String),

    /// Replace the customer contact details.
    SetCustomerDetails(CustomerDetails),

    /// Reset everything to defaults (successful checkout).
    ClearOrder,
}

impl OrderSelection {
    /// Apply one transition, producing the next state.
    ///
    /// Total: no input is rejected, out-of-range quantities are clamped.
    #[must_use]
    pub fn apply(mut self, event: OrderEvent) -> Self {
        match event {
            OrderEvent::SelectProduct(product_id) => {
                self.product_id = Some(product_id);
                self.design_id = None;
                self.selected_color.clear();
                self.reset_design_flow();
            }
            OrderEvent::SelectColor(color) => {
                self.selected_color = color;
            }
            OrderEvent::SetQuantity(quantity) => {
                self.quantity = quantity.max(1);
            }
            OrderEvent::AddCartItem {
                product_id,
                selected_color,
                quantity,
            } => {
                self.add_cart_item(product_id, selected_color, quantity.max(1));
            }
            OrderEvent::UpdateCartItemQuantity { id, quantity } => {
                if let Some(item) = self.cart_items.iter_mut().find(|item| item.id == id) {
                    item.quantity = quantity.max(1);
                }
            }
            OrderEvent::RemoveCartItem(id) => {
                self.cart_items.retain(|item| item.id != id);
                if self.cart_items.is_empty() {
                    self.reset_cart_modifiers();
                }
            }
            OrderEvent::ClearCart => {
                self.cart_items.clear();
                self.reset_cart_modifiers();
            }
            OrderEvent::SelectDesign(design_id) => {
                self.design_id = Some(design_id);
            }
            OrderEvent::SetStickerChoice(choice) => {
                self.sticker_from_gallery = choice;
            }
            OrderEvent::SetPlacementPreference(preference) => {
                self.placement_preference = preference;
            }
            OrderEvent::SetCustomDesignImageName(name) => {
                self.custom_design_image_name = name;
            }
            OrderEvent::SetDesignCustomerName(name) => {
                self.design_customer_name = name;
            }
            OrderEvent::SetGiftWrap(gift_wrap) => {
                self.gift_wrap = gift_wrap;
            }
            OrderEvent::SetPersonalizedNote(note) => {
                self.personalized_note = note;
            }
            OrderEvent::SetCouponCode(raw) => {
                self.coupon_code = normalize_coupon_code(&raw);
            }
            OrderEvent::SetCustomerDetails(details) => {
                self.customer_details = details;
            }
            OrderEvent::ClearOrder => {
                self = OrderSelection::default();
            }
        }

        self
    }

    fn add_cart_item(&mut self, product_id: String, selected_color: String, quantity: u32) {
        let existing = self
            .cart_items
            .iter_mut()
            .find(|item| item.product_id == product_id && item.selected_color == selected_color);

        if let Some(item) = existing {
            item.quantity = item.quantity.saturating_add(quantity);
            return;
        }

        self.cart_sequence += 1;
        let id = format!("{product_id}-{selected_color}-{}", self.cart_sequence);

        self.cart_items.push(CartItem {
            id,
            product_id,
            quantity,
            selected_color,
        });
    }

    /// An empty cart cannot carry stale pricing modifiers.
    fn reset_cart_modifiers(&mut self) {
        self.quantity = 1;
        self.selected_color.clear();
        self.design_id = None;
        self.gift_wrap = false;
        self.personalized_note.clear();
        self.coupon_code.clear();
    }

    /// Color and design choices are product-scoped.
    fn reset_design_flow(&mut self) {
        self.sticker_from_gallery = StickerChoice::Unset;
        self.placement_preference = PlacementPreference::DesignYourself;
        self.custom_design_image_name.clear();
        self.design_customer_name.clear();
    }

    /// Resolve the selected product against the catalog.
    pub fn selected_product<'a>(&self, catalog: &'a Catalog) -> Option<&'a Product> {
        self.product_id
            .as_deref()
            .and_then(|id| catalog.find_product(id))
    }

    /// Resolve the selected design against the catalog.
    pub fn selected_design<'a>(&self, catalog: &'a Catalog) -> Option<&'a Design> {
        self.design_id
            .as_deref()
            .and_then(|id| catalog.find_design(id))
    }

    /// Designs selectable for the current product; empty when no product is
    /// selected.
    pub fn available_designs<'a>(&self, catalog: &'a Catalog) -> Vec<&'a Design> {
        match self.selected_product(catalog) {
            Some(product) => catalog.designs_for_category(product.category).collect(),
            None => Vec::new(),
        }
    }

    /// Whether the flow may move on to the design step.
    ///
    /// Recomputed on every read; never cached.
    pub fn can_proceed_to_design(&self, catalog: &Catalog) -> bool {
        self.selected_product(catalog).is_some()
    }

    /// Whether the order may be submitted: the product resolves, a matching
    /// design is chosen (bookmarks skip the design step), and the customer
    /// details validate.
    ///
    /// Recomputed on every read; never cached.
    pub fn can_submit(&self, catalog: &Catalog) -> bool {
        let Some(product) = self.selected_product(catalog) else {
            return false;
        };

        let design_ok = product.category == ProductCategory::Bookmarks
            || self
                .selected_design(catalog)
                .is_some_and(|design| design.product_category == product.category);

        design_ok && validate_customer_details(&self.customer_details).is_ok()
    }
}
