//! Catalog
//!
//! Read-only reference data: the products available for customization and the
//! sticker designs that can be printed on them. The pricing and order state
//! components query the catalog by id but never mutate it.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Product category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProductCategory {
    /// Insulated steel or glass tumblers.
    #[serde(rename = "tumblers")]
    Tumblers,

    /// Ceramic mugs.
    #[serde(rename = "mugs")]
    Mugs,

    /// Laminated bookmarks.
    #[serde(rename = "bookmarks")]
    Bookmarks,

    /// Scented candles.
    #[serde(rename = "candles")]
    Candles,

    /// Curated gift hampers.
    #[serde(rename = "gift-hampers")]
    GiftHampers,

    /// Small accessories.
    #[serde(rename = "accessories")]
    Accessories,
}

impl fmt::Display for ProductCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ProductCategory::Tumblers => "tumblers",
            ProductCategory::Mugs => "mugs",
            ProductCategory::Bookmarks => "bookmarks",
            ProductCategory::Candles => "candles",
            ProductCategory::GiftHampers => "gift-hampers",
            ProductCategory::Accessories => "accessories",
        };

        f.write_str(name)
    }
}

/// Tumbler sub-category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TumblerSubCategory {
    /// Double-walled steel tumbler.
    #[serde(rename = "steel-tumbler")]
    Steel,

    /// Single-walled glass tumbler.
    #[serde(rename = "glass-tumbler")]
    Glass,
}

/// An orderable product.
///
/// Prices are whole rupees. `original_price` is a display-only strike-through
/// value and is never read by the pricing engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    /// Catalog id, e.g. `tumbler-1`.
    pub id: String,

    /// Category the product belongs to.
    pub category: ProductCategory,

    /// Sub-category, only used for tumblers.
    pub sub_category: Option<TumblerSubCategory>,

    /// Explicit color options, when the product comes in more than one.
    pub colors: Option<Vec<String>>,

    /// Display name.
    pub name: String,

    /// Short marketing description.
    pub description: String,

    /// Base price in whole rupees. Always positive.
    pub base_price: i64,

    /// Pre-discount display price, if shown struck through.
    pub original_price: Option<i64>,

    /// Primary product image URL or asset path.
    pub image: String,
}

impl Product {
    /// Create a product with the required fields; optional fields start unset.
    pub fn new(
        id: impl Into<String>,
        category: ProductCategory,
        name: impl Into<String>,
        description: impl Into<String>,
        base_price: i64,
        image: impl Into<String>,
    ) -> Self {
        Product {
            id: id.into(),
            category,
            sub_category: None,
            colors: None,
            name: name.into(),
            description: description.into(),
            base_price,
            original_price: None,
            image: image.into(),
        }
    }

    /// Set the tumbler sub-category.
    #[must_use]
    pub fn with_sub_category(mut self, sub_category: TumblerSubCategory) -> Self {
        self.sub_category = Some(sub_category);
        self
    }

    /// Set the explicit color options.
    #[must_use]
    pub fn with_colors(mut self, colors: &[&str]) -> Self {
        self.colors = Some(colors.iter().map(ToString::to_string).collect());
        self
    }

    /// Set the struck-through display price.
    #[must_use]
    pub fn with_original_price(mut self, original_price: i64) -> Self {
        self.original_price = Some(original_price);
        self
    }
}

/// A printable sticker design, valid for a single product category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Design {
    /// Catalog id, e.g. `floral-dream`.
    pub id: String,

    /// The product category this design can be printed on.
    pub product_category: ProductCategory,

    /// Display name.
    pub name: String,

    /// Design image URL.
    pub image: String,
}

impl Design {
    /// Create a design.
    pub fn new(
        id: impl Into<String>,
        product_category: ProductCategory,
        name: impl Into<String>,
        image: impl Into<String>,
    ) -> Self {
        Design {
            id: id.into(),
            product_category,
            name: name.into(),
            image: image.into(),
        }
    }
}

/// The catalog: products and designs resolvable by id.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
    designs: Vec<Design>,
}

impl Catalog {
    /// Create a catalog from the given products and designs.
    pub fn new(products: Vec<Product>, designs: Vec<Design>) -> Self {
        Catalog { products, designs }
    }

    /// Look up a product by id.
    pub fn find_product(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|product| product.id == id)
    }

    /// Look up a design by id.
    pub fn find_design(&self, id: &str) -> Option<&Design> {
        self.designs.iter().find(|design| design.id == id)
    }

    /// All designs valid for the given product category.
    ///
    /// A design is only selectable when its category matches the selected
    /// product's category; this filter is the place that rule is enforced.
    pub fn designs_for_category(
        &self,
        category: ProductCategory,
    ) -> impl Iterator<Item = &Design> {
        self.designs
            .iter()
            .filter(move |design| design.product_category == category)
    }

    /// All products, in display order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// All designs, in display order.
    pub fn designs(&self) -> &[Design] {
        &self.designs
    }

    /// The stock storefront catalog.
    pub fn builtin() -> Self {
        use ProductCategory::{Bookmarks, Mugs, Tumblers};

        let products = vec![
            Product::new(
                "tumbler-1",
                Tumblers,
                "Tumbler Classic",
                "Premium UV TF-ready steel tumbler.",
                499,
                "/products/tumblers/tumbler_1.jpeg",
            ),
            Product::new(
                "tumbler-2",
                Tumblers,
                "Tumbler Bloom",
                "Custom printed tumbler with floral-inspired finish.",
                499,
                "/products/tumblers/tumbler_2.jpeg",
            ),
            Product::new(
                "tumbler-3",
                Tumblers,
                "Tumbler Bliss",
                "Durable insulated tumbler for daily use.",
                499,
                "/products/tumblers/tumbler_3.jpeg",
            ),
            Product::new(
                "tumbler-4",
                Tumblers,
                "Tumbler Spark",
                "Glossy finish tumbler with smooth print area.",
                499,
                "/products/tumblers/tumbler_4.jpeg",
            ),
            Product::new(
                "tumbler-baby",
                Tumblers,
                "Tumbler Baby Theme",
                "Cute-themed tumbler design sample.",
                499,
                "/products/tumblers/tumbler_baby.jpeg",
            ),
            Product::new(
                "tumbler-baby-2",
                Tumblers,
                "Tumbler Baby Theme 2",
                "Soft pastel style tumbler sample for gifting.",
                499,
                "/products/tumblers/tumbler_baby2.jpeg",
            ),
            Product::new(
                "tumbler-cool",
                Tumblers,
                "Tumbler Cool Vibe",
                "Modern look tumbler with clean print space.",
                499,
                "/products/tumblers/tumbler_cool.jpeg",
            ),
            Product::new(
                "tumbler-flower",
                Tumblers,
                "Tumbler Flower Art",
                "Floral art tumbler sample.",
                499,
                "/products/tumblers/tumbler_flower.jpeg",
            ),
            Product::new(
                "tumbler-white",
                Tumblers,
                "Tumbler White Minimal",
                "Minimal white tumbler for vibrant custom prints.",
                499,
                "/products/tumblers/tumbler_white.jpeg",
            ),
            Product::new(
                "mug-1",
                Mugs,
                "Mug Classic",
                "Glossy ceramic mug ready for UV TF printing.",
                299,
                "/products/mugs/mug_1.jpeg",
            ),
            Product::new(
                "mug-2",
                Mugs,
                "Mug Pastel",
                "Soft-tone ceramic mug design sample.",
                299,
                "/products/mugs/mug_2.jpeg",
            ),
            Product::new(
                "mug-3",
                Mugs,
                "Mug Artwork",
                "Art-themed mug with high-quality print area.",
                299,
                "/products/mugs/mug_3.jpeg",
            ),
            Product::new(
                "mug-4",
                Mugs,
                "Mug Soft Bloom",
                "Elegant mug sample with premium finish.",
                299,
                "/products/mugs/mug_4.jpeg",
            ),
            Product::new(
                "mug-5",
                Mugs,
                "Mug Dreamy Print",
                "Dream-style mug sample for custom gifts.",
                299,
                "/products/mugs/mug_5.jpeg",
            ),
            Product::new(
                "mug-6",
                Mugs,
                "Mug Everyday",
                "Daily-use mug with durable print support.",
                299,
                "/products/mugs/mug_6.jpeg",
            ),
            Product::new(
                "mug-7",
                Mugs,
                "Mug Signature",
                "Signature mug style for personalized branding.",
                299,
                "/products/mugs/mug_7.jpeg",
            ),
            Product::new(
                "bookmark-1",
                Bookmarks,
                "Premium Bookmark",
                "Laminated bookmark with vibrant UV TF-ready finish.",
                99,
                "/products/bookmarks/bookmark_1.jpeg",
            ),
        ];

        let designs = vec![
            Design::new(
                "floral-dream",
                Tumblers,
                "Floral Dream",
                "https://images.unsplash.com/photo-1526045478516-99145907023c?auto=format&fit=crop&w=600&q=80",
            ),
            Design::new(
                "cosmic-wave",
                Tumblers,
                "Cosmic Wave",
                "https://images.unsplash.com/photo-1513151233558-d860c5398176?auto=format&fit=crop&w=600&q=80",
            ),
            Design::new(
                "minimal-gold",
                Mugs,
                "Minimal Gold",
                "https://images.unsplash.com/photo-1441986300917-64674bd600d8?auto=format&fit=crop&w=600&q=80",
            ),
            Design::new(
                "sunset-brush",
                Mugs,
                "Sunset Brush",
                "https://images.unsplash.com/photo-1460661419201-fd4cecdf8a8b?auto=format&fit=crop&w=600&q=80",
            ),
            Design::new(
                "leaf-pattern",
                Bookmarks,
                "Leaf Pattern",
                "https://images.unsplash.com/photo-1473448912268-2022ce9509d8?auto=format&fit=crop&w=600&q=80",
            ),
            Design::new(
                "moonlit-lines",
                Bookmarks,
                "Moonlit Lines",
                "https://images.unsplash.com/photo-1506880018603-83d5b814b5a6?auto=format&fit=crop&w=600&q=80",
            ),
        ];

        Catalog::new(products, designs)
    }
}
