use serde::{Deserialize, Serialize};

/// An experience voucher from the zazitky.cz export, normalized for
/// classification and display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    /// Stable identifier from the upstream feed. Also embedded at the end of
    /// [`Product::slug`], which is how detail-page routes resolve back to it.
    pub id: String,
    pub name: String,
    pub description: String,
    /// Upstream product page URL with the affiliate UTM parameters appended.
    /// Falls back to the untagged upstream value when it is not a valid URL.
    pub url: String,
    /// Up to 5 image URLs, in the order the feed declares them. Absent slots
    /// are skipped, so this may be empty.
    pub image_urls: Vec<String>,
    /// Raw category labels from the feed (e.g. `"Dárky, Letecké zážitky"`).
    /// Distinct from the site's own marketing categories.
    pub categories: Vec<String>,
    pub variants: Vec<ProductVariant>,
    /// Minimum over all variants with a parsed net price; `None` when no
    /// variant has one.
    pub min_price: Option<f64>,
    /// Minimum over all variants with a parsed gross (VAT-inclusive) price.
    pub min_price_vat: Option<f64>,
    /// Location of the first variant (in feed order) that has one.
    pub location: Option<String>,
    pub delivery_date: Option<String>,
    /// URL-safe identity derived from `(name, id)`; see `text::slugify`.
    pub slug: String,
}

impl Product {
    /// Returns the first image URL, if the feed provided any.
    #[must_use]
    pub fn primary_image_url(&self) -> Option<&str> {
        self.image_urls.first().map(String::as_str)
    }

    #[must_use]
    pub fn variant_count(&self) -> usize {
        self.variants.len()
    }
}

/// A purchasable configuration of a [`Product`]: a specific location, date,
/// or package with its own price.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductVariant {
    /// Upstream variant identifier. Not guaranteed unique outside its parent.
    pub id: String,
    pub name: String,
    /// Net price parsed from the feed's locale-formatted string (comma
    /// decimal separator). `None` when absent or unparsable, never an error.
    pub price: Option<f64>,
    /// VAT-inclusive price, same parsing rules as `price`.
    pub price_vat: Option<f64>,
    pub location: Option<String>,
}
