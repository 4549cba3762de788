//! The normalized, sorted product catalog and its lookup accessors.

use flylady_core::text::{czech_cmp, fold_text};
use flylady_core::Product;

use crate::client::FeedClient;
use crate::error::FeedError;
use crate::normalize::normalize_item;
use crate::parse::parse_shop_feed;

/// The raw-category phrase that marks an item as an aviation experience,
/// matched diacritic- and case-insensitively as a substring.
const AVIATION_PHRASE: &str = "letecke zazitky";

/// All products from one ingestion pass, sorted by name under Czech
/// collation. Immutable once built; every request-level consumer works off
/// one catalog snapshot.
#[derive(Debug, Clone)]
pub struct FeedCatalog {
    products: Vec<Product>,
}

impl FeedCatalog {
    /// Builds a catalog from normalized products, applying the Czech sort.
    #[must_use]
    pub fn new(mut products: Vec<Product>) -> Self {
        products.sort_by(|a, b| czech_cmp(&a.name, &b.name));
        Self { products }
    }

    /// Fetches, parses, normalizes, and sorts the upstream feed.
    ///
    /// # Errors
    ///
    /// Propagates [`FeedError::Unavailable`]/[`FeedError::Http`] from the
    /// fetch and [`FeedError::Xml`] from the parse. There is no partial
    /// result: any failure means no catalog.
    pub async fn load(client: &FeedClient) -> Result<Self, FeedError> {
        let xml = client.fetch_feed().await?;
        let items = parse_shop_feed(&xml)?;
        let products = items.into_iter().map(normalize_item).collect();
        let catalog = Self::new(products);
        tracing::info!(
            total = catalog.products.len(),
            aviation = catalog.aviation_products().len(),
            "loaded product catalog"
        );
        Ok(catalog)
    }

    /// Every product in the feed, sorted.
    #[must_use]
    pub fn all_products(&self) -> &[Product] {
        &self.products
    }

    /// The aviation-experience subset, in catalog (sorted) order.
    #[must_use]
    pub fn aviation_products(&self) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| is_aviation_experience(&p.categories))
            .collect()
    }

    /// Finds an aviation product by its upstream id. Linear scan; a lookup
    /// miss is a normal not-found, not an error.
    #[must_use]
    pub fn product_by_id(&self, id: &str) -> Option<&Product> {
        self.aviation_products().into_iter().find(|p| p.id == id)
    }

    /// Finds an aviation product by its slug.
    #[must_use]
    pub fn product_by_slug(&self, slug: &str) -> Option<&Product> {
        self.aviation_products().into_iter().find(|p| p.slug == slug)
    }
}

/// Whether any raw category label contains the aviation phrase.
#[must_use]
pub fn is_aviation_experience(categories: &[String]) -> bool {
    categories
        .iter()
        .any(|category| fold_text(category).contains(AVIATION_PHRASE))
}
