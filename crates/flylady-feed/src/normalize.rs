//! Normalization from raw feed records to [`flylady_core::Product`].
//!
//! Every per-field conversion here is total: malformed prices, missing
//! images, or an unparsable URL degrade to `None`/defaults instead of
//! failing the item. Only the fetch and the XML parse can fail the feed.

use flylady_core::text::slugify;
use flylady_core::{Product, ProductVariant};

use crate::types::{RawItem, RawVariant};

const UTM_SOURCE: &str = "flylady.cz";
const UTM_MEDIUM: &str = "affiliate";
const UTM_CAMPAIGN: &str = "letecke-zazitky";

/// Converts one raw feed record into a [`Product`]. Pure and total.
#[must_use]
pub fn normalize_item(item: RawItem) -> Product {
    let categories: Vec<String> = item
        .category_texts
        .iter()
        .map(|entry| entry.trim())
        .filter(|entry| !entry.is_empty())
        .map(ToString::to_string)
        .collect();

    let variants: Vec<ProductVariant> =
        item.variants.into_iter().map(normalize_variant).collect();

    let min_price = min_of(variants.iter().map(|v| v.price));
    let min_price_vat = min_of(variants.iter().map(|v| v.price_vat));
    let location = variants.iter().find_map(|v| v.location.clone());

    let image_urls: Vec<String> = item.image_slots.into_iter().flatten().collect();

    let id = item.id.unwrap_or_default();
    let name = item.name.unwrap_or_default();
    let slug = slugify(&name, &id);

    Product {
        url: add_utm_params(&item.url.unwrap_or_default()),
        id,
        name,
        description: item.description.unwrap_or_default(),
        image_urls,
        categories,
        variants,
        min_price,
        min_price_vat,
        location,
        delivery_date: item.delivery_date,
        slug,
    }
}

fn normalize_variant(variant: RawVariant) -> ProductVariant {
    ProductVariant {
        id: variant.variant_id.unwrap_or_default(),
        name: variant.product_name_ext.unwrap_or_default(),
        price: parse_price(variant.price.as_deref()),
        price_vat: parse_price(variant.price_vat.as_deref()),
        location: variant.location,
    }
}

/// Parses a locale-formatted price: whitespace (incl. NBSP thousands
/// separators) stripped, decimal comma converted to a period. Anything that
/// still fails to parse is `None`.
fn parse_price(value: Option<&str>) -> Option<f64> {
    let raw: String = value?
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| if c == ',' { '.' } else { c })
        .collect();
    if raw.is_empty() {
        return None;
    }
    raw.parse::<f64>().ok().filter(|n| n.is_finite())
}

fn min_of(values: impl Iterator<Item = Option<f64>>) -> Option<f64> {
    values.flatten().fold(None, |acc, value| match acc {
        Some(current) if current <= value => Some(current),
        _ => Some(value),
    })
}

/// Appends the fixed affiliate UTM parameters to an outbound URL,
/// overwriting any existing values for the three keys and preserving every
/// other query parameter. A value that does not parse as a URL is returned
/// unchanged; affiliate tagging fails soft.
#[must_use]
pub fn add_utm_params(url: &str) -> String {
    let Ok(mut parsed) = reqwest::Url::parse(url) else {
        return url.to_string();
    };

    let existing: Vec<(String, String)> = parsed
        .query_pairs()
        .filter(|(key, _)| key != "utm_source" && key != "utm_medium" && key != "utm_campaign")
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();

    {
        let mut pairs = parsed.query_pairs_mut();
        pairs.clear();
        for (key, value) in &existing {
            pairs.append_pair(key, value);
        }
        pairs.append_pair("utm_source", UTM_SOURCE);
        pairs.append_pair("utm_medium", UTM_MEDIUM);
        pairs.append_pair("utm_campaign", UTM_CAMPAIGN);
    }

    parsed.to_string()
}
