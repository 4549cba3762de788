//! Raw record types for the zazitky.cz shop export.
//!
//! ## Observed shape of the export
//!
//! The document is a `<SHOP>` root with one `<SHOPITEM>` per sellable
//! experience. Every field is optional in practice:
//!
//! - `ID`, `PRODUCT`, `DESCRIPTION`, `URL`, `DELIVERY_DATE`: plain text or
//!   CDATA; descriptions often carry HTML inside CDATA.
//! - `IMGURL`, `IMGURL2`..`IMGURL5`: up to five image slots. Items may have
//!   any subset; order of the named slots is significant for display.
//! - `CATEGORYTEXT`: repeated element, one per category path, e.g.
//!   `"Dárky, Letecké zážitky"`. Zero, one, or many per item.
//! - `VARIANT`: repeated sub-record; a single-variant item serializes as one
//!   bare `<VARIANT>` element, which must normalize to the same one-element
//!   list as a multi-variant item.
//! - Variant prices (`PRICE`, `PRICE_VAT`) are locale-formatted strings with
//!   a comma decimal separator and optional thousands whitespace, e.g.
//!   `"2 990,00"`. Unparsable values degrade to `None`, never an error.

/// One `<SHOPITEM>` as read off the wire, before normalization.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawItem {
    pub id: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
    /// The five named image slots (`IMGURL`..`IMGURL5`), in declared order.
    pub image_slots: [Option<String>; 5],
    /// Every `CATEGORYTEXT` value, in document order.
    pub category_texts: Vec<String>,
    pub variants: Vec<RawVariant>,
    pub delivery_date: Option<String>,
}

/// One `<VARIANT>` sub-record of a [`RawItem`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawVariant {
    pub variant_id: Option<String>,
    pub product_name_ext: Option<String>,
    pub price: Option<String>,
    pub price_vat: Option<String>,
    pub location: Option<String>,
}
