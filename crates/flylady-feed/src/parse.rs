//! Event-driven parser for the `<SHOP>`/`<SHOPITEM>` export format.

use quick_xml::events::Event;
use quick_xml::Reader;

use crate::error::FeedError;
use crate::types::{RawItem, RawVariant};

/// Parses the shop export XML into raw item records.
///
/// Unknown elements are skipped and absent fields stay `None`; only a
/// structurally broken document is an error. Field text may arrive as
/// escaped text or CDATA; both are accepted, and consecutive text nodes
/// (e.g. around inline HTML in descriptions) are accumulated.
///
/// # Errors
///
/// Returns [`FeedError::Xml`] if the document is not well-formed XML.
pub fn parse_shop_feed(xml: &str) -> Result<Vec<RawItem>, FeedError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut items = Vec::new();
    let mut item: Option<RawItem> = None;
    let mut variant: Option<RawVariant> = None;
    let mut current_tag = String::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                let name = std::str::from_utf8(e.name().as_ref())
                    .unwrap_or("")
                    .to_string();
                match name.as_str() {
                    "SHOPITEM" => item = Some(RawItem::default()),
                    "VARIANT" if item.is_some() => variant = Some(RawVariant::default()),
                    _ => {}
                }
                current_tag = name;
            }
            Ok(Event::End(e)) => {
                let name = e.name();
                let name = std::str::from_utf8(name.as_ref()).unwrap_or("");
                match name {
                    "VARIANT" => {
                        if let (Some(item), Some(variant)) = (item.as_mut(), variant.take()) {
                            item.variants.push(variant);
                        }
                    }
                    "SHOPITEM" => {
                        if let Some(item) = item.take() {
                            items.push(item);
                        }
                    }
                    _ => {}
                }
                current_tag.clear();
            }
            Ok(Event::Text(e)) => {
                let text = e.unescape().unwrap_or_default().into_owned();
                record_field(&mut item, &mut variant, &current_tag, text);
            }
            Ok(Event::CData(e)) => {
                let text = String::from_utf8_lossy(e.as_ref()).into_owned();
                record_field(&mut item, &mut variant, &current_tag, text);
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(FeedError::Xml(e)),
            _ => {}
        }
    }

    Ok(items)
}

/// Routes a text node to the field named by the enclosing tag.
fn record_field(
    item: &mut Option<RawItem>,
    variant: &mut Option<RawVariant>,
    tag: &str,
    text: String,
) {
    if let Some(variant) = variant.as_mut() {
        match tag {
            "VARIANTID" => variant.variant_id = Some(text),
            "PRODUCTNAMEEXT" => variant.product_name_ext = Some(text),
            "PRICE" => variant.price = Some(text),
            "PRICE_VAT" => variant.price_vat = Some(text),
            "LOCATION" => variant.location = Some(text),
            _ => {}
        }
        return;
    }

    let Some(item) = item.as_mut() else { return };
    match tag {
        "ID" => item.id = Some(text),
        "PRODUCT" => item.name = Some(text),
        "DESCRIPTION" => match item.description.as_mut() {
            // Descriptions can arrive as several text/CDATA nodes split by
            // inline markup; keep them all.
            Some(existing) => {
                existing.push(' ');
                existing.push_str(&text);
            }
            None => item.description = Some(text),
        },
        "URL" => item.url = Some(text),
        "IMGURL" => item.image_slots[0] = Some(text),
        "IMGURL2" => item.image_slots[1] = Some(text),
        "IMGURL3" => item.image_slots[2] = Some(text),
        "IMGURL4" => item.image_slots[3] = Some(text),
        "IMGURL5" => item.image_slots[4] = Some(text),
        "CATEGORYTEXT" => item.category_texts.push(text),
        "DELIVERY_DATE" => item.delivery_date = Some(text),
        _ => {}
    }
}

#[cfg(test)]
#[path = "parse_test.rs"]
mod tests;
