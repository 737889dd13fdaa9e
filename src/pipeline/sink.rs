//! Persistence sink
//!
//! Composes the persisted record from a raw item and its extracted
//! attributes, applying the display normalizations that belong to the
//! record rather than the extractor, then writes it. A write failure is
//! logged and the item dropped; the run is never aborted for one item.

use crate::crawler::RawListingItem;
use crate::extract::{canonical_os, canonical_processor_brand, normalize_price, ExtractedAttributes};
use crate::storage::{ProductRecord, ProductStore};
use chrono::Utc;
use uuid::Uuid;

/// Currency of the listing source
const CURRENCY: &str = "DT";

/// Builds the persisted record for an accepted item
///
/// Generates the record id, normalizes the price text, and canonicalizes
/// the processor brand and OS labels.
pub fn compose_record(raw: &RawListingItem, mut attributes: ExtractedAttributes) -> ProductRecord {
    if let Some(brand) = attributes.processor_brand.as_deref() {
        attributes.processor_brand = Some(canonical_processor_brand(brand));
    }
    if let Some(os) = attributes.os.as_deref() {
        attributes.os = Some(canonical_os(os));
    }

    ProductRecord {
        id: Uuid::new_v4().to_string(),
        name: raw.name.clone(),
        source_url: raw.source_url.clone(),
        external_link: raw.external_link.clone(),
        description: raw.details_text.clone(),
        price: normalize_price(&raw.price_text),
        currency: CURRENCY.to_string(),
        shop: raw.shop.clone(),
        scraped_at: Utc::now().to_rfc3339(),
        attributes,
    }
}

/// Writes one record to the store
///
/// Returns whether the record was stored. Failures are logged with the
/// record's source context and the item is lost.
pub fn persist(store: &mut dyn ProductStore, record: &ProductRecord) -> bool {
    match store.insert(record) {
        Ok(()) => true,
        Err(e) => {
            tracing::error!(
                "Failed to persist item from {} ({}): {}",
                record.source_url,
                record.name,
                e
            );
            false
        }
    }
}
