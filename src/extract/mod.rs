//! Attribute extraction from free-text descriptions
//!
//! This module turns an unstructured detail-page description into the fixed
//! set of structured attributes, using an ordered table of independent,
//! case-insensitive, first-match pattern rules. It is pure logic: no IO, no
//! state, no side effects.

mod extractor;
mod normalize;
mod rules;

pub use extractor::{ExtractedAttributes, FieldExtractor};
pub use normalize::{
    canonical_os, canonical_processor_brand, first_token_folded, fold_diacritics, normalize_price,
};
pub use rules::{Attribute, RuleSet, DEFAULT_KIND};
