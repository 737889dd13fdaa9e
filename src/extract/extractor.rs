//! Free text to structured attributes
//!
//! The extractor is pure: the output depends on the input text and the rule
//! table alone, never on call history.

use crate::extract::rules::{Attribute, RuleSet, DEFAULT_KIND};
use serde::{Deserialize, Serialize};

/// Structured attributes derived from a detail-page description
///
/// Every attribute is always present; `None` means the rule found no match.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedAttributes {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub model: Option<String>,
    pub processor_brand: Option<String>,
    pub processor: Option<String>,
    pub ram: Option<String>,
    pub storage: Option<String>,
    pub gpu: Option<String>,
    pub screen: Option<String>,
    pub color: Option<String>,
    pub os: Option<String>,
}

impl ExtractedAttributes {
    fn set(&mut self, attribute: Attribute, value: Option<String>) {
        let slot = match attribute {
            Attribute::Kind => &mut self.kind,
            Attribute::Model => &mut self.model,
            Attribute::ProcessorBrand => &mut self.processor_brand,
            Attribute::Processor => &mut self.processor,
            Attribute::Ram => &mut self.ram,
            Attribute::Storage => &mut self.storage,
            Attribute::Gpu => &mut self.gpu,
            Attribute::Screen => &mut self.screen,
            Attribute::Color => &mut self.color,
            Attribute::Os => &mut self.os,
        };
        *slot = value;
    }
}

/// Applies the rule registry to free text
pub struct FieldExtractor {
    rules: RuleSet,
}

impl FieldExtractor {
    /// Creates an extractor over an already-compiled rule registry
    pub fn new(rules: RuleSet) -> Self {
        Self { rules }
    }

    /// Extracts structured attributes from a detail description
    ///
    /// Blank input short-circuits to an all-`None` result without running a
    /// single rule. Otherwise every rule scans the whole text once, in
    /// registry order, keeping its first match. When no category rule
    /// matches, the kind falls back to the default category.
    pub fn extract(&self, text: &str) -> ExtractedAttributes {
        let mut attributes = ExtractedAttributes::default();

        if text.trim().is_empty() {
            return attributes;
        }

        for (attribute, value) in self.rules.apply(text) {
            attributes.set(attribute, value);
        }

        if attributes.kind.is_none() {
            attributes.kind = Some(DEFAULT_KIND.to_string());
        }

        attributes
    }
}

impl Default for FieldExtractor {
    fn default() -> Self {
        Self::new(RuleSet::new())
    }
}
