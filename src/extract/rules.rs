//! The fixed attribute pattern-rule table
//!
//! Rules are an ordered, immutable registry compiled once into a [`RuleSet`]
//! and handed to the extractor. Each rule scans the whole text independently
//! and keeps only its first match; rules never consume text for one another,
//! so overlap between matches is expected.

use regex::Regex;

/// A structured attribute derived from free text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Attribute {
    /// Product category (laptop, monitor, ...)
    Kind,
    Model,
    ProcessorBrand,
    Processor,
    Ram,
    Storage,
    Gpu,
    Screen,
    Color,
    Os,
}

impl Attribute {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Kind => "type",
            Self::Model => "model",
            Self::ProcessorBrand => "processor_brand",
            Self::Processor => "processor",
            Self::Ram => "ram",
            Self::Storage => "storage",
            Self::Gpu => "gpu",
            Self::Screen => "screen",
            Self::Color => "color",
            Self::Os => "os",
        }
    }
}

/// How a rule finds its value in the text
enum Matcher {
    /// First match of a single pattern
    First(Regex),

    /// First capacity mention NOT followed by a storage-medium qualifier.
    ///
    /// A bare "16 Go" is memory; "512 Go SSD" is storage. The medium
    /// qualifier immediately after the capacity is the single deterministic
    /// signal separating the two.
    CapacityWithoutMedium { capacity: Regex, medium: Regex },
}

impl Matcher {
    fn apply(&self, text: &str) -> Option<String> {
        match self {
            Self::First(pattern) => pattern.find(text).map(|m| m.as_str().trim().to_string()),
            Self::CapacityWithoutMedium { capacity, medium } => {
                for m in capacity.find_iter(text) {
                    let tail = text[m.end()..].trim_start();
                    if !medium.is_match(tail) {
                        return Some(m.as_str().trim().to_string());
                    }
                }
                None
            }
        }
    }
}

/// One (attribute, matcher) pair of the registry
struct Rule {
    attribute: Attribute,
    matcher: Matcher,
}

/// The ordered, immutable rule registry
pub struct RuleSet {
    rules: Vec<Rule>,
}

/// Category used when no kind rule matches non-empty text
pub const DEFAULT_KIND: &str = "PC Portable";

impl RuleSet {
    /// Compiles the fixed rule table
    ///
    /// The patterns are constants; compilation cannot fail, so failures here
    /// are programming errors and panic at construction.
    pub fn new() -> Self {
        let first = |attribute, pattern: &str| Rule {
            attribute,
            matcher: Matcher::First(
                Regex::new(pattern).unwrap_or_else(|e| panic!("bad pattern for rule: {e}")),
            ),
        };

        let rules = vec![
            first(
                Attribute::Kind,
                r"(?i)\b(?:PC Portable|Écran Gaming|Portable|Moniteur|Laptop|Notebook|MacBook)\b",
            ),
            first(
                Attribute::Model,
                r"(?i)\b(?:HP|Dell|Lenovo|Asus|Acer|MSI|Apple)(?:\s+[A-Za-z0-9][\w\-]*){1,3}",
            ),
            first(Attribute::ProcessorBrand, r"(?i)\b(?:Intel|AMD|Apple)\b"),
            first(
                Attribute::Processor,
                r"(?i)\b(?:Intel|AMD|Apple)\s+(?:Core\s+(?:Ultra\s+)?\w+(?:-\w+)?|Ryzen\s+\d+\w*|M\d+|Celeron|Pentium|Athlon)(?:\s+[0-9]*[A-Za-z][\w\-]*)?",
            ),
            Rule {
                attribute: Attribute::Ram,
                matcher: Matcher::CapacityWithoutMedium {
                    capacity: Regex::new(r"(?i)\b\d+\s*(?:Go|GB)\b").unwrap(),
                    medium: Regex::new(r"(?i)^(?:SSD|HDD|NVMe|PCIe|M\.2|eMMC)\b").unwrap(),
                },
            },
            first(
                Attribute::Storage,
                r"(?i)\b\d+\s*(?:Go|GB|To|TB)\s*(?:SSD|HDD|NVMe|PCIe|M\.2|eMMC)\b",
            ),
            first(
                Attribute::Gpu,
                r"(?i)\b(?:RTX\s*\d+\s*[A-Za-z]*|GTX\s*\d+\s*[A-Za-z]*|Intel\s+Iris\s+Xe?|Intel\s+UHD\s+Graphics|Radeon\s+\w+|NVIDIA\s+GeForce\s+MX\d+)(?:\s*\d+\s*Go)?",
            ),
            first(
                Attribute::Screen,
                r#"(?i)\b\d{2}(?:\.\d+)?\s*(?:"|''|pouces?|inch|cm|Full\s*HD|FHD|QHD|4K)"#,
            ),
            first(
                Attribute::Color,
                r"(?i)\b(?:Gris|Silver|Bleu|Noir|Gold|Rose|Rouge|Vert|Blanc)\b",
            ),
            first(
                Attribute::Os,
                r"(?i)(?:\bWindows\s*\d+(?:\s+(?:Pro|Home|Famille|Enterprise))?|\bmacOS\b|\bLinux\b|\bUbuntu\b|\bFreeDOS\b|\bChromeOS\b)",
            ),
        ];

        Self { rules }
    }

    /// Applies every rule to the text in registry order
    ///
    /// Yields `(attribute, first_match)` pairs; unmatched rules yield `None`.
    pub fn apply<'a>(
        &'a self,
        text: &'a str,
    ) -> impl Iterator<Item = (Attribute, Option<String>)> + 'a {
        self.rules
            .iter()
            .map(move |rule| (rule.attribute, rule.matcher.apply(text)))
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::new()
    }
}
