//! Text normalization applied around extraction
//!
//! Price, stop-word, and canonical-label normalization live here, outside
//! the extractor itself: the extractor reports what the text says, the sink
//! decides how it is spelled in the store.

/// Strips every character except digits and numeric separators
///
/// "1,299.000 DT" becomes "1,299.000".
pub fn normalize_price(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == ',')
        .collect()
}

/// Replaces common Latin diacritics with their base letter
///
/// Covers the accented characters seen in French product names; anything
/// else passes through unchanged.
pub fn fold_diacritics(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            'à' | 'â' | 'ä' | 'á' => 'a',
            'é' | 'è' | 'ê' | 'ë' => 'e',
            'î' | 'ï' | 'í' => 'i',
            'ô' | 'ö' | 'ó' => 'o',
            'ù' | 'û' | 'ü' | 'ú' => 'u',
            'ç' => 'c',
            'À' | 'Â' | 'Ä' | 'Á' => 'A',
            'É' | 'È' | 'Ê' | 'Ë' => 'E',
            'Î' | 'Ï' | 'Í' => 'I',
            'Ô' | 'Ö' | 'Ó' => 'O',
            'Ù' | 'Û' | 'Ü' | 'Ú' => 'U',
            'Ç' => 'C',
            other => other,
        })
        .collect()
}

/// First whitespace-separated token, diacritic-stripped and lowercased
///
/// Used for the stop-word filter: an item named "Écran Samsung" with the
/// stop word "ecran" is skipped before any dedup or extraction cost.
pub fn first_token_folded(name: &str) -> String {
    name.split_whitespace()
        .next()
        .map(|token| fold_diacritics(token).to_lowercase())
        .unwrap_or_default()
}

/// Canonical display casing for processor brands
pub fn canonical_processor_brand(raw: &str) -> String {
    let trimmed = raw.trim();
    match trimmed.to_lowercase().as_str() {
        "intel" => "Intel".to_string(),
        "amd" => "AMD".to_string(),
        "apple" => "Apple".to_string(),
        _ => trimmed.to_string(),
    }
}

/// Collapses OS edition variants to one canonical label per major version
///
/// "Windows 11 Famille", "windows 11 home" and "Windows 11 Pro" all become
/// "Windows 11"; non-Windows families get their canonical spelling.
pub fn canonical_os(raw: &str) -> String {
    let trimmed = raw.trim();
    let lower = trimmed.to_lowercase();

    if let Some(rest) = lower.strip_prefix("windows") {
        let version: String = rest
            .trim_start()
            .chars()
            .take_while(|c| c.is_ascii_digit())
            .collect();
        if version.is_empty() {
            return "Windows".to_string();
        }
        return format!("Windows {}", version);
    }

    match lower.as_str() {
        "macos" => "macOS".to_string(),
        "linux" => "Linux".to_string(),
        "ubuntu" => "Ubuntu".to_string(),
        "freedos" => "FreeDOS".to_string(),
        "chromeos" => "ChromeOS".to_string(),
        _ => trimmed.to_string(),
    }
}
