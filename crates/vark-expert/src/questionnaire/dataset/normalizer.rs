/// Strips byte-order marks and zero-width characters, then trims.
pub(crate) fn normalize_code(value: &str) -> String {
    value
        .replace(['\u{feff}', '\u{200b}', '\u{200c}', '\u{200d}'], "")
        .trim()
        .to_string()
}

pub(crate) fn normalize_header(value: &str) -> String {
    normalize_code(value).to_ascii_lowercase()
}

/// Collapses internal whitespace runs in free text.
pub(crate) fn normalize_text(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}
