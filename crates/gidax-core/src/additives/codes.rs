use regex::Regex;
use std::collections::BTreeSet;
use std::sync::LazyLock;

static CODE_IN_TEXT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)E(\d{3})([a-z])?").expect("additive code pattern is valid")
});

static CODE_EXACT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^E\d{3}[A-Z]?$").expect("additive code pattern is valid"));

/// Scan free ingredient text for E-codes such as "E322", "e471" or "E472a".
///
/// An `E` followed by three digits and an optional letter matches anywhere,
/// with no separators and no word boundaries. Codes are normalized to
/// uppercase and deduplicated.
pub fn extract_codes(text: &str) -> BTreeSet<String> {
    CODE_IN_TEXT
        .captures_iter(text)
        .map(|caps| {
            let suffix = caps.get(2).map(|m| m.as_str()).unwrap_or("");
            format!("E{}{}", &caps[1], suffix).to_uppercase()
        })
        .collect()
}

/// Union of explicitly listed and extracted codes.
pub fn merge_codes(explicit: &BTreeSet<String>, extracted: &BTreeSet<String>) -> BTreeSet<String> {
    explicit.union(extracted).cloned().collect()
}

/// Uppercase and strip separators: "e 472-a" -> "E472A".
pub fn normalize_code(code: &str) -> String {
    code.chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .flat_map(char::to_uppercase)
        .collect()
}

/// True for a normalized code of the form `E` + 3 digits + optional letter.
pub fn is_valid_code(code: &str) -> bool {
    CODE_EXACT.is_match(code)
}
