//! Search-key normalization for ingredient names.
//!
//! Folds the Turkish letters a user is likely to type (or omit) so that
//! "seker", "Şeker" and "ŞEKER" all compare equal.

/// Combining dot above, left behind when `İ` is lowercased to `i̇`.
const COMBINING_DOT_ABOVE: char = '\u{0307}';

/// Lowercase `text` and fold Turkish letters to their ASCII counterparts.
///
/// Total and idempotent: `normalize_for_search(&normalize_for_search(x))`
/// equals `normalize_for_search(x)` for every input.
pub fn normalize_for_search(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .filter(|&c| c != COMBINING_DOT_ABOVE)
        .map(fold_char)
        .collect()
}

fn fold_char(c: char) -> char {
    match c {
        'ı' => 'i',
        'ğ' => 'g',
        'ü' => 'u',
        'ş' => 's',
        'ö' => 'o',
        'ç' => 'c',
        other => other,
    }
}
