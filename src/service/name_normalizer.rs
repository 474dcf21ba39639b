use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Derive the corporate address `first.last@domain` from a display name.
///
/// Only names made of exactly two whitespace-separated tokens qualify;
/// anything else yields `None`. The result is lowercased and stripped of
/// accents.
pub fn corporate_email(display_name: &str, domain: &str) -> Option<String> {
    let mut tokens = display_name.split_whitespace();
    let (Some(first), Some(last), None) = (tokens.next(), tokens.next(), tokens.next()) else {
        return None;
    };
    let local = format!("{first}.{last}").to_lowercase();
    Some(strip_accents(&format!("{local}@{domain}")))
}

/// Decompose, drop combining marks, recompose.
pub fn strip_accents(s: &str) -> String {
    s.nfd().filter(|c| !is_combining_mark(*c)).nfc().collect()
}
