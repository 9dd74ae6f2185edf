//! Description cleaning.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Embedded rate fragments: standalone 5-6 digit runs
    static ref RATE_FRAGMENT: Regex = Regex::new(r"\b\d{5,6}\b").unwrap();
}

/// Strip price-like and rate-adjacent noise from a raw description.
///
/// Standalone rate-sized numbers go; short numeric specification fragments
/// ("9.5", "99.7%") stay. The result may be empty - callers check length
/// before accepting it.
pub fn clean_description(raw: &str) -> String {
    let without_rates = RATE_FRAGMENT.replace_all(raw, "");
    let without_large = strip_anchored_numbers(&without_rates);
    let collapsed = without_large
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    collapsed.trim_matches([' ', '.', '-', '_'].as_slice()).to_string()
}

/// Remove digit runs of four or more that start at a word boundary and end
/// at whitespace or end of input.
///
/// The trailing anchor keeps digits glued to a following fragment
/// ("1234mm") intact while dropping residual standalone numbers.
fn strip_anchored_numbers(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut i = 0;

    while i < chars.len() {
        if chars[i].is_ascii_digit() {
            let start = i;
            while i < chars.len() && chars[i].is_ascii_digit() {
                i += 1;
            }
            let boundary_before = start == 0 || !is_word_char(chars[start - 1]);
            let anchored_after = i == chars.len() || chars[i].is_whitespace();
            if i - start >= 4 && boundary_before && anchored_after {
                continue;
            }
            out.extend(&chars[start..i]);
        } else {
            out.push(chars[i]);
            i += 1;
        }
    }

    out
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_removes_rate_fragments() {
        assert_eq!(clean_description("Ingot 99.7% purity 249500"), "Ingot 99.7% purity");
        assert_eq!(clean_description("EC Grade 265000 Wire Rod"), "EC Grade Wire Rod");
    }

    #[test]
    fn test_preserves_specifications() {
        assert_eq!(clean_description("Wire Rod 9.5 mm"), "Wire Rod 9.5 mm");
        assert_eq!(clean_description("Alloy 61% min"), "Alloy 61% min");
    }

    #[test]
    fn test_removes_anchored_large_numbers() {
        // four digits, standalone
        assert_eq!(clean_description("Billet Grade 6063"), "Billet Grade");
        // seven digits escape the 5-6 digit pass but not this one
        assert_eq!(clean_description("Slab 1234567"), "Slab");
    }

    #[test]
    fn test_keeps_numbers_glued_to_text() {
        assert_eq!(clean_description("Coil 1234mm wide"), "Coil 1234mm wide");
    }

    #[test]
    fn test_collapses_whitespace_and_trims() {
        assert_eq!(clean_description("  Cast  Bar .- "), "Cast Bar");
        assert_eq!(clean_description("_Sow Ingot_"), "Sow Ingot");
    }

    #[test]
    fn test_may_produce_empty_result() {
        assert_eq!(clean_description("249500"), "");
        assert_eq!(clean_description("   "), "");
    }

    #[test]
    fn test_idempotent() {
        for raw in [
            "Ingot 99.7% purity 249500",
            "Wire Rod 9.5 mm",
            "  Cast  Bar .- ",
            "Billet Grade 6063",
        ] {
            let once = clean_description(raw);
            assert_eq!(clean_description(&once), once);
        }
    }
}
