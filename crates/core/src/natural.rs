//! Natural ("human") ordering for chapter URLs.
//!
//! Plain string ordering puts `chapter-10` before `chapter-2`. A
//! [`NaturalKey`] splits a string on runs of ASCII digits so that numeric
//! runs compare by value and everything else compares case-insensitively.
//!
//! # Example
//!
//! ```rust
//! use serialbook_core::natural::sort_natural;
//!
//! let mut links = vec!["c10", "c2", "c1"];
//! sort_natural(&mut links);
//! assert_eq!(links, ["c1", "c2", "c10"]);
//! ```

use std::cmp::Ordering;
use std::sync::LazyLock;

use regex::Regex;

static DIGIT_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[0-9]+").unwrap());

/// One segment of a [`NaturalKey`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyPart {
    /// Lowercased non-digit run (may be empty).
    Text(String),
    /// Digit run with leading zeros stripped, compared by numeric value.
    Number(String),
}

impl Ord for KeyPart {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (KeyPart::Text(a), KeyPart::Text(b)) => a.cmp(b),
            // Digits were stripped of leading zeros, so a longer run is a larger number.
            (KeyPart::Number(a), KeyPart::Number(b)) => a.len().cmp(&b.len()).then_with(|| a.cmp(b)),
            (KeyPart::Number(_), KeyPart::Text(_)) => Ordering::Less,
            (KeyPart::Text(_), KeyPart::Number(_)) => Ordering::Greater,
        }
    }
}

impl PartialOrd for KeyPart {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Comparable key that orders embedded numbers numerically.
///
/// Keys always alternate `Text, Number, Text, ...` starting with a text
/// segment, so two keys built from strings with the same template line up
/// segment for segment.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct NaturalKey(Vec<KeyPart>);

impl NaturalKey {
    pub fn parts(&self) -> &[KeyPart] {
        &self.0
    }
}

/// Builds the natural sort key for `s`.
pub fn natural_key(s: &str) -> NaturalKey {
    let mut parts = Vec::new();
    let mut last = 0;

    for run in DIGIT_RUN.find_iter(s) {
        parts.push(KeyPart::Text(s[last..run.start()].to_lowercase()));
        let digits = run.as_str().trim_start_matches('0');
        parts.push(KeyPart::Number(if digits.is_empty() { "0".to_string() } else { digits.to_string() }));
        last = run.end();
    }
    parts.push(KeyPart::Text(s[last..].to_lowercase()));

    NaturalKey(parts)
}

/// Sorts `items` in natural order. The sort is stable.
pub fn sort_natural<T: AsRef<str>>(items: &mut [T]) {
    items.sort_by_cached_key(|item| natural_key(item.as_ref()));
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_numbers_compare_by_value() {
        let mut items = vec!["c10", "c2", "c1"];
        sort_natural(&mut items);
        assert_eq!(items, vec!["c1", "c2", "c10"]);
    }

    #[test]
    fn test_key_alternates_text_and_number() {
        let key = natural_key("Chapter-12");
        assert_eq!(
            key.parts(),
            &[
                KeyPart::Text("chapter-".to_string()),
                KeyPart::Number("12".to_string()),
                KeyPart::Text(String::new()),
            ]
        );
    }

    #[test]
    fn test_leading_digits_start_with_empty_text() {
        let key = natural_key("7up");
        assert_eq!(key.parts()[0], KeyPart::Text(String::new()));
        assert_eq!(key.parts()[1], KeyPart::Number("7".to_string()));
    }

    #[rstest]
    #[case("chapter-2", "chapter-10")]
    #[case("https://x.test/novels/a/chapter-9", "https://x.test/novels/a/chapter-10")]
    #[case("Chapter-1", "chapter-2")]
    #[case("c1", "c1-part-2")]
    #[case("c0", "c00001")]
    #[case("v1/c99999999999999999999999", "v1/c100000000000000000000000")]
    fn test_natural_order(#[case] lower: &str, #[case] higher: &str) {
        assert!(natural_key(lower) < natural_key(higher), "{lower} should sort before {higher}");
    }

    #[test]
    fn test_case_is_ignored() {
        assert_eq!(natural_key("CHAPTER-3"), natural_key("chapter-3"));
    }

    #[test]
    fn test_leading_zeros_compare_equal_and_sort_stays_stable() {
        let mut items = vec!["c01", "c1", "c001"];
        sort_natural(&mut items);
        assert_eq!(items, vec!["c01", "c1", "c001"]);
    }

    #[test]
    fn test_cross_kind_comparison_is_total() {
        assert!(KeyPart::Number("10".to_string()) < KeyPart::Text("a".to_string()));
    }

    #[test]
    fn test_sort_owned_strings() {
        let mut links: Vec<String> = ["s/chapter-11", "s/chapter-3", "s/chapter-1"]
            .into_iter()
            .map(String::from)
            .collect();
        sort_natural(&mut links);
        assert_eq!(links, vec!["s/chapter-1", "s/chapter-3", "s/chapter-11"]);
    }
}
