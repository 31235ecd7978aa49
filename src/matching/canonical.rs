use regex::Regex;

use crate::core::record::RawRecord;

/// Words matching this end the canonical name: anything holding an
/// ASCII uppercase letter, or a lone ASCII digit.
pub const DEFAULT_QUALIFIER_PATTERN: &str = r".*[A-Z].*|[0-9]";

/// Reduces organism annotations to a binomial-style join key.
///
/// The first word is always kept. Following words are appended until one
/// matches the qualifier pattern (strain codes, serotypes, numeric tags), so
/// `Escherichia coli K-12` and `Escherichia coli O157:H7` share the key
/// `Escherichia coli`.
#[derive(Debug, Clone)]
pub struct NameCanonicalizer {
    qualifier: Regex,
}

impl NameCanonicalizer {
    /// Canonicalizer using [`DEFAULT_QUALIFIER_PATTERN`]
    ///
    /// # Errors
    ///
    /// Returns an error only if the built-in pattern fails to compile.
    pub fn new() -> Result<Self, regex::Error> {
        Self::with_pattern(DEFAULT_QUALIFIER_PATTERN)
    }

    /// Canonicalizer with a custom qualifier pattern.
    ///
    /// The pattern must match the whole word to count as a qualifier.
    ///
    /// # Errors
    ///
    /// Returns the regex compile error for an invalid pattern.
    pub fn with_pattern(pattern: &str) -> Result<Self, regex::Error> {
        let qualifier = Regex::new(&format!("^(?:{pattern})$"))?;
        Ok(Self { qualifier })
    }

    /// Whether `word` terminates the canonical name
    #[must_use]
    pub fn is_qualifier(&self, word: &str) -> bool {
        self.qualifier.is_match(word)
    }

    /// Canonical key for an annotation. Words are split on single spaces.
    #[must_use]
    pub fn canonicalize(&self, annotation: &str) -> String {
        let mut words = annotation.split(' ');
        let mut name = words.next().unwrap_or_default().to_string();

        for word in words {
            if self.is_qualifier(word) {
                break;
            }
            name.push(' ');
            name.push_str(word);
        }

        name
    }

    /// Canonical key for a record; the empty string when it has no annotation
    #[must_use]
    pub fn canonical_name(&self, record: &RawRecord<'_>) -> String {
        record
            .annotation()
            .map(|a| self.canonicalize(a))
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canon() -> NameCanonicalizer {
        NameCanonicalizer::new().unwrap()
    }

    #[test]
    fn test_binomial_kept_whole() {
        assert_eq!(canon().canonicalize("Escherichia coli"), "Escherichia coli");
        assert_eq!(
            canon().canonicalize("Bacillus subtilis subsp. spizizenii"),
            "Bacillus subtilis subsp. spizizenii"
        );
    }

    #[test]
    fn test_first_word_always_kept() {
        assert_eq!(canon().canonicalize("Escherichia"), "Escherichia");
        assert_eq!(canon().canonicalize("HIV 1"), "HIV");
        assert_eq!(canon().canonicalize("7 bacterium"), "7 bacterium");
    }

    #[test]
    fn test_strain_qualifiers_dropped() {
        let c = canon();
        assert_eq!(c.canonicalize("Escherichia coli K-12"), "Escherichia coli");
        assert_eq!(c.canonicalize("Escherichia coli O157:H7 str. Sakai"), "Escherichia coli");
        assert_eq!(
            c.canonicalize("Escherichia coli K-12"),
            c.canonicalize("Escherichia coli BL21 strain")
        );
    }

    #[test]
    fn test_scan_stops_at_first_qualifier() {
        // "str." would be kept on its own but follows a qualifier
        assert_eq!(canon().canonicalize("Salmonella enterica LT2 str. x"), "Salmonella enterica");
    }

    #[test]
    fn test_single_digit_is_qualifier() {
        let c = canon();
        assert_eq!(c.canonicalize("Bacillus sp. 2"), "Bacillus sp.");
        assert!(c.is_qualifier("7"));
        assert!(!c.is_qualifier("12"));
        assert!(!c.is_qualifier("a1"));
        assert_eq!(c.canonicalize("Bacillus sp. 12"), "Bacillus sp. 12");
    }

    #[test]
    fn test_non_ascii_digit_is_not_qualifier() {
        let c = canon();
        assert!(!c.is_qualifier("\u{0663}"));
        assert_eq!(c.canonicalize("Bacillus sp. \u{0663}"), "Bacillus sp. \u{0663}");
    }

    #[test]
    fn test_uppercase_anywhere_is_qualifier() {
        let c = canon();
        assert!(c.is_qualifier("K-12"));
        assert!(c.is_qualifier("strainX"));
        assert!(!c.is_qualifier("coli"));
        assert!(!c.is_qualifier(""));
    }

    #[test]
    fn test_double_spaces_produce_empty_words() {
        assert_eq!(canon().canonicalize("Homo  sapiens"), "Homo  sapiens");
    }

    #[test]
    fn test_empty_annotation() {
        assert_eq!(canon().canonicalize(""), "");
    }

    #[test]
    fn test_canonical_name_from_record() {
        let c = canon();
        let record = RawRecord::new("WP_1 gyrase [Escherichia coli K-12]MKV");
        assert_eq!(c.canonical_name(&record), "Escherichia coli");

        let record = RawRecord::new("WP_2 gyrase MKV");
        assert_eq!(c.canonical_name(&record), "");
    }

    #[test]
    fn test_custom_pattern_matches_whole_word() {
        let c = NameCanonicalizer::with_pattern(r"str\.|sp\.").unwrap();
        assert_eq!(c.canonicalize("Bacillus sp. 2"), "Bacillus");
        assert_eq!(c.canonicalize("Bacillus spp. K"), "Bacillus spp. K");
    }

    #[test]
    fn test_invalid_custom_pattern() {
        assert!(NameCanonicalizer::with_pattern("(unclosed").is_err());
    }
}
