//! Language models: per-encoding codepoint intervals and membership ratios.

use log::trace;

use super::encoding::{Encoding, Symbol};

/// Minimal share of symbols that must belong to a language's alphabet for a
/// symbol group to be accepted as that language.
pub const MINIMAL_SYMBOL_MATCH_RATIO: f64 = 0.8;

/// Codepoints below this bound cover ASCII control characters, whitespace,
/// digits and basic punctuation. They are accepted for any language.
const ASCII_SERVICE_RANGE_END: u32 = 65;

/// Whether a codepoint falls in the always-accepted ASCII service range.
pub fn is_service_codepoint(value: u32) -> bool {
    value < ASCII_SERVICE_RANGE_END
}

/// The codepoint ranges of one language's alphabet within one encoding.
#[derive(Debug, Clone)]
pub struct EncodingIntervalTable {
    encoding_name: &'static str,
    intervals: Vec<(u32, u32)>,
}

impl EncodingIntervalTable {
    pub fn new(encoding_name: &'static str, intervals: Vec<(u32, u32)>) -> Self {
        Self {
            encoding_name,
            intervals,
        }
    }

    pub fn encoding_name(&self) -> &'static str {
        self.encoding_name
    }

    /// Inclusive-interval membership, with the service range accepted
    /// regardless of the alphabet.
    pub fn contains(&self, codepoint: u32) -> bool {
        self.intervals
            .iter()
            .any(|&(low, high)| codepoint >= low && codepoint <= high)
            || is_service_codepoint(codepoint)
    }
}

/// A natural-language alphabet described per encoding.
#[derive(Debug, Clone)]
pub struct Language {
    name: &'static str,
    tables: Vec<EncodingIntervalTable>,
}

impl Language {
    /// # Panics
    /// Panics when two tables target the same encoding.
    pub fn new(name: &'static str, tables: Vec<EncodingIntervalTable>) -> Self {
        for (index, table) in tables.iter().enumerate() {
            assert!(
                tables[..index]
                    .iter()
                    .all(|other| other.encoding_name() != table.encoding_name()),
                "{}: duplicate interval table for encoding {}",
                name,
                table.encoding_name()
            );
        }
        Self { name, tables }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The interval table for an encoding, when the language defines one.
    pub fn table_for(&self, encoding: &Encoding) -> Option<&EncodingIntervalTable> {
        self.tables
            .iter()
            .find(|table| table.encoding_name() == encoding.name())
    }

    /// Share of symbols whose decoded codepoint belongs to this language
    /// under the given encoding.
    ///
    /// Without an interval table for the encoding every symbol is a
    /// non-match, as are symbols the encoding cannot decode. Empty input is
    /// vacuously 1.0.
    pub fn match_ratio(&self, symbols: &[Symbol<'_>], encoding: &Encoding) -> f64 {
        if symbols.is_empty() {
            return 1.0;
        }
        let Some(table) = self.table_for(encoding) else {
            return 0.0;
        };
        let matched = symbols
            .iter()
            .filter(|symbol| {
                encoding
                    .codepoint_of(**symbol)
                    .is_some_and(|value| table.contains(value))
            })
            .count();
        matched as f64 / symbols.len() as f64
    }

    /// Whether at least `ratio` of the symbols belong to this language.
    pub fn is_match(&self, symbols: &[Symbol<'_>], encoding: &Encoding, ratio: f64) -> bool {
        let matched = self.match_ratio(symbols, encoding);
        trace!(
            "{}: symbol match ratio {:.3} (required {:.3})",
            self.name,
            matched,
            ratio
        );
        matched >= ratio
    }

    /// Character-wise variant over already-decoded text: the number of
    /// characters whose scalar value belongs to this language under the
    /// given encoding.
    pub fn count_of_matches(&self, text: &str, encoding: &Encoding) -> usize {
        let Some(table) = self.table_for(encoding) else {
            return 0;
        };
        text.chars().filter(|c| table.contains(*c as u32)).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::catalog::Catalog;

    #[test]
    fn latin_counts_interval_and_service_characters() {
        let catalog = Catalog::builtin();
        let latin = catalog.language("latin").unwrap();
        let utf8 = catalog.encoding("UTF-8").unwrap();
        // the space is a service character
        assert_eq!(latin.count_of_matches("cat dog", utf8), 7);
        assert_eq!(latin.count_of_matches("кот", utf8), 0);
    }

    #[test]
    fn russian_has_no_table_for_ascii() {
        let catalog = Catalog::builtin();
        let russian = catalog.language("russian").unwrap();
        let ascii = catalog.encoding("ASCII").unwrap();
        assert!(russian.table_for(ascii).is_none());
        assert_eq!(russian.count_of_matches("кот", ascii), 0);
    }

    #[test]
    fn digits_and_punctuation_pass_any_language() {
        let catalog = Catalog::builtin();
        let russian = catalog.language("russian").unwrap();
        let utf8 = catalog.encoding("UTF-8").unwrap();
        assert_eq!(russian.count_of_matches("12, 34", utf8), 6);
    }

    #[test]
    fn symbol_ratio_counts_alphabet_and_service_members() {
        let catalog = Catalog::builtin();
        let latin = catalog.language("latin").unwrap();
        let ascii = catalog.encoding("ASCII").unwrap();
        // '[' is 91: outside both intervals and the service range
        let symbols = ascii.segment(b"cats[");
        assert_eq!(symbols.len(), 5);
        assert_eq!(latin.match_ratio(&symbols, ascii), 0.8);
        assert!(latin.is_match(&symbols, ascii, MINIMAL_SYMBOL_MATCH_RATIO));
    }

    #[test]
    fn missing_table_fails_every_symbol() {
        let catalog = Catalog::builtin();
        let russian = catalog.language("russian").unwrap();
        let ascii = catalog.encoding("ASCII").unwrap();
        let symbols = ascii.segment(b"cats");
        assert_eq!(russian.match_ratio(&symbols, ascii), 0.0);
    }

    #[test]
    fn empty_symbol_groups_match_vacuously() {
        let catalog = Catalog::builtin();
        let latin = catalog.language("latin").unwrap();
        let utf8 = catalog.encoding("UTF-8").unwrap();
        assert_eq!(latin.match_ratio(&[], utf8), 1.0);
    }
}
