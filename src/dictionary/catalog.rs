//! The built-in encoding and language catalogue.

use super::encoding::Encoding;
use super::language::{EncodingIntervalTable, Language};
use super::template::SymbolTemplate;

pub const UTF_8: &str = "UTF-8";
pub const UTF_16BE: &str = "UTF-16BE";
pub const ASCII: &str = "ASCII";

/// The immutable set of known encodings and languages.
///
/// Built once at startup and handed to every service; lookups never fall
/// back to global state.
#[derive(Debug, Clone)]
pub struct Catalog {
    encodings: Vec<Encoding>,
    languages: Vec<Language>,
}

impl Catalog {
    /// The built-in catalogue: UTF-8, UTF-16BE and ASCII encodings, and the
    /// latin, digits and russian alphabets.
    pub fn builtin() -> Self {
        let encodings = vec![
            Encoding::new(
                UTF_8,
                encoding_rs::UTF_8,
                vec![
                    SymbolTemplate::new("0xxxxxxx"),
                    SymbolTemplate::new("110xxxxx10xxxxxx"),
                    SymbolTemplate::new("1110xxxx10xxxxxx10xxxxxx"),
                    SymbolTemplate::new("11110xxx10xxxxxx10xxxxxx10xxxxxx"),
                ],
            ),
            Encoding::new(
                UTF_16BE,
                encoding_rs::UTF_16BE,
                vec![
                    SymbolTemplate::new("xxxxxxxxxxxxxxxx"),
                    // surrogate pair
                    SymbolTemplate::new("1101100xxxxxxxxx1101111xxxxxxxxx"),
                ],
            ),
            // Bytes decode through the windows-1252 superset, the WHATWG
            // meaning of the "ascii" label.
            Encoding::new(
                ASCII,
                encoding_rs::WINDOWS_1252,
                vec![SymbolTemplate::new("0xxxxxxx")],
            ),
        ];

        let latin = vec![(65, 90), (97, 122)];
        let digits = vec![(48, 57)];
        let russian = vec![(1040, 1103), (1025, 1025)];
        let languages = vec![
            Language::new(
                "latin",
                vec![
                    EncodingIntervalTable::new(UTF_8, latin.clone()),
                    EncodingIntervalTable::new(UTF_16BE, latin.clone()),
                    EncodingIntervalTable::new(ASCII, latin),
                ],
            ),
            Language::new(
                "digits",
                vec![
                    EncodingIntervalTable::new(UTF_8, digits.clone()),
                    EncodingIntervalTable::new(UTF_16BE, digits.clone()),
                    EncodingIntervalTable::new(ASCII, digits),
                ],
            ),
            Language::new(
                "russian",
                vec![
                    EncodingIntervalTable::new(UTF_8, russian.clone()),
                    EncodingIntervalTable::new(UTF_16BE, russian),
                ],
            ),
        ];

        Self {
            encodings,
            languages,
        }
    }

    /// Encoding lookup by name, ASCII case-insensitive.
    pub fn encoding(&self, name: &str) -> Option<&Encoding> {
        self.encodings
            .iter()
            .find(|encoding| encoding.name().eq_ignore_ascii_case(name))
    }

    /// Language lookup by name, ASCII case-insensitive.
    pub fn language(&self, name: &str) -> Option<&Language> {
        self.languages
            .iter()
            .find(|language| language.name().eq_ignore_ascii_case(name))
    }

    pub fn encodings(&self) -> &[Encoding] {
        &self.encodings
    }

    pub fn languages(&self) -> &[Language] {
        &self.languages
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_case_insensitive() {
        let catalog = Catalog::builtin();
        assert!(catalog.encoding("utf-8").is_some());
        assert!(catalog.encoding("UTF-16BE").is_some());
        assert!(catalog.language("LATIN").is_some());
        assert!(catalog.language("Russian").is_some());
    }

    #[test]
    fn unknown_names_yield_none() {
        let catalog = Catalog::builtin();
        assert!(catalog.encoding("KOI8-R").is_none());
        assert!(catalog.language("klingon").is_none());
    }

    #[test]
    fn builtin_catalogue_is_complete() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.encodings().len(), 3);
        assert_eq!(catalog.languages().len(), 3);
    }
}
