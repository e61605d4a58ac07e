//! Data structures shared by the dictionary service.

use std::path::{Path, PathBuf};

/// Default key/word separator in serialized dictionary lines.
pub const DEFAULT_SEPARATOR: &str = " ";

/// When mutations are written back to the backing file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersistenceMode {
    /// Rewrite the backing file after every mutating operation.
    Eager,
    /// Keep mutations in memory until an explicit flush.
    Lazy,
}

/// The schema of one dictionary file: where it lives, how its bytes are
/// encoded, which alphabets its keys and words use, and the separator
/// between them.
///
/// Encoding and languages are referenced by catalogue name and resolved when
/// the dictionary is bound to a service.
#[derive(Debug, Clone)]
pub struct Dictionary {
    pub path: PathBuf,
    pub encoding: String,
    pub key_language: String,
    pub word_language: String,
    pub separator: String,
}

impl Dictionary {
    pub fn new(
        path: impl AsRef<Path>,
        encoding: &str,
        key_language: &str,
        word_language: &str,
    ) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            encoding: encoding.to_string(),
            key_language: key_language.to_string(),
            word_language: word_language.to_string(),
            separator: DEFAULT_SEPARATOR.to_string(),
        }
    }

    /// Replace the separator.
    ///
    /// # Panics
    /// Panics on an empty separator; serialized lines could not be split
    /// back otherwise.
    pub fn with_separator(mut self, separator: &str) -> Self {
        assert!(!separator.is_empty(), "separator must be non-empty");
        self.separator = separator.to_string();
        self
    }
}

/// One key/word pair of a dictionary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DictionaryRecord {
    pub key: String,
    pub word: String,
}

impl DictionaryRecord {
    pub fn new(key: &str, word: &str) -> Self {
        Self {
            key: key.to_string(),
            word: word.to_string(),
        }
    }

    /// The serialized line form: key, separator, word.
    pub fn render(&self, separator: &str) -> String {
        format!("{}{}{}", self.key, separator, self.word)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_render_as_separated_lines() {
        let record = DictionaryRecord::new("cat", "кот");
        assert_eq!(record.render(" "), "cat кот");
        assert_eq!(record.render(" -> "), "cat -> кот");
    }

    #[test]
    fn dictionaries_default_to_a_space_separator() {
        let dictionary = Dictionary::new("/tmp/words.dict", "UTF-8", "latin", "russian");
        assert_eq!(dictionary.separator, DEFAULT_SEPARATOR);
        let custom = dictionary.with_separator("::");
        assert_eq!(custom.separator, "::");
    }

    #[test]
    #[should_panic]
    fn empty_separators_are_rejected() {
        Dictionary::new("/tmp/words.dict", "UTF-8", "latin", "latin").with_separator("");
    }
}
