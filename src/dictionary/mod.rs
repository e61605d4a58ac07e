//! Core dictionary service module

pub mod catalog;
pub mod encoding;
pub mod error;
pub mod language;
pub mod models;
pub mod storage;
pub mod template;
pub mod utils;

use log::{debug, info, warn};

use catalog::Catalog;
use encoding::{Encoding, MINIMAL_BYTE_MATCH_RATIO};
use language::MINIMAL_SYMBOL_MATCH_RATIO;
use models::{Dictionary, DictionaryRecord, PersistenceMode};
pub use error::{DictionaryError, Result};

/// Streams at or below this many bytes are too small for a meaningful
/// byte-level encoding check and go straight to the language checks.
const ENCODING_SAMPLE_MIN_LEN: usize = 20;

/// The record store over one dictionary file.
///
/// A service starts without a dictionary. [`bind`](Self::bind) validates and
/// loads one; a failed bind leaves the service without a dictionary again.
/// Record operations mutate the in-memory set and, in eager mode, rewrite
/// the backing file immediately.
pub struct DictionaryService {
    catalog: Catalog,
    mode: PersistenceMode,
    bound: Option<BoundDictionary>,
}

/// Resolved schema plus the loaded records of a bound dictionary.
struct BoundDictionary {
    dictionary: Dictionary,
    encoding: Encoding,
    records: Vec<DictionaryRecord>,
}

impl DictionaryService {
    pub fn new(catalog: Catalog, mode: PersistenceMode) -> Self {
        Self {
            catalog,
            mode,
            bound: None,
        }
    }

    /// Whether a dictionary is currently bound.
    pub fn is_bound(&self) -> bool {
        self.bound.is_some()
    }

    /// The schema of the bound dictionary.
    pub fn dictionary(&self) -> Option<&Dictionary> {
        self.bound.as_ref().map(|bound| &bound.dictionary)
    }

    /// The loaded records, in insertion order. Empty when nothing is bound.
    pub fn records(&self) -> &[DictionaryRecord] {
        self.bound
            .as_ref()
            .map(|bound| bound.records.as_slice())
            .unwrap_or(&[])
    }

    /// Validate and load a dictionary file.
    ///
    /// # Errors
    /// Returns an error if:
    /// - the encoding or a language name is not in the catalogue (checked
    ///   before any I/O)
    /// - the file cannot be read
    /// - the byte content fails the encoding check (streams above the
    ///   minimal sample size only)
    /// - too few key or word characters belong to their language
    ///
    /// Any failure leaves the service with no dictionary bound.
    pub fn bind(&mut self, dictionary: Dictionary) -> Result<()> {
        self.bound = None;

        let encoding = self
            .catalog
            .encoding(&dictionary.encoding)
            .ok_or_else(|| DictionaryError::UnknownEncoding(dictionary.encoding.clone()))?
            .clone();
        let key_language = self
            .catalog
            .language(&dictionary.key_language)
            .ok_or_else(|| DictionaryError::UnknownLanguage(dictionary.key_language.clone()))?
            .clone();
        let word_language = self
            .catalog
            .language(&dictionary.word_language)
            .ok_or_else(|| DictionaryError::UnknownLanguage(dictionary.word_language.clone()))?
            .clone();

        let bytes = storage::read_all(&dictionary.path)?;

        if bytes.len() > ENCODING_SAMPLE_MIN_LEN {
            let ratio = encoding.match_ratio(&bytes);
            if ratio < MINIMAL_BYTE_MATCH_RATIO {
                return Err(DictionaryError::WrongEncoding {
                    encoding: dictionary.encoding.clone(),
                    ratio,
                    required: MINIMAL_BYTE_MATCH_RATIO,
                });
            }
        } else {
            debug!(
                "{} byte sample too small for encoding validation, skipping",
                bytes.len()
            );
        }

        let text = encoding.decode(&bytes);
        let mut records: Vec<DictionaryRecord> = Vec::new();
        let mut key_total = 0usize;
        let mut key_matches = 0usize;
        let mut word_total = 0usize;
        let mut word_matches = 0usize;

        for line in text.lines() {
            if line.is_empty() {
                continue;
            }
            let Some((key, word)) = line.split_once(dictionary.separator.as_str()) else {
                warn!(
                    "skipping line without separator {:?}: {:?}",
                    dictionary.separator, line
                );
                continue;
            };
            if key.is_empty() {
                warn!("skipping record with an empty key: {:?}", line);
                continue;
            }
            key_total += key.chars().count();
            word_total += word.chars().count();
            key_matches += key_language.count_of_matches(key, &encoding);
            word_matches += word_language.count_of_matches(word, &encoding);
            if let Some(existing) = records.iter_mut().find(|record| record.key == key) {
                warn!("duplicate key {:?}, keeping the later occurrence", key);
                existing.word = word.to_string();
            } else {
                records.push(DictionaryRecord::new(key, word));
            }
        }

        // Zero characters cannot mismatch; the ratio checks only apply to
        // non-empty totals.
        if key_total > 0 {
            let ratio = key_matches as f64 / key_total as f64;
            if ratio < MINIMAL_SYMBOL_MATCH_RATIO {
                return Err(DictionaryError::WrongKeyLanguage {
                    ratio,
                    required: MINIMAL_SYMBOL_MATCH_RATIO,
                });
            }
        }
        if word_total > 0 {
            let ratio = word_matches as f64 / word_total as f64;
            if ratio < MINIMAL_SYMBOL_MATCH_RATIO {
                return Err(DictionaryError::WrongWordLanguage {
                    ratio,
                    required: MINIMAL_SYMBOL_MATCH_RATIO,
                });
            }
        }

        info!(
            "dictionary bound: {} records from {}",
            records.len(),
            dictionary.path.display()
        );
        self.bound = Some(BoundDictionary {
            dictionary,
            encoding,
            records,
        });
        Ok(())
    }

    /// Insert a record.
    ///
    /// Existing keys keep their word; empty keys and fields containing the
    /// separator are rejected. All outcomes trigger the persistence hook.
    pub fn create(&mut self, record: DictionaryRecord) -> Result<()> {
        let bound = self.bound.as_mut().ok_or(DictionaryError::NoDictionary)?;
        let separator = bound.dictionary.separator.as_str();
        if record.key.is_empty() {
            warn!("ignoring record with an empty key");
        } else if record.key.contains(separator) || record.word.contains(separator) {
            warn!(
                "ignoring record {:?}: fields may not contain the separator",
                record.key
            );
        } else if bound.records.iter().any(|existing| existing.key == record.key) {
            debug!("create ignored, key {:?} already present", record.key);
        } else {
            bound.records.push(record);
        }
        self.finalize()
    }

    /// Look up a record by key.
    pub fn read(&self, key: &str) -> Result<Option<&DictionaryRecord>> {
        let bound = self.bound.as_ref().ok_or(DictionaryError::NoDictionary)?;
        Ok(bound.records.iter().find(|record| record.key == key))
    }

    /// Replace the word of the record with the given key, when present.
    pub fn update(&mut self, key: &str, new_word: &str) -> Result<()> {
        let bound = self.bound.as_mut().ok_or(DictionaryError::NoDictionary)?;
        if new_word.contains(bound.dictionary.separator.as_str()) {
            warn!(
                "ignoring update of {:?}: the word may not contain the separator",
                key
            );
        } else if let Some(record) = bound.records.iter_mut().find(|record| record.key == key) {
            record.word = new_word.to_string();
        }
        self.finalize()
    }

    /// Remove the record with the given key, when present.
    pub fn delete(&mut self, key: &str) -> Result<()> {
        let bound = self.bound.as_mut().ok_or(DictionaryError::NoDictionary)?;
        bound.records.retain(|record| record.key != key);
        self.finalize()
    }

    /// Serialize the record set to the backing file, regardless of mode.
    ///
    /// In lazy mode this is the only way changes reach the disk.
    pub fn flush(&self) -> Result<()> {
        let bound = self.bound.as_ref().ok_or(DictionaryError::NoDictionary)?;
        let lines: Vec<String> = bound
            .records
            .iter()
            .map(|record| record.render(&bound.dictionary.separator))
            .collect();
        storage::write_all(&bound.dictionary.path, &bound.encoding, &lines)
    }

    fn finalize(&self) -> Result<()> {
        match self.mode {
            PersistenceMode::Eager => self.flush(),
            PersistenceMode::Lazy => Ok(()),
        }
    }
}
