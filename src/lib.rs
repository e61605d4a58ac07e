//! # wordbook
//!
//! A flat-file translation dictionary backed by byte-level encoding
//! classification and alphabet membership checks.
//!
//! Dictionary files are newline-delimited `key<separator>word` records. A
//! dictionary binds only after its bytes pass the encoding check and its
//! keys and words pass their language checks; record operations then work
//! against the loaded set with an eager or lazy write-back policy.
pub mod dictionary;

// Re-export the main types for convenience
pub use dictionary::{
    catalog::Catalog,
    error::{DictionaryError, Result},
    models::{Dictionary, DictionaryRecord, PersistenceMode, DEFAULT_SEPARATOR},
    DictionaryService,
};
