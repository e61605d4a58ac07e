//! Error types for the dictionary service.

use thiserror::Error;

/// The primary error type for all operations in this crate.
#[derive(Debug, Error)]
pub enum DictionaryError {
    /// An error originating from I/O on the backing file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The dictionary names an encoding the catalogue does not know.
    #[error("unknown encoding: {0}")]
    UnknownEncoding(String),

    /// The dictionary names a language the catalogue does not know.
    #[error("unknown language: {0}")]
    UnknownLanguage(String),

    /// The byte content does not match the dictionary's encoding.
    #[error("content does not match the {encoding} encoding: matched {ratio:.3} of bytes, required {required:.3}")]
    WrongEncoding {
        encoding: String,
        ratio: f64,
        required: f64,
    },

    /// Too few key characters belong to the key language.
    #[error("key characters do not match the key language: matched {ratio:.3}, required {required:.3}")]
    WrongKeyLanguage { ratio: f64, required: f64 },

    /// Too few word characters belong to the word language.
    #[error("word characters do not match the word language: matched {ratio:.3}, required {required:.3}")]
    WrongWordLanguage { ratio: f64, required: f64 },

    /// A record operation was attempted before a dictionary was bound.
    #[error("no dictionary is bound")]
    NoDictionary,
}

/// A convenience `Result` type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, DictionaryError>;
