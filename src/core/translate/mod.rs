//! Machine translation of property files.
//!
//! - `Translate`: the translation capability (text + ISO code -> text)
//! - `HttpTranslator`: the web translation endpoint
//! - `FallbackDictionary`: static phrases used when the service fails
//! - `LocaleTranslator`: translates a whole property file into one locale

mod fallback;
mod http;
mod translator;

pub use fallback::FallbackDictionary;
pub use http::{DEFAULT_ENDPOINT, HttpTranslator};
pub use translator::{
    FileReport, LocaleTranslator, RequestDelay, TranslatorOptions, target_file_path,
};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TranslateError {
    #[error("translation request failed: {0}")]
    Network(#[from] reqwest::Error),
    #[error("translation service returned HTTP {0}")]
    Status(u16),
    #[error("malformed translation response: {0}")]
    MalformedResponse(String),
    #[error("no translation available for \"{text}\" ({language})")]
    Unavailable { text: String, language: String },
}

impl TranslateError {
    /// Errors worth another attempt after a pause.
    pub fn is_transient(&self) -> bool {
        match self {
            TranslateError::Network(_) => true,
            TranslateError::Status(code) => *code == 429 || *code >= 500,
            TranslateError::MalformedResponse(_) | TranslateError::Unavailable { .. } => false,
        }
    }
}

/// Translates plain text into the language with the given ISO-639 code.
pub trait Translate {
    fn translate(&self, text: &str, target_language: &str) -> Result<String, TranslateError>;
}

impl<T: Translate + ?Sized> Translate for &T {
    fn translate(&self, text: &str, target_language: &str) -> Result<String, TranslateError> {
        (**self).translate(text, target_language)
    }
}
