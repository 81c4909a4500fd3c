//! Translation service clients.
//!
//! # Architecture
//!
//! * [`Translator`]: the seam between rewriting and the remote service. A
//!   call either yields translated text or a [`TranslateError`]; clients
//!   never swallow failures themselves.
//! * [`google`]: blocking client for the Cloud Translation v2 REST API.
//! * [`translate_or_original`]: the fallback policy. A failed call is logged
//!   once at error level and the original text is used in its place, so a
//!   translation failure never aborts a file.
//!
//! There are no retries, no backoff and no rate limiting: every candidate
//! string is one independent request.

pub mod google;

pub use google::GoogleTranslator;

/// Errors returned by a translation client.
#[derive(thiserror::Error, Debug)]
pub enum TranslateError {
    /// The request could not be sent or the response could not be read.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("Translation service returned {status}: {message}")]
    Service {
        /// HTTP status code
        status: u16,
        /// Message from the service's error body, or the status reason
        message: String,
    },

    /// The service answered successfully but without a usable translation.
    #[error("Malformed translation response: {0}")]
    MalformedResponse(String),
}

/// A client able to translate one piece of text.
///
/// Implementations are shared across the worker pool, so they must be
/// `Send + Sync`.
pub trait Translator: Send + Sync {
    /// Translate `text` into `target_language` (a language code such as `da`).
    ///
    /// # Errors
    ///
    /// Returns [`TranslateError`] on any transport or service failure.
    fn translate(&self, text: &str, target_language: &str) -> Result<String, TranslateError>;
}

impl<T: Translator + ?Sized> Translator for Box<T> {
    fn translate(&self, text: &str, target_language: &str) -> Result<String, TranslateError> {
        (**self).translate(text, target_language)
    }
}

impl<T: Translator + ?Sized> Translator for std::sync::Arc<T> {
    fn translate(&self, text: &str, target_language: &str) -> Result<String, TranslateError> {
        (**self).translate(text, target_language)
    }
}

/// Translate `text`, falling back to the original on failure.
///
/// Returns the text to use and whether the translation succeeded. Each
/// failure produces exactly one error log line.
pub fn translate_or_original(
    translator: &dyn Translator,
    text: &str,
    target_language: &str,
) -> (String, bool) {
    match translator.translate(text, target_language) {
        Ok(translated) => {
            log::debug!("Translated {:?} -> {:?}", text, translated);
            (translated, true)
        }
        Err(e) => {
            log::error!("Error during translation of {:?}: {}", text, e);
            (text.to_string(), false)
        }
    }
}
