//! Cloud Translation v2 REST client.
//!
//! Sends `POST {endpoint}?key={api_key}` with a JSON body of
//! `{"q", "target", "format": "text"}` and reads
//! `data.translations[0].translatedText` from the response. Plain-text
//! format keeps quotes and ampersands unescaped in the result.

use std::time::Duration;

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};

use super::{TranslateError, Translator};
use crate::config::Settings;

/// Public endpoint of the v2 API.
pub const DEFAULT_ENDPOINT: &str = "https://translation.googleapis.com/language/translate/v2";

#[derive(Debug, Serialize)]
struct TranslateRequest<'a> {
    q: &'a str,
    target: &'a str,
    format: &'static str,
}

#[derive(Debug, Deserialize)]
struct TranslateResponse {
    data: TranslationData,
}

#[derive(Debug, Deserialize)]
struct TranslationData {
    #[serde(default)]
    translations: Vec<Translation>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Translation {
    translated_text: String,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// Blocking client for the Cloud Translation v2 API.
#[derive(Debug, Clone)]
pub struct GoogleTranslator {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
}

impl GoogleTranslator {
    /// Create a client.
    ///
    /// # Arguments
    ///
    /// * `endpoint` - Full URL of the `translate/v2` endpoint
    /// * `api_key` - API key sent as the `key` query parameter, if any
    /// * `timeout` - Per-request timeout; `None` waits indefinitely
    ///
    /// # Errors
    ///
    /// Returns [`TranslateError::Http`] if the HTTP client cannot be built.
    pub fn new(
        endpoint: impl Into<String>,
        api_key: Option<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, TranslateError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
            api_key,
        })
    }

    /// Create a client from resolved settings.
    ///
    /// # Errors
    ///
    /// Returns [`TranslateError::Http`] if the HTTP client cannot be built.
    pub fn from_settings(settings: &Settings) -> Result<Self, TranslateError> {
        if settings.api_key.is_none() {
            log::warn!("No API key configured; requests are sent without credentials");
        }
        Self::new(
            settings.endpoint.clone(),
            settings.api_key.clone(),
            settings.request_timeout_secs.map(Duration::from_secs),
        )
    }

    /// Endpoint this client posts to.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl Translator for GoogleTranslator {
    fn translate(&self, text: &str, target_language: &str) -> Result<String, TranslateError> {
        let mut request = self.client.post(&self.endpoint);
        if let Some(ref key) = self.api_key {
            request = request.query(&[("key", key.as_str())]);
        }

        let response = request
            .json(&TranslateRequest {
                q: text,
                target: target_language,
                format: "text",
            })
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            let message = serde_json::from_str::<ErrorResponse>(&body)
                .map(|e| e.error.message)
                .unwrap_or_else(|_| {
                    status
                        .canonical_reason()
                        .unwrap_or("unknown status")
                        .to_string()
                });
            return Err(TranslateError::Service {
                status: status.as_u16(),
                message,
            });
        }

        let body: TranslateResponse = response.json()?;
        body.data
            .translations
            .into_iter()
            .next()
            .map(|t| t.translated_text)
            .ok_or_else(|| TranslateError::MalformedResponse("no translations returned".to_string()))
    }
}
