//! Google Gemini implementation of [`AnalysisModel`].

use async_trait::async_trait;
use reqwest::{Client, header};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use shared_utils::env::optional_env_var;
use snafu::ResultExt;

use crate::analysis::{AnalysisModel, ClientBuildSnafu, InvalidKeySnafu, ModelError, ModelInitError};

const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";
const DEFAULT_MODEL: &str = "gemini-1.5-pro-latest";

/// Environment variable holding the API key; absence disables the feature.
pub const API_KEY_VAR: &str = "GOOGLE_API_KEY";
/// Environment variable overriding the model id.
pub const MODEL_VAR: &str = "GEMINI_MODEL";

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

/// Gemini-backed analysis model.
pub struct GeminiModel {
    client: Client,
    model: String,
    _api_key: SecretString,
}

impl GeminiModel {
    /// Creates a provider with an explicit key and model id.
    pub fn new(api_key: SecretString, model: impl Into<String>) -> Result<Self, ModelInitError> {
        let mut headers = header::HeaderMap::new();
        let mut key_value = header::HeaderValue::from_str(api_key.expose_secret())
            .context(InvalidKeySnafu)?;
        key_value.set_sensitive(true);
        headers.insert("x-goog-api-key", key_value);

        let client = Client::builder()
            .default_headers(headers)
            .build()
            .context(ClientBuildSnafu)?;

        Ok(Self {
            client,
            model: model.into(),
            _api_key: api_key,
        })
    }

    /// Builds the provider from the environment.
    ///
    /// Returns `Ok(None)` when `GOOGLE_API_KEY` is unset: a missing key is a
    /// configuration state (feature disabled), not an error.
    pub fn from_env() -> Result<Option<Self>, ModelInitError> {
        let Some(key) = optional_env_var(API_KEY_VAR) else {
            return Ok(None);
        };
        let model = optional_env_var(MODEL_VAR).unwrap_or_else(|| DEFAULT_MODEL.to_string());
        Self::new(SecretString::new(key.into()), model).map(Some)
    }

    fn endpoint(&self) -> String {
        format!("{BASE_URL}/{}:generateContent", self.model)
    }
}

#[async_trait]
impl AnalysisModel for GeminiModel {
    async fn generate(&self, prompt: &str) -> Result<String, ModelError> {
        let body = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
        };

        let response = self
            .client
            .post(self.endpoint())
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown API error".to_string());
            return Err(ModelError::Api(message));
        }

        let parsed = response.json::<GenerateResponse>().await?;
        let text: String = parsed
            .candidates
            .first()
            .map(|c| {
                c.content
                    .parts
                    .iter()
                    .map(|p| p.text.as_str())
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        if text.is_empty() {
            return Err(ModelError::EmptyResponse);
        }
        Ok(text)
    }
}
