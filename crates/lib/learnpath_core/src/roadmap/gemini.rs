//! Gemini-backed [`TextGenerator`].
//!
//! Calls the `generateContent` endpoint with a JSON response MIME type and
//! the declared output schema. A single attempt per call: transport errors,
//! non-success statuses, and malformed reply envelopes all surface as
//! [`RoadmapError::Model`].

use async_trait::async_trait;
use serde_json::Value;

use super::{RoadmapError, TextGenerator};

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Default model for roadmap generation.
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";

/// Text generator backed by the Google Gemini API.
pub struct GeminiGenerator {
    api_key: String,
    endpoint: String,
    client: reqwest::Client,
}

impl GeminiGenerator {
    /// Create a generator for the given model (e.g. "gemini-2.5-flash").
    pub fn new(api_key: String, model: &str) -> Self {
        Self {
            api_key,
            endpoint: format!("{GEMINI_API_BASE}/{model}:generateContent"),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl TextGenerator for GeminiGenerator {
    async fn generate(
        &self,
        prompt: &str,
        response_schema: &Value,
    ) -> Result<String, RoadmapError> {
        let payload = serde_json::json!({
            "contents": [{
                "parts": [{ "text": prompt }]
            }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseJsonSchema": response_schema,
            }
        });

        let url = format!("{}?key={}", self.endpoint, self.api_key);
        let resp = self
            .client
            .post(&url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| RoadmapError::Model(format!("Gemini request failed: {e}")))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(RoadmapError::Model(format!(
                "Gemini API error {status}: {body}"
            )));
        }

        let body: Value = resp
            .json()
            .await
            .map_err(|e| RoadmapError::Model(format!("Gemini reply parse error: {e}")))?;

        let text = body["candidates"][0]["content"]["parts"][0]["text"]
            .as_str()
            .ok_or_else(|| RoadmapError::Model("Gemini reply has no candidate text".into()))?;

        Ok(text.to_string())
    }
}
