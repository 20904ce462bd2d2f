//! Vision providers: one awaited POST per request, no retries.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, info};

use plantguard_core::DiagnosisError;

/// A prompt plus one inline image, ready for a multimodal endpoint.
#[derive(Debug, Clone)]
pub struct VisionRequest {
    pub prompt: String,
    pub media_type: String,
    /// Raw base64 payload, no data-URI prefix.
    pub data: String,
}

/// Trait for multimodal inference endpoints used by the pipeline.
#[async_trait]
pub trait VisionProvider: Send + Sync {
    /// Provider name (e.g. "gemini").
    fn name(&self) -> &str;

    /// Send one generation request and return the reply text.
    async fn generate(&self, request: &VisionRequest) -> Result<String, DiagnosisError>;
}

/// Gemini `generateContent` provider.
pub struct GeminiProvider {
    client: Client,
    base_url: String,
    model: String,
    api_key: String,
}

impl GeminiProvider {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            model: model.into(),
            api_key: api_key.into(),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }
}

#[async_trait]
impl VisionProvider for GeminiProvider {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn generate(&self, request: &VisionRequest) -> Result<String, DiagnosisError> {
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        );
        let body = serde_json::json!({
            "contents": [{ "parts": [
                { "text": request.prompt },
                { "inlineData": { "mimeType": request.media_type, "data": request.data } }
            ]}]
        });

        info!(model = %self.model, mime = %request.media_type, "sending vision request");
        let resp = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| DiagnosisError::Transport(e.to_string()))?;

        let status = resp.status();
        let json: Value = resp
            .json()
            .await
            .map_err(|e| DiagnosisError::Transport(e.to_string()))?;

        if !status.is_success() {
            // Prefer the endpoint's own error message when it sends one.
            return Err(match json.pointer("/error/message").and_then(Value::as_str) {
                Some(message) => DiagnosisError::Api {
                    status: status.as_u16(),
                    message: message.to_string(),
                },
                None => DiagnosisError::api_status(status.as_u16()),
            });
        }

        let text = json
            .pointer("/candidates/0/content/parts/0/text")
            .and_then(Value::as_str)
            .ok_or(DiagnosisError::EmptyResponse)?;

        debug!(chars = text.len(), "received reply text");
        Ok(text.to_string())
    }
}

/// Canned provider for tests: returns a fixed reply or a fixed failure.
pub struct MockProvider {
    reply: Result<String, fn() -> DiagnosisError>,
}

impl MockProvider {
    pub fn with_reply(reply: impl Into<String>) -> Self {
        Self {
            reply: Ok(reply.into()),
        }
    }

    pub fn failing(make_err: fn() -> DiagnosisError) -> Self {
        Self {
            reply: Err(make_err),
        }
    }
}

#[async_trait]
impl VisionProvider for MockProvider {
    fn name(&self) -> &str {
        "mock"
    }

    async fn generate(&self, _request: &VisionRequest) -> Result<String, DiagnosisError> {
        match &self.reply {
            Ok(text) => Ok(text.clone()),
            Err(make_err) => Err(make_err()),
        }
    }
}
