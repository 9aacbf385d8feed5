// ABOUTME: Google Gemini provider for the coaching flows
// ABOUTME: generateContent calls with system instructions and JSON-mode responses
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Gemini Provider
//!
//! Implementation of [`LlmProvider`] for Google's Gemini models. The API key
//! comes from `GEMINI_API_KEY` (Google AI Studio).

use std::fmt::{Debug, Formatter, Result as FmtResult};

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, instrument, Span};

use super::{
    ChatMessage, ChatRequest, ChatResponse, LlmCapabilities, LlmProvider, MessageRole,
    ResponseFormat, TokenUsage,
};
use crate::config::environment::DEFAULT_LLM_MODEL;
use crate::config::LlmConfig;
use crate::errors::{AppError, ErrorCode};

/// Base URL for the Gemini API
const API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Service name used in error messages
const SERVICE: &str = "Gemini";

/// Header carrying the API key, kept out of URLs so it never reaches logs
const API_KEY_HEADER: &str = "x-goog-api-key";

// ============================================================================
// API Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<GeminiContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<ContentPart>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ContentPart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<&'static str>,
    candidate_count: u32,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    candidates: Option<Vec<Candidate>>,
    #[serde(rename = "usageMetadata")]
    usage_metadata: Option<UsageMetadata>,
    error: Option<GeminiError>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<GeminiContent>,
    #[serde(rename = "finishReason")]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UsageMetadata {
    #[serde(rename = "promptTokenCount")]
    prompt: Option<u32>,
    #[serde(rename = "candidatesTokenCount")]
    candidates: Option<u32>,
    #[serde(rename = "totalTokenCount")]
    total: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    message: String,
}

// ============================================================================
// Provider Implementation
// ============================================================================

/// Google Gemini LLM provider
pub struct GeminiProvider {
    api_key: String,
    client: Client,
    default_model: String,
    default_temperature: Option<f32>,
    base_url: String,
}

impl GeminiProvider {
    /// Create a new Gemini provider with an API key
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            client: Client::new(),
            default_model: DEFAULT_LLM_MODEL.to_owned(),
            default_temperature: None,
            base_url: API_BASE_URL.to_owned(),
        }
    }

    /// Create a provider from the loaded configuration
    ///
    /// # Errors
    ///
    /// Returns a configuration error if no API key is configured
    pub fn from_config(config: &LlmConfig) -> Result<Self, AppError> {
        let api_key = config.api_key.clone().ok_or_else(|| {
            AppError::new(
                ErrorCode::ConfigMissing,
                "GEMINI_API_KEY environment variable is required",
            )
        })?;
        let mut provider = Self::new(api_key).with_default_model(config.model.clone());
        provider.default_temperature = config.temperature;
        Ok(provider)
    }

    /// Override the model used when a request does not name one
    #[must_use]
    pub fn with_default_model(mut self, model: impl Into<String>) -> Self {
        self.default_model = model.into();
        self
    }

    /// Point the provider at a different API endpoint
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_owned();
        self
    }

    /// Gemini has no system role inside `contents`
    const fn convert_role(role: MessageRole) -> &'static str {
        match role {
            MessageRole::System | MessageRole::User => "user",
            MessageRole::Assistant => "model",
        }
    }

    fn build_url(&self, model: &str, method: &str) -> String {
        format!("{}/models/{model}:{method}", self.base_url)
    }

    /// Transport failure with the request URL stripped from the message
    fn transport_error(context: &str, error: reqwest::Error) -> AppError {
        AppError::external_unavailable(SERVICE, format!("{context}: {}", error.without_url()))
    }

    fn text_content(role: Option<String>, text: &str) -> GeminiContent {
        GeminiContent {
            role,
            parts: vec![ContentPart {
                text: Some(text.to_owned()),
            }],
        }
    }

    fn convert_messages(messages: &[ChatMessage]) -> (Vec<GeminiContent>, Option<GeminiContent>) {
        let mut contents = Vec::new();
        let mut system_instruction = None;

        for message in messages {
            if message.role == MessageRole::System {
                system_instruction = Some(Self::text_content(None, &message.content));
            } else {
                contents.push(Self::text_content(
                    Some(Self::convert_role(message.role).to_owned()),
                    &message.content,
                ));
            }
        }

        (contents, system_instruction)
    }

    fn build_gemini_request(&self, request: &ChatRequest) -> GeminiRequest {
        let (contents, system_instruction) = Self::convert_messages(&request.messages);

        let response_mime_type = match request.response_format {
            ResponseFormat::Json => Some("application/json"),
            ResponseFormat::Text => None,
        };

        GeminiRequest {
            contents,
            system_instruction,
            generation_config: Some(GenerationConfig {
                temperature: request.temperature.or(self.default_temperature),
                max_output_tokens: request.max_tokens,
                response_mime_type,
                candidate_count: 1,
            }),
        }
    }

    /// Concatenate the text parts of the first candidate
    fn extract_content(response: &GeminiResponse) -> Result<String, AppError> {
        let text: String = response
            .candidates
            .as_ref()
            .and_then(|c| c.first())
            .and_then(|c| c.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|part| part.text.as_deref())
                    .collect()
            })
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(AppError::new(
                ErrorCode::ExternalResponseInvalid,
                "No content in Gemini response",
            ));
        }
        Ok(text)
    }

    fn convert_usage(metadata: &UsageMetadata) -> TokenUsage {
        TokenUsage {
            prompt_tokens: metadata.prompt.unwrap_or(0),
            completion_tokens: metadata.candidates.unwrap_or(0),
            total_tokens: metadata.total.unwrap_or(0),
        }
    }

    /// Map an API error status to an external-service error
    fn map_api_error(status: u16, response_text: &str) -> AppError {
        let message = serde_json::from_str::<GeminiResponse>(response_text)
            .ok()
            .and_then(|r| r.error)
            .map_or_else(|| response_text.to_owned(), |e| e.message);

        match status {
            429 => AppError::new(
                ErrorCode::ExternalRateLimited,
                Self::extract_quota_message(&message),
            ),
            500..=599 => AppError::external_unavailable(SERVICE, format!("{status}: {message}")),
            _ => AppError::external_service(SERVICE, format!("{status}: {message}")),
        }
    }

    /// Turn "Please retry in 6.4s" into a whole-second hint
    fn extract_quota_message(message: &str) -> String {
        const RETRY_PREFIX: &str = "Please retry in ";
        if let Some(retry_pos) = message.find(RETRY_PREFIX) {
            let after_prefix = &message[retry_pos + RETRY_PREFIX.len()..];
            if let Some(s_pos) = after_prefix.find('s') {
                if let Ok(seconds) = after_prefix[..s_pos].parse::<f64>() {
                    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                    let seconds_int = seconds.ceil() as u64;
                    return format!(
                        "AI service quota exceeded. Please try again in {seconds_int} seconds."
                    );
                }
            }
        }
        "AI service quota exceeded. Please wait a moment and try again.".to_owned()
    }
}

#[async_trait]
impl LlmProvider for GeminiProvider {
    fn name(&self) -> &'static str {
        "gemini"
    }

    fn display_name(&self) -> &'static str {
        "Google Gemini"
    }

    fn capabilities(&self) -> LlmCapabilities {
        LlmCapabilities::structured_output()
    }

    fn default_model(&self) -> &str {
        &self.default_model
    }

    #[instrument(skip(self, request), fields(model))]
    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, AppError> {
        let model = request.model.as_deref().unwrap_or(&self.default_model);
        Span::current().record("model", model);
        let url = self.build_url(model, "generateContent");
        let gemini_request = self.build_gemini_request(request);

        debug!("Sending request to Gemini API");

        let response = self
            .client
            .post(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .json(&gemini_request)
            .send()
            .await
            .map_err(|e| Self::transport_error("HTTP request failed", e))?;

        let status = response.status();
        let response_text = response
            .text()
            .await
            .map_err(|e| Self::transport_error("Failed to read response", e))?;

        if !status.is_success() {
            error!(status = %status, "Gemini API error");
            return Err(Self::map_api_error(status.as_u16(), &response_text));
        }

        let gemini_response: GeminiResponse =
            serde_json::from_str(&response_text).map_err(|e| {
                error!(error = %e, "Failed to parse Gemini response envelope");
                AppError::new(
                    ErrorCode::ExternalResponseInvalid,
                    format!("Failed to parse Gemini response: {e}"),
                )
            })?;

        if let Some(error) = gemini_response.error.as_ref() {
            return Err(AppError::external_service(SERVICE, error.message.clone()));
        }

        let content = Self::extract_content(&gemini_response)?;
        let usage = gemini_response
            .usage_metadata
            .as_ref()
            .map(Self::convert_usage);
        let finish_reason = gemini_response
            .candidates
            .as_ref()
            .and_then(|c| c.first())
            .and_then(|c| c.finish_reason.clone());

        debug!("Successfully received Gemini response");

        Ok(ChatResponse {
            content,
            model: model.to_owned(),
            usage,
            finish_reason,
        })
    }

    #[instrument(skip(self))]
    async fn health_check(&self) -> Result<bool, AppError> {
        let url = format!("{}/models", self.base_url);

        let response = self
            .client
            .get(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .send()
            .await
            .map_err(|e| Self::transport_error("Health check failed", e))?;

        Ok(response.status().is_success())
    }
}

impl Debug for GeminiProvider {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("GeminiProvider")
            .field("default_model", &self.default_model)
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_message_becomes_system_instruction() {
        let provider = GeminiProvider::new("test-key");
        let request = ChatRequest::new(vec![
            ChatMessage::system("coach"),
            ChatMessage::user("plan please"),
        ])
        .with_json_response();

        let body = serde_json::to_value(provider.build_gemini_request(&request)).unwrap();
        assert_eq!(body["system_instruction"]["parts"][0]["text"], "coach");
        assert_eq!(body["contents"][0]["role"], "user");
        assert_eq!(body["contents"].as_array().unwrap().len(), 1);
        assert_eq!(
            body["generation_config"]["response_mime_type"],
            "application/json"
        );
    }

    #[test]
    fn test_text_requests_omit_mime_type() {
        let provider = GeminiProvider::new("test-key");
        let request = ChatRequest::new(vec![ChatMessage::user("hi")]);
        let body = serde_json::to_value(provider.build_gemini_request(&request)).unwrap();
        assert!(body["generation_config"]
            .get("response_mime_type")
            .is_none());
    }

    #[test]
    fn test_extract_content_joins_parts() {
        let response: GeminiResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"role":"model","parts":[{"text":"{\"a\":"},{"text":"1}"}]},"finishReason":"STOP"}]}"#,
        )
        .unwrap();
        assert_eq!(GeminiProvider::extract_content(&response).unwrap(), r#"{"a":1}"#);
    }

    #[test]
    fn test_empty_candidates_are_invalid_response() {
        let response: GeminiResponse = serde_json::from_str(r#"{"candidates":[]}"#).unwrap();
        let err = GeminiProvider::extract_content(&response).unwrap_err();
        assert_eq!(err.code, ErrorCode::ExternalResponseInvalid);
    }

    #[test]
    fn test_api_error_mapping() {
        let quota = GeminiProvider::map_api_error(
            429,
            r#"{"error":{"message":"Quota exceeded. Please retry in 6.4s."}}"#,
        );
        assert_eq!(quota.code, ErrorCode::ExternalRateLimited);
        assert!(quota.message.contains("7 seconds"));

        let outage = GeminiProvider::map_api_error(503, "overloaded");
        assert_eq!(outage.code, ErrorCode::ExternalServiceUnavailable);

        let bad_key = GeminiProvider::map_api_error(400, r#"{"error":{"message":"API key not valid"}}"#);
        assert_eq!(bad_key.code, ErrorCode::ExternalServiceError);
        assert!(bad_key.message.contains("API key not valid"));
    }

    #[test]
    fn test_api_key_stays_out_of_urls() {
        let provider = GeminiProvider::new("super-secret").with_base_url("http://localhost/v1/");
        let url = provider.build_url("gemini-2.5-flash", "generateContent");
        assert_eq!(url, "http://localhost/v1/models/gemini-2.5-flash:generateContent");
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_error_hides_api_key() {
        let provider = GeminiProvider::new("SECRET-KEY-123").with_base_url("http://127.0.0.1:1");
        let request = ChatRequest::new(vec![ChatMessage::user("plan please")]);

        let err = provider.complete(&request).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ExternalServiceUnavailable);
        assert!(!err.message.contains("SECRET-KEY-123"));
        assert!(!err.message.contains("127.0.0.1:1"));

        let err = provider.health_check().await.unwrap_err();
        assert!(!err.message.contains("SECRET-KEY-123"));
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let rendered = format!("{:?}", GeminiProvider::new("super-secret"));
        assert!(!rendered.contains("super-secret"));
    }
}
