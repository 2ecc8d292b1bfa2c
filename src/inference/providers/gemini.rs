//! Gemini provider implementation using the `generateContent` REST endpoint.
//!
//! This module uses Generative Language API terminology:
//! - "contents" (array of content blocks, each a list of "parts")
//! - "tools" with a `google_search` entry for web-search grounding
//! - "groundingMetadata.groundingChunks" for citations

use async_trait::async_trait;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::inference::{
    Citation, GenerationProvider, GenerationRequest, GenerationResponse, ProviderError,
};

pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

// ============================================================================
// Gemini generateContent Wire Types
// ============================================================================

/// One content block: a list of parts. Used in both request and response.
#[derive(Serialize, Deserialize, Debug, Default)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Serialize, Deserialize, Debug, Default)]
struct Part {
    #[serde(default)]
    text: String,
}

/// Tool entry enabling web-search grounding.
#[derive(Serialize, Debug)]
struct Tool {
    google_search: GoogleSearch,
}

/// The API expects an empty object as the search tool's config.
#[derive(Serialize, Debug)]
struct GoogleSearch {}

#[derive(Serialize, Debug)]
struct GenerationConfig {
    temperature: f32,
}

/// The request body for the generateContent endpoint.
#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<Vec<Tool>>,
    generation_config: GenerationConfig,
}

/// Response envelope. Every field defaults so a sparse or truncated reply
/// still decodes to something usable.
#[derive(Deserialize, Debug, Default)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Content,
    #[serde(default)]
    grounding_metadata: GroundingMetadata,
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
struct GroundingMetadata {
    #[serde(default)]
    grounding_chunks: Vec<GroundingChunk>,
}

#[derive(Deserialize, Debug, Default)]
struct GroundingChunk {
    #[serde(default)]
    web: Option<WebSource>,
}

#[derive(Deserialize, Debug, Default)]
struct WebSource {
    #[serde(default)]
    uri: String,
    #[serde(default)]
    title: String,
}

// ============================================================================
// Translation Layer
// ============================================================================

/// Flattens the envelope: concatenates the first candidate's text parts and
/// lifts its grounding chunks into citations. Empty uri/title pass through
/// untouched, the normalizer filters them later.
fn flatten_response(reply: GenerateContentResponse) -> GenerationResponse {
    let mut text = String::new();
    let mut citations = Vec::new();

    if let Some(candidate) = reply.candidates.into_iter().next() {
        for part in candidate.content.parts {
            text.push_str(&part.text);
        }
        for chunk in candidate.grounding_metadata.grounding_chunks {
            if let Some(web) = chunk.web {
                citations.push(Citation {
                    uri: web.uri,
                    title: web.title,
                });
            }
        }
    }

    GenerationResponse { text, citations }
}

// ============================================================================
// Provider Implementation
// ============================================================================

/// Gemini API provider using the generateContent endpoint.
pub struct GeminiProvider {
    base_url: String,
    client: reqwest::Client,
}

impl GeminiProvider {
    /// Creates a new Gemini provider.
    ///
    /// # Arguments
    /// * `base_url` - Optional custom base URL (defaults to Google's API)
    pub fn new(base_url: Option<String>) -> Self {
        Self {
            base_url: base_url.unwrap_or_else(|| DEFAULT_GEMINI_BASE_URL.to_string()),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl GenerationProvider for GeminiProvider {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn generate(
        &self,
        request: GenerationRequest<'_>,
    ) -> Result<GenerationResponse, ProviderError> {
        let body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: request.prompt.to_string(),
                }],
            }],
            tools: request
                .web_search
                .then(|| vec![Tool { google_search: GoogleSearch {} }]),
            generation_config: GenerationConfig {
                temperature: request.temperature,
            },
        };

        let url = format!("{}/models/{}:generateContent", self.base_url, request.model);
        info!(
            "Gemini generateContent request: model={}, web_search={}, temperature={}",
            request.model, request.web_search, request.temperature,
        );

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", request.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        debug!("Gemini response status: {}", response.status());

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let err_body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!("Gemini API error: {} - {}", status, err_body);
            return Err(ProviderError::Api {
                status,
                message: err_body,
            });
        }

        let reply: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::Parse(e.to_string()))?;

        let flattened = flatten_response(reply);
        info!(
            "Gemini reply: {} text bytes, {} grounding chunk(s)",
            flattened.text.len(),
            flattened.citations.len(),
        );
        Ok(flattened)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_serializes_search_tool() {
        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: "hello".to_string(),
                }],
            }],
            tools: Some(vec![Tool {
                google_search: GoogleSearch {},
            }]),
            generation_config: GenerationConfig { temperature: 0.0 },
        };

        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains(r#""google_search":{}"#));
        assert!(json.contains(r#""text":"hello"#));
        assert!(json.contains(r#""generationConfig":{"temperature":0.0}"#));
    }

    #[test]
    fn test_request_omits_tools_when_search_disabled() {
        let request = GenerateContentRequest {
            contents: vec![],
            tools: None,
            generation_config: GenerationConfig { temperature: 0.0 },
        };

        let json = serde_json::to_string(&request).unwrap();
        assert!(!json.contains("tools"));
    }

    #[test]
    fn test_response_deserializes_text_and_grounding() {
        let json = r#"{
            "candidates": [{
                "content": {"parts": [{"text": "Part one. "}, {"text": "Part two."}]},
                "groundingMetadata": {
                    "groundingChunks": [
                        {"web": {"uri": "https://a.com", "title": "A"}},
                        {"web": {"uri": "https://b.com", "title": "B"}}
                    ]
                }
            }]
        }"#;

        let reply: GenerateContentResponse = serde_json::from_str(json).unwrap();
        let flattened = flatten_response(reply);

        assert_eq!(flattened.text, "Part one. Part two.");
        assert_eq!(flattened.citations.len(), 2);
        assert_eq!(flattened.citations[0].uri, "https://a.com");
        assert_eq!(flattened.citations[1].title, "B");
    }

    #[test]
    fn test_response_tolerates_missing_grounding_metadata() {
        let json = r#"{"candidates": [{"content": {"parts": [{"text": "plain"}]}}]}"#;
        let reply: GenerateContentResponse = serde_json::from_str(json).unwrap();
        let flattened = flatten_response(reply);

        assert_eq!(flattened.text, "plain");
        assert!(flattened.citations.is_empty());
    }

    #[test]
    fn test_response_tolerates_empty_envelope() {
        let reply: GenerateContentResponse = serde_json::from_str("{}").unwrap();
        let flattened = flatten_response(reply);

        assert!(flattened.text.is_empty());
        assert!(flattened.citations.is_empty());
    }

    #[test]
    fn test_chunk_without_web_entry_is_skipped() {
        let json = r#"{
            "candidates": [{
                "content": {"parts": []},
                "groundingMetadata": {
                    "groundingChunks": [{}, {"web": {"uri": "https://a.com", "title": "A"}}]
                }
            }]
        }"#;

        let reply: GenerateContentResponse = serde_json::from_str(json).unwrap();
        let flattened = flatten_response(reply);

        assert_eq!(flattened.citations.len(), 1);
        assert_eq!(flattened.citations[0].uri, "https://a.com");
    }
}
