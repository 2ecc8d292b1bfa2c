//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::inference::{
    Citation, GenerationProvider, GenerationRequest, GenerationResponse, ProviderError,
};

/// Owned snapshot of one request seen by the stub.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub model: String,
    pub prompt: String,
    pub api_key: String,
    pub temperature: f32,
    pub web_search: bool,
}

/// A deterministic provider for tests: returns a canned reply and records
/// every request it receives.
pub struct StubProvider {
    reply_text: String,
    citations: Vec<Citation>,
    calls: AtomicUsize,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl StubProvider {
    pub fn new(reply_text: impl Into<String>) -> Self {
        Self {
            reply_text: reply_text.into(),
            citations: Vec::new(),
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn with_citations(mut self, citations: Vec<Citation>) -> Self {
        self.citations = citations;
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl GenerationProvider for StubProvider {
    fn name(&self) -> &str {
        "stub"
    }

    async fn generate(
        &self,
        request: GenerationRequest<'_>,
    ) -> Result<GenerationResponse, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(RecordedRequest {
            model: request.model.to_string(),
            prompt: request.prompt.to_string(),
            api_key: request.api_key.to_string(),
            temperature: request.temperature,
            web_search: request.web_search,
        });
        Ok(GenerationResponse {
            text: self.reply_text.clone(),
            citations: self.citations.clone(),
        })
    }
}

/// A provider that always fails with a server-side API error.
pub struct FailingProvider;

#[async_trait]
impl GenerationProvider for FailingProvider {
    fn name(&self) -> &str {
        "failing"
    }

    async fn generate(
        &self,
        _request: GenerationRequest<'_>,
    ) -> Result<GenerationResponse, ProviderError> {
        Err(ProviderError::Api {
            status: 500,
            message: "stub failure".to_string(),
        })
    }
}
