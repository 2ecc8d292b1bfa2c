//! # Site Analysis
//!
//! The request composer and result assembly. One analysis is one stateless
//! generation call: compose the prompt, invoke the provider, normalize the
//! reply. The credential is checked before the provider is ever touched.

use std::fmt;
use std::sync::Arc;

use log::info;

use crate::core::normalize::{collect_grounding_sources, parse_model_reply};
use crate::core::types::AnalysisResult;
use crate::inference::{GenerationProvider, GenerationRequest, ProviderError};

/// Substituted when the normalized body carries an empty summary.
const NO_SUMMARY_FALLBACK: &str = "No summary available.";

#[derive(Debug)]
pub enum AnalyzeError {
    /// No credential configured. Detected before any network activity.
    MissingApiKey,
    /// The generation call itself failed. Propagated unmodified, no retry.
    Provider(ProviderError),
}

impl fmt::Display for AnalyzeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalyzeError::MissingApiKey => write!(
                f,
                "no API key configured: set GEMINI_API_KEY or [gemini] api_key in the config file"
            ),
            AnalyzeError::Provider(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for AnalyzeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AnalyzeError::MissingApiKey => None,
            AnalyzeError::Provider(e) => Some(e),
        }
    }
}

impl From<ProviderError> for AnalyzeError {
    fn from(e: ProviderError) -> Self {
        AnalyzeError::Provider(e)
    }
}

/// Builds the instruction sent to the model. Deterministic: the same URL
/// always produces the same prompt. The URL is embedded verbatim.
pub fn build_prompt(url: &str) -> String {
    format!(
        "I need to analyze the navigation structure and external assets of this website: {url}\n\
         \n\
         Task:\n\
         1. Use web search to find the main navigation menu items (header/footer).\n\
         2. Identify and list any external CSS files, CDN links (e.g., Tailwind, Bootstrap, Fonts), \
         or JavaScript libraries (e.g., React, jQuery) that are likely used by this site.\n\
         3. Output the result strictly as a JSON object.\n\
         \n\
         JSON Schema:\n\
         {{\n\
           \"summary\": \"A brief 1-sentence summary of the site's primary purpose based on its navigation.\",\n\
           \"links\": [\n\
             {{ \"name\": \"Link Text\", \"url\": \"https://target-url.com\", \"type\": \"internal\", \"description\": \"Optional details\" }},\n\
             {{ \"name\": \"Link Text\", \"url\": \"https://external.com\", \"type\": \"third-party\" }}\n\
           ],\n\
           \"scriptsAndStylesheets\": [\n\
             \"https://cdn.tailwindcss.com\",\n\
             \"https://fonts.googleapis.com/css?family=Roboto\",\n\
             \"https://code.jquery.com/jquery-3.6.0.min.js\"\n\
           ]\n\
         }}\n\
         \n\
         Constraints:\n\
         - Output valid JSON only.\n\
         - If you cannot access the website, find no links, or encounter a safety restriction, \
         return the JSON structure with an empty \"links\" array ([]) and explain the reason in the \"summary\".\n\
         - Do NOT start with \"I am sorry\" or \"Here is the JSON\". Return ONLY the JSON object.\n"
    )
}

/// Composes prompts and assembles results. Stateless across calls: each
/// `analyze` is one independent request with no shared mutable state.
pub struct SiteAnalyzer {
    provider: Arc<dyn GenerationProvider>,
    model: String,
    api_key: Option<String>,
}

impl SiteAnalyzer {
    pub fn new(
        provider: Arc<dyn GenerationProvider>,
        model: String,
        api_key: Option<String>,
    ) -> Self {
        Self {
            provider,
            model,
            api_key,
        }
    }

    /// Analyzes one website. The URL is not validated for well-formedness
    /// or reachability; it goes into the prompt as given.
    pub async fn analyze(&self, url: &str) -> Result<AnalysisResult, AnalyzeError> {
        let api_key = self
            .api_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .ok_or(AnalyzeError::MissingApiKey)?;

        let prompt = build_prompt(url);
        info!(
            "analyzing {} via {} (model {})",
            url,
            self.provider.name(),
            self.model,
        );

        let response = self
            .provider
            .generate(GenerationRequest {
                model: &self.model,
                prompt: &prompt,
                api_key,
                temperature: 0.0,
                web_search: true,
            })
            .await?;

        let parsed = parse_model_reply(&response.text);
        let grounding_sources = collect_grounding_sources(&response.citations);

        // Second summary fallback on top of the normalizer's own. The
        // normalizer can legitimately hand back an empty string (empty
        // reply, or a parsed body with "summary": ""); the result contract
        // says summary is never empty.
        let summary = if parsed.summary.is_empty() {
            NO_SUMMARY_FALLBACK.to_string()
        } else {
            parsed.summary
        };

        Ok(AnalysisResult {
            links: parsed.links,
            summary,
            grounding_sources,
            scripts_and_stylesheets: parsed.scripts_and_stylesheets,
        })
    }
}
