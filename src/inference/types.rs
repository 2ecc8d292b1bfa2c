use serde::{Deserialize, Serialize};

/// Everything a provider needs to fulfill a generation request.
///
/// The credential travels with each request rather than living inside the
/// provider, so the pre-call credential check stays in the caller and the
/// provider itself holds no secret state.
pub struct GenerationRequest<'a> {
    pub model: &'a str,
    pub prompt: &'a str,
    pub api_key: &'a str,
    /// Sampling temperature. Pinned to 0 by the analyzer to bias the model
    /// toward literal JSON output.
    pub temperature: f32,
    /// Enables live web-search grounding on providers that support it.
    pub web_search: bool,
}

/// One search-result citation attached to a generated reply.
///
/// Raw provider-shaped data: either field may be empty. Filtering and
/// deduplication happen in the normalizer, not here.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Citation {
    pub uri: String,
    pub title: String,
}

/// A completed generation: the full reply text plus any citations the
/// provider attached to it.
#[derive(Debug, Clone, Default)]
pub struct GenerationResponse {
    pub text: String,
    pub citations: Vec<Citation>,
}
