pub mod provider;
pub mod providers;
pub mod types;

pub use provider::{GenerationProvider, ProviderError};
pub use providers::GeminiProvider;
pub use types::{Citation, GenerationRequest, GenerationResponse};
