// Errors surfaced by external data providers
use thiserror::Error;

/// Display text is shown to couriers as-is.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProviderError {
    #[error("API key error. Please check your {provider} API key.")]
    Unauthorized { provider: &'static str },

    #[error("{0}")]
    NotFound(String),

    #[error("Too many requests. API rate limit exceeded.")]
    RateLimited,

    #[error("{provider} API error (Status: {status})")]
    Status { provider: &'static str, status: u16 },

    #[error("Network error while contacting {provider}: {message}")]
    Network { provider: &'static str, message: String },

    #[error("Unexpected response from {provider}: {message}")]
    Decode { provider: &'static str, message: String },
}

pub type ProviderResult<T> = Result<T, ProviderError>;
