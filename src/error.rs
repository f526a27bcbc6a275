//! Resolution errors.

use thiserror::Error;

use crate::provider::ProviderKind;

/// Errors produced while resolving a video URL.
///
/// None of these are retried. The first two are terminal for the URL itself;
/// the last two come from talking to a provider's oEmbed endpoint.
#[derive(Error, Debug)]
pub enum EmbedError {
    /// The URL matches no known provider signature.
    #[error("Unrecognized provider for URL: {0}")]
    UnrecognizedProvider(String),

    /// The provider was recognized but no video code could be derived.
    #[error("No {provider} video identifier found in {url}")]
    MissingIdentifier { provider: ProviderKind, url: String },

    /// The provider endpoint could not be reached or answered with an error status.
    #[error("{provider} oEmbed request failed: {reason}")]
    UpstreamFetch {
        provider: ProviderKind,
        reason: String,
    },

    /// The endpoint answered but the body is not the expected document.
    #[error("Malformed {provider} oEmbed response: {reason}")]
    MalformedResponse {
        provider: ProviderKind,
        reason: String,
    },
}

pub type Result<T> = std::result::Result<T, EmbedError>;

impl EmbedError {
    /// Provider the error is attributed to, if classification got that far.
    pub fn provider(&self) -> Option<ProviderKind> {
        match self {
            Self::UnrecognizedProvider(_) => None,
            Self::MissingIdentifier { provider, .. }
            | Self::UpstreamFetch { provider, .. }
            | Self::MalformedResponse { provider, .. } => Some(*provider),
        }
    }
}
