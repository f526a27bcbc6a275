//! Provider signatures and classification.
//!
//! Each [`ProviderKind`] owns one case-insensitive signature anchored at the
//! start of the URL. An optional `http(s)://` and `www.` prefix is tolerated.
//! Signatures are checked in [`ProviderKind::ALL`] order and the first match
//! wins.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::error::{EmbedError, Result};

static DETECT_YOUTUBE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(https?://)?(www\.)?youtu\.?be(\.com)?").expect("valid youtube signature")
});

static DETECT_VIMEO: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(https?://)?(www\.)?vimeo\.com").expect("valid vimeo signature")
});

static DETECT_SOUNDCLOUD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(https?://)?(www\.)?soundcloud\.com").expect("valid soundcloud signature")
});

/// How a provider's fields get populated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionStrategy {
    /// The oEmbed document is fetched during resolution and every field comes
    /// from it. The code itself is extracted from the response.
    Eager,
    /// The code comes from the URL. Metadata is fetched on first access.
    LazyOnAccess,
}

/// Supported hosting providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    YouTube,
    Vimeo,
    SoundCloud,
}

impl ProviderKind {
    /// Every provider, in matching priority order.
    pub const ALL: [ProviderKind; 3] = [Self::YouTube, Self::Vimeo, Self::SoundCloud];

    /// Stable lowercase identifier, used in cache keys and CLI output.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::YouTube => "youtube",
            Self::Vimeo => "vimeo",
            Self::SoundCloud => "soundcloud",
        }
    }

    /// Human-readable provider name.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::YouTube => "YouTube",
            Self::Vimeo => "Vimeo",
            Self::SoundCloud => "SoundCloud",
        }
    }

    /// Fixed oEmbed endpoint for this provider.
    pub fn oembed_endpoint(self) -> &'static str {
        match self {
            Self::YouTube => "http://www.youtube.com/oembed",
            Self::Vimeo => "http://vimeo.com/api/oembed.json",
            Self::SoundCloud => "http://soundcloud.com/oembed",
        }
    }

    pub fn strategy(self) -> ResolutionStrategy {
        match self {
            Self::YouTube | Self::Vimeo => ResolutionStrategy::LazyOnAccess,
            Self::SoundCloud => ResolutionStrategy::Eager,
        }
    }

    /// Check if this provider's signature matches the URL.
    pub fn matches(self, url: &str) -> bool {
        let signature = match self {
            Self::YouTube => &*DETECT_YOUTUBE,
            Self::Vimeo => &*DETECT_VIMEO,
            Self::SoundCloud => &*DETECT_SOUNDCLOUD,
        };
        signature.is_match(url)
    }

    /// Cache key for a code of this provider: `"{provider}_{code}"`.
    pub fn cache_key(self, code: &str) -> String {
        format!("{}_{code}", self.as_str())
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Classify a raw URL. First match in [`ProviderKind::ALL`] order wins.
pub fn classify(url: &str) -> Result<ProviderKind> {
    ProviderKind::ALL
        .into_iter()
        .find(|provider| provider.matches(url))
        .inspect(|provider| tracing::debug!("Matched provider: {}", provider.as_str()))
        .ok_or_else(|| EmbedError::UnrecognizedProvider(url.to_string()))
}
