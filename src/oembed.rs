//! oEmbed metadata retrieval.
//!
//! [`MetadataFetcher::fetch_metadata`] is the cache-first path used by the
//! lazily resolved providers. [`MetadataFetcher::fetch_uncached`] is the
//! eager SoundCloud path, which neither reads nor writes the cache.

use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize};
use tracing::{debug, instrument};

use crate::cache::MetadataCache;
use crate::error::{EmbedError, Result};
use crate::http_client::Transport;
use crate::provider::ProviderKind;

/// Decoded oEmbed document.
///
/// Every field is optional. Providers disagree on what they send, and a
/// missing title is a valid answer rather than an error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetadataDocument {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    /// Embed markup; SoundCloud's player `src` lives here.
    #[serde(default)]
    pub html: Option<String>,
    #[serde(default, deserialize_with = "dimension")]
    pub width: Option<u32>,
    #[serde(default, deserialize_with = "dimension")]
    pub height: Option<u32>,
    #[serde(default)]
    pub author_name: Option<String>,
    #[serde(default)]
    pub provider_name: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl MetadataDocument {
    /// Decode a document body. Anything but a JSON object is malformed.
    pub fn from_slice(provider: ProviderKind, bytes: &[u8]) -> Result<Self> {
        serde_json::from_slice(bytes).map_err(|e| EmbedError::MalformedResponse {
            provider,
            reason: e.to_string(),
        })
    }
}

/// Accepts `640`, `640.0`, `"640"`, and treats `"100%"`, `360.5` or `null`
/// as absent.
fn dimension<'de, D>(deserializer: D) -> std::result::Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::Number(n)) => n
            .as_u64()
            .or_else(|| n.as_f64().and_then(whole_number))
            .and_then(|n| u32::try_from(n).ok()),
        Some(serde_json::Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::float_cmp)]
fn whole_number(f: f64) -> Option<u64> {
    // Range-checked, so the cast is exact.
    (f.is_finite() && f >= 0.0 && f.fract() == 0.0 && f <= f64::from(u32::MAX)).then(|| f as u64)
}

/// Query parameters for a provider's endpoint.
///
/// `format=json` is left out when the endpoint path already says `.json`.
fn oembed_query(provider: ProviderKind, url: &str) -> Vec<(&'static str, String)> {
    let mut query = vec![("url", url.to_string())];
    if !provider.oembed_endpoint().ends_with(".json") {
        query.push(("format", "json".to_string()));
    }
    query
}

/// Fetches oEmbed documents through a transport and a cache store.
#[derive(Clone)]
pub struct MetadataFetcher {
    transport: Arc<dyn Transport>,
    cache: Arc<dyn MetadataCache>,
}

impl MetadataFetcher {
    pub fn new(transport: Arc<dyn Transport>, cache: Arc<dyn MetadataCache>) -> Self {
        Self { transport, cache }
    }

    /// Cache-first lookup keyed by `"{provider}_{code}"`.
    ///
    /// A fresh document is written back to the cache before returning.
    #[instrument(skip(self, provider), fields(provider = provider.as_str()))]
    pub async fn fetch_metadata(
        &self,
        provider: ProviderKind,
        code: &str,
        original_url: &str,
    ) -> Result<MetadataDocument> {
        let key = provider.cache_key(code);

        if let Some(cached) = self.cache.get(&key).await {
            debug!("Cache hit: {}", key);
            return MetadataDocument::from_slice(provider, &cached);
        }
        debug!("Cache miss: {}", key);

        let body = self.request(provider, original_url).await?;
        let document = MetadataDocument::from_slice(provider, body.as_bytes())?;
        self.cache.set(&key, body.into_bytes()).await;

        Ok(document)
    }

    /// Network-only lookup. Used by eager resolution; the cache is untouched.
    #[instrument(skip(self, provider), fields(provider = provider.as_str()))]
    pub async fn fetch_uncached(
        &self,
        provider: ProviderKind,
        original_url: &str,
    ) -> Result<MetadataDocument> {
        let body = self.request(provider, original_url).await?;
        MetadataDocument::from_slice(provider, body.as_bytes())
    }

    async fn request(&self, provider: ProviderKind, original_url: &str) -> Result<String> {
        let endpoint = provider.oembed_endpoint();
        let query = oembed_query(provider, original_url);
        let query: Vec<(&str, &str)> = query.iter().map(|(k, v)| (*k, v.as_str())).collect();

        debug!("Fetching from {} oEmbed: {}", provider, endpoint);

        let response = self
            .transport
            .fetch(endpoint, &query)
            .await
            .map_err(|e| EmbedError::UpstreamFetch {
                provider,
                reason: format!("{e:#}"),
            })?;

        if !response.is_success() {
            return Err(EmbedError::UpstreamFetch {
                provider,
                reason: format!("HTTP status {}", response.status),
            });
        }

        Ok(response.body)
    }
}

impl std::fmt::Debug for MetadataFetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MetadataFetcher").finish_non_exhaustive()
    }
}
