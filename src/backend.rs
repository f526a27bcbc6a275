//! Resolved video references.
//!
//! A [`VideoReference`] is built in one of two ways, chosen by the provider's
//! [`ResolutionStrategy`]:
//!
//! - `LazyOnAccess` (YouTube, Vimeo): the code comes from the URL, embed and
//!   thumbnail URLs come from fixed templates, and the title is fetched on
//!   first access.
//! - `Eager` (SoundCloud): the oEmbed document is fetched during resolution
//!   and every field, the code included, is taken from it.

use serde::Serialize;
use tokio::sync::OnceCell;
use tracing::{debug, instrument};

use crate::error::{EmbedError, Result};
use crate::extract::{extract_code, player_src};
use crate::oembed::{MetadataDocument, MetadataFetcher};
use crate::provider::{classify, ProviderKind, ResolutionStrategy};

/// Where a reference's thumbnail comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Thumbnail {
    /// Already known, possibly known to be absent.
    Known(Option<String>),
    /// Read from the oEmbed document each time it is asked for.
    FetchOnAccess,
}

/// A video URL resolved to a provider, a code and embeddable URLs.
///
/// Owns no connection. Lazy fields are resolved through a
/// [`MetadataFetcher`] borrowed at access time.
#[derive(Debug, Clone)]
pub struct VideoReference {
    source_url: String,
    provider: ProviderKind,
    code: String,
    embed_url: String,
    thumbnail: Thumbnail,
    title: OnceCell<Option<String>>,
    width: Option<u32>,
    height: Option<u32>,
}

/// Snapshot of a reference with every lazy field resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedVideo {
    pub source_url: String,
    pub provider: ProviderKind,
    pub code: String,
    pub url: String,
    pub thumbnail_url: Option<String>,
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
}

/// Embed URL for a provider code.
///
/// A SoundCloud code already is the player URL.
pub fn embed_url(provider: ProviderKind, code: &str) -> String {
    match provider {
        ProviderKind::YouTube => format!("http://www.youtube.com/embed/{code}?wmode=opaque"),
        ProviderKind::Vimeo => format!("http://player.vimeo.com/video/{code}"),
        ProviderKind::SoundCloud => code.to_string(),
    }
}

/// Thumbnail URL when it can be built from the code alone.
pub fn thumbnail_template(provider: ProviderKind, code: &str) -> Option<String> {
    match provider {
        ProviderKind::YouTube => Some(format!("http://img.youtube.com/vi/{code}/hqdefault.jpg")),
        ProviderKind::Vimeo | ProviderKind::SoundCloud => None,
    }
}

/// Resolve a raw URL into a [`VideoReference`].
///
/// Only eager providers touch the network here.
#[instrument(skip(fetcher))]
pub async fn resolve(url: &str, fetcher: &MetadataFetcher) -> Result<VideoReference> {
    let provider = classify(url)?;

    match provider.strategy() {
        ResolutionStrategy::LazyOnAccess => {
            let code = extract_code(provider, url)?;
            debug!("Extracted {} code {}", provider, code);
            Ok(VideoReference::from_code(provider, url, code))
        }
        ResolutionStrategy::Eager => {
            let document = fetcher.fetch_uncached(provider, url).await?;
            VideoReference::from_document(provider, url, document)
        }
    }
}

impl VideoReference {
    fn from_code(provider: ProviderKind, source_url: &str, code: String) -> Self {
        let thumbnail = match thumbnail_template(provider, &code) {
            Some(url) => Thumbnail::Known(Some(url)),
            None => Thumbnail::FetchOnAccess,
        };

        Self {
            source_url: source_url.to_string(),
            provider,
            embed_url: embed_url(provider, &code),
            code,
            thumbnail,
            title: OnceCell::new(),
            width: None,
            height: None,
        }
    }

    fn from_document(
        provider: ProviderKind,
        source_url: &str,
        document: MetadataDocument,
    ) -> Result<Self> {
        let html = document.html.as_deref().ok_or_else(|| EmbedError::MalformedResponse {
            provider,
            reason: "response has no html field".to_string(),
        })?;

        let code = player_src(html).ok_or_else(|| EmbedError::MissingIdentifier {
            provider,
            url: source_url.to_string(),
        })?;
        debug!("Resolved {} player {}", provider, code);

        Ok(Self {
            source_url: source_url.to_string(),
            provider,
            embed_url: embed_url(provider, &code),
            code,
            thumbnail: Thumbnail::Known(document.thumbnail_url),
            title: OnceCell::new_with(Some(document.title)),
            width: document.width,
            height: document.height,
        })
    }

    /// The URL exactly as given to `resolve`.
    pub fn source_url(&self) -> &str {
        &self.source_url
    }

    pub fn provider(&self) -> ProviderKind {
        self.provider
    }

    pub fn strategy(&self) -> ResolutionStrategy {
        self.provider.strategy()
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn embed_url(&self) -> &str {
        &self.embed_url
    }

    pub fn thumbnail(&self) -> &Thumbnail {
        &self.thumbnail
    }

    /// Thumbnail URL if known without a fetch.
    pub fn known_thumbnail_url(&self) -> Option<&str> {
        match &self.thumbnail {
            Thumbnail::Known(url) => url.as_deref(),
            Thumbnail::FetchOnAccess => None,
        }
    }

    /// Title if it has already been resolved.
    pub fn known_title(&self) -> Option<&str> {
        self.title.get().and_then(Option::as_deref)
    }

    pub fn width(&self) -> Option<u32> {
        self.width
    }

    pub fn height(&self) -> Option<u32> {
        self.height
    }

    /// Title, fetched on first access and memoized on this instance.
    pub async fn title(&self, fetcher: &MetadataFetcher) -> Result<Option<&str>> {
        let title = self
            .title
            .get_or_try_init(|| async {
                let document = fetcher
                    .fetch_metadata(self.provider, &self.code, &self.source_url)
                    .await?;
                Ok::<_, EmbedError>(document.title)
            })
            .await?;
        Ok(title.as_deref())
    }

    /// Thumbnail URL. Fetch-on-access thumbnails go through the fetcher on
    /// every call.
    pub async fn thumbnail_url(&self, fetcher: &MetadataFetcher) -> Result<Option<String>> {
        match &self.thumbnail {
            Thumbnail::Known(url) => Ok(url.clone()),
            Thumbnail::FetchOnAccess => {
                let document = fetcher
                    .fetch_metadata(self.provider, &self.code, &self.source_url)
                    .await?;
                Ok(document.thumbnail_url)
            }
        }
    }

    /// Resolve every lazy field into a [`ResolvedVideo`].
    pub async fn describe(&self, fetcher: &MetadataFetcher) -> Result<ResolvedVideo> {
        let title = self.title(fetcher).await?.map(str::to_string);
        let thumbnail_url = self.thumbnail_url(fetcher).await?;

        Ok(ResolvedVideo {
            source_url: self.source_url.clone(),
            provider: self.provider,
            code: self.code.clone(),
            url: self.embed_url.clone(),
            thumbnail_url,
            title,
            width: self.width,
            height: self.height,
        })
    }
}
