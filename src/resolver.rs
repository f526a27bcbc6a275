//! Resolution entry point.

use std::sync::Arc;

use futures::future::join_all;

use crate::backend::{self, ResolvedVideo, VideoReference};
use crate::cache::{FileCache, MetadataCache, NoCache};
use crate::config::Config;
use crate::error::Result;
use crate::http_client::{HttpTransport, Transport};
use crate::oembed::MetadataFetcher;

/// Resolves video URLs against a transport and a metadata cache.
///
/// Resolutions are independent. Concurrent lookups of the same URL are not
/// collapsed, so both may miss the cache and fetch.
///
/// # Example
///
/// ```rust,no_run
/// use vembed::Resolver;
///
/// # async fn example() -> anyhow::Result<()> {
/// let resolver = Resolver::from_config(&vembed::Config::default())?;
/// let video = resolver.resolve("https://youtu.be/dQw4w9WgXcQ").await?;
///
/// println!("{}", video.embed_url());
/// println!("{:?}", resolver.title(&video).await?);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Resolver {
    fetcher: MetadataFetcher,
}

impl Resolver {
    pub fn new(transport: Arc<dyn Transport>, cache: Arc<dyn MetadataCache>) -> Self {
        Self {
            fetcher: MetadataFetcher::new(transport, cache),
        }
    }

    /// HTTP transport plus a file cache (or none, if disabled).
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let transport = Arc::new(HttpTransport::with_config(&config.http)?);
        let cache: Arc<dyn MetadataCache> = if config.cache.enabled {
            let dir = config.cache.resolved_dir();
            tracing::debug!("Using metadata cache at {}", dir.display());
            Arc::new(FileCache::new(dir))
        } else {
            Arc::new(NoCache)
        };
        Ok(Self::new(transport, cache))
    }

    pub async fn resolve(&self, url: &str) -> Result<VideoReference> {
        backend::resolve(url, &self.fetcher).await
    }

    /// Resolve several URLs concurrently. Results keep input order.
    pub async fn resolve_all<S: AsRef<str>>(&self, urls: &[S]) -> Vec<Result<VideoReference>> {
        join_all(urls.iter().map(|url| self.resolve(url.as_ref()))).await
    }

    pub async fn title<'a>(&self, video: &'a VideoReference) -> Result<Option<&'a str>> {
        video.title(&self.fetcher).await
    }

    pub async fn thumbnail_url(&self, video: &VideoReference) -> Result<Option<String>> {
        video.thumbnail_url(&self.fetcher).await
    }

    pub async fn describe(&self, video: &VideoReference) -> Result<ResolvedVideo> {
        video.describe(&self.fetcher).await
    }
}
