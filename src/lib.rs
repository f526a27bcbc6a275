//! `vembed` - resolve video URLs into embeddable references
//!
//! # Features
//!
//! - **Provider detection**: YouTube, Vimeo and SoundCloud URL signatures
//! - **Code extraction**: per-provider patterns with a query-string fallback
//! - **oEmbed metadata**: titles, thumbnails and dimensions, cache-first
//! - **Pluggable collaborators**: swap the HTTP transport or cache store
//!
//! # Example
//!
//! ```rust,no_run
//! use vembed::{Config, Resolver};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let resolver = Resolver::from_config(&Config::load()?)?;
//!     let video = resolver.resolve("https://vimeo.com/76979871").await?;
//!     let resolved = resolver.describe(&video).await?;
//!     println!("{} -> {}", resolved.code, resolved.url);
//!     Ok(())
//! }
//! ```

pub mod backend;
pub mod cache;
pub mod config;
pub mod error;
pub mod extract;
pub mod http_client;
pub mod oembed;
pub mod provider;
pub mod resolver;

#[cfg(test)]
mod test_support;

pub use backend::{ResolvedVideo, Thumbnail, VideoReference};
pub use cache::{FileCache, MemoryCache, MetadataCache, NoCache};
pub use config::Config;
pub use error::{EmbedError, Result};
pub use extract::extract_code;
pub use http_client::{FetchResponse, HttpTransport, Transport};
pub use oembed::{MetadataDocument, MetadataFetcher};
pub use provider::{classify, ProviderKind, ResolutionStrategy};
pub use resolver::Resolver;

/// Version of vembed
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
