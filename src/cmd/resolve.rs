use anyhow::{bail, Context, Result};

use vembed::{Config, ResolvedVideo, Resolver};

use crate::OutputFormat;

pub async fn cmd_resolve(urls: &[String], format: OutputFormat, no_cache: bool) -> Result<()> {
    let mut config = Config::load()?;
    if no_cache {
        config.cache.enabled = false;
    }
    let resolver = Resolver::from_config(&config).context("failed to build resolver")?;

    let mut resolved = Vec::with_capacity(urls.len());
    let mut failures = 0usize;

    for (url, result) in urls.iter().zip(resolver.resolve_all(urls).await) {
        let described = match result {
            Ok(video) => resolver.describe(&video).await,
            Err(e) => Err(e),
        };
        match described {
            Ok(video) => resolved.push(video),
            Err(e) => {
                failures += 1;
                eprintln!("❌ {url}: {e}");
            }
        }
    }

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&resolved)?),
        OutputFormat::Text => resolved.iter().for_each(print_video),
    }

    if failures > 0 {
        bail!("{failures} of {} URLs failed to resolve", urls.len());
    }
    Ok(())
}

fn print_video(video: &ResolvedVideo) {
    println!("🎬 {} {}", video.provider, video.code);
    if let Some(ref title) = video.title {
        println!("   Title: {title}");
    }
    println!("   Embed: {}", video.url);
    if let Some(ref thumbnail) = video.thumbnail_url {
        println!("   Thumbnail: {thumbnail}");
    }
    if let (Some(width), Some(height)) = (video.width, video.height) {
        println!("   Size: {width}x{height}");
    } else if let Some(height) = video.height {
        println!("   Height: {height}");
    }
    println!();
}
