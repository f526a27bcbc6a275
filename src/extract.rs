//! Video code extraction.
//!
//! YouTube and Vimeo codes come straight from the URL. YouTube has a two-step
//! strategy: the watch/short-link pattern first, then the `v` query
//! parameter. SoundCloud codes are never in the URL; they are the player
//! `src` inside the oEmbed `html` field, see [`player_src`].

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{EmbedError, Result};
use crate::provider::ProviderKind;

static YOUTUBE_CODE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)youtu(?:be\.com/watch\?v=|\.be/)(?P<code>[A-Za-z0-9_-]+)")
        .expect("valid youtube code pattern")
});

static VIMEO_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)vimeo\.com/(?P<code>[0-9]+)").expect("valid vimeo code pattern"));

static PLAYER_SRC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"src="(?P<src>.*?)""#).expect("valid player src pattern"));

/// Extract the provider-scoped code from a URL already classified as `provider`.
///
/// SoundCloud always fails here: its code only exists in the oEmbed response.
pub fn extract_code(provider: ProviderKind, url: &str) -> Result<String> {
    let code = match provider {
        ProviderKind::YouTube => youtube_code(url),
        ProviderKind::Vimeo => capture(&VIMEO_CODE, url),
        ProviderKind::SoundCloud => None,
    };

    code.ok_or_else(|| EmbedError::MissingIdentifier {
        provider,
        url: url.to_string(),
    })
}

fn youtube_code(url: &str) -> Option<String> {
    capture(&YOUTUBE_CODE, url).or_else(|| {
        tracing::debug!("YouTube pattern missed, falling back to query string: {}", url);
        query_param(url, "v")
    })
}

fn capture(pattern: &Regex, url: &str) -> Option<String> {
    pattern
        .captures(url)
        .and_then(|caps| caps.name("code"))
        .map(|m| m.as_str().to_string())
}

/// First non-empty value of `name` in the URL's query string.
///
/// Works on scheme-less input too, so only the part after `?` is parsed.
/// A `?` inside the fragment does not start a query.
fn query_param(url: &str, name: &str) -> Option<String> {
    let url = url.split('#').next().unwrap_or(url);
    let (_, query) = url.split_once('?')?;

    url::form_urlencoded::parse(query.as_bytes())
        .find(|(key, value)| key == name && !value.is_empty())
        .map(|(_, value)| value.into_owned())
}

/// Playback URL from an embed snippet: the first `src="..."` attribute.
pub fn player_src(html: &str) -> Option<String> {
    PLAYER_SRC
        .captures(html)
        .and_then(|caps| caps.name("src"))
        .map(|m| m.as_str().to_string())
        .filter(|src| !src.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn youtube_watch_url() {
        let code = extract_code(ProviderKind::YouTube, "http://www.youtube.com/watch?v=dQw4w9WgXcQ");
        assert_eq!(code.unwrap(), "dQw4w9WgXcQ");
    }

    #[test]
    fn youtube_short_url() {
        let code = extract_code(ProviderKind::YouTube, "http://youtu.be/dQw4w9WgXcQ");
        assert_eq!(code.unwrap(), "dQw4w9WgXcQ");
    }

    #[test]
    fn youtube_code_stops_at_ampersand() {
        for url in [
            "https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=42s",
            "https://www.youtube.com/watch?v=dQw4w9WgXcQ&amp;feature=share",
            "https://youtu.be/dQw4w9WgXcQ?si=abc",
        ] {
            assert_eq!(extract_code(ProviderKind::YouTube, url).unwrap(), "dQw4w9WgXcQ", "{url}");
        }
    }

    #[test]
    fn youtube_keeps_hyphens_and_underscores() {
        let code = extract_code(ProviderKind::YouTube, "https://youtu.be/a-b_C9");
        assert_eq!(code.unwrap(), "a-b_C9");
    }

    #[test]
    fn youtube_code_is_ascii_only() {
        for url in ["http://youtu.be/dQw4w9WgXcQé", "http://www.youtube.com/watch?v=dQw4w9WgXcQ日本"] {
            assert_eq!(extract_code(ProviderKind::YouTube, url).unwrap(), "dQw4w9WgXcQ", "{url}");
        }
    }

    #[test]
    fn youtube_falls_back_to_query_string() {
        let code = extract_code(
            ProviderKind::YouTube,
            "https://www.youtube.com/watch?feature=player_embedded&v=dQw4w9WgXcQ",
        );
        assert_eq!(code.unwrap(), "dQw4w9WgXcQ");
    }

    #[test]
    fn youtube_without_code_is_missing_identifier() {
        for url in [
            "http://www.youtube.com/watch?x=1",
            "http://www.youtube.com/watch?v=",
            "http://www.youtube.com/",
            "http://www.youtube.com/x#frag?v=abc",
        ] {
            assert!(
                matches!(
                    extract_code(ProviderKind::YouTube, url),
                    Err(EmbedError::MissingIdentifier { provider: ProviderKind::YouTube, .. })
                ),
                "{url}"
            );
        }
    }

    #[test]
    fn vimeo_digits() {
        assert_eq!(extract_code(ProviderKind::Vimeo, "https://vimeo.com/76979871").unwrap(), "76979871");
        assert_eq!(
            extract_code(ProviderKind::Vimeo, "https://VIMEO.com/76979871?autoplay=1").unwrap(),
            "76979871"
        );
        assert!(extract_code(ProviderKind::Vimeo, "https://vimeo.com/channels/staffpicks").is_err());
    }

    #[test]
    fn vimeo_does_not_use_query_fallback() {
        assert!(extract_code(ProviderKind::Vimeo, "https://vimeo.com/watch?v=123").is_err());
    }

    #[test]
    fn soundcloud_code_never_comes_from_url() {
        assert!(extract_code(ProviderKind::SoundCloud, "https://soundcloud.com/a/b").is_err());
    }

    #[test]
    fn extraction_is_idempotent() {
        let url = "https://youtu.be/dQw4w9WgXcQ";
        let first = extract_code(ProviderKind::YouTube, url).unwrap();
        let second = extract_code(ProviderKind::YouTube, url).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn player_src_takes_first_src() {
        let html = r#"<iframe width="100%" height="400" src="https://w.soundcloud.com/player/?url=x&a=1"></iframe><img src="other">"#;
        assert_eq!(player_src(html).unwrap(), "https://w.soundcloud.com/player/?url=x&a=1");
        assert!(player_src("<iframe></iframe>").is_none());
        assert!(player_src(r#"<iframe src=""></iframe>"#).is_none());
    }
}
