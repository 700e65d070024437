use crate::embed::ThumbnailResolver;
use regex::Regex;
use std::sync::LazyLock;
use tracing::{debug, instrument};

/// Where a thumbnail candidate came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum ThumbnailSource {
    Embed,
    InlineImage,
    None,
}

/// The URL chosen to represent a post without a featured image.
///
/// `url` is non-empty exactly when `source` is not [`ThumbnailSource::None`].
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ThumbnailCandidate {
    url: String,
    source: ThumbnailSource,
}

impl ThumbnailCandidate {
    pub fn none() -> Self {
        Self {
            url: String::new(),
            source: ThumbnailSource::None,
        }
    }

    fn found(url: String, source: ThumbnailSource) -> Self {
        if url.is_empty() {
            return Self::none();
        }
        Self { url, source }
    }

    pub fn url(&self) -> Option<&str> {
        match self.source {
            ThumbnailSource::None => None,
            _ => Some(&self.url),
        }
    }

    pub fn source(&self) -> ThumbnailSource {
        self.source
    }

    pub fn is_none(&self) -> bool {
        self.source == ThumbnailSource::None
    }

    pub fn into_url(self) -> Option<String> {
        match self.source {
            ThumbnailSource::None => None,
            _ => Some(self.url),
        }
    }
}

/// Quoting styles tolerated for an embed's `src` attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum QuoteStyle {
    Quoted,
    EntityQuoted,
    SingleQuoted,
    Unquoted,
}

struct SrcPattern {
    style: QuoteStyle,
    priority: u8,
    regex: Regex,
}

static IFRAME_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<iframe[^>]*>").unwrap());

static EMBED_SRC_PATTERNS: LazyLock<Vec<SrcPattern>> = LazyLock::new(|| {
    let mut patterns = vec![
        SrcPattern {
            style: QuoteStyle::Quoted,
            priority: 0,
            regex: Regex::new(r#"(?i)src=["']([^"']+)["']"#).unwrap(),
        },
        SrcPattern {
            style: QuoteStyle::EntityQuoted,
            priority: 1,
            regex: Regex::new(r#"(?i)src=(?:&quot;|"")([^"]+?)(?:&quot;|"")"#).unwrap(),
        },
        SrcPattern {
            style: QuoteStyle::SingleQuoted,
            priority: 2,
            regex: Regex::new(r"(?i)src='([^']+)'").unwrap(),
        },
        SrcPattern {
            style: QuoteStyle::Unquoted,
            priority: 3,
            regex: Regex::new(r"(?i)src=([^\s>]+)").unwrap(),
        },
    ];
    patterns.sort_by_key(|p| p.priority);
    patterns
});

// Quoted source first, then unquoted.
static IMG_TAG_PATTERNS: LazyLock<[Regex; 2]> = LazyLock::new(|| {
    [
        Regex::new(r#"(?i)<img[^>]+src=["']([^"']+)["'][^>]*>"#).unwrap(),
        Regex::new(r"(?i)<img[^>]+src=([^\s>]+)[^>]*>").unwrap(),
    ]
});

static IMG_SRC_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)src=["']?([^"'\s>]+)"#).unwrap());

static IMAGE_SUFFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\.(jpg|jpeg|png|gif|webp|svg)(\?|$)").unwrap());

/// Thumbnail extractor, picks a representative image out of raw post content
#[derive(Clone, Default)]
pub struct ThumbnailExtractor {
    resolver: ThumbnailResolver,
}

impl ThumbnailExtractor {
    pub fn new() -> Self {
        Self {
            resolver: ThumbnailResolver::new(),
        }
    }

    /// Returns the thumbnail URL for `content`, or `None` when nothing qualifies.
    pub fn extract(&self, content: &str) -> Option<String> {
        self.extract_candidate(content).into_url()
    }

    #[instrument(level = "debug", skip_all, fields(len = content.len()))]
    pub fn extract_candidate(&self, content: &str) -> ThumbnailCandidate {
        if content.is_empty() {
            return ThumbnailCandidate::none();
        }

        if let Some(url) = self
            .first_embed_src(content)
            .and_then(|src| self.resolver.resolve(src))
        {
            return ThumbnailCandidate::found(url, ThumbnailSource::Embed);
        }

        match self.first_inline_image(content) {
            Some(src) => ThumbnailCandidate::found(src.to_string(), ThumbnailSource::InlineImage),
            None => {
                debug!("No thumbnail candidate in content");
                ThumbnailCandidate::none()
            }
        }
    }

    /// Source URL of the first iframe tag. Later iframes are never consulted.
    fn first_embed_src<'a>(&self, content: &'a str) -> Option<&'a str> {
        let tag = IFRAME_TAG_RE.find(content)?.as_str();

        let found = EMBED_SRC_PATTERNS.iter().find_map(|pattern| {
            pattern
                .regex
                .captures(tag)
                .and_then(|caps| caps.get(1))
                .map(|m| (pattern.style, m.as_str()))
        });

        match found {
            Some((style, src)) => {
                debug!(?style, src, "Found embed source");
                Some(src)
            }
            None => {
                debug!(tag, "Embed tag has no extractable source");
                None
            }
        }
    }

    fn first_inline_image<'a>(&self, content: &'a str) -> Option<&'a str> {
        IMG_TAG_PATTERNS.iter().find_map(|pattern| {
            let tag = pattern.find(content)?.as_str();
            let src = IMG_SRC_RE.captures(tag)?.get(1)?.as_str();
            is_acceptable_image_src(src).then_some(src)
        })
    }
}

/// Accepts sources with a known image suffix, absolute URLs and root-relative paths.
pub fn is_acceptable_image_src(src: &str) -> bool {
    IMAGE_SUFFIX_RE.is_match(src) || src.starts_with("http") || src.starts_with('/')
}
