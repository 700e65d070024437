use crate::extractor::{ThumbnailCandidate, ThumbnailExtractor, ThumbnailSource};
use crate::fallback::{FailureOutcome, ImageFallbackChain};
use crate::utils::text_preview;
use crate::Post;

pub const DEFAULT_AUTHOR: &str = "Anewgo Team";
pub const NO_PREVIEW_TEXT: &str = "No content preview available";
const PREVIEW_CHARS: usize = 400;

/// Image shown at the top of a post card
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardImage {
    /// Explicit featured image. Rendered as is, failures are not handled.
    Featured(String),
    /// Thumbnail derived from the post content, guarded by a fallback chain.
    Extracted {
        chain: ImageFallbackChain,
        source: ThumbnailSource,
    },
    /// "No image" placeholder.
    Placeholder,
}

impl CardImage {
    pub fn from_candidate(candidate: ThumbnailCandidate) -> Self {
        let source = candidate.source();
        match candidate.into_url() {
            Some(url) => CardImage::Extracted {
                chain: ImageFallbackChain::new(url),
                source,
            },
            None => CardImage::Placeholder,
        }
    }

    /// URL the rendering surface should load, if any.
    pub fn display_url(&self) -> Option<&str> {
        match self {
            CardImage::Featured(url) => Some(url),
            CardImage::Extracted { chain, .. } => chain.current_url(),
            CardImage::Placeholder => None,
        }
    }

    /// Whether the image was taken from the article body rather than set explicitly.
    pub fn is_from_article(&self) -> bool {
        matches!(self, CardImage::Extracted { .. })
    }

    /// Failure hook for the rendered image. Returns `None` when the image has
    /// no failure handler.
    pub fn on_failure(&mut self) -> Option<FailureOutcome> {
        match self {
            CardImage::Extracted { chain, .. } => Some(chain.on_failure()),
            CardImage::Featured(_) | CardImage::Placeholder => None,
        }
    }
}

/// View model for one post in the listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostCard {
    pub slug: String,
    pub href: String,
    pub title: String,
    pub author: String,
    /// Publication date, falling back to the creation date.
    pub date: Option<String>,
    pub excerpt: Option<String>,
    /// Text shown in place of a missing image on the featured card.
    pub preview: String,
    pub image: CardImage,
}

impl PostCard {
    pub fn from_post(post: &Post, extractor: &ThumbnailExtractor) -> Self {
        match post.featured_image() {
            Some(url) => Self::with_image(post, CardImage::Featured(url.to_string())),
            None => Self::with_thumbnail(post, extractor.extract_candidate(post.content())),
        }
    }

    /// Builds a card from an already extracted thumbnail. A featured image on
    /// the post still takes precedence.
    pub fn with_thumbnail(post: &Post, candidate: ThumbnailCandidate) -> Self {
        let image = match post.featured_image() {
            Some(url) => CardImage::Featured(url.to_string()),
            None => CardImage::from_candidate(candidate),
        };
        Self::with_image(post, image)
    }

    fn with_image(post: &Post, image: CardImage) -> Self {
        Self {
            slug: post.slug.clone(),
            href: format!("/blog/{}", post.slug),
            title: post.title.clone(),
            author: post
                .author
                .clone()
                .filter(|author| !author.is_empty())
                .unwrap_or_else(|| DEFAULT_AUTHOR.to_string()),
            date: post.date().map(String::from),
            excerpt: post.excerpt.clone(),
            preview: preview(post),
            image,
        }
    }
}

fn preview(post: &Post) -> String {
    match post.content() {
        "" => post
            .excerpt
            .clone()
            .filter(|excerpt| !excerpt.is_empty())
            .unwrap_or_else(|| NO_PREVIEW_TEXT.to_string()),
        content => text_preview(content, PREVIEW_CHARS),
    }
}
