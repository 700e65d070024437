use async_trait::async_trait;

mod blog_service;
mod cache;
mod card;
mod embed;
mod error;
mod extractor;
mod fallback;
mod fetcher;
#[cfg(feature = "logging")]
mod logging;
mod pagination;
mod utils;

pub use blog_service::{BlogPage, BlogService, BlogServiceConfig, CacheStrategy};
#[cfg(feature = "cache")]
pub use cache::ThumbnailCache;
pub use card::{CardImage, PostCard, DEFAULT_AUTHOR, NO_PREVIEW_TEXT};
pub use embed::{
    EmbedPlatform, EmbedReference, ThumbnailResolver, VUMBNAIL_TEMPLATE, YOUTUBE_HQ_TEMPLATE,
    YOUTUBE_MAXRES_TEMPLATE,
};
pub use error::BlogError;
pub use extractor::{
    is_acceptable_image_src, ThumbnailCandidate, ThumbnailExtractor, ThumbnailSource,
};
pub use fallback::{FailureOutcome, FallbackState, ImageFallbackChain};
pub use fetcher::{Fetcher, FetcherConfig};
#[cfg(feature = "logging")]
pub use logging::{log_card, setup_logging, LogConfig, LogLevelGuard};
pub use pagination::{
    window, PageRequest, PageSlot, PageState, Pagination, PaginationControls, DEFAULT_PAGE_SIZE,
};

/// A post record as served by the content store
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: Option<i64>,
    pub slug: String,
    pub title: String,
    pub author: Option<String>,
    pub published_at: Option<String>,
    pub created_at: Option<String>,
    pub featured_image: Option<String>,
    pub content: Option<String>,
    pub excerpt: Option<String>,
}

impl Post {
    /// Featured image URL, ignoring empty values.
    pub fn featured_image(&self) -> Option<&str> {
        self.featured_image.as_deref().filter(|url| !url.is_empty())
    }

    pub fn content(&self) -> &str {
        self.content.as_deref().unwrap_or_default()
    }

    /// Display date: publication date, or creation date for unpublished posts.
    pub fn date(&self) -> Option<&str> {
        self.published_at.as_deref().or(self.created_at.as_deref())
    }
}

/// One page of the post listing
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PostsResponse {
    pub posts: Vec<Post>,
    pub pagination: Pagination,
}

/// Content store that supplies posts to the listing
#[async_trait]
pub trait PostSource: Send + Sync {
    async fn fetch_page(&self, request: PageRequest) -> Result<PostsResponse, BlogError>;

    async fn fetch_featured(&self) -> Result<Option<Post>, BlogError>;
}
