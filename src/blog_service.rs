#[cfg(feature = "cache")]
use crate::ThumbnailCache;
use crate::{
    BlogError, PageState, Pagination, PaginationControls, Post, PostCard, PostSource,
    ThumbnailCandidate, ThumbnailExtractor, DEFAULT_PAGE_SIZE,
};
use std::sync::Arc;
use tracing::{debug, instrument, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheStrategy {
    UseCache,
    NoCache,
}

#[derive(Debug, Clone)]
pub struct BlogServiceConfig {
    pub page_size: u32,
    pub cache_capacity: usize,
    pub cache_strategy: CacheStrategy,
}

impl Default for BlogServiceConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            cache_capacity: 1000,
            cache_strategy: CacheStrategy::UseCache,
        }
    }
}

impl BlogServiceConfig {
    pub fn new(cache_capacity: usize) -> Self {
        Self {
            cache_capacity,
            ..Default::default()
        }
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    pub fn with_cache_strategy(mut self, strategy: CacheStrategy) -> Self {
        self.cache_strategy = strategy;
        self
    }
}

/// Everything needed to render one listing page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlogPage {
    pub state: PageState,
    pub featured: Option<PostCard>,
    pub cards: Vec<PostCard>,
    pub pagination: Pagination,
    pub controls: Option<PaginationControls>,
}

impl BlogPage {
    pub fn previous_state(&self) -> Option<PageState> {
        self.state.previous(&self.pagination)
    }

    pub fn next_state(&self) -> Option<PageState> {
        self.state.next(&self.pagination)
    }
}

/// Builds listing pages from a [`PostSource`]
pub struct BlogService<S> {
    source: Arc<S>,
    extractor: ThumbnailExtractor,
    page_size: u32,
    cache_strategy: CacheStrategy,
    #[cfg(feature = "cache")]
    cache: ThumbnailCache,
}

impl<S> Clone for BlogService<S> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
            extractor: self.extractor.clone(),
            page_size: self.page_size,
            cache_strategy: self.cache_strategy,
            #[cfg(feature = "cache")]
            cache: self.cache.clone(),
        }
    }
}

impl<S: PostSource> BlogService<S> {
    pub fn new(source: S) -> Self {
        Self::new_with_config(source, BlogServiceConfig::default())
    }

    pub fn new_with_config(source: S, config: BlogServiceConfig) -> Self {
        debug!(?config, "Initializing BlogService");
        Self {
            source: Arc::new(source),
            extractor: ThumbnailExtractor::new(),
            page_size: config.page_size,
            cache_strategy: config.cache_strategy,
            #[cfg(feature = "cache")]
            cache: ThumbnailCache::new(config.cache_capacity),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Loads the listing page and the featured post concurrently. A failing
    /// featured request leaves the page without a featured card.
    #[instrument(level = "debug", skip(self))]
    pub async fn load(&self, state: PageState) -> Result<BlogPage, BlogError> {
        let request = state.request(self.page_size);
        let (page, featured) = futures::join!(
            self.source.fetch_page(request),
            self.source.fetch_featured()
        );

        let page = page.inspect_err(BlogError::log)?;
        let featured = featured.unwrap_or_else(|e| {
            warn!(error = %e, "Featured post unavailable");
            None
        });

        let cards = page.posts.iter().map(|post| self.card(post)).collect();
        let featured = featured.as_ref().map(|post| self.card(post));

        Ok(BlogPage {
            state,
            featured,
            cards,
            controls: page.pagination.controls(),
            pagination: page.pagination,
        })
    }

    pub fn card(&self, post: &Post) -> PostCard {
        if post.featured_image().is_some() {
            return PostCard::from_post(post, &self.extractor);
        }
        PostCard::with_thumbnail(post, self.thumbnail(post))
    }

    fn thumbnail(&self, post: &Post) -> ThumbnailCandidate {
        #[cfg(feature = "cache")]
        if self.cache_strategy == CacheStrategy::UseCache {
            if let Some(cached) = self.cache.get(&post.slug, post.content()) {
                return cached;
            }
            let candidate = self.extractor.extract_candidate(post.content());
            self.cache.set(post.slug.clone(), post.content(), candidate.clone());
            return candidate;
        }

        self.extractor.extract_candidate(post.content())
    }

    pub fn cache_strategy(&self) -> CacheStrategy {
        self.cache_strategy
    }

    #[cfg(feature = "cache")]
    pub fn cache(&self) -> &ThumbnailCache {
        &self.cache
    }
}
