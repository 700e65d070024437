use crate::pagination::PageRequest;
use crate::utils::api_url;
use crate::{BlogError, Post, PostSource, PostsResponse};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::{debug, instrument, warn};
use url::Url;

const LISTING_PATH: &str = "/api/blog-posts";
const FEATURED_PATH: &str = "/api/blog-posts/featured";

/// HTTP client for the blog listing API
#[derive(Clone)]
pub struct Fetcher {
    client: Client,
    base_url: String,
}

/// Configuration for a [`Fetcher`].
///
/// ```ignore
/// let fetcher = Fetcher::new_with_config(FetcherConfig {
///     base_url: "https://blog.example.com".to_string(),
///     timeout: Duration::from_secs(5),
///     ..Default::default()
/// })?;
/// ```
#[derive(Debug, Clone)]
pub struct FetcherConfig {
    pub base_url: String,
    pub user_agent: String,
    pub timeout: Duration,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            user_agent: "post_preview/0.1.0".to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

impl Fetcher {
    pub fn new(base_url: &str) -> Result<Self, BlogError> {
        Self::new_with_config(FetcherConfig {
            base_url: base_url.to_string(),
            ..Default::default()
        })
    }

    pub fn new_with_config(config: FetcherConfig) -> Result<Self, BlogError> {
        // Reject unusable bases up front instead of on the first request.
        api_url(&config.base_url, LISTING_PATH)?;

        let client = Client::builder()
            .user_agent(config.user_agent)
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                BlogError::InvalidConfiguration(format!("Failed to create HTTP client: {e}"))
            })?;

        debug!(base_url = %config.base_url, "Fetcher initialized");
        Ok(Self {
            client,
            base_url: config.base_url,
        })
    }

    pub fn with_client(client: Client, base_url: &str) -> Result<Self, BlogError> {
        api_url(base_url, LISTING_PATH)?;
        Ok(Self {
            client,
            base_url: base_url.to_string(),
        })
    }

    /// `{base}/api/blog-posts?page={page}&limit={limit}`
    pub fn listing_url(&self, request: PageRequest) -> Result<Url, BlogError> {
        let mut url = api_url(&self.base_url, LISTING_PATH)?;
        url.query_pairs_mut()
            .append_pair("page", &request.page.to_string())
            .append_pair("limit", &request.limit.to_string());
        Ok(url)
    }

    pub fn featured_url(&self) -> Result<Url, BlogError> {
        Ok(api_url(&self.base_url, FEATURED_PATH)?)
    }
}

#[async_trait]
impl PostSource for Fetcher {
    #[instrument(level = "debug", skip(self), err)]
    async fn fetch_page(&self, request: PageRequest) -> Result<PostsResponse, BlogError> {
        let url = self.listing_url(request)?;
        let response = self.client.get(url.clone()).send().await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(BlogError::NotFound(format!("Post listing not found: {url}")));
        }
        if !status.is_success() {
            return Err(BlogError::FetchError(format!(
                "Listing request to {url} returned {status}"
            )));
        }

        let page: PostsResponse = response.json().await?;
        debug!(
            posts = page.posts.len(),
            total_pages = page.pagination.total_pages,
            "Fetched post listing"
        );
        Ok(page)
    }

    #[instrument(level = "debug", skip(self), err)]
    async fn fetch_featured(&self) -> Result<Option<Post>, BlogError> {
        let url = self.featured_url()?;
        let response = self.client.get(url.clone()).send().await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND || status == StatusCode::NO_CONTENT {
            debug!("No featured post");
            return Ok(None);
        }
        if !status.is_success() {
            warn!(%status, "Featured post request failed");
            return Err(BlogError::FetchError(format!(
                "Featured request to {url} returned {status}"
            )));
        }

        Ok(response.json::<Option<Post>>().await?)
    }
}
