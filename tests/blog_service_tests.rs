use async_trait::async_trait;
use post_preview::{
    BlogError, BlogService, BlogServiceConfig, CacheStrategy, CardImage, PageRequest, PageSlot,
    PageState, Pagination, Post, PostSource, PostsResponse, DEFAULT_AUTHOR,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// In-memory content store paging over a fixed list of posts
struct MemorySource {
    posts: Vec<Post>,
    featured: Option<Post>,
    fail_featured: bool,
    requests: AtomicUsize,
}

impl MemorySource {
    fn new(count: usize) -> Self {
        let posts = (1..=count)
            .map(|i| {
                let content = match i % 3 {
                    0 => format!(r#"<iframe src="https://www.youtube.com/embed/vid{i}"></iframe>"#),
                    1 => format!(r#"<p>Post {i}</p><img src="/uploads/{i}.png">"#),
                    _ => format!("<p>Post {i} has no media</p>"),
                };
                post(&format!("post-{i}"), None, &content)
            })
            .collect();
        Self {
            posts,
            featured: None,
            fail_featured: false,
            requests: AtomicUsize::new(0),
        }
    }
}

fn post(slug: &str, featured_image: Option<&str>, content: &str) -> Post {
    Post {
        id: None,
        slug: slug.to_string(),
        title: format!("Title of {slug}"),
        author: Some("Newsroom".to_string()),
        published_at: Some("2024-05-01T00:00:00Z".to_string()),
        created_at: None,
        featured_image: featured_image.map(String::from),
        content: Some(content.to_string()),
        excerpt: None,
    }
}

#[async_trait]
impl PostSource for MemorySource {
    async fn fetch_page(&self, request: PageRequest) -> Result<PostsResponse, BlogError> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        let limit = request.limit as usize;
        let total_pages = self.posts.len().div_ceil(limit).max(1) as u32;
        if request.page > total_pages {
            return Err(BlogError::NotFound(format!("page {} not found", request.page)));
        }
        let start = (request.page as usize - 1) * limit;
        let posts = self.posts.iter().skip(start).take(limit).cloned().collect();

        Ok(PostsResponse {
            posts,
            pagination: Pagination {
                current_page: request.page,
                total_pages,
                total_posts: self.posts.len() as u32,
                has_next_page: request.page < total_pages,
                has_previous_page: request.page > 1,
            },
        })
    }

    async fn fetch_featured(&self) -> Result<Option<Post>, BlogError> {
        if self.fail_featured {
            return Err(BlogError::FetchError("featured endpoint down".into()));
        }
        Ok(self.featured.clone())
    }
}

/// Single-post store whose post body can be edited between loads
struct EditableSource {
    post: Mutex<Post>,
}

impl EditableSource {
    fn edit(&self, content: &str) {
        self.post.lock().unwrap().content = Some(content.to_string());
    }
}

#[async_trait]
impl PostSource for EditableSource {
    async fn fetch_page(&self, request: PageRequest) -> Result<PostsResponse, BlogError> {
        Ok(PostsResponse {
            posts: vec![self.post.lock().unwrap().clone()],
            pagination: Pagination {
                current_page: request.page,
                total_pages: 1,
                total_posts: 1,
                has_next_page: false,
                has_previous_page: false,
            },
        })
    }

    async fn fetch_featured(&self) -> Result<Option<Post>, BlogError> {
        Ok(None)
    }
}

#[tokio::test]
async fn test_first_page_cards_and_controls() {
    let service = BlogService::new(MemorySource::new(100));
    let page = service.load(PageState::default()).await.unwrap();

    assert_eq!(page.cards.len(), 12);
    assert_eq!(page.pagination.total_pages, 9);

    let controls = page.controls.as_ref().unwrap();
    assert!(!controls.previous_enabled);
    assert!(controls.next_enabled);
    assert_eq!(
        controls.slots,
        vec![
            PageSlot::Number(1),
            PageSlot::Number(2),
            PageSlot::Ellipsis,
            PageSlot::Number(9)
        ]
    );

    // post-1: inline image, post-2: nothing, post-3: youtube embed
    assert_eq!(page.cards[0].image.display_url(), Some("/uploads/1.png"));
    assert_eq!(page.cards[1].image, CardImage::Placeholder);
    assert_eq!(
        page.cards[2].image.display_url(),
        Some("https://img.youtube.com/vi/vid3/maxresdefault.jpg")
    );
}

#[tokio::test]
async fn test_navigation_recomputes_window() {
    let service = BlogService::new(MemorySource::new(120));
    let first = service.load(PageState::default()).await.unwrap();
    assert!(first.previous_state().is_none());

    let target = first.state.go_to(5);
    let page = service.load(target).await.unwrap();
    assert_eq!(
        page.controls.as_ref().unwrap().slots,
        vec![
            PageSlot::Number(1),
            PageSlot::Ellipsis,
            PageSlot::Number(4),
            PageSlot::Number(5),
            PageSlot::Number(6),
            PageSlot::Ellipsis,
            PageSlot::Number(10)
        ]
    );
    assert_eq!(page.previous_state(), Some(PageState::new(4)));
    assert_eq!(page.next_state(), Some(PageState::new(6)));
    assert_eq!(first.state.page(), 1);
}

#[tokio::test]
async fn test_single_page_has_no_controls() {
    let service = BlogService::new(MemorySource::new(5));
    let page = service.load(PageState::default()).await.unwrap();

    assert_eq!(page.cards.len(), 5);
    assert!(page.controls.is_none());
    assert!(page.next_state().is_none());
}

#[tokio::test]
async fn test_featured_post_card() {
    let mut source = MemorySource::new(3);
    source.featured = Some(post(
        "featured",
        Some("https://cdn.example.com/hero.jpg"),
        r#"<iframe src="https://youtu.be/ignored"></iframe>"#,
    ));
    let service = BlogService::new(source);

    let page = service.load(PageState::default()).await.unwrap();
    let featured = page.featured.unwrap();
    assert_eq!(
        featured.image,
        CardImage::Featured("https://cdn.example.com/hero.jpg".to_string())
    );
    assert_eq!(featured.href, "/blog/featured");
}

#[tokio::test]
async fn test_featured_failure_does_not_fail_page() {
    let mut source = MemorySource::new(3);
    source.fail_featured = true;
    let service = BlogService::new(source);

    let page = service.load(PageState::default()).await.unwrap();
    assert!(page.featured.is_none());
    assert_eq!(page.cards.len(), 3);
}

#[tokio::test]
async fn test_listing_error_propagates() {
    let service = BlogService::new(MemorySource::new(3));
    let result = service.load(PageState::new(7)).await;

    match result {
        Err(BlogError::NotFound(msg)) => assert!(msg.contains("page 7")),
        other => panic!("Expected NotFound error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_custom_page_size() {
    let config = BlogServiceConfig::new(10).with_page_size(5);
    let service = BlogService::new_with_config(MemorySource::new(12), config);

    let page = service.load(PageState::new(3)).await.unwrap();
    assert_eq!(page.cards.len(), 2);
    assert_eq!(page.pagination.total_pages, 3);
    assert!(!page.controls.unwrap().next_enabled);
}

#[cfg(feature = "cache")]
#[tokio::test]
async fn test_thumbnails_are_cached_by_slug() {
    let service = BlogService::new(MemorySource::new(12));
    service.load(PageState::default()).await.unwrap();
    assert_eq!(service.cache().len(), 12);

    let page = service.load(PageState::default()).await.unwrap();
    assert_eq!(page.cards[0].image.display_url(), Some("/uploads/1.png"));
    assert_eq!(service.source().requests.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_edited_content_refreshes_thumbnail() {
    let service = BlogService::new(EditableSource {
        post: Mutex::new(post("tour", None, r#"<img src="/old.png">"#)),
    });

    let first = service.load(PageState::default()).await.unwrap();
    assert_eq!(first.cards[0].image.display_url(), Some("/old.png"));

    service
        .source()
        .edit(r#"<iframe src="https://youtu.be/new1"></iframe>"#);
    let second = service.load(PageState::default()).await.unwrap();
    assert_eq!(
        second.cards[0].image.display_url(),
        Some("https://img.youtube.com/vi/new1/maxresdefault.jpg")
    );
    #[cfg(feature = "cache")]
    assert_eq!(service.cache().len(), 1);
}

#[cfg(feature = "cache")]
#[tokio::test]
async fn test_no_cache_strategy() {
    let config = BlogServiceConfig::default().with_cache_strategy(CacheStrategy::NoCache);
    let service = BlogService::new_with_config(MemorySource::new(12), config);
    service.load(PageState::default()).await.unwrap();

    assert_eq!(service.cache_strategy(), CacheStrategy::NoCache);
    assert!(service.cache().is_empty());
}

#[tokio::test]
async fn test_concurrent_loads() {
    let service = Arc::new(BlogService::new(MemorySource::new(60)));

    let handles: Vec<_> = (1..=5)
        .map(|page| {
            let service = Arc::clone(&service);
            tokio::spawn(async move { service.load(PageState::new(page)).await })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        let page = handle.await.unwrap().unwrap();
        assert_eq!(page.pagination.current_page, i as u32 + 1);
        assert_eq!(page.cards.len(), 12);
    }
}

#[test]
fn test_posts_response_from_json() {
    let json = r#"{
        "posts": [
            {"id": 7, "slug": "spring-launch", "title": "Spring launch",
             "author": "Marketing", "publishedAt": "2024-03-01T10:00:00Z",
             "featuredImage": null,
             "content": "<iframe src=\"https://vimeo.com/video/9001\"></iframe>"}
        ],
        "pagination": {"currentPage": 1, "totalPages": 1, "totalPosts": 1,
                       "hasNextPage": false, "hasPreviousPage": false}
    }"#;

    let response: PostsResponse = serde_json::from_str(json).unwrap();
    assert_eq!(response.posts[0].id, Some(7));
    assert_eq!(response.posts[0].featured_image(), None);
    assert!(response.pagination.controls().is_none());
}

#[tokio::test]
async fn test_featured_card_without_image_gets_text_preview() {
    let featured: Post = serde_json::from_str(
        r#"{"slug": "draft-notes", "title": "Draft notes", "author": null,
            "publishedAt": null, "createdAt": "2024-02-10T08:00:00Z",
            "featuredImage": "", "content": "<p>Three new <b>floor plans</b>.</p>"}"#,
    )
    .unwrap();
    let mut source = MemorySource::new(2);
    source.featured = Some(featured);
    let service = BlogService::new(source);

    let card = service.load(PageState::default()).await.unwrap().featured.unwrap();
    assert_eq!(card.image, CardImage::Placeholder);
    assert_eq!(card.preview, "Three new floor plans.");
    assert_eq!(card.author, DEFAULT_AUTHOR);
    assert_eq!(card.date.as_deref(), Some("2024-02-10T08:00:00Z"));
}
