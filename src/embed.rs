use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

pub const YOUTUBE_MAXRES_TEMPLATE: &str = "https://img.youtube.com/vi/{id}/maxresdefault.jpg";
pub const YOUTUBE_HQ_TEMPLATE: &str = "https://img.youtube.com/vi/{id}/hqdefault.jpg";
pub const VUMBNAIL_TEMPLATE: &str = "https://vumbnail.com/{id}.jpg";

/// Video hosts whose embeds can be turned into a thumbnail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmbedPlatform {
    YouTube,
    Vimeo,
    VimeoPlayer,
}

struct PlatformRule {
    platform: EmbedPlatform,
    hosts: &'static [&'static str],
    excluded_hosts: &'static [&'static str],
    id_pattern: Regex,
}

// Evaluated in order. The general vimeo rule leaves the player subdomain to
// its own rule; both resolve to the same thumbnail template.
static PLATFORM_RULES: LazyLock<[PlatformRule; 3]> = LazyLock::new(|| {
    [
        PlatformRule {
            platform: EmbedPlatform::YouTube,
            hosts: &["youtube.com", "youtu.be"],
            excluded_hosts: &[],
            id_pattern: Regex::new(r"(?:youtube\.com/embed/|youtu\.be/)([^?&/#]+)").unwrap(),
        },
        PlatformRule {
            platform: EmbedPlatform::Vimeo,
            hosts: &["vimeo.com"],
            excluded_hosts: &["player.vimeo.com"],
            id_pattern: Regex::new(r"vimeo\.com/video/(\d+)").unwrap(),
        },
        PlatformRule {
            platform: EmbedPlatform::VimeoPlayer,
            hosts: &["player.vimeo.com"],
            excluded_hosts: &[],
            id_pattern: Regex::new(r"player\.vimeo\.com/video/(\d+)").unwrap(),
        },
    ]
});

/// A video embed discovered in rich content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbedReference {
    platform: EmbedPlatform,
    video_id: String,
}

impl EmbedReference {
    /// Recognises an embed source URL. Returns `None` when no platform rule
    /// yields a video id.
    pub fn parse(src: &str) -> Option<Self> {
        PLATFORM_RULES.iter().find_map(|rule| {
            if !rule.hosts.iter().any(|host| src.contains(host))
                || rule.excluded_hosts.iter().any(|host| src.contains(host))
            {
                return None;
            }
            let video_id = rule
                .id_pattern
                .captures(src)
                .and_then(|caps| caps.get(1))
                .map(|m| m.as_str())
                .filter(|id| !id.is_empty())?;

            Some(Self {
                platform: rule.platform,
                video_id: video_id.to_string(),
            })
        })
    }

    pub fn platform(&self) -> EmbedPlatform {
        self.platform
    }

    pub fn video_id(&self) -> &str {
        &self.video_id
    }

    pub fn thumbnail_url(&self) -> String {
        let template = match self.platform {
            EmbedPlatform::YouTube => YOUTUBE_MAXRES_TEMPLATE,
            EmbedPlatform::Vimeo | EmbedPlatform::VimeoPlayer => VUMBNAIL_TEMPLATE,
        };
        template.replace("{id}", &self.video_id)
    }
}

/// Maps embed source URLs to thumbnail URLs
#[derive(Clone, Copy, Debug, Default)]
pub struct ThumbnailResolver;

impl ThumbnailResolver {
    pub fn new() -> Self {
        Self
    }

    pub fn resolve(&self, embed_src: &str) -> Option<String> {
        let reference = EmbedReference::parse(embed_src)?;
        debug!(
            platform = ?reference.platform(),
            video_id = %reference.video_id(),
            "Resolved embed thumbnail"
        );
        Some(reference.thumbnail_url())
    }
}
