use regex::Regex;
use std::sync::LazyLock;
use unicode_width::UnicodeWidthChar;

use url::{ParseError, Url};

static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").unwrap());

/// Safely truncate a string, ensuring it is not truncated in the middle of multi-byte characters
///
/// The result's display width never exceeds `max_width`, ellipsis included.
#[allow(dead_code)]
pub fn truncate_str(s: &str, max_width: usize) -> String {
    use unicode_width::UnicodeWidthStr;

    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;

    for c in s.chars() {
        let char_width = c.width().unwrap_or(1);

        if current_width + char_width + 3 > max_width {
            break;
        }

        result.push(c);
        current_width += char_width;
    }

    result.push_str("...");
    result
}

/// Plain-text preview of rich content: tags stripped, at most `max_chars`
/// characters. The ellipsis is appended when the raw content, markup
/// included, is longer than `max_chars`.
pub fn text_preview(content: &str, max_chars: usize) -> String {
    let text = TAG_RE.replace_all(content, "");
    let mut preview: String = text.chars().take(max_chars).collect();
    if content.chars().count() > max_chars {
        preview.push_str("...");
    }
    preview
}

/// Joins an API path onto `base`, keeping any path prefix the base carries.
pub fn api_url(base: &str, path: &str) -> Result<Url, ParseError> {
    let mut url = Url::parse(base)?;
    if url.cannot_be_a_base() {
        return Err(ParseError::RelativeUrlWithCannotBeABaseBase);
    }
    let joined = format!(
        "{}/{}",
        url.path().trim_end_matches('/'),
        path.trim_start_matches('/')
    );
    url.set_path(&joined);
    Ok(url)
}
