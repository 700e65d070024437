use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_SIZE: u32 = 12;

/// One rendered control in the page-number strip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PageSlot {
    Number(u32),
    Ellipsis,
}

/// Computes the page-number strip for `current` out of `total` pages.
///
/// Pages 1, `total` and the neighbours of `current` are shown. A hidden page
/// exactly two away from `current` becomes an ellipsis; every other hidden
/// page produces no slot at all, so a single skipped page next to the first or
/// last page leaves no marker. Nothing is rendered for `total <= 1`.
///
/// `current` outside `1..=total` is clamped into range.
pub fn window(current: u32, total: u32) -> Vec<PageSlot> {
    if total <= 1 {
        return Vec::new();
    }
    let current = current.clamp(1, total);

    // Only the endpoints and pages within two of `current` can produce a slot.
    let mut candidates: Vec<u32> = [1, total]
        .into_iter()
        .chain(current.saturating_sub(2).max(1)..=current.saturating_add(2).min(total))
        .collect();
    candidates.sort_unstable();
    candidates.dedup();

    candidates
        .into_iter()
        .filter_map(|n| {
            if n == 1 || n == total || n.abs_diff(current) <= 1 {
                Some(PageSlot::Number(n))
            } else if current.checked_sub(2) == Some(n) || current.checked_add(2) == Some(n) {
                Some(PageSlot::Ellipsis)
            } else {
                None
            }
        })
        .collect()
}

/// Pagination block returned by the listing API alongside a page of posts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub current_page: u32,
    pub total_pages: u32,
    #[serde(default)]
    pub total_posts: u32,
    pub has_next_page: bool,
    pub has_previous_page: bool,
}

impl Pagination {
    /// Controls to render, or `None` when there is at most one page.
    pub fn controls(&self) -> Option<PaginationControls> {
        if self.total_pages <= 1 {
            return None;
        }
        Some(PaginationControls {
            previous_enabled: self.has_previous_page,
            next_enabled: self.has_next_page,
            current_page: self.current_page,
            slots: window(self.current_page, self.total_pages),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaginationControls {
    pub previous_enabled: bool,
    pub next_enabled: bool,
    pub current_page: u32,
    pub slots: Vec<PageSlot>,
}

impl PaginationControls {
    pub fn is_current(&self, slot: PageSlot) -> bool {
        slot == PageSlot::Number(self.current_page)
    }
}

/// A single page/limit query against the listing API
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub limit: u32,
}

/// The page the reader is on. Navigation produces a new value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageState {
    page: u32,
}

impl Default for PageState {
    fn default() -> Self {
        Self { page: 1 }
    }
}

impl PageState {
    pub fn new(page: u32) -> Self {
        Self { page: page.max(1) }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn go_to(self, page: u32) -> Self {
        Self::new(page)
    }

    /// Previous page, if the query layer reports one.
    pub fn previous(self, pagination: &Pagination) -> Option<Self> {
        pagination
            .has_previous_page
            .then(|| Self::new(self.page.saturating_sub(1)))
    }

    /// Next page, if the query layer reports one.
    pub fn next(self, pagination: &Pagination) -> Option<Self> {
        pagination
            .has_next_page
            .then(|| Self::new(self.page.saturating_add(1)))
    }

    pub fn request(&self, limit: u32) -> PageRequest {
        PageRequest {
            page: self.page,
            limit,
        }
    }
}
