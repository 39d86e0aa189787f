//! Paging of the result list

use crate::utils::PAGE_WINDOW_RADIUS;

/// One page of a slice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page<'a, T> {
    pub items: &'a [T],
    /// 1-based page number, clamped into range
    pub number: usize,
    pub per_page: usize,
    /// 0 for an empty list
    pub total_pages: usize,
    pub total_items: usize,
}

impl<T> Page<'_, T> {
    #[must_use]
    pub fn has_previous(&self) -> bool {
        self.number > 1
    }

    #[must_use]
    pub fn has_next(&self) -> bool {
        self.number < self.total_pages
    }

    /// 1-based position of the first item on this page, 0 when empty
    #[must_use]
    pub fn first_item_number(&self) -> usize {
        if self.items.is_empty() {
            0
        } else {
            (self.number - 1) * self.per_page + 1
        }
    }
}

/// Cut page `page` (1-based) out of `items`
///
/// Out-of-range page numbers are clamped to the first or last page and a
/// `per_page` of 0 is treated as 1.
#[must_use]
pub fn paginate<T>(items: &[T], page: usize, per_page: usize) -> Page<'_, T> {
    let per_page = per_page.max(1);
    let total_pages = items.len().div_ceil(per_page);
    let number = page.clamp(1, total_pages.max(1));

    let start = ((number - 1) * per_page).min(items.len());
    let end = (start + per_page).min(items.len());

    Page {
        items: &items[start..end],
        number,
        per_page,
        total_pages,
        total_items: items.len(),
    }
}

/// Entry of the page navigation bar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageLink {
    Number(usize),
    Ellipsis,
}

/// Navigation entries for `current` out of `total` pages
///
/// The first and last pages are always listed, as is every page within two
/// of the current one. The page just beyond that window on either side is
/// shown as an ellipsis.
#[must_use]
pub fn page_window(current: usize, total: usize) -> Vec<PageLink> {
    let near = |page: usize| page.abs_diff(current) <= PAGE_WINDOW_RADIUS;
    let edge = |page: usize| page.abs_diff(current) == PAGE_WINDOW_RADIUS + 1;

    (1..=total)
        .filter_map(|page| {
            if page == 1 || page == total || near(page) {
                Some(PageLink::Number(page))
            } else if edge(page) {
                Some(PageLink::Ellipsis)
            } else {
                None
            }
        })
        .collect()
}
