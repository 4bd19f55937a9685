//! Pagination helper - slices an ordered result set into fixed-size pages.

use serde::Serialize;

/// Page size shared by every listing endpoint.
pub const PER_PAGE: usize = 10;

/// One page of an ordered listing, plus the metadata the presentation
/// layer needs to draw a pager.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub number: usize,
    pub total_pages: usize,
    pub has_next: bool,
    pub has_previous: bool,
}

impl<T> Page<T> {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Slice `items` into the page addressed by the raw `page` query parameter.
///
/// Pages are 1-indexed; a missing parameter means page 1. A non-numeric or
/// out-of-range request clamps to the last page rather than erroring. An
/// empty listing still yields one empty page. A `per_page` of zero is
/// treated as one item per page.
pub fn paginate<T>(items: Vec<T>, per_page: usize, requested: Option<&str>) -> Page<T> {
    let per_page = per_page.max(1);
    let total_pages = items.len().div_ceil(per_page).max(1);

    let number = match requested {
        None => 1,
        Some(raw) => match raw.parse::<usize>() {
            Ok(n) if n >= 1 && n <= total_pages => n,
            _ => total_pages,
        },
    };

    let start = (number - 1) * per_page;
    let page_items: Vec<T> = items
        .into_iter()
        .skip(start)
        .take(per_page)
        .collect();

    Page {
        items: page_items,
        number,
        total_pages,
        has_next: number < total_pages,
        has_previous: number > 1,
    }
}
