use std::ops::Range;

/// One entry of the page-number strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageItem {
    Page(usize),
    Ellipsis,
}

/// Fixed-size pages over a filtered collection, with a windowed page strip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paginator {
    page_size: usize,
    window: usize,
    current_page: usize,
}

impl Paginator {
    /// `page_size` and `window` are raised to at least 1.
    pub fn new(page_size: usize, window: usize) -> Self {
        Self {
            page_size: page_size.max(1),
            window: window.max(1),
            current_page: 1,
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn window(&self) -> usize {
        self.window
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// Never less than 1, so an empty table is "page 1 of 1".
    pub fn total_pages(&self, total_items: usize) -> usize {
        total_items.div_ceil(self.page_size).max(1)
    }

    pub fn reset(&mut self) {
        self.current_page = 1;
    }

    /// Move to `page`, clamped to `[1, total_pages]`.
    pub fn go_to(&mut self, page: usize, total_items: usize) {
        self.current_page = page.clamp(1, self.total_pages(total_items));
    }

    pub fn next(&mut self, total_items: usize) {
        self.go_to(self.current_page.saturating_add(1), total_items);
    }

    pub fn prev(&mut self, total_items: usize) {
        self.go_to(self.current_page.saturating_sub(1), total_items);
    }

    /// Keep the current page but pull it back inside the new page count.
    pub fn clamp(&mut self, total_items: usize) {
        self.go_to(self.current_page, total_items);
    }

    /// Index range of the current page. The stored page is not modified.
    pub fn page_bounds(&self, total_items: usize) -> Range<usize> {
        let page = self.current_page.clamp(1, self.total_pages(total_items));
        let start = ((page - 1) * self.page_size).min(total_items);
        let end = (page * self.page_size).min(total_items);
        start..end
    }

    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        &items[self.page_bounds(items.len())]
    }

    pub fn page_items(&self, total_items: usize) -> Vec<PageItem> {
        page_window(
            self.total_pages(total_items),
            self.current_page,
            self.window,
        )
    }
}

/// Page strip for `total` pages around `current`, with a window `window` pages wide.
///
/// When everything fits in `window + 2` slots every page is listed. Otherwise the window
/// is centred on `current` and pinned to either end so it keeps its full width; page 1
/// and the last page are always shown, with an ellipsis for any gap.
pub fn page_window(total: usize, current: usize, window: usize) -> Vec<PageItem> {
    let total = total.max(1);
    let window = window.max(1);
    let current = current.clamp(1, total);

    if total <= window + 2 {
        return (1..=total).map(PageItem::Page).collect();
    }

    let half = window / 2;
    let mut start = current.saturating_sub(half).max(1);
    let mut end = start + window - 1;
    if end > total {
        end = total;
        start = total + 1 - window;
    }

    let mut items = Vec::with_capacity(window + 4);
    if start > 1 {
        items.push(PageItem::Page(1));
        if start > 2 {
            items.push(PageItem::Ellipsis);
        }
    }
    items.extend((start..=end).map(PageItem::Page));
    if end < total {
        if end < total - 1 {
            items.push(PageItem::Ellipsis);
        }
        items.push(PageItem::Page(total));
    }
    items
}
