/// One page of an ordered sequence
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1-based page number that was requested
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
    pub total_items: usize,
}

impl<T> Page<T> {
    /// 1-based index of the first item on this page, 0 when the page is empty
    pub fn start_index(&self) -> usize {
        if self.items.is_empty() {
            0
        } else {
            (self.page - 1) * self.page_size + 1
        }
    }

    /// 1-based index of the last item on this page, 0 when the page is empty
    pub fn end_index(&self) -> usize {
        if self.items.is_empty() {
            0
        } else {
            self.start_index() + self.items.len() - 1
        }
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

/// Fixed-size slicing of ordered sequences
pub struct Paginator;

impl Paginator {
    /// Number of pages needed for `count` items; never less than one
    pub fn total_pages(count: usize, page_size: usize) -> usize {
        let page_size = page_size.max(1);
        count.div_ceil(page_size).max(1)
    }

    /// Clamp a requested page into `[1, total_pages]`
    pub fn clamp_page(page: usize, count: usize, page_size: usize) -> usize {
        page.clamp(1, Self::total_pages(count, page_size))
    }

    /// Slice out page `page` (1-based)
    ///
    /// Out-of-range pages, including page 0, yield an empty slice. A page
    /// size of 0 is treated as 1.
    pub fn paginate<T: Clone>(items: &[T], page: usize, page_size: usize) -> Page<T> {
        let page_size = page_size.max(1);
        let total_items = items.len();

        let page_items = match page.checked_sub(1).and_then(|p| p.checked_mul(page_size)) {
            Some(start) if start < total_items => {
                let end = (start + page_size).min(total_items);
                items[start..end].to_vec()
            }
            _ => Vec::new(),
        };

        Page {
            items: page_items,
            page,
            page_size,
            total_pages: Self::total_pages(total_items, page_size),
            total_items,
        }
    }
}
