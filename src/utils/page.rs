/// Fixed-size pages over a list of text entries
pub struct Page<'a> {
    items: &'a [String],
    per_page: usize,
}

impl<'a> Page<'a> {
    pub fn new(items: &'a [String], per_page: usize) -> Self {
        Page {
            items,
            per_page: per_page.max(1),
        }
    }

    /// Get total number of pages (at least one, even when empty)
    pub fn total_pages(&self) -> usize {
        self.items.len().div_ceil(self.per_page).max(1)
    }

    /// Entries on a 1-based page number
    pub fn page(&self, page_num: usize) -> Result<&'a [String], String> {
        let total_pages = self.total_pages();
        if page_num < 1 || page_num > total_pages {
            return Err(format!(
                "❌ Invalid page number. There are {} page(s)",
                total_pages
            ));
        }

        let start = (page_num - 1) * self.per_page;
        let end = std::cmp::min(start + self.per_page, self.items.len());
        Ok(&self.items[start..end])
    }
}
