/// An entry in the compact page picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageItem {
    Page(u32),
    /// A run of skipped pages.
    Gap,
}

/// Pick the pages worth rendering: always page 1 and the last page, the
/// current page and its direct neighbors when in range, and one gap marker
/// per skipped run.
pub fn page_window(current: u32, total: u32) -> Vec<PageItem> {
    if total == 0 {
        return Vec::new();
    }
    let current = current.clamp(1, total);

    let mut window = Vec::new();
    let mut last_kept = 0u32;
    for page in 1..=total {
        let keep = page == 1 || page == total || page.abs_diff(current) <= 1;
        if keep {
            if last_kept != 0 && page - last_kept > 1 {
                window.push(PageItem::Gap);
            }
            window.push(PageItem::Page(page));
            last_kept = page;
        }
    }
    window
}
