//! Page link computation for the pagination bar.

use std::collections::BTreeSet;

/// One element of the rendered pagination bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageItem {
    /// A clickable page number.
    Page(u32),
    /// A collapsed gap.
    Ellipsis,
}

/// Computes the visible page links for `current` of `total` pages.
///
/// Always includes the first and last page plus one neighbor on each side
/// of the current page. A gap of exactly one page shows that page number;
/// wider gaps collapse to an ellipsis.
#[must_use]
pub fn page_items(current: u32, total: u32) -> Vec<PageItem> {
    let total = total.max(1);
    let current = current.clamp(1, total);

    let mut wanted: BTreeSet<u32> = BTreeSet::new();
    wanted.insert(1);
    wanted.insert(total);
    for page in current.saturating_sub(1)..=current.saturating_add(1) {
        if (1..=total).contains(&page) {
            wanted.insert(page);
        }
    }

    let mut items = Vec::with_capacity(wanted.len().saturating_add(2));
    let mut prev: Option<u32> = None;
    for page in wanted {
        if let Some(prev) = prev {
            match page.saturating_sub(prev) {
                0 | 1 => {}
                2 => items.push(PageItem::Page(prev.saturating_add(1))),
                _ => items.push(PageItem::Ellipsis),
            }
        }
        items.push(PageItem::Page(page));
        prev = Some(page);
    }
    items
}
