//! Windowed pager computation shared by every list view.

/// One slot in a pager control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageItem {
    /// A clickable page number.
    Page(u32),
    /// A collapsed run of hidden pages.
    Ellipsis,
}

/// Compute the visible pager window for `current` of `last` pages.
///
/// The window always contains page 1, page `last`, and every page within one
/// step of `current`; each omitted run collapses to a single ellipsis. A
/// collection that fits on one page gets no pager at all, and an out-of-range
/// cursor is clamped before windowing so the current page is always visible.
pub fn window(current: u32, last: u32) -> Vec<PageItem> {
    if last <= 1 {
        return Vec::new();
    }

    let current = current.clamp(1, last);
    let mut items = Vec::new();

    for page in 1..=last {
        if page == 1 || page == last || page.abs_diff(current) <= 1 {
            items.push(PageItem::Page(page));
        } else if !matches!(items.last(), Some(PageItem::Ellipsis)) {
            items.push(PageItem::Ellipsis);
        }
    }

    items
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pages(items: &[PageItem]) -> Vec<u32> {
        items
            .iter()
            .filter_map(|item| match item {
                PageItem::Page(p) => Some(*p),
                PageItem::Ellipsis => None,
            })
            .collect()
    }

    fn has_ellipsis(items: &[PageItem]) -> bool {
        items.iter().any(|item| matches!(item, PageItem::Ellipsis))
    }

    #[test]
    fn test_single_page_renders_no_pager() {
        assert!(window(1, 1).is_empty());
        assert!(window(1, 0).is_empty());
    }

    #[test]
    fn test_short_collections_show_every_page() {
        // Up to three pages there is never anything to collapse.
        for last in 2..=3 {
            for current in 1..=last {
                let items = window(current, last);
                assert_eq!(pages(&items), (1..=last).collect::<Vec<_>>(), "current={current} last={last}");
                assert!(!has_ellipsis(&items), "current={current} last={last}");
            }
        }
    }

    #[test]
    fn test_window_always_contains_anchors() {
        for last in 2..=20 {
            for current in 1..=last {
                let visible = pages(&window(current, last));
                assert!(visible.contains(&1), "missing page 1 for current={current} last={last}");
                assert!(visible.contains(&last), "missing last for current={current} last={last}");
                assert!(visible.contains(&current), "missing current for current={current} last={last}");
            }
        }
    }

    #[test]
    fn test_window_is_strictly_increasing() {
        for last in 2..=20 {
            for current in 1..=last {
                let visible = pages(&window(current, last));
                assert!(visible.windows(2).all(|w| w[0] < w[1]), "current={current} last={last}");
            }
        }
    }

    #[test]
    fn test_no_adjacent_ellipses() {
        for last in 2..=30 {
            for current in 1..=last {
                let items = window(current, last);
                let adjacent = items
                    .windows(2)
                    .any(|w| matches!(w, [PageItem::Ellipsis, PageItem::Ellipsis]));
                assert!(!adjacent, "current={current} last={last}");
            }
        }
    }

    #[test]
    fn test_middle_window_shape() {
        let items = window(5, 10);
        assert_eq!(
            items,
            vec![
                PageItem::Page(1),
                PageItem::Ellipsis,
                PageItem::Page(4),
                PageItem::Page(5),
                PageItem::Page(6),
                PageItem::Ellipsis,
                PageItem::Page(10),
            ]
        );
    }

    #[test]
    fn test_edge_windows_collapse_one_side_only() {
        assert_eq!(
            window(1, 10),
            vec![
                PageItem::Page(1),
                PageItem::Page(2),
                PageItem::Ellipsis,
                PageItem::Page(10),
            ]
        );
        assert_eq!(
            window(10, 10),
            vec![
                PageItem::Page(1),
                PageItem::Ellipsis,
                PageItem::Page(9),
                PageItem::Page(10),
            ]
        );
    }

    #[test]
    fn test_gap_of_one_page_still_collapses() {
        // Page 3 is the only hidden page, and it still renders as an ellipsis.
        assert_eq!(
            window(1, 4),
            vec![
                PageItem::Page(1),
                PageItem::Page(2),
                PageItem::Ellipsis,
                PageItem::Page(4),
            ]
        );
    }

    #[test]
    fn test_out_of_range_cursor_clamps() {
        assert_eq!(window(99, 5), window(5, 5));
        assert_eq!(window(0, 5), window(1, 5));
    }
}
