/// Selector for an in-page link's target, or `None` when there is nothing to scroll to.
pub fn target_selector(href: &str) -> Option<&str> {
    href.strip_prefix('#')
        .filter(|id| !id.is_empty())
        .map(|_| href)
}

/// Window scroll position that leaves the target clear of the fixed navigation bar.
pub fn scroll_top(target_offset_top: f64, nav_offset: f64) -> f64 {
    (target_offset_top - nav_offset).max(0.0)
}
