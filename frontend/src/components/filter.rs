//! Portfolio category filter and reel hover effect.

use std::cell::RefCell;
use std::rc::Rc;

use crate::dom::{Node, Scheduler, TimerHandle};

const ACTIVE: &str = "active";
const CATEGORY_ATTR: &str = "data-category";
pub const ALL: &str = "all";

const PLAY_BUTTON: &str = ".reel-play-button";
const PLAY_BUTTON_REST: &str = "translate(-50%, -50%) scale(1)";
const PLAY_BUTTON_HOVER: &str = "translate(-50%, -50%) scale(1.1)";

pub fn matches(selected: &str, item_category: Option<&str>) -> bool {
    selected == ALL || item_category == Some(selected)
}

pub struct CategoryFilter<N: Node> {
    buttons: Vec<N>,
    items: Vec<N>,
    scheduler: Rc<dyn Scheduler>,
    show_delay_ms: u32,
    hide_delay_ms: u32,
    // One slot per item; a new activation drops (cancels) the previous animation tail.
    pending: RefCell<Vec<Option<TimerHandle>>>,
}

impl<N: Node> CategoryFilter<N> {
    pub fn new(
        buttons: Vec<N>,
        items: Vec<N>,
        scheduler: Rc<dyn Scheduler>,
        show_delay_ms: u32,
        hide_delay_ms: u32,
    ) -> Self {
        let pending = items.iter().map(|_| None).collect();
        Self {
            buttons,
            items,
            scheduler,
            show_delay_ms,
            hide_delay_ms,
            pending: RefCell::new(pending),
        }
    }

    pub fn buttons(&self) -> &[N] {
        &self.buttons
    }

    pub fn activate(&self, button: &N) {
        let Some(category) = button.attribute(CATEGORY_ATTR) else {
            log::warn!("Filter button without {}, ignoring", CATEGORY_ATTR);
            return;
        };

        for b in &self.buttons {
            b.remove_class(ACTIVE);
        }
        button.add_class(ACTIVE);

        self.apply(&category);
    }

    pub fn apply(&self, category: &str) {
        let mut pending = self.pending.borrow_mut();
        for (item, slot) in self.items.iter().zip(pending.iter_mut()) {
            let handle = if matches(category, item.attribute(CATEGORY_ATTR).as_deref()) {
                self.reveal(item)
            } else {
                self.conceal(item)
            };
            *slot = Some(handle);
        }
    }

    fn reveal(&self, item: &N) -> TimerHandle {
        item.set_style("display", "block");
        item.set_style("opacity", "0");
        item.set_style("transform", "scale(0.8)");

        let item = item.clone();
        self.scheduler.schedule(
            self.show_delay_ms,
            Box::new(move || {
                item.set_style("opacity", "1");
                item.set_style("transform", "scale(1)");
            }),
        )
    }

    fn conceal(&self, item: &N) -> TimerHandle {
        item.set_style("opacity", "0");
        item.set_style("transform", "scale(0.8)");

        let item = item.clone();
        self.scheduler.schedule(
            self.hide_delay_ms,
            Box::new(move || item.set_style("display", "none")),
        )
    }
}

pub fn on_reel_enter<N: Node>(container: &N) {
    if let Some(button) = container.query(PLAY_BUTTON) {
        button.set_style("transform", PLAY_BUTTON_HOVER);
    }
}

pub fn on_reel_leave<N: Node>(container: &N) {
    if let Some(button) = container.query(PLAY_BUTTON) {
        button.set_style("transform", PLAY_BUTTON_REST);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeNode, ManualScheduler};

    struct Fixture {
        all: FakeNode,
        music: FakeNode,
        brand: FakeNode,
        items: Vec<FakeNode>,
        clock: ManualScheduler,
        filter: CategoryFilter<FakeNode>,
    }

    fn fixture() -> Fixture {
        let all = FakeNode::new()
            .with_class("filter-btn")
            .with_class("active")
            .with_attr("data-category", "all");
        let music = FakeNode::new()
            .with_class("filter-btn")
            .with_attr("data-category", "music");
        let brand = FakeNode::new()
            .with_class("filter-btn")
            .with_attr("data-category", "brand");
        let items: Vec<FakeNode> = ["music", "brand", "music", "wedding"]
            .iter()
            .map(|c| FakeNode::new().with_class("reel-container").with_attr("data-category", c))
            .collect();
        let clock = ManualScheduler::new();
        let filter = CategoryFilter::new(
            vec![all.clone(), music.clone(), brand.clone()],
            items.clone(),
            clock.rc(),
            100,
            300,
        );
        Fixture {
            all,
            music,
            brand,
            items,
            clock,
            filter,
        }
    }

    fn visible(item: &FakeNode) -> bool {
        item.style("display") != "none" && item.style("opacity") == "1"
    }

    #[test]
    fn clicked_button_becomes_sole_active() {
        let f = fixture();
        f.filter.activate(&f.music);
        assert!(f.music.has_class("active"));
        assert!(!f.all.has_class("active"));
        assert!(!f.brand.has_class("active"));
    }

    #[test]
    fn specific_category_leaves_only_matches_visible() {
        let f = fixture();
        f.filter.activate(&f.music);
        f.clock.advance(300);

        let shown: Vec<bool> = f.items.iter().map(visible).collect();
        assert_eq!(shown, vec![true, false, true, false]);
        assert_eq!(f.items[1].style("display"), "none");
        assert_eq!(f.items[0].style("transform"), "scale(1)");
    }

    #[test]
    fn all_shows_everything() {
        let f = fixture();
        f.filter.activate(&f.brand);
        f.clock.advance(300);
        f.filter.activate(&f.all);
        f.clock.advance(300);

        assert!(f.items.iter().all(visible));
        assert!(f.items.iter().all(|i| i.style("display") == "block"));
    }

    #[test]
    fn reveal_starts_shrunk_then_grows() {
        let f = fixture();
        f.filter.activate(&f.music);
        assert_eq!(f.items[0].style("display"), "block");
        assert_eq!(f.items[0].style("opacity"), "0");
        assert_eq!(f.items[0].style("transform"), "scale(0.8)");

        f.clock.advance(100);
        assert_eq!(f.items[0].style("opacity"), "1");
        // Hidden items stay in layout until their transition window ends.
        assert_eq!(f.items[1].style("display"), "");
    }

    #[test]
    fn quick_reselection_supersedes_pending_hide() {
        let f = fixture();
        f.filter.activate(&f.brand);
        f.clock.advance(50);
        f.filter.activate(&f.all);
        f.clock.advance(1000);

        // The music item's 300ms hide from the first click must not fire.
        assert!(f.items.iter().all(visible));
    }

    #[test]
    fn quick_reselection_supersedes_pending_reveal() {
        let f = fixture();
        f.filter.activate(&f.music);
        f.filter.activate(&f.brand);
        f.clock.advance(1000);

        let shown: Vec<bool> = f.items.iter().map(visible).collect();
        assert_eq!(shown, vec![false, true, false, false]);
        assert_eq!(f.items[0].style("opacity"), "0");
        assert_eq!(f.clock.pending(), 0);
    }

    #[test]
    fn button_without_category_is_ignored() {
        let f = fixture();
        let stray = FakeNode::new().with_class("filter-btn");
        f.filter.activate(&stray);
        assert!(f.all.has_class("active"));
        assert!(!stray.has_class("active"));
        assert_eq!(f.clock.pending(), 0);
    }

    #[test]
    fn matching_rules() {
        assert!(matches("all", None));
        assert!(matches("all", Some("music")));
        assert!(matches("music", Some("music")));
        assert!(!matches("music", Some("brand")));
        assert!(!matches("music", None));
    }

    #[test]
    fn hover_scales_play_button() {
        let container = FakeNode::new().with_class("reel-container");
        let thumb = FakeNode::new();
        let button = FakeNode::new().with_class("reel-play-button");
        thumb.append(&button);
        container.append(&thumb);

        on_reel_enter(&container);
        assert_eq!(button.style("transform"), "translate(-50%, -50%) scale(1.1)");
        on_reel_leave(&container);
        assert_eq!(button.style("transform"), "translate(-50%, -50%) scale(1)");

        let empty = FakeNode::new();
        on_reel_enter(&empty);
    }
}
