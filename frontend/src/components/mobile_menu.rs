use std::cell::Cell;

use crate::dom::Node;

const ACTIVE: &str = "active";
const MENU_OPEN: &str = "menu-open";

/// Navigation drawer toggled by the hamburger button.
pub struct MobileMenu<N: Node> {
    menu: N,
    hamburger: N,
    body: N,
    open: Cell<bool>,
}

impl<N: Node> MobileMenu<N> {
    pub fn new(menu: N, hamburger: N, body: N) -> Self {
        let open = menu.has_class(ACTIVE);
        Self {
            menu,
            hamburger,
            body,
            open: Cell::new(open),
        }
    }

    pub fn is_open(&self) -> bool {
        self.open.get()
    }

    pub fn toggle(&self) {
        if self.is_open() {
            self.close();
        } else {
            self.open();
        }
    }

    pub fn open(&self) {
        self.menu.add_class(ACTIVE);
        self.hamburger.add_class(ACTIVE);
        self.body.add_class(MENU_OPEN);
        self.open.set(true);
        log::debug!("Menu opened");
    }

    pub fn close(&self) {
        self.menu.remove_class(ACTIVE);
        self.hamburger.remove_class(ACTIVE);
        self.body.remove_class(MENU_OPEN);
        self.open.set(false);
        log::debug!("Menu closed");
    }

    pub fn on_key(&self, key: &str) {
        if key == "Escape" && self.is_open() {
            self.close();
        }
    }

    /// Document-level click. A target that cannot be resolved to an element counts as outside.
    pub fn on_document_click(&self, target: Option<&N>) {
        if !self.is_open() {
            return;
        }
        let inside = target
            .map(|t| self.menu.contains(t) || self.hamburger.contains(t))
            .unwrap_or(false);
        if !inside {
            self.close();
        }
    }
}
