//! Toast notifications.
//!
//! One shared toast element. A new `show` overwrites the visible message and
//! replaces the pending hide timer, so an older toast can never hide a newer one.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::dom::{Node, Scheduler, TimerHandle};

const SUCCESS_CLASSES: &str = "fixed top-6 left-4 z-50 bg-green-600 text-white px-6 py-4 rounded-lg shadow-xl transform transition-all duration-500 ease-in-out -translate-x-full opacity-0 border border-green-400";
const ERROR_CLASSES: &str = "fixed top-6 left-4 z-50 bg-red-600 text-white px-6 py-4 rounded-lg shadow-xl transform transition-all duration-500 ease-in-out -translate-x-full opacity-0 border border-red-400";

const SUCCESS_ICON: &str = r#"<path fill-rule="evenodd" d="M10 18a8 8 0 100-16 8 8 0 000 16zm3.707-9.293a1 1 0 00-1.414-1.414L9 10.586 7.707 9.293a1 1 0 00-1.414 1.414l2 2a1 1 0 001.414 0l4-4z" clip-rule="evenodd"></path>"#;
const ERROR_ICON: &str = r#"<path fill-rule="evenodd" d="M10 18a8 8 0 100-16 8 8 0 000 16zM8.707 7.293a1 1 0 00-1.414 1.414L8.586 10l-1.293 1.293a1 1 0 101.414 1.414L10 11.414l1.293 1.293a1 1 0 001.414-1.414L11.414 10l1.293-1.293a1 1 0 00-1.414-1.414L10 8.586 8.707 7.293z" clip-rule="evenodd"></path>"#;

const HIDDEN: &str = "hidden";
const OFFSCREEN: &str = "-translate-x-full";
const TRANSPARENT: &str = "opacity-0";
const ONSCREEN: &str = "translate-x-0";
const OPAQUE: &str = "opacity-100";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToastKind {
    #[default]
    Success,
    Error,
}

impl ToastKind {
    /// `"error"` selects the error variant; anything else is a success toast.
    pub fn parse(kind: &str) -> Self {
        if kind == "error" {
            ToastKind::Error
        } else {
            ToastKind::Success
        }
    }

    fn classes(&self) -> &'static str {
        match self {
            ToastKind::Success => SUCCESS_CLASSES,
            ToastKind::Error => ERROR_CLASSES,
        }
    }

    fn icon(&self) -> &'static str {
        match self {
            ToastKind::Success => SUCCESS_ICON,
            ToastKind::Error => ERROR_ICON,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ToastMessage {
    pub text: String,
    pub kind: ToastKind,
    pub duration_ms: u32,
}

impl ToastMessage {
    pub fn success(text: impl Into<String>, duration_ms: u32) -> Self {
        Self {
            text: text.into(),
            kind: ToastKind::Success,
            duration_ms,
        }
    }

    pub fn error(text: impl Into<String>, duration_ms: u32) -> Self {
        Self {
            text: text.into(),
            kind: ToastKind::Error,
            duration_ms,
        }
    }
}

/// Elements making up the toast banner.
pub struct ToastElements<N> {
    pub toast: N,
    pub message: N,
    pub icon: Option<N>,
}

struct Channel<N> {
    elements: ToastElements<N>,
    scheduler: Rc<dyn Scheduler>,
    exit_ms: u32,
    timer: Option<TimerHandle>,
}

/// Cloneable handle to the page's single toast.
pub struct Notifier<N: Node> {
    channel: Rc<RefCell<Channel<N>>>,
}

impl<N: Node> Clone for Notifier<N> {
    fn clone(&self) -> Self {
        Self {
            channel: self.channel.clone(),
        }
    }
}

impl<N: Node> Notifier<N> {
    pub fn new(elements: ToastElements<N>, scheduler: Rc<dyn Scheduler>, exit_ms: u32) -> Self {
        Self {
            channel: Rc::new(RefCell::new(Channel {
                elements,
                scheduler,
                exit_ms,
                timer: None,
            })),
        }
    }

    pub fn show(&self, toast: ToastMessage) {
        let weak = Rc::downgrade(&self.channel);
        let mut channel = self.channel.borrow_mut();
        let elements = &channel.elements;

        elements.message.set_text(&toast.text);
        elements.toast.set_class_name(toast.kind.classes());
        if let Some(icon) = &elements.icon {
            icon.set_inner_html(toast.kind.icon());
        }
        elements.toast.remove_class(HIDDEN);
        elements.toast.remove_class(OFFSCREEN);
        elements.toast.remove_class(TRANSPARENT);
        elements.toast.add_class(ONSCREEN);
        elements.toast.add_class(OPAQUE);

        let handle = channel
            .scheduler
            .schedule(toast.duration_ms, Box::new(move || begin_exit(&weak)));
        // Replacing the handle cancels whatever the previous toast left pending.
        channel.timer = Some(handle);
    }

    pub fn success(&self, text: impl Into<String>, duration_ms: u32) {
        self.show(ToastMessage::success(text, duration_ms));
    }

    pub fn error(&self, text: impl Into<String>, duration_ms: u32) {
        self.show(ToastMessage::error(text, duration_ms));
    }

    /// Starts the exit transition now instead of waiting for the timer.
    pub fn hide(&self) {
        self.channel.borrow_mut().timer = None;
        begin_exit(&Rc::downgrade(&self.channel));
    }

    pub fn is_visible(&self) -> bool {
        let channel = self.channel.borrow();
        !channel.elements.toast.has_class(HIDDEN) && channel.elements.toast.has_class(OPAQUE)
    }
}

fn begin_exit<N: Node>(weak: &Weak<RefCell<Channel<N>>>) {
    let Some(rc) = weak.upgrade() else {
        return;
    };
    let mut channel = rc.borrow_mut();
    let toast = &channel.elements.toast;
    toast.remove_class(ONSCREEN);
    toast.remove_class(OPAQUE);
    toast.add_class(OFFSCREEN);
    toast.add_class(TRANSPARENT);

    let next = weak.clone();
    let handle = channel
        .scheduler
        .schedule(channel.exit_ms, Box::new(move || finish_exit(&next)));
    channel.timer = Some(handle);
}

fn finish_exit<N: Node>(weak: &Weak<RefCell<Channel<N>>>) {
    if let Some(rc) = weak.upgrade() {
        let mut channel = rc.borrow_mut();
        channel.elements.toast.add_class(HIDDEN);
        channel.timer = None;
    }
}
