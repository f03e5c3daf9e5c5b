//! Ports the controllers are written against.
//!
//! Each controller receives the elements it needs at construction and only
//! talks to them through these traits. The browser implementations live in
//! `crate::web`; tests use the in-memory fakes from `crate::testing`.

use std::any::Any;

use crate::utils::video_format::SourceDescriptor;

pub trait Node: Clone + 'static {
    fn add_class(&self, name: &str);
    fn remove_class(&self, name: &str);
    fn has_class(&self, name: &str) -> bool;
    /// Replaces the whole `class` attribute.
    fn set_class_name(&self, value: &str);
    fn set_style(&self, property: &str, value: &str);
    fn style(&self, property: &str) -> String;
    fn attribute(&self, name: &str) -> Option<String>;
    /// Current value of a form control, `None` for anything else.
    fn value(&self) -> Option<String>;
    fn set_text(&self, text: &str);
    fn set_inner_html(&self, html: &str);
    /// DOM containment: true for the node itself and any descendant.
    fn contains(&self, other: &Self) -> bool;
    fn is_same(&self, other: &Self) -> bool;
    fn query(&self, selector: &str) -> Option<Self>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerEvent {
    Error,
    LoadedData,
}

impl PlayerEvent {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlayerEvent::Error => "error",
            PlayerEvent::LoadedData => "loadeddata",
        }
    }
}

/// A video element together with its `<source>` slots and fallback error panel.
pub trait VideoPlayer: Clone + 'static {
    /// Empties every source slot (`src` and `type`).
    fn clear_sources(&self);
    fn source_slots(&self) -> usize;
    fn set_source(&self, slot: usize, source: &SourceDescriptor);
    /// `src` attribute of the first slot, empty when nothing is bound.
    fn current_src(&self) -> String;
    fn load(&self);
    /// Starts playback. Autoplay rejection is logged by the implementation, never returned.
    fn play(&self);
    fn pause(&self);
    fn current_time(&self) -> f64;
    fn set_current_time(&self, seconds: f64);
    fn show_error(&self);
    fn hide_error(&self);
    /// Registers a listener that fires at most once. Dropping the handle
    /// unregisters it if it has not fired yet.
    fn once(&self, event: PlayerEvent, callback: Box<dyn FnOnce()>) -> ListenerHandle;
}

/// Owns a registered player listener. Dropping the handle removes it.
pub struct ListenerHandle {
    _guard: Box<dyn Any>,
}

impl ListenerHandle {
    pub fn new<G: Any>(guard: G) -> Self {
        Self {
            _guard: Box::new(guard),
        }
    }
}

/// Owns a pending timer. Dropping the handle cancels the timer.
pub struct TimerHandle {
    _guard: Box<dyn Any>,
}

impl TimerHandle {
    pub fn new<G: Any>(guard: G) -> Self {
        Self {
            _guard: Box::new(guard),
        }
    }
}

pub trait Scheduler {
    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> TimerHandle;
}
