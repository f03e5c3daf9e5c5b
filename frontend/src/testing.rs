//! In-memory stand-ins for the DOM ports.

use std::cell::{Cell, RefCell};
use std::collections::{BTreeSet, HashMap};
use std::rc::{Rc, Weak};

use crate::dom::{ListenerHandle, Node, PlayerEvent, Scheduler, TimerHandle, VideoPlayer};
use crate::utils::video_format::SourceDescriptor;

#[derive(Default)]
struct NodeState {
    classes: BTreeSet<String>,
    styles: HashMap<String, String>,
    attributes: HashMap<String, String>,
    value: Option<String>,
    text: String,
    html: String,
    children: Vec<FakeNode>,
}

#[derive(Clone, Default)]
pub struct FakeNode(Rc<RefCell<NodeState>>);

impl FakeNode {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_class(self, name: &str) -> Self {
        self.add_class(name);
        self
    }

    pub fn with_attr(self, name: &str, value: &str) -> Self {
        self.0
            .borrow_mut()
            .attributes
            .insert(name.to_string(), value.to_string());
        self
    }

    pub fn with_value(self, value: &str) -> Self {
        self.set_value(value);
        self
    }

    pub fn set_value(&self, value: &str) {
        self.0.borrow_mut().value = Some(value.to_string());
    }

    pub fn append(&self, child: &FakeNode) {
        self.0.borrow_mut().children.push(child.clone());
    }

    pub fn text(&self) -> String {
        self.0.borrow().text.clone()
    }

    pub fn inner_html(&self) -> String {
        self.0.borrow().html.clone()
    }
}

impl Node for FakeNode {
    fn add_class(&self, name: &str) {
        self.0.borrow_mut().classes.insert(name.to_string());
    }

    fn remove_class(&self, name: &str) {
        self.0.borrow_mut().classes.remove(name);
    }

    fn has_class(&self, name: &str) -> bool {
        self.0.borrow().classes.contains(name)
    }

    fn set_class_name(&self, value: &str) {
        self.0.borrow_mut().classes = value.split_whitespace().map(str::to_string).collect();
    }

    fn set_style(&self, property: &str, value: &str) {
        self.0
            .borrow_mut()
            .styles
            .insert(property.to_string(), value.to_string());
    }

    fn style(&self, property: &str) -> String {
        self.0
            .borrow()
            .styles
            .get(property)
            .cloned()
            .unwrap_or_default()
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.0.borrow().attributes.get(name).cloned()
    }

    fn value(&self) -> Option<String> {
        self.0.borrow().value.clone()
    }

    fn set_text(&self, text: &str) {
        self.0.borrow_mut().text = text.to_string();
    }

    fn set_inner_html(&self, html: &str) {
        self.0.borrow_mut().html = html.to_string();
    }

    fn contains(&self, other: &Self) -> bool {
        self.is_same(other)
            || self
                .0
                .borrow()
                .children
                .iter()
                .any(|child| child.contains(other))
    }

    fn is_same(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Only `.class` selectors are understood.
    fn query(&self, selector: &str) -> Option<Self> {
        let class = selector.strip_prefix('.')?;
        self.0.borrow().children.iter().find_map(|child| {
            if child.has_class(class) {
                Some(child.clone())
            } else {
                child.query(selector)
            }
        })
    }
}

#[derive(Default)]
struct PlayerState {
    slots: Vec<(String, String)>,
    loads: usize,
    plays: usize,
    paused: bool,
    current_time: f64,
    error_visible: bool,
    next_listener: u64,
    listeners: Vec<(u64, PlayerEvent, Box<dyn FnOnce()>)>,
}

struct RemoveOnDrop {
    state: Weak<RefCell<PlayerState>>,
    id: u64,
}

impl Drop for RemoveOnDrop {
    fn drop(&mut self) {
        if let Some(state) = self.state.upgrade() {
            state.borrow_mut().listeners.retain(|(id, _, _)| *id != self.id);
        }
    }
}

#[derive(Clone)]
pub struct FakePlayer(Rc<RefCell<PlayerState>>);

impl FakePlayer {
    pub fn with_slots(count: usize) -> Self {
        let state = PlayerState {
            slots: vec![(String::new(), String::new()); count],
            ..PlayerState::default()
        };
        Self(Rc::new(RefCell::new(state)))
    }

    pub fn slots(&self) -> Vec<(String, String)> {
        self.0.borrow().slots.clone()
    }

    pub fn loads(&self) -> usize {
        self.0.borrow().loads
    }

    pub fn plays(&self) -> usize {
        self.0.borrow().plays
    }

    pub fn is_paused(&self) -> bool {
        self.0.borrow().paused
    }

    pub fn error_visible(&self) -> bool {
        self.0.borrow().error_visible
    }

    pub fn listener_count(&self, event: PlayerEvent) -> usize {
        self.0
            .borrow()
            .listeners
            .iter()
            .filter(|(_, e, _)| *e == event)
            .count()
    }

    /// Fires `event`, consuming the one-shot listeners registered for it.
    pub fn dispatch(&self, event: PlayerEvent) {
        let fired: Vec<Box<dyn FnOnce()>> = {
            let mut state = self.0.borrow_mut();
            let (fired, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut state.listeners)
                .into_iter()
                .partition(|(_, e, _)| *e == event);
            state.listeners = kept;
            fired.into_iter().map(|(_, _, cb)| cb).collect()
        };
        for callback in fired {
            callback();
        }
    }
}

impl VideoPlayer for FakePlayer {
    fn clear_sources(&self) {
        for slot in self.0.borrow_mut().slots.iter_mut() {
            *slot = (String::new(), String::new());
        }
    }

    fn source_slots(&self) -> usize {
        self.0.borrow().slots.len()
    }

    fn set_source(&self, slot: usize, source: &SourceDescriptor) {
        if let Some(entry) = self.0.borrow_mut().slots.get_mut(slot) {
            *entry = (source.src.clone(), source.mime_type.clone());
        }
    }

    fn current_src(&self) -> String {
        self.0
            .borrow()
            .slots
            .first()
            .map(|(src, _)| src.clone())
            .unwrap_or_default()
    }

    fn load(&self) {
        self.0.borrow_mut().loads += 1;
    }

    fn play(&self) {
        let mut state = self.0.borrow_mut();
        state.plays += 1;
        state.paused = false;
    }

    fn pause(&self) {
        self.0.borrow_mut().paused = true;
    }

    fn current_time(&self) -> f64 {
        self.0.borrow().current_time
    }

    fn set_current_time(&self, seconds: f64) {
        self.0.borrow_mut().current_time = seconds;
    }

    fn show_error(&self) {
        self.0.borrow_mut().error_visible = true;
    }

    fn hide_error(&self) {
        self.0.borrow_mut().error_visible = false;
    }

    fn once(&self, event: PlayerEvent, callback: Box<dyn FnOnce()>) -> ListenerHandle {
        let mut state = self.0.borrow_mut();
        state.next_listener += 1;
        let id = state.next_listener;
        state.listeners.push((id, event, callback));
        ListenerHandle::new(RemoveOnDrop {
            state: Rc::downgrade(&self.0),
            id,
        })
    }
}

struct Entry {
    due: u64,
    seq: u64,
    task: Box<dyn FnOnce()>,
    cancelled: Rc<Cell<bool>>,
}

#[derive(Default)]
struct Clock {
    now: u64,
    seq: u64,
    queue: Vec<Entry>,
}

struct CancelOnDrop(Rc<Cell<bool>>);

impl Drop for CancelOnDrop {
    fn drop(&mut self) {
        self.0.set(true);
    }
}

/// Timer queue driven by hand with [`ManualScheduler::advance`].
#[derive(Clone, Default)]
pub struct ManualScheduler(Rc<RefCell<Clock>>);

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> u64 {
        self.0.borrow().now
    }

    pub fn pending(&self) -> usize {
        self.0
            .borrow()
            .queue
            .iter()
            .filter(|e| !e.cancelled.get())
            .count()
    }

    /// Moves the clock forward, running due tasks in (due, scheduling) order.
    /// Tasks scheduled while advancing run too if they fall inside the window.
    pub fn advance(&self, ms: u64) {
        let target = self.now() + ms;
        loop {
            let next = {
                let mut clock = self.0.borrow_mut();
                clock.queue.retain(|e| !e.cancelled.get());
                let index = clock
                    .queue
                    .iter()
                    .enumerate()
                    .filter(|(_, e)| e.due <= target)
                    .min_by_key(|(_, e)| (e.due, e.seq))
                    .map(|(i, _)| i);
                index.map(|i| {
                    let entry = clock.queue.remove(i);
                    clock.now = entry.due;
                    entry
                })
            };
            match next {
                Some(entry) => (entry.task)(),
                None => break,
            }
        }
        self.0.borrow_mut().now = target;
    }

    pub fn rc(&self) -> Rc<dyn Scheduler> {
        Rc::new(self.clone())
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> TimerHandle {
        let cancelled = Rc::new(Cell::new(false));
        let mut clock = self.0.borrow_mut();
        clock.seq += 1;
        let entry = Entry {
            due: clock.now + u64::from(delay_ms),
            seq: clock.seq,
            task,
            cancelled: cancelled.clone(),
        };
        clock.queue.push(entry);
        TimerHandle::new(CancelOnDrop(cancelled))
    }
}
