use gloo_timers::callback::Timeout;

use crate::dom::{Scheduler, TimerHandle};

/// `setTimeout` via gloo. The `Timeout` lives inside the handle, so dropping it clears the timer.
#[derive(Clone, Copy, Default)]
pub struct BrowserScheduler;

impl Scheduler for BrowserScheduler {
    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> TimerHandle {
        TimerHandle::new(Timeout::new(delay_ms, task))
    }
}
