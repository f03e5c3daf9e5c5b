use std::rc::Rc;

use wasm_bindgen::prelude::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

use crate::components::scroll_reveal::ScrollReveal;
use crate::error::UiError;

type ObserverCallback = Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>;

/// Shared viewport observer for every reveal target. Disconnects on drop.
pub struct RevealObserver {
    observer: IntersectionObserver,
    _callback: ObserverCallback,
}

impl RevealObserver {
    pub fn attach(document: &Document, reveal: ScrollReveal) -> Result<Self, UiError> {
        let reveal = Rc::new(reveal);

        let callback: ObserverCallback = Closure::new({
            let reveal = reveal.clone();
            move |entries: js_sys::Array, observer: IntersectionObserver| {
                for entry in entries.iter() {
                    let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                        continue;
                    };
                    let target = entry.target();
                    if reveal.on_intersection(&target, entry.is_intersecting()) {
                        observer.unobserve(&target);
                    }
                }
            }
        });

        let options = IntersectionObserverInit::new();
        options.set_threshold(&JsValue::from_f64(reveal.threshold));
        options.set_root_margin(&reveal.root_margin);
        let observer =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)?;

        let targets = document.query_selector_all(&reveal.selector)?;
        for i in 0..targets.length() {
            if let Some(el) = targets.item(i).and_then(|n| n.dyn_into::<Element>().ok()) {
                reveal.prepare(&el);
                observer.observe(&el);
            }
        }
        log::debug!("Watching {} elements for scroll reveal", targets.length());

        Ok(Self {
            observer,
            _callback: callback,
        })
    }
}

impl Drop for RevealObserver {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}
