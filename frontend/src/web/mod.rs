//! Browser side: `web-sys` implementations of the ports and the page lifetime.

use std::cell::RefCell;

use wasm_bindgen::prelude::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, Window};

use crate::components::notification::ToastKind;
use crate::config::{SiteConfig, CONFIG_ELEMENT_ID};
use crate::error::UiError;

mod element;
pub mod events;
pub mod form;
pub mod page;
pub mod player;
pub mod reveal;
pub mod timer;

use page::Page;

thread_local! {
    static PAGE: RefCell<Option<Page>> = RefCell::new(None);
}

fn with_page(f: impl FnOnce(&Page)) {
    PAGE.with(|page| match page.borrow().as_ref() {
        Some(page) => f(page),
        None => log::warn!("Page is not mounted yet"),
    });
}

fn read_config(document: &Document) -> SiteConfig {
    let raw = document
        .get_element_by_id(CONFIG_ELEMENT_ID)
        .and_then(|el| el.text_content());
    SiteConfig::from_json_or_default(raw.as_deref())
}

fn mount(window: &Window, document: &Document) -> Result<(), UiError> {
    let config = read_config(document);
    let page = Page::mount(window, document, config)?;
    // Replacing a previous page drops its listeners.
    let previous = PAGE.with(|slot| slot.borrow_mut().replace(page));
    drop(previous);
    Ok(())
}

pub fn unmount() {
    let page = PAGE.with(|slot| slot.borrow_mut().take());
    if page.is_some() {
        log::info!("Page unmounted");
    }
}

fn set_global(window: &Window, name: &str, function: JsValue) -> Result<(), UiError> {
    js_sys::Reflect::set(window, &JsValue::from_str(name), &function)?;
    Ok(())
}

/// Publishes the functions the markup calls from inline `onclick` attributes.
fn install_globals(window: &Window) -> Result<(), UiError> {
    let open = Closure::<dyn Fn(JsValue)>::new(|trigger: JsValue| match trigger.dyn_into::<Element>() {
        Ok(trigger) => with_page(|page| page.open_video(&trigger)),
        Err(_) => log::error!("openVideoModal needs the clicked element"),
    });
    set_global(window, "openVideoModal", open.into_js_value())?;

    let close = Closure::<dyn Fn()>::new(|| with_page(Page::close_video));
    set_global(window, "closeVideoModal", close.into_js_value())?;

    let toggle = Closure::<dyn Fn()>::new(|| with_page(Page::toggle_menu));
    set_global(window, "toggleMobileMenu", toggle.into_js_value())?;

    let close_menu = Closure::<dyn Fn()>::new(|| with_page(Page::close_menu));
    set_global(window, "closeMobileMenu", close_menu.into_js_value())?;

    let toast = Closure::<dyn Fn(JsValue, JsValue, JsValue)>::new(
        |message: JsValue, duration: JsValue, kind: JsValue| {
            let text = message.as_string().unwrap_or_default();
            let duration_ms = duration.as_f64().filter(|d| *d >= 0.0).map(|d| d as u32);
            let kind = kind
                .as_string()
                .map(|k| ToastKind::parse(&k))
                .unwrap_or_default();
            with_page(|page| page.show_toast(text, duration_ms, kind));
        },
    );
    set_global(window, "showToast", toast.into_js_value())?;

    Ok(())
}

pub fn boot() -> Result<(), UiError> {
    wasm_logger::init(wasm_logger::Config::new(log::Level::Info));

    let window = web_sys::window().ok_or_else(|| UiError::MissingElement("window".to_string()))?;
    let document = window
        .document()
        .ok_or_else(|| UiError::MissingElement("document".to_string()))?;

    install_globals(&window)?;

    if document.ready_state() == "loading" {
        let (w, d) = (window.clone(), document.clone());
        let on_ready = Closure::once_into_js(move || {
            if let Err(e) = mount(&w, &d) {
                log::error!("Failed to mount page: {}", e);
            }
        });
        document.add_event_listener_with_callback("DOMContentLoaded", on_ready.unchecked_ref())?;
    } else {
        mount(&window, &document)?;
    }
    Ok(())
}
