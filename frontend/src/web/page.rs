//! Looks up the markup's elements, builds the controllers and wires DOM events to them.
//!
//! Every feature is optional: when its elements are missing from the page it is skipped.

use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{
    Document, Element, EventTarget, HtmlElement, HtmlFormElement, HtmlVideoElement, ScrollBehavior,
    ScrollToOptions, Window,
};

use crate::components::anchors;
use crate::components::contact_form::{ContactForm, ContactSettings, DecisionFields};
use crate::components::filter::{self, CategoryFilter};
use crate::components::mobile_menu::MobileMenu;
use crate::components::notification::{Notifier, ToastElements, ToastKind, ToastMessage};
use crate::components::scroll_reveal::ScrollReveal;
use crate::components::video_modal::VideoModal;
use crate::config::SiteConfig;
use crate::dom::{Node, Scheduler};
use crate::error::UiError;
use crate::web::events::{current_target_element, event_key, event_target_element, Subscription};
use crate::web::form::{document_cookies, DomForm, FetchTransport};
use crate::web::player::DomPlayer;
use crate::web::reveal::RevealObserver;
use crate::web::timer::BrowserScheduler;

type Video = VideoModal<Element, DomPlayer>;
type Contact = ContactForm<DomForm, Element>;

pub struct Page {
    config: SiteConfig,
    notifier: Option<Notifier<Element>>,
    video: Option<Rc<Video>>,
    menu: Option<Rc<MobileMenu<Element>>>,
    _filter: Option<Rc<CategoryFilter<Element>>>,
    _contact: Option<Rc<Contact>>,
    decision: Option<Rc<DecisionFields<Element>>>,
    _reveal: Option<RevealObserver>,
    subscriptions: Vec<Subscription>,
}

fn by_id(document: &Document, id: &str) -> Option<Element> {
    let found = document.get_element_by_id(id);
    if found.is_none() {
        log::debug!("#{} not on this page", id);
    }
    found
}

fn query_all(document: &Document, selector: &str) -> Vec<Element> {
    let Ok(list) = document.query_selector_all(selector) else {
        log::warn!("Invalid selector {}", selector);
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

impl Page {
    pub fn mount(window: &Window, document: &Document, config: SiteConfig) -> Result<Self, UiError> {
        let body: Element = document
            .body()
            .ok_or_else(|| UiError::MissingElement("body".to_string()))?
            .into();
        let scheduler: Rc<dyn Scheduler> = Rc::new(BrowserScheduler);
        let document_target: &EventTarget = document.as_ref();

        let mut page = Self {
            config,
            notifier: None,
            video: None,
            menu: None,
            _filter: None,
            _contact: None,
            decision: None,
            _reveal: None,
            subscriptions: Vec::new(),
        };

        page.notifier = page.build_notifier(document, scheduler.clone());
        page.video = page.bind_video(document, &body, scheduler.clone())?;
        page.menu = page.bind_menu(document, &body)?;

        {
            let video = page.video.clone();
            let menu = page.menu.clone();
            page.subscriptions.push(Subscription::listen(document_target, "keydown", move |event| {
                let Some(key) = event_key(&event) else {
                    return;
                };
                if let Some(video) = &video {
                    video.on_key(&key);
                }
                if let Some(menu) = &menu {
                    menu.on_key(&key);
                }
            })?);
        }

        page._filter = page.bind_filter(document, scheduler)?;
        page.bind_reel_hover(document)?;
        page._reveal = page.attach_reveal(document);
        page.decision = page.bind_decision_fields(document)?;
        page._contact = page.bind_contact(document)?;
        page.bind_anchors(window, document)?;
        page.bind_page_loaded(window, document, &body)?;

        log::info!("Page mounted with {} listeners", page.subscriptions.len());
        Ok(page)
    }

    fn build_notifier(&self, document: &Document, scheduler: Rc<dyn Scheduler>) -> Option<Notifier<Element>> {
        let ids = &self.config.ids;
        let toast = by_id(document, &ids.toast)?;
        let message = by_id(document, &ids.toast_message)?;
        let icon = by_id(document, &ids.toast_icon);
        Some(Notifier::new(
            ToastElements { toast, message, icon },
            scheduler,
            self.config.toast_exit_ms,
        ))
    }

    fn bind_video(
        &mut self,
        document: &Document,
        body: &Element,
        scheduler: Rc<dyn Scheduler>,
    ) -> Result<Option<Rc<Video>>, UiError> {
        let ids = &self.config.ids;
        let Some(modal) = by_id(document, &ids.video_modal) else {
            return Ok(None);
        };
        let Some(video) = by_id(document, &ids.video_player)
            .and_then(|el| el.dyn_into::<HtmlVideoElement>().ok())
        else {
            log::warn!("#{} is missing or not a <video>", ids.video_player);
            return Ok(None);
        };
        let error_panel = by_id(document, &ids.video_error)
            .and_then(|el| el.dyn_into::<HtmlElement>().ok());

        let controller = Rc::new(VideoModal::new(
            modal.clone(),
            body.clone(),
            DomPlayer::new(video, error_panel),
            scheduler,
            self.config.autoplay_delay_ms,
        ));

        let on_click = controller.clone();
        self.subscriptions.push(Subscription::listen(&modal, "click", move |event| {
            if let Some(target) = event_target_element(&event) {
                on_click.on_backdrop_click(&target);
            }
        })?);

        Ok(Some(controller))
    }

    fn bind_menu(&mut self, document: &Document, body: &Element) -> Result<Option<Rc<MobileMenu<Element>>>, UiError> {
        let ids = &self.config.ids;
        let (Some(menu), Some(hamburger)) = (by_id(document, &ids.mobile_menu), by_id(document, &ids.hamburger))
        else {
            return Ok(None);
        };
        let controller = Rc::new(MobileMenu::new(menu, hamburger, body.clone()));

        let on_click = controller.clone();
        let document_target: &EventTarget = document.as_ref();
        self.subscriptions.push(Subscription::listen(document_target, "click", move |event| {
            on_click.on_document_click(event_target_element(&event).as_ref());
        })?);

        Ok(Some(controller))
    }

    fn bind_filter(
        &mut self,
        document: &Document,
        scheduler: Rc<dyn Scheduler>,
    ) -> Result<Option<Rc<CategoryFilter<Element>>>, UiError> {
        let buttons = query_all(document, ".filter-btn");
        if buttons.is_empty() {
            return Ok(None);
        }
        let items = query_all(document, ".reel-container");
        let controller = Rc::new(CategoryFilter::new(
            buttons,
            items,
            scheduler,
            self.config.filter_show_delay_ms,
            self.config.filter_hide_delay_ms,
        ));

        for button in controller.buttons() {
            let on_click = controller.clone();
            self.subscriptions.push(Subscription::listen(button, "click", move |event| {
                if let Some(button) = current_target_element(&event) {
                    on_click.activate(&button);
                }
            })?);
        }
        Ok(Some(controller))
    }

    fn bind_reel_hover(&mut self, document: &Document) -> Result<(), UiError> {
        for container in query_all(document, ".reel-container") {
            self.subscriptions.push(Subscription::listen(&container, "mouseenter", |event| {
                if let Some(container) = current_target_element(&event) {
                    filter::on_reel_enter(&container);
                }
            })?);
            self.subscriptions.push(Subscription::listen(&container, "mouseleave", |event| {
                if let Some(container) = current_target_element(&event) {
                    filter::on_reel_leave(&container);
                }
            })?);
        }
        Ok(())
    }

    fn attach_reveal(&self, document: &Document) -> Option<RevealObserver> {
        let reveal = ScrollReveal::new(
            self.config.reveal_threshold,
            self.config.reveal_root_margin.clone(),
            self.config.reveal_selector.clone(),
        );
        match RevealObserver::attach(document, reveal) {
            Ok(observer) => Some(observer),
            Err(e) => {
                log::warn!("Scroll reveal disabled: {}", e);
                None
            }
        }
    }

    fn bind_contact(&mut self, document: &Document) -> Result<Option<Rc<Contact>>, UiError> {
        let Some(form) = by_id(document, &self.config.ids.contact_form)
            .and_then(|el| el.dyn_into::<HtmlFormElement>().ok())
        else {
            return Ok(None);
        };
        let Some(notifier) = self.notifier.clone() else {
            log::warn!("No toast on the page, contact form falls back to a normal submit");
            return Ok(None);
        };

        let cookie_source = document.clone();
        let mut controller = ContactForm::new(
            DomForm::new(form.clone()),
            Rc::new(FetchTransport),
            notifier,
            Rc::new(move || document_cookies(&cookie_source)),
            ContactSettings {
                endpoint: self.config.contact_endpoint.clone(),
                csrf_cookie: self.config.csrf_cookie.clone(),
                csrf_header: self.config.csrf_header.clone(),
                toast_duration_ms: self.config.toast_duration_ms,
            },
        );
        if let Some(decision) = &self.decision {
            controller = controller.with_decision_fields(decision.clone());
        }
        let controller = Rc::new(controller);

        let on_submit = controller.clone();
        self.subscriptions.push(Subscription::listen(&form, "submit", move |event| {
            event.prevent_default();
            event.stop_propagation();
            let controller = on_submit.clone();
            spawn_local(async move {
                controller.submit().await;
            });
        })?);

        Ok(Some(controller))
    }

    fn bind_decision_fields(&mut self, document: &Document) -> Result<Option<Rc<DecisionFields<Element>>>, UiError> {
        let ids = &self.config.ids;
        let (Some(select), Some(fields)) = (by_id(document, &ids.decision_select), by_id(document, &ids.decision_fields))
        else {
            return Ok(None);
        };
        let controller = Rc::new(DecisionFields::new(select.clone(), fields));
        controller.sync();

        let on_change = controller.clone();
        self.subscriptions
            .push(Subscription::listen(&select, "change", move |_| on_change.sync())?);
        Ok(Some(controller))
    }

    fn bind_anchors(&mut self, window: &Window, document: &Document) -> Result<(), UiError> {
        let offset = self.config.anchor_offset_px;
        for anchor in query_all(document, r##"a[href^="#"]"##) {
            let window = window.clone();
            let document = document.clone();
            self.subscriptions.push(Subscription::listen(&anchor, "click", move |event| {
                event.prevent_default();
                let Some(href) = current_target_element(&event).and_then(|a| a.get_attribute("href")) else {
                    return;
                };
                let Some(selector) = anchors::target_selector(&href) else {
                    return;
                };
                let target = document
                    .query_selector(selector)
                    .ok()
                    .flatten()
                    .and_then(|el| el.dyn_into::<HtmlElement>().ok());
                if let Some(target) = target {
                    let options = ScrollToOptions::new();
                    options.set_top(anchors::scroll_top(f64::from(target.offset_top()), offset));
                    options.set_behavior(ScrollBehavior::Smooth);
                    window.scroll_to_with_scroll_to_options(&options);
                }
            })?);
        }
        Ok(())
    }

    fn bind_page_loaded(&mut self, window: &Window, document: &Document, body: &Element) -> Result<(), UiError> {
        if document.ready_state() == "complete" {
            body.set_style("opacity", "1");
            return Ok(());
        }
        let body = body.clone();
        let window_target: &EventTarget = window.as_ref();
        self.subscriptions.push(Subscription::listen(window_target, "load", move |_| {
            body.set_style("opacity", "1");
        })?);
        Ok(())
    }

    pub fn open_video(&self, trigger: &Element) {
        if let Some(video) = &self.video {
            // Already logged by the controller.
            let _ = video.open_from(trigger);
        }
    }

    pub fn close_video(&self) {
        if let Some(video) = &self.video {
            video.close();
        }
    }

    pub fn toggle_menu(&self) {
        match &self.menu {
            Some(menu) => menu.toggle(),
            None => log::error!("Menu or hamburger element not found"),
        }
    }

    pub fn close_menu(&self) {
        if let Some(menu) = &self.menu {
            menu.close();
        }
    }

    pub fn show_toast(&self, text: String, duration_ms: Option<u32>, kind: ToastKind) {
        if let Some(notifier) = &self.notifier {
            notifier.show(ToastMessage {
                text,
                kind,
                duration_ms: duration_ms.unwrap_or(self.config.toast_duration_ms),
            });
        }
    }
}
