use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{HtmlElement, HtmlSourceElement, HtmlVideoElement};

use crate::dom::{ListenerHandle, PlayerEvent, VideoPlayer};
use crate::utils::video_format::SourceDescriptor;
use crate::web::events::Subscription;

/// The modal's `<video>` with its `<source>` children and the optional error panel.
#[derive(Clone)]
pub struct DomPlayer {
    video: HtmlVideoElement,
    error: Option<HtmlElement>,
}

impl DomPlayer {
    pub fn new(video: HtmlVideoElement, error: Option<HtmlElement>) -> Self {
        Self { video, error }
    }

    fn sources(&self) -> Vec<HtmlSourceElement> {
        let Ok(list) = self.video.query_selector_all("source") else {
            return Vec::new();
        };
        (0..list.length())
            .filter_map(|i| list.item(i))
            .filter_map(|node| node.dyn_into::<HtmlSourceElement>().ok())
            .collect()
    }
}

impl VideoPlayer for DomPlayer {
    fn clear_sources(&self) {
        for source in self.sources() {
            let _ = source.remove_attribute("src");
            let _ = source.remove_attribute("type");
        }
    }

    fn source_slots(&self) -> usize {
        self.sources().len()
    }

    fn set_source(&self, slot: usize, descriptor: &SourceDescriptor) {
        if let Some(source) = self.sources().get(slot) {
            source.set_src(&descriptor.src);
            source.set_type(&descriptor.mime_type);
        }
    }

    fn current_src(&self) -> String {
        self.sources()
            .first()
            .and_then(|s| s.get_attribute("src"))
            .unwrap_or_default()
    }

    fn load(&self) {
        self.video.load();
    }

    fn play(&self) {
        match self.video.play() {
            Ok(promise) => spawn_local(async move {
                if let Err(e) = JsFuture::from(promise).await {
                    log::info!("Auto-play prevented: {:?}", e);
                }
            }),
            Err(e) => log::info!("Auto-play prevented: {:?}", e),
        }
    }

    fn pause(&self) {
        if let Err(e) = self.video.pause() {
            log::warn!("Failed to pause video: {:?}", e);
        }
    }

    fn current_time(&self) -> f64 {
        self.video.current_time()
    }

    fn set_current_time(&self, seconds: f64) {
        self.video.set_current_time(seconds);
    }

    fn show_error(&self) {
        let _ = self.video.style().set_property("display", "none");
        match &self.error {
            Some(panel) => {
                let _ = panel.style().set_property("display", "flex");
            }
            None => log::warn!("Video failed and there is no error panel to show"),
        }
    }

    fn hide_error(&self) {
        if let Some(panel) = &self.error {
            let _ = panel.style().set_property("display", "none");
        }
        let _ = self.video.style().remove_property("display");
    }

    fn once(&self, event: PlayerEvent, callback: Box<dyn FnOnce()>) -> ListenerHandle {
        let mut callback = Some(callback);
        let subscription = Subscription::listen(&self.video, event.as_str(), move |_| {
            if let Some(callback) = callback.take() {
                callback();
            }
        });
        match subscription {
            Ok(subscription) => ListenerHandle::new(subscription),
            Err(e) => {
                log::warn!("Failed to listen for {}: {}", event.as_str(), e);
                ListenerHandle::new(())
            }
        }
    }
}
