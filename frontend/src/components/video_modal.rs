use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::dom::{ListenerHandle, Node, PlayerEvent, Scheduler, TimerHandle, VideoPlayer};
use crate::error::UiError;
use crate::utils::video_format::detect_formats;

const HIDDEN: &str = "hidden";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalState {
    Closed,
    Open,
}

/// Everything an open video still has registered: the delayed `play()` and the
/// one-shot error/loadeddata listeners. Dropping it cancels and unregisters all of them.
pub struct Playback {
    _autoplay: TimerHandle,
    _listeners: Vec<ListenerHandle>,
}

/// Binds the detected formats to the player's source slots and schedules playback.
///
/// Fails with [`UiError::UnsupportedFormat`] after switching the player to its
/// error panel when the extension is not recognised.
pub fn setup_sources<P: VideoPlayer>(
    player: &P,
    path: &str,
    scheduler: &dyn Scheduler,
    autoplay_delay_ms: u32,
) -> Result<Playback, UiError> {
    player.clear_sources();

    let formats = detect_formats(path);
    if formats.is_empty() {
        player.show_error();
        return Err(UiError::UnsupportedFormat(path.to_string()));
    }

    let slots = player.source_slots();
    if formats.len() > slots {
        log::debug!(
            "{} candidate formats for {} but only {} source slots",
            formats.len(),
            path,
            slots
        );
    }
    for (slot, format) in formats.iter().take(slots).enumerate() {
        player.set_source(slot, format);
    }

    let on_error = player.clone();
    let on_loaded = player.clone();
    let listeners = vec![
        player.once(PlayerEvent::Error, Box::new(move || on_error.show_error())),
        player.once(PlayerEvent::LoadedData, Box::new(move || on_loaded.hide_error())),
    ];

    player.load();

    let to_play = player.clone();
    Ok(Playback {
        _autoplay: scheduler.schedule(autoplay_delay_ms, Box::new(move || to_play.play())),
        _listeners: listeners,
    })
}

/// The video overlay: the modal root, the page body it scroll-locks, and the player.
pub struct VideoModal<N: Node, P: VideoPlayer> {
    modal: N,
    body: N,
    player: P,
    scheduler: Rc<dyn Scheduler>,
    autoplay_delay_ms: u32,
    state: Cell<ModalState>,
    playback: RefCell<Option<Playback>>,
}

impl<N: Node, P: VideoPlayer> VideoModal<N, P> {
    pub fn new(
        modal: N,
        body: N,
        player: P,
        scheduler: Rc<dyn Scheduler>,
        autoplay_delay_ms: u32,
    ) -> Self {
        Self {
            modal,
            body,
            player,
            scheduler,
            autoplay_delay_ms,
            state: Cell::new(ModalState::Closed),
            playback: RefCell::new(None),
        }
    }

    pub fn state(&self) -> ModalState {
        self.state.get()
    }

    pub fn open(&self, source: Option<&str>) -> Result<(), UiError> {
        let Some(path) = source.map(str::trim).filter(|s| !s.is_empty()) else {
            log::error!("No video source found.");
            return Err(UiError::MissingVideoSource);
        };

        // Layout first, then sources.
        self.modal.remove_class(HIDDEN);
        self.body.set_style("overflow", "hidden");
        self.state.set(ModalState::Open);

        self.playback.borrow_mut().take();
        self.player.hide_error();
        let pending = setup_sources(
            &self.player,
            path,
            self.scheduler.as_ref(),
            self.autoplay_delay_ms,
        );
        match pending {
            Ok(playback) => {
                *self.playback.borrow_mut() = Some(playback);
                Ok(())
            }
            Err(e) => {
                log::warn!("{}", e);
                Err(e)
            }
        }
    }

    /// Opens with the `data-video-src` of the clicked trigger.
    pub fn open_from(&self, trigger: &N) -> Result<(), UiError> {
        self.open(trigger.attribute("data-video-src").as_deref())
    }

    /// Always safe to call; leaves no source bound so nothing keeps playing.
    pub fn close(&self) {
        self.playback.borrow_mut().take();

        self.modal.add_class(HIDDEN);
        self.body.set_style("overflow", "auto");

        self.player.pause();
        self.player.set_current_time(0.0);
        self.player.clear_sources();
        self.player.load();
        self.player.hide_error();

        self.state.set(ModalState::Closed);
    }

    /// Backdrop clicks close the modal; clicks inside the dialog do not.
    pub fn on_backdrop_click(&self, target: &N) {
        if target.is_same(&self.modal) {
            self.close();
        }
    }

    pub fn on_key(&self, key: &str) {
        if key == "Escape" {
            self.close();
        }
    }
}
