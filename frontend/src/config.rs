use serde::Deserialize;

use crate::error::UiError;

/// Id of the optional `<script type="application/json">` block carrying overrides.
pub const CONFIG_ELEMENT_ID: &str = "site-config";

const DEFAULT_CONTACT_ENDPOINT: &str = "/contact_ajax/";

/// Contact endpoint, overridable at build time with `CONTACT_ENDPOINT`.
pub fn get_contact_endpoint() -> String {
    option_env!("CONTACT_ENDPOINT")
        .unwrap_or(DEFAULT_CONTACT_ENDPOINT)
        .to_string()
}

/// Element ids the script expects in the server-rendered markup.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ElementIds {
    pub video_modal: String,
    pub video_player: String,
    pub video_error: String,
    pub mobile_menu: String,
    pub hamburger: String,
    pub toast: String,
    pub toast_message: String,
    pub toast_icon: String,
    pub contact_form: String,
    pub decision_fields: String,
    pub decision_select: String,
}

impl Default for ElementIds {
    fn default() -> Self {
        Self {
            video_modal: "videoModal".to_string(),
            video_player: "localVideoFrame".to_string(),
            video_error: "videoError".to_string(),
            mobile_menu: "mobileMenu".to_string(),
            hamburger: "hamburger".to_string(),
            toast: "toast".to_string(),
            toast_message: "toast-message".to_string(),
            toast_icon: "toast-icon".to_string(),
            contact_form: "contactForm".to_string(),
            decision_fields: "decisionFields".to_string(),
            decision_select: "id_is_decision_maker".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SiteConfig {
    pub contact_endpoint: String,
    pub csrf_cookie: String,
    pub csrf_header: String,
    pub toast_duration_ms: u32,
    pub toast_exit_ms: u32,
    pub autoplay_delay_ms: u32,
    pub filter_show_delay_ms: u32,
    pub filter_hide_delay_ms: u32,
    pub reveal_threshold: f64,
    pub reveal_root_margin: String,
    pub reveal_selector: String,
    pub anchor_offset_px: f64,
    pub ids: ElementIds,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            contact_endpoint: get_contact_endpoint(),
            csrf_cookie: "csrftoken".to_string(),
            csrf_header: "X-CSRFToken".to_string(),
            toast_duration_ms: 4000,
            toast_exit_ms: 500,
            autoplay_delay_ms: 300,
            filter_show_delay_ms: 100,
            filter_hide_delay_ms: 300,
            reveal_threshold: 0.1,
            reveal_root_margin: "0px 0px -50px 0px".to_string(),
            reveal_selector: ".premium-card, .service-card, .testimonial-card, .reel-container"
                .to_string(),
            anchor_offset_px: 80.0,
            ids: ElementIds::default(),
        }
    }
}

impl SiteConfig {
    /// Parses a (possibly partial) JSON override document. Missing keys keep their defaults.
    pub fn from_json(raw: &str) -> Result<Self, UiError> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_json::from_str(raw).map_err(|e| UiError::Config(e.to_string()))
    }

    /// Like [`SiteConfig::from_json`], but falls back to defaults when the document is broken.
    pub fn from_json_or_default(raw: Option<&str>) -> Self {
        match raw.map(Self::from_json) {
            Some(Ok(config)) => config,
            Some(Err(e)) => {
                log::error!("{}, using defaults", e);
                Self::default()
            }
            None => Self::default(),
        }
    }
}
