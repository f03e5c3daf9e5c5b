use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum UiError {
    #[error("No video source found")]
    MissingVideoSource,
    #[error("Unsupported video format: {0}")]
    UnsupportedFormat(String),
    #[error("Element #{0} not found")]
    MissingElement(String),
    #[error("Request failed: {0}")]
    Transport(String),
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
    #[error("Invalid site config: {0}")]
    Config(String),
    #[error("JavaScript error: {0}")]
    Js(String),
}

impl From<JsValue> for UiError {
    fn from(value: JsValue) -> Self {
        UiError::Js(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
    }
}

impl From<serde_json::Error> for UiError {
    fn from(err: serde_json::Error) -> Self {
        UiError::MalformedResponse(err.to_string())
    }
}
