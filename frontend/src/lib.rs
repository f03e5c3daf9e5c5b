//! Interactive behaviour for the marketing site: video preview modal,
//! portfolio filter, mobile navigation, scroll reveal and the AJAX contact form.
//!
//! Controllers in [`components`] only see the ports from [`dom`]; the
//! browser bindings in `web` are compiled for `wasm32` only.

pub mod components;
pub mod config;
pub mod dom;
pub mod error;
pub mod utils;

#[cfg(target_arch = "wasm32")]
mod web;

#[cfg(test)]
mod testing;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    web::boot().map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Removes every listener and observer the page installed.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn unmount() {
    web::unmount();
}
