#[cfg(target_arch = "wasm32")]
pub mod api;
pub mod cookie;
pub mod video_format;
