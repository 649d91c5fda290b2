//! Carousel WASM - WebAssembly bindings for the elastic image carousel
//!
//! This crate binds the carousel-core controller to a page: it implements
//! the controller's host on top of the Web Animations API and `setTimeout`,
//! and forwards pointer, touch, wheel and keyboard events to it.
//!
//! # Module Structure
//!
//! - `carousel` - The exported [`Carousel`] handle and its event listeners
//! - `dom_host` - DOM-backed implementation of the controller host
//! - `error` - Attach errors and their conversion to `JsValue`
//! - `logger` - `log` backend writing to the browser console
//!
//! # Usage
//!
//! ```typescript
//! import init, { Carousel, set_log_level } from '@carousel/wasm';
//!
//! // Initialize WASM module (must call first)
//! await init();
//! set_log_level('debug');
//!
//! const carousel = new Carousel('image-track');
//! console.log(`Strip at ${carousel.offset}%`);
//! ```

use wasm_bindgen::prelude::*;

mod carousel;
mod dom_host;
mod error;
mod logger;

pub use carousel::Carousel;
pub use error::BindError;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    logger::init(log::LevelFilter::Warn);
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Set the console log level: "off", "error", "warn", "info", "debug" or "trace".
///
/// # Errors
/// Returns an error for an unknown level name.
#[wasm_bindgen]
pub fn set_log_level(level: &str) -> Result<(), JsValue> {
    let filter = logger::parse_level(level)
        .ok_or_else(|| JsValue::from_str(&format!("Unknown log level: {level}")))?;
    logger::init(filter);
    Ok(())
}

/// The stock carousel configuration as a plain JS object.
///
/// Useful as a starting point for a partial override passed to
/// `new Carousel(id, config)`.
#[wasm_bindgen]
pub fn default_config() -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(&carousel_core::CarouselConfig::default())
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}
