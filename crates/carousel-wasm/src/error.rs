//! Errors raised while attaching a carousel to the page.
//!
//! Everything crossing into JavaScript is turned into a string `JsValue`,
//! the same way every other fallible export in this crate reports failure.

use carousel_core::ConfigError;
use thiserror::Error;
use wasm_bindgen::JsValue;

/// Failure to bind a controller to the DOM.
#[derive(Debug, Error)]
pub enum BindError {
    /// Not running in a browser window (e.g. inside a worker).
    #[error("no global window available")]
    NoWindow,

    /// The window has no document.
    #[error("window has no document")]
    NoDocument,

    /// No element carries the requested track id.
    #[error("no element with id '{0}'")]
    TrackNotFound(String),

    /// The track element exists but has no `dataset` (e.g. an SVG node).
    #[error("element '{0}' is not an HTML element")]
    NotHtmlElement(String),

    /// The JS config object could not be deserialized.
    #[error("invalid carousel config: {0}")]
    InvalidConfig(String),

    /// The config deserialized but its values are unusable.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl From<BindError> for JsValue {
    fn from(err: BindError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

/// Best-effort text for a thrown JS value.
pub(crate) fn js_message(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}
