use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Error, Debug)]
pub enum UiError {
    #[error("No global window available")]
    NoWindow,
    #[error("Window has no document")]
    NoDocument,
    #[error("JavaScript error: {0}")]
    Js(String),
    #[error("Invalid page config: {0}")]
    Config(#[from] serde_json::Error),
    #[error("Request failed: {0}")]
    Request(#[from] gloo_net::Error),
    #[error("Form endpoint answered with status {0}")]
    SubmissionRejected(u16),
}

impl UiError {
    /// Wraps a thrown JS value, keeping its debug rendering for the log.
    pub fn js(value: JsValue) -> Self {
        UiError::Js(format!("{:?}", value))
    }
}
