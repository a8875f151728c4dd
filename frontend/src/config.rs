use serde::Deserialize;

use crate::error::UiError;

/// Id of the optional `<script type="application/json">` block holding a [`UiConfig`].
pub const CONFIG_ELEMENT_ID: &str = "portfolio-config";

const DEFAULT_FORM_ENDPOINT: &str = "/api/contact";

/// Endpoint used when the contact form carries no `action` attribute.
pub fn get_form_endpoint() -> &'static str {
    option_env!("PORTFOLIO_FORM_ENDPOINT").unwrap_or(DEFAULT_FORM_ENDPOINT)
}

/// Fixed delays driving every timed transition on the page, in milliseconds.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    pub modal_settle_ms: u32,
    pub modal_fade_ms: u32,
    pub excuse_visible_ms: u32,
    pub form_restore_ms: u32,
    pub toast_visible_ms: u32,
    pub creator_scroll_delay_ms: u32,
    pub creator_scroll_offset_px: f64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            modal_settle_ms: 10,
            modal_fade_ms: 300,
            excuse_visible_ms: 5_000,
            form_restore_ms: 3_000,
            toast_visible_ms: 2_500,
            creator_scroll_delay_ms: 100,
            creator_scroll_offset_px: 70.0,
        }
    }
}

impl UiConfig {
    pub fn from_json(raw: &str) -> Result<Self, UiError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Parses the embedded config block, falling back to defaults when it is
    /// absent or malformed.
    pub fn from_embedded(raw: Option<&str>) -> Self {
        match raw.map(str::trim).filter(|s| !s.is_empty()) {
            Some(raw) => Self::from_json(raw).unwrap_or_else(|e| {
                log::warn!("Ignoring page config: {}", e);
                Self::default()
            }),
            None => Self::default(),
        }
    }
}
