//! Official / unofficial content switch.
//!
//! ```text
//! ┌──────────┐  request(Unofficial)  ┌──────────────┐  confirm  ┌────────────┐
//! │ Official │─────────────────────▶│  Confirming  │──────────▶│ Unofficial │
//! └──────────┘                      └──────────────┘           └────────────┘
//!      ▲            cancel                 │                         │
//!      ├───────────────────────────────────┘                         │
//!      │                 request(Official), immediate                │
//!      └─────────────────────────────────────────────────────────────┘
//! ```

use crate::page::{Display, Element, Page};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Official,
    Unofficial,
}

impl Mode {
    /// Text of the transient indicator shown after switching into this mode.
    pub const fn indicator(&self) -> &'static str {
        match self {
            Mode::Official => "↓ Scroll down to explore ↓",
            Mode::Unofficial => "↓ Buckle up for the unfiltered truth ↓",
        }
    }
}

#[derive(Debug, Default)]
pub struct ModeSwitch {
    mode: Mode,
    awaiting_confirmation: bool,
}

impl ModeSwitch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn is_awaiting_confirmation(&self) -> bool {
        self.awaiting_confirmation
    }

    /// Writes the visibility of both content variants without scrolling.
    pub fn render(&self, page: &mut impl Page) {
        let official = self.mode == Mode::Official;
        let shown = |on: bool| if on { Display::Block } else { Display::None };

        page.set_class(Element::OfficialModeButton, "active", official);
        page.set_class(Element::UnofficialModeButton, "active", !official);
        page.set_display(Element::OfficialContent, shown(official));
        page.set_display(Element::UnofficialContent, shown(!official));
        page.set_display(Element::OfficialScrollHint, shown(official));
        page.set_display(Element::UnofficialScrollHint, shown(!official));
        page.set_display(
            Element::MainNavbar,
            if official { Display::Flex } else { Display::None },
        );
    }

    /// Returns `true` when the active mode changed.
    ///
    /// Official applies immediately. Unofficial only opens the warning dialog;
    /// the switch happens in [`ModeSwitch::confirm`].
    pub fn request(&mut self, page: &mut impl Page, requested: Mode) -> bool {
        match requested {
            Mode::Official => {
                if self.awaiting_confirmation {
                    self.awaiting_confirmation = false;
                    page.close_dialog(Element::WarningDialog);
                }
                if self.mode == Mode::Official {
                    return false;
                }
                self.apply(page, Mode::Official);
                true
            }
            Mode::Unofficial => {
                if self.mode == Mode::Unofficial || self.awaiting_confirmation {
                    return false;
                }
                if page.show_dialog(Element::WarningDialog) {
                    self.awaiting_confirmation = true;
                } else {
                    log::debug!("Warning dialog missing, unofficial mode unavailable");
                }
                false
            }
        }
    }

    /// User accepted the warning. Returns `true` when the mode changed.
    pub fn confirm(&mut self, page: &mut impl Page) -> bool {
        if !self.awaiting_confirmation {
            return false;
        }
        self.awaiting_confirmation = false;
        page.close_dialog(Element::WarningDialog);
        self.apply(page, Mode::Unofficial);
        true
    }

    /// User backed out of the warning; official mode is re-asserted.
    pub fn cancel(&mut self, page: &mut impl Page) -> bool {
        if !self.awaiting_confirmation {
            return false;
        }
        self.request(page, Mode::Official)
    }

    fn apply(&mut self, page: &mut impl Page, mode: Mode) {
        log::info!("Switching to {:?} mode", mode);
        self.mode = mode;
        self.render(page);
        page.scroll_to_top();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::testing::FakePage;

    #[test]
    fn unofficial_request_waits_for_confirmation() {
        let mut page = FakePage::new();
        let mut switch = ModeSwitch::new();

        assert!(!switch.request(&mut page, Mode::Unofficial));
        assert_eq!(switch.mode(), Mode::Official);
        assert!(switch.is_awaiting_confirmation());
        assert!(page.open_dialogs.contains(&Element::WarningDialog));
        assert_eq!(page.scrolls_to_top, 0);
    }

    #[test]
    fn confirming_hides_official_content() {
        let mut page = FakePage::new();
        let mut switch = ModeSwitch::new();
        switch.request(&mut page, Mode::Unofficial);

        assert!(switch.confirm(&mut page));
        assert_eq!(switch.mode(), Mode::Unofficial);
        assert_eq!(page.display_of(Element::OfficialContent), Some(Display::None));
        assert_eq!(page.display_of(Element::UnofficialContent), Some(Display::Block));
        assert_eq!(page.display_of(Element::MainNavbar), Some(Display::None));
        assert!(page.has_class(Element::UnofficialModeButton, "active"));
        assert!(!page.has_class(Element::OfficialModeButton, "active"));
        assert!(page.open_dialogs.is_empty());
        assert_eq!(page.scrolls_to_top, 1);
    }

    #[test]
    fn cancel_keeps_official_mode() {
        let mut page = FakePage::new();
        let mut switch = ModeSwitch::new();
        switch.request(&mut page, Mode::Unofficial);

        assert!(!switch.cancel(&mut page));
        assert_eq!(switch.mode(), Mode::Official);
        assert!(!switch.is_awaiting_confirmation());
        assert!(page.open_dialogs.is_empty());
        assert!(!switch.confirm(&mut page), "stale confirm must not switch");
    }

    #[test]
    fn official_is_immediate_from_unofficial() {
        let mut page = FakePage::new();
        let mut switch = ModeSwitch::new();
        switch.request(&mut page, Mode::Unofficial);
        switch.confirm(&mut page);

        assert!(switch.request(&mut page, Mode::Official));
        assert_eq!(switch.mode(), Mode::Official);
        assert_eq!(page.display_of(Element::OfficialContent), Some(Display::Block));
        assert_eq!(page.display_of(Element::MainNavbar), Some(Display::Flex));
        assert_eq!(page.scrolls_to_top, 2);
        assert!(!switch.request(&mut page, Mode::Official));
    }

    #[test]
    fn missing_dialog_is_a_silent_no_op() {
        let mut page = FakePage::without(&[Element::WarningDialog]);
        let mut switch = ModeSwitch::new();

        assert!(!switch.request(&mut page, Mode::Unofficial));
        assert!(!switch.is_awaiting_confirmation());
        assert!(!switch.confirm(&mut page));
        assert_eq!(switch.mode(), Mode::Official);
    }

    #[test]
    fn missing_content_still_switches_state() {
        let mut page = FakePage::without(&[Element::OfficialContent, Element::MainNavbar]);
        let mut switch = ModeSwitch::new();
        switch.request(&mut page, Mode::Unofficial);

        assert!(switch.confirm(&mut page));
        assert_eq!(switch.mode(), Mode::Unofficial);
        assert_eq!(page.display_of(Element::OfficialContent), None);
        assert_eq!(page.display_of(Element::UnofficialContent), Some(Display::Block));
    }

    #[test]
    fn repeated_unofficial_request_is_ignored_while_pending() {
        let mut page = FakePage::new();
        let mut switch = ModeSwitch::new();

        assert!(!switch.request(&mut page, Mode::Unofficial));
        assert!(!switch.request(&mut page, Mode::Unofficial));
        assert_eq!(page.dialog_shows, 1);

        assert!(switch.confirm(&mut page));
        assert_eq!(switch.mode(), Mode::Unofficial);
        assert!(!switch.confirm(&mut page));
        assert_eq!(page.scrolls_to_top, 1);
    }
}
