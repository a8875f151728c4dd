//! Contact form submission state.

use crate::page::{Display, Element, Page};

pub const SUBMIT_LABEL: &str = "INITIATE TRANSMISSION";
pub const SENDING_LABEL: &str = "TRANSMITTING...";
pub const RETRY_LABEL: &str = "TRANSMISSION FAILED - RETRY";

/// Writes into the button's label span so sibling markup (signal bars)
/// survives; bare buttons get the text directly.
fn set_label(page: &mut impl Page, text: &str) {
    if !page.set_text(Element::SubmitLabel, text) {
        page.set_text(Element::SubmitButton, text);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionPhase {
    #[default]
    Idle,
    Sending,
    Succeeded,
    Failed,
}

#[derive(Debug, Default)]
pub struct ContactForm {
    phase: SubmissionPhase,
}

impl ContactForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> SubmissionPhase {
        self.phase
    }

    /// Returns `true` when a POST should go out. A submit while one is in
    /// flight is ignored.
    pub fn submit(&mut self, page: &mut impl Page) -> bool {
        if self.phase == SubmissionPhase::Sending {
            log::debug!("Form already sending, ignoring submit");
            return false;
        }
        set_label(page, SENDING_LABEL);
        self.phase = SubmissionPhase::Sending;
        true
    }

    /// Records the POST outcome. Returns `true` when a restore should be scheduled.
    pub fn complete(&mut self, page: &mut impl Page, delivered: bool) -> bool {
        if self.phase != SubmissionPhase::Sending {
            return false;
        }
        if delivered {
            log::info!("Contact form delivered");
            page.set_display(Element::ContactForm, Display::None);
            page.set_display(Element::TransmissionSuccess, Display::Flex);
            page.reset_form(Element::ContactForm);
            self.phase = SubmissionPhase::Succeeded;
        } else {
            log::warn!("Contact form submission failed");
            set_label(page, RETRY_LABEL);
            self.phase = SubmissionPhase::Failed;
        }
        true
    }

    /// Puts the form back after either outcome. Skipped while a retry is in flight.
    pub fn restore(&mut self, page: &mut impl Page) -> bool {
        if !matches!(
            self.phase,
            SubmissionPhase::Succeeded | SubmissionPhase::Failed
        ) {
            return false;
        }
        set_label(page, SUBMIT_LABEL);
        page.set_display(Element::ContactForm, Display::Block);
        page.set_display(Element::TransmissionSuccess, Display::None);
        self.phase = SubmissionPhase::Idle;
        true
    }
}
