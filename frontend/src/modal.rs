//! Meme modal state machine.
//!
//! ```text
//! ┌────────┐ open  ┌─────────┐ settle ┌──────┐ close ┌─────────┐ faded ┌────────┐
//! │ Closed │──────▶│ Opening │───────▶│ Open │──────▶│ Closing │──────▶│ Closed │
//! └────────┘       └─────────┘        └──────┘       └─────────┘       └────────┘
//!                       │                                 ▲
//!                       └────────────── close ────────────┘
//! ```
//!
//! Every transition bumps `generation`. Timer completions carry the
//! generation they were scheduled under and are dropped when it no longer
//! matches, so a stale settle can never reopen a modal that was closed in
//! the meantime.

use crate::page::{Display, Element, MemeContent, Page};
use crate::schedule::Task;

pub const DEFAULT_TITLE: &str = "Meme";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModalPhase {
    #[default]
    Closed,
    Opening,
    Open,
    Closing,
}

#[derive(Debug, Default)]
pub struct MemeModal {
    phase: ModalPhase,
    content: Option<MemeContent>,
    generation: u64,
}

impl MemeModal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> ModalPhase {
        self.phase
    }

    pub fn content(&self) -> Option<&MemeContent> {
        self.content.as_ref()
    }

    /// Starts opening. Ignored unless Closed. Returns the settle task to schedule.
    pub fn open(&mut self, page: &mut impl Page, src: &str, title: Option<&str>) -> Option<Task> {
        if self.phase != ModalPhase::Closed {
            log::debug!("Ignoring meme trigger while modal is {:?}", self.phase);
            return None;
        }
        if src.is_empty() {
            return None;
        }
        let content = MemeContent {
            src: src.to_string(),
            title: title
                .filter(|t| !t.is_empty())
                .unwrap_or(DEFAULT_TITLE)
                .to_string(),
        };

        page.set_attribute(Element::MemeModalImage, "src", &content.src);
        page.set_text(Element::MemeModalTitle, &content.title);
        page.set_display(Element::MemeModal, Display::Flex);
        page.lock_body_scroll(true);

        self.content = Some(content);
        self.phase = ModalPhase::Opening;
        self.generation += 1;
        Some(Task::ModalSettled {
            generation: self.generation,
        })
    }

    pub fn settle(&mut self, page: &mut impl Page, generation: u64) -> bool {
        if self.phase != ModalPhase::Opening || generation != self.generation {
            return false;
        }
        page.set_class(Element::MemeModal, "active", true);
        self.phase = ModalPhase::Open;
        true
    }

    /// Starts closing from Opening or Open. Returns the fade task to schedule.
    pub fn close(&mut self, page: &mut impl Page) -> Option<Task> {
        if !matches!(self.phase, ModalPhase::Opening | ModalPhase::Open) {
            return None;
        }
        page.set_class(Element::MemeModal, "active", false);
        self.phase = ModalPhase::Closing;
        self.generation += 1;
        Some(Task::ModalFaded {
            generation: self.generation,
        })
    }

    /// Escape is honoured from Opening too, not only once the settle delay has passed.
    pub fn on_key(&mut self, page: &mut impl Page, key: &str) -> Option<Task> {
        if key == "Escape" {
            self.close(page)
        } else {
            None
        }
    }

    pub fn fade_out(&mut self, page: &mut impl Page, generation: u64) -> bool {
        if self.phase != ModalPhase::Closing || generation != self.generation {
            return false;
        }
        page.set_display(Element::MemeModal, Display::None);
        page.set_attribute(Element::MemeModalImage, "src", "");
        page.set_text(Element::MemeModalTitle, "");
        page.lock_body_scroll(false);
        self.content = None;
        self.phase = ModalPhase::Closed;
        true
    }

    /// Runs a timer completion addressed to the modal.
    pub fn complete(&mut self, page: &mut impl Page, task: Task) -> bool {
        match task {
            Task::ModalSettled { generation } => self.settle(page, generation),
            Task::ModalFaded { generation } => self.fade_out(page, generation),
            _ => false,
        }
    }
}
