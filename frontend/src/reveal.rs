//! Show/hide widgets: labelled reveal buttons, confession memes, skill memes
//! and the savage buttons that reveal the element right after them.

use std::collections::HashSet;

use crate::page::{Display, Element, MemeContent, Page};

/// A button that flips a target's visibility and swaps its own label.
#[derive(Debug)]
pub struct LabelledToggle {
    button: Element,
    target: Element,
    hidden_label: &'static str,
    shown_label: &'static str,
    shown: bool,
}

impl LabelledToggle {
    pub const fn new(
        button: Element,
        target: Element,
        hidden_label: &'static str,
        shown_label: &'static str,
    ) -> Self {
        Self {
            button,
            target,
            hidden_label,
            shown_label,
            shown: false,
        }
    }

    pub fn truth() -> Self {
        Self::new(
            Element::TruthButton,
            Element::TruthText,
            "CLICK HERE FOR THE REAL ANSWER",
            "OK MAYBE TOO REAL",
        )
    }

    pub fn diary() -> Self {
        Self::new(
            Element::DiaryButton,
            Element::DiaryText,
            "CLICK FOR Zentron'S DIARY ENTRIES",
            "OK THAT'S ENOUGH",
        )
    }

    pub fn is_shown(&self) -> bool {
        self.shown
    }

    pub fn render(&self, page: &mut impl Page) {
        let (display, label) = if self.shown {
            (Display::Block, self.shown_label)
        } else {
            (Display::None, self.hidden_label)
        };
        if page.set_display(self.target, display) {
            page.set_text(self.button, label);
        }
    }

    pub fn toggle(&mut self, page: &mut impl Page) {
        self.shown = !self.shown;
        self.render(page);
    }
}

/// "SHOW MY WORST COMMIT" becomes "MY WORST COMMIT".
pub fn caption_from_label(label: &str) -> String {
    let label = label.trim();
    label.strip_prefix("SHOW ").unwrap_or(label).to_string()
}

/// Per-card inline toggles, keyed by the button's index among its siblings.
#[derive(Debug, Default)]
pub struct InlineToggles {
    confessions: HashSet<usize>,
    skills: HashSet<usize>,
}

impl InlineToggles {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn confession_shown(&self, index: usize) -> bool {
        self.confessions.contains(&index)
    }

    pub fn skill_shown(&self, index: usize) -> bool {
        self.skills.contains(&index)
    }

    pub fn toggle_confession(
        &mut self,
        page: &mut impl Page,
        index: usize,
        meme_src: &str,
        button_label: &str,
    ) {
        let container = Element::ConfessionMeme(index);
        if self.confessions.remove(&index) {
            page.render_meme(container, None);
            page.set_class(container, "show", false);
            page.set_class(Element::ConfessionButton(index), "active", false);
            return;
        }
        if meme_src.is_empty() {
            return;
        }
        let meme = MemeContent {
            src: meme_src.to_string(),
            title: caption_from_label(button_label),
        };
        if !page.render_meme(container, Some(&meme)) {
            return;
        }
        page.set_class(container, "show", true);
        page.set_class(Element::ConfessionButton(index), "active", true);
        self.confessions.insert(index);
    }

    pub fn toggle_skill(&mut self, page: &mut impl Page, index: usize) {
        let shown = !self.skills.remove(&index);
        let display = if shown { Display::Block } else { Display::None };
        if !page.set_display(Element::SkillMeme(index), display) {
            return;
        }
        page.set_class(Element::SkillRevealButton(index), "active", shown);
        if shown {
            self.skills.insert(index);
        }
    }
}

/// Each `.savage-btn` flips its next sibling. Siblings start hidden.
#[derive(Debug, Default)]
pub struct SavageToggles {
    shown: HashSet<usize>,
}

impl SavageToggles {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_shown(&self, index: usize) -> bool {
        self.shown.contains(&index)
    }

    pub fn toggle(&mut self, page: &mut impl Page, index: usize) {
        let shown = !self.shown.contains(&index);
        let display = if shown { Display::Block } else { Display::None };
        if !page.set_display(Element::SavageTarget(index), display) {
            return;
        }
        if shown {
            self.shown.insert(index);
        } else {
            self.shown.remove(&index);
        }
    }
}
