//! Struggle meter: slider value to tier message, plus the excuse generator.

use rand::Rng;

use crate::page::{Element, Page};

pub const MAX_LEVEL: u8 = 100;
pub const EMOJI_SLOTS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tier {
    pub threshold: u8,
    pub label: &'static str,
    pub detail: &'static str,
}

/// Ascending by threshold. The first entry must stay at 0 so every level has a tier.
pub const TIERS: [Tier; 7] = [
    Tier {
        threshold: 0,
        label: "Just opened IDE",
        detail: "(Already questioning life choices)",
    },
    Tier {
        threshold: 20,
        label: "Hello World compiles!",
        detail: "(Celebration lasts 3 seconds)",
    },
    Tier {
        threshold: 42,
        label: "The Answer to Life",
        detail: "(But not your bugs)",
    },
    Tier {
        threshold: 60,
        label: "Code works but no idea why",
        detail: "(Don't touch anything!)",
    },
    Tier {
        threshold: 75,
        label: "Google thinks I'm a bot",
        detail: "(Search limit reached)",
    },
    Tier {
        threshold: 90,
        label: "Became Stack Overflow",
        detail: "(People now ask YOU questions)",
    },
    Tier {
        threshold: 100,
        label: "Transcended to Digital Deity",
        detail: "(Your code has its own religion)",
    },
];

pub const EXCUSES: [&str; 10] = [
    "It was working yesterday!",
    "That's not a bug, it's a feature",
    "Must be a browser issue",
    "The compiler hates me",
    "I blame the framework",
    "This worked in the tutorial",
    "The cosmic rays did it",
    "My rubber duck didn't warn me",
    "The deadline moved my code",
    "GitHub Copilot betrayed me",
];

/// Raw slider input clamped into `0..=MAX_LEVEL`.
pub fn clamp_level(raw: i32) -> u8 {
    raw.clamp(0, i32::from(MAX_LEVEL)) as u8
}

/// The last table entry whose threshold is at or below `level`.
pub fn tier_for(level: u8) -> &'static Tier {
    TIERS
        .iter()
        .rfind(|tier| tier.threshold <= level)
        .unwrap_or(&TIERS[0])
}

/// Which of the five emoji reactions lights up: one per 20 points, the top
/// slot also covering 100.
pub fn emoji_slot(level: u8) -> usize {
    (usize::from(level) / 20).min(EMOJI_SLOTS - 1)
}

pub fn pick_random_excuse<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    EXCUSES[rng.gen_range(0..EXCUSES.len())]
}

#[derive(Debug, Default)]
pub struct StruggleMeter {
    level: u8,
    excuse: Option<&'static str>,
}

impl StruggleMeter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn level(&self) -> u8 {
        self.level
    }

    pub fn visible_excuse(&self) -> Option<&'static str> {
        self.excuse
    }

    pub fn on_input(&mut self, page: &mut impl Page, raw: i32) -> &'static Tier {
        let level = clamp_level(raw);
        let tier = tier_for(level);
        self.level = level;

        let lit = emoji_slot(level);
        for slot in 0..EMOJI_SLOTS {
            page.set_class(Element::EmojiSlot(slot), "emoji-highlight", slot == lit);
        }
        page.set_text(
            Element::StatusMessage,
            &format!("You're at {}: {}", level, tier.label),
        );
        page.set_text(Element::StatusDetails, tier.detail);
        page.set_style(
            Element::RatingOutput,
            "background",
            &format!("rgba(229, 9, 20, {})", f64::from(level) / 200.0),
        );
        tier
    }

    /// Shows a freshly drawn excuse. Returns `false` when the feedback slot
    /// is missing and nothing needs hiding later.
    pub fn show_excuse<R: Rng + ?Sized>(&mut self, page: &mut impl Page, rng: &mut R) -> bool {
        let excuse = pick_random_excuse(rng);
        if !page.set_text(Element::DynamicFeedback, &format!("\"{}\"", excuse)) {
            return false;
        }
        page.set_class(Element::DynamicFeedback, "hidden", false);
        self.excuse = Some(excuse);
        true
    }

    pub fn hide_excuse(&mut self, page: &mut impl Page) {
        self.excuse = None;
        page.set_class(Element::DynamicFeedback, "hidden", true);
    }
}
