//! The page seam.
//!
//! State modules never touch the DOM directly. They describe mutations against
//! a [`Page`], naming targets through [`Element`]. Every mutation returns
//! `false` when the target is not present in the markup; callers treat that as
//! a skipped step, never as a failure.

/// How the browser layer locates an element in the markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selector {
    /// `document.getElementById`
    Id(&'static str),
    /// First match of a CSS selector.
    Query(&'static str),
    /// The `index`-th match of a CSS selector.
    Nth { selector: &'static str, index: usize },
    /// Starting at the `index`-th `anchor`, walk up to the closest `ancestor`
    /// and take its first `child` match.
    Within {
        anchor: &'static str,
        index: usize,
        ancestor: &'static str,
        child: &'static str,
    },
    /// The element right after the `index`-th `anchor`.
    NextSibling { anchor: &'static str, index: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Element {
    OfficialModeButton,
    UnofficialModeButton,
    OfficialContent,
    UnofficialContent,
    WarningDialog,
    OfficialScrollHint,
    UnofficialScrollHint,
    MainNavbar,
    CreatorSection,
    RatingOutput,
    StatusMessage,
    StatusDetails,
    EmojiSlot(usize),
    DynamicFeedback,
    MemeModal,
    MemeModalImage,
    MemeModalTitle,
    ContactForm,
    SubmitButton,
    SubmitLabel,
    TransmissionSuccess,
    TruthButton,
    TruthText,
    DiaryButton,
    DiaryText,
    ConfessionButton(usize),
    ConfessionMeme(usize),
    SkillRevealButton(usize),
    SkillMeme(usize),
    SavageButton(usize),
    SavageTarget(usize),
}

pub const CONFESSION_BUTTON_SELECTOR: &str = ".confession-btn";
pub const SKILL_REVEAL_SELECTOR: &str = ".skill-reveal-btn";
pub const CONTACT_FORM_SELECTOR: &str = ".transmission-form";
pub const SAVAGE_BUTTON_SELECTOR: &str = ".savage-btn";
pub const BACK_TO_TOP_SELECTOR: &str = ".back-to-top";

impl Element {
    pub fn selector(&self) -> Selector {
        match *self {
            Element::OfficialModeButton => Selector::Id("officialModeBtn"),
            Element::UnofficialModeButton => Selector::Id("unofficialModeBtn"),
            Element::OfficialContent => Selector::Id("officialContent"),
            Element::UnofficialContent => Selector::Id("unofficialContent"),
            Element::WarningDialog => Selector::Id("warningDialog"),
            Element::OfficialScrollHint => Selector::Id("officialScrollHint"),
            Element::UnofficialScrollHint => Selector::Id("unofficialScrollHint"),
            Element::MainNavbar => Selector::Id("mainNavbar"),
            Element::CreatorSection => Selector::Id("creator"),
            Element::RatingOutput => Selector::Id("unofficialRatingOutput"),
            Element::StatusMessage => Selector::Query("#unofficialRatingOutput .status-message"),
            Element::StatusDetails => Selector::Query("#unofficialRatingOutput .status-details"),
            Element::EmojiSlot(index) => Selector::Nth {
                selector: ".emoji-track span",
                index,
            },
            Element::DynamicFeedback => Selector::Id("dynamicFeedback"),
            Element::MemeModal => Selector::Id("memeModal"),
            Element::MemeModalImage => Selector::Id("memeModalImage"),
            Element::MemeModalTitle => Selector::Id("memeModalTitle"),
            Element::ContactForm => Selector::Query(CONTACT_FORM_SELECTOR),
            Element::SubmitButton => Selector::Query(".transmission-form .transmit-btn"),
            Element::SubmitLabel => Selector::Query(".transmission-form .transmit-btn span"),
            Element::TransmissionSuccess => Selector::Id("transmissionSuccess"),
            Element::TruthButton => Selector::Id("truthBtn"),
            Element::TruthText => Selector::Id("truthText"),
            Element::DiaryButton => Selector::Id("ZentronBtn"),
            Element::DiaryText => Selector::Id("ZentronTruth"),
            Element::ConfessionButton(index) => Selector::Nth {
                selector: CONFESSION_BUTTON_SELECTOR,
                index,
            },
            Element::ConfessionMeme(index) => Selector::Within {
                anchor: CONFESSION_BUTTON_SELECTOR,
                index,
                ancestor: ".confession-card",
                child: ".confession-meme",
            },
            Element::SkillRevealButton(index) => Selector::Nth {
                selector: SKILL_REVEAL_SELECTOR,
                index,
            },
            Element::SkillMeme(index) => Selector::Within {
                anchor: SKILL_REVEAL_SELECTOR,
                index,
                ancestor: ".skill-meter",
                child: ".skill-meme",
            },
            Element::SavageButton(index) => Selector::Nth {
                selector: SAVAGE_BUTTON_SELECTOR,
                index,
            },
            Element::SavageTarget(index) => Selector::NextSibling {
                anchor: SAVAGE_BUTTON_SELECTOR,
                index,
            },
        }
    }
}

/// Values written to `style.display`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Display {
    None,
    Block,
    Flex,
}

impl Display {
    pub const fn as_css(&self) -> &'static str {
        match self {
            Display::None => "none",
            Display::Block => "block",
            Display::Flex => "flex",
        }
    }
}

/// An image with a caption, shown either in the modal or inline in a card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemeContent {
    pub src: String,
    pub title: String,
}

pub trait Page {
    fn set_display(&mut self, element: Element, display: Display) -> bool;
    fn set_text(&mut self, element: Element, text: &str) -> bool;
    fn set_class(&mut self, element: Element, class: &str, enabled: bool) -> bool;
    fn set_attribute(&mut self, element: Element, name: &str, value: &str) -> bool;
    fn set_style(&mut self, element: Element, property: &str, value: &str) -> bool;
    fn show_dialog(&mut self, element: Element) -> bool;
    fn close_dialog(&mut self, element: Element) -> bool;
    /// Replaces the children of `element` with the meme, or empties it on `None`.
    fn render_meme(&mut self, element: Element, meme: Option<&MemeContent>) -> bool;
    fn reset_form(&mut self, element: Element) -> bool;
    fn scroll_to_top(&mut self);
    fn scroll_to(&mut self, element: Element, offset_px: f64) -> bool;
    fn show_toast(&mut self, id: u32, text: &str);
    fn dismiss_toast(&mut self, id: u32);
    fn lock_body_scroll(&mut self, locked: bool);
}
