//! Single owner of all page state.
//!
//! Each input, timer or fetch completion arrives as one [`UiEvent`] through
//! [`UiController::handle`], which mutates the page and hands back the
//! [`Effect`]s the browser layer must arm.

use rand::rngs::StdRng;

use crate::config::UiConfig;
use crate::contact::ContactForm;
use crate::modal::MemeModal;
use crate::mode::{Mode, ModeSwitch};
use crate::page::{Element, Page};
use crate::reveal::{InlineToggles, LabelledToggle, SavageToggles};
use crate::schedule::{Effect, Task};
use crate::struggle::StruggleMeter;

#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    ModeRequested(Mode),
    RecruiterClicked,
    DramaClicked,
    ConfirmUnofficial,
    CancelUnofficial,
    SliderInput(i32),
    GenerateExcuse,
    MemeTriggered { src: String, title: Option<String> },
    ModalCloseClicked,
    BackdropClicked,
    KeyPressed(String),
    FormSubmitted,
    FormCompleted { delivered: bool },
    TruthToggled,
    DiaryToggled,
    ConfessionToggled { index: usize, meme: String, label: String },
    SkillToggled(usize),
    SavageToggled(usize),
    BackToTop,
    TimerFired(Task),
}

pub struct UiController {
    config: UiConfig,
    mode: ModeSwitch,
    meter: StruggleMeter,
    modal: MemeModal,
    form: ContactForm,
    truth: LabelledToggle,
    diary: LabelledToggle,
    inline: InlineToggles,
    savage: SavageToggles,
    rng: StdRng,
    next_toast: u32,
}

impl UiController {
    pub fn new(config: UiConfig, rng: StdRng) -> Self {
        Self {
            config,
            mode: ModeSwitch::new(),
            meter: StruggleMeter::new(),
            modal: MemeModal::new(),
            form: ContactForm::new(),
            truth: LabelledToggle::truth(),
            diary: LabelledToggle::diary(),
            inline: InlineToggles::new(),
            savage: SavageToggles::new(),
            rng,
            next_toast: 0,
        }
    }

    pub fn mode(&self) -> &ModeSwitch {
        &self.mode
    }

    pub fn meter(&self) -> &StruggleMeter {
        &self.meter
    }

    pub fn modal(&self) -> &MemeModal {
        &self.modal
    }

    pub fn form(&self) -> &ContactForm {
        &self.form
    }

    /// Brings the markup in line with the initial state.
    pub fn mount(&mut self, page: &mut impl Page) {
        self.mode.render(page);
        self.truth.render(page);
        self.diary.render(page);
    }

    pub fn handle(&mut self, page: &mut impl Page, event: UiEvent) -> Vec<Effect> {
        let mut effects = Vec::new();
        match event {
            UiEvent::ModeRequested(mode) => {
                if self.mode.request(page, mode) {
                    self.announce(page, mode, &mut effects);
                }
            }
            UiEvent::RecruiterClicked => {
                if self.mode.request(page, Mode::Official) {
                    self.announce(page, Mode::Official, &mut effects);
                }
                effects.push(Effect::after(
                    self.config.creator_scroll_delay_ms,
                    Task::ScrollToCreator,
                ));
            }
            UiEvent::DramaClicked => {
                self.mode.request(page, Mode::Unofficial);
            }
            UiEvent::ConfirmUnofficial => {
                if self.mode.confirm(page) {
                    self.announce(page, Mode::Unofficial, &mut effects);
                }
            }
            UiEvent::CancelUnofficial => {
                if self.mode.cancel(page) {
                    self.announce(page, Mode::Official, &mut effects);
                }
            }
            UiEvent::SliderInput(raw) => {
                self.meter.on_input(page, raw);
            }
            UiEvent::GenerateExcuse => {
                if self.meter.show_excuse(page, &mut self.rng) {
                    effects.push(Effect::after(self.config.excuse_visible_ms, Task::HideExcuse));
                }
            }
            UiEvent::MemeTriggered { src, title } => {
                if let Some(task) = self.modal.open(page, &src, title.as_deref()) {
                    effects.push(Effect::after(self.config.modal_settle_ms, task));
                }
            }
            UiEvent::ModalCloseClicked | UiEvent::BackdropClicked => {
                if let Some(task) = self.modal.close(page) {
                    effects.push(Effect::after(self.config.modal_fade_ms, task));
                }
            }
            UiEvent::KeyPressed(key) => {
                if let Some(task) = self.modal.on_key(page, &key) {
                    effects.push(Effect::after(self.config.modal_fade_ms, task));
                }
            }
            UiEvent::FormSubmitted => {
                if self.form.submit(page) {
                    effects.push(Effect::SubmitForm);
                }
            }
            UiEvent::FormCompleted { delivered } => {
                if self.form.complete(page, delivered) {
                    effects.push(Effect::after(self.config.form_restore_ms, Task::RestoreForm));
                }
            }
            UiEvent::TruthToggled => self.truth.toggle(page),
            UiEvent::DiaryToggled => self.diary.toggle(page),
            UiEvent::ConfessionToggled { index, meme, label } => {
                self.inline.toggle_confession(page, index, &meme, &label);
            }
            UiEvent::SkillToggled(index) => self.inline.toggle_skill(page, index),
            UiEvent::SavageToggled(index) => self.savage.toggle(page, index),
            UiEvent::BackToTop => page.scroll_to_top(),
            UiEvent::TimerFired(task) => self.fire(page, task),
        }
        effects
    }

    fn fire(&mut self, page: &mut impl Page, task: Task) {
        match task {
            Task::ModalSettled { .. } | Task::ModalFaded { .. } => {
                if !self.modal.complete(page, task) {
                    log::debug!("Dropped stale modal timer {:?}", task);
                }
            }
            Task::HideExcuse => self.meter.hide_excuse(page),
            Task::RestoreForm => {
                self.form.restore(page);
            }
            Task::DismissToast { id } => page.dismiss_toast(id),
            Task::ScrollToCreator => {
                page.scroll_to(Element::CreatorSection, self.config.creator_scroll_offset_px);
            }
        }
    }

    fn announce(&mut self, page: &mut impl Page, mode: Mode, effects: &mut Vec<Effect>) {
        self.next_toast = self.next_toast.wrapping_add(1);
        let id = self.next_toast;
        page.show_toast(id, mode.indicator());
        effects.push(Effect::after(
            self.config.toast_visible_ms,
            Task::DismissToast { id },
        ));
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;

    use super::*;
    use crate::contact::{RETRY_LABEL, SUBMIT_LABEL};
    use crate::modal::ModalPhase;
    use crate::page::testing::FakePage;
    use crate::page::Display;
    use crate::schedule::testing::ManualClock;

    struct Harness {
        controller: UiController,
        page: FakePage,
        clock: ManualClock,
        submits: usize,
    }

    impl Harness {
        fn new() -> Self {
            let mut harness = Self {
                controller: UiController::new(UiConfig::default(), StdRng::seed_from_u64(42)),
                page: FakePage::new(),
                clock: ManualClock::new(),
                submits: 0,
            };
            harness.controller.mount(&mut harness.page);
            harness
        }

        fn send(&mut self, event: UiEvent) {
            let effects = self.controller.handle(&mut self.page, event);
            self.submits += self.clock.absorb(effects);
        }

        fn wait(&mut self, ms: u64) {
            for task in self.clock.advance(ms) {
                self.send(UiEvent::TimerFired(task));
            }
        }

        fn trigger(&mut self, src: &str, title: &str) {
            self.send(UiEvent::MemeTriggered {
                src: src.to_string(),
                title: Some(title.to_string()),
            });
        }
    }

    #[test]
    fn mount_renders_official_mode_and_hidden_reveals() {
        let harness = Harness::new();
        assert_eq!(
            harness.page.display_of(Element::OfficialContent),
            Some(Display::Block)
        );
        assert_eq!(
            harness.page.display_of(Element::UnofficialContent),
            Some(Display::None)
        );
        assert_eq!(harness.page.display_of(Element::TruthText), Some(Display::None));
        assert_eq!(harness.page.display_of(Element::DiaryText), Some(Display::None));
    }

    #[test]
    fn drama_then_confirm_switches_with_indicator() {
        let mut harness = Harness::new();
        harness.send(UiEvent::DramaClicked);
        assert_eq!(harness.controller.mode().mode(), Mode::Official);
        assert!(harness.page.toasts.is_empty());

        harness.send(UiEvent::ConfirmUnofficial);
        assert_eq!(harness.controller.mode().mode(), Mode::Unofficial);
        assert_eq!(
            harness.page.toasts.values().next().map(String::as_str),
            Some(Mode::Unofficial.indicator())
        );

        harness.wait(2_500);
        assert!(harness.page.toasts.is_empty());
    }

    #[test]
    fn recruiter_returns_to_official_and_scrolls_to_creator() {
        let mut harness = Harness::new();
        harness.send(UiEvent::ModeRequested(Mode::Unofficial));
        harness.send(UiEvent::ConfirmUnofficial);

        harness.send(UiEvent::RecruiterClicked);
        assert_eq!(harness.controller.mode().mode(), Mode::Official);
        assert!(harness.page.scrolled_to.is_empty());

        harness.wait(100);
        assert_eq!(harness.page.scrolled_to, vec![(Element::CreatorSection, 70.0)]);
    }

    #[test]
    fn cancel_leaves_mode_and_shows_no_indicator() {
        let mut harness = Harness::new();
        harness.send(UiEvent::ModeRequested(Mode::Unofficial));
        harness.send(UiEvent::CancelUnofficial);
        assert_eq!(harness.controller.mode().mode(), Mode::Official);
        assert!(harness.page.toasts.is_empty());
        assert_eq!(harness.clock.pending(), 0);
    }

    #[test]
    fn double_trigger_shows_only_first_meme() {
        let mut harness = Harness::new();
        harness.trigger("/memes/one.png", "One");
        harness.trigger("/memes/two.png", "Two");
        harness.wait(10);

        assert_eq!(harness.controller.modal().phase(), ModalPhase::Open);
        assert_eq!(
            harness.page.attribute_of(Element::MemeModalImage, "src"),
            Some("/memes/one.png")
        );
        assert_eq!(harness.page.text_of(Element::MemeModalTitle), Some("One"));
    }

    #[test]
    fn modal_closes_on_escape_after_fade() {
        let mut harness = Harness::new();
        harness.trigger("/memes/one.png", "One");
        harness.wait(10);

        harness.send(UiEvent::KeyPressed("Escape".to_string()));
        assert_eq!(harness.controller.modal().phase(), ModalPhase::Closing);
        harness.trigger("/memes/two.png", "Two");
        harness.wait(299);
        assert_eq!(harness.controller.modal().phase(), ModalPhase::Closing);
        harness.wait(1);
        assert_eq!(harness.controller.modal().phase(), ModalPhase::Closed);
        assert_eq!(harness.page.text_of(Element::MemeModalTitle), Some(""));
    }

    #[test]
    fn close_during_opening_drops_the_settle_timer() {
        let mut harness = Harness::new();
        harness.trigger("/memes/one.png", "One");
        harness.send(UiEvent::BackdropClicked);
        harness.wait(10);

        assert_eq!(harness.controller.modal().phase(), ModalPhase::Closing);
        assert!(!harness.page.has_class(Element::MemeModal, "active"));
        harness.wait(300);
        assert_eq!(harness.controller.modal().phase(), ModalPhase::Closed);
    }

    #[test]
    fn excuse_hides_after_fixed_duration() {
        let mut harness = Harness::new();
        harness.send(UiEvent::GenerateExcuse);
        assert!(harness.controller.meter().visible_excuse().is_some());

        harness.wait(4_999);
        assert!(!harness.page.has_class(Element::DynamicFeedback, "hidden"));
        harness.wait(1);
        assert!(harness.page.has_class(Element::DynamicFeedback, "hidden"));
    }

    #[test]
    fn slider_input_updates_meter() {
        let mut harness = Harness::new();
        harness.send(UiEvent::SliderInput(75));
        assert_eq!(harness.controller.meter().level(), 75);
        assert_eq!(
            harness.page.text_of(Element::StatusMessage),
            Some("You're at 75: Google thinks I'm a bot")
        );
    }

    #[test]
    fn form_success_then_restore() {
        let mut harness = Harness::new();
        harness.send(UiEvent::FormSubmitted);
        harness.send(UiEvent::FormSubmitted);
        assert_eq!(harness.submits, 1);

        harness.send(UiEvent::FormCompleted { delivered: true });
        assert_eq!(
            harness.page.display_of(Element::TransmissionSuccess),
            Some(Display::Flex)
        );
        assert_eq!(harness.page.form_resets, 1);

        harness.wait(3_000);
        assert_eq!(harness.page.display_of(Element::ContactForm), Some(Display::Block));
        assert_eq!(
            harness.page.display_of(Element::TransmissionSuccess),
            Some(Display::None)
        );
    }

    #[test]
    fn form_failure_shows_retry_then_restores() {
        let mut harness = Harness::new();
        harness.send(UiEvent::FormSubmitted);
        harness.send(UiEvent::FormCompleted { delivered: false });
        assert_eq!(harness.page.text_of(Element::SubmitLabel), Some(RETRY_LABEL));

        harness.wait(3_000);
        assert_eq!(harness.page.text_of(Element::SubmitLabel), Some(SUBMIT_LABEL));
        assert_eq!(harness.page.display_of(Element::ContactForm), Some(Display::Block));
    }

    #[test]
    fn reveal_events_route_to_their_widgets() {
        let mut harness = Harness::new();
        harness.send(UiEvent::DiaryToggled);
        harness.send(UiEvent::SkillToggled(3));
        harness.send(UiEvent::ConfessionToggled {
            index: 0,
            meme: "/memes/c.png".to_string(),
            label: "SHOW IT".to_string(),
        });

        assert_eq!(harness.page.display_of(Element::DiaryText), Some(Display::Block));
        assert_eq!(harness.page.display_of(Element::SkillMeme(3)), Some(Display::Block));
        assert!(harness.page.meme_in(Element::ConfessionMeme(0)).is_some());
    }

    #[test]
    fn repeated_unofficial_request_opens_one_dialog() {
        let mut harness = Harness::new();
        harness.send(UiEvent::ModeRequested(Mode::Unofficial));
        harness.send(UiEvent::DramaClicked);
        assert_eq!(harness.page.dialog_shows, 1);

        harness.send(UiEvent::ConfirmUnofficial);
        assert_eq!(harness.controller.mode().mode(), Mode::Unofficial);
        assert_eq!(harness.page.toasts.len(), 1);

        let effects = harness.controller.handle(&mut harness.page, UiEvent::ConfirmUnofficial);
        assert!(effects.is_empty());
        assert_eq!(harness.controller.mode().mode(), Mode::Unofficial);
        assert_eq!(harness.page.toasts.len(), 1);
    }

    #[test]
    fn savage_and_back_to_top_events() {
        let mut harness = Harness::new();
        harness.send(UiEvent::SavageToggled(2));
        assert_eq!(
            harness.page.display_of(Element::SavageTarget(2)),
            Some(Display::Block)
        );

        harness.send(UiEvent::BackToTop);
        assert_eq!(harness.page.scrolls_to_top, 1);
        assert_eq!(harness.clock.pending(), 0);
    }
}
