//! Browser binding: resolves [`Element`]s against the live document, wires
//! listeners into [`UiController::handle`] and runs the returned effects with
//! `gloo_timers` and `gloo_net`.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use gloo_net::http::Request;
use gloo_timers::callback::Timeout;
use rand::rngs::StdRng;
use rand::SeedableRng;
use wasm_bindgen::prelude::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::spawn_local;
use web_sys::{
    Document, Event, EventTarget, FormData, HtmlDialogElement, HtmlElement, HtmlFormElement,
    HtmlInputElement, KeyboardEvent, Window,
};

use crate::config::{self, UiConfig, CONFIG_ELEMENT_ID};
use crate::controller::{UiController, UiEvent};
use crate::error::UiError;
use crate::mode::Mode;
use crate::page::{
    Display, Element, MemeContent, Page, Selector, BACK_TO_TOP_SELECTOR,
    CONFESSION_BUTTON_SELECTOR, CONTACT_FORM_SELECTOR, SAVAGE_BUTTON_SELECTOR,
    SKILL_REVEAL_SELECTOR,
};
use crate::schedule::Effect;

const TOAST_STYLE: &str = "position: fixed; bottom: 20px; left: 50%; transform: translateX(-50%); \
    background-color: var(--netflix-red); color: var(--netflix-white); padding: 10px 20px; \
    border-radius: 4px; z-index: 9999;";

pub struct DomPage {
    window: Window,
    document: Document,
    toasts: HashMap<u32, web_sys::Element>,
}

impl DomPage {
    pub fn new(window: Window, document: Document) -> Self {
        Self {
            window,
            document,
            toasts: HashMap::new(),
        }
    }

    fn resolve(&self, element: Element) -> Option<web_sys::Element> {
        let found = match element.selector() {
            Selector::Id(id) => self.document.get_element_by_id(id),
            Selector::Query(query) => self.document.query_selector(query).ok().flatten(),
            Selector::Nth { selector, index } => self.nth(selector, index),
            Selector::Within {
                anchor,
                index,
                ancestor,
                child,
            } => self
                .nth(anchor, index)
                .and_then(|el| el.closest(ancestor).ok().flatten())
                .and_then(|el| el.query_selector(child).ok().flatten()),
            Selector::NextSibling { anchor, index } => self
                .nth(anchor, index)
                .and_then(|el| el.next_element_sibling()),
        };
        if found.is_none() {
            log::debug!("{:?} not found, skipping", element);
        }
        found
    }

    fn nth(&self, selector: &str, index: usize) -> Option<web_sys::Element> {
        let index = u32::try_from(index).ok()?;
        self.document
            .query_selector_all(selector)
            .ok()?
            .item(index)?
            .dyn_into::<web_sys::Element>()
            .ok()
    }

    fn html(&self, element: Element) -> Option<HtmlElement> {
        self.resolve(element)?.dyn_into::<HtmlElement>().ok()
    }

    fn contact_form(&self) -> Option<HtmlFormElement> {
        self.resolve(Element::ContactForm)?
            .dyn_into::<HtmlFormElement>()
            .ok()
    }

    fn append_meme(&self, container: &web_sys::Element, meme: &MemeContent) -> Result<(), JsValue> {
        let image = self.document.create_element("img")?;
        image.set_attribute("src", &meme.src)?;
        image.set_attribute("alt", "Confession meme")?;
        image.set_attribute("class", "inline-meme")?;
        container.append_child(&image)?;

        let caption = self.document.create_element("p")?;
        caption.set_attribute("class", "meme-caption")?;
        caption.set_text_content(Some(&meme.title));
        container.append_child(&caption)?;
        Ok(())
    }

    fn build_toast(&self, text: &str) -> Result<web_sys::Element, JsValue> {
        let body = self
            .document
            .body()
            .ok_or_else(|| JsValue::from_str("document has no body"))?;
        let toast = self.document.create_element("div")?;
        toast.set_attribute("class", "mode-indicator")?;
        toast.set_attribute("style", TOAST_STYLE)?;
        toast.set_text_content(Some(text));
        body.append_child(&toast)?;
        Ok(toast)
    }
}

impl Page for DomPage {
    fn set_display(&mut self, element: Element, display: Display) -> bool {
        self.set_style(element, "display", display.as_css())
    }

    fn set_text(&mut self, element: Element, text: &str) -> bool {
        match self.resolve(element) {
            Some(el) => {
                el.set_text_content(Some(text));
                true
            }
            None => false,
        }
    }

    fn set_class(&mut self, element: Element, class: &str, enabled: bool) -> bool {
        let Some(el) = self.resolve(element) else {
            return false;
        };
        let classes = el.class_list();
        let result = if enabled {
            classes.add_1(class)
        } else {
            classes.remove_1(class)
        };
        result.is_ok()
    }

    fn set_attribute(&mut self, element: Element, name: &str, value: &str) -> bool {
        self.resolve(element)
            .map(|el| el.set_attribute(name, value).is_ok())
            .unwrap_or(false)
    }

    fn set_style(&mut self, element: Element, property: &str, value: &str) -> bool {
        self.html(element)
            .map(|el| el.style().set_property(property, value).is_ok())
            .unwrap_or(false)
    }

    fn show_dialog(&mut self, element: Element) -> bool {
        let Some(dialog) = self
            .resolve(element)
            .and_then(|el| el.dyn_into::<HtmlDialogElement>().ok())
        else {
            return false;
        };
        if dialog.open() {
            return true;
        }
        match dialog.show_modal() {
            Ok(()) => true,
            Err(e) => {
                log::warn!("Failed to open dialog: {:?}", e);
                false
            }
        }
    }

    fn close_dialog(&mut self, element: Element) -> bool {
        match self
            .resolve(element)
            .and_then(|el| el.dyn_into::<HtmlDialogElement>().ok())
        {
            Some(dialog) => {
                dialog.close();
                true
            }
            None => false,
        }
    }

    fn render_meme(&mut self, element: Element, meme: Option<&MemeContent>) -> bool {
        let Some(container) = self.resolve(element) else {
            return false;
        };
        container.set_inner_html("");
        if let Some(meme) = meme {
            if let Err(e) = self.append_meme(&container, meme) {
                log::warn!("Failed to render meme {}: {:?}", meme.src, e);
                container.set_inner_html("");
                return false;
            }
        }
        true
    }

    fn reset_form(&mut self, element: Element) -> bool {
        match self
            .resolve(element)
            .and_then(|el| el.dyn_into::<HtmlFormElement>().ok())
        {
            Some(form) => {
                form.reset();
                true
            }
            None => false,
        }
    }

    fn scroll_to_top(&mut self) {
        self.window.scroll_to_with_x_and_y(0.0, 0.0);
    }

    fn scroll_to(&mut self, element: Element, offset_px: f64) -> bool {
        let Some(el) = self.resolve(element) else {
            return false;
        };
        let scroll_y = self.window.scroll_y().unwrap_or(0.0);
        let top = el.get_bounding_client_rect().top() + scroll_y - offset_px;
        self.window.scroll_to_with_x_and_y(0.0, top.max(0.0));
        true
    }

    fn show_toast(&mut self, id: u32, text: &str) {
        match self.build_toast(text) {
            Ok(toast) => {
                self.toasts.insert(id, toast);
            }
            Err(e) => log::warn!("Failed to show indicator: {:?}", e),
        }
    }

    fn dismiss_toast(&mut self, id: u32) {
        if let Some(toast) = self.toasts.remove(&id) {
            toast.remove();
        }
    }

    fn lock_body_scroll(&mut self, locked: bool) {
        if let Some(body) = self.document.body() {
            let value = if locked { "hidden" } else { "" };
            if let Err(e) = body.style().set_property("overflow", value) {
                log::warn!("Failed to toggle body scroll: {:?}", e);
            }
        }
    }
}

struct App {
    controller: UiController,
    page: DomPage,
}

type Shared = Rc<RefCell<App>>;

/// Mounts the controller on the current document and registers every listener.
pub fn start() -> Result<(), UiError> {
    let window = web_sys::window().ok_or(UiError::NoWindow)?;
    let document = window.document().ok_or(UiError::NoDocument)?;

    let raw_config = document
        .get_element_by_id(CONFIG_ELEMENT_ID)
        .and_then(|el| el.text_content());
    let config = UiConfig::from_embedded(raw_config.as_deref());

    let mut page = DomPage::new(window, document.clone());
    let mut controller = UiController::new(config, StdRng::from_entropy());
    controller.mount(&mut page);

    let app = Rc::new(RefCell::new(App { controller, page }));
    register_listeners(&app, &document)?;
    log::info!("Page controller started");
    Ok(())
}

fn dispatch(app: &Shared, event: UiEvent) {
    let effects = match app.try_borrow_mut() {
        Ok(mut state) => {
            let App { controller, page } = &mut *state;
            controller.handle(page, event)
        }
        Err(_) => {
            log::warn!("Dropped re-entrant event {:?}", event);
            return;
        }
    };
    for effect in effects {
        run_effect(app, effect);
    }
}

fn run_effect(app: &Shared, effect: Effect) {
    match effect {
        Effect::Schedule { delay_ms, task } => {
            let app = app.clone();
            Timeout::new(delay_ms, move || {
                dispatch(&app, UiEvent::TimerFired(task));
            })
            .forget();
        }
        Effect::SubmitForm => {
            let form = app.borrow().page.contact_form();
            let app = app.clone();
            spawn_local(async move {
                let delivered = match form {
                    Some(form) => match submit_form(form).await {
                        Ok(()) => true,
                        Err(e) => {
                            log::error!("Contact form submission failed: {}", e);
                            false
                        }
                    },
                    None => false,
                };
                dispatch(&app, UiEvent::FormCompleted { delivered });
            });
        }
    }
}

async fn submit_form(form: HtmlFormElement) -> Result<(), UiError> {
    let endpoint = form
        .get_attribute("action")
        .filter(|action| !action.is_empty())
        .unwrap_or_else(|| config::get_form_endpoint().to_string());
    let body = FormData::new_with_form(&form).map_err(UiError::js)?;

    let response = Request::post(&endpoint)
        .header("Accept", "application/json")
        .body(body)
        .send()
        .await?;

    if response.ok() {
        Ok(())
    } else {
        Err(UiError::SubmissionRejected(response.status()))
    }
}

fn listen<F>(app: &Shared, target: &EventTarget, kind: &str, mut to_event: F) -> Result<(), UiError>
where
    F: FnMut(&Event) -> Option<UiEvent> + 'static,
{
    let app = app.clone();
    let callback = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
        if let Some(ui_event) = to_event(&event) {
            dispatch(&app, ui_event);
        }
    });
    target
        .add_event_listener_with_callback(kind, callback.as_ref().unchecked_ref())
        .map_err(UiError::js)?;
    callback.forget();
    Ok(())
}

fn listen_id<F>(app: &Shared, document: &Document, id: &str, kind: &str, to_event: F) -> Result<(), UiError>
where
    F: FnMut(&Event) -> Option<UiEvent> + 'static,
{
    match document.get_element_by_id(id) {
        Some(el) => listen(app, &el, kind, to_event),
        None => {
            log::debug!("#{} not in page, skipping {} listener", id, kind);
            Ok(())
        }
    }
}

fn click_id(app: &Shared, document: &Document, id: &str, event: UiEvent) -> Result<(), UiError> {
    listen_id(app, document, id, "click", move |_| Some(event.clone()))
}

fn all_elements(document: &Document, selector: &str) -> Vec<web_sys::Element> {
    let Ok(nodes) = document.query_selector_all(selector) else {
        return Vec::new();
    };
    (0..nodes.length())
        .filter_map(|index| nodes.item(index))
        .filter_map(|node| node.dyn_into::<web_sys::Element>().ok())
        .collect()
}

fn register_listeners(app: &Shared, document: &Document) -> Result<(), UiError> {
    // Mode switch
    click_id(app, document, "officialModeBtn", UiEvent::ModeRequested(Mode::Official))?;
    click_id(app, document, "unofficialModeBtn", UiEvent::ModeRequested(Mode::Unofficial))?;
    click_id(app, document, "recruiterBtn", UiEvent::RecruiterClicked)?;
    click_id(app, document, "dramaBtn", UiEvent::DramaClicked)?;
    click_id(app, document, "confirmBtn", UiEvent::ConfirmUnofficial)?;
    click_id(app, document, "cancelBtn", UiEvent::CancelUnofficial)?;
    // Escape on the native dialog
    listen_id(app, document, "warningDialog", "cancel", |_| {
        Some(UiEvent::CancelUnofficial)
    })?;

    // Struggle meter
    listen_id(app, document, "unofficialRatingSlider", "input", |event| {
        let input = event.target()?.dyn_into::<HtmlInputElement>().ok()?;
        input.value().trim().parse().ok().map(UiEvent::SliderInput)
    })?;
    click_id(app, document, "generateFeedback", UiEvent::GenerateExcuse)?;

    // Meme modal
    click_id(app, document, "memeModalClose", UiEvent::ModalCloseClicked)?;
    listen_id(app, document, "memeModal", "click", |event| {
        let target: Option<JsValue> = event.target().map(Into::into);
        let current: Option<JsValue> = event.current_target().map(Into::into);
        (target.is_some() && target == current).then_some(UiEvent::BackdropClicked)
    })?;
    listen(app, document, "keydown", |event| {
        event
            .dyn_ref::<KeyboardEvent>()
            .map(|key| UiEvent::KeyPressed(key.key()))
    })?;
    for trigger in all_elements(document, "[data-meme]:not(.confession-btn)") {
        let source = trigger.clone();
        listen(app, &trigger, "click", move |event| {
            event.prevent_default();
            Some(UiEvent::MemeTriggered {
                src: source.get_attribute("data-meme").unwrap_or_default(),
                title: source.get_attribute("data-title"),
            })
        })?;
    }

    // Contact form
    match document.query_selector(CONTACT_FORM_SELECTOR).ok().flatten() {
        Some(form) => listen(app, &form, "submit", |event| {
            event.prevent_default();
            Some(UiEvent::FormSubmitted)
        })?,
        None => log::debug!("Contact form not in page"),
    }

    // Reveal widgets
    click_id(app, document, "truthBtn", UiEvent::TruthToggled)?;
    click_id(app, document, "ZentronBtn", UiEvent::DiaryToggled)?;
    for (index, button) in all_elements(document, CONFESSION_BUTTON_SELECTOR)
        .into_iter()
        .enumerate()
    {
        let source = button.clone();
        listen(app, &button, "click", move |_| {
            let label = source
                .query_selector(".btn-text")
                .ok()
                .flatten()
                .unwrap_or_else(|| source.clone())
                .text_content()
                .unwrap_or_default();
            Some(UiEvent::ConfessionToggled {
                index,
                meme: source.get_attribute("data-meme").unwrap_or_default(),
                label,
            })
        })?;
    }
    for (index, button) in all_elements(document, SKILL_REVEAL_SELECTOR)
        .into_iter()
        .enumerate()
    {
        listen(app, &button, "click", move |_| Some(UiEvent::SkillToggled(index)))?;
    }
    for (index, button) in all_elements(document, SAVAGE_BUTTON_SELECTOR)
        .into_iter()
        .enumerate()
    {
        listen(app, &button, "click", move |_| Some(UiEvent::SavageToggled(index)))?;
    }
    match document.query_selector(BACK_TO_TOP_SELECTOR).ok().flatten() {
        Some(button) => listen(app, &button, "click", |_| Some(UiEvent::BackToTop))?,
        None => log::debug!("Back-to-top button not in page"),
    }

    Ok(())
}
