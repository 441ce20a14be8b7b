use std::collections::HashMap;
use std::sync::{Arc, LazyLock, Mutex, RwLock};

use gpui::{
    FocusHandle, InteractiveElement, IntoElement, ParentElement, Refineable, RenderOnce,
    SharedString, Styled, Window, div, rgb,
};

use crate::components::{Button, Stack, TextInput, Textarea};
use crate::contracts::FieldLike;
use crate::form::{FormController, FormError, FormModel, FormResult, RuleError};
use crate::id::ComponentId;

use super::model::{ContactFormModel, contact_form_controller};
use super::submission::{SubmissionSlot, latest_submission, store_submission};

const COLOR_MUTED: u32 = 0x6b7280;

/// Controller, submission slot and focus handles for one rendered form.
/// State is keyed by component id so a form keeps its values across frames
/// even though the view itself is rebuilt on every render.
#[derive(Clone)]
struct ContactFormState {
    controller: FormController<ContactFormModel, RuleError>,
    submission: SubmissionSlot,
    first_name_focus: FocusHandle,
    last_name_focus: FocusHandle,
    email_focus: FocusHandle,
    message_focus: FocusHandle,
}

impl ContactFormState {
    fn new(cx: &mut gpui::App) -> FormResult<Self> {
        let controller = contact_form_controller()?;
        let fields = ContactFormModel::fields();

        let first_name_focus = cx.focus_handle();
        let last_name_focus = cx.focus_handle();
        let email_focus = cx.focus_handle();
        let message_focus = cx.focus_handle();

        let handle = first_name_focus.clone();
        controller.register_focus_handler(fields.first_name(), move |window, cx| {
            window.focus(&handle, cx);
        })?;
        let handle = last_name_focus.clone();
        controller.register_focus_handler(fields.last_name(), move |window, cx| {
            window.focus(&handle, cx);
        })?;
        let handle = email_focus.clone();
        controller.register_focus_handler(fields.email(), move |window, cx| {
            window.focus(&handle, cx);
        })?;

        Ok(Self {
            controller,
            submission: Arc::new(RwLock::new(None)),
            first_name_focus,
            last_name_focus,
            email_focus,
            message_focus,
        })
    }
}

/// Keyed store for per-form state that has to outlive individual renders.
/// Lock poisoning is reported, not panicked on.
struct StateRegistry<T> {
    entries: LazyLock<Mutex<HashMap<String, T>>>,
}

impl<T: Clone> StateRegistry<T> {
    const fn new() -> Self {
        Self {
            entries: LazyLock::new(|| Mutex::new(HashMap::new())),
        }
    }

    fn get(&self, key: &str, context: &'static str) -> FormResult<Option<T>> {
        Ok(self
            .entries
            .lock()
            .map_err(|_| FormError::StatePoisoned(context))?
            .get(key)
            .cloned())
    }

    /// Inserts unless the key is already present; either way returns the
    /// entry that ends up stored.
    fn insert(&self, key: String, value: T, context: &'static str) -> FormResult<T> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| FormError::StatePoisoned(context))?;
        Ok(entries.entry(key).or_insert(value).clone())
    }

    fn remove(&self, key: &str, context: &'static str) -> FormResult<bool> {
        Ok(self
            .entries
            .lock()
            .map_err(|_| FormError::StatePoisoned(context))?
            .remove(key)
            .is_some())
    }
}

static FORM_STATE: StateRegistry<ContactFormState> = StateRegistry::new();

fn state_for(id: &ComponentId, cx: &mut gpui::App) -> FormResult<ContactFormState> {
    if let Some(state) = FORM_STATE.get(id.as_str(), "reading contact form state")? {
        return Ok(state);
    }
    let state = ContactFormState::new(cx)?;
    FORM_STATE.insert(
        id.as_str().to_string(),
        state,
        "storing contact form state",
    )
}

/// Drops the retained state for a form id once that form stops rendering.
/// The next render under the same id starts from a fresh, empty form.
/// Returns whether any state was held.
pub fn release_form_state(id: &ComponentId) -> FormResult<bool> {
    FORM_STATE.remove(id.as_str(), "releasing contact form state")
}

/// The contact form: first name, last name and email are required, the
/// message is optional. A successful submit renders the submitted values
/// below the button and leaves the fields editable.
#[derive(IntoElement)]
pub struct ContactForm {
    id: ComponentId,
    style: gpui::StyleRefinement,
}

impl ContactForm {
    #[track_caller]
    pub fn new() -> Self {
        Self {
            id: ComponentId::auto("contact-form"),
            style: gpui::StyleRefinement::default(),
        }
    }

    pub fn with_id(mut self, id: impl Into<ComponentId>) -> Self {
        self.id = id.into();
        self
    }
}

impl Default for ContactForm {
    #[track_caller]
    fn default() -> Self {
        Self::new()
    }
}

impl Styled for ContactForm {
    fn style(&mut self) -> &mut gpui::StyleRefinement {
        &mut self.style
    }
}

impl RenderOnce for ContactForm {
    fn render(self, _window: &mut Window, cx: &mut gpui::App) -> impl IntoElement {
        match render_form(&self.id, cx) {
            Ok(mut form) => {
                form.style().refine(&self.style);
                form.into_any_element()
            }
            Err(error) => {
                log::error!("contact form unavailable: {error}");
                div()
                    .id(self.id)
                    .text_color(rgb(COLOR_MUTED))
                    .child("Contact form unavailable")
                    .into_any_element()
            }
        }
    }
}

fn submit_action(
    controller: FormController<ContactFormModel, RuleError>,
    submission: SubmissionSlot,
) -> impl Fn(&mut Window, &mut gpui::App) + Clone + 'static {
    move |window, cx| {
        let slot = submission.clone();
        let result = controller.submit_in(window, cx, move |model| store_submission(&slot, model));
        if let Err(error) = result {
            log::error!("contact form submit failed: {error}");
        }
        window.refresh();
    }
}

fn render_form(id: &ComponentId, cx: &mut gpui::App) -> FormResult<Stack> {
    let state = state_for(id, cx)?;
    let fields = ContactFormModel::fields();
    let controller = &state.controller;
    let submit = submit_action(controller.clone(), state.submission.clone());

    let first_name = {
        let submit = submit.clone();
        controller
            .bind_text_input(
                fields.first_name(),
                TextInput::new()
                    .with_id(id.child("first-name"))
                    .placeholder("Edd")
                    .focus_handle(state.first_name_focus.clone())
                    .on_submit(move |_value, window, cx| submit(window, cx)),
            )?
            .label("First Name")
    };

    let last_name = {
        let submit = submit.clone();
        controller
            .bind_text_input(
                fields.last_name(),
                TextInput::new()
                    .with_id(id.child("last-name"))
                    .placeholder("Burke")
                    .focus_handle(state.last_name_focus.clone())
                    .on_submit(move |_value, window, cx| submit(window, cx)),
            )?
            .label("Last Name")
    };

    let email = {
        let submit = submit.clone();
        controller
            .bind_text_input(
                fields.email(),
                TextInput::new()
                    .with_id(id.child("email"))
                    .placeholder("bluebill@gmail.com")
                    .focus_handle(state.email_focus.clone())
                    .on_submit(move |_value, window, cx| submit(window, cx)),
            )?
            .label("Email")
    };

    let message = controller
        .bind_textarea(
            fields.message(),
            Textarea::new()
                .with_id(id.child("message"))
                .min_rows(4)
                .focus_handle(state.message_focus.clone()),
        )?
        .label("Message");

    let button = Button::new("Submit")
        .with_id(id.child("submit"))
        .on_click(move |_event, window, cx| submit(window, cx));

    let mut root = Stack::vertical()
        .gap_3()
        .p_4()
        .child(
            div()
                .id(id.slot("header"))
                .text_xl()
                .child("Contact Form"),
        )
        .child(first_name)
        .child(last_name)
        .child(email)
        .child(message)
        .child(button);

    if let Some(submission) = latest_submission(&state.submission)? {
        let mut panel = Stack::vertical().gap_1().child(
            div()
                .id(id.slot("submitted-header"))
                .text_sm()
                .text_color(rgb(COLOR_MUTED))
                .child("Submitted"),
        );
        for (name, value) in submission.display_fields() {
            panel = panel.child(
                Stack::horizontal()
                    .gap_2()
                    .child(
                        div()
                            .text_sm()
                            .text_color(rgb(COLOR_MUTED))
                            .child(SharedString::from(format!("{name}:"))),
                    )
                    .child(div().id(id.slot(&format!("submitted-{name}"))).child(value)),
            );
        }
        root = root.child(panel);
    }

    Ok(root)
}
