use std::rc::Rc;

use gpui::{
    FocusHandle, InteractiveElement, IntoElement, MouseButton, ParentElement, Refineable,
    RenderOnce, SharedString, StatefulInteractiveElement, Styled, Window, div, px, rgb,
};

use crate::contracts::FieldLike;
use crate::id::ComponentId;

use super::edit::{EditOutcome, apply_keystroke};
use super::layout::Stack;
use super::text_input::{COLOR_BORDER, COLOR_BORDER_FOCUS, COLOR_ERROR, COLOR_MUTED, ChangeHandler};

/// Multi-line controlled text input. Enter inserts a newline instead of
/// submitting.
#[derive(IntoElement)]
pub struct Textarea {
    id: ComponentId,
    value: SharedString,
    placeholder: Option<SharedString>,
    label: Option<SharedString>,
    description: Option<SharedString>,
    error: Option<SharedString>,
    required: bool,
    disabled: bool,
    min_rows: usize,
    focus_handle: Option<FocusHandle>,
    style: gpui::StyleRefinement,
    on_change: Option<ChangeHandler>,
}

impl Textarea {
    #[track_caller]
    pub fn new() -> Self {
        Self {
            id: ComponentId::auto("textarea"),
            value: SharedString::default(),
            placeholder: None,
            label: None,
            description: None,
            error: None,
            required: false,
            disabled: false,
            min_rows: 3,
            focus_handle: None,
            style: gpui::StyleRefinement::default(),
            on_change: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<ComponentId>) -> Self {
        self.id = id.into();
        self
    }

    pub fn value(mut self, value: impl Into<SharedString>) -> Self {
        self.value = value.into();
        self
    }

    pub fn placeholder(mut self, placeholder: impl Into<SharedString>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn min_rows(mut self, rows: usize) -> Self {
        self.min_rows = rows.max(1);
        self
    }

    pub fn disabled(mut self, value: bool) -> Self {
        self.disabled = value;
        self
    }

    pub fn focus_handle(mut self, focus_handle: FocusHandle) -> Self {
        self.focus_handle = Some(focus_handle);
        self
    }

    pub fn on_change(
        mut self,
        handler: impl Fn(SharedString, &mut Window, &mut gpui::App) + 'static,
    ) -> Self {
        self.on_change = Some(Rc::new(handler));
        self
    }
}

impl Default for Textarea {
    #[track_caller]
    fn default() -> Self {
        Self::new()
    }
}

impl FieldLike for Textarea {
    fn label(mut self, value: impl Into<SharedString>) -> Self {
        self.label = Some(value.into());
        self
    }

    fn description(mut self, value: impl Into<SharedString>) -> Self {
        self.description = Some(value.into());
        self
    }

    fn error(mut self, value: impl Into<SharedString>) -> Self {
        self.error = Some(value.into());
        self
    }

    fn required(mut self, value: bool) -> Self {
        self.required = value;
        self
    }
}

crate::impl_disableable!(Textarea);

impl Styled for Textarea {
    fn style(&mut self) -> &mut gpui::StyleRefinement {
        &mut self.style
    }
}

impl RenderOnce for Textarea {
    fn render(self, window: &mut Window, _cx: &mut gpui::App) -> impl IntoElement {
        let is_focused = self
            .focus_handle
            .as_ref()
            .is_some_and(|focus_handle| focus_handle.is_focused(window));

        let border = if self.error.is_some() {
            rgb(COLOR_ERROR)
        } else if is_focused {
            rgb(COLOR_BORDER_FOCUS)
        } else {
            rgb(COLOR_BORDER)
        };

        let mut control = div()
            .id(self.id.slot("control"))
            .flex()
            .flex_col()
            .items_start()
            .w_full()
            .min_h(px(self.min_rows as f32 * 20.0))
            .px_2()
            .py_1()
            .border_1()
            .border_color(border)
            .rounded_md()
            .bg(gpui::white());

        if self.disabled {
            control = control.cursor_default().opacity(0.55);
        } else {
            control = control.cursor_text();
        }

        if self.value.is_empty() {
            if let Some(placeholder) = self.placeholder.clone() {
                control = control.child(div().text_color(rgb(COLOR_MUTED)).child(placeholder));
            } else {
                control = control.child(" ");
            }
        } else {
            for line in self.value.as_ref().split('\n') {
                if line.is_empty() {
                    control = control.child(div().w_full().child(" "));
                } else {
                    control = control.child(div().w_full().child(SharedString::from(line.to_string())));
                }
            }
        }

        if let Some(focus_handle) = self.focus_handle.clone()
            && !self.disabled
        {
            control = control.track_focus(&focus_handle);

            let focus_for_mouse = focus_handle.clone();
            control = control.on_mouse_down(MouseButton::Left, move |_event, window, cx| {
                window.focus(&focus_for_mouse, cx);
            });

            let value_for_keys = self.value.clone();
            let on_change = self.on_change.clone();
            control = control.on_key_down(move |event, window, cx| {
                let keystroke = &event.keystroke;
                if keystroke.modifiers.control
                    || keystroke.modifiers.platform
                    || keystroke.modifiers.function
                {
                    return;
                }
                let outcome = match apply_keystroke(
                    value_for_keys.as_ref(),
                    keystroke.key.as_str(),
                    keystroke.key_char.as_deref(),
                ) {
                    // Enter means a newline in a multi-line field.
                    EditOutcome::Submitted => {
                        EditOutcome::Edited(format!("{value_for_keys}\n"))
                    }
                    outcome => outcome,
                };
                if let EditOutcome::Edited(next) = outcome {
                    if let Some(handler) = on_change.as_ref() {
                        handler(next.into(), window, cx);
                    }
                    window.refresh();
                }
            });
        }

        let mut field = Stack::vertical().gap_1();

        if self.label.is_some() || self.required {
            let mut label_row = Stack::horizontal().gap_1();
            if let Some(label) = self.label.clone() {
                label_row = label_row.child(
                    div()
                        .id(self.id.slot("label"))
                        .text_sm()
                        .text_color(rgb(COLOR_MUTED))
                        .child(label),
                );
            }
            if self.required {
                label_row = label_row.child(div().text_color(rgb(COLOR_ERROR)).child("*"));
            }
            field = field.child(label_row);
        }

        field = field.child(control);

        if let Some(error) = self.error.clone() {
            field = field.child(
                div()
                    .id(self.id.slot("error"))
                    .text_sm()
                    .text_color(rgb(COLOR_ERROR))
                    .child(error),
            );
        } else if let Some(description) = self.description.clone() {
            field = field.child(
                div()
                    .id(self.id.slot("description"))
                    .text_sm()
                    .text_color(rgb(COLOR_MUTED))
                    .child(description),
            );
        }

        field.style().refine(&self.style);
        field
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn min_rows_never_drops_below_one() {
        assert_eq!(Textarea::new().min_rows(0).min_rows, 1);
        assert_eq!(Textarea::new().min_rows(4).min_rows, 4);
        assert_eq!(Textarea::new().min_rows, 3);
    }
}
