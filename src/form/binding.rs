use gpui::SharedString;

use super::controller::{FieldKey, FormController, FormResult, read_lock};
use super::validation::{FieldLens, ValidationError};
use crate::components::{TextInput, Textarea};
use crate::contracts::FieldLike;

impl<T, E> FormController<T, E>
where
    T: Clone + Send + Sync + 'static,
    E: ValidationError,
{
    /// The error a field should currently show, if any. Errors stay hidden
    /// until the field has been interacted with or a submit was attempted.
    pub fn field_error_for_display<L>(&self, lens: L) -> FormResult<Option<SharedString>>
    where
        L: FieldLens<T>,
    {
        self.display_error_message(lens.key())
    }

    /// Wires a text input to a field: current value in, edits back out.
    /// Typing marks the field as touched so its error can surface while the
    /// user is still in the field.
    pub fn bind_text_input<L>(&self, lens: L, input: TextInput) -> FormResult<TextInput>
    where
        L: FieldLens<T, Value = SharedString>,
    {
        let key = lens.key();
        let snapshot = self.snapshot()?;
        let value = lens.get(&snapshot.model).clone();
        let controller = self.clone();
        let bound = input.value(value).on_change(move |next, _, _| {
            drop(controller.set(lens, next));
            drop(controller.touch(lens));
        });
        self.apply_fieldlike_presentation(key, bound)
    }

    pub fn bind_textarea<L>(&self, lens: L, textarea: Textarea) -> FormResult<Textarea>
    where
        L: FieldLens<T, Value = SharedString>,
    {
        let key = lens.key();
        let snapshot = self.snapshot()?;
        let value = lens.get(&snapshot.model).clone();
        let controller = self.clone();
        let bound = textarea.value(value).on_change(move |next, _, _| {
            drop(controller.set(lens, next));
            drop(controller.touch(lens));
        });
        self.apply_fieldlike_presentation(key, bound)
    }

    fn apply_fieldlike_presentation<C>(&self, key: FieldKey, mut component: C) -> FormResult<C>
    where
        C: FieldLike,
    {
        if let Some(description) = read_lock(
            &self.field_descriptions,
            "reading field description for binding",
        )?
        .get(&key)
        .cloned()
        {
            component = component.description(description);
        }

        if read_lock(&self.required_fields, "reading required fields for binding")?.contains(&key) {
            component = component.required(true);
        }

        if let Some(error) = self.display_error_message(key)? {
            component = component.error(error);
        }

        Ok(component)
    }

    fn display_error_message(&self, key: FieldKey) -> FormResult<Option<SharedString>> {
        let state = read_lock(&self.state, "reading display error message")?;
        let Some(meta) = state.field_meta.get(&key) else {
            return Ok(None);
        };
        if !meta.touched && state.submit_count == 0 {
            return Ok(None);
        }
        Ok(meta.errors.first().map(ValidationError::message))
    }
}
