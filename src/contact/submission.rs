use std::sync::{Arc, RwLock};

use gpui::SharedString;

use crate::form::{FormError, FormResult};

use super::model::ContactFormModel;

/// Snapshot of the form values at the moment of a successful submit. Only
/// [`store_submission`] creates one, and only from inside a submit that
/// passed validation.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Submission {
    pub first_name: SharedString,
    pub last_name: SharedString,
    pub email: SharedString,
    pub message: SharedString,
}

impl Submission {
    pub fn from_model(model: &ContactFormModel) -> Self {
        Self {
            first_name: model.first_name.clone(),
            last_name: model.last_name.clone(),
            email: model.email.clone(),
            message: model.message.clone(),
        }
    }

    pub fn has_message(&self) -> bool {
        !self.message.trim().is_empty()
    }

    /// Name/value pairs in render order. The message only appears when one
    /// was provided.
    pub fn display_fields(&self) -> Vec<(&'static str, SharedString)> {
        let mut fields = vec![
            ("firstName", self.first_name.clone()),
            ("lastName", self.last_name.clone()),
            ("email", self.email.clone()),
        ];
        if self.has_message() {
            fields.push(("message", self.message.clone()));
        }
        fields
    }
}

/// Shared slot holding the latest successful submission. The previous
/// submission stays visible until the next successful submit replaces it.
pub type SubmissionSlot = Arc<RwLock<Option<Submission>>>;

pub fn store_submission(slot: &SubmissionSlot, model: &ContactFormModel) -> FormResult<()> {
    let mut guard = slot
        .write()
        .map_err(|_| FormError::StatePoisoned("storing contact submission"))?;
    *guard = Some(Submission::from_model(model));
    Ok(())
}

pub fn latest_submission(slot: &SubmissionSlot) -> FormResult<Option<Submission>> {
    Ok(slot
        .read()
        .map_err(|_| FormError::StatePoisoned("reading contact submission"))?
        .clone())
}
