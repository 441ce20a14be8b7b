mod binding;
mod controller;
mod rules;
mod validation;

#[cfg(test)]
mod tests;

pub use contact_form_derive::FormModel;
pub use controller::{
    FieldKey, FieldMeta, FormController, FormError, FormOptions, FormResult, FormSnapshot,
    SubmitState, ValidationMode,
};
pub use rules::{RuleError, email, min_chars, required};
pub use validation::{FieldLens, FieldValidator, FormModel, FormValidator, ValidationError};
