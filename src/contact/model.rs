use gpui::SharedString;

use crate::form::{
    self, FieldLens, FormController, FormModel, FormOptions, FormResult, RuleError, ValidationMode,
};

pub const FIRST_NAME_MIN_CHARS: usize = 5;

/// The four values the contact form collects. `message` is optional and
/// defaults to empty. Display names follow the camelCase labels the
/// validation messages use.
#[derive(Clone, Debug, Default, form::FormModel)]
pub struct ContactFormModel {
    #[form(name = "firstName")]
    pub first_name: SharedString,
    #[form(name = "lastName")]
    pub last_name: SharedString,
    pub email: SharedString,
    pub message: SharedString,
}

/// Builds the controller for a fresh contact form: validation on every
/// change, one displayed error per field, focus restored to the first
/// invalid field on a rejected submit.
pub fn contact_form_controller() -> FormResult<FormController<ContactFormModel, RuleError>> {
    let controller = FormController::new(
        ContactFormModel::default(),
        FormOptions {
            validate_mode: ValidationMode::OnChange,
            validate_first_error_only: true,
            ..FormOptions::default()
        },
    );
    let fields = ContactFormModel::fields();
    let first_name = fields.first_name();
    let last_name = fields.last_name();
    let email = fields.email();

    controller.register_required_field(first_name)?;
    controller.register_required_field(last_name)?;
    controller.register_required_field(email)?;

    controller.register_field_validator(first_name, form::required(first_name.name()))?;
    controller.register_field_validator(
        first_name,
        form::min_chars(first_name.name(), FIRST_NAME_MIN_CHARS),
    )?;
    controller.register_field_validator(last_name, form::required(last_name.name()))?;
    controller.register_field_validator(email, form::required(email.name()))?;
    controller.register_field_validator(email, form::email(email.name()))?;

    controller.register_field_description(fields.message(), "Optional")?;

    Ok(controller)
}
