use super::*;
use gpui::SharedString;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Clone, Debug, Eq, PartialEq)]
struct TestError(&'static str);

impl ValidationError for TestError {
    fn message(&self) -> SharedString {
        self.0.into()
    }
}

#[allow(dead_code)]
#[derive(Clone, contact_form_derive::FormModel)]
struct ProfileForm {
    #[form(name = "emailAddress")]
    email: SharedString,
    nickname: SharedString,
    subscribed: bool,
}

fn base_form() -> ProfileForm {
    ProfileForm {
        email: "user@example.com".into(),
        nickname: "edd".into(),
        subscribed: false,
    }
}

fn required_email(_model: &ProfileForm, value: &SharedString) -> Result<(), TestError> {
    if value.is_empty() {
        Err(TestError("required"))
    } else {
        Ok(())
    }
}

#[test]
fn field_lens_updates_model_and_dirty_state() {
    let controller =
        FormController::<ProfileForm, TestError>::new(base_form(), FormOptions::default());
    let fields = ProfileForm::fields();

    controller
        .set(fields.email(), "changed@example.com".into())
        .expect("set must succeed");
    let snapshot = controller.snapshot().expect("snapshot must succeed");
    assert!(snapshot.is_dirty);
    assert_eq!(snapshot.model.email, "changed@example.com");

    let email_meta = snapshot
        .field_meta
        .get(&fields.email().key())
        .expect("email meta should exist");
    assert!(email_meta.dirty);
}

#[test]
fn setting_the_initial_value_back_clears_dirty_state() {
    let controller =
        FormController::<ProfileForm, TestError>::new(base_form(), FormOptions::default());
    let fields = ProfileForm::fields();

    controller
        .set(fields.nickname(), "eddie".into())
        .expect("set new value");
    assert!(controller.snapshot().expect("snapshot").is_dirty);

    controller
        .set(fields.nickname(), "edd".into())
        .expect("restore initial value");
    assert!(!controller.snapshot().expect("snapshot").is_dirty);
}

#[test]
fn validation_mode_controls_when_errors_appear() {
    let fields = ProfileForm::fields();
    let on_change = FormController::<ProfileForm, TestError>::new(
        base_form(),
        FormOptions {
            validate_mode: ValidationMode::OnChange,
            ..FormOptions::default()
        },
    );
    on_change
        .register_field_validator(fields.email(), required_email)
        .expect("register validator");
    on_change
        .set(fields.email(), "".into())
        .expect("set should trigger validation");
    assert_eq!(
        on_change
            .snapshot()
            .expect("snapshot")
            .field_meta
            .get(&fields.email().key())
            .expect("field meta")
            .errors
            .len(),
        1
    );

    let on_submit = FormController::<ProfileForm, TestError>::new(
        base_form(),
        FormOptions {
            validate_mode: ValidationMode::OnSubmit,
            ..FormOptions::default()
        },
    );
    on_submit
        .register_field_validator(fields.email(), required_email)
        .expect("register validator");
    on_submit
        .set(fields.email(), "".into())
        .expect("set should not trigger validation immediately");
    assert!(
        on_submit
            .snapshot()
            .expect("snapshot")
            .field_meta
            .get(&fields.email().key())
            .is_some_and(|meta| meta.errors.is_empty())
    );
    assert!(!on_submit.validate_form().expect("validate form"));
}

#[test]
fn on_blur_mode_validates_when_a_field_is_touched() {
    let fields = ProfileForm::fields();
    let controller = FormController::<ProfileForm, TestError>::new(
        base_form(),
        FormOptions {
            validate_mode: ValidationMode::OnBlur,
            ..FormOptions::default()
        },
    );
    controller
        .register_field_validator(fields.email(), required_email)
        .expect("register validator");

    controller
        .set(fields.email(), "".into())
        .expect("set invalid value");
    assert!(
        controller
            .field_meta(fields.email())
            .expect("meta")
            .is_some_and(|meta| meta.errors.is_empty())
    );

    controller.touch(fields.email()).expect("touch field");
    assert_eq!(
        controller
            .field_meta(fields.email())
            .expect("meta")
            .expect("meta exists")
            .errors,
        vec![TestError("required")]
    );
}

#[test]
fn first_error_only_short_circuits_remaining_rules() {
    let fields = ProfileForm::fields();
    let controller = FormController::<ProfileForm, TestError>::new(
        base_form(),
        FormOptions {
            validate_mode: ValidationMode::OnChange,
            validate_first_error_only: true,
            ..FormOptions::default()
        },
    );
    controller
        .register_field_validator(
            fields.email(),
            |_model: &ProfileForm, _value: &SharedString| Err(TestError("first")),
        )
        .expect("register first validator");
    controller
        .register_field_validator(
            fields.email(),
            |_model: &ProfileForm, _value: &SharedString| Err(TestError("second")),
        )
        .expect("register second validator");

    controller
        .set(fields.email(), "anything".into())
        .expect("set value");
    assert_eq!(
        controller
            .field_meta(fields.email())
            .expect("meta")
            .expect("meta exists")
            .errors,
        vec![TestError("first")]
    );
}

#[test]
fn form_validator_errors_attach_to_their_field() {
    let fields = ProfileForm::fields();
    let controller =
        FormController::<ProfileForm, TestError>::new(base_form(), FormOptions::default());
    controller
        .register_form_validator(|model: &ProfileForm| {
            if model.subscribed && model.email.is_empty() {
                vec![(
                    ProfileForm::fields().email().key(),
                    TestError("email required to subscribe"),
                )]
            } else {
                Vec::new()
            }
        })
        .expect("register form validator");

    controller
        .set(fields.subscribed(), true)
        .expect("set subscribed");
    controller
        .set(fields.email(), "".into())
        .expect("clear email");
    assert!(!controller.validate_form().expect("validate form"));
    assert_eq!(
        controller
            .field_meta(fields.email())
            .expect("meta")
            .expect("meta exists")
            .errors,
        vec![TestError("email required to subscribe")]
    );
}

#[test]
fn submit_state_transitions_are_enforced() {
    let fields = ProfileForm::fields();
    let controller =
        FormController::<ProfileForm, TestError>::new(base_form(), FormOptions::default());
    controller
        .register_field_validator(fields.email(), required_email)
        .expect("register validator");

    let submit_count = Arc::new(AtomicUsize::new(0));

    controller
        .set(fields.email(), "".into())
        .expect("set invalid email");
    {
        let submit_count = submit_count.clone();
        controller
            .submit(move |_model| {
                submit_count.fetch_add(1, Ordering::SeqCst);
                Ok(())
            })
            .expect("submit should return Ok when validation fails");
    }
    assert_eq!(submit_count.load(Ordering::SeqCst), 0);
    assert_eq!(
        controller.snapshot().expect("snapshot").submit_state,
        SubmitState::Failed
    );

    controller
        .set(fields.email(), "valid@example.com".into())
        .expect("set valid email");
    {
        let submit_count = submit_count.clone();
        controller
            .submit(move |_model| {
                submit_count.fetch_add(1, Ordering::SeqCst);
                Ok(())
            })
            .expect("submit should succeed");
    }
    assert_eq!(submit_count.load(Ordering::SeqCst), 1);
    assert_eq!(
        controller.snapshot().expect("snapshot").submit_state,
        SubmitState::Succeeded
    );
}

#[test]
fn failed_submit_callback_moves_state_to_failed() {
    let controller =
        FormController::<ProfileForm, TestError>::new(base_form(), FormOptions::default());
    let result = controller.submit(|_model| Err(FormError::StatePoisoned("simulated")));
    assert!(result.is_err());
    assert_eq!(
        controller.snapshot().expect("snapshot").submit_state,
        SubmitState::Failed
    );
}

#[test]
fn error_visibility_requires_touch_or_submit() {
    let fields = ProfileForm::fields();
    let controller = FormController::<ProfileForm, TestError>::new(
        base_form(),
        FormOptions {
            validate_mode: ValidationMode::OnChange,
            ..FormOptions::default()
        },
    );
    controller
        .register_field_validator(fields.email(), required_email)
        .expect("register validator");

    controller
        .set(fields.email(), "".into())
        .expect("set invalid");
    assert_eq!(
        controller
            .field_error_for_display(fields.email())
            .expect("display error"),
        None
    );

    controller.touch(fields.email()).expect("touch field");
    assert_eq!(
        controller
            .field_error_for_display(fields.email())
            .expect("display error"),
        Some(SharedString::from("required"))
    );
}

#[test]
fn reset_to_initial_clears_meta_and_errors() {
    let fields = ProfileForm::fields();
    let controller = FormController::<ProfileForm, TestError>::new(
        base_form(),
        FormOptions {
            validate_mode: ValidationMode::OnChange,
            ..FormOptions::default()
        },
    );
    controller
        .register_field_validator(fields.email(), required_email)
        .expect("register validator");
    controller
        .set(fields.email(), "".into())
        .expect("set invalid value");
    controller.touch(fields.email()).expect("touch field");

    controller.reset_to_initial().expect("reset form");
    let snapshot = controller.snapshot().expect("snapshot");
    assert_eq!(snapshot.model.email, "user@example.com");
    assert!(!snapshot.is_dirty);
    assert!(snapshot.is_valid);
    assert_eq!(snapshot.submit_state, SubmitState::Idle);
    assert!(
        snapshot
            .field_meta
            .values()
            .all(|meta| !meta.touched && meta.errors.is_empty())
    );
}

#[test]
fn required_and_description_registry_roundtrip() {
    let fields = ProfileForm::fields();
    let controller =
        FormController::<ProfileForm, TestError>::new(base_form(), FormOptions::default());

    controller
        .register_required_field(fields.email())
        .expect("register required");
    controller
        .register_field_description(fields.email(), "Enter a valid email")
        .expect("register description");

    assert!(controller.is_required(fields.email()).expect("is required"));
    assert!(
        !controller
            .is_required(fields.nickname())
            .expect("is required")
    );
    assert_eq!(
        controller
            .field_description(fields.email())
            .expect("field description"),
        Some(SharedString::from("Enter a valid email"))
    );
}

#[test]
fn single_field_update_keeps_other_field_meta_stable() {
    let fields = ProfileForm::fields();
    let controller =
        FormController::<ProfileForm, TestError>::new(base_form(), FormOptions::default());

    controller
        .set(fields.nickname(), "edd".into())
        .expect("seed nickname meta");
    controller
        .set(fields.email(), "only-email-changed@example.com".into())
        .expect("update email only");

    let snapshot = controller.snapshot().expect("snapshot");
    assert!(
        snapshot
            .field_meta
            .get(&fields.email().key())
            .is_some_and(|meta| meta.dirty)
    );
    assert!(
        snapshot
            .field_meta
            .get(&fields.nickname().key())
            .is_some_and(|meta| !meta.dirty)
    );
}

#[test]
fn derive_macro_generates_field_lenses() {
    let fields = ProfileForm::fields();
    assert_eq!(fields.email().key().as_str(), "email");
    assert_eq!(fields.nickname().key().as_str(), "nickname");
    assert_eq!(fields.subscribed().key().as_str(), "subscribed");
}

#[test]
fn lens_display_names_default_to_the_identifier_unless_overridden() {
    let fields = ProfileForm::fields();
    assert_eq!(fields.email().name(), "emailAddress");
    assert_eq!(fields.nickname().name(), "nickname");
    assert_eq!(fields.subscribed().name(), "subscribed");
}
