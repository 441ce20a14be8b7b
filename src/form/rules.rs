use email_address::EmailAddress;
use gpui::SharedString;

use super::validation::ValidationError;

/// A failed validation rule, carrying the message shown next to the field.
/// Messages are phrased `"<field> ..."` with the caller-supplied display
/// name, e.g. `"lastName is a required field"`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RuleError {
    message: SharedString,
}

impl RuleError {
    pub fn new(message: impl Into<SharedString>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl ValidationError for RuleError {
    fn message(&self) -> SharedString {
        self.message.clone()
    }
}

/// Rejects empty (or whitespace-only) values.
pub fn required<T>(field: &'static str) -> impl Fn(&T, &SharedString) -> Result<(), RuleError> {
    move |_model, value| {
        if value.trim().is_empty() {
            Err(RuleError::new(format!("{field} is a required field")))
        } else {
            Ok(())
        }
    }
}

/// Rejects values shorter than `min` characters. Empty values pass; pair
/// with [`required`] when the field is mandatory.
pub fn min_chars<T>(
    field: &'static str,
    min: usize,
) -> impl Fn(&T, &SharedString) -> Result<(), RuleError> {
    move |_model, value| {
        if !value.is_empty() && value.chars().count() < min {
            Err(RuleError::new(format!(
                "{field} must be at least {min} characters"
            )))
        } else {
            Ok(())
        }
    }
}

/// Rejects values that do not parse as an email address. Empty values pass;
/// pair with [`required`] when the field is mandatory.
pub fn email<T>(field: &'static str) -> impl Fn(&T, &SharedString) -> Result<(), RuleError> {
    move |_model, value| {
        if value.is_empty() || value.parse::<EmailAddress>().is_ok() {
            Ok(())
        } else {
            Err(RuleError::new(format!(
                "{field} must be a valid email address"
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check<R>(rule: R, value: &str) -> Result<(), RuleError>
    where
        R: Fn(&(), &SharedString) -> Result<(), RuleError>,
    {
        rule(&(), &SharedString::from(value.to_string()))
    }

    #[test]
    fn required_rejects_empty_and_whitespace() {
        let rule = required::<()>("firstName");
        assert_eq!(
            check(&rule, "").unwrap_err().message(),
            SharedString::from("firstName is a required field")
        );
        assert!(check(&rule, "   ").is_err());
        assert!(check(&rule, "Edd").is_ok());
    }

    #[test]
    fn min_chars_names_the_minimum() {
        let rule = min_chars::<()>("firstName", 5);
        assert_eq!(
            check(&rule, "jess").unwrap_err().message(),
            SharedString::from("firstName must be at least 5 characters")
        );
        assert!(check(&rule, "Jessica").is_ok());
        // Empty is required's concern, not the length rule's.
        assert!(check(&rule, "").is_ok());
    }

    #[test]
    fn email_rejects_malformed_addresses() {
        let rule = email::<()>("email");
        assert_eq!(
            check(&rule, "jesswill").unwrap_err().message(),
            SharedString::from("email must be a valid email address")
        );
        assert!(check(&rule, "jesswill@").is_err());
        assert!(check(&rule, "jesswillcode@gmail.com").is_ok());
        assert!(check(&rule, "bluebill1049@hotmail.com").is_ok());
        assert!(check(&rule, "").is_ok());
    }
}
