/// Result of applying a single keystroke to a field's current value.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum EditOutcome {
    Edited(String),
    Submitted,
    Ignored,
}

/// Maps a keystroke onto a text value: printable characters append,
/// backspace removes the last character, enter submits. Navigation and
/// anything carrying a control character is ignored.
pub fn apply_keystroke(current: &str, key: &str, key_char: Option<&str>) -> EditOutcome {
    if key == "enter" {
        return EditOutcome::Submitted;
    }

    if key == "backspace" {
        if current.is_empty() {
            return EditOutcome::Ignored;
        }
        let mut chars = current.chars();
        chars.next_back();
        return EditOutcome::Edited(chars.as_str().to_string());
    }

    if key == "space" {
        return EditOutcome::Edited(format!("{current} "));
    }

    if let Some(inserted) = key_char
        && !inserted.is_empty()
        && !inserted.chars().any(char::is_control)
    {
        return EditOutcome::Edited(format!("{current}{inserted}"));
    }

    EditOutcome::Ignored
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_text(mut value: String, text: &str) -> String {
        for ch in text.chars() {
            let key = ch.to_string();
            match apply_keystroke(&value, &key, Some(&key)) {
                EditOutcome::Edited(next) => value = next,
                outcome => panic!("typing {ch:?} should edit, got {outcome:?}"),
            }
        }
        value
    }

    #[test]
    fn printable_characters_append() {
        assert_eq!(type_text(String::new(), "jess"), "jess");
        assert_eq!(type_text("jess".into(), "ica"), "jessica");
    }

    #[test]
    fn backspace_removes_last_character() {
        assert_eq!(
            apply_keystroke("jess", "backspace", None),
            EditOutcome::Edited("jes".into())
        );
        assert_eq!(apply_keystroke("", "backspace", None), EditOutcome::Ignored);
    }

    #[test]
    fn backspace_removes_whole_multibyte_character() {
        assert_eq!(
            apply_keystroke("naïve", "backspace", None),
            EditOutcome::Edited("naïv".into())
        );
        assert_eq!(
            apply_keystroke("naïv", "backspace", None),
            EditOutcome::Edited("naï".into())
        );
    }

    #[test]
    fn enter_submits_and_space_inserts() {
        assert_eq!(
            apply_keystroke("value", "enter", Some("\n")),
            EditOutcome::Submitted
        );
        assert_eq!(
            apply_keystroke("a", "space", Some(" ")),
            EditOutcome::Edited("a ".into())
        );
    }

    #[test]
    fn navigation_and_control_input_is_ignored() {
        assert_eq!(apply_keystroke("value", "left", None), EditOutcome::Ignored);
        assert_eq!(
            apply_keystroke("value", "tab", Some("\t")),
            EditOutcome::Ignored
        );
        assert_eq!(apply_keystroke("value", "escape", None), EditOutcome::Ignored);
    }
}
