//! Field validation rules.
//!
//! Every function here is pure: the same value always yields the same result
//! and nothing outside the return value is touched.

use super::{Experience, Field, FormDraft};
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;

const NAME_REQUIRED: &str = "Please enter your name.";
const NAME_TOO_SHORT: &str = "Name must be at least 2 characters.";
const EMAIL_REQUIRED: &str = "Please enter your email.";
const EMAIL_INVALID: &str = "Please enter a valid email address.";
const EXPERIENCE_REQUIRED: &str = "Please select your years of frontend experience.";

/// Minimum trimmed length of a name, in characters.
pub const MIN_NAME_CHARS: usize = 2;

static EMAIL_SHAPE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").ok());

/// Result of checking one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldCheck {
    /// Whether the value passed.
    pub valid: bool,
    /// Error message; empty when valid.
    pub message: String,
}

impl FieldCheck {
    fn pass() -> Self {
        Self {
            valid: true,
            message: String::new(),
        }
    }

    fn fail(message: &str) -> Self {
        Self {
            valid: false,
            message: message.to_string(),
        }
    }
}

fn is_email_shaped(value: &str) -> bool {
    EMAIL_SHAPE.as_ref().is_some_and(|re| re.is_match(value))
}

/// Check a single field value.
#[must_use]
pub fn validate_field(field: Field, value: &str) -> FieldCheck {
    match field {
        Field::Name => {
            let trimmed = value.trim();
            if trimmed.is_empty() {
                FieldCheck::fail(NAME_REQUIRED)
            } else if trimmed.chars().count() < MIN_NAME_CHARS {
                FieldCheck::fail(NAME_TOO_SHORT)
            } else {
                FieldCheck::pass()
            }
        }
        Field::Email => {
            if value.trim().is_empty() {
                FieldCheck::fail(EMAIL_REQUIRED)
            } else if !is_email_shaped(value) {
                FieldCheck::fail(EMAIL_INVALID)
            } else {
                FieldCheck::pass()
            }
        }
        Field::Experience => {
            if Experience::from_label(value).is_some() {
                FieldCheck::pass()
            } else {
                FieldCheck::fail(EXPERIENCE_REQUIRED)
            }
        }
        Field::Message => FieldCheck::pass(),
    }
}

/// Check every field of a draft.
#[must_use]
pub fn validate_form(draft: &FormDraft) -> FormErrors {
    let mut errors = FormErrors::default();
    for field in Field::ALL {
        errors.record(field, &validate_field(field, draft.get(field)));
    }
    errors
}

/// Per-field error messages. A field without an entry is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors {
    messages: BTreeMap<Field, String>,
}

impl FormErrors {
    /// Store the outcome of a field check, clearing the entry when it passed.
    pub fn record(&mut self, field: Field, check: &FieldCheck) {
        if check.valid || check.message.is_empty() {
            self.messages.remove(&field);
        } else {
            self.messages.insert(field, check.message.clone());
        }
    }

    /// Error message for `field`, if it currently has one.
    #[must_use]
    pub fn get(&self, field: Field) -> Option<&str> {
        self.messages.get(&field).map(String::as_str)
    }

    /// Whether `field` currently has an error.
    #[must_use]
    pub fn has(&self, field: Field) -> bool {
        self.messages.contains_key(&field)
    }

    /// Whether no field has an error.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Number of fields with an error.
    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// First field, in form order, that has an error.
    #[must_use]
    pub fn first_field(&self) -> Option<Field> {
        self.messages.keys().next().copied()
    }

    /// Errors in form order.
    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.messages.iter().map(|(f, m)| (*f, m.as_str()))
    }

    /// Drop every error.
    pub fn clear(&mut self) {
        self.messages.clear();
    }

    /// Summary read out by the assertive live region, or `None` when valid.
    #[must_use]
    pub fn summary(&self) -> Option<String> {
        if self.is_empty() {
            return None;
        }
        let messages: Vec<&str> = self.messages.values().map(String::as_str).collect();
        Some(format!(
            "There are {} form validation errors: {}",
            messages.len(),
            messages.join(", ")
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use rstest::rstest;

    #[rstest]
    #[case(Field::Name, "", Some(NAME_REQUIRED))]
    #[case(Field::Name, "   ", Some(NAME_REQUIRED))]
    #[case(Field::Name, "A", Some(NAME_TOO_SHORT))]
    #[case(Field::Name, " A ", Some(NAME_TOO_SHORT))]
    #[case(Field::Name, "Al", None)]
    #[case(Field::Name, "김철", None)]
    #[case(Field::Email, "", Some(EMAIL_REQUIRED))]
    #[case(Field::Email, "x", Some(EMAIL_INVALID))]
    #[case(Field::Email, "jane@example", Some(EMAIL_INVALID))]
    #[case(Field::Email, "jane@@example.com", Some(EMAIL_INVALID))]
    #[case(Field::Email, "ja ne@example.com", Some(EMAIL_INVALID))]
    #[case(Field::Email, "jane@example.com", None)]
    #[case(Field::Email, "j@e.io", None)]
    #[case(Field::Experience, "", Some(EXPERIENCE_REQUIRED))]
    #[case(Field::Experience, "10 years", Some(EXPERIENCE_REQUIRED))]
    #[case(Field::Experience, "0-3 years", None)]
    #[case(Field::Experience, "4-7 years", None)]
    #[case(Field::Experience, "8+ years", None)]
    #[case(Field::Message, "", None)]
    #[case(Field::Message, "anything at all", None)]
    fn test_validate_field(
        #[case] field: Field,
        #[case] value: &str,
        #[case] expected: Option<&str>,
    ) {
        let check = validate_field(field, value);
        assert_eq!(check.valid, expected.is_none());
        assert_eq!(check.message, expected.unwrap_or_default());
    }

    #[test]
    fn test_validate_form_scenario_a() {
        let draft = FormDraft {
            name: "A".to_string(),
            email: "x".to_string(),
            experience: String::new(),
            message: String::new(),
        };
        let errors = validate_form(&draft);
        let entries: Vec<_> = errors.iter().collect();
        assert_eq!(
            entries,
            vec![
                (Field::Name, NAME_TOO_SHORT),
                (Field::Email, EMAIL_INVALID),
                (Field::Experience, EXPERIENCE_REQUIRED),
            ]
        );
        assert_eq!(errors.first_field(), Some(Field::Name));
    }

    #[test]
    fn test_record_clears_passing_field() {
        let mut errors = FormErrors::default();
        errors.record(Field::Email, &validate_field(Field::Email, "x"));
        assert!(errors.has(Field::Email));

        errors.record(Field::Email, &validate_field(Field::Email, "a@b.co"));
        assert!(!errors.has(Field::Email));
        assert!(errors.is_empty());
    }

    #[test]
    fn test_summary_lists_messages_in_form_order() {
        let mut errors = FormErrors::default();
        errors.record(Field::Experience, &validate_field(Field::Experience, ""));
        errors.record(Field::Name, &validate_field(Field::Name, ""));

        assert_eq!(
            errors.summary().as_deref(),
            Some(
                "There are 2 form validation errors: Please enter your name., \
                 Please select your years of frontend experience."
            )
        );
        assert_eq!(FormErrors::default().summary(), None);
    }

    fn experience_value() -> impl Strategy<Value = String> {
        prop_oneof![
            Just(String::new()),
            Just("0-3 years".to_string()),
            Just("4-7 years".to_string()),
            Just("8+ years".to_string()),
            any::<String>(),
        ]
    }

    proptest! {
        #[test]
        fn prop_validate_field_is_deterministic(value in any::<String>()) {
            for field in Field::ALL {
                prop_assert_eq!(validate_field(field, &value), validate_field(field, &value));
            }
        }

        #[test]
        fn prop_message_never_fails(value in any::<String>()) {
            prop_assert!(validate_field(Field::Message, &value).valid);
        }

        #[test]
        fn prop_form_valid_iff_rules_hold(
            name in any::<String>(),
            local in "[a-z0-9.]{0,6}",
            domain in "[a-z]{0,6}",
            tld in "[a-z]{0,3}",
            experience in experience_value(),
            message in any::<String>(),
        ) {
            let email = format!("{local}@{domain}.{tld}");
            let draft = FormDraft {
                name: name.clone(),
                email: email.clone(),
                experience: experience.clone(),
                message,
            };
            let name_ok = name.trim().chars().count() >= MIN_NAME_CHARS;
            let email_ok = !local.is_empty() && !domain.is_empty() && !tld.is_empty();
            let experience_ok = Experience::from_label(&experience).is_some();

            prop_assert_eq!(
                validate_form(&draft).is_empty(),
                name_ok && email_ok && experience_ok
            );
        }
    }
}
