//! The application form: its data model, validation, and the form surface.

pub mod input;
pub mod layout;
pub mod surface;
pub mod validate;

pub use surface::{AcceptSubmission, FormEvent, FormModal, SubmitHandler, SubmitWork};
pub use validate::{FieldCheck, FormErrors, validate_field, validate_form};

use crate::screen::ElementId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the four form fields, in form order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    /// Name or nickname.
    Name,
    /// Contact email.
    Email,
    /// Years of frontend experience.
    Experience,
    /// Optional GitHub link.
    Message,
}

impl Field {
    /// All fields in form order.
    pub const ALL: [Self; 4] = [Self::Name, Self::Email, Self::Experience, Self::Message];

    /// Field name, also used as the id of its input element.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Experience => "experience",
            Self::Message => "message",
        }
    }

    /// Visible label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Name => "Name / nickname *",
            Self::Email => "Email *",
            Self::Experience => "Frontend experience *",
            Self::Message => "GitHub link (optional)",
        }
    }

    /// Whether the field must be filled in.
    #[must_use]
    pub const fn is_required(self) -> bool {
        !matches!(self, Self::Message)
    }

    /// Id of the field's input element.
    #[must_use]
    pub const fn element_id(self) -> ElementId {
        ElementId::from_static(self.name())
    }

    /// The field whose input element is `id`.
    #[must_use]
    pub fn from_element(id: &ElementId) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.name() == id.as_str())
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Years of frontend experience.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Experience {
    /// Up to three years.
    #[serde(rename = "0-3 years")]
    UpToThree,
    /// Four to seven years.
    #[serde(rename = "4-7 years")]
    FourToSeven,
    /// Eight years or more.
    #[serde(rename = "8+ years")]
    EightPlus,
}

impl Experience {
    /// All brackets in display order.
    pub const ALL: [Self; 3] = [Self::UpToThree, Self::FourToSeven, Self::EightPlus];

    /// Label used both for display and as the submitted value.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::UpToThree => "0-3 years",
            Self::FourToSeven => "4-7 years",
            Self::EightPlus => "8+ years",
        }
    }

    /// Parse a bracket from its label.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|e| e.label() == label)
    }
}

impl fmt::Display for Experience {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Validated data collected by the form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormData {
    /// Name or nickname.
    pub name: String,
    /// Contact email.
    pub email: String,
    /// Experience bracket.
    pub experience: Experience,
    /// Optional GitHub link; empty when not given.
    pub message: String,
}

/// Raw, possibly invalid form values as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormDraft {
    /// Name or nickname.
    pub name: String,
    /// Contact email.
    pub email: String,
    /// Experience label, empty until one is chosen.
    pub experience: String,
    /// Optional GitHub link.
    pub message: String,
}

impl FormDraft {
    /// Value of one field.
    #[must_use]
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Experience => &self.experience,
            Field::Message => &self.message,
        }
    }

    /// Replace the value of one field.
    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let value = value.into();
        match field {
            Field::Name => self.name = value,
            Field::Email => self.email = value,
            Field::Experience => self.experience = value,
            Field::Message => self.message = value,
        }
    }

    /// Whether every field is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        Field::ALL.into_iter().all(|f| self.get(f).is_empty())
    }

    /// Turn the draft into [`FormData`].
    ///
    /// # Errors
    ///
    /// Returns the validation errors if any field fails its rule.
    pub fn to_data(&self) -> Result<FormData, FormErrors> {
        let errors = validate_form(self);
        if !errors.is_empty() {
            return Err(errors);
        }
        let experience = Experience::from_label(&self.experience).ok_or(errors)?;
        Ok(FormData {
            name: self.name.clone(),
            email: self.email.clone(),
            experience,
            message: self.message.clone(),
        })
    }
}

impl From<&FormData> for FormDraft {
    fn from(data: &FormData) -> Self {
        Self {
            name: data.name.clone(),
            email: data.email.clone(),
            experience: data.experience.label().to_string(),
            message: data.message.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_field_element_round_trip() {
        for field in Field::ALL {
            assert_eq!(Field::from_element(&field.element_id()), Some(field));
        }
        assert_eq!(Field::from_element(&ElementId::from_static("submit")), None);
    }

    #[test]
    fn test_only_message_is_optional() {
        let optional: Vec<_> = Field::ALL.into_iter().filter(|f| !f.is_required()).collect();
        assert_eq!(optional, vec![Field::Message]);
    }

    #[test]
    fn test_experience_labels() {
        assert_eq!(Experience::from_label("0-3 years"), Some(Experience::UpToThree));
        assert_eq!(Experience::from_label("4-7 years"), Some(Experience::FourToSeven));
        assert_eq!(Experience::from_label("8+ years"), Some(Experience::EightPlus));
        assert_eq!(Experience::from_label("8 years"), None);
        assert_eq!(Experience::from_label(""), None);
    }

    #[test]
    fn test_form_data_json_shape() -> Result<(), Box<dyn std::error::Error>> {
        let data = FormData {
            name: "Jane Doe".to_string(),
            email: "jane@example.com".to_string(),
            experience: Experience::UpToThree,
            message: String::new(),
        };
        let json = serde_json::to_value(&data)?;
        assert_eq!(
            json,
            serde_json::json!({
                "name": "Jane Doe",
                "email": "jane@example.com",
                "experience": "0-3 years",
                "message": "",
            })
        );
        Ok(())
    }

    #[test]
    fn test_draft_to_data() -> Result<(), Box<dyn std::error::Error>> {
        let draft = FormDraft {
            name: "Jane Doe".to_string(),
            email: "jane@example.com".to_string(),
            experience: "4-7 years".to_string(),
            message: "https://github.com/jane".to_string(),
        };
        let data = draft.to_data().map_err(|e| format!("unexpected errors: {e:?}"))?;
        assert_eq!(data.experience, Experience::FourToSeven);
        assert_eq!(FormDraft::from(&data), draft);
        Ok(())
    }

    #[test]
    fn test_invalid_draft_reports_errors() -> Result<(), Box<dyn std::error::Error>> {
        let draft = FormDraft {
            name: "A".to_string(),
            ..FormDraft::default()
        };
        match draft.to_data() {
            Ok(_) => Err("a one-letter name must not validate".into()),
            Err(errors) => {
                assert_eq!(errors.len(), 3);
                Ok(())
            }
        }
    }
}
