use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::ValidationError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Attendance {
    #[default]
    Yes,
    No,
}

impl Attendance {
    pub fn label(self) -> &'static str {
        match self {
            Attendance::Yes => "Yes",
            Attendance::No => "No",
        }
    }
}

/// RSVP form fields as typed by the guest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct RsvpForm {
    #[validate(length(min = 3, message = "name must be at least 3 characters"))]
    pub name: String,
    pub attendance: Attendance,
    #[serde(default)]
    pub note: String,
}

impl RsvpForm {
    pub fn validate_form(&self) -> Result<(), ValidationError> {
        self.validate()?;
        Ok(())
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    pub fn apply(&mut self, update: FormUpdate) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(attendance) = update.attendance {
            self.attendance = attendance;
        }
        if let Some(note) = update.note {
            self.note = note;
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Partial form edit; absent fields are left as they are.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct FormUpdate {
    pub name: Option<String>,
    pub attendance: Option<Attendance>,
    pub note: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(name: &str) -> RsvpForm {
        RsvpForm {
            name: name.to_string(),
            ..RsvpForm::default()
        }
    }

    #[test]
    fn test_defaults() {
        let form = RsvpForm::default();
        assert_eq!(form.name, "");
        assert_eq!(form.attendance, Attendance::Yes);
        assert_eq!(form.note, "");
        assert!(!form.is_valid());
    }

    #[test]
    fn test_name_min_length() {
        assert!(!form("").is_valid());
        assert!(!form("Al").is_valid());
        assert!(form("Ana").is_valid());
        assert!(form("Maria Clara").is_valid());
    }

    #[test]
    fn test_validation_error_names_the_field() {
        let err = form("Al").validate_form().unwrap_err();
        let ValidationError::Fields(errors) = err;
        assert!(errors.field_errors().contains_key("name"));
    }

    #[test]
    fn test_note_is_unconstrained() {
        let mut f = form("Ana");
        f.note = "x".repeat(10_000);
        assert!(f.is_valid());
        f.attendance = Attendance::No;
        assert!(f.is_valid());
    }

    #[test]
    fn test_apply_partial_update() {
        let mut f = form("Ana");
        f.apply(FormUpdate {
            attendance: Some(Attendance::No),
            ..FormUpdate::default()
        });
        assert_eq!(f.name, "Ana");
        assert_eq!(f.attendance, Attendance::No);

        f.reset();
        assert_eq!(f, RsvpForm::default());
    }

    #[test]
    fn test_attendance_wire_format() {
        let json = serde_json::to_string(&Attendance::No).unwrap();
        assert_eq!(json, "\"no\"");
        let parsed: RsvpForm =
            serde_json::from_str(r#"{"name":"Ana","attendance":"yes"}"#).unwrap();
        assert_eq!(parsed.note, "");
    }
}
