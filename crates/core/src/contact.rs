//! Contact-form field validation.
//!
//! Per-field checks for the public contact endpoint. Each failing field
//! is reported with its name so the API layer can build the per-field
//! `errors` payload.

use validator::ValidateEmail;

/// Maximum lengths matching the column definitions.
const MAX_NAME_LEN: usize = 100;
const MAX_PHONE_LEN: usize = 20;
const MAX_SUBJECT_LEN: usize = 200;

/// A single field validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// Validate the incoming contact-form fields.
///
/// Returns every failing field rather than stopping at the first, so
/// the caller can surface them all at once.
pub fn validate_contact(
    first_name: &str,
    last_name: &str,
    email: &str,
    phone: &str,
    subject: &str,
    message: &str,
) -> Vec<FieldError> {
    let mut errors = Vec::new();

    require_non_empty(&mut errors, "first_name", first_name, MAX_NAME_LEN);
    require_non_empty(&mut errors, "last_name", last_name, MAX_NAME_LEN);

    if !email.validate_email() {
        errors.push(FieldError {
            field: "email",
            message: "Enter a valid email address.".into(),
        });
    }

    if phone.len() > MAX_PHONE_LEN {
        errors.push(FieldError {
            field: "phone",
            message: format!("Must be at most {MAX_PHONE_LEN} characters."),
        });
    }

    if subject.len() > MAX_SUBJECT_LEN {
        errors.push(FieldError {
            field: "subject",
            message: format!("Must be at most {MAX_SUBJECT_LEN} characters."),
        });
    }

    if message.trim().is_empty() {
        errors.push(FieldError {
            field: "message",
            message: "This field may not be blank.".into(),
        });
    }

    errors
}

fn require_non_empty(
    errors: &mut Vec<FieldError>,
    field: &'static str,
    value: &str,
    max_len: usize,
) {
    if value.trim().is_empty() {
        errors.push(FieldError {
            field,
            message: "This field may not be blank.".into(),
        });
    } else if value.len() > max_len {
        errors.push(FieldError {
            field,
            message: format!("Must be at most {max_len} characters."),
        });
    }
}
