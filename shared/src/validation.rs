//! Client-side checks run before any request leaves the panel.
//!
//! Two rules apply, in order, to every field of a form: presence, then (for
//! the email field only) format. The format rule runs second so its message
//! wins when both would apply to the same field.

use std::sync::OnceLock;

use regex::Regex;

use crate::model::{Field, FieldErrors};

pub const INVALID_EMAIL_MESSAGE: &str = "Invalid email format.";

static EMAIL_PATTERN: OnceLock<Regex> = OnceLock::new();

fn email_pattern() -> &'static Regex {
    EMAIL_PATTERN.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is a valid regex")
    })
}

pub fn is_valid_email(value: &str) -> bool {
    email_pattern().is_match(value)
}

pub fn required_message(field: Field) -> String {
    format!("{} is required.", field.display_name())
}

/// Checks every `(field, value)` pair and returns the errors found.
///
/// An empty result means the form may be submitted.
pub fn validate<'a, I>(fields: I) -> FieldErrors
where
    I: IntoIterator<Item = (Field, &'a str)>,
{
    let mut errors = FieldErrors::new();

    for (field, value) in fields {
        if value.is_empty() {
            errors.insert(field, required_message(field));
        }
        if field == Field::Email && !value.is_empty() && !is_valid_email(value) {
            errors.insert(field, INVALID_EMAIL_MESSAGE.to_string());
        }
    }

    errors
}
