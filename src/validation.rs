//! Form sanitization and validation
//!
//! Every form goes through the same pipeline on create and update:
//! trim, validate (`validator` derive rules), then escape markup so the
//! stored values are safe to place into rendered HTML.

use std::borrow::Cow;

use chrono::NaiveDate;
use mongodb::bson::oid::ObjectId;
use validator::{Validate, ValidationError, ValidationErrors};

/// Date format accepted from `<input type="date">`
pub const FORM_DATE_FORMAT: &str = "%Y-%m-%d";

/// A single user-facing validation message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// A form whose fields can be run through the sanitize pipeline
pub trait FormInput: Validate {
    /// Field names in display order, used to order error messages
    const FIELDS: &'static [&'static str];

    /// Trim surrounding whitespace from every field
    fn trim(&mut self);

    /// Escape markup-significant characters in every field
    fn escape(&mut self);
}

/// Input that failed validation, kept so the form can be shown again
#[derive(Debug)]
pub struct Rejected<T> {
    pub input: T,
    pub errors: Vec<FieldError>,
}

/// Run a form through trim, validate and escape.
///
/// The sanitized input is returned in both cases so a failed form can be
/// re-rendered with what the user typed.
pub fn check<T: FormInput>(mut input: T) -> Result<T, Rejected<T>> {
    input.trim();
    let outcome = input.validate();
    input.escape();

    match outcome {
        Ok(()) => Ok(input),
        Err(errors) => Err(Rejected {
            errors: field_errors(&errors, T::FIELDS),
            input,
        }),
    }
}

/// Flatten `ValidationErrors` into messages ordered by form field
fn field_errors(errors: &ValidationErrors, order: &[&str]) -> Vec<FieldError> {
    let mut collected: Vec<(usize, FieldError)> = Vec::new();

    for (field, list) in errors.field_errors() {
        let name = field.to_string();
        let position = order.iter().position(|f| *f == name).unwrap_or(order.len());
        for error in list.iter() {
            let message = error
                .message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| format!("Invalid value for {}", name));
            collected.push((
                position,
                FieldError {
                    field: name.clone(),
                    message,
                },
            ));
        }
    }

    // stable: messages of one field keep the order the rules declared them
    collected.sort_by_key(|(position, _)| *position);
    collected.into_iter().map(|(_, error)| error).collect()
}

/// Escape HTML-significant characters the same way for every stored field
pub fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '/' => out.push_str("&#x2F;"),
            '\\' => out.push_str("&#x5C;"),
            '`' => out.push_str("&#96;"),
            c => out.push(c),
        }
    }
    out
}

pub fn trim_in_place(value: &mut String) {
    let trimmed = value.trim();
    if trimmed.len() != value.len() {
        *value = trimmed.to_string();
    }
}

/// Trim an optional field, dropping it when nothing is left
pub fn trim_optional(value: &mut Option<String>) {
    if let Some(inner) = value.as_mut() {
        trim_in_place(inner);
        if inner.is_empty() {
            *value = None;
        }
    }
}

pub fn escape_in_place(value: &mut String) {
    *value = escape(value);
}

pub fn escape_optional(value: &mut Option<String>) {
    if let Some(inner) = value.as_mut() {
        escape_in_place(inner);
    }
}

pub fn error(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Borrowed(message));
    error
}

pub fn parse_form_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, FORM_DATE_FORMAT).ok()
}

pub fn is_object_id(value: &str) -> bool {
    ObjectId::parse_str(value).is_ok()
}
