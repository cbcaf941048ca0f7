//! Form drafts and their synchronous validators.
//!
//! Every form is a plain record of the raw strings the UI collected. Its
//! `validate` method either yields the typed record the submit handler needs,
//! or a [`ValidationErrors`] with at most one message per offending field.

mod auth;
mod booking;
mod profile;
mod report;

pub use auth::*;
pub use booking::*;
pub use profile::*;
pub use report::*;

use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

/// Kind of a field-level validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldErrorKind {
    Required,
    InvalidEmail,
    NotANumber,
    TooShort { min: usize },
    Mismatch,
    UnknownOption,
    InvalidDate,
    InvalidCode,
}

/// A message attached to one form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Form field name as the UI knows it (e.g. "ownerName")
    pub field: &'static str,
    pub kind: FieldErrorKind,
    /// Inline message shown next to the field
    pub message: String,
}

/// All field errors of one submit attempt.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Single-field error.
    pub fn single(field: &'static str, kind: FieldErrorKind, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.push(field, kind, message);
        errors
    }

    /// Record an error. A field keeps only its latest message.
    pub fn push(&mut self, field: &'static str, kind: FieldErrorKind, message: impl Into<String>) {
        self.errors.retain(|e| e.field != field);
        self.errors.push(FieldError {
            field,
            kind,
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Error for a field, if any.
    pub fn get(&self, field: &str) -> Option<&FieldError> {
        self.errors.iter().find(|e| e.field == field)
    }

    /// Names of the offending fields, in form order.
    pub fn fields(&self) -> Vec<&'static str> {
        self.errors.iter().map(|e| e.field).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.iter()
    }

    /// `Ok(())` when nothing was recorded.
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<String> = self
            .errors
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect();
        write!(f, "validation failed ({})", messages.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

impl IntoIterator for ValidationErrors {
    type Item = FieldError;
    type IntoIter = std::vec::IntoIter<FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

/// Email shape accepted by the report form.
pub fn is_valid_email(value: &str) -> bool {
    EMAIL_RE.is_match(value)
}

/// Parse a numeric field the way a browser number input does: surrounding
/// whitespace is ignored, and only finite values count.
pub fn parse_number(value: &str) -> Option<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
}

/// Accumulates field errors while a form is checked top to bottom.
pub(crate) struct Checker {
    errors: ValidationErrors,
}

impl Checker {
    pub(crate) fn new() -> Self {
        Self {
            errors: ValidationErrors::new(),
        }
    }

    /// Require a non-blank value; returns it untouched.
    pub(crate) fn required(&mut self, field: &'static str, value: &str, message: &str) -> String {
        if value.trim().is_empty() {
            self.errors.push(field, FieldErrorKind::Required, message);
        }
        value.to_string()
    }

    /// Require a value that parses through `parse`.
    pub(crate) fn choice<T>(
        &mut self,
        field: &'static str,
        value: &str,
        parse: impl Fn(&str) -> Option<T>,
        message: &str,
    ) -> Option<T> {
        if value.trim().is_empty() {
            self.errors.push(field, FieldErrorKind::Required, message);
            return None;
        }
        let parsed = parse(value);
        if parsed.is_none() {
            self.errors.push(field, FieldErrorKind::UnknownOption, message);
        }
        parsed
    }

    /// Require a finite number.
    pub(crate) fn number(
        &mut self,
        field: &'static str,
        value: &str,
        required_message: &str,
        nan_message: &str,
    ) -> f64 {
        if value.trim().is_empty() {
            self.errors.push(field, FieldErrorKind::Required, required_message);
            return 0.0;
        }
        match parse_number(value) {
            Some(n) => n,
            None => {
                self.errors.push(field, FieldErrorKind::NotANumber, nan_message);
                0.0
            }
        }
    }

    /// Require an address matching [`is_valid_email`].
    pub(crate) fn email(
        &mut self,
        field: &'static str,
        value: &str,
        required_message: &str,
        invalid_message: &str,
    ) -> String {
        if value.trim().is_empty() {
            self.errors.push(field, FieldErrorKind::Required, required_message);
        } else if !is_valid_email(value) {
            self.errors.push(field, FieldErrorKind::InvalidEmail, invalid_message);
        }
        value.to_string()
    }

    pub(crate) fn fail(&mut self, field: &'static str, kind: FieldErrorKind, message: &str) {
        self.errors.push(field, kind, message);
    }

    pub(crate) fn into_errors(self) -> ValidationErrors {
        self.errors
    }
}
