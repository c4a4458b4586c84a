//! Form fields and their per-field state.

use std::fmt;

use crate::domain::validation::{FieldError, validate_email, validate_message, validate_name};

/// One of the three inputs of the contact form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Email,
    Message,
}

impl Field {
    /// All fields in display order.
    pub const ALL: [Field; 3] = [Field::Name, Field::Email, Field::Message];

    pub fn label(self) -> &'static str {
        match self {
            Field::Name => "Name",
            Field::Email => "Email",
            Field::Message => "Message",
        }
    }

    /// Runs the shared validator for this field.
    pub fn validate(self, value: &str) -> Result<(), FieldError> {
        match self {
            Field::Name => validate_name(value),
            Field::Email => validate_email(value),
            Field::Message => validate_message(value),
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Value, touched flag and visible error of one input.
///
/// The error is only shown once the field has been touched, so a pristine
/// form never starts out red.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldState {
    value: String,
    touched: bool,
    error: Option<FieldError>,
}

impl FieldState {
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn is_touched(&self) -> bool {
        self.touched
    }

    pub fn error(&self) -> Option<&FieldError> {
        self.error.as_ref()
    }

    pub(crate) fn set_value(&mut self, field: Field, value: String) {
        self.value = value;
        if self.touched {
            self.revalidate(field);
        }
    }

    pub(crate) fn touch(&mut self, field: Field) -> bool {
        self.touched = true;
        self.revalidate(field)
    }

    pub(crate) fn clear(&mut self) {
        *self = Self::default();
    }

    fn revalidate(&mut self, field: Field) -> bool {
        self.error = field.validate(&self.value).err();
        self.error.is_none()
    }
}
