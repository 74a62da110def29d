//! Form payloads for the comment and share forms.
//!
//! Every field defaults to an empty string so that a missing field is reported
//! as a validation error on the redisplayed form rather than rejected by the
//! extractor.

use serde::Deserialize;
use std::collections::HashMap;
use validator::{Validate, ValidationErrors};

use crate::application::services::{CommentInput, ShareRequest};

/// Comment form on the post detail page.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct CommentForm {
    #[validate(length(min = 1, max = 80, message = "Name must be 1-80 characters"))]
    pub name: String,

    #[validate(
        email(message = "Enter a valid email address"),
        length(max = 254, message = "Ensure this value has at most 254 characters")
    )]
    pub email: String,

    #[validate(length(min = 1, message = "This field is required"))]
    pub body: String,
}

impl CommentForm {
    /// Copy of the form with surrounding whitespace removed from every field.
    pub fn trimmed(&self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            body: self.body.trim().to_string(),
        }
    }
}

impl From<CommentForm> for CommentInput {
    fn from(form: CommentForm) -> Self {
        CommentInput {
            name: form.name,
            email: form.email,
            body: form.body,
        }
    }
}

/// "Share this post" form.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct ShareForm {
    #[validate(length(min = 1, max = 25, message = "Name must be 1-25 characters"))]
    pub name: String,

    #[validate(
        email(message = "Enter a valid email address"),
        length(max = 254, message = "Ensure this value has at most 254 characters")
    )]
    pub email: String,

    #[validate(
        email(message = "Enter a valid email address"),
        length(max = 254, message = "Ensure this value has at most 254 characters")
    )]
    pub to: String,

    /// Optional personal note.
    pub comments: String,
}

impl ShareForm {
    /// Copy of the form with surrounding whitespace removed from every field.
    pub fn trimmed(&self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            to: self.to.trim().to_string(),
            comments: self.comments.trim().to_string(),
        }
    }
}

impl From<ShareForm> for ShareRequest {
    fn from(form: ShareForm) -> Self {
        ShareRequest {
            name: form.name,
            email: form.email,
            to: form.to,
            comments: form.comments,
        }
    }
}

/// Field-level error messages shown next to form inputs.
#[derive(Debug, Clone, Default)]
pub struct FormErrors {
    fields: HashMap<String, Vec<String>>,
}

impl FormErrors {
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Messages for one field, empty if the field is valid.
    pub fn field(&self, name: &str) -> &[String] {
        self.fields.get(name).map(Vec::as_slice).unwrap_or(&[])
    }
}

impl From<ValidationErrors> for FormErrors {
    fn from(errors: ValidationErrors) -> Self {
        let fields = errors
            .field_errors()
            .into_iter()
            .map(|(field, errs)| {
                let messages = errs
                    .iter()
                    .map(|e| {
                        e.message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| format!("Invalid value ({})", e.code))
                    })
                    .collect();
                (field.to_string(), messages)
            })
            .collect();

        Self { fields }
    }
}

/// Trims and validates a form, returning the cleaned form or its errors.
pub fn clean<F, T>(form: &F, trim: T) -> Result<F, FormErrors>
where
    F: Validate,
    T: Fn(&F) -> F,
{
    let cleaned = trim(form);
    cleaned.validate().map_err(FormErrors::from)?;
    Ok(cleaned)
}
