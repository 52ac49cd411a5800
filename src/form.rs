//! Form Drafts and Validation
//!
//! A record being added or edited lives as a `Draft` of string values keyed by
//! field. Drafts are checked against the record's field specs before any
//! request leaves the browser.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use thiserror::Error;

/// Client-side validation failure, shown as a toast. No request is sent.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    Required(&'static str),
    #[error("{0} must be a valid email address")]
    Email(&'static str),
    #[error("{0} must be a number")]
    Number(&'static str),
    #[error("{0} must be a date (YYYY-MM-DD)")]
    Date(&'static str),
    #[error("{field} must be one of: {allowed}")]
    Choice { field: &'static str, allowed: String },
    #[error("{0}")]
    Rule(String),
}

/// Input widget and format of a form field
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldKind {
    Text,
    Email,
    Password,
    Number,
    Date,
    TextArea,
    Checkbox,
    /// (value, label) pairs
    Select(&'static [(&'static str, &'static str)]),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSpec {
    pub key: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
}

impl FieldSpec {
    pub const fn required(key: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self { key, label, kind, required: true }
    }

    pub const fn optional(key: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self { key, label, kind, required: false }
    }
}

/// String form state of one record
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Draft(BTreeMap<String, String>);

impl Draft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a draft for a new record: every field empty, first choice preselected
    pub fn blank(fields: &[FieldSpec]) -> Self {
        let mut draft = Self::new();
        for field in fields {
            let initial = match field.kind {
                FieldKind::Select(options) => options.first().map(|(v, _)| v.to_string()).unwrap_or_default(),
                FieldKind::Checkbox => "false".to_string(),
                _ => String::new(),
            };
            draft.set(field.key, initial);
        }
        draft
    }

    pub fn with(mut self, key: &str, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        self.0.insert(key.to_string(), value.into());
    }

    /// Value exactly as typed, for binding back into inputs
    pub fn raw(&self, key: &str) -> &str {
        self.0.get(key).map(String::as_str).unwrap_or("")
    }

    /// Trimmed value, empty string when absent
    pub fn get(&self, key: &str) -> &str {
        self.0.get(key).map(|v| v.trim()).unwrap_or("")
    }

    pub fn text(&self, key: &str) -> String {
        self.get(key).to_string()
    }

    pub fn optional_text(&self, key: &str) -> Option<String> {
        let value = self.get(key);
        (!value.is_empty()).then(|| value.to_string())
    }

    pub fn number(&self, key: &str, label: &'static str) -> Result<f64, ValidationError> {
        self.get(key).parse::<f64>().ok().filter(|v| v.is_finite()).ok_or(ValidationError::Number(label))
    }

    pub fn optional_number(&self, key: &str, label: &'static str) -> Result<f64, ValidationError> {
        if self.get(key).is_empty() {
            return Ok(0.0);
        }
        self.number(key, label)
    }

    pub fn count(&self, key: &str, label: &'static str) -> Result<u32, ValidationError> {
        self.get(key).parse::<u32>().map_err(|_| ValidationError::Number(label))
    }

    pub fn date(&self, key: &str, label: &'static str) -> Result<NaiveDate, ValidationError> {
        parse_date(self.get(key)).ok_or(ValidationError::Date(label))
    }

    pub fn optional_date(&self, key: &str, label: &'static str) -> Result<Option<NaiveDate>, ValidationError> {
        if self.get(key).is_empty() {
            return Ok(None);
        }
        self.date(key, label).map(Some)
    }

    pub fn flag(&self, key: &str) -> bool {
        matches!(self.get(key), "true" | "on" | "yes" | "1")
    }
}

pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

pub fn format_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default()
}

fn looks_like_email(value: &str) -> bool {
    match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.') && !value.contains(char::is_whitespace)
        }
        None => false,
    }
}

/// Required-field and format checks, in field order. Stops at the first failure.
pub fn validate_draft(fields: &[FieldSpec], draft: &Draft) -> Result<(), ValidationError> {
    for field in fields {
        let value = draft.get(field.key);
        if value.is_empty() {
            if field.required && field.kind != FieldKind::Checkbox {
                return Err(ValidationError::Required(field.label));
            }
            continue;
        }
        match field.kind {
            FieldKind::Email if !looks_like_email(value) => return Err(ValidationError::Email(field.label)),
            FieldKind::Number if value.parse::<f64>().map(|v| !v.is_finite()).unwrap_or(true) => {
                return Err(ValidationError::Number(field.label));
            }
            FieldKind::Date if parse_date(value).is_none() => return Err(ValidationError::Date(field.label)),
            FieldKind::Select(options) if !options.iter().any(|(v, _)| *v == value) => {
                let allowed = options.iter().map(|(v, _)| *v).collect::<Vec<_>>().join(", ");
                return Err(ValidationError::Choice { field: field.label, allowed });
            }
            _ => {}
        }
    }
    Ok(())
}
