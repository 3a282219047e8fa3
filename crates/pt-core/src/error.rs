//! Core error types for Project Tracker

use std::collections::BTreeMap;
use thiserror::Error;

/// Core error type for all tracker operations
#[derive(Error, Debug)]
pub enum TrackerError {
    #[error("Not found: {entity} with {field}={value}")]
    NotFound {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    #[error("Unauthorized: {message}")]
    Unauthorized { message: String },

    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Conflict: {message}")]
    Conflict { message: String },

    #[error("Invalid transition: cannot {action} a report in state {state}")]
    InvalidTransition { action: &'static str, state: String },

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Standard Result type for tracker operations
pub type TrackerResult<T> = Result<T, TrackerError>;

impl TrackerError {
    pub fn not_found(entity: &'static str, field: &'static str, value: impl ToString) -> Self {
        TrackerError::NotFound {
            entity,
            field,
            value: value.to_string(),
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        TrackerError::Unauthorized {
            message: message.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        TrackerError::Conflict {
            message: message.into(),
        }
    }

    pub fn status_code(&self) -> u16 {
        match self {
            TrackerError::NotFound { .. } => 404,
            TrackerError::Unauthorized { .. } => 401,
            TrackerError::Validation(_) => 422,
            TrackerError::Conflict { .. } | TrackerError::InvalidTransition { .. } => 409,
            TrackerError::Storage(_) | TrackerError::Internal(_) => 500,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            TrackerError::NotFound { .. } => "not_found",
            TrackerError::Unauthorized { .. } => "unauthorized",
            TrackerError::Validation(_) => "validation_failed",
            TrackerError::Conflict { .. } => "conflict",
            TrackerError::InvalidTransition { .. } => "invalid_transition",
            TrackerError::Storage(_) => "storage_error",
            TrackerError::Internal(_) => "internal_error",
        }
    }
}

/// Validation errors collection, keyed by field name
#[derive(Error, Debug, Default, Clone, PartialEq)]
#[error("Validation errors: {errors:?}")]
pub struct ValidationErrors {
    /// Field-specific errors: field_name -> Vec<error_messages>
    pub errors: BTreeMap<String, Vec<String>>,
    /// Base errors not tied to a specific field
    pub base_errors: Vec<String>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors
            .entry(field.into())
            .or_default()
            .push(message.into());
    }

    pub fn add_base(&mut self, message: impl Into<String>) {
        self.base_errors.push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty() && self.base_errors.is_empty()
    }

    /// Check if there are errors for a specific field
    pub fn has_error(&self, field: &str) -> bool {
        self.errors.contains_key(field)
    }

    pub fn get(&self, field: &str) -> Option<&Vec<String>> {
        self.errors.get(field)
    }

    pub fn merge(&mut self, other: ValidationErrors) {
        for (field, messages) in other.errors {
            self.errors.entry(field).or_default().extend(messages);
        }
        self.base_errors.extend(other.base_errors);
    }

    pub fn full_messages(&self) -> Vec<String> {
        let mut messages = self.base_errors.clone();
        for (field, field_messages) in &self.errors {
            for msg in field_messages {
                messages.push(format!("{} {}", field, msg));
            }
        }
        messages
    }

    /// Turn an empty collection into `Ok(())`
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

/// Field rules declared with `#[derive(Validate)]` on DTOs land here
impl From<validator::ValidationErrors> for ValidationErrors {
    fn from(source: validator::ValidationErrors) -> Self {
        let mut errors = ValidationErrors::new();
        for (field, field_errors) in source.field_errors() {
            for error in field_errors {
                let message = match &error.message {
                    Some(message) => message.to_string(),
                    None => format!("is invalid ({})", error.code),
                };
                errors.add(field, message);
            }
        }
        errors
    }
}

impl From<validator::ValidationErrors> for TrackerError {
    fn from(source: validator::ValidationErrors) -> Self {
        TrackerError::Validation(source.into())
    }
}
