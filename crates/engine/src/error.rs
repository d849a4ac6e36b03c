//! The module contains the errors the engine can throw.
//!
//! - [`Validation`] when a request is malformed or out of range. It carries a
//!   field-level message map and is always recoverable.
//! - [`InvalidAmount`] when a money value cannot be parsed or converted.
//! - [`InvalidData`] when a stored row violates the data model.
//! - [`Database`] for store failures, propagated unmodified.
//!
//!  [`Validation`]: EngineError::Validation
//!  [`InvalidAmount`]: EngineError::InvalidAmount
//!  [`InvalidData`]: EngineError::InvalidData
//!  [`Database`]: EngineError::Database
use std::{collections::BTreeMap, fmt};

use sea_orm::DbErr;
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Invalid request data: {0}")]
    Validation(ValidationErrors),
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Invalid data: {0}")]
    InvalidData(String),
    #[error(transparent)]
    Database(#[from] DbErr),
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Validation(a), Self::Validation(b)) => a == b,
            (Self::InvalidAmount(a), Self::InvalidAmount(b)) => a == b,
            (Self::InvalidData(a), Self::InvalidData(b)) => a == b,
            (Self::Database(a), Self::Database(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}

impl From<ValidationErrors> for EngineError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value)
    }
}

/// Field name -> message, ordered by field name.
///
/// Only the first message recorded for a field is kept.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ValidationErrors(BTreeMap<String, String>);

impl ValidationErrors {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_insert_with(|| message.into());
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    #[must_use]
    pub fn fields(&self) -> &BTreeMap<String, String> {
        &self.0
    }

    #[must_use]
    pub fn into_fields(self) -> BTreeMap<String, String> {
        self.0
    }

    /// `Ok(())` when nothing was recorded.
    pub fn into_result(self) -> Result<(), EngineError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(EngineError::Validation(self))
        }
    }

    /// Records the error of `result` under `field`, returning the value on
    /// success.
    pub(crate) fn capture<T>(&mut self, field: &str, result: Result<T, String>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(message) => {
                self.add(field, message);
                None
            }
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in &self.0 {
            if !first {
                f.write_str(", ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}
