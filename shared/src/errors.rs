//! Shared error types for the school directory data layer

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SharedError {
    #[error("Invalid record {id}: {reason}")]
    InvalidRecord { id: String, reason: String },

    #[error("Invalid criterion score '{label}': {percentage} is outside 0..=100")]
    InvalidCriterion { label: String, percentage: f64 },

    #[error("Unknown {kind}: {input}")]
    UnknownVariant { kind: &'static str, input: String },

    #[error("Invalid configuration: {field} = {value}")]
    InvalidConfig { field: String, value: String },

    #[error("Configuration file error: {message}")]
    ConfigFile { message: String },
}

impl SharedError {
    pub fn invalid_record(id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidRecord {
            id: id.into(),
            reason: reason.into(),
        }
    }

    pub fn unknown(kind: &'static str, input: &str) -> Self {
        Self::UnknownVariant {
            kind,
            input: input.to_string(),
        }
    }

    pub fn invalid_config(field: impl Into<String>, value: impl ToString) -> Self {
        Self::InvalidConfig {
            field: field.into(),
            value: value.to_string(),
        }
    }
}

pub type SharedResult<T> = Result<T, SharedError>;
