//! Directory-specific error types

use serde::{Deserialize, Serialize};
use shared::{SectionKey, SharedError};
use std::fmt;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DirectoryError {
    #[error("Failed to load data: {message}")]
    LoadFailed { message: String },

    #[error("Rating submission failed: {message}")]
    SubmissionFailed { message: String },

    #[error("Provider call timed out after {}ms", timeout.as_millis())]
    Timeout { timeout: Duration },

    #[error("Section {section} has no registered provider call")]
    UnknownSection { section: SectionKey },

    #[error("Invalid rating: {reason}")]
    InvalidRating { reason: String },

    #[error("Shared component error: {0}")]
    Shared(#[from] SharedError),
}

impl DirectoryError {
    pub fn load(message: impl Into<String>) -> Self {
        Self::LoadFailed { message: message.into() }
    }

    pub fn submission(message: impl Into<String>) -> Self {
        Self::SubmissionFailed { message: message.into() }
    }

    pub fn invalid_rating(reason: impl Into<String>) -> Self {
        Self::InvalidRating { reason: reason.into() }
    }

    /// Coarse failure category shown to the section that observed the error
    pub fn kind(&self) -> FailureKind {
        match self {
            DirectoryError::Timeout { .. } => FailureKind::Timeout,
            DirectoryError::SubmissionFailed { .. } | DirectoryError::InvalidRating { .. } => FailureKind::Submission,
            _ => FailureKind::Load,
        }
    }
}

pub type DirectoryResult<T> = Result<T, DirectoryError>;

/// Failure categories a section can surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    Load,
    Submission,
    Timeout,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::Load => write!(f, "load"),
            FailureKind::Submission => write!(f, "submission"),
            FailureKind::Timeout => write!(f, "timeout"),
        }
    }
}

/// Human-readable error held in a section slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionError {
    pub kind: FailureKind,
    pub message: String,
}

impl SectionError {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn load(message: impl Into<String>) -> Self {
        Self::new(FailureKind::Load, message)
    }

    /// Whether the section should offer a retry affordance
    pub fn retriable(&self) -> bool {
        !matches!(self.kind, FailureKind::Submission)
    }
}

impl fmt::Display for SectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl From<&str> for SectionError {
    fn from(message: &str) -> Self {
        SectionError::load(message)
    }
}

impl From<&DirectoryError> for SectionError {
    fn from(error: &DirectoryError) -> Self {
        SectionError::new(error.kind(), error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_mapping() {
        assert_eq!(DirectoryError::load("boom").kind(), FailureKind::Load);
        assert_eq!(DirectoryError::submission("nope").kind(), FailureKind::Submission);
        let timeout = DirectoryError::Timeout {
            timeout: Duration::from_millis(250),
        };
        assert_eq!(timeout.kind(), FailureKind::Timeout);
        assert_eq!(timeout.to_string(), "Provider call timed out after 250ms");
    }

    #[test]
    fn test_section_error_from_directory_error_keeps_message() {
        let error = DirectoryError::load("backend unavailable");
        let section_error = SectionError::from(&error);
        assert_eq!(section_error.kind, FailureKind::Load);
        assert_eq!(section_error.message, "Failed to load data: backend unavailable");
        assert!(section_error.retriable());
    }

    #[test]
    fn test_submission_errors_are_not_retriable() {
        assert!(!SectionError::new(FailureKind::Submission, "rejected").retriable());
        assert!(SectionError::new(FailureKind::Timeout, "slow").retriable());
    }
}
