//! # Validation Errors
//!
//! Structured error types for domain primitive construction, built with
//! `thiserror`. Each variant carries the rejected input and describes the
//! expected format so that callers can render an actionable reason without
//! guesswork.

use thiserror::Error;

/// Validation errors for domain primitive newtypes.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Account address does not conform to the 0x-prefixed 40-hex-digit form.
    #[error("invalid account address: \"{0}\" (expected 0x followed by 40 hex digits)")]
    InvalidAddress(String),

    /// EduID does not conform to the registry identifier format.
    #[error(
        "invalid EduID: \"{0}\" (expected CREDCHAIN-<4 char code>-<13 digit millis>-<4 char suffix>)"
    )]
    InvalidEduId(String),

    /// Document hash is not a well-formed 32-byte hex digest.
    #[error("invalid document hash: \"{value}\" ({reason})")]
    InvalidHash {
        /// The string that failed to parse.
        value: String,
        /// Why it was rejected.
        reason: String,
    },

    /// A required text field was empty or whitespace-only.
    #[error("required field must not be empty: {field}")]
    EmptyField {
        /// Name of the offending field.
        field: &'static str,
    },
}
