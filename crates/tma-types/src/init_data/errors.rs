//! Init-data payload error types
//!
//! Variants carry no payload text so that diagnostics can never leak the
//! signed data or anything derived from it.

use thiserror::Error;

/// Errors raised while decoding an init-data payload
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InitDataError {
	#[error("Init data is empty")]
	Empty,

	#[error("Missing hash field")]
	MissingHash,

	#[error("User field is not valid JSON")]
	InvalidUserField,

	#[error("Missing or invalid auth_date field")]
	InvalidAuthDate,
}

/// Result type for init-data operations
pub type InitDataResult<T> = Result<T, InitDataError>;
