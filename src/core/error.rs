// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Core error types for typecodec.
//!
//! Provides one error type for the whole decode pipeline:
//! - Descriptor construction and parsing
//! - Registry setup
//! - Descriptor-driven decoding and typed materialization
//! - Re-encoding decoded values to JSON

use thiserror::Error;

use super::location::Location;

/// Errors that can occur while describing, registering or decoding.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DecodeError {
    /// JSON node shape disagrees with the descriptor kind
    #[error("Type mismatch at {location}: expected {expected}, found {found}")]
    TypeMismatch {
        /// Rendered descriptor that was expected
        expected: String,
        /// Kind of JSON node actually found
        found: String,
        /// Where it happened
        location: Location,
    },

    /// Required record field absent from the JSON object
    #[error("Missing required field '{field}' of record '{record}' at {location}")]
    MissingField {
        /// Record identity
        record: String,
        /// Field name
        field: String,
        /// Where it happened
        location: Location,
    },

    /// Number does not fit the declared width
    #[error("Numeric overflow at {location}: {value} does not fit {target}")]
    NumericOverflow {
        /// Target primitive (e.g. "int8")
        target: String,
        /// Literal as it appeared in the input
        value: String,
        /// Where it happened
        location: Location,
    },

    /// No codec or built-in handler for a base identity
    #[error("Unknown type '{identity}' at {location}")]
    UnknownType {
        /// Identity that could not be resolved
        identity: String,
        /// Where it happened
        location: Location,
    },

    /// Record identity registered twice
    #[error("Type '{identity}' is already registered")]
    DuplicateRegistration {
        /// Identity registered twice
        identity: String,
    },

    /// Untyped JSON reached a typed target (naive resolution only)
    #[error("Generic type information lost at {location}: cannot materialize untyped JSON as {target}")]
    GenericInformationLost {
        /// Rendered descriptor of the typed target
        target: String,
        /// Where it happened
        location: Location,
    },

    /// Nesting deeper than the configured limit
    #[error("Maximum nesting depth {max_depth} exceeded at {location}")]
    DepthExceeded {
        /// Configured limit
        max_depth: usize,
        /// Where it happened
        location: Location,
    },

    /// Wrong number of type arguments
    #[error("Type '{identity}' takes {expected} type argument(s), got {found}")]
    Arity {
        /// Base identity
        identity: String,
        /// Declared arity
        expected: usize,
        /// Supplied arguments
        found: usize,
        /// Where it happened, when raised during a decode walk
        location: Option<Location>,
    },

    /// Mapping key could not be turned into the declared key type
    #[error("Invalid mapping key '{key}' for key type {key_type} at {location}: {reason}")]
    InvalidMapKey {
        /// Key as it appeared in the JSON object
        key: String,
        /// Rendered key descriptor
        key_type: String,
        /// Why it was rejected
        reason: String,
        /// Where it happened
        location: Location,
    },

    /// JSON object carries a key the record does not declare
    #[error("Unknown field '{field}' for record '{record}' at {location}")]
    UnknownField {
        /// Record identity
        record: String,
        /// Undeclared key
        field: String,
        /// Where it happened
        location: Location,
    },

    /// Record construction function rejected the decoded fields
    #[error("Failed to construct record '{record}' at {location}: {message}")]
    Construction {
        /// Record identity
        record: String,
        /// Reason given by the constructor
        message: String,
        /// Where it happened
        location: Location,
    },

    /// Parse error in descriptor text, schema document or JSON text
    #[error("Parse error in {context}: {message}")]
    Parse {
        /// What was being parsed
        context: String,
        /// Error message
        message: String,
    },

    /// Decoded value cannot be represented as JSON
    #[error("Encode error: {message}")]
    Encode {
        /// Error message
        message: String,
    },
}

impl DecodeError {
    /// Create a type mismatch error.
    pub fn type_mismatch(
        expected: impl Into<String>,
        found: impl Into<String>,
        location: Location,
    ) -> Self {
        DecodeError::TypeMismatch {
            expected: expected.into(),
            found: found.into(),
            location,
        }
    }

    /// Create a parse error.
    pub fn parse(context: impl Into<String>, message: impl Into<String>) -> Self {
        DecodeError::Parse {
            context: context.into(),
            message: message.into(),
        }
    }

    /// Create an arity error.
    pub fn arity(identity: impl Into<String>, expected: usize, found: usize) -> Self {
        DecodeError::Arity {
            identity: identity.into(),
            expected,
            found,
            location: None,
        }
    }

    /// Attach a decode location to an error raised outside the walk.
    ///
    /// Only `Arity` carries an optional location; other errors are returned
    /// unchanged.
    pub fn located(self, at: Location) -> Self {
        match self {
            DecodeError::Arity {
                identity,
                expected,
                found,
                location: None,
            } => DecodeError::Arity {
                identity,
                expected,
                found,
                location: Some(at),
            },
            other => other,
        }
    }

    /// Create a duplicate registration error.
    pub fn duplicate(identity: impl Into<String>) -> Self {
        DecodeError::DuplicateRegistration {
            identity: identity.into(),
        }
    }

    /// Create an encode error.
    pub fn encode(message: impl Into<String>) -> Self {
        DecodeError::Encode {
            message: message.into(),
        }
    }

    /// Short stable name of the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            DecodeError::TypeMismatch { .. } => "type_mismatch",
            DecodeError::MissingField { .. } => "missing_field",
            DecodeError::NumericOverflow { .. } => "numeric_overflow",
            DecodeError::UnknownType { .. } => "unknown_type",
            DecodeError::DuplicateRegistration { .. } => "duplicate_registration",
            DecodeError::GenericInformationLost { .. } => "generic_information_lost",
            DecodeError::DepthExceeded { .. } => "depth_exceeded",
            DecodeError::Arity { .. } => "arity",
            DecodeError::InvalidMapKey { .. } => "invalid_map_key",
            DecodeError::UnknownField { .. } => "unknown_field",
            DecodeError::Construction { .. } => "construction",
            DecodeError::Parse { .. } => "parse",
            DecodeError::Encode { .. } => "encode",
        }
    }

    /// Location of the failing node, for errors raised during a decode walk.
    pub fn location(&self) -> Option<&Location> {
        match self {
            DecodeError::TypeMismatch { location, .. }
            | DecodeError::MissingField { location, .. }
            | DecodeError::NumericOverflow { location, .. }
            | DecodeError::UnknownType { location, .. }
            | DecodeError::GenericInformationLost { location, .. }
            | DecodeError::DepthExceeded { location, .. }
            | DecodeError::InvalidMapKey { location, .. }
            | DecodeError::UnknownField { location, .. }
            | DecodeError::Construction { location, .. } => Some(location),
            DecodeError::Arity { location, .. } => location.as_ref(),
            DecodeError::DuplicateRegistration { .. }
            | DecodeError::Parse { .. }
            | DecodeError::Encode { .. } => None,
        }
    }

    /// Get structured fields for logging.
    pub fn log_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = match self {
            DecodeError::TypeMismatch {
                expected, found, ..
            } => vec![("expected", expected.clone()), ("found", found.clone())],
            DecodeError::MissingField { record, field, .. }
            | DecodeError::UnknownField { record, field, .. } => {
                vec![("record", record.clone()), ("field", field.clone())]
            }
            DecodeError::NumericOverflow { target, value, .. } => {
                vec![("target", target.clone()), ("value", value.clone())]
            }
            DecodeError::UnknownType { identity, .. }
            | DecodeError::DuplicateRegistration { identity } => {
                vec![("type", identity.clone())]
            }
            DecodeError::GenericInformationLost { target, .. } => vec![("target", target.clone())],
            DecodeError::DepthExceeded { max_depth, .. } => {
                vec![("max_depth", max_depth.to_string())]
            }
            DecodeError::Arity {
                identity,
                expected,
                found,
                ..
            } => vec![
                ("type", identity.clone()),
                ("expected", expected.to_string()),
                ("found", found.to_string()),
            ],
            DecodeError::InvalidMapKey {
                key,
                key_type,
                reason,
                ..
            } => vec![
                ("key", key.clone()),
                ("key_type", key_type.clone()),
                ("reason", reason.clone()),
            ],
            DecodeError::Construction {
                record, message, ..
            } => vec![("record", record.clone()), ("message", message.clone())],
            DecodeError::Parse { context, message } => {
                vec![("context", context.clone()), ("message", message.clone())]
            }
            DecodeError::Encode { message } => vec![("message", message.clone())],
        };
        if let Some(location) = self.location() {
            fields.push(("pointer", location.pointer.clone()));
        }
        fields
    }
}

impl From<serde_json::Error> for DecodeError {
    fn from(err: serde_json::Error) -> Self {
        DecodeError::parse("json", err.to_string())
    }
}

/// Result type for typecodec operations.
pub type Result<T> = std::result::Result<T, DecodeError>;
