//! Error types for Robinx

use thiserror::Error;

use crate::constraint::{Category, ConstraintId};

/// Main error type for Robinx operations
#[derive(Debug, Error)]
pub enum TimetableError {
    /// Malformed external representation
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// Invalid penalty or constraint lookup
    #[error(transparent)]
    Lookup(#[from] LookupError),
}

/// Error raised while decoding an instance or solution from an external form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("{category} constraint {index}: missing attribute '{attribute}'")]
    MissingAttribute {
        category: Category,
        index: usize,
        attribute: &'static str,
    },

    #[error("{category} constraint {index}: attribute '{attribute}' is not an integer: '{value}'")]
    NotAnInteger {
        category: Category,
        index: usize,
        attribute: &'static str,
        value: String,
    },

    #[error("{category} constraint {index}: invalid {attribute} token '{value}'")]
    InvalidToken {
        category: Category,
        index: usize,
        attribute: &'static str,
        value: String,
    },

    #[error("{category} constraint {index}: meeting '{value}' is not a home,away pair")]
    InvalidMeeting {
        category: Category,
        index: usize,
        value: String,
    },

    #[error("unknown constraint category '{0}'")]
    UnknownCategory(String),

    #[error("duplicate {kind} id '{id}'")]
    DuplicateId { kind: &'static str, id: String },
}

/// Error raised by penalty lookups and penalty weighting.
///
/// These are usage errors: a missing penalty is never defaulted to zero,
/// and an objective out of `i64` range is never wrapped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("no {category} constraint with id {id}")]
    UnknownConstraint { category: Category, id: ConstraintId },

    #[error("{category} constraint {id} is HARD and has no penalty")]
    HardConstraint { category: Category, id: ConstraintId },

    #[error("{category} constraint {id} is SOFT but carries no penalty")]
    MissingPenalty { category: Category, id: ConstraintId },

    #[error("{category} constraint {id}: weighted violation overflows the objective")]
    Overflow { category: Category, id: ConstraintId },
}

/// Result type alias for Robinx operations
pub type Result<T> = std::result::Result<T, TimetableError>;
