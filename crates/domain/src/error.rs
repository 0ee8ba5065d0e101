//! Unified error types for the domain layer
//!
//! Provides a common error type for board and gesture operations so adapters
//! can report failures without resorting to String or anyhow.

use thiserror::Error;

/// Unified error type for domain operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Validation failed (e.g., a snapshot with mismatched sequences)
    #[error("Validation failed: {0}")]
    Validation(String),

    /// A card index outside the board
    #[error("Card index {index} out of range (board has {len} cards)")]
    CardOutOfRange { index: usize, len: usize },

    /// State transition not allowed
    #[error("Invalid state transition: {0}")]
    InvalidStateTransition(String),
}

impl DomainError {
    /// Creates a validation error for malformed input.
    ///
    /// # Example
    /// ```ignore
    /// if words.len() != revealed.len() {
    ///     return Err(DomainError::validation("revealed flags do not match words"));
    /// }
    /// ```
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create an invalid state transition error
    pub fn invalid_transition(msg: impl Into<String>) -> Self {
        Self::InvalidStateTransition(msg.into())
    }
}
