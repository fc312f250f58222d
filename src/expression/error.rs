//! Error types for expression validation and evaluation.

use crate::access::SqlType;
use thiserror::Error;

/// Errors that can occur while checking or evaluating expressions
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExpressionError {
    /// A node rejected its operand types
    #[error("Invalid expression {node}: {reason}")]
    InvalidExpression { node: String, reason: String },

    /// No registered conversion handles the pair
    #[error("Unsupported reinterpretation from {from} to {to}")]
    UnsupportedConversion { from: SqlType, to: SqlType },

    /// Payload shape does not match its type tag
    #[error("Payload mismatch: expected {expected}, got {actual}")]
    PayloadMismatch {
        expected: SqlType,
        actual: &'static str,
    },

    /// Conversion rule builder is incomplete
    #[error("Invalid conversion rule: {reason}")]
    InvalidConversion { reason: String },

    /// Input reference past the end of the row
    #[error("Column index {index} out of bounds for row with {row_size} columns")]
    ColumnIndexOutOfBounds { index: usize, row_size: usize },

    /// Local reference past the end of the environment's slots
    #[error("Local reference {index} out of bounds, environment has {available} slots")]
    LocalRefOutOfBounds { index: usize, available: usize },

    /// Correlation variable missing from the environment
    #[error("Correlation variable {name} is not bound")]
    UnboundCorrelation { name: String },
}

/// Result type for expression operations
pub type ExpressionResult<T> = Result<T, ExpressionError>;
