//! Scalar expression framework for row-at-a-time evaluation.
//!
//! This module provides:
//! - The node contract (`ScalarExpression`) and the closed set of node kinds
//! - Array construction and access nodes
//! - The REINTERPRET node, backed by the conversion registry
//! - Tree validation with diagnostics
//! - Evaluation entry points for validated trees

pub mod array;
pub mod context;
pub mod error;
pub mod eval;
pub mod expr;
pub mod node;
pub mod reinterpret;
pub mod type_checker;

pub use array::{ArrayExpression, ArrayItemExpression, CardinalityExpression};
pub use context::{Environment, Window};
pub use error::{ExpressionError, ExpressionResult};
pub use eval::{evaluate_expression, ExpressionEvaluator, PreparedExpression};
pub use expr::{CorrelatedRef, Expression, InputRef, Literal, LocalRef};
pub use node::ScalarExpression;
pub use reinterpret::ReinterpretExpression;
pub use type_checker::{type_check_expression, TypeChecker};
