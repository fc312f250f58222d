//! The contract every expression node implements.

use crate::access::{Row, SqlType, TypedValue};
use crate::expression::{Environment, Expression, ExpressionError, ExpressionResult, Window};

/// A node of a scalar expression tree.
///
/// `validate` is checked once, before the tree is first evaluated, and only
/// looks at operand output types and the node's own output type. After a
/// successful validation, `evaluate` may be called any number of times, from
/// any number of threads, against different rows.
pub trait ScalarExpression {
    /// Display name used in diagnostics
    fn name(&self) -> &'static str;

    /// Child nodes, in operand order
    fn operands(&self) -> &[Expression];

    /// Type of the value `evaluate` produces
    fn output_type(&self) -> SqlType;

    /// Whether the operand types are acceptable for this node
    fn validate(&self) -> bool;

    /// Compute this node's value for one row
    fn evaluate(
        &self,
        row: &Row,
        window: Option<&Window>,
        env: &Environment,
    ) -> ExpressionResult<TypedValue>;

    /// Output type of the operand at `index`
    fn operand_type(&self, index: usize) -> Option<SqlType> {
        self.operands().get(index).map(|op| op.output_type())
    }
}

/// Error for a node evaluated with the wrong number of operands
pub(crate) fn arity_error(node: &dyn ScalarExpression, expected: usize) -> ExpressionError {
    ExpressionError::InvalidExpression {
        node: node.name().to_string(),
        reason: format!(
            "expected {} operands, got {}",
            expected,
            node.operands().len()
        ),
    }
}
