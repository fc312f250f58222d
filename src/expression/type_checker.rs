//! Tree-wide validation with diagnostics.

use crate::access::SqlType;
use crate::expression::{Expression, ExpressionError, ExpressionResult, ScalarExpression};
use log::debug;

/// Validates a whole expression tree, operands before their parents.
///
/// Nodes only answer yes or no; the checker turns the first rejection into an
/// error naming the offending sub-expression and its operand types.
#[derive(Debug, Default, Clone, Copy)]
pub struct TypeChecker;

impl TypeChecker {
    pub fn new() -> Self {
        Self
    }

    /// Type check an expression and return its output type
    pub fn check(&self, expr: &Expression) -> ExpressionResult<SqlType> {
        for operand in expr.operands() {
            self.check(operand)?;
        }

        if expr.validate() {
            return Ok(expr.output_type());
        }

        let err = ExpressionError::InvalidExpression {
            node: expr.to_string(),
            reason: rejection_reason(expr),
        };
        debug!("rejected expression: {}", err);
        Err(err)
    }

    /// Check that an expression is valid and produces the expected type
    pub fn check_output(&self, expr: &Expression, expected: SqlType) -> ExpressionResult<()> {
        let actual = self.check(expr)?;
        if actual == expected {
            Ok(())
        } else {
            Err(ExpressionError::InvalidExpression {
                node: expr.to_string(),
                reason: format!("expected output type {}, got {}", expected, actual),
            })
        }
    }
}

fn rejection_reason(expr: &Expression) -> String {
    if let Expression::Literal(lit) = expr {
        return format!(
            "{} payload does not match its type",
            lit.value().value().kind()
        );
    }

    let types = expr
        .operands()
        .iter()
        .map(|op| op.output_type().to_string())
        .collect::<Vec<_>>();
    format!(
        "{} does not accept operand types ({}) with output type {}",
        expr.name(),
        types.join(", "),
        expr.output_type()
    )
}

/// Helper function to type check an expression
pub fn type_check_expression(expr: &Expression) -> ExpressionResult<SqlType> {
    TypeChecker::new().check(expr)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::access::{TypedValue, Value};
    use chrono::NaiveDate;

    #[test]
    fn test_valid_tree() {
        let expr = Expression::array(vec![
            Expression::reinterpret(Expression::input_ref(0, SqlType::Date)),
            Expression::reinterpret(Expression::input_ref(1, SqlType::Integer)),
        ]);
        assert_eq!(type_check_expression(&expr).unwrap(), SqlType::Array);
    }

    #[test]
    fn test_reports_the_offending_node() {
        let expr = Expression::array(vec![
            Expression::input_ref(0, SqlType::Integer),
            Expression::input_ref(1, SqlType::Varchar),
        ]);
        assert_eq!(
            type_check_expression(&expr),
            Err(ExpressionError::InvalidExpression {
                node: "ARRAY[$0, $1]".to_string(),
                reason: "ARRAY does not accept operand types (INTEGER, VARCHAR) with output type ARRAY"
                    .to_string(),
            })
        );
    }

    #[test]
    fn test_inner_rejection_wins() {
        // The reinterpret of a VARCHAR is rejected before the array is looked at
        let expr = Expression::array(vec![
            Expression::reinterpret(Expression::input_ref(0, SqlType::Varchar)),
            Expression::input_ref(1, SqlType::Integer),
        ]);
        match type_check_expression(&expr) {
            Err(ExpressionError::InvalidExpression { node, reason }) => {
                assert_eq!(node, "REINTERPRET($0 AS BIGINT)");
                assert!(reason.contains("(VARCHAR)"), "{}", reason);
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_bad_literal() {
        let expr = Expression::literal(TypedValue::of(SqlType::Date, Value::Integer(3)));
        assert_eq!(
            type_check_expression(&expr),
            Err(ExpressionError::InvalidExpression {
                node: "3:DATE".to_string(),
                reason: "Integer payload does not match its type".to_string(),
            })
        );
    }

    #[test]
    fn test_check_output() {
        let checker = TypeChecker::new();
        let expr = Expression::reinterpret(Expression::literal(TypedValue::date(
            NaiveDate::from_ymd_opt(2001, 9, 9).unwrap(),
        )));
        assert!(checker.check_output(&expr, SqlType::BigInt).is_ok());
        assert!(matches!(
            checker.check_output(&expr, SqlType::Integer),
            Err(ExpressionError::InvalidExpression { .. })
        ));
    }
}
