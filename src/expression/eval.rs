//! Evaluation entry points for validated expressions.

use crate::access::{Row, SqlType, TypedValue};
use crate::expression::{
    Environment, Expression, ExpressionResult, ScalarExpression, TypeChecker, Window,
};

/// An expression tree that passed validation.
///
/// This is the form executors hold on to: it is checked once when created and
/// can then be evaluated for any number of rows, from any number of threads
/// (share it behind an `Arc`).
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedExpression {
    expr: Expression,
    output_type: SqlType,
}

impl PreparedExpression {
    pub fn new(expr: Expression) -> ExpressionResult<Self> {
        let output_type = TypeChecker::new().check(&expr)?;
        Ok(Self { expr, output_type })
    }

    pub fn expression(&self) -> &Expression {
        &self.expr
    }

    pub fn output_type(&self) -> SqlType {
        self.output_type
    }

    pub fn evaluate(
        &self,
        row: &Row,
        window: Option<&Window>,
        env: &Environment,
    ) -> ExpressionResult<TypedValue> {
        self.expr.evaluate(row, window, env)
    }

    pub fn into_inner(self) -> Expression {
        self.expr
    }
}

/// Evaluator bound to one row and its context
pub struct ExpressionEvaluator<'a> {
    row: &'a Row,
    window: Option<&'a Window>,
    env: &'a Environment,
}

impl<'a> ExpressionEvaluator<'a> {
    /// Create a new evaluator for a row with no window
    pub fn new(row: &'a Row, env: &'a Environment) -> Self {
        Self {
            row,
            window: None,
            env,
        }
    }

    pub fn with_window(mut self, window: &'a Window) -> Self {
        self.window = Some(window);
        self
    }

    /// Evaluate a prepared expression against the bound row
    pub fn evaluate(&self, expr: &PreparedExpression) -> ExpressionResult<TypedValue> {
        expr.evaluate(self.row, self.window, self.env)
    }
}

/// Helper function to validate and evaluate an expression against one row
/// with no window and an empty environment
pub fn evaluate_expression(expr: &Expression, row: &Row) -> ExpressionResult<TypedValue> {
    TypeChecker::new().check(expr)?;
    expr.evaluate(row, None, &Environment::new())
}
