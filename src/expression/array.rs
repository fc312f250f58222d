//! Array constructor and array access nodes.

use crate::access::{Row, SqlType, TypedValue};
use crate::expression::node::arity_error;
use crate::expression::{
    Environment, Expression, ExpressionError, ExpressionResult, ScalarExpression, Window,
};

/// `ARRAY[e1, e2, ...]`: collects its operands' values into one list.
///
/// All operands must share the same output type. An empty operand list is
/// rejected since it carries no element type at all.
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayExpression {
    operands: Vec<Expression>,
}

impl ArrayExpression {
    pub fn new(operands: Vec<Expression>) -> Self {
        Self { operands }
    }

    /// The shared operand type, if the operands agree on one
    pub fn element_type(&self) -> Option<SqlType> {
        let mut types = self.operands.iter().map(|op| op.output_type());
        let first = types.next()?;
        types.all(|t| t == first).then_some(first)
    }
}

impl ScalarExpression for ArrayExpression {
    fn name(&self) -> &'static str {
        "ARRAY"
    }

    fn operands(&self) -> &[Expression] {
        &self.operands
    }

    fn output_type(&self) -> SqlType {
        SqlType::Array
    }

    fn validate(&self) -> bool {
        self.element_type().is_some()
    }

    fn evaluate(
        &self,
        row: &Row,
        window: Option<&Window>,
        env: &Environment,
    ) -> ExpressionResult<TypedValue> {
        let elements = self
            .operands
            .iter()
            .map(|op| op.evaluate(row, window, env))
            .collect::<ExpressionResult<Vec<_>>>()?;
        Ok(TypedValue::array(elements))
    }
}

/// `array[index]` with a zero-based index.
///
/// Yields a NULL of the declared output type when the array or the index is
/// NULL, or when the index falls outside the array. An element tagged with a
/// type other than the declared one is a `PayloadMismatch`.
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayItemExpression {
    operands: Vec<Expression>,
    output_type: SqlType,
}

impl ArrayItemExpression {
    pub fn new(operands: Vec<Expression>, output_type: SqlType) -> Self {
        Self {
            operands,
            output_type,
        }
    }
}

impl ScalarExpression for ArrayItemExpression {
    fn name(&self) -> &'static str {
        "ARRAY_ITEM"
    }

    fn operands(&self) -> &[Expression] {
        &self.operands
    }

    fn output_type(&self) -> SqlType {
        self.output_type
    }

    fn validate(&self) -> bool {
        self.operands.len() == 2
            && self.operand_type(0) == Some(SqlType::Array)
            && self.operand_type(1).is_some_and(|t| t.is_integer())
    }

    fn evaluate(
        &self,
        row: &Row,
        window: Option<&Window>,
        env: &Environment,
    ) -> ExpressionResult<TypedValue> {
        let [array, index] = self.operands.as_slice() else {
            return Err(arity_error(self, 2));
        };
        let array = array.evaluate(row, window, env)?;
        let index = index.evaluate(row, window, env)?;
        if array.is_null() || index.is_null() {
            return Ok(TypedValue::null(self.output_type));
        }

        let items = array.as_array().ok_or(ExpressionError::PayloadMismatch {
            expected: SqlType::Array,
            actual: array.value().kind(),
        })?;
        let index = index
            .value()
            .as_integral()
            .ok_or(ExpressionError::PayloadMismatch {
                expected: index.sql_type(),
                actual: index.value().kind(),
            })?;

        match usize::try_from(index).ok().and_then(|i| items.get(i)) {
            Some(item) if item.sql_type() == self.output_type => Ok(item.clone()),
            Some(item) => Err(ExpressionError::PayloadMismatch {
                expected: self.output_type,
                actual: item.value().kind(),
            }),
            None => Ok(TypedValue::null(self.output_type)),
        }
    }
}

/// `CARDINALITY(array)`: number of elements as an INTEGER
#[derive(Debug, Clone, PartialEq)]
pub struct CardinalityExpression {
    operands: Vec<Expression>,
}

impl CardinalityExpression {
    pub fn new(operands: Vec<Expression>) -> Self {
        Self { operands }
    }
}

impl ScalarExpression for CardinalityExpression {
    fn name(&self) -> &'static str {
        "CARDINALITY"
    }

    fn operands(&self) -> &[Expression] {
        &self.operands
    }

    fn output_type(&self) -> SqlType {
        SqlType::Integer
    }

    fn validate(&self) -> bool {
        self.operands.len() == 1 && self.operand_type(0) == Some(SqlType::Array)
    }

    fn evaluate(
        &self,
        row: &Row,
        window: Option<&Window>,
        env: &Environment,
    ) -> ExpressionResult<TypedValue> {
        let [array] = self.operands.as_slice() else {
            return Err(arity_error(self, 1));
        };
        let array = array.evaluate(row, window, env)?;
        if array.is_null() {
            return Ok(TypedValue::null(SqlType::Integer));
        }
        let items = array.as_array().ok_or(ExpressionError::PayloadMismatch {
            expected: SqlType::Array,
            actual: array.value().kind(),
        })?;
        Ok(TypedValue::integer(
            i32::try_from(items.len()).unwrap_or(i32::MAX),
        ))
    }
}
