//! REINTERPRET expression.

use crate::access::{Row, SqlType, TypedValue, Value};
use crate::conversion::Reinterpreter;
use crate::expression::node::arity_error;
use crate::expression::{
    Environment, Expression, ExpressionError, ExpressionResult, ScalarExpression, Window,
};
use std::sync::Arc;

/// Reinterprets its single operand as the output type through a
/// [`Reinterpreter`].
///
/// Interval operands are special-cased: upstream evaluation already yields
/// their normalized BIGINT count (milliseconds or months), so reinterpreting
/// them as BIGINT only re-tags the payload and never consults the registry.
#[derive(Debug, Clone)]
pub struct ReinterpretExpression {
    operands: Vec<Expression>,
    output_type: SqlType,
    registry: Arc<Reinterpreter>,
}

impl ReinterpretExpression {
    /// Reinterpret with the standard conversions
    pub fn new(operands: Vec<Expression>, output_type: SqlType) -> Self {
        Self::with_registry(operands, output_type, Reinterpreter::standard())
    }

    pub fn with_registry(
        operands: Vec<Expression>,
        output_type: SqlType,
        registry: Arc<Reinterpreter>,
    ) -> Self {
        Self {
            operands,
            output_type,
            registry,
        }
    }

    pub fn to_bigint(operand: Expression) -> Self {
        Self::new(vec![operand], SqlType::BigInt)
    }

    pub fn registry(&self) -> &Arc<Reinterpreter> {
        &self.registry
    }

    fn is_interval_passthrough(&self, operand_type: SqlType) -> bool {
        operand_type.is_interval() && self.output_type == SqlType::BigInt
    }
}

impl PartialEq for ReinterpretExpression {
    fn eq(&self, other: &Self) -> bool {
        self.output_type == other.output_type
            && self.operands == other.operands
            && Arc::ptr_eq(&self.registry, &other.registry)
    }
}

impl ScalarExpression for ReinterpretExpression {
    fn name(&self) -> &'static str {
        "REINTERPRET"
    }

    fn operands(&self) -> &[Expression] {
        &self.operands
    }

    fn output_type(&self) -> SqlType {
        self.output_type
    }

    fn validate(&self) -> bool {
        let [operand] = self.operands.as_slice() else {
            return false;
        };
        let operand_type = operand.output_type();
        self.is_interval_passthrough(operand_type)
            || self.registry.can_convert(operand_type, self.output_type)
    }

    fn evaluate(
        &self,
        row: &Row,
        window: Option<&Window>,
        env: &Environment,
    ) -> ExpressionResult<TypedValue> {
        let [operand] = self.operands.as_slice() else {
            return Err(arity_error(self, 1));
        };
        let value = operand.evaluate(row, window, env)?;

        if self.is_interval_passthrough(operand.output_type()) {
            return normalized_interval(value);
        }
        self.registry.convert(self.output_type, &value)
    }
}

fn normalized_interval(value: TypedValue) -> ExpressionResult<TypedValue> {
    match value.value() {
        Value::Null => Ok(TypedValue::null(SqlType::BigInt)),
        other => other
            .as_integral()
            .map(TypedValue::bigint)
            .ok_or(ExpressionError::PayloadMismatch {
                expected: value.sql_type(),
                actual: other.kind(),
            }),
    }
}
