//! Expression tree definitions and leaf nodes.

use crate::access::{Row, SqlType, TypedValue};
use crate::conversion::Reinterpreter;
use crate::expression::{
    ArrayExpression, ArrayItemExpression, CardinalityExpression, Environment, ExpressionError,
    ExpressionResult, ReinterpretExpression, ScalarExpression, Window,
};
use std::fmt;
use std::sync::Arc;

/// Constant value
#[derive(Debug, Clone, PartialEq)]
pub struct Literal {
    value: TypedValue,
}

impl Literal {
    pub fn new(value: TypedValue) -> Self {
        Self { value }
    }

    pub fn value(&self) -> &TypedValue {
        &self.value
    }
}

impl ScalarExpression for Literal {
    fn name(&self) -> &'static str {
        "LITERAL"
    }

    fn operands(&self) -> &[Expression] {
        &[]
    }

    fn output_type(&self) -> SqlType {
        self.value.sql_type()
    }

    fn validate(&self) -> bool {
        self.value.conforms()
    }

    fn evaluate(
        &self,
        _row: &Row,
        _window: Option<&Window>,
        _env: &Environment,
    ) -> ExpressionResult<TypedValue> {
        Ok(self.value.clone())
    }
}

/// Field of the input row (`$n`)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct InputRef {
    /// Field index in the row (0-based)
    pub index: usize,
    pub output_type: SqlType,
}

impl InputRef {
    pub fn new(index: usize, output_type: SqlType) -> Self {
        Self { index, output_type }
    }
}

impl ScalarExpression for InputRef {
    fn name(&self) -> &'static str {
        "INPUT_REF"
    }

    fn operands(&self) -> &[Expression] {
        &[]
    }

    fn output_type(&self) -> SqlType {
        self.output_type
    }

    fn validate(&self) -> bool {
        true
    }

    fn evaluate(
        &self,
        row: &Row,
        _window: Option<&Window>,
        _env: &Environment,
    ) -> ExpressionResult<TypedValue> {
        let value = row
            .get(self.index)
            .ok_or(ExpressionError::ColumnIndexOutOfBounds {
                index: self.index,
                row_size: row.len(),
            })?;
        Ok(TypedValue::of(self.output_type, value.clone()))
    }
}

/// Local slot of the evaluation environment (`$tn`)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LocalRef {
    pub index: usize,
    pub output_type: SqlType,
}

impl LocalRef {
    pub fn new(index: usize, output_type: SqlType) -> Self {
        Self { index, output_type }
    }
}

impl ScalarExpression for LocalRef {
    fn name(&self) -> &'static str {
        "LOCAL_REF"
    }

    fn operands(&self) -> &[Expression] {
        &[]
    }

    fn output_type(&self) -> SqlType {
        self.output_type
    }

    fn validate(&self) -> bool {
        true
    }

    fn evaluate(
        &self,
        _row: &Row,
        _window: Option<&Window>,
        env: &Environment,
    ) -> ExpressionResult<TypedValue> {
        let value = env
            .local_ref(self.index)
            .ok_or(ExpressionError::LocalRefOutOfBounds {
                index: self.index,
                available: env.local_ref_count(),
            })?;
        Ok(TypedValue::of(self.output_type, value.value().clone()))
    }
}

/// Correlation variable bound by an enclosing query
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CorrelatedRef {
    pub name: String,
    pub output_type: SqlType,
}

impl CorrelatedRef {
    pub fn new(name: impl Into<String>, output_type: SqlType) -> Self {
        Self {
            name: name.into(),
            output_type,
        }
    }
}

impl ScalarExpression for CorrelatedRef {
    fn name(&self) -> &'static str {
        "CORRELATED_REF"
    }

    fn operands(&self) -> &[Expression] {
        &[]
    }

    fn output_type(&self) -> SqlType {
        self.output_type
    }

    fn validate(&self) -> bool {
        true
    }

    fn evaluate(
        &self,
        _row: &Row,
        _window: Option<&Window>,
        env: &Environment,
    ) -> ExpressionResult<TypedValue> {
        let value = env
            .correlated(&self.name)
            .ok_or_else(|| ExpressionError::UnboundCorrelation {
                name: self.name.clone(),
            })?;
        Ok(TypedValue::of(self.output_type, value.value().clone()))
    }
}

/// Expression tree node
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    /// Literal constant value
    Literal(Literal),

    /// Row field reference
    InputRef(InputRef),

    /// Environment local slot reference
    LocalRef(LocalRef),

    /// Correlation variable reference
    Correlated(CorrelatedRef),

    /// ARRAY[...] constructor
    Array(ArrayExpression),

    /// Array element access
    ArrayItem(ArrayItemExpression),

    /// CARDINALITY(array)
    Cardinality(CardinalityExpression),

    /// REINTERPRET(operand AS type)
    Reinterpret(ReinterpretExpression),
}

impl Expression {
    /// Create a literal expression
    pub fn literal(value: TypedValue) -> Self {
        Expression::Literal(Literal::new(value))
    }

    /// Create a row field reference
    pub fn input_ref(index: usize, output_type: SqlType) -> Self {
        Expression::InputRef(InputRef::new(index, output_type))
    }

    /// Create an environment local slot reference
    pub fn local_ref(index: usize, output_type: SqlType) -> Self {
        Expression::LocalRef(LocalRef::new(index, output_type))
    }

    /// Create a correlation variable reference
    pub fn correlated(name: impl Into<String>, output_type: SqlType) -> Self {
        Expression::Correlated(CorrelatedRef::new(name, output_type))
    }

    /// Create an array constructor
    pub fn array(operands: Vec<Expression>) -> Self {
        Expression::Array(ArrayExpression::new(operands))
    }

    /// Create an array element access
    pub fn array_item(array: Expression, index: Expression, output_type: SqlType) -> Self {
        Expression::ArrayItem(ArrayItemExpression::new(vec![array, index], output_type))
    }

    /// Create a CARDINALITY expression
    pub fn cardinality(array: Expression) -> Self {
        Expression::Cardinality(CardinalityExpression::new(vec![array]))
    }

    /// Reinterpret `operand` as BIGINT using the standard conversions
    pub fn reinterpret(operand: Expression) -> Self {
        Expression::Reinterpret(ReinterpretExpression::to_bigint(operand))
    }

    /// Reinterpret with an explicit target type and registry
    pub fn reinterpret_with(
        operands: Vec<Expression>,
        output_type: SqlType,
        registry: Arc<Reinterpreter>,
    ) -> Self {
        Expression::Reinterpret(ReinterpretExpression::with_registry(
            operands,
            output_type,
            registry,
        ))
    }

    /// Check if this expression is a constant (reads nothing from the row or
    /// environment)
    pub fn is_constant(&self) -> bool {
        match self {
            Expression::Literal(_) => true,
            Expression::InputRef(_) | Expression::LocalRef(_) | Expression::Correlated(_) => {
                false
            }
            _ => self.operands().iter().all(|op| op.is_constant()),
        }
    }

    fn node(&self) -> &dyn ScalarExpression {
        match self {
            Expression::Literal(e) => e,
            Expression::InputRef(e) => e,
            Expression::LocalRef(e) => e,
            Expression::Correlated(e) => e,
            Expression::Array(e) => e,
            Expression::ArrayItem(e) => e,
            Expression::Cardinality(e) => e,
            Expression::Reinterpret(e) => e,
        }
    }
}

impl ScalarExpression for Expression {
    fn name(&self) -> &'static str {
        self.node().name()
    }

    fn operands(&self) -> &[Expression] {
        self.node().operands()
    }

    fn output_type(&self) -> SqlType {
        self.node().output_type()
    }

    fn validate(&self) -> bool {
        self.node().validate()
    }

    fn evaluate(
        &self,
        row: &Row,
        window: Option<&Window>,
        env: &Environment,
    ) -> ExpressionResult<TypedValue> {
        self.node().evaluate(row, window, env)
    }
}

fn write_list(f: &mut fmt::Formatter<'_>, items: &[Expression]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", item)?;
    }
    Ok(())
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Literal(lit) => write!(f, "{}", lit.value()),
            Expression::InputRef(r) => write!(f, "${}", r.index),
            Expression::LocalRef(r) => write!(f, "$t{}", r.index),
            Expression::Correlated(r) => write!(f, "{}", r.name),
            Expression::Array(e) => {
                write!(f, "ARRAY[")?;
                write_list(f, e.operands())?;
                write!(f, "]")
            }
            Expression::ArrayItem(e) => match e.operands() {
                [array, index] => write!(f, "{}[{}]", array, index),
                ops => {
                    write!(f, "ITEM(")?;
                    write_list(f, ops)?;
                    write!(f, ")")
                }
            },
            Expression::Cardinality(e) => {
                write!(f, "CARDINALITY(")?;
                write_list(f, e.operands())?;
                write!(f, ")")
            }
            Expression::Reinterpret(e) => {
                write!(f, "REINTERPRET(")?;
                write_list(f, e.operands())?;
                write!(f, " AS {})", e.output_type())
            }
        }
    }
}
