//! Integer to BIGINT reinterpretation.

use crate::access::{SqlType, TypedValue, Value};
use crate::conversion::{ReinterpretConversion, SourceTypes};
use crate::expression::{ExpressionError, ExpressionResult};

pub const INTEGER_TYPES_TO_BIGINT: &str = "INTEGER_TYPES_TO_BIGINT";

/// TINYINT, SMALLINT, INTEGER, BIGINT -> BIGINT (sign-extending)
pub fn integer_types_to_bigint() -> ReinterpretConversion {
    ReinterpretConversion::new(
        INTEGER_TYPES_TO_BIGINT,
        SourceTypes::Types(SqlType::INT_TYPES.to_vec()),
        SqlType::BigInt,
        convert_integer,
    )
}

fn convert_integer(value: &TypedValue) -> ExpressionResult<TypedValue> {
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
