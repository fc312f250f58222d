use crate::access::SqlType;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Runtime payload of a typed value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Null,
    Boolean(bool),
    TinyInt(i8),
    SmallInt(i16),
    Integer(i32),
    BigInt(i64),
    Float(f32),
    Double(f64),
    String(String),
    Date(NaiveDate),
    Time(NaiveTime),
    Timestamp(NaiveDateTime),
    Array(Vec<TypedValue>),
    /// Opaque document the engine carries but never inspects
    Object(serde_json::Value),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Widen any exact integer payload to i64
    pub fn as_integral(&self) -> Option<i64> {
        match self {
            Value::TinyInt(v) => Some(i64::from(*v)),
            Value::SmallInt(v) => Some(i64::from(*v)),
            Value::Integer(v) => Some(i64::from(*v)),
            Value::BigInt(v) => Some(*v),
            _ => None,
        }
    }

    /// Name of the payload shape, used in error messages
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "Null",
            Value::Boolean(_) => "Boolean",
            Value::TinyInt(_) => "TinyInt",
            Value::SmallInt(_) => "SmallInt",
            Value::Integer(_) => "Integer",
            Value::BigInt(_) => "BigInt",
            Value::Float(_) => "Float",
            Value::Double(_) => "Double",
            Value::String(_) => "String",
            Value::Date(_) => "Date",
            Value::Time(_) => "Time",
            Value::Timestamp(_) => "Timestamp",
            Value::Array(_) => "Array",
            Value::Object(_) => "Object",
        }
    }

    /// Check if this payload can be described by the given type tag
    pub fn is_compatible_with(&self, sql_type: SqlType) -> bool {
        match (self, sql_type) {
            (Value::Null, _) => true, // NULL is compatible with any type
            (_, SqlType::Any) => true,
            (Value::Boolean(_), SqlType::Boolean) => true,
            (Value::TinyInt(_), SqlType::TinyInt) => true,
            (Value::SmallInt(_), SqlType::SmallInt) => true,
            (Value::Integer(_), SqlType::Integer) => true,
            (Value::BigInt(_), SqlType::BigInt) => true,
            // Intervals arrive normalized to a BIGINT count
            (Value::BigInt(_), t) if t.is_interval() => true,
            (Value::Float(_), SqlType::Float) => true,
            (Value::Double(_), SqlType::Double) => true,
            (Value::String(_), SqlType::Char | SqlType::Varchar) => true,
            (Value::Date(_), SqlType::Date) => true,
            (Value::Time(_), SqlType::Time) => true,
            (Value::Timestamp(_), SqlType::Timestamp) => true,
            (Value::Array(_), SqlType::Array) => true,
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "NULL"),
            Value::Boolean(v) => write!(f, "{}", v),
            Value::TinyInt(v) => write!(f, "{}", v),
            Value::SmallInt(v) => write!(f, "{}", v),
            Value::Integer(v) => write!(f, "{}", v),
            Value::BigInt(v) => write!(f, "{}", v),
            Value::Float(v) => write!(f, "{}", v),
            Value::Double(v) => write!(f, "{}", v),
            Value::String(v) => write!(f, "'{}'", v),
            Value::Date(v) => write!(f, "{}", v),
            Value::Time(v) => write!(f, "{}", v),
            Value::Timestamp(v) => write!(f, "{}", v),
            Value::Array(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item.value)?;
                }
                write!(f, "]")
            }
            Value::Object(v) => write!(f, "{}", v),
        }
    }
}

/// A payload tagged with the SQL type that describes it.
///
/// This is the currency passed between expression nodes. Construction never
/// fails: the tag is trusted, since operand types were validated when the
/// expression tree was checked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypedValue {
    sql_type: SqlType,
    value: Value,
}

impl TypedValue {
    pub fn of(sql_type: SqlType, value: Value) -> Self {
        Self { sql_type, value }
    }

    /// A NULL of the given type
    pub fn null(sql_type: SqlType) -> Self {
        Self::of(sql_type, Value::Null)
    }

    pub fn boolean(v: bool) -> Self {
        Self::of(SqlType::Boolean, Value::Boolean(v))
    }

    pub fn integer(v: i32) -> Self {
        Self::of(SqlType::Integer, Value::Integer(v))
    }

    pub fn bigint(v: i64) -> Self {
        Self::of(SqlType::BigInt, Value::BigInt(v))
    }

    pub fn varchar(v: impl Into<String>) -> Self {
        Self::of(SqlType::Varchar, Value::String(v.into()))
    }

    pub fn date(v: NaiveDate) -> Self {
        Self::of(SqlType::Date, Value::Date(v))
    }

    pub fn time(v: NaiveTime) -> Self {
        Self::of(SqlType::Time, Value::Time(v))
    }

    pub fn timestamp(v: NaiveDateTime) -> Self {
        Self::of(SqlType::Timestamp, Value::Timestamp(v))
    }

    pub fn array(items: Vec<TypedValue>) -> Self {
        Self::of(SqlType::Array, Value::Array(items))
    }

    pub fn sql_type(&self) -> SqlType {
        self.sql_type
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn into_value(self) -> Value {
        self.value
    }

    pub fn is_null(&self) -> bool {
        self.value.is_null()
    }

    /// Whether the payload shape matches the type tag
    pub fn conforms(&self) -> bool {
        self.value.is_compatible_with(self.sql_type)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self.value {
            Value::Boolean(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_i32(&self) -> Option<i32> {
        match self.value {
            Value::Integer(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self.value {
            Value::BigInt(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self.value {
            Value::Double(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match &self.value {
            Value::String(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<NaiveDate> {
        match self.value {
            Value::Date(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_time(&self) -> Option<NaiveTime> {
        match self.value {
            Value::Time(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_timestamp(&self) -> Option<NaiveDateTime> {
        match self.value {
            Value::Timestamp(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[TypedValue]> {
        match &self.value {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }
}

impl fmt::Display for TypedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.value, self.sql_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_compatibility() {
        assert!(Value::Null.is_compatible_with(SqlType::Integer));
        assert!(Value::Boolean(true).is_compatible_with(SqlType::Boolean));
        assert!(Value::Integer(42).is_compatible_with(SqlType::Integer));
        assert!(Value::String("hello".to_string()).is_compatible_with(SqlType::Varchar));
        assert!(Value::String("h".to_string()).is_compatible_with(SqlType::Char));
        assert!(Value::BigInt(3_600_000).is_compatible_with(SqlType::IntervalHour));
        assert!(Value::Object(serde_json::json!({"k": 1})).is_compatible_with(SqlType::Any));

        assert!(!Value::Boolean(true).is_compatible_with(SqlType::Integer));
        assert!(!Value::Integer(42).is_compatible_with(SqlType::BigInt));
        assert!(!Value::Integer(42).is_compatible_with(SqlType::IntervalDay));
        assert!(!Value::Object(serde_json::json!(1)).is_compatible_with(SqlType::Integer));
    }

    #[test]
    fn test_integral_widening() {
        assert_eq!(Value::TinyInt(-3).as_integral(), Some(-3));
        assert_eq!(Value::SmallInt(300).as_integral(), Some(300));
        assert_eq!(Value::Integer(i32::MIN).as_integral(), Some(i64::from(i32::MIN)));
        assert_eq!(Value::BigInt(i64::MAX).as_integral(), Some(i64::MAX));
        assert_eq!(Value::Double(1.0).as_integral(), None);
        assert_eq!(Value::Null.as_integral(), None);
    }

    #[test]
    fn test_typed_value_accessors() {
        let v = TypedValue::integer(7);
        assert_eq!(v.sql_type(), SqlType::Integer);
        assert_eq!(v.as_i32(), Some(7));
        assert_eq!(v.as_i64(), None);
        assert!(v.conforms());

        let date = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        let v = TypedValue::date(date);
        assert_eq!(v.as_date(), Some(date));

        // Construction trusts the tag even when it is wrong
        let lying = TypedValue::of(SqlType::Date, Value::Integer(1));
        assert_eq!(lying.sql_type(), SqlType::Date);
        assert!(!lying.conforms());

        let null = TypedValue::null(SqlType::Timestamp);
        assert!(null.is_null());
        assert!(null.conforms());
    }

    #[test]
    fn test_display() {
        assert_eq!(TypedValue::integer(42).to_string(), "42:INTEGER");
        assert_eq!(TypedValue::varchar("a").to_string(), "'a':VARCHAR");
        assert_eq!(TypedValue::null(SqlType::BigInt).to_string(), "NULL:BIGINT");

        let arr = TypedValue::array(vec![TypedValue::integer(1), TypedValue::integer(2)]);
        assert_eq!(arr.to_string(), "[1, 2]:ARRAY");
    }

    #[test]
    fn test_json_shape() {
        let v = TypedValue::array(vec![TypedValue::date(
            NaiveDate::from_ymd_opt(2020, 1, 2).unwrap(),
        )]);
        let json = serde_json::to_value(&v).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "sql_type": "ARRAY",
                "value": {"Array": [{"sql_type": "DATE", "value": {"Date": "2020-01-02"}}]}
            })
        );
        let back: TypedValue = serde_json::from_value(json).unwrap();
        assert_eq!(back, v);
    }
}
