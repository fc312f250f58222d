use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// SQL type tags understood by the expression engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SqlType {
    Boolean,
    #[serde(rename = "TINYINT")]
    TinyInt,
    #[serde(rename = "SMALLINT")]
    SmallInt,
    Integer,
    #[serde(rename = "BIGINT")]
    BigInt,
    Float,
    Double,
    Char,
    Varchar,
    Date,
    Time,
    Timestamp,
    IntervalYear,
    IntervalYearMonth,
    IntervalMonth,
    IntervalDay,
    IntervalDayHour,
    IntervalDayMinute,
    IntervalDaySecond,
    IntervalHour,
    IntervalHourMinute,
    IntervalHourSecond,
    IntervalMinute,
    IntervalMinuteSecond,
    IntervalSecond,
    Array,
    Any,
}

/// Coarse classification of related types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TypeFamily {
    Boolean,
    Numeric,
    Character,
    Date,
    Time,
    Timestamp,
    IntervalYearMonth,
    IntervalDayTime,
    Array,
    Any,
}

impl SqlType {
    /// Exact integer types
    pub const INT_TYPES: &'static [SqlType] = &[
        SqlType::TinyInt,
        SqlType::SmallInt,
        SqlType::Integer,
        SqlType::BigInt,
    ];

    /// Date, time and timestamp types
    pub const DATETIME_TYPES: &'static [SqlType] =
        &[SqlType::Date, SqlType::Time, SqlType::Timestamp];

    /// Every tag in the catalog, in declaration order
    pub const ALL: &'static [SqlType] = &[
        SqlType::Boolean,
        SqlType::TinyInt,
        SqlType::SmallInt,
        SqlType::Integer,
        SqlType::BigInt,
        SqlType::Float,
        SqlType::Double,
        SqlType::Char,
        SqlType::Varchar,
        SqlType::Date,
        SqlType::Time,
        SqlType::Timestamp,
        SqlType::IntervalYear,
        SqlType::IntervalYearMonth,
        SqlType::IntervalMonth,
        SqlType::IntervalDay,
        SqlType::IntervalDayHour,
        SqlType::IntervalDayMinute,
        SqlType::IntervalDaySecond,
        SqlType::IntervalHour,
        SqlType::IntervalHourMinute,
        SqlType::IntervalHourSecond,
        SqlType::IntervalMinute,
        SqlType::IntervalMinuteSecond,
        SqlType::IntervalSecond,
        SqlType::Array,
        SqlType::Any,
    ];

    /// Get the family this type belongs to
    pub fn family(&self) -> TypeFamily {
        match self {
            SqlType::Boolean => TypeFamily::Boolean,
            SqlType::TinyInt
            | SqlType::SmallInt
            | SqlType::Integer
            | SqlType::BigInt
            | SqlType::Float
            | SqlType::Double => TypeFamily::Numeric,
            SqlType::Char | SqlType::Varchar => TypeFamily::Character,
            SqlType::Date => TypeFamily::Date,
            SqlType::Time => TypeFamily::Time,
            SqlType::Timestamp => TypeFamily::Timestamp,
            SqlType::IntervalYear | SqlType::IntervalYearMonth | SqlType::IntervalMonth => {
                TypeFamily::IntervalYearMonth
            }
            SqlType::IntervalDay
            | SqlType::IntervalDayHour
            | SqlType::IntervalDayMinute
            | SqlType::IntervalDaySecond
            | SqlType::IntervalHour
            | SqlType::IntervalHourMinute
            | SqlType::IntervalHourSecond
            | SqlType::IntervalMinute
            | SqlType::IntervalMinuteSecond
            | SqlType::IntervalSecond => TypeFamily::IntervalDayTime,
            SqlType::Array => TypeFamily::Array,
            SqlType::Any => TypeFamily::Any,
        }
    }

    pub fn is_integer(&self) -> bool {
        Self::INT_TYPES.contains(self)
    }

    pub fn is_datetime(&self) -> bool {
        Self::DATETIME_TYPES.contains(self)
    }

    pub fn is_interval(&self) -> bool {
        self.family().is_interval()
    }

    /// SQL name of the type
    pub fn as_str(&self) -> &'static str {
        match self {
            SqlType::Boolean => "BOOLEAN",
            SqlType::TinyInt => "TINYINT",
            SqlType::SmallInt => "SMALLINT",
            SqlType::Integer => "INTEGER",
            SqlType::BigInt => "BIGINT",
            SqlType::Float => "FLOAT",
            SqlType::Double => "DOUBLE",
            SqlType::Char => "CHAR",
            SqlType::Varchar => "VARCHAR",
            SqlType::Date => "DATE",
            SqlType::Time => "TIME",
            SqlType::Timestamp => "TIMESTAMP",
            SqlType::IntervalYear => "INTERVAL_YEAR",
            SqlType::IntervalYearMonth => "INTERVAL_YEAR_MONTH",
            SqlType::IntervalMonth => "INTERVAL_MONTH",
            SqlType::IntervalDay => "INTERVAL_DAY",
            SqlType::IntervalDayHour => "INTERVAL_DAY_HOUR",
            SqlType::IntervalDayMinute => "INTERVAL_DAY_MINUTE",
            SqlType::IntervalDaySecond => "INTERVAL_DAY_SECOND",
            SqlType::IntervalHour => "INTERVAL_HOUR",
            SqlType::IntervalHourMinute => "INTERVAL_HOUR_MINUTE",
            SqlType::IntervalHourSecond => "INTERVAL_HOUR_SECOND",
            SqlType::IntervalMinute => "INTERVAL_MINUTE",
            SqlType::IntervalMinuteSecond => "INTERVAL_MINUTE_SECOND",
            SqlType::IntervalSecond => "INTERVAL_SECOND",
            SqlType::Array => "ARRAY",
            SqlType::Any => "ANY",
        }
    }
}

impl fmt::Display for SqlType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a type name is not in the catalog
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown SQL type: {0}")]
pub struct UnknownSqlType(pub String);

impl FromStr for SqlType {
    type Err = UnknownSqlType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        SqlType::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == upper)
            .ok_or(UnknownSqlType(s.to_string()))
    }
}

impl TypeFamily {
    pub fn is_interval(&self) -> bool {
        matches!(
            self,
            TypeFamily::IntervalYearMonth | TypeFamily::IntervalDayTime
        )
    }
}
