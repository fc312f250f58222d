//! Datetime to BIGINT reinterpretations.
//!
//! Dates and timestamps become milliseconds since the Unix epoch (a date is
//! taken at midnight UTC). Times become milliseconds since midnight.

use crate::access::{SqlType, TypedValue, Value};
use crate::conversion::{ReinterpretConversion, SourceTypes};
use crate::expression::{ExpressionError, ExpressionResult};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};

pub const TIME_TO_BIGINT: &str = "TIME_TO_BIGINT";
pub const DATE_TYPES_TO_BIGINT: &str = "DATE_TYPES_TO_BIGINT";

const MILLIS_PER_SECOND: i64 = 1_000;
const NANOS_PER_MILLI: u32 = 1_000_000;

/// TIME -> BIGINT
pub fn time_to_bigint() -> ReinterpretConversion {
    ReinterpretConversion::new(
        TIME_TO_BIGINT,
        SourceTypes::Types(vec![SqlType::Time]),
        SqlType::BigInt,
        convert_time,
    )
}

/// DATE, TIMESTAMP -> BIGINT
pub fn date_types_to_bigint() -> ReinterpretConversion {
    ReinterpretConversion::new(
        DATE_TYPES_TO_BIGINT,
        SourceTypes::Types(vec![SqlType::Date, SqlType::Timestamp]),
        SqlType::BigInt,
        convert_date,
    )
}

fn convert_time(value: &TypedValue) -> ExpressionResult<TypedValue> {
    match value.value() {
        Value::Null => Ok(TypedValue::null(SqlType::BigInt)),
        Value::Time(t) => Ok(TypedValue::bigint(millis_of_day(t))),
        other => Err(ExpressionError::PayloadMismatch {
            expected: value.sql_type(),
            actual: other.kind(),
        }),
    }
}

fn convert_date(value: &TypedValue) -> ExpressionResult<TypedValue> {
    match value.value() {
        Value::Null => Ok(TypedValue::null(SqlType::BigInt)),
        Value::Date(d) => Ok(TypedValue::bigint(date_millis(d))),
        Value::Timestamp(ts) => Ok(TypedValue::bigint(timestamp_millis(ts))),
        other => Err(ExpressionError::PayloadMismatch {
            expected: value.sql_type(),
            actual: other.kind(),
        }),
    }
}

pub fn millis_of_day(time: &NaiveTime) -> i64 {
    // nanosecond() exceeds one second during a leap second; keep the overflow
    i64::from(time.num_seconds_from_midnight()) * MILLIS_PER_SECOND
        + i64::from(time.nanosecond() / NANOS_PER_MILLI)
}

pub fn date_millis(date: &NaiveDate) -> i64 {
    date.and_time(NaiveTime::MIN).and_utc().timestamp_millis()
}

pub fn timestamp_millis(ts: &NaiveDateTime) -> i64 {
    ts.and_utc().timestamp_millis()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    const MILLIS_PER_DAY: i64 = 86_400_000;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_time_to_bigint() {
        let conv = time_to_bigint();
        assert!(conv.can_convert(SqlType::Time));
        assert!(!conv.can_convert(SqlType::Date));

        let t = NaiveTime::from_hms_milli_opt(1, 2, 3, 4).unwrap();
        assert_eq!(
            conv.convert(&TypedValue::time(t)).unwrap(),
            TypedValue::bigint(3_723_004)
        );
        assert_eq!(
            conv.convert(&TypedValue::time(NaiveTime::MIN)).unwrap(),
            TypedValue::bigint(0)
        );
    }

    #[test]
    fn test_date_types_to_bigint() {
        let conv = date_types_to_bigint();
        assert!(conv.can_convert(SqlType::Date));
        assert!(conv.can_convert(SqlType::Timestamp));
        assert!(!conv.can_convert(SqlType::Time));

        assert_eq!(
            conv.convert(&TypedValue::date(date(1970, 1, 2))).unwrap(),
            TypedValue::bigint(MILLIS_PER_DAY)
        );
        assert_eq!(
            conv.convert(&TypedValue::date(date(1969, 12, 31))).unwrap(),
            TypedValue::bigint(-MILLIS_PER_DAY)
        );

        let ts = date(2000, 1, 1).and_hms_milli_opt(0, 0, 1, 500).unwrap();
        assert_eq!(
            conv.convert(&TypedValue::timestamp(ts)).unwrap(),
            TypedValue::bigint(946_684_801_500)
        );
    }

    #[test]
    fn test_null_becomes_bigint_null() {
        assert_eq!(
            time_to_bigint()
                .convert(&TypedValue::null(SqlType::Time))
                .unwrap(),
            TypedValue::null(SqlType::BigInt)
        );
        assert_eq!(
            date_types_to_bigint()
                .convert(&TypedValue::null(SqlType::Date))
                .unwrap(),
            TypedValue::null(SqlType::BigInt)
        );
    }

    #[test]
    fn test_payload_mismatch() {
        let bogus = TypedValue::of(SqlType::Date, Value::String("2020-01-01".to_string()));
        assert_eq!(
            date_types_to_bigint().convert(&bogus),
            Err(ExpressionError::PayloadMismatch {
                expected: SqlType::Date,
                actual: "String",
            })
        );
    }

    #[test]
    fn test_random_dates_are_whole_days() {
        let mut rng = StdRng::seed_from_u64(42);
        let epoch = date(1970, 1, 1);
        let conv = date_types_to_bigint();

        for _ in 0..500 {
            let days: i64 = rng.gen_range(-200_000..200_000);
            let d = epoch + chrono::Duration::days(days);
            let out = conv.convert(&TypedValue::date(d)).unwrap();
            assert_eq!(out.as_i64(), Some(days * MILLIS_PER_DAY));
        }
    }
}
