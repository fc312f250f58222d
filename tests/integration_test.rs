use chrono::{NaiveDate, NaiveTime};
use rand::{rngs::StdRng, Rng, SeedableRng};
use rowexpr::access::{Row, SqlType, TypedValue, Value};
use rowexpr::conversion::{Reinterpreter, ReinterpretConversion, SourceTypes};
use rowexpr::expression::{
    Environment, Expression, ExpressionError, PreparedExpression, ReinterpretExpression,
    ScalarExpression, Window,
};
use std::collections::HashSet;
use std::sync::Arc;
use std::thread;

fn epoch() -> NaiveDate {
    NaiveDate::from_ymd_opt(1970, 1, 1).unwrap()
}

#[test]
fn test_concurrent_evaluation_of_one_tree() {
    let prepared = Arc::new(
        PreparedExpression::new(Expression::array(vec![
            Expression::reinterpret(Expression::input_ref(0, SqlType::Date)),
            Expression::reinterpret(Expression::input_ref(1, SqlType::Integer)),
        ]))
        .unwrap(),
    );

    let handles: Vec<_> = (0..8)
        .map(|worker| {
            let prepared = Arc::clone(&prepared);
            thread::spawn(move || {
                let env = Environment::new();
                for i in 0..200i64 {
                    let days = worker * 1000 + i;
                    let row = Row::new(vec![
                        Value::Date(epoch() + chrono::Duration::days(days)),
                        Value::Integer(days as i32),
                    ]);
                    let value = prepared.evaluate(&row, None, &env).unwrap();
                    assert_eq!(
                        value,
                        TypedValue::array(vec![
                            TypedValue::bigint(days * 86_400_000),
                            TypedValue::bigint(days),
                        ])
                    );
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
}

#[test]
fn test_homogeneity_decides_array_validity() {
    let candidates = [
        SqlType::Integer,
        SqlType::BigInt,
        SqlType::Varchar,
        SqlType::Date,
        SqlType::Boolean,
    ];
    let mut rng = StdRng::seed_from_u64(2024);

    for _ in 0..300 {
        let len = rng.gen_range(1..6);
        let types: Vec<SqlType> = (0..len)
            .map(|_| candidates[rng.gen_range(0..candidates.len())])
            .collect();
        let operands = types
            .iter()
            .enumerate()
            .map(|(i, t)| Expression::input_ref(i, *t))
            .collect();
        let expr = Expression::array(operands);

        let distinct: HashSet<_> = types.iter().collect();
        assert_eq!(expr.validate(), distinct.len() == 1, "{:?}", types);
    }
}

#[test]
fn test_array_keeps_length_and_order() {
    let values = [3, 1, 2, 3, 3];
    let row = Row::new(values.iter().map(|v| Value::Integer(*v)).collect());
    let expr = Expression::array(
        (0..values.len())
            .map(|i| Expression::input_ref(i, SqlType::Integer))
            .collect(),
    );
    let prepared = PreparedExpression::new(expr).unwrap();

    let result = prepared
        .evaluate(&row, Some(&Window::Global), &Environment::new())
        .unwrap();
    let items: Vec<_> = result.as_array().unwrap().iter().map(|v| v.as_i32()).collect();
    assert_eq!(items, vec![Some(3), Some(1), Some(2), Some(3), Some(3)]);
}

#[test]
fn test_reinterpret_gating_over_the_catalog() {
    let registry = Reinterpreter::standard();

    for t in SqlType::ALL {
        let expr = ReinterpretExpression::to_bigint(Expression::input_ref(0, *t));
        let expected = t.is_interval() || registry.can_convert(*t, SqlType::BigInt);
        assert_eq!(expr.validate(), expected, "{}", t);
    }

    for t in SqlType::ALL {
        let registered = t.is_integer() || t.is_datetime();
        assert_eq!(registry.can_convert(*t, SqlType::BigInt), registered, "{}", t);
    }
}

#[test]
fn test_reinterpret_arity_regardless_of_types() {
    for t in SqlType::ALL {
        let none = ReinterpretExpression::new(vec![], SqlType::BigInt);
        let two = ReinterpretExpression::new(
            vec![Expression::input_ref(0, *t), Expression::input_ref(1, *t)],
            SqlType::BigInt,
        );
        assert!(!none.validate());
        assert!(!two.validate(), "{}", t);
    }
}

#[test]
fn test_custom_registry_priority() {
    let first = ReinterpretConversion::builder()
        .name("TIME_AS_SECONDS")
        .from_type(SqlType::Time)
        .to(SqlType::BigInt)
        .convert(|v| {
            Ok(match v.value() {
                Value::Time(t) => TypedValue::bigint(
                    i64::from(chrono::Timelike::num_seconds_from_midnight(t)),
                ),
                _ => TypedValue::null(SqlType::BigInt),
            })
        })
        .build()
        .unwrap();

    let registry = Arc::new(
        Reinterpreter::builder()
            .with_conversion(first)
            .with_conversion(rowexpr::conversion::datetime::time_to_bigint())
            .build(),
    );

    let time = TypedValue::time(NaiveTime::from_hms_opt(0, 1, 0).unwrap());
    let expr = Expression::reinterpret_with(
        vec![Expression::literal(time.clone())],
        SqlType::BigInt,
        Arc::clone(&registry),
    );
    let prepared = PreparedExpression::new(expr).unwrap();
    assert_eq!(
        prepared
            .evaluate(&Row::empty(), None, &Environment::new())
            .unwrap(),
        TypedValue::bigint(60)
    );

    // The standard registry still answers in milliseconds
    assert_eq!(
        Reinterpreter::standard()
            .convert(SqlType::BigInt, &time)
            .unwrap(),
        TypedValue::bigint(60_000)
    );
}

#[test]
fn test_family_rule_in_custom_registry() {
    let registry = Arc::new(
        Reinterpreter::builder()
            .with_conversion(ReinterpretConversion::new(
                "DAY_TIME_TO_SECONDS",
                SourceTypes::Family(rowexpr::access::TypeFamily::IntervalDayTime),
                SqlType::Integer,
                |v| {
                    Ok(match v.value().as_integral() {
                        Some(ms) => TypedValue::integer((ms / 1000) as i32),
                        None => TypedValue::null(SqlType::Integer),
                    })
                },
            ))
            .build(),
    );

    let expr = Expression::reinterpret_with(
        vec![Expression::input_ref(0, SqlType::IntervalMinuteSecond)],
        SqlType::Integer,
        registry,
    );
    let prepared = PreparedExpression::new(expr).unwrap();
    let row = Row::new(vec![Value::BigInt(125_000)]);
    assert_eq!(
        prepared.evaluate(&row, None, &Environment::new()).unwrap(),
        TypedValue::integer(125)
    );
}

#[test]
fn test_errors_surface_from_deep_operands() {
    let prepared = PreparedExpression::new(Expression::cardinality(Expression::array(vec![
        Expression::reinterpret(Expression::local_ref(2, SqlType::Timestamp)),
    ])))
    .unwrap();

    let env = Environment::with_local_refs(vec![TypedValue::bigint(1)]);
    assert_eq!(
        prepared.evaluate(&Row::empty(), None, &env),
        Err(ExpressionError::LocalRefOutOfBounds {
            index: 2,
            available: 1
        })
    );
}
