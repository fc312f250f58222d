//! Ordered registry of reinterpretation rules.

use crate::access::{SqlType, TypedValue};
use crate::conversion::{datetime, integer, ReinterpretConversion};
use crate::expression::{ExpressionError, ExpressionResult};
use log::{debug, trace};
use std::sync::{Arc, LazyLock};

static STANDARD: LazyLock<Arc<Reinterpreter>> = LazyLock::new(|| {
    Arc::new(
        Reinterpreter::builder()
            .with_conversion(datetime::time_to_bigint())
            .with_conversion(datetime::date_types_to_bigint())
            .with_conversion(integer::integer_types_to_bigint())
            .build(),
    )
});

/// Frozen, ordered list of reinterpretation rules.
///
/// Lookups scan the rules in registration order and the first rule that
/// accepts the source type for the requested target wins, so registration
/// order is the priority order.
#[derive(Debug, Clone)]
pub struct Reinterpreter {
    conversions: Vec<ReinterpretConversion>,
}

impl Reinterpreter {
    pub fn builder() -> ReinterpreterBuilder {
        ReinterpreterBuilder::default()
    }

    /// The process-wide registry with the built-in conversions:
    /// TIME, then DATE/TIMESTAMP, then the integer types, all to BIGINT
    pub fn standard() -> Arc<Reinterpreter> {
        Arc::clone(&STANDARD)
    }

    pub fn can_convert(&self, from: SqlType, to: SqlType) -> bool {
        self.find(from, to).is_some()
    }

    /// Reinterpret `value` as `to` using the first matching rule.
    ///
    /// Callers are expected to have checked `can_convert` for the value's type
    /// beforehand; an unsupported pair is reported rather than guessed at.
    pub fn convert(&self, to: SqlType, value: &TypedValue) -> ExpressionResult<TypedValue> {
        let from = value.sql_type();
        match self.find(from, to) {
            Some(conversion) => {
                trace!("reinterpreting {} via {}", value, conversion.name());
                conversion.convert(value)
            }
            None => Err(ExpressionError::UnsupportedConversion { from, to }),
        }
    }

    pub fn conversions(&self) -> &[ReinterpretConversion] {
        &self.conversions
    }

    pub fn len(&self) -> usize {
        self.conversions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conversions.is_empty()
    }

    fn find(&self, from: SqlType, to: SqlType) -> Option<&ReinterpretConversion> {
        self.conversions
            .iter()
            .find(|c| c.to() == to && c.can_convert(from))
    }
}

/// Accumulates rules in registration order
#[derive(Debug, Default)]
pub struct ReinterpreterBuilder {
    conversions: Vec<ReinterpretConversion>,
}

impl ReinterpreterBuilder {
    pub fn with_conversion(mut self, conversion: ReinterpretConversion) -> Self {
        self.conversions.push(conversion);
        self
    }

    pub fn build(self) -> Reinterpreter {
        debug!(
            "built reinterpreter with {} conversions",
            self.conversions.len()
        );
        Reinterpreter {
            conversions: self.conversions,
        }
    }
}
