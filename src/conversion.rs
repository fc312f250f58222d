//! Reinterpretation conversions.
//!
//! A reinterpretation reads the existing representation of a value as a
//! different logical type (a date's epoch offset as a BIGINT, say) instead of
//! performing a value-preserving cast. Rules are declared once, collected in
//! registration order into a [`Reinterpreter`], and shared read-only by every
//! expression that needs them.

pub mod datetime;
pub mod integer;
pub mod registry;
pub mod rule;

pub use registry::{Reinterpreter, ReinterpreterBuilder};
pub use rule::{ConvertFn, ReinterpretConversion, ReinterpretConversionBuilder, SourceTypes};
