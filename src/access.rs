//! Value layer shared by the expression engine.
//!
//! This module provides:
//!
//! - **SqlType / TypeFamily**: the type catalog and its coarse families
//! - **Value**: runtime payloads (scalars, lists, opaque documents)
//! - **TypedValue**: a payload tagged with the type that describes it
//! - **Row**: the positional input an expression is evaluated against

pub mod row;
pub mod types;
pub mod value;

pub use row::Row;
pub use types::{SqlType, TypeFamily, UnknownSqlType};
pub use value::{TypedValue, Value};
