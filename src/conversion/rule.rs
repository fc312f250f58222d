//! A single reinterpretation rule.

use crate::access::{SqlType, TypeFamily, TypedValue};
use crate::expression::{ExpressionError, ExpressionResult};
use std::fmt;
use std::sync::Arc;

/// Transform applied by a conversion rule
pub type ConvertFn = Arc<dyn Fn(&TypedValue) -> ExpressionResult<TypedValue> + Send + Sync>;

/// Source types a rule accepts
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceTypes {
    /// An explicit set of exact types
    Types(Vec<SqlType>),
    /// Every type of a family
    Family(TypeFamily),
}

impl SourceTypes {
    pub fn accepts(&self, sql_type: SqlType) -> bool {
        match self {
            SourceTypes::Types(types) => types.contains(&sql_type),
            SourceTypes::Family(family) => sql_type.family() == *family,
        }
    }
}

impl fmt::Display for SourceTypes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceTypes::Types(types) => {
                for (i, t) in types.iter().enumerate() {
                    if i > 0 {
                        write!(f, "|")?;
                    }
                    write!(f, "{}", t)?;
                }
                Ok(())
            }
            SourceTypes::Family(family) => write!(f, "{:?} family", family),
        }
    }
}

/// Reinterprets values of the source types as the target type.
///
/// Rules are immutable once built and are cheap to clone; the transform is
/// shared behind an `Arc`.
#[derive(Clone)]
pub struct ReinterpretConversion {
    name: String,
    from: SourceTypes,
    to: SqlType,
    convert: ConvertFn,
}

impl ReinterpretConversion {
    pub fn new<F>(name: impl Into<String>, from: SourceTypes, to: SqlType, convert: F) -> Self
    where
        F: Fn(&TypedValue) -> ExpressionResult<TypedValue> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            from,
            to,
            convert: Arc::new(convert),
        }
    }

    pub fn builder() -> ReinterpretConversionBuilder {
        ReinterpretConversionBuilder::default()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn source(&self) -> &SourceTypes {
        &self.from
    }

    pub fn to(&self) -> SqlType {
        self.to
    }

    /// Whether this rule accepts values of the given type
    pub fn can_convert(&self, from: SqlType) -> bool {
        self.from.accepts(from)
    }

    /// Apply the transform
    pub fn convert(&self, value: &TypedValue) -> ExpressionResult<TypedValue> {
        (self.convert)(value)
    }
}

impl fmt::Debug for ReinterpretConversion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReinterpretConversion")
            .field("name", &self.name)
            .field("from", &self.from)
            .field("to", &self.to)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for ReinterpretConversion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} -> {}", self.name, self.from, self.to)
    }
}

/// Builder for [`ReinterpretConversion`]
#[derive(Default)]
pub struct ReinterpretConversionBuilder {
    name: Option<String>,
    from_types: Vec<SqlType>,
    from_family: Option<TypeFamily>,
    to: Option<SqlType>,
    convert: Option<ConvertFn>,
}

impl ReinterpretConversionBuilder {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn from_type(mut self, sql_type: SqlType) -> Self {
        self.from_types.push(sql_type);
        self
    }

    pub fn from_types(mut self, types: &[SqlType]) -> Self {
        self.from_types.extend_from_slice(types);
        self
    }

    pub fn from_family(mut self, family: TypeFamily) -> Self {
        self.from_family = Some(family);
        self
    }

    pub fn to(mut self, sql_type: SqlType) -> Self {
        self.to = Some(sql_type);
        self
    }

    pub fn convert<F>(mut self, convert: F) -> Self
    where
        F: Fn(&TypedValue) -> ExpressionResult<TypedValue> + Send + Sync + 'static,
    {
        self.convert = Some(Arc::new(convert));
        self
    }

    pub fn build(self) -> ExpressionResult<ReinterpretConversion> {
        let from = match (self.from_family, self.from_types.is_empty()) {
            (Some(family), true) => SourceTypes::Family(family),
            (None, false) => SourceTypes::Types(self.from_types),
            (Some(_), false) => {
                return Err(invalid("source given both as types and as a family"))
            }
            (None, true) => return Err(invalid("no source types")),
        };
        let to = self.to.ok_or_else(|| invalid("no target type"))?;
        let convert = self.convert.ok_or_else(|| invalid("no transform"))?;
        let name = self.name.unwrap_or_else(|| format!("TO_{}", to));

        Ok(ReinterpretConversion {
            name,
            from,
            to,
            convert,
        })
    }
}

fn invalid(reason: &str) -> ExpressionError {
    ExpressionError::InvalidConversion {
        reason: reason.to_string(),
    }
}
