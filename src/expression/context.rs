//! Collaborators threaded through evaluation untouched.

use crate::access::TypedValue;
use chrono::NaiveDateTime;
use std::collections::HashMap;

/// Window the current row belongs to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Window {
    /// The single window spanning all rows
    Global,
    /// A bounded window, `start` inclusive and `end` exclusive
    Interval {
        start: NaiveDateTime,
        end: NaiveDateTime,
    },
}

/// Session and correlation state visible to leaf expressions
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Environment {
    local_refs: Vec<TypedValue>,
    correlated: HashMap<String, TypedValue>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an environment whose local slots hold the given values
    pub fn with_local_refs(local_refs: Vec<TypedValue>) -> Self {
        Self {
            local_refs,
            correlated: HashMap::new(),
        }
    }

    /// Bind a correlation variable, replacing any previous binding
    pub fn with_correlated(mut self, name: impl Into<String>, value: TypedValue) -> Self {
        self.correlated.insert(name.into(), value);
        self
    }

    pub fn local_ref(&self, index: usize) -> Option<&TypedValue> {
        self.local_refs.get(index)
    }

    pub fn local_ref_count(&self) -> usize {
        self.local_refs.len()
    }

    pub fn correlated(&self, name: &str) -> Option<&TypedValue> {
        self.correlated.get(name)
    }
}
