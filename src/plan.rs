//! Serialized expression plans.
//!
//! A plan is the JSON form of an expression tree as a planner would hand it
//! over: every node with its operands and declared types. Loading a plan does
//! not validate it; that happens when it is prepared.

use crate::access::{Row, SqlType, TypedValue};
use crate::conversion::Reinterpreter;
use crate::expression::{
    ArrayItemExpression, CardinalityExpression, Environment, Expression, ExpressionResult,
    PreparedExpression,
};
use anyhow::{Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;

fn bigint() -> SqlType {
    SqlType::BigInt
}

/// JSON description of an expression node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ExpressionPlan {
    Literal {
        value: TypedValue,
    },
    InputRef {
        index: usize,
        #[serde(rename = "type")]
        sql_type: SqlType,
    },
    LocalRef {
        index: usize,
        #[serde(rename = "type")]
        sql_type: SqlType,
    },
    Correlated {
        name: String,
        #[serde(rename = "type")]
        sql_type: SqlType,
    },
    Array {
        operands: Vec<ExpressionPlan>,
    },
    ArrayItem {
        operands: Vec<ExpressionPlan>,
        #[serde(rename = "type")]
        sql_type: SqlType,
    },
    Cardinality {
        operands: Vec<ExpressionPlan>,
    },
    Reinterpret {
        operands: Vec<ExpressionPlan>,
        #[serde(default = "bigint")]
        to: SqlType,
    },
}

impl ExpressionPlan {
    /// Build the expression tree, wiring reinterpretations to `registry`
    pub fn into_expression(self, registry: &Arc<Reinterpreter>) -> Expression {
        let build = |operands: Vec<ExpressionPlan>| {
            operands
                .into_iter()
                .map(|op| op.into_expression(registry))
                .collect::<Vec<_>>()
        };

        match self {
            ExpressionPlan::Literal { value } => Expression::literal(value),
            ExpressionPlan::InputRef { index, sql_type } => Expression::input_ref(index, sql_type),
            ExpressionPlan::LocalRef { index, sql_type } => Expression::local_ref(index, sql_type),
            ExpressionPlan::Correlated { name, sql_type } => {
                Expression::correlated(name, sql_type)
            }
            ExpressionPlan::Array { operands } => Expression::array(build(operands)),
            ExpressionPlan::ArrayItem { operands, sql_type } => {
                Expression::ArrayItem(ArrayItemExpression::new(build(operands), sql_type))
            }
            ExpressionPlan::Cardinality { operands } => {
                Expression::Cardinality(CardinalityExpression::new(build(operands)))
            }
            ExpressionPlan::Reinterpret { operands, to } => {
                Expression::reinterpret_with(build(operands), to, Arc::clone(registry))
            }
        }
    }
}

/// Document read by the `eval` command
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationRequest {
    pub expression: ExpressionPlan,
    #[serde(default)]
    pub rows: Vec<Row>,
    /// Values for the environment's local slots
    #[serde(default)]
    pub locals: Vec<TypedValue>,
}

impl EvaluationRequest {
    /// Validate the plan once and evaluate it for every row.
    ///
    /// A constant expression with no rows is evaluated once against an empty
    /// row.
    pub fn evaluate(self, registry: &Arc<Reinterpreter>) -> ExpressionResult<Vec<TypedValue>> {
        let prepared = PreparedExpression::new(self.expression.into_expression(registry))?;
        debug!(
            "prepared {} with output type {}",
            prepared.expression(),
            prepared.output_type()
        );

        let env = Environment::with_local_refs(self.locals);
        let rows = if self.rows.is_empty() && prepared.expression().is_constant() {
            vec![Row::empty()]
        } else {
            self.rows
        };

        info!("evaluating {} rows", rows.len());
        rows.iter()
            .map(|row| prepared.evaluate(row, None, &env))
            .collect()
    }
}

/// Read an evaluation request from a JSON file
pub fn load_request(path: &Path) -> Result<EvaluationRequest> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read request file {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse request file {}", path.display()))
}
