use std::collections::HashMap;

use sea_orm::Value;
use sea_orm::sea_query::{Alias, Condition, Expr, SimpleExpr};

use crate::query::ENTITY_ALIAS;

/// Translate the `filter` query parameter into a condition on the entity
/// table.
///
/// The parameter is a JSON object; keys outside `allowed` are dropped.
/// Scalars map to equality, arrays to `IN`, an explicit null to `IS NULL`.
/// Columns are qualified with the entity alias because reads join
/// referenced tables that share column names.
#[must_use]
pub fn apply_filters(filter: Option<&str>, allowed: &[&'static str]) -> Condition {
    let mut condition = Condition::all();
    let Some(filter) = filter else {
        return condition;
    };
    let entries: HashMap<String, serde_json::Value> = match serde_json::from_str(filter) {
        Ok(entries) => entries,
        Err(error) => {
            tracing::warn!(%error, "ignoring malformed filter parameter");
            return condition;
        }
    };
    for (key, value) in &entries {
        if !allowed.contains(&key.as_str()) {
            continue;
        }
        if let Some(expr) = filter_expr(key, value) {
            condition = condition.add(expr);
        }
    }
    condition
}

fn entity_column(name: &str) -> Expr {
    Expr::col((Alias::new(ENTITY_ALIAS), Alias::new(name)))
}

fn filter_expr(key: &str, value: &serde_json::Value) -> Option<SimpleExpr> {
    match value {
        serde_json::Value::Number(number) => number
            .as_i64()
            .map(|n| entity_column(key).eq(n))
            .or_else(|| number.as_f64().map(|n| entity_column(key).eq(n))),
        serde_json::Value::String(text) => Some(entity_column(key).eq(text.clone())),
        serde_json::Value::Bool(flag) => Some(entity_column(key).eq(*flag)),
        serde_json::Value::Null => Some(entity_column(key).is_null()),
        serde_json::Value::Array(items) => {
            let values: Vec<Value> = items
                .iter()
                .filter_map(|item| match item {
                    serde_json::Value::Number(n) => n.as_i64().map(Value::from),
                    serde_json::Value::String(s) => Some(Value::from(s.clone())),
                    _ => None,
                })
                .collect();
            if values.is_empty() {
                None
            } else {
                Some(entity_column(key).is_in(values))
            }
        }
        serde_json::Value::Object(_) => None,
    }
}
