//! Search domains: conjunctions of `[field, operator, value]` conditions.
//!
//! A domain serializes to the list-of-triples form the record store expects,
//! e.g. `[["start_date", ">=", "2024-01-01"], ["farm_id", "in", [1, 2]]]`.
//! An empty domain matches every record.

use farm_core::RecordId;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Comparison operator of a domain condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operator {
    #[serde(rename = "=")]
    Eq,
    #[serde(rename = "!=")]
    Ne,
    #[serde(rename = ">")]
    Gt,
    #[serde(rename = ">=")]
    Ge,
    #[serde(rename = "<")]
    Lt,
    #[serde(rename = "<=")]
    Le,
    #[serde(rename = "in")]
    In,
    #[serde(rename = "not in")]
    NotIn,
}

impl Operator {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Eq => "=",
            Operator::Ne => "!=",
            Operator::Gt => ">",
            Operator::Ge => ">=",
            Operator::Lt => "<",
            Operator::Le => "<=",
            Operator::In => "in",
            Operator::NotIn => "not in",
        }
    }

    /// Whether the operator takes a list of values.
    pub fn is_set_operator(&self) -> bool {
        matches!(self, Operator::In | Operator::NotIn)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single `[field, operator, value]` predicate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition(pub String, pub Operator, pub Value);

impl Condition {
    pub fn new(field: impl Into<String>, op: Operator, value: impl Into<Value>) -> Self {
        Self(field.into(), op, value.into())
    }

    /// `field in ids`
    pub fn any_of<I>(field: impl Into<String>, ids: I) -> Self
    where
        I: IntoIterator<Item = RecordId>,
    {
        let ids: Vec<Value> = ids.into_iter().map(Value::from).collect();
        Self(field.into(), Operator::In, Value::Array(ids))
    }

    pub fn field(&self) -> &str {
        &self.0
    }

    pub fn op(&self) -> Operator {
        self.1
    }

    pub fn value(&self) -> &Value {
        &self.2
    }
}

/// An implicit AND of conditions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Domain(Vec<Condition>);

impl Domain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`Domain::push`].
    pub fn with(mut self, condition: Condition) -> Self {
        self.0.push(condition);
        self
    }

    pub fn push(&mut self, condition: Condition) {
        self.0.push(condition);
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether any condition constrains `field`.
    pub fn mentions(&self, field: &str) -> bool {
        self.0.iter().any(|c| c.field() == field)
    }
}

impl From<Vec<Condition>> for Domain {
    fn from(conditions: Vec<Condition>) -> Self {
        Self(conditions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn serializes_as_triples() {
        let domain = Domain::new()
            .with(Condition::new("start_date", Operator::Ge, "2024-01-01"))
            .with(Condition::any_of("farm_id", [1, 2]));
        assert_eq!(
            serde_json::to_value(&domain).unwrap(),
            json!([["start_date", ">=", "2024-01-01"], ["farm_id", "in", [1, 2]]])
        );
    }

    #[test]
    fn parses_store_domain() {
        let domain: Domain =
            serde_json::from_value(json!([["operation_type", "=", "irrigation"], ["id", "not in", []]]))
                .unwrap();
        assert_eq!(domain.len(), 2);
        assert_eq!(domain.conditions()[1].op(), Operator::NotIn);
        assert!(domain.mentions("operation_type"));
        assert!(!domain.mentions("farm_id"));
    }

    #[test]
    fn rejects_unknown_operator() {
        assert!(serde_json::from_value::<Domain>(json!([["name", "ilike", "x"]])).is_err());
    }
}
