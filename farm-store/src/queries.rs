//! The SQLite implementation of [`RecordStore`].
//!
//! Entities map onto tables through a small static catalog. Reference fields
//! are selected together with the referenced row's `name`, so every record
//! leaves the store in the same shape the remote store produces: references
//! as `[id, "name"]`, NULLs as `false`.
//!
//! Domain conditions may follow one reference with a dotted path, e.g.
//! `project_id.farm_id`, which compares the field of the referenced record.

use crate::domain::{Condition, Domain, Operator};
use crate::error::{Result, StoreError};
use crate::store::{Record, RecordStore};
use crate::Database;
use async_trait::async_trait;
use farm_core::entity;
use rusqlite::types::Value as SqlValue;
use serde_json::{json, Value};

#[derive(Debug, Clone, Copy, PartialEq)]
enum FieldKind {
    Integer,
    Real,
    Text,
    /// Reference to the `id` of the named table.
    Many2one(&'static str),
}

struct FieldDef {
    name: &'static str,
    kind: FieldKind,
}

const fn field(name: &'static str, kind: FieldKind) -> FieldDef {
    FieldDef { name, kind }
}

struct EntityDef {
    entity: &'static str,
    table: &'static str,
    fields: &'static [FieldDef],
}

const NAMED_FIELDS: &[FieldDef] = &[field("name", FieldKind::Text)];

const FARM_FIELDS: &[FieldDef] = &[field("name", FieldKind::Text), field("area", FieldKind::Real)];

const PROJECT_FIELDS: &[FieldDef] = &[
    field("name", FieldKind::Text),
    field("farm_id", FieldKind::Many2one("farms")),
    field("crop_id", FieldKind::Many2one("crops")),
    field("field_area", FieldKind::Real),
    field("budget", FieldKind::Real),
    field("actual_cost", FieldKind::Real),
    field("revenue", FieldKind::Real),
    field("profit", FieldKind::Real),
    field("planned_yield", FieldKind::Real),
    field("actual_yield", FieldKind::Real),
    field("yield_quality", FieldKind::Text),
    field("state", FieldKind::Text),
    field("start_date", FieldKind::Text),
];

const COST_FIELDS: &[FieldDef] = &[
    field("project_id", FieldKind::Many2one("projects")),
    field("cost_type", FieldKind::Text),
    field("cost_amount", FieldKind::Real),
    field("date", FieldKind::Text),
];

const REPORT_FIELDS: &[FieldDef] = &[
    field("name", FieldKind::Text),
    field("project_id", FieldKind::Many2one("projects")),
    field("operation_type", FieldKind::Text),
    field("date", FieldKind::Text),
    field("irrigation_duration", FieldKind::Real),
];

const LINE_FIELDS: &[FieldDef] = &[
    field("report_id", FieldKind::Many2one("daily_reports")),
    field("product_id", FieldKind::Many2one("products")),
    field("quantity", FieldKind::Real),
];

const ID_FIELD: FieldDef = field("id", FieldKind::Integer);

const CATALOG: &[EntityDef] = &[
    EntityDef {
        entity: entity::FARM,
        table: "farms",
        fields: FARM_FIELDS,
    },
    EntityDef {
        entity: entity::CROP,
        table: "crops",
        fields: NAMED_FIELDS,
    },
    EntityDef {
        entity: entity::PRODUCT,
        table: "products",
        fields: NAMED_FIELDS,
    },
    EntityDef {
        entity: entity::PROJECT,
        table: "projects",
        fields: PROJECT_FIELDS,
    },
    EntityDef {
        entity: entity::COST_ENTRY,
        table: "cost_entries",
        fields: COST_FIELDS,
    },
    EntityDef {
        entity: entity::DAILY_REPORT,
        table: "daily_reports",
        fields: REPORT_FIELDS,
    },
    EntityDef {
        entity: entity::REPORT_LINE,
        table: "report_lines",
        fields: LINE_FIELDS,
    },
];

fn entity_def(name: &str) -> Result<&'static EntityDef> {
    CATALOG
        .iter()
        .find(|def| def.entity == name)
        .ok_or_else(|| StoreError::UnknownEntity(name.to_string()))
}

impl EntityDef {
    fn lookup(&self, name: &str) -> Result<&FieldDef> {
        if name == "id" {
            return Ok(&ID_FIELD);
        }
        self.fields
            .iter()
            .find(|f| f.name == name)
            .ok_or_else(|| StoreError::UnknownField {
                entity: self.entity.to_string(),
                field: name.to_string(),
            })
    }

    /// SQL expression for a condition field over table alias `t`. A dotted
    /// path reads the field of the record a reference points at.
    fn column(&self, path: &str) -> Result<String> {
        let Some((head, tail)) = path.split_once('.') else {
            return Ok(format!("t.{}", self.lookup(path)?.name));
        };
        let reference = self.lookup(head)?;
        let target = match reference.kind {
            FieldKind::Many2one(table) => CATALOG.iter().find(|def| def.table == table),
            _ => None,
        };
        let Some(target) = target else {
            return Err(StoreError::UnknownField {
                entity: self.entity.to_string(),
                field: path.to_string(),
            });
        };
        let sub = target.lookup(tail)?;
        Ok(format!(
            "(SELECT r.{} FROM {} r WHERE r.id = t.{})",
            sub.name, target.table, reference.name
        ))
    }
}

fn unsupported(cond: &Condition) -> StoreError {
    StoreError::UnsupportedValue {
        field: cond.field().to_string(),
        op: cond.op().to_string(),
        value: cond.value().clone(),
    }
}

/// Scalar JSON value to SQL parameter. `None` for `false`/`null`.
fn scalar(value: &Value) -> Option<Option<SqlValue>> {
    match value {
        Value::Null | Value::Bool(false) => Some(None),
        Value::Bool(true) => Some(Some(SqlValue::Integer(1))),
        Value::Number(n) => Some(Some(match n.as_i64() {
            Some(i) => SqlValue::Integer(i),
            None => SqlValue::Real(n.as_f64()?),
        })),
        Value::String(s) => Some(Some(SqlValue::Text(s.clone()))),
        Value::Array(_) | Value::Object(_) => None,
    }
}

/// Translate a domain into a `WHERE` clause over table alias `t`.
fn where_clause(def: &EntityDef, domain: &Domain) -> Result<(String, Vec<SqlValue>)> {
    let mut clauses = Vec::with_capacity(domain.len());
    let mut params = Vec::new();

    for cond in domain.conditions() {
        let column = def.column(cond.field())?;
        let op = cond.op();

        if op.is_set_operator() {
            let Value::Array(items) = cond.value() else {
                return Err(unsupported(cond));
            };
            if items.is_empty() {
                clauses.push(if op == Operator::In { "0" } else { "1" }.to_string());
                continue;
            }
            let mut placeholders = Vec::with_capacity(items.len());
            for item in items {
                match scalar(item) {
                    Some(Some(v)) => params.push(v),
                    _ => return Err(unsupported(cond)),
                }
                placeholders.push(format!("?{}", params.len()));
            }
            let keyword = if op == Operator::In { "IN" } else { "NOT IN" };
            clauses.push(format!("{column} {keyword} ({})", placeholders.join(", ")));
            continue;
        }

        match (op, scalar(cond.value())) {
            (Operator::Eq, Some(None)) => clauses.push(format!("{column} IS NULL")),
            (Operator::Ne, Some(None)) => clauses.push(format!("{column} IS NOT NULL")),
            (_, Some(Some(v))) => {
                params.push(v);
                clauses.push(format!("{column} {} ?{}", op.as_str(), params.len()));
            }
            _ => return Err(unsupported(cond)),
        }
    }

    if clauses.is_empty() {
        Ok((String::new(), params))
    } else {
        Ok((format!(" WHERE {}", clauses.join(" AND ")), params))
    }
}

fn sql_to_json(value: SqlValue) -> Value {
    match value {
        SqlValue::Null => Value::Bool(false),
        SqlValue::Integer(i) => json!(i),
        SqlValue::Real(f) => json!(f),
        SqlValue::Text(s) => Value::String(s),
        SqlValue::Blob(_) => Value::Bool(false),
    }
}

impl Database {
    fn select(&self, entity: &str, domain: &Domain, fields: &[&str]) -> Result<Vec<Record>> {
        let def = entity_def(entity)?;
        let mut selected: Vec<&FieldDef> = vec![&ID_FIELD];
        for name in fields {
            let f = def.lookup(name)?;
            if !selected.iter().any(|s| s.name == f.name) {
                selected.push(f);
            }
        }

        let mut columns = Vec::with_capacity(selected.len() * 2);
        for f in &selected {
            columns.push(format!("t.{}", f.name));
            if let FieldKind::Many2one(target) = f.kind {
                columns.push(format!("(SELECT r.name FROM {target} r WHERE r.id = t.{})", f.name));
            }
        }

        let (filter, params) = where_clause(def, domain)?;
        let sql = format!(
            "SELECT {} FROM {} t{} ORDER BY t.id",
            columns.join(", "),
            def.table,
            filter
        );

        let conn = self.conn.borrow();
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
            .query_map(rusqlite::params_from_iter(params.iter()), |row| {
                let mut record = Record::new();
                let mut idx = 0;
                for f in &selected {
                    let raw: SqlValue = row.get(idx)?;
                    idx += 1;
                    let value = match (f.kind, raw) {
                        (FieldKind::Many2one(_), SqlValue::Integer(id)) => {
                            let name: Option<String> = row.get(idx)?;
                            json!([id, name.unwrap_or_default()])
                        }
                        (_, raw) => sql_to_json(raw),
                    };
                    if matches!(f.kind, FieldKind::Many2one(_)) {
                        idx += 1;
                    }
                    record.insert(f.name.to_string(), value);
                }
                Ok(record)
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        log::info!(
            "[farm] query: search_read {} returned {} records",
            entity,
            rows.len()
        );
        Ok(rows)
    }

    fn count(&self, entity: &str, domain: &Domain) -> Result<i64> {
        let def = entity_def(entity)?;
        let (filter, params) = where_clause(def, domain)?;
        let sql = format!("SELECT COUNT(*) FROM {} t{}", def.table, filter);
        let conn = self.conn.borrow();
        let n = conn.query_row(&sql, rusqlite::params_from_iter(params.iter()), |row| row.get(0))?;
        Ok(n)
    }
}

#[async_trait(?Send)]
impl RecordStore for Database {
    async fn search_read(&self, entity: &str, domain: &Domain, fields: &[&str]) -> Result<Vec<Record>> {
        self.select(entity, domain, fields)
    }

    /// Supports `search_count` with a `domain` keyword argument.
    async fn call(&self, entity: &str, method: &str, kwargs: Value) -> Result<Value> {
        match method {
            "search_count" => {
                let domain: Domain = match kwargs.get("domain") {
                    Some(raw) => serde_json::from_value(raw.clone()).map_err(|source| StoreError::Decode {
                        entity: entity.to_string(),
                        source,
                    })?,
                    None => Domain::new(),
                };
                Ok(json!(self.count(entity, &domain)?))
            }
            _ => Err(StoreError::UnsupportedMethod {
                entity: entity.to_string(),
                method: method.to_string(),
            }),
        }
    }
}
