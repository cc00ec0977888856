//! The asynchronous record store interface.

use crate::domain::Domain;
use crate::error::Result;
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::rc::Rc;

/// One record as returned by `search_read`: field name to JSON value, always
/// including `id`. References come back as `[id, name]` and unset fields as
/// `false`.
pub type Record = Map<String, Value>;

/// Read access to the record store.
///
/// Implementations are single-threaded (`?Send`); the dashboard runs on a
/// cooperative scheduler and only suspends inside these calls.
#[async_trait(?Send)]
pub trait RecordStore {
    /// Records of `entity` matching `domain`, restricted to `fields` plus `id`.
    async fn search_read(&self, entity: &str, domain: &Domain, fields: &[&str]) -> Result<Vec<Record>>;

    /// Invoke a named model method with keyword arguments.
    async fn call(&self, entity: &str, method: &str, kwargs: Value) -> Result<Value>;
}

#[async_trait(?Send)]
impl<S: RecordStore + ?Sized> RecordStore for Rc<S> {
    async fn search_read(&self, entity: &str, domain: &Domain, fields: &[&str]) -> Result<Vec<Record>> {
        (**self).search_read(entity, domain, fields).await
    }

    async fn call(&self, entity: &str, method: &str, kwargs: Value) -> Result<Value> {
        (**self).call(entity, method, kwargs).await
    }
}
