//! JSON-RPC client for a remote record store.
//!
//! Every request is a JSON-RPC 2.0 `call` posted to
//! `<base_url>/web/dataset/call_kw/<model>/<method>` with
//! `{model, method, args, kwargs}` params.

use crate::domain::Domain;
use crate::error::{Result, StoreError};
use crate::store::{Record, RecordStore};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use std::cell::Cell;

#[derive(Debug, Deserialize)]
struct RpcErrorData {
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RpcError {
    message: String,
    #[serde(default)]
    data: Option<RpcErrorData>,
}

#[derive(Debug, Deserialize)]
struct RpcResponse {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<RpcError>,
}

pub struct RpcStore {
    client: reqwest::Client,
    base_url: String,
    session_id: Option<String>,
    next_id: Cell<u64>,
}

impl RpcStore {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            session_id: None,
            next_id: Cell::new(1),
        }
    }

    /// Authenticate requests with an existing session cookie.
    pub fn with_session(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }

    async fn call_kw(&self, model: &str, method: &str, args: Value, kwargs: Value) -> Result<Value> {
        let id = self.next_id.get();
        self.next_id.set(id + 1);

        let url = format!("{}/web/dataset/call_kw/{}/{}", self.base_url, model, method);
        let body = json!({
            "jsonrpc": "2.0",
            "method": "call",
            "id": id,
            "params": {
                "model": model,
                "method": method,
                "args": args,
                "kwargs": kwargs,
            }
        });

        let mut request = self.client.post(&url).json(&body);
        if let Some(session) = &self.session_id {
            request = request.header(reqwest::header::COOKIE, format!("session_id={session}"));
        }

        log::debug!("[farm] rpc: {} {}", model, method);
        let response = request.send().await?.error_for_status()?;
        let envelope: RpcResponse = response.json().await?;

        if let Some(err) = envelope.error {
            let detail = err.data.and_then(|d| d.message).unwrap_or(err.message);
            return Err(StoreError::Remote(detail));
        }
        Ok(envelope.result.unwrap_or(Value::Null))
    }
}

#[async_trait(?Send)]
impl RecordStore for RpcStore {
    async fn search_read(&self, entity: &str, domain: &Domain, fields: &[&str]) -> Result<Vec<Record>> {
        let result = self
            .call_kw(
                entity,
                "search_read",
                json!([]),
                json!({ "domain": domain, "fields": fields }),
            )
            .await?;
        serde_json::from_value(result).map_err(|source| StoreError::Decode {
            entity: entity.to_string(),
            source,
        })
    }

    async fn call(&self, entity: &str, method: &str, kwargs: Value) -> Result<Value> {
        self.call_kw(entity, method, json!([]), kwargs).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_payload_prefers_data_message() {
        let envelope: RpcResponse = serde_json::from_value(json!({
            "jsonrpc": "2.0",
            "id": 1,
            "error": {"code": 200, "message": "Odoo Server Error", "data": {"message": "Access denied"}}
        }))
        .unwrap();
        let err = envelope.error.unwrap();
        assert_eq!(err.data.and_then(|d| d.message).unwrap_or(err.message), "Access denied");
    }

    #[test]
    fn base_url_is_normalized() {
        let store = RpcStore::new("http://localhost:8069/").with_session("abc");
        assert_eq!(store.base_url, "http://localhost:8069");
        assert_eq!(store.session_id.as_deref(), Some("abc"));
    }
}
