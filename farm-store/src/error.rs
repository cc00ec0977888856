/// Error types for record store access
use thiserror::Error;

/// Main error type for store operations. A failed fetch surfaces as one of these.
#[derive(Error, Debug)]
pub enum StoreError {
    /// SQLite query failed
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// HTTP request to a remote store failed
    #[cfg(feature = "rpc")]
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The store has no such entity
    #[error("Unknown entity: {0}")]
    UnknownEntity(String),

    /// The entity has no such field
    #[error("Unknown field `{field}` on {entity}")]
    UnknownField { entity: String, field: String },

    /// A domain condition carries a value its operator cannot use
    #[error("Unsupported value for `{field} {op}`: {value}")]
    UnsupportedValue {
        field: String,
        op: String,
        value: serde_json::Value,
    },

    /// The store does not implement the requested method
    #[error("Method `{method}` is not supported on {entity}")]
    UnsupportedMethod { entity: String, method: String },

    /// A record could not be decoded into its typed form
    #[error("Failed to decode {entity} record: {source}")]
    Decode {
        entity: String,
        #[source]
        source: serde_json::Error,
    },

    /// The remote store answered with an error payload
    #[error("Remote error: {0}")]
    Remote(String),
}

/// Type alias for Results using StoreError
pub type Result<T> = std::result::Result<T, StoreError>;
