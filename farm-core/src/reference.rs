//! Typed record references and lenient decoders for store fields.
//!
//! The record store encodes a reference to another record as a positional
//! `[id, "display name"]` pair and an unset field as `false`. [`RecordRef`]
//! replaces the pair with named fields, and the `optional` / `number`
//! helpers map `false`, `null` and missing values onto `None` / `0.0`.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Primary key of a store record.
pub type RecordId = i64;

/// A reference to another record: its id plus the name shown to users.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct RecordRef {
    pub id: RecordId,
    pub display_name: String,
}

impl RecordRef {
    pub fn new(id: RecordId, display_name: impl Into<String>) -> Self {
        Self {
            id,
            display_name: display_name.into(),
        }
    }

    /// The `[id, name]` wire form used by the record store.
    pub fn to_pair(&self) -> serde_json::Value {
        serde_json::json!([self.id, self.display_name])
    }
}

impl fmt::Display for RecordRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (#{})", self.display_name, self.id)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawRef {
    Pair(RecordId, String),
    Object {
        id: RecordId,
        #[serde(alias = "name")]
        display_name: String,
    },
    Id(RecordId),
}

impl<'de> Deserialize<'de> for RecordRef {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match RawRef::deserialize(deserializer)? {
            RawRef::Pair(id, display_name) | RawRef::Object { id, display_name } => {
                RecordRef { id, display_name }
            }
            RawRef::Id(id) => RecordRef {
                id,
                display_name: String::new(),
            },
        })
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OrFalse<T> {
    Value(T),
    Flag(bool),
}

/// Decode a field that the store reports as `false` or `null` when unset.
pub fn optional<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(match Option::<OrFalse<T>>::deserialize(deserializer)? {
        Some(OrFalse::Value(value)) => Some(value),
        Some(OrFalse::Flag(_)) | None => None,
    })
}

/// Decode a numeric field, treating `false`, `null` and absence as zero.
pub fn number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(optional::<D, f64>(deserializer)?.unwrap_or(0.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Deserialize)]
    struct Holder {
        #[serde(default, deserialize_with = "optional")]
        crop_id: Option<RecordRef>,
        #[serde(default, deserialize_with = "number")]
        budget: f64,
    }

    #[test]
    fn decodes_positional_pair() {
        let r: RecordRef = serde_json::from_value(json!([7, "Maize"])).unwrap();
        assert_eq!(r, RecordRef::new(7, "Maize"));
    }

    #[test]
    fn decodes_object_and_bare_id() {
        let r: RecordRef = serde_json::from_value(json!({"id": 3, "name": "North"})).unwrap();
        assert_eq!(r.display_name, "North");
        let r: RecordRef = serde_json::from_value(json!(12)).unwrap();
        assert_eq!(r.id, 12);
        assert!(r.display_name.is_empty());
    }

    #[test]
    fn false_and_null_mean_unset() {
        let h: Holder = serde_json::from_value(json!({"crop_id": false, "budget": null})).unwrap();
        assert!(h.crop_id.is_none());
        assert_eq!(h.budget, 0.0);

        let h: Holder = serde_json::from_value(json!({})).unwrap();
        assert!(h.crop_id.is_none());
        assert_eq!(h.budget, 0.0);
    }

    #[test]
    fn integer_numbers_decode_as_f64() {
        let h: Holder = serde_json::from_value(json!({"budget": 1500})).unwrap();
        assert_eq!(h.budget, 1500.0);
    }

    #[test]
    fn pair_round_trips_through_wire_form() {
        let r = RecordRef::new(4, "Tomato");
        let back: RecordRef = serde_json::from_value(r.to_pair()).unwrap();
        assert_eq!(back, r);
    }
}
