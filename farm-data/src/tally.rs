//! Insertion-ordered sums keyed by a grouping value.

use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::marker::PhantomData;

/// Running totals per key, iterated in the order keys were first seen.
///
/// Serializes as a JSON object whose keys keep that order.
#[derive(Debug, Clone)]
pub struct Tally<K> {
    entries: Vec<(K, f64)>,
    index: HashMap<K, usize>,
}

impl<K> Default for Tally<K> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<K: Eq + Hash + Clone> Tally<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `amount` to `key`, appending the key if it is new.
    pub fn add(&mut self, key: K, amount: f64) {
        match self.index.get(&key) {
            Some(&i) => self.entries[i].1 += amount,
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, amount));
            }
        }
    }

    pub fn get(&self, key: &K) -> Option<f64> {
        self.index.get(key).map(|&i| self.entries[i].1)
    }
}

impl<K> Tally<K> {
    pub fn iter(&self) -> impl Iterator<Item = (&K, f64)> {
        self.entries.iter().map(|(k, v)| (k, *v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.entries.iter().map(|(k, _)| k)
    }

    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.entries.iter().map(|(_, v)| *v)
    }

    pub fn total(&self) -> f64 {
        self.values().sum()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: PartialEq> PartialEq for Tally<K> {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl<K: Eq + Hash + Clone> FromIterator<(K, f64)> for Tally<K> {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        let mut tally = Tally::new();
        for (k, v) in iter {
            tally.add(k, v);
        }
        tally
    }
}

impl<K: Serialize> Serialize for Tally<K> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

struct TallyVisitor<K>(PhantomData<K>);

impl<'de, K> Visitor<'de> for TallyVisitor<K>
where
    K: Deserialize<'de> + Eq + Hash + Clone,
{
    type Value = Tally<K>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an object of numeric totals")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut tally = Tally::new();
        while let Some((k, v)) = access.next_entry::<K, f64>()? {
            tally.add(k, v);
        }
        Ok(tally)
    }
}

/// Reads entries in document order, so a serialized tally reads back unchanged.
impl<'de, K> Deserialize<'de> for Tally<K>
where
    K: Deserialize<'de> + Eq + Hash + Clone,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(TallyVisitor(PhantomData))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_first_seen_order() {
        let mut t = Tally::new();
        t.add("water", 10.0);
        t.add("seeds", 5.0);
        t.add("water", 2.5);
        assert_eq!(t.keys().copied().collect::<Vec<_>>(), vec!["water", "seeds"]);
        assert_eq!(t.get(&"water"), Some(12.5));
        assert_eq!(t.total(), 17.5);
    }

    #[test]
    fn json_object_keeps_order() {
        let t: Tally<String> = [("zinc".to_string(), 1.0), ("apple".to_string(), 2.0)]
            .into_iter()
            .collect();
        let text = serde_json::to_string(&t).unwrap();
        assert_eq!(text, r#"{"zinc":1.0,"apple":2.0}"#);
        let back: Tally<String> = serde_json::from_str(&text).unwrap();
        assert_eq!(back, t);
    }
}
