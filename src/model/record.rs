//! Flat attribute-map form of a single layout element.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::BlockType;
use crate::error::{Error, Result};

/// Attribute name carrying the variant tag of a record.
pub const BLOCK_TYPE_KEY: &str = "block_type";

/// The serialized form of one layout element: attribute name to value.
///
/// Records are what both input formats decode to before type dispatch.
/// A JSON object maps to a record directly; a CSV row maps to a record
/// holding only its non-missing cells.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementRecord(Map<String, Value>);

impl ElementRecord {
    /// Create an empty record.
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Get an attribute value.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Check whether an attribute is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Set an attribute, returning the previous value if any.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    /// Remove an attribute, returning its value if it was present.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.remove(key)
    }

    /// Builder-style variant of [`ElementRecord::insert`].
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// The raw `block_type` value, if present.
    pub fn block_type(&self) -> Option<&Value> {
        self.0.get(BLOCK_TYPE_KEY)
    }

    /// Number of attributes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if the record has no attributes.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over attributes.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    /// Borrow the underlying map.
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Unwrap into the underlying map.
    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }

    /// Decode the record into a variant struct, ignoring attributes the
    /// struct does not name.
    pub(crate) fn decode<T: DeserializeOwned>(&self, block_type: BlockType) -> Result<T> {
        serde_json::from_value(Value::Object(self.0.clone())).map_err(|e| Error::InvalidElement {
            block_type: block_type.to_string(),
            message: e.to_string(),
        })
    }
}

impl From<Map<String, Value>> for ElementRecord {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl From<ElementRecord> for Value {
    fn from(record: ElementRecord) -> Self {
        Value::Object(record.0)
    }
}

impl FromIterator<(String, Value)> for ElementRecord {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_record_builder() {
        let record = ElementRecord::new()
            .with("block_type", "rectangle")
            .with("x_1", 1.5);

        assert_eq!(record.len(), 2);
        assert_eq!(record.block_type(), Some(&json!("rectangle")));
        assert!(record.contains_key("x_1"));
        assert!(!record.contains_key("x_2"));
    }

    #[test]
    fn test_record_transparent_serde() {
        let record: ElementRecord =
            serde_json::from_value(json!({"block_type": "interval", "start": 1})).unwrap();
        assert_eq!(record.get("start"), Some(&json!(1)));

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value, json!({"block_type": "interval", "start": 1}));
    }
}
