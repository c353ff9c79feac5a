use crate::error::{json_type_name, InvalidArgumentSnafu, SerializeError};
use crate::value::Value;
use snafu::ensure;
use std::iter::FromIterator;

/// An ordered mapping from parameter names to values.
///
/// Entries keep the order they were first inserted in, so the strings built from a mapping are
/// reproducible. Inserting a name which is already present replaces its value without moving it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Params {
    entries: Vec<(String, Value)>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a parameter, returning the value it replaced, if any.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some((_, old)) => Some(std::mem::replace(old, value)),
            None => {
                self.entries.push((name, value));
                None
            }
        }
    }

    /// Builder form of [Params::insert].
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, value)| value)
    }

    pub fn remove(&mut self, name: &str) -> Option<Value> {
        let index = self.entries.iter().position(|(n, _)| n == name)?;
        Some(self.entries.remove(index).1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), value))
    }

    /// Classify every entry of a JSON object.
    ///
    /// Fails with [SerializeError::InvalidArgument] unless `json` is an object, and with the first
    /// [SerializeError::UnsupportedType] raised by any of its values.
    pub fn from_json(json: serde_json::Value) -> Result<Self, SerializeError> {
        ensure!(
            json.is_object(),
            InvalidArgumentSnafu {
                reason: format!("parameter not an object ({})", json_type_name(&json)),
            }
        );
        let mut params = Self::new();
        if let serde_json::Value::Object(obj) = json {
            for (name, value) in obj {
                params.insert(name, Value::classify(value)?);
            }
        }
        Ok(params)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (name, value) in iter {
            params.insert(name, value);
        }
        params
    }
}

impl<K: Into<String>, V: Into<Value>> Extend<(K, V)> for Params {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (name, value) in iter {
            self.insert(name, value);
        }
    }
}

impl IntoIterator for Params {
    type Item = (String, Value);
    type IntoIter = std::vec::IntoIter<(String, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::LatLng;
    use serde_json::json;

    #[test]
    fn insertion_order_is_kept() {
        let params = Params::new()
            .with("per_page", 10)
            .with("origin", LatLng::new(1.0, 2.0))
            .with("page", 2)
            .with("per_page", 20);
        let names = params.iter().map(|(name, _)| name).collect::<Vec<_>>();
        assert_eq!(names, ["per_page", "origin", "page"]);
        assert_eq!(params.get("per_page"), Some(&Value::Int(20)));
        assert_eq!(params.len(), 3);
    }

    #[test]
    fn insert_and_remove() {
        let mut params = Params::new();
        assert_eq!(params.insert("a", 1), None);
        assert_eq!(params.insert("a", "x"), Some(Value::Int(1)));
        assert_eq!(params.remove("a"), Some(Value::from("x")));
        assert_eq!(params.remove("a"), None);
        assert!(params.is_empty());
    }

    #[test]
    fn collect_from_pairs() {
        let params: Params = vec![("a", 1), ("b", 2)].into_iter().collect();
        assert_eq!(
            params.into_iter().collect::<Vec<_>>(),
            vec![("a".to_string(), Value::Int(1)), ("b".to_string(), Value::Int(2))]
        );
    }

    #[test]
    fn from_json_keeps_key_order() {
        let params = Params::from_json(json!({"z": 1, "a": "x", "m": null})).unwrap();
        let names = params.iter().map(|(name, _)| name).collect::<Vec<_>>();
        assert_eq!(names, ["z", "a", "m"]);
        assert_eq!(params.get("m"), Some(&Value::Null));
    }

    #[test]
    fn from_json_requires_an_object() {
        for json in vec![json!(null), json!(42), json!("a"), json!([1])] {
            let err = Params::from_json(json).unwrap_err();
            assert!(matches!(err, SerializeError::InvalidArgument { .. }));
        }
    }

    #[test]
    fn from_json_rejects_unsupported_values() {
        let err = Params::from_json(json!({"a": 1, "b": {"what": "ever"}})).unwrap_err();
        assert_eq!(err.type_name(), Some("object"));
    }
}
