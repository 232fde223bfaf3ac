//! Form state held in an explicit store
//!
//! A [`Form`] owns its value record. Setting a field mutates only the store it
//! is called on, and [`submit`](Form::submit) hands out a snapshot that later
//! edits cannot reach.

use indexmap::IndexMap;
use serde_json::Value;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Form {
    values: IndexMap<String, Value>,
}

impl Form {
    /// Start from initial field values, keeping their order
    pub fn new<K, V>(initial: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        Self {
            values: initial
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }

    /// Set a field, adding it at the end when it was not declared up front
    pub fn set_value(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn value(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn values(&self) -> &IndexMap<String, Value> {
        &self.values
    }

    /// Pure: Snapshot the current values as a JSON object
    pub fn submit(&self) -> Value {
        Value::Object(
            self.values
                .iter()
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect(),
        )
    }
}
