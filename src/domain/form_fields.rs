use serde_json::{Map, Value};
use std::collections::HashMap;

/// Submitted field values keyed by field name.
///
/// Only non-empty values are kept, so a lookup that succeeds always yields
/// something a required field can be satisfied with.
#[derive(Debug, Default, Clone)]
pub struct FormFields(HashMap<String, String>);

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("Missing required field: {0}")]
pub struct MissingField(pub &'static str);

impl FormFields {
    /// Record a field unless it is empty or the name has already been seen.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let value = value.into();
        if value.is_empty() {
            return;
        }
        self.0.entry(name.into()).or_insert(value);
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// Fail-fast presence check: the first required name with no value, if any.
    pub fn first_missing(&self, required: &[&'static str]) -> Option<&'static str> {
        required
            .iter()
            .copied()
            .find(|name| self.get(name).is_none())
    }

    /// Take the value of a field that `first_missing` has already vouched for.
    pub(crate) fn take(&mut self, name: &'static str) -> Result<String, MissingField> {
        self.0.remove(name).ok_or(MissingField(name))
    }

    pub(crate) fn take_optional(&mut self, name: &str) -> Option<String> {
        self.0.remove(name)
    }
}

impl From<Map<String, Value>> for FormFields {
    fn from(object: Map<String, Value>) -> Self {
        let mut fields = FormFields::default();
        for (name, value) in object {
            if let Some(value) = truthy_text(value) {
                fields.insert(name, value);
            }
        }
        fields
    }
}

// null, false, 0, "", [] and {} count as not submitted
fn truthy_text(value: Value) -> Option<String> {
    match value {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) => Some(s),
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        Value::Array(ref a) if a.is_empty() => None,
        Value::Object(ref o) if o.is_empty() => None,
        other => Some(other.to_string()),
    }
}
