//! Accumulated JSON configuration overrides.
//!
//! Each override is a partial JSON object. Successive overrides are merged
//! key by key onto what came before, so `{"a": {"x": 1}}` followed by
//! `{"a": {"y": 2}}` leaves both `x` and `y` set. Objects merge recursively;
//! every other value (arrays and `null` included) replaces the previous one.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use super::error::ConfigError;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Overrides {
    root: Map<String, Value>,
}

impl Overrides {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `json` and merge it onto a copy of `self`. `self` is untouched,
    /// so a caller can validate the result before committing it.
    pub fn merged(&self, json: &str) -> Result<Overrides, ConfigError> {
        let patch = match serde_json::from_str::<Value>(json)? {
            Value::Object(map) => map,
            other => return Err(ConfigError::NotAnObject(kind(&other))),
        };
        let mut next = self.clone();
        merge_into(&mut next.root, patch);
        Ok(next)
    }

    /// Deserialize the accumulated overrides into a settings type whose
    /// missing keys fall back to defaults.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, ConfigError> {
        Ok(serde_json::from_value(Value::Object(self.root.clone()))?)
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    pub fn to_json(&self) -> String {
        Value::Object(self.root.clone()).to_string()
    }
}

fn merge_into(base: &mut Map<String, Value>, patch: Map<String, Value>) {
    for (key, value) in patch {
        match (base.get_mut(&key), value) {
            (Some(Value::Object(existing)), Value::Object(incoming)) => {
                merge_into(existing, incoming);
            }
            (_, value) => {
                base.insert(key, value);
            }
        }
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Default, Deserialize, PartialEq)]
    #[serde(default)]
    struct Inner {
        x: i32,
        y: i32,
    }

    #[derive(Debug, Default, Deserialize, PartialEq)]
    #[serde(default)]
    struct Outer {
        inner: Inner,
        tags: Vec<String>,
    }

    #[test]
    fn successive_subsets_accumulate() {
        let first = Overrides::new().merged(r#"{"inner": {"x": 1}}"#).unwrap();
        let second = first.merged(r#"{"inner": {"y": 2}}"#).unwrap();
        let outer: Outer = second.decode().unwrap();
        assert_eq!(outer.inner, Inner { x: 1, y: 2 });
        assert!(first.decode::<Outer>().unwrap().inner.y == 0);
    }

    #[test]
    fn arrays_replace_instead_of_appending() {
        let first = Overrides::new().merged(r#"{"tags": ["a", "b"]}"#).unwrap();
        let second = first.merged(r#"{"tags": ["c"]}"#).unwrap();
        assert_eq!(second.decode::<Outer>().unwrap().tags, vec!["c".to_string()]);
    }

    #[test]
    fn later_scalar_wins() {
        let merged = Overrides::new()
            .merged(r#"{"inner": {"x": 1}}"#)
            .and_then(|o| o.merged(r#"{"inner": {"x": 5}}"#))
            .unwrap();
        assert_eq!(merged.decode::<Outer>().unwrap().inner.x, 5);
    }

    #[test]
    fn round_trips_through_json_text() {
        let merged = Overrides::new()
            .merged(r#"{"inner": {"x": 1}}"#)
            .and_then(|o| o.merged(r#"{"tags": ["t"]}"#))
            .unwrap();
        let replayed = Overrides::new().merged(&merged.to_json()).unwrap();
        assert_eq!(replayed, merged);
        assert!(Overrides::new().is_empty());
        assert!(!replayed.is_empty());
    }

    #[test]
    fn rejects_non_object_patches() {
        assert!(matches!(
            Overrides::new().merged("[1, 2]"),
            Err(ConfigError::NotAnObject("array"))
        ));
        assert!(matches!(Overrides::new().merged("{oops"), Err(ConfigError::Json(_))));
    }
}
