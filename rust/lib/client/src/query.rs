use serde_json::Value;

/// Ordered query-string parameters.
///
/// Absent values never reach the wire: [`QueryParams::insert_opt`] skips
/// `None` and [`QueryParams::from_json`] skips `null`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.pairs.push((key.into(), value.to_string()));
        self
    }

    pub fn insert_opt<V: ToString>(self, key: impl Into<String>, value: Option<V>) -> Self {
        match value {
            Some(v) => self.insert(key, v),
            None => self,
        }
    }

    /// Build from a JSON object. `null` members are dropped, strings are
    /// used verbatim and other scalars use their JSON text. Non-objects
    /// produce no parameters.
    pub fn from_json(value: &Value) -> Self {
        let mut params = Self::new();
        if let Value::Object(map) = value {
            for (key, v) in map {
                if let Some(text) = scalar_text(v) {
                    params.pairs.push((key.clone(), text));
                }
            }
        }
        params
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Text form of a JSON value for query strings and form fields.
pub(crate) fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn insert_opt_skips_none() {
        let params = QueryParams::new()
            .insert("a", 1)
            .insert_opt("b", None::<i32>)
            .insert_opt("d", Some("x"));
        assert_eq!(
            params.pairs(),
            &[("a".to_string(), "1".to_string()), ("d".to_string(), "x".to_string())]
        );
        assert_eq!(params.get("d"), Some("x"));
        assert_eq!(params.get("b"), None);
    }

    #[test]
    fn from_json_drops_nulls() {
        let params = QueryParams::from_json(&json!({"a": 1, "c": null, "d": "x", "e": true}));
        assert_eq!(params.len(), 3);
        assert_eq!(params.get("a"), Some("1"));
        assert_eq!(params.get("c"), None);
        assert_eq!(params.get("d"), Some("x"));
        assert_eq!(params.get("e"), Some("true"));
    }

    #[test]
    fn from_json_ignores_non_objects() {
        assert!(QueryParams::from_json(&json!([1, 2])).is_empty());
        assert!(QueryParams::from_json(&Value::Null).is_empty());
    }
}
