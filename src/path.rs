//! Dotted key paths into JSON values.
//!
//! A key path like `location.zone` descends one property per dot-separated
//! segment. Array elements are reached with decimal segments (`disks.0`).

use std::fmt;

use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPath {
    raw: String,
    segments: Vec<String>,
}

impl KeyPath {
    pub fn parse(raw: &str) -> Self {
        let segments = if raw.is_empty() {
            Vec::new()
        } else {
            raw.split('.').map(str::to_string).collect()
        };

        Self { raw: raw.to_string(), segments }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Looks the path up in `root`. `None` when any segment is absent or a
    /// scalar is reached before the path ends. An empty path yields `root`.
    pub fn resolve<'a>(&self, root: &'a Value) -> Option<&'a Value> {
        self.segments.iter().try_fold(root, |current, segment| match current {
            Value::Object(map) => map.get(segment),
            Value::Array(items) => segment.parse::<usize>().ok().and_then(|idx| items.get(idx)),
            _ => None,
        })
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl From<&str> for KeyPath {
    fn from(raw: &str) -> Self {
        Self::parse(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn resolves_nested_objects() {
        let doc = json!({"a": {"b": {"c": 42}}});

        assert_eq!(KeyPath::parse("a.b.c").resolve(&doc), Some(&json!(42)));
        assert_eq!(KeyPath::parse("a.b").resolve(&doc), Some(&json!({"c": 42})));
    }

    #[test]
    fn missing_segments_resolve_to_none() {
        let doc = json!({"a": {"b": 1}});

        assert_eq!(KeyPath::parse("x").resolve(&doc), None);
        assert_eq!(KeyPath::parse("x.y.z").resolve(&doc), None);
        assert_eq!(KeyPath::parse("a.c").resolve(&doc), None);
        // descending past a scalar
        assert_eq!(KeyPath::parse("a.b.c").resolve(&doc), None);
    }

    #[test]
    fn empty_path_is_the_root() {
        let doc = json!({"a": 1});
        let path = KeyPath::parse("");

        assert!(path.segments().is_empty());
        assert_eq!(path.resolve(&doc), Some(&doc));
    }

    #[test]
    fn decimal_segments_index_arrays() {
        let doc = json!({"disks": [{"size": 10}, {"size": 20}]});

        assert_eq!(KeyPath::parse("disks.1.size").resolve(&doc), Some(&json!(20)));
        assert_eq!(KeyPath::parse("disks.2.size").resolve(&doc), None);
        assert_eq!(KeyPath::parse("disks.first").resolve(&doc), None);
    }

    #[test]
    fn null_root_resolves_nothing() {
        assert_eq!(KeyPath::parse("state").resolve(&Value::Null), None);
    }

    #[test]
    fn resolution_is_repeatable() {
        let doc = json!({"state": "up"});
        let path = KeyPath::from("state");

        assert_eq!(path.resolve(&doc), path.resolve(&doc));
        assert_eq!(path.to_string(), "state");
    }
}
