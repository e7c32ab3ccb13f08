//! Read-only view over untrusted export records.
//!
//! The export format is loosely typed: any field may be missing, `null`, or
//! hold a value of an unexpected JSON type. [`RawRecord`] hides that behind
//! accessors that all return `Option`, so normalizers only ever decide on a
//! default and never see a malformed value.

use serde_json::{Map, Value};

/// A borrowed, possibly malformed record from the export format.
#[derive(Debug, Clone, Copy)]
pub struct RawRecord<'a> {
    fields: Option<&'a Map<String, Value>>,
}

impl<'a> RawRecord<'a> {
    /// Wrap a JSON value. Non-object values produce a record with no fields.
    pub fn new(value: &'a Value) -> Self {
        Self {
            fields: value.as_object(),
        }
    }

    /// A record with no fields at all.
    pub fn empty() -> Self {
        Self { fields: None }
    }

    /// Raw access to a field, treating `null` as absent.
    pub fn get(&self, key: &str) -> Option<&'a Value> {
        self.fields?.get(key).filter(|v| !v.is_null())
    }

    /// A string field.
    pub fn str(&self, key: &str) -> Option<&'a str> {
        self.get(key)?.as_str()
    }

    /// A string field that is also non-empty.
    pub fn non_empty_str(&self, key: &str) -> Option<&'a str> {
        self.str(key).filter(|s| !s.is_empty())
    }

    /// A numeric field.
    pub fn f64(&self, key: &str) -> Option<f64> {
        self.get(key)?.as_f64()
    }

    /// A boolean field.
    pub fn bool(&self, key: &str) -> Option<bool> {
        self.get(key)?.as_bool()
    }

    /// An array field.
    pub fn array(&self, key: &str) -> Option<&'a Vec<Value>> {
        self.get(key)?.as_array()
    }

    /// A nested object field.
    pub fn record(&self, key: &str) -> Option<RawRecord<'a>> {
        self.get(key)
            .and_then(Value::as_object)
            .map(|fields| RawRecord {
                fields: Some(fields),
            })
    }

    /// The `color` string of a nested color record, e.g. `themeColor.color`.
    pub fn color(&self, key: &str) -> Option<&'a str> {
        self.record(key)?.str("color")
    }

    /// A string field, or a number rendered the way the export would print it.
    pub fn scalar_string(&self, key: &str) -> Option<String> {
        match self.get(key)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    /// Like [`scalar_string`](Self::scalar_string), but empty strings and
    /// zero count as absent, matching how the export treats unset styles.
    pub fn non_empty_scalar(&self, key: &str) -> Option<String> {
        if self.f64(key) == Some(0.0) {
            return None;
        }
        self.scalar_string(key).filter(|s| !s.is_empty())
    }

    /// A fixed-size pair of numbers, e.g. a view box.
    pub fn f64_pair(&self, key: &str) -> Option<(f64, f64)> {
        match self.array(key)?.as_slice() {
            [a, b] => Some((a.as_f64()?, b.as_f64()?)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_and_null_are_absent() {
        let value = json!({ "a": null });
        let raw = RawRecord::new(&value);

        assert_eq!(raw.get("a"), None);
        assert_eq!(raw.get("b"), None);
    }

    #[test]
    fn test_wrong_type_is_absent() {
        let value = json!({ "width": "wide", "vertical": 1, "id": 42 });
        let raw = RawRecord::new(&value);

        assert_eq!(raw.f64("width"), None);
        assert_eq!(raw.bool("vertical"), None);
        assert_eq!(raw.str("id"), None);
    }

    #[test]
    fn test_non_object_has_no_fields() {
        let value = json!([1, 2, 3]);
        let raw = RawRecord::new(&value);

        assert_eq!(raw.get("0"), None);
        assert_eq!(raw.record("0").and_then(|r| r.str("a")), None);
    }

    #[test]
    fn test_nested_color() {
        let value = json!({ "themeColor": { "color": "#123456" }, "fill": { "color": 5 } });
        let raw = RawRecord::new(&value);

        assert_eq!(raw.color("themeColor"), Some("#123456"));
        assert_eq!(raw.color("fill"), None);
        assert_eq!(raw.color("missing"), None);
    }

    #[test]
    fn test_scalar_string() {
        let value = json!({ "size": 18, "family": "Arial", "bold": true });
        let raw = RawRecord::new(&value);

        assert_eq!(raw.scalar_string("size").as_deref(), Some("18"));
        assert_eq!(raw.scalar_string("family").as_deref(), Some("Arial"));
        assert_eq!(raw.scalar_string("bold"), None);
    }

    #[test]
    fn test_non_empty_scalar() {
        let value = json!({ "zero": 0, "zero_float": 0.0, "empty": "", "text_zero": "0", "size": 12 });
        let raw = RawRecord::new(&value);

        assert_eq!(raw.non_empty_scalar("zero"), None);
        assert_eq!(raw.non_empty_scalar("zero_float"), None);
        assert_eq!(raw.non_empty_scalar("empty"), None);
        assert_eq!(raw.non_empty_scalar("text_zero").as_deref(), Some("0"));
        assert_eq!(raw.non_empty_scalar("size").as_deref(), Some("12"));
    }

    #[test]
    fn test_f64_pair() {
        let value = json!({ "ok": [10, 20.5], "short": [1], "mixed": [1, "x"] });
        let raw = RawRecord::new(&value);

        assert_eq!(raw.f64_pair("ok"), Some((10.0, 20.5)));
        assert_eq!(raw.f64_pair("short"), None);
        assert_eq!(raw.f64_pair("mixed"), None);
    }
}
