//! Decoded request input shared by every pipeline.
//!
//! Payloads arrive shaped as `{ "data": { ... } }`. Field presence follows
//! truthiness rather than strict key presence: `null`, `false`, `0` and `""`
//! count as missing, so `price: 0` fails the "must include a price" check
//! before it ever reaches the positivity check.

use serde_json::Value;

/// What a transport hands to a pipeline: the route id (if the route has one)
/// and the decoded JSON body.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PipelineRequest {
    pub route_id: Option<String>,
    pub body: Value,
}

impl PipelineRequest {
    pub fn new(route_id: Option<String>, body: Value) -> Self {
        Self { route_id, body }
    }

    pub fn with_body(body: Value) -> Self {
        Self {
            route_id: None,
            body,
        }
    }

    pub fn with_route_id(route_id: impl Into<String>) -> Self {
        Self {
            route_id: Some(route_id.into()),
            body: Value::Null,
        }
    }

    /// Route id, or the empty string when the route carries none.
    pub fn route_id(&self) -> &str {
        self.route_id.as_deref().unwrap_or_default()
    }
}

pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Returns `body.data[name]` when present and truthy.
pub fn field<'a>(body: &'a Value, name: &str) -> Option<&'a Value> {
    body.get("data")
        .and_then(|data| data.get(name))
        .filter(|value| is_truthy(value))
}

/// A required string field as found in `body.data`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StringField<'a> {
    /// Absent or falsy.
    Missing,
    /// Truthy, but not a JSON string.
    NotAString(&'a Value),
    Present(&'a str),
}

pub fn string_field<'a>(body: &'a Value, name: &str) -> StringField<'a> {
    match field(body, name) {
        None => StringField::Missing,
        Some(Value::String(s)) => StringField::Present(s),
        Some(other) => StringField::NotAString(other),
    }
}

/// The `data.id` a caller supplied, if any. Falsy ids count as
/// "not specified".
pub fn payload_id(body: &Value) -> Option<&Value> {
    field(body, "id")
}

/// The supplied payload id when it differs from `route_id`, rendered for an
/// error message. Only a string equal to the route id matches; `7` does not
/// match route `"7"`.
pub fn mismatched_id(body: &Value, route_id: &str) -> Option<String> {
    match payload_id(body)? {
        Value::String(id) if id == route_id => None,
        Value::String(id) => Some(id.clone()),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_truthiness() {
        for falsy in [json!(null), json!(false), json!(0), json!(0.0), json!("")] {
            assert!(!is_truthy(&falsy), "{falsy} should be falsy");
        }
        for truthy in [json!(true), json!(1), json!(-3), json!("x"), json!([]), json!({})] {
            assert!(is_truthy(&truthy), "{truthy} should be truthy");
        }
    }

    #[test]
    fn test_field_reads_from_data() {
        let body = json!({ "data": { "name": "Pad Thai", "price": 0, "tags": [] } });
        assert_eq!(field(&body, "name"), Some(&json!("Pad Thai")));
        assert_eq!(field(&body, "price"), None);
        assert_eq!(field(&body, "tags"), Some(&json!([])));
        assert_eq!(field(&body, "missing"), None);
        assert_eq!(field(&json!({ "name": "no data wrapper" }), "name"), None);
        assert_eq!(field(&Value::Null, "name"), None);
    }

    #[test]
    fn test_string_field_keeps_type() {
        let body = json!({ "data": { "name": "Soup", "price": 42, "tags": ["x"], "empty": "" } });
        assert_eq!(string_field(&body, "name"), StringField::Present("Soup"));
        assert_eq!(string_field(&body, "price"), StringField::NotAString(&json!(42)));
        assert_eq!(string_field(&body, "tags"), StringField::NotAString(&json!(["x"])));
        assert_eq!(string_field(&body, "empty"), StringField::Missing);
        assert_eq!(string_field(&body, "missing"), StringField::Missing);
    }

    #[test]
    fn test_payload_id() {
        assert_eq!(payload_id(&json!({ "data": { "id": "abc" } })), Some(&json!("abc")));
        assert_eq!(payload_id(&json!({ "data": { "id": "" } })), None);
        assert_eq!(payload_id(&json!({ "data": {} })), None);

        assert_eq!(mismatched_id(&json!({ "data": { "id": "abc" } }), "abc"), None);
        assert_eq!(mismatched_id(&json!({ "data": { "id": "" } }), "abc"), None);
        assert_eq!(mismatched_id(&json!({ "data": { "id": "xyz" } }), "abc"), Some("xyz".into()));
        assert_eq!(mismatched_id(&json!({ "data": { "id": 7 } }), "7"), Some("7".into()));
    }
}
