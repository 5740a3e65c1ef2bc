use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// `error` value of the sentinel returned for undecodable bodies.
pub const INVALID_JSON_ERROR: &str = "Invalid JSON response";

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
/// Decoded response body of any endpoint.
///
/// The shape is defined by the gateway. API-level failures (bad sender id,
/// insufficient balance, wrong OTP, ...) arrive here as ordinary fields and
/// are left to the caller to interpret.
///
/// When the body was not a JSON object this holds the sentinel
/// `{"error": "Invalid JSON response", "response": <raw body>}`. That includes
/// bodies which are valid JSON but not an object (`null`, scalars, arrays).
pub struct ApiResponse(Map<String, Value>);

impl ApiResponse {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Build the sentinel for a body that could not be decoded.
    ///
    /// The client reads bodies as UTF-8 text, so invalid byte sequences in
    /// `raw_body` have already been replaced with U+FFFD and it may differ from
    /// the bytes on the wire.
    pub fn invalid_json(raw_body: impl Into<String>) -> Self {
        let mut fields = Map::new();
        fields.insert("error".to_owned(), Value::String(INVALID_JSON_ERROR.to_owned()));
        fields.insert("response".to_owned(), Value::String(raw_body.into()));
        Self(fields)
    }

    /// True if this is the invalid-JSON sentinel.
    pub fn is_invalid_json(&self) -> bool {
        self.invalid_json_body().is_some()
    }

    /// Raw body carried by the invalid-JSON sentinel.
    pub fn invalid_json_body(&self) -> Option<&str> {
        if self.0.len() != 2 || self.0.get("error").and_then(Value::as_str) != Some(INVALID_JSON_ERROR)
        {
            return None;
        }
        self.0.get("response").and_then(Value::as_str)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// String field lookup, `None` for missing or non-string values.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for ApiResponse {
    fn from(value: Map<String, Value>) -> Self {
        Self(value)
    }
}

impl From<ApiResponse> for Map<String, Value> {
    fn from(value: ApiResponse) -> Self {
        value.0
    }
}
