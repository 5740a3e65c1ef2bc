use serde_json::{Map, Value};

use crate::domain::{ApiRequest, ApiResponse};

pub fn encode_json_body<R: ApiRequest>(request: &R) -> Result<Vec<u8>, serde_json::Error> {
    serde_json::to_vec(request)
}

/// Decode a response body, falling back to the invalid-JSON sentinel.
///
/// Only a top-level JSON object counts as decoded; empty bodies, `null`,
/// scalars and arrays all produce the sentinel carrying the raw text.
pub fn decode_json_response(body: &str) -> ApiResponse {
    match serde_json::from_str::<Map<String, Value>>(body) {
        Ok(fields) => ApiResponse::new(fields),
        Err(_) => ApiResponse::invalid_json(body),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::domain::{SendCredentials, VerifyOtp};

    use super::*;

    #[test]
    fn encode_keeps_wire_field_order() {
        let request = SendCredentials::new(
            "9647502171212",
            "SenderID",
            "whatsapp",
            "en",
            ["user".to_owned(), "pass".to_owned(), "https://example.invalid".to_owned()],
        );
        let body = String::from_utf8(encode_json_body(&request).unwrap()).unwrap();
        assert_eq!(
            body,
            r#"{"recipient":"9647502171212","sender_id":"SenderID","type":"whatsapp","param1":"user","param2":"pass","param3":"https://example.invalid","lang":"en"}"#
        );
    }

    #[test]
    fn encode_escapes_quotes_in_values() {
        let request = VerifyOtp::new("964750", "12\"34", "id");
        let body = encode_json_body(&request).unwrap();
        let parsed: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(parsed["code"], "12\"34");
    }

    #[test]
    fn decode_object_response() {
        let response = decode_json_response(r#"{"status":"success","data":{"id":"abc"}}"#);
        assert!(!response.is_invalid_json());
        assert_eq!(response.get_str("status"), Some("success"));
        assert_eq!(response.get("data"), Some(&json!({"id": "abc"})));
    }

    #[test]
    fn decode_non_json_falls_back_to_sentinel() {
        let response = decode_json_response("not json");
        assert_eq!(
            response.as_map(),
            json!({"error": "Invalid JSON response", "response": "not json"})
                .as_object()
                .unwrap()
        );
    }

    #[test]
    fn sentinel_keeps_replacement_characters_from_lossy_text() {
        let body = String::from_utf8_lossy(b"bad \xff body").into_owned();
        let response = decode_json_response(&body);
        assert_eq!(response.invalid_json_body(), Some("bad \u{FFFD} body"));
    }

    #[test]
    fn decode_empty_and_non_object_bodies_fall_back() {
        for body in ["", "   ", "null", "42", "\"ok\"", "[1,2]"] {
            let response = decode_json_response(body);
            assert_eq!(response.invalid_json_body(), Some(body), "body: {body:?}");
        }
    }
}
