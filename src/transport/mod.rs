//! Transport layer: JSON wire format of request and response bodies.

mod json;

pub use json::{decode_json_response, encode_json_body};
