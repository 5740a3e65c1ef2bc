//! Domain layer: request payloads, wire codes and the response mapping (no I/O).

mod request;
mod response;
mod value;

pub use request::{AUTO_OTP_CODE, ApiRequest, SendCredentials, SendMessage, SendOtp, VerifyOtp};
pub use response::{ApiResponse, INVALID_JSON_ERROR};
pub use value::{Endpoint, Language, MessageType};
