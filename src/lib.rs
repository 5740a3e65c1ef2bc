//! Typed Rust client for the Bulk SMS Iraq V4 HTTP API.
//!
//! Sends WhatsApp, SMS and Telegram messages, credential templates and OTP
//! codes. The crate is split into a domain layer (payload and response types),
//! a transport layer (JSON wire format) and a small client layer that performs
//! the authenticated `POST` for each operation.
//!
//! ```rust,no_run
//! use bulksms_iraq::BulkSmsClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), bulksms_iraq::BulkSmsError> {
//!     let client = BulkSmsClient::new("...");
//!     let response = client
//!         .send_whatsapp_english("9647502171212", "SenderID", "hello")
//!         .await?;
//!     if let Some(raw) = response.invalid_json_body() {
//!         eprintln!("gateway answered with a non-JSON body: {raw}");
//!     }
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]

pub mod client;
pub mod domain;
mod transport;

pub use client::{BulkSmsClient, BulkSmsClientBuilder, BulkSmsError};
pub use domain::{
    ApiRequest, ApiResponse, Endpoint, INVALID_JSON_ERROR, Language, MessageType, SendCredentials,
    SendMessage, SendOtp, VerifyOtp,
};
