use std::fmt;

use serde::{Serialize, Serializer};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Delivery channel code sent as the `type` field.
///
/// Known codes get their own variant; anything else is passed through verbatim
/// via [`MessageType::Other`]. The gateway is the only authority on which codes
/// are accepted for a given endpoint.
pub enum MessageType {
    /// `whatsapp`
    WhatsApp,
    /// `unicode` (SMS with non-Latin text)
    Unicode,
    /// `plain` (Latin-only SMS)
    Plain,
    /// `telegram`
    Telegram,
    /// `sms` (OTP delivery over SMS)
    Sms,
    /// Any other code, sent as given.
    Other(String),
}

impl MessageType {
    /// The code as it appears on the wire.
    pub fn as_str(&self) -> &str {
        match self {
            Self::WhatsApp => "whatsapp",
            Self::Unicode => "unicode",
            Self::Plain => "plain",
            Self::Telegram => "telegram",
            Self::Sms => "sms",
            Self::Other(code) => code,
        }
    }
}

impl From<&str> for MessageType {
    fn from(value: &str) -> Self {
        match value {
            "whatsapp" => Self::WhatsApp,
            "unicode" => Self::Unicode,
            "plain" => Self::Plain,
            "telegram" => Self::Telegram,
            "sms" => Self::Sms,
            other => Self::Other(other.to_owned()),
        }
    }
}

impl From<String> for MessageType {
    fn from(value: String) -> Self {
        match Self::from(value.as_str()) {
            Self::Other(_) => Self::Other(value),
            known => known,
        }
    }
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for MessageType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Message language code sent as the `lang` field.
pub enum Language {
    /// `en`
    English,
    /// `ar`
    Arabic,
    /// `ku`
    Kurdish,
    /// Any other code, sent as given.
    Other(String),
}

impl Language {
    pub fn as_str(&self) -> &str {
        match self {
            Self::English => "en",
            Self::Arabic => "ar",
            Self::Kurdish => "ku",
            Self::Other(code) => code,
        }
    }
}

impl From<&str> for Language {
    fn from(value: &str) -> Self {
        match value {
            "en" => Self::English,
            "ar" => Self::Arabic,
            "ku" => Self::Kurdish,
            other => Self::Other(other.to_owned()),
        }
    }
}

impl From<String> for Language {
    fn from(value: String) -> Self {
        match Self::from(value.as_str()) {
            Self::Other(_) => Self::Other(value),
            known => known,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Language {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Remote operation a payload is posted to.
pub enum Endpoint {
    /// `send`: WhatsApp, SMS and Telegram messages.
    Send,
    /// `send/credentials`: templated credential messages.
    SendCredentials,
    /// `sendotp`: gateway-generated OTP.
    SendOtp,
    /// `verifyotp`: OTP verification.
    VerifyOtp,
}

impl Endpoint {
    /// Path segment relative to the API base URL.
    pub fn path(self) -> &'static str {
        match self {
            Self::Send => "send",
            Self::SendCredentials => "send/credentials",
            Self::SendOtp => "sendotp",
            Self::VerifyOtp => "verifyotp",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}
