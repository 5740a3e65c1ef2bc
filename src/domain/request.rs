use serde::{Serialize, Serializer};

use crate::domain::value::{Endpoint, Language, MessageType};

/// `code` value asking the gateway to generate the OTP itself.
pub const AUTO_OTP_CODE: &str = "auto";

/// A JSON payload bound to a fixed endpoint.
pub trait ApiRequest: Serialize {
    const ENDPOINT: Endpoint;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// Payload of the `send` endpoint.
///
/// Every WhatsApp, SMS and Telegram operation is this payload with a different
/// `type`/`lang` pair.
pub struct SendMessage {
    recipient: String,
    sender_id: String,
    #[serde(rename = "type")]
    kind: MessageType,
    message: String,
    lang: Language,
}

impl SendMessage {
    pub fn new(
        recipient: impl Into<String>,
        sender_id: impl Into<String>,
        kind: impl Into<MessageType>,
        lang: impl Into<Language>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            recipient: recipient.into(),
            sender_id: sender_id.into(),
            kind: kind.into(),
            message: message.into(),
            lang: lang.into(),
        }
    }

    pub fn recipient(&self) -> &str {
        &self.recipient
    }

    pub fn sender_id(&self) -> &str {
        &self.sender_id
    }

    pub fn kind(&self) -> &MessageType {
        &self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn lang(&self) -> &Language {
        &self.lang
    }
}

impl ApiRequest for SendMessage {
    const ENDPOINT: Endpoint = Endpoint::Send;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// Payload of the `send/credentials` endpoint.
///
/// `param1`..`param3` fill the gateway's credential template; their meaning is
/// defined by the account configuration, not by this crate.
pub struct SendCredentials {
    recipient: String,
    sender_id: String,
    #[serde(rename = "type")]
    kind: MessageType,
    param1: String,
    param2: String,
    param3: String,
    lang: Language,
}

impl SendCredentials {
    pub fn new(
        recipient: impl Into<String>,
        sender_id: impl Into<String>,
        kind: impl Into<MessageType>,
        lang: impl Into<Language>,
        params: [String; 3],
    ) -> Self {
        let [param1, param2, param3] = params;
        Self {
            recipient: recipient.into(),
            sender_id: sender_id.into(),
            kind: kind.into(),
            param1,
            param2,
            param3,
            lang: lang.into(),
        }
    }

    pub fn recipient(&self) -> &str {
        &self.recipient
    }

    pub fn sender_id(&self) -> &str {
        &self.sender_id
    }

    pub fn kind(&self) -> &MessageType {
        &self.kind
    }

    pub fn lang(&self) -> &Language {
        &self.lang
    }

    /// The three template parameters, in order.
    pub fn params(&self) -> [&str; 3] {
        [&self.param1, &self.param2, &self.param3]
    }
}

impl ApiRequest for SendCredentials {
    const ENDPOINT: Endpoint = Endpoint::SendCredentials;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// Payload of the `sendotp` endpoint. The code is always generated remotely.
pub struct SendOtp {
    recipient: String,
    sender_id: String,
    #[serde(rename = "type")]
    kind: MessageType,
    code: &'static str,
    lang: Language,
}

impl SendOtp {
    pub fn auto(
        recipient: impl Into<String>,
        sender_id: impl Into<String>,
        kind: impl Into<MessageType>,
        lang: impl Into<Language>,
    ) -> Self {
        Self {
            recipient: recipient.into(),
            sender_id: sender_id.into(),
            kind: kind.into(),
            code: AUTO_OTP_CODE,
            lang: lang.into(),
        }
    }

    pub fn recipient(&self) -> &str {
        &self.recipient
    }

    pub fn sender_id(&self) -> &str {
        &self.sender_id
    }

    pub fn kind(&self) -> &MessageType {
        &self.kind
    }

    pub fn lang(&self) -> &Language {
        &self.lang
    }
}

impl ApiRequest for SendOtp {
    const ENDPOINT: Endpoint = Endpoint::SendOtp;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// Payload of the `verifyotp` endpoint.
pub struct VerifyOtp {
    recipient: String,
    code: String,
    id: String,
    #[serde(serialize_with = "serialize_yes_no")]
    expire: bool,
}

impl VerifyOtp {
    /// Verify `code` for the OTP transaction `id` (as returned by `sendotp`).
    ///
    /// The OTP is expired after a successful check; see [`VerifyOtp::expire`].
    pub fn new(recipient: impl Into<String>, code: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            recipient: recipient.into(),
            code: code.into(),
            id: id.into(),
            expire: true,
        }
    }

    /// Whether the gateway should expire the OTP after verification (`yes`/`no`).
    pub fn expire(mut self, expire: bool) -> Self {
        self.expire = expire;
        self
    }

    pub fn recipient(&self) -> &str {
        &self.recipient
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn expires(&self) -> bool {
        self.expire
    }
}

impl ApiRequest for VerifyOtp {
    const ENDPOINT: Endpoint = Endpoint::VerifyOtp;
}

fn serialize_yes_no<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(if *value { "yes" } else { "no" })
}
