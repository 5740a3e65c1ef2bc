//! Client layer: builds payloads, runs the HTTP exchange and decodes responses.

use std::error::Error as StdError;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderName};

use crate::domain::{
    ApiRequest, ApiResponse, Language, MessageType, SendCredentials, SendMessage, SendOtp,
    VerifyOtp,
};

const DEFAULT_BASE_URL: &str = "https://gateway.standingtech.com/api/v4/sms/";
const JSON_MIME: &str = "application/json";

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

#[derive(Debug, Clone)]
struct HttpResponse {
    status: u16,
    body: String,
}

trait HttpTransport: Send + Sync {
    fn post_json<'a>(
        &'a self,
        url: &'a str,
        headers: Vec<(HeaderName, String)>,
        body: Vec<u8>,
    ) -> BoxFuture<'a, Result<HttpResponse, BulkSmsError>>;
}

#[derive(Debug, Clone)]
struct ReqwestTransport {
    client: reqwest::Client,
}

impl HttpTransport for ReqwestTransport {
    fn post_json<'a>(
        &'a self,
        url: &'a str,
        headers: Vec<(HeaderName, String)>,
        body: Vec<u8>,
    ) -> BoxFuture<'a, Result<HttpResponse, BulkSmsError>> {
        Box::pin(async move {
            let mut request = self.client.post(url);
            for (name, value) in headers {
                request = request.header(name, value);
            }
            let response = request.body(body).send().await.map_err(BulkSmsError::from_reqwest)?;
            let status = response.status().as_u16();
            let body = response.text().await.map_err(|err| BulkSmsError::Transport {
                status: Some(status),
                source: Box::new(err),
            })?;
            Ok(HttpResponse { status, body })
        })
    }
}

#[derive(Debug, thiserror::Error)]
/// Errors returned by [`BulkSmsClient`].
///
/// Only failures of the HTTP exchange itself are errors. A body that is not
/// valid JSON is reported through [`ApiResponse::is_invalid_json`], and
/// gateway-level failures stay inside the decoded [`ApiResponse`].
pub enum BulkSmsError {
    /// Connection, DNS, TLS, timeout or body read failure.
    ///
    /// `status` is set when the server had already answered with a status line.
    #[error("transport error{}: {source}", status_suffix(.status))]
    Transport {
        status: Option<u16>,
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },

    /// The configured base URL is not an absolute URL that endpoint paths can
    /// be appended to.
    #[error("invalid base URL {url:?}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    /// The request payload could not be serialized.
    #[error("encode error: {0}")]
    Encode(#[source] serde_json::Error),
}

impl BulkSmsError {
    fn from_reqwest(err: reqwest::Error) -> Self {
        Self::Transport {
            status: err.status().map(|status| status.as_u16()),
            source: Box::new(err),
        }
    }

    /// True for failures of the HTTP exchange.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }

    /// HTTP status attached to a transport failure, if one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Transport { status, .. } => *status,
            _ => None,
        }
    }
}

fn status_suffix(status: &Option<u16>) -> String {
    status
        .map(|status| format!(" (HTTP {status})"))
        .unwrap_or_default()
}

#[derive(Debug, Clone)]
/// Builder for [`BulkSmsClient`].
///
/// Use this when you need to point the client at another gateway (for example
/// a mock server), or to set a timeout or user-agent.
pub struct BulkSmsClientBuilder {
    api_key: String,
    base_url: String,
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl BulkSmsClientBuilder {
    /// Create a builder with the default base URL and no timeout/user-agent override.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_owned(),
            timeout: None,
            user_agent: None,
        }
    }

    /// Override the API base URL (default `https://gateway.standingtech.com/api/v4/sms/`).
    ///
    /// Endpoint paths are appended to it; a trailing `/` is added if missing.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set an HTTP client timeout applied to the entire request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Override the HTTP `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Build a [`BulkSmsClient`].
    pub fn build(self) -> Result<BulkSmsClient, BulkSmsError> {
        let base_url = normalize_base_url(&self.base_url)?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(user_agent) = self.user_agent {
            builder = builder.user_agent(user_agent);
        }

        let client = builder.build().map_err(BulkSmsError::from_reqwest)?;

        Ok(BulkSmsClient {
            api_key: self.api_key,
            base_url,
            http: Arc::new(ReqwestTransport { client }),
        })
    }
}

fn normalize_base_url(raw: &str) -> Result<String, BulkSmsError> {
    let invalid = |reason: String| BulkSmsError::InvalidBaseUrl {
        url: raw.to_owned(),
        reason,
    };

    let mut url = url::Url::parse(raw.trim()).map_err(|err| invalid(err.to_string()))?;
    if url.cannot_be_a_base() {
        return Err(invalid("not a hierarchical URL".to_owned()));
    }
    // Endpoint paths are appended verbatim, so nothing may follow the path.
    if url.query().is_some() || url.fragment().is_some() {
        return Err(invalid("query strings and fragments are not supported".to_owned()));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url.into())
}

#[derive(Clone)]
/// Bulk SMS Iraq V4 client.
///
/// Holds the API key and sends each operation as an authenticated JSON `POST`
/// to `<base_url><endpoint>`. The client has no mutable state; clone it freely
/// and share it across tasks.
pub struct BulkSmsClient {
    api_key: String,
    base_url: String,
    http: Arc<dyn HttpTransport>,
}

impl fmt::Debug for BulkSmsClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BulkSmsClient")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl BulkSmsClient {
    /// Create a client using the default base URL.
    ///
    /// The key is not checked locally; a wrong key surfaces as an
    /// authentication error in the gateway's response.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_owned(),
            http: Arc::new(ReqwestTransport {
                client: reqwest::Client::new(),
            }),
        }
    }

    /// Start building a client with custom settings.
    pub fn builder(api_key: impl Into<String>) -> BulkSmsClientBuilder {
        BulkSmsClientBuilder::new(api_key)
    }

    /// Base URL endpoint paths are appended to (always ends with `/`).
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Send a WhatsApp message in English.
    pub async fn send_whatsapp_english(
        &self,
        recipient: impl Into<String>,
        sender_id: impl Into<String>,
        message: impl Into<String>,
    ) -> Result<ApiResponse, BulkSmsError> {
        self.send_as(recipient, sender_id, MessageType::WhatsApp, Language::English, message)
            .await
    }

    /// Send a WhatsApp message in Arabic.
    pub async fn send_whatsapp_arabic(
        &self,
        recipient: impl Into<String>,
        sender_id: impl Into<String>,
        message: impl Into<String>,
    ) -> Result<ApiResponse, BulkSmsError> {
        self.send_as(recipient, sender_id, MessageType::WhatsApp, Language::Arabic, message)
            .await
    }

    /// Send a WhatsApp message in Kurdish.
    pub async fn send_whatsapp_kurdish(
        &self,
        recipient: impl Into<String>,
        sender_id: impl Into<String>,
        message: impl Into<String>,
    ) -> Result<ApiResponse, BulkSmsError> {
        self.send_as(recipient, sender_id, MessageType::WhatsApp, Language::Kurdish, message)
            .await
    }

    /// Send a Unicode SMS, typically Arabic (`ar`) or Kurdish (`ku`).
    pub async fn send_sms_unicode(
        &self,
        recipient: impl Into<String>,
        sender_id: impl Into<String>,
        message: impl Into<String>,
        lang: impl Into<Language>,
    ) -> Result<ApiResponse, BulkSmsError> {
        self.send_as(recipient, sender_id, MessageType::Unicode, lang, message)
            .await
    }

    /// Send a plain (Latin-only) English SMS.
    pub async fn send_sms_english(
        &self,
        recipient: impl Into<String>,
        sender_id: impl Into<String>,
        message: impl Into<String>,
    ) -> Result<ApiResponse, BulkSmsError> {
        self.send_as(recipient, sender_id, MessageType::Plain, Language::English, message)
            .await
    }

    /// Send an OTP over Telegram. `message` carries the code.
    pub async fn send_telegram_otp(
        &self,
        recipient: impl Into<String>,
        sender_id: impl Into<String>,
        message: impl Into<String>,
    ) -> Result<ApiResponse, BulkSmsError> {
        self.send_as(recipient, sender_id, MessageType::Telegram, Language::English, message)
            .await
    }

    /// Send a templated credentials message (`send/credentials`).
    #[allow(clippy::too_many_arguments)]
    pub async fn send_credentials(
        &self,
        recipient: impl Into<String>,
        sender_id: impl Into<String>,
        kind: impl Into<MessageType>,
        lang: impl Into<Language>,
        param1: impl Into<String>,
        param2: impl Into<String>,
        param3: impl Into<String>,
    ) -> Result<ApiResponse, BulkSmsError> {
        let request = SendCredentials::new(
            recipient,
            sender_id,
            kind,
            lang,
            [param1.into(), param2.into(), param3.into()],
        );
        self.make_request(&request).await
    }

    /// Ask the gateway to generate and deliver an OTP (`sendotp`, `code=auto`).
    ///
    /// The response carries the transaction id needed by [`BulkSmsClient::verify_otp`].
    pub async fn send_auto_otp(
        &self,
        recipient: impl Into<String>,
        sender_id: impl Into<String>,
        kind: impl Into<MessageType>,
        lang: impl Into<Language>,
    ) -> Result<ApiResponse, BulkSmsError> {
        self.make_request(&SendOtp::auto(recipient, sender_id, kind, lang))
            .await
    }

    /// Verify an OTP and expire it on the gateway (`expire=yes`).
    pub async fn verify_otp(
        &self,
        recipient: impl Into<String>,
        code: impl Into<String>,
        id: impl Into<String>,
    ) -> Result<ApiResponse, BulkSmsError> {
        self.verify_otp_with_expire(recipient, code, id, true).await
    }

    /// Verify an OTP, choosing whether the gateway expires it (`yes`/`no`).
    pub async fn verify_otp_with_expire(
        &self,
        recipient: impl Into<String>,
        code: impl Into<String>,
        id: impl Into<String>,
        expire: bool,
    ) -> Result<ApiResponse, BulkSmsError> {
        self.make_request(&VerifyOtp::new(recipient, code, id).expire(expire))
            .await
    }

    /// Post a prepared `send` payload. Every named send operation ends up here.
    pub async fn send_message(&self, request: SendMessage) -> Result<ApiResponse, BulkSmsError> {
        self.make_request(&request).await
    }

    async fn send_as(
        &self,
        recipient: impl Into<String>,
        sender_id: impl Into<String>,
        kind: MessageType,
        lang: impl Into<Language>,
        message: impl Into<String>,
    ) -> Result<ApiResponse, BulkSmsError> {
        self.send_message(SendMessage::new(recipient, sender_id, kind, lang, message))
            .await
    }

    #[tracing::instrument(level = "debug", skip_all, fields(endpoint = %R::ENDPOINT))]
    async fn make_request<R: ApiRequest>(&self, request: &R) -> Result<ApiResponse, BulkSmsError> {
        let url = format!("{}{}", self.base_url, R::ENDPOINT.path());
        let body = crate::transport::encode_json_body(request).map_err(BulkSmsError::Encode)?;
        let headers = vec![
            (AUTHORIZATION, format!("Bearer {}", self.api_key)),
            (CONTENT_TYPE, JSON_MIME.to_owned()),
            (ACCEPT, JSON_MIME.to_owned()),
        ];

        let response = match self.http.post_json(&url, headers, body).await {
            Ok(response) => response,
            Err(err) => {
                tracing::debug!(error = %err, "bulksms request failed");
                return Err(err);
            }
        };
        tracing::debug!(status = response.status, "bulksms response received");

        let decoded = crate::transport::decode_json_response(&response.body);
        if decoded.is_invalid_json() {
            tracing::warn!(
                status = response.status,
                body_len = response.body.len(),
                "bulksms response is not a JSON object"
            );
        }
        Ok(decoded)
    }
}
