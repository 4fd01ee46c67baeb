//! HTTP client for the chat backend.
//!
//! The backend is an opaque collaborator reached over a single POST
//! endpoint: the request carries `{ text, lang }` and a successful reply
//! carries `{ reply }`. Everything else about the backend is its own
//! business.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Client as ReqwestClient, Response, header};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::client_logger::ClientLogger;
use crate::error::{Error, Result};
use crate::language::Language;
use crate::observability;

const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8000/chat";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// The JSON body sent with every exchange.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatRequest {
    /// The user's trimmed message text.
    pub text: String,
    /// The conversation language, serialized as its wire code.
    pub lang: Language,
}

/// The JSON body of a successful backend response.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ChatReply {
    /// The bot's reply. `None` when the field was missing or the body did
    /// not parse; the session substitutes the fixed fallback text.
    #[serde(default)]
    pub reply: Option<String>,
}

/// One request/response exchange with the backend.
///
/// The chat session is generic over this trait so the send lifecycle
/// composes uniformly with the HTTP client and with test doubles. Each
/// invocation resolves exactly once: a reply, or an error.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Performs one exchange and returns the parsed reply.
    async fn exchange(&self, request: &ChatRequest) -> Result<ChatReply>;
}

/// Client for the chat backend.
#[derive(Clone)]
pub struct BackendClient {
    client: ReqwestClient,
    endpoint: String,
    timeout: Duration,
    logger: Option<Arc<dyn ClientLogger>>,
}

impl BackendClient {
    /// Create a new client for the given endpoint, or the default local
    /// endpoint when `None`.
    pub fn new(endpoint: Option<String>) -> Result<Self> {
        Self::with_options(endpoint, None)
    }

    /// Create a new client with custom settings.
    pub fn with_options(endpoint: Option<String>, timeout: Option<Duration>) -> Result<Self> {
        let endpoint = endpoint.unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());
        Url::parse(&endpoint)
            .map_err(|err| Error::url(format!("invalid endpoint '{endpoint}': {err}"), Some(err)))?;

        let timeout = timeout.unwrap_or(DEFAULT_TIMEOUT);
        let client = ReqwestClient::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                Error::http_client(
                    format!("Failed to build HTTP client: {}", e),
                    Some(Box::new(e)),
                )
            })?;

        Ok(Self {
            client,
            endpoint,
            timeout,
            logger: None,
        })
    }

    /// Attaches a diagnostics logger that observes every exchange.
    pub fn with_logger(mut self, logger: Arc<dyn ClientLogger>) -> Self {
        self.logger = Some(logger);
        self
    }

    /// The endpoint this client posts to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Create and return default headers for backend requests.
    fn default_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));
        headers
    }

    fn log_failure(&self, error: &Error) {
        if let Some(logger) = &self.logger {
            logger.log_failure(error);
        }
    }

    /// Convert a non-success response into our Error type.
    async fn process_error_response(response: Response) -> Error {
        let status_code = response.status().as_u16();

        // Best-effort parse of a structured error body; the backend is not
        // required to provide one.
        #[derive(Deserialize)]
        struct ErrorResponse {
            error: Option<ErrorDetail>,
        }

        #[derive(Deserialize)]
        struct ErrorDetail {
            #[serde(rename = "type")]
            error_type: Option<String>,
            message: Option<String>,
        }

        let error_body = response.text().await.unwrap_or_default();
        let parsed = serde_json::from_str::<ErrorResponse>(&error_body).ok();
        let error_type = parsed
            .as_ref()
            .and_then(|e| e.error.as_ref())
            .and_then(|e| e.error_type.clone());
        let message = parsed
            .as_ref()
            .and_then(|e| e.error.as_ref())
            .and_then(|e| e.message.clone())
            .unwrap_or(error_body);

        Error::api(status_code, error_type, message)
    }
}

impl std::fmt::Debug for BackendClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackendClient")
            .field("endpoint", &self.endpoint)
            .field("timeout", &self.timeout)
            .field("logger", &self.logger.as_ref().map(|_| "..."))
            .finish()
    }
}

#[async_trait]
impl Transport for BackendClient {
    async fn exchange(&self, request: &ChatRequest) -> Result<ChatReply> {
        observability::CLIENT_REQUESTS.click();
        if let Some(logger) = &self.logger {
            logger.log_request(request);
        }

        let response = self
            .client
            .post(&self.endpoint)
            .headers(self.default_headers())
            .json(request)
            .send()
            .await
            .map_err(|e| {
                let err = if e.is_timeout() {
                    Error::timeout(
                        format!("Request timed out: {}", e),
                        Some(self.timeout.as_secs_f64()),
                    )
                } else if e.is_connect() {
                    Error::connection(format!("Connection error: {}", e), Some(Box::new(e)))
                } else {
                    Error::http_client(format!("Request failed: {}", e), Some(Box::new(e)))
                };
                observability::CLIENT_TRANSPORT_ERRORS.click();
                self.log_failure(&err);
                err
            })?;

        if !response.status().is_success() {
            let err = Self::process_error_response(response).await;
            observability::CLIENT_SERVER_ERRORS.click();
            self.log_failure(&err);
            return Err(err);
        }

        match response.json::<ChatReply>().await {
            Ok(reply) => {
                if let Some(logger) = &self.logger {
                    logger.log_reply(&reply);
                }
                Ok(reply)
            }
            Err(e) if e.is_decode() => {
                // A success status with an unparseable body counts as a
                // successful exchange; the session substitutes the fallback
                // reply. The cause still goes to diagnostics.
                let err = Error::serialization(
                    format!("Failed to parse reply: {}", e),
                    Some(Box::new(e)),
                );
                observability::CLIENT_MALFORMED_REPLIES.click();
                self.log_failure(&err);
                Ok(ChatReply::default())
            }
            Err(e) => {
                let err =
                    Error::http_client(format!("Failed to read reply: {}", e), Some(Box::new(e)));
                observability::CLIENT_TRANSPORT_ERRORS.click();
                self.log_failure(&err);
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_creation() {
        let client = BackendClient::new(None).unwrap();
        assert_eq!(client.endpoint(), DEFAULT_ENDPOINT);
        assert_eq!(client.timeout, DEFAULT_TIMEOUT);

        let client = BackendClient::with_options(
            Some("https://chat.example.com/chat".to_string()),
            Some(Duration::from_secs(5)),
        )
        .unwrap();
        assert_eq!(client.endpoint(), "https://chat.example.com/chat");
        assert_eq!(client.timeout, Duration::from_secs(5));
    }

    #[test]
    fn invalid_endpoint_is_rejected() {
        let err = BackendClient::new(Some("not a url".to_string())).unwrap_err();
        assert!(matches!(err, Error::Url { .. }));
    }

    #[test]
    fn request_serializes_wire_shape() {
        let request = ChatRequest {
            text: "Hello".to_string(),
            lang: Language::Hi,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json, serde_json::json!({"text": "Hello", "lang": "hi"}));
    }

    #[test]
    fn reply_tolerates_missing_field() {
        let reply: ChatReply = serde_json::from_str("{}").unwrap();
        assert_eq!(reply.reply, None);

        let reply: ChatReply = serde_json::from_str(r#"{"reply":"hi"}"#).unwrap();
        assert_eq!(reply.reply.as_deref(), Some("hi"));
    }
}
