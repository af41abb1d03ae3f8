//! Request and response message types.
//!
//! The pipeline treats the transport as an external collaborator: [`Request`]
//! exposes only what wrappers need (caller address, routing attributes,
//! headers, raw body) and [`Response`] is a plain `http::Response` with a
//! `Full<Bytes>` body, ready to hand back to whatever server owns the
//! connection.
//!
//! [`MessageProcessor`] is the seam between verb dispatch and representation:
//! it decodes request payloads and builds success/error responses. The stock
//! implementation is [`JsonMessageProcessor`].

use crate::error::{Error, Result};
use crate::repository::Resource;
use bytes::Bytes;
use http::{HeaderMap, StatusCode};
use http_body_util::Full;
use std::net::IpAddr;

/// The wildcard content-type marker, resolved against the default writer.
pub const CONTENT_TYPE_WILDCARD: &str = "*/*";

/// The HTTP response type produced by the pipeline.
pub type Response = http::Response<Full<Bytes>>;

/// A decoded request payload: a flat JSON object.
pub type Payload = serde_json::Map<String, serde_json::Value>;

/// An incoming request as seen by the pipeline.
///
/// Routing has already happened by the time a request enters the pipeline:
/// the repository `key` (and `id`, where the verb needs one) arrive as
/// attributes resolved by the external router.
///
/// # Example
///
/// ```
/// use janus_core::Request;
///
/// let request = Request::new("users")
///     .with_id("u42")
///     .with_client_addr("10.0.0.7".parse().unwrap());
///
/// assert_eq!(request.key(), "users");
/// assert_eq!(request.id(), Some("u42"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Request {
    /// Repository key resolved by the router.
    key: String,
    /// Resource identifier, when the route carries one.
    id: Option<String>,
    /// Request headers.
    headers: HeaderMap,
    /// Address of the caller, as reported by the transport.
    client_addr: Option<IpAddr>,
    /// Raw request body.
    body: Bytes,
}

impl Request {
    /// Creates a request addressed at the given repository key.
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ..Self::default()
        }
    }

    /// Sets the resource identifier.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Sets the caller address.
    #[must_use]
    pub fn with_client_addr(mut self, addr: IpAddr) -> Self {
        self.client_addr = Some(addr);
        self
    }

    /// Sets the raw request body.
    #[must_use]
    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    /// Adds a header, replacing any previous value for the name.
    #[must_use]
    pub fn with_header(mut self, name: http::header::HeaderName, value: &str) -> Self {
        if let Ok(value) = http::HeaderValue::from_str(value) {
            self.headers.insert(name, value);
        }
        self
    }

    /// Returns the repository key.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns the resource identifier, if the route carried one.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Returns the resource identifier or a bad-request error.
    ///
    /// Verbs addressing a single item require an identifier; a route that
    /// failed to provide one is malformed input, not a server fault.
    pub fn require_id(&self) -> Result<&str> {
        self.id
            .as_deref()
            .ok_or_else(|| Error::bad_request("missing resource id"))
    }

    /// Returns the request headers.
    #[must_use]
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Returns the caller address, if the transport reported one.
    #[must_use]
    pub fn client_addr(&self) -> Option<IpAddr> {
        self.client_addr
    }

    /// Returns the content type the caller accepts.
    ///
    /// Absent or unreadable `Accept` headers fall back to the wildcard, which
    /// the format-writer registry resolves to the default writer.
    #[must_use]
    pub fn accepted_content_type(&self) -> &str {
        self.headers
            .get(http::header::ACCEPT)
            .and_then(|v| v.to_str().ok())
            .unwrap_or(CONTENT_TYPE_WILDCARD)
    }

    /// Returns the raw request body.
    #[must_use]
    pub fn body(&self) -> &Bytes {
        &self.body
    }
}

/// Decodes request payloads and builds wire responses.
///
/// This is the message/response-builder collaborator of the pipeline: the
/// accessor wrapper delegates payload extraction and response construction
/// here, so representation concerns stay out of verb dispatch.
pub trait MessageProcessor: Send + Sync {
    /// Decodes the request body into a structured payload.
    ///
    /// A decode failure is a terminal error for the invocation and flows
    /// through the same translation path as repository errors.
    fn decode_payload(&self, request: &Request) -> Result<Payload>;

    /// Builds a success response, wrapping the resource when one exists.
    ///
    /// `None` produces an empty-bodied success (the delete case).
    fn build_success(&self, request: &Request, resource: Option<&Resource>) -> Response;

    /// Builds an error response for the given status and optional message.
    fn build_error(&self, status: StatusCode, message: Option<&str>) -> Response;
}

/// JSON message processor: payloads are JSON objects, errors use a JSON
/// envelope.
#[derive(Debug, Clone, Default)]
pub struct JsonMessageProcessor;

impl JsonMessageProcessor {
    /// Creates a new JSON message processor.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl MessageProcessor for JsonMessageProcessor {
    fn decode_payload(&self, request: &Request) -> Result<Payload> {
        if request.body().is_empty() {
            return Ok(Payload::new());
        }
        let payload = serde_json::from_slice::<Payload>(request.body())?;
        Ok(payload)
    }

    fn build_success(&self, _request: &Request, resource: Option<&Resource>) -> Response {
        let body = resource
            .map(|r| serde_json::to_vec(r.data()).unwrap_or_default())
            .unwrap_or_default();

        http::Response::builder()
            .status(StatusCode::OK)
            .header(http::header::CONTENT_TYPE, "application/json")
            .body(Full::new(Bytes::from(body)))
            .expect("response builder with static parts cannot fail")
    }

    fn build_error(&self, status: StatusCode, message: Option<&str>) -> Response {
        // 204 and friends carry no body.
        if status == StatusCode::NO_CONTENT {
            return http::Response::builder()
                .status(status)
                .body(Full::new(Bytes::new()))
                .expect("response builder with static parts cannot fail");
        }

        let message = message
            .map(ToString::to_string)
            .unwrap_or_else(|| status.canonical_reason().unwrap_or("Unknown error").to_string());

        let envelope = serde_json::json!({
            "error": {
                "status": status.as_u16(),
                "message": message,
            }
        });

        http::Response::builder()
            .status(status)
            .header(http::header::CONTENT_TYPE, "application/json")
            .body(Full::new(Bytes::from(envelope.to_string())))
            .expect("response builder with static parts cannot fail")
    }
}
