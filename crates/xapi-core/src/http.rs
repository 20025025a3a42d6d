//! Boundary traits for the HTTP stack a request handler runs on.
//!
//! The handler never inspects a request beyond what it set itself and never
//! parses a response body. It only needs the small set of operations below,
//! so any HTTP client and message model can back it.
//!
//! Requests are values: [`OutboundRequest::with_header`] and
//! [`OutboundRequest::with_body`] consume the request and return the updated
//! one, so a built request is never shared while it is being assembled.

use crate::method::HttpMethod;
use crate::Result;
use async_trait::async_trait;

/// Writable request body stream.
pub trait BodyStream: Send {
    /// Write bytes at the current position, returning how many were written.
    ///
    /// # Errors
    ///
    /// Returns an error if the stream cannot accept the bytes.
    fn write(&mut self, bytes: &[u8]) -> Result<usize>;

    /// Move the position back to the start of the stream.
    ///
    /// # Errors
    ///
    /// Returns an error if the stream is not seekable.
    fn rewind(&mut self) -> Result<()>;
}

/// Outbound request under construction.
pub trait OutboundRequest: Send + Sized {
    /// Body stream type of this request.
    type Body: BodyStream;

    /// Add or replace a header.
    #[must_use]
    fn with_header(self, name: &str, value: &str) -> Self;

    /// Writable stream holding the current body.
    fn body(&self) -> Self::Body;

    /// Replace the body.
    #[must_use]
    fn with_body(self, body: Self::Body) -> Self;
}

/// Creates empty requests for a method and absolute URI.
pub trait RequestFactory: Send + Sync {
    /// Request type produced by this factory.
    type Request: OutboundRequest;

    /// Create a request.
    ///
    /// # Errors
    ///
    /// Returns an error if the URI cannot be used by this factory.
    fn create_request(&self, method: HttpMethod, uri: &str) -> Result<Self::Request>;
}

/// Response received from an endpoint.
pub trait ApiResponse: Send {
    /// HTTP status code.
    fn status_code(&self) -> u16;

    /// Response body as text.
    fn body_text(&self) -> String;
}

/// Sends requests over the network.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Request type accepted by this transport.
    type Request: Send + 'static;

    /// Response type produced by this transport.
    type Response: ApiResponse;

    /// Send a request and return the response, whatever its status code.
    ///
    /// # Errors
    ///
    /// Returns a transport error when no response was received.
    async fn send(&self, request: Self::Request) -> Result<Self::Response>;
}
