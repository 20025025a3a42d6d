//! Request construction and response dispatch for xAPI endpoints.
//!
//! [`RequestHandler::create_request`] turns a logical request into an
//! outbound request without any I/O. [`RequestHandler::execute_request`]
//! sends it once and either hands back the response or classifies the status
//! code into an error.

use crate::status;
use crate::transport::{BasicCredentials, HttpRequestFactory, ReqwestTransport};
use crate::Result;
use tracing::{debug, warn};
use xapi_core::config::EndpointConfig;
use xapi_core::headers::{CONTENT_TYPE_HEADER, JSON_CONTENT_TYPE, VERSION_HEADER};
use xapi_core::http::{ApiResponse, BodyStream, OutboundRequest, RequestFactory, Transport};
use xapi_core::{HeaderOverrides, HttpMethod, QueryParams};

/// Builds requests against one xAPI endpoint and dispatches them.
///
/// The handler holds no mutable state; it can be shared between tasks as
/// long as its transport and factory can.
#[derive(Debug, Clone)]
pub struct RequestHandler<T, F> {
    transport: T,
    factory: F,
    base_url: String,
    version: String,
}

/// Request handler running on reqwest.
pub type HttpRequestHandler = RequestHandler<ReqwestTransport, HttpRequestFactory>;

impl<T, F> RequestHandler<T, F>
where
    F: RequestFactory,
    T: Transport<Request = F::Request>,
{
    /// Create a handler for the endpoint at `base_url`, announcing `version`.
    pub fn new(
        transport: T,
        factory: F,
        base_url: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            transport,
            factory,
            base_url,
            version: version.into(),
        }
    }

    /// Endpoint base URL, without trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Announced xAPI version.
    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Build a request.
    ///
    /// Header overrides are applied first, in order. The version and
    /// content type headers follow, each only when the overrides did not set
    /// it (names compared ignoring ASCII case). A body, when given, is
    /// written to the request's body stream, which is then rewound and
    /// attached.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidMethod`](xapi_core::Error::InvalidMethod) when
    /// `method` is not one of `GET`, `POST`, `PUT`, `DELETE` in any casing,
    /// or any error raised by the request factory or the body stream.
    pub fn create_request(
        &self,
        method: &str,
        path: &str,
        params: &QueryParams,
        body: Option<&str>,
        headers: &HeaderOverrides,
    ) -> Result<F::Request> {
        let method: HttpMethod = method.parse()?;
        let uri = self.resolve_uri(path, params);
        debug!(%method, %uri, "Building xAPI request");

        let mut request = self.factory.create_request(method, &uri)?;

        for (name, value) in headers.iter() {
            request = request.with_header(name, value);
        }
        if !headers.contains(VERSION_HEADER) {
            request = request.with_header(VERSION_HEADER, &self.version);
        }
        if !headers.contains(CONTENT_TYPE_HEADER) {
            request = request.with_header(CONTENT_TYPE_HEADER, JSON_CONTENT_TYPE);
        }

        if let Some(body) = body {
            let mut stream = request.body();
            stream.write(body.as_bytes())?;
            stream.rewind()?;
            request = request.with_body(stream);
        }

        Ok(request)
    }

    /// Send a request and check its status against `acceptable`.
    ///
    /// An accepted response is returned untouched. Otherwise the body is read
    /// once and the status is mapped: 401 and 403 to `AccessDenied`, 404 to
    /// `NotFound`, 409 to `Conflict`, anything else to `UnexpectedStatus`.
    ///
    /// # Errors
    ///
    /// Returns the classified failure, or the transport error unchanged.
    pub async fn execute_request(
        &self,
        request: F::Request,
        acceptable: &[u16],
    ) -> Result<T::Response> {
        let response = self.transport.send(request).await?;
        let status = response.status_code();

        if acceptable.contains(&status) {
            debug!(status, "xAPI response accepted");
            return Ok(response);
        }

        let body = response.body_text();
        warn!(status, ?acceptable, "xAPI request rejected");
        Err(status::classify(status, body))
    }

    fn resolve_uri(&self, path: &str, params: &QueryParams) -> String {
        let mut uri = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        if !params.is_empty() {
            uri.push('?');
            uri.push_str(&params.to_query_string());
        }
        uri
    }
}

impl HttpRequestHandler {
    /// Build a reqwest-backed handler from an endpoint configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`](xapi_core::Error::ConfigError) if the
    /// configuration is invalid or the HTTP client cannot be built.
    pub fn from_config(
        config: &EndpointConfig,
        credentials: Option<BasicCredentials>,
    ) -> Result<Self> {
        config.check()?;
        let base_url = config.parse_base_url()?;

        let mut transport = ReqwestTransport::new(config)?;
        if let Some(credentials) = credentials {
            transport = transport.with_credentials(credentials);
        }

        Ok(Self::new(
            transport,
            HttpRequestFactory::new(),
            base_url.as_str(),
            config.version.as_str(),
        ))
    }
}
