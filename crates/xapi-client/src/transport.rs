//! reqwest-backed transport and request/response model.
//!
//! [`HttpRequest`] is a plain value describing an outbound request. The
//! request handler assembles it through [`OutboundRequest`], and
//! [`ReqwestTransport`] turns it into a real HTTP round-trip, buffering the
//! whole response so its body can be read any number of times.

use crate::Result;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, ClientBuilder, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};
use url::Url;
use xapi_core::config::EndpointConfig;
use xapi_core::headers::AUTHORIZATION_HEADER;
use xapi_core::http::{ApiResponse, BodyStream, OutboundRequest, RequestFactory, Transport};
use xapi_core::{Error, HttpMethod};

const USER_AGENT: &str = concat!("xapi-client/", env!("CARGO_PKG_VERSION"));
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// In-memory request body with a write cursor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BufferedBody {
    bytes: Vec<u8>,
    position: usize,
}

impl BufferedBody {
    /// Create an empty body.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current write position.
    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    /// Body content.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Consume the body, returning its content.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

impl BodyStream for BufferedBody {
    fn write(&mut self, bytes: &[u8]) -> Result<usize> {
        let end = self.position + bytes.len();
        if end > self.bytes.len() {
            self.bytes.resize(end, 0);
        }
        self.bytes[self.position..end].copy_from_slice(bytes);
        self.position = end;
        Ok(bytes.len())
    }

    fn rewind(&mut self) -> Result<()> {
        self.position = 0;
        Ok(())
    }
}

/// Outbound HTTP request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    method: HttpMethod,
    url: Url,
    headers: Vec<(String, String)>,
    body: Option<BufferedBody>,
}

impl HttpRequest {
    /// Create a request without headers or body.
    #[must_use]
    pub fn new(method: HttpMethod, url: Url) -> Self {
        Self {
            method,
            url,
            headers: Vec::new(),
            body: None,
        }
    }

    /// Request method.
    #[must_use]
    pub fn method(&self) -> HttpMethod {
        self.method
    }

    /// Absolute request URL.
    #[must_use]
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Headers in the order they were first set.
    pub fn headers(&self) -> impl Iterator<Item = (&str, &str)> {
        self.headers
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// Value of a header, ignoring ASCII case in the name.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Body content, if a body was attached.
    #[must_use]
    pub fn body_bytes(&self) -> Option<&[u8]> {
        self.body.as_ref().map(BufferedBody::as_bytes)
    }

    fn header_map(&self) -> Result<HeaderMap> {
        let mut map = HeaderMap::with_capacity(self.headers.len());
        for (name, value) in &self.headers {
            let header_name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|err| Error::InvalidHeader(format!("`{name}`: {err}")))?;
            let header_value = HeaderValue::from_str(value)
                .map_err(|err| Error::InvalidHeader(format!("value of `{name}`: {err}")))?;
            map.insert(header_name, header_value);
        }
        Ok(map)
    }
}

impl OutboundRequest for HttpRequest {
    type Body = BufferedBody;

    fn with_header(mut self, name: &str, value: &str) -> Self {
        match self
            .headers
            .iter_mut()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(name))
        {
            Some(entry) => *entry = (name.to_string(), value.to_string()),
            None => self.headers.push((name.to_string(), value.to_string())),
        }
        self
    }

    fn body(&self) -> BufferedBody {
        self.body.clone().unwrap_or_default()
    }

    fn with_body(mut self, body: BufferedBody) -> Self {
        self.body = Some(body);
        self
    }
}

/// Creates [`HttpRequest`] values from absolute URIs.
#[derive(Debug, Clone, Copy, Default)]
pub struct HttpRequestFactory;

impl HttpRequestFactory {
    /// Create a factory.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl RequestFactory for HttpRequestFactory {
    type Request = HttpRequest;

    fn create_request(&self, method: HttpMethod, uri: &str) -> Result<HttpRequest> {
        let url = Url::parse(uri)?;
        Ok(HttpRequest::new(method, url))
    }
}

/// Fully buffered HTTP response.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: Vec<u8>,
}

impl HttpResponse {
    /// Create a response from its parts.
    #[must_use]
    pub fn new(status: StatusCode, headers: HeaderMap, body: Vec<u8>) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// Response status.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Response headers.
    #[must_use]
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Raw body.
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.body
    }

    /// Body decoded as UTF-8, replacing invalid sequences.
    #[must_use]
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

impl ApiResponse for HttpResponse {
    fn status_code(&self) -> u16 {
        self.status.as_u16()
    }

    fn body_text(&self) -> String {
        self.text()
    }
}

/// HTTP basic credentials sent with every request that has no `Authorization` header.
#[derive(Debug)]
pub struct BasicCredentials {
    username: String,
    password: SecretString,
}

impl BasicCredentials {
    /// Create credentials.
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: SecretString::new(password.into().into_boxed_str()),
        }
    }

    /// Login name.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }
}

/// [`Transport`] implementation on top of a reqwest [`Client`].
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    http: Client,
    credentials: Option<Arc<BasicCredentials>>,
}

impl ReqwestTransport {
    /// Build a transport using the timeout and user agent of `config`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] if the HTTP client cannot be built.
    pub fn new(config: &EndpointConfig) -> Result<Self> {
        let user_agent = config.user_agent.as_deref().unwrap_or(USER_AGENT);
        let http = ClientBuilder::new()
            .user_agent(user_agent)
            .timeout(config.timeout())
            .connect_timeout(CONNECT_TIMEOUT)
            .build()
            .map_err(|err| Error::ConfigError(format!("Failed to build HTTP client: {err}")))?;

        Ok(Self::from_client(http))
    }

    /// Wrap an existing reqwest client.
    #[must_use]
    pub fn from_client(http: Client) -> Self {
        Self {
            http,
            credentials: None,
        }
    }

    /// Authenticate requests with HTTP basic credentials.
    #[must_use]
    pub fn with_credentials(mut self, credentials: BasicCredentials) -> Self {
        self.credentials = Some(Arc::new(credentials));
        self
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    type Request = HttpRequest;
    type Response = HttpResponse;

    async fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        let headers = request.header_map()?;
        let mut builder = self
            .http
            .request(request.method.into(), request.url.clone())
            .headers(headers);

        if let Some(credentials) = &self.credentials {
            if request.header(AUTHORIZATION_HEADER).is_none() {
                builder = builder.basic_auth(
                    &credentials.username,
                    Some(credentials.password.expose_secret()),
                );
            }
        }

        info!(method = %request.method, url = %request.url, "Sending xAPI request");

        if let Some(body) = request.body {
            builder = builder.body(body.into_bytes());
        }

        let response = builder.send().await?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await?.to_vec();
        debug!(status = status.as_u16(), bytes = body.len(), "Received xAPI response");

        Ok(HttpResponse::new(status, headers, body))
    }
}
