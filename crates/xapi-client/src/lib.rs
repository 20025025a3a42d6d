//! Request handler for Experience API (xAPI) endpoints.
//!
//! This crate builds requests against an xAPI endpoint, sends them through a
//! pluggable transport, and turns rejected status codes into typed errors.
//! A reqwest-backed transport is included.
//!
//! ```no_run
//! use xapi_client::{EndpointConfig, HeaderOverrides, HttpRequestHandler, QueryParams};
//!
//! # async fn run() -> xapi_client::Result<()> {
//! let config = EndpointConfig::new("https://lrs.example.com/xapi")?;
//! let handler = HttpRequestHandler::from_config(&config, None)?;
//!
//! let params = QueryParams::new().with("limit", 10);
//! let headers = HeaderOverrides::new();
//! let request = handler.create_request("GET", "/statements", &params, None, &headers)?;
//! let response = handler.execute_request(request, &[200]).await?;
//! println!("{}", response.text());
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]

pub mod handler;
pub mod status;
pub mod transport;

pub use handler::{HttpRequestHandler, RequestHandler};
pub use status::FailureKind;
pub use transport::{
    BasicCredentials, BufferedBody, HttpRequest, HttpRequestFactory, HttpResponse,
    ReqwestTransport,
};
pub use xapi_core::config::EndpointConfig;
pub use xapi_core::{Error, HeaderOverrides, HttpMethod, QueryParams};

/// Convenient result alias that reuses the core error type.
pub type Result<T> = xapi_core::Result<T>;
