//! # xapi-core
//!
//! Core types and boundary traits for talking to an Experience API (xAPI)
//! endpoint.
//!
//! This crate holds everything a request handler needs that is independent
//! of a concrete HTTP stack: the error taxonomy, the fixed method set, query
//! and header collections, endpoint configuration, and the traits a transport
//! and its request/response object model must implement.
//!
//! ## Modules
//!
//! - [`error`] - Error types, including the status-driven API failures
//! - [`method`] - The HTTP methods allowed in an xAPI context
//! - [`query`] - Ordered query parameters and their URL encoding
//! - [`headers`] - Reserved header names and caller header overrides
//! - [`config`] - Endpoint configuration
//! - [`http`] - Transport, request factory, and message object traits

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod headers;
pub mod http;
pub mod method;
pub mod query;

pub use error::{Error, Result};
pub use headers::HeaderOverrides;
pub use method::HttpMethod;
pub use query::QueryParams;
