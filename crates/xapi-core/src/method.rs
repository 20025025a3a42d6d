//! HTTP methods allowed in an xAPI context.

use crate::error::Error;
use std::fmt;
use std::str::FromStr;

/// Comma separated list of the allowed methods, as shown in error messages.
pub const VALID_METHODS: &str = "GET, POST, PUT, DELETE";

/// HTTP method of an xAPI request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// `GET`
    Get,
    /// `POST`
    Post,
    /// `PUT`
    Put,
    /// `DELETE`
    Delete,
}

impl HttpMethod {
    /// Every allowed method, in the order used by error messages.
    pub const ALL: [Self; 4] = [Self::Get, Self::Post, Self::Put, Self::Delete];

    /// Uppercase method name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = Error;

    /// Parses a method name in any letter casing.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.to_ascii_uppercase();
        Self::ALL
            .into_iter()
            .find(|method| method.as_str() == upper)
            .ok_or(Error::InvalidMethod(upper))
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => Self::GET,
            HttpMethod::Post => Self::POST,
            HttpMethod::Put => Self::PUT,
            HttpMethod::Delete => Self::DELETE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_any_casing() {
        for (input, expected) in [
            ("get", HttpMethod::Get),
            ("GET", HttpMethod::Get),
            ("Post", HttpMethod::Post),
            ("pUt", HttpMethod::Put),
            ("delete", HttpMethod::Delete),
        ] {
            assert_eq!(input.parse::<HttpMethod>().unwrap(), expected);
        }
    }

    #[test]
    fn rejects_other_methods_with_uppercased_name() {
        for input in ["patch", "OPTIONS", "head", ""] {
            let err = input.parse::<HttpMethod>().unwrap_err();
            assert_eq!(err, Error::InvalidMethod(input.to_ascii_uppercase()));
        }
    }

    #[test]
    fn valid_methods_matches_all() {
        let joined = HttpMethod::ALL
            .iter()
            .map(|method| method.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        assert_eq!(joined, VALID_METHODS);
    }

    #[test]
    fn converts_to_reqwest_method() {
        assert_eq!(reqwest::Method::from(HttpMethod::Put), reqwest::Method::PUT);
        assert_eq!(HttpMethod::Delete.to_string(), "DELETE");
    }
}
