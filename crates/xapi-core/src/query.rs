//! Ordered query parameters for xAPI requests.
//!
//! Parameters behave like a mapping from name to scalar value that remembers
//! insertion order, so the rendered query string is deterministic and matches
//! the order in which the caller supplied the parameters.

use std::fmt::Display;
use url::form_urlencoded::byte_serialize;

/// Builder for assembling query parameter pairs.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    /// Create a new, empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self { pairs: Vec::new() }
    }

    /// Set a parameter. An existing parameter keeps its position and gets the new value.
    pub fn push<T>(&mut self, key: impl Into<String>, value: T)
    where
        T: Display,
    {
        let key = key.into();
        let value = value.to_string();
        match self.pairs.iter_mut().find(|(existing, _)| *existing == key) {
            Some(pair) => pair.1 = value,
            None => self.pairs.push((key, value)),
        }
    }

    /// Builder-style variant of [`QueryParams::push`].
    #[must_use]
    pub fn with<T>(mut self, key: impl Into<String>, value: T) -> Self
    where
        T: Display,
    {
        self.push(key, value);
        self
    }

    /// Set a parameter when the value is present.
    pub fn push_opt<T>(&mut self, key: impl Into<String>, value: Option<T>)
    where
        T: Display,
    {
        if let Some(value) = value {
            self.push(key, value);
        }
    }

    /// Set a parameter using a mapping function when the value is present.
    pub fn push_opt_with<T, F>(&mut self, key: impl Into<String>, value: Option<T>, mut map: F)
    where
        F: FnMut(T) -> String,
    {
        if let Some(value) = value {
            self.push(key, map(value));
        }
    }

    /// Iterate over the parameters in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    /// Number of parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Returns true if no parameters have been added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Render `name=value` pairs joined by `&`, both sides form-urlencoded.
    ///
    /// Spaces become `+`; `*`, `-`, `.` and `_` are left as is, which servers
    /// decode the same as their percent-escaped forms.
    #[must_use]
    pub fn to_query_string(&self) -> String {
        self.pairs
            .iter()
            .map(|(key, value)| format!("{}={}", encode(key), encode(value)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

fn encode(input: &str) -> String {
    byte_serialize(input.as_bytes()).collect()
}

impl<K, V> FromIterator<(K, V)> for QueryParams
where
    K: Into<String>,
    V: Display,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (key, value) in iter {
            params.push(key, value);
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::QueryParams;

    #[test]
    fn renders_in_insertion_order() {
        let params = QueryParams::new()
            .with("statementId", "12345678-1234-5678-1234-567812345678")
            .with("limit", 10);
        assert_eq!(
            params.to_query_string(),
            "statementId=12345678-1234-5678-1234-567812345678&limit=10"
        );

        let reversed = QueryParams::new().with("limit", 10).with("statementId", "X");
        assert_eq!(reversed.to_query_string(), "limit=10&statementId=X");
    }

    #[test]
    fn encodes_names_and_values() {
        let params = QueryParams::new()
            .with("agent", r#"{"mbox":"mailto:a@example.com"}"#)
            .with("since date", "2024-01-01T00:00:00+00:00");
        assert_eq!(
            params.to_query_string(),
            "agent=%7B%22mbox%22%3A%22mailto%3Aa%40example.com%22%7D\
             &since+date=2024-01-01T00%3A00%3A00%2B00%3A00"
        );
    }

    #[test]
    fn leaves_unreserved_marks_unescaped() {
        let params = QueryParams::new().with("etag", "*").with("id", "a-b.c_d~");
        assert_eq!(params.to_query_string(), "etag=*&id=a-b.c_d%7E");
    }

    #[test]
    fn push_replaces_existing_value_in_place() {
        let mut params = QueryParams::new().with("limit", 10).with("ascending", true);
        params.push("limit", 25);
        assert_eq!(params.len(), 2);
        assert_eq!(params.to_query_string(), "limit=25&ascending=true");
    }

    #[test]
    fn push_opt_skips_none() {
        let mut params = QueryParams::new();
        params.push_opt("registration", Option::<String>::None);
        assert!(params.is_empty());
        assert_eq!(params.to_query_string(), "");
    }

    #[test]
    fn push_opt_with_applies_mapper() {
        let mut params = QueryParams::new();
        params.push_opt_with("limit", Some(5u32), |v| format!("{v:02}"));
        assert_eq!(params.iter().collect::<Vec<_>>(), vec![("limit", "05")]);
    }

    #[test]
    fn collects_from_pairs() {
        let params: QueryParams = [("format", "exact"), ("attachments", "false")]
            .into_iter()
            .collect();
        assert_eq!(params.to_query_string(), "format=exact&attachments=false");
    }
}
