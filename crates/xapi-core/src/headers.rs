//! Reserved xAPI header names and caller-supplied header overrides.

/// Header carrying the xAPI version the client expects the endpoint to honor.
pub const VERSION_HEADER: &str = "X-Experience-API-Version";

/// Content type header name.
pub const CONTENT_TYPE_HEADER: &str = "Content-Type";

/// Content type sent unless the caller overrides it.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Authorization header name.
pub const AUTHORIZATION_HEADER: &str = "Authorization";

/// Ordered header overrides applied to a request before the default headers.
///
/// Header names compare case-insensitively, so `content-type` and
/// `Content-Type` refer to the same entry.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct HeaderOverrides {
    entries: Vec<(String, String)>,
}

impl HeaderOverrides {
    /// Create an empty set of overrides.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Set a header. An existing entry with the same name keeps its position
    /// and takes the new name spelling and value.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self
            .entries
            .iter_mut()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(&name))
        {
            Some(entry) => *entry = (name, value),
            None => self.entries.push((name, value)),
        }
    }

    /// Builder-style variant of [`HeaderOverrides::insert`].
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    /// Returns true if a header with this name is set, ignoring ASCII case.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries
            .iter()
            .any(|(existing, _)| existing.eq_ignore_ascii_case(name))
    }

    /// Value of the header with this name, ignoring ASCII case.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Iterate over the overrides in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// Number of overrides.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if there are no overrides.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<N, V> FromIterator<(N, V)> for HeaderOverrides
where
    N: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        let mut overrides = Self::new();
        for (name, value) in iter {
            overrides.insert(name, value);
        }
        overrides
    }
}
