//! Ordered query parameter builder.

/// Ordered set of request parameters.
///
/// Keys keep their insertion order so the query string a transport renders is
/// deterministic for a given set of inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    /// Create an empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a string parameter.
    pub fn with_str(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.pairs.push((key.into(), value.into()));
        self
    }

    /// Append an integer parameter.
    pub fn with_int(self, key: impl Into<String>, value: i64) -> Self {
        self.with_str(key, value.to_string())
    }

    /// Look up the first value for a key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Borrow the pairs in a shape reqwest's `query`/`form` accept.
    pub fn as_pairs(&self) -> &[(String, String)] {
        &self.pairs
    }
}

/// Parameters for the download info call.
///
/// `now_unix` is appended as `_` so caches between client and provider never
/// serve a stale answer.
pub fn download_query(pickcode: &str, now_unix: i64) -> QueryParams {
    QueryParams::new()
        .with_str("pickcode", pickcode)
        .with_int("_", now_unix)
}

/// Parameters for the video info call.
pub fn video_query(pickcode: &str) -> QueryParams {
    QueryParams::new().with_str("pickcode", pickcode)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_download_query_order() {
        let query = download_query("abc123", 1_700_000_000);
        let pairs: Vec<_> = query.iter().collect();
        assert_eq!(pairs, vec![("pickcode", "abc123"), ("_", "1700000000")]);
    }

    #[test]
    fn test_video_query_has_no_marker() {
        let query = video_query("abc123");
        assert_eq!(query.len(), 1);
        assert_eq!(query.get("pickcode"), Some("abc123"));
        assert_eq!(query.get("_"), None);
    }

    #[test]
    fn test_empty_pickcode_is_passed_through() {
        let query = download_query("", 1);
        assert_eq!(query.get("pickcode"), Some(""));
    }

    #[test]
    fn test_get_returns_first_value() {
        let query = QueryParams::new().with_str("a", "1").with_str("a", "2");
        assert_eq!(query.get("a"), Some("1"));
        assert!(!query.is_empty());
    }
}
