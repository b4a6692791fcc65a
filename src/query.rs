//! Canonical query-parameter handling
//!
//! Query parameters are kept in a sorted map so that the same logical request
//! always produces the same cache key, regardless of the order in which the
//! caller added its parameters.

use std::collections::BTreeMap;

/// An ordered collection of string query parameters.
///
/// Values are stored pre-stringified; `None` values are simply omitted, which
/// matches how optional parameters behave at the call sites.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    params: BTreeMap<String, String>,
}

impl Query {
    /// Creates an empty query.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a parameter, replacing any previous value for the same key.
    pub fn set(&mut self, key: &str, value: impl ToString) {
        self.params.insert(key.to_string(), value.to_string());
    }

    /// Sets a parameter only when a value is present.
    pub fn set_opt(&mut self, key: &str, value: Option<impl ToString>) {
        if let Some(value) = value {
            self.set(key, value);
        }
    }

    /// Returns true when no parameters are set.
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Iterates over the parameters in key order.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Computes the canonical cache key for an endpoint and this query.
    ///
    /// The key concatenates the endpoint with the sorted `key=value` pairs, so
    /// two requests differing only in parameter insertion order share a key.
    pub fn cache_key(&self, endpoint: &str) -> String {
        if self.params.is_empty() {
            return endpoint.to_string();
        }

        let serialized = self
            .params
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join("&");

        format!("{}?{}", endpoint, serialized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_key_without_params_is_endpoint() {
        let query = Query::new();
        assert_eq!(query.cache_key("/trending/movie/week"), "/trending/movie/week");
    }

    #[test]
    fn test_cache_key_is_order_independent() {
        let mut a = Query::new();
        a.set("page", 2);
        a.set("query", "inception");

        let mut b = Query::new();
        b.set("query", "inception");
        b.set("page", 2);

        assert_eq!(a.cache_key("/search/movie"), b.cache_key("/search/movie"));
        assert_eq!(a.cache_key("/search/movie"), "/search/movie?page=2&query=inception");
    }

    #[test]
    fn test_none_values_are_omitted() {
        let mut query = Query::new();
        query.set_opt("page", Some(1));
        query.set_opt("year", None::<u32>);

        assert_eq!(query.cache_key("/discover/movie"), "/discover/movie?page=1");
    }

    #[test]
    fn test_set_replaces_previous_value() {
        let mut query = Query::new();
        query.set("page", 1);
        query.set("page", 2);

        assert_eq!(query.cache_key("/movie/popular"), "/movie/popular?page=2");
    }
}
