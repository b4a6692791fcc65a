//! Per-provider request strategies
//!
//! Every content backend speaks a slightly different dialect: the credential
//! query parameter differs, and so does the shape of a payload that counts as
//! "usable". Each provider gets a small adapter implementing [`SourceAdapter`]
//! so that the fetch cascade can iterate sources generically instead of
//! branching on identifiers.

use crate::query::Query;
use serde_json::Value;
use url::Url;

/// Strategy implemented once per content provider.
pub trait SourceAdapter: Send + Sync {
    /// Composes the full request URL for an endpoint and query.
    ///
    /// # Arguments
    ///
    /// * `base_url` - The source's base address
    /// * `endpoint` - Logical endpoint path, e.g. `/trending/movie/week`
    /// * `query` - Caller-supplied query parameters
    /// * `api_key` - Credential for this source, if one is configured
    fn request_url(
        &self,
        base_url: &str,
        endpoint: &str,
        query: &Query,
        api_key: Option<&str>,
    ) -> Result<Url, url::ParseError>;

    /// Minimal structural check on a parsed payload.
    ///
    /// A payload passes when it carries a recognizable collection field or a
    /// single-entity identifier; anything else is treated as a source failure.
    fn validate(&self, payload: &Value) -> bool;
}

fn compose(
    base_url: &str,
    endpoint: &str,
    query: &Query,
    credential: Option<(&str, &str)>,
) -> Result<Url, url::ParseError> {
    let mut url = Url::parse(&format!("{}{}", base_url.trim_end_matches('/'), endpoint))?;
    // Entering query_pairs_mut without appending anything would leave a bare '?'
    if credential.is_some() || !query.is_empty() {
        let mut pairs = url.query_pairs_mut();
        if let Some((param, key)) = credential {
            pairs.append_pair(param, key);
        }
        for (name, value) in query.pairs() {
            pairs.append_pair(name, value);
        }
    }
    Ok(url)
}

fn has_array(payload: &Value, field: &str) -> bool {
    payload.get(field).is_some_and(Value::is_array)
}

/// Adapter for TMDB-style sources.
///
/// Credential travels as the `api_key` query parameter; list endpoints return
/// `{"results": [...]}`, taxonomy endpoints `{"genres": [...]}` and detail
/// endpoints a single object with an `id` field.
pub struct TmdbAdapter;

impl SourceAdapter for TmdbAdapter {
    fn request_url(
        &self,
        base_url: &str,
        endpoint: &str,
        query: &Query,
        api_key: Option<&str>,
    ) -> Result<Url, url::ParseError> {
        compose(base_url, endpoint, query, api_key.map(|k| ("api_key", k)))
    }

    fn validate(&self, payload: &Value) -> bool {
        has_array(payload, "results") || has_array(payload, "genres") || payload.get("id").is_some()
    }
}

/// Adapter for the OMDB API.
///
/// OMDB expects its credential as `apikey` and answers either with a
/// `{"Search": [...]}` collection or a single entity carrying `imdbID`.
pub struct OmdbAdapter;

impl SourceAdapter for OmdbAdapter {
    fn request_url(
        &self,
        base_url: &str,
        endpoint: &str,
        query: &Query,
        api_key: Option<&str>,
    ) -> Result<Url, url::ParseError> {
        compose(base_url, endpoint, query, api_key.map(|k| ("apikey", k)))
    }

    fn validate(&self, payload: &Value) -> bool {
        has_array(payload, "Search") || payload.get("imdbID").is_some()
    }
}

/// Adapter for the TVMaze API.
///
/// TVMaze is credential-free; search endpoints return a bare JSON array and
/// detail endpoints an object with an `id` field.
pub struct TvMazeAdapter;

impl SourceAdapter for TvMazeAdapter {
    fn request_url(
        &self,
        base_url: &str,
        endpoint: &str,
        query: &Query,
        _api_key: Option<&str>,
    ) -> Result<Url, url::ParseError> {
        compose(base_url, endpoint, query, None)
    }

    fn validate(&self, payload: &Value) -> bool {
        payload.is_array() || payload.get("id").is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_tmdb_url_injects_api_key_first() {
        let mut query = Query::new();
        query.set("page", 1);

        let url = TmdbAdapter
            .request_url("https://api.themoviedb.org/3", "/movie/popular", &query, Some("secret"))
            .unwrap();

        assert_eq!(
            url.as_str(),
            "https://api.themoviedb.org/3/movie/popular?api_key=secret&page=1"
        );
    }

    #[test]
    fn test_tmdb_url_without_credential() {
        let url = TmdbAdapter
            .request_url("https://api.themoviedb.org/3", "/trending/movie/week", &Query::new(), None)
            .unwrap();

        assert_eq!(url.as_str(), "https://api.themoviedb.org/3/trending/movie/week");
    }

    #[test]
    fn test_query_values_are_percent_encoded() {
        let mut query = Query::new();
        query.set("query", "the dark knight");

        let url = TmdbAdapter
            .request_url("https://api.themoviedb.org/3", "/search/movie", &query, None)
            .unwrap();

        assert_eq!(
            url.as_str(),
            "https://api.themoviedb.org/3/search/movie?query=the+dark+knight"
        );
    }

    #[test]
    fn test_omdb_uses_apikey_parameter() {
        let url = OmdbAdapter
            .request_url("https://www.omdbapi.com", "/", &Query::new(), Some("k"))
            .unwrap();

        assert_eq!(url.as_str(), "https://www.omdbapi.com/?apikey=k");
    }

    #[test]
    fn test_tmdb_validation_accepts_known_shapes() {
        let adapter = TmdbAdapter;
        assert!(adapter.validate(&json!({"results": []})));
        assert!(adapter.validate(&json!({"genres": [{"id": 18, "name": "Drama"}]})));
        assert!(adapter.validate(&json!({"id": 550, "title": "Fight Club"})));
    }

    #[test]
    fn test_tmdb_validation_rejects_malformed_payloads() {
        let adapter = TmdbAdapter;
        assert!(!adapter.validate(&json!({"status_message": "Invalid API key"})));
        assert!(!adapter.validate(&json!({"results": "not-an-array"})));
        assert!(!adapter.validate(&json!([])));
    }

    #[test]
    fn test_omdb_validation() {
        let adapter = OmdbAdapter;
        assert!(adapter.validate(&json!({"Search": [], "Response": "True"})));
        assert!(adapter.validate(&json!({"imdbID": "tt0137523"})));
        assert!(!adapter.validate(&json!({"Response": "False", "Error": "Movie not found!"})));
    }

    #[test]
    fn test_tvmaze_validation_accepts_bare_arrays() {
        let adapter = TvMazeAdapter;
        assert!(adapter.validate(&json!([{"score": 0.9}])));
        assert!(adapter.validate(&json!({"id": 82})));
        assert!(!adapter.validate(&json!({"message": "not found"})));
    }
}
