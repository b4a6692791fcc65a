//! Typed catalog operations
//!
//! The catalog sits on top of the gateway and turns raw JSON documents into
//! typed items with sensible defaults for missing fields. Like the gateway,
//! nothing here ever fails: exhausted sources route to the bundled fallback
//! catalog, and a blank search query short-circuits to an empty list without
//! touching the network.

use crate::config::GatewayConfig;
use crate::fallback::FallbackCatalog;
use crate::gateway::Gateway;
use crate::query::Query;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

/// Whether an item is a movie or a TV show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    /// Feature film
    Movie,
    /// Episodic series
    Tv,
}

/// A single browsable catalog entry.
///
/// Movies and TV shows share this shape; `title` holds the movie title or the
/// show name, `release_date` the release or first-air date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaItem {
    /// TMDB numeric identifier
    pub id: u64,
    /// Title (movies) or name (TV shows)
    pub title: String,
    /// Synopsis, never empty (defaulted when the source omits it)
    pub overview: String,
    /// Poster artwork path fragment, may be empty
    pub poster_path: String,
    /// Backdrop artwork path fragment, falls back to the poster
    pub backdrop_path: String,
    /// Release date (movies) or first air date (TV shows)
    pub release_date: String,
    /// Average rating, defaulted when missing
    pub vote_average: f64,
    /// Genre taxonomy ids
    pub genre_ids: Vec<u64>,
    /// Movie or TV
    pub kind: MediaKind,
    /// Set on items coming from a trending feed
    pub trending: bool,
}

/// A genre taxonomy entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    /// Taxonomy id
    pub id: u64,
    /// Display name
    pub name: String,
}

/// Wire shape of a single list entry, tolerant of missing fields.
#[derive(Deserialize)]
struct RawItem {
    id: Option<u64>,
    title: Option<String>,
    name: Option<String>,
    overview: Option<String>,
    poster_path: Option<String>,
    backdrop_path: Option<String>,
    release_date: Option<String>,
    first_air_date: Option<String>,
    vote_average: Option<f64>,
    #[serde(default)]
    genre_ids: Vec<u64>,
}

/// High-level catalog queries with guaranteed non-erroring results.
pub struct CatalogService {
    gateway: Arc<Gateway>,
    fallback: FallbackCatalog,
}

impl CatalogService {
    /// Creates a catalog on top of an existing gateway.
    pub fn new(gateway: Arc<Gateway>) -> Self {
        Self {
            gateway,
            fallback: FallbackCatalog::bundled(),
        }
    }

    /// Convenience constructor: gateway configured from the environment.
    pub fn from_env() -> Self {
        Self::new(Arc::new(Gateway::new(GatewayConfig::from_env())))
    }

    /// The underlying gateway, for image resolution, embed links and admin ops.
    pub fn gateway(&self) -> &Arc<Gateway> {
        &self.gateway
    }

    /// This week's trending movies, or the bundled movies when exhausted.
    pub fn trending_movies(&self) -> Vec<MediaItem> {
        let payload = self.gateway.fetch("/trending/movie/week", &Query::new());
        let items = map_items(&payload, MediaKind::Movie, Defaults {
            overview: "An exciting movie experience awaits you.",
            vote_average: 7.5,
            trending: true,
        });
        if !items.is_empty() {
            return items;
        }

        debug!("serving bundled trending movies");
        mark_trending(self.fallback.movies())
    }

    /// This week's trending TV shows, or the bundled shows when exhausted.
    pub fn trending_tv(&self) -> Vec<MediaItem> {
        let payload = self.gateway.fetch("/trending/tv/week", &Query::new());
        let items = map_items(&payload, MediaKind::Tv, Defaults {
            overview: "An amazing TV series you will love.",
            vote_average: 7.5,
            trending: true,
        });
        if !items.is_empty() {
            return items;
        }

        debug!("serving bundled trending TV shows");
        mark_trending(self.fallback.tv_shows())
    }

    /// Popular movies, or the bundled movies when exhausted.
    pub fn popular_movies(&self) -> Vec<MediaItem> {
        let payload = self.gateway.fetch("/movie/popular", &Query::new());
        let items = map_items(&payload, MediaKind::Movie, Defaults {
            overview: "A popular movie that audiences love.",
            vote_average: 7.0,
            trending: false,
        });
        if !items.is_empty() {
            return items;
        }

        debug!("serving bundled popular movies");
        self.fallback.movies()
    }

    /// Popular TV shows, or the bundled shows when exhausted.
    pub fn popular_tv(&self) -> Vec<MediaItem> {
        let payload = self.gateway.fetch("/tv/popular", &Query::new());
        let items = map_items(&payload, MediaKind::Tv, Defaults {
            overview: "A popular TV series with great ratings.",
            vote_average: 7.0,
            trending: false,
        });
        if !items.is_empty() {
            return items;
        }

        debug!("serving bundled popular TV shows");
        self.fallback.tv_shows()
    }

    /// Searches for movies. A blank query returns an empty list immediately,
    /// without any network access; exhausted sources route to a filtered view
    /// of the bundled movies.
    pub fn search_movies(&self, raw_query: &str) -> Vec<MediaItem> {
        let trimmed = raw_query.trim();
        if trimmed.is_empty() {
            return Vec::new();
        }

        let mut query = Query::new();
        query.set("query", trimmed);
        let payload = self.gateway.fetch("/search/movie", &query);
        let overview_default = format!("Search result for \"{}\"", trimmed);
        let items = map_items(&payload, MediaKind::Movie, Defaults {
            overview: &overview_default,
            vote_average: 6.0,
            trending: false,
        });
        if !items.is_empty() {
            return items;
        }

        debug!(query = trimmed, "serving filtered bundled movies for search");
        self.fallback.search_movies(trimmed)
    }

    /// Searches for TV shows, with the same guarantees as [`Self::search_movies`].
    pub fn search_tv(&self, raw_query: &str) -> Vec<MediaItem> {
        let trimmed = raw_query.trim();
        if trimmed.is_empty() {
            return Vec::new();
        }

        let mut query = Query::new();
        query.set("query", trimmed);
        let payload = self.gateway.fetch("/search/tv", &query);
        let overview_default = format!("Search result for \"{}\"", trimmed);
        let items = map_items(&payload, MediaKind::Tv, Defaults {
            overview: &overview_default,
            vote_average: 6.0,
            trending: false,
        });
        if !items.is_empty() {
            return items;
        }

        debug!(query = trimmed, "serving filtered bundled TV shows for search");
        self.fallback.search_tv(trimmed)
    }

    /// Movies in a genre via the discover feed, sorted by popularity, or the
    /// bundled movies carrying that genre when exhausted.
    pub fn movies_by_genre(&self, genre_id: u64) -> Vec<MediaItem> {
        let mut query = Query::new();
        query.set("with_genres", genre_id);
        query.set("sort_by", "popularity.desc");
        let payload = self.gateway.fetch("/discover/movie", &query);
        let items = map_items(&payload, MediaKind::Movie, Defaults {
            overview: "A standout pick from this genre.",
            vote_average: 7.0,
            trending: false,
        });
        if !items.is_empty() {
            return items;
        }

        debug!(genre_id, "serving bundled movies filtered by genre");
        self.fallback.movies_by_genre(genre_id)
    }

    /// TV shows in a genre, with the same guarantees as [`Self::movies_by_genre`].
    pub fn tv_by_genre(&self, genre_id: u64) -> Vec<MediaItem> {
        let mut query = Query::new();
        query.set("with_genres", genre_id);
        query.set("sort_by", "popularity.desc");
        let payload = self.gateway.fetch("/discover/tv", &query);
        let items = map_items(&payload, MediaKind::Tv, Defaults {
            overview: "A standout series from this genre.",
            vote_average: 7.0,
            trending: false,
        });
        if !items.is_empty() {
            return items;
        }

        debug!(genre_id, "serving bundled TV shows filtered by genre");
        self.fallback.tv_by_genre(genre_id)
    }

    /// The movie genre taxonomy, or the bundled taxonomy when exhausted.
    pub fn movie_genres(&self) -> Vec<Genre> {
        let payload = self.gateway.fetch("/genre/movie/list", &Query::new());
        let genres: Vec<Genre> = payload
            .get("genres")
            .and_then(Value::as_array)
            .map(|entries| {
                entries
                    .iter()
                    .filter_map(|entry| serde_json::from_value(entry.clone()).ok())
                    .collect()
            })
            .unwrap_or_default();

        if !genres.is_empty() {
            return genres;
        }

        debug!("serving bundled genre taxonomy");
        self.fallback.genres()
    }

    /// A mixed sampler: up to ten items from each of the four main feeds.
    pub fn all_content(&self) -> Vec<MediaItem> {
        let mut all = Vec::new();
        all.extend(self.trending_movies().into_iter().take(10));
        all.extend(self.trending_tv().into_iter().take(10));
        all.extend(self.popular_movies().into_iter().take(10));
        all.extend(self.popular_tv().into_iter().take(10));
        all
    }
}

struct Defaults<'a> {
    overview: &'a str,
    vote_average: f64,
    trending: bool,
}

/// Maps a raw `{"results": [...]}` document into typed items.
///
/// Entries without a numeric id are dropped; every other missing field is
/// defaulted so consumers never see holes.
fn map_items(payload: &Value, kind: MediaKind, defaults: Defaults<'_>) -> Vec<MediaItem> {
    let Some(results) = payload.get("results").and_then(Value::as_array) else {
        return Vec::new();
    };

    results
        .iter()
        .filter_map(|entry| serde_json::from_value::<RawItem>(entry.clone()).ok())
        .filter_map(|raw| {
            let id = raw.id?;
            let title = raw
                .title
                .or(raw.name)
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| "Untitled".to_string());
            let poster_path = raw.poster_path.unwrap_or_default();
            let backdrop_path = raw
                .backdrop_path
                .filter(|b| !b.is_empty())
                .unwrap_or_else(|| poster_path.clone());

            Some(MediaItem {
                id,
                title,
                overview: raw
                    .overview
                    .filter(|o| !o.is_empty())
                    .unwrap_or_else(|| defaults.overview.to_string()),
                poster_path,
                backdrop_path,
                release_date: raw.release_date.or(raw.first_air_date).unwrap_or_default(),
                vote_average: raw.vote_average.unwrap_or(defaults.vote_average),
                genre_ids: raw.genre_ids,
                kind,
                trending: defaults.trending,
            })
        })
        .collect()
}

fn mark_trending(items: Vec<MediaItem>) -> Vec<MediaItem> {
    items
        .into_iter()
        .map(|mut item| {
            item.trending = true;
            item
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::SystemClock;
    use crate::sources::SourceRegistry;
    use crate::transport::{HttpResponse, HttpTransport, TransportError};
    use serde_json::json;
    use std::time::Duration;

    /// Transport that always answers with the same document.
    struct CannedTransport {
        body: String,
    }

    impl HttpTransport for CannedTransport {
        fn get(&self, _url: &str, _timeout: Duration) -> Result<HttpResponse, TransportError> {
            Ok(HttpResponse { status: 200, body: self.body.clone() })
        }
    }

    /// Transport that panics when touched; used to prove no network access.
    struct ExplodingTransport;

    impl HttpTransport for ExplodingTransport {
        fn get(&self, url: &str, _timeout: Duration) -> Result<HttpResponse, TransportError> {
            panic!("unexpected network call to {url}");
        }
    }

    fn offline_catalog() -> CatalogService {
        // No sources configured: every fetch exhausts immediately
        let registry = SourceRegistry::new(Vec::new(), Vec::new(), Vec::new());
        let gateway = Gateway::with_parts(
            registry,
            GatewayConfig::default(),
            Arc::new(ExplodingTransport),
            Arc::new(SystemClock),
        );
        CatalogService::new(Arc::new(gateway))
    }

    fn live_catalog(body: Value) -> CatalogService {
        let registry = SourceRegistry::new(
            vec![crate::sources::ContentSource {
                id: "test".to_string(),
                name: "Test".to_string(),
                base_url: "https://api.test".to_string(),
                api_key: None,
                priority: 1,
                timeout: Duration::from_secs(1),
                enabled: true,
                adapter: Arc::new(crate::gateway::adapters::TmdbAdapter),
            }],
            Vec::new(),
            Vec::new(),
        );
        let gateway = Gateway::with_parts(
            registry,
            GatewayConfig::default(),
            Arc::new(CannedTransport { body: body.to_string() }),
            Arc::new(SystemClock),
        );
        CatalogService::new(Arc::new(gateway))
    }

    #[test]
    fn test_map_items_applies_defaults() {
        let payload = json!({
            "results": [
                { "id": 1, "title": "Bare", "poster_path": "/p.jpg" },
                { "id": 2, "name": "Named Show", "overview": "Has one", "vote_average": 8.1 },
                { "title": "No id, dropped" }
            ]
        });

        let items = map_items(&payload, MediaKind::Movie, Defaults {
            overview: "default overview",
            vote_average: 7.0,
            trending: true,
        });

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].overview, "default overview");
        assert_eq!(items[0].vote_average, 7.0);
        // Backdrop falls back to the poster
        assert_eq!(items[0].backdrop_path, "/p.jpg");
        assert!(items[0].trending);
        assert_eq!(items[1].title, "Named Show");
        assert_eq!(items[1].overview, "Has one");
        assert_eq!(items[1].vote_average, 8.1);
    }

    #[test]
    fn test_live_results_are_preferred_over_fallback() {
        let catalog = live_catalog(json!({
            "results": [{ "id": 603, "title": "The Matrix" }]
        }));

        let items = catalog.popular_movies();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].title, "The Matrix");
    }

    #[test]
    fn test_exhausted_trending_routes_to_bundled_movies() {
        let catalog = offline_catalog();
        let items = catalog.trending_movies();
        assert!(!items.is_empty());
        assert!(items.iter().all(|item| item.trending));
        assert!(items.iter().all(|item| item.kind == MediaKind::Movie));
    }

    #[test]
    fn test_blank_search_short_circuits_without_network() {
        let catalog = offline_catalog();
        // ExplodingTransport would panic on any request; there are no sources,
        // but a blank query must not even reach the gateway
        assert!(catalog.search_movies("").is_empty());
        assert!(catalog.search_tv("   ").is_empty());
    }

    #[test]
    fn test_exhausted_search_filters_bundled_content() {
        let catalog = offline_catalog();
        let hits = catalog.search_movies("inception");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "Inception");
    }

    #[test]
    fn test_genre_listing_prefers_live_results() {
        let catalog = live_catalog(json!({
            "results": [{ "id": 335984, "title": "Blade Runner 2049", "genre_ids": [878, 18] }]
        }));

        let items = catalog.movies_by_genre(878);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].title, "Blade Runner 2049");
    }

    #[test]
    fn test_exhausted_genre_listing_filters_bundled_content() {
        let catalog = offline_catalog();

        let scifi = catalog.movies_by_genre(878);
        assert!(!scifi.is_empty());
        assert!(scifi.iter().all(|m| m.genre_ids.contains(&878)));

        let comedies = catalog.tv_by_genre(35);
        assert_eq!(comedies.len(), 1);
        assert_eq!(comedies[0].title, "The Big Bang Theory");

        // An id outside the bundled taxonomy degrades to no results, not an error
        assert!(catalog.movies_by_genre(424242).is_empty());
    }

    #[test]
    fn test_exhausted_genres_route_to_bundled_taxonomy() {
        let catalog = offline_catalog();
        let genres = catalog.movie_genres();
        assert!(genres.iter().any(|g| g.name == "Drama"));
    }

    #[test]
    fn test_all_content_caps_each_feed_at_ten() {
        let results: Vec<Value> =
            (0..25).map(|i| json!({ "id": i, "title": format!("Movie {i}") })).collect();
        let catalog = live_catalog(json!({ "results": results }));

        let all = catalog.all_content();
        // Four feeds, ten items each
        assert_eq!(all.len(), 40);
    }
}
