//! Resilient fetch gateway
//!
//! The gateway answers logical content requests by walking the configured
//! sources in priority order, applying each source's timeout, caching the
//! first structurally valid response and excluding failing sources for a
//! fixed cool-down window. It never returns an error to its caller: total
//! exhaustion degrades to an empty document so the consumer always has
//! something to render.

pub mod adapters;

use crate::cache::ResponseCache;
use crate::clock::{Clock, SystemClock};
use crate::config::GatewayConfig;
use crate::images;
use crate::query::Query;
use crate::sources::{ContentSource, SourceRegistry};
use crate::streaming::{self, StreamLink};
use crate::transport::{HttpTransport, ReqwestTransport, TransportError};
use parking_lot::{Mutex, RwLock};
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, warn};

/// Why a single source attempt failed.
///
/// These are recovered locally (cool-down plus advance to the next source)
/// and surface only in log output.
#[derive(Debug, Error)]
enum SourceFailure {
    /// Request could not be composed against the source's base address
    #[error("invalid request URL: {0}")]
    Url(#[from] url::ParseError),

    /// Transport-level failure or timeout
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// Non-2xx HTTP status
    #[error("HTTP status {0}")]
    Status(u16),

    /// Body was not valid JSON
    #[error("invalid JSON payload: {0}")]
    Json(#[from] serde_json::Error),

    /// JSON parsed but did not look like a usable document
    #[error("payload failed structural validation")]
    Structure,
}

/// Counters reported by [`Gateway::status`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayStatus {
    /// Number of cached responses
    pub cache_entries: usize,
    /// Configured content sources
    pub total_sources: usize,
    /// Enabled content sources not currently cooling down
    pub active_sources: usize,
    /// Sources currently excluded by an unexpired cool-down mark
    pub excluded_sources: usize,
    /// Configured image CDNs
    pub total_cdns: usize,
    /// Enabled image CDNs
    pub active_cdns: usize,
    /// Configured streaming servers
    pub total_servers: usize,
    /// Enabled streaming servers
    pub active_servers: usize,
}

/// Best-effort, never-failing front door to all external collaborators.
///
/// Shared state (cache and cool-down marks) is lock-protected, so a single
/// gateway can be shared across threads; concurrent fetches for the same key
/// may race to populate the cache, in which case any successful write wins.
pub struct Gateway {
    registry: RwLock<SourceRegistry>,
    cache: ResponseCache,
    marks: Mutex<HashMap<String, Instant>>,
    transport: Arc<dyn HttpTransport>,
    clock: Arc<dyn Clock>,
    cooldown: Duration,
}

impl Gateway {
    /// Creates a gateway with the default source tables, the system clock and
    /// a blocking `reqwest` transport.
    pub fn new(config: GatewayConfig) -> Self {
        let registry = SourceRegistry::with_defaults(&config);
        Self::with_parts(registry, config, Arc::new(ReqwestTransport::new()), Arc::new(SystemClock))
    }

    /// Creates a gateway from explicit parts.
    ///
    /// This is the seam tests use to inject a scripted transport and a
    /// manually advanced clock.
    pub fn with_parts(
        registry: SourceRegistry,
        config: GatewayConfig,
        transport: Arc<dyn HttpTransport>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            registry: RwLock::new(registry),
            cache: ResponseCache::new(config.cache_ttl, clock.clone()),
            marks: Mutex::new(HashMap::new()),
            transport,
            clock,
            cooldown: config.cooldown,
        }
    }

    /// Fetches a logical endpoint, trying sources in priority order.
    ///
    /// # Arguments
    ///
    /// * `endpoint` - Logical endpoint path, e.g. `/trending/movie/week`
    /// * `query` - Query parameters (credential injection happens per source)
    ///
    /// # Returns
    ///
    /// The first structurally valid response, a cached copy of an earlier
    /// one, or a synthesized empty document when every source is exhausted.
    /// This method never fails.
    pub fn fetch(&self, endpoint: &str, query: &Query) -> Value {
        let cache_key = query.cache_key(endpoint);

        if let Some(cached) = self.cache.load(&cache_key) {
            debug!(endpoint, "cache hit");
            return cached;
        }

        for source in self.candidates() {
            debug!(source = %source.id, endpoint, "trying source");
            match self.try_source(&source, endpoint, query) {
                Ok(payload) => {
                    debug!(source = %source.id, endpoint, "source succeeded");
                    self.cache.store(&cache_key, payload.clone());
                    self.marks.lock().remove(&source.id);
                    return payload;
                }
                Err(failure) => {
                    warn!(source = %source.id, endpoint, error = %failure, "source failed, cooling down");
                    self.marks
                        .lock()
                        .insert(source.id.clone(), self.clock.now() + self.cooldown);
                }
            }
        }

        warn!(endpoint, "all sources exhausted, returning empty document");
        empty_document()
    }

    /// Resolves an artwork path against the configured image CDNs.
    ///
    /// Pure string composition; see [`crate::images::resolve`].
    pub fn resolve_image(&self, path: &str, size: &str) -> String {
        images::resolve(self.registry.read().cdn_sources(), path, size)
    }

    /// Builds embed links for a movie across all enabled streaming servers.
    pub fn movie_embed_links(&self, tmdb_id: u64, title: &str) -> Vec<StreamLink> {
        streaming::movie_links(self.registry.read().stream_servers(), tmdb_id, title)
    }

    /// Builds embed links for a TV episode across all enabled streaming servers.
    pub fn tv_embed_links(
        &self,
        tmdb_id: u64,
        season: u32,
        episode: u32,
        title: &str,
    ) -> Vec<StreamLink> {
        streaming::tv_links(self.registry.read().stream_servers(), tmdb_id, season, episode, title)
    }

    /// Wipes all cached responses and cool-down marks.
    pub fn clear_cache(&self) {
        self.cache.clear();
        self.marks.lock().clear();
        debug!("cache and cool-down marks cleared");
    }

    /// Reports cache and source counters.
    pub fn status(&self) -> GatewayStatus {
        let now = self.clock.now();
        let mut marks = self.marks.lock();
        marks.retain(|_, eligible_again| *eligible_again > now);
        let excluded = marks.len();

        let registry = self.registry.read();
        // A mark may outlive a disable toggle, so count per source instead of
        // subtracting totals
        let active_sources = registry
            .content_sources()
            .iter()
            .filter(|s| s.enabled && !marks.contains_key(&s.id))
            .count();
        drop(marks);

        GatewayStatus {
            cache_entries: self.cache.len(),
            total_sources: registry.content_sources().len(),
            active_sources,
            excluded_sources: excluded,
            total_cdns: registry.cdn_sources().len(),
            active_cdns: registry.active_cdn_sources().len(),
            total_servers: registry.stream_servers().len(),
            active_servers: registry.active_server_count(),
        }
    }

    /// Enables or disables a content source by id.
    pub fn set_source_enabled(&self, id: &str, enabled: bool) -> bool {
        self.registry.write().set_content_enabled(id, enabled)
    }

    /// Enables or disables an image CDN by id.
    pub fn set_cdn_enabled(&self, id: &str, enabled: bool) -> bool {
        self.registry.write().set_cdn_enabled(id, enabled)
    }

    /// Enables or disables a streaming server by id.
    pub fn set_server_enabled(&self, id: &str, enabled: bool) -> bool {
        self.registry.write().set_server_enabled(id, enabled)
    }

    /// Builds the candidate list: enabled sources without an unexpired
    /// cool-down mark, ascending by priority. Expired marks are pruned here,
    /// which is what makes a cooled-down source eligible again.
    fn candidates(&self) -> Vec<ContentSource> {
        let now = self.clock.now();
        let mut marks = self.marks.lock();
        marks.retain(|_, eligible_again| *eligible_again > now);

        self.registry
            .read()
            .active_content_sources()
            .into_iter()
            .filter(|source| !marks.contains_key(&source.id))
            .collect()
    }

    fn try_source(
        &self,
        source: &ContentSource,
        endpoint: &str,
        query: &Query,
    ) -> Result<Value, SourceFailure> {
        let url = source.adapter.request_url(
            &source.base_url,
            endpoint,
            query,
            source.api_key.as_deref(),
        )?;

        let response = self.transport.get(url.as_str(), source.timeout)?;
        if !response.is_success() {
            return Err(SourceFailure::Status(response.status));
        }

        let payload: Value = serde_json::from_str(&response.body)?;
        if !source.adapter.validate(&payload) {
            return Err(SourceFailure::Structure);
        }

        Ok(payload)
    }
}

/// The shape callers receive when every source is exhausted: structurally
/// valid, just empty.
fn empty_document() -> Value {
    json!({ "results": [], "genres": [] })
}
