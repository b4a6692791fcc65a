//! Source descriptors and registry
//!
//! Static configuration of every external collaborator: content backends,
//! image CDNs and streaming mirror servers. The registry is the single place
//! that knows priorities and enabled flags; the gateway consults it on every
//! request, so administrative toggles take effect immediately.

use crate::config::GatewayConfig;
use crate::gateway::adapters::{OmdbAdapter, SourceAdapter, TmdbAdapter, TvMazeAdapter};
use crate::streaming::{EmbedTemplate, ServerTier, StreamServer};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Descriptor of a queryable content backend.
#[derive(Clone)]
pub struct ContentSource {
    /// Stable identifier used for cool-down marks and toggles
    pub id: String,
    /// Display name
    pub name: String,
    /// Base address requests are composed against
    pub base_url: String,
    /// Access credential, if the provider requires one
    pub api_key: Option<String>,
    /// Ordering rank, lower is tried first
    pub priority: u8,
    /// Hard per-request timeout
    pub timeout: Duration,
    /// Whether the source participates in the cascade
    pub enabled: bool,
    /// Provider-specific URL composition and payload validation
    pub adapter: Arc<dyn SourceAdapter>,
}

impl fmt::Debug for ContentSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContentSource")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("priority", &self.priority)
            .field("timeout", &self.timeout)
            .field("enabled", &self.enabled)
            .finish_non_exhaustive()
    }
}

/// Descriptor of an image-hosting backend.
#[derive(Debug, Clone)]
pub struct CdnSource {
    /// Stable identifier used for toggles
    pub id: String,
    /// Display name
    pub name: String,
    /// Base address image paths are composed against
    pub base_url: String,
    /// Ordering rank, lower wins
    pub priority: u8,
    /// Whether the CDN is considered at all
    pub enabled: bool,
}

/// Holds every configured source with its enabled flag.
///
/// Mutated only by the enable/disable toggles; everything else reads.
pub struct SourceRegistry {
    content: Vec<ContentSource>,
    cdns: Vec<CdnSource>,
    servers: Vec<StreamServer>,
}

impl SourceRegistry {
    /// Builds a registry from explicit source lists.
    pub fn new(content: Vec<ContentSource>, cdns: Vec<CdnSource>, servers: Vec<StreamServer>) -> Self {
        Self { content, cdns, servers }
    }

    /// Builds the default deployment: TMDB primary and backup, OMDB and
    /// TVMaze for content; TMDB image hosts plus a placeholder service for
    /// artwork; nine embed mirrors across the three tiers.
    ///
    /// Sources whose credential is absent from `config` start disabled; they
    /// can be enabled later once a key is supplied.
    pub fn with_defaults(config: &GatewayConfig) -> Self {
        let content = vec![
            ContentSource {
                id: "tmdb-primary".to_string(),
                name: "TMDB Primary".to_string(),
                base_url: "https://api.themoviedb.org/3".to_string(),
                api_key: config.tmdb_api_key.clone(),
                priority: 1,
                timeout: Duration::from_secs(8),
                enabled: config.tmdb_api_key.is_some(),
                adapter: Arc::new(TmdbAdapter),
            },
            ContentSource {
                id: "tmdb-backup".to_string(),
                name: "TMDB Backup".to_string(),
                base_url: "https://api.themoviedb.org/3".to_string(),
                api_key: config.tmdb_backup_api_key.clone(),
                priority: 2,
                timeout: Duration::from_secs(10),
                enabled: config.tmdb_backup_api_key.is_some(),
                adapter: Arc::new(TmdbAdapter),
            },
            ContentSource {
                id: "omdb".to_string(),
                name: "OMDB".to_string(),
                base_url: "https://www.omdbapi.com".to_string(),
                api_key: config.omdb_api_key.clone(),
                priority: 3,
                timeout: Duration::from_secs(12),
                enabled: config.omdb_api_key.is_some(),
                adapter: Arc::new(OmdbAdapter),
            },
            ContentSource {
                id: "tvmaze".to_string(),
                name: "TVMaze".to_string(),
                base_url: "https://api.tvmaze.com".to_string(),
                api_key: None,
                priority: 4,
                timeout: Duration::from_secs(10),
                enabled: true,
                adapter: Arc::new(TvMazeAdapter),
            },
        ];

        let cdns = vec![
            cdn("tmdb-images", "TMDB Images", "https://image.tmdb.org/t/p", 1),
            cdn("tmdb-backup", "TMDB Backup", "https://www.themoviedb.org/t/p", 2),
            cdn("unsplash", "Unsplash", "https://images.unsplash.com", 3),
            cdn("pexels", "Pexels", "https://images.pexels.com", 4),
            cdn("placeholder", "Placeholder", "https://via.placeholder.com", 5),
        ];

        let servers = vec![
            server("alpha", "Alpha", "HD", ServerTier::Primary, "https://vidsrc.to/embed", EmbedTemplate::PathSegments, 1),
            server("bravo", "Bravo", "HD", ServerTier::Primary, "https://www.2embed.cc/embed", EmbedTemplate::BareId, 2),
            server("charlie", "Charlie", "HD", ServerTier::Backup, "https://vidsrc.me/embed", EmbedTemplate::QueryParams, 3),
            server("delta", "Delta", "HD", ServerTier::Backup, "https://embed.su/embed", EmbedTemplate::PathSegments, 4),
            server("echo", "Echo", "HD", ServerTier::Backup, "https://vidsrc.xyz/embed", EmbedTemplate::PathSegments, 5),
            server("multi", "Multi", "HD", ServerTier::Premium, "https://multiembed.mov", EmbedTemplate::VideoId, 6),
            server("4k", "4K", "4K", ServerTier::Premium, "https://vidsrc.pro/embed", EmbedTemplate::PathSegments, 7),
            server("adfree", "Ad Free", "HD", ServerTier::Premium, "https://player.smashy.stream", EmbedTemplate::PathSegments, 8),
            server("adfree-v2", "Ad Free v2", "HD", ServerTier::Premium, "https://vidsrc.cc/v2/embed", EmbedTemplate::PathSegments, 9),
        ];

        Self::new(content, cdns, servers)
    }

    /// Returns all content sources, regardless of state.
    pub fn content_sources(&self) -> &[ContentSource] {
        &self.content
    }

    /// Returns enabled content sources sorted ascending by priority.
    pub fn active_content_sources(&self) -> Vec<ContentSource> {
        let mut active: Vec<ContentSource> =
            self.content.iter().filter(|s| s.enabled).cloned().collect();
        active.sort_by_key(|s| s.priority);
        active
    }

    /// Returns all CDN sources.
    pub fn cdn_sources(&self) -> &[CdnSource] {
        &self.cdns
    }

    /// Returns enabled CDN sources sorted ascending by priority.
    pub fn active_cdn_sources(&self) -> Vec<CdnSource> {
        let mut active: Vec<CdnSource> = self.cdns.iter().filter(|c| c.enabled).cloned().collect();
        active.sort_by_key(|c| c.priority);
        active
    }

    /// Returns all streaming servers.
    pub fn stream_servers(&self) -> &[StreamServer] {
        &self.servers
    }

    /// Returns the number of enabled streaming servers.
    pub fn active_server_count(&self) -> usize {
        self.servers.iter().filter(|s| s.enabled).count()
    }

    /// Enables or disables a content source. Returns false for unknown ids.
    pub fn set_content_enabled(&mut self, id: &str, enabled: bool) -> bool {
        match self.content.iter_mut().find(|s| s.id == id) {
            Some(source) => {
                source.enabled = enabled;
                true
            }
            None => false,
        }
    }

    /// Enables or disables a CDN source. Returns false for unknown ids.
    pub fn set_cdn_enabled(&mut self, id: &str, enabled: bool) -> bool {
        match self.cdns.iter_mut().find(|c| c.id == id) {
            Some(cdn) => {
                cdn.enabled = enabled;
                true
            }
            None => false,
        }
    }

    /// Enables or disables a streaming server. Returns false for unknown ids.
    pub fn set_server_enabled(&mut self, id: &str, enabled: bool) -> bool {
        match self.servers.iter_mut().find(|s| s.id == id) {
            Some(server) => {
                server.enabled = enabled;
                true
            }
            None => false,
        }
    }
}

fn cdn(id: &str, name: &str, base_url: &str, priority: u8) -> CdnSource {
    CdnSource {
        id: id.to_string(),
        name: name.to_string(),
        base_url: base_url.to_string(),
        priority,
        enabled: true,
    }
}

#[allow(clippy::too_many_arguments)]
fn server(
    id: &str,
    name: &str,
    quality: &str,
    tier: ServerTier,
    base_url: &str,
    template: EmbedTemplate,
    priority: u8,
) -> StreamServer {
    StreamServer {
        id: id.to_string(),
        name: name.to_string(),
        quality: quality.to_string(),
        tier,
        base_url: base_url.to_string(),
        template,
        priority,
        enabled: true,
    }
}
