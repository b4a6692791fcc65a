//! CineGate - Resilient multi-source movie/TV metadata gateway
//!
//! This library fronts a set of redundant metadata backends (TMDB primary and
//! backup, OMDB, TVMaze), image CDNs and streaming-embed mirrors with a single
//! best-effort API: sources are tried in priority order with per-source
//! timeouts, failing sources cool down for a fixed window, successful
//! responses are cached, and total exhaustion degrades to bundled fallback
//! content instead of an error. Consumers always get something to render.

mod cache;
mod catalog;
mod clock;
mod config;
mod fallback;
mod gateway;
mod images;
mod query;
mod sources;
mod streaming;
mod transport;

// Re-export error types
pub use transport::TransportError;

// Core gateway and its seams
pub use cache::ResponseCache;
pub use clock::{Clock, SystemClock};
pub use config::{
    DEFAULT_COOLDOWN, ENV_CACHE_TTL_SECS, ENV_COOLDOWN_SECS, ENV_OMDB_API_KEY,
    ENV_TMDB_API_KEY, ENV_TMDB_BACKUP_API_KEY, GatewayConfig,
};
pub use gateway::adapters::{OmdbAdapter, SourceAdapter, TmdbAdapter, TvMazeAdapter};
pub use gateway::{Gateway, GatewayStatus};
pub use query::Query;
pub use transport::{HttpResponse, HttpTransport, ReqwestTransport};

// Source configuration
pub use sources::{CdnSource, ContentSource, SourceRegistry};

// Typed catalog layer and fallback content
pub use catalog::{CatalogService, Genre, MediaItem, MediaKind};
pub use fallback::FallbackCatalog;

// Image and embed-URL composition
pub use images::{placeholder as placeholder_image_url, resolve as resolve_image_url};
pub use streaming::{EmbedTemplate, ServerTier, StreamLink, StreamServer};
