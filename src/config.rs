//! Gateway configuration
//!
//! Credentials are never baked into the binary. They are read from the
//! environment at startup; a source whose credential is missing is simply
//! left disabled instead of failing construction.

use std::env;
use std::time::Duration;

/// Environment variable holding the primary TMDB API key.
pub const ENV_TMDB_API_KEY: &str = "CINEGATE_TMDB_API_KEY";
/// Environment variable holding the backup TMDB API key.
pub const ENV_TMDB_BACKUP_API_KEY: &str = "CINEGATE_TMDB_BACKUP_API_KEY";
/// Environment variable holding the OMDB API key.
pub const ENV_OMDB_API_KEY: &str = "CINEGATE_OMDB_API_KEY";
/// Environment variable overriding the failed-source cool-down, in seconds.
pub const ENV_COOLDOWN_SECS: &str = "CINEGATE_COOLDOWN_SECS";
/// Environment variable setting a cache TTL, in seconds. Unset means
/// process-lifetime entries.
pub const ENV_CACHE_TTL_SECS: &str = "CINEGATE_CACHE_TTL_SECS";

/// Default cool-down applied to a failing source: 5 minutes.
pub const DEFAULT_COOLDOWN: Duration = Duration::from_secs(300);

/// Runtime configuration for the gateway.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Primary TMDB API key
    pub tmdb_api_key: Option<String>,
    /// Backup TMDB API key
    pub tmdb_backup_api_key: Option<String>,
    /// OMDB API key
    pub omdb_api_key: Option<String>,
    /// How long a failing source is excluded from the candidate list
    pub cooldown: Duration,
    /// Optional time-to-live for cached responses
    pub cache_ttl: Option<Duration>,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            tmdb_api_key: None,
            tmdb_backup_api_key: None,
            omdb_api_key: None,
            cooldown: DEFAULT_COOLDOWN,
            cache_ttl: None,
        }
    }
}

impl GatewayConfig {
    /// Builds a configuration from environment variables.
    ///
    /// Unset credentials leave the corresponding source disabled. Unparseable
    /// duration overrides fall back to their defaults.
    pub fn from_env() -> Self {
        let cooldown = env::var(ENV_COOLDOWN_SECS)
            .ok()
            .and_then(|s| s.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_COOLDOWN);

        let cache_ttl = env::var(ENV_CACHE_TTL_SECS)
            .ok()
            .and_then(|s| s.parse().ok())
            .map(Duration::from_secs);

        Self {
            tmdb_api_key: non_empty(env::var(ENV_TMDB_API_KEY).ok()),
            tmdb_backup_api_key: non_empty(env::var(ENV_TMDB_BACKUP_API_KEY).ok()),
            omdb_api_key: non_empty(env::var(ENV_OMDB_API_KEY).ok()),
            cooldown,
            cache_ttl,
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
