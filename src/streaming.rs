//! Streaming-embed URL composition
//!
//! The playback iframe is an opaque collaborator: it receives a URL composed
//! from a numeric TMDB id (plus season/episode for episodic content) and a
//! provider-specific template. Each mirror server declares which template it
//! uses, so adding a server is a table entry rather than new branching code.
//!
//! Nothing here performs network I/O; whether the embed actually plays is the
//! iframe's concern.

use serde::Serialize;

/// Reliability tier of a mirror server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ServerTier {
    /// First-choice servers
    Primary,
    /// Used when primary servers misbehave
    Backup,
    /// Higher quality or ad-free mirrors
    Premium,
}

/// URL shape a mirror server expects.
///
/// The providers fall into a handful of URL dialects; each server picks one
/// instead of carrying its own formatting code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmbedTemplate {
    /// `base/movie/{id}` and `base/tv/{id}/{season}/{episode}`
    PathSegments,
    /// `base/{id}` and `base/{id}&s={season}&e={episode}`
    BareId,
    /// `base/movie?tmdb={id}` and `base/tv?tmdb={id}&season={s}&episode={e}`
    QueryParams,
    /// `base/?video_id={id}&tmdb=1`, with `&s=`/`&e=` appended for TV
    VideoId,
}

impl EmbedTemplate {
    fn movie_url(&self, base_url: &str, tmdb_id: u64) -> String {
        match self {
            EmbedTemplate::PathSegments => format!("{}/movie/{}", base_url, tmdb_id),
            EmbedTemplate::BareId => format!("{}/{}", base_url, tmdb_id),
            EmbedTemplate::QueryParams => format!("{}/movie?tmdb={}", base_url, tmdb_id),
            EmbedTemplate::VideoId => format!("{}/?video_id={}&tmdb=1", base_url, tmdb_id),
        }
    }

    fn tv_url(&self, base_url: &str, tmdb_id: u64, season: u32, episode: u32) -> String {
        match self {
            EmbedTemplate::PathSegments => {
                format!("{}/tv/{}/{}/{}", base_url, tmdb_id, season, episode)
            }
            EmbedTemplate::BareId => {
                format!("{}/{}&s={}&e={}", base_url, tmdb_id, season, episode)
            }
            EmbedTemplate::QueryParams => format!(
                "{}/tv?tmdb={}&season={}&episode={}",
                base_url, tmdb_id, season, episode
            ),
            EmbedTemplate::VideoId => format!(
                "{}/?video_id={}&tmdb=1&s={}&e={}",
                base_url, tmdb_id, season, episode
            ),
        }
    }
}

/// Descriptor of a streaming mirror server.
#[derive(Debug, Clone)]
pub struct StreamServer {
    /// Stable identifier used for enable/disable toggles
    pub id: String,
    /// Display name
    pub name: String,
    /// Quality label shown to users ("HD", "4K")
    pub quality: String,
    /// Reliability tier
    pub tier: ServerTier,
    /// Embed base URL
    pub base_url: String,
    /// URL dialect this server expects
    pub template: EmbedTemplate,
    /// Ordering rank, lower is listed first
    pub priority: u8,
    /// Whether the server is offered at all
    pub enabled: bool,
}

/// One playable embed URL, ready to hand to an iframe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StreamLink {
    /// Unique link id combining content and server
    pub id: String,
    /// Human-readable title ("Inception - Alpha (HD)")
    pub title: String,
    /// Quality label of the serving mirror
    pub quality: String,
    /// Name of the serving mirror
    pub server: String,
    /// The embed URL
    pub url: String,
}

/// Builds one embed link per enabled server for a movie.
pub fn movie_links(servers: &[StreamServer], tmdb_id: u64, title: &str) -> Vec<StreamLink> {
    active_by_priority(servers)
        .map(|server| StreamLink {
            id: format!("movie-{}-{}", tmdb_id, server.id),
            title: format!("{} - {} ({})", title, server.name, server.quality),
            quality: server.quality.clone(),
            server: server.name.clone(),
            url: server.template.movie_url(&server.base_url, tmdb_id),
        })
        .collect()
}

/// Builds one embed link per enabled server for a TV episode.
pub fn tv_links(
    servers: &[StreamServer],
    tmdb_id: u64,
    season: u32,
    episode: u32,
    title: &str,
) -> Vec<StreamLink> {
    active_by_priority(servers)
        .map(|server| StreamLink {
            id: format!("tv-{}-{}-{}-{}", tmdb_id, season, episode, server.id),
            title: format!("{} - {} ({})", title, server.name, server.quality),
            quality: server.quality.clone(),
            server: server.name.clone(),
            url: server.template.tv_url(&server.base_url, tmdb_id, season, episode),
        })
        .collect()
}

fn active_by_priority(servers: &[StreamServer]) -> impl Iterator<Item = &StreamServer> {
    let mut active: Vec<&StreamServer> = servers.iter().filter(|s| s.enabled).collect();
    active.sort_by_key(|s| s.priority);
    active.into_iter()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn server(id: &str, template: EmbedTemplate, priority: u8, enabled: bool) -> StreamServer {
        StreamServer {
            id: id.to_string(),
            name: id.to_uppercase(),
            quality: "HD".to_string(),
            tier: ServerTier::Primary,
            base_url: format!("https://{}.example/embed", id),
            template,
            priority,
            enabled,
        }
    }

    #[test]
    fn test_movie_url_dialects() {
        assert_eq!(
            EmbedTemplate::PathSegments.movie_url("https://a/embed", 550),
            "https://a/embed/movie/550"
        );
        assert_eq!(EmbedTemplate::BareId.movie_url("https://b/embed", 550), "https://b/embed/550");
        assert_eq!(
            EmbedTemplate::QueryParams.movie_url("https://c/embed", 550),
            "https://c/embed/movie?tmdb=550"
        );
        assert_eq!(
            EmbedTemplate::VideoId.movie_url("https://d", 550),
            "https://d/?video_id=550&tmdb=1"
        );
    }

    #[test]
    fn test_tv_url_dialects() {
        assert_eq!(
            EmbedTemplate::PathSegments.tv_url("https://a/embed", 1399, 3, 9),
            "https://a/embed/tv/1399/3/9"
        );
        assert_eq!(
            EmbedTemplate::QueryParams.tv_url("https://c/embed", 1399, 3, 9),
            "https://c/embed/tv?tmdb=1399&season=3&episode=9"
        );
    }

    #[test]
    fn test_links_skip_disabled_servers_and_sort_by_priority() {
        let servers = vec![
            server("charlie", EmbedTemplate::QueryParams, 3, true),
            server("alpha", EmbedTemplate::PathSegments, 1, true),
            server("bravo", EmbedTemplate::BareId, 2, false),
        ];

        let links = movie_links(&servers, 27205, "Inception");
        assert_eq!(links.len(), 2);
        assert_eq!(links[0].server, "ALPHA");
        assert_eq!(links[0].url, "https://alpha.example/embed/movie/27205");
        assert_eq!(links[1].server, "CHARLIE");
        assert_eq!(links[0].title, "Inception - ALPHA (HD)");
    }

    #[test]
    fn test_tv_link_id_encodes_episode_coordinates() {
        let servers = vec![server("alpha", EmbedTemplate::PathSegments, 1, true)];
        let links = tv_links(&servers, 1396, 2, 5, "Breaking Bad");
        assert_eq!(links[0].id, "tv-1396-2-5-alpha");
        assert_eq!(links[0].url, "https://alpha.example/embed/tv/1396/2/5");
    }
}
