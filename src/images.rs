//! Image URL resolution
//!
//! Pure string composition with tiered fallback: remote CDN first, generic
//! placeholder service when nothing else applies. No request is ever made to
//! verify the result, so this never fails.

use crate::sources::CdnSource;

/// Poster aspect ratio used to derive placeholder heights from a width token.
const ASPECT_NUMERATOR: u32 = 3;
const ASPECT_DENOMINATOR: u32 = 2;

/// Width assumed when the size token carries no number ("original").
const DEFAULT_WIDTH: u32 = 500;

/// Resolves an image path against the best available CDN.
///
/// # Arguments
///
/// * `cdns` - CDN sources ordered as configured (priority handled here)
/// * `path` - Opaque path fragment; may be empty or already a full URL
/// * `size` - Size token such as `w500` or `original`
///
/// Empty paths resolve to a placeholder, fully-qualified URLs pass through
/// unchanged, and everything else is composed as `base/size/path` against the
/// highest-priority enabled CDN.
pub fn resolve(cdns: &[CdnSource], path: &str, size: &str) -> String {
    if path.is_empty() {
        return placeholder(size);
    }

    if path.starts_with("http://") || path.starts_with("https://") {
        return path.to_string();
    }

    match best_cdn(cdns) {
        Some(cdn) => {
            let separator = if path.starts_with('/') { "" } else { "/" };
            format!("{}/{}{}{}", cdn.base_url.trim_end_matches('/'), size, separator, path)
        }
        None => placeholder(size),
    }
}

/// Builds a deterministic placeholder image URL for the given size token.
///
/// The width is parsed from tokens like `w500`; the height follows the poster
/// aspect ratio.
pub fn placeholder(size: &str) -> String {
    let width: u32 = size.trim_start_matches('w').parse().unwrap_or(DEFAULT_WIDTH);
    // Widen before multiplying so absurd size tokens cannot overflow
    let height = u64::from(width) * u64::from(ASPECT_NUMERATOR) / u64::from(ASPECT_DENOMINATOR);
    format!(
        "https://via.placeholder.com/{}x{}/1e293b/64748b?text=No+Poster",
        width, height
    )
}

fn best_cdn(cdns: &[CdnSource]) -> Option<&CdnSource> {
    cdns.iter().filter(|c| c.enabled).min_by_key(|c| c.priority)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cdn(id: &str, base_url: &str, priority: u8, enabled: bool) -> CdnSource {
        CdnSource {
            id: id.to_string(),
            name: id.to_string(),
            base_url: base_url.to_string(),
            priority,
            enabled,
        }
    }

    fn default_cdns() -> Vec<CdnSource> {
        vec![
            cdn("backup", "https://backup.example/t/p", 2, true),
            cdn("primary", "https://image.tmdb.org/t/p", 1, true),
        ]
    }

    #[test]
    fn test_empty_path_resolves_to_placeholder() {
        let url = resolve(&default_cdns(), "", "w500");
        assert!(!url.is_empty());
        assert_eq!(url, "https://via.placeholder.com/500x750/1e293b/64748b?text=No+Poster");
    }

    #[test]
    fn test_absolute_url_passes_through() {
        let url = resolve(&default_cdns(), "https://x/y.jpg", "w500");
        assert_eq!(url, "https://x/y.jpg");
    }

    #[test]
    fn test_relative_path_uses_highest_priority_cdn() {
        let url = resolve(&default_cdns(), "/abc.jpg", "w500");
        assert_eq!(url, "https://image.tmdb.org/t/p/w500/abc.jpg");
    }

    #[test]
    fn test_disabled_cdns_are_skipped() {
        let cdns = vec![
            cdn("primary", "https://image.tmdb.org/t/p", 1, false),
            cdn("backup", "https://backup.example/t/p", 2, true),
        ];
        assert_eq!(resolve(&cdns, "/abc.jpg", "w342"), "https://backup.example/t/p/w342/abc.jpg");
    }

    #[test]
    fn test_no_enabled_cdn_falls_back_to_placeholder() {
        let cdns = vec![cdn("primary", "https://image.tmdb.org/t/p", 1, false)];
        let url = resolve(&cdns, "/abc.jpg", "w500");
        assert!(url.starts_with("https://via.placeholder.com/"));
    }

    #[test]
    fn test_placeholder_survives_absurd_width_tokens() {
        // u32::MAX parses as a valid width; the derived height must not overflow
        let url = placeholder("w4294967295");
        assert_eq!(
            url,
            "https://via.placeholder.com/4294967295x6442450942/1e293b/64748b?text=No+Poster"
        );
        assert!(!resolve(&[], "", "w4294967295").is_empty());
    }

    #[test]
    fn test_placeholder_width_defaults_for_non_numeric_tokens() {
        assert_eq!(
            placeholder("original"),
            "https://via.placeholder.com/500x750/1e293b/64748b?text=No+Poster"
        );
        assert_eq!(
            placeholder("w342"),
            "https://via.placeholder.com/342x513/1e293b/64748b?text=No+Poster"
        );
    }
}
