//! Bundled fallback content
//!
//! A hand-authored set of well-known movies, TV shows and the standard genre
//! taxonomy. This is the content of last resort: it is only served when every
//! live source is exhausted, so the UI always has something to render.

use crate::catalog::{Genre, MediaItem, MediaKind};

/// Static catalog loaded at construction. Immutable thereafter.
pub struct FallbackCatalog {
    movies: Vec<MediaItem>,
    tv_shows: Vec<MediaItem>,
    genres: Vec<Genre>,
}

impl FallbackCatalog {
    /// Builds the bundled catalog.
    pub fn bundled() -> Self {
        let movies = vec![
            movie(27205, "Inception", "Dom Cobb is a skilled thief, the absolute best in the dangerous art of extraction, stealing valuable secrets from deep within the subconscious during the dream state.", "/9gk7adHYeDvHkCSEqAvQNLV5Uge.jpg", "/s3TBrRGB1iav7gFOCNx3H31MoES.jpg", "2010-07-16", 8.8, &[28, 878, 53]),
            movie(299536, "Avengers: Infinity War", "As the Avengers and their allies have continued to protect the world from threats too large for any one hero to handle, a new danger has emerged from the cosmic shadows: Thanos.", "/7WsyChQLEftFiDOVTGkv3hFpyyt.jpg", "/bOGkgRGdhrBYJSLpXaxhXVstddV.jpg", "2018-04-25", 8.3, &[12, 28, 878]),
            movie(155, "The Dark Knight", "Batman raises the stakes in his war on crime. With the help of Lt. Jim Gordon and District Attorney Harvey Dent, Batman sets out to dismantle the remaining criminal organizations.", "/qJ2tW6WMUDux911r6m7haRef0WH.jpg", "/dqK9Hag1054tghRQSqLSfrkvQnA.jpg", "2008-07-18", 9.0, &[18, 28, 80, 53]),
            movie(278, "The Shawshank Redemption", "Two imprisoned men bond over a number of years, finding solace and eventual redemption through acts of common decency.", "/q6y0Go1tsGEsmtFryDOJo3dEmqu.jpg", "/iNh3BivHyg5sQRPP1KOkzguEX0H.jpg", "1994-09-23", 9.3, &[18, 80]),
            movie(299534, "Avengers: Endgame", "After the devastating events of Avengers: Infinity War, the universe is in ruins due to the efforts of the Mad Titan, Thanos. With the help of remaining allies, the Avengers must assemble once more.", "/or06FN3Dka5tukK1e9sl16pB3iy.jpg", "/7RyHsO4yDXtBv1zUU3mTpHeQ0d5.jpg", "2019-04-24", 8.3, &[12, 878, 18]),
            movie(19995, "Avatar", "In the 22nd century, a paraplegic Marine is dispatched to the moon Pandora on a unique mission, but becomes torn between following orders and protecting an alien civilization.", "/jRXYjXNq0Cs2TcJjLkki24MLp7u.jpg", "/Yc9q6QuWrMp9nuDm5R8ExNqbEWU.jpg", "2009-12-15", 7.6, &[28, 12, 14, 878]),
            movie(550, "Fight Club", "A ticking-time-bomb insomniac and a slippery soap salesman channel primal male aggression into a shocking new form of therapy.", "/pB8BM7pdSp6B6Ih7QZ4DrQ3PmJK.jpg", "/hZkgoQYus5vegHoetLkCJzb17zJ.jpg", "1999-10-15", 8.4, &[18]),
        ];

        let tv_shows = vec![
            show(1399, "Game of Thrones", "Seven noble families fight for control of the mythical land of Westeros.", "/u3bZgnGQ9T01sWNhyveQz0wH0Hl.jpg", "/2OMB0ynKlyIenMJWI2Dy9IWT4c.jpg", "2011-04-17", 9.3, &[18, 10765, 10759]),
            show(1396, "Breaking Bad", "A high school chemistry teacher diagnosed with inoperable lung cancer turns to manufacturing and selling methamphetamine.", "/ggFHVNu6YYI5L9pCfOacjizRGt.jpg", "/tsRy63Mu5cu8etL1X7ZLyf7UP1M.jpg", "2008-01-20", 9.5, &[18, 80]),
            show(66732, "Stranger Things", "When a young boy disappears, his mother, a police chief and his friends must confront terrifying supernatural forces.", "/49WJfeN0moxb9IPfGn8AIqMGskD.jpg", "/56v2KjBlU4XaOv9rVYEQypROD7P.jpg", "2016-07-15", 8.7, &[18, 10765, 9648]),
            show(1402, "The Walking Dead", "Sheriff's deputy Rick Grimes awakens from a coma to find a post-apocalyptic world dominated by flesh-eating zombies. He sets out to find his family and encounters many other survivors.", "/rqeYMLryjcawh2JeRpCVUDXYM5b.jpg", "/uro2Khv7JxlzXtLb8tCIbRhkb9E.jpg", "2010-10-31", 8.1, &[18, 27, 10759]),
            show(1418, "The Big Bang Theory", "The sitcom is centered on five characters living in Pasadena, California: roommates Leonard Hofstadter and Sheldon Cooper; Penny, a waitress and aspiring actress.", "/ooBGRQBdbGzBxAVfExiO8r7kloA.jpg", "/nGsNruW3W27V6r4gkyc3iiEGsKR.jpg", "2007-09-24", 8.0, &[35]),
            show(94605, "Arcane", "Amid the stark discord of twin cities Piltover and Zaun, two sisters fight on rival sides of a war between magic technologies and clashing convictions.", "/fqldf2t8ztc9aiwn3k6mlX3tvRT.jpg", "/rkB4LyZHo1NHXFEDHl9vSD9r1lI.jpg", "2021-11-06", 9.0, &[16, 18, 10765]),
        ];

        let genres = [
            (28, "Action"),
            (12, "Adventure"),
            (16, "Animation"),
            (35, "Comedy"),
            (80, "Crime"),
            (99, "Documentary"),
            (18, "Drama"),
            (10751, "Family"),
            (14, "Fantasy"),
            (36, "History"),
            (27, "Horror"),
            (10402, "Music"),
            (9648, "Mystery"),
            (10749, "Romance"),
            (878, "Science Fiction"),
            (53, "Thriller"),
            (10752, "War"),
            (37, "Western"),
        ]
        .into_iter()
        .map(|(id, name)| Genre { id, name: name.to_string() })
        .collect();

        Self { movies, tv_shows, genres }
    }

    /// Returns the fallback movies.
    pub fn movies(&self) -> Vec<MediaItem> {
        self.movies.clone()
    }

    /// Returns the fallback TV shows.
    pub fn tv_shows(&self) -> Vec<MediaItem> {
        self.tv_shows.clone()
    }

    /// Returns the fallback genre taxonomy.
    pub fn genres(&self) -> Vec<Genre> {
        self.genres.clone()
    }

    /// Case-insensitive title/overview filtering over the fallback movies.
    pub fn search_movies(&self, query: &str) -> Vec<MediaItem> {
        filter_by_query(&self.movies, query)
    }

    /// Case-insensitive title/overview filtering over the fallback TV shows.
    pub fn search_tv(&self, query: &str) -> Vec<MediaItem> {
        filter_by_query(&self.tv_shows, query)
    }

    /// Fallback movies carrying the given genre id.
    pub fn movies_by_genre(&self, genre_id: u64) -> Vec<MediaItem> {
        filter_by_genre(&self.movies, genre_id)
    }

    /// Fallback TV shows carrying the given genre id.
    pub fn tv_by_genre(&self, genre_id: u64) -> Vec<MediaItem> {
        filter_by_genre(&self.tv_shows, genre_id)
    }
}

fn filter_by_genre(items: &[MediaItem], genre_id: u64) -> Vec<MediaItem> {
    items
        .iter()
        .filter(|item| item.genre_ids.contains(&genre_id))
        .cloned()
        .collect()
}

fn filter_by_query(items: &[MediaItem], query: &str) -> Vec<MediaItem> {
    let needle = query.to_lowercase();
    items
        .iter()
        .filter(|item| {
            item.title.to_lowercase().contains(&needle)
                || item.overview.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect()
}

#[allow(clippy::too_many_arguments)]
fn movie(
    id: u64,
    title: &str,
    overview: &str,
    poster: &str,
    backdrop: &str,
    release_date: &str,
    vote_average: f64,
    genre_ids: &[u64],
) -> MediaItem {
    item(MediaKind::Movie, id, title, overview, poster, backdrop, release_date, vote_average, genre_ids)
}

#[allow(clippy::too_many_arguments)]
fn show(
    id: u64,
    title: &str,
    overview: &str,
    poster: &str,
    backdrop: &str,
    first_air_date: &str,
    vote_average: f64,
    genre_ids: &[u64],
) -> MediaItem {
    item(MediaKind::Tv, id, title, overview, poster, backdrop, first_air_date, vote_average, genre_ids)
}

#[allow(clippy::too_many_arguments)]
fn item(
    kind: MediaKind,
    id: u64,
    title: &str,
    overview: &str,
    poster: &str,
    backdrop: &str,
    release_date: &str,
    vote_average: f64,
    genre_ids: &[u64],
) -> MediaItem {
    MediaItem {
        id,
        title: title.to_string(),
        overview: overview.to_string(),
        poster_path: poster.to_string(),
        backdrop_path: backdrop.to_string(),
        release_date: release_date.to_string(),
        vote_average,
        genre_ids: genre_ids.to_vec(),
        kind,
        trending: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_catalog_is_nonempty() {
        let catalog = FallbackCatalog::bundled();
        assert!(!catalog.movies().is_empty());
        assert!(!catalog.tv_shows().is_empty());
        assert!(catalog.genres().len() >= 10);
    }

    #[test]
    fn test_search_matches_title_case_insensitively() {
        let catalog = FallbackCatalog::bundled();
        let hits = catalog.search_movies("dark knight");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "The Dark Knight");
    }

    #[test]
    fn test_search_matches_overview_text() {
        let catalog = FallbackCatalog::bundled();
        let hits = catalog.search_tv("chemistry teacher");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "Breaking Bad");
    }

    #[test]
    fn test_genre_filter_matches_taxonomy_ids() {
        let catalog = FallbackCatalog::bundled();
        let scifi = catalog.movies_by_genre(878);
        assert_eq!(scifi.len(), 4);
        assert!(scifi.iter().all(|m| m.genre_ids.contains(&878)));

        let comedies = catalog.tv_by_genre(35);
        assert_eq!(comedies.len(), 1);
        assert_eq!(comedies[0].title, "The Big Bang Theory");

        assert!(catalog.movies_by_genre(99).is_empty());
    }

    #[test]
    fn test_search_without_match_is_empty() {
        let catalog = FallbackCatalog::bundled();
        assert!(catalog.search_movies("zzzz-no-such-movie").is_empty());
    }
}
