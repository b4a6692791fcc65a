use cinegate::{CatalogService, MediaItem};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

/// Browse movie/TV catalogs through the resilient fetch gateway.
#[derive(Parser)]
#[command(name = "cinegate", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Kind {
    Movie,
    Tv,
}

#[derive(Subcommand)]
enum Command {
    /// Show this week's trending titles
    Trending {
        /// Content kind to list
        #[arg(value_enum, default_value_t = Kind::Movie)]
        kind: Kind,
    },
    /// Show popular titles
    Popular {
        #[arg(value_enum, default_value_t = Kind::Movie)]
        kind: Kind,
    },
    /// Search the catalog
    Search {
        #[arg(value_enum)]
        kind: Kind,
        /// Search terms
        query: String,
    },
    /// List titles in a genre
    ByGenre {
        #[arg(value_enum)]
        kind: Kind,
        /// Genre taxonomy id, e.g. 878 for Science Fiction
        genre_id: u64,
    },
    /// List the movie genre taxonomy
    Genres,
    /// Resolve an artwork path to a full image URL
    ImageUrl {
        /// Path fragment, e.g. /abc.jpg, or a full URL
        path: String,
        /// Size token
        #[arg(long, default_value = "w500")]
        size: String,
    },
    /// Compose streaming-embed URLs for a title
    EmbedUrl {
        /// TMDB numeric id
        id: u64,
        /// Season number (TV only)
        #[arg(long)]
        season: Option<u32>,
        /// Episode number (TV only)
        #[arg(long)]
        episode: Option<u32>,
        /// Display title used in link labels
        #[arg(long, default_value = "")]
        title: String,
    },
    /// Report cache and source counters
    Status,
    /// Wipe cached responses and cool-down marks
    ClearCache,
}

fn print_items(items: &[MediaItem]) {
    if items.is_empty() {
        println!("No results found.");
        return;
    }

    for item in items {
        println!(
            "{:>8}  {:<40} {:>4.1}  {}",
            item.id, item.title, item.vote_average, item.release_date
        );
    }
    println!("\n{} title(s)", items.len());
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let catalog = CatalogService::from_env();

    match cli.command {
        Command::Trending { kind } => {
            let items = match kind {
                Kind::Movie => catalog.trending_movies(),
                Kind::Tv => catalog.trending_tv(),
            };
            print_items(&items);
        }
        Command::Popular { kind } => {
            let items = match kind {
                Kind::Movie => catalog.popular_movies(),
                Kind::Tv => catalog.popular_tv(),
            };
            print_items(&items);
        }
        Command::Search { kind, query } => {
            let items = match kind {
                Kind::Movie => catalog.search_movies(&query),
                Kind::Tv => catalog.search_tv(&query),
            };
            print_items(&items);
        }
        Command::ByGenre { kind, genre_id } => {
            let items = match kind {
                Kind::Movie => catalog.movies_by_genre(genre_id),
                Kind::Tv => catalog.tv_by_genre(genre_id),
            };
            print_items(&items);
        }
        Command::Genres => {
            for genre in catalog.movie_genres() {
                println!("{:>6}  {}", genre.id, genre.name);
            }
        }
        Command::ImageUrl { path, size } => {
            println!("{}", catalog.gateway().resolve_image(&path, &size));
        }
        Command::EmbedUrl { id, season, episode, title } => {
            let links = match (season, episode) {
                (Some(season), Some(episode)) => {
                    catalog.gateway().tv_embed_links(id, season, episode, &title)
                }
                _ => catalog.gateway().movie_embed_links(id, &title),
            };
            for link in links {
                println!("{:<24} {}", link.server, link.url);
            }
        }
        Command::Status => {
            let status = catalog.gateway().status();
            println!("Cache entries:    {}", status.cache_entries);
            println!(
                "Content sources:  {} active / {} excluded / {} total",
                status.active_sources, status.excluded_sources, status.total_sources
            );
            println!("Image CDNs:       {} active / {} total", status.active_cdns, status.total_cdns);
            println!(
                "Stream servers:   {} active / {} total",
                status.active_servers, status.total_servers
            );
        }
        Command::ClearCache => {
            catalog.gateway().clear_cache();
            println!("Cache and cool-down marks cleared.");
        }
    }
}
