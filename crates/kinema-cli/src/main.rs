//! kinema - TMDB movie browser for the terminal.

/// Application configuration (TOML).
mod config;
/// Query cache and fetch orchestration.
mod query;
/// Terminal UI components.
mod tui;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use tracing::instrument;
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::fmt;

use crate::config::{AppConfig, resolve_config_path};
use crate::tui::theme::Palette;
use crate::tui::{run_browser, run_slideshow};
use kinema_api::tmdb::images::{ImageSize, image_url};
use kinema_api::tmdb::{Genre, MovieApi, SearchMovieParams, TmdbClient, trailer_url};
use kinema_store::{CachedGenre, Favorites, JsonFavoritesStore, load_genres, open_db, resolve_data_dir, save_genres};

/// CLI argument parser.
#[derive(Parser)]
#[command(about, version)]
struct Cli {
    /// Override config/data directory.
    #[arg(long, global = true)]
    dir: Option<PathBuf>,

    /// Subcommand to run.
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Browse the movie catalogue interactively.
    Browse,
    /// Run the popular-movies slideshow.
    Slideshow(SlideshowArgs),
    /// List popular movies.
    Popular(PopularArgs),
    /// Search for movies.
    Search(SearchArgs),
    /// List movie genres.
    Genres(GenresArgs),
    /// Show details for one movie.
    Details(DetailsArgs),
    /// Manage favorite movies.
    Favorites(FavoritesCommand),
    /// Generate shell completions.
    Completions(CompletionsArgs),
}

/// Arguments for the `slideshow` subcommand.
#[derive(clap::Args)]
struct SlideshowArgs {
    /// Popular-movies page to show (default: 1).
    #[arg(long, default_value_t = 1)]
    page: u32,
}

/// Arguments for the `popular` subcommand.
#[derive(clap::Args)]
struct PopularArgs {
    /// Result page (default: 1).
    #[arg(long, default_value_t = 1)]
    page: u32,
}

/// Arguments for the `search` subcommand.
#[derive(clap::Args)]
struct SearchArgs {
    /// Search query (e.g. "interstellar").
    #[arg(long, required = true)]
    query: String,
    /// Result page (default: 1).
    #[arg(long, default_value_t = 1)]
    page: u32,
}

/// Arguments for the `genres` subcommand.
#[derive(clap::Args)]
struct GenresArgs {
    /// Refetch the genre list instead of using the local cache.
    #[arg(long)]
    refresh: bool,
}

/// Arguments for the `details` subcommand.
#[derive(clap::Args)]
struct DetailsArgs {
    /// TMDB movie ID.
    #[arg(long, required = true)]
    id: u64,
}

/// Arguments for the `favorites` subcommand.
#[derive(clap::Args)]
struct FavoritesCommand {
    /// Favorites subcommand to run.
    #[command(subcommand)]
    command: FavoritesSubcommands,
}

/// Available favorites subcommands.
#[derive(Subcommand)]
enum FavoritesSubcommands {
    /// List favorite movies with fetched titles.
    List,
}

/// Arguments for the `completions` subcommand.
#[derive(clap::Args)]
struct CompletionsArgs {
    /// Target shell.
    shell: clap_complete::Shell,
}

/// Builds a `TmdbClient` from the `TMDB_API_KEY` environment variable.
///
/// # Errors
///
/// Returns an error if `TMDB_API_KEY` is not set or the client fails to build.
#[instrument(skip_all)]
fn build_tmdb_client() -> Result<TmdbClient> {
    let api_key =
        std::env::var("TMDB_API_KEY").context("TMDB_API_KEY environment variable is required")?;

    TmdbClient::builder()
        .api_key(api_key)
        .user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ))
        .build()
        .context("failed to build TMDB client")
}

/// Loads the application config for the given directory override.
fn load_config(dir: Option<&PathBuf>) -> Result<AppConfig> {
    let config_path = resolve_config_path(dir).context("failed to resolve config path")?;
    AppConfig::load(&config_path).context("failed to load config")
}

/// Loads genres from the local cache, fetching and caching them when the
/// cache is empty (or `refresh` is set).
///
/// # Errors
///
/// Returns an error if the cache cannot be opened or the fetch fails.
async fn cached_genre_list(dir: Option<&PathBuf>, refresh: bool) -> Result<Vec<Genre>> {
    let conn = open_db(dir).context("failed to open database")?;
    let cached = load_genres(&conn).context("failed to load cached genres")?;

    if !refresh && !cached.is_empty() {
        tracing::debug!(count = cached.len(), "using cached genre list");
        return Ok(cached
            .into_iter()
            .map(|g| Genre {
                id: g.id,
                name: g.name,
            })
            .collect());
    }

    let client = build_tmdb_client()?;
    let genres = client
        .genre_list()
        .await
        .context("TMDB genre list request failed")?;

    let to_cache: Vec<CachedGenre> = genres
        .iter()
        .map(|g| CachedGenre {
            id: g.id,
            name: g.name.clone(),
        })
        .collect();
    save_genres(&conn, &to_cache).context("failed to cache genres")?;
    tracing::debug!(count = genres.len(), "genre list cached");

    Ok(genres)
}

/// Runs the `browse` subcommand.
///
/// # Errors
///
/// Returns an error if the client fails to build or the TUI fails.
#[instrument(skip_all)]
async fn run_browse(dir: Option<&PathBuf>) -> Result<()> {
    let config = load_config(dir)?;
    let client = build_tmdb_client()?;

    // The browser degrades gracefully without a genre list.
    let genres = match cached_genre_list(dir, false).await {
        Ok(genres) => genres,
        Err(err) => {
            tracing::warn!(error = %err, "genre list unavailable, filter disabled");
            Vec::new()
        }
    };

    let data_dir = resolve_data_dir(dir).context("failed to resolve data directory")?;
    let favorites = Favorites::new(JsonFavoritesStore::new(&data_dir));
    let palette = Palette::for_theme(config.ui.theme);

    run_browser(
        Arc::new(client),
        genres,
        favorites,
        palette,
        config.api.language,
    )
    .await
    .context("movie browser TUI failed")
}

/// Runs the `slideshow` subcommand.
///
/// # Errors
///
/// Returns an error if the fetch or the TUI fails.
#[instrument(skip_all)]
async fn run_slideshow_command(args: &SlideshowArgs, dir: Option<&PathBuf>) -> Result<()> {
    let config = load_config(dir)?;
    let client = build_tmdb_client()?;

    let page = client
        .popular_movies(args.page)
        .await
        .context("TMDB popular movies request failed")?;

    let palette = Palette::for_theme(config.ui.theme);
    let interval = Duration::from_millis(config.slideshow.interval_ms);

    run_slideshow(page.results, interval, palette).context("slideshow TUI failed")
}

/// Runs the `popular` subcommand.
///
/// # Errors
///
/// Returns an error if the client fails to build or the request fails.
#[instrument(skip_all)]
async fn run_popular(args: &PopularArgs) -> Result<()> {
    let client = build_tmdb_client()?;

    let page = client
        .popular_movies(args.page)
        .await
        .context("TMDB popular movies request failed")?;

    tracing::info!(
        "Page {}/{} ({} results total)",
        page.page,
        page.total_pages,
        page.total_results
    );
    tracing::info!("ID\tTitle\t\t\tYear\tRating\tVotes");
    for movie in &page.results {
        tracing::info!(
            "{}\t{}\t{}\t{:.1}\t{}",
            movie.id,
            movie.title,
            movie
                .release_year()
                .map_or_else(|| String::from("-"), |y| y.to_string()),
            movie.vote_average,
            movie.vote_count,
        );
    }

    Ok(())
}

/// Runs the `search` subcommand.
///
/// # Errors
///
/// Returns an error if the client fails to build or the request fails.
#[instrument(skip_all)]
async fn run_search(args: &SearchArgs, dir: Option<&PathBuf>) -> Result<()> {
    let config = load_config(dir)?;
    let client = build_tmdb_client()?;

    let params = SearchMovieParams::new(&args.query)
        .language(config.api.language)
        .page(args.page);
    let page = client
        .search_movies(&params)
        .await
        .context("TMDB search request failed")?;

    tracing::info!("Total results: {}", page.total_results);
    tracing::info!("ID\tTitle\t\t\tYear\tRating");
    for movie in &page.results {
        tracing::info!(
            "{}\t{}\t{}\t{:.1}",
            movie.id,
            movie.title,
            movie
                .release_year()
                .map_or_else(|| String::from("-"), |y| y.to_string()),
            movie.vote_average,
        );
    }

    Ok(())
}

/// Runs the `genres` subcommand.
///
/// # Errors
///
/// Returns an error if the cache or the request fails.
#[instrument(skip_all)]
async fn run_genres(args: &GenresArgs, dir: Option<&PathBuf>) -> Result<()> {
    let genres = cached_genre_list(dir, args.refresh).await?;

    tracing::info!("ID\tName");
    for genre in &genres {
        tracing::info!("{}\t{}", genre.id, genre.name);
    }
    tracing::info!("Total: {} genres", genres.len());

    Ok(())
}

/// Runs the `details` subcommand.
///
/// # Errors
///
/// Returns an error if the client fails to build or the request fails.
#[instrument(skip_all)]
async fn run_details(args: &DetailsArgs) -> Result<()> {
    let client = build_tmdb_client()?;

    let details = client
        .movie_details(args.id)
        .await
        .context("TMDB movie details request failed")?;

    tracing::info!("ID: {}", details.id);
    tracing::info!("Title: {}", details.title);
    tracing::info!(
        "Released: {}",
        details
            .formatted_release_date()
            .as_deref()
            .unwrap_or("-")
    );
    tracing::info!(
        "Rating: {:.1}/10 ({} votes)",
        details.vote_average,
        details.vote_count
    );
    tracing::info!(
        "Runtime: {}",
        details
            .runtime
            .map_or_else(|| String::from("-"), |r| format!("{r} min"))
    );
    let genre_names: Vec<&str> = details.genres.iter().map(|g| g.name.as_str()).collect();
    tracing::info!("Genres: {}", genre_names.join(", "));
    if let Some(overview) = &details.overview {
        tracing::info!("Overview: {overview}");
    }
    if let Some(path) = &details.poster_path {
        tracing::info!("Poster: {}", image_url(ImageSize::W500, path));
    }
    if let Some(path) = &details.backdrop_path {
        tracing::info!("Backdrop: {}", image_url(ImageSize::Original, path));
    }
    match trailer_url(&details) {
        Some(url) => tracing::info!("Trailer: {url}"),
        None => tracing::info!("Trailer: none available"),
    }

    Ok(())
}

/// Runs the `favorites list` subcommand.
///
/// # Errors
///
/// Returns an error if the client fails to build or a fetch fails.
#[instrument(skip_all)]
async fn run_favorites_list(dir: Option<&PathBuf>) -> Result<()> {
    let data_dir = resolve_data_dir(dir).context("failed to resolve data directory")?;
    let favorites = Favorites::new(JsonFavoritesStore::new(&data_dir));

    if favorites.is_empty() {
        tracing::info!("No favorite movies yet. Toggle favorites with `f` in `kinema browse`.");
        return Ok(());
    }

    let client = build_tmdb_client()?;

    tracing::info!("ID\tTitle\t\t\tYear\tRating");
    for movie_id in favorites.ids() {
        let details = client
            .movie_details(*movie_id)
            .await
            .with_context(|| format!("failed to fetch details for movie {movie_id}"))?;
        let year = details
            .release_date
            .as_deref()
            .and_then(|d| d.get(..4))
            .unwrap_or("-");
        tracing::info!(
            "{}\t{}\t{}\t{:.1}",
            details.id,
            details.title,
            year,
            details.vote_average,
        );
    }
    tracing::info!("Total: {} favorites", favorites.len());

    Ok(())
}

/// Runs the `completions` subcommand.
fn run_completions(args: &CompletionsArgs) {
    let mut command = Cli::command();
    clap_complete::generate(args.shell, &mut command, "kinema", &mut std::io::stdout());
}

/// Entry point.
///
/// # Errors
///
/// Returns an error if subcommand execution fails.
#[tokio::main]
async fn main() -> Result<()> {
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Browse => run_browse(cli.dir.as_ref()).await,
        Commands::Slideshow(args) => run_slideshow_command(&args, cli.dir.as_ref()).await,
        Commands::Popular(args) => run_popular(&args).await,
        Commands::Search(args) => run_search(&args, cli.dir.as_ref()).await,
        Commands::Genres(args) => run_genres(&args, cli.dir.as_ref()).await,
        Commands::Details(args) => run_details(&args).await,
        Commands::Favorites(favorites) => match favorites.command {
            FavoritesSubcommands::List => run_favorites_list(cli.dir.as_ref()).await,
        },
        Commands::Completions(args) => {
            run_completions(&args);
            Ok(())
        }
    }
}
