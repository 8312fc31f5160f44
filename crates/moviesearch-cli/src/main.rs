//! moviesearch - search and browse TMDB movies from the terminal.

/// Application configuration (TOML).
mod config;
/// Terminal UI components.
mod tui;

use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use moviesearch_api::tmdb::{
    ImageResolver, LocalMovieApi, MOVIES_PER_PAGE, ResultPage, TmdbClient,
};
use moviesearch_core::present::{DetailView, MovieCard};
use moviesearch_core::query::SearchQuery;
use tracing::instrument;
use tracing_subscriber::filter::EnvFilter;
#[cfg(not(feature = "otel"))]
use tracing_subscriber::fmt;
#[cfg(feature = "otel")]
use tracing_subscriber::layer::SubscriberExt;
#[cfg(feature = "otel")]
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::{AppConfig, Settings, resolve_config_path};

/// CLI argument parser.
#[derive(Parser)]
#[command(name = "moviesearch", about, version)]
struct Cli {
    /// Override config directory.
    #[arg(long, global = true)]
    dir: Option<PathBuf>,

    /// Subcommand to run.
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// List popular movies.
    Popular(PopularArgs),
    /// Search movies by title.
    Search(SearchArgs),
    /// Show the full record of one movie.
    Detail(DetailArgs),
    /// Browse popular movies and search interactively (TUI).
    Browse,
    /// Print shell completions to stdout.
    Completions(CompletionsArgs),
}

/// Arguments for the `popular` subcommand.
#[derive(clap::Args)]
struct PopularArgs {
    /// Page number (1-based).
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    page: u32,
    /// Maximum number of movies to print.
    #[arg(long, default_value_t = MOVIES_PER_PAGE)]
    limit: usize,
}

/// Arguments for the `search` subcommand.
#[derive(clap::Args)]
struct SearchArgs {
    /// Search query (e.g. "Fight Club").
    #[arg(long, required = true)]
    query: String,
    /// Page number (1-based).
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    page: u32,
}

/// Arguments for the `detail` subcommand.
#[derive(clap::Args)]
struct DetailArgs {
    /// TMDB movie ID.
    #[arg(long, required = true)]
    id: u64,
}

/// Arguments for the `completions` subcommand.
#[derive(clap::Args)]
struct CompletionsArgs {
    /// Target shell.
    shell: Shell,
}

/// Loads config and environment overrides into resolved settings.
///
/// # Errors
///
/// Returns an error if the config file is unreadable or no API key is set.
fn load_settings(dir: Option<&PathBuf>) -> Result<Settings> {
    let path = resolve_config_path(dir, |name| std::env::var(name).ok())?;
    tracing::debug!(path = %path.display(), "loading config");
    AppConfig::load(&path)?
        .resolve(|name| std::env::var(name).ok())
        .with_context(|| format!("invalid configuration ({})", path.display()))
}

/// Builds a `TmdbClient` from resolved settings.
///
/// # Errors
///
/// Returns an error if the client fails to build.
#[instrument(skip_all)]
fn build_tmdb_client(settings: &Settings) -> Result<TmdbClient> {
    let mut builder = TmdbClient::builder()
        .base_url(settings.base_url.clone())
        .api_key(settings.api_key.clone())
        .language(settings.language.clone())
        .credential_kind(settings.credential_kind)
        .user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ));
    if let Some(timeout) = settings.timeout {
        builder = builder.timeout(timeout);
    }
    builder.build().context("failed to build TMDB client")
}

/// Logs one page of movies as a table.
fn print_page(page: &ResultPage, images: &ImageResolver, limit: usize) {
    tracing::info!("ID\tYear\tRating\tVotes\t\tTitle");
    for item in page.items.iter().take(limit) {
        let card = MovieCard::new(item, images);
        tracing::info!(
            "{}\t{}\t{}\t{}\t{}",
            card.id,
            card.year,
            card.rating,
            card.votes,
            card.title,
        );
    }
    tracing::info!(
        "Page {} / {} ({} results)",
        page.page,
        page.total_pages,
        page.total_results
    );
}

/// Runs the `popular` subcommand.
///
/// # Errors
///
/// Returns an error if configuration is invalid or the API request fails.
#[instrument(skip_all)]
async fn run_popular(args: &PopularArgs, dir: Option<&PathBuf>) -> Result<()> {
    let settings = load_settings(dir)?;
    let client = build_tmdb_client(&settings)?;

    let page = client
        .fetch_popular(args.page)
        .await
        .context("Failed to load popular movies")?;

    if page.is_empty() {
        tracing::info!("No movie data. Please try again later");
        return Ok(());
    }
    print_page(&page, &ImageResolver::new(settings.image_base_url), args.limit);
    Ok(())
}

/// Runs the `search` subcommand.
///
/// # Errors
///
/// Returns an error if the query is blank, configuration is invalid,
/// or the API request fails.
#[instrument(skip_all)]
async fn run_search(args: &SearchArgs, dir: Option<&PathBuf>) -> Result<()> {
    let Some(query) = SearchQuery::parse(&args.query) else {
        bail!("search query must not be empty");
    };
    let settings = load_settings(dir)?;
    let client = build_tmdb_client(&settings)?;

    let page = client
        .search_by_query(query.as_str(), args.page)
        .await
        .context("Search failed, please check your network connection")?;

    tracing::info!("Search Results ({})", page.items.len());
    if page.is_empty() {
        tracing::info!("No movies found. Try searching with different keywords");
        return Ok(());
    }
    print_page(&page, &ImageResolver::new(settings.image_base_url), MOVIES_PER_PAGE);
    Ok(())
}

/// Runs the `detail` subcommand.
///
/// # Errors
///
/// Returns an error if configuration is invalid or the API request fails.
#[instrument(skip_all)]
async fn run_detail(args: &DetailArgs, dir: Option<&PathBuf>) -> Result<()> {
    let settings = load_settings(dir)?;
    let client = build_tmdb_client(&settings)?;

    let record = match client.fetch_detail(args.id).await {
        Ok(record) => record,
        Err(moviesearch_api::tmdb::ApiError::NotFound) => {
            tracing::info!("Movie not found. Please go back and search again");
            return Ok(());
        }
        Err(e) => return Err(e).context("Failed to load movie details"),
    };
    let view = DetailView::new(&record, &ImageResolver::new(settings.image_base_url));
    let header = &view.header;

    tracing::info!("{} ({})", header.title, header.year);
    tracing::info!("Rating:\t{} ({})", header.rating, header.votes);
    if let Some(runtime) = &view.runtime {
        tracing::info!("Runtime:\t{runtime}");
    }
    if !view.genres.is_empty() {
        tracing::info!("Genres:\t{}", view.genres.join(", "));
    }
    if let Some(tagline) = &view.tagline {
        tracing::info!("Tagline:\t{tagline}");
    }
    if let Some(overview) = &view.overview {
        tracing::info!("Overview:\t{overview}");
    }
    for row in &view.production_info {
        tracing::info!("{}:\t{}", row.label, row.value);
    }
    if !view.companies.is_empty() {
        tracing::info!("Companies:\t{}", view.companies.join(", "));
    }
    if !header.poster_url.is_empty() {
        tracing::info!("Poster:\t{}", header.poster_url);
    }
    if let Some(homepage) = &view.homepage {
        tracing::info!("Homepage:\t{homepage}");
    }

    Ok(())
}

/// Launches the interactive browser.
///
/// # Errors
///
/// Returns an error if configuration is invalid or the TUI fails.
#[instrument(skip_all)]
async fn run_browse(dir: Option<&PathBuf>) -> Result<()> {
    let settings = load_settings(dir)?;
    let client = build_tmdb_client(&settings)?;
    let images = ImageResolver::new(settings.image_base_url);

    crate::tui::run_browser(Arc::new(client), images)
        .await
        .context("movie browser TUI failed")
}

/// Writes shell completions to stdout.
fn run_completions(args: &CompletionsArgs) {
    let mut cmd = Cli::command();
    let name = String::from(cmd.get_name());
    clap_complete::generate(args.shell, &mut cmd, name, &mut io::stdout());
}

/// Entry point.
///
/// # Errors
///
/// Returns an error if subcommand execution fails.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    #[cfg(not(feature = "otel"))]
    {
        fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .with_target(false)
            .init();
    }

    #[cfg(feature = "otel")]
    {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        let fmt_layer = tracing_subscriber::fmt::layer().with_target(false);

        let otel_layer = std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT")
            .ok()
            .and_then(|_| {
                let exporter = opentelemetry_otlp::SpanExporter::builder()
                    .with_http()
                    .build()
                    .ok()?;

                let tracer_provider = opentelemetry_sdk::trace::SdkTracerProvider::builder()
                    .with_simple_exporter(exporter)
                    .build();

                let tracer = opentelemetry::trace::TracerProvider::tracer(
                    &tracer_provider,
                    env!("CARGO_PKG_NAME"),
                );
                opentelemetry::global::set_tracer_provider(tracer_provider);

                Some(tracing_opentelemetry::layer().with_tracer(tracer))
            });

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .with(otel_layer)
            .init();
    }

    let cli = Cli::parse();
    match cli.command {
        Commands::Popular(args) => run_popular(&args, cli.dir.as_ref()).await,
        Commands::Search(args) => run_search(&args, cli.dir.as_ref()).await,
        Commands::Detail(args) => run_detail(&args, cli.dir.as_ref()).await,
        Commands::Browse => run_browse(cli.dir.as_ref()).await,
        Commands::Completions(args) => {
            run_completions(&args);
            Ok(())
        }
    }
}
