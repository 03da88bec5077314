use anyhow::Context;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use explorer::render::{self, Theme};
use explorer::search::dedup_suggestions;
use explorer::{
    AthleteListing, CompetitionFilter, CompetitionListing, Config, PageSource, PageState,
    PagedSearchController, ResultsClient, SearchSettings, SearchSource, SearchStatus,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "explore")]
#[command(about = "Browse weightlifting competition results", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(long, env = "RESULTS_API_URL")]
    api_url: Option<String>,

    #[arg(long, env = "SEARCH_PAGE_SIZE")]
    page_size: Option<u32>,

    #[arg(long, env = "GRADE_TABLE_PATH")]
    grade_table: Option<PathBuf>,

    /// No colours; best attempts in [brackets], misses in ~tildes~
    #[arg(long)]
    plain: bool,

    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Full search, following pages until --pages or the last page
    Search {
        query: String,

        #[arg(long, default_value_t = 1)]
        pages: u32,
    },
    /// Quick-search suggestions, first page only, de-duplicated
    Suggest { query: String },
    Athletes {
        #[arg(default_value = "")]
        query: String,

        #[arg(long, default_value_t = 1)]
        pages: u32,
    },
    Competitions {
        #[arg(default_value = "")]
        query: String,

        #[arg(long)]
        after: Option<NaiveDate>,

        #[arg(long)]
        before: Option<NaiveDate>,

        #[arg(long, default_value_t = 1)]
        pages: u32,
    },
    /// Lift history, classification and records for one athlete
    Athlete { id: String },
    /// Results of one competition by weight category
    Competition { id: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!(
                    "explore={},explorer={},standings={}",
                    log_level, log_level, log_level
                )
                .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut config = Config::from_env().context("Invalid configuration")?;
    if let Some(api_url) = cli.api_url {
        config.api_url = api_url;
    }
    if let Some(page_size) = cli.page_size {
        explorer::config::check_page_size(page_size).context("Invalid --page-size")?;
        config.page_size = page_size;
    }
    if cli.grade_table.is_some() {
        config.grade_table_path = cli.grade_table;
    }
    config.plain |= cli.plain;

    let theme = if config.plain {
        Theme::plain()
    } else {
        Theme::default()
    };
    let client = Arc::new(ResultsClient::new(&config.api_url).context("Cannot build HTTP client")?);
    info!("Using results API at {}", client.base_url());

    let settings = SearchSettings::with_debounce(config.debounce);

    match cli.command {
        Commands::Search { query, pages } => {
            let controller = PagedSearchController::new(
                SearchSource::new(Arc::clone(&client), config.page_size),
                settings,
            );
            let state = run_paged(&controller, &query, pages).await;
            print_page(&state, render::search_hit_line);
        }
        Commands::Suggest { query } => {
            let controller = PagedSearchController::new(
                SearchSource::new(Arc::clone(&client), config.page_size),
                settings.first_page_only(),
            );
            let state = run_paged(&controller, &query, 1).await;
            if report_status(&state) {
                for suggestion in dedup_suggestions(&state.items) {
                    println!("{}", render::suggestion_line(&suggestion, &theme));
                }
            }
        }
        Commands::Athletes { query, pages } => {
            let controller = PagedSearchController::new(
                AthleteListing::new(Arc::clone(&client), config.page_size),
                settings.browse_when_empty(),
            );
            let state = run_paged(&controller, &query, pages).await;
            print_page(&state, |athlete| {
                format!(
                    "{:<30} {:>4}  {:>3} lifts  id={}",
                    athlete.display_name(),
                    athlete
                        .yearborn
                        .map(|year| year.to_string())
                        .unwrap_or_default(),
                    athlete.lifts_count,
                    athlete.reference_id
                )
            });
        }
        Commands::Competitions {
            query,
            after,
            before,
            pages,
        } => {
            let window = CompetitionFilter {
                search: String::new(),
                date_start_after: after,
                date_start_before: before,
            };
            let controller = PagedSearchController::new(
                CompetitionListing::new(Arc::clone(&client), config.page_size).with_window(window),
                settings.browse_when_empty(),
            );
            let state = run_paged(&controller, &query, pages).await;
            print_page(&state, |competition| {
                format!(
                    "{:<40} {:<24} {:>4} lifts  id={}",
                    competition.name,
                    competition.date_range(),
                    competition.lifts_count,
                    competition.reference_id
                )
            });
        }
        Commands::Athlete { id } => {
            let table = config.load_grade_table()?;
            let detail = client
                .athlete(&id)
                .await
                .with_context(|| format!("Cannot load athlete {}", id))?;
            println!("{}", render::athlete_report(&detail, &table, &theme));
        }
        Commands::Competition { id } => {
            let detail = client
                .competition(&id)
                .await
                .with_context(|| format!("Cannot load competition {}", id))?;
            println!("{}", render::competition_report(&detail, &theme));
        }
    }

    Ok(())
}

/// Types the query, then keeps scrolling until `pages` pages are loaded or
/// there is nothing more.
async fn run_paged<S: PageSource>(
    controller: &PagedSearchController<S>,
    query: &str,
    pages: u32,
) -> PageState<S::Item> {
    controller.on_query_change(query);
    let mut state = controller.settled().await;
    while state.pages_loaded < pages && controller.on_intersect() {
        state = controller.settled().await;
    }
    state
}

/// Prints a one-line status for anything but loaded results. Returns whether
/// there are items to show; a failed later page keeps the earlier ones.
fn report_status<T>(state: &PageState<T>) -> bool {
    match &state.status {
        SearchStatus::Inactive => println!("Nothing to search for."),
        SearchStatus::Empty => println!("No results for '{}'.", state.query),
        SearchStatus::Errored(message) => {
            eprintln!("{}", message);
            return !state.items.is_empty();
        }
        SearchStatus::Settled => return true,
        SearchStatus::Debouncing | SearchStatus::Fetching => {}
    }
    false
}

fn print_page<T>(state: &PageState<T>, line: impl Fn(&T) -> String) {
    if !report_status(state) {
        return;
    }
    for item in &state.items {
        println!("{}", line(item));
    }
    println!(
        "-- {} of {} shown{}",
        state.items.len(),
        state.total_count,
        if state.has_more { ", more available" } else { "" }
    );
}
