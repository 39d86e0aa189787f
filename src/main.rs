// Footprint search CLI
//
// Sends one search to the footprint backend while the staged progress dialog
// and the status line run in the terminal, then prints the results one page
// at a time.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use chrono::Local;
use clap::Parser;
use tokio::sync::Notify;
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{debug, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use kodegen_tools_footprint::render::{self, Painter};
use kodegen_tools_footprint::search::{PageLink, page_window, paginate};
use kodegen_tools_footprint::utils::{
    DEFAULT_RESULTS_PER_PAGE, DEFAULT_SEARCH_ENDPOINT, DEFAULT_SEARCH_TIMEOUT_SECS,
    RENDER_INTERVAL_MS, truncate_with_ellipsis,
};
use kodegen_tools_footprint::{
    ProgressConfig, ProgressSession, ResultStats, RetryPolicy, SearchClient, SearchError,
    SearchRequest, SearchResponse, SessionEvent, SummaryStyle, Theme,
};

const EXIT_FAILURE: u8 = 1;
const EXIT_USAGE: u8 = 2;
const EXIT_CANCELLED: u8 = 130;

const TITLE_MAX_CHARS: usize = 100;
const SNIPPET_MAX_CHARS: usize = 150;

#[derive(Parser)]
#[command(
    name = "footprint-search",
    version,
    about = "Look up a person's digital footprint by name and/or photo"
)]
struct Cli {
    /// Name to search for
    #[arg(short, long)]
    name: Option<String>,

    /// Photo to search with
    #[arg(short, long)]
    photo: Option<PathBuf>,

    /// Search endpoint of the backend
    #[arg(long, default_value = DEFAULT_SEARCH_ENDPOINT)]
    endpoint: String,

    /// JSON progress configuration (stages, status entries, theme)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Theme preset, overriding the configuration
    #[arg(long, value_parser = ["slate", "vivid"])]
    theme: Option<String>,

    /// Draw the compact dialog without checklist and statistics
    #[arg(long)]
    compact: bool,

    /// Result page to print (1-based)
    #[arg(long, default_value_t = 1)]
    page: usize,

    /// Results per page
    #[arg(long, default_value_t = DEFAULT_RESULTS_PER_PAGE)]
    per_page: usize,

    /// Print the raw response as JSON instead of a result page
    #[arg(long)]
    json: bool,

    /// Request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_SEARCH_TIMEOUT_SECS)]
    timeout_secs: u64,

    /// Re-run the search this many times after a connection or server failure
    #[arg(long, default_value_t = 0)]
    retries: u32,
}

enum RunEnd {
    Finished(SearchResponse),
    Failed(SearchError),
    Cancelled,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    init_tracing();
    let cli = Cli::parse();

    let config = load_config(&cli).await?;
    let request = match SearchRequest::new(cli.name.clone(), cli.photo.clone()) {
        Ok(request) => request,
        Err(e) => {
            eprintln!("{}", e.user_message());
            return Ok(ExitCode::from(EXIT_USAGE));
        }
    };

    let client = SearchClient::new(&cli.endpoint, Duration::from_secs(cli.timeout_secs))
        .context("Failed to build HTTP client")?;
    let (session, mut events) =
        ProgressSession::new(&config).context("Invalid progress configuration")?;

    // Reaches the session during a run and the retry backoff between runs
    let cancel_signal = Arc::new(Notify::new());
    let cancel_session = session.clone();
    let ctrl_c_signal = Arc::clone(&cancel_signal);
    tokio::spawn(async move {
        while tokio::signal::ctrl_c().await.is_ok() {
            cancel_session.cancel();
            ctrl_c_signal.notify_one();
        }
    });

    let policy = RetryPolicy::default().with_max_retries(cli.retries);
    let mut attempt = 0u32;
    let end = loop {
        attempt += 1;
        session.set_running(true);
        match run_once(&session, &client, &request, &mut events, &config).await? {
            RunEnd::Failed(error) if policy.should_retry(&error, attempt) => {
                let delay = policy.delay_for_attempt(attempt);
                warn!(attempt, error = %error, delay_ms = delay.as_millis() as u64, "Retrying search");
                session.set_running(false);
                if !policy.wait_before_retry(attempt, &cancel_signal).await {
                    info!(attempt, "Search cancelled during retry backoff");
                    break RunEnd::Cancelled;
                }
            }
            end => break end,
        }
    };

    match end {
        RunEnd::Finished(response) => {
            if cli.json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&response).context("Failed to encode results")?
                );
            } else {
                print_results(&response, cli.page, cli.per_page);
            }
            Ok(ExitCode::SUCCESS)
        }
        RunEnd::Failed(error) => {
            eprintln!("{}", error.user_message());
            Ok(ExitCode::from(EXIT_FAILURE))
        }
        RunEnd::Cancelled => {
            eprintln!("{}", SearchError::Cancelled.user_message());
            Ok(ExitCode::from(EXIT_CANCELLED))
        }
    }
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

async fn load_config(cli: &Cli) -> Result<ProgressConfig> {
    let mut config = match &cli.config {
        Some(path) => ProgressConfig::from_json_file(path).await?,
        None => ProgressConfig::default(),
    };

    if let Some(name) = &cli.theme {
        let Some(theme) = Theme::named(name) else {
            bail!("Unknown theme '{name}'");
        };
        config = config.with_theme(theme);
    }
    if cli.compact {
        config = config.with_summary_style(SummaryStyle::Compact);
    }
    Ok(config)
}

/// One attempt: run the request while repainting, then hold through the grace
async fn run_once(
    session: &ProgressSession,
    client: &SearchClient,
    request: &SearchRequest,
    events: &mut UnboundedReceiver<SessionEvent>,
    config: &ProgressConfig,
) -> Result<RunEnd> {
    let mut painter = Painter::stderr();
    let mut frames = tokio::time::interval(Duration::from_millis(RENDER_INTERVAL_MS));

    let search = client.search(request);
    tokio::pin!(search);

    let response = loop {
        tokio::select! {
            result = &mut search => match result {
                Ok(response) => break response,
                Err(error) => {
                    painter.clear().context("Failed to clear progress display")?;
                    session.fail(error.user_message());
                    return Ok(RunEnd::Failed(error));
                }
            },
            Some(event) = events.recv() => {
                if let SessionEvent::CancelRequested { run_id } = event {
                    info!(%run_id, "Search cancelled by user");
                    painter.clear().context("Failed to clear progress display")?;
                    session.set_running(false);
                    return Ok(RunEnd::Cancelled);
                }
                debug!(?event, "Session event");
            }
            _ = frames.tick() => paint(&mut painter, session, config)?,
        }
    };

    session.complete(response.total());
    while session.is_running() {
        frames.tick().await;
        paint(&mut painter, session, config)?;
    }
    painter.clear().context("Failed to clear progress display")?;
    Ok(RunEnd::Finished(response))
}

fn paint(painter: &mut Painter, session: &ProgressSession, config: &ProgressConfig) -> Result<()> {
    if !session.is_running() {
        return Ok(());
    }
    let mut lines = render::dialog(&session.progress(), config.theme(), config.summary_style());
    let status = render::status_line(&session.status());
    if !status.is_empty() {
        lines.push(String::new());
        lines.push(status);
    }
    painter
        .paint(&lines)
        .context("Failed to draw progress display")
}

fn print_results(response: &SearchResponse, page: usize, per_page: usize) {
    let stats = ResultStats::from_results(&response.results);
    let page = paginate(&response.results, page, per_page);

    println!(
        "Found {} results across {} platforms ({} reported){}",
        stats.total,
        stats.platform_count(),
        response.total(),
        if page.total_pages > 1 {
            format!(" (Page {} of {})", page.number, page.total_pages)
        } else {
            String::new()
        }
    );
    println!(
        "✓ {} verified · {} high confidence · 📱 {} social · 💼 {} professional · 🎓 {} academic",
        stats.verified, stats.high_confidence, stats.social, stats.professional, stats.academic
    );
    println!("Searched at {}", Local::now().format("%Y-%m-%d %H:%M:%S"));
    println!();

    for (offset, result) in page.items.iter().enumerate() {
        let number = page.first_item_number() + offset;
        let platform = result.platform.as_deref().unwrap_or("Web");
        let title = result.title.as_deref().unwrap_or("(untitled)");
        let mut tags = Vec::new();
        if result.is_verified() {
            tags.push("verified".to_string());
        }
        if let Some(score) = result.score {
            tags.push(format!("score {score:.2}"));
        }

        println!(
            "{number:>3}. [{platform}] {}{}",
            truncate_with_ellipsis(title, TITLE_MAX_CHARS),
            if tags.is_empty() {
                String::new()
            } else {
                format!("  ({})", tags.join(", "))
            }
        );
        if let Some(href) = result.href() {
            println!("     {href}");
        }
        if let Some(text) = result.snippet.as_deref().or(result.preview.as_deref()) {
            println!("     {}", truncate_with_ellipsis(text, SNIPPET_MAX_CHARS));
        }
    }

    if page.total_pages > 1 {
        let links: Vec<String> = page_window(page.number, page.total_pages)
            .into_iter()
            .map(|link| match link {
                PageLink::Number(n) if n == page.number => format!("[{n}]"),
                PageLink::Number(n) => n.to_string(),
                PageLink::Ellipsis => "…".to_string(),
            })
            .collect();
        println!();
        println!("Pages: {}", links.join(" "));
    }
}
