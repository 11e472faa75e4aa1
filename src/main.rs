//! Crawl Studio main entry point
//!
//! This is the command-line front end for the Crawl Studio session layer.

use anyhow::{anyhow, bail, Context};
use clap::{Args, Parser, Subcommand};
use crawl_studio::config::{load_config_with_hash, Config};
use crawl_studio::history::{open_history, HistoryCache, HistoryStore, MemoryStore};
use crawl_studio::schema::FieldDraft;
use crawl_studio::session::{Editor, SessionController, SessionState};
use crawl_studio::view::{default_mode, render, ViewMode};
use crawl_studio::HttpCrawlClient;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

const EMPTY_HISTORY: &str = "No history yet. Run a crawl to see entries here.";

/// Crawl Studio: compose, run and revisit crawls against a crawl service
#[derive(Parser, Debug)]
#[command(name = "crawl-studio")]
#[command(version)]
#[command(about = "Client for a web crawling and extraction service", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (defaults are used if it does not exist)
    #[arg(short, long, value_name = "CONFIG", default_value = "crawl-studio.toml")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose", global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Crawl a URL and save the result to history
    Crawl(CrawlArgs),

    /// Inspect or clear the crawl history
    History {
        #[command(subcommand)]
        action: HistoryAction,
    },
}

#[derive(Args, Debug)]
struct CrawlArgs {
    /// URL to crawl
    url: String,

    /// Natural-language extraction instruction
    #[arg(short, long)]
    instruction: Option<String>,

    /// Restrict the crawl to elements matching this selector
    #[arg(long)]
    css_selector: Option<String>,

    /// Minimum word count for a content block to be kept
    #[arg(long)]
    word_count_threshold: Option<u32>,

    /// Do not capture a screenshot
    #[arg(long)]
    no_screenshot: bool,

    /// Allow the service to answer from its own cache
    #[arg(long)]
    use_cache: bool,

    /// Keep boilerplate (navigation, ads) in the output
    #[arg(long)]
    no_smart_mode: bool,

    /// Extraction field, repeatable: NAME:SELECTOR[:TYPE] (TYPE is text, html or attribute)
    #[arg(long = "field", value_name = "FIELD")]
    fields: Vec<String>,

    /// Override the default view (raw or structured)
    #[arg(long)]
    view: Option<ViewMode>,
}

#[derive(Subcommand, Debug)]
enum HistoryAction {
    /// List saved crawls, most recent first
    List,

    /// Show a saved crawl
    Show {
        id: String,

        /// Override the default view (raw or structured)
        #[arg(long)]
        view: Option<ViewMode>,
    },

    /// Delete all saved crawls
    Clear,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = load_or_default_config(&cli.config)?;

    match cli.command {
        Command::Crawl(args) => handle_crawl(&config, args).await,
        Command::History { action } => handle_history(&config, action).await,
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("crawl_studio=info,warn"),
            1 => EnvFilter::new("crawl_studio=debug,info"),
            2 => EnvFilter::new("crawl_studio=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Loads the config file, or the built-in defaults if it does not exist
fn load_or_default_config(path: &Path) -> anyhow::Result<Config> {
    if !path.exists() {
        tracing::info!("No config at {}, using defaults", path.display());
        return Ok(Config::default());
    }

    let (config, hash) = load_config_with_hash(path)
        .with_context(|| format!("Failed to load configuration from {}", path.display()))?;
    tracing::info!("Configuration loaded (hash: {})", hash);
    Ok(config)
}

/// Parses `NAME:SELECTOR[:TYPE]`
///
/// Selectors may themselves contain colons (`a:hover`), so a trailing segment
/// only counts as the type when it names one.
fn parse_field_arg(arg: &str) -> anyhow::Result<FieldDraft> {
    let (name, rest) = arg
        .split_once(':')
        .ok_or_else(|| anyhow!("Field '{}' must look like NAME:SELECTOR[:TYPE]", arg))?;

    let (selector, field_type) = match rest.rsplit_once(':') {
        Some((selector, ty)) if ty.parse::<crawl_studio::FieldType>().is_ok() => (selector, ty),
        _ => (rest, ""),
    };

    Ok(FieldDraft::parse(name, selector, field_type)?)
}

async fn handle_crawl(config: &Config, args: CrawlArgs) -> anyhow::Result<()> {
    let mut editor = Editor::new(config.request_defaults());
    editor.url = args.url;
    editor.instruction = args.instruction.unwrap_or_default();
    editor.overrides.css_selector = args.css_selector;
    editor.overrides.word_count_threshold = args.word_count_threshold;
    editor.overrides.screenshot = args.no_screenshot.then_some(false);
    editor.overrides.bypass_cache = args.use_cache.then_some(false);
    editor.overrides.smart_mode = args.no_smart_mode.then_some(false);
    for arg in &args.fields {
        editor.schema.push_field(parse_field_arg(arg)?);
    }

    if !editor.can_submit() {
        bail!("A URL is required");
    }
    let request = editor.compose()?;
    let client = HttpCrawlClient::new(&config.service)?;

    match open_history(Path::new(&config.history.database_path)) {
        Ok(history) => run_crawl(client, Arc::new(history), request, args.view).await,
        Err(e) => {
            tracing::warn!("History unavailable, results will not be saved: {}", e);
            let history = Arc::new(HistoryCache::new(MemoryStore::new()));
            run_crawl(client, history, request, args.view).await
        }
    }
}

async fn run_crawl<S: HistoryStore>(
    client: HttpCrawlClient,
    history: Arc<HistoryCache<S>>,
    request: crawl_studio::CrawlRequest,
    view: Option<ViewMode>,
) -> anyhow::Result<()> {
    let mut controller = SessionController::new(client, history);
    controller.submit(request).await?;

    if let Some(mode) = view {
        controller.set_view_mode(mode);
    }

    match controller.state() {
        SessionState::Succeeded(result) => {
            if let Some(id) = controller.active_entry_id() {
                tracing::info!("Saved as history entry {}", id);
            }
            if let Some(uri) = result.screenshot_data_uri() {
                tracing::info!("Screenshot captured ({} bytes as data URI)", uri.len());
            }
            if let Some(content) = controller.displayed_content() {
                println!("{}", content);
            }
            Ok(())
        }
        SessionState::Failed(failure) => bail!("{}", failure),
        state => bail!("Crawl ended in unexpected state: {}", state),
    }
}

async fn handle_history(config: &Config, action: HistoryAction) -> anyhow::Result<()> {
    match open_history(Path::new(&config.history.database_path)) {
        Ok(history) => run_history(&history, action).await,
        Err(e) => {
            tracing::warn!("History unavailable, showing an empty list: {}", e);
            run_history(&HistoryCache::new(MemoryStore::new()), action).await
        }
    }
}

async fn run_history<S: HistoryStore>(
    history: &HistoryCache<S>,
    action: HistoryAction,
) -> anyhow::Result<()> {
    match action {
        HistoryAction::List => {
            let entries = history.list().await;
            if entries.is_empty() {
                println!("{}", EMPTY_HISTORY);
            }
            for entry in entries {
                println!(
                    "{}  {}  {}",
                    entry.id,
                    entry.created_at.format("%Y-%m-%d %H:%M:%S"),
                    truncate(&entry.url, 42)
                );
            }
        }
        HistoryAction::Show { id, view } => {
            let entry = history
                .get(&id)
                .await
                .ok_or_else(|| anyhow!("No history entry with id {}", id))?;
            let mode = view.unwrap_or_else(|| default_mode(&entry.request_options));
            println!("{}", render(&entry.result, mode));
        }
        HistoryAction::Clear => {
            history.clear().await?;
            println!("History cleared");
        }
    }

    Ok(())
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        let kept: String = text.chars().take(max - 3).collect();
        format!("{}...", kept)
    } else {
        text.to_string()
    }
}
