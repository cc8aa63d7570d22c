// porto-sync command-line entry point.
// Parses arguments, sets up logging, and runs the requested command.

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::{Parser, Subcommand};
use tracing::{error, info, warn};

use porto_sync::cache::{self, Freshness};
use porto_sync::github::client::GITHUB_API_BASE;
use porto_sync::logging::{self, LogFormat};
use porto_sync::projects::{ProjectRecord, bundled_projects};
use porto_sync::{Outcome, PortoError, Refresher, Registry, RepoId, Result, Settings};

/// Upper bound for `--max-age-days`; keeps the window in seconds far from overflow.
const MAX_AGE_DAYS_LIMIT: u64 = 36_500;
const SECS_PER_DAY: u64 = 24 * 60 * 60;

#[derive(Parser)]
#[command(name = "porto-sync", version)]
#[command(about = "Keep a cached GitHub project showcase fresh")]
struct Cli {
    /// Project store file
    #[arg(long, env = "PORTO_STORE_PATH", global = true)]
    store: Option<PathBuf>,

    /// Worklist table (JSON); defaults to the bundled list
    #[arg(long, env = "PORTO_WORKLIST", global = true)]
    worklist: Option<PathBuf>,

    /// Staleness window in days
    #[arg(
        long,
        default_value_t = 7,
        value_parser = clap::value_parser!(u64).range(0..=MAX_AGE_DAYS_LIMIT),
        global = true
    )]
    max_age_days: u64,

    /// Refresh even if the store is fresh
    #[arg(long, env = "PORTO_FORCE_REFRESH", global = true)]
    force_refresh: bool,

    /// GitHub API root
    #[arg(long, default_value = GITHUB_API_BASE, global = true)]
    api_base: String,

    /// GitHub token; requests are anonymous without one
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true, global = true)]
    token: Option<String>,

    /// Debug-level logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log as JSON lines
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Refresh the store if needed and print the project list (default)
    Refresh,

    /// Print the stored project list without touching the network
    Show,

    /// Report the store location, age, and freshness
    Status,

    /// List a user's repositories carrying a topic, most starred first
    Search {
        /// GitHub user or organization
        user: String,
        /// Topic to filter by
        topic: String,
    },

    /// Fetch one repository to check connectivity and rate limits
    Probe {
        /// Repository as owner/name or GitHub URL
        repo: String,
    },
}

impl Cli {
    fn settings(&self) -> Settings {
        let mut settings = Settings::new(
            self.store
                .clone()
                .unwrap_or_else(cache::default_store_path),
        )
        .with_token(self.token.clone());
        settings.api_base = self.api_base.clone();
        settings.max_age = Duration::from_secs(self.max_age_days.saturating_mul(SECS_PER_DAY));
        settings.force_refresh = self.force_refresh;
        settings
    }

    fn registry(&self) -> Result<Registry> {
        match &self.worklist {
            Some(path) => Registry::load(path),
            None => Registry::bundled(),
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    // A missing .env file is fine.
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    let format = if cli.json_logs {
        LogFormat::Json
    } else {
        LogFormat::Pretty
    };
    logging::init(format, cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "porto-sync failed");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let settings = cli.settings();

    match cli.command.as_ref().unwrap_or(&Command::Refresh) {
        Command::Refresh => refresh(&settings, cli.registry()?).await,
        Command::Show => show(&settings),
        Command::Status => status(&settings),
        Command::Search { user, topic } => search(&settings, user, topic).await,
        Command::Probe { repo } => probe(&settings, repo).await,
    }
}

async fn refresh(settings: &Settings, registry: Registry) -> Result<()> {
    if settings.token.is_none() {
        info!("No GitHub token found, using the anonymous rate limit");
    }

    let client = match settings.client() {
        Ok(client) => client,
        Err(e) => {
            warn!(error = %e, "Could not build GitHub client, serving stored data");
            return print_projects(&stored_or_bundled(settings));
        }
    };

    let refresher = Refresher::new(client, settings.store(), settings.policy(), registry);
    let report = refresher.get_projects().await;

    match report.outcome {
        Outcome::Cached => info!("Served from cache"),
        Outcome::Refreshed { persisted } => info!(persisted, "Served fresh data"),
        Outcome::Fallback(source) => info!(?source, "Served fallback data"),
    }
    print_projects(&report.projects)
}

fn show(settings: &Settings) -> Result<()> {
    print_projects(&stored_or_bundled(settings))
}

/// Stored projects if usable, otherwise the bundled set.
fn stored_or_bundled(settings: &Settings) -> Vec<ProjectRecord> {
    match settings.store().load() {
        Ok(Some(projects)) if !projects.is_empty() => projects,
        Ok(_) => bundled_projects(),
        Err(e) => {
            warn!(error = %e, "Projects cache unreadable, using bundled data");
            bundled_projects()
        }
    }
}

fn status(settings: &Settings) -> Result<()> {
    let store = settings.store();
    let last_write = store.last_modified();
    let freshness = settings.policy().check(chrono::Utc::now(), last_write);

    println!("store:      {}", store.path().display());
    match last_write {
        Some(at) => println!("written:    {}", at.format("%Y-%m-%d %H:%M:%S UTC")),
        None => println!("written:    never"),
    }
    let verdict = match freshness {
        Freshness::Fresh => "fresh",
        Freshness::Stale => "stale",
        Freshness::Unknown => "missing",
        Freshness::Forced => "forced refresh",
    };
    println!("freshness:  {}", verdict);
    println!("max age:    {} days", settings.max_age.as_secs() / SECS_PER_DAY);
    Ok(())
}

async fn search(settings: &Settings, user: &str, topic: &str) -> Result<()> {
    let client = settings.client()?;
    for repo in client.search_by_topic(user, topic).await {
        println!("{}\t{}", repo.full_name, repo.stargazers_count);
    }
    Ok(())
}

async fn probe(settings: &Settings, repo: &str) -> Result<()> {
    let id = RepoId::parse(repo);
    if !id.is_well_formed() {
        return Err(PortoError::InvalidIdentifier(repo.to_string()));
    }

    let client = settings.client()?;
    println!(
        "auth:       {}",
        if client.is_authenticated() { "token" } else { "anonymous" }
    );

    let result = client.get_repo(&id).await;
    let rate_limit = client.rate_limit();
    println!(
        "rate limit: {}/{} remaining",
        rate_limit.remaining, rate_limit.limit
    );

    let details = result?;
    println!("found:      {} ({})", details.full_name, details.html_url);
    Ok(())
}

fn print_projects(projects: &[ProjectRecord]) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(projects)?);
    Ok(())
}
