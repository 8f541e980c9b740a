//! osint-dispatch: OSINT lookup dispatcher.
//!
//! Usage:
//!   osint-dispatch lookup -c Domain example.com   Query every Domain tool
//!   osint-dispatch lookup                          Prompt for category and target
//!   osint-dispatch tools [-c IP]                   List registered tools
//!   osint-dispatch categories                      List registry categories

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

use osint_dispatch::config::{self, OsintConfig};
use osint_dispatch::registry;
use osint_dispatch::router;
use osint_dispatch::tools::{Fetch, HttpInvoker};
use osint_dispatch::types::Category;
use osint_dispatch::ui;

// ---------------------------------------------------------------------------
// CLI definition
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(name = "osint-dispatch")]
#[command(version)]
#[command(about = "Run a target through every OSINT tool registered for its category")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to the config file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Path to the tool registry (overrides the config file).
    #[arg(long, global = true)]
    registry: Option<PathBuf>,

    /// Log level (debug, info, warn, error).
    #[arg(long, global = true)]
    log_level: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Dispatch a target to every tool in a category.
    Lookup {
        /// Target category; prompted for when omitted.
        #[arg(short, long, value_enum, ignore_case = true)]
        category: Option<Category>,

        /// Username, email, domain or IP to look up; prompted for when omitted.
        target: Option<String>,

        /// Print the full result map as a single JSON object.
        #[arg(long)]
        json: bool,
    },

    /// List registered tools.
    Tools {
        /// Only list tools in this category.
        #[arg(short, long)]
        category: Option<String>,
    },

    /// List the categories present in the registry.
    Categories,
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(config::default_config_path);
    let cfg = config::load_config(&config_path)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?;

    // Initialize logging
    let log_level = cli.log_level.as_deref().unwrap_or(&cfg.log_level);
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    let registry_path = cli
        .registry
        .clone()
        .unwrap_or_else(|| cfg.resolved_registry_path());

    match cli.command {
        Commands::Lookup {
            category,
            target,
            json,
        } => cmd_lookup(&cfg, &registry_path, category, target, json).await,
        Commands::Tools { category } => cmd_tools(&registry_path, category.as_deref()),
        Commands::Categories => cmd_categories(&registry_path),
    }
}

// ---------------------------------------------------------------------------
// Command implementations
// ---------------------------------------------------------------------------

async fn cmd_lookup(
    cfg: &OsintConfig,
    registry_path: &Path,
    category: Option<Category>,
    target: Option<String>,
    json: bool,
) -> Result<()> {
    let (category, target) = collect_input(category, target)?;

    let invoker = HttpInvoker::new(cfg.timeout())?;
    info!(
        "Looking up '{}' in {} (timeout {:?})",
        target,
        category,
        invoker.timeout()
    );

    if !json {
        println!(
            "{} Running {} tools for '{}' ...",
            ">>>".green().bold(),
            category,
            target
        );
    }

    let fetcher: Arc<dyn Fetch> = Arc::new(invoker);
    let results = router::route_query_concurrent(
        registry_path,
        fetcher,
        category.as_str(),
        &target,
        cfg.concurrency,
    )
    .await
    .with_context(|| format!("Lookup of '{}' failed", target))?;

    let mut stdout = io::stdout().lock();
    if json {
        ui::render_results_json(&mut stdout, &results)
    } else {
        ui::render_results(&mut stdout, category.as_str(), &target, &results)
    }
}

fn cmd_tools(registry_path: &Path, category: Option<&str>) -> Result<()> {
    let tools = match category {
        Some(category) => registry::list_tools_by_category(registry_path, category)?,
        None => registry::load_registry(registry_path)?,
    };
    ui::render_tools(&mut io::stdout().lock(), &tools)
}

fn cmd_categories(registry_path: &Path) -> Result<()> {
    let categories = registry::list_categories(registry_path)?;
    ui::render_categories(&mut io::stdout().lock(), &categories)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Fill in whatever the command line left out by prompting on stdin.
fn collect_input(category: Option<Category>, target: Option<String>) -> Result<(Category, String)> {
    let stdin = io::stdin();
    let mut reader = stdin.lock();
    let mut stdout = io::stdout();

    let category = match category {
        Some(category) => category,
        None => ui::prompt_category(&mut reader, &mut stdout)?,
    };

    let target = match ui::non_blank_target(target) {
        Some(target) => target,
        None => ui::prompt_target(&mut reader, &mut stdout)?,
    };

    Ok((category, target))
}
