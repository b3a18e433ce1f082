//! Model Atlas CLI binary.
//!
//! AI model catalog with fallback, search and recommendations.
//!
//! # Commands
//!
//! - `models` - List/search the catalog or show one model
//! - `recommend` - Recommend models for a free-text need
//! - `server` - Start the HTTP API server

use std::path::PathBuf;
use std::sync::Arc;

use atlas::{
    catalog::{
        CatalogSnapshot, CatalogStore, Category, CategoryFilter, Enhancer, Factor, HttpSource,
        StaticSource,
    },
    config::Config,
    error::AtlasError,
    query::{by_category, format_price, search, strengths_of},
    recommend::{CategoryClassifier, Recommender},
    server::{serve, ServerConfig},
    ModelRecord, VERSION,
};

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "atlas")]
#[command(version = VERSION)]
#[command(about = "Model Atlas - AI model catalog and recommendations", long_about = None)]
struct Cli {
    /// Config file (default: <config dir>/model-atlas/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Use the built-in model list only
    #[arg(long, global = true)]
    offline: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List and search models
    Models {
        #[command(subcommand)]
        action: Option<ModelsAction>,
    },

    /// Recommend models for a need
    Recommend {
        /// What you need the model for
        needs: String,

        /// Metric to weigh (accuracy, performance, price); repeatable
        #[arg(short, long = "factor", required = true)]
        factors: Vec<Factor>,

        /// Number of recommendations
        #[arg(short, long, default_value = "3")]
        limit: usize,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Start the HTTP API server
    Server {
        /// Listen port (default: from config, 10000)
        #[arg(short, long)]
        port: Option<u16>,

        /// Listen host (default: from config, 127.0.0.1)
        #[arg(long)]
        host: Option<String>,

        /// Bind to all interfaces
        #[arg(long)]
        bind_all: bool,

        /// Upstream API base URL
        #[arg(long)]
        upstream: Option<String>,

        /// Seconds between catalog refreshes (0 disables)
        #[arg(long)]
        refresh_secs: Option<u64>,

        /// Enable verbose logging
        #[arg(short, long)]
        verbose: bool,

        /// Log as JSON lines
        #[arg(long)]
        log_json: bool,
    },
}

#[derive(Subcommand)]
enum ModelsAction {
    /// List all models
    List {
        /// Filter by category (coding, chat, problem-solving, it-support, content, media, all)
        #[arg(short, long, default_value = "all")]
        category: CategoryFilter,
    },

    /// Search for models
    Search {
        /// Search query
        query: String,
    },

    /// Get info about a specific model
    Info {
        /// Model ID (e.g., anthropic/claude-3-opus)
        model: String,
    },
}

fn main() -> anyhow::Result<()> {
    // A missing .env is fine
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Logging comes up before config so env override warnings are shown
    match &cli.command {
        Commands::Server {
            verbose, log_json, ..
        } => init_logging(if *verbose { "debug" } else { "info" }, *log_json),
        _ => init_logging("warn", false),
    }

    let config = Config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Models { action } => cmd_models(&config, cli.offline, action),

        Commands::Recommend {
            needs,
            factors,
            limit,
            json,
        } => cmd_recommend(&config, cli.offline, &needs, &factors, limit, json),

        Commands::Server {
            port,
            host,
            bind_all,
            upstream,
            refresh_secs,
            ..
        } => cmd_server(config, port, host, bind_all, upstream, refresh_secs),
    }
}

fn init_logging(log_level: &str, json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

/// Build a store from config and load it once
fn load_catalog(config: &Config, offline: bool) -> anyhow::Result<Arc<CatalogSnapshot>> {
    let enhancer = Enhancer::new(config.inference.clone());

    let store = if offline {
        CatalogStore::new(StaticSource::empty())
    } else {
        let source = HttpSource::new(
            config.upstream.models_url(),
            config.upstream.timeout_secs.map(std::time::Duration::from_secs),
        )?
        .with_api_key(config.upstream.api_key.clone());
        CatalogStore::new(source)
    };

    let mut store = store.with_enhancer(enhancer);
    if let Some(seed) = config.catalog.seed {
        store = store.with_seed(seed);
    }

    let runtime = tokio::runtime::Runtime::new()?;
    Ok(runtime.block_on(store.load()))
}

fn cmd_models(config: &Config, offline: bool, action: Option<ModelsAction>) -> anyhow::Result<()> {
    let snapshot = load_catalog(config, offline)?;

    match action {
        None => print_table(&by_category(snapshot.records(), CategoryFilter::All)),

        Some(ModelsAction::List { category }) => {
            let records = by_category(snapshot.records(), category);
            if let CategoryFilter::Only(c) = category {
                println!("{} ({}):", c.display_name(), records.len());
            } else {
                println!("Available Models ({}):", records.len());
            }
            println!();
            print_table(&records);
        },

        Some(ModelsAction::Search { query }) => {
            let hits = search(snapshot.records(), &query);
            println!("Search results for '{query}' ({}):", hits.len());
            println!();
            print_table(&hits);
        },

        Some(ModelsAction::Info { model }) => match snapshot.get(&model) {
            Some(record) => print_info(record),
            None => {
                eprintln!("Try 'atlas models search {model}' to find similar models");
                return Err(AtlasError::ModelNotFound(model).into());
            },
        },
    }

    Ok(())
}

fn print_table(records: &[&ModelRecord]) {
    println!(
        "{:<40} {:<18} {:>10}  {}",
        "ID", "Provider", "Context", "Price"
    );
    println!("{}", "-".repeat(100));

    for record in records {
        let context = record
            .context_length
            .map_or_else(|| "-".to_string(), |c| c.to_string());
        println!(
            "{:<40} {:<18} {:>10}  {}",
            record.id,
            record.provider_name(),
            context,
            format_price(record)
        );
    }
}

fn print_info(record: &ModelRecord) {
    println!("Model: {}", record.id);
    println!("Name: {}", record.name);
    println!("Provider: {}", record.provider_name());
    if let Some(context) = record.context_length {
        println!("Context Length: {context}");
    }
    println!("Price: {}", format_price(record));
    println!("Strengths: {}", strengths_of(record));

    let categories: Vec<&str> = record
        .capability_list()
        .iter()
        .map(Category::display_name)
        .collect();
    println!("Categories: {}", categories.join(", "));

    if let Some(metrics) = record.metrics {
        println!();
        println!("Metrics:");
        println!("  Accuracy: {:.1}", metrics.accuracy);
        println!("  Performance: {:.1}", metrics.performance);
        println!("  Price value: {:.1}", metrics.price);
    }

    if let Some(description) = &record.description {
        println!();
        println!("{description}");
    }
}

fn cmd_recommend(
    config: &Config,
    offline: bool,
    needs: &str,
    factors: &[Factor],
    limit: usize,
    json: bool,
) -> anyhow::Result<()> {
    let snapshot = load_catalog(config, offline)?;
    let recommender =
        Recommender::new(CategoryClassifier::new(config.classifier.clone())).with_limit(limit);

    let needed = recommender.classifier().classify(needs);
    let picks = recommender.recommend_for(snapshot.records(), &needed, factors);

    if json {
        let output = serde_json::json!({
            "categories": needed,
            "recommendations": picks,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    let names: Vec<&str> = needed.iter().map(Category::display_name).collect();
    println!("Detected needs: {}", names.join(", "));
    println!();

    if picks.is_empty() {
        println!("No matching models.");
        return Ok(());
    }

    for (rank, pick) in picks.iter().enumerate() {
        println!(
            "{}. {} ({}) - {}% match",
            rank + 1,
            pick.model.name,
            pick.model.provider_name(),
            pick.match_score
        );
        println!("   Matches: {}", pick.matched_categories.join(", "));
        println!("   Price: {}", format_price(&pick.model));
    }

    Ok(())
}

fn cmd_server(
    config: Config,
    port: Option<u16>,
    host: Option<String>,
    bind_all: bool,
    upstream: Option<String>,
    refresh_secs: Option<u64>,
) -> anyhow::Result<()> {
    let mut config = config;
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }

    let mut server = ServerConfig::from_config(&config)?;
    if bind_all {
        server = server.bind_all();
    }
    if let Some(upstream) = upstream {
        server = server.with_upstream(upstream);
    }
    if let Some(secs) = refresh_secs {
        server = server.with_refresh_secs(secs);
    }

    tracing::info!("Starting Model Atlas server on {}", server.addr);

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(serve(server))?;
    Ok(())
}
