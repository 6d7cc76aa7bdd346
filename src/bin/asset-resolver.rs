//! asset-resolver CLI - fetch assets from configured sources
//!
//! ## Example Usage
//!
//! ```bash
//! # Fetch a sound into a file
//! asset-resolver fetch Sound 83a9787d4cb6f3b7632b4ddfebf74367 -o pop.wav
//!
//! # Add a source on the command line
//! asset-resolver -s "ImageBitmap,Sound=https://cdn.example.com/{asset_id}.{data_format}" fetch Sound 83a9
//!
//! # Show which sources would be tried for projects
//! asset-resolver sources --type Project
//! ```

use asset_resolver::prelude::*;
use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::process;
use std::time::{Duration, Instant};

/// Exit code when no source provided the asset
const EXIT_NOT_FOUND: i32 = 2;

/// asset-resolver: fetch assets from prioritized remote sources
#[derive(Parser)]
#[command(name = "asset-resolver")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Fetch assets from prioritized remote sources", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Extra source as TYPES=URL_TEMPLATE, tried after configured sources
    #[arg(short = 's', long = "source", global = true, value_name = "SPEC")]
    sources: Vec<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch one asset
    Fetch {
        /// Asset type name (see `types`)
        #[arg(value_name = "TYPE")]
        asset_type: String,

        /// Asset identifier
        #[arg(value_name = "ID")]
        asset_id: String,

        /// Write the asset bytes to this file
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,

        /// Print the outcome as JSON
        #[arg(long)]
        json: bool,
    },

    /// List sources in the order they are tried
    Sources {
        /// Only list sources serving this asset type
        #[arg(short = 't', long = "type", value_name = "TYPE")]
        asset_type: Option<String>,
    },

    /// List built-in asset types
    Types,
}

fn default_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".asset-resolver").join("config.toml"))
}

/// Load the config file, falling back to defaults when none exists
fn load_config(path: Option<&Path>, extra_sources: &[String]) -> Result<ResolverConfig> {
    let mut config = match path {
        Some(path) => ResolverConfig::load(path)?,
        None => match default_config_path() {
            Some(default) if default.exists() => ResolverConfig::load(&default)?,
            _ => ResolverConfig::default(),
        },
    };

    for spec in extra_sources {
        config.sources.push(SourceConfig::from_spec(spec)?);
    }
    Ok(config)
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let config = match load_config(cli.config.as_deref(), &cli.sources) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            process::exit(1);
        }
    };

    if cli.verbose {
        println!(
            "{} v{}",
            "asset-resolver".cyan().bold(),
            env!("CARGO_PKG_VERSION")
        );
        println!(
            "Sources: {}",
            config.sources.len().to_string().dimmed()
        );
    }

    let result = match cli.command {
        Commands::Fetch {
            asset_type,
            asset_id,
            output,
            json,
        } => fetch_asset(FetchConfig {
            asset_type,
            asset_id,
            output,
            json,
            verbose: cli.verbose,
            config,
        }),
        Commands::Sources { asset_type } => list_sources(&config, asset_type.as_deref()),
        Commands::Types => {
            list_types();
            Ok(0)
        }
    };

    match result {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            if let Some(failures) = e.failures() {
                for failure in failures {
                    eprintln!("  {} {}", "-".red(), failure);
                }
            }
            process::exit(1);
        }
    }
}

struct FetchConfig {
    asset_type: String,
    asset_id: String,
    output: Option<PathBuf>,
    json: bool,
    verbose: bool,
    config: ResolverConfig,
}

#[derive(Serialize)]
struct FetchSummary {
    asset_type: String,
    asset_id: String,
    found: bool,
    bytes: usize,
    data_format: Option<DataFormat>,
    output: Option<PathBuf>,
    elapsed_ms: u128,
}

fn fetch_asset(cfg: FetchConfig) -> Result<i32> {
    let asset_type = AssetType::from_name(&cfg.asset_type)
        .ok_or_else(|| ResolverError::UnknownAssetType(cfg.asset_type.clone()))?;

    let registry = cfg.config.build_registry()?;
    let fetcher = HttpFetcher::new(&cfg.config.http_options())?;
    let resolver = AssetResolver::with_registry(registry, fetcher);

    if cfg.verbose {
        println!(
            "  {} {}",
            "Candidates:".bold(),
            resolver.registry().matching(asset_type.name).len()
        );
    }

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
        pb.set_style(style);
    }
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_message(format!("Resolving {} {}...", asset_type, cfg.asset_id));

    let start = Instant::now();
    let outcome = runtime.block_on(resolver.load(&asset_type, &cfg.asset_id));
    let elapsed = start.elapsed();
    pb.finish_and_clear();

    let asset = outcome?;

    if let (Some(asset), Some(path)) = (&asset, &cfg.output) {
        fs::write(path, asset.data().unwrap_or_default())?;
    }

    let summary = FetchSummary {
        asset_type: asset_type.name.to_string(),
        asset_id: cfg.asset_id.clone(),
        found: asset.is_some(),
        bytes: asset.as_ref().and_then(Asset::data).map_or(0, <[u8]>::len),
        data_format: asset.as_ref().and_then(Asset::data_format),
        output: cfg.output.clone(),
        elapsed_ms: elapsed.as_millis(),
    };

    if cfg.json {
        let json = serde_json::to_string_pretty(&summary)
            .map_err(|e| ResolverError::ConfigError(format!("Failed to encode summary: {}", e)))?;
        println!("{}", json);
    } else if summary.found {
        println!("{}", "Asset loaded".green().bold());
        println!("  {} {} {}", "Asset:".bold(), summary.asset_type, summary.asset_id.bright_green());
        println!("  {} {}", "Size:".bold(), summary.bytes);
        if let Some(format) = summary.data_format {
            println!("  {} {}", "Format:".bold(), format);
        }
        if let Some(ref path) = summary.output {
            println!("  {} {}", "Written to:".bold(), path.display());
        }
        println!("  {} {} ms", "Elapsed:".bold(), summary.elapsed_ms);
    } else {
        println!(
            "{} no source provided {} {}",
            "Not found:".yellow().bold(),
            summary.asset_type,
            summary.asset_id
        );
    }

    Ok(if summary.found { 0 } else { EXIT_NOT_FOUND })
}

fn list_sources(config: &ResolverConfig, asset_type: Option<&str>) -> Result<i32> {
    let registry = config.build_registry()?;

    println!("{}", "Sources (in priority order)".green().bold());
    println!("{}", "===========================".green());

    let mut shown = 0;
    for (index, entry) in registry.iter().enumerate() {
        if let Some(name) = asset_type {
            if !entry.serves(name) {
                continue;
            }
        }
        shown += 1;
        println!(
            "  {} {}",
            format!("#{}", index).cyan(),
            entry.describe().unwrap_or("<custom>")
        );
        println!("     {} {}", "types:".dimmed(), entry.types().join(", "));
    }

    if shown == 0 {
        println!("  {}", "No sources configured".yellow());
    }
    Ok(0)
}

fn list_types() {
    println!("{}", "Asset types".green().bold());
    println!("{}", "===========".green());
    for asset_type in AssetType::ALL {
        println!(
            "  {:<12} {:<18} {:<5} {}",
            asset_type.name.bold(),
            asset_type.content_type,
            asset_type.runtime_format,
            if asset_type.immutable { "immutable" } else { "mutable" }.dimmed()
        );
    }
}
