//! Listing-Harvest main entry point
//!
//! This is the command-line interface for the Listing-Harvest collector.

use clap::Parser;
use listing_harvest::config::{default_config, load_config_with_hash, Config};
use listing_harvest::harvest::harvest;
use listing_harvest::output::print_report;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Listing-Harvest: a polite paginated listing collector
///
/// Listing-Harvest walks the numbered pages of a listing catalog, collects
/// the digit-only identifiers they carry, and writes the sorted, de-duplicated
/// set to a delimited file. Without a configuration file it harvests the
/// Eventbrite Ireland "all events" listing.
#[derive(Parser, Debug)]
#[command(name = "listing-harvest")]
#[command(version = "1.0.0")]
#[command(about = "A polite paginated listing collector", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (built-in defaults when omitted)
    #[arg(value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Show the resolved configuration and first page URL without fetching
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path).map_err(|e| {
                tracing::error!("Failed to load configuration: {}", e);
                e
            })?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => {
            tracing::info!("No configuration file given, using built-in defaults");
            default_config()?
        }
    };

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    tracing::info!("Harvester initialized.");
    let report = harvest(&config).await?;

    if !cli.quiet {
        print_report(&report);
    }
    tracing::info!("Harvest finished.");

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("listing_harvest=info,warn"),
            1 => EnvFilter::new("listing_harvest=debug,info"),
            2 => EnvFilter::new("listing_harvest=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: shows what would be harvested
fn handle_dry_run(config: &Config) {
    println!("=== Listing-Harvest Dry Run ===\n");

    println!("Source:");
    println!("  URL template: {}", config.source.url_template);
    println!("  First page:   {}", config.source.page_url(config.source.start_page));
    println!("  Selector:     {}[{}]", config.source.tag, config.source.attribute);

    println!("\nRequests:");
    println!("  User-Agent:      {}", config.request.user_agent);
    println!("  Page delay:      {}ms", config.request.page_delay_ms);
    println!("  Timeout:         {}s", config.request.timeout_secs);
    println!("  Connect timeout: {}s", config.request.connect_timeout_secs);

    println!("\nOutput:");
    println!("  Path:      {}", config.output.path);
    println!("  Header:    {}", config.output.header);
    println!("  Delimiter: {:?}", config.output.delimiter_char());

    println!("\n✓ Configuration is valid");
}
