//! Station crawler entry point
//!
//! Each crawl stage is runnable on its own: `cities` lists cities,
//! `stations` lists every city's stations, `details` fetches every
//! station's details. The last two forward their records to Kafka unless
//! `--no-publish` is given.

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use station_crawler::config::{load_config_with_hash, validate, Config};
use station_crawler::crawler::Crawler;
use station_crawler::output::{
    print_city_summary, print_detail_summary, print_station_summary, write_json,
};
use station_crawler::publish::Publisher;
use tracing_subscriber::EnvFilter;

/// Crawls cities, stations and station details and forwards them to Kafka
#[derive(Parser, Debug)]
#[command(name = "station-crawler")]
#[command(version)]
#[command(about = "Crawls the station hierarchy and forwards it to Kafka", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (defaults are used when omitted)
    #[arg(short, long, value_name = "CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose", global = true)]
    quiet: bool,

    /// Route requests through the configured forward proxy
    #[arg(long, global = true)]
    use_proxy: bool,

    /// Forward proxy address (host:port)
    #[arg(long, value_name = "ADDR", global = true)]
    proxy_url: Option<String>,

    /// Skip TLS certificate verification
    #[arg(long, global = true)]
    insecure: bool,

    /// Per-request timeout in seconds
    #[arg(long, value_name = "SECS", global = true)]
    timeout: Option<u64>,

    /// Kafka bootstrap brokers, comma separated
    #[arg(long, value_delimiter = ',', value_name = "HOST:PORT", global = true)]
    brokers: Option<Vec<String>>,

    /// Kafka topic
    #[arg(long, global = true)]
    topic: Option<String>,

    /// Do not forward records to Kafka
    #[arg(long, global = true)]
    no_publish: bool,

    /// Write the stage's results to this file as JSON
    #[arg(short, long, value_name = "FILE", global = true)]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone, Copy)]
enum Command {
    /// Fetch and list all operationally active cities
    Cities,

    /// Fetch every city's station list
    Stations,

    /// Fetch every station's details (runs the station stage first)
    Details,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    match run(cli).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            tracing::error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("station_crawler=info,warn"),
            1 => EnvFilter::new("station_crawler=debug,info"),
            2 => EnvFilter::new("station_crawler=trace,debug"),
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

/// Runs the selected stage; `Ok(false)` means it collected nothing
async fn run(cli: Cli) -> anyhow::Result<bool> {
    let config = load_configuration(&cli)?;
    let crawler = Crawler::from_config(&config).context("Failed to build HTTP client")?;

    match cli.command {
        Command::Cities => handle_cities(&crawler, cli.output.as_deref()).await,
        Command::Stations | Command::Details => {
            let mut publisher = open_publisher(&config, cli.no_publish).await?;
            let outcome = if matches!(cli.command, Command::Stations) {
                handle_stations(&crawler, publisher.as_mut(), cli.output.as_deref()).await
            } else {
                handle_details(&crawler, publisher.as_mut(), cli.output.as_deref()).await
            };

            if let Some(publisher) = publisher.as_mut() {
                publisher.close().await;
            }
            outcome
        }
    }
}

/// Loads the config file (if any) and applies command-line overrides
fn load_configuration(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("Failed to load configuration from {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => Config::default(),
    };

    if cli.use_proxy {
        config.http.use_proxy = true;
    }
    if let Some(proxy_url) = &cli.proxy_url {
        config.http.proxy_url = proxy_url.clone();
    }
    if cli.insecure {
        config.http.verify_tls = false;
    }
    if let Some(timeout) = cli.timeout {
        config.http.timeout_secs = timeout;
    }
    if let Some(brokers) = &cli.brokers {
        config.kafka.brokers = brokers.clone();
    }
    if let Some(topic) = &cli.topic {
        config.kafka.topic = topic.clone();
    }

    validate(&config).context("Invalid configuration")?;
    Ok(config)
}

/// Connects to Kafka unless publishing is disabled
async fn open_publisher(config: &Config, disabled: bool) -> anyhow::Result<Option<Publisher>> {
    if disabled {
        tracing::info!("Publishing disabled, records will not be forwarded");
        return Ok(None);
    }

    let mut publisher = Publisher::kafka(&config.kafka);
    publisher
        .connect()
        .await
        .context("Failed to connect to the message queue")?;
    Ok(Some(publisher))
}

async fn handle_cities(crawler: &Crawler, output: Option<&Path>) -> anyhow::Result<bool> {
    let cities = match crawler.fetch_cities().await {
        Ok(cities) if !cities.is_empty() => cities,
        Ok(_) | Err(_) => {
            println!("Failed to fetch city list");
            return Ok(false);
        }
    };

    print_city_summary(&cities);

    if let Some(path) = output {
        write_json(path, &cities)?;
    }
    Ok(true)
}

async fn handle_stations(
    crawler: &Crawler,
    publisher: Option<&mut Publisher>,
    output: Option<&Path>,
) -> anyhow::Result<bool> {
    let report = match crawler.get_all_stations(publisher).await {
        Ok(report) => report,
        Err(e) => {
            println!("Station crawl aborted: {}", e);
            return Ok(false);
        }
    };

    if report.is_empty() {
        println!("No station lists were collected");
        return Ok(false);
    }

    print_station_summary(&report);

    if let Some(path) = output {
        write_json(path, &report.records)?;
    }
    Ok(true)
}

async fn handle_details(
    crawler: &Crawler,
    publisher: Option<&mut Publisher>,
    output: Option<&Path>,
) -> anyhow::Result<bool> {
    let report = match crawler.get_all_station_details(publisher).await {
        Ok(report) => report,
        Err(e) => {
            println!("Detail crawl aborted: {}", e);
            return Ok(false);
        }
    };

    if report.is_empty() {
        println!("No station details were collected");
        return Ok(false);
    }

    print_detail_summary(&report);

    if let Some(path) = output {
        write_json(path, &report.records)?;
    }
    Ok(true)
}
