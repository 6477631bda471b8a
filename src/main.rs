// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

use anyhow::{Context, Result};
use clap::{Args, CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use pdns_records::{
    config::{DebugSink, ProviderConfig},
    constants::{DEFAULT_CLI_TTL_SECS, ENV_API_TOKEN, ENV_DEBUG, ENV_SERVER_ID, ENV_SERVER_URL},
    provider::{Provider, RecordAppender, RecordDeleter, RecordGetter, RecordSetter},
    records::{Record, Rr},
};
use std::time::Duration;
use tracing::{debug, info};

#[derive(Parser)]
#[command(name = "pdns-records")]
#[command(version)]
#[command(about = "Read and modify records in PowerDNS zones")]
struct Cli {
    /// Base URL of the PowerDNS API
    #[arg(long, env = ENV_SERVER_URL, global = true)]
    server_url: Option<String>,

    /// PowerDNS server id
    #[arg(long, env = ENV_SERVER_ID, global = true)]
    server_id: Option<String>,

    /// PowerDNS API key
    #[arg(long, env = ENV_API_TOKEN, global = true, hide_env_values = true)]
    api_token: Option<String>,

    /// Dump raw HTTP traffic, including the API key (off, stdout, stderr)
    #[arg(long, env = ENV_DEBUG, global = true)]
    debug: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print every record in a zone
    Get {
        /// Zone name, e.g. example.org.
        zone: String,
    },
    /// Add values to an RRset, keeping existing ones
    Append(RecordArgs),
    /// Replace an RRset with exactly the given values
    Set(RecordArgs),
    /// Remove values from an RRset
    Delete(RecordArgs),
    /// Print a shell completion script
    Completions {
        /// Target shell
        shell: Shell,
    },
}

#[derive(Args)]
struct RecordArgs {
    /// Zone name, e.g. example.org.
    zone: String,
    /// Owner name relative to the zone; `@` for the apex
    name: String,
    /// Record type, e.g. A, TXT, HTTPS
    #[arg(value_name = "TYPE")]
    rtype: String,
    /// Record data in presentation format, one value per argument
    #[arg(required = true)]
    data: Vec<String>,
    /// Time to live in seconds
    #[arg(long, default_value_t = DEFAULT_CLI_TTL_SECS)]
    ttl: u64,
}

impl RecordArgs {
    fn records(&self) -> Vec<Record> {
        self.data
            .iter()
            .map(|data| {
                Rr::new(
                    &self.name,
                    &self.rtype,
                    data,
                    Duration::from_secs(self.ttl),
                )
                .into()
            })
            .collect()
    }
}

impl Cli {
    fn provider_config(&self) -> ProviderConfig {
        let mut config = ProviderConfig::new(
            self.server_url.clone().unwrap_or_default(),
            self.api_token.clone().unwrap_or_default(),
        );
        config.server_id = self.server_id.clone().unwrap_or_default();
        config.debug = self
            .debug
            .clone()
            .map(DebugSink::from)
            .unwrap_or_default();
        config
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .thread_name("pdns-records")
        .enable_all()
        .build()?;

    runtime.block_on(async_main(cli))
}

fn init_logging() {
    // Respects RUST_LOG, defaulting to info. Logs go to stderr; records go to stdout.
    // RUST_LOG_FORMAT=json switches to structured output.
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let log_format = std::env::var("RUST_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    match log_format.to_lowercase().as_str() {
        "json" => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_file(true)
                .with_line_number(true)
                .with_target(false)
                .with_writer(std::io::stderr)
                .json()
                .init();
        }
        _ => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_file(true)
                .with_line_number(true)
                .with_target(false)
                .with_writer(std::io::stderr)
                .compact()
                .init();
        }
    }
}

async fn async_main(cli: Cli) -> Result<()> {
    init_logging();

    if let Command::Completions { shell } = &cli.command {
        clap_complete::generate(
            *shell,
            &mut Cli::command(),
            "pdns-records",
            &mut std::io::stdout(),
        );
        return Ok(());
    }

    let config = cli.provider_config();
    config
        .validate()
        .context("Incomplete PowerDNS connection settings")?;
    debug!(config = ?config, "Loaded provider configuration");

    let provider = Provider::new(config);

    let records = match &cli.command {
        Command::Get { zone } => provider
            .get_records(zone)
            .await
            .with_context(|| format!("Failed to read zone {zone}"))?,
        Command::Append(args) => provider
            .append_records(&args.zone, args.records())
            .await
            .with_context(|| format!("Failed to append to zone {}", args.zone))?,
        Command::Set(args) => provider
            .set_records(&args.zone, args.records())
            .await
            .with_context(|| format!("Failed to set records in zone {}", args.zone))?,
        Command::Delete(args) => provider
            .delete_records(&args.zone, args.records())
            .await
            .with_context(|| format!("Failed to delete from zone {}", args.zone))?,
        Command::Completions { .. } => return Ok(()),
    };

    for record in &records {
        println!("{record}");
    }
    info!(count = records.len(), "Done");

    Ok(())
}
