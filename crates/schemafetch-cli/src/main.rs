//! schemafetch - fetch versioned schema documents from the command line.
//!
//! Thin front end over `schemafetch-core`: the document goes to stdout,
//! logs go to stderr.

mod output;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use schemafetch_core::{CancellationToken, FetchConfig, Source, SourceRegistry};
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "schemafetch")]
#[command(about = "Fetch versioned schema references and glossaries")]
struct Args {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch a document and write it to stdout
    Fetch {
        /// Source to fetch: lexicon or schema-docs
        source: Source,

        /// Version tag (e.g. v0.19.1) or "latest"; defaults per source
        #[arg(short, long)]
        version: Option<String>,

        /// Bypass the cache
        #[arg(long)]
        refresh: bool,

        /// Response size cap in bytes (0 = default 4 MiB)
        #[arg(long, default_value = "0")]
        max_bytes: u64,

        /// Print a JSON envelope instead of the raw document
        #[arg(long)]
        json: bool,
    },
    /// Print the URL a fetch would use
    Url {
        source: Source,

        #[arg(short, long)]
        version: Option<String>,
    },
    /// Print version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Set up logging
    let log_level = if args.debug { Level::DEBUG } else { Level::WARN };
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .compact()
        .init();

    match args.command {
        Command::Fetch {
            source,
            version,
            refresh,
            max_bytes,
            json,
        } => {
            let config = FetchConfig::new().with_max_response_bytes(max_bytes);
            let registry = SourceRegistry::with_config(config)?;

            let cancel = CancellationToken::new();
            let on_interrupt = cancel.clone();
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    info!("Interrupted; cancelling fetch");
                    on_interrupt.cancel();
                }
            });

            let doc = registry
                .fetch(source, version.as_deref(), refresh, &cancel)
                .await
                .with_context(|| format!("fetching {}", source))?;
            debug!("Received {} bytes from {}", doc.payload.len(), doc.source);

            let bytes = if json {
                output::json_envelope(source, &doc)?
            } else {
                doc.payload.to_vec()
            };
            let mut stdout = tokio::io::stdout();
            stdout.write_all(&bytes).await?;
            stdout.flush().await?;
        }
        Command::Url { source, version } => {
            let registry = SourceRegistry::new()?;
            let url = registry
                .build_url(source, version.as_deref())
                .with_context(|| format!("building {} URL", source))?;
            println!("{}", url);
        }
        Command::Version => {
            println!("schemafetch {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
