//! Cadre CLI entry point.
//!
//! This binary is the composition root. Responsibilities:
//!
//! 1. **Parse configuration**: origin and timeout from flags, falling back to
//!    `CADRE_ORIGIN` / `CADRE_TIMEOUT_MS`.
//! 2. **Wire observability**: install `tracing-subscriber` (text or JSON on
//!    stderr) and, when `OTEL_EXPORTER_OTLP_ENDPOINT` is set, an OTLP exporter.
//! 3. **Construct the client**: a [`CadreClient`], used through the
//!    [`ConfigService`] trait.
//! 4. **Run one operation**: print its result to stdout; any
//!    [`cadre::ServiceError`] becomes a non-zero exit.

mod telemetry;

use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use cadre::ConfigService;
use clap::{Parser, Subcommand};
use http_client::{CadreClient, ClientConfig, ORIGIN_ENV_VAR, TIMEOUT_ENV_VAR};
use serde_json::Value;

use crate::telemetry::LogFormat;

/// Read and write configuration templates stored in Cadre.
#[derive(Parser, Debug)]
#[command(name = "cadre", version, about, long_about = None)]
struct Cli {
    /// Base URL of the Cadre service.
    #[arg(long, env = ORIGIN_ENV_VAR)]
    origin: String,

    /// Per-request deadline in milliseconds (default 300).
    #[arg(long, env = TIMEOUT_ENV_VAR)]
    timeout_ms: Option<u64>,

    /// Format of log lines written to stderr.
    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum Command {
    /// Check that the service is alive.
    Ping,
    /// Print the unresolved template for an environment.
    Template {
        /// Environment name, e.g. `prod`.
        env: String,
    },
    /// Print the configuration for an environment with secrets resolved.
    Config {
        /// Environment name, e.g. `prod`.
        env: String,
    },
    /// List environments that have templates.
    List,
    /// Replace the template for an environment.
    Write {
        /// Environment name, e.g. `prod`.
        env: String,
        /// JSON file to upload; stdin when omitted.
        #[arg(long)]
        file: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let telemetry = telemetry::init(cli.log_format)?;

    let result = run(cli).await;

    telemetry.shutdown();
    result
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = ClientConfig::new(&cli.origin)?;
    if let Some(millis) = cli.timeout_ms {
        config = config.with_timeout(Duration::from_millis(millis))?;
    }
    let client = CadreClient::new(config);
    tracing::debug!(
        origin = %client.config().origin(),
        timeout = ?client.config().timeout(),
        "client ready"
    );

    let mut stdout = io::stdout().lock();
    execute(&client, cli.command, &mut stdout).await
}

async fn execute(
    service: &dyn ConfigService,
    command: Command,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    match command {
        Command::Ping => {
            writeln!(out, "{}", service.ping().await?)?;
        }
        Command::Template { env } => {
            let template = service.get_template(&env).await?;
            writeln!(out, "{}", serde_json::to_string_pretty(&template)?)?;
        }
        Command::Config { env } => {
            let config = service.load_config(&env).await?;
            writeln!(out, "{}", serde_json::to_string_pretty(&config)?)?;
        }
        Command::List => {
            for name in service.list_configs().await? {
                writeln!(out, "{name}")?;
            }
        }
        Command::Write { env, file } => {
            let template = read_template(file.as_deref())?;
            let ack = service.write_template(&env, &template).await?;
            writeln!(out, "{ack}")?;
        }
    }
    Ok(())
}

fn read_template(file: Option<&Path>) -> anyhow::Result<Value> {
    let (raw, source) = match file {
        Some(path) => (
            std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?,
            path.display().to_string(),
        ),
        None => {
            let mut raw = String::new();
            io::stdin()
                .read_to_string(&mut raw)
                .context("failed to read template from stdin")?;
            (raw, "stdin".to_string())
        }
    };
    serde_json::from_str(&raw).with_context(|| format!("{source} is not valid JSON"))
}
