// SPDX-License-Identifier: MIT OR Apache-2.0
#![deny(unsafe_code)]
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use oxc_cli::commands::{self, Summary};
use oxc_cli::format::OutputFormat;
use oxc_config::{CodecConfig, load_config, validate_config};
use oxc_json::PayloadEncoding;
use std::io::Write;
use std::path::PathBuf;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "oxc", version, about = "OpenXC vehicle message JSON codec")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to a TOML config file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging.
    #[arg(long, global = true)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the inferred message type of every record.
    Classify {
        /// Input file, or `-` for stdin.
        #[arg(default_value = "-")]
        input: PathBuf,

        /// Print JSON lines instead of type names.
        #[arg(long)]
        json: bool,

        /// Exit successfully even when some records are rejected.
        #[arg(long)]
        keep_going: bool,
    },

    /// Decode every record and describe it.
    Decode {
        /// Input file, or `-` for stdin.
        #[arg(default_value = "-")]
        input: PathBuf,

        /// Output format: text | json.
        #[arg(long, default_value = "text")]
        format: OutputFormat,
    },

    /// Decode every record and re-encode it in canonical form.
    Normalize {
        /// Input file, or `-` for stdin.
        #[arg(default_value = "-")]
        input: PathBuf,

        /// Write payloads as 0x-prefixed hex strings.
        #[arg(long)]
        hex: bool,

        /// Pretty-print each message.
        #[arg(long)]
        pretty: bool,

        /// Exit successfully even when some records are rejected.
        #[arg(long)]
        keep_going: bool,
    },

    /// Print the JSON schema of the config file.
    Schema,

    /// Validate a config file and print diagnostics.
    ValidateConfig {
        /// Config file to check (defaults to `--config`).
        path: Option<PathBuf>,
    },
}

fn init_tracing(debug: bool, config: Option<&CodecConfig>) {
    let filter = if debug {
        EnvFilter::new("oxc=debug")
    } else {
        let level = config
            .and_then(|c| c.log_level.as_deref())
            .unwrap_or("info");
        EnvFilter::new(format!("oxc={level}"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn check(summary: Summary, keep_going: bool) -> Result<()> {
    if summary.failed > 0 && !keep_going {
        anyhow::bail!(
            "{} of {} records rejected",
            summary.failed,
            summary.ok + summary.failed
        );
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Commands that inspect the config itself must not fail on a bad one.
    let config = match &cli.command {
        Commands::Schema | Commands::ValidateConfig { .. } => None,
        _ => Some(load_config(cli.config.as_deref()).context("load config")?),
    };
    init_tracing(cli.debug, config.as_ref());

    if let Some(cfg) = &config {
        for w in validate_config(cfg).context("validate config")? {
            debug!(target: "oxc", warning = %w, "config");
        }
    }

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Classify {
            input,
            json,
            keep_going,
        } => {
            let cfg = config.unwrap_or_default();
            let data = commands::read_input(&input)?;
            let summary = commands::classify(&data, cfg.stream(), json, &mut out)?;
            check(summary, keep_going)?;
        }
        Commands::Decode { input, format } => {
            let cfg = config.unwrap_or_default();
            let data = commands::read_input(&input)?;
            let summary =
                commands::decode(&data, cfg.stream(), format, &cfg.formatter(), &mut out)?;
            if summary.failed > 0 {
                warn!(target: "oxc", failed = summary.failed, "some records were rejected");
            }
        }
        Commands::Normalize {
            input,
            hex,
            pretty,
            keep_going,
        } => {
            let cfg = config.unwrap_or_default();
            let mut formatter = cfg.formatter();
            if hex {
                formatter = formatter.with_payload_encoding(PayloadEncoding::Hex);
            }
            if pretty {
                formatter = formatter.pretty(true);
            }
            let data = commands::read_input(&input)?;
            let summary = commands::normalize(&data, cfg.stream(), &formatter, &mut out)?;
            check(summary, keep_going)?;
        }
        Commands::Schema => {
            writeln!(out, "{}", commands::schema_json()?)?;
        }
        Commands::ValidateConfig { path } => {
            let path = path.or(cli.config);
            let diagnostics = commands::config_check(path.as_deref())?;
            for d in &diagnostics {
                writeln!(out, "{d}")?;
            }
            if diagnostics.iter().any(|d| d.starts_with("error:")) {
                anyhow::bail!("config is invalid");
            }
        }
    }

    out.flush()?;
    Ok(())
}
