//! SafeIntent CLI - inspect intent payloads through the guarded accessor

mod report;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use safeintent_core::GuardConfig;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::report::FieldQuery;

#[derive(Parser)]
#[command(name = "safeintent")]
#[command(about = "SafeIntent - Read intents from untrusted senders without crashing")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Wrap an intent payload and print what each accessor returns
    Inspect {
        /// JSON intent payload
        payload: PathBuf,
        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Check whether an extra exists
        #[arg(long = "has", value_name = "NAME")]
        has: Vec<String>,
        /// Read a boolean extra
        #[arg(long = "bool", value_name = "NAME[=DEFAULT]")]
        bools: Vec<String>,
        /// Read an integer extra
        #[arg(long = "int", value_name = "NAME[=DEFAULT]")]
        ints: Vec<String>,
        /// Read a string extra
        #[arg(long = "string", value_name = "NAME")]
        strings: Vec<String>,
        /// Read a string list extra
        #[arg(long = "string-list", value_name = "NAME")]
        string_lists: Vec<String>,
        /// Read a nested bundle extra
        #[arg(long = "bundle", value_name = "NAME")]
        bundles: Vec<String>,
    },
    /// Check configuration validity
    Check {
        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Some(Commands::Inspect {
            payload,
            config,
            has,
            bools,
            ints,
            strings,
            string_lists,
            bundles,
        }) => {
            let config = load_config(config.as_deref())?;

            let mut queries: Vec<FieldQuery> = has.into_iter().map(FieldQuery::Has).collect();
            for spec in &bools {
                queries.push(FieldQuery::bool(spec)?);
            }
            for spec in &ints {
                queries.push(FieldQuery::int(spec)?);
            }
            queries.extend(strings.into_iter().map(FieldQuery::String));
            queries.extend(string_lists.into_iter().map(FieldQuery::StringList));
            queries.extend(bundles.into_iter().map(FieldQuery::Bundle));

            let report = report::inspect_file(&payload, &config, &queries)?;
            info!(
                diagnostics = report.diagnostics.len(),
                "inspected {}",
                payload.display()
            );
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Some(Commands::Check { config }) => {
            let config = load_config(config.as_deref())?;
            println!("Configuration OK");
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
        None => {
            println!(
                "SafeIntent v{} - Use --help for commands",
                env!("CARGO_PKG_VERSION")
            );
        }
    }

    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<GuardConfig> {
    match path {
        Some(path) => GuardConfig::load(path)
            .with_context(|| format!("loading config {}", path.display())),
        None => Ok(GuardConfig::default()),
    }
}
