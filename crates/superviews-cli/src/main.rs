// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use superviews_cli::commands::build::{self, BuildRequest};
use superviews_cli::config::{Config, Emit};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "superviews")]
#[command(author = "Maravilla Labs")]
#[command(version)]
#[command(about = "Compile templates to incremental-DOM render functions", long_about = None)]
struct Cli {
    /// Log level: error, warn, info, debug, trace
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    /// Configuration file (defaults to ./superviews.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile templates
    Build {
        /// Template files or glob patterns
        #[arg(required = true)]
        inputs: Vec<String>,
        /// Output directory (stdout when omitted and a single template matches)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// What to write for each template
        #[arg(long, value_enum)]
        emit: Option<Emit>,
        /// Name of the generated render function
        #[arg(long)]
        name: Option<String>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with the specified log level
    let filter = EnvFilter::try_new(&cli.log_level)
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = Config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Build {
            inputs,
            output,
            emit,
            name,
        } => {
            let request = BuildRequest {
                inputs,
                output_dir: output,
                emit,
                function_name: name,
            };
            let count = build::run(&request, &config, &mut std::io::stdout().lock())?;
            tracing::info!("compiled {} template(s)", count);
            Ok(())
        }
    }
}
