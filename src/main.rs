// Copyright 2025 The Drasi Authors.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

// Allow println! in main.rs for CLI user-facing output (validate command)
#![allow(clippy::print_stdout)]

use anyhow::Result;
use clap::{Parser, Subcommand};
use log::info;
use std::path::PathBuf;

use collection_registry::config::load_config_file;
use collection_registry::RegistryServer;

#[derive(Parser)]
#[command(name = "collection-registry")]
#[command(about = "HTTP service for storing, versioning, and serving API collection documents")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Path to the configuration file
    #[arg(short, long, default_value = "config/server.yaml", global = true)]
    config: PathBuf,

    /// Override the server port
    #[arg(short, long, global = true)]
    port: Option<u16>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the server (default if no subcommand specified)
    Run {
        /// Path to the configuration file
        #[arg(short, long, default_value = "config/server.yaml")]
        config: PathBuf,

        /// Override the server port
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Validate a configuration file without starting the server
    Validate {
        /// Path to the configuration file to validate
        #[arg(short, long, default_value = "config/server.yaml")]
        config: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Run { config, port }) => run_server(config, port).await,
        Some(Commands::Validate { config }) => validate_config(config),
        None => {
            // Default behavior: run the server
            run_server(cli.config, cli.port).await
        }
    }
}

async fn run_server(config_path: PathBuf, port: Option<u16>) -> Result<()> {
    let mut config = load_config_file(&config_path)?;
    init_logging(&config.server.log_level);
    info!("Loaded configuration from {}", config_path.display());

    if let Some(port) = port {
        config.server.port = port;
    }

    RegistryServer::from_config(config)?.run().await
}

fn validate_config(config_path: PathBuf) -> Result<()> {
    match load_config_file(&config_path) {
        Ok(config) => {
            println!("Configuration OK: {}", config_path.display());
            println!("  Listen: {}:{}", config.server.host, config.server.port);
            println!(
                "  Documents: {} (prefix '{}')",
                config.storage.documents_dir, config.storage.file_prefix
            );
            println!(
                "  Canonical authority: {}://{}",
                config.canonical.protocol,
                config.canonical.target().authority()
            );
            Ok(())
        }
        Err(e) => {
            eprintln!("Configuration INVALID: {e}");
            std::process::exit(1);
        }
    }
}

fn init_logging(level: &str) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}
