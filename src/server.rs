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

use anyhow::Result;
use log::{error, info, warn};
use std::path::PathBuf;
use std::sync::Arc;

use crate::api;
use crate::config::RegistryServerConfig;
use crate::storage::DocumentStore;

/// The collection registry server: owns the validated configuration and
/// drives the HTTP API until shutdown.
pub struct RegistryServer {
    config: RegistryServerConfig,
}

impl RegistryServer {
    /// Create a server from an already-loaded configuration.
    pub fn from_config(config: RegistryServerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    #[allow(clippy::print_stdout)]
    pub async fn run(self) -> Result<()> {
        println!("Starting Collection Registry");
        println!("  API Port: {}", self.config.server.port);
        println!("  Documents dir: {}", self.config.storage.documents_dir);
        println!(
            "  Log level: {}",
            std::env::var("RUST_LOG").unwrap_or_else(|_| self.config.server.log_level.clone())
        );
        info!("Initializing Collection Registry");

        let store = Arc::new(DocumentStore::open(
            &self.config.storage.documents_dir,
            &self.config.storage.file_prefix,
        )?);
        info!("Document store at {}", store.dir().display());

        let templates_dir = PathBuf::from(&self.config.templates_dir);
        if !templates_dir.is_dir() {
            warn!(
                "Template directory {} does not exist; static assets will 404",
                templates_dir.display()
            );
        }

        let config = Arc::new(self.config);
        let app = api::build_router(store, config.clone(), &templates_dir);

        let addr = format!("{}:{}", config.server.host, config.server.port);
        info!("Starting web API on {addr}");
        info!("Swagger UI available at http://{addr}/docs/");

        let listener = tokio::net::TcpListener::bind(&addr).await?;
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        info!("Collection Registry stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {e}");
    }
}
