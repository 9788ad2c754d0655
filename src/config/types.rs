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

//! Configuration structures for the registry server.

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

use crate::rewrite::TargetAuthority;

/// Top-level server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryServerConfig {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub storage: StorageSettings,
    /// The fixed authority uploaded documents are normalized to.
    pub canonical: CanonicalAuthority,
    /// Directory of static assets served at `/`.
    #[serde(default = "default_templates_dir")]
    pub templates_dir: String,
}

/// HTTP listener settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// Document storage settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageSettings {
    #[serde(default = "default_documents_dir")]
    pub documents_dir: String,
    #[serde(default = "default_file_prefix")]
    pub file_prefix: String,
    /// Substring the collection schema string must contain to be accepted.
    #[serde(default = "default_schema_marker")]
    pub schema_marker: String,
}

/// The canonical authority: protocol, host, and optional port that uploaded
/// documents are rewritten to before storage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CanonicalAuthority {
    #[serde(default = "default_protocol")]
    pub protocol: String,
    pub host: String,
    #[serde(default)]
    pub port: String,
}

impl CanonicalAuthority {
    pub fn target(&self) -> TargetAuthority {
        TargetAuthority::new(&self.protocol, &self.host, &self.port)
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3001
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_documents_dir() -> String {
    "./json".to_string()
}

fn default_file_prefix() -> String {
    "api_".to_string()
}

fn default_schema_marker() -> String {
    "v2.1".to_string()
}

fn default_protocol() -> String {
    "https".to_string()
}

fn default_templates_dir() -> String {
    "./template".to_string()
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            log_level: default_log_level(),
        }
    }
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            documents_dir: default_documents_dir(),
            file_prefix: default_file_prefix(),
            schema_marker: default_schema_marker(),
        }
    }
}

impl RegistryServerConfig {
    /// Validate the configuration before the server starts.
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            bail!("server.port must be non-zero");
        }
        if self.storage.documents_dir.is_empty() {
            bail!("storage.documents_dir must not be empty");
        }
        if self.storage.file_prefix.is_empty() {
            bail!("storage.file_prefix must not be empty");
        }
        if self.storage.schema_marker.is_empty() {
            bail!("storage.schema_marker must not be empty");
        }
        if self.canonical.host.is_empty() {
            bail!("canonical.host must not be empty");
        }
        if self.canonical.host.contains("://") {
            bail!(
                "canonical.host must be a bare host name, not a URL: '{}'",
                self.canonical.host
            );
        }
        if self.canonical.host.contains(':') {
            bail!("canonical.host must not embed a port; use canonical.port");
        }
        if !matches!(self.canonical.protocol.as_str(), "http" | "https") {
            bail!(
                "canonical.protocol must be 'http' or 'https', got '{}'",
                self.canonical.protocol
            );
        }
        if !self.canonical.port.is_empty() && self.canonical.port.parse::<u16>().is_err() {
            bail!(
                "canonical.port must be empty or a valid port number, got '{}'",
                self.canonical.port
            );
        }
        Ok(())
    }
}
