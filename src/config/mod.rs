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

//! Configuration management for the registry server.
//!
//! Provides type-safe configuration structures, YAML and JSON file loading
//! with POSIX-style environment variable interpolation (`${VAR_NAME}` and
//! `${VAR_NAME:-default}`), and pre-startup validation.
//!
//! # Configuration File Example
//!
//! ```yaml
//! server:
//!   host: "${SERVER_HOST:-0.0.0.0}"
//!   port: 3001
//!   log_level: info
//!
//! storage:
//!   documents_dir: ./json
//!   file_prefix: api_
//!   schema_marker: v2.1
//!
//! canonical:
//!   protocol: https
//!   host: "${CANONICAL_HOST}"
//!   port: ""
//!
//! templates_dir: ./template
//! ```

pub mod loader;
pub mod types;

// Re-export commonly used types
pub use loader::{from_json_str, from_yaml_str, load_config_file, ConfigError};
pub use types::{CanonicalAuthority, RegistryServerConfig, ServerSettings, StorageSettings};
