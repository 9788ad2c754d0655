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

//! Error types shared across the registry.

use crate::storage::VersionId;

/// Unified error type for registry operations.
///
/// Handlers map these to the service's legacy `{error, msg}` response
/// payloads; none of them are fatal to the process.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("version {0} not found")]
    NotFound(VersionId),

    #[error("failed to parse collection JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("collection schema does not match required marker '{marker}'")]
    SchemaMismatch { marker: String },

    #[error("merge added no new endpoint entries")]
    NoNewEntries,

    #[error("invalid version identifier in file name '{0}'")]
    InvalidVersion(String),

    #[error("storage I/O failure: {0}")]
    Io(#[from] std::io::Error),
}
