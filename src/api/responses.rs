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

//! Response types for the registry API.

use serde::Serialize;
use utoipa::ToSchema;

/// The `{error, msg}` status payload every mutating endpoint answers with.
#[derive(Debug, Serialize, ToSchema)]
pub struct StatusReply {
    /// Whether the request failed
    pub error: bool,
    /// Human-readable outcome message
    pub msg: String,
}

impl StatusReply {
    /// A successful outcome.
    pub fn ok(msg: impl Into<String>) -> Self {
        Self {
            error: false,
            msg: msg.into(),
        }
    }

    /// A failed outcome.
    pub fn err(msg: impl Into<String>) -> Self {
        Self {
            error: true,
            msg: msg.into(),
        }
    }
}

/// One stored version in the `/list` response.
#[derive(Debug, Serialize, ToSchema)]
pub struct VersionListItem {
    /// Version identifier as a string
    pub version: String,
    /// Download path for this version
    pub path: String,
    /// Last-modified timestamp, `YYYY-MM-DD HH:MM:SS`
    pub timestamp: String,
}

/// Health check response
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Health status of the server
    pub status: String,
    /// Current server timestamp
    pub timestamp: chrono::DateTime<chrono::Utc>,
}
