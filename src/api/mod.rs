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

//! HTTP API for the collection registry.
//!
//! ## API Structure
//!
//! ```text
//! /list          - Stored versions, most recent first
//! /json?f=&d=    - Download a version, optionally host-rewritten
//! /upload        - Multipart upload (merge or force-store)
//! /health        - Health check
//! /docs          - Swagger UI, /openapi.json - OpenAPI spec
//! /              - Static template assets (fallback)
//! ```
//!
//! ## Module Organization
//!
//! - `handlers` - Request handlers (orchestration over store/merge/rewrite)
//! - `responses` - Response payload types
//! - `routes` - Router construction
//! - `openapi` - OpenAPI documentation

pub mod handlers;
pub mod openapi;
pub mod responses;
pub mod routes;

// Re-export commonly used items
pub use openapi::ApiDoc;
pub use responses::{HealthResponse, StatusReply, VersionListItem};
pub use routes::build_router;
