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

//! Data model for stored API collection documents.
//!
//! A [`Collection`] is a Postman-style description of a set of API endpoints:
//! an `info` header plus an ordered sequence of named [`Item`] entries. The
//! service interprets only the fields it needs (entry names, URL records, the
//! schema string); everything else (headers, bodies, queries, recorded
//! responses) round-trips as raw JSON values.

use serde::{Deserialize, Serialize};

use crate::error::RegistryError;

/// A stored API collection document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collection {
    pub info: CollectionInfo,
    #[serde(rename = "item", default)]
    pub items: Vec<Item>,
}

/// The `info` header of a collection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CollectionInfo {
    #[serde(rename = "_postman_id", default)]
    pub postman_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub schema: String,
}

/// One named endpoint entry within a collection.
///
/// The `name` is the deduplication key used by the merge engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    pub name: String,
    pub request: RequestSpec,
    #[serde(default)]
    pub response: serde_json::Value,
}

/// The request description of an endpoint entry.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RequestSpec {
    #[serde(default)]
    pub method: String,
    #[serde(default)]
    pub header: serde_json::Value,
    #[serde(default)]
    pub body: serde_json::Value,
    pub url: UrlSpec,
    #[serde(default)]
    pub description: String,
}

/// The URL record of a request.
///
/// `host` is the authority split on `.` into ordered labels; `raw` is the
/// full URL as a single string and is kept consistent with the structured
/// fields by the rewriter.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UrlSpec {
    #[serde(default)]
    pub raw: String,
    #[serde(default)]
    pub protocol: String,
    #[serde(default)]
    pub host: Vec<String>,
    #[serde(default)]
    pub path: Vec<String>,
    #[serde(default)]
    pub query: serde_json::Value,
    #[serde(default)]
    pub port: String,
}

impl Collection {
    /// Parse a collection from raw JSON bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, RegistryError> {
        Ok(serde_json::from_slice(bytes)?)
    }

    /// Whether the collection's schema string carries the required marker
    /// substring (e.g. `v2.1`).
    pub fn schema_matches(&self, marker: &str) -> bool {
        self.info.schema.contains(marker)
    }

    /// Serialize with tab indentation, the format stored documents use on
    /// disk and the format rewritten downloads are served in.
    pub fn to_pretty_json(&self) -> Result<Vec<u8>, RegistryError> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"\t");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut ser)?;
        Ok(buf)
    }
}
