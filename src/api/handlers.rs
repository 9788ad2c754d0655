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

//! Request handlers for the registry API.
//!
//! Thin orchestration over the document store, merge engine, and URL
//! rewriter. Failures are answered with the service's legacy payloads: the
//! JSON `{error, msg}` reply everywhere except the two missing-query-param
//! cases on `/json`, which answer with a plain-text body.

use axum::{
    extract::{Extension, Multipart, Query},
    http::header,
    response::{IntoResponse, Json, Response},
};
use bytes::Bytes;
use log::{debug, info, warn};
use serde::Deserialize;
use std::sync::Arc;

use super::responses::{HealthResponse, StatusReply, VersionListItem};
use crate::config::RegistryServerConfig;
use crate::error::RegistryError;
use crate::merge;
use crate::model::Collection;
use crate::rewrite::{rewrite_collection, TargetAuthority};
use crate::storage::DocumentStore;

/// Query parameters of the `/json` download endpoint.
#[derive(Debug, Deserialize)]
pub struct GetDocumentQuery {
    /// Filename stem of the requested version, e.g. `api_5`.
    pub f: Option<String>,
    /// Target `host[:port]`; empty means serve the stored bytes verbatim.
    pub d: Option<String>,
}

fn error_reply(msg: impl Into<String>) -> Response {
    Json(StatusReply::err(msg)).into_response()
}

/// List stored versions, most recent first
#[utoipa::path(
    get,
    path = "/list",
    responses(
        (status = 200, description = "Stored versions, most recent first", body = [VersionListItem]),
    ),
    tag = "Collections"
)]
pub async fn list_versions(Extension(store): Extension<Arc<DocumentStore>>) -> Response {
    let entries = match store.list() {
        Ok(entries) => entries,
        Err(e) => {
            warn!("Failed to list stored versions: {e}");
            return error_reply("json failed");
        }
    };

    let items: Vec<VersionListItem> = entries
        .into_iter()
        .map(|(version, modified)| VersionListItem {
            version: version.to_string(),
            path: format!("/json?f={}", store.stem(version)),
            timestamp: modified.format("%Y-%m-%d %H:%M:%S").to_string(),
        })
        .collect();

    Json(items).into_response()
}

/// Download a stored version, optionally rewritten to a target domain
#[utoipa::path(
    get,
    path = "/json",
    params(
        ("f" = String, Query, description = "Filename stem of the version to download, e.g. `api_5`"),
        ("d" = String, Query, description = "Target host[:port] to rewrite entry URLs to; empty serves the stored bytes verbatim"),
    ),
    responses(
        (status = 200, description = "Document bytes as an attachment", body = Vec<u8>, content_type = "application/octet-stream"),
    ),
    tag = "Collections"
)]
pub async fn get_document(
    Extension(store): Extension<Arc<DocumentStore>>,
    Query(params): Query<GetDocumentQuery>,
) -> Response {
    let Some(stem) = params.f.as_deref().filter(|f| !f.is_empty()) else {
        return "Url Param 'f' is missing".into_response();
    };
    let Some(domain) = params.d.as_deref() else {
        return "Url Param 'd' is missing".into_response();
    };

    let Some(version) = store.parse_stem(stem) else {
        debug!("Rejecting download of unrecognized stem '{stem}'");
        return "File not found".into_response();
    };

    let stored = match store.read_bytes(version) {
        Ok(bytes) => bytes,
        Err(e) => {
            debug!("Download of version {version} failed: {e}");
            return "File not found".into_response();
        }
    };

    // A non-empty domain serves a rewritten copy; the stored file stays
    // untouched.
    let body = if domain.is_empty() {
        stored
    } else {
        let mut collection = match Collection::from_slice(&stored) {
            Ok(collection) => collection,
            Err(e) => {
                warn!("Stored version {version} is not parseable: {e}");
                return error_reply("json parse failed");
            }
        };
        let target = TargetAuthority::from_domain(domain, "http");
        rewrite_collection(&mut collection, &target);
        match collection.to_pretty_json() {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!("Failed to serialize rewritten version {version}: {e}");
                return error_reply("json failed");
            }
        }
    };

    let filename = store.stem(version);
    (
        [
            (header::CONTENT_TYPE, "application/octet-stream".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}.json\""),
            ),
        ],
        body,
    )
        .into_response()
}

/// Upload a collection document
///
/// Multipart form with a JSON file field `apiJsonFile` and a text field
/// `force`. With `force=false` the upload is merged into the latest stored
/// version and rejected when it adds nothing new; any other value stores it
/// as the next version unconditionally.
#[utoipa::path(
    post,
    path = "/upload",
    request_body(content = String, content_type = "multipart/form-data", description = "Fields: apiJsonFile (file), force (\"true\"/\"false\")"),
    responses(
        (status = 200, description = "Upload outcome", body = StatusReply),
    ),
    tag = "Collections"
)]
pub async fn upload_document(
    Extension(store): Extension<Arc<DocumentStore>>,
    Extension(config): Extension<Arc<RegistryServerConfig>>,
    mut multipart: Multipart,
) -> Response {
    let mut force = String::new();
    let mut payload: Option<Bytes> = None;

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                warn!("Failed to read multipart field: {e}");
                return error_reply("upload failed");
            }
        };
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("force") => match field.text().await {
                Ok(value) => force = value,
                Err(e) => {
                    warn!("Failed to read 'force' field: {e}");
                    return error_reply("upload failed");
                }
            },
            Some("apiJsonFile") => match field.bytes().await {
                Ok(bytes) => payload = Some(bytes),
                Err(e) => {
                    warn!("Failed to read uploaded file: {e}");
                    return error_reply("upload failed");
                }
            },
            _ => {}
        }
    }

    let Some(payload) = payload else {
        warn!("Upload request is missing the 'apiJsonFile' field");
        return error_reply("upload failed");
    };

    let mut incoming = match Collection::from_slice(&payload) {
        Ok(collection) => collection,
        Err(e) => {
            warn!("Uploaded document is not a parseable collection: {e}");
            return error_reply("json parse failed");
        }
    };

    let marker = &config.storage.schema_marker;
    if !incoming.schema_matches(marker) {
        info!(
            "Rejecting upload: schema '{}' does not match {marker}",
            incoming.info.schema
        );
        return error_reply(format!("json version not matched {marker}"));
    }

    // Normalize every entry to the canonical serving authority before the
    // document is compared against the stored latest or persisted.
    rewrite_collection(&mut incoming, &config.canonical.target());

    let to_store = if force == "false" {
        match latest_collection(&store) {
            Ok(Some(base)) => {
                let outcome = merge::merge(base, incoming);
                if outcome.added == 0 {
                    info!("Upload carries no new endpoints, nothing stored");
                    return error_reply("no new api found, please upload again");
                }
                info!("Merge adds {} new endpoint(s)", outcome.added);
                outcome.collection
            }
            // First upload into an empty store.
            Ok(None) => incoming,
            Err(RegistryError::Parse(e)) => {
                warn!("Latest stored version is not parseable: {e}");
                return error_reply("json parse failed");
            }
            Err(e) => {
                warn!("Failed to load latest stored version: {e}");
                return error_reply("upload failed");
            }
        }
    } else {
        incoming
    };

    match store.store_next(&to_store).await {
        Ok(version) => {
            info!("Stored collection version {version}");
            Json(StatusReply::ok("success")).into_response()
        }
        Err(e) => {
            warn!("Failed to store uploaded collection: {e}");
            error_reply("upload failed")
        }
    }
}

fn latest_collection(store: &DocumentStore) -> Result<Option<Collection>, RegistryError> {
    match store.latest()? {
        Some(version) => Ok(Some(store.read(version)?)),
        None => Ok(None),
    }
}

/// Check server health
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Server is healthy", body = HealthResponse),
    ),
    tag = "Health"
)]
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        timestamp: chrono::Utc::now(),
    })
}
