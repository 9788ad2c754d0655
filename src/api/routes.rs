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

//! Route definitions for the registry API.

use axum::{
    extract::{DefaultBodyLimit, Extension},
    routing::{get, post},
    Router,
};
use std::path::Path;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, services::ServeDir};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::handlers;
use super::openapi::ApiDoc;
use crate::config::RegistryServerConfig;
use crate::storage::DocumentStore;

/// Multipart uploads are capped at 10 MB.
const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Build the complete application router.
///
/// API endpoints are registered at their legacy root-level paths; static
/// template assets are served as the fallback, so `/` keeps delivering the
/// upload UI.
pub fn build_router(
    store: Arc<DocumentStore>,
    config: Arc<RegistryServerConfig>,
    templates_dir: &Path,
) -> Router {
    Router::new()
        .route("/list", get(handlers::list_versions))
        .route("/json", get(handlers::get_document))
        .route("/upload", post(handlers::upload_document))
        .route("/health", get(handlers::health_check))
        .merge(SwaggerUi::new("/docs").url("/openapi.json", ApiDoc::openapi()))
        .fallback_service(ServeDir::new(templates_dir))
        .layer(CorsLayer::permissive())
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(Extension(store))
        .layer(Extension(config))
}
