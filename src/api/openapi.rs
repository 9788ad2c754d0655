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

//! OpenAPI documentation for the registry API.

use utoipa::OpenApi;

use super::handlers;
use super::responses::{HealthResponse, StatusReply, VersionListItem};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Collection Registry API",
        description = "Stores, versions, and serves API collection documents",
    ),
    paths(
        handlers::list_versions,
        handlers::get_document,
        handlers::upload_document,
        handlers::health_check,
    ),
    components(schemas(StatusReply, VersionListItem, HealthResponse)),
    tags(
        (name = "Collections", description = "Collection document management"),
        (name = "Health", description = "Operational endpoints"),
    )
)]
pub struct ApiDoc;
