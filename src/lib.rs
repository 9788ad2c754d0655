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

pub mod api;
pub mod config;
pub mod error;
pub mod merge;
pub mod model;
pub mod rewrite;
pub mod server;
pub mod storage;

// Main exports for library users
pub use config::{load_config_file, RegistryServerConfig};
pub use error::RegistryError;
pub use server::RegistryServer;
pub use storage::{DocumentStore, VersionId};
