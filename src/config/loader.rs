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

//! Configuration loading with environment variable interpolation.
//!
//! Config files may reference environment variables with POSIX-style
//! syntax before parsing:
//! - `${VAR_NAME}` - required variable
//! - `${VAR_NAME:-default}` - variable with a default value

use lazy_static::lazy_static;
use regex::Regex;
use serde::de::DeserializeOwned;
use std::env;
use std::fs;
use std::path::Path;

use super::types::RegistryServerConfig;

lazy_static! {
    /// `${NAME}` or `${NAME:-default}`; names follow POSIX rules.
    static ref ENV_VAR_PATTERN: Regex =
        Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)(:-([^}]*))?\}")
            .expect("invalid env var pattern");
}

/// Unified error type for configuration operations.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Environment variable '{name}' is not set and has no default value")]
    MissingVariable { name: String },

    #[error("Failed to parse config file '{path}': YAML error: {yaml_err}, JSON error: {json_err}")]
    ParseError {
        path: String,
        yaml_err: String,
        json_err: String,
    },

    #[error("Validation error: {0}")]
    ValidationError(#[from] anyhow::Error),
}

/// Replace every `${VAR}` / `${VAR:-default}` reference in `input` with the
/// environment variable's value. A set-but-empty variable falls back to the
/// default when one is given.
pub fn interpolate(input: &str) -> Result<String, ConfigError> {
    let mut result = String::with_capacity(input.len());
    let mut last_end = 0;

    for caps in ENV_VAR_PATTERN.captures_iter(input) {
        let full = caps.get(0).expect("capture group 0 always present");
        let name = caps.get(1).expect("variable name group").as_str();
        let default = caps.get(3).map(|m| m.as_str());

        result.push_str(&input[last_end..full.start()]);

        let value = match env::var(name) {
            Ok(value) if !value.is_empty() => value,
            _ => match default {
                Some(default) => default.to_string(),
                None => {
                    return Err(ConfigError::MissingVariable {
                        name: name.to_string(),
                    })
                }
            },
        };
        result.push_str(&value);
        last_end = full.end();
    }

    result.push_str(&input[last_end..]);
    Ok(result)
}

/// Deserialize YAML with environment variable interpolation applied first.
pub fn from_yaml_str<T: DeserializeOwned>(s: &str) -> Result<T, ConfigError> {
    let interpolated = interpolate(s)?;
    Ok(serde_yaml::from_str(&interpolated)?)
}

/// Deserialize JSON with environment variable interpolation applied first.
pub fn from_json_str<T: DeserializeOwned>(s: &str) -> Result<T, ConfigError> {
    let interpolated = interpolate(s)?;
    Ok(serde_json::from_str(&interpolated)?)
}

/// Load and validate a [`RegistryServerConfig`] from a YAML or JSON file.
///
/// The file content is interpolated, parsed (YAML first, JSON as fallback),
/// then validated.
pub fn load_config_file<P: AsRef<Path>>(path: P) -> Result<RegistryServerConfig, ConfigError> {
    let path_ref = path.as_ref();
    let content = fs::read_to_string(path_ref)?;
    let interpolated = interpolate(&content)?;

    let config = match serde_yaml::from_str::<RegistryServerConfig>(&interpolated) {
        Ok(config) => config,
        Err(yaml_err) => match serde_json::from_str::<RegistryServerConfig>(&interpolated) {
            Ok(config) => config,
            Err(json_err) => {
                return Err(ConfigError::ParseError {
                    path: path_ref.display().to_string(),
                    yaml_err: yaml_err.to_string(),
                    json_err: json_err.to_string(),
                });
            }
        },
    };

    config.validate()?;

    Ok(config)
}
