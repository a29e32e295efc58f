// Copyright 2025 JiangLong.
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

use thiserror::Error;
pub type Result<T> = std::result::Result<T, StaticPodError>;

#[derive(Error, Debug)]
pub enum StaticPodError {
    #[error("Invalid resource quantity: '{0}'")]
    InvalidQuantity(String),

    #[error("Host '{host}' did not resolve to any IP address")]
    UnresolvableHost { host: String },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Unknown control-plane component: '{0}'")]
    UnknownComponent(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),
}

impl StaticPodError {
    pub fn config_error(context: impl Into<String>) -> Self {
        Self::ConfigError(context.into())
    }

    pub fn unresolvable(host: impl Into<String>) -> Self {
        Self::UnresolvableHost { host: host.into() }
    }
}
